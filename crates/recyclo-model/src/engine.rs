//! Recurrence engine implementing the [`FlowModel`] trait.
//!
//! Runs the per-cycle material balance for cycles `0..=n` in a single pass.
//! Each record is fully computed before it is appended; later cycles only
//! read earlier records.

use recyclo_core::constants::{PREALLOCATED_RECORDS, VIRGIN_PROPERTY};
use recyclo_core::error::ModelError;
use recyclo_core::traits::FlowModel;
use recyclo_core::types::{
    Column, CycleRecord, FlowTable, FlowTableBuilder, ModelParams, Parameter,
};
use recyclo_core::validation::CYCLES_TOO_LARGE;
use tracing::{debug, trace, warn};

use crate::blend::checked_denominator;

/// The production material-flow model.
///
/// Stateless; one instance can serve any number of concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct RecyclingEngine;

impl RecyclingEngine {
    /// Create a new RecyclingEngine.
    pub fn new() -> Self {
        Self
    }
}

/// Validate `params` and compute the flow table with a [`RecyclingEngine`].
pub fn recycling_model(params: &ModelParams) -> Result<FlowTable, ModelError> {
    RecyclingEngine::new().compute(params)
}

/// Savings credited to `cycle`, drawn from the two preceding records.
fn savings_for_cycle(table: &FlowTableBuilder, cycle: u32) -> f64 {
    let Some(prev) = cycle.checked_sub(1).and_then(|c| table.get(c)) else {
        return 0.0;
    };
    // X2 lags two cycles; cycle 1 has no such term.
    let lagged_x2 = if cycle > 1 {
        table.get(cycle - 2).map_or(0.0, |r| r.raw_material_saved_x2)
    } else {
        0.0
    };
    prev.raw_material_saved_x1 + prev.recycled_material + lagged_x2
}

/// Reject an intermediate that overflowed or became NaN.
fn finite(value: f64, cycle: u32, step: u32) -> Result<f64, ModelError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::DegenerateParameters { cycle, step })
    }
}

fn run(params: &ModelParams) -> Result<FlowTable, ModelError> {
    let w = params.total_weight;
    let r = params.recycled_fraction;
    let p = params.property_loss;
    let t0 = params.initial_thickness;
    let retention = params.property_retention();
    let collection = params.collection_rate();

    let mut table =
        FlowTableBuilder::with_capacity(params.record_count().min(PREALLOCATED_RECORDS));
    // denom(i) for the cycle about to be computed. Cycle 0 is pure virgin
    // material and does not go through the formula.
    let mut denom_current = VIRGIN_PROPERTY;

    for cycle in 0..=params.cycles {
        let step = cycle.checked_add(1).ok_or(ModelError::InvalidParameter {
            field: Parameter::Cycles,
            constraint: CYCLES_TOO_LARGE,
            value: f64::from(params.cycles),
        })?;
        // A denominator can be tiny without being zero (R = 1 and p < 1 decays
        // as (1 - p)^k), so the quotient itself is checked.
        let (property_of_raw_material, thickness) = if cycle == 0 {
            (VIRGIN_PROPERTY, t0)
        } else {
            (denom_current, finite(t0 / denom_current, cycle, cycle)?)
        };
        let material_used = w * thickness;
        let material_collected = material_used * collection;
        let property_of_collected = property_of_raw_material * retention;

        // Look-ahead: the recycled quantity of cycle i is sized by the
        // thickness of cycle i + 1, i.e. denom(i + 1), not denom(i).
        let denom_next = checked_denominator(r, p, step, cycle)?;
        let thickness_next = finite(t0 / denom_next, cycle, step)?;
        let recycled_material = thickness_next * r * w;

        let downcycled_material = material_collected - recycled_material;
        let raw_material_saved_x1 = property_of_collected * downcycled_material;
        let raw_material_saved_x2 =
            raw_material_saved_x1 * collection * property_of_collected * retention;

        let total_savings = savings_for_cycle(&table, cycle);
        let cumulative_savings = match cycle.checked_sub(1).and_then(|c| table.get(c)) {
            Some(prev) => prev.cumulative_savings + total_savings,
            None => 0.0,
        };

        trace!(
            cycle,
            thickness,
            recycled_material,
            cumulative_savings,
            "cycle computed"
        );

        let record = CycleRecord {
            cycle,
            property_of_raw_material,
            thickness,
            material_used,
            material_collected,
            property_of_collected,
            recycled_material,
            downcycled_material,
            raw_material_saved_x1,
            raw_material_saved_x2,
            total_savings,
            cumulative_savings,
        };
        if !Column::ALL.iter().all(|c| c.value(&record).is_finite()) {
            return Err(ModelError::DegenerateParameters { cycle, step });
        }
        table.push(record);
        denom_current = denom_next;
    }

    Ok(table.finish())
}

impl FlowModel for RecyclingEngine {
    fn blend_denominator(&self, params: &ModelParams, step: u32) -> Result<f64, ModelError> {
        checked_denominator(params.recycled_fraction, params.property_loss, step, step)
    }

    fn compute(&self, params: &ModelParams) -> Result<FlowTable, ModelError> {
        params.validate()?;
        debug!(
            total_weight = params.total_weight,
            recycled_fraction = params.recycled_fraction,
            property_loss = params.property_loss,
            cycles = params.cycles,
            material_loss = params.material_loss,
            initial_thickness = params.initial_thickness,
            "computing material flow"
        );

        let table = run(params).inspect_err(|e| warn!("model undefined: {e}"))?;
        debug!(
            records = table.len(),
            cumulative_savings = table.final_cumulative_savings(),
            "material flow computed"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn engine() -> RecyclingEngine {
        RecyclingEngine::new()
    }

    fn params(r: f64, p: f64, n: u32, l: f64) -> ModelParams {
        ModelParams {
            recycled_fraction: r,
            property_loss: p,
            cycles: n,
            material_loss: l,
            ..ModelParams::default()
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS * b.abs().max(1.0)
    }

    // --- default scenario ---

    #[test]
    fn default_scenario_record_zero() {
        let table = engine().compute(&ModelParams::default()).unwrap();
        assert_eq!(table.len(), 11);
        let r0 = &table[0];
        assert_eq!(r0.cycle, 0);
        assert_eq!(r0.property_of_raw_material, 1.0);
        assert_eq!(r0.thickness, 1.0);
        assert_eq!(r0.material_used, 1000.0);
        assert_eq!(r0.material_collected, 800.0);
        assert_eq!(r0.total_savings, 0.0);
        assert_eq!(r0.cumulative_savings, 0.0);
    }

    #[test]
    fn default_scenario_look_ahead_values() {
        let table = engine().compute(&ModelParams::default()).unwrap();
        let r0 = &table[0];
        // denom(1) = 0.9, thickness_next = 1 / 0.9
        let recycled = 1.0 / 0.9 * 0.5 * 1000.0;
        assert!(close(r0.recycled_material, recycled));
        assert!(close(r0.downcycled_material, 800.0 - recycled));
        assert!(close(r0.property_of_collected, 0.8));
        let x1 = 0.8 * (800.0 - recycled);
        assert!(close(r0.raw_material_saved_x1, x1));
        assert!(close(r0.raw_material_saved_x2, x1 * 0.8 * 0.8 * 0.8));
    }

    #[test]
    fn default_scenario_cycle_one_and_two() {
        let table = engine().compute(&ModelParams::default()).unwrap();
        let (r0, r1, r2) = (&table[0], &table[1], &table[2]);

        assert!(close(r1.property_of_raw_material, 0.9));
        assert!(close(r1.thickness, 1.0 / 0.9));
        // cycle 1 recycles with denom(2) = 0.86
        assert!(close(r1.recycled_material, 1.0 / 0.86 * 0.5 * 1000.0));
        assert_eq!(
            r1.total_savings,
            r0.raw_material_saved_x1 + r0.recycled_material
        );
        assert_eq!(
            r2.total_savings,
            r1.raw_material_saved_x1 + r1.recycled_material + r0.raw_material_saved_x2
        );
    }

    #[test]
    fn thickness_matches_next_cycle_recycling() {
        let p = ModelParams::default();
        let table = engine().compute(&p).unwrap();
        for pair in table.records().windows(2) {
            let expected = pair[1].thickness * p.recycled_fraction * p.total_weight;
            assert!(close(pair[0].recycled_material, expected));
        }
    }

    // --- structural invariants ---

    #[test]
    fn cycle_fields_run_zero_to_n() {
        let table = engine().compute(&params(0.3, 0.1, 7, 0.05)).unwrap();
        let cycles: Vec<u32> = table.iter().map(|r| r.cycle).collect();
        assert_eq!(cycles, (0..=7).collect::<Vec<_>>());
    }

    #[test]
    fn single_cycle_has_no_lagged_term() {
        let table = engine().compute(&params(0.5, 0.2, 1, 0.2)).unwrap();
        assert_eq!(table.len(), 2);
        let (r0, r1) = (&table[0], &table[1]);
        assert_eq!(
            r1.total_savings,
            r0.raw_material_saved_x1 + r0.recycled_material
        );
        assert_eq!(r1.cumulative_savings, r1.total_savings);
    }

    #[test]
    fn no_recycling_keeps_virgin_thickness() {
        let table = engine().compute(&params(0.0, 0.2, 10, 0.2)).unwrap();
        for rec in &table {
            assert_eq!(rec.property_of_raw_material, 1.0);
            assert_eq!(rec.thickness, 1.0);
            assert_eq!(rec.recycled_material, 0.0);
            assert_eq!(rec.downcycled_material, rec.material_collected);
        }
    }

    #[test]
    fn singular_parameters_do_not_crash() {
        let table = engine().compute(&params(1.0, 0.0, 5, 0.2)).unwrap();
        for rec in &table {
            assert!(rec.thickness.is_finite());
            assert_eq!(rec.thickness, 1.0);
            assert_eq!(rec.recycled_material, 1000.0);
        }
    }

    #[test]
    fn zero_weight_yields_zero_flows() {
        let p = ModelParams {
            total_weight: 0.0,
            ..ModelParams::default()
        };
        let table = engine().compute(&p).unwrap();
        for rec in &table {
            assert_eq!(rec.material_used, 0.0);
            assert_eq!(rec.cumulative_savings, 0.0);
        }
    }

    // --- failures ---

    #[test]
    fn degenerate_reports_cycle_of_look_ahead() {
        let err = engine().compute(&params(1.0, 1.0, 3, 0.2)).unwrap_err();
        assert_eq!(err, ModelError::DegenerateParameters { cycle: 0, step: 1 });
    }

    #[test]
    fn invalid_recycled_fraction() {
        let err = engine().compute(&params(1.5, 0.2, 10, 0.2)).unwrap_err();
        assert_eq!(err.field(), Some(Parameter::RecycledFraction));
    }

    #[test]
    fn invalid_cycle_count() {
        let err = engine().compute(&params(0.5, 0.2, 0, 0.2)).unwrap_err();
        assert_eq!(err.field(), Some(Parameter::Cycles));
    }

    // --- trait surface ---

    #[test]
    fn engine_is_object_safe() {
        let e = engine();
        let dyn_e: &dyn FlowModel = &e;
        assert_eq!(dyn_e.blend_denominator(&ModelParams::default(), 0).unwrap(), 1.0);
    }

    #[test]
    fn blend_denominator_reports_step_as_cycle() {
        let err = engine()
            .blend_denominator(&params(1.0, 1.0, 3, 0.2), 2)
            .unwrap_err();
        assert_eq!(err, ModelError::DegenerateParameters { cycle: 2, step: 2 });
    }

    #[test]
    fn total_cumulative_savings_matches_last_record() {
        let p = ModelParams::default();
        let table = engine().compute(&p).unwrap();
        let total = engine().total_cumulative_savings(&p).unwrap();
        assert_eq!(total, table.last().unwrap().cumulative_savings);
    }

    #[test]
    fn free_function_matches_engine() {
        let p = params(0.4, 0.3, 6, 0.1);
        assert_eq!(recycling_model(&p).unwrap(), engine().compute(&p).unwrap());
    }

    // --- late degeneracy ---

    #[test]
    fn vanishing_blend_overflows_thickness_late() {
        // R = 1, p = 0.9: denom(306) = 1e-306, so W * T_0 / denom overflows.
        let err = engine().compute(&params(1.0, 0.9, 320, 0.2)).unwrap_err();
        assert_eq!(err, ModelError::DegenerateParameters { cycle: 305, step: 306 });
    }

    #[test]
    fn near_zero_blend_reports_cycle_and_step() {
        // R = 1, p = 0.99: denom(153) = 1e-306 is nonzero but the recycled mass is not finite.
        let err = engine().compute(&params(1.0, 0.99, 200, 0.2)).unwrap_err();
        assert_eq!(err, ModelError::DegenerateParameters { cycle: 152, step: 153 });
        assert_eq!(err.cycle(), Some(152));
    }

    #[test]
    fn short_run_before_overflow_is_finite() {
        let table = engine().compute(&params(1.0, 0.9, 300, 0.2)).unwrap();
        assert_eq!(table.len(), 301);
        for rec in &table {
            assert!(Column::ALL.iter().all(|c| c.value(rec).is_finite()));
        }
    }

    #[test]
    fn huge_cycle_count_fails_without_reserving() {
        // Degeneracy stops the run long before n; nothing is sized by n.
        let err = engine()
            .compute(&params(1.0, 0.99, u32::MAX - 1, 0.2))
            .unwrap_err();
        assert_eq!(err.cycle(), Some(152));
    }

    #[test]
    fn max_cycle_count_is_rejected() {
        let err = engine().compute(&params(0.5, 0.2, u32::MAX, 0.2)).unwrap_err();
        assert_eq!(err.field(), Some(Parameter::Cycles));
    }

    // --- proptest ---

    fn any_params() -> impl Strategy<Value = ModelParams> {
        (
            0.0f64..1e6,
            0.0f64..=1.0,
            0.0f64..=1.0,
            1u32..400,
            0.0f64..=1.0,
            0.0f64..10.0,
        )
            .prop_map(|(w, r, p, n, l, t)| ModelParams {
                total_weight: w,
                recycled_fraction: r,
                property_loss: p,
                cycles: n,
                material_loss: l,
                initial_thickness: t,
            })
    }

    /// Like [`any_params`], with R = 1 drawn often.
    fn edge_params() -> impl Strategy<Value = ModelParams> {
        (any_params(), prop::bool::ANY).prop_map(|(mut params, full)| {
            if full {
                params.recycled_fraction = 1.0;
            }
            params
        })
    }

    proptest! {
        #[test]
        fn finite_table_or_degenerate(params in edge_params()) {
            match engine().compute(&params) {
                Ok(table) => {
                    prop_assert_eq!(table.len(), params.cycles as usize + 1);
                    for rec in &table {
                        for column in Column::ALL {
                            prop_assert!(column.value(rec).is_finite());
                        }
                    }
                }
                Err(ModelError::DegenerateParameters { cycle, step }) => {
                    prop_assert!(cycle <= params.cycles);
                    prop_assert!(step == cycle || step == cycle + 1);
                }
                Err(e) => prop_assert!(false, "unexpected error: {}", e),
            }
        }

        #[test]
        fn record_count_is_n_plus_one(params in edge_params()) {
            if let Ok(table) = engine().compute(&params) {
                prop_assert_eq!(table.len(), params.cycles as usize + 1);
                for (i, rec) in table.iter().enumerate() {
                    prop_assert_eq!(rec.cycle as usize, i);
                }
            }
        }

        #[test]
        fn cumulative_is_telescoping_sum(params in edge_params()) {
            if let Ok(table) = engine().compute(&params) {
                prop_assert_eq!(table[0].total_savings, 0.0);
                prop_assert_eq!(table[0].cumulative_savings, 0.0);
                for pair in table.records().windows(2) {
                    prop_assert_eq!(
                        pair[1].cumulative_savings,
                        pair[0].cumulative_savings + pair[1].total_savings
                    );
                }
            }
        }

        #[test]
        fn material_balance_identities(params in edge_params()) {
            if let Ok(table) = engine().compute(&params) {
                let collection = 1.0 - params.material_loss;
                for rec in &table {
                    prop_assert_eq!(rec.material_collected, rec.material_used * collection);
                    prop_assert_eq!(
                        rec.downcycled_material,
                        rec.material_collected - rec.recycled_material
                    );
                    prop_assert_eq!(rec.material_used, params.total_weight * rec.thickness);
                }
            }
        }

        #[test]
        fn below_full_recycling_never_degenerates(params in any_params()) {
            // R < 1 keeps denom(k) >= 1 - R.
            prop_assume!(params.recycled_fraction < 0.999);
            prop_assert!(engine().compute(&params).is_ok());
        }

        #[test]
        fn deterministic(params in edge_params()) {
            prop_assert_eq!(engine().compute(&params), engine().compute(&params));
        }
    }
}
