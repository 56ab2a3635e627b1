//! Property-based checks of the cost chain over randomly drawn economic inputs.

use esaf_tea::config::const_funcs::calc_capital_recovery_factor;
use esaf_tea::{evaluate, EconomicParameters, Scenario, SweepParameter};
use proptest::prelude::*;

fn scenario_for(rate: f64, lifetime: u32, capacity_factor: f64, capacity: f64) -> Scenario {
    let economics = EconomicParameters::new(rate, lifetime, capacity_factor, capacity).unwrap();
    Scenario::default().with_economics(economics)
}

proptest! {
    /// Actual output is nameplate times capacity factor with no rounding drift.
    #[test]
    fn actual_production_is_exact(
        capacity_factor in 0.05f64..1.0,
        capacity in 1.0e3f64..1.0e7,
    ) {
        let results = evaluate(&scenario_for(0.08, 20, capacity_factor, capacity)).unwrap();
        prop_assert_eq!(results.annual_production_tonnes, capacity * capacity_factor);
    }

    /// Stage totals close exactly and the CAPEX/OPEX split closes to 1e-9 relative.
    #[test]
    fn aggregation_closes(
        rate in 0.0f64..0.3,
        lifetime in 1u32..60,
        capacity_factor in 0.05f64..1.0,
        capacity in 1.0e3f64..1.0e7,
    ) {
        let results = evaluate(&scenario_for(rate, lifetime, capacity_factor, capacity)).unwrap();
        let stage_sum: f64 = results.total_costs.iter().map(|(_, v)| v).sum();
        prop_assert_eq!(stage_sum, results.total_costs.total);

        for (stage, total) in results.total_costs.iter() {
            prop_assert_eq!(total, results.capex_breakdown.get(stage) + results.opex_breakdown.get(stage));
        }

        let split = results.capex_breakdown.total + results.opex_breakdown.total;
        prop_assert!((split - results.total_costs.total).abs() <= 1e-9 * results.total_costs.total);
        prop_assert!(results.levelized_cost.is_finite() && results.levelized_cost > 0.0);
    }

    /// Two evaluations of the same scenario are bit-identical.
    #[test]
    fn evaluation_is_idempotent(
        rate in 0.0f64..0.3,
        capacity_factor in 0.05f64..1.0,
    ) {
        let scenario = scenario_for(rate, 25, capacity_factor, 50_000.0);
        prop_assert_eq!(evaluate(&scenario).unwrap(), evaluate(&scenario).unwrap());
    }

    /// A dearer grid never makes the fuel cheaper.
    #[test]
    fn electricity_price_is_monotone(low in 0.0f64..0.5, delta in 0.0f64..0.5) {
        let base = Scenario::default();
        let cheap = evaluate(&base.with_override(SweepParameter::ElectricityPrice, low).unwrap()).unwrap();
        let dear = evaluate(&base.with_override(SweepParameter::ElectricityPrice, low + delta).unwrap()).unwrap();
        prop_assert!(dear.levelized_cost >= cheap.levelized_cost);
    }

    /// Zero discount rate degenerates to straight-line recovery.
    #[test]
    fn zero_rate_crf_is_reciprocal_lifetime(lifetime in 1u32..100) {
        prop_assert_eq!(calc_capital_recovery_factor(0.0, lifetime).unwrap(), 1.0 / lifetime as f64);
    }
}
