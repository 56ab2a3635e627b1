use crate::analysis::results::{CostBreakdown, Results};
use crate::config::constants::{ENERGY_DENSITY_MJ_PER_KG, KG_PER_TONNE};
use crate::config::scenario::Scenario;
use crate::core::balance::MassBalance;
use crate::error::{TeaError, TeaResult};
use crate::models::stage::{Stage, StageCostModel};
use crate::utils::logging::{self, EvaluationType, OperationCategory};

/// Evaluate a scenario without progress narration.
pub fn evaluate(scenario: &Scenario) -> TeaResult<Results> {
    evaluate_scenario(scenario, true)
}

/// Run the full chain: mass balance, the four stage models, aggregation and levelisation.
///
/// `silent` only suppresses the info-level narration; the numbers are identical either way.
pub fn evaluate_scenario(scenario: &Scenario, silent: bool) -> TeaResult<Results> {
    let _timing = logging::start_timing("evaluate",
        OperationCategory::Evaluation { subcategory: EvaluationType::Aggregation });

    let economics = scenario.economics();
    let crf = economics.crf();
    let balance = MassBalance::compute(scenario);

    if !silent {
        tracing::info!(
            nameplate_tpy = balance.basis.nameplate_tpy,
            actual_tpy = balance.basis.actual_tpy,
            crf,
            "evaluating DAC -> electrolysis -> FT -> distribution chain"
        );
    }

    let stage_costs = {
        let _timing = logging::start_timing("compute_stage_costs",
            OperationCategory::Evaluation { subcategory: EvaluationType::StageCosts });
        vec![
            scenario.capture().compute(&balance.capture, crf)?,
            scenario.conversion().compute(&balance.conversion, crf)?,
            scenario.synthesis().compute(&balance.synthesis, crf)?,
            scenario.distribution().compute(&balance.distribution, crf)?,
        ]
    };

    // Indexed by Stage discriminant, which follows the chain order above
    let stage = |stage: Stage| &stage_costs[stage as usize];
    let capex_breakdown = CostBreakdown::from_stages(|s| stage(s).annualized_capex);
    let opex_breakdown = CostBreakdown::from_stages(|s| stage(s).opex());
    let total_costs = CostBreakdown::from_stages(|s| capex_breakdown.get(s) + opex_breakdown.get(s));

    let annual_production_tonnes = balance.basis.actual_tpy;
    let annual_production_mj = annual_production_tonnes * KG_PER_TONNE * ENERGY_DENSITY_MJ_PER_KG;
    if !(annual_production_mj.is_finite() && annual_production_mj > 0.0) {
        return Err(TeaError::domain(
            "annual_production_mj",
            annual_production_mj,
            "annual energy output must be positive to levelise costs",
        ));
    }
    let levelized_cost = total_costs.total / annual_production_mj;

    let warnings = scenario.range_warnings();
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    if !silent {
        for cost in &stage_costs {
            tracing::info!(
                stage = %cost.stage,
                capex_musd = cost.annualized_capex / 1e6,
                opex_musd = cost.opex() / 1e6,
                "stage cost"
            );
        }
        tracing::info!(levelized_cost, "levelized cost (USD/MJ)");
    }
    tracing::debug!(total_usd = total_costs.total, annual_production_mj, "evaluation complete");

    Ok(Results {
        capex_breakdown,
        opex_breakdown,
        total_costs,
        levelized_cost,
        annual_production_mj,
        annual_production_tonnes,
        crf,
        stage_costs,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::economic::EconomicParameters;

    #[test]
    fn default_scenario_reproduces_reference_levelized_cost() {
        let results = evaluate(&Scenario::default()).unwrap();
        assert!((results.levelized_cost / 0.2160309285033406 - 1.0).abs() < 1e-9);
        assert_eq!(results.annual_production_tonnes, 90_000.0);
        assert_eq!(results.annual_production_mj, 3.87e9);
    }

    #[test]
    fn stage_totals_close_over_capex_and_opex() {
        let results = evaluate(&Scenario::default()).unwrap();
        for stage in Stage::ALL {
            assert_eq!(
                results.total_costs.get(stage),
                results.capex_breakdown.get(stage) + results.opex_breakdown.get(stage)
            );
        }
        let sum: f64 = results.total_costs.iter().map(|(_, v)| v).sum();
        assert_eq!(sum, results.total_costs.total);

        let split = results.capex_breakdown.total + results.opex_breakdown.total;
        assert!((split - results.total_costs.total).abs() <= results.total_costs.total * 1e-9);
    }

    #[test]
    fn levelized_cost_is_total_over_energy() {
        let results = evaluate(&Scenario::default()).unwrap();
        assert_eq!(results.levelized_cost, results.total_costs.total / results.annual_production_mj);
    }

    #[test]
    fn silent_flag_does_not_change_numbers() {
        let scenario = Scenario::default();
        assert_eq!(evaluate_scenario(&scenario, false).unwrap(), evaluate_scenario(&scenario, true).unwrap());
    }

    #[test]
    fn out_of_range_capacity_factor_is_reported_not_fatal() {
        let economics = EconomicParameters::new(0.08, 20, 1.05, 100_000.0).unwrap();
        let results = evaluate(&Scenario::default().with_economics(economics)).unwrap();
        assert_eq!(results.warnings.len(), 1);
        assert!(results.levelized_cost > 0.0);
    }

    #[test]
    fn stage_costs_are_listed_in_chain_order() {
        let results = evaluate(&Scenario::default()).unwrap();
        let order: Vec<Stage> = results.stage_costs.iter().map(|c| c.stage).collect();
        assert_eq!(order, Stage::ALL.to_vec());
        assert_eq!(results.stage_cost(Stage::Distribution).unwrap().annualized_capex, 0.0);
    }
}
