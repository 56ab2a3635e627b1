use serde::Serialize;

use crate::config::stage_specs::DistributionSpec;
use crate::core::balance::ProductionBasis;
use crate::error::TeaResult;
use super::stage::{Stage, StageCost, StageCostModel};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionThroughput {
    pub actual_tpy: f64,
}

impl StageCostModel for DistributionSpec {
    type Throughput = DistributionThroughput;

    const STAGE: Stage = Stage::Distribution;

    fn required_throughput(&self, basis: &ProductionBasis) -> DistributionThroughput {
        DistributionThroughput {
            actual_tpy: basis.actual_tpy,
        }
    }

    fn compute(&self, throughput: &DistributionThroughput, crf: f64) -> TeaResult<StageCost> {
        let tonnes = throughput.actual_tpy;
        let mut cost = StageCost::new(Self::STAGE, 0.0, crf);

        cost.add_variable(
            "transport",
            tonnes * self.transport_distance_km * self.transport_cost_per_tkm,
        );
        cost.add_variable("storage", tonnes * self.storage_cost_per_t);
        cost.add_variable("blending", tonnes * self.blending_cost_per_t);

        Ok(cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distribution_has_no_capital_cost() {
        let spec = DistributionSpec::default();
        let cost = spec.compute(&DistributionThroughput { actual_tpy: 90_000.0 }, 0.5).unwrap();
        assert_eq!(cost.installed_capex, 0.0);
        assert_eq!(cost.annualized_capex, 0.0);
        assert_eq!(cost.opex_fixed, 0.0);
    }

    #[test]
    fn per_tonne_charges_add_up() {
        let spec = DistributionSpec::default();
        let cost = spec.compute(&DistributionThroughput { actual_tpy: 90_000.0 }, 0.1).unwrap();
        // 90 kt × (500 km × 0.15 + 50 + 20) = 13.05 M USD
        assert!((cost.opex_variable - 13_050_000.0).abs() < 1e-6);
        assert_eq!(cost.total(), cost.opex_variable);
    }
}
