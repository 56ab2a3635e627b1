use serde::Serialize;

use crate::error::RangeWarning;
use crate::models::stage::{Stage, StageCost};

/// Annual USD per stage with a total that is always the sum of the four stage entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub capture: f64,
    pub conversion: f64,
    pub synthesis: f64,
    pub distribution: f64,
    pub total: f64,
}

impl CostBreakdown {
    pub fn from_stages(mut value_of: impl FnMut(Stage) -> f64) -> Self {
        let capture = value_of(Stage::Capture);
        let conversion = value_of(Stage::Conversion);
        let synthesis = value_of(Stage::Synthesis);
        let distribution = value_of(Stage::Distribution);
        Self {
            capture,
            conversion,
            synthesis,
            distribution,
            total: capture + conversion + synthesis + distribution,
        }
    }

    pub fn get(&self, stage: Stage) -> f64 {
        match stage {
            Stage::Capture => self.capture,
            Stage::Conversion => self.conversion,
            Stage::Synthesis => self.synthesis,
            Stage::Distribution => self.distribution,
        }
    }

    /// Stage entries in chain order, without the total.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, f64)> + '_ {
        Stage::ALL.iter().map(move |&stage| (stage, self.get(stage)))
    }
}

/// Outcome of one evaluation. Replaced wholesale on each evaluation, never merged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Results {
    pub capex_breakdown: CostBreakdown,
    pub opex_breakdown: CostBreakdown,
    pub total_costs: CostBreakdown,
    /// USD/MJ
    pub levelized_cost: f64,
    pub annual_production_mj: f64,
    pub annual_production_tonnes: f64,
    pub crf: f64,
    pub stage_costs: Vec<StageCost>,
    pub warnings: Vec<RangeWarning>,
}

impl Results {
    pub fn stage_cost(&self, stage: Stage) -> Option<&StageCost> {
        self.stage_costs.iter().find(|cost| cost.stage == stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_total_is_sum_of_stages() {
        let breakdown = CostBreakdown::from_stages(|stage| match stage {
            Stage::Capture => 1.0,
            Stage::Conversion => 2.0,
            Stage::Synthesis => 3.0,
            Stage::Distribution => 4.0,
        });
        assert_eq!(breakdown.total, 10.0);
        assert_eq!(breakdown.get(Stage::Synthesis), 3.0);
        let stages: Vec<_> = breakdown.iter().map(|(stage, _)| stage).collect();
        assert_eq!(stages, Stage::ALL.to_vec());
    }
}
