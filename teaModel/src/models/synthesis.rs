use serde::Serialize;

use crate::config::const_funcs::{calc_energy_cost, calc_percentage_of};
use crate::config::constants::SYNTHESIS_COOLING_DUTY_FRACTION;
use crate::config::stage_specs::SynthesisSpec;
use crate::core::balance::ProductionBasis;
use crate::error::TeaResult;
use super::stage::{Stage, StageCost, StageCostModel};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesisThroughput {
    pub nameplate_tpy: f64,
    pub actual_fuel_kg: f64,
}

impl StageCostModel for SynthesisSpec {
    type Throughput = SynthesisThroughput;

    const STAGE: Stage = Stage::Synthesis;

    fn required_throughput(&self, basis: &ProductionBasis) -> SynthesisThroughput {
        SynthesisThroughput {
            nameplate_tpy: basis.nameplate_tpy,
            actual_fuel_kg: basis.actual_fuel_kg(),
        }
    }

    fn compute(&self, throughput: &SynthesisThroughput, crf: f64) -> TeaResult<StageCost> {
        // Sized on nameplate output, no capacity-factor adjustment
        let installed_capex = throughput.nameplate_tpy * self.capex_per_tpy;
        let mut cost = StageCost::new(Self::STAGE, installed_capex, crf);

        cost.add_fixed("fixed_opex", calc_percentage_of(installed_capex, self.opex_fixed_percent));
        cost.add_fixed("maintenance", calc_percentage_of(installed_capex, self.maintenance_percent));

        // Recurring catalyst change-out, spread over the catalyst life
        cost.add_variable(
            "catalyst_replacement",
            installed_capex * self.catalyst_cost_fraction / self.catalyst_lifetime_years,
        );

        let process_mj = throughput.actual_fuel_kg * self.energy_mj_per_kg_fuel;
        cost.add_variable("heat", calc_energy_cost(process_mj, self.heat_price));
        cost.add_variable(
            "cooling",
            calc_energy_cost(process_mj * SYNTHESIS_COOLING_DUTY_FRACTION, self.cooling_price),
        );
        cost.add_variable(
            "water",
            throughput.actual_fuel_kg * self.water_l_per_kg_fuel * self.water_price,
        );

        Ok(cost)
    }
}
