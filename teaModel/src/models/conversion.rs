use serde::Serialize;

use crate::config::const_funcs::{calc_energy_cost, calc_percentage_of, calc_power_demand_kw};
use crate::config::stage_specs::ConversionSpec;
use crate::core::balance::ProductionBasis;
use crate::error::TeaResult;
use super::stage::{Stage, StageCost, StageCostModel};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionThroughput {
    pub fuel_kg: f64,
    pub syngas_kg: f64,
    pub co_kg: f64,
    pub h2_kg: f64,
    /// Electrolyser rating needed for each sub-stream, kW.
    pub co_power_kw: f64,
    pub h2_power_kw: f64,
}

impl ConversionSpec {
    /// Split a syngas mass into its CO and H2 parts at the configured CO:H2 mass ratio.
    pub fn split_syngas(&self, syngas_kg: f64) -> (f64, f64) {
        let ratio = self.co_h2_mass_ratio;
        let co_kg = syngas_kg * (ratio / (1.0 + ratio));
        let h2_kg = syngas_kg * (1.0 / (1.0 + ratio));
        (co_kg, h2_kg)
    }
}

impl StageCostModel for ConversionSpec {
    type Throughput = ConversionThroughput;

    const STAGE: Stage = Stage::Conversion;

    fn required_throughput(&self, basis: &ProductionBasis) -> ConversionThroughput {
        let fuel_kg = basis.actual_fuel_kg();
        let syngas_kg = fuel_kg * self.syngas_kg_per_kg_fuel;
        let (co_kg, h2_kg) = self.split_syngas(syngas_kg);

        ConversionThroughput {
            fuel_kg,
            syngas_kg,
            co_kg,
            h2_kg,
            co_power_kw: calc_power_demand_kw(co_kg * self.energy_co_mj_per_kg, basis.capacity_factor),
            h2_power_kw: calc_power_demand_kw(h2_kg * self.energy_h2_mj_per_kg, basis.capacity_factor),
        }
    }

    fn compute(&self, throughput: &ConversionThroughput, crf: f64) -> TeaResult<StageCost> {
        // Each electrolyser train carries its own per-kW price; both are summed before the CRF.
        let capex_co = throughput.co_power_kw * self.capex_co_per_kw;
        let capex_h2 = throughput.h2_power_kw * self.capex_h2_per_kw;
        let installed_capex = capex_co + capex_h2;
        let mut cost = StageCost::new(Self::STAGE, installed_capex, crf);

        cost.add_fixed("fixed_opex", calc_percentage_of(installed_capex, self.opex_fixed_percent));

        let electrolysis_mj = throughput.co_kg * self.energy_co_mj_per_kg
            + throughput.h2_kg * self.energy_h2_mj_per_kg;
        cost.add_variable("electricity", calc_energy_cost(electrolysis_mj, self.electricity_price));
        cost.add_variable(
            "water",
            throughput.syngas_kg * self.water_l_per_kg_syngas * self.water_price,
        );
        cost.add_variable(
            "catalyst",
            throughput.fuel_kg * self.catalyst_kg_per_kg_fuel * self.catalyst_price,
        );

        Ok(cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::economic::EconomicParameters;

    fn default_basis() -> ProductionBasis {
        ProductionBasis::from_economics(&EconomicParameters::default())
    }

    #[test]
    fn split_follows_mass_ratio() {
        let spec = ConversionSpec { co_h2_mass_ratio: 1.0, ..ConversionSpec::default() };
        assert_eq!(spec.split_syngas(10.0), (5.0, 5.0));

        let spec = ConversionSpec { co_h2_mass_ratio: 3.0, ..ConversionSpec::default() };
        let (co, h2) = spec.split_syngas(8.0);
        assert!((co - 6.0).abs() < 1e-12);
        assert!((h2 - 2.0).abs() < 1e-12);
    }

    #[test]
    fn capex_sums_both_electrolyser_trains() {
        let spec = ConversionSpec::default();
        let throughput = spec.required_throughput(&default_basis());
        let cost = spec.compute(&throughput, 1.0).unwrap();
        let expected = throughput.co_power_kw * 3000.0 + throughput.h2_power_kw * 1500.0;
        assert!((cost.installed_capex - expected).abs() < 1e-6);
        assert_eq!(cost.annualized_capex, cost.installed_capex);
    }

    #[test]
    fn default_conversion_costs_match_reference_run() {
        let spec = ConversionSpec::default();
        let crf = 0.10185220882315059;
        let cost = spec.compute(&spec.required_throughput(&default_basis()), crf).unwrap();
        assert!((cost.annualized_capex / 57_249_407.578444235 - 1.0).abs() < 1e-9);
        assert!((cost.opex() / 144_051_151.4495283 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn electricity_price_only_moves_variable_cost() {
        let cheap = ConversionSpec { electricity_price: 0.02, ..ConversionSpec::default() };
        let dear = ConversionSpec { electricity_price: 0.10, ..ConversionSpec::default() };
        let basis = default_basis();
        let a = cheap.compute(&cheap.required_throughput(&basis), 0.1).unwrap();
        let b = dear.compute(&dear.required_throughput(&basis), 0.1).unwrap();

        assert_eq!(a.installed_capex, b.installed_capex);
        assert_eq!(a.opex_fixed, b.opex_fixed);
        assert!(b.opex_variable > a.opex_variable);
    }
}
