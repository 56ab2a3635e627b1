use serde::Serialize;

use crate::config::constants::KG_PER_TONNE;
use crate::config::economic::EconomicParameters;
use crate::config::scenario::Scenario;
use crate::models::capture::CaptureThroughput;
use crate::models::conversion::ConversionThroughput;
use crate::models::distribution::DistributionThroughput;
use crate::models::stage::StageCostModel;
use crate::models::synthesis::SynthesisThroughput;
use crate::utils::logging::{self, EvaluationType, OperationCategory};

/// Nameplate and actual fuel output that every stage is sized and billed against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProductionBasis {
    pub nameplate_tpy: f64,
    pub capacity_factor: f64,
    /// nameplate × capacity factor, in t/year
    pub actual_tpy: f64,
}

impl ProductionBasis {
    pub fn from_economics(economics: &EconomicParameters) -> Self {
        let nameplate_tpy = economics.plant_capacity_tpy();
        let capacity_factor = economics.capacity_factor();
        Self {
            nameplate_tpy,
            capacity_factor,
            actual_tpy: nameplate_tpy * capacity_factor,
        }
    }

    pub fn actual_fuel_kg(&self) -> f64 {
        self.actual_tpy * KG_PER_TONNE
    }

    pub fn nameplate_fuel_kg(&self) -> f64 {
        self.nameplate_tpy * KG_PER_TONNE
    }
}

/// Per-stage throughput for one evaluation, all derived from a single production basis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MassBalance {
    pub basis: ProductionBasis,
    pub capture: CaptureThroughput,
    pub conversion: ConversionThroughput,
    pub synthesis: SynthesisThroughput,
    pub distribution: DistributionThroughput,
}

impl MassBalance {
    /// Propagate the production target upstream. Stages are resolved in chain order,
    /// each from the same basis, so no stage sees another stage's cached figures.
    pub fn compute(scenario: &Scenario) -> Self {
        let _timing = logging::start_timing("mass_balance",
            OperationCategory::Evaluation { subcategory: EvaluationType::MassBalance });
        let basis = ProductionBasis::from_economics(scenario.economics());

        let capture = scenario.capture().required_throughput(&basis);
        let conversion = scenario.conversion().required_throughput(&basis);
        let synthesis = scenario.synthesis().required_throughput(&basis);
        let distribution = scenario.distribution().required_throughput(&basis);

        tracing::debug!(
            actual_tpy = basis.actual_tpy,
            co2_kg = capture.actual_co2_kg,
            syngas_kg = conversion.syngas_kg,
            "mass balance resolved"
        );

        Self {
            basis,
            capture,
            conversion,
            synthesis,
            distribution,
        }
    }
}
