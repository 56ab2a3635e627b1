use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::const_funcs::{require_finite_non_negative, require_positive};
use crate::config::constants::*;
use crate::error::{RangeWarning, TeaResult};

/// Direct air capture of CO2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureSpec {
    pub capex_per_tco2: f64,                // USD per t-CO2/year of capture capacity
    pub opex_fixed_percent: f64,            // % of CAPEX per year
    pub electricity_price: f64,             // USD/kWh
    pub heat_price: f64,                    // USD/kWh thermal
    pub water_price: f64,                   // USD/L
    pub electricity_mj_per_kg_co2: f64,
    pub heat_mj_per_kg_co2: f64,
    pub water_l_per_kg_co2: f64,
    pub co2_per_kg_fuel: f64,               // Stoichiometric kg CO2 per kg fuel
}

impl Default for CaptureSpec {
    fn default() -> Self {
        Self {
            capex_per_tco2: CAPTURE_CAPEX_PER_TCO2,
            opex_fixed_percent: CAPTURE_FIXED_OPEX_PERCENT,
            electricity_price: DEFAULT_ELECTRICITY_PRICE,
            heat_price: DEFAULT_HEAT_PRICE,
            water_price: DEFAULT_WATER_PRICE,
            electricity_mj_per_kg_co2: CAPTURE_ELECTRICITY_MJ_PER_KG_CO2,
            heat_mj_per_kg_co2: CAPTURE_HEAT_MJ_PER_KG_CO2,
            water_l_per_kg_co2: CAPTURE_WATER_L_PER_KG_CO2,
            co2_per_kg_fuel: CAPTURE_CO2_PER_KG_FUEL,
        }
    }
}

impl CaptureSpec {
    pub fn validate(&self) -> TeaResult<()> {
        require_finite_non_negative("capture.capex_per_tco2", self.capex_per_tco2)?;
        require_finite_non_negative("capture.opex_fixed_percent", self.opex_fixed_percent)?;
        require_finite_non_negative("capture.electricity_price", self.electricity_price)?;
        require_finite_non_negative("capture.heat_price", self.heat_price)?;
        require_finite_non_negative("capture.water_price", self.water_price)?;
        require_finite_non_negative("capture.electricity_mj_per_kg_co2", self.electricity_mj_per_kg_co2)?;
        require_finite_non_negative("capture.heat_mj_per_kg_co2", self.heat_mj_per_kg_co2)?;
        require_finite_non_negative("capture.water_l_per_kg_co2", self.water_l_per_kg_co2)?;
        require_finite_non_negative("capture.co2_per_kg_fuel", self.co2_per_kg_fuel)
    }

    pub fn range_warnings(&self) -> Vec<RangeWarning> {
        RangeWarning::check("capture.electricity_price", self.electricity_price, ELECTRICITY_PRICE_RANGE)
            .into_iter()
            .collect()
    }
}

/// CO2 electrolysis to CO plus water electrolysis to H2, together producing syngas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionSpec {
    pub capex_co_per_kw: f64,
    pub capex_h2_per_kw: f64,
    pub opex_fixed_percent: f64,
    pub electricity_price: f64,
    pub water_price: f64,
    pub catalyst_price: f64,                // USD/kg catalyst
    pub energy_co_mj_per_kg: f64,
    pub energy_h2_mj_per_kg: f64,
    pub water_l_per_kg_syngas: f64,
    pub catalyst_kg_per_kg_fuel: f64,
    pub co_h2_mass_ratio: f64,
    pub syngas_kg_per_kg_fuel: f64,
}

impl Default for ConversionSpec {
    fn default() -> Self {
        Self {
            capex_co_per_kw: CONVERSION_CAPEX_CO_PER_KW,
            capex_h2_per_kw: CONVERSION_CAPEX_H2_PER_KW,
            opex_fixed_percent: CONVERSION_FIXED_OPEX_PERCENT,
            electricity_price: DEFAULT_ELECTRICITY_PRICE,
            water_price: DEFAULT_WATER_PRICE,
            catalyst_price: CONVERSION_CATALYST_PRICE,
            energy_co_mj_per_kg: CONVERSION_ENERGY_CO_MJ_PER_KG,
            energy_h2_mj_per_kg: CONVERSION_ENERGY_H2_MJ_PER_KG,
            water_l_per_kg_syngas: CONVERSION_WATER_L_PER_KG_SYNGAS,
            catalyst_kg_per_kg_fuel: CONVERSION_CATALYST_KG_PER_KG_FUEL,
            co_h2_mass_ratio: CONVERSION_CO_H2_MASS_RATIO,
            syngas_kg_per_kg_fuel: CONVERSION_SYNGAS_KG_PER_KG_FUEL,
        }
    }
}

impl ConversionSpec {
    pub fn validate(&self) -> TeaResult<()> {
        require_finite_non_negative("conversion.capex_co_per_kw", self.capex_co_per_kw)?;
        require_finite_non_negative("conversion.capex_h2_per_kw", self.capex_h2_per_kw)?;
        require_finite_non_negative("conversion.opex_fixed_percent", self.opex_fixed_percent)?;
        require_finite_non_negative("conversion.electricity_price", self.electricity_price)?;
        require_finite_non_negative("conversion.water_price", self.water_price)?;
        require_finite_non_negative("conversion.catalyst_price", self.catalyst_price)?;
        require_finite_non_negative("conversion.energy_co_mj_per_kg", self.energy_co_mj_per_kg)?;
        require_finite_non_negative("conversion.energy_h2_mj_per_kg", self.energy_h2_mj_per_kg)?;
        require_finite_non_negative("conversion.water_l_per_kg_syngas", self.water_l_per_kg_syngas)?;
        require_finite_non_negative("conversion.catalyst_kg_per_kg_fuel", self.catalyst_kg_per_kg_fuel)?;
        require_finite_non_negative("conversion.co_h2_mass_ratio", self.co_h2_mass_ratio)?;
        require_finite_non_negative("conversion.syngas_kg_per_kg_fuel", self.syngas_kg_per_kg_fuel)
    }

    pub fn range_warnings(&self) -> Vec<RangeWarning> {
        RangeWarning::check("conversion.electricity_price", self.electricity_price, ELECTRICITY_PRICE_RANGE)
            .into_iter()
            .collect()
    }
}

/// Fischer-Tropsch synthesis of syngas into synthetic kerosene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisSpec {
    pub capex_per_tpy: f64,                 // USD per t/year of nameplate output
    pub opex_fixed_percent: f64,
    pub catalyst_cost_fraction: f64,        // Catalyst charge as a fraction of CAPEX
    pub heat_price: f64,
    pub cooling_price: f64,
    pub maintenance_percent: f64,
    pub energy_mj_per_kg_fuel: f64,
    pub catalyst_lifetime_years: f64,
    pub water_l_per_kg_fuel: f64,
    pub water_price: f64,
}

impl Default for SynthesisSpec {
    fn default() -> Self {
        Self {
            capex_per_tpy: SYNTHESIS_CAPEX_PER_TPY,
            opex_fixed_percent: SYNTHESIS_FIXED_OPEX_PERCENT,
            catalyst_cost_fraction: SYNTHESIS_CATALYST_COST_FRACTION,
            heat_price: DEFAULT_HEAT_PRICE,
            cooling_price: SYNTHESIS_COOLING_PRICE,
            maintenance_percent: SYNTHESIS_MAINTENANCE_PERCENT,
            energy_mj_per_kg_fuel: SYNTHESIS_ENERGY_MJ_PER_KG_FUEL,
            catalyst_lifetime_years: SYNTHESIS_CATALYST_LIFETIME_YEARS,
            water_l_per_kg_fuel: SYNTHESIS_WATER_L_PER_KG_FUEL,
            water_price: DEFAULT_WATER_PRICE,
        }
    }
}

impl SynthesisSpec {
    pub fn validate(&self) -> TeaResult<()> {
        require_finite_non_negative("synthesis.capex_per_tpy", self.capex_per_tpy)?;
        require_finite_non_negative("synthesis.opex_fixed_percent", self.opex_fixed_percent)?;
        require_finite_non_negative("synthesis.catalyst_cost_fraction", self.catalyst_cost_fraction)?;
        require_finite_non_negative("synthesis.heat_price", self.heat_price)?;
        require_finite_non_negative("synthesis.cooling_price", self.cooling_price)?;
        require_finite_non_negative("synthesis.maintenance_percent", self.maintenance_percent)?;
        require_finite_non_negative("synthesis.energy_mj_per_kg_fuel", self.energy_mj_per_kg_fuel)?;
        require_positive("synthesis.catalyst_lifetime_years", self.catalyst_lifetime_years)?;
        require_finite_non_negative("synthesis.water_l_per_kg_fuel", self.water_l_per_kg_fuel)?;
        require_finite_non_negative("synthesis.water_price", self.water_price)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportMode {
    Truck,
    Rail,
    Pipeline,
    Ship,
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "truck" => Ok(TransportMode::Truck),
            "rail" => Ok(TransportMode::Rail),
            "pipeline" => Ok(TransportMode::Pipeline),
            "ship" => Ok(TransportMode::Ship),
            _ => Err(format!("Unknown transport mode: {}", s)),
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::Truck => write!(f, "truck"),
            TransportMode::Rail => write!(f, "rail"),
            TransportMode::Pipeline => write!(f, "pipeline"),
            TransportMode::Ship => write!(f, "ship"),
        }
    }
}

/// Transport, storage and blending of finished fuel. Logistics assets are leased, so there is no CAPEX.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionSpec {
    pub transport_distance_km: f64,
    pub transport_mode: TransportMode,
    pub transport_cost_per_tkm: f64,
    pub storage_cost_per_t: f64,
    pub blending_cost_per_t: f64,
}

impl Default for DistributionSpec {
    fn default() -> Self {
        Self {
            transport_distance_km: DISTRIBUTION_DISTANCE_KM,
            transport_mode: TransportMode::Truck,
            transport_cost_per_tkm: DISTRIBUTION_COST_PER_TKM,
            storage_cost_per_t: DISTRIBUTION_STORAGE_PER_T,
            blending_cost_per_t: DISTRIBUTION_BLENDING_PER_T,
        }
    }
}

impl DistributionSpec {
    pub fn validate(&self) -> TeaResult<()> {
        require_finite_non_negative("distribution.transport_distance_km", self.transport_distance_km)?;
        require_finite_non_negative("distribution.transport_cost_per_tkm", self.transport_cost_per_tkm)?;
        require_finite_non_negative("distribution.storage_cost_per_t", self.storage_cost_per_t)?;
        require_finite_non_negative("distribution.blending_cost_per_t", self.blending_cost_per_t)
    }
}
