use serde::Serialize;

use crate::config::const_funcs::require_positive;
use crate::config::constants::{
    EMISSION_FACTOR_DIFFERENCE, ENERGY_DENSITY_MJ_PER_KG, FUEL_DENSITY_KG_PER_L, GRAMS_PER_KG, PERCENT,
};
use crate::error::{TeaError, TeaResult};
use crate::utils::logging::{self, OperationCategory};

/// Comparison of the levelized cost against a conventional jet fuel price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BreakevenAnalysis {
    /// USD/L
    pub cost_per_volume: f64,
    /// USD/kg
    pub cost_per_kg: f64,
    /// USD/L of the fossil reference
    pub reference_price: f64,
    /// USD/L above the reference; negative when the eSAF is cheaper
    pub premium: f64,
    pub premium_percent: f64,
    /// USD per kg CO2e avoided that closes the premium
    pub required_carbon_price: f64,
    /// g CO2e/MJ
    pub emission_difference: f64,
}

pub fn breakeven(levelized_cost: f64, reference_price: f64) -> TeaResult<BreakevenAnalysis> {
    let _timing = logging::start_timing("breakeven", OperationCategory::Breakeven);

    require_positive("reference_price", reference_price)?;
    if !levelized_cost.is_finite() {
        return Err(TeaError::domain("levelized_cost", levelized_cost, "must be finite"));
    }

    let cost_per_volume = levelized_cost * ENERGY_DENSITY_MJ_PER_KG * FUEL_DENSITY_KG_PER_L;
    let cost_per_kg = levelized_cost * ENERGY_DENSITY_MJ_PER_KG;
    let premium = cost_per_volume - reference_price;
    let premium_percent = premium / reference_price * PERCENT;

    // kg CO2e avoided per litre of fuel
    let avoided_per_unit = EMISSION_FACTOR_DIFFERENCE / GRAMS_PER_KG * ENERGY_DENSITY_MJ_PER_KG;
    let required_carbon_price = premium / avoided_per_unit;

    tracing::debug!(cost_per_volume, premium, required_carbon_price, "breakeven computed");

    Ok(BreakevenAnalysis {
        cost_per_volume,
        cost_per_kg,
        reference_price,
        premium,
        premium_percent,
        required_carbon_price,
        emission_difference: EMISSION_FACTOR_DIFFERENCE,
    })
}
