use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::results::{CostBreakdown, Results};
use crate::config::const_funcs::calc_share_percent;
use crate::config::scenario::Scenario;
use crate::config::stage_specs::{CaptureSpec, ConversionSpec, DistributionSpec, SynthesisSpec};
use crate::core::aggregator::evaluate;
use crate::error::{TeaError, TeaResult};
use crate::models::stage::Stage;
use crate::utils::logging::{self, OperationCategory};

/// A single scalar input that a sensitivity sweep can vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SweepParameter {
    /// Grid price shared by capture and electrolysis.
    ElectricityPrice,
    PlantCapacity,
    DiscountRate,
    CapacityFactor,
    ProjectLifetime,
    CaptureCapex,
    SynthesisCapex,
    TransportDistance,
}

impl SweepParameter {
    pub const ALL: [SweepParameter; 8] = [
        SweepParameter::ElectricityPrice,
        SweepParameter::PlantCapacity,
        SweepParameter::DiscountRate,
        SweepParameter::CapacityFactor,
        SweepParameter::ProjectLifetime,
        SweepParameter::CaptureCapex,
        SweepParameter::SynthesisCapex,
        SweepParameter::TransportDistance,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SweepParameter::ElectricityPrice => "electricity_price",
            SweepParameter::PlantCapacity => "plant_capacity",
            SweepParameter::DiscountRate => "discount_rate",
            SweepParameter::CapacityFactor => "capacity_factor",
            SweepParameter::ProjectLifetime => "project_lifetime",
            SweepParameter::CaptureCapex => "capture_capex",
            SweepParameter::SynthesisCapex => "synthesis_capex",
            SweepParameter::TransportDistance => "transport_distance",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            SweepParameter::ElectricityPrice => "USD/kWh",
            SweepParameter::PlantCapacity => "t/yr",
            SweepParameter::DiscountRate => "-",
            SweepParameter::CapacityFactor => "-",
            SweepParameter::ProjectLifetime => "yr",
            SweepParameter::CaptureCapex => "USD/(tCO2/yr)",
            SweepParameter::SynthesisCapex => "USD/(t/yr)",
            SweepParameter::TransportDistance => "km",
        }
    }
}

impl FromStr for SweepParameter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "electricity_price" | "electricity" => Ok(SweepParameter::ElectricityPrice),
            "plant_capacity" | "scale" | "capacity" => Ok(SweepParameter::PlantCapacity),
            "discount_rate" => Ok(SweepParameter::DiscountRate),
            "capacity_factor" => Ok(SweepParameter::CapacityFactor),
            "project_lifetime" | "lifetime" => Ok(SweepParameter::ProjectLifetime),
            "capture_capex" | "dac_capex" => Ok(SweepParameter::CaptureCapex),
            "synthesis_capex" | "ft_capex" => Ok(SweepParameter::SynthesisCapex),
            "transport_distance" => Ok(SweepParameter::TransportDistance),
            _ => Err(format!("Unknown sweep parameter: {}", s)),
        }
    }
}

impl fmt::Display for SweepParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl Scenario {
    /// Copy of this scenario with one parameter replaced. Every derived quantity is
    /// recomputed by the setters, so the copy is self-consistent.
    pub fn with_override(&self, parameter: SweepParameter, value: f64) -> TeaResult<Scenario> {
        let economics = self.economics();
        match parameter {
            SweepParameter::ElectricityPrice => {
                // Both electricity consumers move together or not at all
                let capture = CaptureSpec { electricity_price: value, ..self.capture().clone() };
                let conversion = ConversionSpec { electricity_price: value, ..self.conversion().clone() };
                self.with_capture(capture)?.with_conversion(conversion)
            }
            SweepParameter::PlantCapacity => {
                Ok(self.with_economics(economics.with_plant_capacity(value)?))
            }
            SweepParameter::DiscountRate => {
                Ok(self.with_economics(economics.with_discount_rate(value)?))
            }
            SweepParameter::CapacityFactor => {
                Ok(self.with_economics(economics.with_capacity_factor(value)?))
            }
            SweepParameter::ProjectLifetime => {
                if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
                    return Err(TeaError::domain(
                        "project_lifetime",
                        value,
                        "must be a whole number of years",
                    ));
                }
                Ok(self.with_economics(economics.with_project_lifetime(value as u32)?))
            }
            SweepParameter::CaptureCapex => {
                self.with_capture(CaptureSpec { capex_per_tco2: value, ..self.capture().clone() })
            }
            SweepParameter::SynthesisCapex => {
                self.with_synthesis(SynthesisSpec { capex_per_tpy: value, ..self.synthesis().clone() })
            }
            SweepParameter::TransportDistance => {
                self.with_distribution(DistributionSpec {
                    transport_distance_km: value,
                    ..self.distribution().clone()
                })
            }
        }
    }
}

/// One evaluated point of a sensitivity sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRow {
    pub parameter: SweepParameter,
    pub value: f64,
    /// USD/MJ
    pub levelized_cost: f64,
    pub capex_total: f64,
    pub opex_total: f64,
    pub stage_totals: CostBreakdown,
    /// Share of the grand total per stage, in percent.
    pub contributions: CostBreakdown,
    /// Annualised CAPEX per t/yr of nameplate capacity.
    pub capex_per_tpy: f64,
    /// Annual OPEX per tonne of nameplate capacity.
    pub opex_per_tonne: f64,
}

impl SweepRow {
    pub fn from_results(parameter: SweepParameter, value: f64, nameplate_tpy: f64, results: &Results) -> Self {
        let grand_total = results.total_costs.total;
        let contributions = CostBreakdown::from_stages(|stage: Stage| {
            calc_share_percent(results.total_costs.get(stage), grand_total)
        });

        SweepRow {
            parameter,
            value,
            levelized_cost: results.levelized_cost,
            capex_total: results.capex_breakdown.total,
            opex_total: results.opex_breakdown.total,
            stage_totals: results.total_costs,
            contributions,
            capex_per_tpy: results.capex_breakdown.total / nameplate_tpy,
            opex_per_tonne: results.opex_breakdown.total / nameplate_tpy,
        }
    }
}

fn evaluate_point(base: &Scenario, parameter: SweepParameter, value: f64) -> TeaResult<SweepRow> {
    let scenario = base.with_override(parameter, value)?;
    let results = evaluate(&scenario)?;
    tracing::debug!(%parameter, value, levelized_cost = results.levelized_cost, "sweep point");
    Ok(SweepRow::from_results(
        parameter,
        value,
        scenario.economics().plant_capacity_tpy(),
        &results,
    ))
}

/// Evaluate `base` once per value, in order. The base scenario is never modified.
pub fn sweep(base: &Scenario, parameter: SweepParameter, values: &[f64]) -> TeaResult<Vec<SweepRow>> {
    let _timing = logging::start_timing("sweep", OperationCategory::Sweep);
    tracing::debug!(%parameter, points = values.len(), "running sensitivity sweep");

    values
        .iter()
        .map(|&value| evaluate_point(base, parameter, value))
        .collect()
}

/// Same as [`sweep`] but evaluates the points on the rayon pool. Rows come back in input order.
pub fn sweep_parallel(base: &Scenario, parameter: SweepParameter, values: &[f64]) -> TeaResult<Vec<SweepRow>> {
    let _timing = logging::start_timing("sweep_parallel", OperationCategory::Sweep);
    tracing::debug!(%parameter, points = values.len(), "running parallel sensitivity sweep");

    values
        .par_iter()
        .map(|&value| evaluate_point(base, parameter, value))
        .collect()
}
