use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::balance::ProductionBasis;
use crate::error::TeaResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    Capture,
    Conversion,
    Synthesis,
    Distribution,
}

impl Stage {
    /// Upstream-to-downstream order used for every table and sum.
    pub const ALL: [Stage; 4] = [
        Stage::Capture,
        Stage::Conversion,
        Stage::Synthesis,
        Stage::Distribution,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Stage::Capture => "capture",
            Stage::Conversion => "conversion",
            Stage::Synthesis => "synthesis",
            Stage::Distribution => "distribution",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Capture => "Direct Air Capture",
            Stage::Conversion => "Electrolysis",
            Stage::Synthesis => "Fischer-Tropsch Synthesis",
            Stage::Distribution => "Distribution",
        }
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "capture" | "dac" => Ok(Stage::Capture),
            "conversion" | "electrolysis" => Ok(Stage::Conversion),
            "synthesis" | "ft_synthesis" => Ok(Stage::Synthesis),
            "distribution" => Ok(Stage::Distribution),
            _ => Err(format!("Unknown stage: {}", s)),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Named annual cost line inside a stage, e.g. electricity or catalyst.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostItem {
    pub name: &'static str,
    pub usd_per_year: f64,
}

/// Annualised cost of one stage at one throughput.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageCost {
    pub stage: Stage,
    /// Overnight capital cost in USD, before annualisation.
    pub installed_capex: f64,
    pub annualized_capex: f64,
    pub opex_fixed: f64,
    pub opex_variable: f64,
    pub items: Vec<CostItem>,
}

impl StageCost {
    pub fn new(stage: Stage, installed_capex: f64, crf: f64) -> Self {
        Self {
            stage,
            installed_capex,
            annualized_capex: installed_capex * crf,
            opex_fixed: 0.0,
            opex_variable: 0.0,
            items: Vec::new(),
        }
    }

    pub fn add_fixed(&mut self, name: &'static str, usd_per_year: f64) {
        self.opex_fixed += usd_per_year;
        self.items.push(CostItem { name, usd_per_year });
    }

    pub fn add_variable(&mut self, name: &'static str, usd_per_year: f64) {
        self.opex_variable += usd_per_year;
        self.items.push(CostItem { name, usd_per_year });
    }

    pub fn opex(&self) -> f64 {
        self.opex_fixed + self.opex_variable
    }

    pub fn total(&self) -> f64 {
        self.annualized_capex + self.opex()
    }
}

/// A stage that converts its required throughput into annualised CAPEX and OPEX.
pub trait StageCostModel {
    type Throughput;

    const STAGE: Stage;

    /// Physical throughput this stage must handle for the given production basis.
    fn required_throughput(&self, basis: &ProductionBasis) -> Self::Throughput;

    fn compute(&self, throughput: &Self::Throughput, crf: f64) -> TeaResult<StageCost>;
}
