// Module declarations for the eSAF techno-economic model

// Error taxonomy shared by every layer
pub mod error;

// Configuration modules
pub mod config {
    pub mod constants;
    pub mod const_funcs;
    pub mod economic;
    pub mod stage_specs;
    pub mod scenario;
}

// Stage cost models
pub mod models {
    pub mod stage;
    pub mod capture;
    pub mod conversion;
    pub mod synthesis;
    pub mod distribution;
}

// Core calculation engine
pub mod core {
    pub mod balance;
    pub mod aggregator;
    pub mod sweep;
    pub mod breakeven;
    pub mod engine;
}

// Analysis and reporting
pub mod analysis {
    pub mod results;
    pub mod reporting;
}

// Utility functions
pub mod utils {
    pub mod logging;
    pub mod csv_export;
}

// CLI interface
pub mod cli {
    pub mod cli;
}

// Re-export commonly used items
pub use crate::analysis::results::{CostBreakdown, Results};
pub use crate::config::economic::EconomicParameters;
pub use crate::config::scenario::Scenario;
pub use crate::config::stage_specs::{CaptureSpec, ConversionSpec, DistributionSpec, SynthesisSpec, TransportMode};
pub use crate::core::aggregator::evaluate;
pub use crate::core::breakeven::{breakeven, BreakevenAnalysis};
pub use crate::core::engine::TeaModel;
pub use crate::core::sweep::{sweep, sweep_parallel, SweepParameter, SweepRow};
pub use crate::error::{RangeWarning, TeaError, TeaResult};
pub use crate::models::stage::{Stage, StageCost, StageCostModel};
