use clap::Parser;

use crate::config::constants::{DEFAULT_ELECTRICITY_PRICES, DEFAULT_PLANT_CAPACITIES, DEFAULT_REFERENCE_FUEL_PRICE};

#[derive(Parser, Debug)]
#[command(author, version, about = "Levelized cost of electro-synthetic aviation fuel", long_about = None)]
pub struct Args {
    #[arg(short, long, help = "Scenario JSON file; published defaults are used when omitted")]
    scenario: Option<String>,

    #[arg(short, long, default_value_t = DEFAULT_REFERENCE_FUEL_PRICE, help = "Conventional jet fuel price in USD/L")]
    reference_price: f64,

    #[arg(long, default_value_t = false)]
    skip_sweeps: bool,

    #[arg(long, value_delimiter = ',', help = "Electricity prices to sweep, USD/kWh")]
    electricity_prices: Vec<f64>,

    #[arg(long, value_delimiter = ',', help = "Plant capacities to sweep, t/yr")]
    plant_capacities: Vec<f64>,

    #[arg(short, long, default_value_t = false)]
    parallel: bool,

    #[arg(long, default_value_t = false)]
    export_csv: bool,

    #[arg(short, long, default_value = "results")]
    output_dir: String,

    #[arg(long, default_value_t = false)]
    enable_timing: bool,

    #[arg(long, help = "Only print the final tables", default_value_t = false)]
    silent: bool,
}

impl Args {
    pub fn scenario(&self) -> Option<&str> {
        self.scenario.as_deref()
    }

    pub fn reference_price(&self) -> f64 {
        self.reference_price
    }

    pub fn skip_sweeps(&self) -> bool {
        self.skip_sweeps
    }

    /// Requested grid, or the default grid when none was given.
    pub fn electricity_prices(&self) -> Vec<f64> {
        if self.electricity_prices.is_empty() {
            DEFAULT_ELECTRICITY_PRICES.to_vec()
        } else {
            self.electricity_prices.clone()
        }
    }

    pub fn plant_capacities(&self) -> Vec<f64> {
        if self.plant_capacities.is_empty() {
            DEFAULT_PLANT_CAPACITIES.to_vec()
        } else {
            self.plant_capacities.clone()
        }
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    pub fn export_csv(&self) -> bool {
        self.export_csv
    }

    pub fn output_dir(&self) -> &str {
        &self.output_dir
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }

    pub fn silent(&self) -> bool {
        self.silent
    }
}
