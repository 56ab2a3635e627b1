// Fuel Properties
pub const ENERGY_DENSITY_MJ_PER_KG: f64 = 43.0;        // Lower heating value of synthetic kerosene
pub const FUEL_DENSITY_KG_PER_L: f64 = 0.8;
pub const EMISSION_FACTOR_DIFFERENCE: f64 = 89.0;      // g CO2e/MJ saved versus fossil jet fuel

// Unit Conversions
pub const KG_PER_TONNE: f64 = 1000.0;
pub const MJ_PER_KWH: f64 = 3.6;
pub const HOURS_PER_YEAR: f64 = 8760.0;
pub const PERCENT: f64 = 100.0;
pub const GRAMS_PER_KG: f64 = 1000.0;

// Economic Defaults
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.08;
pub const DEFAULT_PROJECT_LIFETIME: u32 = 20;
pub const DEFAULT_CAPACITY_FACTOR: f64 = 0.9;
pub const DEFAULT_PLANT_CAPACITY_TPY: f64 = 100_000.0;

// Shared Utility Prices
pub const DEFAULT_ELECTRICITY_PRICE: f64 = 0.05;       // USD/kWh
pub const DEFAULT_HEAT_PRICE: f64 = 0.03;              // USD/kWh thermal
pub const DEFAULT_WATER_PRICE: f64 = 0.001;            // USD/L

// CO2 Capture Defaults
pub const CAPTURE_CAPEX_PER_TCO2: f64 = 4000.0;        // USD per t-CO2/year of capture capacity
pub const CAPTURE_FIXED_OPEX_PERCENT: f64 = 4.0;
pub const CAPTURE_ELECTRICITY_MJ_PER_KG_CO2: f64 = 20.0;
pub const CAPTURE_HEAT_MJ_PER_KG_CO2: f64 = 5.0;
pub const CAPTURE_WATER_L_PER_KG_CO2: f64 = 5.0;
pub const CAPTURE_CO2_PER_KG_FUEL: f64 = 3.1;

// Electrolysis Defaults
pub const CONVERSION_CAPEX_CO_PER_KW: f64 = 3000.0;
pub const CONVERSION_CAPEX_H2_PER_KW: f64 = 1500.0;
pub const CONVERSION_FIXED_OPEX_PERCENT: f64 = 5.0;
pub const CONVERSION_CATALYST_PRICE: f64 = 0.02;       // USD/kg catalyst
pub const CONVERSION_ENERGY_CO_MJ_PER_KG: f64 = 28.0;
pub const CONVERSION_ENERGY_H2_MJ_PER_KG: f64 = 55.0;
pub const CONVERSION_WATER_L_PER_KG_SYNGAS: f64 = 20.0;
pub const CONVERSION_CATALYST_KG_PER_KG_FUEL: f64 = 0.1;
pub const CONVERSION_CO_H2_MASS_RATIO: f64 = 0.923;    // ~1:2 molar
pub const CONVERSION_SYNGAS_KG_PER_KG_FUEL: f64 = 2.13;

// Fischer-Tropsch Synthesis Defaults
pub const SYNTHESIS_CAPEX_PER_TPY: f64 = 15_000.0;
pub const SYNTHESIS_FIXED_OPEX_PERCENT: f64 = 6.0;
pub const SYNTHESIS_CATALYST_COST_FRACTION: f64 = 0.05;
pub const SYNTHESIS_COOLING_PRICE: f64 = 0.02;         // USD/kWh cooling
pub const SYNTHESIS_MAINTENANCE_PERCENT: f64 = 2.0;
pub const SYNTHESIS_ENERGY_MJ_PER_KG_FUEL: f64 = 25.0;
pub const SYNTHESIS_CATALYST_LIFETIME_YEARS: f64 = 2.0;
pub const SYNTHESIS_WATER_L_PER_KG_FUEL: f64 = 5.0;
pub const SYNTHESIS_COOLING_DUTY_FRACTION: f64 = 0.5;  // Cooling demand relative to process heat

// Distribution Defaults
pub const DISTRIBUTION_DISTANCE_KM: f64 = 500.0;
pub const DISTRIBUTION_COST_PER_TKM: f64 = 0.15;
pub const DISTRIBUTION_STORAGE_PER_T: f64 = 50.0;
pub const DISTRIBUTION_BLENDING_PER_T: f64 = 20.0;

// Plausible Ranges (outside these a RangeWarning is raised, never an error)
pub const DISCOUNT_RATE_RANGE: (f64, f64) = (0.0, 0.30);
pub const PROJECT_LIFETIME_RANGE: (f64, f64) = (5.0, 50.0);
pub const CAPACITY_FACTOR_RANGE: (f64, f64) = (0.0, 1.0);
pub const PLANT_CAPACITY_RANGE: (f64, f64) = (1_000.0, 10_000_000.0);
pub const ELECTRICITY_PRICE_RANGE: (f64, f64) = (0.0, 0.50);

// Sensitivity Grids
pub const DEFAULT_ELECTRICITY_PRICES: [f64; 10] = [0.02, 0.03, 0.04, 0.05, 0.06, 0.08, 0.10, 0.12, 0.15, 0.20];
pub const DEFAULT_PLANT_CAPACITIES: [f64; 7] = [10_000.0, 25_000.0, 50_000.0, 100_000.0, 200_000.0, 500_000.0, 1_000_000.0];

// Breakeven Defaults
pub const DEFAULT_REFERENCE_FUEL_PRICE: f64 = 1.0;     // USD/L conventional jet fuel

// Literature cost ranges for other SAF pathways (USD/L)
pub const HEFA_SAF_RANGE: (f64, f64) = (1.2, 2.5);
pub const ATJ_SAF_RANGE: (f64, f64) = (2.0, 4.0);
pub const BIOMASS_FT_SAF_RANGE: (f64, f64) = (1.5, 3.0);
