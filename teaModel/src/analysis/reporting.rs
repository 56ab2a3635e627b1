use std::fmt;

use crate::analysis::results::{CostBreakdown, Results};
use crate::config::const_funcs::calc_share_percent;
use crate::config::constants::{
    ATJ_SAF_RANGE, BIOMASS_FT_SAF_RANGE, ENERGY_DENSITY_MJ_PER_KG, FUEL_DENSITY_KG_PER_L, HEFA_SAF_RANGE,
};
use crate::core::breakeven::BreakevenAnalysis;
use crate::core::sweep::SweepRow;

const RULE: &str = "----------------------------------------";

struct SummaryReport<'a>(&'a Results);
struct StageDetails<'a>(&'a Results);
struct SweepTable<'a>(&'a [SweepRow]);
struct BreakevenReport<'a>(&'a BreakevenAnalysis);

fn write_breakdown(f: &mut fmt::Formatter<'_>, title: &str, breakdown: &CostBreakdown) -> fmt::Result {
    writeln!(f, "{} (USD/year):", title)?;
    for (stage, value) in breakdown.iter() {
        writeln!(
            f,
            "  {:<28} {:>12.2} M  ({:>5.1}%)",
            stage.display_name(),
            value / 1e6,
            calc_share_percent(value, breakdown.total),
        )?;
    }
    writeln!(f, "  {:<28} {:>12.2} M", "Total", breakdown.total / 1e6)
}

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let results = self.0;
        let per_kg = results.levelized_cost * ENERGY_DENSITY_MJ_PER_KG;
        let per_litre = per_kg * FUEL_DENSITY_KG_PER_L;

        writeln!(f, "\neSAF Levelized Cost Summary")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Annual production: {:.0} t ({:.3e} MJ)", results.annual_production_tonnes, results.annual_production_mj)?;
        writeln!(f, "Capital recovery factor: {:.5}", results.crf)?;
        writeln!(f, "Levelized cost:")?;
        writeln!(f, "  {:.4} USD/MJ", results.levelized_cost)?;
        writeln!(f, "  {:.3} USD/kg", per_kg)?;
        writeln!(f, "  {:.3} USD/L", per_litre)?;
        writeln!(f, "{}", RULE)?;

        write_breakdown(f, "Annualized CAPEX", &results.capex_breakdown)?;
        write_breakdown(f, "OPEX", &results.opex_breakdown)?;
        write_breakdown(f, "Total cost", &results.total_costs)?;

        let capex_share = calc_share_percent(results.capex_breakdown.total, results.total_costs.total);
        writeln!(f, "CAPEX share: {:.1}%, OPEX share: {:.1}%", capex_share, 100.0 - capex_share)?;

        if !results.warnings.is_empty() {
            writeln!(f, "Warnings:")?;
            for warning in &results.warnings {
                writeln!(f, "  {}", warning)?;
            }
        }
        writeln!(f, "{}", RULE)
    }
}

impl fmt::Display for StageDetails<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cost in &self.0.stage_costs {
            writeln!(f, "\n{}", cost.stage.display_name())?;
            writeln!(f, "  Installed CAPEX: {:.2} M USD", cost.installed_capex / 1e6)?;
            writeln!(f, "  Annualized CAPEX: {:.2} M USD/year", cost.annualized_capex / 1e6)?;
            for item in &cost.items {
                writeln!(f, "  {:<22} {:>10.2} M USD/year", item.name, item.usd_per_year / 1e6)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for SweepTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.0;
        let Some(first) = rows.first() else {
            return writeln!(f, "(no sweep points)");
        };

        let header = format!("{} [{}]", first.parameter, first.parameter.unit());
        writeln!(
            f,
            "{:>28} {:>10} {:>9} {:>9} {:>9} {:>9} {:>12}",
            header, "USD/MJ", "DAC %", "Elec %", "FT %", "Dist %", "CAPEX/tpy"
        )?;
        for row in rows {
            writeln!(
                f,
                "{:>28.4} {:>10.4} {:>9.1} {:>9.1} {:>9.1} {:>9.1} {:>12.1}",
                row.value,
                row.levelized_cost,
                row.contributions.capture,
                row.contributions.conversion,
                row.contributions.synthesis,
                row.contributions.distribution,
                row.capex_per_tpy,
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for BreakevenReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let analysis = self.0;
        writeln!(f, "\nBreakeven Analysis")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "eSAF cost: {:.3} USD/L ({:.3} USD/kg)", analysis.cost_per_volume, analysis.cost_per_kg)?;
        writeln!(f, "Reference jet fuel: {:.3} USD/L", analysis.reference_price)?;
        writeln!(f, "Green premium: {:.3} USD/L ({:.1}%)", analysis.premium, analysis.premium_percent)?;
        writeln!(
            f,
            "Carbon price to break even: {:.2} USD/kg CO2e ({:.0} USD/t) at {:.0} gCO2e/MJ avoided",
            analysis.required_carbon_price,
            analysis.required_carbon_price * 1000.0,
            analysis.emission_difference,
        )?;
        writeln!(f, "Other SAF pathways (literature, USD/L):")?;
        for (name, (low, high)) in [
            ("HEFA", HEFA_SAF_RANGE),
            ("Alcohol-to-Jet", ATJ_SAF_RANGE),
            ("Biomass FT", BIOMASS_FT_SAF_RANGE),
        ] {
            writeln!(f, "  {:<16} {:.1} - {:.1}", name, low, high)?;
        }
        writeln!(f, "{}", RULE)
    }
}

/// Key metrics plus the CAPEX, OPEX and total cost tables.
pub fn format_summary(results: &Results) -> String {
    SummaryReport(results).to_string()
}

/// Per-stage line items, one block per stage.
pub fn format_stage_details(results: &Results) -> String {
    StageDetails(results).to_string()
}

pub fn format_sweep_table(rows: &[SweepRow]) -> String {
    SweepTable(rows).to_string()
}

pub fn format_breakeven(analysis: &BreakevenAnalysis) -> String {
    BreakevenReport(analysis).to_string()
}

pub fn print_summary(results: &Results) {
    print!("{}", format_summary(results));
}

pub fn print_stage_details(results: &Results) {
    print!("{}", format_stage_details(results));
}

pub fn print_sweep_table(rows: &[SweepRow]) {
    print!("{}", format_sweep_table(rows));
}

pub fn print_breakeven(analysis: &BreakevenAnalysis) {
    print!("{}", format_breakeven(analysis));
}
