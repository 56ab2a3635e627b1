use std::path::{Path, PathBuf};

use chrono::Local;
use csv::Writer;
use serde::Serialize;

use crate::analysis::results::Results;
use crate::config::const_funcs::calc_share_percent;
use crate::core::breakeven::BreakevenAnalysis;
use crate::core::sweep::SweepRow;
use crate::error::TeaResult;
use crate::utils::logging::{self, FileIOType, OperationCategory};

#[derive(Serialize)]
struct StageCostRecord<'a> {
    stage: &'a str,
    installed_capex_usd: f64,
    annualized_capex_usd: f64,
    opex_usd: f64,
    total_usd: f64,
    share_percent: f64,
}

#[derive(Serialize)]
struct SweepRecord {
    parameter: String,
    value: f64,
    levelized_cost_usd_per_mj: f64,
    capex_total_usd: f64,
    opex_total_usd: f64,
    capture_usd: f64,
    conversion_usd: f64,
    synthesis_usd: f64,
    distribution_usd: f64,
    capture_contribution: f64,
    conversion_contribution: f64,
    synthesis_contribution: f64,
    distribution_contribution: f64,
    capex_per_tpy: f64,
    opex_per_tonne: f64,
}

impl From<&SweepRow> for SweepRecord {
    fn from(row: &SweepRow) -> Self {
        SweepRecord {
            parameter: row.parameter.to_string(),
            value: row.value,
            levelized_cost_usd_per_mj: row.levelized_cost,
            capex_total_usd: row.capex_total,
            opex_total_usd: row.opex_total,
            capture_usd: row.stage_totals.capture,
            conversion_usd: row.stage_totals.conversion,
            synthesis_usd: row.stage_totals.synthesis,
            distribution_usd: row.stage_totals.distribution,
            capture_contribution: row.contributions.capture,
            conversion_contribution: row.contributions.conversion,
            synthesis_contribution: row.contributions.synthesis,
            distribution_contribution: row.contributions.distribution,
            capex_per_tpy: row.capex_per_tpy,
            opex_per_tonne: row.opex_per_tonne,
        }
    }
}

/// Writes results tables into a timestamped sub-directory of the output directory.
pub struct CsvExporter {
    output_dir: PathBuf,
    timestamp: String,
    verbose_logging: bool,
}

impl CsvExporter {
    pub fn new(output_dir: impl AsRef<Path>, verbose_logging: bool) -> TeaResult<Self> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let full_path = output_dir.as_ref().join(&timestamp);
        std::fs::create_dir_all(&full_path)?;

        Ok(Self {
            output_dir: full_path,
            timestamp,
            verbose_logging,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// One row per stage plus a total row.
    pub fn export_results(&self, results: &Results) -> TeaResult<PathBuf> {
        let _timing = logging::start_timing("export_results",
            OperationCategory::FileIO { subcategory: FileIOType::ResultsSave });

        let path = self.output_dir.join("results.csv");
        let mut writer = Writer::from_path(&path)?;
        let grand_total = results.total_costs.total;

        for cost in &results.stage_costs {
            writer.serialize(StageCostRecord {
                stage: cost.stage.key(),
                installed_capex_usd: cost.installed_capex,
                annualized_capex_usd: cost.annualized_capex,
                opex_usd: cost.opex(),
                total_usd: cost.total(),
                share_percent: calc_share_percent(cost.total(), grand_total),
            })?;
        }
        writer.serialize(StageCostRecord {
            stage: "total",
            installed_capex_usd: results.stage_costs.iter().map(|c| c.installed_capex).sum(),
            annualized_capex_usd: results.capex_breakdown.total,
            opex_usd: results.opex_breakdown.total,
            total_usd: grand_total,
            share_percent: 100.0,
        })?;
        writer.flush()?;

        self.report(&path);
        Ok(path)
    }

    /// Sweep rows go to `sweep_<parameter>.csv`; an empty slice writes nothing.
    pub fn export_sweep(&self, rows: &[SweepRow]) -> TeaResult<Option<PathBuf>> {
        let Some(first) = rows.first() else {
            return Ok(None);
        };
        let _timing = logging::start_timing("export_sweep",
            OperationCategory::FileIO { subcategory: FileIOType::ResultsSave });

        let path = self.output_dir.join(format!("sweep_{}.csv", first.parameter));
        let mut writer = Writer::from_path(&path)?;
        for row in rows {
            writer.serialize(SweepRecord::from(row))?;
        }
        writer.flush()?;

        self.report(&path);
        Ok(Some(path))
    }

    pub fn export_breakeven(&self, analysis: &BreakevenAnalysis) -> TeaResult<PathBuf> {
        let _timing = logging::start_timing("export_breakeven",
            OperationCategory::FileIO { subcategory: FileIOType::ResultsSave });

        let path = self.output_dir.join("breakeven.csv");
        let mut writer = Writer::from_path(&path)?;
        writer.serialize(analysis)?;
        writer.flush()?;

        self.report(&path);
        Ok(path)
    }

    fn report(&self, path: &Path) {
        if self.verbose_logging {
            tracing::info!("CSV written to {}", path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::scenario::Scenario;
    use crate::core::aggregator::evaluate;
    use crate::core::breakeven::breakeven;
    use crate::core::sweep::{sweep, SweepParameter};

    #[test]
    fn results_table_has_stage_rows_and_total() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path(), false).unwrap();
        assert!(exporter.output_dir().starts_with(dir.path()));

        let results = evaluate(&Scenario::default()).unwrap();
        let path = exporter.export_results(&results).unwrap();

        let mut reader = csv::Reader::from_path(path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "stage");
        let stages: Vec<String> = reader.records().map(|r| r.unwrap()[0].to_string()).collect();
        assert_eq!(stages, ["capture", "conversion", "synthesis", "distribution", "total"]);
    }

    #[test]
    fn sweep_file_is_named_after_parameter() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path(), false).unwrap();
        let rows = sweep(&Scenario::default(), SweepParameter::PlantCapacity, &[1e4, 1e5]).unwrap();

        let path = exporter.export_sweep(&rows).unwrap().unwrap();
        assert!(path.ends_with("sweep_plant_capacity.csv"));
        let mut reader = csv::Reader::from_path(path).unwrap();
        assert_eq!(reader.records().count(), 2);

        assert!(exporter.export_sweep(&[]).unwrap().is_none());
    }

    #[test]
    fn breakeven_is_written_as_single_row() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path(), true).unwrap();
        let path = exporter.export_breakeven(&breakeven(0.05, 1.0).unwrap()).unwrap();

        let mut reader = csv::Reader::from_path(path).unwrap();
        assert!(reader.headers().unwrap().iter().any(|h| h == "required_carbon_price"));
        assert_eq!(reader.records().count(), 1);
    }
}
