use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use esaf_tea::analysis::reporting;
use esaf_tea::cli::cli::Args;
use esaf_tea::config::scenario::Scenario;
use esaf_tea::core::engine::TeaModel;
use esaf_tea::core::sweep::{sweep, sweep_parallel, SweepParameter, SweepRow};
use esaf_tea::utils::csv_export::CsvExporter;
use esaf_tea::utils::logging::{self, FileIOType, OperationCategory};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logging::init_logging(args.enable_timing(), args.silent())?;

    if !args.silent() {
        println!("eSAF Techno-Economic Model (DAC -> electrolysis -> Fischer-Tropsch -> distribution)");
    }

    let scenario = load_scenario(args.scenario())?;
    let mut model = TeaModel::from_scenario(&scenario);

    let results = model.evaluate(args.silent())?.clone();
    reporting::print_summary(&results);
    if !args.silent() {
        reporting::print_stage_details(&results);
    }

    let mut sweeps = Vec::new();
    if !args.skip_sweeps() {
        for (parameter, values) in [
            (SweepParameter::ElectricityPrice, args.electricity_prices()),
            (SweepParameter::PlantCapacity, args.plant_capacities()),
        ] {
            let rows = run_sweep(&scenario, parameter, &values, args.parallel(), args.silent())
                .with_context(|| format!("{} sweep failed", parameter))?;
            println!("\nSensitivity: {}", parameter);
            reporting::print_sweep_table(&rows);
            sweeps.push(rows);
        }
    }

    let analysis = model.breakeven(args.reference_price())?;
    reporting::print_breakeven(&analysis);

    if args.export_csv() {
        let exporter = CsvExporter::new(args.output_dir(), !args.silent())?;
        exporter.export_results(&results)?;
        for rows in &sweeps {
            exporter.export_sweep(rows)?;
        }
        exporter.export_breakeven(&analysis)?;
        println!("CSV export written to {}", exporter.output_dir().display());
    }

    logging::print_timing_report();
    Ok(())
}

fn load_scenario(path: Option<&str>) -> anyhow::Result<Scenario> {
    let _timing = logging::start_timing("load_scenario",
        OperationCategory::FileIO { subcategory: FileIOType::ScenarioLoad });

    match path {
        Some(path) => {
            let scenario = Scenario::load_json(path)
                .with_context(|| format!("Failed to load scenario from {}", path))?;
            tracing::info!("Loaded scenario from {}", path);
            Ok(scenario)
        }
        None => Ok(Scenario::default()),
    }
}

fn run_sweep(
    scenario: &Scenario,
    parameter: SweepParameter,
    values: &[f64],
    parallel: bool,
    silent: bool,
) -> anyhow::Result<Vec<SweepRow>> {
    let progress = ProgressBar::new(values.len() as u64);
    if silent {
        progress.set_draw_target(ProgressDrawTarget::hidden());
    }
    progress.set_style(
        ProgressStyle::with_template("{msg:>20} [{bar:40.cyan/blue}] {pos}/{len}")?
            .progress_chars("=>-"),
    );
    progress.set_message(parameter.to_string());

    let rows = if parallel {
        let rows = sweep_parallel(scenario, parameter, values)?;
        progress.inc(values.len() as u64);
        rows
    } else {
        let mut rows = Vec::with_capacity(values.len());
        for &value in values {
            rows.extend(sweep(scenario, parameter, &[value])?);
            progress.inc(1);
        }
        rows
    };

    progress.finish_and_clear();
    Ok(rows)
}
