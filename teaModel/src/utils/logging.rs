use anyhow::Context;
use lazy_static::lazy_static;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::Level;
use tracing_subscriber::{EnvFilter, prelude::*};
use tracing_timing::{Builder, Histogram};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;
use std::sync::Arc;
use parking_lot::RwLock;
use std::time::{Duration, Instant};
use std::cell::RefCell;

const HISTOGRAM_MAX_NS: u64 = 60_000_000_000;

// Define categories for different types of operations
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum OperationCategory {
    Evaluation {
        subcategory: EvaluationType,
    },
    Sweep,
    Breakeven,
    FileIO {
        subcategory: FileIOType,
    },
    Other,
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum EvaluationType {
    MassBalance,
    StageCosts,
    Aggregation,
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum FileIOType {
    ScenarioLoad,
    ScenarioSave,
    ResultsSave,
}

impl OperationCategory {
    pub fn as_str(&self) -> String {
        match self {
            OperationCategory::Evaluation { subcategory } => {
                format!("Evaluation - {}", match subcategory {
                    EvaluationType::MassBalance => "Mass Balance",
                    EvaluationType::StageCosts => "Stage Costs",
                    EvaluationType::Aggregation => "Aggregation",
                })
            },
            OperationCategory::Sweep => "Sensitivity Sweep".to_string(),
            OperationCategory::Breakeven => "Breakeven".to_string(),
            OperationCategory::FileIO { subcategory } => {
                format!("File I/O - {}", match subcategory {
                    FileIOType::ScenarioLoad => "Scenario Load",
                    FileIOType::ScenarioSave => "Scenario Save",
                    FileIOType::ResultsSave => "Results Save",
                })
            },
            OperationCategory::Other => "Other Operations".to_string(),
        }
    }
}

thread_local! {
    static TIMING_STACK: RefCell<Vec<String>> = RefCell::new(Vec::new());
}

lazy_static! {
    static ref TIMING_ENABLED: AtomicBool = AtomicBool::new(false);
    static ref FUNCTION_TIMINGS: Arc<RwLock<HashMap<String, Histogram<u64>>>> = Arc::new(RwLock::new(HashMap::new()));
    static ref CATEGORY_TIMINGS: Arc<RwLock<HashMap<OperationCategory, Histogram<u64>>>> = Arc::new(RwLock::new(HashMap::new()));
    static ref HIERARCHICAL_TIMINGS: Arc<RwLock<HashMap<String, (Duration, usize, Vec<String>)>>> = Arc::new(RwLock::new(HashMap::new()));
}

pub struct TimingGuard {
    function_name: String,
    category: OperationCategory,
    start: Instant,
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        record_timing_end(&self.function_name, duration, &self.category);
    }
}

pub fn start_timing(function_name: &str, category: OperationCategory) -> TimingGuard {
    if is_timing_enabled() {
        TIMING_STACK.with(|stack| stack.borrow_mut().push(function_name.to_string()));
    }

    TimingGuard {
        function_name: function_name.to_string(),
        category,
        start: Instant::now(),
    }
}

fn new_histogram() -> Option<Histogram<u64>> {
    Histogram::<u64>::new_with_bounds(1, HISTOGRAM_MAX_NS, 3).ok()
}

fn record_into<K: Hash + Eq>(map: &RwLock<HashMap<K, Histogram<u64>>>, key: K, duration_ns: u64) {
    let mut map = map.write();
    // Durations above the histogram bound are dropped rather than saturated
    match map.entry(key) {
        Entry::Occupied(mut entry) => {
            let _ = entry.get_mut().record(duration_ns.max(1));
        }
        Entry::Vacant(entry) => {
            if let Some(histogram) = new_histogram() {
                let _ = entry.insert(histogram).record(duration_ns.max(1));
            }
        }
    }
}

fn record_timing_end(function_name: &str, duration: Duration, category: &OperationCategory) {
    if !is_timing_enabled() {
        return;
    }

    let duration_ns = duration.as_nanos() as u64;

    // Pop ourselves off the stack; whatever remains on top is the caller
    TIMING_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        if stack.pop().is_some() {
            let mut hierarchical = HIERARCHICAL_TIMINGS.write();
            let entry = hierarchical
                .entry(function_name.to_string())
                .or_insert((Duration::from_nanos(0), 0, Vec::new()));

            entry.0 += duration;
            entry.1 += 1;

            if let Some(parent_name) = stack.last() {
                if !entry.2.contains(parent_name) {
                    entry.2.push(parent_name.clone());
                }
            }
        }
    });

    record_into(&FUNCTION_TIMINGS, function_name.to_string(), duration_ns);
    record_into(&CATEGORY_TIMINGS, category.clone(), duration_ns);
}

/// Install the global subscriber. `quiet` lowers the default level to warnings only.
pub fn init_logging(enable_timing: bool, quiet: bool) -> anyhow::Result<()> {
    TIMING_ENABLED.store(enable_timing, Ordering::SeqCst);

    let level = if quiet { Level::WARN } else { Level::INFO };
    let env_filter = EnvFilter::from_default_env()
        .add_directive(level.into())
        .add_directive("esaf_tea=debug".parse().context("invalid log directive")?);

    if enable_timing {
        let template = Histogram::<u64>::new_with_bounds(1, HISTOGRAM_MAX_NS, 3)
            .map_err(|e| anyhow::anyhow!("failed to create timing histogram: {:?}", e))?;

        let timing_layer = Builder::default().layer(move || template.clone());

        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().compact())
            .with(timing_layer.boxed());

        tracing::subscriber::set_global_default(subscriber)
            .context("Failed to set up tracing subscriber")?;
    } else {
        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().compact());

        tracing::subscriber::set_global_default(subscriber)
            .context("Failed to set up tracing subscriber")?;
    }

    Ok(())
}

pub fn set_timing_enabled(enabled: bool) {
    TIMING_ENABLED.store(enabled, Ordering::SeqCst);
}

pub fn is_timing_enabled() -> bool {
    TIMING_ENABLED.load(Ordering::SeqCst)
}

/// Number of completed calls recorded for `function_name`.
pub fn recorded_calls(function_name: &str) -> usize {
    HIERARCHICAL_TIMINGS
        .read()
        .get(function_name)
        .map(|(_, count, _)| *count)
        .unwrap_or(0)
}

pub fn print_timing_report() {
    if !is_timing_enabled() {
        return;
    }

    println!("\nDetailed Performance Report");
    println!("==========================");

    println!("\nHierarchical Timing Analysis:");
    println!("---------------------------");
    let hierarchical = HIERARCHICAL_TIMINGS.read();
    let mut entries: Vec<_> = hierarchical.iter().collect();
    entries.sort_by(|a, b| b.1.0.cmp(&a.1.0));

    for (function_name, (total_duration, count, parents)) in entries {
        let avg_duration = total_duration.div_f64(*count as f64);
        println!(
            "{}: total={:.3}s, count={}, avg={:.3}ms{}",
            function_name,
            total_duration.as_secs_f64(),
            count,
            avg_duration.as_secs_f64() * 1000.0,
            if !parents.is_empty() {
                format!("\n  Called by: {}", parents.join(", "))
            } else {
                String::new()
            }
        );
    }

    println!("\nPerformance by Category:");
    println!("------------------------");
    let category_timings = CATEGORY_TIMINGS.read();
    let mut category_vec: Vec<_> = category_timings.iter().collect();
    category_vec.sort_by(|a, b| {
        let b_mean = b.1.mean();
        let a_mean = a.1.mean();
        b_mean.partial_cmp(&a_mean).unwrap_or(std::cmp::Ordering::Equal)
    });

    let total_time: f64 = category_vec.iter()
        .map(|(_, hist)| hist.mean() * (hist.len() as f64))
        .sum();

    for (category, histogram) in category_vec {
        let category_total = histogram.mean() * (histogram.len() as f64);
        let percentage = if total_time > 0.0 { category_total / total_time * 100.0 } else { 0.0 };
        println!(
            "{}: {:.1}% of total time\n  mean={:.3}ms, p95={:.3}ms, count={}",
            category.as_str(),
            percentage,
            histogram.mean() / 1_000_000.0,
            histogram.value_at_quantile(0.95) as f64 / 1_000_000.0,
            histogram.len(),
        );
    }

    println!("==========================\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_include_subcategory() {
        let category = OperationCategory::Evaluation { subcategory: EvaluationType::StageCosts };
        assert_eq!(category.as_str(), "Evaluation - Stage Costs");
        assert_eq!(OperationCategory::Sweep.as_str(), "Sensitivity Sweep");
    }

    #[test]
    fn repeated_records_accumulate_in_one_histogram() {
        let map: RwLock<HashMap<String, Histogram<u64>>> = RwLock::new(HashMap::new());
        record_into(&map, "evaluate".to_string(), 1_000);
        record_into(&map, "evaluate".to_string(), 3_000);
        record_into(&map, "sweep".to_string(), 0);

        let map = map.read();
        assert_eq!(map.len(), 2);
        assert_eq!(map["evaluate"].len(), 2);
        assert_eq!(map["sweep"].len(), 1);
    }

    #[test]
    fn guards_record_nested_calls_when_enabled() {
        set_timing_enabled(true);
        {
            let _outer = start_timing("logging_test_outer", OperationCategory::Other);
            let _inner = start_timing("logging_test_inner", OperationCategory::Breakeven);
        }
        assert_eq!(recorded_calls("logging_test_outer"), 1);
        assert_eq!(recorded_calls("logging_test_inner"), 1);

        let hierarchical = HIERARCHICAL_TIMINGS.read();
        let (_, _, parents) = &hierarchical["logging_test_inner"];
        assert_eq!(parents, &vec!["logging_test_outer".to_string()]);
    }
}
