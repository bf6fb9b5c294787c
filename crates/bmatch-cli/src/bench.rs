//! Solve-time benchmark on random complete graphs.
//!
//! Each size gets a capacity mix of 70% `1`, 10% `2` and 20% `3` (class
//! counts rounded separately, so the node count can drift from the
//! requested size) and uniform random weights in `[0, 1)`. The graph is
//! generated once per size and solved `repetitions` times.

use bmatch::{MatchingConfig, Weights, matching_weight, maximize_weighted_b_matching_with};
use bmatch_core::Solver;
use bmatch_tools::memory::{RssSampler, rss_delta};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{File, create_dir_all};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

pub const DEFAULT_SIZES: [usize; 6] = [5, 10, 20, 40, 80, 200];
pub const SCHEMA_VERSION: u32 = 1;

const CAPACITY_MIX: [(u32, f64); 3] = [(1, 0.7), (2, 0.1), (3, 0.2)];

#[derive(Debug, Clone)]
pub struct BenchSettings {
    pub sizes: Vec<usize>,
    pub repetitions: u32,
    pub timeout_ms: u64,
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchRecord {
    pub schema_version: u32,
    pub run_id: String,
    pub size: usize,
    pub repetition: u32,
    pub nodes: usize,
    pub edges: usize,
    pub selected: usize,
    pub total_weight: f64,
    pub error: Option<String>,
    pub duration_ms: f64,
    pub rss_before_bytes: Option<u64>,
    pub rss_after_bytes: Option<u64>,
    pub rss_delta_bytes: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow {
    pub size: usize,
    pub nodes: usize,
    pub edges: usize,
    pub samples: usize,
    pub failures: usize,
    pub mean_duration_ms: f64,
    pub max_duration_ms: f64,
    pub mean_selected: f64,
    pub mean_total_weight: f64,
    pub mean_rss_delta_bytes: Option<f64>,
    pub max_rss_after_bytes: Option<u64>,
}

/// Capacity list for a requested size.
pub fn capacities_for(size: usize) -> Vec<u32> {
    CAPACITY_MIX
        .iter()
        .flat_map(|&(b_max, ratio)| {
            let count = (size as f64 * ratio).round_ties_even() as usize;
            std::iter::repeat_n(b_max, count)
        })
        .collect()
}

/// Complete graph on `nodes` nodes with uniform weights in `[0, 1)`.
pub fn random_complete_graph<R: Rng>(nodes: usize, rng: &mut R) -> Weights {
    let mut weights = Weights::new();
    for i in 0..nodes {
        for j in (i + 1)..nodes {
            weights.insert((i, j), rng.random::<f64>());
        }
    }
    weights
}

/// Run every size and repetition, one record per solve.
///
/// A failed solve is recorded with its error rather than aborting the run.
pub fn run_bench<S>(
    solver: &mut S,
    settings: &BenchSettings,
    sampler: &mut RssSampler,
    run_id: &str,
) -> Vec<BenchRecord>
where
    S: Solver + ?Sized,
{
    let mut rng = ChaCha8Rng::seed_from_u64(settings.seed);
    let config = MatchingConfig::new().with_timeout_ms(settings.timeout_ms);
    let mut records = Vec::new();

    for &size in &settings.sizes {
        let b_maxs = capacities_for(size);
        let weights = random_complete_graph(b_maxs.len(), &mut rng);

        for repetition in 1..=settings.repetitions {
            let rss_before = sampler.rss_bytes("bench_solve_start");
            let started = Instant::now();
            let result = maximize_weighted_b_matching_with(solver, &b_maxs, &weights, &config);
            let duration_ms = started.elapsed().as_secs_f64() * 1000.0;
            let rss_after = sampler.rss_bytes("bench_solve_end");

            let (selected, total_weight, error) = match result {
                Ok(edges) => (edges.len(), matching_weight(&weights, &edges), None),
                Err(err) => {
                    warn!(
                        component = "bench",
                        operation = "solve",
                        status = "error",
                        size,
                        repetition,
                        code = err.code(),
                        "Benchmark solve failed"
                    );
                    (0, 0.0, Some(err.to_string()))
                }
            };
            debug!(
                component = "bench",
                operation = "solve",
                status = if error.is_none() { "success" } else { "error" },
                size,
                repetition,
                nodes = b_maxs.len(),
                selected,
                duration_ms,
                "Benchmark repetition finished"
            );

            records.push(BenchRecord {
                schema_version: SCHEMA_VERSION,
                run_id: run_id.to_string(),
                size,
                repetition,
                nodes: b_maxs.len(),
                edges: weights.len(),
                selected,
                total_weight,
                error,
                duration_ms,
                rss_before_bytes: rss_before,
                rss_after_bytes: rss_after,
                rss_delta_bytes: rss_delta(rss_before, rss_after),
            });
        }
    }

    records
}

pub fn summarize_records(records: &[BenchRecord]) -> Vec<SummaryRow> {
    #[derive(Default)]
    struct Acc {
        nodes: usize,
        edges: usize,
        samples: usize,
        failures: usize,
        duration_sum: f64,
        duration_max: f64,
        selected_sum: usize,
        weight_sum: f64,
        rss_delta_sum: f64,
        rss_delta_count: usize,
        rss_after_max: Option<u64>,
    }

    let mut groups: BTreeMap<usize, Acc> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(record.size).or_default();
        entry.nodes = record.nodes;
        entry.edges = record.edges;
        entry.samples += 1;
        if record.error.is_some() {
            entry.failures += 1;
        }
        entry.duration_sum += record.duration_ms;
        entry.duration_max = entry.duration_max.max(record.duration_ms);
        entry.selected_sum += record.selected;
        entry.weight_sum += record.total_weight;
        if let Some(delta) = record.rss_delta_bytes {
            entry.rss_delta_sum += delta as f64;
            entry.rss_delta_count += 1;
        }
        entry.rss_after_max = entry.rss_after_max.max(record.rss_after_bytes);
    }

    groups
        .into_iter()
        .map(|(size, acc)| {
            let samples = acc.samples.max(1) as f64;
            SummaryRow {
                size,
                nodes: acc.nodes,
                edges: acc.edges,
                samples: acc.samples,
                failures: acc.failures,
                mean_duration_ms: acc.duration_sum / samples,
                max_duration_ms: acc.duration_max,
                mean_selected: acc.selected_sum as f64 / samples,
                mean_total_weight: acc.weight_sum / samples,
                mean_rss_delta_bytes: (acc.rss_delta_count > 0)
                    .then(|| acc.rss_delta_sum / acc.rss_delta_count as f64),
                max_rss_after_bytes: acc.rss_after_max,
            }
        })
        .collect()
}

pub fn print_summary_table(rows: &[SummaryRow]) {
    println!(
        "{:>6} {:>6} {:>7} {:>7} {:>6} {:>12} {:>12} {:>9} {:>12} {:>12} {:>12}",
        "size",
        "nodes",
        "edges",
        "samples",
        "failed",
        "mean_ms",
        "max_ms",
        "selected",
        "weight",
        "mean_rss_mb",
        "max_rss_mb"
    );
    for row in rows {
        println!(
            "{:>6} {:>6} {:>7} {:>7} {:>6} {:>12.3} {:>12.3} {:>9.1} {:>12.4} {:>12} {:>12}",
            row.size,
            row.nodes,
            row.edges,
            row.samples,
            row.failures,
            row.mean_duration_ms,
            row.max_duration_ms,
            row.mean_selected,
            row.mean_total_weight,
            format_option_mb_f64(row.mean_rss_delta_bytes),
            format_option_mb_u64(row.max_rss_after_bytes),
        );
    }
}

fn format_option_mb_f64(value: Option<f64>) -> String {
    value.map_or_else(
        || "-".to_string(),
        |bytes| format!("{:.3}", bytes / (1024.0 * 1024.0)),
    )
}

fn format_option_mb_u64(value: Option<u64>) -> String {
    value.map_or_else(
        || "-".to_string(),
        |bytes| format!("{:.3}", bytes as f64 / (1024.0 * 1024.0)),
    )
}

pub fn write_records_jsonl(
    path: &Path,
    records: &[BenchRecord],
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_records_jsonl(path: &Path) -> Result<Vec<BenchRecord>, Box<dyn std::error::Error>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str::<BenchRecord>(&line)?);
    }
    Ok(records)
}

pub fn build_run_id() -> Result<String, Box<dyn std::error::Error>> {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| std::io::Error::other(err.to_string()))?
        .as_millis();
    Ok(format!("bmatch_{}", millis))
}
