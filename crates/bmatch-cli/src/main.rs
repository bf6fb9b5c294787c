mod bench;
mod demo;
mod input;
mod logging;

use bench::{
    BenchRecord, BenchSettings, DEFAULT_SIZES, build_run_id, load_records_jsonl,
    print_summary_table, run_bench, summarize_records, write_records_jsonl,
};
use bmatch::{
    Edge, InclusiveReport, MatchingConfig, Weights, check_inclusive, inclusive_matching_with,
    maximize_weighted_b_matching_with,
};
use bmatch_core::DEFAULT_PRIMAL_TOLERANCE;
use bmatch_highs::HighsSolver;
use bmatch_tools::RssSampler;
use clap::{Parser, Subcommand, ValueEnum};
use input::{ProblemFile, SolutionFile};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Maximum-weight b-matching with HiGHS")]
struct Cli {
    /// Tracing filter, overriding BMATCH_TRACE (for example `debug` or `bmatch=trace`)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve a problem file for a maximum-weight b-matching
    Solve(SolveArgs),
    /// Solve a fully connected problem file for an inclusive matching
    Inclusive(InclusiveArgs),
    /// Check a stored edge list for inclusiveness
    Check(CheckArgs),
    /// Time solves on random complete graphs and save JSONL artifacts
    Bench(BenchArgs),
    /// Render a saved benchmark artifact
    Report(ReportArgs),
    /// Pair up six people from three cities
    Demo(SolverArgs),
}

#[derive(Parser, Debug)]
struct SolverArgs {
    /// Wall-clock limit handed to the solver
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Absolute slack used when re-checking the returned matching
    #[arg(long, default_value_t = DEFAULT_PRIMAL_TOLERANCE)]
    tolerance: f64,

    /// Solver thread count
    #[arg(long)]
    threads: Option<u32>,

    /// Print HiGHS output to the console
    #[arg(long)]
    solver_log: bool,
}

impl SolverArgs {
    fn config(&self) -> MatchingConfig {
        let mut config = MatchingConfig::new()
            .with_optional_timeout_ms(self.timeout_ms)
            .with_primal_tolerance(self.tolerance)
            .with_log_to_console(self.solver_log);
        if let Some(threads) = self.threads {
            config = config.with_threads(threads);
        }
        config
    }
}

#[derive(Parser, Debug)]
struct SolveArgs {
    /// JSON problem file with `b_maxs` and `edges`
    #[arg(long)]
    input: PathBuf,

    /// Lower degree bound shared by every node
    #[arg(long, default_value_t = 0)]
    b_min: u32,

    #[command(flatten)]
    solver: SolverArgs,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Parser, Debug)]
struct InclusiveArgs {
    /// JSON problem file with `b_maxs` and `edges`
    #[arg(long)]
    input: PathBuf,

    #[command(flatten)]
    solver: SolverArgs,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// JSON file with `b_maxs` and `solution`
    #[arg(long)]
    input: PathBuf,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Parser, Debug)]
struct BenchArgs {
    /// Comma-separated requested node counts
    #[arg(long, value_delimiter = ',')]
    sizes: Option<Vec<usize>>,

    /// Number of solves per size
    #[arg(long, default_value_t = 10)]
    repetitions: u32,

    /// Wall-clock limit per solve
    #[arg(long, default_value_t = 2_000)]
    timeout_ms: u64,

    /// Seed for the random weights
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// JSONL output artifact path
    #[arg(long)]
    output: Option<PathBuf>,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Parser, Debug)]
struct ReportArgs {
    /// Input JSONL benchmark artifact
    #[arg(long)]
    input: PathBuf,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Ndjson,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct SelectedEdge {
    i: usize,
    j: usize,
    weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct MatchingOutput {
    edges: Vec<SelectedEdge>,
    total_weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    inclusive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deficient_nodes: Option<Vec<usize>>,
}

impl MatchingOutput {
    fn new(weights: &Weights, edges: &[Edge]) -> Self {
        let edges: Vec<SelectedEdge> = edges
            .iter()
            .map(|&(i, j)| SelectedEdge {
                i,
                j,
                weight: weights.get(&(i, j)).copied().unwrap_or_default(),
            })
            .collect();
        let total_weight = edges.iter().map(|edge| edge.weight).sum();
        Self {
            edges,
            total_weight,
            inclusive: None,
            deficient_nodes: None,
        }
    }

    fn with_report(mut self, report: InclusiveReport) -> Self {
        let (success, deficient_nodes) = report.into_parts();
        self.inclusive = Some(success);
        self.deficient_nodes = Some(deficient_nodes);
        self
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.as_deref())?;
    match cli.command {
        Command::Solve(args) => solve_command(args),
        Command::Inclusive(args) => inclusive_command(args),
        Command::Check(args) => check_command(args),
        Command::Bench(args) => bench_command(args),
        Command::Report(args) => report_command(args),
        Command::Demo(args) => demo_command(args),
    }
}

fn solve_command(args: SolveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let problem = ProblemFile::load(&args.input)?;
    let weights = problem.weights()?;
    let config = args.solver.config().with_b_min(args.b_min);

    let mut solver = HighsSolver::new();
    let edges = maximize_weighted_b_matching_with(&mut solver, &problem.b_maxs, &weights, &config)?;
    render_matching(args.format, &MatchingOutput::new(&weights, &edges))
}

fn inclusive_command(args: InclusiveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let problem = ProblemFile::load(&args.input)?;
    let weights = problem.weights()?;

    let mut solver = HighsSolver::new();
    let edges =
        inclusive_matching_with(&mut solver, &problem.b_maxs, &weights, &args.solver.config())?;
    let report = check_inclusive(&problem.b_maxs, &edges)?;
    let output = MatchingOutput::new(&weights, &edges).with_report(report);
    render_matching(args.format, &output)
}

fn check_command(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let stored = SolutionFile::load(&args.input)?;
    let report = check_inclusive(&stored.b_maxs, &stored.solution)?;
    let success = report.success;

    match args.format {
        OutputFormat::Table => {
            println!("inclusive: {}", report.success);
            println!("deficient nodes: {:?}", report.deficient_nodes);
        }
        OutputFormat::Json | OutputFormat::Ndjson => {
            let value = serde_json::json!({
                "inclusive": report.success,
                "deficient_nodes": report.deficient_nodes,
            });
            if args.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{}", serde_json::to_string(&value)?);
            }
        }
    }

    if success {
        Ok(())
    } else {
        Err(boxed_input_error("solution is not an inclusive matching"))
    }
}

fn bench_command(args: BenchArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.repetitions == 0 {
        return Err(boxed_input_error("repetitions must be greater than zero"));
    }

    let run_id = build_run_id()?;
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("artifacts/bench/{}.jsonl", run_id)));
    let settings = BenchSettings {
        sizes: args.sizes.unwrap_or_else(|| DEFAULT_SIZES.to_vec()),
        repetitions: args.repetitions,
        timeout_ms: args.timeout_ms,
        seed: args.seed,
    };
    info!(
        component = "bench",
        operation = "run",
        status = "start",
        run_id = run_id.as_str(),
        sizes = ?settings.sizes,
        repetitions = settings.repetitions,
        "Starting benchmark"
    );

    let mut solver = HighsSolver::new();
    let mut sampler = RssSampler::new();
    let records = run_bench(&mut solver, &settings, &mut sampler, &run_id);

    write_records_jsonl(&output_path, &records)?;
    render_records(args.format, &records)?;
    println!("artifact: {}", output_path.display());
    Ok(())
}

fn report_command(args: ReportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let records = load_records_jsonl(&args.input)?;
    render_records(args.format, &records)
}

fn demo_command(args: SolverArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut solver = HighsSolver::new();
    let outcome = demo::run_demo(&mut solver, &args.config())?;
    for line in demo::render(&outcome) {
        println!("{line}");
    }
    Ok(())
}

fn render_matching(
    format: OutputFormat,
    output: &MatchingOutput,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Table => {
            println!("{:>6} {:>6} {:>12}", "i", "j", "weight");
            for edge in &output.edges {
                println!("{:>6} {:>6} {:>12.6}", edge.i, edge.j, edge.weight);
            }
            println!("selected: {}", output.edges.len());
            println!("total weight: {:.6}", output.total_weight);
            if let Some(inclusive) = output.inclusive {
                println!("inclusive: {}", inclusive);
            }
            if let Some(nodes) = output.deficient_nodes.as_ref() {
                println!("deficient nodes: {:?}", nodes);
            }
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(output)?);
            Ok(())
        }
        OutputFormat::Ndjson => {
            for edge in &output.edges {
                println!("{}", serde_json::to_string(edge)?);
            }
            Ok(())
        }
    }
}

fn render_records(
    format: OutputFormat,
    records: &[BenchRecord],
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Table => {
            print_summary_table(&summarize_records(records));
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(records)?);
            Ok(())
        }
        OutputFormat::Ndjson => {
            for record in records {
                println!("{}", serde_json::to_string(record)?);
            }
            Ok(())
        }
    }
}

fn boxed_input_error(message: &str) -> Box<dyn std::error::Error> {
    Box::new(std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        message.to_string(),
    ))
}
