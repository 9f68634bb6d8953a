//! Collabgraph CLI: build a contributor co-occurrence graph.
//!
//! Usage:
//!   collabgraph build --input records.jsonl --output universe.json [--config path]
//!   collabgraph stats --input records.jsonl [--top 10] [--config path]

use clap::{Args, Parser, Subcommand};
use collabgraph::{RecordTable, RunOutput, UniverseConfig, UniverseError, UniversePipeline};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "collabgraph",
    version,
    about = "Contributor co-occurrence graph builder"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Log debug detail, including every recovered cell
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the graph and write it as JSON
    Build {
        /// Records file (JSON array or JSON Lines)
        #[arg(long)]
        input: PathBuf,
        /// Output JSON file
        #[arg(long)]
        output: PathBuf,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Build the graph and print filter statistics without writing anything
    Stats {
        /// Records file (JSON array or JSON Lines)
        #[arg(long)]
        input: PathBuf,
        /// Number of top nodes to list
        #[arg(long, default_value_t = 10)]
        top: usize,
        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(Args)]
struct RunArgs {
    /// YAML config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override thresholds.min_records
    #[arg(long)]
    min_records: Option<u64>,
    /// Override thresholds.min_volume
    #[arg(long)]
    min_volume: Option<i64>,
    /// Override shards
    #[arg(long)]
    shards: Option<usize>,
}

impl RunArgs {
    fn resolve(&self) -> Result<UniverseConfig, UniverseError> {
        let mut config = match &self.config {
            Some(path) => UniverseConfig::load(path)?,
            None => UniverseConfig::default(),
        };
        if let Some(n) = self.min_records {
            config.thresholds.min_records = n;
        }
        if let Some(v) = self.min_volume {
            config.thresholds.min_volume = v;
        }
        if let Some(s) = self.shards {
            config.shards = s;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_build(input: &Path, output: &Path, run: &RunArgs) -> Result<(), UniverseError> {
    let pipeline = UniversePipeline::new(run.resolve()?);
    let stats = pipeline.run_file(input, output)?;
    println!(
        "Wrote {} nodes and {} links to {}",
        stats.filter.nodes_connected,
        stats.filter.edges_surviving,
        output.display()
    );
    Ok(())
}

fn print_stats(pipeline: &UniversePipeline, output: &RunOutput, top: usize) {
    let stats = &output.stats;
    println!("{:<28}  {:>10}", "STAGE", "COUNT");
    println!("{}", "-".repeat(40));
    println!("{:<28}  {:>10}", "records", stats.records);
    println!("{:<28}  {:>10}", "recovered list cells", stats.recoveries.lists);
    println!("{:<28}  {:>10}", "recovered owners cells", stats.recoveries.owners);
    println!("{:<28}  {:>10}", "nodes before filtering", stats.filter.nodes_total);
    println!("{:<28}  {:>10}", "nodes after significance", stats.filter.nodes_significant);
    println!("{:<28}  {:>10}", "nodes after orphan pruning", stats.filter.nodes_connected);
    println!("{:<28}  {:>10}", "edges before filtering", stats.filter.edges_total);
    println!("{:<28}  {:>10}", "edges after filtering", stats.filter.edges_surviving);

    if top == 0 || output.graph.nodes.is_empty() {
        return;
    }
    let mut nodes: Vec<_> = output.graph.nodes.iter().collect();
    nodes.sort_by(|a, b| {
        b.record_count
            .cmp(&a.record_count)
            .then_with(|| a.id.cmp(&b.id))
    });

    let labels = &pipeline.config().categories;
    println!();
    println!(
        "{:<32}  {:<12}  {:>8}  {:>14}  {:>8}",
        "NODE", "TYPE", "RECORDS", "VOLUME", "SCORE"
    );
    println!("{}", "-".repeat(82));
    for node in nodes.into_iter().take(top) {
        println!(
            "{:<32}  {:<12}  {:>8}  {:>14}  {:>8.2}",
            node.id.as_str(),
            labels.label(node.category),
            node.record_count,
            node.volume_total,
            node.avg_satisfaction()
        );
    }
}

fn cmd_stats(input: &Path, top: usize, run: &RunArgs) -> Result<(), UniverseError> {
    let pipeline = UniversePipeline::new(run.resolve()?);
    let table = RecordTable::load(input, &pipeline.config().columns)?;
    let output = pipeline.run(&table);
    print_stats(&pipeline, &output, top);
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Build { input, output, run } => cmd_build(input, output, run),
        Commands::Stats { input, top, run } => cmd_stats(input, *top, run),
    };
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
