mod synthetic;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dimuon_filter::{DimuonFilter, FilterConfig, FilterPath, PairCut};
use event_data::parser::write_events;
use event_data::EventStore;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;
use trigger_runner::{RunReport, RunSummary, TriggerRunner};

/// hlt-dimuon - Dimuon pair trigger filter
#[derive(Parser)]
#[command(name = "hlt-dimuon")]
#[command(about = "Select events with a muon pair passing kinematic cuts", long_about = None)]
struct Cli {
    /// Trigger path name reported on every product
    #[arg(long, default_value = "HLT_Dimuon")]
    path_name: String,

    /// Module label of the dimuon filter
    #[arg(long, default_value = "hltDiMuonFilter")]
    module: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the filter over an events file
    Run {
        /// Filter configuration (JSON)
        #[arg(long)]
        config: PathBuf,

        /// Events file (JSON lines)
        #[arg(long)]
        events: PathBuf,

        /// Show the selected candidates of every accepted event
        #[arg(long)]
        explain: bool,

        /// Print the full report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show a parsed configuration
    Config {
        #[arg(long)]
        config: PathBuf,
    },

    /// Write synthetic events to a file
    Generate {
        #[arg(long)]
        output: PathBuf,

        /// Number of events
        #[arg(long, default_value = "1000")]
        events: u64,

        /// Maximum candidates per event
        #[arg(long, default_value = "6")]
        candidates: usize,

        #[arg(long, default_value = "42")]
        seed: u64,

        /// Collection tag to store candidates under
        #[arg(long, default_value = "hltL3MuonCandidates")]
        tag: String,
    },

    /// Run benchmark on synthetic events
    Benchmark {
        #[arg(long)]
        config: PathBuf,

        /// Number of events
        #[arg(long, default_value = "10000")]
        events: u64,

        /// Maximum candidates per event
        #[arg(long, default_value = "8")]
        candidates: usize,

        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Dispatch to appropriate command handler
    match &cli.command {
        Commands::Run {
            config,
            events,
            explain,
            json,
        } => handle_run(&cli, config, events, *explain, *json)?,
        Commands::Config { config } => handle_config(config)?,
        Commands::Generate {
            output,
            events,
            candidates,
            seed,
            tag,
        } => handle_generate(output, *events, *candidates, *seed, tag)?,
        Commands::Benchmark {
            config,
            events,
            candidates,
            seed,
        } => handle_benchmark(&cli, config, *events, *candidates, *seed)?,
    }

    Ok(())
}

/// Build a single-filter path from a configuration file.
fn build_runner(cli: &Cli, config_path: &Path) -> Result<(FilterConfig, TriggerRunner)> {
    let config = FilterConfig::load(config_path)
        .with_context(|| format!("Failed to load configuration {}", config_path.display()))?;
    let path = FilterPath::new(cli.path_name.clone()).add_filter(DimuonFilter::from_config(cli.module.clone(), &config));
    Ok((config, TriggerRunner::new(path)))
}

/// Handle the 'run' command
fn handle_run(cli: &Cli, config_path: &Path, events_path: &Path, explain: bool, json: bool) -> Result<()> {
    let (config, runner) = build_runner(cli, config_path)?;
    info!("Filtering {} on path {}", config.cand_tag, runner.path().name());

    let start = Instant::now();
    let store = EventStore::load_from_file(events_path)
        .with_context(|| format!("Failed to load events from {}", events_path.display()))?;
    if !json {
        println!(
            "{} Loaded {} events ({} candidates) in {:?}",
            "✓".green(),
            store.len(),
            store.candidate_count(&config.cand_tag),
            start.elapsed()
        );
    }

    let report = runner.run(store.events())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_outcomes(&report, &store, &config.cand_tag, explain);
    print_summary(&report.summary, report.elapsed);
    Ok(())
}

/// Handle the 'config' command
fn handle_config(config_path: &Path) -> Result<()> {
    let config = FilterConfig::load(config_path)
        .with_context(|| format!("Failed to load configuration {}", config_path.display()))?;
    let cuts = config.cuts();

    println!("{}", format!("Configuration {}", config_path.display()).bold().blue());
    println!("{}Input collection: {}", "• ".green(), config.cand_tag);
    println!("{}Fast accept: {}", "• ".green(), cuts.fast_accept);
    println!("{}Charge requirement: {:?}", "• ".green(), cuts.charge_mode);
    println!(
        "{}Candidate: |eta| <= {}, hits >= {}, |d0| <= {}, |dz| <= {}",
        "• ".cyan(),
        cuts.max_abs_eta,
        cuts.min_valid_hits,
        cuts.max_abs_d0,
        cuts.max_abs_dz
    );
    println!(
        "{}Thresholds: leading >= {}, trailing >= {}, {} sigma correction",
        "• ".cyan(),
        cuts.min_leading_threshold,
        cuts.min_trailing_threshold,
        cuts.sigma_multiplier
    );
    println!(
        "{}Pair: pt >= {}, mass in [{}, {}], acoplanarity in [{}, {}]",
        "• ".cyan(),
        cuts.min_pair_pt,
        cuts.min_invariant_mass,
        cuts.max_invariant_mass,
        cuts.min_acoplanarity,
        cuts.max_acoplanarity
    );
    Ok(())
}

/// Handle the 'generate' command
fn handle_generate(output: &Path, events: u64, candidates: usize, seed: u64, tag: &str) -> Result<()> {
    let start = Instant::now();
    let generated = synthetic::generate_events(events, candidates, tag, seed);
    write_events(output, &generated).with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{} Wrote {} events to {} in {:?}",
        "✓".green(),
        generated.len(),
        output.display(),
        start.elapsed()
    );
    Ok(())
}

/// Handle the 'benchmark' command
fn handle_benchmark(cli: &Cli, config_path: &Path, events: u64, candidates: usize, seed: u64) -> Result<()> {
    if events == 0 {
        bail!("Benchmark needs at least one event");
    }
    let (config, runner) = build_runner(cli, config_path)?;
    let generated = synthetic::generate_events(events, candidates, &config.cand_tag, seed);

    // Per-event latency, one event at a time
    info!("Timing {} events sequentially", generated.len());
    let mut timings = Vec::with_capacity(generated.len());
    for event in &generated {
        let start = Instant::now();
        runner.run_event(event)?;
        timings.push(start.elapsed());
    }

    // Throughput over the parallel runner
    info!("Timing {} events on the parallel runner", generated.len());
    let report = runner.run(&generated)?;

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / timings.len() as u32;
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f64 * 0.95) as usize];
    let p99 = timings[(timings.len() as f64 * 0.99) as usize];
    let throughput = events as f64 / report.elapsed.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Events: {} (up to {} candidates each)", events, candidates);
    println!("Sequential time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Parallel time: {:?}", report.elapsed);
    println!("Throughput: {:.2} events/second", throughput);
    print_summary(&report.summary, report.elapsed);
    Ok(())
}

/// Print one line per event, with the selected candidates if requested.
fn print_outcomes(report: &RunReport, store: &EventStore, tag: &str, explain: bool) {
    println!("{}", "Decisions:".bold().blue());
    for outcome in &report.outcomes {
        let decision = if outcome.accept() {
            "ACCEPT".green()
        } else {
            "reject".red()
        };
        let pairs = outcome
            .result
            .products
            .last()
            .map(|p| p.output.accepted_pairs)
            .unwrap_or(0);
        println!("{:>12} {} ({} pairs)", outcome.id.to_string(), decision, pairs);

        if !explain || !outcome.accept() {
            continue;
        }
        let Some(candidates) = store.get(outcome.id).and_then(|e| e.get_by_label(tag).ok()) else {
            continue;
        };
        for &index in outcome.selected() {
            if let Some(c) = candidates.get(index) {
                println!(
                    "   [{}] pt {:.2} eta {:.2} phi {:.2} charge {:+}",
                    index,
                    c.pt,
                    c.eta,
                    c.phi,
                    c.charge.value()
                );
            }
        }
    }
}

fn print_summary(summary: &RunSummary, elapsed: Duration) {
    println!("{}", format!("Summary for {}:", summary.path).bold().blue());
    println!(
        "{}Accepted {}/{} events ({:.2}%) in {:.2?}",
        "• ".green(),
        summary.accepted,
        summary.events,
        summary.accept_fraction * 100.0,
        elapsed
    );
    println!("{}Accepted pairs: {}", "• ".green(), summary.accepted_pairs);

    let flow = &summary.cut_flow;
    println!("{}", "Cut flow:".bold());
    println!("  leading candidates rejected: {}", flow.leading_rejected);
    println!("  pairs with rejected partner: {}", flow.partner_rejected);
    println!("  pairs evaluated:             {}", flow.pairs_evaluated());
    for cut in PairCut::CASCADE {
        println!("  rejected by {:<16} {}", format!("{}:", cut.name()), flow.rejected_by(cut));
    }
    println!("  accepted:                    {}", flow.accepted);
}
