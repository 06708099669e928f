//! mh - mapharvest CLI
//!
//! Harvest places and reviews from map search results, then clean, merge
//! and label the review files. Every command prints a JSON summary on
//! stdout; logs and relabel prompts go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use mapharvest::{save_places, scrape_places, BatchOrchestrator, BatchReport, HarvestConfig, MapsSelectors};
use mapharvest_core::{ChromeLauncher, Error};
use mapharvest_store::{merge_reviews, read_links, timestamped_name, DatasetStore, MergeReport, Table};
use mapharvest_text::{clean_table, label_table, relabel, sample_rows, CleanReport, LabelStats, RelabelReport};

const DATASET_DIR: &str = "dataset";

#[derive(Parser)]
#[command(name = "mh")]
#[command(about = "mapharvest - places and reviews from map search results")]
#[command(version)]
struct Cli {
    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    // === Harvesting ===
    /// Search places, then harvest reviews for each of them
    Run {
        #[arg(short, long)]
        query: String,
        /// Directory name under dataset/
        #[arg(short, long)]
        output_dir: String,
        #[arg(long, default_value = "50")]
        max_places: usize,
        #[arg(long)]
        max_reviews: Option<usize>,
        #[arg(long)]
        headless: bool,
        /// Seconds between places
        #[arg(long, default_value = "2.0")]
        delay: f64,
        #[arg(long)]
        places_output: Option<PathBuf>,
    },
    /// Search places and save the listing
    Places {
        #[arg(short, long)]
        query: String,
        #[arg(long, default_value = "50")]
        max_places: usize,
        #[arg(long)]
        headless: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Harvest reviews for every link in a places file
    Reviews {
        #[arg(long)]
        links: PathBuf,
        #[arg(long)]
        max_reviews: Option<usize>,
        #[arg(long, default_value = "2.0")]
        delay: f64,
        #[arg(short, long, default_value = DATASET_DIR)]
        output_dir: PathBuf,
        #[arg(long)]
        headless: bool,
    },

    // === Dataset ===
    /// Normalize review text and drop rows left empty
    Clean {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long, default_value = "review")]
        column: String,
    },
    /// Merge every review file under a dataset directory
    Merge {
        #[arg(long, default_value = DATASET_DIR)]
        dataset_dir: PathBuf,
        #[arg(short, long, default_value = "data_clean/all_reviews_merged.csv")]
        output: PathBuf,
    },
    /// Add keyword-based aspect sentiment columns
    Label {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long, default_value = "review")]
        column: String,
        /// Label only this many randomly chosen rows
        #[arg(long)]
        sample: Option<usize>,
        #[arg(long, default_value = "42")]
        seed: u64,
    },
    /// Review labeled rows one aspect at a time: p, n, neu, Enter keeps, q saves and quits
    Relabel {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Zero-based row to resume from
        #[arg(long, default_value = "0")]
        start: usize,
    },
}

#[derive(Serialize)]
struct Output<T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<Error>,
}

impl<T: Serialize> Output<T> {
    fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }
    fn err(e: Error) -> Output<()> {
        Output { success: false, data: None, error: Some(e) }
    }
}

fn print_json<T: Serialize>(output: &T) {
    match serde_json::to_string_pretty(output) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ── Main ────────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<(), anyhow::Error> = match cli.command {
        Commands::Run { query, output_dir, max_places, max_reviews, headless, delay, places_output } => {
            run_harvest(move || cmd_run(&query, &output_dir, max_places, max_reviews, headless, delay, places_output))
        }
        Commands::Places { query, max_places, headless, output } => {
            run_harvest(move || cmd_places(&query, max_places, headless, output))
        }
        Commands::Reviews { links, max_reviews, delay, output_dir, headless } => {
            run_harvest(move || cmd_reviews(&links, max_reviews, delay, &output_dir, headless))
        }
        Commands::Clean { input, output, column } => cmd_clean(&input, &output, &column),
        Commands::Merge { dataset_dir, output } => cmd_merge(&dataset_dir, &output),
        Commands::Label { input, output, column, sample, seed } => {
            cmd_label(&input, &output, &column, sample, seed)
        }
        Commands::Relabel { input, output, start } => {
            cmd_relabel(&input, &output, start, std::io::stdin().lock(), std::io::stderr())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run_harvest<F>(f: F) -> Result<(), anyhow::Error>
where F: FnOnce() -> Result<(), anyhow::Error> {
    match f() {
        Ok(()) => Ok(()),
        Err(e) => {
            if let Some(err) = e.downcast_ref::<Error>() {
                print_json(&Output::<()>::err(err.clone()));
            }
            Err(e)
        }
    }
}

fn harvest_config(headless: bool, delay: f64) -> HarvestConfig {
    HarvestConfig::from_env().headless(headless).with_delay(delay)
}

// ══════════════════════════════════════════════════════════════════════════════
//  Harvesting commands
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Serialize)]
struct PlacesSummary {
    query: String,
    places: usize,
    failed: usize,
    file: PathBuf,
}

#[derive(Serialize)]
struct RunSummary {
    places: PlacesSummary,
    reviews: BatchReport,
}

fn harvest_and_save(
    launcher: &ChromeLauncher,
    query: &str,
    max_places: usize,
    config: &HarvestConfig,
    path: &Path,
) -> Result<(PlacesSummary, Vec<String>)> {
    let harvest = scrape_places(launcher, query, Some(max_places), &MapsSelectors::default(), config)?;
    let written = save_places(path, &harvest.places)
        .with_context(|| format!("failed to write {}", path.display()))?;
    let links: Vec<String> = harvest.places.iter().map(|p| p.link.clone()).collect();
    let summary = PlacesSummary {
        query: query.to_string(),
        places: written,
        failed: harvest.failed,
        file: path.to_path_buf(),
    };
    Ok((summary, links))
}

fn cmd_run(
    query: &str,
    output_dir: &str,
    max_places: usize,
    max_reviews: Option<usize>,
    headless: bool,
    delay: f64,
    places_output: Option<PathBuf>,
) -> Result<()> {
    let config = harvest_config(headless, delay);
    let launcher = ChromeLauncher::new(config.browser.clone());
    let store = DatasetStore::with_dir(Path::new(DATASET_DIR).join(output_dir))?;
    let places_path = places_output.unwrap_or_else(|| store.file("places.csv"));

    let (places, links) = harvest_and_save(&launcher, query, max_places, &config, &places_path)?;
    if links.is_empty() {
        info!(%query, "no places found, skipping reviews");
    }
    let selectors = MapsSelectors::default();
    let reviews = BatchOrchestrator::new(&launcher, &store, &selectors, &config).run(&links, max_reviews)?;
    print_json(&Output::ok(RunSummary { places, reviews }));
    Ok(())
}

fn cmd_places(query: &str, max_places: usize, headless: bool, output: Option<PathBuf>) -> Result<()> {
    let config = harvest_config(headless, 0.0);
    let launcher = ChromeLauncher::new(config.browser.clone());
    let path = output.unwrap_or_else(|| PathBuf::from(timestamped_name("places", query)));
    let (summary, _) = harvest_and_save(&launcher, query, max_places, &config, &path)?;
    print_json(&Output::ok(summary));
    Ok(())
}

fn cmd_reviews(
    links_file: &Path,
    max_reviews: Option<usize>,
    delay: f64,
    output_dir: &Path,
    headless: bool,
) -> Result<()> {
    let links = read_links(links_file)
        .with_context(|| format!("failed to read links from {}", links_file.display()))?;
    info!(links = links.len(), file = %links_file.display(), "loaded links");
    let config = harvest_config(headless, delay);
    let launcher = ChromeLauncher::new(config.browser.clone());
    let store = DatasetStore::with_dir(output_dir)?;
    let selectors = MapsSelectors::default();
    let report = BatchOrchestrator::new(&launcher, &store, &selectors, &config).run(&links, max_reviews)?;
    print_json(&Output::ok(report));
    Ok(())
}

// ══════════════════════════════════════════════════════════════════════════════
//  Dataset commands
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Serialize)]
struct CleanSummary {
    #[serde(flatten)]
    report: CleanReport,
    file: PathBuf,
}

fn cmd_clean(input: &Path, output: &Path, column: &str) -> Result<()> {
    let mut table = Table::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    let report = clean_table(&mut table, column)?;
    table.write(output)?;
    print_json(&Output::ok(CleanSummary { report, file: output.to_path_buf() }));
    Ok(())
}

#[derive(Serialize)]
struct MergeSummary {
    #[serde(flatten)]
    report: MergeReport,
    file: PathBuf,
}

fn cmd_merge(dataset_dir: &Path, output: &Path) -> Result<()> {
    let (table, report) = merge_reviews(dataset_dir)
        .with_context(|| format!("failed to merge {}", dataset_dir.display()))?;
    table.write(output)?;
    print_json(&Output::ok(MergeSummary { report, file: output.to_path_buf() }));
    Ok(())
}

#[derive(Serialize)]
struct LabelSummary {
    #[serde(flatten)]
    stats: LabelStats,
    file: PathBuf,
}

fn cmd_label(input: &Path, output: &Path, column: &str, sample: Option<usize>, seed: u64) -> Result<()> {
    let mut table = Table::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    if let Some(n) = sample {
        sample_rows(&mut table, n, seed);
    }
    let stats = label_table(&mut table, column)?;
    table.write(output)?;
    print_json(&Output::ok(LabelSummary { stats, file: output.to_path_buf() }));
    Ok(())
}

#[derive(Serialize)]
struct RelabelSummary {
    #[serde(flatten)]
    report: RelabelReport,
    file: PathBuf,
}

fn cmd_relabel(input: &Path, output: &Path, start: usize, answers: impl BufRead, prompts: impl Write) -> Result<()> {
    let mut table = Table::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    info!(rows = table.len(), start, "manual review");
    let report = relabel(&mut table, start, answers, prompts, |t: &Table| t.write(output))?;
    print_json(&Output::ok(RelabelSummary { report, file: output.to_path_buf() }));
    Ok(())
}
