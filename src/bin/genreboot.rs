//! `genreboot` command line: `preprocess` cleans the raw sales table,
//! `analyze` runs the bootstrap study and writes the summary tables.

// The library's dependencies are shared with this target.
#![allow(unused_crate_dependencies)]

use std::error::Error;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::{error, info, warn};

use genreboot::analysis::{Study, StudyConfig};
use genreboot::data::{
    Region, cleaned_data_path, filter_time_window, load_cleaned_data, load_raw_data, remove_invalid_entries,
    reshape_for_analysis, save_cleaned_data, select_genres, validate_records,
};
use genreboot::report::{StudyTables, TableStyle};
use genreboot::{DEFAULT_CONFIDENCE, DEFAULT_ITERATIONS, ResampleConfig};

const LOG_LEVEL: &str = "LOG_LEVEL";
const DEFAULT_LEVEL: &str = "info";
const DEFAULT_GENRES: [&str; 3] = ["Action", "Role-Playing", "Simulation"];

/// Bootstrap comparison of video game sales across genres and regions.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Clean the raw sales table and write one log-sales file per region.
    Preprocess(PreprocessArgs),
    /// Bootstrap genre means and pairwise differences, then write summary tables.
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug)]
struct PreprocessArgs {
    /// Raw sales CSV (Rank, Name, Platform, Year, Genre, ... , Global_Sales).
    #[arg(short, long)]
    input: PathBuf,
    #[arg(short, long, default_value = "data/processed")]
    out_dir: PathBuf,
    /// First release year kept (inclusive).
    #[arg(long, default_value_t = 1995)]
    start: i32,
    /// Last release year kept (inclusive).
    #[arg(long, default_value_t = 2016)]
    end: i32,
    /// Genre to keep; repeat for several. Defaults to Action, Role-Playing, Simulation.
    #[arg(short, long = "genre")]
    genres: Vec<String>,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    #[arg(short, long, default_value = "data/processed")]
    data_dir: PathBuf,
    #[arg(short, long, default_value = "results/tables")]
    out_dir: PathBuf,
    #[arg(short = 'n', long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Seed from system entropy instead of `--seed`; results are not reproducible.
    #[arg(long, conflicts_with = "seed")]
    entropy: bool,
    #[arg(short, long, default_value_t = DEFAULT_CONFIDENCE)]
    confidence: f64,
    /// Time window label of the cleaned files, as written by `preprocess`.
    #[arg(short, long, default_value = "1995-2016")]
    window: String,
    /// Genre to analyze; repeat for several.
    #[arg(short, long = "genre")]
    genres: Vec<String>,
    /// Region to analyze; repeat for several. Defaults to all five.
    #[arg(short, long = "region")]
    regions: Vec<Region>,
    /// Also write LaTeX versions of the combined tables.
    #[arg(long)]
    latex: bool,
}

fn genres_or_default(genres: Vec<String>) -> Vec<String> {
    if genres.is_empty() {
        DEFAULT_GENRES.map(String::from).to_vec()
    } else {
        genres
    }
}

fn preprocess(args: PreprocessArgs) -> Result<(), Box<dyn Error>> {
    let genres = genres_or_default(args.genres);
    let window = format!("{}-{}", args.start, args.end);

    let raw = load_raw_data(&args.input)?;
    let report = validate_records(&raw);
    for issue in &report.issues {
        warn!("{issue}");
    }

    let cleaned = remove_invalid_entries(raw);
    let windowed = filter_time_window(cleaned, Some(args.start), Some(args.end));
    info!("{} rows within {window}", windowed.len());
    let selected = select_genres(windowed, &genres);
    info!("{} rows after genre selection", selected.len());

    for region in Region::ALL {
        let observations = reshape_for_analysis(&selected, region);
        save_cleaned_data(&observations, &window, &args.out_dir)?;
    }
    Ok(())
}

fn analyze(args: AnalyzeArgs) -> Result<(), Box<dyn Error>> {
    let mut resample = ResampleConfig::new(args.iterations);
    if !args.entropy {
        resample = resample.with_seed(args.seed);
    }

    let config = StudyConfig {
        genres: genres_or_default(args.genres),
        regions: if args.regions.is_empty() {
            Region::ALL.to_vec()
        } else {
            args.regions
        },
        resample,
        confidence: args.confidence,
        ..StudyConfig::default()
    };
    info!(
        "Bootstrap iterations: {}, confidence: {}, seed: {:?}",
        config.resample.iterations, config.confidence, config.resample.seed
    );
    info!("Genres: {}", config.genres.join(", "));

    let study = Study::new(config);
    let results = study.run(|region| load_cleaned_data(cleaned_data_path(&args.data_dir, region, &args.window), region))?;

    if results.is_empty() {
        return Err("no analysis succeeded; check the data directory and window".into());
    }
    let tables = StudyTables::from_results(&results, TableStyle::default())?;
    let written = tables.write(&args.out_dir, args.latex)?;
    println!("{tables}");
    info!("Wrote {} table files", written.len());
    info!(
        "Analyzed {} genre means and {} genre differences; tables in {}",
        results.means.len(),
        results.differences.len(),
        args.out_dir.display()
    );
    Ok(())
}

fn main() {
    let log_level = std::env::var(LOG_LEVEL).unwrap_or_else(|_| DEFAULT_LEVEL.to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(&log_level)).init();

    let cli = Cli::parse();
    let outcome = match cli.cmd {
        Command::Preprocess(args) => preprocess(args),
        Command::Analyze(args) => analyze(args),
    };

    if let Err(err) = outcome {
        error!("{err}");
        std::process::exit(1);
    }
}
