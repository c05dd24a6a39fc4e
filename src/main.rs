// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use monkey_classif::{
    load_monkeys, save_monkeys, Attribute, FeatureSet, IngestOptions, KnnEngine, KnnSettings,
    ScatterPlot, Strategy,
};

#[derive(Parser)]
#[command(name = "monkey-classif")]
#[command(about = "Treat monkey dataframe", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute knn on a dataframe and save results
    Knn {
        /// Input CSV (species, size, weight, fur_color)
        input: PathBuf,

        /// Output CSV
        output: PathBuf,

        /// Attributes to use for the KNN algorithm (at least 2)
        #[arg(required = true, num_args = 2..)]
        features: Vec<Attribute>,

        /// Number of voting neighbors [default: 5]
        #[arg(short, long)]
        k: Option<usize>,

        /// Vote strategy: plurality or weighted [default: plurality]
        #[arg(short, long)]
        strategy: Option<Strategy>,

        /// JSON file with k/strategy defaults (features optional)
        #[arg(short, long, env = "MONKEY_CLASSIF_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Visualize values in a dataframe following two axes
    Visualize {
        /// Input CSV; every cell must be filled
        input: PathBuf,

        /// X axis: size, weight or fur_color
        x: Attribute,

        /// Y axis: size, weight or fur_color
        y: Attribute,
    },

    /// List the attributes that can be used as features
    Features,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("monkey_classif=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Knn {
            input,
            output,
            features,
            k,
            strategy,
            config,
        } => run_knn(input, output, features, k, strategy, config),
        Command::Visualize { input, x, y } => run_visualize(input, x, y),
        Command::Features => {
            for attr in Attribute::ALL {
                println!("{:<20} {}", attr.name(), attr.description());
            }
            Ok(())
        }
    }
}

fn run_knn(
    input: PathBuf,
    output: PathBuf,
    features: Vec<Attribute>,
    k: Option<usize>,
    strategy: Option<Strategy>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let features = FeatureSet::new(features)?;

    // File values first, CLI flags override
    let settings = match &config_path {
        Some(path) => {
            info!("Config file: {:?}", path);
            KnnSettings::from_file(path)
                .with_context(|| format!("Failed to load config file: {:?}", path))?
        }
        None => KnnSettings::default(),
    };
    let mut config = settings.into_config(Some(features))?;
    if let Some(k) = k {
        config.k = k;
    }
    if let Some(strategy) = strategy {
        config.strategy = strategy;
    }

    let report = load_monkeys(&input, IngestOptions::lenient())
        .with_context(|| format!("Failed to read monkeys from {:?}", input))?;
    println!("✓ {}", report.summary());

    let mut dataset = report.dataset;
    let engine = KnnEngine::new(config).context("Invalid knn configuration")?;
    let summary = engine
        .classify_dataset(&mut dataset)
        .context("Classification failed")?;
    println!("✓ {}", summary.summary());

    save_monkeys(&output, &dataset)
        .with_context(|| format!("Failed to write results to {:?}", output))?;
    println!("✓ Saved {} monkeys to {:?}", dataset.len(), output);

    Ok(())
}

fn run_visualize(input: PathBuf, x: Attribute, y: Attribute) -> Result<()> {
    let report = load_monkeys(&input, IngestOptions::strict())
        .with_context(|| format!("Failed to read monkeys from {:?}", input))?;
    let plot = ScatterPlot::from_dataset(&report.dataset, x, y)?;

    show_plot(&plot)
}

#[cfg(feature = "tui")]
fn show_plot(plot: &ScatterPlot) -> Result<()> {
    ui::run_scatter(plot)
}

#[cfg(not(feature = "tui"))]
fn show_plot(plot: &ScatterPlot) -> Result<()> {
    eprintln!("TUI mode not available, printing a summary instead.");
    eprintln!("   Rebuild with: cargo build --features tui");
    for line in plot.summary() {
        println!("{}", line);
    }
    Ok(())
}
