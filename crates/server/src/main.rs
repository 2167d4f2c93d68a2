use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use workoutvibes_core::analysis::FoodAnalyzer;
use workoutvibes_core::config::{self, AppConfig};
use workoutvibes_core::detector::Detector;
use workoutvibes_core::nutrition;
use workoutvibes_core::shop::Shop;
use workoutvibes_server::state::{seeded_rng, AppState};

#[derive(Parser)]
#[command(name = "workoutvibes", version, about = "Fitness, shop and nutrition backend")]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Override server.host
        #[arg(long)]
        host: Option<String>,
        /// Override server.port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Apply database migrations and exit
    Migrate,
    /// Insert the demo product catalog
    SeedProducts,
    /// Recognise the dish in a photo and print its nutrition report
    Analyze {
        image: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List nutrition records whose keywords match
    Foods {
        #[arg(required = true)]
        keywords: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { host, port } => run_serve(cfg, host, port).await,
        Commands::Migrate => {
            storage::open(&cfg.database.path).await?;
            info!(database = %cfg.database.path, "migrations applied");
            Ok(())
        }
        Commands::SeedProducts => {
            let pool = storage::open(&cfg.database.path).await?;
            let added = Shop::new(pool).seed_demo_products().await?;
            println!("Added {added} demo products");
            Ok(())
        }
        Commands::Analyze { image, json } => run_analyze(&cfg, &image, json),
        Commands::Foods { keywords } => {
            let wanted: Vec<&str> = keywords.iter().map(String::as_str).collect();
            for record in nutrition::search_by_keywords(&wanted) {
                println!(
                    "{:<24} {:>5} kcal  {}",
                    nutrition::display_name(record.label),
                    record.calories,
                    record.description
                );
            }
            Ok(())
        }
    }
}

async fn run_serve(cfg: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    let pool = storage::open(&cfg.database.path)
        .await
        .with_context(|| format!("opening database {}", cfg.database.path))?;
    let host = host.unwrap_or_else(|| cfg.server.host.clone());
    let port = port.unwrap_or(cfg.server.port);
    let state = AppState::new(pool, cfg);
    workoutvibes_server::server::serve(workoutvibes_server::app(state), &host, port).await
}

fn run_analyze(cfg: &AppConfig, image: &Path, json: bool) -> Result<()> {
    let bytes = std::fs::read(image).with_context(|| format!("reading {}", image.display()))?;
    let filename = image
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let analyzer = FoodAnalyzer::new(
        Detector::new(&cfg.detector),
        cfg.detector.nutrition_variation,
    );
    let mut rng = seeded_rng(cfg.detector.seed);
    let report = analyzer.analyze(&bytes, &filename, &mut rng);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    println!("{} ({:.1}% confidence)", report.food_name, report.confidence);
    println!("  {}", report.description);
    let n = &report.nutrition;
    println!(
        "  calories {}  protein {}g  carbs {}g  fats {}g  fiber {}g  sugar {}g",
        n.calories, n.protein, n.carbs, n.fats, n.fiber, n.sugar
    );
    for tip in &report.health_tips {
        println!("  - {tip}");
    }
    Ok(())
}
