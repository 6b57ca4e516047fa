use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

use moondash::cache;
use moondash::constants::DEFAULT_CACHE_PATH;
use moondash::logging;
use moondash::normalize::normalize_moons;
use moondash::scrape::WikipediaMoonsSource;
use moondash::server;
use moondash::types::CanonicalMoon;

#[derive(Parser)]
#[command(name = "moondash")]
#[command(about = "Solar-system moons dataset scraper and dashboard")]
#[command(version = "0.1.0")]
struct Cli {
    /// Location of the flat-file cache
    #[arg(long, default_value = DEFAULT_CACHE_PATH)]
    cache: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the moons table, normalize it and write the cache file
    Scrape,
    /// Serve the dashboard from the cache (scraping first if it is missing)
    Serve {
        /// Port for the HTTP server
        #[arg(long, default_value_t = 8050)]
        port: u16,
        /// Scrape fresh data even when a cache file exists
        #[arg(long)]
        refresh: bool,
    },
    /// Run the full pipeline (scrape + serve)
    Run {
        /// Port for the HTTP server
        #[arg(long, default_value_t = 8050)]
        port: u16,
    },
}

async fn scrape_to_cache(cache_path: &Path) -> Result<Vec<CanonicalMoon>, Box<dyn std::error::Error>> {
    let source = WikipediaMoonsSource::new();
    let raw_rows = source.fetch_raw_rows().await?;
    let moons = normalize_moons(&raw_rows);
    cache::write_cache(cache_path, &moons)?;

    println!("\n📊 Scrape results:");
    println!("   Raw rows:    {}", raw_rows.len());
    println!("   Moons kept:  {}", moons.len());
    println!("   Cache file:  {}", cache_path.display());

    Ok(moons)
}

async fn load_dataset(
    cache_path: &Path,
    refresh: bool,
) -> Result<Vec<CanonicalMoon>, Box<dyn std::error::Error>> {
    if !refresh && cache_path.exists() {
        info!("Loading dataset from cache");
        Ok(cache::read_cache(cache_path)?)
    } else {
        info!("No usable cache, scraping fresh data");
        scrape_to_cache(cache_path).await
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape => {
            println!("🔄 Scraping the moons table...");
            match scrape_to_cache(&cli.cache).await {
                Ok(_) => println!("✅ Scrape completed successfully"),
                Err(e) => {
                    error!("Scrape failed: {}", e);
                    println!("❌ Scrape failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Serve { port, refresh } => {
            println!("🌙 Starting the moons dashboard...");
            let moons = load_dataset(&cli.cache, refresh).await?;
            server::start_server(Arc::new(moons), port).await?;
        }
        Commands::Run { port } => {
            println!("🚀 Running full pipeline (scrape + serve)...");
            let moons = scrape_to_cache(&cli.cache).await?;
            server::start_server(Arc::new(moons), port).await?;
        }
    }
    Ok(())
}
