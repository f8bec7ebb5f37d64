use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use songharvest::config::AppConfig;
use songharvest::convert::{BatchConverter, Kakasi};
use songharvest::fetch::PageFetcher;
use songharvest::random::{SeededRandom, ThreadRandom};
use songharvest::scrape::{self, EvestaLyrics, SongDb};
use songharvest::store;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "songharvest",
    version,
    about = "Song database scraper and level fixture converter",
    after_help = "Run `songharvest scrape` to build result.json, then `songharvest convert` \
                  to turn it into result.yaml. Both run with no arguments."
)]
struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape every song on a listing page into a JSON file
    Scrape {
        /// Listing page (defaults to config listing_url)
        #[arg(long)]
        listing_url: Option<String>,

        /// Output JSON file (defaults to config json_path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the lyrics lookup; descriptions stay empty
        #[arg(long)]
        no_lyrics: bool,
    },

    /// Convert a scraped JSON file into a YAML level fixture
    Convert {
        /// Input JSON file (defaults to config json_path)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output YAML file (defaults to config yaml_path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Seed for rating/notes filler values
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load config file (optional, defaults if missing)
    let config = AppConfig::load();

    match cli.command {
        Commands::Scrape {
            listing_url,
            output,
            no_lyrics,
        } => {
            let listing_url = listing_url.unwrap_or(config.listing_url);
            let output = output.unwrap_or(config.json_path);

            let fetcher = PageFetcher::new();
            let lyrics = EvestaLyrics::new(&fetcher);
            let mut db = SongDb::new(&fetcher);
            if config.lyrics && !no_lyrics {
                db = db.with_lyrics(&lyrics);
            }

            let songs = scrape::harvest(&db, &listing_url)
                .with_context(|| format!("Scrape of {listing_url} failed"))?;
            store::write_json(&output, &songs)
                .with_context(|| format!("Failed to save {}", output.display()))?;
            println!("Scraped {} songs into {}", songs.len(), output.display());
        }

        Commands::Convert {
            input,
            output,
            seed,
        } => {
            let input = input.unwrap_or(config.json_path);
            let output = output.unwrap_or(config.yaml_path);

            let count = match seed {
                Some(seed) => BatchConverter::with_parts(Kakasi::new(), SeededRandom::new(seed))
                    .convert(&input, &output),
                None => BatchConverter::with_parts(Kakasi::new(), ThreadRandom)
                    .convert(&input, &output),
            }
            .context("Conversion failed")?;
            log::info!("{count} levels written to {}", output.display());
            println!("Converted");
        }
    }

    Ok(())
}
