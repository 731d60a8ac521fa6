use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;

use moviedb_search_engine::{
    config, ranking, FileCache, SearchEngine, TmdbConfig, TmdbProvider,
};

#[derive(Parser)]
#[command(name = "movie-engine-cli")]
#[command(about = "MovieDB Search Engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Cache directory
    #[arg(short, long)]
    cache_dir: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for movies and print them re-ranked
    Search {
        /// Search query
        query: String,

        /// Result page
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Disable the response cache
        #[arg(long)]
        no_cache: bool,
    },

    /// Get cache statistics
    Stats,

    /// Remove expired cache entries
    Cleanup {
        /// Maximum age in seconds
        #[arg(short, long, default_value = "60")]
        max_age_secs: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cache_dir = cli.cache_dir.unwrap_or_else(config::cache_dir);

    let tmdb_config = TmdbConfig::from_env()?;
    let provider = Arc::new(TmdbProvider::new(tmdb_config)?);
    let cache = Arc::new(FileCache::new(&cache_dir));

    match cli.command {
        Commands::Search {
            query,
            page,
            no_cache,
        } => {
            let mut engine = SearchEngine::new(provider);
            if !no_cache {
                engine = engine.with_cache(cache);
            }

            println!("Searching for: {}", query);

            let result = engine.search(&query, page).await?;
            let ranked = ranking::rank(&query, &result.results);

            if ranked.is_empty() {
                println!("No results found.");
                return Ok(());
            }

            println!(
                "\nShowing {} of {} results (page {}/{}):",
                ranked.len(),
                result.total_results,
                result.page,
                result.total_pages
            );
            for (i, movie) in ranked.iter().enumerate() {
                println!(
                    "   {}. {} ({}) — rating {:.1}",
                    i + 1,
                    movie.display_title(),
                    movie.year().unwrap_or("—"),
                    movie.rating()
                );
                match movie.poster_url() {
                    Some(url) => println!("      poster: {}", url),
                    None => println!("      poster: (no image)"),
                }
            }
        }

        Commands::Stats => {
            let engine = SearchEngine::new(provider).with_cache(cache);
            let stats = engine.cache_stats().await?;

            println!("Cache statistics:");
            println!("   Total entries: {}", stats.total_entries);

            if let Some(oldest) = stats.oldest_entry {
                println!("   Oldest entry: {}", oldest.format("%Y-%m-%d %H:%M:%S"));
            }

            if let Some(newest) = stats.newest_entry {
                println!("   Newest entry: {}", newest.format("%Y-%m-%d %H:%M:%S"));
            }
        }

        Commands::Cleanup { max_age_secs } => {
            let engine = SearchEngine::new(provider).with_cache(cache);

            println!("Cleaning up entries older than {}s...", max_age_secs);

            let deleted = engine
                .cleanup_cache(Duration::from_secs(max_age_secs))
                .await?;

            println!("Deleted {} entries", deleted);
        }
    }

    Ok(())
}
