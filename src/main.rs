//! # docbot CLI
//!
//! Command-line interface for the documentation chatbot pipeline:
//!
//! - `crawl`: breadth-first crawl of a documentation site, saving the
//!   extracted corpus as a JSON file
//! - `serve`: HTTP chat API over a saved corpus
//! - `search`: one-off keyword search of a saved corpus

mod telemetry;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use docbot::bot::DocBot;
use docbot::crawler::{save_corpus, Crawler, CrawlerConfig};
use docbot::search;
use docbot::server::{serve, AppState};

#[derive(Parser)]
#[command(author, version, about = "A documentation-site crawler and keyword-search chat service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Crawl a documentation site and save the corpus
    Crawl(CrawlArgs),

    /// Serve the chat API over a saved corpus
    Serve(ServeArgs),

    /// Search a saved corpus from the command line
    Search(SearchArgs),
}

#[derive(Args, Debug)]
struct CrawlArgs {
    /// Base URL to crawl
    #[arg(required = true)]
    url: String,

    /// Maximum number of pages to process
    #[arg(short = 'p', long, default_value = "100")]
    max_pages: u32,

    /// Delay between page fetches in seconds
    #[arg(short, long, default_value = "1.0")]
    delay: f64,

    /// Output corpus file
    #[arg(short, long, default_value = "docs.json")]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Corpus file to serve
    #[arg(long, default_value = "docs.json")]
    docs: PathBuf,

    /// Port to listen on
    #[arg(short, long, default_value = "5000")]
    port: u16,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Search query
    #[arg(required = true)]
    query: String,

    /// Corpus file to search
    #[arg(long, default_value = "docs.json")]
    docs: PathBuf,

    /// Maximum number of results
    #[arg(short, long, default_value = "3")]
    limit: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing_subscriber();

    match cli.command {
        Commands::Crawl(args) => {
            let config = CrawlerConfig::builder()
                .max_pages(args.max_pages)
                .delay_ms((args.delay * 1000.0) as u64)
                .build();

            let mut crawler = Crawler::new(config)?;
            crawler.run(&args.url).await?;

            let records = crawler.into_records();
            save_corpus(&args.output, &records).await?;
            println!("Scraped {} pages to {}", records.len(), args.output.display());
        }
        Commands::Serve(args) => {
            let bot = DocBot::load(args.docs).await?;
            serve(AppState::new(bot), args.port).await?;
        }
        Commands::Search(args) => {
            let bot = DocBot::load(args.docs).await?;
            let hits = search::rank(&args.query, bot.corpus());

            if hits.is_empty() {
                println!("No results for '{}'", args.query);
            }
            for (i, hit) in hits.into_iter().take(args.limit).enumerate() {
                println!(
                    "{}. {} (score: {})\n   {}",
                    i + 1,
                    hit.record.title,
                    hit.score,
                    hit.record.url
                );
            }
        }
    }

    Ok(())
}
