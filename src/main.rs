use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio::index::stats::show_stats;
use folio::index::TableOfContentsLayout;
use folio::output;
use folio::query::{parse_query, SearchMode};
use folio::Searcher;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Phrase and all-words search over a literary corpus")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Corpus text file
    #[arg(short, long, global = true, env = "FOLIO_CORPUS", default_value = "completeworks.txt")]
    corpus: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve searches over HTTP
    #[cfg(feature = "server")]
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = 3001)]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Directory of static files served for every other path
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Number of cached search responses (0 disables the cache)
        #[arg(long, default_value_t = 128)]
        cache_size: usize,
    },
    /// Search the corpus once and print the results
    Search {
        /// Search query
        #[arg(required = true, trailing_var_arg = true)]
        query: Vec<String>,

        /// Match the query as one phrase instead of all words in any order
        #[arg(long)]
        phrase: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Print at most this many results
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// Show corpus statistics
    Stats,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        #[cfg(feature = "server")]
        Commands::Serve {
            port,
            host,
            static_dir,
            cache_size,
        } => {
            let searcher = Searcher::load_with_layout(&cli.corpus, &TableOfContentsLayout::default(), false)?;
            let config = folio::server::ServerConfig {
                host,
                port,
                static_dir,
                cache_size,
            };

            let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
            runtime.block_on(folio::server::run_server(std::sync::Arc::new(searcher), config))?;
        }
        Commands::Search {
            query,
            phrase,
            json,
            limit,
            no_color,
        } => {
            let searcher = Searcher::load_with_layout(&cli.corpus, &TableOfContentsLayout::default(), true)?;
            let mode = if phrase {
                SearchMode::Phrase
            } else {
                SearchMode::AllWords
            };

            let query = parse_query(&query.join(" "), mode);
            let mut results = searcher.search_query(&query);
            let total = results.len();
            if let Some(limit) = limit {
                results.truncate(limit);
            }

            if json {
                output::print_json(&results)?;
            } else {
                output::print_results(&results, &query.terms, !no_color)?;
                eprintln!("{} of {} results", results.len(), total);
            }
        }
        Commands::Stats => {
            let searcher = Searcher::load_with_layout(&cli.corpus, &TableOfContentsLayout::default(), true)?;
            show_stats(searcher.index());
        }
    }

    Ok(())
}
