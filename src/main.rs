use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cover_match::config::{example_config, load_config, Config};
use cover_match::models::{BookRecord, CandidateSet, SearchQuery};
use cover_match::recognition::{CandidateExtractor, QueryPlanner};
use cover_match::sources::Source;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Cover Match - Identify books from the OCR text of their covers
#[derive(Parser, Debug)]
#[command(name = "cover-match")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Identify books from the OCR text of their covers", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Log line format (overrides the config file)
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormat>,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

/// Log line format
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Identify the book behind cover text read from FILE or stdin
    #[command(alias = "r")]
    Recognize {
        /// File holding the OCR text (stdin when omitted)
        file: Option<PathBuf>,

        /// Maximum number of books to return
        #[arg(long, short = 'n', value_parser = clap::value_parser!(u32).range(1..))]
        max_results: Option<u32>,
    },

    /// Show title/author candidates and planned queries without searching
    #[command(alias = "x")]
    Extract {
        /// File holding the OCR text (stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Run a single provider search
    #[command(alias = "s")]
    Search {
        /// Search query string
        query: String,

        /// Maximum number of books to return
        #[arg(long, short = 'n', default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
        max_results: u32,
    },

    /// Look up a book by ISBN-10 or ISBN-13
    Isbn {
        /// ISBN, hyphens allowed
        isbn: String,
    },

    /// Print a default configuration file
    ExampleConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&cli, &config);

    match cli.command {
        Commands::Recognize { file, max_results } => {
            let text = read_input(file.as_deref())?;
            let source = build_source(&config)?;
            let recognizer = config.recognizer(source);
            let max_results = max_results
                .map(|n| n as usize)
                .unwrap_or(config.search.max_results);

            let result = recognizer.recognize(&text, max_results).await;
            match resolve_format(cli.output) {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                }
                format => {
                    output_candidates(&result.candidates, &result.search_queries, format);
                    println!();
                    output_books(&result.books, format);
                }
            }
        }
        Commands::Extract { file } => {
            let text = read_input(file.as_deref())?;
            let extractor = CandidateExtractor::new(config.lexicon.names(), config.lexicon.lexicon());
            let candidates = extractor.extract(&text);
            let queries = QueryPlanner::default().plan(&candidates);

            match resolve_format(cli.output) {
                OutputFormat::Json => {
                    let value = serde_json::json!({
                        "candidates": candidates,
                        "searchQueries": queries,
                    });
                    println!("{}", serde_json::to_string_pretty(&value)?);
                }
                format => output_candidates(&candidates, &queries, format),
            }
        }
        Commands::Search { query, max_results } => {
            let source = build_source(&config)?;
            let request = SearchQuery::new(&query).max_results(max_results as usize);
            let response = source
                .search(&request)
                .await
                .with_context(|| format!("Search failed for '{}'", query))?;

            match resolve_format(cli.output) {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
                format => output_books(&response.books, format),
            }
        }
        Commands::Isbn { isbn } => {
            let source = build_source(&config)?;
            let book = source
                .lookup_isbn(&isbn)
                .await
                .with_context(|| format!("ISBN lookup failed for '{}'", isbn))?;

            match (book, resolve_format(cli.output)) {
                (Some(book), OutputFormat::Json) => {
                    println!("{}", serde_json::to_string_pretty(&book)?)
                }
                (Some(book), format) => output_books(std::slice::from_ref(&book), format),
                (None, OutputFormat::Json) => println!("null"),
                (None, _) => eprintln!("No book found for ISBN {}", isbn),
            }
        }
        Commands::ExampleConfig => {
            print!("{}", example_config(&Config::default())?);
        }
    }

    Ok(())
}

fn init_tracing(cli: &Cli, config: &Config) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => config.logging.level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("cover_match={}", level)),
    );

    let format = cli.log_format.unwrap_or(if config.logging.format == "json" {
        LogFormat::Json
    } else {
        LogFormat::Text
    });

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

fn build_source(config: &Config) -> Result<Arc<dyn Source>> {
    let source = config
        .google_books
        .build_source()
        .context("Failed to create Google Books source")?;
    Ok(Arc::new(source))
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn resolve_format(format: OutputFormat) -> OutputFormat {
    if format == OutputFormat::Auto {
        if std::io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

fn output_candidates(candidates: &CandidateSet, queries: &[String], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            use comfy_table::{Attribute, Cell, Table};
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.set_header(vec!["#", "Title candidate", "Author candidate", "Query"]);

            let rows = candidates
                .title_candidates
                .len()
                .max(candidates.author_candidates.len())
                .max(queries.len());
            for i in 0..rows {
                let cell = |items: &[String]| Cell::new(items.get(i).map(String::as_str).unwrap_or(""));
                table.add_row(vec![
                    Cell::new(i + 1).add_attribute(Attribute::Bold),
                    cell(&candidates.title_candidates),
                    cell(&candidates.author_candidates),
                    cell(queries),
                ]);
            }
            println!("{table}");
        }
        _ => {
            for title in &candidates.title_candidates {
                println!("title: {}", title);
            }
            for author in &candidates.author_candidates {
                println!("author: {}", author);
            }
            for query in queries {
                println!("query: {}", query);
            }
        }
    }
}

fn output_books(books: &[BookRecord], format: OutputFormat) {
    if books.is_empty() {
        eprintln!("No books found");
        return;
    }

    match format {
        OutputFormat::Table => {
            use comfy_table::{Attribute, Cell, Table};
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.set_header(vec!["Title", "Author", "Year", "Publisher", "ISBN"]);

            for book in books {
                let year = book.publish_year.map(|y| y.to_string()).unwrap_or_default();
                table.add_row(vec![
                    Cell::new(truncate(&book.title, 50)).add_attribute(Attribute::Bold),
                    Cell::new(truncate(&book.author, 30)),
                    Cell::new(year),
                    Cell::new(truncate(&book.publisher, 25)),
                    Cell::new(&book.isbn),
                ]);
            }
            println!("{table}");
        }
        _ => {
            for book in books {
                match book.publish_year {
                    Some(year) => println!("{} - {} ({})", book.title, book.author, year),
                    None => println!("{} - {}", book.title, book.author),
                }
                if !book.isbn.is_empty() {
                    println!("  ISBN: {}", book.isbn);
                }
                if book.has_cover() {
                    println!("  Cover: {}", book.cover_url);
                }
                println!("  Google Books ID: {}", book.google_books_id);
                println!();
            }
        }
    }
}
