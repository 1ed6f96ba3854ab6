use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use workdays_core::calendar;
use workdays_core::{DatePair, WorkdaySpan};

#[derive(Parser)]
#[command(
    name = "workdays",
    about = "Count the workdays between two dates found in a query"
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One sentence per answer
    Text,
    /// One JSON value per answer (`null` when there is none)
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a single query, e.g. `workdays ask 01/31/2000 01/31/2001 inclusive`
    Ask {
        /// Query words (joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        query: Vec<String>,
    },

    /// Answer one query per line of a file (`-` for stdin)
    Batch {
        /// Input file
        file: PathBuf,
    },

    /// Count workdays between two ISO dates, skipping text extraction
    Count {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,

        /// Count the end date too if it is a weekday
        #[arg(long)]
        inclusive: bool,
    },
}

/// Render one result. Text mode prints nothing for a missing answer.
fn render(span: Option<&WorkdaySpan>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(span.map(WorkdaySpan::sentence).unwrap_or_default()),
        OutputFormat::Json => serde_json::to_string(&span).context("failed to encode answer"),
    }
}

fn answer_query(query: &str, format: OutputFormat) -> Result<String> {
    let span = match workdays_core::evaluate(query) {
        Ok(span) => Some(span),
        Err(e) => {
            debug!("no answer for {query:?}: {e}");
            None
        }
    };
    render(span.as_ref(), format)
}

fn read_queries(file: &Path) -> Result<Vec<String>> {
    let input = if file == Path::new("-") {
        std::io::read_to_string(std::io::stdin()).context("failed to read stdin")?
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?
    };
    Ok(input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

fn cmd_ask(query: &[String], format: OutputFormat) -> Result<()> {
    let output = answer_query(&query.join(" "), format)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

fn cmd_batch(file: &Path, format: OutputFormat) -> Result<()> {
    let queries = read_queries(file)?;
    info!("answering {} query(ies) from {}", queries.len(), file.display());

    let mut answered = 0;
    for query in &queries {
        let output = answer_query(query, format)?;
        if !output.is_empty() && output != "null" {
            answered += 1;
        }
        println!("{output}");
    }

    info!("{answered} of {} query(ies) answered", queries.len());
    Ok(())
}

fn cmd_count(start: NaiveDate, end: NaiveDate, inclusive: bool, format: OutputFormat) -> Result<()> {
    let span = calendar::span(DatePair::ordered(start, end), inclusive);
    println!("{}", render(Some(&span), format)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .init();

    match &cli.command {
        Commands::Ask { query } => {
            cmd_ask(query, cli.format)?;
        }
        Commands::Batch { file } => {
            cmd_batch(file, cli.format)?;
        }
        Commands::Count {
            start,
            end,
            inclusive,
        } => {
            cmd_count(*start, *end, *inclusive, cli.format)?;
        }
    }

    Ok(())
}
