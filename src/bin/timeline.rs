//! Timeline CLI - Command-line interface for the interaction timeline engine
//!
//! Commands:
//! - reconstruct: Run the full pipeline over a file of raw events
//! - validate: Check a raw event feed without running the pipeline

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use interaction_timeline::adapter::{EventAdapter, ValidationIssue};
use interaction_timeline::{reconstruct_timeline, DateRange, EngineError, ENGINE_VERSION};

/// Timeline - reconstruct session timelines from raw interaction events
#[derive(Parser)]
#[command(name = "timeline")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Reconstruct student interaction sessions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: normalize, filter, build sessions, group by day
    Reconstruct {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Inclusive range start (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Inclusive range end (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "json")]
        output_format: OutputFormat,
    },

    /// Validate a raw event feed and report problems
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// JSON array of events
    Json,
    /// Newline-delimited JSON (one event per line)
    Ndjson,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Json,
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), TimelineCliError> {
    match cli.command {
        Commands::Reconstruct {
            input,
            output,
            from,
            to,
            input_format,
            output_format,
        } => cmd_reconstruct(
            &input,
            &output,
            from.as_deref(),
            to.as_deref(),
            input_format,
            output_format,
        ),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),
    }
}

fn cmd_reconstruct(
    input: &PathBuf,
    output: &PathBuf,
    from: Option<&str>,
    to: Option<&str>,
    input_format: InputFormat,
    output_format: OutputFormat,
) -> Result<(), TimelineCliError> {
    let events = read_events(input, input_format)?;
    let range = DateRange::parse(from, to)?;

    let sections = reconstruct_timeline(&events, &range);

    let output_data = match output_format {
        OutputFormat::Json => serde_json::to_string(&sections)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(&sections)?,
    };

    if output.to_string_lossy() == "-" {
        println!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_validate(
    input: &PathBuf,
    input_format: InputFormat,
    json: bool,
) -> Result<(), TimelineCliError> {
    let events = read_events(input, input_format)?;
    let issues = EventAdapter::validate_events(&events);

    let flagged = EventAdapter::flagged_event_count(&issues);
    let report = ValidationReport {
        total_events: events.len(),
        clean_events: events.len() - flagged,
        issues,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total events: {}", report.total_events);
        println!("Clean events: {}", report.clean_events);

        if !report.issues.is_empty() {
            println!("\nIssues:");
            for issue in &report.issues {
                println!(
                    "  - Event {} (index {}): {}",
                    issue.event_id, issue.index, issue.issue
                );
            }
        }
    }

    if report.issues.is_empty() {
        Ok(())
    } else {
        Err(TimelineCliError::ValidationFailed(flagged))
    }
}

fn read_events(
    input: &PathBuf,
    input_format: InputFormat,
) -> Result<Vec<interaction_timeline::InteractionEvent>, TimelineCliError> {
    let input_data = if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            eprintln!("reading events from terminal input; pipe a file or press Ctrl-D to finish");
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let events = match input_format {
        InputFormat::Json => EventAdapter::parse_array(&input_data)?,
        InputFormat::Ndjson => EventAdapter::parse_ndjson(&input_data)?,
    };

    Ok(events)
}

// Error types

#[derive(Debug)]
enum TimelineCliError {
    Io(io::Error),
    Engine(EngineError),
    Json(serde_json::Error),
    ValidationFailed(usize),
}

impl From<io::Error> for TimelineCliError {
    fn from(e: io::Error) -> Self {
        TimelineCliError::Io(e)
    }
}

impl From<EngineError> for TimelineCliError {
    fn from(e: EngineError) -> Self {
        TimelineCliError::Engine(e)
    }
}

impl From<serde_json::Error> for TimelineCliError {
    fn from(e: serde_json::Error) -> Self {
        TimelineCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<TimelineCliError> for CliError {
    fn from(e: TimelineCliError) -> Self {
        match e {
            TimelineCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            TimelineCliError::Engine(e) => CliError {
                code: "ENGINE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check the event payload and filter dates".to_string()),
            },
            TimelineCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            TimelineCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} events have issues", count),
                hint: Some("Review the validation report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_events: usize,
    clean_events: usize,
    issues: Vec<ValidationIssue>,
}
