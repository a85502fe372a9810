//! custom-tokens command-line front end.
//!
//! Runs admin actions against the file-backed token store and renders
//! shortcodes from text or stdin.

// Exclude entire file from coverage - binary entry point cannot be unit tested
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, error};

use custom_tokens::commands::{ActionResponse, TokenAction};
use custom_tokens::tokens::Token;
use custom_tokens::transfer::TransferFormat;
use custom_tokens::util::TokensConfig;
use custom_tokens::{open_service, FileTokenService};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "custom-tokens")]
#[command(about = "Manage custom tokens and render [NAME] shortcodes")]
struct Args {
    /// Settings file (defaults to the platform config directory)
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every token as name, label and value
    List,
    /// Add a new token
    Add {
        name: String,
        label: String,
        value: Option<String>,
    },
    /// Remove a token by its exact name
    Remove { name: String },
    /// Import tokens from a JSON or CSV file (chosen by extension)
    Import {
        file: PathBuf,
        /// Overwrite tokens whose names already exist
        #[arg(long)]
        replace: bool,
    },
    /// Export all tokens
    Export {
        #[arg(short, long, default_value = "json")]
        format: TransferFormat,
        /// Output file, or `-` for stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Replace [NAME] shortcodes in TEXT (or stdin) with token values
    Render { text: Option<String> },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match TokensConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            setup_tracing("info", args.verbose);
            error!("{}", e);
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    setup_tracing(&config.log_filter, args.verbose);
    debug!(data_dir = %config.data_dir.display(), option = %config.option_name, "loaded settings");

    let service = open_service(&config);
    match run(&service, args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

fn setup_tracing(default_filter: &str, verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new(default_filter)
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Run one command; the error is the text to show the user
fn run(service: &FileTokenService, command: Command) -> Result<(), String> {
    match command {
        Command::List => {
            let tokens = service.list().map_err(|e| e.to_message().to_string())?;
            let mut out = io::stdout().lock();
            for token in tokens {
                writeln!(out, "{}\t{}\t{}", token.name, token.label, token.value)
                    .map_err(|e| e.to_string())?;
            }
            Ok(())
        }
        Command::Add { name, label, value } => report(service.handle(TokenAction::AddToken(
            Token::new(name, label, value.unwrap_or_default()),
        ))),
        Command::Remove { name } => report(service.handle(TokenAction::RemoveToken { name })),
        Command::Import { file, replace } => {
            let text = std::fs::read_to_string(&file)
                .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;
            let action = match TransferFormat::from_path(&file) {
                TransferFormat::Csv => TokenAction::ImportCsv {
                    text,
                    replace_existing: replace,
                },
                // Without --replace the document's own flag applies
                TransferFormat::Json => TokenAction::ImportTokens {
                    payload: text,
                    replace_existing: replace.then_some(true),
                },
            };
            report(service.handle(action))
        }
        Command::Export { format, output } => {
            let body = service
                .export(format)
                .map_err(|e| e.to_message().to_string())?;
            let path = output.unwrap_or_else(|| default_export_path(format));
            write_export(&path, &body)
        }
        Command::Render { text } => {
            let content = match text {
                Some(text) => text,
                None => {
                    let mut buffer = String::new();
                    io::stdin()
                        .read_to_string(&mut buffer)
                        .map_err(|e| format!("Failed to read stdin: {}", e))?;
                    buffer
                }
            };
            let rendered = service
                .render(&content)
                .map_err(|e| e.to_message().to_string())?;
            print!("{}", rendered);
            Ok(())
        }
    }
}

/// Print the outcome message (and import counts), failing on error messages
fn report(response: ActionResponse) -> Result<(), String> {
    if response.is_error() {
        return Err(response.message.to_string());
    }

    println!("{}", response.message);
    if let Some(summary) = response.import_summary {
        println!(
            "{} added, {} replaced, {} skipped, {} invalid",
            summary.added, summary.replaced, summary.skipped, summary.invalid
        );
    }
    Ok(())
}

/// `tokens_export_<YYYY-MM-DD>.<ext>` in the current directory
fn default_export_path(format: TransferFormat) -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d");
    PathBuf::from(format!("tokens_export_{}.{}", date, format.extension()))
}

fn write_export(path: &Path, body: &str) -> Result<(), String> {
    if path == Path::new("-") {
        print!("{}", body);
        return Ok(());
    }

    std::fs::write(path, body).map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
    println!("Exported tokens to {}", path.display());
    Ok(())
}
