//! cmnames - C-- name resolution driver
//!
//! Reads a parsed C-- program (the parser's JSON output), resolves names and
//! reports diagnostics.

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use cminus_names::feedback::ResolveFeedback;
use cminus_names::{resolve, Diagnostics, Program, StderrReporter};

/// C-- name resolver
#[derive(Parser, Debug)]
#[command(name = "cmnames")]
#[command(author = "Z1529")]
#[command(version = "0.1.0")]
#[command(about = "Resolve names in a parsed C-- program")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Parsed program (JSON AST)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Diagnostic output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// Print the global symbol table after resolving
    #[arg(long)]
    dump_symbols: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a program and report errors
    Check {
        /// Parsed program (JSON AST)
        input: PathBuf,
    },
    /// Resolve a program and print its global symbol table
    Symbols {
        /// Parsed program (JSON AST)
        input: PathBuf,
    },
    /// Print version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let outcome = match &cli.command {
        Some(Commands::Check { input }) => check_file(input, cli.format, cli.dump_symbols),
        Some(Commands::Symbols { input }) => check_file(input, cli.format, true),
        Some(Commands::Version) => {
            println!("cmnames 0.1.0");
            println!("C-- name resolver");
            println!("License: Apache-2.0");
            Ok(true)
        }
        None => match &cli.input {
            Some(input) => check_file(input, cli.format, cli.dump_symbols),
            None => {
                eprintln!("Error: No input file specified");
                eprintln!("Usage: cmnames <FILE> or cmnames check <FILE>");
                process::exit(1);
            }
        },
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn load_program(input: &Path) -> Result<Program> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    serde_json::from_str(&text).with_context(|| format!("decoding AST from {}", input.display()))
}

/// Resolve one file. Returns whether it was free of errors
fn check_file(input: &Path, format: Format, dump_symbols: bool) -> Result<bool> {
    let mut program = load_program(input)?;
    log::info!("resolving {} ({} declarations)", input.display(), program.decls.len());

    let resolution = match format {
        Format::Text => {
            let mut reporter = StderrReporter::new();
            let resolution = resolve(&mut program, &mut reporter);
            log::debug!("{} diagnostics written", reporter.count());
            resolution
        }
        Format::Json => {
            let mut diagnostics = Diagnostics::new();
            let resolution = resolve(&mut program, &mut diagnostics);
            let source = input.to_string_lossy();
            println!("{}", ResolveFeedback::new(&source, diagnostics.items(), &resolution).to_json());
            resolution
        }
    };

    if dump_symbols {
        print!("{}", resolution.dump());
    }
    for error in &resolution.internal_errors {
        eprintln!("internal error: {}", error);
    }
    Ok(!resolution.has_errors())
}
