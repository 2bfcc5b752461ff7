//! The `beanlex` command: read a ledger file, drive the parser with the
//! crate's own [`beanlex_core::DefaultBuilder`], and report diagnostics.
//!
//! Grounded in `rustledger::cmd::check`, narrowed to what the core parser
//! alone can report: no semantic validation, no booking, no plugins — those
//! are the external collaborators spec §1 places out of scope.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;

use beanlex_core::DefaultBuilder;

use crate::error::CliError;
use crate::report;

/// Parse a ledger file and report any syntax errors.
#[derive(Parser, Debug)]
#[command(name = "beanlex", author, version, about, long_about = None)]
pub struct Args {
    /// The ledger file to parse.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Reinterpret the file's line numbers as starting at this offset, as
    /// if it had been `include`d at this point in some enclosing file.
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub first_line_offset: u32,

    /// Show verbose output including directive and option counts.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output; rely on the exit code alone.
    #[arg(short, long)]
    pub quiet: bool,
}

fn run(args: &Args) -> Result<ExitCode> {
    let mut stdout = io::stdout().lock();

    if !args.file.exists() {
        return Err(CliError::NotFound(args.file.clone()).into());
    }

    let source = fs::read_to_string(&args.file).map_err(|source| CliError::Io {
        path: args.file.clone(),
        source,
    })?;

    let mut builder = DefaultBuilder::new();
    let filename = args.file.to_string_lossy().into_owned();
    let errors = beanlex_parser::parse(&source, filename, args.first_line_offset, &mut builder);

    let mut error_count = errors.len();
    if !errors.is_empty() && !args.quiet {
        report::report_parse_errors(&errors, &args.file, &source, &mut stdout)
            .context("failed to write diagnostics")?;
    }

    for builder_error in builder.errors() {
        if !args.quiet {
            writeln!(stdout, "error: {}: {}", builder_error.loc, builder_error.message)?;
        }
        error_count += 1;
    }

    if args.verbose && !args.quiet {
        let directives = builder.into_result().unwrap_or_default();
        writeln!(stdout, "parsed {} directives", directives.len())?;
    }

    if !args.quiet {
        report::print_summary(error_count, &mut stdout)?;
    }

    if error_count > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Entry point, called from `main`.
pub fn main() -> ExitCode {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_writer(io::stderr)
            .init();
    }

    match run(&args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
