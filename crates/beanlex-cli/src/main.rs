//! `beanlex` — parse a ledger file and report syntax errors.

use std::process::ExitCode;

fn main() -> ExitCode {
    beanlex_cli::cli::main()
}
