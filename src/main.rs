//! tabcomp - shell completion for declarative command grammars
//!
//! Completes commands, flags, and argument values for any program described
//! by a TOML or JSON grammar file. Designed to sit behind bash's
//! `complete -C` hook: the shell sets `COMP_LINE` and `COMP_POINT`, tabcomp
//! prints one candidate per line and exits zero.
//!
//! # Usage
//!
//! ```bash
//! # Wire a grammar into bash
//! complete -C "tabcomp mytool.toml" mytool
//!
//! # Try a grammar by hand
//! tabcomp mytool.toml --line "mytool ru"
//!
//! # Validate a grammar file
//! tabcomp mytool.toml --check
//! ```

use tracing::Level;

mod cli;
mod complete;
mod config;
mod error;
mod grammar;
mod predict;

use cli::CliInterface;
use error::Result;

/// Application entry point
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments
/// 2. Initialize logging
/// 3. Load and resolve the grammar file
/// 4. Serve the completion request, if there is one
fn run() -> Result<()> {
    let cli = CliInterface::new();

    initialize_logging(&cli);

    // Grammar problems are construction errors and must fail loudly; only
    // a live completion request degrades to silence.
    let engine = cli.load_engine()?;

    if cli.args().check {
        println!("Grammar OK: {}", cli.args().grammar_file.display());
        return Ok(());
    }

    match cli.build_request() {
        Some(request) => {
            let mut stdout = std::io::stdout().lock();
            engine.run(&request, &mut stdout, |code| std::process::exit(code));
        }
        None => {
            eprintln!("No completion request: set COMP_LINE or pass --line");
            std::process::exit(2);
        }
    }

    Ok(())
}

/// Initialize logging system based on verbosity level
///
/// Diagnostics go to stderr so they never pollute the candidate list the
/// shell reads from stdout.
fn initialize_logging(cli: &CliInterface) {
    let level = if cli.args().very_verbose {
        Level::TRACE
    } else if cli.args().verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
