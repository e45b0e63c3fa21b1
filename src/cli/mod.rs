//! Command-line interface for tabcomp
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Grammar file loading and resolution
//! - Completion request construction (explicit flags or shell environment)
//!
//! The binary is meant to be wired into the shell's completion machinery:
//!
//! ```bash
//! complete -C "tabcomp mytool.toml" mytool
//! ```
//!
//! Bash then invokes it with `COMP_LINE` and `COMP_POINT` set. The `--line`
//! and `--point` flags exist for trying grammars by hand.

use clap::Parser;
use std::path::PathBuf;

use crate::complete::{CompletionEngine, CompletionRequest};
use crate::config::GrammarConfig;
use crate::error::Result;
use crate::predict::PredictorRegistry;

/// Shell completion engine for declarative command grammars
#[derive(Parser, Debug)]
#[command(
    name = "tabcomp",
    version,
    about = "Shell completion engine for command-line grammars",
    long_about = "Completes commands, flags, and argument values for any program described
by a TOML or JSON grammar file. Reads COMP_LINE/COMP_POINT when invoked
by the shell; use --line to try a grammar interactively."
)]
pub struct CliArgs {
    /// Grammar file (.toml or .json)
    #[arg(value_name = "GRAMMAR")]
    pub grammar_file: PathBuf,

    /// Complete this line instead of reading COMP_LINE
    #[arg(long, value_name = "LINE")]
    pub line: Option<String>,

    /// Cursor position as a byte offset into the line
    ///
    /// Defaults to the end of the line. Ignored without --line.
    #[arg(long, value_name = "POINT")]
    pub point: Option<usize>,

    /// Load and validate the grammar file, then exit
    #[arg(long)]
    pub check: bool,

    /// Verbose mode (debug logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,
}

impl CliInterface {
    /// Create a new CLI interface from the process arguments
    pub fn new() -> Self {
        Self {
            args: CliArgs::parse(),
        }
    }

    /// Get the CLI arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Load the grammar file and resolve it into a completion engine.
    ///
    /// Predictor names in the grammar resolve against the built-in
    /// registry (`files`, `dirs`).
    pub fn load_engine(&self) -> Result<CompletionEngine> {
        let registry = PredictorRegistry::with_builtins();
        let config = GrammarConfig::from_file(&self.args.grammar_file)?;
        let grammar = config.resolve(&registry)?;
        Ok(CompletionEngine::new(grammar))
    }

    /// Build the completion request to serve.
    ///
    /// `--line` wins over the environment; without either there is no
    /// request and the caller decides what to do.
    pub fn build_request(&self) -> Option<CompletionRequest> {
        if let Some(line) = &self.args.line {
            return Some(CompletionRequest::new(line, self.args.point));
        }
        CompletionRequest::from_env()
    }
}
