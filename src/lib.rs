//! Shell Completion Library
//!
//! This library provides the core functionality for tabcomp, a shell
//! completion engine driven by declarative command grammars. It can be used
//! as a standalone library to add rich tab completion to any CLI tool.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `complete`: Tokenizer, cursor resolver, and completion engine
//! - `config`: Declarative grammar files (TOML/JSON)
//! - `error`: Error types and handling
//! - `grammar`: Command, flag, and positional definitions
//! - `predict`: Candidate predictors (sets, files, directories)
//!
//! # Example
//!
//! ```
//! use tabcomp::{Command, CompletionEngine, Flag};
//!
//! let grammar = Command::new("mytool")
//!     .subcommand(Command::new("run").flag(Flag::boolean("fast")))
//!     .subcommand(Command::new("stop"));
//!
//! let engine = CompletionEngine::new(grammar);
//! assert_eq!(engine.complete("mytool r", None), ["run"]);
//! ```

pub mod cli;
pub mod complete;
pub mod config;
pub mod error;
pub mod grammar;
pub mod predict;

// Re-export commonly used types
pub use complete::{CompletionEngine, CompletionRequest};
pub use config::GrammarConfig;
pub use error::{Result, TabcompError};
pub use grammar::{Command, Flag, Positional};
pub use predict::{FilePredictor, NoopPredictor, Predictor, PredictorRegistry, SetPredictor};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
pub fn version() -> &'static str {
    VERSION
}
