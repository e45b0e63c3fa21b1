//! Completion pipeline for command-line grammars.
//!
//! Answers one question: given the raw line at a shell prompt and the
//! cursor offset, which strings should the shell offer?
//!
//! # Architecture
//!
//! - **tokenizer**: splits the line with cursor awareness into completed
//!   tokens plus the in-progress token
//! - **context**: the immutable per-request view of those tokens
//! - **resolver**: walks the grammar to find which element the cursor
//!   addresses (subcommand names, flag names, a flag's value, or a
//!   positional slot)
//! - **engine**: orchestrates the flow and dispatches to predictors
//!
//! # Examples
//!
//! ```
//! use tabcomp::complete::CompletionEngine;
//! use tabcomp::grammar::Command;
//!
//! let grammar = Command::new("myApp")
//!     .subcommand(Command::new("rabbit"))
//!     .subcommand(Command::new("duck"));
//! let engine = CompletionEngine::new(grammar);
//!
//! let mut candidates = engine.complete("myApp r", None);
//! candidates.sort();
//! assert_eq!(candidates, ["rabbit"]);
//! ```

pub mod context;
pub mod engine;
pub mod resolver;
pub mod tokenizer;

pub use context::CompleterContext;
pub use engine::{CompletionEngine, CompletionRequest};
pub use resolver::{Target, resolve};
pub use tokenizer::tokenize;
