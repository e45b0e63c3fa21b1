//! Error handling module for tabcomp.
//!
//! All error types here belong to the grammar-construction path: loading a
//! grammar file, resolving predictor names, validating the command tree.
//! The completion path itself never produces an error — a request that goes
//! wrong simply yields fewer (or zero) candidates, because a shell must
//! never see an error message in place of its candidate list.

pub mod kinds;

// Re-export commonly used types
pub use kinds::{ConfigError, GrammarError, Result, TabcompError};
