//! Completion engine - orchestrates the completion flow.
//!
//! Ties the pieces together: tokenize the line at the cursor, walk the
//! grammar to find the addressed element, dispatch to the right predictor,
//! and emit candidates. Nothing on this path is allowed to fail visibly;
//! any inconsistency degrades to an empty candidate list.

use std::io::Write;

use tracing::debug;

use super::context::CompleterContext;
use super::resolver::{self, Target};
use super::tokenizer::tokenize;
use crate::grammar::Command;
use crate::predict::filter_by_prefix;

/// One completion request: the full line and the cursor offset into it.
///
/// A missing `point` means end-of-line. Presence of the line value is what
/// engages completion mode at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub line: String,
    pub point: Option<usize>,
}

impl CompletionRequest {
    pub fn new(line: impl Into<String>, point: Option<usize>) -> Self {
        Self {
            line: line.into(),
            point,
        }
    }

    /// Read the request from the `COMP_LINE` / `COMP_POINT` environment
    /// variables that bash and zsh set for `complete -C` handlers.
    ///
    /// Returns `None` when no line is present (the process was not invoked
    /// as a completion handler). An unparsable point falls back to
    /// end-of-line. This is the only place the engine touches process
    /// state; embedders call [`CompletionEngine::complete`] directly.
    pub fn from_env() -> Option<Self> {
        let line = std::env::var("COMP_LINE").ok()?;
        let point = std::env::var("COMP_POINT")
            .ok()
            .and_then(|p| p.trim().parse::<usize>().ok());
        Some(Self { line, point })
    }
}

/// Main completion engine, owning the grammar it completes against.
pub struct CompletionEngine {
    grammar: Command,
}

impl CompletionEngine {
    pub fn new(grammar: Command) -> Self {
        Self { grammar }
    }

    pub fn grammar(&self) -> &Command {
        &self.grammar
    }

    /// Compute the candidates for `line` with the cursor at `point`
    /// (end-of-line when `None`).
    pub fn complete(&self, line: &str, point: Option<usize>) -> Vec<String> {
        // 1. Split the line at the cursor.
        let ctx = tokenize(line, point);

        // 2. Walk the grammar to find what the current token addresses.
        let target = resolver::resolve(&self.grammar, &ctx);

        // 3. Dispatch to the matching candidate source.
        let candidates = self.dispatch(&ctx, target);
        debug!(
            "{} candidate(s) for {:?} at {:?}",
            candidates.len(),
            line,
            point
        );
        candidates
    }

    fn dispatch(&self, ctx: &CompleterContext, target: Target<'_>) -> Vec<String> {
        match target {
            Target::Subcommands(cmd) => {
                let names: Vec<String> = cmd
                    .commands()
                    .iter()
                    .map(|c| c.name().to_string())
                    .collect();
                filter_by_prefix(&names, ctx.current())
            }
            Target::FlagNames(cmd) => {
                let mut names = Vec::new();
                for flag in cmd.flags() {
                    names.push(format!("--{}", flag.long()));
                    if let Some(short) = flag.short_name() {
                        names.push(format!("-{short}"));
                    }
                }
                filter_by_prefix(&names, ctx.current())
            }
            Target::FlagValue { flag, value } => {
                let value_ctx = ctx.with_current(value);
                match flag.predictor() {
                    Some(predictor) => predictor.predict(&value_ctx),
                    None => Vec::new(),
                }
            }
            Target::Positional { command, index } => {
                // An index past the declared slots has no candidate source.
                match command.positionals().get(index).and_then(|p| p.predictor()) {
                    Some(predictor) => predictor.predict(ctx),
                    None => Vec::new(),
                }
            }
        }
    }

    /// Answer a request: one candidate per line on `out`, then `exit(0)`.
    ///
    /// Write failures are swallowed — a shell completion request must never
    /// surface an error to the user, and the exit callback is invoked with
    /// status 0 regardless.
    pub fn run<W, F>(&self, request: &CompletionRequest, out: &mut W, exit: F)
    where
        W: Write,
        F: FnOnce(i32),
    {
        for candidate in self.complete(&request.line, request.point) {
            if writeln!(out, "{candidate}").is_err() {
                break;
            }
        }
        exit(0);
    }
}
