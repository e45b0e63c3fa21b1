//! Candidate predictors.
//!
//! A [`Predictor`] is the capability behind every completable value: given
//! the request context it yields literal candidate strings. Prefix
//! filtering is each predictor's own responsibility — the dispatch layer
//! hands over the full context untouched, so a predictor may match on more
//! than the raw prefix (the filesystem predictor normalizes `./` first).
//!
//! Candidate order carries no guarantee; shells re-sort before display.

mod files;

pub use files::{FilePredictor, ListMode};

use std::collections::HashMap;
use std::sync::Arc;

use crate::complete::CompleterContext;
use crate::grammar::Flag;

/// Produces candidate strings for the token under the cursor.
pub trait Predictor: Send + Sync {
    /// Produce candidates for the current token.
    fn predict(&self, ctx: &CompleterContext) -> Vec<String>;
}

/// Predicts from a fixed set of strings, filtered by the typed prefix.
#[derive(Debug, Clone)]
pub struct SetPredictor {
    options: Vec<String>,
}

impl SetPredictor {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
        }
    }
}

impl Predictor for SetPredictor {
    fn predict(&self, ctx: &CompleterContext) -> Vec<String> {
        filter_by_prefix(&self.options, ctx.current())
    }
}

/// Predicts nothing. The stand-in for every unbound value position.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPredictor;

impl Predictor for NoopPredictor {
    fn predict(&self, _ctx: &CompleterContext) -> Vec<String> {
        Vec::new()
    }
}

/// Dispatches to one predictor per positional slot.
///
/// The slot is the count of bare tokens before the cursor, where flag
/// tokens and the values they consume do not count. Useful for hosts that
/// complete positionals without declaring a full command tree; grammars
/// resolved through the walker do not need it.
pub struct PerPosition {
    completers: Vec<Arc<dyn Predictor>>,
    flags: Vec<Flag>,
}

impl PerPosition {
    pub fn new(completers: Vec<Arc<dyn Predictor>>) -> Self {
        Self {
            completers,
            flags: Vec::new(),
        }
    }

    /// Declare the flags whose tokens (and consumed values) must be
    /// skipped when counting positionals.
    pub fn with_flags(mut self, flags: Vec<Flag>) -> Self {
        self.flags = flags;
        self
    }
}

impl Predictor for PerPosition {
    fn predict(&self, ctx: &CompleterContext) -> Vec<String> {
        let index = crate::complete::resolver::positional_index(&self.flags, ctx.args());
        match self.completers.get(index) {
            Some(completer) => completer.predict(ctx),
            None => Vec::new(),
        }
    }
}

/// Named predictor lookup, resolved eagerly at grammar-construction time.
///
/// Grammar files reference predictors by name (`completer = "things"`); an
/// unresolvable name fails grammar construction rather than silently
/// completing nothing at request time.
#[derive(Default, Clone)]
pub struct PredictorRegistry {
    predictors: HashMap<String, Arc<dyn Predictor>>,
}

impl PredictorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in filesystem predictors
    /// (`files`, `dirs`).
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("files", Arc::new(FilePredictor::files("*")));
        registry.register("dirs", Arc::new(FilePredictor::dirs("*")));
        registry
    }

    /// Register a predictor under a name, replacing any previous binding.
    pub fn register(&mut self, name: impl Into<String>, predictor: Arc<dyn Predictor>) {
        self.predictors.insert(name.into(), predictor);
    }

    /// Look up a predictor by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Predictor>> {
        self.predictors.get(name).cloned()
    }
}

/// Keep the items that start with `prefix`. An empty prefix keeps all.
pub(crate) fn filter_by_prefix(items: &[String], prefix: &str) -> Vec<String> {
    if prefix.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| item.starts_with(prefix))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(prior: &[&str], current: &str) -> CompleterContext {
        CompleterContext::new(prior.iter().map(|s| s.to_string()).collect(), current)
    }

    #[test]
    fn test_set_predictor_no_prefix() {
        let predictor = SetPredictor::new(["thing1", "thing2"]);
        let got = predictor.predict(&ctx(&["myApp"], ""));
        assert_eq!(got, ["thing1", "thing2"]);
    }

    #[test]
    fn test_set_predictor_prefix_filters() {
        let predictor = SetPredictor::new(["gizzles", "my", "oh"]);
        assert_eq!(predictor.predict(&ctx(&["myApp"], "gi")), ["gizzles"]);
        assert!(predictor.predict(&ctx(&["myApp"], "zz")).is_empty());
    }

    #[test]
    fn test_noop_predictor() {
        assert!(NoopPredictor.predict(&ctx(&["myApp"], "anything")).is_empty());
    }

    #[test]
    fn test_per_position_dispatch() {
        let predictor = PerPosition::new(vec![
            Arc::new(SetPredictor::new(["one"])),
            Arc::new(SetPredictor::new(["two"])),
        ]);

        assert_eq!(predictor.predict(&ctx(&["app"], "")), ["one"]);
        assert_eq!(predictor.predict(&ctx(&["app", "foo"], "")), ["two"]);
        // Past the declared slots: nothing.
        assert!(predictor.predict(&ctx(&["app", "foo", "bar"], "")).is_empty());
    }

    #[test]
    fn test_per_position_skips_flag_values() {
        let predictor = PerPosition::new(vec![
            Arc::new(SetPredictor::new(["one"])),
            Arc::new(SetPredictor::new(["two"])),
        ])
        .with_flags(vec![
            Flag::boolean("mybool").short('b'),
            Flag::value("myarg").short('a'),
        ]);

        // "-a foo": foo is the flag's value, so the slot stays at 0.
        assert_eq!(predictor.predict(&ctx(&["app", "-a", "foo"], "")), ["one"]);
        // "-b foo": boolean consumes nothing, foo fills slot 0.
        assert_eq!(predictor.predict(&ctx(&["app", "-b", "foo"], "")), ["two"]);
    }

    #[test]
    fn test_registry_round_trip() {
        let mut registry = PredictorRegistry::new();
        registry.register("things", Arc::new(SetPredictor::new(["thing1", "thing2"])));

        assert!(registry.get("things").is_some());
        assert!(registry.get("otherthings").is_none());
    }

    #[test]
    fn test_registry_builtins() {
        let registry = PredictorRegistry::with_builtins();
        assert!(registry.get("files").is_some());
        assert!(registry.get("dirs").is_some());
    }
}
