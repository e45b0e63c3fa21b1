//! Completion request context.
//!
//! A [`CompleterContext`] is the immutable view of one completion request:
//! the in-progress token under the cursor plus every completed token before
//! it (including the program name). One is created per request by the
//! tokenizer and discarded once candidates have been produced.

/// The current token plus the ordered tokens that precede it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleterContext {
    prior: Vec<String>,
    current: String,
}

impl CompleterContext {
    /// Create a context from completed tokens and the in-progress token.
    pub fn new(prior: Vec<String>, current: impl Into<String>) -> Self {
        Self {
            prior,
            current: current.into(),
        }
    }

    /// The fragment under the cursor; empty when the cursor sits after a
    /// word separator.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// All completed tokens before the cursor, program name first.
    pub fn prior(&self) -> &[String] {
        &self.prior
    }

    /// Completed tokens with the program name stripped.
    pub fn args(&self) -> &[String] {
        if self.prior.is_empty() {
            &self.prior
        } else {
            &self.prior[1..]
        }
    }

    /// Derive a context with the same history but a replaced current token.
    ///
    /// Used when a flag value is `=`-attached: the bound predictor sees only
    /// the value fragment after the `=`.
    pub fn with_current(&self, current: impl Into<String>) -> Self {
        Self {
            prior: self.prior.clone(),
            current: current.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(prior: &[&str], current: &str) -> CompleterContext {
        CompleterContext::new(prior.iter().map(|s| s.to_string()).collect(), current)
    }

    #[test]
    fn test_accessors() {
        let context = ctx(&["myApp", "foo"], "ra");
        assert_eq!(context.current(), "ra");
        assert_eq!(context.prior(), ["myApp", "foo"]);
        assert_eq!(context.args(), ["foo"]);
    }

    #[test]
    fn test_args_empty_prior() {
        let context = ctx(&[], "");
        assert!(context.args().is_empty());
    }

    #[test]
    fn test_with_current() {
        let context = ctx(&["myApp", "bar"], "--number=2");
        let rewritten = context.with_current("2");
        assert_eq!(rewritten.current(), "2");
        assert_eq!(rewritten.prior(), context.prior());
    }
}
