//! Grammar walker: decides which grammar element the cursor addresses.
//!
//! A single left-to-right pass over the completed tokens tracks the active
//! command, the positional counter, and any flag still waiting for its
//! value. The walk is error-tolerant: unknown flags and unknown cluster
//! characters are treated as valueless so that a half-typed command line
//! still resolves to a sensible completion target.

use tracing::trace;

use super::context::CompleterContext;
use crate::grammar::{Command, Flag};

/// The grammar element the current token is completing.
#[derive(Debug)]
pub enum Target<'g> {
    /// Subcommand names of the active command.
    Subcommands(&'g Command),

    /// Flag names of the active command (current token starts with `-`).
    FlagNames(&'g Command),

    /// The value of a flag, either pending from the previous token or
    /// `=`-attached inside the current one. `value` is the fragment the
    /// bound predictor should see as the current token.
    FlagValue { flag: &'g Flag, value: String },

    /// The positional slot at `index` of the active command. The index may
    /// exceed the declared slots, in which case no candidates exist.
    Positional { command: &'g Command, index: usize },
}

/// Walk the completed tokens and resolve the completion target.
pub fn resolve<'g>(root: &'g Command, ctx: &CompleterContext) -> Target<'g> {
    let mut cmd = root;
    let mut pos_index = 0usize;
    let mut pending: Option<&'g Flag> = None;

    // The program name itself is skipped via args().
    for token in ctx.args() {
        if pending.take().is_some() {
            // Consumed as the pending flag's value.
            continue;
        }
        if let Some(flag) = flag_pending_value(cmd.flags(), token) {
            pending = flag;
            continue;
        }
        if is_flag_token(token) {
            continue;
        }
        if let Some(child) = cmd.find_command(token) {
            // Exact match on a subcommand name wins over a positional value.
            cmd = child;
            pos_index = 0;
            continue;
        }
        pos_index += 1;
    }

    if let Some(flag) = pending {
        trace!("target: value of --{}", flag.long());
        return Target::FlagValue {
            flag,
            value: ctx.current().to_string(),
        };
    }

    let current = ctx.current();
    if current.starts_with('-') {
        // "--name=prefix" completes the flag's value in place.
        if let Some((name, value)) = current.split_once('=') {
            if let Some(flag) = lookup_flag_token(cmd, name) {
                if flag.takes_value() {
                    trace!("target: attached value of {}", name);
                    return Target::FlagValue {
                        flag,
                        value: value.to_string(),
                    };
                }
            }
        }
        trace!("target: flag names of '{}'", cmd.name());
        return Target::FlagNames(cmd);
    }

    if !cmd.positionals().is_empty() {
        trace!("target: positional {} of '{}'", pos_index, cmd.name());
        return Target::Positional {
            command: cmd,
            index: pos_index,
        };
    }

    trace!("target: subcommands of '{}'", cmd.name());
    Target::Subcommands(cmd)
}

/// Whether a token is flag-shaped (`-x`, `--long`, ...).
///
/// A lone `-` is the fragment of a flag still being typed and a lone `--`
/// is the conventional end-of-flags marker; both are treated as flag tokens
/// so that they never consume a positional slot.
fn is_flag_token(token: &str) -> bool {
    token.starts_with('-')
}

/// Scan a completed token against the declared flags.
///
/// Returns `Some(Some(flag))` when the token is a value-taking flag whose
/// value must come from the *next* token, `Some(None)` when the token is
/// flag-shaped but fully self-contained (boolean, `=`-attached value,
/// cluster-attached value, or unknown), and `None` when the token is not a
/// flag token at all.
fn flag_pending_value<'g>(flags: &'g [Flag], token: &str) -> Option<Option<&'g Flag>> {
    if let Some(rest) = token.strip_prefix("--") {
        if rest.is_empty() {
            return None;
        }
        return Some(long_pending(flags, rest));
    }
    if let Some(body) = token.strip_prefix('-') {
        if body.is_empty() {
            return None;
        }
        return Some(cluster_pending(flags, body));
    }
    None
}

/// Resolve `--name[=value]` (without the dashes) against the flag list.
fn long_pending<'g>(flags: &'g [Flag], rest: &str) -> Option<&'g Flag> {
    let (name, attached) = match rest.split_once('=') {
        Some((name, _)) => (name, true),
        None => (rest, false),
    };
    match flags.iter().find(|f| f.long() == name) {
        Some(flag) if flag.takes_value() && !attached => Some(flag),
        // Boolean, value already attached, or unknown: nothing pending.
        _ => None,
    }
}

/// Resolve a short-flag cluster body (the token minus its leading `-`).
///
/// Characters resolve left to right; the first value-taking short consumes
/// the rest of the token as its value, or the next token when nothing
/// follows it. Unrecognized characters are tolerated as valueless.
fn cluster_pending<'g>(flags: &'g [Flag], body: &str) -> Option<&'g Flag> {
    for (i, c) in body.char_indices() {
        if c == '=' {
            break;
        }
        if let Some(flag) = flags.iter().find(|f| f.short_name() == Some(c)) {
            if flag.takes_value() {
                let rest = &body[i + c.len_utf8()..];
                if rest.is_empty() {
                    return Some(flag);
                }
                // "-a=omg" or "-aomg": value attached inside the token.
                return None;
            }
        }
    }
    None
}

/// Resolve a dashed flag token (`--name` or `-s`) to its declaration.
fn lookup_flag_token<'g>(cmd: &'g Command, name: &str) -> Option<&'g Flag> {
    if let Some(long) = name.strip_prefix("--") {
        return cmd.find_long(long);
    }
    let short = name.strip_prefix('-')?;
    let mut chars = short.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => cmd.find_short(c),
        _ => None,
    }
}

/// Positional index reached after consuming `tokens` against a flat flag
/// list, with the same value-consumption rules as the grammar walk.
///
/// Shared with [`crate::predict::PerPosition`], which dispatches on
/// positional slots without a full command tree.
pub(crate) fn positional_index(flags: &[Flag], tokens: &[String]) -> usize {
    let mut index = 0usize;
    let mut pending = false;
    for token in tokens {
        if pending {
            pending = false;
            continue;
        }
        match flag_pending_value(flags, token) {
            Some(flag) => pending = flag.is_some(),
            None => index += 1,
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complete::tokenizer::tokenize;

    /// Flags from the positional-arithmetic corpus: `-b`/`-c` boolean,
    /// `-a`/`--myarg` value-taking.
    fn arith_flags() -> Vec<Flag> {
        vec![
            Flag::boolean("mybool").short('b'),
            Flag::boolean("mybool2").short('c'),
            Flag::value("myarg").short('a'),
        ]
    }

    fn arith_grammar() -> Command {
        let mut cmd = Command::new("app");
        for flag in arith_flags() {
            cmd = cmd.flag(flag);
        }
        cmd.positional(crate::grammar::Positional::new())
            .positional(crate::grammar::Positional::new())
            .positional(crate::grammar::Positional::new())
    }

    fn resolved_slot(grammar: &Command, line: &str) -> usize {
        let ctx = tokenize(line, None);
        match resolve(grammar, &ctx) {
            Target::Positional { index, .. } => index,
            other => panic!("expected positional target for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_positional_slot_arithmetic() {
        let grammar = arith_grammar();
        let cases = [
            ("app ", 0),
            ("app foo", 0),
            ("app foo ", 1),
            ("app -b foo ", 1),
            ("app -bc foo ", 1),
            ("app -bd foo ", 1),
            ("app -a foo ", 0),
            ("app -a=omg foo ", 1),
            ("app --myarg omg foo ", 1),
            ("app --myarg=omg foo ", 1),
            ("app foo bar", 1),
            ("app foo bar ", 2),
        ];
        for (line, want) in cases {
            assert_eq!(resolved_slot(&grammar, line), want, "line {line:?}");
        }
    }

    #[test]
    fn test_positional_index_flat() {
        let flags = arith_flags();
        let split = |s: &str| -> Vec<String> {
            s.split_whitespace().map(str::to_owned).collect()
        };
        assert_eq!(positional_index(&flags, &split("")), 0);
        assert_eq!(positional_index(&flags, &split("-bc foo")), 1);
        assert_eq!(positional_index(&flags, &split("-a foo")), 0);
        assert_eq!(positional_index(&flags, &split("--myarg omg foo")), 1);
    }

    #[test]
    fn test_pending_flag_value_target() {
        let grammar = Command::new("app").flag(Flag::value("myarg").short('a'));
        let ctx = tokenize("app --myarg ", None);
        match resolve(&grammar, &ctx) {
            Target::FlagValue { flag, value } => {
                assert_eq!(flag.long(), "myarg");
                assert_eq!(value, "");
            }
            other => panic!("expected flag value target, got {other:?}"),
        }
    }

    #[test]
    fn test_attached_value_target() {
        let grammar = Command::new("app").flag(Flag::value("number").short('n'));
        for line in ["app --number=", "app -n="] {
            let ctx = tokenize(line, None);
            match resolve(&grammar, &ctx) {
                Target::FlagValue { flag, value } => {
                    assert_eq!(flag.long(), "number");
                    assert_eq!(value, "");
                }
                other => panic!("expected flag value target for {line:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_attached_value_keeps_typed_prefix() {
        let grammar = Command::new("app").flag(Flag::value("omg"));
        let ctx = tokenize("app --omg=gi", None);
        match resolve(&grammar, &ctx) {
            Target::FlagValue { value, .. } => assert_eq!(value, "gi"),
            other => panic!("expected flag value target, got {other:?}"),
        }
    }

    #[test]
    fn test_boolean_flag_never_opens_value() {
        let grammar = Command::new("app")
            .flag(Flag::boolean("baz"))
            .subcommand(Command::new("rabbit"));
        let ctx = tokenize("app --baz ", None);
        assert!(matches!(resolve(&grammar, &ctx), Target::Subcommands(_)));
    }

    #[test]
    fn test_dash_current_targets_flag_names() {
        let grammar = Command::new("app").flag(Flag::boolean("baz"));
        let ctx = tokenize("app -", None);
        assert!(matches!(resolve(&grammar, &ctx), Target::FlagNames(_)));
    }

    #[test]
    fn test_descend_resets_positional_counter() {
        let grammar = Command::new("app")
            .positional(crate::grammar::Positional::new())
            .subcommand(Command::new("sub").positional(crate::grammar::Positional::new()));
        // "sub" matches a subcommand exactly, so it descends instead of
        // filling the outer positional slot.
        let ctx = tokenize("app sub ", None);
        match resolve(&grammar, &ctx) {
            Target::Positional { command, index } => {
                assert_eq!(command.name(), "sub");
                assert_eq!(index, 0);
            }
            other => panic!("expected positional target, got {other:?}"),
        }
    }

    #[test]
    fn test_non_command_token_is_positional_value() {
        let grammar = Command::new("app")
            .positional(crate::grammar::Positional::new())
            .positional(crate::grammar::Positional::new())
            .subcommand(Command::new("sub"));
        // "subx" matches no subcommand name, so it fills slot 0.
        let ctx = tokenize("app subx ", None);
        match resolve(&grammar, &ctx) {
            Target::Positional { command, index } => {
                assert_eq!(command.name(), "app");
                assert_eq!(index, 1);
            }
            other => panic!("expected positional target, got {other:?}"),
        }
    }
}
