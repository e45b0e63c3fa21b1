//! Cursor-aware command-line tokenizer.
//!
//! Splits the shell-supplied line into words and decides which fragment the
//! cursor is completing. Splitting is plain whitespace splitting — shells
//! hand completion handlers an already-unquoted line, so no quote or escape
//! handling is done here.

use super::context::CompleterContext;

/// Tokenize `line` up to the cursor `point`.
///
/// `point` defaults to the end of the line and is clamped into range (and
/// onto a char boundary) otherwise. The last word of the truncated line
/// becomes the current token unless the line ends in whitespace, in which
/// case the current token is empty. This never fails: malformed input
/// degrades to an empty context.
pub fn tokenize(line: &str, point: Option<usize>) -> CompleterContext {
    let mut cut = point.unwrap_or(line.len()).min(line.len());
    while cut > 0 && !line.is_char_boundary(cut) {
        cut -= 1;
    }
    let head = &line[..cut];

    let mut tokens: Vec<String> = head.split_whitespace().map(str::to_owned).collect();

    // A trailing separator means the user has finished the last word and is
    // starting a fresh, empty one.
    let current = if head.ends_with(char::is_whitespace) || tokens.is_empty() {
        String::new()
    } else {
        tokens.pop().unwrap_or_default()
    };

    CompleterContext::new(tokens, current)
}
