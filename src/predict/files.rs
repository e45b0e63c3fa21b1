//! Filesystem predictor: glob-constrained directory listing.
//!
//! Completes path fragments against the immediate children of one
//! directory. Directories are always candidates (the user must be able to
//! descend into them) and carry a trailing `/`; files must match the
//! configured glob pattern. Candidates keep the same relative form the user
//! typed: a `./`-prefixed token yields `./`-prefixed candidates, a bare
//! token yields bare ones.
//!
//! Every filesystem failure — missing directory, permission denied — is
//! absorbed into an empty listing. A completion request never surfaces an
//! error.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::debug;

use super::Predictor;
use crate::complete::CompleterContext;
use crate::error::GrammarError;

/// Which directory entries are offered as candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    /// Every entry; the pattern is effectively `*`.
    Any,
    /// Files matching the pattern, plus directories for descent.
    FilesOnly,
    /// Directories only; files are never offered.
    DirsOnly,
}

/// Completes filesystem paths relative to a base directory.
#[derive(Debug, Clone)]
pub struct FilePredictor {
    pattern: Option<Pattern>,
    mode: ListMode,
    base: Option<PathBuf>,
}

impl FilePredictor {
    /// Predict files matching `pattern` (and all directories).
    ///
    /// An empty or invalid pattern matches every file.
    pub fn files(pattern: &str) -> Self {
        Self {
            pattern: compile(pattern),
            mode: ListMode::FilesOnly,
            base: None,
        }
    }

    /// Predict directories only, constrained by `pattern` for the
    /// directory names themselves being typed against.
    pub fn dirs(pattern: &str) -> Self {
        Self {
            pattern: compile(pattern),
            mode: ListMode::DirsOnly,
            base: None,
        }
    }

    /// Predict every directory entry.
    pub fn any() -> Self {
        Self {
            pattern: None,
            mode: ListMode::Any,
            base: None,
        }
    }

    /// Like [`FilePredictor::files`]/[`FilePredictor::dirs`] but rejecting
    /// an invalid glob pattern. Used by the grammar-file loader, which
    /// fails fast at construction time instead of silently matching all.
    pub fn with_mode(pattern: &str, mode: ListMode) -> Result<Self, GrammarError> {
        let pattern = if pattern.is_empty() {
            None
        } else {
            Some(
                Pattern::new(pattern).map_err(|_| GrammarError::InvalidGlob {
                    pattern: pattern.to_string(),
                })?,
            )
        };
        Ok(Self {
            pattern,
            mode,
            base: None,
        })
    }

    /// Resolve relative fragments against `dir` instead of the process
    /// working directory.
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base = Some(dir.into());
        self
    }

    fn base(&self) -> &Path {
        self.base.as_deref().unwrap_or(Path::new("."))
    }

    fn pattern_matches(&self, name: &str) -> bool {
        match &self.pattern {
            Some(pattern) => pattern.matches(name),
            None => true,
        }
    }

    /// The directory portion of the typed fragment, trailing `/` included.
    ///
    /// A fragment that names an existing directory is itself the listing
    /// target; otherwise everything up to the last `/` is (empty meaning
    /// the base directory).
    fn directory_fragment(&self, last: &str) -> String {
        if !last.is_empty() && self.base().join(last).is_dir() {
            return if last.ends_with('/') {
                last.to_string()
            } else {
                format!("{last}/")
            };
        }
        match last.rfind('/') {
            Some(i) => last[..=i].to_string(),
            None => String::new(),
        }
    }
}

impl Predictor for FilePredictor {
    fn predict(&self, ctx: &CompleterContext) -> Vec<String> {
        let last = ctx.current();

        // Parent references would complete to paths the fragment arithmetic
        // below cannot represent faithfully.
        if last.ends_with("/..") {
            return Vec::new();
        }

        let dir_frag = self.directory_fragment(last);
        let listing = if dir_frag.is_empty() {
            self.base().to_path_buf()
        } else {
            self.base().join(&dir_frag)
        };

        let mut candidates = BTreeSet::new();

        // The listing directory itself is a completion target: the user may
        // accept it or keep typing to descend.
        candidates.insert(if dir_frag.is_empty() {
            "./".to_string()
        } else {
            dir_frag.clone()
        });

        match fs::read_dir(&listing) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                    if is_dir {
                        candidates.insert(format!("{dir_frag}{name}/"));
                    } else if self.mode != ListMode::DirsOnly && self.pattern_matches(&name) {
                        candidates.insert(format!("{dir_frag}{name}"));
                    }
                }
            }
            Err(err) => {
                // Treated as an empty directory; only the self entry remains
                // and the prefix filter below usually discards it.
                debug!("directory listing failed for {}: {err}", listing.display());
            }
        }

        candidates
            .into_iter()
            .map(|candidate| relative_form(last, candidate))
            .filter(|candidate| path_matches(candidate, last))
            .collect()
    }
}

fn compile(pattern: &str) -> Option<Pattern> {
    if pattern.is_empty() {
        return None;
    }
    Pattern::new(pattern).ok()
}

/// Give `candidate` the same relative style the typed fragment uses: a
/// dot-leading fragment gets `./`-prefixed candidates.
fn relative_form(last: &str, candidate: String) -> String {
    if last.starts_with('.') && !candidate.starts_with("./") {
        format!("./{candidate}")
    } else {
        candidate
    }
}

/// Prefix test between a candidate path and the typed fragment, with `./`
/// treated as equivalent to the bare form on both sides.
fn path_matches(candidate: &str, last: &str) -> bool {
    // The bare current-directory entry completes an empty or lone-dot token.
    if candidate == "./" && (last.is_empty() || last == ".") {
        return true;
    }
    // A lone dot matches any dot-leading candidate.
    if last == "." && candidate.starts_with('.') {
        return true;
    }
    let candidate = candidate.strip_prefix("./").unwrap_or(candidate);
    let last = last.strip_prefix("./").unwrap_or(last);
    candidate.starts_with(last)
}
