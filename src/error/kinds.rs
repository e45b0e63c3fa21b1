use std::{fmt, io};

/// Crate-wide `Result` type using [`TabcompError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, TabcompError>;

/// Top-level error type for tabcomp operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum TabcompError {
    /// Grammar validation errors.
    Grammar(GrammarError),

    /// Grammar file loading errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Grammar-construction errors.
///
/// These are raised while a grammar is being built or resolved, before any
/// completion request is answered. An invalid grammar fails fast at program
/// startup rather than misbehaving mid-completion.
#[derive(Debug)]
pub enum GrammarError {
    /// A flag or positional references a predictor name that is not
    /// registered.
    UnknownPredictor { name: String, element: String },

    /// A flag or positional carries more than one value binding
    /// (for example both `values` and `completer`).
    ConflictingPredictor { element: String },

    /// Two sibling subcommands share a name.
    DuplicateCommand { name: String },

    /// Two flags on the same command share a long or short name.
    DuplicateFlag { name: String },

    /// Declared positional indexes are not contiguous from zero.
    PositionalGap { command: String, index: usize },

    /// A filesystem binding carries an unparsable glob pattern.
    InvalidGlob { pattern: String },
}

/// Grammar-file loading errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Grammar file not found.
    FileNotFound(String),

    /// Grammar file extension is not a supported format.
    UnsupportedExtension(String),

    /// Grammar file failed to parse.
    InvalidFormat(String),
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for TabcompError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabcompError::Grammar(e) => write!(f, "Grammar error: {e}"),
            TabcompError::Config(e) => write!(f, "Grammar file error: {e}"),
            TabcompError::Io(e) => write!(f, "I/O error: {e}"),
            TabcompError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::UnknownPredictor { name, element } => {
                write!(f, "Unknown predictor '{name}' referenced by {element}")
            }
            GrammarError::ConflictingPredictor { element } => {
                write!(f, "More than one value binding declared on {element}")
            }
            GrammarError::DuplicateCommand { name } => {
                write!(f, "Duplicate subcommand name: {name}")
            }
            GrammarError::DuplicateFlag { name } => {
                write!(f, "Duplicate flag name: {name}")
            }
            GrammarError::PositionalGap { command, index } => {
                write!(
                    f,
                    "Positional arguments of '{command}' are not contiguous at index {index}"
                )
            }
            GrammarError::InvalidGlob { pattern } => {
                write!(f, "Invalid glob pattern: {pattern}")
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Grammar file not found: {path}"),
            ConfigError::UnsupportedExtension(path) => {
                write!(f, "Unsupported grammar file format: {path}")
            }
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid grammar file: {msg}"),
        }
    }
}

impl std::error::Error for TabcompError {}
impl std::error::Error for GrammarError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to TabcompError ========================= */

impl From<io::Error> for TabcompError {
    fn from(err: io::Error) -> Self {
        TabcompError::Io(err)
    }
}

impl From<GrammarError> for TabcompError {
    fn from(err: GrammarError) -> Self {
        TabcompError::Grammar(err)
    }
}

impl From<ConfigError> for TabcompError {
    fn from(err: ConfigError) -> Self {
        TabcompError::Config(err)
    }
}

impl From<String> for TabcompError {
    fn from(msg: String) -> Self {
        TabcompError::Generic(msg)
    }
}

impl From<&str> for TabcompError {
    fn from(msg: &str) -> Self {
        TabcompError::Generic(msg.to_owned())
    }
}
