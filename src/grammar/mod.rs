//! Command-line grammar model.
//!
//! A grammar is an explicit tree of [`Command`] nodes, each owning its
//! subcommands, flags, and positional arguments. The tree is built once at
//! program startup (directly through the builder methods here, or from a
//! grammar file via the `config` module) and is read-only for the lifetime
//! of every completion request.

use std::fmt;
use std::sync::Arc;

use crate::error::GrammarError;
use crate::predict::Predictor;

/// A command node: a name plus its subcommands, flags, and positionals.
#[derive(Debug, Clone, Default)]
pub struct Command {
    name: String,
    commands: Vec<Command>,
    flags: Vec<Flag>,
    positionals: Vec<Positional>,
}

/// A flag declaration.
///
/// Boolean flags consume no value token; value-taking flags consume either
/// an `=`-attached value or the following token. A flag may carry a bound
/// [`Predictor`] that completes its value.
#[derive(Clone)]
pub struct Flag {
    long: String,
    short: Option<char>,
    takes_value: bool,
    predictor: Option<Arc<dyn Predictor>>,
}

/// A positional argument slot with an optional bound [`Predictor`].
#[derive(Clone, Default)]
pub struct Positional {
    index: usize,
    predictor: Option<Arc<dyn Predictor>>,
}

impl Command {
    /// Create a new command with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: Vec::new(),
            flags: Vec::new(),
            positionals: Vec::new(),
        }
    }

    /// Add a subcommand.
    pub fn subcommand(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Add a flag.
    pub fn flag(mut self, flag: Flag) -> Self {
        self.flags.push(flag);
        self
    }

    /// Add a positional argument slot. Slots are indexed in declaration
    /// order starting at zero.
    pub fn positional(mut self, mut positional: Positional) -> Self {
        positional.index = self.positionals.len();
        self.positionals.push(positional);
        self
    }

    /// Command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared subcommands.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Declared flags.
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    /// Declared positional argument slots.
    pub fn positionals(&self) -> &[Positional] {
        &self.positionals
    }

    /// Find a direct subcommand by exact name.
    pub fn find_command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Find a flag by its long name.
    pub fn find_long(&self, name: &str) -> Option<&Flag> {
        self.flags.iter().find(|f| f.long == name)
    }

    /// Find a flag by its short name.
    pub fn find_short(&self, short: char) -> Option<&Flag> {
        self.flags.iter().find(|f| f.short == Some(short))
    }

    /// Validate this command and its subtree.
    ///
    /// Checks for duplicate subcommand names and duplicate long/short flag
    /// names among siblings. Called eagerly at construction time by the
    /// grammar-file loader; callers building grammars by hand may invoke it
    /// themselves.
    pub fn validate(&self) -> Result<(), GrammarError> {
        for (i, cmd) in self.commands.iter().enumerate() {
            if self.commands[..i].iter().any(|c| c.name == cmd.name) {
                return Err(GrammarError::DuplicateCommand {
                    name: cmd.name.clone(),
                });
            }
            cmd.validate()?;
        }
        for (i, flag) in self.flags.iter().enumerate() {
            let earlier = &self.flags[..i];
            if earlier.iter().any(|f| f.long == flag.long) {
                return Err(GrammarError::DuplicateFlag {
                    name: format!("--{}", flag.long),
                });
            }
            if let Some(short) = flag.short {
                if earlier.iter().any(|f| f.short == Some(short)) {
                    return Err(GrammarError::DuplicateFlag {
                        name: format!("-{short}"),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Flag {
    /// Create a boolean flag: it consumes no value token.
    pub fn boolean(long: impl Into<String>) -> Self {
        Self {
            long: long.into(),
            short: None,
            takes_value: false,
            predictor: None,
        }
    }

    /// Create a value-taking flag.
    pub fn value(long: impl Into<String>) -> Self {
        Self {
            long: long.into(),
            short: None,
            takes_value: true,
            predictor: None,
        }
    }

    /// Set the single-character short name.
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Bind a predictor for this flag's value.
    pub fn predict(mut self, predictor: Arc<dyn Predictor>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    /// Long name, without the leading dashes.
    pub fn long(&self) -> &str {
        &self.long
    }

    /// Short name, if declared.
    pub fn short_name(&self) -> Option<char> {
        self.short
    }

    /// Whether this flag consumes a value token.
    pub fn takes_value(&self) -> bool {
        self.takes_value
    }

    /// The bound value predictor, if any.
    pub fn predictor(&self) -> Option<&Arc<dyn Predictor>> {
        self.predictor.as_ref()
    }
}

impl Positional {
    /// Create a positional slot with no bound predictor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a predictor for this slot.
    pub fn predict(mut self, predictor: Arc<dyn Predictor>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    /// Declared index (assigned in declaration order).
    pub fn index(&self) -> usize {
        self.index
    }

    /// The bound predictor, if any.
    pub fn predictor(&self) -> Option<&Arc<dyn Predictor>> {
        self.predictor.as_ref()
    }
}

impl fmt::Debug for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag")
            .field("long", &self.long)
            .field("short", &self.short)
            .field("takes_value", &self.takes_value)
            .field("predictor", &self.predictor.is_some())
            .finish()
    }
}

impl fmt::Debug for Positional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Positional")
            .field("index", &self.index)
            .field("predictor", &self.predictor.is_some())
            .finish()
    }
}
