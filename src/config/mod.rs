//! Declarative grammar files.
//!
//! Grammars can be written as TOML or JSON documents instead of built
//! through the `grammar` builder API. A grammar file enumerates commands,
//! flags, and positional args; value spaces are bound inline
//! (`values = [...]`, `files = "*.txt"`, `dirs = "*"`) or by reference to a
//! named predictor in a [`PredictorRegistry`] (`completer = "things"`).
//!
//! All resolution is eager: an unknown predictor name, a conflicting
//! binding, or an invalid glob fails at construction time, never during a
//! completion request.
//!
//! # Example
//!
//! ```toml
//! name = "myApp"
//!
//! [[commands]]
//! name = "foo"
//!
//! [[commands.flags]]
//! long = "bar"
//! completer = "things"
//!
//! [[commands.flags]]
//! long = "baz"
//!
//! [[commands.commands]]
//! name = "rabbit"
//! ```

use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

use crate::error::{ConfigError, GrammarError, Result};
use crate::grammar::{Command, Flag, Positional};
use crate::predict::{FilePredictor, ListMode, Predictor, PredictorRegistry, SetPredictor};

/// A grammar file's root command.
pub type GrammarConfig = CommandConfig;

/// One command node in a grammar file.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandConfig {
    /// Command name; for the root, the program name.
    pub name: String,

    /// Nested subcommands.
    #[serde(default)]
    pub commands: Vec<CommandConfig>,

    /// Flags declared on this command.
    #[serde(default)]
    pub flags: Vec<FlagConfig>,

    /// Positional argument slots, in order.
    #[serde(default)]
    pub positionals: Vec<PositionalConfig>,
}

/// One flag declaration in a grammar file.
#[derive(Debug, Clone, Deserialize)]
pub struct FlagConfig {
    /// Long name, without the leading dashes.
    pub long: String,

    /// Optional single-character short name.
    #[serde(default)]
    pub short: Option<char>,

    /// Whether the flag consumes a value token. Implied by any value
    /// binding; a flag with neither is boolean.
    #[serde(default)]
    pub takes_value: bool,

    /// Inline fixed value set.
    #[serde(default)]
    pub values: Option<Vec<String>>,

    /// Named predictor reference, resolved against the registry.
    #[serde(default)]
    pub completer: Option<String>,

    /// Complete file paths matching this glob.
    #[serde(default)]
    pub files: Option<String>,

    /// Complete directory paths matching this glob.
    #[serde(default)]
    pub dirs: Option<String>,
}

/// One positional slot in a grammar file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PositionalConfig {
    /// Optional declared index; when present it must match the slot's
    /// declaration order.
    #[serde(default)]
    pub index: Option<usize>,

    #[serde(default)]
    pub values: Option<Vec<String>>,

    #[serde(default)]
    pub completer: Option<String>,

    #[serde(default)]
    pub files: Option<String>,

    #[serde(default)]
    pub dirs: Option<String>,
}

impl CommandConfig {
    /// Load a grammar file, picking the format by extension
    /// (`.toml` or `.json`).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&text),
            Some("json") => Self::from_json(&text),
            _ => Err(ConfigError::UnsupportedExtension(path.display().to_string()).into()),
        }
    }

    /// Parse a TOML grammar document.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ConfigError::InvalidFormat(e.to_string()).into())
    }

    /// Parse a JSON grammar document.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| ConfigError::InvalidFormat(e.to_string()).into())
    }

    /// Resolve this description into a validated [`Command`] tree.
    ///
    /// Every `completer` reference is looked up in `registry` now; failure
    /// here is a construction error and never reaches a completion request.
    pub fn resolve(&self, registry: &PredictorRegistry) -> Result<Command> {
        let command = self.build(registry)?;
        command.validate()?;
        Ok(command)
    }

    fn build(&self, registry: &PredictorRegistry) -> Result<Command> {
        let mut command = Command::new(&self.name);

        for flag_cfg in &self.flags {
            let element = format!("flag --{}", flag_cfg.long);
            let predictor = resolve_binding(
                &element,
                registry,
                flag_cfg.values.as_deref(),
                flag_cfg.completer.as_deref(),
                flag_cfg.files.as_deref(),
                flag_cfg.dirs.as_deref(),
            )?;

            let takes_value = flag_cfg.takes_value || predictor.is_some();
            let mut flag = if takes_value {
                Flag::value(&flag_cfg.long)
            } else {
                Flag::boolean(&flag_cfg.long)
            };
            if let Some(short) = flag_cfg.short {
                flag = flag.short(short);
            }
            if let Some(predictor) = predictor {
                flag = flag.predict(predictor);
            }
            command = command.flag(flag);
        }

        for (slot, pos_cfg) in self.positionals.iter().enumerate() {
            if let Some(index) = pos_cfg.index {
                if index != slot {
                    return Err(GrammarError::PositionalGap {
                        command: self.name.clone(),
                        index,
                    }
                    .into());
                }
            }
            let element = format!("positional {slot} of '{}'", self.name);
            let predictor = resolve_binding(
                &element,
                registry,
                pos_cfg.values.as_deref(),
                pos_cfg.completer.as_deref(),
                pos_cfg.files.as_deref(),
                pos_cfg.dirs.as_deref(),
            )?;

            let mut positional = Positional::new();
            if let Some(predictor) = predictor {
                positional = positional.predict(predictor);
            }
            command = command.positional(positional);
        }

        for child in &self.commands {
            command = command.subcommand(child.build(registry)?);
        }

        Ok(command)
    }
}

/// Resolve the (at most one) value binding of a flag or positional.
fn resolve_binding(
    element: &str,
    registry: &PredictorRegistry,
    values: Option<&[String]>,
    completer: Option<&str>,
    files: Option<&str>,
    dirs: Option<&str>,
) -> Result<Option<Arc<dyn Predictor>>> {
    let declared = [
        values.is_some(),
        completer.is_some(),
        files.is_some(),
        dirs.is_some(),
    ]
    .iter()
    .filter(|b| **b)
    .count();
    if declared > 1 {
        return Err(GrammarError::ConflictingPredictor {
            element: element.to_string(),
        }
        .into());
    }

    if let Some(values) = values {
        return Ok(Some(Arc::new(SetPredictor::new(values.iter().cloned()))));
    }
    if let Some(name) = completer {
        return match registry.get(name) {
            Some(predictor) => Ok(Some(predictor)),
            None => Err(GrammarError::UnknownPredictor {
                name: name.to_string(),
                element: element.to_string(),
            }
            .into()),
        };
    }
    if let Some(pattern) = files {
        let predictor = FilePredictor::with_mode(pattern, ListMode::FilesOnly)?;
        return Ok(Some(Arc::new(predictor)));
    }
    if let Some(pattern) = dirs {
        let predictor = FilePredictor::with_mode(pattern, ListMode::DirsOnly)?;
        return Ok(Some(Arc::new(predictor)));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complete::CompletionEngine;
    use crate::error::TabcompError;

    const SAMPLE: &str = r#"
name = "myApp"

[[commands]]
name = "foo"

[[commands.flags]]
long = "bar"
completer = "things"

[[commands.flags]]
long = "baz"

[[commands.commands]]
name = "rabbit"

[[commands.commands]]
name = "duck"

[[commands]]
name = "bar"

[[commands.positionals]]
values = ["thing1", "thing2"]

[[commands.positionals]]
values = ["otherthing1", "otherthing2"]
"#;

    fn registry() -> PredictorRegistry {
        let mut registry = PredictorRegistry::with_builtins();
        registry.register("things", Arc::new(SetPredictor::new(["thing1", "thing2"])));
        registry
    }

    #[test]
    fn test_parse_and_resolve_toml() {
        let config = GrammarConfig::from_toml(SAMPLE).unwrap();
        let grammar = config.resolve(&registry()).unwrap();

        assert_eq!(grammar.name(), "myApp");
        let foo = grammar.find_command("foo").unwrap();
        assert!(foo.find_command("rabbit").is_some());
        assert!(foo.find_long("bar").unwrap().takes_value());
        assert!(!foo.find_long("baz").unwrap().takes_value());
    }

    #[test]
    fn test_resolved_grammar_completes() {
        let config = GrammarConfig::from_toml(SAMPLE).unwrap();
        let grammar = config.resolve(&registry()).unwrap();
        let engine = CompletionEngine::new(grammar);

        let mut got = engine.complete("myApp foo --bar ", None);
        got.sort();
        assert_eq!(got, ["thing1", "thing2"]);

        let mut got = engine.complete("myApp bar thing1 ", None);
        got.sort();
        assert_eq!(got, ["otherthing1", "otherthing2"]);
    }

    #[test]
    fn test_parse_json() {
        let config = GrammarConfig::from_json(
            r#"{
                "name": "app",
                "flags": [{"long": "level", "values": ["info", "debug"]}]
            }"#,
        )
        .unwrap();
        let grammar = config.resolve(&PredictorRegistry::new()).unwrap();
        assert!(grammar.find_long("level").unwrap().takes_value());
    }

    #[test]
    fn test_unknown_completer_fails_eagerly() {
        let config = GrammarConfig::from_toml(
            r#"
name = "app"

[[flags]]
long = "bar"
completer = "nope"
"#,
        )
        .unwrap();
        let err = config.resolve(&PredictorRegistry::new()).unwrap_err();
        assert!(matches!(
            err,
            TabcompError::Grammar(GrammarError::UnknownPredictor { .. })
        ));
    }

    #[test]
    fn test_conflicting_bindings_fail() {
        let config = GrammarConfig::from_toml(
            r#"
name = "app"

[[flags]]
long = "bar"
values = ["a"]
files = "*"
"#,
        )
        .unwrap();
        let err = config.resolve(&PredictorRegistry::new()).unwrap_err();
        assert!(matches!(
            err,
            TabcompError::Grammar(GrammarError::ConflictingPredictor { .. })
        ));
    }

    #[test]
    fn test_positional_gap_fails() {
        let config = GrammarConfig::from_toml(
            r#"
name = "app"

[[positionals]]
index = 1
values = ["a"]
"#,
        )
        .unwrap();
        let err = config.resolve(&PredictorRegistry::new()).unwrap_err();
        assert!(matches!(
            err,
            TabcompError::Grammar(GrammarError::PositionalGap { .. })
        ));
    }

    #[test]
    fn test_invalid_glob_fails() {
        let config = GrammarConfig::from_toml(
            r#"
name = "app"

[[flags]]
long = "input"
files = "a["
"#,
        )
        .unwrap();
        let err = config.resolve(&PredictorRegistry::new()).unwrap_err();
        assert!(matches!(
            err,
            TabcompError::Grammar(GrammarError::InvalidGlob { .. })
        ));
    }

    #[test]
    fn test_duplicate_flag_fails_validation() {
        let config = GrammarConfig::from_toml(
            r#"
name = "app"

[[flags]]
long = "dup"

[[flags]]
long = "dup"
"#,
        )
        .unwrap();
        assert!(config.resolve(&PredictorRegistry::new()).is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = GrammarConfig::from_toml("name = ").unwrap_err();
        assert!(matches!(err, TabcompError::Config(_)));
    }

    #[test]
    fn test_from_file_missing() {
        let err = GrammarConfig::from_file("/no/such/grammar.toml").unwrap_err();
        assert!(matches!(
            err,
            TabcompError::Config(ConfigError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_from_file_unsupported_extension() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("grammar.yaml");
        std::fs::write(&path, "name: app").unwrap();
        let err = GrammarConfig::from_file(&path).unwrap_err();
        assert!(matches!(
            err,
            TabcompError::Config(ConfigError::UnsupportedExtension(_))
        ));
    }
}
