//! Settings for snapshots and queries
//!
//! `defaults/shallow.default.toml` is embedded into the crate so the documented
//! defaults and the runtime defaults never drift apart. Callers layer their own files
//! and overrides on top via [`Loader`] before deserializing into [`Settings`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

const DEFAULT_TOML: &str = include_str!("../defaults/shallow.default.toml");

#[derive(Debug, Error)]
#[error("invalid settings: {0}")]
pub struct SettingsError(#[from] config::ConfigError);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub snapshot: SnapshotConfig,
    pub query: QueryConfig,
}

/// Knobs of the snapshot text format.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SnapshotConfig {
    pub indent: usize,
    pub print_function_name: bool,
    pub escape_strings: bool,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            print_function_name: true,
            escape_strings: true,
        }
    }
}

/// Prop names the explorer's shorthand queries look at.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryConfig {
    pub test_id_attribute: String,
    pub class_name_attribute: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            test_id_attribute: "data-testid".to_string(),
            class_name_attribute: "className".to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            snapshot: SnapshotConfig::default(),
            query: QueryConfig::default(),
        }
    }
}

/// Layers user files and overrides over the built-in defaults.
#[derive(Debug)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a settings file. Missing files are an error at build time.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a settings file if it exists.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, SettingsError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<Settings, SettingsError> {
        Ok(self.builder.build()?.try_deserialize()?)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<Settings, SettingsError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_match_code_defaults() {
        let settings = load_defaults().expect("defaults to deserialize");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn supports_overrides() {
        let settings = Loader::new()
            .set_override("snapshot.print_function_name", false)
            .expect("override to apply")
            .set_override("query.test_id_attribute", "data-qa")
            .expect("override to apply")
            .build()
            .expect("settings to build");
        assert!(!settings.snapshot.print_function_name);
        assert_eq!(settings.query.test_id_attribute, "data-qa");
        assert_eq!(settings.snapshot.indent, 2);
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let settings = Loader::new()
            .with_optional_file("does/not/exist.toml")
            .build()
            .expect("settings to build");
        assert_eq!(settings.query, QueryConfig::default());
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new().with_file("does/not/exist.toml").build();
        assert!(result.is_err());
    }
}
