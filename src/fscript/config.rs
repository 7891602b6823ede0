//! Compiler options and their loader.
//!
//! `defaults/fscript.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files and
//! command line overrides on top of those defaults via [`Loader`] before
//! deserializing into [`CompilerOptions`].
//!
//! Library callers that don't need files can use [`CompilerOptions::default`],
//! which mirrors the embedded defaults.

use crate::fscript::error::{Error, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/fscript.default.toml");

/// What one indentation unit is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentKind {
    #[default]
    Space,
    Tab,
}

impl fmt::Display for IndentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndentKind::Space => f.write_str("space"),
            IndentKind::Tab => f.write_str("tab"),
        }
    }
}

/// Options fixed for one lexer and AST builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerOptions {
    pub indent_size: usize,
    pub indent_kind: IndentKind,
    pub max_depth: usize,
}

impl CompilerOptions {
    /// The exact text of one indentation unit.
    pub fn indent_unit(&self) -> String {
        match self.indent_kind {
            IndentKind::Space => " ".repeat(self.indent_size),
            IndentKind::Tab => "\t".to_string(),
        }
    }

    fn validate(self) -> Result<Self> {
        if self.indent_size == 0 {
            return Err(Error::InvalidConfig(
                "indent_size must be a positive integer".to_string(),
            ));
        }
        if self.max_depth == 0 {
            return Err(Error::InvalidConfig(
                "max_depth must be a positive integer".to_string(),
            ));
        }
        Ok(self)
    }
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            indent_size: 2,
            indent_kind: IndentKind::Space,
            max_depth: 64,
        }
    }
}

/// Layers option files and overrides over the embedded fscript defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// A loader holding only `defaults/fscript.default.toml`.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a TOML options file; `build` fails if it does not exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a TOML options file that may be absent, such as a project `fscript.toml`.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Override one option by key, e.g. `indent_size` from `--indent-size`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge every layer into [`CompilerOptions`], rejecting zero sizes.
    pub fn build(self) -> Result<CompilerOptions> {
        let options: CompilerOptions = self.builder.build()?.try_deserialize()?;
        options.validate()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults, deserialized and validated.
pub fn load_defaults() -> Result<CompilerOptions> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let options = load_defaults().expect("defaults to deserialize");
        assert_eq!(options, CompilerOptions::default());
        assert_eq!(options.indent_unit(), "  ");
    }

    #[test]
    fn supports_overrides() {
        let options = Loader::new()
            .set_override("indent_kind", "tab")
            .expect("override to apply")
            .set_override("indent_size", 4i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(options.indent_kind, IndentKind::Tab);
        assert_eq!(options.indent_size, 4);
        assert_eq!(options.indent_unit(), "\t");
    }

    #[test]
    fn rejects_zero_indent_size() {
        let result = Loader::new()
            .set_override("indent_size", 0i64)
            .expect("override to apply")
            .build();
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_unknown_indent_kind() {
        let result = Loader::new()
            .set_override("indent_kind", "spaces")
            .expect("override to apply")
            .build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let options = Loader::new()
            .with_optional_file("/definitely/not/here/fscript.toml")
            .build()
            .expect("config to build");
        assert_eq!(options.max_depth, 64);
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new()
            .with_file("/definitely/not/here/fscript.toml")
            .build();
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
