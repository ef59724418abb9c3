//! Generator configuration.
//!
//! The CLI takes no flags; the few knobs that exist come from the
//! environment so build scripts can redirect the output.

use crate::cldr::DraftLevel;
use std::env;
use std::path::PathBuf;

/// Environment variable overriding the output path
pub const OUTPUT_ENV: &str = "COUNTRY_GEN_OUTPUT";

/// Environment variable overriding the display-name locale
pub const LOCALE_ENV: &str = "COUNTRY_GEN_LOCALE";

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Locale whose territory names become the country names
    pub locale: String,
    /// Where the generated source file is written
    pub output: PathBuf,
    /// Least confident draft level still accepted from the archive
    pub draft_level: DraftLevel,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            locale: "en".to_string(),
            output: PathBuf::from("countries.rs"),
            draft_level: DraftLevel::Contributed,
        }
    }
}

impl GeneratorConfig {
    /// Defaults, with `COUNTRY_GEN_OUTPUT` / `COUNTRY_GEN_LOCALE` applied
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = GeneratorConfig::default();

        if let Some(output) = lookup(OUTPUT_ENV).filter(|v| !v.is_empty()) {
            config.output = PathBuf::from(output);
        }
        if let Some(locale) = lookup(LOCALE_ENV).filter(|v| !v.is_empty()) {
            config.locale = locale;
        }

        config
    }

    /// Builder pattern: set output path
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }
}
