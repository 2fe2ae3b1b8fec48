//! Configuration file support
//!
//! Loads render defaults and extra grammars from a TOML file.
//!
//! Example:
//! ```text
//! # codeblock configuration
//! [render]
//! show-line-numbers = true
//! copyable = true
//! language = "none"
//!
//! [[grammar]]
//! id = "ini"
//! aliases = ["cfg"]
//! extensions = ["ini"]
//!
//! [[grammar.rule]]
//! name = "comment"
//! pattern = ";.*"
//! category = "comment"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{CodeblockError, Result};
use crate::render::RenderOptions;
use crate::syntax::{Category, Grammar, GrammarRegistry, Rule, PLAIN_GRAMMAR};

/// Configuration settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Defaults applied to every rendered block
    pub render: RenderDefaults,
    /// User-defined grammars
    #[serde(rename = "grammar")]
    pub grammars: Vec<GrammarConfig>,
}

/// Render defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RenderDefaults {
    /// Whether to number lines
    pub show_line_numbers: bool,
    /// Whether blocks get a copy control
    pub copyable: bool,
    /// Language used when none is given or detected
    pub language: String,
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            show_line_numbers: false,
            copyable: true,
            language: PLAIN_GRAMMAR.to_string(),
        }
    }
}

/// A grammar as written in the config file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrammarConfig {
    pub id: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default, rename = "rule")]
    pub rules: Vec<RuleConfig>,
}

/// A rule as written in the config file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub name: String,
    pub pattern: String,
    pub category: String,
    /// Nested grammar id for the matched span
    pub inside: Option<String>,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::parse(&contents)?;
        debug!(path = %path.display(), grammars = config.grammars.len(), "loaded config");
        Ok(config)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Compile the configured grammars into `registry`
    ///
    /// Fails on the first invalid pattern or category; nothing is
    /// registered in that case.
    pub fn apply_to(&self, registry: &mut GrammarRegistry) -> Result<()> {
        let grammars = self
            .grammars
            .iter()
            .map(GrammarConfig::build)
            .collect::<Result<Vec<_>>>()?;
        for grammar in grammars {
            registry.register(grammar);
        }
        Ok(())
    }

    /// Render options for `language` seeded from the defaults
    pub fn render_options(&self, language: Option<&str>) -> RenderOptions {
        RenderOptions {
            language: language.unwrap_or(&self.render.language).to_string(),
            show_line_numbers: self.render.show_line_numbers,
            copyable: self.render.copyable,
            ..Default::default()
        }
    }
}

impl GrammarConfig {
    /// Compile into a grammar
    pub fn build(&self) -> Result<Grammar> {
        let mut grammar = Grammar::new(&self.id);
        for alias in &self.aliases {
            grammar.add_alias(alias);
        }
        for ext in &self.extensions {
            grammar.add_extension(ext);
        }

        for rule in &self.rules {
            let category = Category::from_name(&rule.category).ok_or_else(|| CodeblockError::UnknownCategory {
                grammar: self.id.clone(),
                rule: rule.name.clone(),
                name: rule.category.clone(),
            })?;
            let mut compiled =
                Rule::new(&rule.name, &rule.pattern, category).map_err(|source| CodeblockError::InvalidPattern {
                    grammar: self.id.clone(),
                    rule: rule.name.clone(),
                    source,
                })?;
            if let Some(inside) = &rule.inside {
                compiled = compiled.inside(inside);
            }
            grammar.add_rule(compiled);
        }

        Ok(grammar)
    }
}
