//! Grammar registry
//!
//! This module provides the GrammarRegistry that maps language ids,
//! aliases and file extensions to grammars.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use tracing::debug;

use super::builtin;
use super::grammar::Grammar;
use super::tokenizer::Tokenizer;
use super::tokens::Token;

static GLOBAL: Lazy<GrammarRegistry> = Lazy::new(GrammarRegistry::with_builtins);

/// Read-only (after initialization) table of grammars
pub struct GrammarRegistry {
    /// Grammars by id
    grammars: HashMap<String, Grammar>,
    /// Lowercased id or alias to grammar id
    names: HashMap<String, String>,
    /// Lowercased extension to grammar id
    extension_map: HashMap<String, String>,
    /// Returned for unknown ids
    fallback: Grammar,
}

impl GrammarRegistry {
    /// Create a registry holding only the plain-text grammar
    pub fn new() -> Self {
        let mut registry = Self {
            grammars: HashMap::new(),
            names: HashMap::new(),
            extension_map: HashMap::new(),
            fallback: Grammar::plain(),
        };
        registry.register(Grammar::plain());
        registry
    }

    /// Create a registry with the built-in grammars
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for grammar in builtin::all_grammars() {
            registry.register(grammar);
        }
        registry
    }

    /// Process-wide registry with the built-in grammars
    pub fn global() -> &'static GrammarRegistry {
        &GLOBAL
    }

    /// Add or replace a grammar
    pub fn register(&mut self, grammar: Grammar) {
        let id = grammar.id.clone();
        debug!(grammar = %id, rules = grammar.rules.len(), "registering grammar");

        // Ids are case-insensitive: "C" replaces "c"
        let key = id.to_lowercase();
        let old_id = self.grammars.keys().find(|k| k.to_lowercase() == key).cloned();
        if let Some(old_id) = old_id {
            self.grammars.remove(&old_id);
            self.names.retain(|_, target| *target != old_id);
            self.extension_map.retain(|_, target| *target != old_id);
        }

        self.names.insert(key, id.clone());
        for alias in &grammar.aliases {
            self.names.insert(alias.to_lowercase(), id.clone());
        }
        for ext in &grammar.extensions {
            self.extension_map.insert(ext.to_lowercase(), id.clone());
        }
        self.grammars.insert(id, grammar);
    }

    /// Look up a grammar by id or alias
    pub fn get(&self, name: &str) -> Option<&Grammar> {
        self.names
            .get(&name.to_lowercase())
            .and_then(|id| self.grammars.get(id))
    }

    /// Look up a grammar, falling back to plain text for unknown names
    pub fn resolve(&self, name: &str) -> &Grammar {
        match self.get(name) {
            Some(grammar) => grammar,
            None => {
                debug!(language = name, "unknown language, rendering as plain text");
                &self.fallback
            }
        }
    }

    /// Detect grammar id from a filename's extension
    pub fn detect(&self, filename: &Path) -> Option<&str> {
        let ext = filename.extension()?.to_str()?.to_lowercase();
        self.extension_map.get(&ext).map(|s| s.as_str())
    }

    /// List registered grammar ids
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.grammars.keys().map(|s| s.as_str()).collect();
        ids.sort();
        ids
    }

    /// Tokenize text with the grammar registered under `name`
    pub fn tokenize<'a>(&self, text: &'a str, name: &str) -> Vec<Token<'a>> {
        Tokenizer::new(self).tokenize(text, self.resolve(name))
    }
}

impl Default for GrammarRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GrammarRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrammarRegistry")
            .field("grammars", &self.ids())
            .finish()
    }
}
