//! Grammar definitions
//!
//! A grammar is an ordered list of rules for one language, plus the
//! aliases and file extensions it answers to.

use super::rules::Rule;
use super::tokens::Category;

/// Identifier of the built-in fallback grammar
pub const PLAIN_GRAMMAR: &str = "none";

/// An ordered set of lexical rules for one language
#[derive(Debug)]
pub struct Grammar {
    /// Grammar identifier (e.g., "c", "python")
    pub id: String,
    /// Alternative identifiers (e.g., ["py"])
    pub aliases: Vec<String>,
    /// File extensions (e.g., ["c", "h"])
    pub extensions: Vec<String>,
    /// Rules, tried in declared order
    pub rules: Vec<Rule>,
}

impl Grammar {
    /// Create a new empty grammar
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            aliases: Vec::new(),
            extensions: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Grammar that covers any input with a single plain-text token
    pub fn plain() -> Self {
        let mut grammar = Self::new(PLAIN_GRAMMAR);
        grammar.add_alias("text");
        grammar.add_alias("plain");
        grammar.add_extension("txt");
        if let Ok(rule) = Rule::new("everything", r"(?s).+", Category::PlainText) {
            grammar.add_rule(rule);
        }
        grammar
    }

    /// Add an alias
    pub fn add_alias(&mut self, alias: &str) {
        self.aliases.push(alias.to_string());
    }

    /// Add a file extension
    pub fn add_extension(&mut self, ext: &str) {
        self.extensions.push(ext.to_string());
    }

    /// Append a rule; earlier rules win ties
    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Compile and append a rule
    ///
    /// Used by the built-in grammars, whose patterns are known to be valid.
    pub(crate) fn rule(&mut self, name: &str, pattern: &str, category: Category) {
        if let Ok(rule) = Rule::new(name, pattern, category) {
            self.add_rule(rule);
        }
    }

    /// Compile and append a rule whose matches are tokenized by `inside`
    pub(crate) fn nested_rule(&mut self, name: &str, pattern: &str, category: Category, inside: &str) {
        if let Ok(rule) = Rule::new(name, pattern, category) {
            self.add_rule(rule.inside(inside));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_grammar() {
        let grammar = Grammar::plain();
        assert_eq!(grammar.id, PLAIN_GRAMMAR);
        assert_eq!(grammar.rules.len(), 1);
        assert_eq!(grammar.rules[0].find_at("a\nb", 0), Some((0, 3)));
    }

    #[test]
    fn test_rules_keep_declared_order() {
        let mut grammar = Grammar::new("Test");
        grammar.rule("first", r"a", Category::Keyword);
        grammar.rule("second", r"b", Category::Number);
        grammar.nested_rule("third", r"c", Category::String, "none");

        let names: Vec<_> = grammar.rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
        assert_eq!(grammar.rules[2].inside.as_deref(), Some("none"));
    }

    #[test]
    fn test_invalid_builtin_pattern_is_skipped() {
        let mut grammar = Grammar::new("Test");
        grammar.rule("broken", r"[", Category::Keyword);
        assert!(grammar.rules.is_empty());
    }
}
