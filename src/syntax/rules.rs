//! Pattern rules for syntax highlighting
//!
//! A rule matches a regex pattern at the current scan position and
//! assigns a category to the match, optionally handing the matched
//! span to a nested grammar for further structure.

use regex::Regex;

use super::tokens::Category;

/// A single lexical rule
pub struct Rule {
    /// Name for debugging and error messages
    pub name: String,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Category to assign to matches
    pub category: Category,
    /// Grammar used to tokenize the matched span, if any
    pub inside: Option<String>,
}

impl Rule {
    /// Create a new rule
    pub fn new(name: &str, pattern: &str, category: Category) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.to_string(),
            pattern: Regex::new(pattern)?,
            category,
            inside: None,
        })
    }

    /// Builder: tokenize matches with a nested grammar
    pub fn inside(mut self, grammar: &str) -> Self {
        self.inside = Some(grammar.to_string());
        self
    }

    /// Find the first non-empty match in text at or after `start`
    ///
    /// Searching the whole text (rather than a slice) keeps `\b` and `^`
    /// assertions aware of the characters before `start`.
    pub fn find_at(&self, text: &str, start: usize) -> Option<(usize, usize)> {
        let mut from = start;
        while from < text.len() {
            let m = self.pattern.find_at(text, from)?;
            if m.end() > m.start() {
                return Some((m.start(), m.end()));
            }
            // Empty match: look again one character later
            from = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
        }
        None
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("category", &self.category)
            .field("inside", &self.inside)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_at() {
        let rule = Rule::new("number", r"\d+", Category::Number).unwrap();
        assert_eq!(rule.find_at("abc 123 def", 0), Some((4, 7)));
        assert_eq!(rule.find_at("abc 123 def", 5), Some((5, 7)));
        assert_eq!(rule.find_at("no numbers", 0), None);
        assert_eq!(rule.find_at("123", 3), None);
    }

    #[test]
    fn test_find_at_keeps_word_boundary_context() {
        let rule = Rule::new("keyword", r"\bint\b", Category::Keyword).unwrap();
        // "int" inside "print" must not match even when searching from its start
        assert_eq!(rule.find_at("print", 2), None);
        assert_eq!(rule.find_at("x int", 1), Some((2, 5)));
    }

    #[test]
    fn test_find_at_skips_empty_matches() {
        let rule = Rule::new("maybe", r"a*", Category::Keyword).unwrap();
        assert_eq!(rule.find_at("bbaa", 0), Some((2, 4)));
        assert_eq!(rule.find_at("bb", 0), None);
    }

    #[test]
    fn test_inside_builder() {
        let rule = Rule::new("string", r#""[^"]*""#, Category::String)
            .unwrap()
            .inside("c-string");
        assert_eq!(rule.inside.as_deref(), Some("c-string"));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(Rule::new("bad", r"(", Category::Keyword).is_err());
    }
}
