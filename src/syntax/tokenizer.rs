//! Lossless tokenizer
//!
//! Scans text left to right, trying a grammar's rules in declared order
//! at each position. Text no rule claims becomes plain text, so the
//! leaves of the result always concatenate back to the input.

use super::grammar::Grammar;
use super::registry::GrammarRegistry;
use super::rules::Rule;
use super::tokens::{Category, Token};

/// Maximum depth of nested grammar tokenization
pub const MAX_NESTING: usize = 16;

/// Tokenizes text, resolving nested grammars through a registry
pub struct Tokenizer<'r> {
    registry: &'r GrammarRegistry,
}

impl<'r> Tokenizer<'r> {
    /// Create a tokenizer backed by `registry`
    pub fn new(registry: &'r GrammarRegistry) -> Self {
        Self { registry }
    }

    /// Tokenize `text` with `grammar`
    pub fn tokenize<'a>(&self, text: &'a str, grammar: &Grammar) -> Vec<Token<'a>> {
        self.tokenize_at_depth(text, grammar, 0)
    }

    fn tokenize_at_depth<'a>(&self, text: &'a str, grammar: &Grammar, depth: usize) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        let mut pos = 0;
        // Start of the pending run of plain text
        let mut plain_from: Option<usize> = None;
        // Per rule: None = not searched yet, Some(None) = no match left in text
        let mut next_match: Vec<Option<Option<(usize, usize)>>> = vec![None; grammar.rules.len()];

        while pos < text.len() {
            let mut matched: Option<(&Rule, usize)> = None;

            for (idx, rule) in grammar.rules.iter().enumerate() {
                let found = match next_match[idx] {
                    Some(Some((start, end))) if start >= pos => Some((start, end)),
                    Some(None) => None,
                    _ => {
                        let found = rule.find_at(text, pos);
                        next_match[idx] = Some(found);
                        found
                    }
                };

                if let Some((start, end)) = found {
                    if start == pos {
                        // First rule in declared order wins
                        matched = Some((rule, end));
                        break;
                    }
                }
            }

            match matched {
                Some((rule, end)) => {
                    let span = &text[pos..end];
                    let children = self.nested(rule, span, depth);

                    if rule.category == Category::PlainText && children.is_empty() {
                        plain_from.get_or_insert(pos);
                    } else {
                        flush_plain(text, &mut plain_from, pos, &mut tokens);
                        tokens.push(Token::with_children(rule.category, span, children));
                    }
                    pos = end;
                }
                None => {
                    // No rule applies: consume one character as plain text
                    plain_from.get_or_insert(pos);
                    pos += text[pos..].chars().next().map_or(1, char::len_utf8);
                }
            }
        }

        flush_plain(text, &mut plain_from, text.len(), &mut tokens);
        tokens
    }

    /// Tokenize a matched span with the rule's nested grammar, if any
    fn nested<'a>(&self, rule: &Rule, span: &'a str, depth: usize) -> Vec<Token<'a>> {
        let Some(inside) = rule.inside.as_deref() else {
            return Vec::new();
        };
        if depth + 1 >= MAX_NESTING {
            return Vec::new();
        }

        let grammar = self.registry.resolve(inside);
        let children = self.tokenize_at_depth(span, grammar, depth + 1);

        // A single plain token adds no structure
        match children.as_slice() {
            [only] if only.category == Category::PlainText && only.is_leaf() => Vec::new(),
            _ => children,
        }
    }
}

fn flush_plain<'a>(text: &'a str, plain_from: &mut Option<usize>, end: usize, tokens: &mut Vec<Token<'a>>) {
    if let Some(start) = plain_from.take() {
        if start < end {
            tokens.push(Token::new(Category::PlainText, &text[start..end]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokens::{leaf_text, leaves};

    fn create_test_registry() -> GrammarRegistry {
        let mut registry = GrammarRegistry::new();

        let mut escapes = Grammar::new("escapes");
        escapes.rule("escape", r"\\.", Category::Escape);
        registry.register(escapes);

        let mut lang = Grammar::new("test");
        lang.rule("line_comment", r"//[^\n]*", Category::Comment);
        lang.nested_rule("string", r#""(?:[^"\\\n]|\\.)*""#, Category::String, "escapes");
        lang.rule("keyword", r"\b(?:let|if)\b", Category::Keyword);
        lang.rule("number", r"\b\d+\b", Category::Number);
        lang.rule("punctuation", r"[;=]", Category::Punctuation);
        registry.register(lang);

        registry
    }

    #[test]
    fn test_empty_input() {
        let registry = create_test_registry();
        assert!(registry.tokenize("", "test").is_empty());
        assert!(registry.tokenize("", "unknown").is_empty());
    }

    #[test]
    fn test_simple_tokenization() {
        let registry = create_test_registry();
        let tokens = registry.tokenize("let x = 42;", "test");

        let summary: Vec<_> = tokens.iter().map(|t| (t.category, t.text)).collect();
        assert_eq!(
            summary,
            vec![
                (Category::Keyword, "let"),
                (Category::PlainText, " x "),
                (Category::Punctuation, "="),
                (Category::PlainText, " "),
                (Category::Number, "42"),
                (Category::Punctuation, ";"),
            ]
        );
    }

    #[test]
    fn test_first_rule_wins() {
        let mut registry = GrammarRegistry::new();
        let mut lang = Grammar::new("order");
        lang.rule("short", r"ab", Category::Keyword);
        lang.rule("long", r"abc", Category::Number);
        registry.register(lang);

        let tokens = registry.tokenize("abc", "order");
        assert_eq!(tokens[0].category, Category::Keyword);
        assert_eq!(tokens[0].text, "ab");
        assert_eq!(tokens[1].text, "c");
    }

    #[test]
    fn test_nested_grammar() {
        let registry = create_test_registry();
        let tokens = registry.tokenize(r#"x = "a\nb";"#, "test");

        let string = tokens.iter().find(|t| t.category == Category::String).unwrap();
        assert_eq!(string.text, r#""a\nb""#);
        let children: Vec<_> = string.children.iter().map(|t| (t.category, t.text)).collect();
        assert_eq!(
            children,
            vec![
                (Category::PlainText, "\"a"),
                (Category::Escape, "\\n"),
                (Category::PlainText, "b\""),
            ]
        );
    }

    #[test]
    fn test_nested_without_structure_is_leaf() {
        let registry = create_test_registry();
        let tokens = registry.tokenize(r#""plain""#, "test");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_leaf());
    }

    #[test]
    fn test_unknown_language_is_single_plain_token() {
        let registry = GrammarRegistry::with_builtins();
        let tokens = registry.tokenize("int x;", "unregistered-lang");
        assert_eq!(tokens, vec![Token::new(Category::PlainText, "int x;")]);
    }

    #[test]
    fn test_multibyte_text_is_lossless() {
        let registry = create_test_registry();
        let text = "let π = \"é\\ü\"; // ünïcödé\n→ 1";
        let tokens = registry.tokenize(text, "test");
        assert_eq!(leaf_text(&tokens), text);
    }

    #[test]
    fn test_self_nesting_terminates() {
        let mut registry = GrammarRegistry::new();
        let mut lang = Grammar::new("loop");
        lang.nested_rule("all", r"(?s).+", Category::String, "loop");
        registry.register(lang);

        let tokens = registry.tokenize("abc", "loop");
        assert_eq!(leaf_text(&tokens), "abc");
        assert_eq!(leaves(&tokens).len(), 1);
    }
}
