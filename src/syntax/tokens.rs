//! Token categories and the token tree
//!
//! This module defines the lexical categories a grammar can assign and
//! the [`Token`] node produced by the tokenizer.

/// Lexical categories for syntax highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Source code comments (// or # ...)
    Comment,
    /// String literals ("..." or '...')
    String,
    /// Character literals
    Char,
    /// Numeric literals (integers, floats)
    Number,
    /// Language keywords (if, else, def, etc.)
    Keyword,
    /// Identifiers a grammar chooses to tag
    Identifier,
    /// Type names (size_t, FILE, etc.)
    Type,
    /// Function names at call or definition sites
    Function,
    /// Built-in functions and shell commands
    Builtin,
    /// Boolean literals
    Boolean,
    /// Constants (NULL, None, etc.)
    Constant,
    /// Operators (+, -, *, /, etc.)
    Operator,
    /// Punctuation (, ; : { } etc.)
    Punctuation,
    /// Preprocessor directives (#include, #define)
    Preprocessor,
    /// Attributes and decorators (@property)
    Attribute,
    /// Variables ($HOME)
    Variable,
    /// Escape sequences inside strings
    Escape,
    /// Embedded expressions ({x} inside f-strings)
    Interpolation,
    /// printf-style format specifiers (%d, %.2f)
    FormatSpecifier,
    /// Plain text (no special highlighting)
    PlainText,
}

impl Category {
    /// Get the lowercase name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Category::Comment => "comment",
            Category::String => "string",
            Category::Char => "char",
            Category::Number => "number",
            Category::Keyword => "keyword",
            Category::Identifier => "identifier",
            Category::Type => "type",
            Category::Function => "function",
            Category::Builtin => "builtin",
            Category::Boolean => "boolean",
            Category::Constant => "constant",
            Category::Operator => "operator",
            Category::Punctuation => "punctuation",
            Category::Preprocessor => "preprocessor",
            Category::Attribute => "attribute",
            Category::Variable => "variable",
            Category::Escape => "escape",
            Category::Interpolation => "interpolation",
            Category::FormatSpecifier => "format-specifier",
            Category::PlainText => "plain",
        }
    }

    /// Parse a category from its name (for TOML loading)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "comment" => Some(Category::Comment),
            "string" => Some(Category::String),
            "char" => Some(Category::Char),
            "number" => Some(Category::Number),
            "keyword" => Some(Category::Keyword),
            "identifier" => Some(Category::Identifier),
            "type" => Some(Category::Type),
            "function" => Some(Category::Function),
            "builtin" => Some(Category::Builtin),
            "boolean" => Some(Category::Boolean),
            "constant" => Some(Category::Constant),
            "operator" => Some(Category::Operator),
            "punctuation" => Some(Category::Punctuation),
            "preprocessor" => Some(Category::Preprocessor),
            "attribute" => Some(Category::Attribute),
            "variable" => Some(Category::Variable),
            "escape" => Some(Category::Escape),
            "interpolation" => Some(Category::Interpolation),
            "format-specifier" => Some(Category::FormatSpecifier),
            "plain" => Some(Category::PlainText),
            _ => None,
        }
    }

    /// Class attached to the markup element for this category
    ///
    /// These follow Prism's class names so existing Prism themes color the
    /// output. Plain text has no class and is emitted without an element.
    pub fn markup_class(&self) -> Option<&'static str> {
        match self {
            Category::Type => Some("class-name"),
            Category::Preprocessor => Some("macro"),
            Category::Attribute => Some("decorator"),
            Category::FormatSpecifier => Some("format-spec"),
            Category::PlainText => None,
            other => Some(other.name()),
        }
    }
}

/// A classified, lossless unit of source text
///
/// When `children` is non-empty their texts concatenate to exactly `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// Lexical category of the whole span
    pub category: Category,
    /// Exact substring of the input covered by this token
    pub text: &'a str,
    /// Nested categorization of `text`, in order
    pub children: Vec<Token<'a>>,
}

impl<'a> Token<'a> {
    /// Create a token without children
    pub fn new(category: Category, text: &'a str) -> Self {
        Self {
            category,
            text,
            children: Vec::new(),
        }
    }

    /// Create a token with nested children
    pub fn with_children(category: Category, text: &'a str, children: Vec<Token<'a>>) -> Self {
        Self {
            category,
            text,
            children,
        }
    }

    /// Check if this token has no nested tokens
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Append the leaves of this token, in order, to `out`
    pub fn collect_leaves<'t>(&'t self, out: &mut Vec<&'t Token<'a>>) {
        if self.is_leaf() {
            out.push(self);
        } else {
            for child in &self.children {
                child.collect_leaves(out);
            }
        }
    }
}

/// Leaves of a token forest, in order
pub fn leaves<'t, 'a>(tokens: &'t [Token<'a>]) -> Vec<&'t Token<'a>> {
    let mut out = Vec::new();
    for token in tokens {
        token.collect_leaves(&mut out);
    }
    out
}

/// Concatenate the leaf texts of a token forest
pub fn leaf_text(tokens: &[Token<'_>]) -> String {
    leaves(tokens).iter().map(|t| t.text).collect()
}
