//! Markup serialization
//!
//! Turns annotated lines into an HTML fragment using the class names of
//! Prism and rehype-prism-plus, so their stylesheets color the output:
//!
//! ```text
//! <code class="language-c code-highlight">
//!   <span class="code-line line-number highlight-line" line="1">
//!     <span class="token keyword">int</span> x<span class="token punctuation">;</span>
//!   </span>
//! </code>
//! ```
//!
//! (Whitespace added for readability; the real output has none.)

use std::fmt::Write;

use crate::lines::LineRecord;
use crate::syntax::Token;

/// Options controlling serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupOptions {
    /// Language id placed in the `language-*` class
    pub language: String,
    /// Number each line
    pub show_line_numbers: bool,
    /// Decorate lines starting with `+`/`-`
    pub diff: bool,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            language: crate::syntax::PLAIN_GRAMMAR.to_string(),
            show_line_numbers: false,
            diff: false,
        }
    }
}

impl MarkupOptions {
    /// The `language-*` class for the code element
    pub fn language_class(&self) -> String {
        if self.diff {
            format!("language-diff-{}", self.language)
        } else {
            format!("language-{}", self.language)
        }
    }
}

/// Escape the five reserved markup characters
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    write_escaped(&mut out, text);
    out
}

/// Append `text` to `out` with reserved characters escaped
pub fn write_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
}

/// Serialize annotated lines into a `<code>` element
pub fn serialize(lines: &[LineRecord<'_>], options: &MarkupOptions) -> String {
    let mut out = String::new();

    out.push_str("<code class=\"");
    write_escaped(&mut out, &options.language_class());
    out.push_str(" code-highlight\">");

    for line in lines {
        write_line(&mut out, line, options);
    }

    out.push_str("</code>");
    out
}

fn write_line(out: &mut String, line: &LineRecord<'_>, options: &MarkupOptions) {
    out.push_str("<span class=\"code-line");
    if options.show_line_numbers {
        out.push_str(" line-number");
    }
    if line.emphasized {
        out.push_str(" highlight-line");
    }
    if let Some(marker) = line.diff {
        out.push(' ');
        out.push_str(marker.markup_class());
    }
    out.push('"');
    if options.show_line_numbers {
        // Writing to a String cannot fail
        let _ = write!(out, " line=\"{}\"", line.number);
    }
    out.push('>');

    for token in &line.tokens {
        write_token(out, token);
    }

    out.push_str("</span>");
}

fn write_token(out: &mut String, token: &Token<'_>) {
    let class = token.category.markup_class();

    if let Some(class) = class {
        out.push_str("<span class=\"token ");
        out.push_str(class);
        out.push_str("\">");
    }

    if token.is_leaf() {
        write_escaped(out, token.text);
    } else {
        for child in &token.children {
            write_token(out, child);
        }
    }

    if class.is_some() {
        out.push_str("</span>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines::{annotate, annotate_with_diff, parse_highlight_spec, HighlightSpec};
    use crate::syntax::GrammarRegistry;

    fn render(source: &str, language: &str, spec: &str, show_line_numbers: bool) -> String {
        let registry = GrammarRegistry::with_builtins();
        let tokens = registry.tokenize(source, language);
        let lines = annotate(&tokens, &parse_highlight_spec(spec).unwrap());
        let options = MarkupOptions {
            language: language.to_string(),
            show_line_numbers,
            diff: false,
        };
        serialize(&lines, &options)
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&#039;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_escape_is_not_idempotent() {
        // Escaping is applied to raw text only, never to markup
        assert_eq!(escape("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_serialize_c_line() {
        let markup = render("int x;", "c", "", false);
        assert_eq!(
            markup,
            "<code class=\"language-c code-highlight\">\
             <span class=\"code-line\">\
             <span class=\"token keyword\">int</span> x<span class=\"token punctuation\">;</span>\
             </span></code>"
        );
    }

    #[test]
    fn test_serialize_line_numbers_and_highlight() {
        let markup = render("a\nb\n", "none", "2", true);
        assert_eq!(
            markup,
            "<code class=\"language-none code-highlight\">\
             <span class=\"code-line line-number\" line=\"1\">a\n</span>\
             <span class=\"code-line line-number highlight-line\" line=\"2\">b\n</span>\
             </code>"
        );
    }

    #[test]
    fn test_serialize_escapes_text() {
        let markup = render("#include <stdio.h>", "c", "", false);
        assert!(markup.contains("<span class=\"token macro\">#include &lt;stdio.h&gt;</span>"));
    }

    #[test]
    fn test_serialize_nested_tokens() {
        let markup = render("printf(\"%d\\n\");", "c", "", false);
        assert!(markup.contains(
            "<span class=\"token string\">&quot;\
             <span class=\"token format-spec\">%d</span>\
             <span class=\"token escape\">\\n</span>&quot;</span>"
        ));
        assert!(markup.contains("<span class=\"token function\">printf</span>"));
    }

    #[test]
    fn test_serialize_empty() {
        let markup = serialize(&[], &MarkupOptions::default());
        assert_eq!(markup, "<code class=\"language-none code-highlight\"></code>");
    }

    #[test]
    fn test_serialize_diff() {
        let registry = GrammarRegistry::with_builtins();
        let tokens = registry.tokenize("+a\n-b\n", "none");
        let lines = annotate_with_diff(&tokens, &HighlightSpec::new(), true);
        let options = MarkupOptions {
            language: "none".to_string(),
            show_line_numbers: false,
            diff: true,
        };

        let markup = serialize(&lines, &options);
        assert!(markup.starts_with("<code class=\"language-diff-none code-highlight\">"));
        assert!(markup.contains("<span class=\"code-line inserted\">+a\n</span>"));
        assert!(markup.contains("<span class=\"code-line deleted\">-b\n</span>"));
    }
}
