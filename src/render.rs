//! Render pipeline
//!
//! Chains grammar lookup, tokenization, line annotation and markup
//! serialization. Rendering is a pure function of its inputs.

use tracing::trace;

use crate::error::Result;
use crate::lines::{annotate_with_diff, parse_highlight_spec};
use crate::markup::{serialize, MarkupOptions};
use crate::shell::CodeBlockShell;
use crate::syntax::{GrammarRegistry, Tokenizer, PLAIN_GRAMMAR};

/// Prefix of language ids that turn on diff decoration
pub const DIFF_PREFIX: &str = "diff-";

/// Per-block rendering options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Language id or alias; `diff-LANG` enables diff decoration
    pub language: String,
    /// Highlight spec such as `"1,4-6"`
    pub highlight_lines: Option<String>,
    /// Number each line
    pub show_line_numbers: bool,
    /// Decorate lines starting with `+`/`-`
    pub diff: bool,
    /// Filename shown above the block
    pub file_name: Option<String>,
    /// Show a copy-to-clipboard control
    pub copyable: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            language: PLAIN_GRAMMAR.to_string(),
            highlight_lines: None,
            show_line_numbers: false,
            diff: false,
            file_name: None,
            copyable: true,
        }
    }
}

impl RenderOptions {
    /// Options for `language` with everything else at defaults
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
            ..Default::default()
        }
    }

    /// Builder: set the highlight spec
    pub fn with_highlight(mut self, spec: &str) -> Self {
        self.highlight_lines = Some(spec.to_string());
        self
    }

    /// Builder: set line numbering
    pub fn with_line_numbers(mut self, show: bool) -> Self {
        self.show_line_numbers = show;
        self
    }

    /// Builder: set diff decoration
    pub fn with_diff(mut self, diff: bool) -> Self {
        self.diff = diff;
        self
    }

    /// Builder: set the filename header
    pub fn with_file_name(mut self, name: &str) -> Self {
        self.file_name = Some(name.to_string());
        self
    }

    /// Builder: set whether the block gets a copy control
    pub fn with_copyable(mut self, copyable: bool) -> Self {
        self.copyable = copyable;
        self
    }

    /// Language to highlight with, and whether diff decoration is on
    pub fn effective_language(&self) -> (&str, bool) {
        match self.language.strip_prefix(DIFF_PREFIX) {
            Some(rest) if !rest.is_empty() => (rest, true),
            _ => (self.language.as_str(), self.diff),
        }
    }
}

/// Markup for one block, and the untouched source it decorates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    /// Serialized `<code>` element
    pub markup: String,
    /// The original source, byte for byte
    pub source: String,
    /// `language-*` class for the enclosing `<pre>`
    pub language_class: String,
}

/// Render `source` to highlighted markup
///
/// Fails only when the highlight spec is malformed; unknown languages
/// render as plain text.
pub fn render(source: &str, options: &RenderOptions, registry: &GrammarRegistry) -> Result<RenderResult> {
    let spec = parse_highlight_spec(options.highlight_lines.as_deref().unwrap_or(""))?;
    let (language, diff) = options.effective_language();

    let grammar = registry.resolve(language);
    let tokens = Tokenizer::new(registry).tokenize(source, grammar);
    let lines = annotate_with_diff(&tokens, &spec, diff);

    let markup_options = MarkupOptions {
        language: language.to_string(),
        show_line_numbers: options.show_line_numbers,
        diff,
    };
    let markup = serialize(&lines, &markup_options);

    trace!(
        language = language,
        grammar = %grammar.id,
        tokens = tokens.len(),
        lines = lines.len(),
        "rendered code block"
    );

    Ok(RenderResult {
        markup,
        source: source.to_string(),
        language_class: markup_options.language_class(),
    })
}

/// Render `source` with its filename header and copy control
pub fn render_block(source: &str, options: &RenderOptions, registry: &GrammarRegistry) -> Result<String> {
    let result = render(source, options, registry)?;
    let shell = CodeBlockShell::new(result, options.file_name.clone(), options.copyable);
    Ok(shell.to_html())
}
