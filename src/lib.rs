//! codeblock - syntax-highlighted, copyable code blocks
//!
//! Takes raw source text plus a little configuration (language, lines to
//! emphasize, line numbers, diff decoration) and produces Prism-compatible
//! HTML alongside an untouched copy of the source for the clipboard.
//!
//! ```text
//! source + language ─► Tokenizer ─► Token tree ─► annotate ─► LineRecords
//!                       (Grammar                              │
//!                        Registry)          serialize ◄───────┘
//!                                               │
//!                                               ▼
//!                                  CodeBlockShell (filename, copy control)
//! ```

pub mod config;
pub mod error;
pub mod lines;
pub mod markup;
pub mod render;
pub mod shell;
pub mod syntax;

pub use error::{ClipboardError, CodeblockError, Result};
pub use lines::{annotate, parse_highlight_spec, HighlightSpec, HighlightSpecError, LineRecord};
pub use markup::{serialize, MarkupOptions};
pub use render::{render, render_block, RenderOptions, RenderResult};
pub use shell::{CodeBlockShell, CopyButton, CopyState};
pub use syntax::{Category, Grammar, GrammarRegistry, Token, Tokenizer};
