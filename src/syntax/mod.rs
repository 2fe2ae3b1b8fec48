//! Grammars and tokenization
//!
//! This module provides the lexical side of code presentation:
//! - Token categories and the token tree
//! - Regex rules grouped into grammars
//! - The grammar registry with built-in languages
//! - The lossless tokenizer

mod builtin;
mod grammar;
mod registry;
mod rules;
mod tokenizer;
mod tokens;

pub use grammar::{Grammar, PLAIN_GRAMMAR};
pub use registry::GrammarRegistry;
pub use rules::Rule;
pub use tokenizer::{Tokenizer, MAX_NESTING};
pub use tokens::{leaf_text, leaves, Category, Token};
