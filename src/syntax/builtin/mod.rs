//! Built-in grammars
//!
//! This module provides grammars for the languages used in the lecture
//! notes, plus the helper grammars they nest into.

mod bash;
mod c;
mod python;

use super::grammar::Grammar;

/// Get all built-in grammars
///
/// The plain-text grammar is registered by every registry and is not
/// listed here.
pub fn all_grammars() -> Vec<Grammar> {
    vec![
        c::c_grammar(),
        c::c_string_grammar(),
        c::c_call_grammar(),
        python::python_grammar(),
        python::python_string_grammar(),
        python::python_fstring_grammar(),
        python::python_class_def_grammar(),
        python::python_call_grammar(),
        bash::bash_grammar(),
        bash::bash_string_grammar(),
    ]
}
