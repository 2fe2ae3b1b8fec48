//! Bash/shell grammar

use crate::syntax::grammar::Grammar;
use crate::syntax::tokens::Category;

/// Create Bash grammar
pub fn bash_grammar() -> Grammar {
    let mut grammar = Grammar::new("bash");
    grammar.add_alias("sh");
    grammar.add_alias("shell");
    grammar.add_alias("zsh");
    grammar.add_extension("sh");
    grammar.add_extension("bash");

    // Variables come before comments so `$#` is not a comment
    grammar.rule(
        "variable",
        r"\$(?:\{[^}\n]*\}|[A-Za-z_]\w*|[0-9@#?$!*-])",
        Category::Variable,
    );
    grammar.rule("comment", r"#[^\n]*", Category::Comment);

    // Strings
    grammar.nested_rule("double_string", r#""(?:[^"\\]|\\[\s\S])*""#, Category::String, "bash-string");
    grammar.rule("single_string", r"'[^']*'", Category::String);

    // Keywords
    let keywords = r"\b(?:if|then|else|elif|fi|for|while|until|do|done|case|esac|in|function|select|return|break|continue|local|export|readonly|declare)\b";
    grammar.rule("keyword", keywords, Category::Keyword);

    // Common commands
    let builtins = r"\b(?:echo|cd|ls|pwd|mkdir|rmdir|rm|cp|mv|cat|less|more|grep|find|chmod|chown|touch|man|ssh|scp|exit|source|alias|printf|read|test|which|head|tail|sort|uniq|wc|sudo|git|python3|python|gcc|make|vim|nano|tar|clear|history|kill|ps|top|diff|valgrind|gdb)\b";
    grammar.rule("builtin", builtins, Category::Builtin);

    grammar.rule("number", r"\b\d+\b", Category::Number);

    // Operators and punctuation
    grammar.rule("operator", r"&&|\|\||>>|[|&<>=!]", Category::Operator);
    grammar.rule("punctuation", r"[{}\[\]();]", Category::Punctuation);

    grammar
}

/// Interior of double-quoted strings
pub fn bash_string_grammar() -> Grammar {
    let mut grammar = Grammar::new("bash-string");

    grammar.rule(
        "variable",
        r"\$(?:\{[^}\n]*\}|[A-Za-z_]\w*|[0-9@#?$!*-])",
        Category::Variable,
    );
    grammar.rule("escape", r#"\\[\s\S]"#, Category::Escape);

    grammar
}
