//! Python language grammar

use crate::syntax::grammar::Grammar;
use crate::syntax::tokens::Category;

/// Create Python grammar
pub fn python_grammar() -> Grammar {
    let mut grammar = Grammar::new("python");
    grammar.add_alias("py");
    grammar.add_extension("py");
    grammar.add_extension("pyw");
    grammar.add_extension("pyi");

    // Comments
    grammar.rule("comment", r"#[^\n]*", Category::Comment);

    // f-strings (triple-quoted first)
    grammar.nested_rule("fstring_triple_double", r#"(?i:fr|rf|f)"""[\s\S]*?(?:"""|\z)"#, Category::String, "python-fstring");
    grammar.nested_rule("fstring_triple_single", r"(?i:fr|rf|f)'''[\s\S]*?(?:'''|\z)", Category::String, "python-fstring");
    grammar.nested_rule("fstring_double", r#"(?i:fr|rf|f)"(?:[^"\\\n]|\\.)*""#, Category::String, "python-fstring");
    grammar.nested_rule("fstring_single", r"(?i:fr|rf|f)'(?:[^'\\\n]|\\.)*'", Category::String, "python-fstring");

    // Other strings (triple-quoted docstrings first)
    grammar.nested_rule("triple_double", r#"(?i:br|rb|[rbu])?"""[\s\S]*?(?:"""|\z)"#, Category::String, "python-string");
    grammar.nested_rule("triple_single", r"(?i:br|rb|[rbu])?'''[\s\S]*?(?:'''|\z)", Category::String, "python-string");
    grammar.nested_rule("double_string", r#"(?i:br|rb|[rbu])?"(?:[^"\\\n]|\\.)*""#, Category::String, "python-string");
    grammar.nested_rule("single_string", r"(?i:br|rb|[rbu])?'(?:[^'\\\n]|\\.)*'", Category::String, "python-string");

    // Decorators
    grammar.rule("decorator", r"@[A-Za-z_][\w.]*", Category::Attribute);

    // class Name: keyword plus the class name
    grammar.nested_rule("class_def", r"\bclass[ \t]+[A-Za-z_]\w*", Category::PlainText, "python-class-def");

    grammar.rule("boolean", r"\b(?:True|False)\b", Category::Boolean);
    grammar.rule("constant", r"\b(?:None|NotImplemented|Ellipsis)\b", Category::Constant);

    // Keywords
    let keywords = r"\b(?:and|as|assert|async|await|break|class|continue|def|del|elif|else|except|finally|for|from|global|if|import|in|is|lambda|nonlocal|not|or|pass|raise|return|try|while|with|yield|match|case)\b";
    grammar.rule("keyword", keywords, Category::Keyword);

    // Built-in functions and exceptions
    let builtins = r"\b(?:abs|all|any|ascii|bin|bool|bytearray|bytes|callable|chr|classmethod|compile|complex|delattr|dict|dir|divmod|enumerate|eval|exec|filter|float|format|frozenset|getattr|globals|hasattr|hash|help|hex|id|input|int|isinstance|issubclass|iter|len|list|locals|map|max|memoryview|min|next|object|oct|open|ord|pow|print|property|range|repr|reversed|round|set|setattr|slice|sorted|staticmethod|str|sum|super|tuple|type|vars|zip|Exception|ValueError|TypeError|KeyError|IndexError|ZeroDivisionError|FileNotFoundError|RuntimeError|AttributeError|NotImplementedError|StopIteration)\b";
    grammar.rule("builtin", builtins, Category::Builtin);

    // Function calls and definitions
    grammar.nested_rule("call", r"\b[A-Za-z_]\w*[ \t]*\(", Category::PlainText, "python-call");

    // Numbers
    grammar.rule("hex", r"\b0[xX][0-9a-fA-F_]+\b", Category::Number);
    grammar.rule("binary", r"\b0[bB][01_]+\b", Category::Number);
    grammar.rule("octal", r"\b0[oO][0-7_]+\b", Category::Number);
    grammar.rule("float", r"\b\d[\d_]*\.\d[\d_]*(?:[eE][+-]?\d+)?j?\b", Category::Number);
    grammar.rule("integer", r"\b\d[\d_]*j?\b", Category::Number);

    // Operators and punctuation
    grammar.rule("operator", r"[+\-*/%&|^!<>=@~]+", Category::Operator);
    grammar.rule("punctuation", r"[{}\[\]();:,.]", Category::Punctuation);

    grammar
}

/// Interior of ordinary string literals
pub fn python_string_grammar() -> Grammar {
    let mut grammar = Grammar::new("python-string");

    grammar.rule(
        "escape",
        r"\\(?:N\{[^}\n]*\}|u[0-9a-fA-F]{4}|U[0-9a-fA-F]{8}|x[0-9a-fA-F]{2}|[0-7]{1,3}|[\s\S])",
        Category::Escape,
    );
    grammar.rule(
        "format",
        r"%(?:\([^)\n]*\))?[-+ #0]*\d*(?:\.\d+)?[diouxXeEfFgGcrsa%]",
        Category::FormatSpecifier,
    );

    grammar
}

/// Interior of f-strings: replacement fields are tokenized as Python
pub fn python_fstring_grammar() -> Grammar {
    let mut grammar = Grammar::new("python-fstring");

    grammar.rule("escape", r"\\[\s\S]", Category::Escape);
    grammar.rule("brace_escape", r"\{\{|\}\}", Category::Escape);
    grammar.nested_rule("interpolation", r"\{[^{}\n]*\}", Category::Interpolation, "python");

    grammar
}

/// Splits `class Name` into the keyword and a type name
pub fn python_class_def_grammar() -> Grammar {
    let mut grammar = Grammar::new("python-class-def");

    grammar.rule("keyword", r"\bclass\b", Category::Keyword);
    grammar.rule("name", r"[A-Za-z_]\w*", Category::Type);

    grammar
}

/// Splits `name(` into a function name and its paren
pub fn python_call_grammar() -> Grammar {
    let mut grammar = Grammar::new("python-call");

    grammar.rule("function", r"[A-Za-z_]\w*", Category::Function);
    grammar.rule("paren", r"\(", Category::Punctuation);

    grammar
}
