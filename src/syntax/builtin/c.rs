//! C language grammar

use crate::syntax::grammar::Grammar;
use crate::syntax::tokens::Category;

/// Create C grammar
pub fn c_grammar() -> Grammar {
    let mut grammar = Grammar::new("c");
    grammar.add_alias("h");
    grammar.add_extension("c");
    grammar.add_extension("h");

    // Comments
    grammar.rule("block_comment", r"/\*[\s\S]*?(?:\*/|\z)", Category::Comment);
    grammar.rule("line_comment", r"//[^\n]*", Category::Comment);

    // Preprocessor: whole #include line, otherwise just the directive
    grammar.rule(
        "include",
        r#"(?m)^[ \t]*#[ \t]*include\b[ \t]*(?:<[^>\n]*>|"[^"\n]*")"#,
        Category::Preprocessor,
    );
    grammar.rule("directive", r"(?m)^[ \t]*#[ \t]*\w+", Category::Preprocessor);

    // Literals
    grammar.nested_rule("string", r#""(?:[^"\\\n]|\\.)*""#, Category::String, "c-string");
    grammar.rule("char", r"'(?:[^'\\\n]|\\.)+'", Category::Char);

    // Keywords
    let keywords = r"\b(?:auto|break|case|char|const|continue|default|do|double|else|enum|extern|float|for|goto|if|inline|int|long|register|restrict|return|short|signed|sizeof|static|struct|switch|typedef|union|unsigned|void|volatile|while|_Alignas|_Alignof|_Atomic|_Bool|_Complex|_Generic|_Imaginary|_Noreturn|_Static_assert|_Thread_local)\b";
    grammar.rule("keyword", keywords, Category::Keyword);

    // Type names (standard types)
    let types = r"\b(?:size_t|ssize_t|ptrdiff_t|intptr_t|uintptr_t|int8_t|int16_t|int32_t|int64_t|uint8_t|uint16_t|uint32_t|uint64_t|bool|FILE)\b";
    grammar.rule("type", types, Category::Type);

    grammar.rule("boolean", r"\b(?:true|false)\b", Category::Boolean);
    grammar.rule("constant", r"\b(?:NULL|EOF|stdin|stdout|stderr|EXIT_SUCCESS|EXIT_FAILURE)\b", Category::Constant);

    // Function calls and definitions: name followed by an opening paren
    grammar.nested_rule("call", r"\b[A-Za-z_]\w*[ \t]*\(", Category::PlainText, "c-call");

    // Numbers
    grammar.rule("hex", r"\b0[xX][0-9a-fA-F]+[uUlL]*\b", Category::Number);
    grammar.rule("float", r"\b\d+\.\d*(?:[eE][+-]?\d+)?[fFlL]?", Category::Number);
    grammar.rule("float2", r"\.\d+(?:[eE][+-]?\d+)?[fFlL]?\b", Category::Number);
    grammar.rule("integer", r"\b\d+[uUlL]*\b", Category::Number);

    // Operators and punctuation
    grammar.rule("operator", r"->|[+\-*/%&|^!<>=~?:]+", Category::Operator);
    grammar.rule("punctuation", r"[{}\[\]();,.]", Category::Punctuation);

    grammar
}

/// Interior of C string literals
pub fn c_string_grammar() -> Grammar {
    let mut grammar = Grammar::new("c-string");

    grammar.rule("escape", r"\\(?:[0-7]{1,3}|x[0-9a-fA-F]+|[\s\S])", Category::Escape);
    grammar.rule(
        "format",
        r"%[-+ #0]*(?:\d+|\*)?(?:\.(?:\d+|\*))?(?:hh|h|ll|l|L|z|j|t)?[diouxXeEfFgGaAcspn%]",
        Category::FormatSpecifier,
    );

    grammar
}

/// Splits `name(` into a function name and its paren
pub fn c_call_grammar() -> Grammar {
    let mut grammar = Grammar::new("c-call");

    grammar.rule("function", r"[A-Za-z_]\w*", Category::Function);
    grammar.rule("paren", r"\(", Category::Punctuation);

    grammar
}
