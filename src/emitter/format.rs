//! TypeScript formatting utilities for declaration emission.
//!
//! Reserved-word escaping, string literal quoting and indentation.

/// TypeScript reserved, strict-mode and contextual keywords.
///
/// Identifiers in this list get a trailing underscore wherever they would be
/// emitted as a declaration name.
const TS_RESERVED: &[&str] = &[
    // reserved words
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import",
    "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with",
    // strict mode
    "as", "implements", "interface", "let", "package", "private", "protected", "public", "static",
    "yield",
    // contextual
    "any", "boolean", "constructor", "declare", "get", "module", "require", "number", "set",
    "string", "symbol", "type", "from", "of",
];

/// Every keyword [`normalize_name`] escapes.
#[must_use]
pub fn reserved_words() -> &'static [&'static str] {
    TS_RESERVED
}

/// Check if a name is a TypeScript keyword.
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    TS_RESERVED.contains(&name)
}

/// Append `_` to keywords; return everything else unchanged.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    if is_reserved(name) {
        format!("{}_", name)
    } else {
        name.to_string()
    }
}

/// Escape a string for use in a single-quoted TypeScript literal.
#[must_use]
pub fn escape_ts_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\'' => result.push_str("\\'"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c => result.push(c),
        }
    }
    result
}

/// Quote a string literal with single quotes.
#[must_use]
pub fn quote_string(s: &str) -> String {
    format!("'{}'", escape_ts_string(s))
}

/// Four-space indentation used for every emitted block.
const INDENT: &str = "    ";

/// A writer that manages indentation for TypeScript output.
pub struct IndentWriter {
    buffer: String,
    current_indent: usize,
}

impl IndentWriter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            current_indent: 0,
        }
    }

    /// Increase indentation level.
    pub fn indent(&mut self) {
        self.current_indent += 1;
    }

    /// Decrease indentation level.
    pub fn dedent(&mut self) {
        self.current_indent = self.current_indent.saturating_sub(1);
    }

    /// Write a complete line (with newline at end).
    pub fn write_line(&mut self, s: &str) {
        for _ in 0..self.current_indent {
            self.buffer.push_str(INDENT);
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
    }

    /// Write a blank line.
    pub fn blank_line(&mut self) {
        self.buffer.push('\n');
    }

    /// Open a `{` block and indent its body.
    pub fn open_block(&mut self, head: &str) {
        self.write_line(&format!("{} {{", head));
        self.indent();
    }

    /// Dedent and close a block with `closer` (usually `}`).
    pub fn close_block(&mut self, closer: &str) {
        self.dedent();
        self.write_line(closer);
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.buffer
    }
}

impl Default for IndentWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("package"), "package_");
        assert_eq!(normalize_name("string"), "string_");
        assert_eq!(normalize_name("type"), "type_");
        assert_eq!(normalize_name("users"), "users");
        // case-sensitive
        assert_eq!(normalize_name("Package"), "Package");
    }

    #[test]
    fn test_reserved_list_covers_all_groups() {
        for word in ["while", "yield", "of", "constructor"] {
            assert!(is_reserved(word), "{}", word);
        }
        assert!(!is_reserved("await"));
    }

    #[test]
    fn test_quote_string() {
        assert_eq!(quote_string("active"), "'active'");
        assert_eq!(quote_string("it's"), r"'it\'s'");
        assert_eq!(quote_string(r"a\b"), r"'a\\b'");
        assert_eq!(quote_string("two\nlines"), r"'two\nlines'");
    }

    #[test]
    fn test_indent_writer_blocks() {
        let mut w = IndentWriter::default();
        w.open_block("export interface Foo");
        w.write_line("a: number;");
        w.blank_line();
        w.open_block("b:");
        w.write_line("c: string;");
        w.close_block("};");
        w.close_block("}");

        assert_eq!(
            w.into_string(),
            "export interface Foo {\n    a: number;\n\n    b: {\n        c: string;\n    };\n}\n"
        );
    }

    #[test]
    fn test_dedent_saturates_at_zero() {
        let mut w = IndentWriter::new();
        w.indent();
        w.write_line("// note");
        w.dedent();
        w.dedent();
        w.write_line("x");

        assert_eq!(w.into_string(), "    // note\nx\n");
    }
}
