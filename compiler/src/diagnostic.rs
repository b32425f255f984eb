//! Diagnostics for parse and semantic problems.
//!
//! A diagnostic remembers the source line it was raised on so the driver can
//! print it without going back to the file.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The input ended while a token was still required.
    Eof,
    /// A required token or token class is missing or wrong.
    Syntax,
    /// The input parses but breaks a declaration rule.
    Semantic,
    /// Not fatal; processing continues.
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind:      DiagnosticKind,
    pub message:   String,
    pub path:      String,
    /// 1-based.
    pub line:      usize,
    /// 1-based byte column.
    pub column:    usize,
    pub line_text: String,
}

impl Diagnostic {
    pub fn new(
        kind: DiagnosticKind,
        message: impl Into<String>,
        path: impl Into<String>,
        line: usize,
        column: usize,
        line_text: impl Into<String>,
    ) -> Self {
        Diagnostic {
            kind,
            message: message.into(),
            path: path.into(),
            line,
            column,
            line_text: line_text.into(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.kind != DiagnosticKind::Warning
    }

    /// Only syntax-level problems point at a column; semantic ones don't
    /// re-locate the offending token.
    pub fn has_caret(&self) -> bool {
        matches!(self.kind, DiagnosticKind::Eof | DiagnosticKind::Syntax)
    }

    /// The text printed to stdout for this diagnostic.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push('\n');
        out.push_str(&self.message);
        out.push('\n');
        out.push_str(&format!("{} : {}\n", self.path, self.line));
        out.push_str(&self.line_text);
        out.push('\n');

        if self.has_caret() {
            // `column` counts bytes; pad one cell per source char before it.
            // Tabs are kept so the caret lines up under them.
            let offset = self.column.saturating_sub(1);
            let mut end = offset.min(self.line_text.len());
            while !self.line_text.is_char_boundary(end) {
                end -= 1;
            }
            for c in self.line_text[..end].chars() {
                out.push(if c.is_whitespace() { c } else { ' ' });
            }
            out.push_str(&" ".repeat(offset.saturating_sub(self.line_text.len())));
            out.push_str("^\n");
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}: {}", self.path, self.line, self.column, self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_syntax_error_has_caret() {
        let diag = Diagnostic::new(
            DiagnosticKind::Syntax,
            "expected token \";\"",
            "a.lcm",
            3,
            14,
            "\tint32_t x }",
        );
        assert_eq!(
            diag.render(),
            "\nexpected token \";\"\na.lcm : 3\n\tint32_t x }\n\t            ^\n"
        );
    }

    #[test]
    fn test_render_caret_after_multibyte_text() {
        // "é" takes two bytes, so ';' sits at byte column 11.
        let diag = Diagnostic::new(
            DiagnosticKind::Syntax,
            "Invalid member name: must start with [a-zA-Z_].",
            "a.lcm",
            1,
            11,
            "byte \u{e9}tat;",
        );
        assert!(diag.render().ends_with("byte \u{e9}tat;\n         ^\n"));
    }

    #[test]
    fn test_render_caret_past_end_of_line() {
        let diag = Diagnostic::new(DiagnosticKind::Eof, "End of file", "a.lcm", 1, 4, "ab");
        assert!(diag.render().ends_with("ab\n   ^\n"));
    }

    #[test]
    fn test_render_semantic_error_has_no_caret() {
        let diag = Diagnostic::new(
            DiagnosticKind::Semantic,
            "Duplicate member name 'x'.",
            "a.lcm",
            2,
            13,
            "    int8_t x;",
        );
        assert!(diag.is_fatal());
        assert_eq!(diag.render(), "\nDuplicate member name 'x'.\na.lcm : 2\n    int8_t x;\n");
    }

    #[test]
    fn test_warning_is_not_fatal() {
        let diag = Diagnostic::new(DiagnosticKind::Warning, "careful", "a.lcm", 1, 1, "");
        assert!(!diag.is_fatal());
        assert!(!diag.has_caret());
        assert_eq!(diag.to_string(), "a.lcm:1:1: careful");
    }
}
