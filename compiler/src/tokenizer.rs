use regex::Regex;
use lazy_static::lazy_static;

lazy_static! {
    pub static ref TOKEN_REGEX: Regex = Regex::new(
        r"(?s)(//[^\n]*|/\*.*?\*/|\s+|-?[0-9][A-Za-z0-9_]*|[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*|\S)"
    ).unwrap();
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text:   String,
    /// 1-based.
    pub line:   usize,
    /// 1-based byte column.
    pub column: usize,
}

impl Token {
    /// The end-of-input sentinel has empty text.
    pub fn is_eof(&self) -> bool {
        self.text.is_empty()
    }
}

fn is_trivia(part: &str) -> bool {
    part.trim().is_empty() || part.starts_with("//") || part.starts_with("/*")
}

/// Split `text` into tokens, dropping whitespace and comments.
/// The returned list always ends with an end-of-input sentinel.
pub fn tokenize_schema(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut line = 1;
    let mut column = 1;

    for mat in TOKEN_REGEX.find_iter(text) {
        let part = mat.as_str();

        if !is_trivia(part) {
            tokens.push(Token {
                text:   part.to_string(),
                line,
                column,
            });
        }

        // Update line/column
        let newline_count = part.matches('\n').count();
        if newline_count > 0 {
            line += newline_count;
            if let Some(last_line_part) = part.split('\n').last() {
                column = last_line_part.len() + 1;
            }
        } else {
            column += part.len();
        }
    }

    // Append EOF token
    tokens.push(Token {
        text:   "".to_string(),
        line,
        column,
    });
    tokens
}

/// Single-token-lookahead cursor over one source file.
pub struct TokenStream<'a> {
    path:   String,
    lines:  Vec<&'a str>,
    tokens: Vec<Token>,
    index:  usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(path: impl Into<String>, text: &'a str) -> Self {
        TokenStream {
            path:   path.into(),
            lines:  text.lines().collect(),
            tokens: tokenize_schema(text),
            index:  0,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The next token, without consuming it. Past the end this is the EOF sentinel.
    pub fn peek(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.index.min(last)]
    }

    /// Consume and return the next token. The EOF sentinel is never consumed.
    pub fn next_token(&mut self) -> Token {
        let tok = self.peek().clone();
        if !tok.is_eof() {
            self.index += 1;
        }
        tok
    }

    /// Source text of a 1-based line, without its line terminator.
    pub fn line_text(&self, line: usize) -> &str {
        line.checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .copied()
            .unwrap_or("")
    }
}

/// Debug listing of every token with its index and position.
pub fn dump_tokens(text: &str) -> String {
    let mut out = format!("{:>6} {:>6} {:>6}: {}\n", "tok#", "line", "col", "token");
    let tokens = tokenize_schema(text);
    for (i, tok) in tokens.iter().filter(|t| !t.is_eof()).enumerate() {
        out.push_str(&format!("{:>6} {:>6} {:>6}: {}\n", i, tok.line, tok.column, tok.text));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_tokenize_simple() {
        let input = "int32_t x[4];";
        let expected = vec![
            Token { text: "int32_t".into(), line: 1, column: 1 },
            Token { text: "x".into(),       line: 1, column: 9 },
            Token { text: "[".into(),       line: 1, column: 10 },
            Token { text: "4".into(),       line: 1, column: 11 },
            Token { text: "]".into(),       line: 1, column: 12 },
            Token { text: ";".into(),       line: 1, column: 13 },
            Token { text: "".into(),        line: 1, column: 14 },
        ];
        assert_eq!(tokenize_schema(input), expected);
    }

    #[test]
    fn test_tokenize_skips_comments() {
        let input = "// header\nstruct /* inline\n comment */ a {}";
        let got = tokenize_schema(input);
        assert_eq!(texts(&got), vec!["struct", "a", "{", "}", ""]);
        assert_eq!(got[0].line, 2);
        assert_eq!(got[1].line, 3);
        assert_eq!(got[1].column, 13);
    }

    #[test]
    fn test_tokenize_numbers_and_qualified_names() {
        let got = tokenize_schema("bot.pose_t p; X = -3, Y = 0x1F;");
        assert_eq!(
            texts(&got),
            vec!["bot.pose_t", "p", ";", "X", "=", "-3", ",", "Y", "=", "0x1F", ";", ""]
        );
    }

    #[test]
    fn test_tokenize_stray_characters() {
        let got = tokenize_schema("a @ b");
        assert_eq!(texts(&got), vec!["a", "@", "b", ""]);
    }

    #[test]
    fn test_tokenize_identifiers_are_ascii() {
        let got = tokenize_schema("int32_t x\u{e9};");
        assert_eq!(texts(&got), vec!["int32_t", "x", "\u{e9}", ";", ""]);
        assert_eq!(got[2].column, 10);
        assert_eq!(got[3].column, 12);
    }

    #[test]
    fn test_stream_peek_and_next() {
        let mut stream = TokenStream::new("a.lcm", "enum e\n{ A }");
        assert_eq!(stream.peek().text, "enum");
        assert_eq!(stream.next_token().text, "enum");
        assert_eq!(stream.next_token().text, "e");
        let brace = stream.next_token();
        assert_eq!(brace.line, 2);
        assert_eq!(stream.line_text(brace.line), "{ A }");
        stream.next_token();
        stream.next_token();
        assert!(stream.next_token().is_eof());
        assert!(stream.next_token().is_eof());
        assert!(stream.peek().is_eof());
        assert_eq!(stream.line_text(99), "");
    }

    #[test]
    fn test_dump_tokens() {
        let got = dump_tokens("struct a");
        assert_eq!(
            got,
            "  tok#   line    col: token\n     0      1      1: struct\n     1      1      8: a\n"
        );
    }
}
