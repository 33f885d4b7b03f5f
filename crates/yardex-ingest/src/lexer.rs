//! Tokenizer for YARA rule source.
//!
//! Only as much of the language is understood as is needed to find rule
//! boundaries and read `meta:` values: strings, regular expressions and
//! comments are consumed whole so braces inside them are never counted.

use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Ident(String),
    /// A double-quoted string with escapes resolved.
    Str(String),
    /// Numeric literal as written (`42`, `0x1F`, `1.5`, `2KB`).
    Number(String),
    /// Regular expression literal including slashes and modifiers.
    Regex(String),
    Punct(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte range in the source.
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }

    pub fn is_ident(&self, word: &str) -> bool {
        matches!(&self.kind, TokenKind::Ident(ident) if ident == word)
    }

    pub fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(self.line, self.column, message)
    }
}

/// Split source text into tokens.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
    column: usize,
    regex_allowed: bool,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            column: 1,
            regex_allowed: false,
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.source[self.pos..].chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn bump_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.bump();
        }
    }

    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            match (self.peek(), self.peek_second()) {
                (Some(c), _) if c.is_whitespace() => {
                    self.bump();
                }
                (Some('/'), Some('/')) => self.bump_while(|c| c != '\n'),
                (Some('/'), Some('*')) => {
                    let (line, column) = (self.line, self.column);
                    self.bump();
                    self.bump();
                    loop {
                        match self.bump() {
                            Some('*') if self.peek() == Some('/') => {
                                self.bump();
                                break;
                            }
                            Some(_) => {}
                            None => {
                                return Err(ParseError::new(line, column, "unterminated comment"));
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        self.skip_trivia()?;
        let Some(c) = self.peek() else {
            return Ok(None);
        };
        let (start, line, column) = (self.pos, self.line, self.column);

        let kind = if c == '"' {
            TokenKind::Str(self.string(line, column)?)
        } else if c == '/' && self.regex_allowed {
            self.regex(line, column)?;
            TokenKind::Regex(self.source[start..self.pos].to_string())
        } else if c.is_ascii_alphabetic() || c == '_' {
            self.bump_while(|c| c.is_ascii_alphanumeric() || c == '_');
            TokenKind::Ident(self.source[start..self.pos].to_string())
        } else if c.is_ascii_digit() {
            self.number();
            TokenKind::Number(self.source[start..self.pos].to_string())
        } else {
            self.bump();
            TokenKind::Punct(c)
        };

        self.regex_allowed = match &kind {
            TokenKind::Punct('=') => true,
            TokenKind::Ident(word) => word == "matches",
            _ => false,
        };

        Ok(Some(Token {
            kind,
            start,
            end: self.pos,
            line,
            column,
        }))
    }

    fn string(&mut self, line: usize, column: usize) -> Result<String, ParseError> {
        let unterminated = || ParseError::new(line, column, "unterminated string");
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return Err(unterminated()),
                Some('"') => return Ok(value),
                Some('\\') => {
                    let (esc_line, esc_column) = (self.line, self.column - 1);
                    let escaped = match self.bump() {
                        Some('"') => '"',
                        Some('\\') => '\\',
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('x') => self.hex_escape().ok_or_else(|| {
                            ParseError::new(esc_line, esc_column, "invalid \\x escape")
                        })?,
                        None | Some('\n') => return Err(unterminated()),
                        Some(other) => {
                            return Err(ParseError::new(
                                esc_line,
                                esc_column,
                                format!("invalid escape sequence \\{other}"),
                            ));
                        }
                    };
                    value.push(escaped);
                }
                Some(c) => value.push(c),
            }
        }
    }

    fn hex_escape(&mut self) -> Option<char> {
        let digits = self.source.get(self.pos..self.pos + 2)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let byte = u8::from_str_radix(digits, 16).ok()?;
        self.bump();
        self.bump();
        Some(char::from(byte))
    }

    fn regex(&mut self, line: usize, column: usize) -> Result<(), ParseError> {
        self.bump();
        loop {
            match self.bump() {
                None | Some('\n') => {
                    return Err(ParseError::new(
                        line,
                        column,
                        "unterminated regular expression",
                    ));
                }
                Some('\\') => {
                    if matches!(self.peek(), None | Some('\n')) {
                        continue;
                    }
                    self.bump();
                }
                Some('/') => break,
                Some(_) => {}
            }
        }
        self.bump_while(|c| matches!(c, 'i' | 's'));
        Ok(())
    }

    fn number(&mut self) {
        if self.peek() == Some('0') && matches!(self.peek_second(), Some('x' | 'X')) {
            self.bump();
            self.bump();
            self.bump_while(|c| c.is_ascii_hexdigit());
            return;
        }
        self.bump_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
            self.bump_while(|c| c.is_ascii_digit());
        }
        let rest = &self.source[self.pos..];
        if rest.starts_with("KB") || rest.starts_with("MB") {
            self.bump();
            self.bump();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .expect("tokenize")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn strings_are_unescaped() {
        assert_eq!(
            kinds(r#""a\"b\\c\x41\n""#),
            vec![TokenKind::Str("a\"b\\cA\n".to_string())]
        );
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            kinds("// line\nrule /* block { */ x"),
            vec![
                TokenKind::Ident("rule".to_string()),
                TokenKind::Ident("x".to_string())
            ]
        );
    }

    #[test]
    fn regex_after_assignment_and_matches() {
        assert_eq!(
            kinds(r"$r = /ab\/c{2}/i"),
            vec![
                TokenKind::Punct('$'),
                TokenKind::Ident("r".to_string()),
                TokenKind::Punct('='),
                TokenKind::Regex(r"/ab\/c{2}/i".to_string()),
            ]
        );
        assert!(matches!(
            kinds("x matches /}/").last(),
            Some(TokenKind::Regex(r)) if r == "/}/"
        ));
    }

    #[test]
    fn slash_elsewhere_is_punctuation() {
        assert_eq!(
            kinds("4 / 2"),
            vec![
                TokenKind::Number("4".to_string()),
                TokenKind::Punct('/'),
                TokenKind::Number("2".to_string()),
            ]
        );
    }

    #[test]
    fn numbers() {
        assert_eq!(
            kinds("0x1F 10KB 1.5"),
            vec![
                TokenKind::Number("0x1F".to_string()),
                TokenKind::Number("10KB".to_string()),
                TokenKind::Number("1.5".to_string()),
            ]
        );
    }

    #[test]
    fn positions_are_one_based() {
        let tokens = tokenize("rule\n  x").expect("tokenize");
        assert_eq!((tokens[1].line, tokens[1].column), (2, 3));
        assert_eq!((tokens[1].start, tokens[1].end), (7, 8));
    }

    #[test]
    fn unterminated_string_reports_start() {
        let err = tokenize("rule x {\n  meta: a = \"oops\n}").unwrap_err();
        assert_eq!((err.line, err.column), (2, 13));
        assert_eq!(err.message, "unterminated string");
    }

    #[test]
    fn unterminated_comment() {
        let err = tokenize("rule /* x").unwrap_err();
        assert_eq!(err.message, "unterminated comment");
    }

    #[test]
    fn invalid_escape() {
        let err = tokenize(r#""\q""#).unwrap_err();
        assert!(err.message.contains("invalid escape"));
    }
}
