//! Recursive-descent parser for YARA rule files.
//!
//! Produces a [`ParsedRuleset`]: imports, includes and one [`ParsedRule`]
//! per rule. Rule bodies are kept as verbatim source slices; only the
//! `meta:` section is interpreted.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;
use yardex_model::{ParsedRule, ParsedRuleset, RawMetaEntry};

use crate::error::{IngestError, ParseError, Result};
use crate::keywords::is_keyword;
use crate::lexer::{Token, TokenKind, tokenize};

/// Parse rule source text.
pub fn parse_ruleset(source: &str) -> std::result::Result<ParsedRuleset, ParseError> {
    let tokens = tokenize(source)?;
    Parser {
        source,
        tokens: &tokens,
        pos: 0,
    }
    .ruleset()
}

/// Read and parse a rule file.
pub fn parse_ruleset_file(path: &Path) -> Result<ParsedRuleset> {
    let source = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => IngestError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    let ruleset = parse_ruleset(&source).map_err(|source| IngestError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        rules = ruleset.rule_count(),
        imports = ruleset.imports.len(),
        "parsed rule file"
    );
    Ok(ruleset)
}

struct Parser<'s, 't> {
    source: &'s str,
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Parser<'_, 't> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&'t Token> {
        self.tokens.get(self.pos + offset)
    }

    fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Error positioned at the current token, or at the end of input.
    fn error_here(&self, message: impl Into<String>) -> ParseError {
        match self.peek() {
            Some(token) => token.error(message),
            None => self.end_of_input(message),
        }
    }

    fn end_of_input(&self, message: impl Into<String>) -> ParseError {
        let line = self.source.matches('\n').count() + 1;
        let column = self
            .source
            .rsplit('\n')
            .next()
            .map_or(0, |last| last.chars().count())
            + 1;
        ParseError::new(line, column, message)
    }

    fn expect_punct(&mut self, c: char) -> std::result::Result<(), ParseError> {
        match self.peek() {
            Some(token) if token.is_punct(c) => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(self.error_here(format!("expected `{c}`"))),
        }
    }

    fn expect_string(&mut self, what: &str) -> std::result::Result<String, ParseError> {
        match self.peek().map(|t| &t.kind) {
            Some(TokenKind::Str(value)) => {
                let value = value.clone();
                self.pos += 1;
                Ok(value)
            }
            _ => Err(self.error_here(format!("expected quoted {what}"))),
        }
    }

    fn ruleset(mut self) -> std::result::Result<ParsedRuleset, ParseError> {
        let mut ruleset = ParsedRuleset::default();
        while let Some(token) = self.peek() {
            if token.is_ident("import") {
                self.pos += 1;
                ruleset.imports.push(self.expect_string("module name")?);
            } else if token.is_ident("include") {
                self.pos += 1;
                ruleset.includes.push(self.expect_string("include path")?);
            } else if ["rule", "private", "global"]
                .iter()
                .any(|word| token.is_ident(word))
            {
                let rule = self.rule()?;
                ruleset.rules.push(rule);
            } else {
                return Err(token.error("expected `import`, `include` or a rule"));
            }
        }
        Ok(ruleset)
    }

    fn rule(&mut self) -> std::result::Result<ParsedRule, ParseError> {
        let Some(first) = self.peek() else {
            return Err(self.error_here("expected a rule"));
        };
        let (start, rule_line, rule_column) = (first.start, first.line, first.column);

        let mut global = false;
        let mut private = false;
        loop {
            match self.peek() {
                Some(t) if t.is_ident("global") => global = true,
                Some(t) if t.is_ident("private") => private = true,
                _ => break,
            }
            self.pos += 1;
        }
        match self.peek() {
            Some(t) if t.is_ident("rule") => self.pos += 1,
            _ => return Err(self.error_here("expected `rule`")),
        }

        let identifier = match self.peek() {
            Some(Token {
                kind: TokenKind::Ident(name),
                ..
            }) if is_keyword(name) => {
                return Err(self.error_here(format!(
                    "`{name}` is a reserved keyword and cannot name a rule"
                )));
            }
            Some(Token {
                kind: TokenKind::Ident(name),
                ..
            }) => name.clone(),
            _ => return Err(self.error_here("missing rule identifier")),
        };
        self.pos += 1;

        let mut tags = Vec::new();
        if self.peek().is_some_and(|t| t.is_punct(':')) {
            self.pos += 1;
            while let Some(Token {
                kind: TokenKind::Ident(tag),
                ..
            }) = self.peek()
            {
                tags.push(tag.clone());
                self.pos += 1;
            }
        }
        self.expect_punct('{')?;

        let mut meta = Vec::new();
        let mut has_condition = false;
        let mut depth = 1usize;
        let end = loop {
            let Some(token) = self.advance() else {
                return Err(ParseError::new(
                    rule_line,
                    rule_column,
                    format!("unbalanced braces: rule `{identifier}` is never closed"),
                ));
            };
            match &token.kind {
                TokenKind::Punct('{') => depth += 1,
                TokenKind::Punct('}') => {
                    depth -= 1;
                    if depth == 0 {
                        break token.end;
                    }
                }
                TokenKind::Ident(word) if depth == 1 && self.at_section_colon() => {
                    match word.as_str() {
                        "meta" => {
                            self.pos += 1;
                            self.meta_entries(&mut meta)?;
                        }
                        "condition" => {
                            has_condition = true;
                            self.pos += 1;
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        };

        if !has_condition {
            return Err(ParseError::new(
                rule_line,
                rule_column,
                format!("rule `{identifier}` has no condition"),
            ));
        }

        Ok(ParsedRule {
            identifier,
            global,
            private,
            tags,
            meta,
            body: self.source[start..end].to_string(),
        })
    }

    fn at_section_colon(&self) -> bool {
        self.peek().is_some_and(|t| t.is_punct(':'))
    }

    /// `key = value` pairs up to the next section header or closing brace.
    fn meta_entries(
        &mut self,
        meta: &mut Vec<RawMetaEntry>,
    ) -> std::result::Result<(), ParseError> {
        while let (Some(Token { kind: TokenKind::Ident(key), .. }), Some(eq)) =
            (self.peek(), self.peek_at(1))
            && eq.is_punct('=')
        {
            let key = key.clone();
            self.pos += 2;
            let value = self.meta_value()?;
            meta.push(RawMetaEntry::new(key, value));
        }
        Ok(())
    }

    fn meta_value(&mut self) -> std::result::Result<String, ParseError> {
        let invalid = |token: &Token| token.error("invalid meta value");
        let Some(token) = self.peek() else {
            return Err(self.error_here("invalid meta value"));
        };
        let value = match &token.kind {
            TokenKind::Str(value) => value.clone(),
            TokenKind::Ident(word) if word == "true" || word == "false" => word.clone(),
            TokenKind::Number(text) => integer_literal(text).ok_or_else(|| invalid(token))?,
            TokenKind::Punct('-') => {
                let number = match self.peek_at(1) {
                    Some(Token {
                        kind: TokenKind::Number(text),
                        ..
                    }) => integer_literal(text),
                    _ => None,
                };
                let number = number.ok_or_else(|| invalid(token))?;
                self.pos += 1;
                if number == "0" {
                    number
                } else {
                    format!("-{number}")
                }
            }
            _ => return Err(invalid(token)),
        };
        self.pos += 1;
        Ok(value)
    }
}

/// Decimal or `0x` hex integer, rendered in decimal.
fn integer_literal(text: &str) -> Option<String> {
    let value = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok()?,
        None => {
            if !text.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            text.parse::<u64>().ok()?
        }
    };
    Some(value.to_string())
}
