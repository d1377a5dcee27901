#[cfg(test)]
mod tests;

use std::str::Chars;

use ahash::RandomState;
use av_session::diagnostics::prelude::*;
use av_utils::peek::Peek;
use hashbrown::HashMap;
use tracing::{debug, instrument};

use crate::token::*;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at {line}:{col}")]
pub struct LexerError {
    pub kind: LexerErrorKind,
    pub span: Span,
    pub line: usize,
    pub col: usize,
}

impl LexerError {
    pub(crate) fn at(kind: LexerErrorKind, token: &Token) -> Self {
        Self {
            kind,
            span: token.span,
            line: token.line,
            col: token.col,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerErrorKind {
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),

    #[error("unterminated string")]
    UnterminatedString,

    #[error("integer literal too large")]
    IntegerOverflow,
}

impl IntoDiagnostic<SourceId> for LexerError {
    fn into_diagnostic(self, source_id: SourceId) -> Diagnostic {
        Diagnostic::error()
            .with_message("lexical error")
            .with_snippet(Snippet::primary(
                self.kind.to_string(),
                source_id,
                self.span,
            ))
    }
}

pub type LexerResult<T> = Result<T, LexerError>;

type KeywordMap = HashMap<&'static str, Keyword, RandomState>;

/// Turns source text into tokens in a single pass.
///
/// The keyword table lives exactly as long as the scanner, which is consumed
/// by [`Scanner::scan`].
pub struct Scanner<'src> {
    all: &'src str,
    chars: Chars<'src>,

    keywords: KeywordMap,
    tokens: Vec<Token<'src>>,

    token_start: usize,
    token_line: usize,
    token_col: usize,

    line: usize,
    line_start: usize,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            all: source,
            chars: source.chars(),

            keywords: keyword_map(),
            tokens: vec![],

            token_start: 0,
            token_line: 1,
            token_col: 1,

            line: 1,
            line_start: 0,
        }
    }

    /// Scan the whole source. The result always ends in exactly one
    /// [`TokenKind::Eof`]; an unterminated string shows up as a
    /// [`TokenKind::Unknown`] token rather than an error.
    #[instrument(level = "debug", skip_all)]
    pub fn scan(mut self) -> LexerResult<Vec<Token<'src>>> {
        while let Some(token) = self.scan_token()? {
            self.tokens.push(token);
        }

        self.start_token();
        let eof = self.make_token(TokenKind::Eof, "");
        self.tokens.push(eof);

        debug!(count = self.tokens.len(), "scanned tokens");

        Ok(self.tokens)
    }

    fn scan_token(&mut self) -> LexerResult<Option<Token<'src>>> {
        loop {
            self.start_token();

            let Some(ch) = self.chars.next() else {
                return Ok(None);
            };

            let kind = match ch {
                '\n' => {
                    self.newline();
                    continue;
                }

                ' ' | '\t' | '\r' => continue,

                '/' if self.chars.eat('/') => return Ok(Some(self.scan_comment())),
                '"' => return Ok(Some(self.scan_string())),

                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                '{' => TokenKind::LBrace,
                '}' => TokenKind::RBrace,

                ',' => TokenKind::Comma,
                '.' => TokenKind::Dot,
                ':' => TokenKind::Colon,
                ';' => TokenKind::Semicolon,
                '&' => TokenKind::Ampersand,

                '*' => TokenKind::Mul,
                '/' => TokenKind::Div,

                '!' if self.chars.eat('=') => TokenKind::NotEq,
                '!' => TokenKind::Bang,
                '=' if self.chars.eat('=') => TokenKind::EqEq,
                '=' => TokenKind::Assign,
                '<' if self.chars.eat('=') => TokenKind::LtEq,
                '<' => TokenKind::Lt,
                '>' if self.chars.eat('=') => TokenKind::GtEq,
                '>' => TokenKind::Gt,
                '+' if self.chars.eat('+') => TokenKind::Increment,
                '+' => TokenKind::Add,
                '-' if self.chars.eat('-') => TokenKind::Decrement,
                '-' => TokenKind::Sub,

                '0'..='9' => self.scan_number()?,
                ch if ch.is_ascii_alphabetic() => self.scan_word(),

                ch => return Err(self.error(LexerErrorKind::UnexpectedChar(ch))),
            };

            let lexeme = self.current_lexeme();
            return Ok(Some(self.make_token(kind, lexeme)));
        }
    }

    fn scan_comment(&mut self) -> Token<'src> {
        let text_start = self.byte_pos();
        self.chars.eat_while(|&ch| ch != '\n');

        let text = &self.all[text_start..self.byte_pos()];
        self.make_token(TokenKind::Comment, text.trim_end_matches('\r'))
    }

    fn scan_string(&mut self) -> Token<'src> {
        let content_start = self.byte_pos();

        loop {
            match self.chars.next() {
                Some('"') => {
                    let content = &self.all[content_start..self.byte_pos() - 1];
                    return self.make_token(TokenKind::String, content);
                }
                Some('\n') => self.newline(),
                Some(_) => {}
                None => {
                    let lexeme = self.current_lexeme();
                    return self.make_token(TokenKind::Unknown, lexeme);
                }
            }
        }
    }

    /// Only the integer part contributes to the value: `3.14` is `3`.
    fn scan_number(&mut self) -> LexerResult<TokenKind> {
        self.chars.eat_while(char::is_ascii_digit);
        let int_end = self.byte_pos();

        let mut lookahead = self.chars.clone();
        if lookahead.next() == Some('.') && lookahead.next().is_some_and(|ch| ch.is_ascii_digit()) {
            self.chars.next();
            self.chars.eat_while(char::is_ascii_digit);
        }

        self.all[self.token_start..int_end]
            .bytes()
            .try_fold(0i64, |n, digit| {
                n.checked_mul(10)?.checked_add(i64::from(digit - b'0'))
            })
            .map(TokenKind::Number)
            .ok_or_else(|| self.error(LexerErrorKind::IntegerOverflow))
    }

    fn scan_word(&mut self) -> TokenKind {
        self.chars.eat_while(char::is_ascii_alphanumeric);

        match self.keywords.get(self.current_lexeme()) {
            Some(&kw) => TokenKind::Keyword(kw),
            None => TokenKind::Identifier,
        }
    }

    fn start_token(&mut self) {
        self.token_start = self.byte_pos();
        self.token_line = self.line;
        self.token_col = self.all[self.line_start..self.token_start].chars().count() + 1;
    }

    fn newline(&mut self) {
        self.line += 1;
        self.line_start = self.byte_pos();
    }

    fn make_token(&self, kind: TokenKind, lexeme: &'src str) -> Token<'src> {
        Token {
            kind,
            lexeme,
            span: Span::new(self.token_start, self.byte_pos()),
            line: self.token_line,
            col: self.token_col,
        }
    }

    fn current_lexeme(&self) -> &'src str {
        &self.all[self.token_start..self.byte_pos()]
    }

    fn byte_pos(&self) -> usize {
        self.all.len() - self.chars.as_str().len()
    }

    fn error(&self, kind: LexerErrorKind) -> LexerError {
        LexerError {
            kind,
            span: Span::new(self.token_start, self.byte_pos()),
            line: self.token_line,
            col: self.token_col,
        }
    }
}

fn keyword_map() -> KeywordMap {
    let mut map = KeywordMap::with_hasher(RandomState::new());

    map.extend([
        ("let", Keyword::Let),
        ("if", Keyword::If),
        ("else", Keyword::Else),
        ("call", Keyword::Call),
        ("fn", Keyword::Func),
        ("return", Keyword::Return),
        ("byte", Keyword::Byte),
        ("word", Keyword::Word),
        ("dword", Keyword::Dword),
        ("qword", Keyword::Qword),
        ("BYTE", Keyword::Byte),
        ("WORD", Keyword::Word),
        ("DWORD", Keyword::Dword),
        ("QWORD", Keyword::Qword),
    ]);

    map
}

/// A forward cursor over scanned tokens.
///
/// Once the stream is exhausted every peek yields the final EOF token.
pub struct TokenIter<'src> {
    tokens: std::vec::IntoIter<Token<'src>>,
    prev_span: Span,
    eof: Token<'src>,
}

impl<'src> TokenIter<'src> {
    pub fn new(tokens: Vec<Token<'src>>) -> Self {
        let eof = match tokens.last() {
            Some(token) if token.kind == TokenKind::Eof => *token,
            last => Token {
                kind: TokenKind::Eof,
                lexeme: "",
                span: Span::empty(last.map_or(0, |t| t.span.end)),
                line: last.map_or(1, |t| t.line),
                col: last.map_or(1, |t| t.col + t.lexeme.chars().count()),
            },
        };

        Self {
            tokens: tokens.into_iter(),
            prev_span: Span::empty(0),
            eof,
        }
    }

    pub fn prev_span(&self) -> Span {
        self.prev_span
    }

    pub fn peek_token(&self) -> Token<'src> {
        self.peek().unwrap_or(self.eof)
    }

    /// The token after the next one.
    pub fn peek_next(&self) -> Token<'src> {
        self.tokens.as_slice().get(1).copied().unwrap_or(self.eof)
    }

    pub fn eof(&self) -> Token<'src> {
        self.eof
    }

    /// The first upcoming token that is not a comment.
    pub fn peek_past_comments(&self) -> Token<'src> {
        self.tokens
            .as_slice()
            .iter()
            .find(|token| token.kind != TokenKind::Comment)
            .copied()
            .unwrap_or(self.eof)
    }
}

impl<'src> Iterator for TokenIter<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.tokens.next()?;
        self.prev_span = token.span;
        Some(token)
    }
}

impl Peek for TokenIter<'_> {
    fn peek(&self) -> Option<Self::Item> {
        self.tokens.as_slice().first().copied()
    }
}
