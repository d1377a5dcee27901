#[macro_use]
extern crate macro_rules_attribute;

mod lexer;
mod parser;

pub mod ast;
pub mod printer;
pub mod token;

pub use lexer::{LexerError, LexerErrorKind, LexerResult, Scanner, TokenIter};
pub use parser::returns::block_returns;
pub use parser::{ParseError, ParseErrorKind, ParseResult};

use av_session::diagnostics::prelude::*;
use ast::Program;
use parser::Parser;

derive_alias! {
    #[derive(Node!)] = #[derive(Debug, Clone, PartialEq, Eq)];
    #[derive(NodeCopy!)] = #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)];
}

/// Scan `source` into a cursor over its tokens.
///
/// Unlike [`Scanner::scan`], an unterminated string is reported as an error
/// here instead of being left in the stream as an unknown token.
pub fn lex(source: &str) -> LexerResult<TokenIter<'_>> {
    let tokens = Scanner::new(source).scan()?;

    if let Some(token) = tokens
        .iter()
        .find(|t| t.kind == token::TokenKind::Unknown)
    {
        return Err(LexerError::at(LexerErrorKind::UnterminatedString, token));
    }

    Ok(TokenIter::new(tokens))
}

pub fn parse(tokens: TokenIter) -> ParseResult<Program> {
    Parser::new(tokens).parse()
}

/// Scan and parse `source`, stopping at the first error.
pub fn parse_source(source: &str) -> Result<Program, FrontendError> {
    let tokens = lex(source)?;
    Ok(parse(tokens)?)
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FrontendError {
    #[error(transparent)]
    Lexer(#[from] LexerError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl FrontendError {
    pub fn line_col(&self) -> (usize, usize) {
        match self {
            FrontendError::Lexer(err) => (err.line, err.col),
            FrontendError::Parse(err) => (err.line, err.col),
        }
    }
}

impl IntoDiagnostic<SourceId> for FrontendError {
    fn into_diagnostic(self, source_id: SourceId) -> Diagnostic {
        match self {
            FrontendError::Lexer(err) => err.into_diagnostic(source_id),
            FrontendError::Parse(err) => err.into_diagnostic(source_id),
        }
    }
}
