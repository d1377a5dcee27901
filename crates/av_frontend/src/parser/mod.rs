#[cfg(test)]
mod tests;

mod expr;
pub mod returns;

use av_session::diagnostics::prelude::*;
use tracing::{instrument, trace};

use self::returns::block_returns;
use crate::ast::*;
use crate::lexer::TokenIter;
use crate::token::{Keyword, Token, TokenKind};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at {line}:{col}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub line: usize,
    pub col: usize,
}

impl ParseError {
    fn at(kind: ParseErrorKind, token: &Token) -> Self {
        Self {
            kind,
            span: token.span,
            line: token.line,
            col: token.col,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("expected {expected}, found {found}")]
    Expected { expected: String, found: String },

    #[error("only variables, functions, and comments are allowed at top level")]
    TopLevelItem,

    #[error("function `{name}` requires a return statement")]
    MissingReturn { name: String },

    #[error("left side of `=` must be assignable")]
    InvalidAssignTarget,

    #[error("block is never closed")]
    UnterminatedBlock,

    #[error("nesting is too deep")]
    TooDeep,
}

impl IntoDiagnostic<SourceId> for ParseError {
    fn into_diagnostic(self, source_id: SourceId) -> Diagnostic {
        Diagnostic::error()
            .with_message("syntax error")
            .with_snippet(Snippet::primary(
                self.kind.to_string(),
                source_id,
                self.span,
            ))
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// How many nested expressions or blocks may be open at once.
const MAX_DEPTH: usize = 256;

/// Recursive descent parser stopping at the first error.
pub struct Parser<'src> {
    tokens: TokenIter<'src>,
    depth: usize,
}

impl<'src> Parser<'src> {
    pub fn new(tokens: TokenIter<'src>) -> Self {
        Self { tokens, depth: 0 }
    }

    #[instrument(level = "trace", skip_all)]
    pub fn parse(mut self) -> ParseResult<Program> {
        let mut items = vec![];

        loop {
            let token = self.peek();

            let item = match token.kind {
                TokenKind::Eof => break,
                TokenKind::Keyword(Keyword::Func) => Item::Func(self.parse_func_decl()?),
                TokenKind::Keyword(Keyword::Let) => Item::Var(self.parse_var_decl()?),
                TokenKind::Comment => Item::Comment(self.parse_comment()),
                _ => return Err(ParseError::at(ParseErrorKind::TopLevelItem, &token)),
            };

            items.push(item);
        }

        trace!(items = items.len(), "parsed program");

        Ok(Program { items })
    }

    #[instrument(level = "trace", skip_all)]
    fn parse_func_decl(&mut self) -> ParseResult<FuncDecl> {
        self.expect(TokenKind::Keyword(Keyword::Func))?;

        let ret_ty = self.parse_value_type()?;

        let name_token = self.peek();
        let ident = self.parse_ident()?;

        self.expect(TokenKind::LParen)?;
        let params = self.parse_list(|parser| {
            let ty = parser.parse_value_type()?;
            let ident = parser.parse_ident()?;
            Ok(FuncParam { ident, ty })
        })?;

        let body = self.parse_block()?;

        if !block_returns(&body) {
            return Err(ParseError::at(
                ParseErrorKind::MissingReturn { name: ident.name },
                &name_token,
            ));
        }

        trace!(name = %ident.name, params = params.len(), "parsed function");

        Ok(FuncDecl {
            ty: FuncType {
                ret_ty,
                ident,
                params,
            },
            body,
        })
    }

    #[instrument(level = "trace", skip_all)]
    fn parse_var_decl(&mut self) -> ParseResult<VarDecl> {
        self.expect(TokenKind::Keyword(Keyword::Let))?;

        let ty = self.parse_value_type()?;
        let ident = self.parse_ident()?;

        let init = if self.eat_kind(TokenKind::Assign) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        self.expect(TokenKind::Semicolon)?;

        Ok(VarDecl { ident, ty, init })
    }

    /// `&` followed by a width, or a bare width. Anything else is taken as an
    /// implicit `qword` and left unconsumed.
    fn parse_value_type(&mut self) -> ParseResult<ValueType> {
        let token = self.peek();

        if token.kind == TokenKind::Ampersand {
            self.advance();

            let width_token = self.peek();
            return match token_width(width_token) {
                Some(width) => {
                    self.advance();
                    Ok(ValueType::address(width))
                }
                None => Err(self.error_expected("a width after `&`", width_token)),
            };
        }

        match token_width(token) {
            Some(width) => {
                self.advance();
                Ok(ValueType::scalar(width))
            }
            None => Ok(ValueType::scalar(Width::Qword)),
        }
    }

    fn parse_block(&mut self) -> ParseResult<Block> {
        let open = self.expect(TokenKind::LBrace)?;
        let mut stmts = vec![];

        loop {
            match self.peek().kind {
                TokenKind::RBrace => break,
                TokenKind::Eof => {
                    return Err(ParseError::at(ParseErrorKind::UnterminatedBlock, &open));
                }
                _ => stmts.push(self.parse_stmt()?),
            }
        }

        let close = self.advance();

        Ok(Block {
            stmts,
            span: open.span.union(close.span),
        })
    }

    #[instrument(level = "trace", skip_all)]
    fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        match self.peek().kind {
            TokenKind::Keyword(Keyword::If) => self.parse_if().map(Stmt::If),

            TokenKind::Keyword(Keyword::Return) => {
                self.advance();

                if self.eat_kind(TokenKind::Semicolon) {
                    return Ok(Stmt::Return(None));
                }

                let value = self.parse_expr()?;
                self.expect(TokenKind::Semicolon)?;

                Ok(Stmt::Return(Some(value)))
            }

            TokenKind::Comment => Ok(Stmt::Comment(self.parse_comment())),

            TokenKind::Keyword(Keyword::Let) => self.parse_var_decl().map(Stmt::Var),

            _ => {
                let expr = self.parse_expr()?;
                self.expect(TokenKind::Semicolon)?;

                Ok(Stmt::Expr(expr))
            }
        }
    }

    fn parse_if(&mut self) -> ParseResult<IfStmt> {
        self.expect(TokenKind::Keyword(Keyword::If))?;

        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;

        let then = self.nested(Self::parse_block)?;

        // comments between the branches move to the top of the else block
        let has_else = self.tokens.peek_past_comments().kind == TokenKind::Keyword(Keyword::Else);
        let else_ = if has_else {
            let mut comments = vec![];
            while self.at(TokenKind::Comment) {
                comments.push(Stmt::Comment(self.parse_comment()));
            }

            self.advance();

            let mut block = self.nested(Self::parse_block)?;
            block.stmts.splice(0..0, comments);
            Some(block)
        } else {
            None
        };

        Ok(IfStmt { cond, then, else_ })
    }

    fn parse_comment(&mut self) -> Comment {
        let token = self.advance();

        Comment {
            text: token.lexeme.to_owned(),
            span: token.span,
        }
    }

    fn parse_ident(&mut self) -> ParseResult<Ident> {
        let token = self.peek();

        match token.kind {
            TokenKind::Identifier => {
                self.advance();
                Ok(Ident {
                    name: token.lexeme.to_owned(),
                    span: token.span,
                })
            }
            _ => Err(self.error_expected("an identifier", token)),
        }
    }

    /// Comma separated items up to and including a closing `)`.
    fn parse_list<T>(
        &mut self,
        mut parse_item: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        let mut items = vec![];

        if !self.at(TokenKind::RParen) {
            loop {
                items.push(parse_item(self)?);

                if !self.eat_kind(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenKind::RParen)?;

        Ok(items)
    }

    /// Run `parse` one level deeper, failing instead of recursing without
    /// bound on pathological input.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::at(ParseErrorKind::TooDeep, &self.peek()));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;

        result
    }

    fn peek(&self) -> Token<'src> {
        self.tokens.peek_token()
    }

    fn peek_next(&self) -> Token<'src> {
        self.tokens.peek_next()
    }

    fn advance(&mut self) -> Token<'src> {
        self.tokens.next().unwrap_or(self.tokens.eof())
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn eat_kind(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token<'src>> {
        let token = self.peek();

        if token.kind == kind {
            self.advance();
            Ok(token)
        } else {
            Err(self.error_expected(kind.token_name(), token))
        }
    }

    fn error_expected(&self, expected: impl Into<String>, found: Token) -> ParseError {
        ParseError::at(
            ParseErrorKind::Expected {
                expected: expected.into(),
                found: found.describe(),
            },
            &found,
        )
    }
}

fn token_width(token: Token) -> Option<Width> {
    match token.kind {
        TokenKind::Keyword(kw) => kw.width(),
        _ => None,
    }
}
