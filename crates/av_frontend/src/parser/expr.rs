use super::{ParseError, ParseErrorKind, ParseResult, Parser};
use crate::ast::*;
use crate::token::*;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
    Lowest,

    Equality,
    Comparison,

    Term,
    Factor,
}

fn binop_prec(binop: BinOp) -> Prec {
    match binop {
        BinOp::Eq | BinOp::NotEq => Prec::Equality,
        BinOp::Lt | BinOp::Gt | BinOp::LtEq | BinOp::GtEq => Prec::Comparison,
        BinOp::Add | BinOp::Sub => Prec::Term,
        BinOp::Mul | BinOp::Div => Prec::Factor,
    }
}

fn token_binop(kind: TokenKind) -> Option<BinOp> {
    let op = match kind {
        TokenKind::EqEq => BinOp::Eq,
        TokenKind::NotEq => BinOp::NotEq,

        TokenKind::Lt => BinOp::Lt,
        TokenKind::Gt => BinOp::Gt,
        TokenKind::LtEq => BinOp::LtEq,
        TokenKind::GtEq => BinOp::GtEq,

        TokenKind::Add => BinOp::Add,
        TokenKind::Sub => BinOp::Sub,
        TokenKind::Mul => BinOp::Mul,
        TokenKind::Div => BinOp::Div,

        _ => return None,
    };

    Some(op)
}

fn token_unop(kind: TokenKind) -> Option<UnOp> {
    let op = match kind {
        TokenKind::Add => UnOp::Pos,
        TokenKind::Sub => UnOp::Neg,
        TokenKind::Bang => UnOp::Not,
        TokenKind::Ampersand => UnOp::AddrOf,
        TokenKind::Increment => UnOp::PreInc,
        TokenKind::Decrement => UnOp::PreDec,

        _ => return None,
    };

    Some(op)
}

impl Parser<'_> {
    /// An assignment, or a binary expression if no `=` follows.
    pub(super) fn parse_expr(&mut self) -> ParseResult<Expr> {
        let expr = self.parse_prec(Prec::Lowest)?;

        let eq = self.peek();
        if eq.kind != TokenKind::Assign {
            return Ok(expr);
        }

        let ExprKind::Ident(target) = expr.kind else {
            return Err(ParseError {
                span: expr.span,
                ..ParseError::at(ParseErrorKind::InvalidAssignTarget, &eq)
            });
        };

        self.advance();
        let value = self.nested(Self::parse_expr)?;

        let span = expr.span.union(value.span);
        Ok(Expr::new(
            ExprKind::Assign {
                target,
                value: Box::new(value),
            },
            span,
        ))
    }

    /// Left-folds every binary operator binding tighter than `prec`.
    fn parse_prec(&mut self, prec: Prec) -> ParseResult<Expr> {
        let mut expr = self.parse_unary()?;

        while let Some(op) = self.peek_binop(prec) {
            self.advance();

            let rhs = self.parse_prec(binop_prec(op))?;

            let span = expr.span.union(rhs.span);
            expr = Expr::new(
                ExprKind::Binary {
                    op,
                    lhs: Box::new(expr),
                    rhs: Box::new(rhs),
                },
                span,
            );
        }

        Ok(expr)
    }

    fn peek_binop(&self, in_prec: Prec) -> Option<BinOp> {
        let op = token_binop(self.peek().kind)?;
        (binop_prec(op) > in_prec).then_some(op)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let token = self.peek();

        let Some(op) = token_unop(token.kind) else {
            return self.parse_primary();
        };

        self.advance();
        let expr = self.nested(Self::parse_unary)?;

        let span = token.span.union(expr.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                expr: Box::new(expr),
            },
            span,
        ))
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = self.peek();

        match token.kind {
            TokenKind::LParen if self.peek_next().kind.starts_type() => {
                self.advance();

                let ty = self.parse_value_type()?;
                self.expect(TokenKind::RParen)?;

                let expr = self.nested(Self::parse_primary)?;

                let span = token.span.union(expr.span);
                Ok(Expr::new(
                    ExprKind::Cast {
                        ty,
                        expr: Box::new(expr),
                    },
                    span,
                ))
            }

            TokenKind::LParen => {
                self.advance();

                let mut expr = self.nested(Self::parse_expr)?;
                let close = self.expect(TokenKind::RParen)?;

                expr.span = token.span.union(close.span);
                Ok(expr)
            }

            TokenKind::Keyword(Keyword::Call) => {
                self.advance();

                let callee = self.parse_ident()?;
                self.expect(TokenKind::LParen)?;
                let args = self.parse_list(|parser| parser.nested(Self::parse_expr))?;

                let span = token.span.union(self.tokens.prev_span());
                Ok(Expr::new(ExprKind::Call { callee, args }, span))
            }

            TokenKind::Identifier => {
                let ident = self.parse_ident()?;
                let span = ident.span;
                Ok(Expr::new(ExprKind::Ident(ident), span))
            }

            TokenKind::Number(n) => {
                self.advance();
                Ok(Expr::new(ExprKind::Literal(Literal::Int(n)), token.span))
            }

            TokenKind::String => {
                self.advance();
                Ok(Expr::new(
                    ExprKind::Literal(Literal::Str(token.lexeme.to_owned())),
                    token.span,
                ))
            }

            _ => Err(self.error_expected("an expression", token)),
        }
    }
}
