//! A structural check that a function body always returns.
//!
//! A block returns if any of its own statements is a `return`, or an `if`
//! whose branches both return. An `if` without an `else` counts when its
//! `then` branch returns. No other control flow is considered.

use crate::ast::{Block, Stmt};

pub fn block_returns(block: &Block) -> bool {
    block.stmts.iter().any(stmt_returns)
}

fn stmt_returns(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Return(_) => true,
        Stmt::If(if_stmt) => {
            block_returns(&if_stmt.then) && if_stmt.else_.as_ref().map_or(true, block_returns)
        }
        Stmt::Var(_) | Stmt::Expr(_) | Stmt::Comment(_) => false,
    }
}
