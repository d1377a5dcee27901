use av_diagnostic::span::Span;

use crate::{Node, NodeCopy};

#[derive(Node!)]
pub struct Program {
    pub items: Vec<Item>,
}

#[derive(Node!)]
pub enum Item {
    Var(VarDecl),
    Func(FuncDecl),
    Comment(Comment),
}

#[derive(Node!)]
pub struct VarDecl {
    pub ident: Ident,
    pub ty: ValueType,
    pub init: Option<Expr>,
}

#[derive(Node!)]
pub struct FuncDecl {
    pub ty: FuncType,
    pub body: Block,
}

#[derive(Node!)]
pub struct FuncType {
    pub ret_ty: ValueType,
    pub ident: Ident,
    pub params: Vec<FuncParam>,
}

#[derive(Node!)]
pub struct FuncParam {
    pub ident: Ident,
    pub ty: ValueType,
}

#[derive(Node!)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

#[derive(Node!)]
pub enum Stmt {
    Var(VarDecl),
    If(IfStmt),
    Return(Option<Expr>),
    Expr(Expr),
    Comment(Comment),
}

#[derive(Node!)]
pub struct IfStmt {
    pub cond: Expr,
    pub then: Block,
    pub else_: Option<Block>,
}

/// The text of a `//` comment, without the slashes.
#[derive(Node!)]
pub struct Comment {
    pub text: String,
    pub span: Span,
}

#[derive(Node!)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

#[derive(Node!)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Node!)]
pub enum ExprKind {
    Ident(Ident),
    Literal(Literal),

    Unary {
        op: UnOp,
        expr: Box<Expr>,
    },

    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    Assign {
        target: Ident,
        value: Box<Expr>,
    },

    Call {
        callee: Ident,
        args: Vec<Expr>,
    },

    Cast {
        ty: ValueType,
        expr: Box<Expr>,
    },
}

#[derive(Node!)]
pub enum Literal {
    Int(i64),
    Str(String),
}

/// A scalar width, or the address of one.
#[derive(NodeCopy!)]
pub struct ValueType {
    pub width: Width,
    pub is_address: bool,
}

impl ValueType {
    pub fn scalar(width: Width) -> Self {
        Self {
            width,
            is_address: false,
        }
    }

    pub fn address(width: Width) -> Self {
        Self {
            width,
            is_address: true,
        }
    }
}

#[derive(NodeCopy!)]
pub enum Width {
    Byte,
    Word,
    Dword,
    Qword,
}

#[derive(NodeCopy!)]
pub enum UnOp {
    Pos,
    Neg,
    Not,
    AddrOf,
    PreInc,
    PreDec,
}

#[derive(NodeCopy!)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,

    Lt,
    Gt,
    LtEq,
    GtEq,
    Eq,
    NotEq,
}
