//! Renders an AST back out as text.
//!
//! Declarations and statements keep their source shape, expressions are
//! written as fully parenthesised prefix forms such as `(add 1 (mul 2 3))`.

use std::fmt::{self, Write as _};

use crate::ast::*;

const INDENT: &str = "    ";

pub fn print_program(program: &Program) -> String {
    let mut printer = Printer::default();

    for item in &program.items {
        match item {
            Item::Var(decl) => printer.var_decl(decl),
            Item::Func(func) => printer.func_decl(func),
            Item::Comment(comment) => printer.comment(comment),
        }
    }

    printer.out
}

#[derive(Default)]
struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn func_decl(&mut self, func: &FuncDecl) {
        let FuncType {
            ret_ty,
            ident,
            params,
        } = &func.ty;

        let params = params
            .iter()
            .map(|param| format!("{} {}", param.ty, param.ident.name))
            .collect::<Vec<_>>()
            .join(", ");

        self.line(format_args!("fn {ret_ty} {}({params}) {{", ident.name));
        self.block_body(&func.body);
        self.line(format_args!("}}"));
    }

    fn var_decl(&mut self, decl: &VarDecl) {
        match &decl.init {
            Some(init) => self.line(format_args!("let {} {} = {init};", decl.ty, decl.ident.name)),
            None => self.line(format_args!("let {} {};", decl.ty, decl.ident.name)),
        }
    }

    fn comment(&mut self, comment: &Comment) {
        self.line(format_args!("//{}", comment.text));
    }

    fn block_body(&mut self, block: &Block) {
        self.indent += 1;
        for stmt in &block.stmts {
            self.stmt(stmt);
        }
        self.indent -= 1;
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Var(decl) => self.var_decl(decl),

            Stmt::If(IfStmt { cond, then, else_ }) => {
                self.line(format_args!("if {cond} {{"));
                self.block_body(then);

                if let Some(else_) = else_ {
                    self.line(format_args!("}} else {{"));
                    self.block_body(else_);
                }

                self.line(format_args!("}}"));
            }

            Stmt::Return(Some(value)) => self.line(format_args!("return {value};")),
            Stmt::Return(None) => self.line(format_args!("return;")),

            Stmt::Expr(expr) => self.line(format_args!("{expr};")),
            Stmt::Comment(comment) => self.comment(comment),
        }
    }

    fn line(&mut self, args: fmt::Arguments) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }

        // writing to a `String` can't fail
        let _ = self.out.write_fmt(args);
        self.out.push('\n');
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Ident(ident) => write!(f, "{}", ident.name),
            ExprKind::Literal(Literal::Int(n)) => write!(f, "{n}"),
            ExprKind::Literal(Literal::Str(s)) => write!(f, "\"{s}\""),

            ExprKind::Unary { op, expr } => write!(f, "({op} {expr})"),
            ExprKind::Binary { op, lhs, rhs } => write!(f, "({op} {lhs} {rhs})"),
            ExprKind::Assign { target, value } => write!(f, "(= {} {value})", target.name),

            ExprKind::Call { callee, args } => {
                write!(f, "(call {}", callee.name)?;
                for arg in args {
                    write!(f, " {arg}")?;
                }
                write!(f, ")")
            }

            ExprKind::Cast { ty, expr } => write!(f, "(cast {ty} {expr})"),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_address {
            write!(f, "&")?;
        }

        write!(f, "{}", self.width)
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Width::Byte => "byte",
            Width::Word => "word",
            Width::Dword => "dword",
            Width::Qword => "qword",
        })
    }
}

impl fmt::Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnOp::Pos => "pos",
            UnOp::Neg => "neg",
            UnOp::Not => "not",
            UnOp::AddrOf => "addr",
            UnOp::PreInc => "preinc",
            UnOp::PreDec => "predec",
        })
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinOp::Add => "add",
            BinOp::Sub => "sub",
            BinOp::Mul => "mul",
            BinOp::Div => "div",
            BinOp::Lt => "lt",
            BinOp::Gt => "gt",
            BinOp::LtEq => "le",
            BinOp::GtEq => "ge",
            BinOp::Eq => "eq",
            BinOp::NotEq => "ne",
        })
    }
}
