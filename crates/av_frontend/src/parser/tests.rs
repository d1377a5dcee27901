use pretty_assertions::assert_eq;

use super::{ParseErrorKind, Parser};
use crate::ast::*;
use crate::printer::print_program;
use crate::{parse_source, FrontendError};

fn parse_expr(source: &str) -> Result<Expr, ParseErrorKind> {
    let tokens = crate::lex(source).expect("failed to lex");
    Parser::new(tokens).parse_expr().map_err(|err| err.kind)
}

fn expr(source: &str) -> String {
    match parse_expr(source) {
        Ok(expr) => expr.to_string(),
        Err(err) => panic!("failed to parse {source:?}: {err}"),
    }
}

fn program(source: &str) -> Program {
    match parse_source(source) {
        Ok(program) => program,
        Err(err) => panic!("failed to parse {source:?}: {err}"),
    }
}

fn parse_err(source: &str) -> ParseErrorKind {
    match parse_source(source) {
        Ok(program) => panic!("unexpectedly parsed {source:?}: {program:?}"),
        Err(FrontendError::Parse(err)) => err.kind,
        Err(err) => panic!("expected a parse error for {source:?}, got {err}"),
    }
}

fn expected(expected: &str, found: &str) -> ParseErrorKind {
    ParseErrorKind::Expected {
        expected: expected.to_owned(),
        found: found.to_owned(),
    }
}

#[test]
fn precedence() {
    assert_eq!(expr("1 + 2 * 3"), "(add 1 (mul 2 3))");
    assert_eq!(expr("1 * 2 + 3"), "(add (mul 1 2) 3)");
    assert_eq!(expr("a == b < c + d"), "(eq a (lt b (add c d)))");
    assert_eq!(expr("1 < 2 == 3 >= 4"), "(eq (lt 1 2) (ge 3 4))");
}

#[test]
fn left_associative() {
    assert_eq!(expr("1 - 2 - 3"), "(sub (sub 1 2) 3)");
    assert_eq!(expr("8 / 4 / 2"), "(div (div 8 4) 2)");
    assert_eq!(expr("a != b == c"), "(eq (ne a b) c)");
    assert_eq!(expr("a <= b > c"), "(gt (le a b) c)");
}

#[test]
fn precedence_shape() {
    let expr = parse_expr("1 + 2 * 3").unwrap();

    let ExprKind::Binary { op, lhs, rhs } = expr.kind else {
        panic!("expected a binary expression");
    };

    assert_eq!(op, BinOp::Add);
    assert_eq!(lhs.kind, ExprKind::Literal(Literal::Int(1)));
    assert!(matches!(rhs.kind, ExprKind::Binary { op: BinOp::Mul, .. }));
}

#[test]
fn unary() {
    assert_eq!(expr("-x * !y"), "(mul (neg x) (not y))");
    assert_eq!(expr("+x"), "(pos x)");
    assert_eq!(expr("&x"), "(addr x)");
    assert_eq!(expr("++x"), "(preinc x)");
    assert_eq!(expr("--x"), "(predec x)");
    assert_eq!(expr("- -x"), "(neg (neg x))");
    assert_eq!(expr("!&x"), "(not (addr x))");
}

#[test]
fn casts() {
    assert_eq!(expr("(dword)x"), "(cast dword x)");
    assert_eq!(expr("(&byte)p"), "(cast &byte p)");
    assert_eq!(expr("(QWORD)x + 1"), "(add (cast qword x) 1)");
    assert_eq!(expr("(word)(a + b)"), "(cast word (add a b))");

    let cast = parse_expr("(dword)x").unwrap();
    assert!(matches!(
        cast.kind,
        ExprKind::Cast {
            ty: ValueType {
                width: Width::Dword,
                is_address: false
            },
            ..
        }
    ));
}

#[test]
fn grouping_is_not_a_cast() {
    let grouped = parse_expr("(x)").unwrap();
    assert!(matches!(grouped.kind, ExprKind::Ident(Ident { ref name, .. }) if name == "x"));

    assert_eq!(expr("(1 + 2) * 3"), "(mul (add 1 2) 3)");
}

#[test]
fn calls() {
    assert_eq!(expr("call foo()"), "(call foo)");
    assert_eq!(expr("call add(1, x + 2)"), "(call add 1 (add x 2))");
    assert_eq!(expr("call f(call g(1))"), "(call f (call g 1))");
}

#[test]
fn call_requires_identifier() {
    assert_eq!(
        parse_expr("call 1()").unwrap_err(),
        expected("an identifier", "number `1`")
    );
}

#[test]
fn assignment() {
    assert_eq!(expr("x = 1 + 2"), "(= x (add 1 2))");
    assert_eq!(expr("x = y = 3"), "(= x (= y 3))");
}

#[test]
fn invalid_assignment_target() {
    assert_eq!(
        parse_expr("1 = 2").unwrap_err(),
        ParseErrorKind::InvalidAssignTarget
    );
    assert_eq!(
        parse_expr("x + 1 = 2").unwrap_err(),
        ParseErrorKind::InvalidAssignTarget
    );
}

#[test]
fn literals() {
    assert_eq!(expr("\"hello\""), "\"hello\"");
    assert_eq!(
        parse_expr("42").unwrap().kind,
        ExprKind::Literal(Literal::Int(42))
    );
}

#[test]
fn missing_expression() {
    assert_eq!(parse_expr(")").unwrap_err(), expected("an expression", "`)`"));
}

#[test]
fn empty_program() {
    assert!(program("").items.is_empty());
    assert!(program("\n  \n").items.is_empty());
}

#[test]
fn functions() {
    let source = "fn dword add (dword a, &qword b) { return a + b; }";
    assert_eq!(
        print_program(&program(source)),
        "fn dword add(dword a, &qword b) {\n    return (add a b);\n}\n"
    );

    let source = "fn DWORD main () { return 0; }";
    let parsed = program(source);
    let Item::Func(func) = &parsed.items[0] else {
        panic!("expected a function");
    };

    assert_eq!(func.ty.ident.name, "main");
    assert_eq!(func.ty.ret_ty, ValueType::scalar(Width::Dword));
    assert!(func.ty.params.is_empty());
}

#[test]
fn implicit_qword() {
    let parsed = program("let x = 99;");
    let Item::Var(decl) = &parsed.items[0] else {
        panic!("expected a variable");
    };

    assert_eq!(decl.ty, ValueType::scalar(Width::Qword));
    assert_eq!(decl.ident.name, "x");

    assert_eq!(
        print_program(&program("fn main (a) { return a; }")),
        "fn qword main(qword a) {\n    return a;\n}\n"
    );
}

#[test]
fn address_type() {
    let parsed = program("let &dword p = &x;");
    let Item::Var(decl) = &parsed.items[0] else {
        panic!("expected a variable");
    };

    assert_eq!(decl.ty, ValueType::address(Width::Dword));
    assert!(decl.ty.is_address);

    let init = decl.init.as_ref().expect("missing initializer");
    let ExprKind::Unary { op, expr } = &init.kind else {
        panic!("expected a unary expression");
    };

    assert_eq!(*op, UnOp::AddrOf);
    assert!(matches!(&expr.kind, ExprKind::Ident(ident) if ident.name == "x"));
}

#[test]
fn address_type_needs_width() {
    assert_eq!(
        parse_err("let &p = 1;"),
        expected("a width after `&`", "identifier `p`")
    );
}

#[test]
fn uninitialized_variable() {
    let parsed = program("let byte flag;");
    let Item::Var(decl) = &parsed.items[0] else {
        panic!("expected a variable");
    };

    assert_eq!(decl.init, None);
    assert_eq!(decl.ty, ValueType::scalar(Width::Byte));
}

#[test]
fn comments_round_trip() {
    let source = "// header\nlet x = 99; // implicit QWORD\nfn main () {\n// body\nreturn x;\n}";

    assert_eq!(
        print_program(&program(source)),
        "// header\n\
         let qword x = 99;\n\
         // implicit QWORD\n\
         fn qword main() {\n    \
             // body\n    \
             return x;\n\
         }\n"
    );
}

#[test]
fn statements() {
    let source = "fn main () {
        let dword x = (dword)1;
        x = x + 1;
        call print(\"hi\", x);
        if (x == 2) { return x; } else { x = 0; }
        return;
    }";

    assert_eq!(
        print_program(&program(source)),
        "fn qword main() {\n    \
             let dword x = (cast dword 1);\n    \
             (= x (add x 1));\n    \
             (call print \"hi\" x);\n    \
             if (eq x 2) {\n        \
                 return x;\n    \
             } else {\n        \
                 (= x 0);\n    \
             }\n    \
             return;\n\
         }\n"
    );
}

#[test]
fn missing_return() {
    assert_eq!(
        parse_err("fn dword main () { let dword x = 1; }"),
        ParseErrorKind::MissingReturn {
            name: "main".to_owned()
        }
    );

    assert_eq!(
        parse_err("fn main () { if (c) { return 1; } else { x = 2; } }"),
        ParseErrorKind::MissingReturn {
            name: "main".to_owned()
        }
    );
}

#[test]
fn returns_through_if() {
    program("fn main () { if (c) { return 1; } else { return 2; } }");
    program("fn main () { if (c) { return 1; } }");
    program("fn main () { if (a) { if (b) { return 1; } else { return 2; } } else { return 3; } }");
    program("fn main () { x = 1; return x; x = 2; }");
}

#[test]
fn missing_return_error_position() {
    let err = parse_source("\nfn dword main () { }").unwrap_err();
    assert_eq!(err.line_col(), (2, 10));
}

#[test]
fn top_level_items() {
    assert_eq!(parse_err("return 1;"), ParseErrorKind::TopLevelItem);
    assert_eq!(parse_err("x = 1;"), ParseErrorKind::TopLevelItem);
    assert_eq!(parse_err("let x; 5;"), ParseErrorKind::TopLevelItem);
}

#[test]
fn unterminated_block() {
    assert_eq!(
        parse_err("fn main () { return 0;"),
        ParseErrorKind::UnterminatedBlock
    );
}

#[test]
fn missing_semicolon() {
    assert_eq!(parse_err("let x = 1"), expected("`;`", "end of file"));
    assert_eq!(
        parse_err("fn main () { return 0 }"),
        expected("`;`", "`}`")
    );
}

#[test]
fn if_requires_parens() {
    assert_eq!(
        parse_err("fn main () { if x { return 1; } return 0; }"),
        expected("`(`", "identifier `x`")
    );
}

#[test]
fn error_position() {
    let err = parse_source("let x = ;").unwrap_err();

    assert_eq!(err.line_col(), (1, 9));
    assert_eq!(
        err.to_string(),
        "expected an expression, found `;` at 1:9"
    );
}

#[test]
fn lexer_errors_surface() {
    assert!(matches!(
        parse_source("let x = 1 @ 2;"),
        Err(FrontendError::Lexer(_))
    ));
}

#[test]
fn comment_before_else() {
    let source = "fn main () { if (x) { return 1; } // c\n else { return 2; } }";

    assert_eq!(
        print_program(&program(source)),
        "fn qword main() {\n    \
             if x {\n        \
                 return 1;\n    \
             } else {\n        \
                 // c\n        \
                 return 2;\n    \
             }\n\
         }\n"
    );
}

#[test]
fn comment_after_if_without_else() {
    let source = "fn main () { if (x) { return 1; } // c\n return 2; }";

    assert_eq!(
        print_program(&program(source)),
        "fn qword main() {\n    \
             if x {\n        \
                 return 1;\n    \
             }\n    \
             // c\n    \
             return 2;\n\
         }\n"
    );
}

#[test]
fn moderate_nesting() {
    let source = format!("{}1{}", "(".repeat(50), ")".repeat(50));
    assert_eq!(expr(&source), "1");

    assert_eq!(expr(&format!("{}x", "!".repeat(3))), "(not (not (not x)))");
}

#[test]
fn deep_nesting_is_an_error() {
    let unary = format!("let x = {}1;", "-".repeat(200_000));
    assert_eq!(parse_err(&unary), ParseErrorKind::TooDeep);

    let parens = format!("let x = {}1{};", "(".repeat(10_000), ")".repeat(10_000));
    assert_eq!(parse_err(&parens), ParseErrorKind::TooDeep);

    let casts = format!("let x = {}1;", "(byte)".repeat(10_000));
    assert_eq!(parse_err(&casts), ParseErrorKind::TooDeep);

    let assigns = format!("let x = {}1;", "y = ".repeat(10_000));
    assert_eq!(parse_err(&assigns), ParseErrorKind::TooDeep);

    let ifs = format!(
        "fn main () {{ {}return 1;{} }}",
        "if (x) { ".repeat(1_000),
        " }".repeat(1_000)
    );
    assert_eq!(parse_err(&ifs), ParseErrorKind::TooDeep);
}
