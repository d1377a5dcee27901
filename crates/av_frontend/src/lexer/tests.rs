use pretty_assertions::assert_eq;

use super::{LexerErrorKind, Scanner};
use crate::token::{Keyword, Token, TokenKind};

fn scan(source: &str) -> Vec<Token<'_>> {
    Scanner::new(source).scan().expect("failed to scan")
}

fn kinds(source: &str) -> Vec<TokenKind> {
    scan(source).into_iter().map(|t| t.kind).collect()
}

fn scan_err(source: &str) -> LexerErrorKind {
    match Scanner::new(source).scan() {
        Ok(tokens) => panic!("unexpectedly scanned {source:?}: {tokens:?}"),
        Err(err) => err.kind,
    }
}

#[test]
fn empty() {
    assert_eq!(kinds(""), [TokenKind::Eof]);
    assert_eq!(kinds("  \t\r\n  "), [TokenKind::Eof]);
}

#[test]
fn keywords() {
    use Keyword::*;

    let expected: Vec<_> = [Let, If, Else, Call, Func, Return, Byte, Word, Dword, Qword]
        .into_iter()
        .map(TokenKind::Keyword)
        .chain([TokenKind::Eof])
        .collect();

    assert_eq!(kinds("let if else call fn return byte word dword qword"), expected);
}

#[test]
fn uppercase_widths() {
    assert_eq!(
        kinds("BYTE WORD DWORD QWORD"),
        [
            TokenKind::Keyword(Keyword::Byte),
            TokenKind::Keyword(Keyword::Word),
            TokenKind::Keyword(Keyword::Dword),
            TokenKind::Keyword(Keyword::Qword),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn keyword_prefixes_are_identifiers() {
    assert_eq!(
        kinds("lets iff fn2 Let"),
        [
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn double_char_operators() {
    assert_eq!(
        kinds("== != <= >= ++ --"),
        [
            TokenKind::EqEq,
            TokenKind::NotEq,
            TokenKind::LtEq,
            TokenKind::GtEq,
            TokenKind::Increment,
            TokenKind::Decrement,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn single_char_operators() {
    assert_eq!(
        kinds("! < > = + - * / & ( ) { } , . : ;"),
        [
            TokenKind::Bang,
            TokenKind::Lt,
            TokenKind::Gt,
            TokenKind::Assign,
            TokenKind::Add,
            TokenKind::Sub,
            TokenKind::Mul,
            TokenKind::Div,
            TokenKind::Ampersand,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::Comma,
            TokenKind::Dot,
            TokenKind::Colon,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn no_spaces() {
    assert_eq!(
        kinds("x=-1;"),
        [
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Sub,
            TokenKind::Number(1),
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn line_numbers() {
    let tokens = scan("foo\nbar\nbaz");
    let lines: Vec<_> = tokens.iter().map(|t| (t.lexeme, t.line)).collect();

    assert_eq!(lines, [("foo", 1), ("bar", 2), ("baz", 3), ("", 3)]);
}

#[test]
fn carriage_returns_are_skipped() {
    let tokens = scan("foo\r\nbar");

    assert_eq!(tokens.len(), 3);
    assert_eq!((tokens[0].lexeme, tokens[0].line), ("foo", 1));
    assert_eq!((tokens[1].lexeme, tokens[1].line), ("bar", 2));
}

#[test]
fn columns() {
    let tokens = scan("let  x\n  y");
    let cols: Vec<_> = tokens.iter().map(|t| (t.line, t.col)).collect();

    assert_eq!(cols, [(1, 1), (1, 6), (2, 3), (2, 4)]);
}

#[test]
fn columns_count_characters() {
    let tokens = scan("\"é\" x");
    let cols: Vec<_> = tokens.iter().map(|t| (t.kind, t.col)).collect();

    assert_eq!(
        cols,
        [
            (TokenKind::String, 1),
            (TokenKind::Identifier, 5),
            (TokenKind::Eof, 6)
        ]
    );
    assert_eq!(tokens[1].span.start, 5);

    let err = Scanner::new("\"日本\" $").scan().unwrap_err();
    assert_eq!((err.line, err.col), (1, 6));
}

#[test]
fn identifiers_with_digits() {
    let tokens = scan("abc123 x9");

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].lexeme, "abc123");
    assert_eq!(tokens[1].lexeme, "x9");
}

#[test]
fn numbers() {
    assert_eq!(kinds("42"), [TokenKind::Number(42), TokenKind::Eof]);
    assert_eq!(kinds("0"), [TokenKind::Number(0), TokenKind::Eof]);

    let tokens = scan("3.14");
    assert_eq!(tokens[0].kind, TokenKind::Number(3));
    assert_eq!(tokens[0].lexeme, "3.14");
}

#[test]
fn trailing_dot_is_not_decimal() {
    assert_eq!(
        kinds("7."),
        [TokenKind::Number(7), TokenKind::Dot, TokenKind::Eof]
    );
}

#[test]
fn integer_overflow() {
    assert_eq!(
        scan_err("100000000000000000000"),
        LexerErrorKind::IntegerOverflow
    );
}

#[test]
fn strings() {
    let tokens = scan("\"hello world\"");

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].lexeme, "hello world");
    assert_eq!(tokens[0].length(), 11);
    assert_eq!(tokens[1].kind, TokenKind::Eof);
}

#[test]
fn unterminated_string() {
    assert_eq!(kinds("\"abc"), [TokenKind::Unknown, TokenKind::Eof]);

    let err = crate::lex("let x = \"abc").err().expect("lexed unterminated string");
    assert_eq!(err.kind, LexerErrorKind::UnterminatedString);
    assert_eq!((err.line, err.col), (1, 9));
}

#[test]
fn comments_are_tokens() {
    let tokens = scan("// hi there\nlet");

    assert_eq!(tokens[0].kind, TokenKind::Comment);
    assert_eq!(tokens[0].lexeme, " hi there");
    assert_eq!(tokens[1].kind, TokenKind::Keyword(Keyword::Let));
    assert_eq!(tokens[1].line, 2);
}

#[test]
fn comment_at_end_of_input() {
    assert_eq!(
        kinds("x // trailing"),
        [TokenKind::Identifier, TokenKind::Comment, TokenKind::Eof]
    );
}

#[test]
fn unexpected_char() {
    let err = Scanner::new("let @").scan().unwrap_err();

    assert_eq!(err.kind, LexerErrorKind::UnexpectedChar('@'));
    assert_eq!((err.line, err.col), (1, 5));
}

#[test]
fn underscore_is_not_an_identifier_char() {
    assert_eq!(scan_err("a_b"), LexerErrorKind::UnexpectedChar('_'));
}

#[test]
fn token_length() {
    assert_eq!(scan("let")[0].length(), 3);
}
