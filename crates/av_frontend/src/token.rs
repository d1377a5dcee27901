use std::fmt;

use av_diagnostic::span::Span;

use crate::ast::Width;
use crate::NodeCopy;

/// A classified fragment of source text.
///
/// `line` and `col` are one-based and point at the first character of the
/// token. `col` counts characters, not bytes; `span` is in bytes. For strings the lexeme excludes the quotes; for comments it is the
/// text after `//`.
#[derive(NodeCopy!)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub lexeme: &'src str,
    pub span: Span,
    pub line: usize,
    pub col: usize,
}

impl Token<'_> {
    pub fn length(&self) -> usize {
        self.lexeme.len()
    }

    /// Describe the token for "found ..." error messages.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Identifier => format!("identifier `{}`", self.lexeme),
            TokenKind::Number(_) => format!("number `{}`", self.lexeme),
            TokenKind::String => format!("string \"{}\"", self.lexeme),
            kind => kind.token_name().to_owned(),
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {:?} {:?}", self.line, self.col, self.kind, self.lexeme)
    }
}

#[derive(NodeCopy!)]
pub enum TokenKind {
    Keyword(Keyword),
    Identifier,
    String,
    Number(i64),

    LParen,
    RParen,
    LBrace,
    RBrace,

    Comma,
    Dot,
    Colon,
    Semicolon,
    Ampersand,

    Add,
    Sub,
    Mul,
    Div,

    Bang,
    Assign,
    Lt,
    Gt,

    EqEq,
    NotEq,
    LtEq,
    GtEq,
    Increment,
    Decrement,

    Comment,

    /// A string that ran into the end of input.
    Unknown,
    Eof,
}

#[derive(NodeCopy!)]
pub enum Keyword {
    Let,
    If,
    Else,
    Call,
    Func,
    Return,

    Byte,
    Word,
    Dword,
    Qword,
}

impl Keyword {
    pub fn width(self) -> Option<Width> {
        match self {
            Keyword::Byte => Some(Width::Byte),
            Keyword::Word => Some(Width::Word),
            Keyword::Dword => Some(Width::Dword),
            Keyword::Qword => Some(Width::Qword),
            _ => None,
        }
    }
}

impl TokenKind {
    /// Whether a `(` followed by this token opens a cast.
    pub fn starts_type(self) -> bool {
        match self {
            TokenKind::Ampersand => true,
            TokenKind::Keyword(kw) => kw.width().is_some(),
            _ => false,
        }
    }

    pub fn token_name(&self) -> &'static str {
        match self {
            TokenKind::Keyword(kw) => match kw {
                Keyword::Let => "keyword `let`",
                Keyword::If => "keyword `if`",
                Keyword::Else => "keyword `else`",
                Keyword::Call => "keyword `call`",
                Keyword::Func => "keyword `fn`",
                Keyword::Return => "keyword `return`",
                Keyword::Byte => "keyword `byte`",
                Keyword::Word => "keyword `word`",
                Keyword::Dword => "keyword `dword`",
                Keyword::Qword => "keyword `qword`",
            },
            TokenKind::Identifier => "identifier",
            TokenKind::String => "string",
            TokenKind::Number(_) => "number",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Comma => "`,`",
            TokenKind::Dot => "`.`",
            TokenKind::Colon => "`:`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Ampersand => "`&`",
            TokenKind::Add => "`+`",
            TokenKind::Sub => "`-`",
            TokenKind::Mul => "`*`",
            TokenKind::Div => "`/`",
            TokenKind::Bang => "`!`",
            TokenKind::Assign => "`=`",
            TokenKind::Lt => "`<`",
            TokenKind::Gt => "`>`",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::LtEq => "`<=`",
            TokenKind::GtEq => "`>=`",
            TokenKind::Increment => "`++`",
            TokenKind::Decrement => "`--`",
            TokenKind::Comment => "comment",
            TokenKind::Unknown => "unterminated string",
            TokenKind::Eof => "end of file",
        }
    }
}
