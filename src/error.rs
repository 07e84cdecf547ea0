use crate::span::Span;
use thiserror::Error;

/// 词法错误。
///
/// 设计要点：
/// - `kind`：可穷举匹配的错误种类（测试断言、分类统计都用它）。
/// - `span`：错误发生的位置（byte offset + line/col），便于定位。
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("lex error: {kind} at {span}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// `=begin` 之后直到输入结束都没有 `=cut`
    #[error("unterminated block comment")]
    UnterminatedComment,
    /// 字符串缺少结尾的 `"`
    #[error("unterminated string")]
    UnterminatedString,
    /// 数字不符合 `digits? '.' digits+`（例如整数 `42`）
    #[error("invalid number")]
    InvalidNumber,
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// 机器可读的错误码（例如 `UnexpectedChar`）。
    pub fn code(&self) -> &'static str {
        match self.kind {
            LexErrorKind::UnterminatedComment => "UnterminatedComment",
            LexErrorKind::UnterminatedString => "UnterminatedString",
            LexErrorKind::InvalidNumber => "InvalidNumber",
            LexErrorKind::UnexpectedChar(_) => "UnexpectedChar",
        }
    }

    pub fn line(&self) -> usize {
        self.span.start_line
    }

    pub fn column(&self) -> usize {
        self.span.start_col
    }
}

/// 语法错误。span 继承自出错的那个 token。
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("parse error: {kind} at {span}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// 值的位置上出现了不能开始一个值的 token
    #[error("invalid value")]
    InvalidValue,
    /// `@(NAME)` 引用了未声明的常量
    #[error("unknown constant {0:?}")]
    UnknownConstant(String),
    /// `var` 或 `@(` 之后缺少标识符
    #[error("expected identifier")]
    ExpectedIdentifier,
    /// 映射的 key 既不是标识符也不是字符串
    #[error("expected mapping key")]
    ExpectedKey,
    #[error("missing ':' after mapping key")]
    MissingColon,
    #[error("missing ']' to close mapping")]
    MissingCloseBracket,
    #[error("missing ')' to close constant reference")]
    MissingCloseParen,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn code(&self) -> &'static str {
        match self.kind {
            ParseErrorKind::InvalidValue => "InvalidValue",
            ParseErrorKind::UnknownConstant(_) => "UnknownConstant",
            ParseErrorKind::ExpectedIdentifier => "ExpectedIdentifier",
            ParseErrorKind::ExpectedKey => "ExpectedKey",
            ParseErrorKind::MissingColon => "MissingColon",
            ParseErrorKind::MissingCloseBracket => "MissingCloseBracket",
            ParseErrorKind::MissingCloseParen => "MissingCloseParen",
        }
    }

    pub fn line(&self) -> usize {
        self.span.start_line
    }

    pub fn column(&self) -> usize {
        self.span.start_col
    }
}

/// XML 输出阶段的错误。
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum XmlError {
    /// 映射的 key 不能作为 XML 元素名（例如 `"a b"`、`"1x"`）
    #[error("{name:?} is not a valid XML element name")]
    InvalidElementName { name: String },
    /// 文本中含有 XML 1.0 不允许的字符（例如 U+0001）
    #[error("character {ch:?} cannot appear in XML text")]
    InvalidCharacter { ch: char },
}

/// 整条流水线（lex -> parse -> xml）的统一错误类型。
///
/// 各阶段的错误通过 `#[from]` 自动转换，调用方可以直接用 `?`。
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Xml(#[from] XmlError),
}

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::Lex(e) => e.code(),
            Error::Parse(e) => e.code(),
            Error::Xml(XmlError::InvalidElementName { .. }) => "InvalidElementName",
            Error::Xml(XmlError::InvalidCharacter { .. }) => "InvalidCharacter",
        }
    }

    /// 源码位置；XML 阶段的错误没有源码位置。
    pub fn span(&self) -> Option<Span> {
        match self {
            Error::Lex(e) => Some(e.span),
            Error::Parse(e) => Some(e.span),
            Error::Xml(_) => None,
        }
    }
}
