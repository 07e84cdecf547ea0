use crate::span::Span;

/// 一个 Token = 词法分析后的最小“语法积木”。
///
/// 例子：`var PI 3.14`
/// 会被切成：Var, Ident("PI"), Number("3.14"), Eof
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Token 的类别
    pub kind: TokenKind,
    /// 匹配到的原文。字符串 token 不含两侧引号；Eof 为空串。
    pub text: String,
    /// Token 在源代码中的位置
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// 第一个字符所在的行（从 1 开始）。
    pub fn line(&self) -> usize {
        self.span.start_line
    }

    /// 第一个字符所在的列（从 1 开始）。
    pub fn column(&self) -> usize {
        self.span.start_col
    }
}

/// Token 的种类枚举（封闭集合）。
///
/// 字面量的内容统一放在 `Token::text` 里，这里只保留“类别”，
/// 这样 Parser 做 lookahead 时只需要比较一个简单的枚举。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ---------- 关键字 ----------
    Var,

    // ---------- 语义性 Token（内容在 text 中） ----------
    /// 标识符：例如 `PI`、`x1`、`_tmp`
    Ident,
    /// 字符串字面量（原样保存，不处理转义）
    String,
    /// 小数字面量：`digits? '.' digits+`
    Number,

    // ---------- 符号 ----------
    /// `@(`
    OpenConstRef,
    /// `$[`
    OpenMapping,
    /// `]`
    CloseBracket,
    Colon,
    Comma,
    OpenParen,
    CloseParen,

    Eof,
}
