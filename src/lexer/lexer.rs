use crate::error::{LexError, LexErrorKind};
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

const COMMENT_BEGIN: &str = "=begin";
const COMMENT_END: &str = "=cut";

/// 词法分析入口：把源代码切成一串 Token，最后一个总是 `Eof`。
///
/// - 跳过空白与 `=begin ... =cut` 块注释
/// - 出错时返回携带 Span 的 LexError（包含 line/col）
pub fn lex(src: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Lexer::new(src).lex_all()?;
    log::debug!("lexed {} tokens from {} bytes", tokens.len(), src.len());
    Ok(tokens)
}

/// 词法分析器的内部状态（扫描指针）。
///
/// 这里用 `byte_pos` 保存当前位置的 byte offset（UTF-8）。
/// 同时维护 `line/col` 方便报错定位。
struct Lexer<'a> {
    src: &'a str,
    byte_pos: usize,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            byte_pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// 扫描整个输入，直到 EOF。
    fn lex_all(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            // 先跳过空白和注释，保证下一个字符是“有意义的 Token 起点”
            self.skip_ws_and_comments()?;

            // 记录 token 起点位置（byte offset + line/col）
            let start_pos = self.mark();
            let Some(ch) = self.peek_char() else {
                break;
            };

            // 两字符符号必须先于单字符判断，单独的 `@` / `$` 走到最后的 UnexpectedChar
            let kind = match ch {
                '@' if self.peek_is("@(") => {
                    self.bump_str("@(");
                    TokenKind::OpenConstRef
                }
                '$' if self.peek_is("$[") => {
                    self.bump_str("$[");
                    TokenKind::OpenMapping
                }
                ']' => {
                    self.bump_char();
                    TokenKind::CloseBracket
                }
                ':' => {
                    self.bump_char();
                    TokenKind::Colon
                }
                ',' => {
                    self.bump_char();
                    TokenKind::Comma
                }
                '(' => {
                    self.bump_char();
                    TokenKind::OpenParen
                }
                ')' => {
                    self.bump_char();
                    TokenKind::CloseParen
                }
                '"' => self.lex_string()?,
                c if is_ident_start(c) => self.lex_ident_or_keyword(),
                c if c.is_ascii_digit() => self.lex_number()?,
                '.' if self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit()) => {
                    self.lex_number()?
                }
                c => {
                    return Err(self.err_at(LexErrorKind::UnexpectedChar(c), start_pos));
                }
            };

            // token 结束位置：注意 `mark()` 取的是“当前扫描指针”，所以 end 是开区间
            let end_pos = self.mark();
            let text = match kind {
                // 去掉两侧引号
                TokenKind::String => &self.src[start_pos.offset + 1..end_pos.offset - 1],
                _ => &self.src[start_pos.offset..end_pos.offset],
            };
            let token = Token::new(
                kind,
                text,
                Span::new_with_line_col(
                    start_pos.offset,
                    end_pos.offset,
                    start_pos.line,
                    start_pos.col,
                    end_pos.line,
                    end_pos.col,
                ),
            );
            log::trace!(
                "token {:?} {:?} at {}:{}",
                token.kind,
                token.text,
                token.line(),
                token.column()
            );
            tokens.push(token);
        }

        let end = self.mark();
        tokens.push(Token::new(
            TokenKind::Eof,
            "",
            Span::point(end.offset, end.line, end.col),
        ));
        Ok(tokens)
    }

    /// 跳过空白与块注释，二者交替出现时一直跳到都不再前进为止。
    ///
    /// - 空白：`char::is_whitespace`
    /// - 块注释：`=begin ... =cut`，中间的换行照常推进行号
    fn skip_ws_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            let mut progressed = false;
            while let Some(ch) = self.peek_char() {
                if ch.is_whitespace() {
                    self.bump_char();
                    progressed = true;
                } else {
                    break;
                }
            }

            if self.peek_is(COMMENT_BEGIN) {
                let start = self.mark();
                self.bump_str(COMMENT_BEGIN);
                while !self.is_eof() && !self.peek_is(COMMENT_END) {
                    self.bump_char();
                }
                if self.peek_is(COMMENT_END) {
                    self.bump_str(COMMENT_END);
                } else {
                    return Err(self.err_at(LexErrorKind::UnterminatedComment, start));
                }
                continue;
            }

            if !progressed {
                break;
            }
        }

        Ok(())
    }

    /// 读取小数：`digits? '.' digits+`。
    ///
    /// 整数部分可省略（`.5`），小数点和小数部分不可省略（`42`、`3.` 都是错误）。
    fn lex_number(&mut self) -> Result<TokenKind, LexError> {
        let start = self.mark();
        self.bump_while(|c| c.is_ascii_digit());
        if !self.try_bump('.') {
            return Err(self.err_at(LexErrorKind::InvalidNumber, start));
        }
        if self.bump_while(|c| c.is_ascii_digit()) == 0 {
            return Err(self.err_at(LexErrorKind::InvalidNumber, start));
        }
        Ok(TokenKind::Number)
    }

    /// 读取双引号字符串：`"..."`。
    ///
    /// 内容原样保留：不处理转义，允许跨行。遇到 EOF 还没闭合则报 `UnterminatedString`。
    fn lex_string(&mut self) -> Result<TokenKind, LexError> {
        let start = self.mark();
        // 消费开头的 `"`
        self.bump_char();

        while let Some(ch) = self.bump_char() {
            if ch == '"' {
                return Ok(TokenKind::String);
            }
        }

        Err(self.err_at(LexErrorKind::UnterminatedString, start))
    }

    /// 读取标识符，并在此处做“关键字识别”。
    ///
    /// `var` 只在整个单词恰好是 `var` 时才算关键字，`variable` 仍是一个标识符。
    fn lex_ident_or_keyword(&mut self) -> TokenKind {
        let start = self.byte_pos;
        self.bump_while(is_ident_continue);
        match &self.src[start..self.byte_pos] {
            "var" => TokenKind::Var,
            _ => TokenKind::Ident,
        }
    }

    /// 是否到达输入末尾。
    fn is_eof(&self) -> bool {
        self.byte_pos >= self.src.len()
    }

    /// 查看当前字符（不消费）。
    fn peek_char(&self) -> Option<char> {
        self.src[self.byte_pos..].chars().next()
    }

    /// 向前查看第 n 个字符（不消费）。
    fn peek_char_n(&self, n: usize) -> Option<char> {
        self.src[self.byte_pos..].chars().nth(n)
    }

    /// 消费一个字符，并同步更新 byte offset 与 line/col。
    fn bump_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.byte_pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    /// 连续消费满足条件的字符，返回消费的个数。
    fn bump_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let mut n = 0;
        while let Some(ch) = self.peek_char() {
            if !pred(ch) {
                break;
            }
            self.bump_char();
            n += 1;
        }
        n
    }

    /// 如果下一个字符等于 expected，就消费它并返回 true；否则不动并返回 false。
    fn try_bump(&mut self, expected: char) -> bool {
        match self.peek_char() {
            Some(ch) if ch == expected => {
                self.bump_char();
                true
            }
            _ => false,
        }
    }

    /// 判断当前位置是否以某个字符串开头（用于 `=begin`、`=cut`、`@(`、`$[`）。
    fn peek_is(&self, s: &str) -> bool {
        self.src[self.byte_pos..].starts_with(s)
    }

    /// 消费一个短字符串。
    fn bump_str(&mut self, s: &str) {
        for _ in 0..s.chars().count() {
            self.bump_char();
        }
    }

    /// 在某个位置构造一个错误（Span 的起止点都指向该位置）。
    fn err_at(&self, kind: LexErrorKind, pos: Mark) -> LexError {
        LexError::new(kind, Span::point(pos.offset, pos.line, pos.col))
    }

    /// 记录当前扫描指针的位置（byte offset + line/col）。
    fn mark(&self) -> Mark {
        Mark {
            offset: self.byte_pos,
            line: self.line,
            col: self.col,
        }
    }
}

/// 记录 Lexer 扫描指针的位置（内部使用）。
#[derive(Clone, Copy)]
struct Mark {
    offset: usize,
    line: usize,
    col: usize,
}

/// 标识符首字符规则：字母或 `_`。
fn is_ident_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}

/// 标识符后续字符规则：字母/数字/`_`。
fn is_ident_continue(ch: char) -> bool {
    is_ident_start(ch) || ch.is_ascii_digit()
}
