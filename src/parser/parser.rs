use crate::env::Environment;
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;
use crate::value::{Mapping, Value};

/// 解析器入口：将 Token 列表解析为顶层值序列（`var` 声明不产生输出）。
pub fn parse(tokens: &[Token]) -> Result<Vec<Value>, ParseError> {
    Ok(parse_document(tokens)?.values)
}

/// 与 [`parse`] 相同，但同时返回解析结束时的常量环境。
pub fn parse_document(tokens: &[Token]) -> Result<Document, ParseError> {
    Parser::new(tokens).parse_document()
}

/// 一次解析的完整结果。
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    /// 顶层值，按源码顺序
    pub values: Vec<Value>,
    /// 解析结束时的常量环境（只用于检查，下游输出不依赖它）
    pub constants: Environment,
}

/// 递归下降解析器。
///
/// - Parser 就像一个“指针”，在 Token 列表上从左到右走，`i` 是当前位置。
/// - `peek_*` 表示“偷看一下”，不移动光标；`advance()` 吃掉一个 token。
/// - 常量环境 `env` 是解析器自己的字段，每次解析都是全新的一份。
///
/// 输入可以不以 `Eof` 结尾：走到切片末尾同样视为 EOF。
pub struct Parser<'a> {
    tokens: &'a [Token],
    i: usize,
    env: Environment,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            i: 0,
            env: Environment::new(),
        }
    }

    /// 解析整个文档：`document := (declaration | value)* EOF`
    pub fn parse_document(mut self) -> Result<Document, ParseError> {
        let mut values = Vec::new();
        while !self.is_eof() {
            match self.peek_kind() {
                Some(TokenKind::Var) => self.parse_declaration()?,
                _ => values.push(self.parse_value()?),
            }
        }
        log::debug!(
            "parsed {} top-level values, {} constants",
            values.len(),
            self.env.len()
        );
        Ok(Document {
            values,
            constants: self.env,
        })
    }

    /// 解析常量声明：`"var" IDENT value`
    ///
    /// 值绑定进环境（覆盖同名旧值），不进入输出序列。
    fn parse_declaration(&mut self) -> Result<(), ParseError> {
        self.advance(); // 吃掉 'var'
        let name = self.expect_ident()?;
        let value = self.parse_value()?;
        log::trace!("bind constant {} = {}", name.text, value);
        if self.env.bind(name.text.clone(), value).is_some() {
            log::debug!("constant {:?} redeclared at {}", name.text, name.span);
        }
        Ok(())
    }

    /// 解析一个值（一个 token 的 lookahead）：
    /// - Number -> `Value::Number`
    /// - String -> `Value::Text`
    /// - `$[` -> 映射
    /// - `@(` -> 常量引用
    fn parse_value(&mut self) -> Result<Value, ParseError> {
        let Some(tok) = self.peek() else {
            return Err(self.err_eof(ParseErrorKind::InvalidValue));
        };
        match tok.kind {
            TokenKind::Number => {
                // Lexer 已经保证了 `digits? '.' digits+` 的形状；
                // 这里仍然处理失败，因为 token 也可能由调用方手工构造
                let n = tok
                    .text
                    .parse::<f64>()
                    .map_err(|_| ParseError::new(ParseErrorKind::InvalidValue, tok.span))?;
                self.advance();
                Ok(Value::Number(n))
            }
            TokenKind::String => {
                self.advance();
                Ok(Value::Text(tok.text.clone()))
            }
            TokenKind::OpenMapping => self.parse_mapping(),
            TokenKind::OpenConstRef => self.parse_const_ref(),
            _ => Err(self.err_here(ParseErrorKind::InvalidValue)),
        }
    }

    /// 解析映射：`"$[" (entry ("," entry)*)? "]"`，`entry := KEY ":" value`
    ///
    /// 重复的 key：后写的值覆盖先写的值，key 保持第一次出现的位置。
    fn parse_mapping(&mut self) -> Result<Value, ParseError> {
        self.advance(); // 吃掉 '$['
        let mut mapping = Mapping::new();

        if self.eat(TokenKind::CloseBracket) {
            return Ok(Value::Mapping(mapping));
        }

        loop {
            let key = self.expect_key()?;
            self.expect(TokenKind::Colon, ParseErrorKind::MissingColon)?;
            let value = self.parse_value()?;
            if mapping.insert(key.text.clone(), value).is_some() {
                log::debug!("duplicate key {:?} at {}, last value wins", key.text, key.span);
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        self.expect(TokenKind::CloseBracket, ParseErrorKind::MissingCloseBracket)?;
        Ok(Value::Mapping(mapping))
    }

    /// 解析常量引用：`"@(" IDENT ")"`，结果是当前绑定值的深拷贝。
    fn parse_const_ref(&mut self) -> Result<Value, ParseError> {
        self.advance(); // 吃掉 '@('
        let name = self.expect_ident()?;
        self.expect(TokenKind::CloseParen, ParseErrorKind::MissingCloseParen)?;
        match self.env.resolve(&name.text) {
            Some(value) => {
                log::trace!("resolve constant {} at {}", name.text, name.span);
                Ok(value)
            }
            None => Err(ParseError::new(
                ParseErrorKind::UnknownConstant(name.text.clone()),
                name.span,
            )),
        }
    }

    fn expect_ident(&mut self) -> Result<&'a Token, ParseError> {
        match self.peek() {
            Some(tok) if tok.kind == TokenKind::Ident => {
                self.advance();
                Ok(tok)
            }
            _ => Err(self.err_here(ParseErrorKind::ExpectedIdentifier)),
        }
    }

    /// 映射的 key：标识符或字符串。
    fn expect_key(&mut self) -> Result<&'a Token, ParseError> {
        match self.peek() {
            Some(tok) if matches!(tok.kind, TokenKind::Ident | TokenKind::String) => {
                self.advance();
                Ok(tok)
            }
            _ => Err(self.err_here(ParseErrorKind::ExpectedKey)),
        }
    }

    /// 要求当前 token 是 `kind`，否则返回给定种类的错误。
    fn expect(&mut self, kind: TokenKind, err: ParseErrorKind) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.err_here(err))
        }
    }

    /// 如果当前 token 是 `kind` 就吃掉它并返回 true。
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// 偷看当前 token（不前进）。
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.i)
    }

    /// 偷看当前 token 的 kind（不前进）。
    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    /// 光标右移一格。
    fn advance(&mut self) {
        if self.i < self.tokens.len() {
            self.i += 1;
        }
    }

    fn is_eof(&self) -> bool {
        matches!(self.peek_kind(), None | Some(TokenKind::Eof))
    }

    /// 构造一个错误：定位到“当前 token”的 span。
    ///
    /// 如果已经没有 token，就退化为使用最后一个 token 的 span（见 eof_span）。
    fn err_here(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.peek().map_or_else(|| self.eof_span(), |t| t.span))
    }

    fn err_eof(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.eof_span())
    }

    /// 计算一个“EOF 时的 span”。
    ///
    /// - 如果 tokens 非空：使用最后一个 token 的 span
    /// - 如果 tokens 为空：使用默认 span（1:1..1:1）
    fn eof_span(&self) -> Span {
        self.tokens.last().map(|t| t.span).unwrap_or_default()
    }
}
