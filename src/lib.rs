pub mod env;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod value;
pub mod xml;

// 对外公开的核心类型/函数（给 CLI、测试、以及其它 Rust 项目使用）。
pub use env::Environment;
pub use error::{Error, LexError, LexErrorKind, ParseError, ParseErrorKind, XmlError};
pub use lexer::{lex, Token, TokenKind};
pub use parser::{parse, parse_document, Document, Parser};
pub use span::Span;
pub use value::{Mapping, Value};
pub use xml::{to_xml, XmlOptions};

/// 源码 -> 顶层值序列（lex + parse）。
pub fn parse_source(src: &str) -> Result<Vec<Value>, Error> {
    let tokens = lex(src)?;
    Ok(parse(&tokens)?)
}

/// 完整流水线：源码 -> XML 文本。
pub fn compile(src: &str, opts: &XmlOptions) -> Result<String, Error> {
    let values = parse_source(src)?;
    Ok(to_xml(&values, opts)?)
}
