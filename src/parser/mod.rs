pub mod parser;

pub use parser::{parse, parse_document, Document, Parser};
