//! Source text to syntax tree: `logos` lexer plus a recursive-descent parser.

pub mod lexer;
pub mod parser;
