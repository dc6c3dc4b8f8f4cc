pub mod preprocess;
pub mod splitter;
pub mod token;
pub mod lexer;
pub mod ast;
pub mod expr;
pub mod parser;
