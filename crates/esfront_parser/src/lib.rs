//! esfront_parser: Recursive descent parser for ECMAScript, TypeScript and JSX.
//!
//! Pulls tokens from the lexer on demand and builds an arena-allocated AST.
//! TypeScript and JSX syntax are opt-in through [`ParserOptions`].

mod expression;
mod jsx;
pub mod options;
mod parser;
mod precedence;
mod statement;
mod typescript;
mod utilities;

pub use options::{Features, ParserOptions};
pub use parser::{parse, PResult, Parser};
