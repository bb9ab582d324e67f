//! Lexer for ECMAScript, TypeScript and JSX source text.
//!
//! The [`Lexer`] keeps an explicit stack of [`LexMode`]s; the parser pushes
//! and pops modes as it enters JSX tags, JSX children and template literals.
//! Numeric literal text is decoded by the functions in [`numeric`].

pub mod char_codes;
pub mod jsx_entities;
pub mod lexer;
pub mod numeric;
pub mod token;

pub use lexer::{tokenize, LexMode, Lexer, LexerCheckpoint};
pub use token::{TemplateValue, Token, TokenValue};
