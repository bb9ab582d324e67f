//! esfront_core: Core utilities for the esfront JavaScript/TypeScript front end.
//!
//! Provides source text views, byte ranges and line/column mapping used by
//! the lexer, the parser and every diagnostic.

pub mod text;

// Re-export commonly used types
pub use text::{LineCol, LineMap, Loc, Source, TextPos, TextRange};
