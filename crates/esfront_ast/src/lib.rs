//! esfront_ast: Token kinds and Abstract Syntax Tree definitions.
//!
//! This crate defines the static token kind table, the node type tags, all
//! AST node types and the traversal contract that downstream tools use.

pub mod generated;
pub mod node;
pub mod node_type;
pub mod token_kind;
pub mod types;
pub mod visitor;

// Re-export key types
pub use generated::NodeRef;
pub use node::*;
pub use node_type::NodeType;
pub use token_kind::{keyword_kind, TokenKind, TokenKindInfo, TOKEN_KINDS};
pub use types::*;
pub use visitor::{listen_node, listen_program, Listener, Listeners, VisitControl, VisitInfo, VisitPhase};
