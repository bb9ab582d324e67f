//! Node type tags.
//!
//! Every AST node carries exactly one `NodeType`, named after the node's
//! struct. Listener tables are indexed by `NodeType as usize`.

use std::fmt;

macro_rules! define_node_types {
    ($($variant:ident,)*) => {
        /// The type tag of an AST node.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum NodeType {
            $($variant,)*
        }

        impl NodeType {
            /// Every node type, in discriminant order.
            pub const ALL: [NodeType; NodeType::COUNT] = [$(NodeType::$variant,)*];
            /// Number of node types.
            pub const COUNT: usize = [$(stringify!($variant),)*].len();

            pub fn name(self) -> &'static str {
                match self {
                    $(NodeType::$variant => stringify!($variant),)*
                }
            }
        }
    };
}

define_node_types! {
    Program,

    // Statements
    ExprStmt,
    BlockStmt,
    EmptyStmt,
    DebuggerStmt,
    WithStmt,
    ReturnStmt,
    LabeledStmt,
    BreakStmt,
    ContinueStmt,
    IfStmt,
    SwitchStmt,
    SwitchCase,
    ThrowStmt,
    TryStmt,
    CatchClause,
    WhileStmt,
    DoWhileStmt,
    ForStmt,
    ForInStmt,
    ForOfStmt,
    VarDecl,
    VarDeclarator,
    FunctionDecl,
    ClassDecl,
    Directive,

    // Modules
    ImportDecl,
    ImportSpecifier,
    ImportDefaultSpecifier,
    ImportNamespaceSpecifier,
    ExportNamedDecl,
    ExportSpecifier,
    ExportDefaultDecl,
    ExportAllDecl,

    // Expressions
    Identifier,
    PrivateName,
    StringLit,
    NumLit,
    BigIntLit,
    BoolLit,
    NullLit,
    RegExpLit,
    TemplateLit,
    TemplateElement,
    TaggedTemplate,
    ThisExpr,
    SuperExpr,
    ArrayExpr,
    ObjectExpr,
    Property,
    SpreadElement,
    FunctionExpr,
    ArrowExpr,
    ClassExpr,
    UnaryExpr,
    UpdateExpr,
    BinaryExpr,
    LogicalExpr,
    AssignExpr,
    CondExpr,
    SeqExpr,
    CallExpr,
    NewExpr,
    MemberExpr,
    ChainExpr,
    ParenExpr,
    YieldExpr,
    AwaitExpr,
    MetaProp,
    ImportExpr,

    // Patterns and parameters
    Param,
    ObjectPat,
    PatProperty,
    ArrayPat,
    RestElement,
    AssignPat,

    // Class members
    ClassMethod,
    ClassProp,
    StaticBlock,

    // JSX
    JsxElement,
    JsxOpeningElement,
    JsxClosingElement,
    JsxAttr,
    JsxSpreadAttr,
    JsxText,
    JsxExprContainer,
    JsxEmptyExpr,
    JsxSpreadChild,
    JsxIdent,
    JsxMemberExpr,
    JsxNamespacedName,

    // TypeScript
    TsAsExpr,
    TsSatisfiesExpr,
    TsNonNullExpr,
    TsTypeAliasDecl,
    TsInterfaceDecl,
    TsEnumDecl,
    TsEnumMember,
    TsExprWithTypeArgs,
    TsKeywordType,
    TsTypeRef,
    TsQualifiedName,
    TsLitType,
    TsArrayType,
    TsTupleType,
    TsUnionType,
    TsIntersectionType,
    TsParenType,
    TsFnType,
    TsTypeLit,
    TsPropSig,
    TsMethodSig,
    TsIndexSig,
    TsTypeQuery,
    TsTypeOperator,
    TsIndexedAccessType,
    TsTypeParam,
}

impl NodeType {
    pub fn is_jsx(self) -> bool {
        (NodeType::JsxElement..=NodeType::JsxNamespacedName).contains(&self)
    }

    pub fn is_typescript(self) -> bool {
        self >= NodeType::TsAsExpr
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
