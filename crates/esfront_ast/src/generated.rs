//! Generated accessors for AST nodes.
//!
//! [`NodeRef`] is a borrowed view over any node. The sum types (`Statement`,
//! `Expression`, ...) get `data()`, `ty()` and `range()` accessors and convert
//! into `NodeRef`.

use crate::node::*;
use crate::node_type::NodeType;
use esfront_core::text::TextRange;

macro_rules! node_refs {
    (
        with_lifetime: $($lt:ident),* $(,)?;
        plain: $($plain:ident),* $(,)?;
    ) => {
        /// A borrowed reference to any AST node.
        #[derive(Debug, Clone, Copy)]
        pub enum NodeRef<'a> {
            $($lt(&'a $lt<'a>),)*
            $($plain(&'a $plain),)*
        }

        impl<'a> NodeRef<'a> {
            pub fn data(&self) -> &'a NodeData {
                match *self {
                    $(NodeRef::$lt(n) => &n.data,)*
                    $(NodeRef::$plain(n) => &n.data,)*
                }
            }
        }

        $(
            impl<'a> From<&'a $lt<'a>> for NodeRef<'a> {
                fn from(node: &'a $lt<'a>) -> Self {
                    NodeRef::$lt(node)
                }
            }
        )*
        $(
            impl<'a> From<&'a $plain> for NodeRef<'a> {
                fn from(node: &'a $plain) -> Self {
                    NodeRef::$plain(node)
                }
            }
        )*
    };
}

node_refs! {
    with_lifetime:
        Program, ExprStmt, BlockStmt, WithStmt, ReturnStmt, LabeledStmt, BreakStmt,
        ContinueStmt, IfStmt, SwitchStmt, SwitchCase, ThrowStmt, TryStmt, CatchClause,
        WhileStmt, DoWhileStmt, ForStmt, ForInStmt, ForOfStmt, VarDecl, VarDeclarator,
        FunctionDecl, ClassDecl, Directive,
        ImportDecl, ImportSpecifier, ImportDefaultSpecifier, ImportNamespaceSpecifier,
        ExportNamedDecl, ExportSpecifier, ExportDefaultDecl, ExportAllDecl,
        Identifier, PrivateName, StringLit, NumLit, BigIntLit, RegExpLit, TemplateLit,
        TemplateElement, TaggedTemplate, ArrayExpr, ObjectExpr, Property, SpreadElement,
        FunctionExpr, ArrowExpr, ClassExpr, UnaryExpr, UpdateExpr, BinaryExpr, LogicalExpr,
        AssignExpr, CondExpr, SeqExpr, CallExpr, NewExpr, MemberExpr, ChainExpr, ParenExpr,
        YieldExpr, AwaitExpr, MetaProp, ImportExpr,
        Param, ObjectPat, PatProperty, ArrayPat, RestElement, AssignPat,
        ClassMethod, ClassProp, StaticBlock,
        JsxElement, JsxOpeningElement, JsxClosingElement, JsxAttr, JsxSpreadAttr, JsxText,
        JsxExprContainer, JsxSpreadChild, JsxIdent, JsxMemberExpr, JsxNamespacedName,
        TsAsExpr, TsSatisfiesExpr, TsNonNullExpr, TsTypeAliasDecl, TsInterfaceDecl,
        TsEnumDecl, TsEnumMember, TsExprWithTypeArgs, TsTypeRef, TsQualifiedName,
        TsLitType, TsArrayType, TsTupleType, TsUnionType, TsIntersectionType, TsParenType,
        TsFnType, TsTypeLit, TsPropSig, TsMethodSig, TsIndexSig, TsTypeQuery,
        TsTypeOperator, TsIndexedAccessType, TsTypeParam;
    plain:
        EmptyStmt, DebuggerStmt, BoolLit, NullLit, ThisExpr, SuperExpr, JsxEmptyExpr,
        TsKeywordType;
}

impl<'a> NodeRef<'a> {
    pub fn ty(&self) -> NodeType {
        self.data().ty
    }

    pub fn range(&self) -> TextRange {
        self.data().range
    }
}

macro_rules! impl_node_enum {
    ($name:ident { $($variant:ident),* $(,)? $(; nested: $($nested:ident),* $(,)?)? }) => {
        impl<'a> $name<'a> {
            pub fn data(&self) -> &'a NodeData {
                match *self {
                    $($name::$variant(n) => &n.data,)*
                    $($($name::$nested(n) => n.data(),)*)?
                }
            }

            pub fn ty(&self) -> NodeType {
                self.data().ty
            }

            pub fn range(&self) -> TextRange {
                self.data().range
            }
        }

        impl<'a> From<$name<'a>> for NodeRef<'a> {
            fn from(node: $name<'a>) -> Self {
                match node {
                    $($name::$variant(n) => NodeRef::from(n),)*
                    $($($name::$nested(n) => NodeRef::from(n),)*)?
                }
            }
        }
    };
}

impl_node_enum!(Statement {
    Expr, Block, Empty, Debugger, With, Return, Labeled, Break, Continue, If, Switch,
    Throw, Try, While, DoWhile, For, ForIn, ForOf, Var, Function, Class, Directive,
    Import, ExportNamed, ExportDefault, ExportAll, TsTypeAlias, TsInterface, TsEnum,
});

impl_node_enum!(Expression {
    Ident, PrivateName, Str, Num, BigInt, Bool, Null, RegExp, Template, TaggedTemplate,
    This, Super, Array, Object, Function, Arrow, Class, Unary, Update, Binary, Logical,
    Assign, Cond, Seq, Call, New, Member, Chain, Paren, Yield, Await, MetaProp, Import,
    Jsx, TsAs, TsSatisfies, TsNonNull,
});

impl_node_enum!(Pattern { Ident, Object, Array, Rest, Assign; nested: Expr });
impl_node_enum!(ObjectPatProp { Prop, Rest });
impl_node_enum!(ExprOrSpread { Spread; nested: Expr });
impl_node_enum!(ObjectMember { Prop, Spread });
impl_node_enum!(PropKey { Ident, Str, Num, BigInt, Private; nested: Computed });
impl_node_enum!(MemberProp { Ident, Private; nested: Computed });
impl_node_enum!(ForInit { Var; nested: Expr });
impl_node_enum!(ForHead { Var; nested: Pattern });
impl_node_enum!(ArrowBody { Block; nested: Expr });
impl_node_enum!(ClassMember { Method, Prop, StaticBlock });
impl_node_enum!(ImportSpec { Named, Default, Namespace });
impl_node_enum!(ModuleExportName { Ident, Str });
impl_node_enum!(DefaultDecl { Function, Class, TsInterface; nested: Expr });
impl_node_enum!(JsxName { Ident, Member, Namespaced });
impl_node_enum!(JsxAttrItem { Attr, Spread });
impl_node_enum!(JsxAttrValue { Str, Expr, Element });
impl_node_enum!(JsxChild { Text, Expr, Spread, Element });
impl_node_enum!(JsxExpr { Empty; nested: Expr });
impl_node_enum!(TsType {
    Keyword, Ref, Lit, Array, Tuple, Union, Intersection, Paren, Fn, TypeLit, Query,
    Operator, IndexedAccess,
});
impl_node_enum!(TsEntityName { Ident, Qualified });
impl_node_enum!(TsTypeElement { Prop, Method, Index });

impl<'a> Expression<'a> {
    /// Strip any number of enclosing parentheses.
    pub fn unparenthesized(self) -> Expression<'a> {
        let mut expr = self;
        while let Expression::Paren(paren) = expr {
            expr = paren.expr;
        }
        expr
    }

    pub fn as_ident(&self) -> Option<&'a Identifier<'a>> {
        match *self {
            Expression::Ident(id) => Some(id),
            _ => None,
        }
    }
}

impl<'a> Statement<'a> {
    /// Whether this statement declares a binding (`let`, `const`, class,
    /// function or TypeScript declaration).
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            Statement::Var(_)
                | Statement::Function(_)
                | Statement::Class(_)
                | Statement::TsTypeAlias(_)
                | Statement::TsInterface(_)
                | Statement::TsEnum(_)
        )
    }
}
