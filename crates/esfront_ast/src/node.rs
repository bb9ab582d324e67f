//! AST node definitions.
//!
//! Nodes are allocated in a bump arena and reference their children through
//! `&'a` references and `&'a [T]` slices. Every node starts with a
//! [`NodeData`] carrying its type tag and source range. Nodes hold no owned
//! heap data, so the arena never needs to run destructors.

use crate::node_type::NodeType;
use crate::types::*;
use esfront_core::text::TextRange;

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// Common data shared by all AST nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeData {
    /// The type tag of this node.
    pub ty: NodeType,
    /// Source range, half-open byte offsets.
    pub range: TextRange,
}

impl NodeData {
    pub fn new(ty: NodeType, range: TextRange) -> Self {
        Self { ty, range }
    }
}

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

/// Optional TypeScript information attached to identifiers and to
/// function-, class- and call-like nodes.
///
/// For functions and arrows `annotation` is the return type; for identifiers
/// it is the type annotation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypInfo<'a> {
    pub type_params: Option<NodeList<'a, TsTypeParam<'a>>>,
    pub type_args: Option<NodeList<'a, TsType<'a>>>,
    pub annotation: Option<TsType<'a>>,
    /// `x?` on parameters and class fields.
    pub optional: bool,
    /// `x!` on variable declarators and class fields.
    pub definite: bool,
}

impl<'a> TypInfo<'a> {
    pub fn is_empty(&self) -> bool {
        self.type_params.is_none()
            && self.type_args.is_none()
            && self.annotation.is_none()
            && !self.optional
            && !self.definite
    }
}

// ============================================================================
// Program
// ============================================================================

#[derive(Debug)]
pub struct Program<'a> {
    pub data: NodeData,
    pub body: NodeList<'a, Statement<'a>>,
    pub source_type: SourceType,
    /// Whether the top level is strict mode code.
    pub strict: bool,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Statement<'a> {
    Expr(&'a ExprStmt<'a>),
    Block(&'a BlockStmt<'a>),
    Empty(&'a EmptyStmt),
    Debugger(&'a DebuggerStmt),
    With(&'a WithStmt<'a>),
    Return(&'a ReturnStmt<'a>),
    Labeled(&'a LabeledStmt<'a>),
    Break(&'a BreakStmt<'a>),
    Continue(&'a ContinueStmt<'a>),
    If(&'a IfStmt<'a>),
    Switch(&'a SwitchStmt<'a>),
    Throw(&'a ThrowStmt<'a>),
    Try(&'a TryStmt<'a>),
    While(&'a WhileStmt<'a>),
    DoWhile(&'a DoWhileStmt<'a>),
    For(&'a ForStmt<'a>),
    ForIn(&'a ForInStmt<'a>),
    ForOf(&'a ForOfStmt<'a>),
    Var(&'a VarDecl<'a>),
    Function(&'a FunctionDecl<'a>),
    Class(&'a ClassDecl<'a>),
    Directive(&'a Directive<'a>),
    Import(&'a ImportDecl<'a>),
    ExportNamed(&'a ExportNamedDecl<'a>),
    ExportDefault(&'a ExportDefaultDecl<'a>),
    ExportAll(&'a ExportAllDecl<'a>),
    TsTypeAlias(&'a TsTypeAliasDecl<'a>),
    TsInterface(&'a TsInterfaceDecl<'a>),
    TsEnum(&'a TsEnumDecl<'a>),
}

#[derive(Debug)]
pub struct ExprStmt<'a> {
    pub data: NodeData,
    pub expr: Expression<'a>,
}

#[derive(Debug)]
pub struct BlockStmt<'a> {
    pub data: NodeData,
    pub body: NodeList<'a, Statement<'a>>,
}

#[derive(Debug)]
pub struct EmptyStmt {
    pub data: NodeData,
}

#[derive(Debug)]
pub struct DebuggerStmt {
    pub data: NodeData,
}

#[derive(Debug)]
pub struct WithStmt<'a> {
    pub data: NodeData,
    pub object: Expression<'a>,
    pub body: Statement<'a>,
}

#[derive(Debug)]
pub struct ReturnStmt<'a> {
    pub data: NodeData,
    pub arg: Option<Expression<'a>>,
}

#[derive(Debug)]
pub struct LabeledStmt<'a> {
    pub data: NodeData,
    pub label: &'a Identifier<'a>,
    pub body: Statement<'a>,
}

#[derive(Debug)]
pub struct BreakStmt<'a> {
    pub data: NodeData,
    pub label: Option<&'a Identifier<'a>>,
}

#[derive(Debug)]
pub struct ContinueStmt<'a> {
    pub data: NodeData,
    pub label: Option<&'a Identifier<'a>>,
}

#[derive(Debug)]
pub struct IfStmt<'a> {
    pub data: NodeData,
    pub test: Expression<'a>,
    pub cons: Statement<'a>,
    pub alt: Option<Statement<'a>>,
}

#[derive(Debug)]
pub struct SwitchStmt<'a> {
    pub data: NodeData,
    pub discriminant: Expression<'a>,
    pub cases: NodeList<'a, SwitchCase<'a>>,
}

#[derive(Debug)]
pub struct SwitchCase<'a> {
    pub data: NodeData,
    /// `None` for `default:`.
    pub test: Option<Expression<'a>>,
    pub cons: NodeList<'a, Statement<'a>>,
}

#[derive(Debug)]
pub struct ThrowStmt<'a> {
    pub data: NodeData,
    pub arg: Expression<'a>,
}

#[derive(Debug)]
pub struct TryStmt<'a> {
    pub data: NodeData,
    pub block: &'a BlockStmt<'a>,
    pub handler: Option<&'a CatchClause<'a>>,
    pub finalizer: Option<&'a BlockStmt<'a>>,
}

#[derive(Debug)]
pub struct CatchClause<'a> {
    pub data: NodeData,
    /// `None` for an optional catch binding.
    pub param: Option<Pattern<'a>>,
    pub body: &'a BlockStmt<'a>,
}

#[derive(Debug)]
pub struct WhileStmt<'a> {
    pub data: NodeData,
    pub test: Expression<'a>,
    pub body: Statement<'a>,
}

#[derive(Debug)]
pub struct DoWhileStmt<'a> {
    pub data: NodeData,
    pub body: Statement<'a>,
    pub test: Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum ForInit<'a> {
    Var(&'a VarDecl<'a>),
    Expr(Expression<'a>),
}

#[derive(Debug)]
pub struct ForStmt<'a> {
    pub data: NodeData,
    pub init: Option<ForInit<'a>>,
    pub test: Option<Expression<'a>>,
    pub update: Option<Expression<'a>>,
    pub body: Statement<'a>,
}

/// The left side of `for-in` and `for-of`.
#[derive(Debug, Clone, Copy)]
pub enum ForHead<'a> {
    Var(&'a VarDecl<'a>),
    Pattern(Pattern<'a>),
}

#[derive(Debug)]
pub struct ForInStmt<'a> {
    pub data: NodeData,
    pub left: ForHead<'a>,
    pub right: Expression<'a>,
    pub body: Statement<'a>,
}

#[derive(Debug)]
pub struct ForOfStmt<'a> {
    pub data: NodeData,
    pub left: ForHead<'a>,
    pub right: Expression<'a>,
    pub body: Statement<'a>,
    pub is_await: bool,
}

#[derive(Debug)]
pub struct VarDecl<'a> {
    pub data: NodeData,
    pub kind: VarKind,
    pub decls: NodeList<'a, VarDeclarator<'a>>,
}

#[derive(Debug)]
pub struct VarDeclarator<'a> {
    pub data: NodeData,
    pub name: Pattern<'a>,
    pub init: Option<Expression<'a>>,
}

#[derive(Debug)]
pub struct FunctionDecl<'a> {
    pub data: NodeData,
    pub func: Function<'a>,
}

#[derive(Debug)]
pub struct ClassDecl<'a> {
    pub data: NodeData,
    pub class: Class<'a>,
}

/// A string literal statement in a directive prologue, such as `"use strict"`.
#[derive(Debug)]
pub struct Directive<'a> {
    pub data: NodeData,
    /// The literal's source text without quotes, escapes not decoded.
    pub value: &'a str,
}

// ============================================================================
// Modules
// ============================================================================

/// A name in an import or export clause: an identifier or a string.
#[derive(Debug, Clone, Copy)]
pub enum ModuleExportName<'a> {
    Ident(&'a Identifier<'a>),
    Str(&'a StringLit<'a>),
}

impl<'a> ModuleExportName<'a> {
    pub fn value(&self) -> &'a str {
        match self {
            ModuleExportName::Ident(id) => id.name,
            ModuleExportName::Str(s) => s.value,
        }
    }
}

#[derive(Debug)]
pub struct ImportDecl<'a> {
    pub data: NodeData,
    pub specifiers: NodeList<'a, ImportSpec<'a>>,
    pub source: &'a StringLit<'a>,
    /// `import type ...`.
    pub type_only: bool,
}

#[derive(Debug, Clone, Copy)]
pub enum ImportSpec<'a> {
    Named(&'a ImportSpecifier<'a>),
    Default(&'a ImportDefaultSpecifier<'a>),
    Namespace(&'a ImportNamespaceSpecifier<'a>),
}

#[derive(Debug)]
pub struct ImportSpecifier<'a> {
    pub data: NodeData,
    pub imported: ModuleExportName<'a>,
    pub local: &'a Identifier<'a>,
}

#[derive(Debug)]
pub struct ImportDefaultSpecifier<'a> {
    pub data: NodeData,
    pub local: &'a Identifier<'a>,
}

#[derive(Debug)]
pub struct ImportNamespaceSpecifier<'a> {
    pub data: NodeData,
    pub local: &'a Identifier<'a>,
}

#[derive(Debug)]
pub struct ExportNamedDecl<'a> {
    pub data: NodeData,
    /// `export var ...`, `export function ...`, `export class ...`.
    pub decl: Option<Statement<'a>>,
    pub specifiers: NodeList<'a, ExportSpecifier<'a>>,
    pub source: Option<&'a StringLit<'a>>,
}

#[derive(Debug)]
pub struct ExportSpecifier<'a> {
    pub data: NodeData,
    pub local: ModuleExportName<'a>,
    pub exported: Option<ModuleExportName<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum DefaultDecl<'a> {
    Function(&'a FunctionDecl<'a>),
    Class(&'a ClassDecl<'a>),
    TsInterface(&'a TsInterfaceDecl<'a>),
    Expr(Expression<'a>),
}

#[derive(Debug)]
pub struct ExportDefaultDecl<'a> {
    pub data: NodeData,
    pub decl: DefaultDecl<'a>,
}

#[derive(Debug)]
pub struct ExportAllDecl<'a> {
    pub data: NodeData,
    /// `export * as name from ...`.
    pub exported: Option<ModuleExportName<'a>>,
    pub source: &'a StringLit<'a>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Expression<'a> {
    Ident(&'a Identifier<'a>),
    PrivateName(&'a PrivateName<'a>),
    Str(&'a StringLit<'a>),
    Num(&'a NumLit<'a>),
    BigInt(&'a BigIntLit<'a>),
    Bool(&'a BoolLit),
    Null(&'a NullLit),
    RegExp(&'a RegExpLit<'a>),
    Template(&'a TemplateLit<'a>),
    TaggedTemplate(&'a TaggedTemplate<'a>),
    This(&'a ThisExpr),
    Super(&'a SuperExpr),
    Array(&'a ArrayExpr<'a>),
    Object(&'a ObjectExpr<'a>),
    Function(&'a FunctionExpr<'a>),
    Arrow(&'a ArrowExpr<'a>),
    Class(&'a ClassExpr<'a>),
    Unary(&'a UnaryExpr<'a>),
    Update(&'a UpdateExpr<'a>),
    Binary(&'a BinaryExpr<'a>),
    Logical(&'a LogicalExpr<'a>),
    Assign(&'a AssignExpr<'a>),
    Cond(&'a CondExpr<'a>),
    Seq(&'a SeqExpr<'a>),
    Call(&'a CallExpr<'a>),
    New(&'a NewExpr<'a>),
    Member(&'a MemberExpr<'a>),
    Chain(&'a ChainExpr<'a>),
    Paren(&'a ParenExpr<'a>),
    Yield(&'a YieldExpr<'a>),
    Await(&'a AwaitExpr<'a>),
    MetaProp(&'a MetaProp<'a>),
    Import(&'a ImportExpr<'a>),
    Jsx(&'a JsxElement<'a>),
    TsAs(&'a TsAsExpr<'a>),
    TsSatisfies(&'a TsSatisfiesExpr<'a>),
    TsNonNull(&'a TsNonNullExpr<'a>),
}

#[derive(Debug)]
pub struct Identifier<'a> {
    pub data: NodeData,
    /// The identifier's name with escapes decoded.
    pub name: &'a str,
    pub typ: Option<&'a TypInfo<'a>>,
}

/// `#name` in classes and in `#name in obj`.
#[derive(Debug)]
pub struct PrivateName<'a> {
    pub data: NodeData,
    /// The name without the leading `#`.
    pub name: &'a str,
}

#[derive(Debug)]
pub struct StringLit<'a> {
    pub data: NodeData,
    /// The decoded value.
    pub value: &'a str,
    /// The literal as written, quotes included.
    pub raw: &'a str,
}

#[derive(Debug)]
pub struct NumLit<'a> {
    pub data: NodeData,
    pub value: f64,
    pub raw: &'a str,
}

/// A BigInt literal. The digits are kept as written; decode them with
/// `esfront_lexer::numeric::parse_bigint`.
#[derive(Debug)]
pub struct BigIntLit<'a> {
    pub data: NodeData,
    /// The literal as written, `n` suffix included.
    pub raw: &'a str,
}

#[derive(Debug)]
pub struct BoolLit {
    pub data: NodeData,
    pub value: bool,
}

#[derive(Debug)]
pub struct NullLit {
    pub data: NodeData,
}

#[derive(Debug)]
pub struct RegExpLit<'a> {
    pub data: NodeData,
    pub pattern: &'a str,
    pub flags: &'a str,
}

#[derive(Debug)]
pub struct TemplateLit<'a> {
    pub data: NodeData,
    /// Literal spans; always one more than `exprs`.
    pub quasis: NodeList<'a, TemplateElement<'a>>,
    pub exprs: NodeList<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct TemplateElement<'a> {
    pub data: NodeData,
    /// `None` when a tagged template contains an invalid escape.
    pub cooked: Option<&'a str>,
    pub raw: &'a str,
    pub tail: bool,
}

#[derive(Debug)]
pub struct TaggedTemplate<'a> {
    pub data: NodeData,
    pub tag: Expression<'a>,
    pub quasi: &'a TemplateLit<'a>,
    pub typ: Option<&'a TypInfo<'a>>,
}

#[derive(Debug)]
pub struct ThisExpr {
    pub data: NodeData,
}

#[derive(Debug)]
pub struct SuperExpr {
    pub data: NodeData,
}

/// An expression or a spread element in argument and array lists.
#[derive(Debug, Clone, Copy)]
pub enum ExprOrSpread<'a> {
    Expr(Expression<'a>),
    Spread(&'a SpreadElement<'a>),
}

#[derive(Debug)]
pub struct ArrayExpr<'a> {
    pub data: NodeData,
    /// `None` marks a hole.
    pub elements: NodeList<'a, Option<ExprOrSpread<'a>>>,
}

#[derive(Debug)]
pub struct ObjectExpr<'a> {
    pub data: NodeData,
    pub props: NodeList<'a, ObjectMember<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum ObjectMember<'a> {
    Prop(&'a Property<'a>),
    Spread(&'a SpreadElement<'a>),
}

/// A property name.
#[derive(Debug, Clone, Copy)]
pub enum PropKey<'a> {
    Ident(&'a Identifier<'a>),
    Str(&'a StringLit<'a>),
    Num(&'a NumLit<'a>),
    BigInt(&'a BigIntLit<'a>),
    Private(&'a PrivateName<'a>),
    Computed(Expression<'a>),
}

impl<'a> PropKey<'a> {
    /// The static name of a non-computed key.
    pub fn static_name(&self) -> Option<&'a str> {
        match self {
            PropKey::Ident(id) => Some(id.name),
            PropKey::Str(s) => Some(s.value),
            PropKey::Num(n) => Some(n.raw),
            PropKey::BigInt(n) => Some(n.raw),
            PropKey::Private(p) => Some(p.name),
            PropKey::Computed(_) => None,
        }
    }
}

#[derive(Debug)]
pub struct Property<'a> {
    pub data: NodeData,
    pub key: PropKey<'a>,
    /// For shorthand properties this is the same identifier as the key.
    pub value: Expression<'a>,
    pub kind: PropKind,
    pub method: bool,
    pub shorthand: bool,
}

#[derive(Debug)]
pub struct SpreadElement<'a> {
    pub data: NodeData,
    pub arg: Expression<'a>,
}

/// Shared shape of function declarations, expressions and methods.
#[derive(Debug)]
pub struct Function<'a> {
    pub id: Option<&'a Identifier<'a>>,
    pub params: NodeList<'a, Param<'a>>,
    /// `None` for TypeScript overload signatures and abstract methods.
    pub body: Option<&'a BlockStmt<'a>>,
    pub is_async: bool,
    pub is_generator: bool,
    pub typ: Option<&'a TypInfo<'a>>,
}

#[derive(Debug)]
pub struct FunctionExpr<'a> {
    pub data: NodeData,
    pub func: Function<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum ArrowBody<'a> {
    Block(&'a BlockStmt<'a>),
    Expr(Expression<'a>),
}

#[derive(Debug)]
pub struct ArrowExpr<'a> {
    pub data: NodeData,
    pub params: NodeList<'a, Param<'a>>,
    pub body: ArrowBody<'a>,
    pub is_async: bool,
    pub typ: Option<&'a TypInfo<'a>>,
}

/// Shared shape of class declarations and expressions.
#[derive(Debug)]
pub struct Class<'a> {
    pub id: Option<&'a Identifier<'a>>,
    pub super_class: Option<Expression<'a>>,
    pub implements: NodeList<'a, TsExprWithTypeArgs<'a>>,
    pub body: NodeList<'a, ClassMember<'a>>,
    pub is_abstract: bool,
    /// Type parameters, and the superclass type arguments in `type_args`.
    pub typ: Option<&'a TypInfo<'a>>,
}

#[derive(Debug)]
pub struct ClassExpr<'a> {
    pub data: NodeData,
    pub class: Class<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum ClassMember<'a> {
    Method(&'a ClassMethod<'a>),
    Prop(&'a ClassProp<'a>),
    StaticBlock(&'a StaticBlock<'a>),
}

#[derive(Debug)]
pub struct ClassMethod<'a> {
    pub data: NodeData,
    pub key: PropKey<'a>,
    pub kind: MethodKind,
    pub func: Function<'a>,
    pub modifiers: ModifierFlags,
    pub optional: bool,
}

impl<'a> ClassMethod<'a> {
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(ModifierFlags::STATIC)
    }
}

#[derive(Debug)]
pub struct ClassProp<'a> {
    pub data: NodeData,
    pub key: PropKey<'a>,
    pub value: Option<Expression<'a>>,
    pub modifiers: ModifierFlags,
    /// Annotation with optional `?` and definite `!` markers.
    pub typ: Option<&'a TypInfo<'a>>,
}

impl<'a> ClassProp<'a> {
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(ModifierFlags::STATIC)
    }
}

#[derive(Debug)]
pub struct StaticBlock<'a> {
    pub data: NodeData,
    pub body: NodeList<'a, Statement<'a>>,
}

#[derive(Debug)]
pub struct UnaryExpr<'a> {
    pub data: NodeData,
    pub op: UnaryOp,
    pub arg: Expression<'a>,
}

#[derive(Debug)]
pub struct UpdateExpr<'a> {
    pub data: NodeData,
    pub op: UpdateOp,
    pub prefix: bool,
    pub arg: Expression<'a>,
}

#[derive(Debug)]
pub struct BinaryExpr<'a> {
    pub data: NodeData,
    pub op: BinaryOp,
    pub left: Expression<'a>,
    pub right: Expression<'a>,
}

#[derive(Debug)]
pub struct LogicalExpr<'a> {
    pub data: NodeData,
    pub op: LogicalOp,
    pub left: Expression<'a>,
    pub right: Expression<'a>,
}

#[derive(Debug)]
pub struct AssignExpr<'a> {
    pub data: NodeData,
    pub op: AssignOp,
    pub left: Pattern<'a>,
    pub right: Expression<'a>,
}

#[derive(Debug)]
pub struct CondExpr<'a> {
    pub data: NodeData,
    pub test: Expression<'a>,
    pub cons: Expression<'a>,
    pub alt: Expression<'a>,
}

#[derive(Debug)]
pub struct SeqExpr<'a> {
    pub data: NodeData,
    pub exprs: NodeList<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct CallExpr<'a> {
    pub data: NodeData,
    pub callee: Expression<'a>,
    pub args: NodeList<'a, ExprOrSpread<'a>>,
    /// Called through `?.(`.
    pub optional: bool,
    pub typ: Option<&'a TypInfo<'a>>,
}

#[derive(Debug)]
pub struct NewExpr<'a> {
    pub data: NodeData,
    pub callee: Expression<'a>,
    /// `None` for `new X` without an argument list.
    pub args: Option<NodeList<'a, ExprOrSpread<'a>>>,
    pub typ: Option<&'a TypInfo<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum MemberProp<'a> {
    Ident(&'a Identifier<'a>),
    Private(&'a PrivateName<'a>),
    Computed(Expression<'a>),
}

#[derive(Debug)]
pub struct MemberExpr<'a> {
    pub data: NodeData,
    pub object: Expression<'a>,
    pub property: MemberProp<'a>,
    /// Accessed through `?.`.
    pub optional: bool,
}

/// Wraps a member/call chain that contains at least one `?.`.
#[derive(Debug)]
pub struct ChainExpr<'a> {
    pub data: NodeData,
    pub expr: Expression<'a>,
}

#[derive(Debug)]
pub struct ParenExpr<'a> {
    pub data: NodeData,
    pub expr: Expression<'a>,
}

#[derive(Debug)]
pub struct YieldExpr<'a> {
    pub data: NodeData,
    pub arg: Option<Expression<'a>>,
    pub delegate: bool,
}

#[derive(Debug)]
pub struct AwaitExpr<'a> {
    pub data: NodeData,
    pub arg: Expression<'a>,
}

/// `new.target` and `import.meta`.
#[derive(Debug)]
pub struct MetaProp<'a> {
    pub data: NodeData,
    pub meta: &'a Identifier<'a>,
    pub property: &'a Identifier<'a>,
}

/// Dynamic `import(source, options?)`.
#[derive(Debug)]
pub struct ImportExpr<'a> {
    pub data: NodeData,
    pub source: Expression<'a>,
    pub options: Option<Expression<'a>>,
}

// ============================================================================
// Patterns
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Pattern<'a> {
    Ident(&'a Identifier<'a>),
    Object(&'a ObjectPat<'a>),
    Array(&'a ArrayPat<'a>),
    Rest(&'a RestElement<'a>),
    Assign(&'a AssignPat<'a>),
    /// A member expression (or TS cast) used as an assignment target.
    Expr(Expression<'a>),
}

/// A function or arrow parameter.
#[derive(Debug)]
pub struct Param<'a> {
    pub data: NodeData,
    pub pat: Pattern<'a>,
    /// Accessibility and `readonly` on constructor parameter properties.
    pub modifiers: ModifierFlags,
}

#[derive(Debug)]
pub struct ObjectPat<'a> {
    pub data: NodeData,
    pub props: NodeList<'a, ObjectPatProp<'a>>,
    pub typ: Option<&'a TypInfo<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum ObjectPatProp<'a> {
    Prop(&'a PatProperty<'a>),
    Rest(&'a RestElement<'a>),
}

#[derive(Debug)]
pub struct PatProperty<'a> {
    pub data: NodeData,
    pub key: PropKey<'a>,
    /// For shorthand properties the key's identifier, possibly with a default.
    pub value: Pattern<'a>,
    pub shorthand: bool,
}

#[derive(Debug)]
pub struct ArrayPat<'a> {
    pub data: NodeData,
    /// `None` marks a hole.
    pub elements: NodeList<'a, Option<Pattern<'a>>>,
    pub typ: Option<&'a TypInfo<'a>>,
}

#[derive(Debug)]
pub struct RestElement<'a> {
    pub data: NodeData,
    pub arg: Pattern<'a>,
}

#[derive(Debug)]
pub struct AssignPat<'a> {
    pub data: NodeData,
    pub left: Pattern<'a>,
    pub right: Expression<'a>,
}

// ============================================================================
// JSX
// ============================================================================

/// An element, or a fragment when the opening tag has no name.
#[derive(Debug)]
pub struct JsxElement<'a> {
    pub data: NodeData,
    pub opening: &'a JsxOpeningElement<'a>,
    pub children: NodeList<'a, JsxChild<'a>>,
    /// `None` for self-closing elements.
    pub closing: Option<&'a JsxClosingElement<'a>>,
}

impl<'a> JsxElement<'a> {
    pub fn is_fragment(&self) -> bool {
        self.opening.name.is_none()
    }
}

#[derive(Debug)]
pub struct JsxOpeningElement<'a> {
    pub data: NodeData,
    /// `None` for `<>`.
    pub name: Option<JsxName<'a>>,
    pub attrs: NodeList<'a, JsxAttrItem<'a>>,
    pub self_closing: bool,
}

#[derive(Debug)]
pub struct JsxClosingElement<'a> {
    pub data: NodeData,
    /// `None` for `</>`.
    pub name: Option<JsxName<'a>>,
}

/// A tag or attribute name.
#[derive(Debug, Clone, Copy)]
pub enum JsxName<'a> {
    Ident(&'a JsxIdent<'a>),
    Member(&'a JsxMemberExpr<'a>),
    Namespaced(&'a JsxNamespacedName<'a>),
}

impl<'a> JsxName<'a> {
    /// The name as written without whitespace, such as `a.b.c` or `svg:rect`.
    pub fn text(&self) -> String {
        match self {
            JsxName::Ident(id) => id.name.to_string(),
            JsxName::Member(member) => format!("{}.{}", member.object.text(), member.property.name),
            JsxName::Namespaced(ns) => format!("{}:{}", ns.namespace.name, ns.name.name),
        }
    }
}

/// A JSX identifier; may contain `-`.
#[derive(Debug)]
pub struct JsxIdent<'a> {
    pub data: NodeData,
    pub name: &'a str,
}

#[derive(Debug)]
pub struct JsxMemberExpr<'a> {
    pub data: NodeData,
    pub object: JsxName<'a>,
    pub property: &'a JsxIdent<'a>,
}

#[derive(Debug)]
pub struct JsxNamespacedName<'a> {
    pub data: NodeData,
    pub namespace: &'a JsxIdent<'a>,
    pub name: &'a JsxIdent<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum JsxAttrItem<'a> {
    Attr(&'a JsxAttr<'a>),
    Spread(&'a JsxSpreadAttr<'a>),
}

#[derive(Debug)]
pub struct JsxAttr<'a> {
    pub data: NodeData,
    pub name: JsxName<'a>,
    /// `None` for boolean attributes such as `<input disabled />`.
    pub value: Option<JsxAttrValue<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum JsxAttrValue<'a> {
    Str(&'a StringLit<'a>),
    Expr(&'a JsxExprContainer<'a>),
    Element(&'a JsxElement<'a>),
}

#[derive(Debug)]
pub struct JsxSpreadAttr<'a> {
    pub data: NodeData,
    pub arg: Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum JsxChild<'a> {
    Text(&'a JsxText<'a>),
    Expr(&'a JsxExprContainer<'a>),
    Spread(&'a JsxSpreadChild<'a>),
    Element(&'a JsxElement<'a>),
}

#[derive(Debug)]
pub struct JsxText<'a> {
    pub data: NodeData,
    /// The text exactly as written.
    pub raw: &'a str,
    /// The text with HTML entities decoded.
    pub value: &'a str,
}

/// `{expr}` or `{}` in attribute values and children.
#[derive(Debug)]
pub struct JsxExprContainer<'a> {
    pub data: NodeData,
    pub expr: JsxExpr<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum JsxExpr<'a> {
    Empty(&'a JsxEmptyExpr),
    Expr(Expression<'a>),
}

/// The (possibly comment-only) gap inside `{}`.
#[derive(Debug)]
pub struct JsxEmptyExpr {
    pub data: NodeData,
}

#[derive(Debug)]
pub struct JsxSpreadChild<'a> {
    pub data: NodeData,
    pub expr: Expression<'a>,
}

// ============================================================================
// TypeScript
// ============================================================================

#[derive(Debug)]
pub struct TsAsExpr<'a> {
    pub data: NodeData,
    pub expr: Expression<'a>,
    pub type_ann: TsType<'a>,
}

#[derive(Debug)]
pub struct TsSatisfiesExpr<'a> {
    pub data: NodeData,
    pub expr: Expression<'a>,
    pub type_ann: TsType<'a>,
}

/// `expr!`.
#[derive(Debug)]
pub struct TsNonNullExpr<'a> {
    pub data: NodeData,
    pub expr: Expression<'a>,
}

#[derive(Debug)]
pub struct TsTypeAliasDecl<'a> {
    pub data: NodeData,
    pub id: &'a Identifier<'a>,
    pub type_params: Option<NodeList<'a, TsTypeParam<'a>>>,
    pub type_ann: TsType<'a>,
}

#[derive(Debug)]
pub struct TsInterfaceDecl<'a> {
    pub data: NodeData,
    pub id: &'a Identifier<'a>,
    pub type_params: Option<NodeList<'a, TsTypeParam<'a>>>,
    pub extends: NodeList<'a, TsExprWithTypeArgs<'a>>,
    pub body: NodeList<'a, TsTypeElement<'a>>,
}

#[derive(Debug)]
pub struct TsEnumDecl<'a> {
    pub data: NodeData,
    pub id: &'a Identifier<'a>,
    pub is_const: bool,
    pub members: NodeList<'a, TsEnumMember<'a>>,
}

#[derive(Debug)]
pub struct TsEnumMember<'a> {
    pub data: NodeData,
    pub id: PropKey<'a>,
    pub init: Option<Expression<'a>>,
}

/// A heritage clause entry: `extends A<T>` on interfaces, `implements B`.
#[derive(Debug)]
pub struct TsExprWithTypeArgs<'a> {
    pub data: NodeData,
    pub expr: TsEntityName<'a>,
    pub type_args: Option<NodeList<'a, TsType<'a>>>,
}

#[derive(Debug, Clone, Copy)]
pub enum TsType<'a> {
    Keyword(&'a TsKeywordType),
    Ref(&'a TsTypeRef<'a>),
    Lit(&'a TsLitType<'a>),
    Array(&'a TsArrayType<'a>),
    Tuple(&'a TsTupleType<'a>),
    Union(&'a TsUnionType<'a>),
    Intersection(&'a TsIntersectionType<'a>),
    Paren(&'a TsParenType<'a>),
    Fn(&'a TsFnType<'a>),
    TypeLit(&'a TsTypeLit<'a>),
    Query(&'a TsTypeQuery<'a>),
    Operator(&'a TsTypeOperator<'a>),
    IndexedAccess(&'a TsIndexedAccessType<'a>),
}

#[derive(Debug)]
pub struct TsKeywordType {
    pub data: NodeData,
    pub kind: TsKeywordKind,
}

#[derive(Debug, Clone, Copy)]
pub enum TsEntityName<'a> {
    Ident(&'a Identifier<'a>),
    Qualified(&'a TsQualifiedName<'a>),
}

#[derive(Debug)]
pub struct TsQualifiedName<'a> {
    pub data: NodeData,
    pub left: TsEntityName<'a>,
    pub right: &'a Identifier<'a>,
}

#[derive(Debug)]
pub struct TsTypeRef<'a> {
    pub data: NodeData,
    pub name: TsEntityName<'a>,
    pub type_args: Option<NodeList<'a, TsType<'a>>>,
}

/// A literal type. `lit` is a string, numeric, bigint or boolean literal, or
/// a unary minus applied to a numeric literal.
#[derive(Debug)]
pub struct TsLitType<'a> {
    pub data: NodeData,
    pub lit: Expression<'a>,
}

#[derive(Debug)]
pub struct TsArrayType<'a> {
    pub data: NodeData,
    pub elem: TsType<'a>,
}

#[derive(Debug)]
pub struct TsTupleType<'a> {
    pub data: NodeData,
    pub elems: NodeList<'a, TsType<'a>>,
}

#[derive(Debug)]
pub struct TsUnionType<'a> {
    pub data: NodeData,
    pub types: NodeList<'a, TsType<'a>>,
}

#[derive(Debug)]
pub struct TsIntersectionType<'a> {
    pub data: NodeData,
    pub types: NodeList<'a, TsType<'a>>,
}

#[derive(Debug)]
pub struct TsParenType<'a> {
    pub data: NodeData,
    pub type_ann: TsType<'a>,
}

/// `<T>(a: T) => U`.
#[derive(Debug)]
pub struct TsFnType<'a> {
    pub data: NodeData,
    pub type_params: Option<NodeList<'a, TsTypeParam<'a>>>,
    pub params: NodeList<'a, Param<'a>>,
    pub ret: TsType<'a>,
}

/// `{ a: T; m(): U; [k: string]: V }`.
#[derive(Debug)]
pub struct TsTypeLit<'a> {
    pub data: NodeData,
    pub members: NodeList<'a, TsTypeElement<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum TsTypeElement<'a> {
    Prop(&'a TsPropSig<'a>),
    Method(&'a TsMethodSig<'a>),
    Index(&'a TsIndexSig<'a>),
}

#[derive(Debug)]
pub struct TsPropSig<'a> {
    pub data: NodeData,
    pub key: PropKey<'a>,
    pub optional: bool,
    pub readonly: bool,
    pub type_ann: Option<TsType<'a>>,
}

#[derive(Debug)]
pub struct TsMethodSig<'a> {
    pub data: NodeData,
    pub key: PropKey<'a>,
    pub optional: bool,
    pub params: NodeList<'a, Param<'a>>,
    /// Type parameters and the return type.
    pub typ: Option<&'a TypInfo<'a>>,
}

#[derive(Debug)]
pub struct TsIndexSig<'a> {
    pub data: NodeData,
    /// The key parameter; its annotation is the key type.
    pub param: &'a Identifier<'a>,
    pub type_ann: TsType<'a>,
    pub readonly: bool,
}

/// `typeof a.b`.
#[derive(Debug)]
pub struct TsTypeQuery<'a> {
    pub data: NodeData,
    pub expr: TsEntityName<'a>,
}

/// `keyof T`.
#[derive(Debug)]
pub struct TsTypeOperator<'a> {
    pub data: NodeData,
    pub op: TsTypeOperatorKind,
    pub type_ann: TsType<'a>,
}

/// `T[K]`.
#[derive(Debug)]
pub struct TsIndexedAccessType<'a> {
    pub data: NodeData,
    pub object: TsType<'a>,
    pub index: TsType<'a>,
}

/// `T extends C = D` in a type parameter list.
#[derive(Debug)]
pub struct TsTypeParam<'a> {
    pub data: NodeData,
    pub name: &'a Identifier<'a>,
    pub constraint: Option<TsType<'a>>,
    pub default: Option<TsType<'a>>,
}
