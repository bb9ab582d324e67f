//! Child iteration and listener-table traversal.
//!
//! [`NodeRef::for_each_child`] yields the direct children of any node in
//! source order. [`listen_program`] walks a whole tree and dispatches to
//! per-[`NodeType`] hooks registered in a [`Listeners`] table.

use crate::generated::NodeRef;
use crate::node::*;
use crate::node_type::NodeType;

type Sink<'s, 'a> = &'s mut dyn FnMut(NodeRef<'a>);

#[inline]
fn each<'a, T>(items: &'a [T], f: Sink<'_, 'a>)
where
    &'a T: Into<NodeRef<'a>>,
{
    for item in items {
        f(item.into());
    }
}

#[inline]
fn each_enum<'a, T>(items: &'a [T], f: Sink<'_, 'a>)
where
    T: Copy + Into<NodeRef<'a>>,
{
    for &item in items {
        f(item.into());
    }
}

#[inline]
fn opt<'a, T: Into<NodeRef<'a>>>(item: Option<T>, f: Sink<'_, 'a>) {
    if let Some(item) = item {
        f(item.into());
    }
}

fn type_params<'a>(typ: Option<&'a TypInfo<'a>>, f: Sink<'_, 'a>) {
    if let Some(params) = typ.and_then(|t| t.type_params) {
        each(params, f);
    }
}

fn type_args<'a>(typ: Option<&'a TypInfo<'a>>, f: Sink<'_, 'a>) {
    if let Some(args) = typ.and_then(|t| t.type_args) {
        each_enum(args, f);
    }
}

fn annotation<'a>(typ: Option<&'a TypInfo<'a>>, f: Sink<'_, 'a>) {
    opt(typ.and_then(|t| t.annotation), f);
}

fn function<'a>(func: &'a Function<'a>, f: Sink<'_, 'a>) {
    opt(func.id, f);
    type_params(func.typ, f);
    each(func.params, f);
    annotation(func.typ, f);
    opt(func.body, f);
}

fn class<'a>(class: &'a Class<'a>, f: Sink<'_, 'a>) {
    opt(class.id, f);
    type_params(class.typ, f);
    opt(class.super_class, f);
    type_args(class.typ, f);
    each(class.implements, f);
    each_enum(class.body, f);
}

impl<'a> NodeRef<'a> {
    /// Call `f` with each direct child, in source order.
    pub fn for_each_child(&self, f: &mut dyn FnMut(NodeRef<'a>)) {
        match *self {
            NodeRef::Program(n) => each_enum(n.body, f),

            // Statements
            NodeRef::ExprStmt(n) => f(n.expr.into()),
            NodeRef::BlockStmt(n) => each_enum(n.body, f),
            NodeRef::EmptyStmt(_) | NodeRef::DebuggerStmt(_) => {}
            NodeRef::WithStmt(n) => {
                f(n.object.into());
                f(n.body.into());
            }
            NodeRef::ReturnStmt(n) => opt(n.arg, f),
            NodeRef::LabeledStmt(n) => {
                f(n.label.into());
                f(n.body.into());
            }
            NodeRef::BreakStmt(n) => opt(n.label, f),
            NodeRef::ContinueStmt(n) => opt(n.label, f),
            NodeRef::IfStmt(n) => {
                f(n.test.into());
                f(n.cons.into());
                opt(n.alt, f);
            }
            NodeRef::SwitchStmt(n) => {
                f(n.discriminant.into());
                each(n.cases, f);
            }
            NodeRef::SwitchCase(n) => {
                opt(n.test, f);
                each_enum(n.cons, f);
            }
            NodeRef::ThrowStmt(n) => f(n.arg.into()),
            NodeRef::TryStmt(n) => {
                f(n.block.into());
                opt(n.handler, f);
                opt(n.finalizer, f);
            }
            NodeRef::CatchClause(n) => {
                opt(n.param, f);
                f(n.body.into());
            }
            NodeRef::WhileStmt(n) => {
                f(n.test.into());
                f(n.body.into());
            }
            NodeRef::DoWhileStmt(n) => {
                f(n.body.into());
                f(n.test.into());
            }
            NodeRef::ForStmt(n) => {
                opt(n.init, f);
                opt(n.test, f);
                opt(n.update, f);
                f(n.body.into());
            }
            NodeRef::ForInStmt(n) => {
                f(n.left.into());
                f(n.right.into());
                f(n.body.into());
            }
            NodeRef::ForOfStmt(n) => {
                f(n.left.into());
                f(n.right.into());
                f(n.body.into());
            }
            NodeRef::VarDecl(n) => each(n.decls, f),
            NodeRef::VarDeclarator(n) => {
                f(n.name.into());
                opt(n.init, f);
            }
            NodeRef::FunctionDecl(n) => function(&n.func, f),
            NodeRef::ClassDecl(n) => class(&n.class, f),
            NodeRef::Directive(_) => {}

            // Modules
            NodeRef::ImportDecl(n) => {
                each_enum(n.specifiers, f);
                f(n.source.into());
            }
            NodeRef::ImportSpecifier(n) => {
                if n.imported.range() != n.local.data.range {
                    f(n.imported.into());
                }
                f(n.local.into());
            }
            NodeRef::ImportDefaultSpecifier(n) => f(n.local.into()),
            NodeRef::ImportNamespaceSpecifier(n) => f(n.local.into()),
            NodeRef::ExportNamedDecl(n) => {
                opt(n.decl, f);
                each(n.specifiers, f);
                opt(n.source, f);
            }
            NodeRef::ExportSpecifier(n) => {
                f(n.local.into());
                opt(n.exported, f);
            }
            NodeRef::ExportDefaultDecl(n) => f(n.decl.into()),
            NodeRef::ExportAllDecl(n) => {
                opt(n.exported, f);
                f(n.source.into());
            }

            // Expressions
            NodeRef::Identifier(n) => {
                type_args(n.typ, f);
                annotation(n.typ, f);
            }
            NodeRef::PrivateName(_)
            | NodeRef::StringLit(_)
            | NodeRef::NumLit(_)
            | NodeRef::BigIntLit(_)
            | NodeRef::BoolLit(_)
            | NodeRef::NullLit(_)
            | NodeRef::RegExpLit(_)
            | NodeRef::TemplateElement(_)
            | NodeRef::ThisExpr(_)
            | NodeRef::SuperExpr(_) => {}
            NodeRef::TemplateLit(n) => {
                // Quasis and expressions interleave in source order.
                for (index, quasi) in n.quasis.iter().enumerate() {
                    f(quasi.into());
                    if let Some(&expr) = n.exprs.get(index) {
                        f(expr.into());
                    }
                }
            }
            NodeRef::TaggedTemplate(n) => {
                f(n.tag.into());
                type_args(n.typ, f);
                f(n.quasi.into());
            }
            NodeRef::ArrayExpr(n) => {
                for &element in n.elements.iter().flatten() {
                    f(element.into());
                }
            }
            NodeRef::ObjectExpr(n) => each_enum(n.props, f),
            NodeRef::Property(n) => {
                if !n.shorthand {
                    f(n.key.into());
                }
                f(n.value.into());
            }
            NodeRef::SpreadElement(n) => f(n.arg.into()),
            NodeRef::FunctionExpr(n) => function(&n.func, f),
            NodeRef::ArrowExpr(n) => {
                type_params(n.typ, f);
                each(n.params, f);
                annotation(n.typ, f);
                f(n.body.into());
            }
            NodeRef::ClassExpr(n) => class(&n.class, f),
            NodeRef::UnaryExpr(n) => f(n.arg.into()),
            NodeRef::UpdateExpr(n) => f(n.arg.into()),
            NodeRef::BinaryExpr(n) => {
                f(n.left.into());
                f(n.right.into());
            }
            NodeRef::LogicalExpr(n) => {
                f(n.left.into());
                f(n.right.into());
            }
            NodeRef::AssignExpr(n) => {
                f(n.left.into());
                f(n.right.into());
            }
            NodeRef::CondExpr(n) => {
                f(n.test.into());
                f(n.cons.into());
                f(n.alt.into());
            }
            NodeRef::SeqExpr(n) => each_enum(n.exprs, f),
            NodeRef::CallExpr(n) => {
                f(n.callee.into());
                type_args(n.typ, f);
                each_enum(n.args, f);
            }
            NodeRef::NewExpr(n) => {
                f(n.callee.into());
                type_args(n.typ, f);
                if let Some(args) = n.args {
                    each_enum(args, f);
                }
            }
            NodeRef::MemberExpr(n) => {
                f(n.object.into());
                f(n.property.into());
            }
            NodeRef::ChainExpr(n) => f(n.expr.into()),
            NodeRef::ParenExpr(n) => f(n.expr.into()),
            NodeRef::YieldExpr(n) => opt(n.arg, f),
            NodeRef::AwaitExpr(n) => f(n.arg.into()),
            NodeRef::MetaProp(n) => {
                f(n.meta.into());
                f(n.property.into());
            }
            NodeRef::ImportExpr(n) => {
                f(n.source.into());
                opt(n.options, f);
            }

            // Patterns
            NodeRef::Param(n) => f(n.pat.into()),
            NodeRef::ObjectPat(n) => {
                each_enum(n.props, f);
                annotation(n.typ, f);
            }
            NodeRef::PatProperty(n) => {
                if !n.shorthand {
                    f(n.key.into());
                }
                f(n.value.into());
            }
            NodeRef::ArrayPat(n) => {
                for &element in n.elements.iter().flatten() {
                    f(element.into());
                }
                annotation(n.typ, f);
            }
            NodeRef::RestElement(n) => f(n.arg.into()),
            NodeRef::AssignPat(n) => {
                f(n.left.into());
                f(n.right.into());
            }

            // Class members
            NodeRef::ClassMethod(n) => {
                f(n.key.into());
                type_params(n.func.typ, f);
                each(n.func.params, f);
                annotation(n.func.typ, f);
                opt(n.func.body, f);
            }
            NodeRef::ClassProp(n) => {
                f(n.key.into());
                annotation(n.typ, f);
                opt(n.value, f);
            }
            NodeRef::StaticBlock(n) => each_enum(n.body, f),

            // JSX
            NodeRef::JsxElement(n) => {
                f(n.opening.into());
                each_enum(n.children, f);
                opt(n.closing, f);
            }
            NodeRef::JsxOpeningElement(n) => {
                opt(n.name, f);
                each_enum(n.attrs, f);
            }
            NodeRef::JsxClosingElement(n) => opt(n.name, f),
            NodeRef::JsxAttr(n) => {
                f(n.name.into());
                opt(n.value, f);
            }
            NodeRef::JsxSpreadAttr(n) => f(n.arg.into()),
            NodeRef::JsxText(_) | NodeRef::JsxEmptyExpr(_) | NodeRef::JsxIdent(_) => {}
            NodeRef::JsxExprContainer(n) => f(n.expr.into()),
            NodeRef::JsxSpreadChild(n) => f(n.expr.into()),
            NodeRef::JsxMemberExpr(n) => {
                f(n.object.into());
                f(n.property.into());
            }
            NodeRef::JsxNamespacedName(n) => {
                f(n.namespace.into());
                f(n.name.into());
            }

            // TypeScript
            NodeRef::TsAsExpr(n) => {
                f(n.expr.into());
                f(n.type_ann.into());
            }
            NodeRef::TsSatisfiesExpr(n) => {
                f(n.expr.into());
                f(n.type_ann.into());
            }
            NodeRef::TsNonNullExpr(n) => f(n.expr.into()),
            NodeRef::TsTypeAliasDecl(n) => {
                f(n.id.into());
                if let Some(params) = n.type_params {
                    each(params, f);
                }
                f(n.type_ann.into());
            }
            NodeRef::TsInterfaceDecl(n) => {
                f(n.id.into());
                if let Some(params) = n.type_params {
                    each(params, f);
                }
                each(n.extends, f);
                each_enum(n.body, f);
            }
            NodeRef::TsEnumDecl(n) => {
                f(n.id.into());
                each(n.members, f);
            }
            NodeRef::TsEnumMember(n) => {
                f(n.id.into());
                opt(n.init, f);
            }
            NodeRef::TsExprWithTypeArgs(n) => {
                f(n.expr.into());
                if let Some(args) = n.type_args {
                    each_enum(args, f);
                }
            }
            NodeRef::TsKeywordType(_) => {}
            NodeRef::TsTypeRef(n) => {
                f(n.name.into());
                if let Some(args) = n.type_args {
                    each_enum(args, f);
                }
            }
            NodeRef::TsQualifiedName(n) => {
                f(n.left.into());
                f(n.right.into());
            }
            NodeRef::TsLitType(n) => f(n.lit.into()),
            NodeRef::TsArrayType(n) => f(n.elem.into()),
            NodeRef::TsTupleType(n) => each_enum(n.elems, f),
            NodeRef::TsUnionType(n) => each_enum(n.types, f),
            NodeRef::TsIntersectionType(n) => each_enum(n.types, f),
            NodeRef::TsParenType(n) => f(n.type_ann.into()),
            NodeRef::TsFnType(n) => {
                if let Some(params) = n.type_params {
                    each(params, f);
                }
                each(n.params, f);
                f(n.ret.into());
            }
            NodeRef::TsTypeLit(n) => each_enum(n.members, f),
            NodeRef::TsPropSig(n) => {
                f(n.key.into());
                opt(n.type_ann, f);
            }
            NodeRef::TsMethodSig(n) => {
                f(n.key.into());
                type_params(n.typ, f);
                each(n.params, f);
                annotation(n.typ, f);
            }
            NodeRef::TsIndexSig(n) => {
                f(n.param.into());
                f(n.type_ann.into());
            }
            NodeRef::TsTypeQuery(n) => f(n.expr.into()),
            NodeRef::TsTypeOperator(n) => f(n.type_ann.into()),
            NodeRef::TsIndexedAccessType(n) => {
                f(n.object.into());
                f(n.index.into());
            }
            NodeRef::TsTypeParam(n) => {
                f(n.name.into());
                opt(n.constraint, f);
                opt(n.default, f);
            }
        }
    }

    /// The direct children, in source order.
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        let mut children = Vec::new();
        self.for_each_child(&mut |child| children.push(child));
        children
    }
}

// ============================================================================
// Listener tables
// ============================================================================

/// Returned by a before-hook to continue into the node's children or to
/// skip them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitControl {
    Continue,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitPhase {
    Before,
    After,
}

/// Position of the node being visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitInfo {
    pub phase: VisitPhase,
    /// 0 for the program node.
    pub depth: u32,
    pub parent: Option<NodeType>,
}

/// A traversal hook. The return value of an after-hook is ignored.
pub type Listener<C> = for<'a> fn(NodeRef<'a>, &VisitInfo, &mut C) -> VisitControl;

/// Before and after hooks per node type.
///
/// Tables are plain values: `Listeners::new()` always returns a fresh empty
/// table and customizing one table never affects another.
pub struct Listeners<C> {
    before: [Option<Listener<C>>; NodeType::COUNT],
    after: [Option<Listener<C>>; NodeType::COUNT],
}

impl<C> Listeners<C> {
    pub fn new() -> Self {
        Self {
            before: [None; NodeType::COUNT],
            after: [None; NodeType::COUNT],
        }
    }

    /// Register a hook that runs before a node's children.
    pub fn on_before(&mut self, ty: NodeType, listener: Listener<C>) -> &mut Self {
        self.before[ty as usize] = Some(listener);
        self
    }

    /// Register a hook that runs after a node's children.
    pub fn on_after(&mut self, ty: NodeType, listener: Listener<C>) -> &mut Self {
        self.after[ty as usize] = Some(listener);
        self
    }

    /// Builder form of [`Listeners::on_before`].
    pub fn with_before(mut self, ty: NodeType, listener: Listener<C>) -> Self {
        self.on_before(ty, listener);
        self
    }

    /// Builder form of [`Listeners::on_after`].
    pub fn with_after(mut self, ty: NodeType, listener: Listener<C>) -> Self {
        self.on_after(ty, listener);
        self
    }

    pub fn before(&self, ty: NodeType) -> Option<Listener<C>> {
        self.before[ty as usize]
    }

    pub fn after(&self, ty: NodeType) -> Option<Listener<C>> {
        self.after[ty as usize]
    }
}

impl<C> Default for Listeners<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for Listeners<C> {
    fn clone(&self) -> Self {
        Self {
            before: self.before,
            after: self.after,
        }
    }
}

/// Walk a whole program in source order, dispatching to `listeners`.
///
/// A before-hook returning [`VisitControl::Stop`] skips that node's subtree;
/// the node's after-hook still runs.
pub fn listen_program<'a, C>(program: &'a Program<'a>, listeners: &Listeners<C>, ctx: &mut C) {
    walk(NodeRef::Program(program), 0, None, listeners, ctx);
}

/// Walk the subtree rooted at `node`.
pub fn listen_node<'a, C>(node: NodeRef<'a>, listeners: &Listeners<C>, ctx: &mut C) {
    walk(node, 0, None, listeners, ctx);
}

fn walk<'a, C>(
    node: NodeRef<'a>,
    depth: u32,
    parent: Option<NodeType>,
    listeners: &Listeners<C>,
    ctx: &mut C,
) {
    let ty = node.ty();
    let mut control = VisitControl::Continue;
    if let Some(listener) = listeners.before(ty) {
        let info = VisitInfo {
            phase: VisitPhase::Before,
            depth,
            parent,
        };
        control = listener(node, &info, ctx);
    }
    if control == VisitControl::Continue {
        node.for_each_child(&mut |child| walk(child, depth + 1, Some(ty), listeners, ctx));
    }
    if let Some(listener) = listeners.after(ty) {
        let info = VisitInfo {
            phase: VisitPhase::After,
            depth,
            parent,
        };
        listener(node, &info, ctx);
    }
}
