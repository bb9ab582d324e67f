//! Traversal contract tests over hand-built trees.

use bumpalo::Bump;
use esfront_ast::*;
use esfront_core::text::TextRange;

fn ident<'a>(arena: &'a Bump, name: &'a str, lo: u32) -> &'a Identifier<'a> {
    arena.alloc(Identifier {
        data: NodeData::new(NodeType::Identifier, TextRange::new(lo, lo + name.len() as u32)),
        name,
        typ: None,
    })
}

/// Builds `a + b;\nc;` by hand.
fn build<'a>(arena: &'a Bump) -> &'a Program<'a> {
    let a = ident(arena, "a", 0);
    let b = ident(arena, "b", 4);
    let c = ident(arena, "c", 7);
    let sum = arena.alloc(BinaryExpr {
        data: NodeData::new(NodeType::BinaryExpr, TextRange::new(0, 5)),
        op: BinaryOp::Add,
        left: Expression::Ident(a),
        right: Expression::Ident(b),
    });
    let first = arena.alloc(ExprStmt {
        data: NodeData::new(NodeType::ExprStmt, TextRange::new(0, 6)),
        expr: Expression::Binary(sum),
    });
    let second = arena.alloc(ExprStmt {
        data: NodeData::new(NodeType::ExprStmt, TextRange::new(7, 9)),
        expr: Expression::Ident(c),
    });
    let body = arena.alloc_slice_copy(&[Statement::Expr(first), Statement::Expr(second)]);
    arena.alloc(Program {
        data: NodeData::new(NodeType::Program, TextRange::new(0, 9)),
        body,
        source_type: SourceType::Script,
        strict: false,
    })
}

#[derive(Default)]
struct Trace {
    events: Vec<String>,
}

fn record_ident(node: NodeRef<'_>, info: &VisitInfo, trace: &mut Trace) -> VisitControl {
    if let NodeRef::Identifier(id) = node {
        trace.events.push(format!("{}@{}", id.name, info.depth));
    }
    VisitControl::Continue
}

fn record_before(node: NodeRef<'_>, _info: &VisitInfo, trace: &mut Trace) -> VisitControl {
    trace.events.push(format!("enter {}", node.ty()));
    VisitControl::Continue
}

fn record_after(node: NodeRef<'_>, _info: &VisitInfo, trace: &mut Trace) -> VisitControl {
    trace.events.push(format!("leave {}", node.ty()));
    VisitControl::Continue
}

fn stop_binary(_node: NodeRef<'_>, _info: &VisitInfo, trace: &mut Trace) -> VisitControl {
    trace.events.push("stop".to_string());
    VisitControl::Stop
}

fn record_parent(_node: NodeRef<'_>, info: &VisitInfo, trace: &mut Trace) -> VisitControl {
    trace.events.push(format!("{:?}", info.parent));
    VisitControl::Continue
}

#[test]
fn test_identifiers_visited_in_source_order() {
    let arena = Bump::new();
    let program = build(&arena);
    let listeners = Listeners::new().with_before(NodeType::Identifier, record_ident);
    let mut trace = Trace::default();
    listen_program(program, &listeners, &mut trace);
    assert_eq!(trace.events, vec!["a@3", "b@3", "c@2"]);
}

#[test]
fn test_stop_prunes_subtree_but_runs_after_hook() {
    let arena = Bump::new();
    let program = build(&arena);
    let listeners = Listeners::new()
        .with_before(NodeType::BinaryExpr, stop_binary)
        .with_after(NodeType::BinaryExpr, record_after)
        .with_before(NodeType::Identifier, record_ident);
    let mut trace = Trace::default();
    listen_program(program, &listeners, &mut trace);
    assert_eq!(trace.events, vec!["stop", "leave BinaryExpr", "c@2"]);
}

#[test]
fn test_before_and_after_nest() {
    let arena = Bump::new();
    let program = build(&arena);
    let listeners = Listeners::new()
        .with_before(NodeType::ExprStmt, record_before)
        .with_after(NodeType::ExprStmt, record_after)
        .with_before(NodeType::BinaryExpr, record_before)
        .with_after(NodeType::BinaryExpr, record_after);
    let mut trace = Trace::default();
    listen_program(program, &listeners, &mut trace);
    assert_eq!(
        trace.events,
        vec![
            "enter ExprStmt",
            "enter BinaryExpr",
            "leave BinaryExpr",
            "leave ExprStmt",
            "enter ExprStmt",
            "leave ExprStmt",
        ]
    );
}

#[test]
fn test_parent_type_is_reported() {
    let arena = Bump::new();
    let program = build(&arena);
    let listeners = Listeners::new().with_before(NodeType::Identifier, record_parent);
    let mut trace = Trace::default();
    listen_program(program, &listeners, &mut trace);
    assert_eq!(
        trace.events,
        vec!["Some(BinaryExpr)", "Some(BinaryExpr)", "Some(ExprStmt)"]
    );
}

#[test]
fn test_customizing_a_copy_leaves_the_original_untouched() {
    let base: Listeners<Trace> = Listeners::new().with_before(NodeType::Identifier, record_ident);
    let mut custom = base.clone();
    custom.on_before(NodeType::Identifier, record_before);
    custom.on_after(NodeType::Program, record_after);

    assert!(base.after(NodeType::Program).is_none());
    assert!(Listeners::<Trace>::new().before(NodeType::Identifier).is_none());

    let arena = Bump::new();
    let program = build(&arena);
    let mut trace = Trace::default();
    listen_program(program, &base, &mut trace);
    assert_eq!(trace.events, vec!["a@3", "b@3", "c@2"]);
}

#[test]
fn test_children_and_ranges() {
    let arena = Bump::new();
    let program = build(&arena);
    let root = NodeRef::Program(program);
    let children = root.children();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].ty(), NodeType::ExprStmt);
    assert_eq!(children[1].range(), TextRange::new(7, 9));
    let grandchildren = children[0].children();
    assert_eq!(grandchildren[0].ty(), NodeType::BinaryExpr);
    assert_eq!(program.body[0].range(), TextRange::new(0, 6));
}
