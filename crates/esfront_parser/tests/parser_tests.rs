//! Parser integration tests.
//!
//! Verifies that the parser builds the expected AST shapes for statements,
//! expressions, classes and modules, and reports the expected errors.

use bumpalo::Bump;
use esfront_ast::*;
use esfront_diagnostics::{ErrorCode, ParseError};
use esfront_parser::{parse, ParserOptions};
use std::time::{Duration, Instant};

fn script() -> ParserOptions {
    ParserOptions::default()
}

fn module() -> ParserOptions {
    ParserOptions::default().with_source_type(SourceType::Module)
}

/// Helper: parse `source`, panicking with the error on failure.
fn parse_ok<'a>(arena: &'a Bump, source: &'a str, options: ParserOptions) -> &'a Program<'a> {
    match parse(arena, source, options) {
        Ok(program) => program,
        Err(err) => panic!("failed to parse {source:?}: {err:?}"),
    }
}

/// Helper: the error of a parse that must fail.
fn parse_err(source: &str, options: ParserOptions) -> ParseError {
    let arena = Bump::new();
    match parse(&arena, source, options) {
        Ok(program) => panic!("expected an error for {source:?}, got {} statements", program.body.len()),
        Err(err) => err,
    }
}

fn assert_error(source: &str, options: ParserOptions, code: ErrorCode) {
    let err = parse_err(source, options);
    assert_eq!(err.code, code, "source: {source}, error: {err:?}");
}

fn assert_statement_count(source: &str, expected: usize) {
    let arena = Bump::new();
    assert_eq!(parse_ok(&arena, source, script()).body.len(), expected, "source: {source}");
}

fn assert_statement_count_module(source: &str, expected: usize) {
    let arena = Bump::new();
    assert_eq!(parse_ok(&arena, source, module()).body.len(), expected, "source: {source}");
}

/// Helper: the expression of the last statement.
fn last_expr<'a>(program: &'a Program<'a>) -> Expression<'a> {
    match program.body.last() {
        Some(Statement::Expr(stmt)) => stmt.expr,
        other => panic!("expected an expression statement, got {other:?}"),
    }
}

fn ident_name(expr: Expression<'_>) -> &str {
    match expr {
        Expression::Ident(id) => id.name,
        other => panic!("expected an identifier, got {other:?}"),
    }
}

// ============================================================================
// Variable Declarations
// ============================================================================

#[test]
fn test_parse_declarations() {
    assert_statement_count("const x = 42;", 1);
    assert_statement_count("let y = 'hello';", 1);
    assert_statement_count("var z = true;", 1);
    assert_statement_count("const a = 1; let b = 2; var c = 3;", 3);
}

#[test]
fn test_declarator_list() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "let a = 1, b;", script());
    let Statement::Var(decl) = program.body[0] else {
        panic!("expected a declaration");
    };
    assert_eq!(decl.kind, VarKind::Let);
    assert_eq!(decl.decls.len(), 2);
    assert!(decl.decls[0].init.is_some());
    assert!(decl.decls[1].init.is_none());
}

#[test]
fn test_const_requires_initializer() {
    assert_error("const x;", script(), ErrorCode::UnexpectedToken);
    assert_error("let [a];", script(), ErrorCode::UnexpectedToken);
}

#[test]
fn test_object_destructuring_declaration() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "let { a, b: [c, ...d], e = 1 } = obj;", script());
    let Statement::Var(decl) = program.body[0] else {
        panic!("expected a declaration");
    };
    let Pattern::Object(object) = decl.decls[0].name else {
        panic!("expected an object pattern");
    };
    assert_eq!(object.props.len(), 3);
    let ObjectPatProp::Prop(b) = object.props[1] else {
        panic!("expected a property");
    };
    assert!(!b.shorthand);
    let Pattern::Array(array) = b.value else {
        panic!("expected an array pattern");
    };
    assert!(matches!(array.elements[1], Some(Pattern::Rest(_))));
    let ObjectPatProp::Prop(e) = object.props[2] else {
        panic!("expected a property");
    };
    assert!(e.shorthand);
    assert!(matches!(e.value, Pattern::Assign(_)));
}

#[test]
fn test_array_destructuring_with_holes() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "let [x, , y] = arr;", script());
    let Statement::Var(decl) = program.body[0] else {
        panic!("expected a declaration");
    };
    let Pattern::Array(array) = decl.decls[0].name else {
        panic!("expected an array pattern");
    };
    assert_eq!(array.elements.len(), 3);
    assert!(array.elements[1].is_none());
}

// ============================================================================
// Functions
// ============================================================================

#[test]
fn test_parse_functions() {
    assert_statement_count("function foo() {}", 1);
    assert_statement_count("function add(a, b) { return a + b; }", 1);
    assert_statement_count("async function fetchData() { return await fetch('url'); }", 1);
}

#[test]
fn test_generator_yield() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "function* gen() { yield 1; yield* other(); }", script());
    let Statement::Function(decl) = program.body[0] else {
        panic!("expected a function");
    };
    assert!(decl.func.is_generator);
    let body = decl.func.body.expect("function body");
    let Statement::Expr(second) = body.body[1] else {
        panic!("expected an expression statement");
    };
    let Expression::Yield(yield_expr) = second.expr else {
        panic!("expected yield");
    };
    assert!(yield_expr.delegate);
}

#[test]
fn test_yield_is_identifier_outside_generators() {
    assert_statement_count("var yield = 1; yield + 1;", 2);
}

#[test]
fn test_params() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "function f(a, b = 1, ...rest) {}", script());
    let Statement::Function(decl) = program.body[0] else {
        panic!("expected a function");
    };
    let params = decl.func.params;
    assert_eq!(params.len(), 3);
    assert!(matches!(params[0].pat, Pattern::Ident(_)));
    assert!(matches!(params[1].pat, Pattern::Assign(_)));
    assert!(matches!(params[2].pat, Pattern::Rest(_)));
}

#[test]
fn test_rest_param_must_be_last() {
    assert_error("function f(...a, b) {}", script(), ErrorCode::UnexpectedToken);
}

#[test]
fn test_arrow_functions() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "f = async (x) => x * 2;", script());
    let Expression::Assign(assign) = last_expr(program) else {
        panic!("expected an assignment");
    };
    let Expression::Arrow(arrow) = assign.right else {
        panic!("expected an arrow");
    };
    assert!(arrow.is_async);
    assert_eq!(arrow.params.len(), 1);
    assert!(matches!(arrow.body, ArrowBody::Expr(Expression::Binary(_))));

    let program = parse_ok(&arena, "(a, b) => { return a + b; };", script());
    let Expression::Arrow(arrow) = last_expr(program) else {
        panic!("expected an arrow");
    };
    assert_eq!(arrow.params.len(), 2);
    assert!(matches!(arrow.body, ArrowBody::Block(_)));

    let program = parse_ok(&arena, "x => ({ x });", script());
    let Expression::Arrow(arrow) = last_expr(program) else {
        panic!("expected an arrow");
    };
    assert!(matches!(arrow.body, ArrowBody::Expr(Expression::Paren(_))));
}

#[test]
fn test_parenthesized_is_not_an_arrow() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "(a, b);", script());
    let Expression::Paren(paren) = last_expr(program) else {
        panic!("expected parentheses");
    };
    assert!(matches!(paren.expr, Expression::Seq(seq) if seq.exprs.len() == 2));
}

#[test]
fn test_nested_groups_with_defaults_parse_quickly() {
    let depth = 30;
    let source = format!("{}1{};", "(a = ".repeat(depth), ")".repeat(depth));
    let started = Instant::now();
    let arena = Bump::new();
    let program = parse_ok(&arena, &source, script());
    assert!(started.elapsed() < Duration::from_secs(2), "took {:?}", started.elapsed());

    let mut expr = last_expr(program);
    let mut groups = 0;
    while let Expression::Paren(paren) = expr {
        groups += 1;
        let Expression::Assign(assign) = paren.expr else {
            panic!("expected an assignment inside the group");
        };
        expr = assign.right;
    }
    assert_eq!(groups, depth);
    assert!(matches!(expr, Expression::Num(n) if n.value == 1.0));
}

#[test]
fn test_rejected_arrow_head_still_parses_inner_arrows() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "(a = (b) => b, c);", script());
    let Expression::Paren(paren) = last_expr(program) else {
        panic!("expected parentheses");
    };
    let Expression::Seq(seq) = paren.expr else {
        panic!("expected a sequence");
    };
    assert!(matches!(seq.exprs[0], Expression::Assign(a) if matches!(a.right, Expression::Arrow(_))));
    assert_statement_count("((a = 1)); (a = 1) => a;", 2);
}

#[test]
fn test_async_call_is_not_an_arrow() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "async(x);", script());
    let Expression::Call(call) = last_expr(program) else {
        panic!("expected a call");
    };
    assert_eq!(ident_name(call.callee), "async");
}

#[test]
fn test_return_outside_function() {
    assert_error("return 1;", script(), ErrorCode::IllegalStatementPosition);
}

// ============================================================================
// Classes
// ============================================================================

#[test]
fn test_class_members() {
    let arena = Bump::new();
    let source = "class A extends B {
        static count = 0;
        #secret = 1;
        constructor(x) { super(x); }
        get value() { return this.#secret; }
        set value(v) {}
        static { A.count++; }
        async *items() {}
    }";
    let program = parse_ok(&arena, source, script());
    let Statement::Class(decl) = program.body[0] else {
        panic!("expected a class");
    };
    let class = &decl.class;
    assert_eq!(class.id.map(|id| id.name), Some("A"));
    assert!(class.super_class.is_some());
    assert_eq!(class.body.len(), 7);

    let ClassMember::Prop(count) = class.body[0] else {
        panic!("expected a field");
    };
    assert!(count.modifiers.contains(ModifierFlags::STATIC));
    let ClassMember::Prop(secret) = class.body[1] else {
        panic!("expected a field");
    };
    assert!(matches!(secret.key, PropKey::Private(name) if name.name == "secret"));

    let kinds: Vec<MethodKind> = class
        .body
        .iter()
        .filter_map(|member| match member {
            ClassMember::Method(method) => Some(method.kind),
            _ => None,
        })
        .collect();
    assert_eq!(
        kinds,
        vec![MethodKind::Constructor, MethodKind::Get, MethodKind::Set, MethodKind::Method]
    );
    assert!(matches!(class.body[5], ClassMember::StaticBlock(_)));
    let ClassMember::Method(items) = class.body[6] else {
        panic!("expected a method");
    };
    assert!(items.func.is_async && items.func.is_generator);
}

#[test]
fn test_modifier_names_as_member_names() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "class A { static() {} get = 1; async }", script());
    let Statement::Class(decl) = program.body[0] else {
        panic!("expected a class");
    };
    assert_eq!(decl.class.body.len(), 3);
    let ClassMember::Method(method) = decl.class.body[0] else {
        panic!("expected a method");
    };
    assert_eq!(method.key.static_name(), Some("static"));
    assert!(!method.modifiers.contains(ModifierFlags::STATIC));
}

#[test]
fn test_private_in() {
    assert_statement_count("class A { #x; has(o) { return #x in o; } }", 1);
}

#[test]
fn test_class_body_is_strict() {
    assert_error("class A { m() { with (x) {} } }", script(), ErrorCode::StrictModeViolation);
}

#[test]
fn test_class_expression() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "C = class {};", script());
    let Expression::Assign(assign) = last_expr(program) else {
        panic!("expected an assignment");
    };
    assert!(matches!(assign.right, Expression::Class(class) if class.class.id.is_none()));
}

#[test]
fn test_class_declaration_requires_name() {
    assert_error("class {}", script(), ErrorCode::UnexpectedToken);
}

// ============================================================================
// Control Flow
// ============================================================================

#[test]
fn test_if_else() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "if (a) b; else c;", script());
    let Statement::If(stmt) = program.body[0] else {
        panic!("expected if");
    };
    assert!(stmt.alt.is_some());
}

#[test]
fn test_for_forms() {
    let arena = Bump::new();
    let program = parse_ok(
        &arena,
        "for (let i = 0; i < n; i++) {}
         for (const k in obj) {}
         for (x of xs) ;
         for ([a, b] of pairs) {}
         for (;;) break;",
        script(),
    );
    assert!(matches!(program.body[0], Statement::For(f) if matches!(f.init, Some(ForInit::Var(_)))));
    assert!(matches!(program.body[1], Statement::ForIn(f) if matches!(f.left, ForHead::Var(_))));
    assert!(matches!(program.body[2], Statement::ForOf(f) if matches!(f.left, ForHead::Pattern(Pattern::Ident(_)))));
    assert!(matches!(program.body[3], Statement::ForOf(f) if matches!(f.left, ForHead::Pattern(Pattern::Array(_)))));
    assert!(matches!(program.body[4], Statement::For(f) if f.init.is_none() && f.test.is_none()));
}

#[test]
fn test_in_inside_for_initializer_parentheses() {
    assert_statement_count("for (var x = (a in b); x; ) {}", 1);
}

#[test]
fn test_for_await() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "async function f() { for await (const x of xs) {} }", script());
    let Statement::Function(decl) = program.body[0] else {
        panic!("expected a function");
    };
    let body = decl.func.body.expect("function body");
    assert!(matches!(body.body[0], Statement::ForOf(f) if f.is_await));
}

#[test]
fn test_loops() {
    assert_statement_count("while (x) { if (y) break; continue; }", 1);
    assert_statement_count("do x++; while (x < 10)", 1);
}

#[test]
fn test_break_and_continue_positions() {
    assert_error("break;", script(), ErrorCode::IllegalStatementPosition);
    assert_error("switch (x) { case 1: continue; }", script(), ErrorCode::IllegalStatementPosition);
    assert_statement_count("switch (x) { case 1: break; }", 1);
}

#[test]
fn test_labels() {
    assert_statement_count("outer: for (;;) { inner: for (;;) { break outer; } }", 1);
    assert_statement_count("block: { break block; }", 1);

    let err = parse_err("for (;;) { break missing; }", script());
    assert_eq!(err.code, ErrorCode::UnexpectedToken);
    assert!(err.message.contains("missing"));

    // Labels do not cross function boundaries.
    assert_error("a: { (function () { break a; }); }", script(), ErrorCode::UnexpectedToken);
}

#[test]
fn test_continue_targets_loop_labels() {
    assert_statement_count("outer: while (a) { inner: for (;;) { continue outer; } }", 1);
    assert_statement_count("a: b: while (x) { continue a; }", 1);

    let err = parse_err("while (1) { a: { continue a; } }", script());
    assert_eq!(err.code, ErrorCode::IllegalStatementPosition);
    assert_eq!((err.range.lo, err.range.hi), (26, 27));
    assert_statement_count("while (1) { a: { break a; } }", 1);
}

#[test]
fn test_switch() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "switch (x) { case 1: a(); break; default: b(); }", script());
    let Statement::Switch(stmt) = program.body[0] else {
        panic!("expected switch");
    };
    assert_eq!(stmt.cases.len(), 2);
    assert_eq!(stmt.cases[0].cons.len(), 2);
    assert!(stmt.cases[1].test.is_none());

    assert_error("switch (x) { default: a(); default: b(); }", script(), ErrorCode::UnexpectedToken);
}

#[test]
fn test_try() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "try { a(); } catch { b(); } try {} catch (e) {} finally {}", script());
    let Statement::Try(first) = program.body[0] else {
        panic!("expected try");
    };
    assert!(first.handler.is_some_and(|handler| handler.param.is_none()));
    let Statement::Try(second) = program.body[1] else {
        panic!("expected try");
    };
    assert!(second.finalizer.is_some());

    assert_error("try {} x;", script(), ErrorCode::UnexpectedToken);
}

#[test]
fn test_simple_statements() {
    assert_statement_count("throw new Error('x');", 1);
    assert_statement_count("debugger; ;", 2);
    assert_statement_count("with (obj) { a; }", 1);
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_precedence() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "a + b * c;", script());
    let Expression::Binary(add) = last_expr(program) else {
        panic!("expected a binary expression");
    };
    assert_eq!(add.op, BinaryOp::Add);
    assert!(matches!(add.right, Expression::Binary(mul) if mul.op == BinaryOp::Mul));
}

#[test]
fn test_exponent_is_right_associative() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "2 ** 3 ** 2;", script());
    let Expression::Binary(outer) = last_expr(program) else {
        panic!("expected a binary expression");
    };
    assert!(matches!(outer.left, Expression::Num(_)));
    assert!(matches!(outer.right, Expression::Binary(inner) if inner.op == BinaryOp::Exp));
}

#[test]
fn test_unary_before_exponent() {
    assert_error("-2 ** 2;", script(), ErrorCode::UnexpectedToken);
    assert_statement_count("(-2) ** 2;", 1);
}

#[test]
fn test_nullish_mixing() {
    assert_statement_count("a ?? b ?? c;", 1);
    assert_statement_count("(a || b) ?? c;", 1);
    assert_error("a ?? b || c;", script(), ErrorCode::NullishMixedWithLogical);
    assert_error("a && b ?? c;", script(), ErrorCode::NullishMixedWithLogical);
}

#[test]
fn test_assignment() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "a = b = c;", script());
    let Expression::Assign(outer) = last_expr(program) else {
        panic!("expected an assignment");
    };
    assert!(matches!(outer.right, Expression::Assign(_)));

    let program = parse_ok(&arena, "a += 1;", script());
    assert!(matches!(last_expr(program), Expression::Assign(assign) if assign.op == AssignOp::AddAssign));
}

#[test]
fn test_invalid_assignment_targets() {
    assert_error("1 = a;", script(), ErrorCode::InvalidAssignmentTarget);
    assert_error("a + b = c;", script(), ErrorCode::InvalidAssignmentTarget);
    assert_error("[a] += 1;", script(), ErrorCode::InvalidAssignmentTarget);
    assert_error("1++;", script(), ErrorCode::InvalidAssignmentTarget);
}

#[test]
fn test_destructuring_assignment() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "[a, b] = [b, a];", script());
    assert!(matches!(last_expr(program), Expression::Assign(assign) if matches!(assign.left, Pattern::Array(_))));

    let program = parse_ok(&arena, "({ a, b: c = 1 } = obj);", script());
    let Expression::Paren(paren) = last_expr(program) else {
        panic!("expected parentheses");
    };
    let Expression::Assign(assign) = paren.expr else {
        panic!("expected an assignment");
    };
    let Pattern::Object(object) = assign.left else {
        panic!("expected an object pattern");
    };
    let ObjectPatProp::Prop(prop) = object.props[1] else {
        panic!("expected a property");
    };
    assert!(matches!(prop.value, Pattern::Assign(_)));
}

#[test]
fn test_shorthand_initializer_outside_pattern() {
    let err = parse_err("({ a = 1 });", script());
    assert_eq!(err.code, ErrorCode::UnexpectedToken);
    assert_eq!(err.range.lo, 5);
    assert_error("f({ a = 1 });", script(), ErrorCode::UnexpectedToken);
    assert_statement_count("({ a = 1 } = b);", 1);
}

#[test]
fn test_optional_chaining() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "x?.y.z;", script());
    let Expression::Chain(chain) = last_expr(program) else {
        panic!("expected a chain");
    };
    let Expression::Member(outer) = chain.expr else {
        panic!("expected a member expression");
    };
    assert!(!outer.optional);
    assert!(matches!(outer.object, Expression::Member(inner) if inner.optional));

    assert_statement_count("a?.[0]; f?.(); a.b?.c();", 3);
    assert!(!matches!(last_expr(parse_ok(&arena, "a.b;", script())), Expression::Chain(_)));
}

#[test]
fn test_optional_chain_with_template() {
    assert_error("a?.b`t`;", script(), ErrorCode::UnexpectedToken);
}

#[test]
fn test_new() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "new Foo; new Foo(1); new a.b.C(); new Foo().bar;", script());
    assert!(matches!(program.body[0], Statement::Expr(s) if matches!(s.expr, Expression::New(n) if n.args.is_none())));
    assert!(matches!(program.body[1], Statement::Expr(s) if matches!(s.expr, Expression::New(n) if n.args.is_some())));
    assert!(matches!(program.body[2], Statement::Expr(s) if matches!(s.expr, Expression::New(n) if matches!(n.callee, Expression::Member(_)))));
    assert!(matches!(program.body[3], Statement::Expr(s) if matches!(s.expr, Expression::Member(m) if matches!(m.object, Expression::New(_)))));
}

#[test]
fn test_new_callee_cannot_be_optional_chain() {
    let err = parse_err("new a?.b();", script());
    assert_eq!(err.code, ErrorCode::UnexpectedToken);
    assert_eq!((err.range.lo, err.range.hi), (5, 7));
    assert_statement_count("new a()?.b(); new (a?.b)();", 2);
}

#[test]
fn test_new_target() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "function F() { new.target; }", script());
    let Statement::Function(decl) = program.body[0] else {
        panic!("expected a function");
    };
    let body = decl.func.body.expect("function body");
    assert!(matches!(body.body[0], Statement::Expr(s) if matches!(s.expr, Expression::MetaProp(_))));
}

#[test]
fn test_import_meta_and_dynamic_import() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "import.meta.url;", module());
    assert!(matches!(last_expr(program), Expression::Member(m) if matches!(m.object, Expression::MetaProp(_))));
    assert_error("import.meta;", script(), ErrorCode::IllegalStatementPosition);

    let program = parse_ok(&arena, "import('./m');", script());
    assert!(matches!(last_expr(program), Expression::Import(_)));
}

#[test]
fn test_templates() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "`a${b}c${d}e`;", script());
    let Expression::Template(template) = last_expr(program) else {
        panic!("expected a template");
    };
    assert_eq!(template.exprs.len(), 2);
    let cooked: Vec<Option<&str>> = template.quasis.iter().map(|q| q.cooked).collect();
    assert_eq!(cooked, vec![Some("a"), Some("c"), Some("e")]);
    assert!(template.quasis[2].tail);

    let program = parse_ok(&arena, "tag`x${1}`;", script());
    assert!(matches!(last_expr(program), Expression::TaggedTemplate(t) if t.quasi.exprs.len() == 1));
}

#[test]
fn test_object_literal_members() {
    let arena = Bump::new();
    let source = "({ a, b: 1, [c]: 2, d() {}, get e() { return 1; }, set e(v) {}, ...f, async g() {}, *h() {}, get: 1, async: 2 });";
    let program = parse_ok(&arena, source, script());
    let Expression::Paren(paren) = last_expr(program) else {
        panic!("expected parentheses");
    };
    let Expression::Object(object) = paren.expr else {
        panic!("expected an object");
    };
    assert_eq!(object.props.len(), 11);
    let kinds: Vec<PropKind> = object
        .props
        .iter()
        .filter_map(|member| match member {
            ObjectMember::Prop(prop) => Some(prop.kind),
            ObjectMember::Spread(_) => None,
        })
        .collect();
    assert_eq!(kinds.iter().filter(|kind| **kind == PropKind::Get).count(), 1);
    assert_eq!(kinds.iter().filter(|kind| **kind == PropKind::Set).count(), 1);
    assert!(matches!(object.props[0], ObjectMember::Prop(p) if p.shorthand));
    assert!(matches!(object.props[2], ObjectMember::Prop(p) if matches!(p.key, PropKey::Computed(_))));
    assert!(matches!(object.props[3], ObjectMember::Prop(p) if p.method));
    assert!(matches!(object.props[6], ObjectMember::Spread(_)));
}

#[test]
fn test_regexp_versus_division() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "/ab+c/gi.test(s); a / b / c;", script());
    let Statement::Expr(first) = program.body[0] else {
        panic!("expected an expression statement");
    };
    let Expression::Call(call) = first.expr else {
        panic!("expected a call");
    };
    let Expression::Member(member) = call.callee else {
        panic!("expected a member expression");
    };
    assert!(matches!(member.object, Expression::RegExp(re) if re.pattern == "ab+c" && re.flags == "gi"));
    assert!(matches!(last_expr(program), Expression::Binary(b) if b.op == BinaryOp::Div));
}

#[test]
fn test_conditional_sequence_and_unary() {
    let arena = Bump::new();
    assert!(matches!(last_expr(parse_ok(&arena, "a ? b : c;", script())), Expression::Cond(_)));
    assert!(matches!(last_expr(parse_ok(&arena, "a, b, c;", script())), Expression::Seq(s) if s.exprs.len() == 3));
    let program = parse_ok(&arena, "typeof x === 'string';", script());
    let Expression::Binary(eq) = last_expr(program) else {
        panic!("expected a binary expression");
    };
    assert_eq!(eq.op, BinaryOp::EqEqEq);
    assert!(matches!(eq.left, Expression::Unary(u) if u.op == UnaryOp::TypeOf));
}

#[test]
fn test_update_expressions() {
    let arena = Bump::new();
    assert!(matches!(last_expr(parse_ok(&arena, "++a;", script())), Expression::Update(u) if u.prefix));
    assert!(matches!(
        last_expr(parse_ok(&arena, "a--;", script())),
        Expression::Update(u) if !u.prefix && u.op == UpdateOp::Decrement
    ));
}

#[test]
fn test_await() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "await x;", module());
    assert!(matches!(last_expr(program), Expression::Await(_)));
    // In scripts `await` is an ordinary identifier.
    let program = parse_ok(&arena, "await(1);", script());
    assert!(matches!(last_expr(program), Expression::Call(_)));
}

#[test]
fn test_super_needs_member_or_call() {
    assert_error("class A extends B { m() { super; } }", script(), ErrorCode::UnexpectedToken);
}

// ============================================================================
// Directives and Strict Mode
// ============================================================================

#[test]
fn test_directives() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "'use strict'; \"other\"; a;", script());
    assert!(program.strict);
    assert!(matches!(program.body[0], Statement::Directive(d) if d.value == "use strict"));
    assert!(matches!(program.body[1], Statement::Directive(d) if d.value == "other"));
    assert!(matches!(program.body[2], Statement::Expr(_)));

    let program = parse_ok(&arena, "'use strict' + 1;", script());
    assert!(!program.strict);
    assert!(matches!(program.body[0], Statement::Expr(_)));
}

#[test]
fn test_legacy_octal_in_strict_mode() {
    assert_statement_count("010;", 1);
    assert_error("'use strict'; 010;", script(), ErrorCode::LegacyOctalInStrictMode);
    assert_error("'\\07'; 'use strict';", script(), ErrorCode::LegacyOctalInStrictMode);
    assert_error("010;", module(), ErrorCode::LegacyOctalInStrictMode);
}

#[test]
fn test_use_strict_requires_simple_params() {
    let err = parse_err("function f(a = 017) { 'use strict'; }", script());
    assert_eq!(err.code, ErrorCode::IllegalStatementPosition);
    assert_eq!((err.range.lo, err.range.hi), (22, 35));
    assert_error("function f({ a }) { 'use strict'; }", script(), ErrorCode::IllegalStatementPosition);
    assert_error("(...rest) => { 'use strict'; };", script(), ErrorCode::IllegalStatementPosition);
    assert_statement_count("function f(a, b) { 'use strict'; }", 1);
    assert_statement_count("function f(a = 1) { 'other'; }", 1);
}

#[test]
fn test_function_directive_is_scoped() {
    assert_error("function f() { 'use strict'; 010; }", script(), ErrorCode::LegacyOctalInStrictMode);
    assert_statement_count("function f() { 'use strict'; } 010;", 2);
}

#[test]
fn test_strict_mode_violations() {
    assert_error("with (a) {}", module(), ErrorCode::StrictModeViolation);
    assert_error("with (a) {}", script().with_strict(true), ErrorCode::StrictModeViolation);
    assert_error("delete x;", module(), ErrorCode::StrictModeViolation);
    assert_statement_count("delete x; delete a.b;", 2);
}

// ============================================================================
// Modules
// ============================================================================

#[test]
fn test_imports() {
    let arena = Bump::new();
    let source = "import a, { b as c, d } from 'm';
        import * as ns from 'm';
        import 'side-effect';
        import { 'a-b' as ab } from 'm';";
    let program = parse_ok(&arena, source, module());
    let Statement::Import(first) = program.body[0] else {
        panic!("expected an import");
    };
    assert_eq!(first.specifiers.len(), 3);
    assert!(matches!(first.specifiers[0], ImportSpec::Default(_)));
    assert!(matches!(first.specifiers[1], ImportSpec::Named(s) if s.imported.value() == "b" && s.local.name == "c"));
    assert_eq!(first.source.value, "m");
    assert!(matches!(program.body[1], Statement::Import(i) if matches!(i.specifiers[0], ImportSpec::Namespace(_))));
    assert!(matches!(program.body[2], Statement::Import(i) if i.specifiers.is_empty()));
    assert!(matches!(program.body[3], Statement::Import(i) if matches!(i.specifiers[0], ImportSpec::Named(s) if s.imported.value() == "a-b")));

    assert_error("import { 'a-b' } from 'm';", module(), ErrorCode::UnexpectedToken);
}

#[test]
fn test_exports() {
    let arena = Bump::new();
    let source = "export const x = 1;
        export function f() {}
        export class C {}
        export default 42;
        export { x as y };
        export * from 'm';
        export * as ns from 'm';
        export { a } from 'm';";
    let program = parse_ok(&arena, source, module());
    assert_eq!(program.body.len(), 8);
    assert!(matches!(program.body[0], Statement::ExportNamed(e) if e.decl.is_some()));
    assert!(matches!(program.body[3], Statement::ExportDefault(e) if matches!(e.decl, DefaultDecl::Expr(_))));
    assert!(matches!(program.body[4], Statement::ExportNamed(e) if e.specifiers.len() == 1 && e.source.is_none()));
    assert!(matches!(program.body[5], Statement::ExportAll(e) if e.exported.is_none()));
    assert!(matches!(program.body[6], Statement::ExportAll(e) if e.exported.is_some()));
    assert!(matches!(program.body[7], Statement::ExportNamed(e) if e.source.is_some()));
}

#[test]
fn test_export_default_declarations() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "export default function () {}", module());
    assert!(matches!(
        program.body[0],
        Statement::ExportDefault(e) if matches!(e.decl, DefaultDecl::Function(f) if f.func.id.is_none())
    ));
    let program = parse_ok(&arena, "export default class {}", module());
    assert!(matches!(program.body[0], Statement::ExportDefault(e) if matches!(e.decl, DefaultDecl::Class(_))));
}

#[test]
fn test_export_string_without_source() {
    assert_error("export { 'a' };", module(), ErrorCode::UnexpectedToken);
    assert_statement_count_module("export { 'a' } from 'm';", 1);
}

#[test]
fn test_module_items_in_scripts() {
    assert_error("import x from 'm';", script(), ErrorCode::IllegalStatementPosition);
    assert_error("export let a;", script(), ErrorCode::IllegalStatementPosition);
    assert_error("{ import x from 'm'; }", module(), ErrorCode::IllegalStatementPosition);
}

// ============================================================================
// Disabled Features
// ============================================================================

#[test]
fn test_typescript_syntax_without_typescript() {
    assert_error("let x: number = 1;", script(), ErrorCode::FeatureDisabled);
    assert_error("type A = string;", script(), ErrorCode::FeatureDisabled);
    assert_error("interface I {}", script(), ErrorCode::FeatureDisabled);
    assert_error("enum E {}", script(), ErrorCode::FeatureDisabled);
    assert_error("class A implements B {}", script(), ErrorCode::FeatureDisabled);
    assert_error("function f(): void {}", script(), ErrorCode::FeatureDisabled);
}

#[test]
fn test_contextual_names_stay_identifiers() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "type = 1; interface; of = async;", script());
    assert_eq!(program.body.len(), 3);
    assert!(matches!(program.body[0], Statement::Expr(s) if matches!(s.expr, Expression::Assign(_))));
}

#[test]
fn test_jsx_without_jsx() {
    let err = parse_err("<div />;", script());
    assert_eq!(err.code, ErrorCode::FeatureDisabled);
    assert!(err.message.contains("jsx"));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_lexical_errors_surface() {
    assert_error("let x = @;", script(), ErrorCode::IllegalCharacter);
    assert_error("'abc", script(), ErrorCode::UnterminatedString);
    assert_error("`abc", script(), ErrorCode::UnterminatedTemplate);
}

#[test]
fn test_unexpected_end() {
    let err = parse_err("a +", script());
    assert_eq!(err.code, ErrorCode::UnexpectedEof);
    assert_eq!(err.range.lo, 3);
    assert_error("(a, b", script(), ErrorCode::UnexpectedEof);
}

#[test]
fn test_error_message_and_range() {
    let err = parse_err("let a = 1 2;", script());
    assert_eq!(err.code, ErrorCode::UnexpectedToken);
    assert_eq!(err.message, "Unexpected token 2.");
    assert_eq!((err.range.lo, err.range.hi), (10, 11));
}
