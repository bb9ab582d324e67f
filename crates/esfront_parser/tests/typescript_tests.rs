//! TypeScript syntax tests.
//!
//! Verifies type annotations, type expressions, TypeScript-only declarations
//! and the speculative parses that tell generics from comparisons.

use bumpalo::Bump;
use esfront_ast::*;
use esfront_diagnostics::{ErrorCode, ParseError};
use esfront_parser::{parse, ParserOptions};

fn ts() -> ParserOptions {
    ParserOptions::default().with_typescript(true)
}

fn ts_module() -> ParserOptions {
    ts().with_source_type(SourceType::Module)
}

fn tsx() -> ParserOptions {
    ts().with_jsx(true)
}

/// Helper: parse `source`, panicking with the error on failure.
fn parse_ok<'a>(arena: &'a Bump, source: &'a str, options: ParserOptions) -> &'a Program<'a> {
    match parse(arena, source, options) {
        Ok(program) => program,
        Err(err) => panic!("failed to parse {source:?}: {err:?}"),
    }
}

fn parse_err(source: &str, options: ParserOptions) -> ParseError {
    let arena = Bump::new();
    match parse(&arena, source, options) {
        Ok(_) => panic!("expected an error for {source:?}"),
        Err(err) => err,
    }
}

/// Helper: the annotation on the first declarator of `let x: <type>;`.
fn declared_type<'a>(arena: &'a Bump, source: &'a str) -> TsType<'a> {
    let program = parse_ok(arena, source, ts());
    let Statement::Var(decl) = program.body[0] else {
        panic!("expected a declaration");
    };
    let Pattern::Ident(id) = decl.decls[0].name else {
        panic!("expected an identifier binding");
    };
    match id.typ.and_then(|typ| typ.annotation) {
        Some(ty) => ty,
        None => panic!("no annotation in {source:?}"),
    }
}

fn last_expr<'a>(program: &'a Program<'a>) -> Expression<'a> {
    match program.body.last() {
        Some(Statement::Expr(stmt)) => stmt.expr,
        other => panic!("expected an expression statement, got {other:?}"),
    }
}

// ============================================================================
// Annotations
// ============================================================================

#[test]
fn test_variable_annotation() {
    let arena = Bump::new();
    let ty = declared_type(&arena, "let x: number = 1;");
    assert!(matches!(ty, TsType::Keyword(k) if k.kind == TsKeywordKind::Number));
}

#[test]
fn test_definite_assignment() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "let x!: number;", ts());
    let Statement::Var(decl) = program.body[0] else {
        panic!("expected a declaration");
    };
    assert!(matches!(decl.decls[0].name, Pattern::Ident(id) if id.typ.is_some_and(|t| t.definite)));
}

#[test]
fn test_function_signature() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "function f<T>(a: T, b?: string): T[] { return a; }", ts());
    let Statement::Function(decl) = program.body[0] else {
        panic!("expected a function");
    };
    let typ = decl.func.typ.expect("type info");
    assert_eq!(typ.type_params.map(|params| params.len()), Some(1));
    assert!(matches!(typ.annotation, Some(TsType::Array(_))));
    assert!(matches!(decl.func.params[1].pat, Pattern::Ident(id) if id.typ.is_some_and(|t| t.optional)));
}

#[test]
fn test_function_overloads() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "function f(a: string): void; function f(a: any) {}", ts());
    assert_eq!(program.body.len(), 2);
    assert!(matches!(program.body[0], Statement::Function(f) if f.func.body.is_none()));
    assert!(matches!(program.body[1], Statement::Function(f) if f.func.body.is_some()));
}

#[test]
fn test_arrow_return_type() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "const f = (a: number): string => String(a);", ts());
    let Statement::Var(decl) = program.body[0] else {
        panic!("expected a declaration");
    };
    let Some(Expression::Arrow(arrow)) = decl.decls[0].init else {
        panic!("expected an arrow");
    };
    assert!(arrow.typ.is_some_and(|t| t.annotation.is_some()));
}

// ============================================================================
// Types
// ============================================================================

#[test]
fn test_union_and_intersection() {
    let arena = Bump::new();
    let ty = declared_type(&arena, "let u: A | B & C;");
    let TsType::Union(union) = ty else {
        panic!("expected a union");
    };
    assert_eq!(union.types.len(), 2);
    assert!(matches!(union.types[1], TsType::Intersection(_)));
}

#[test]
fn test_function_type() {
    let arena = Bump::new();
    let ty = declared_type(&arena, "let f: (a: number) => void;");
    assert!(matches!(ty, TsType::Fn(f) if f.params.len() == 1));
    let ty = declared_type(&arena, "let p: (string);");
    assert!(matches!(ty, TsType::Paren(_)));
}

#[test]
fn test_structural_types() {
    let arena = Bump::new();
    assert!(matches!(declared_type(&arena, "let t: [string, number];"), TsType::Tuple(t) if t.elems.len() == 2));

    let ty = declared_type(&arena, "let o: { a: string; b?(): void; [k: string]: number };");
    let TsType::TypeLit(lit) = ty else {
        panic!("expected a type literal");
    };
    assert_eq!(lit.members.len(), 3);
    assert!(matches!(lit.members[0], TsTypeElement::Prop(_)));
    assert!(matches!(lit.members[1], TsTypeElement::Method(m) if m.optional));
    assert!(matches!(lit.members[2], TsTypeElement::Index(_)));
}

#[test]
fn test_type_operators() {
    let arena = Bump::new();
    assert!(matches!(declared_type(&arena, "let k: keyof T;"), TsType::Operator(_)));
    assert!(matches!(declared_type(&arena, "let q: typeof x.y;"), TsType::Query(_)));
    assert!(matches!(declared_type(&arena, "let i: T['a'];"), TsType::IndexedAccess(_)));
    let ty = declared_type(&arena, "let l: 'a' | 1 | -1 | true;");
    assert!(matches!(ty, TsType::Union(u) if u.types.iter().all(|t| matches!(t, TsType::Lit(_)))));
}

#[test]
fn test_nested_type_arguments() {
    let arena = Bump::new();
    let ty = declared_type(&arena, "let m: Map<string, Array<number>>;");
    let TsType::Ref(reference) = ty else {
        panic!("expected a type reference");
    };
    assert_eq!(reference.type_args.map(|args| args.len()), Some(2));
    assert!(matches!(reference.name, TsEntityName::Ident(id) if id.name == "Map"));
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_as_and_satisfies() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "x as unknown as T;", ts());
    let Expression::TsAs(outer) = last_expr(program) else {
        panic!("expected an 'as' expression");
    };
    assert!(matches!(outer.expr, Expression::TsAs(_)));

    let program = parse_ok(&arena, "cfg satisfies Config;", ts());
    assert!(matches!(last_expr(program), Expression::TsSatisfies(_)));
}

#[test]
fn test_non_null() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "maybe!.value;", ts());
    let Expression::Member(member) = last_expr(program) else {
        panic!("expected a member expression");
    };
    assert!(matches!(member.object, Expression::TsNonNull(_)));
}

#[test]
fn test_generic_call_and_new() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "f<string>(x);", ts());
    assert!(matches!(last_expr(program), Expression::Call(c) if c.typ.is_some_and(|t| t.type_args.is_some())));

    let program = parse_ok(&arena, "new Map<string, number>();", ts());
    assert!(matches!(last_expr(program), Expression::New(n) if n.typ.is_some() && n.args.is_some()));
}

#[test]
fn test_comparison_fallback() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "a < b;", ts());
    assert!(matches!(last_expr(program), Expression::Binary(b) if b.op == BinaryOp::Lt));

    let program = parse_ok(&arena, "a < b > c;", ts());
    let Expression::Binary(outer) = last_expr(program) else {
        panic!("expected a comparison");
    };
    assert_eq!(outer.op, BinaryOp::Gt);
    assert!(matches!(outer.left, Expression::Binary(inner) if inner.op == BinaryOp::Lt));
}

#[test]
fn test_ambiguous_generics_failure() {
    let err = parse_err("a.b < c >;", ts());
    assert_eq!(err.code, ErrorCode::AmbiguousGenericsFallbackFailure);
    assert_eq!((err.range.lo, err.range.hi), (4, 5));
}

#[test]
fn test_generic_arrow() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "const id = <T>(x: T): T => x;", ts());
    let Statement::Var(decl) = program.body[0] else {
        panic!("expected a declaration");
    };
    assert!(matches!(
        decl.decls[0].init,
        Some(Expression::Arrow(a)) if a.typ.is_some_and(|t| t.type_params.is_some())
    ));

    // With JSX enabled only the `<T,>` form is an arrow.
    let program = parse_ok(&arena, "const id = <T,>(x: T) => x;", tsx());
    let Statement::Var(decl) = program.body[0] else {
        panic!("expected a declaration");
    };
    assert!(matches!(decl.decls[0].init, Some(Expression::Arrow(_))));
}

// ============================================================================
// Declarations
// ============================================================================

#[test]
fn test_interface() {
    let arena = Bump::new();
    let source = "interface Shape extends Base<T>, Other { area(): number; readonly name: string }";
    let program = parse_ok(&arena, source, ts());
    let Statement::TsInterface(decl) = program.body[0] else {
        panic!("expected an interface");
    };
    assert_eq!(decl.id.name, "Shape");
    assert_eq!(decl.extends.len(), 2);
    assert!(decl.extends[0].type_args.is_some());
    assert_eq!(decl.body.len(), 2);
    assert!(matches!(decl.body[1], TsTypeElement::Prop(p) if p.readonly));
}

#[test]
fn test_type_alias() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "type Pair<T> = [T, T];", ts());
    let Statement::TsTypeAlias(decl) = program.body[0] else {
        panic!("expected a type alias");
    };
    assert_eq!(decl.id.name, "Pair");
    assert!(matches!(decl.type_ann, TsType::Tuple(_)));
}

#[test]
fn test_enums() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "enum Color { Red, Green = 2, 'Blue' } const enum E { A }", ts());
    let Statement::TsEnum(color) = program.body[0] else {
        panic!("expected an enum");
    };
    assert!(!color.is_const);
    assert_eq!(color.members.len(), 3);
    assert!(color.members[1].init.is_some());
    assert!(matches!(color.members[2].id, PropKey::Str(_)));
    assert!(matches!(program.body[1], Statement::TsEnum(e) if e.is_const));
}

#[test]
fn test_class_features() {
    let arena = Bump::new();
    let source = "class Point<T> extends Base<T> implements Shape {
        x?: number;
        y!: string;
        private z = 1;
        constructor(public a: number, private readonly b: number) { super(); }
    }";
    let program = parse_ok(&arena, source, ts());
    let Statement::Class(decl) = program.body[0] else {
        panic!("expected a class");
    };
    let class = &decl.class;
    assert_eq!(class.implements.len(), 1);
    assert!(class.typ.is_some_and(|t| t.type_params.is_some() && t.type_args.is_some()));
    assert!(matches!(class.body[0], ClassMember::Prop(p) if p.typ.is_some_and(|t| t.optional)));
    assert!(matches!(class.body[1], ClassMember::Prop(p) if p.typ.is_some_and(|t| t.definite)));
    assert!(matches!(class.body[2], ClassMember::Prop(p) if p.modifiers.contains(ModifierFlags::PRIVATE)));

    let ClassMember::Method(ctor) = class.body[3] else {
        panic!("expected a constructor");
    };
    assert_eq!(ctor.kind, MethodKind::Constructor);
    assert_eq!(ctor.func.params[0].modifiers, ModifierFlags::PUBLIC);
    assert_eq!(ctor.func.params[1].modifiers, ModifierFlags::PRIVATE | ModifierFlags::READONLY);
}

#[test]
fn test_abstract_class() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "abstract class A { abstract area(): number; }", ts());
    let Statement::Class(decl) = program.body[0] else {
        panic!("expected a class");
    };
    assert!(decl.class.is_abstract);
    let ClassMember::Method(method) = decl.class.body[0] else {
        panic!("expected a method");
    };
    assert!(method.modifiers.contains(ModifierFlags::ABSTRACT));
    assert!(method.func.body.is_none());
}

#[test]
fn test_type_only_imports() {
    let arena = Bump::new();
    let program = parse_ok(&arena, "import type { A } from './a'; import type from 'm';", ts_module());
    assert!(matches!(program.body[0], Statement::Import(i) if i.type_only));
    assert!(matches!(
        program.body[1],
        Statement::Import(i) if !i.type_only && matches!(i.specifiers[0], ImportSpec::Default(d) if d.local.name == "type")
    ));
}

#[test]
fn test_exported_declarations() {
    let arena = Bump::new();
    let program = parse_ok(
        &arena,
        "export type X = number; export interface I {} export enum E {} export default interface D {}",
        ts_module(),
    );
    assert_eq!(program.body.len(), 4);
    assert!(matches!(program.body[0], Statement::ExportNamed(e) if matches!(e.decl, Some(Statement::TsTypeAlias(_)))));
    assert!(matches!(program.body[1], Statement::ExportNamed(e) if matches!(e.decl, Some(Statement::TsInterface(_)))));
    assert!(matches!(program.body[2], Statement::ExportNamed(e) if matches!(e.decl, Some(Statement::TsEnum(_)))));
    assert!(matches!(program.body[3], Statement::ExportDefault(e) if matches!(e.decl, DefaultDecl::TsInterface(_))));
}
