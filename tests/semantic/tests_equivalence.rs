//! Semantic equivalence: structure plus resolution.

use javelin::JavaFile;
use javelin::frontend::{BindingId, BindingTable, RawBodyDeclaration, RawInfixOperator};
use javelin::semantic::semantically_equivalent;
use javelin::{Modifiers, TextRange, TextSize, TreeKind};

use crate::helpers::bindings::*;
use crate::helpers::raw::*;
use crate::helpers::tree::*;

/// A class of `int name [= l + r];` fields. With `bound`, every field gets
/// a binding and initializer operands resolve to the fields they name.
fn int_fields(source: &str, bound: bool) -> JavaFile {
    let src = Source(source);
    let mut table = BindingTable::new();
    let int = bound.then(|| primitive_type(&mut table, "int"));
    let a = bound.then(|| class_type(&mut table, "A"));
    let mut declared: Vec<(String, Option<BindingId>)> = Vec::new();
    let lookup = |declared: &[(String, Option<BindingId>)], name: &str| {
        declared.iter().find(|(n, _)| n == name).and_then(|(_, b)| *b)
    };

    let mut members = Vec::new();
    let mut cursor = src.find("{");
    for _ in 0..source.matches("int ").count() {
        let int_kw = src.after(cursor, "int");
        let semi = src.after(int_kw, ";");
        let text = source[usize::from(int_kw.end())..usize::from(semi.start())].trim();
        let name = text.split(' ').next().unwrap_or_default();
        let name_span = src.after(int_kw, name);
        let binding = match (a, int) {
            (Some(a), Some(int)) => Some(field_binding(&mut table, a, name, int, Modifiers::empty())),
            _ => None,
        };

        let initializer = text.split_once(" = ").map(|(_, init)| {
            let init_span = src.after(name_span, init);
            let parts: Vec<&str> = init.split(' ').collect();
            let (l, r) = (parts[0], parts[2]);
            let l_span = TextRange::at(init_span.start(), TextSize::of(l));
            let r_span = TextRange::at(init_span.end() - TextSize::of(r), TextSize::of(r));
            infix(
                init_span,
                RawInfixOperator::Plus,
                name_expr(l_span, l, lookup(&declared, l), int),
                name_expr(r_span, r, lookup(&declared, r), int),
                int,
            )
        });
        let end = initializer.as_ref().map_or(name_span, |i| i.span);
        members.push(field(
            src.span(int_kw, semi),
            Vec::new(),
            primitive(int_kw, "int", int),
            vec![fragment(
                src.span(name_span, end),
                simple(name_span, name, binding),
                initializer,
                binding,
            )],
        ));
        declared.push((name.to_string(), binding));
        cursor = semi;
    }

    let declaration = class(src.all(), simple(src.find("A"), "A", a), a, members);
    analyze_unit(source, unit(src, vec![declaration]), table)
}

const SUMS: &str = "class A { int x; int y; int p = x + y; int q = x + y; int r = y + x; }";

// ============================================================================
// IDENTIFIERS
// ============================================================================

#[test]
fn test_same_names_resolving_alike_are_equivalent() {
    let file = int_fields(SUMS, true);
    let init = |name| initializer_of(declaration_named(file.root(), name));

    assert!(semantically_equivalent(&file.semantic, init("p"), init("q")));
    assert!(!semantically_equivalent(&file.semantic, init("p"), init("r")));
}

#[test]
fn test_unresolved_names_compare_by_text() {
    let file = int_fields(SUMS, false);
    let init = |name| initializer_of(declaration_named(file.root(), name));

    assert!(file.semantic.symbol_of_node(first_of(init("p"), TreeKind::IDENTIFIER)).is_unknown());
    assert!(semantically_equivalent(&file.semantic, init("p"), init("q")));
    assert!(!semantically_equivalent(&file.semantic, init("p"), init("r")));
}

#[test]
fn test_different_kinds_are_never_equivalent() {
    let file = int_fields(SUMS, true);
    let p = declaration_named(file.root(), "p");
    assert!(!semantically_equivalent(&file.semantic, p, initializer_of(p)));
}

// ============================================================================
// CALLS
// ============================================================================

#[test]
fn test_calls_to_different_overloads_differ() {
    let source = "class A { void m() { f(1); f(1); f(1); } }";
    let src = Source(source);
    let mut table = BindingTable::new();
    let void = primitive_type(&mut table, "void");
    let int = primitive_type(&mut table, "int");
    let long = primitive_type(&mut table, "long");
    let a = class_type(&mut table, "A");
    let m = method_binding(&mut table, a, "m", &[], Some(void));
    let f_int = method_binding(&mut table, a, "f", &[int], Some(void));
    let f_long = method_binding(&mut table, a, "f", &[long], Some(void));

    let statements = [f_int, f_int, f_long]
        .into_iter()
        .enumerate()
        .map(|(i, target)| {
            let text = src.nth("f(1);", i);
            let call_span = TextRange::at(text.start(), TextSize::new(4));
            let argument = TextRange::at(text.start() + TextSize::new(2), TextSize::new(1));
            expression_statement(
                text,
                call(
                    call_span,
                    None,
                    simple(TextRange::at(text.start(), TextSize::new(1)), "f", None),
                    vec![number(argument, Some(int))],
                    Some(target),
                ),
            )
        })
        .collect();
    let body = block(src.span(src.nth("{", 1), src.nth("}", 0)), statements);
    let declaration = class(
        src.all(),
        simple(src.find("A"), "A", Some(a)),
        Some(a),
        vec![RawBodyDeclaration::Method(method(
            src.span(src.find("void"), src.nth("}", 0)),
            Some(primitive(src.find("void"), "void", Some(void))),
            simple(src.find("m"), "m", Some(m)),
            Vec::new(),
            Some(body),
            Some(m),
        ))],
    );
    let file = analyze_unit(source, unit(src, vec![declaration]), table);

    let calls = nodes_of(file.root(), TreeKind::METHOD_INVOCATION);
    assert_eq!(calls.len(), 3);
    assert!(semantically_equivalent(&file.semantic, calls[0], calls[1]));
    assert!(!semantically_equivalent(&file.semantic, calls[0], calls[2]));
    assert_eq!(file.semantic.symbol_of(f_int).usages().len(), 2);
}
