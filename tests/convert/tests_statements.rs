//! Statement conversion: switch regrouping, local declarations, branches.

use javelin::frontend::{BindingTable, RawBodyDeclaration, RawStatementKind};
use javelin::{Modifiers, TreeKind};

use crate::helpers::bindings::*;
use crate::helpers::raw::*;
use crate::helpers::tree::*;

// ============================================================================
// SWITCH
// ============================================================================

#[test]
fn test_switch_body_is_grouped_by_case() {
    let source = "class A { void m(int x) { switch (x) { case 1: m(x); ; case 2: break; } } }";
    let src = Source(source);
    let mut table = BindingTable::new();
    let int = primitive_type(&mut table, "int");
    let void = primitive_type(&mut table, "void");
    let a = class_type(&mut table, "A");
    let m = method_binding(&mut table, a, "m", &[int], Some(void));
    let x = parameter_binding(&mut table, m, "x", int, 0);

    let invocation = src.find("m(x)");
    let switch_body = vec![
        statement(
            src.find("case 1:"),
            RawStatementKind::SwitchCase {
                labels: vec![number(src.find("1"), Some(int))],
                is_default: false,
                arrow: false,
            },
        ),
        expression_statement(
            src.find("m(x);"),
            call(
                invocation,
                None,
                simple(src.within(invocation, "m"), "m", None),
                vec![name_expr(src.within(invocation, "x"), "x", Some(x), Some(int))],
                Some(m),
            ),
        ),
        statement(
            src.find("case 2:"),
            RawStatementKind::SwitchCase {
                labels: vec![number(src.find("2"), Some(int))],
                is_default: false,
                arrow: false,
            },
        ),
        statement(src.find("break;"), RawStatementKind::Break { label: None }),
    ];
    let switch = statement(
        src.span(src.find("switch"), src.nth("}", 0)),
        RawStatementKind::Switch {
            selector: name_expr(src.nth("x", 1), "x", Some(x), Some(int)),
            body: switch_body,
        },
    );
    let declaration = class(
        src.all(),
        simple(src.find("A"), "A", Some(a)),
        Some(a),
        vec![RawBodyDeclaration::Method(method(
            src.span(src.find("void"), src.nth("}", 1)),
            Some(primitive(src.find("void"), "void", Some(void))),
            simple(src.find("m"), "m", Some(m)),
            vec![parameter(
                src.find("int x"),
                primitive(src.find("int"), "int", Some(int)),
                simple(src.nth("x", 0), "x", Some(x)),
                Some(x),
            )],
            Some(block(src.span(src.nth("{", 1), src.nth("}", 1)), vec![switch])),
            Some(m),
        ))],
    );
    let file = analyze_unit(source, unit(src, vec![declaration]), table);
    let root = file.root();

    let groups = nodes_of(root, TreeKind::CASE_GROUP);
    assert_eq!(groups.len(), 2);
    let first_label = groups[0].child_of_kind(TreeKind::CASE_LABEL).unwrap();
    assert_eq!(first_label.text(), "case 1:");
    assert_eq!(groups[1].text(), "case 2: break;");

    // The stray `;` stays with the group it follows.
    let empty = nodes_of(root, TreeKind::EMPTY_STATEMENT);
    assert_eq!(empty.len(), 1);
    assert!(empty[0].parent().is_some_and(|p| p == groups[0]));

    let switch = first_of(root, TreeKind::SWITCH_STATEMENT);
    assert_eq!(switch.last_token().map(|t| t.text().to_string()), Some("}".to_string()));

    let semantic = &file.semantic;
    let callee = semantic.symbol_of_node(first_of(root, TreeKind::METHOD_INVOCATION));
    assert!(callee.is_same(semantic.symbol_of(m)));
    assert!(callee.declaration().is_some_and(|d| d.is(TreeKind::METHOD)));
    assert_eq!(callee.usages().len(), 1);
    assert_eq!(semantic.symbol_of(x).usages().len(), 2);
}

// ============================================================================
// LOCAL DECLARATIONS
// ============================================================================

#[test]
fn test_multi_fragment_local_splits_into_variables() {
    let source = "class A { void m() { final int a = 1, b; } }";
    let src = Source(source);
    let mut table = BindingTable::new();
    let int = primitive_type(&mut table, "int");
    let void = primitive_type(&mut table, "void");
    let a_class = class_type(&mut table, "A");
    let m = method_binding(&mut table, a_class, "m", &[], Some(void));
    let a = local_binding(&mut table, "A.m()#a", "a", int);
    let b = local_binding(&mut table, "A.m()#b", "b", int);
    edit_variable(&mut table, a, |raw| raw.modifiers = Modifiers::FINAL);
    edit_variable(&mut table, b, |raw| raw.modifiers = Modifiers::FINAL);

    let a_name = src.within(src.find("a ="), "a");
    let b_name = src.within(src.find("b;"), "b");
    let local = statement(
        src.span(src.find("final"), src.find(";")),
        RawStatementKind::LocalVariable {
            modifiers: vec![keyword(src.find("final"), "final")],
            ty: primitive(src.find("int"), "int", Some(int)),
            fragments: vec![
                fragment(
                    src.span(a_name, src.find("1")),
                    simple(a_name, "a", Some(a)),
                    Some(number(src.find("1"), Some(int))),
                    Some(a),
                ),
                fragment(b_name, simple(b_name, "b", Some(b)), None, Some(b)),
            ],
        },
    );
    let declaration = class(
        src.all(),
        simple(src.find("A"), "A", Some(a_class)),
        Some(a_class),
        vec![RawBodyDeclaration::Method(method(
            src.span(src.find("void"), src.nth("}", 0)),
            Some(primitive(src.find("void"), "void", Some(void))),
            simple(src.find("m"), "m", Some(m)),
            Vec::new(),
            Some(block(src.span(src.nth("{", 1), src.nth("}", 0)), vec![local])),
            Some(m),
        ))],
    );
    let file = analyze_unit(source, unit(src, vec![declaration]), table);

    let variables = nodes_of(file.root(), TreeKind::VARIABLE);
    assert_eq!(variables.len(), 2);
    assert_eq!(variables[0].text(), "final int a = 1,");
    assert_eq!(variables[1].text(), "b;");
    assert!(variables[0].child_of_kind(TreeKind::MODIFIERS).is_some());
    assert!(variables[1].child_of_kind(TreeKind::MODIFIERS).is_none());
    assert_eq!(variables[1].type_binding(), Some(int));

    let semantic = &file.semantic;
    let b_symbol = semantic.symbol_of(b);
    assert!(b_symbol.declaration().is_some_and(|d| d == variables[1]));
    assert!(b_symbol.owner().is_same(semantic.symbol_of(m)));
    assert!(b_symbol.is_local_variable());
    assert_eq!(
        semantic.symbol_of(a).constant_value(),
        Some(javelin::Constant::Int(1))
    );
}

// ============================================================================
// BRANCHES
// ============================================================================

#[test]
fn test_if_else_keeps_both_branches() {
    let source = "class A { int m(boolean c) { if (c) return 1; else { return 2; } } }";
    let src = Source(source);
    let mut table = BindingTable::new();
    let int = primitive_type(&mut table, "int");
    let boolean = primitive_type(&mut table, "boolean");
    let a = class_type(&mut table, "A");
    let m = method_binding(&mut table, a, "m", &[boolean], Some(int));
    let c = parameter_binding(&mut table, m, "c", boolean, 0);

    let if_statement = statement(
        src.span(src.find("if"), src.nth("}", 0)),
        RawStatementKind::If {
            condition: name_expr(src.within(src.find("(c)"), "c"), "c", Some(c), Some(boolean)),
            then: Box::new(statement(
                src.find("return 1;"),
                RawStatementKind::Return {
                    expression: Some(number(src.find("1"), Some(int))),
                },
            )),
            otherwise: Some(Box::new(statement(
                src.span(src.nth("{", 2), src.nth("}", 0)),
                RawStatementKind::Block(block(
                    src.span(src.nth("{", 2), src.nth("}", 0)),
                    vec![statement(
                        src.find("return 2;"),
                        RawStatementKind::Return {
                            expression: Some(number(src.find("2"), Some(int))),
                        },
                    )],
                )),
            ))),
        },
    );
    let declaration = class(
        src.all(),
        simple(src.find("A"), "A", Some(a)),
        Some(a),
        vec![RawBodyDeclaration::Method(method(
            src.span(src.find("int m"), src.nth("}", 1)),
            Some(primitive(src.find("int"), "int", Some(int))),
            simple(src.within(src.find("m("), "m"), "m", Some(m)),
            vec![parameter(
                src.find("boolean c"),
                primitive(src.find("boolean"), "boolean", Some(boolean)),
                simple(src.within(src.find("boolean c"), "c"), "c", Some(c)),
                Some(c),
            )],
            Some(block(src.span(src.nth("{", 1), src.nth("}", 1)), vec![if_statement])),
            Some(m),
        ))],
    );
    let file = analyze_unit(source, unit(src, vec![declaration]), table);

    let branch = first_of(file.root(), TreeKind::IF_STATEMENT);
    let kinds: Vec<_> = inner_children(branch).iter().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        vec![TreeKind::IDENTIFIER, TreeKind::RETURN_STATEMENT, TreeKind::BLOCK]
    );
    assert_eq!(nodes_of(branch, TreeKind::RETURN_STATEMENT).len(), 2);
    assert_eq!(file.semantic.symbol_of(c).usages().len(), 1);
}
