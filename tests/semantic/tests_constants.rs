//! Constant folding over initializers and constant variables.

use javelin::frontend::{BindingId, BindingTable, RawInfixOperator, RawLiteralKind};
use javelin::{Constant, JavaFile, Modifiers, TextRange, TextSize, TreeKind};
use rstest::rstest;
use smol_str::SmolStr;

use crate::helpers::bindings::*;
use crate::helpers::raw::*;
use crate::helpers::tree::*;

/// `class A { int x = <left> <op> <right>; }` folded without bindings.
fn fold_binary(text: &str, operator: RawInfixOperator) -> Option<Constant> {
    let source = format!("class A {{ int x = {text}; }}");
    let src = Source(&source);
    let init = src.find(text);
    let parts: Vec<&str> = text.splitn(3, ' ').collect();
    let (left_text, right_text) = (parts[0], parts[2]);
    let left = TextRange::at(init.start(), TextSize::of(left_text));
    let right = TextRange::at(init.end() - TextSize::of(right_text), TextSize::of(right_text));
    let declaration = class(
        src.all(),
        simple(src.find("A"), "A", None),
        None,
        vec![field(
            src.span(src.find("int"), src.after(init, ";")),
            Vec::new(),
            primitive(src.find("int"), "int", None),
            vec![fragment(
                src.span(src.find("x ="), init),
                simple(src.find("x"), "x", None),
                Some(infix(init, operator, number(left, None), number(right, None), None)),
                None,
            )],
        )],
    );
    let file = analyze_unit(&source, unit(src, vec![declaration]), BindingTable::new());
    let value = initializer_of(first_of(file.root(), TreeKind::VARIABLE));
    file.semantic.constant_value(value)
}

// ============================================================================
// OPERATORS
// ============================================================================

#[rstest]
#[case("1 + 2", RawInfixOperator::Plus, Constant::Int(3))]
#[case("7 - 10", RawInfixOperator::Minus, Constant::Int(-3))]
#[case("6 * 7", RawInfixOperator::Times, Constant::Int(42))]
#[case("7 / 2", RawInfixOperator::Divide, Constant::Int(3))]
#[case("7 % 4", RawInfixOperator::Remainder, Constant::Int(3))]
#[case("1 << 33", RawInfixOperator::LeftShift, Constant::Int(2))]
#[case("2147483647 + 1", RawInfixOperator::Plus, Constant::Int(i32::MIN))]
#[case("1L << 33", RawInfixOperator::LeftShift, Constant::Long(1 << 33))]
#[case("1 + 2L", RawInfixOperator::Plus, Constant::Long(3))]
#[case("7 > 3", RawInfixOperator::Greater, Constant::Bool(true))]
#[case("6 & 3", RawInfixOperator::And, Constant::Int(2))]
fn test_binary_folding(#[case] text: &str, #[case] operator: RawInfixOperator, #[case] expected: Constant) {
    assert_eq!(fold_binary(text, operator), Some(expected));
}

#[test]
fn test_integer_division_by_zero_does_not_fold() {
    assert_eq!(fold_binary("1 / 0", RawInfixOperator::Divide), None);
}

// ============================================================================
// CONSTANT VARIABLES
// ============================================================================

struct Constants {
    file: JavaFile,
    x: BindingId,
}

/// `class A { [final] int x = 1 + 2; }` with `x` bound.
fn field_x(modifiers: Modifiers) -> Constants {
    let source = if modifiers.contains(Modifiers::FINAL) {
        "class A { final int x = 1 + 2; }"
    } else {
        "class A {       int x = 1 + 2; }"
    };
    let src = Source(source);
    let mut table = BindingTable::new();
    let int = primitive_type(&mut table, "int");
    let a = class_type(&mut table, "A");
    let x = field_binding(&mut table, a, "x", int, modifiers);

    let init = src.find("1 + 2");
    let raw_modifiers = if modifiers.contains(Modifiers::FINAL) {
        vec![keyword(src.find("final"), "final")]
    } else {
        Vec::new()
    };
    let start = raw_modifiers.first().map_or(src.find("int"), |_| src.find("final"));
    let declaration = class(
        src.all(),
        simple(src.find("A"), "A", Some(a)),
        Some(a),
        vec![field(
            src.span(start, src.find(";")),
            raw_modifiers,
            primitive(src.find("int"), "int", Some(int)),
            vec![fragment(
                src.span(src.find("x ="), init),
                simple(src.find("x"), "x", Some(x)),
                Some(infix(
                    init,
                    RawInfixOperator::Plus,
                    number(src.find("1"), Some(int)),
                    number(src.find("2"), Some(int)),
                    Some(int),
                )),
                Some(x),
            )],
        )],
    );
    Constants {
        file: analyze_unit(source, unit(src, vec![declaration]), table),
        x,
    }
}

#[test]
fn test_final_field_folds_its_initializer() {
    let Constants { file, x } = field_x(Modifiers::FINAL);
    let symbol = file.semantic.symbol_of(x);
    assert!(symbol.is_final());
    assert_eq!(symbol.constant_value(), Some(Constant::Int(3)));
}

#[test]
fn test_non_final_field_is_not_constant() {
    let Constants { file, x } = field_x(Modifiers::empty());
    assert_eq!(file.semantic.symbol_of(x).constant_value(), None);
    // The expression itself is still constant.
    let init = initializer_of(first_of(file.root(), TreeKind::VARIABLE));
    assert_eq!(file.semantic.constant_value(init), Some(Constant::Int(3)));
}

#[test]
fn test_reference_to_constant_field_folds() {
    let source = "class A { static final int X = 40; int y = X + 2; }";
    let src = Source(source);
    let mut table = BindingTable::new();
    let int = primitive_type(&mut table, "int");
    let a = class_type(&mut table, "A");
    let x = field_binding(&mut table, a, "X", int, Modifiers::STATIC | Modifiers::FINAL);
    let y = field_binding(&mut table, a, "y", int, Modifiers::empty());

    let forty = src.find("40");
    let sum = src.find("X + 2");
    let declaration = class(
        src.all(),
        simple(src.find("A"), "A", Some(a)),
        Some(a),
        vec![
            field(
                src.span(src.find("static"), src.nth(";", 0)),
                vec![keyword(src.find("static"), "static"), keyword(src.find("final"), "final")],
                primitive(src.nth("int", 0), "int", Some(int)),
                vec![fragment(
                    src.span(src.nth("X", 0), forty),
                    simple(src.nth("X", 0), "X", Some(x)),
                    Some(number(forty, Some(int))),
                    Some(x),
                )],
            ),
            field(
                src.span(src.nth("int", 1), src.nth(";", 1)),
                Vec::new(),
                primitive(src.nth("int", 1), "int", Some(int)),
                vec![fragment(
                    src.span(src.find("y"), sum),
                    simple(src.find("y"), "y", Some(y)),
                    Some(infix(
                        sum,
                        RawInfixOperator::Plus,
                        name_expr(src.nth("X", 1), "X", Some(x), Some(int)),
                        number(src.find("2"), Some(int)),
                        Some(int),
                    )),
                    Some(y),
                )],
            ),
        ],
    );
    let file = analyze_unit(source, unit(src, vec![declaration]), table);

    let y_init = initializer_of(declaration_named(file.root(), "y"));
    assert_eq!(file.semantic.constant_value(y_init), Some(Constant::Int(42)));
    assert_eq!(file.semantic.symbol_of(x).constant_value(), Some(Constant::Int(40)));
    assert_eq!(file.semantic.symbol_of(x).usages().len(), 1);
}

#[test]
fn test_resolver_constant_concatenates_with_string_literal() {
    let source = "class A { String s = GREETING + \"!\"; }";
    let src = Source(source);
    let mut table = BindingTable::new();
    let string = string_type(&mut table);
    let a = class_type(&mut table, "A");
    let b = class_type(&mut table, "B");
    let greeting = field_binding(&mut table, b, "GREETING", string, Modifiers::STATIC | Modifiers::FINAL);
    edit_variable(&mut table, greeting, |raw| {
        raw.constant_value = Some(Constant::String(SmolStr::new("hi")));
    });

    let init = src.find("GREETING + \"!\"");
    let declaration = class(
        src.all(),
        simple(src.find("A"), "A", Some(a)),
        Some(a),
        vec![field(
            src.span(src.find("String"), src.find(";")),
            Vec::new(),
            named(src.find("String"), "String", Some(string)),
            vec![fragment(
                src.span(src.find("s ="), init),
                simple(src.within(src.find("s ="), "s"), "s", None),
                Some(infix(
                    init,
                    RawInfixOperator::Plus,
                    name_expr(src.find("GREETING"), "GREETING", Some(greeting), Some(string)),
                    literal(src.find("\"!\""), RawLiteralKind::String, Some(string)),
                    Some(string),
                )),
                None,
            )],
        )],
    );
    let file = analyze_unit(source, unit(src, vec![declaration]), table);

    let value = initializer_of(first_of(file.root(), TreeKind::VARIABLE));
    assert_eq!(
        file.semantic.constant_value(value),
        Some(Constant::String(SmolStr::new("hi!")))
    );
    // Declared elsewhere: a usage but no declaration in this file.
    let symbol = file.semantic.symbol_of(greeting);
    assert!(symbol.declaration().is_none());
    assert_eq!(symbol.usages().len(), 1);
}
