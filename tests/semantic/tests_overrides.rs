//! Override resolution through the binding hierarchy.

use javelin::frontend::{BindingId, BindingTable, RawPackageBinding, RawTypeKind};
use javelin::{JavaFile, Modifiers};
use rstest::rstest;

use crate::helpers::bindings::*;
use crate::helpers::raw::*;
use crate::helpers::tree::*;

fn with_bindings(table: BindingTable) -> JavaFile {
    let source = "class A { }";
    let src = Source(source);
    let declaration = class(src.all(), simple(src.find("A"), "A", None), None, Vec::new());
    analyze_unit(source, unit(src, vec![declaration]), table)
}

fn owners(symbols: Vec<javelin::Symbol<'_>>) -> Vec<String> {
    symbols
        .into_iter()
        .map(|s| s.owner().name().to_string())
        .collect()
}

// ============================================================================
// HIERARCHY WALK
// ============================================================================

#[test]
fn test_superclass_chain_before_interfaces() {
    let mut table = BindingTable::new();
    let int = primitive_type(&mut table, "int");
    let void = primitive_type(&mut table, "void");
    let i = interface_type(&mut table, "I");
    let a = class_type(&mut table, "A");
    let b = class_type(&mut table, "B");
    let c = class_type(&mut table, "C");
    extend(&mut table, a, None, &[i]);
    extend(&mut table, b, Some(a), &[]);
    extend(&mut table, c, Some(b), &[]);
    method_binding(&mut table, i, "m", &[int], Some(void));
    method_binding(&mut table, a, "m", &[int], Some(void));
    // Same name, other signature.
    method_binding(&mut table, b, "m", &[], Some(void));
    let c_m = method_binding(&mut table, c, "m", &[int], Some(void));
    let file = with_bindings(table);

    let overridden = file.semantic.symbol_of(c_m).overridden_symbols();
    assert_eq!(owners(overridden.clone()), vec!["A", "I"]);
    assert!(overridden.iter().all(|s| s.is_method_symbol()));
    assert!(file.semantic.symbol_of(c_m).is_overridable());
}

#[test]
fn test_private_and_static_candidates_are_hidden() {
    let mut table = BindingTable::new();
    let void = primitive_type(&mut table, "void");
    let a = class_type(&mut table, "A");
    let b = class_type(&mut table, "B");
    extend(&mut table, b, Some(a), &[]);
    let hidden = method_binding(&mut table, a, "m", &[], Some(void));
    edit_method(&mut table, hidden, |raw| raw.modifiers = Modifiers::PRIVATE);
    let shadowed = method_binding(&mut table, a, "s", &[], Some(void));
    edit_method(&mut table, shadowed, |raw| raw.modifiers = Modifiers::STATIC);
    let b_m = method_binding(&mut table, b, "m", &[], Some(void));
    let b_s = method_binding(&mut table, b, "s", &[], Some(void));
    edit_method(&mut table, b_s, |raw| raw.modifiers = Modifiers::STATIC);
    let file = with_bindings(table);

    assert!(file.semantic.symbol_of(b_m).overridden_symbols().is_empty());
    assert!(file.semantic.symbol_of(b_s).overridden_symbols().is_empty());
    assert!(!file.semantic.symbol_of(b_s).is_overridable());
}

#[test]
fn test_interface_methods_override_object_members() {
    let mut table = BindingTable::new();
    let string = string_type(&mut table);
    let object = class_type(&mut table, "java.lang.Object");
    let object_to_string = method_binding(&mut table, object, "toString", &[], Some(string));
    let i = interface_type(&mut table, "I");
    let i_to_string = method_binding(&mut table, i, "toString", &[], Some(string));
    let file = with_bindings(table);

    let overridden = file.semantic.symbol_of(i_to_string).overridden_symbols();
    assert_eq!(overridden.len(), 1);
    assert!(overridden[0].is_same(file.semantic.symbol_of(object_to_string)));
}

#[test]
fn test_cyclic_hierarchy_terminates() {
    let mut table = BindingTable::new();
    let void = primitive_type(&mut table, "void");
    let x = class_type(&mut table, "X");
    let y = class_type(&mut table, "Y");
    extend(&mut table, x, Some(y), &[]);
    extend(&mut table, y, Some(x), &[]);
    let y_m = method_binding(&mut table, y, "m", &[], Some(void));
    let x_m = method_binding(&mut table, x, "m", &[], Some(void));
    let file = with_bindings(table);

    let overridden = file.semantic.symbol_of(x_m).overridden_symbols();
    assert_eq!(overridden.len(), 1);
    assert!(overridden[0].is_same(file.semantic.symbol_of(y_m)));
}

#[test]
fn test_unknown_symbol_overrides_nothing() {
    let file = with_bindings(BindingTable::new());
    let unknown = file.semantic.unknown_symbol();
    assert!(unknown.overridden_symbols().is_empty());
}

// ============================================================================
// GENERIC SUPER TYPES
// ============================================================================

#[test]
fn test_method_overrides_through_parameterized_interface() {
    let mut table = BindingTable::new();
    let int = primitive_type(&mut table, "int");
    let t = type_binding(&mut table, RawTypeKind::TypeVariable, "T");
    let comparable = interface_type(&mut table, "java.lang.Comparable");
    edit_type(&mut table, comparable, |raw| raw.type_parameters = vec![t]);
    let compare_to = method_binding(&mut table, comparable, "compareTo", &[t], Some(int));
    let foo = class_type(&mut table, "Foo");
    let comparable_of_foo = parameterize(&mut table, comparable, &[foo]);
    extend(&mut table, foo, None, &[comparable_of_foo]);
    let foo_compare_to = method_binding(&mut table, foo, "compareTo", &[foo], Some(int));
    let file = with_bindings(table);

    let overridden = file.semantic.symbol_of(foo_compare_to).overridden_symbols();
    assert_eq!(owners(overridden.clone()), vec!["Comparable"]);
    assert!(overridden[0].is_same(file.semantic.symbol_of(compare_to)));
}

#[test]
fn test_type_arguments_flow_through_the_superclass_chain() {
    let mut table = BindingTable::new();
    let void = primitive_type(&mut table, "void");
    let object = class_type(&mut table, "java.lang.Object");
    let string = string_type(&mut table);
    let t = type_binding(&mut table, RawTypeKind::TypeVariable, "T");
    let u = type_binding(&mut table, RawTypeKind::TypeVariable, "U");
    // class Base<T> { void m(T t) }
    let base = class_type(&mut table, "Base");
    edit_type(&mut table, base, |raw| raw.type_parameters = vec![t]);
    let base_m = method_binding(&mut table, base, "m", &[t], Some(void));
    // class Middle<U> extends Base<U> { }
    let middle = class_type(&mut table, "Middle");
    edit_type(&mut table, middle, |raw| raw.type_parameters = vec![u]);
    let base_of_u = parameterize(&mut table, base, &[u]);
    extend(&mut table, middle, Some(base_of_u), &[]);
    // class Sub extends Middle<String> { void m(String s); void m(Object o) }
    let sub = class_type(&mut table, "Sub");
    let middle_of_string = parameterize(&mut table, middle, &[string]);
    extend(&mut table, sub, Some(middle_of_string), &[]);
    let sub_m = method_binding(&mut table, sub, "m", &[string], Some(void));
    let clash = method_binding(&mut table, sub, "m", &[object], Some(void));
    let file = with_bindings(table);

    let overridden = file.semantic.symbol_of(sub_m).overridden_symbols();
    assert_eq!(overridden.len(), 1);
    assert!(overridden[0].is_same(file.semantic.symbol_of(base_m)));
    assert!(file.semantic.symbol_of(clash).overridden_symbols().is_empty());
}

// ============================================================================
// PACKAGE ACCESS
// ============================================================================

fn package(table: &mut BindingTable, name: &str) -> BindingId {
    table.add_package(RawPackageBinding {
        name: name.into(),
        annotations: Vec::new(),
    })
}

#[rstest]
#[case("p1", Modifiers::empty(), false)]
#[case("p2", Modifiers::empty(), true)]
#[case("p1", Modifiers::PROTECTED, true)]
#[case("p1", Modifiers::PUBLIC, true)]
fn test_package_private_methods_override_within_their_package(
    #[case] sub_package: &str,
    #[case] base_modifiers: Modifiers,
    #[case] expected: bool,
) {
    let mut table = BindingTable::new();
    let void = primitive_type(&mut table, "void");
    let p2 = package(&mut table, "p2");
    let other = package(&mut table, sub_package);
    let a = class_type(&mut table, "p2.A");
    edit_type(&mut table, a, |raw| raw.package = Some(p2));
    let b = class_type(&mut table, &format!("{sub_package}.B"));
    edit_type(&mut table, b, |raw| raw.package = Some(other));
    extend(&mut table, b, Some(a), &[]);
    let a_m = method_binding(&mut table, a, "m", &[], Some(void));
    edit_method(&mut table, a_m, |raw| raw.modifiers = base_modifiers);
    let b_m = method_binding(&mut table, b, "m", &[], Some(void));
    let file = with_bindings(table);

    let overridden = file.semantic.symbol_of(b_m).overridden_symbols();
    assert_eq!(!overridden.is_empty(), expected);
}

#[test]
fn test_package_private_interface_methods_are_public() {
    let mut table = BindingTable::new();
    let void = primitive_type(&mut table, "void");
    let p1 = package(&mut table, "p1");
    let p2 = package(&mut table, "p2");
    let i = interface_type(&mut table, "p1.I");
    edit_type(&mut table, i, |raw| raw.package = Some(p1));
    let b = class_type(&mut table, "p2.B");
    edit_type(&mut table, b, |raw| raw.package = Some(p2));
    extend(&mut table, b, None, &[i]);
    method_binding(&mut table, i, "m", &[], Some(void));
    let b_m = method_binding(&mut table, b, "m", &[], Some(void));
    let file = with_bindings(table);

    assert_eq!(owners(file.semantic.symbol_of(b_m).overridden_symbols()), vec!["I"]);
}
