//! Types: generic normalization, structural equality and hierarchy.

use javelin::frontend::{BindingTable, RawTypeKind, RawTypeParameter};
use javelin::semantic::TypeKind;
use javelin::{JavaFile, Modifiers, TreeKind};
use rstest::rstest;

use crate::helpers::bindings::*;
use crate::helpers::raw::*;
use crate::helpers::tree::*;

/// A trivial file carrying `table`, for queries that need no tree.
fn with_bindings(table: BindingTable) -> JavaFile {
    let source = "class A { }";
    let src = Source(source);
    let declaration = class(src.all(), simple(src.find("A"), "A", None), None, Vec::new());
    analyze_unit(source, unit(src, vec![declaration]), table)
}

// ============================================================================
// GENERICS
// ============================================================================

#[test]
fn test_self_parameterization_is_the_declaration() {
    let source = "class List<T> { List<T> self; }";
    let src = Source(source);
    let mut table = BindingTable::new();
    let t = type_binding(&mut table, RawTypeKind::TypeVariable, "T");
    let list = class_type(&mut table, "List");
    edit_type(&mut table, list, |raw| raw.type_parameters = vec![t]);
    let list_of_t = parameterize(&mut table, list, &[t]);
    let self_field = field_binding(&mut table, list, "self", list_of_t, Modifiers::empty());

    let mut declaration = class(
        src.all(),
        simple(src.nth("List", 0), "List", Some(list)),
        Some(list),
        vec![field(
            src.span(src.nth("List", 1), src.find(";")),
            Vec::new(),
            parameterized(
                src.nth("List<T>", 1),
                named(src.nth("List", 1), "List", Some(list)),
                vec![named(src.nth("T", 1), "T", Some(t))],
                Some(list_of_t),
            ),
            vec![fragment(
                src.find("self"),
                simple(src.find("self"), "self", Some(self_field)),
                None,
                Some(self_field),
            )],
        )],
    );
    declaration.type_parameters = vec![RawTypeParameter {
        span: src.nth("T", 0),
        annotations: Vec::new(),
        name: simple(src.nth("T", 0), "T", Some(t)),
        bounds: Vec::new(),
        binding: Some(t),
    }];
    let file = analyze_unit(source, unit(src, vec![declaration]), table);
    let semantic = &file.semantic;

    let generic = semantic.type_of(list);
    assert!(semantic.type_of(list_of_t).is_same(generic));
    let node = first_of(file.root(), TreeKind::PARAMETERIZED_TYPE);
    assert!(semantic.type_of_node(node).is_same(generic));
    assert!(semantic.symbol_of(self_field).ty().is_same(generic));

    let parameters = generic.type_parameters();
    assert_eq!(parameters.len(), 1);
    assert!(parameters[0].is_type_variable());
    assert_eq!(generic.to_string(), "List");
    assert!(semantic.type_of(t).symbol().declaration().is_some_and(|d| d.is(TreeKind::TYPE_PARAMETER)));
}

#[test]
fn test_parameterization_with_other_arguments_is_distinct() {
    let mut table = BindingTable::new();
    let t = type_binding(&mut table, RawTypeKind::TypeVariable, "T");
    let string = string_type(&mut table);
    let list = class_type(&mut table, "List");
    edit_type(&mut table, list, |raw| raw.type_parameters = vec![t]);
    let list_of_string = parameterize(&mut table, list, &[string]);
    let again = parameterize(&mut table, list, &[string]);
    let file = with_bindings(table);
    let semantic = &file.semantic;

    let generic = semantic.type_of(list);
    let concrete = semantic.type_of(list_of_string);
    assert!(!concrete.is_same(generic));
    assert_ne!(concrete, generic);
    assert!(concrete.is_parameterized());
    assert_eq!(concrete.to_string(), "List<java.lang.String>");
    assert!(concrete.declaration().is_same(generic));
    assert!(concrete.erasure().is_same(generic));
    assert_eq!(concrete.type_arguments(), vec![semantic.type_of(string)]);
    assert!(semantic.type_of(again).is_same(concrete));
    // Both share the generic declaration's symbol.
    assert!(concrete.symbol().is_same(generic.symbol()));
}

// ============================================================================
// STRUCTURAL EQUALITY
// ============================================================================

#[test]
fn test_equal_parameterizations_in_distinct_slots() {
    let mut table = BindingTable::new();
    let t = type_binding(&mut table, RawTypeKind::TypeVariable, "T");
    let string = string_type(&mut table);
    let integer = class_type(&mut table, "java.lang.Integer");
    let list = interface_type(&mut table, "java.util.List");
    edit_type(&mut table, list, |raw| raw.type_parameters = vec![t]);
    let first = parameterize(&mut table, list, &[string]);
    let second = keyed_type(
        &mut table,
        RawTypeKind::Interface,
        "java.util.List",
        "Ljava/util/List<Ljava/lang/String;>;",
        |raw| {
            raw.type_arguments = vec![string];
            raw.type_declaration = Some(list);
        },
    );
    let of_integer = parameterize(&mut table, list, &[integer]);
    let file = with_bindings(table);
    let semantic = &file.semantic;

    let (first, second) = (semantic.type_of(first), semantic.type_of(second));
    assert!(!first.is_same(second));
    assert_eq!(first, second);
    assert_ne!(first, semantic.type_of(of_integer));
    assert_ne!(first, semantic.type_of(list));
}

/// `(upper, bound)` of a wildcard, `None` for `?`.
type Wildcard = (bool, Option<&'static str>);

#[rstest]
#[case((true, Some("A")), (true, Some("A")), true)]
#[case((false, Some("A")), (false, Some("A")), true)]
#[case((true, Some("A")), (false, Some("A")), false)]
#[case((true, Some("A")), (true, Some("B")), false)]
#[case((true, Some("A")), (true, None), false)]
#[case((true, None), (true, None), true)]
fn test_wildcard_equality(#[case] left: Wildcard, #[case] right: Wildcard, #[case] expected: bool) {
    let mut table = BindingTable::new();
    let a = class_type(&mut table, "A");
    let b = class_type(&mut table, "B");
    let mut wildcard = |key: &str, (upper, bound): Wildcard| {
        let bound = bound.map(|name| if name == "A" { a } else { b });
        keyed_type(&mut table, RawTypeKind::Wildcard, "?", key, |raw| {
            raw.upper_bound = upper;
            raw.wildcard_bound = bound;
        })
    };
    let left = wildcard("?#left", left);
    let right = wildcard("?#right", right);
    let file = with_bindings(table);
    let semantic = &file.semantic;

    let (left, right) = (semantic.type_of(left), semantic.type_of(right));
    assert!(!left.is_same(right));
    assert_eq!(left == right, expected);
    assert_eq!(right == left, expected);
}

#[rstest]
#[case(&["A", "I"], &["A", "I"], true)]
#[case(&["A", "I"], &["A", "J"], false)]
#[case(&["A", "I"], &["A"], false)]
fn test_intersection_equality(#[case] left: &[&str], #[case] right: &[&str], #[case] expected: bool) {
    let mut table = BindingTable::new();
    let a = class_type(&mut table, "A");
    let i = interface_type(&mut table, "I");
    let j = interface_type(&mut table, "J");
    let lookup = |name: &&str| match *name {
        "A" => a,
        "I" => i,
        _ => j,
    };
    let left: Vec<_> = left.iter().map(lookup).collect();
    let right: Vec<_> = right.iter().map(lookup).collect();
    let left = keyed_type(&mut table, RawTypeKind::Intersection, "A&I", "&#left", |raw| raw.bounds = left);
    let right = keyed_type(&mut table, RawTypeKind::Intersection, "A&I", "&#right", |raw| raw.bounds = right);
    let file = with_bindings(table);
    let semantic = &file.semantic;

    assert_eq!(semantic.type_of(left) == semantic.type_of(right), expected);
}

// ============================================================================
// HIERARCHY
// ============================================================================

#[test]
fn test_super_types_are_depth_first_superclass_first() {
    let mut table = BindingTable::new();
    let object = class_type(&mut table, "java.lang.Object");
    let j = interface_type(&mut table, "J");
    let i = interface_type(&mut table, "I");
    extend(&mut table, i, None, &[j]);
    let b = class_type(&mut table, "B");
    extend(&mut table, b, Some(object), &[]);
    let c = class_type(&mut table, "C");
    extend(&mut table, c, Some(b), &[i]);
    let file = with_bindings(table);
    let semantic = &file.semantic;

    let c_type = semantic.type_of(c);
    let direct: Vec<_> = c_type.direct_super_types().iter().map(|t| t.fully_qualified_name()).collect();
    assert_eq!(direct, vec!["B", "I"]);
    let all: Vec<_> = c_type.super_types().iter().map(|t| t.fully_qualified_name()).collect();
    assert_eq!(all, vec!["B", "java.lang.Object", "I", "J"]);

    assert!(c_type.is_subtype_of("J"));
    assert!(c_type.is_subtype_of("C"));
    assert!(c_type.is_subtype_of("java.lang.Object"));
    assert!(!semantic.type_of(b).is_subtype_of("I"));
    assert!(c_type.is_subtype_of_type(semantic.type_of(b)));
    assert!(!semantic.type_of(b).is_subtype_of_type(c_type));
    assert!(semantic.type_of(i).is_interface());
    assert!(c_type.symbol().superclass().is_same(semantic.type_of(b)));
}

#[test]
fn test_cyclic_hierarchy_terminates() {
    let mut table = BindingTable::new();
    let x = class_type(&mut table, "X");
    let y = class_type(&mut table, "Y");
    extend(&mut table, x, Some(y), &[]);
    extend(&mut table, y, Some(x), &[]);
    let file = with_bindings(table);
    let semantic = &file.semantic;

    let supers: Vec<_> = semantic
        .type_of(x)
        .super_types()
        .iter()
        .map(|t| t.fully_qualified_name())
        .collect();
    assert_eq!(supers, vec!["Y"]);
    assert!(!semantic.type_of(x).is_subtype_of("Z"));
}

#[test]
fn test_arrays_implement_cloneable_and_are_covariant() {
    let mut table = BindingTable::new();
    let int = primitive_type(&mut table, "int");
    let object = class_type(&mut table, "java.lang.Object");
    let string = string_type(&mut table);
    extend(&mut table, string, Some(object), &[]);
    let ints = type_binding(&mut table, RawTypeKind::Array, "int[]");
    edit_type(&mut table, ints, |raw| raw.element_type = Some(int));
    let strings = type_binding(&mut table, RawTypeKind::Array, "java.lang.String[]");
    edit_type(&mut table, strings, |raw| raw.element_type = Some(string));
    let objects = type_binding(&mut table, RawTypeKind::Array, "java.lang.Object[]");
    edit_type(&mut table, objects, |raw| raw.element_type = Some(object));
    let file = with_bindings(table);
    let semantic = &file.semantic;

    let int_array = semantic.type_of(ints);
    assert!(int_array.is_array());
    assert!(int_array.is_subtype_of("java.lang.Cloneable"));
    assert!(int_array.is_subtype_of("java.io.Serializable"));
    assert!(!int_array.is_subtype_of("java.lang.Number"));
    assert!(int_array.element_type().is_same(semantic.type_of(int)));
    assert_eq!(int_array.to_string(), "int[]");

    let (strings, objects) = (semantic.type_of(strings), semantic.type_of(objects));
    assert!(strings.is_subtype_of_type(objects));
    assert!(!objects.is_subtype_of_type(strings));
    assert!(!int_array.is_subtype_of_type(objects));
}

// ============================================================================
// UNKNOWN AND PRIMITIVES
// ============================================================================

#[test]
fn test_recovered_binding_is_the_unknown_type() {
    let mut table = BindingTable::new();
    let missing = class_type(&mut table, "Missing");
    edit_type(&mut table, missing, |raw| raw.recovered = true);
    let file = with_bindings(table);
    let semantic = &file.semantic;

    let ty = semantic.type_of(missing);
    assert!(ty.is_unknown());
    assert!(ty.is_same(semantic.unknown_type()));
    assert_eq!(ty.kind(), TypeKind::Unknown);
    assert_eq!(ty, semantic.unknown_type());
    assert!(!ty.is_subtype_of("java.lang.Object"));
    assert!(ty.super_types().is_empty());

    let symbol = semantic.symbol_of(missing);
    assert!(symbol.is_unknown() && symbol.is_type_symbol());
}

#[test]
fn test_boxing_pairs() {
    let mut table = BindingTable::new();
    let int = primitive_type(&mut table, "int");
    let boolean = primitive_type(&mut table, "boolean");
    let integer = class_type(&mut table, "java.lang.Integer");
    let file = with_bindings(table);
    let semantic = &file.semantic;

    let (int, integer) = (semantic.type_of(int), semantic.type_of(integer));
    assert!(int.primitive_wrapper_type().is_same(integer));
    assert!(integer.primitive_type().is_same(int));
    assert!(int.is_numerical() && integer.is_numerical());
    assert!(!semantic.type_of(boolean).is_numerical());
    // Boolean is not in this table.
    assert!(semantic.type_of(boolean).primitive_wrapper_type().is_unknown());
}
