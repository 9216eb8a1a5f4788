//! Nullability: direct annotations, meta-annotations and defaults.

use javelin::config::{NullabilityTarget, NullabilityType};
use javelin::frontend::{
    BindingId, BindingTable, RawAnnotationValue, RawModifier, RawPackageBinding, RawTypeKind,
};
use javelin::semantic::NullabilityLevel;
use javelin::{AnalysisConfig, JavaFile, Modifiers, NullabilityConfig, TreeKind};
use rstest::rstest;
use smol_str::SmolStr;

use crate::helpers::bindings::*;
use crate::helpers::raw::*;
use crate::helpers::tree::*;

fn analyze_bindings(table: BindingTable, config: &AnalysisConfig) -> JavaFile {
    let source = "class A { }";
    let src = Source(source);
    let declaration = class(src.all(), simple(src.find("A"), "A", None), None, Vec::new());
    analyze_with(source, unit(src, vec![declaration]), table, config)
}

/// `class A { String f; void m(String p) }`, bindings only.
struct Members {
    a: BindingId,
    f: BindingId,
    m: BindingId,
    p: BindingId,
}

fn members(table: &mut BindingTable) -> Members {
    let string = string_type(table);
    let void = primitive_type(table, "void");
    let a = class_type(table, "A");
    let f = field_binding(table, a, "f", string, Modifiers::empty());
    let m = method_binding(table, a, "m", &[string], Some(void));
    let p = parameter_binding(table, m, "p", string, 0);
    Members { a, f, m, p }
}

fn annotate_type(table: &mut BindingTable, ty: BindingId, annotation: BindingId) {
    edit_type(table, ty, |raw| raw.annotations.push(annotation));
}

// ============================================================================
// DIRECT ANNOTATIONS
// ============================================================================

#[rstest]
#[case("javax.annotation.Nullable", NullabilityType::WeakNullable)]
#[case("org.jetbrains.annotations.Nullable", NullabilityType::WeakNullable)]
#[case("javax.annotation.CheckForNull", NullabilityType::StrongNullable)]
#[case("org.springframework.lang.Nullable", NullabilityType::StrongNullable)]
#[case("org.jetbrains.annotations.NotNull", NullabilityType::NonNull)]
#[case("lombok.NonNull", NullabilityType::NonNull)]
fn test_direct_annotation_on_field(#[case] annotation_name: &str, #[case] expected: NullabilityType) {
    let source = format!("class A {{ @{annotation_name} String a; }}");
    let src = Source(&source);
    let mut table = BindingTable::new();
    let string = string_type(&mut table);
    let a_class = class_type(&mut table, "A");
    let (annotation_ty, instance) = marker_annotation(&mut table, annotation_name);
    let a = field_binding(&mut table, a_class, "a", string, Modifiers::empty());
    edit_variable(&mut table, a, |raw| raw.annotations.push(instance));

    let at = src.find(&format!("@{annotation_name}"));
    let declaration = class(
        src.all(),
        simple(src.find("A"), "A", Some(a_class)),
        Some(a_class),
        vec![field(
            src.span(at, src.find(";")),
            vec![RawModifier::Annotation(marker(at, annotation_name, Some(annotation_ty), Some(instance)))],
            named(src.find("String"), "String", Some(string)),
            vec![fragment(
                src.within(src.find(" a;"), "a"),
                simple(src.within(src.find(" a;"), "a"), "a", Some(a)),
                None,
                Some(a),
            )],
        )],
    );
    let file = analyze_unit(&source, unit(src, vec![declaration]), table);

    let annotation_node = first_of(file.root(), TreeKind::ANNOTATION);
    assert_eq!(annotation_node.text(), format!("@{annotation_name}"));
    assert!(annotation_node.parent().is_some_and(|p| p.is(TreeKind::MODIFIERS)));

    let data = file.semantic.symbol_of(a).nullability();
    assert_eq!(data.ty(), expected);
    assert_eq!(data.level(), Some(NullabilityLevel::Variable));
    assert_eq!(data.annotation(), Some(annotation_name));
    assert!(!data.is_meta_annotation());
}

#[rstest]
#[case("ALWAYS", NullabilityType::NonNull)]
#[case("MAYBE", NullabilityType::WeakNullable)]
#[case("UNKNOWN", NullabilityType::WeakNullable)]
#[case("NEVER", NullabilityType::StrongNullable)]
fn test_jsr305_when_argument(#[case] when: &str, #[case] expected: NullabilityType) {
    let mut table = BindingTable::new();
    let Members { f, .. } = members(&mut table);
    let when_type = type_binding(&mut table, RawTypeKind::Enum, "javax.annotation.meta.When");
    let constant = enum_constant(&mut table, when_type, when);
    let nonnull = annotation_type(&mut table, "javax.annotation.Nonnull");
    let instance = annotation(&mut table, nonnull, vec![("when", RawAnnotationValue::EnumConstant(constant))]);
    edit_variable(&mut table, f, |raw| raw.annotations.push(instance));
    let file = analyze_bindings(table, &AnalysisConfig::default());

    assert_eq!(file.semantic.symbol_of(f).nullability().ty(), expected);
}

#[test]
fn test_meta_annotation_is_followed() {
    let mut table = BindingTable::new();
    let Members { f, .. } = members(&mut table);
    let (_, check_for_null) = marker_annotation(&mut table, "javax.annotation.CheckForNull");
    let (nickname, instance) = marker_annotation(&mut table, "com.acme.MaybeNull");
    annotate_type(&mut table, nickname, check_for_null);
    edit_variable(&mut table, f, |raw| raw.annotations.push(instance));
    let file = analyze_bindings(table, &AnalysisConfig::default());

    let data = file.semantic.symbol_of(f).nullability();
    assert_eq!(data.ty(), NullabilityType::StrongNullable);
    assert!(data.is_meta_annotation());
    assert_eq!(data.annotation(), Some("javax.annotation.CheckForNull"));
    assert_eq!(data.level(), Some(NullabilityLevel::Variable));
}

#[test]
fn test_self_annotated_annotation_type_terminates() {
    let mut table = BindingTable::new();
    let Members { f, .. } = members(&mut table);
    let (looping, instance) = marker_annotation(&mut table, "com.acme.Loop");
    annotate_type(&mut table, looping, instance);
    edit_variable(&mut table, f, |raw| raw.annotations.push(instance));
    let file = analyze_bindings(table, &AnalysisConfig::default());

    assert!(!file.semantic.symbol_of(f).nullability().is_present());
}

#[test]
fn test_unrecognized_annotation_with_empty_config() {
    let mut table = BindingTable::new();
    let Members { f, .. } = members(&mut table);
    let (_, instance) = marker_annotation(&mut table, "javax.annotation.Nullable");
    edit_variable(&mut table, f, |raw| raw.annotations.push(instance));
    let config = AnalysisConfig::default().with_nullability(NullabilityConfig::empty());
    let file = analyze_bindings(table, &config);

    let symbol = file.semantic.symbol_of(f);
    assert!(symbol.metadata().is_annotated_with("javax.annotation.Nullable"));
    assert_eq!(symbol.nullability().ty(), NullabilityType::NoAnnotation);
}

// ============================================================================
// DEFAULTS
// ============================================================================

#[test]
fn test_non_null_api_covers_parameters_and_returns() {
    let mut table = BindingTable::new();
    let Members { a, f, m, p } = members(&mut table);
    let (_, api) = marker_annotation(&mut table, "org.springframework.lang.NonNullApi");
    annotate_type(&mut table, a, api);
    let file = analyze_bindings(table, &AnalysisConfig::default());
    let semantic = &file.semantic;

    let parameter = semantic.symbol_of(p).nullability();
    assert!(parameter.is_nonnull());
    assert_eq!(parameter.level(), Some(NullabilityLevel::Class));
    assert_eq!(parameter.annotation(), Some("org.springframework.lang.NonNullApi"));

    let method = semantic.symbol_of(m).nullability();
    assert!(method.is_nonnull());
    assert_eq!(method.level(), Some(NullabilityLevel::Class));

    assert!(!semantic.symbol_of(f).nullability().is_present());
    // Field-shaped lookups on the parameter fall outside the default.
    assert!(!semantic.symbol_of(p).nullability_at(NullabilityTarget::Field).is_present());
    let capped = semantic
        .symbol_of(p)
        .nullability_at_level(NullabilityTarget::Parameter, NullabilityLevel::Method);
    assert!(!capped.is_present());
}

#[test]
fn test_direct_annotation_beats_default() {
    let mut table = BindingTable::new();
    let Members { a, p, .. } = members(&mut table);
    let (_, api) = marker_annotation(&mut table, "org.springframework.lang.NonNullApi");
    annotate_type(&mut table, a, api);
    let (_, nullable) = marker_annotation(&mut table, "javax.annotation.Nullable");
    edit_variable(&mut table, p, |raw| raw.annotations.push(nullable));
    let file = analyze_bindings(table, &AnalysisConfig::default());

    let data = file.semantic.symbol_of(p).nullability();
    assert_eq!(data.ty(), NullabilityType::WeakNullable);
    assert_eq!(data.level(), Some(NullabilityLevel::Variable));
}

#[test]
fn test_eclipse_default_cancelled_on_method() {
    let mut table = BindingTable::new();
    let Members { a, f, m, p } = members(&mut table);
    let by_default = annotation_type(&mut table, "org.eclipse.jdt.annotation.NonNullByDefault");
    let on_class = annotation(&mut table, by_default, Vec::new());
    let off = annotation(&mut table, by_default, vec![("value", bool_value(false))]);
    annotate_type(&mut table, a, on_class);
    edit_method(&mut table, m, |raw| raw.annotations.push(off));
    let file = analyze_bindings(table, &AnalysisConfig::default());
    let semantic = &file.semantic;

    let field = semantic.symbol_of(f).nullability();
    assert!(field.is_nonnull());
    assert_eq!(field.level(), Some(NullabilityLevel::Class));

    assert!(!semantic.symbol_of(p).nullability().is_present());
    assert!(!semantic.symbol_of(m).nullability().is_present());
}

#[test]
fn test_eclipse_default_locations_narrow_targets() {
    let mut table = BindingTable::new();
    let Members { a, f, p, .. } = members(&mut table);
    let location = type_binding(&mut table, RawTypeKind::Enum, "org.eclipse.jdt.annotation.DefaultLocation");
    let parameter = enum_constant(&mut table, location, "PARAMETER");
    let by_default = annotation_type(&mut table, "org.eclipse.jdt.annotation.NonNullByDefault");
    let instance = annotation(
        &mut table,
        by_default,
        vec![(
            "value",
            RawAnnotationValue::Array(vec![RawAnnotationValue::EnumConstant(parameter)]),
        )],
    );
    annotate_type(&mut table, a, instance);
    let file = analyze_bindings(table, &AnalysisConfig::default());

    assert!(file.semantic.symbol_of(p).nullability().is_nonnull());
    assert!(!file.semantic.symbol_of(f).nullability().is_present());
}

#[test]
fn test_package_default_reaches_fields() {
    let mut table = BindingTable::new();
    let Members { a, f, .. } = members(&mut table);
    let (_, marked) = marker_annotation(&mut table, "org.jspecify.annotations.NullMarked");
    let package = table.add_package(RawPackageBinding {
        name: SmolStr::new("com.acme"),
        annotations: vec![marked],
    });
    edit_type(&mut table, a, |raw| raw.package = Some(package));
    let file = analyze_bindings(table, &AnalysisConfig::default());
    let field = file.semantic.symbol_of(f);

    let data = field.nullability();
    assert!(data.is_nonnull());
    assert_eq!(data.level(), Some(NullabilityLevel::Package));
    assert!(field.owner().owner().is_package());
    assert!(
        !field
            .nullability_at_level(NullabilityTarget::Field, NullabilityLevel::Class)
            .is_present()
    );
}

#[test]
fn test_type_qualifier_default_nickname() {
    let mut table = BindingTable::new();
    let Members { a, p, f, .. } = members(&mut table);
    let element_type = type_binding(&mut table, RawTypeKind::Enum, "java.lang.annotation.ElementType");
    let parameter = enum_constant(&mut table, element_type, "PARAMETER");
    let (qualifier_default, _) = marker_annotation(&mut table, "javax.annotation.meta.TypeQualifierDefault");
    let scope = annotation(
        &mut table,
        qualifier_default,
        vec![("value", RawAnnotationValue::EnumConstant(parameter))],
    );
    let (_, nonnull) = marker_annotation(&mut table, "javax.annotation.Nonnull");
    let (custom, instance) = marker_annotation(&mut table, "com.acme.ParamsNonNull");
    annotate_type(&mut table, custom, scope);
    annotate_type(&mut table, custom, nonnull);
    annotate_type(&mut table, a, instance);
    let file = analyze_bindings(table, &AnalysisConfig::default());

    let data = file.semantic.symbol_of(p).nullability();
    assert!(data.is_nonnull());
    assert!(data.is_meta_annotation());
    assert_eq!(data.annotation(), Some("com.acme.ParamsNonNull"));
    assert!(!file.semantic.symbol_of(f).nullability().is_present());
}
