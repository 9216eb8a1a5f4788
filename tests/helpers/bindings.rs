//! Binding tables wired the way the resolver reports them: members are
//! listed on their declaring type, keys follow the resolver's scheme.

use javelin::Constant;
use javelin::Modifiers;
use javelin::frontend::{
    BindingId, BindingTable, RawAnnotationBinding, RawAnnotationValue, RawBinding,
    RawMethodBinding, RawTypeBinding, RawTypeKind, RawVariableBinding,
};
use smol_str::SmolStr;

fn qualified_name(table: &BindingTable, ty: BindingId) -> SmolStr {
    table
        .type_binding(ty)
        .map(|t| t.qualified_name.clone())
        .unwrap_or_default()
}

fn method_key(table: &BindingTable, method: BindingId) -> SmolStr {
    table
        .method_binding(method)
        .map(|m| m.key.clone())
        .unwrap_or_default()
}

// ============================================================================
// TYPES
// ============================================================================

pub fn type_binding(table: &mut BindingTable, kind: RawTypeKind, qualified_name: &str) -> BindingId {
    table.add_type(RawTypeBinding::new(kind, qualified_name))
}

pub fn primitive_type(table: &mut BindingTable, name: &str) -> BindingId {
    type_binding(table, RawTypeKind::Primitive, name)
}

pub fn class_type(table: &mut BindingTable, qualified_name: &str) -> BindingId {
    type_binding(table, RawTypeKind::Class, qualified_name)
}

pub fn interface_type(table: &mut BindingTable, qualified_name: &str) -> BindingId {
    type_binding(table, RawTypeKind::Interface, qualified_name)
}

pub fn annotation_type(table: &mut BindingTable, qualified_name: &str) -> BindingId {
    type_binding(table, RawTypeKind::Annotation, qualified_name)
}

pub fn string_type(table: &mut BindingTable) -> BindingId {
    class_type(table, "java.lang.String")
}

/// A type binding reported under its own `key`, so that it lands in a
/// slot of its own even when it denotes an existing type.
pub fn keyed_type(
    table: &mut BindingTable,
    kind: RawTypeKind,
    qualified_name: &str,
    key: &str,
    edit: impl FnOnce(&mut RawTypeBinding),
) -> BindingId {
    let mut raw = RawTypeBinding::new(kind, qualified_name);
    raw.key = SmolStr::new(key);
    edit(&mut raw);
    table.add_type(raw)
}

/// Run `edit` on a type binding already in the table.
pub fn edit_type(table: &mut BindingTable, ty: BindingId, edit: impl FnOnce(&mut RawTypeBinding)) {
    if let Some(RawBinding::Type(raw)) = table.get_mut(ty) {
        edit(raw);
    }
}

/// `class sub extends superclass implements interfaces`.
pub fn extend(table: &mut BindingTable, sub: BindingId, superclass: Option<BindingId>, interfaces: &[BindingId]) {
    edit_type(table, sub, |raw| {
        raw.superclass = superclass;
        raw.interfaces = interfaces.to_vec();
    });
}

/// A parameterization of `generic` with `arguments`.
pub fn parameterize(table: &mut BindingTable, generic: BindingId, arguments: &[BindingId]) -> BindingId {
    let base = table
        .type_binding(generic)
        .cloned()
        .expect("generic declaration is a type binding");
    let names: Vec<SmolStr> = arguments.iter().map(|&a| qualified_name(table, a)).collect();
    let mut raw = RawTypeBinding::new(base.kind, &base.qualified_name);
    raw.key = SmolStr::new(format!("{}<{}>", base.qualified_name, names.join(",")));
    raw.type_arguments = arguments.to_vec();
    raw.type_declaration = Some(generic);
    raw.superclass = base.superclass;
    raw.interfaces = base.interfaces.clone();
    table.add_type(raw)
}

// ============================================================================
// MEMBERS
// ============================================================================

/// A field of `owner`, listed among its declared fields.
pub fn field_binding(
    table: &mut BindingTable,
    owner: BindingId,
    name: &str,
    ty: BindingId,
    modifiers: Modifiers,
) -> BindingId {
    let key = format!("{}.{name}", qualified_name(table, owner));
    let mut field = RawVariableBinding::new(&key, name);
    field.field = true;
    field.modifiers = modifiers;
    field.ty = Some(ty);
    field.declaring_class = Some(owner);
    let id = table.add_variable(field);
    edit_type(table, owner, |raw| raw.declared_fields.push(id));
    id
}

/// A method of `owner`, keyed by its erased signature.
pub fn method_binding(
    table: &mut BindingTable,
    owner: BindingId,
    name: &str,
    parameters: &[BindingId],
    return_type: Option<BindingId>,
) -> BindingId {
    let erased: Vec<SmolStr> = parameters.iter().map(|&p| table.erasure_name(p)).collect();
    let key = format!("{}.{name}({})", qualified_name(table, owner), erased.join(","));
    let mut method = RawMethodBinding::new(&key, name);
    method.declaring_class = Some(owner);
    method.parameter_types = parameters.to_vec();
    method.return_type = return_type;
    let id = table.add_method(method);
    edit_type(table, owner, |raw| raw.declared_methods.push(id));
    id
}

pub fn edit_method(table: &mut BindingTable, method: BindingId, edit: impl FnOnce(&mut RawMethodBinding)) {
    if let Some(RawBinding::Method(raw)) = table.get_mut(method) {
        edit(raw);
    }
}

/// Parameter `slot` of `method`.
pub fn parameter_binding(table: &mut BindingTable, method: BindingId, name: &str, ty: BindingId, slot: u32) -> BindingId {
    let key = format!("{}#{name}", method_key(table, method));
    let mut parameter = RawVariableBinding::new(&key, name);
    parameter.parameter = true;
    parameter.ty = Some(ty);
    parameter.declaring_method = Some(method);
    parameter.variable_id = slot;
    table.add_variable(parameter)
}

/// A local variable with no declaring method reported, as for locals of
/// initializer blocks.
pub fn local_binding(table: &mut BindingTable, key: &str, name: &str, ty: BindingId) -> BindingId {
    let mut local = RawVariableBinding::new(key, name);
    local.ty = Some(ty);
    table.add_variable(local)
}

pub fn edit_variable(table: &mut BindingTable, variable: BindingId, edit: impl FnOnce(&mut RawVariableBinding)) {
    if let Some(RawBinding::Variable(raw)) = table.get_mut(variable) {
        edit(raw);
    }
}

// ============================================================================
// ANNOTATIONS
// ============================================================================

/// One annotation instance of `annotation_type` with element values.
pub fn annotation(
    table: &mut BindingTable,
    annotation_type: BindingId,
    pairs: Vec<(&str, RawAnnotationValue)>,
) -> BindingId {
    table.add_annotation(RawAnnotationBinding {
        annotation_type,
        pairs: pairs
            .into_iter()
            .map(|(name, value)| (SmolStr::new(name), value))
            .collect(),
    })
}

/// A marker annotation of a type that is added on the fly.
pub fn marker_annotation(table: &mut BindingTable, qualified_name: &str) -> (BindingId, BindingId) {
    let ty = annotation_type(table, qualified_name);
    (ty, annotation(table, ty, Vec::new()))
}

/// An enum constant of `owner`, for annotation element values.
pub fn enum_constant(table: &mut BindingTable, owner: BindingId, name: &str) -> BindingId {
    let key = format!("{}.{name}", qualified_name(table, owner));
    let mut constant = RawVariableBinding::new(&key, name);
    constant.field = true;
    constant.enum_constant = true;
    constant.modifiers = Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL;
    constant.ty = Some(owner);
    constant.declaring_class = Some(owner);
    table.add_variable(constant)
}

pub fn bool_value(value: bool) -> RawAnnotationValue {
    RawAnnotationValue::Constant(Constant::Bool(value))
}
