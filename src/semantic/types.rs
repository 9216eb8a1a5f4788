//! Type model.
//!
//! A [`Type`] is a handle into the context's type arena. Parameterized
//! uses of a generic declaration with its own parameters collapse onto the
//! declaration; everything the resolver could not resolve is the single
//! unknown type.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;
use smol_str::SmolStr;

use super::context::{SemanticContext, UNKNOWN_TYPE};
use super::symbols::Symbol;
use crate::frontend::{BindingId, RawTypeBinding, RawTypeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(pub u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Unknown,
    Primitive,
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
    Array,
    TypeVariable,
    Wildcard,
    Intersection,
    Null,
}

impl From<RawTypeKind> for TypeKind {
    fn from(kind: RawTypeKind) -> Self {
        match kind {
            RawTypeKind::Primitive => TypeKind::Primitive,
            RawTypeKind::Class => TypeKind::Class,
            RawTypeKind::Interface => TypeKind::Interface,
            RawTypeKind::Enum => TypeKind::Enum,
            RawTypeKind::Record => TypeKind::Record,
            RawTypeKind::Annotation => TypeKind::Annotation,
            RawTypeKind::Array => TypeKind::Array,
            RawTypeKind::TypeVariable => TypeKind::TypeVariable,
            RawTypeKind::Wildcard => TypeKind::Wildcard,
            RawTypeKind::Intersection => TypeKind::Intersection,
            RawTypeKind::Null => TypeKind::Null,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeData {
    pub(super) binding: Option<BindingId>,
    pub(super) kind: TypeKind,
    pub(super) name: SmolStr,
    pub(super) qualified_name: SmolStr,
}

impl TypeData {
    pub(super) fn unknown() -> Self {
        Self {
            binding: None,
            kind: TypeKind::Unknown,
            name: SmolStr::new_static("!unknown!"),
            qualified_name: SmolStr::new_static("!unknown!"),
        }
    }
}

/// Boxing pairs, primitive first.
const WRAPPERS: &[(&str, &str)] = &[
    ("boolean", "java.lang.Boolean"),
    ("byte", "java.lang.Byte"),
    ("char", "java.lang.Character"),
    ("short", "java.lang.Short"),
    ("int", "java.lang.Integer"),
    ("long", "java.lang.Long"),
    ("float", "java.lang.Float"),
    ("double", "java.lang.Double"),
];

const NUMERIC_PRIMITIVES: &[&str] = &["byte", "char", "short", "int", "long", "float", "double"];

const ARRAY_SUPERTYPES: &[&str] = &[
    "java.lang.Object",
    "java.lang.Cloneable",
    "java.io.Serializable",
];

// ============================================================================
// TYPE VIEW
// ============================================================================

#[derive(Clone, Copy)]
pub struct Type<'a> {
    ctx: &'a SemanticContext,
    id: TypeId,
}

impl<'a> Type<'a> {
    pub(super) fn new(ctx: &'a SemanticContext, id: TypeId) -> Self {
        Self { ctx, id }
    }

    pub fn id(self) -> TypeId {
        self.id
    }

    fn data(self) -> Arc<TypeData> {
        self.ctx.type_data(self.id)
    }

    fn raw(self) -> Option<&'a RawTypeBinding> {
        self.binding().and_then(|b| self.ctx.bindings().type_binding(b))
    }

    fn wrap(self, binding: Option<BindingId>) -> Type<'a> {
        self.ctx.type_of_opt(binding)
    }

    fn wrap_all(self, bindings: &[BindingId]) -> Vec<Type<'a>> {
        bindings.iter().map(|&b| self.ctx.type_of(b)).collect()
    }

    /// The canonical raw binding behind this type.
    pub fn binding(self) -> Option<BindingId> {
        self.data().binding
    }

    /// Same arena slot. Stricter than `==`, which is structural.
    pub fn is_same(self, other: Type<'_>) -> bool {
        std::ptr::eq(self.ctx, other.ctx) && self.id == other.id
    }

    pub fn is_unknown(self) -> bool {
        self.id == UNKNOWN_TYPE
    }

    pub fn kind(self) -> TypeKind {
        self.data().kind
    }

    pub fn name(self) -> SmolStr {
        self.data().name.clone()
    }

    /// Erased fully-qualified name.
    pub fn fully_qualified_name(self) -> SmolStr {
        self.data().qualified_name.clone()
    }

    /// Whether this is exactly the type named `qualified_name`.
    pub fn is(self, qualified_name: &str) -> bool {
        !self.is_unknown() && self.data().qualified_name == qualified_name
    }

    pub fn is_primitive(self) -> bool {
        self.kind() == TypeKind::Primitive && !self.is_void()
    }

    pub fn is_void(self) -> bool {
        self.kind() == TypeKind::Primitive && self.is("void")
    }

    pub fn is_class(self) -> bool {
        matches!(self.kind(), TypeKind::Class | TypeKind::Enum | TypeKind::Record)
    }

    pub fn is_interface(self) -> bool {
        matches!(self.kind(), TypeKind::Interface | TypeKind::Annotation)
    }

    pub fn is_enum(self) -> bool {
        self.kind() == TypeKind::Enum
    }

    pub fn is_record(self) -> bool {
        self.kind() == TypeKind::Record
    }

    pub fn is_annotation(self) -> bool {
        self.kind() == TypeKind::Annotation
    }

    pub fn is_array(self) -> bool {
        self.kind() == TypeKind::Array
    }

    pub fn is_type_variable(self) -> bool {
        self.kind() == TypeKind::TypeVariable
    }

    pub fn is_wildcard(self) -> bool {
        self.kind() == TypeKind::Wildcard
    }

    pub fn is_intersection(self) -> bool {
        self.kind() == TypeKind::Intersection
    }

    pub fn is_null_type(self) -> bool {
        self.kind() == TypeKind::Null
    }

    // =========================================================================
    // GENERICS
    // =========================================================================

    pub fn is_parameterized(self) -> bool {
        self.raw().is_some_and(RawTypeBinding::is_parameterized)
    }

    /// A generic type used without arguments.
    pub fn is_raw_type(self) -> bool {
        self.raw().is_some_and(|t| t.raw)
    }

    pub fn type_arguments(self) -> Vec<Type<'a>> {
        self.raw()
            .map(|t| self.wrap_all(&t.type_arguments))
            .unwrap_or_default()
    }

    /// Declared type parameters of this type's generic declaration.
    pub fn type_parameters(self) -> Vec<Type<'a>> {
        self.declaration_binding()
            .and_then(|d| self.ctx.bindings().type_binding(d))
            .map(|t| self.wrap_all(&t.type_parameters))
            .unwrap_or_default()
    }

    pub fn erasure(self) -> Type<'a> {
        match self.raw() {
            Some(raw) => match raw.erasure {
                Some(erasure) => self.wrap(Some(erasure)),
                None if raw.is_parameterized() || raw.raw => self.declaration(),
                None => self,
            },
            None => self,
        }
    }

    fn declaration_binding(self) -> Option<BindingId> {
        self.binding().map(|b| self.ctx.bindings().declaration_of(b))
    }

    /// The generic declaration of a parameterized or raw type; the type
    /// itself otherwise.
    pub fn declaration(self) -> Type<'a> {
        match self.declaration_binding() {
            Some(declaration) => self.ctx.type_of(declaration),
            None => self,
        }
    }

    pub fn element_type(self) -> Type<'a> {
        self.wrap(self.raw().and_then(|t| t.element_type))
    }

    /// Innermost element type of a possibly nested array.
    pub fn base_element_type(self) -> Type<'a> {
        let mut ty = self;
        while ty.is_array() {
            ty = ty.element_type();
        }
        ty
    }

    pub fn wildcard_bound(self) -> Type<'a> {
        self.wrap(self.raw().and_then(|t| t.wildcard_bound))
    }

    /// `? extends B`; false for `? super B`.
    pub fn is_upper_bound(self) -> bool {
        self.raw().is_some_and(|t| t.upper_bound)
    }

    /// Bounds of a type variable or members of an intersection.
    pub fn bounds(self) -> Vec<Type<'a>> {
        self.raw().map(|t| self.wrap_all(&t.bounds)).unwrap_or_default()
    }

    // =========================================================================
    // HIERARCHY
    // =========================================================================

    /// The type symbol of this type's declaration.
    pub fn symbol(self) -> Symbol<'a> {
        self.ctx.type_symbol(self)
    }

    pub fn super_class(self) -> Type<'a> {
        self.wrap(self.raw().and_then(|t| t.superclass))
    }

    pub fn interfaces(self) -> Vec<Type<'a>> {
        self.raw().map(|t| self.wrap_all(&t.interfaces)).unwrap_or_default()
    }

    /// Direct super types: superclass first, then interfaces.
    pub fn direct_super_types(self) -> Vec<Type<'a>> {
        let mut supers = Vec::new();
        let superclass = self.super_class();
        if !superclass.is_unknown() {
            supers.push(superclass);
        }
        supers.extend(self.interfaces().into_iter().filter(|t| !t.is_unknown()));
        supers
    }

    /// Transitive super types in depth-first order, without this type.
    pub fn super_types(self) -> Vec<Type<'a>> {
        let ids = match self.ctx.cached_super_types(self.id) {
            Some(ids) => ids,
            None => {
                let mut seen = IndexSet::new();
                collect_super_types(self, &mut seen);
                seen.shift_remove(&self.id);
                let ids: Arc<[TypeId]> = seen.into_iter().collect();
                self.ctx.store_super_types(self.id, Arc::clone(&ids));
                ids
            }
        };
        ids.iter().map(|&id| Type::new(self.ctx, id)).collect()
    }

    /// Whether this type is, or inherits from, the type named
    /// `qualified_name`.
    pub fn is_subtype_of(self, qualified_name: &str) -> bool {
        if self.is_unknown() {
            return false;
        }
        if self.is(qualified_name) {
            return true;
        }
        if self.is_primitive() || self.is_void() {
            return false;
        }
        if qualified_name == "java.lang.Object" {
            return true;
        }
        if self.is_array() {
            return ARRAY_SUPERTYPES.contains(&qualified_name);
        }
        if self.is_type_variable() || self.is_intersection() {
            return self.bounds().into_iter().any(|b| b.is_subtype_of(qualified_name));
        }
        self.super_types().into_iter().any(|t| t.is(qualified_name))
    }

    /// Subtyping against another type, comparing erasures. Arrays are
    /// covariant in their element type.
    pub fn is_subtype_of_type(self, other: Type<'_>) -> bool {
        if self.is_unknown() || other.is_unknown() {
            return false;
        }
        if self.is_array() && other.is_array() {
            let (element, other_element) = (self.element_type(), other.element_type());
            if element.is_primitive() || other_element.is_primitive() {
                return element == other_element;
            }
            return element.is_subtype_of_type(other_element);
        }
        let target = other.erasure();
        self.is_subtype_of(&target.fully_qualified_name())
    }

    // =========================================================================
    // PRIMITIVES
    // =========================================================================

    /// A numeric primitive or its wrapper.
    pub fn is_numerical(self) -> bool {
        let name = self.fully_qualified_name();
        if self.is_primitive() {
            return NUMERIC_PRIMITIVES.contains(&name.as_str());
        }
        WRAPPERS
            .iter()
            .any(|&(primitive, wrapper)| wrapper == name && NUMERIC_PRIMITIVES.contains(&primitive))
    }

    /// The boxed type of a primitive, or unknown.
    pub fn primitive_wrapper_type(self) -> Type<'a> {
        if !self.is_primitive() {
            return self.ctx.unknown_type();
        }
        let name = self.fully_qualified_name();
        WRAPPERS
            .iter()
            .find(|&&(primitive, _)| primitive == name)
            .and_then(|&(_, wrapper)| self.ctx.bindings().type_named(wrapper))
            .map_or_else(|| self.ctx.unknown_type(), |b| self.ctx.type_of(b))
    }

    /// The unboxed type of a wrapper, or unknown.
    pub fn primitive_type(self) -> Type<'a> {
        if self.is_primitive() {
            return self;
        }
        let name = self.fully_qualified_name();
        WRAPPERS
            .iter()
            .find(|&&(_, wrapper)| wrapper == name)
            .and_then(|&(primitive, _)| self.ctx.bindings().type_named(primitive))
            .map_or_else(|| self.ctx.unknown_type(), |b| self.ctx.type_of(b))
    }
}

fn collect_super_types(ty: Type<'_>, seen: &mut IndexSet<TypeId>) {
    if !seen.insert(ty.id) {
        return;
    }
    for parent in ty.direct_super_types() {
        collect_super_types(parent, seen);
    }
}

/// Structural equality: two types are equal when they come from the same
/// declaration with pairwise equal arguments. The unknown type equals only
/// itself.
impl PartialEq for Type<'_> {
    fn eq(&self, other: &Self) -> bool {
        if self.is_same(*other) {
            return true;
        }
        if self.is_unknown() || other.is_unknown() || self.kind() != other.kind() {
            return false;
        }
        match self.kind() {
            TypeKind::Array => self.element_type() == other.element_type(),
            TypeKind::Wildcard => {
                self.is_upper_bound() == other.is_upper_bound()
                    && self.wildcard_bound() == other.wildcard_bound()
            }
            TypeKind::Intersection => self.bounds() == other.bounds(),
            _ => {
                self.declaration_binding() == other.declaration_binding()
                    && self.is_parameterized() == other.is_parameterized()
                    && self.is_raw_type() == other.is_raw_type()
                    && self.type_arguments() == other.type_arguments()
            }
        }
    }
}

impl fmt::Debug for Type<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Type").field(&self.id).field(&self.to_string()).finish()
    }
}

/// Qualified name with type arguments, `? extends B` for wildcards.
impl fmt::Display for Type<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            TypeKind::Array => write!(f, "{}[]", self.element_type()),
            TypeKind::Wildcard => {
                let bound = self.wildcard_bound();
                if bound.is_unknown() {
                    f.write_str("?")
                } else if self.is_upper_bound() {
                    write!(f, "? extends {bound}")
                } else {
                    write!(f, "? super {bound}")
                }
            }
            _ => {
                f.write_str(&self.fully_qualified_name())?;
                let arguments = self.type_arguments();
                if !arguments.is_empty() {
                    f.write_str("<")?;
                    for (i, argument) in arguments.iter().enumerate() {
                        if i > 0 {
                            f.write_str(",")?;
                        }
                        write!(f, "{argument}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
        }
    }
}
