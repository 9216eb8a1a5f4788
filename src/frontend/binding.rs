//! Raw bindings as reported by the external resolver.
//!
//! The resolver pools its bindings: the same entity may be reported through
//! several binding objects that share one opaque key. [`BindingTable`]
//! records every object it is given and exposes the canonical one per key,
//! along with the normalization of parameterized uses to their generic
//! declarations.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::{Constant, Modifiers};

/// Opaque handle to a raw binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BindingId(pub u32);

impl BindingId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ============================================================================
// BINDING VARIANTS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum RawBinding {
    Package(RawPackageBinding),
    Type(RawTypeBinding),
    Method(RawMethodBinding),
    Variable(RawVariableBinding),
    Annotation(RawAnnotationBinding),
}

impl RawBinding {
    /// The resolver's identity key. Annotation instances have none.
    pub fn key(&self) -> Option<&str> {
        match self {
            RawBinding::Package(b) => Some(&b.name),
            RawBinding::Type(b) => Some(&b.key),
            RawBinding::Method(b) => Some(&b.key),
            RawBinding::Variable(b) => Some(&b.key),
            RawBinding::Annotation(_) => None,
        }
    }

    pub fn is_recovered(&self) -> bool {
        match self {
            RawBinding::Type(b) => b.recovered,
            RawBinding::Method(b) => b.recovered,
            RawBinding::Variable(b) => b.recovered,
            RawBinding::Package(_) | RawBinding::Annotation(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawPackageBinding {
    /// Dotted name; empty for the unnamed package.
    pub name: SmolStr,
    /// Annotations from `package-info.java`.
    pub annotations: Vec<BindingId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RawTypeKind {
    Primitive,
    #[default]
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
    Array,
    TypeVariable,
    Wildcard,
    Intersection,
    /// Type of the `null` literal.
    Null,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTypeBinding {
    pub key: SmolStr,
    /// Simple name without type arguments.
    pub name: SmolStr,
    /// Erased fully-qualified name; `int`, `int[]`, `T` or `?` for
    /// primitives, arrays, type variables and wildcards.
    pub qualified_name: SmolStr,
    pub kind: RawTypeKind,
    pub modifiers: Modifiers,
    pub recovered: bool,
    pub anonymous: bool,
    pub local: bool,
    pub package: Option<BindingId>,
    pub declaring_class: Option<BindingId>,
    pub declaring_method: Option<BindingId>,
    pub superclass: Option<BindingId>,
    pub interfaces: Vec<BindingId>,
    /// Generic declaration of a parameterized or raw type.
    pub type_declaration: Option<BindingId>,
    pub erasure: Option<BindingId>,
    /// Declared type parameters of a generic type.
    pub type_parameters: Vec<BindingId>,
    /// Actual type arguments of a parameterized type.
    pub type_arguments: Vec<BindingId>,
    pub raw: bool,
    /// Bounds of a type variable, members of an intersection.
    pub bounds: Vec<BindingId>,
    /// Component type of an array.
    pub element_type: Option<BindingId>,
    pub wildcard_bound: Option<BindingId>,
    /// `? extends B` when true, `? super B` otherwise.
    pub upper_bound: bool,
    pub declared_methods: Vec<BindingId>,
    pub declared_fields: Vec<BindingId>,
    pub declared_types: Vec<BindingId>,
    pub annotations: Vec<BindingId>,
}

impl RawTypeBinding {
    /// A binding whose key, name and qualified name derive from `qualified_name`.
    pub fn new(kind: RawTypeKind, qualified_name: &str) -> Self {
        let name = qualified_name
            .rsplit(['.', '$'])
            .next()
            .unwrap_or(qualified_name);
        Self {
            key: SmolStr::new(qualified_name),
            name: SmolStr::new(name),
            qualified_name: SmolStr::new(qualified_name),
            kind,
            ..Self::default()
        }
    }

    pub fn is_parameterized(&self) -> bool {
        !self.type_arguments.is_empty()
    }

    pub fn is_generic(&self) -> bool {
        !self.type_parameters.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawMethodBinding {
    pub key: SmolStr,
    pub name: SmolStr,
    pub modifiers: Modifiers,
    pub constructor: bool,
    /// Synthetic method of a lambda expression.
    pub lambda: bool,
    pub recovered: bool,
    pub declaring_class: Option<BindingId>,
    pub return_type: Option<BindingId>,
    pub parameter_types: Vec<BindingId>,
    pub type_parameters: Vec<BindingId>,
    pub type_arguments: Vec<BindingId>,
    pub exception_types: Vec<BindingId>,
    pub varargs: bool,
    /// Generic declaration of a parameterized method.
    pub method_declaration: Option<BindingId>,
    pub annotations: Vec<BindingId>,
    pub parameter_annotations: Vec<Vec<BindingId>>,
}

impl RawMethodBinding {
    pub fn new(key: &str, name: &str) -> Self {
        Self {
            key: SmolStr::new(key),
            name: SmolStr::new(name),
            ..Self::default()
        }
    }

    /// Whether `arguments` actual arguments fit this signature.
    pub fn accepts_arity(&self, arguments: usize) -> bool {
        let parameters = self.parameter_types.len();
        if self.varargs {
            arguments + 1 >= parameters
        } else {
            arguments == parameters
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawVariableBinding {
    pub key: SmolStr,
    pub name: SmolStr,
    pub modifiers: Modifiers,
    pub field: bool,
    pub parameter: bool,
    pub enum_constant: bool,
    pub record_component: bool,
    pub effectively_final: bool,
    pub recovered: bool,
    pub ty: Option<BindingId>,
    pub declaring_class: Option<BindingId>,
    pub declaring_method: Option<BindingId>,
    /// Slot of the variable within its declaring scope.
    pub variable_id: u32,
    pub constant_value: Option<Constant>,
    /// Generic declaration of a field of a parameterized type.
    pub variable_declaration: Option<BindingId>,
    pub annotations: Vec<BindingId>,
}

impl RawVariableBinding {
    pub fn new(key: &str, name: &str) -> Self {
        Self {
            key: SmolStr::new(key),
            name: SmolStr::new(name),
            ..Self::default()
        }
    }
}

/// One annotation instance on a declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAnnotationBinding {
    pub annotation_type: BindingId,
    pub pairs: Vec<(SmolStr, RawAnnotationValue)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawAnnotationValue {
    Constant(Constant),
    Type(BindingId),
    /// A variable binding of an enum constant.
    EnumConstant(BindingId),
    Annotation(BindingId),
    Array(Vec<RawAnnotationValue>),
}

// ============================================================================
// BINDING TABLE
// ============================================================================

/// All bindings the resolver reported for one file.
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    bindings: Vec<RawBinding>,
    by_key: FxHashMap<SmolStr, BindingId>,
    by_qualified_name: FxHashMap<SmolStr, BindingId>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn add(&mut self, binding: RawBinding) -> BindingId {
        let id = BindingId(self.bindings.len() as u32);
        if let Some(key) = binding.key() {
            self.by_key.entry(SmolStr::new(key)).or_insert(id);
        }
        if let RawBinding::Type(ty) = &binding {
            let generic_form = !ty.is_parameterized() && !ty.raw && !ty.recovered;
            if generic_form && !matches!(ty.kind, RawTypeKind::TypeVariable | RawTypeKind::Wildcard) {
                self.by_qualified_name
                    .entry(ty.qualified_name.clone())
                    .or_insert(id);
            }
        }
        self.bindings.push(binding);
        id
    }

    pub fn add_type(&mut self, binding: RawTypeBinding) -> BindingId {
        self.add(RawBinding::Type(binding))
    }

    pub fn add_method(&mut self, binding: RawMethodBinding) -> BindingId {
        self.add(RawBinding::Method(binding))
    }

    pub fn add_variable(&mut self, binding: RawVariableBinding) -> BindingId {
        self.add(RawBinding::Variable(binding))
    }

    pub fn add_package(&mut self, binding: RawPackageBinding) -> BindingId {
        self.add(RawBinding::Package(binding))
    }

    pub fn add_annotation(&mut self, binding: RawAnnotationBinding) -> BindingId {
        self.add(RawBinding::Annotation(binding))
    }

    /// Mutable access while a frontend is still wiring bindings together.
    pub fn get_mut(&mut self, id: BindingId) -> Option<&mut RawBinding> {
        self.bindings.get_mut(id.index())
    }

    pub fn get(&self, id: BindingId) -> Option<&RawBinding> {
        self.bindings.get(id.index())
    }

    pub fn type_binding(&self, id: BindingId) -> Option<&RawTypeBinding> {
        match self.get(id)? {
            RawBinding::Type(b) => Some(b),
            _ => None,
        }
    }

    pub fn method_binding(&self, id: BindingId) -> Option<&RawMethodBinding> {
        match self.get(id)? {
            RawBinding::Method(b) => Some(b),
            _ => None,
        }
    }

    pub fn variable_binding(&self, id: BindingId) -> Option<&RawVariableBinding> {
        match self.get(id)? {
            RawBinding::Variable(b) => Some(b),
            _ => None,
        }
    }

    pub fn package_binding(&self, id: BindingId) -> Option<&RawPackageBinding> {
        match self.get(id)? {
            RawBinding::Package(b) => Some(b),
            _ => None,
        }
    }

    pub fn annotation_binding(&self, id: BindingId) -> Option<&RawAnnotationBinding> {
        match self.get(id)? {
            RawBinding::Annotation(b) => Some(b),
            _ => None,
        }
    }

    /// The first binding reported under the same key as `id`.
    pub fn canonical(&self, id: BindingId) -> BindingId {
        self.get(id)
            .and_then(RawBinding::key)
            .and_then(|key| self.by_key.get(key))
            .copied()
            .unwrap_or(id)
    }

    pub fn by_key(&self, key: &str) -> Option<BindingId> {
        self.by_key.get(key).copied()
    }

    /// The generic, non-parameterized type binding named `qualified_name`.
    pub fn type_named(&self, qualified_name: &str) -> Option<BindingId> {
        self.by_qualified_name.get(qualified_name).copied()
    }

    /// Strip a binding to the canonical binding of its declaration, so that
    /// every instantiation of one generic declaration shares one key.
    pub fn declaration_of(&self, id: BindingId) -> BindingId {
        let declaration = match self.get(id) {
            Some(RawBinding::Type(b)) => b.type_declaration,
            Some(RawBinding::Method(b)) => b.method_declaration,
            Some(RawBinding::Variable(b)) => b.variable_declaration,
            _ => None,
        };
        self.canonical(declaration.unwrap_or(id))
    }

    /// Erased qualified name used for signature comparison.
    pub fn erasure_name(&self, id: BindingId) -> SmolStr {
        self.erasure_name_guarded(id, 0)
    }

    fn erasure_name_guarded(&self, id: BindingId, depth: u32) -> SmolStr {
        let Some(ty) = self.type_binding(id) else {
            return SmolStr::new_static("?");
        };
        if depth > 16 {
            return ty.qualified_name.clone();
        }
        match ty.kind {
            RawTypeKind::TypeVariable | RawTypeKind::Wildcard | RawTypeKind::Intersection => {
                match ty.bounds.first().or(ty.wildcard_bound.as_ref()) {
                    Some(&bound) if ty.kind != RawTypeKind::Wildcard || ty.upper_bound => {
                        self.erasure_name_guarded(bound, depth + 1)
                    }
                    _ => SmolStr::new_static("java.lang.Object"),
                }
            }
            RawTypeKind::Array => match ty.element_type {
                Some(element) => {
                    SmolStr::new(format!("{}[]", self.erasure_name_guarded(element, depth + 1)))
                }
                None => ty.qualified_name.clone(),
            },
            _ => ty.qualified_name.clone(),
        }
    }

    /// Whether `method` overrides `candidate` by name and erased signature.
    /// The declaring types are assumed to be related.
    pub fn overrides(&self, method: BindingId, candidate: BindingId) -> bool {
        self.overrides_in(method, candidate, &FxHashMap::default())
    }

    /// As [`overrides`](Self::overrides), with the candidate's signature
    /// read through `substitution`: type variables of the candidate's
    /// declaring type, keyed by canonical id, mapped to the type arguments
    /// the subtype supplies for them.
    pub fn overrides_in(
        &self,
        method: BindingId,
        candidate: BindingId,
        substitution: &FxHashMap<BindingId, BindingId>,
    ) -> bool {
        let (Some(m), Some(c)) = (self.method_binding(method), self.method_binding(candidate))
        else {
            return false;
        };
        if m.constructor
            || c.constructor
            || c.modifiers.intersects(Modifiers::PRIVATE | Modifiers::STATIC)
            || m.modifiers.contains(Modifiers::STATIC)
            || m.name != c.name
            || m.parameter_types.len() != c.parameter_types.len()
        {
            return false;
        }
        if !self.visible_from(c.declaring_class, m.declaring_class, c.modifiers) {
            return false;
        }
        m.parameter_types
            .iter()
            .zip(&c.parameter_types)
            .all(|(&a, &b)| self.erasure_name(a) == self.substituted_erasure(b, substitution, 0))
    }

    /// Package-private members of classes are inherited only within their
    /// package. Interface members are implicitly public.
    fn visible_from(&self, owner: Option<BindingId>, from: Option<BindingId>, modifiers: Modifiers) -> bool {
        if modifiers.intersects(Modifiers::PUBLIC | Modifiers::PROTECTED) {
            return true;
        }
        let owner_kind = owner.and_then(|o| self.type_binding(o)).map(|t| t.kind);
        if matches!(owner_kind, Some(RawTypeKind::Interface | RawTypeKind::Annotation)) {
            return true;
        }
        let (Some(owner), Some(from)) = (owner, from) else {
            return true;
        };
        self.package_of(owner) == self.package_of(from)
    }

    /// Canonical package of a type, through its enclosing types.
    pub fn package_of(&self, ty: BindingId) -> Option<BindingId> {
        let mut current = ty;
        for _ in 0..32 {
            let raw = self.type_binding(current)?;
            if let Some(package) = raw.package {
                return Some(self.canonical(package));
            }
            let enclosing = raw.declaring_class.or_else(|| {
                raw.declaring_method
                    .and_then(|m| self.method_binding(m))
                    .and_then(|m| m.declaring_class)
            })?;
            current = enclosing;
        }
        None
    }

    fn substituted_erasure(
        &self,
        id: BindingId,
        substitution: &FxHashMap<BindingId, BindingId>,
        depth: u32,
    ) -> SmolStr {
        if let Some(&actual) = substitution.get(&self.canonical(id)) {
            return self.erasure_name(actual);
        }
        match self.type_binding(id) {
            Some(ty) if ty.kind == RawTypeKind::Array && depth <= 16 => match ty.element_type {
                Some(element) => SmolStr::new(format!(
                    "{}[]",
                    self.substituted_erasure(element, substitution, depth + 1)
                )),
                None => ty.qualified_name.clone(),
            },
            _ => self.erasure_name(id),
        }
    }
}
