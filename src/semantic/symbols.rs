//! Symbol model.
//!
//! Symbols stand for declared entities: packages, types, methods,
//! variables and statement labels. Every resolution failure maps onto one
//! of the unknown symbols, which answer every query with an empty or
//! neutral value.

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

use super::annotations::AnnotationMetadata;
use super::context::{SemanticContext, UNKNOWN_METHOD, UNKNOWN_SYMBOL, UNKNOWN_TYPE_SYMBOL, UNKNOWN_VARIABLE};
use super::index::IndexKey;
use super::nullability::{self, NullabilityData, NullabilityLevel};
use super::overrides;
use super::types::{Type, TypeId};
use crate::base::{Constant, Modifiers};
use crate::config::NullabilityTarget;
use crate::frontend::{BindingId, RawMethodBinding, RawTypeBinding, RawVariableBinding};
use crate::syntax::{Node, NodeId, TreeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Package,
    Type,
    Method,
    Variable,
    Label,
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SymbolData {
    /// Unresolved; the kind is the shape the lookup asked for.
    Unknown(SymbolKind),
    Package { binding: BindingId, name: SmolStr },
    Type { binding: BindingId, ty: TypeId },
    Method { binding: BindingId },
    Variable { binding: BindingId },
    Label { node: NodeId, name: SmolStr },
    /// `<init>` or `<clinit>` of a class, owning variables declared in
    /// initializer blocks.
    Initializer { owner: SymbolId, is_static: bool },
}

impl SymbolData {
    pub(super) fn with_binding(self, key: BindingId) -> Self {
        match self {
            SymbolData::Package { name, .. } => SymbolData::Package { binding: key, name },
            SymbolData::Method { .. } => SymbolData::Method { binding: key },
            SymbolData::Variable { .. } => SymbolData::Variable { binding: key },
            other => other,
        }
    }

    fn kind(&self) -> SymbolKind {
        match self {
            SymbolData::Unknown(_) => SymbolKind::Unknown,
            SymbolData::Package { .. } => SymbolKind::Package,
            SymbolData::Type { .. } => SymbolKind::Type,
            SymbolData::Method { .. } | SymbolData::Initializer { .. } => SymbolKind::Method,
            SymbolData::Variable { .. } => SymbolKind::Variable,
            SymbolData::Label { .. } => SymbolKind::Label,
        }
    }

    fn binding(&self) -> Option<BindingId> {
        match self {
            SymbolData::Package { binding, .. }
            | SymbolData::Type { binding, .. }
            | SymbolData::Method { binding }
            | SymbolData::Variable { binding } => Some(*binding),
            _ => None,
        }
    }
}

const CLASS_LIKE: &[TreeKind] = &[
    TreeKind::CLASS,
    TreeKind::INTERFACE,
    TreeKind::ENUM,
    TreeKind::RECORD,
    TreeKind::ANNOTATION_TYPE,
];

const VARIABLE_OWNERS: &[TreeKind] = &[
    TreeKind::METHOD,
    TreeKind::CONSTRUCTOR,
    TreeKind::LAMBDA_EXPRESSION,
    TreeKind::INITIALIZER,
    TreeKind::STATIC_INITIALIZER,
    TreeKind::CLASS,
    TreeKind::INTERFACE,
    TreeKind::ENUM,
    TreeKind::RECORD,
    TreeKind::ANNOTATION_TYPE,
];

// ============================================================================
// SYMBOL VIEW
// ============================================================================

#[derive(Clone, Copy)]
pub struct Symbol<'a> {
    ctx: &'a SemanticContext,
    id: SymbolId,
}

impl<'a> Symbol<'a> {
    pub(super) fn new(ctx: &'a SemanticContext, id: SymbolId) -> Self {
        Self { ctx, id }
    }

    pub fn id(self) -> SymbolId {
        self.id
    }

    pub(super) fn context(self) -> &'a SemanticContext {
        self.ctx
    }

    fn data(self) -> Arc<SymbolData> {
        self.ctx.symbol_data(self.id)
    }

    pub fn binding(self) -> Option<BindingId> {
        self.data().binding()
    }

    fn type_raw(self) -> Option<&'a RawTypeBinding> {
        match *self.data() {
            SymbolData::Type { binding, .. } => self.ctx.bindings().type_binding(binding),
            _ => None,
        }
    }

    fn method_raw(self) -> Option<&'a RawMethodBinding> {
        match *self.data() {
            SymbolData::Method { binding } => self.ctx.bindings().method_binding(binding),
            _ => None,
        }
    }

    fn variable_raw(self) -> Option<&'a RawVariableBinding> {
        match *self.data() {
            SymbolData::Variable { binding } => self.ctx.bindings().variable_binding(binding),
            _ => None,
        }
    }

    pub fn is_same(self, other: Symbol<'_>) -> bool {
        std::ptr::eq(self.ctx, other.ctx) && self.id == other.id
    }

    pub fn kind(self) -> SymbolKind {
        self.data().kind()
    }

    pub fn is_unknown(self) -> bool {
        matches!(
            self.id,
            UNKNOWN_SYMBOL | UNKNOWN_TYPE_SYMBOL | UNKNOWN_METHOD | UNKNOWN_VARIABLE
        )
    }

    pub fn is_package(self) -> bool {
        self.kind() == SymbolKind::Package
    }

    /// A type symbol, or the unknown type-shaped symbol.
    pub fn is_type_symbol(self) -> bool {
        self.kind() == SymbolKind::Type || self.id == UNKNOWN_TYPE_SYMBOL
    }

    pub fn is_method_symbol(self) -> bool {
        self.kind() == SymbolKind::Method || self.id == UNKNOWN_METHOD
    }

    pub fn is_variable_symbol(self) -> bool {
        self.kind() == SymbolKind::Variable || self.id == UNKNOWN_VARIABLE
    }

    pub fn is_label(self) -> bool {
        self.kind() == SymbolKind::Label
    }

    // =========================================================================
    // COMMON
    // =========================================================================

    /// Simple name. Constructors carry the resolver's name; unknown
    /// symbols have the empty name.
    pub fn name(self) -> SmolStr {
        match &*self.data() {
            SymbolData::Unknown(_) => SmolStr::default(),
            SymbolData::Package { name, .. } | SymbolData::Label { name, .. } => name.clone(),
            SymbolData::Type { .. } => self.type_raw().map(|t| t.name.clone()).unwrap_or_default(),
            SymbolData::Method { .. } => self.method_raw().map(|m| m.name.clone()).unwrap_or_default(),
            SymbolData::Variable { .. } => {
                self.variable_raw().map(|v| v.name.clone()).unwrap_or_default()
            }
            SymbolData::Initializer { is_static, .. } => {
                SmolStr::new_static(if *is_static { "<clinit>" } else { "<init>" })
            }
        }
    }

    /// The enclosing symbol: package for top-level types, class for
    /// members, method or initializer for locals. Unknown for packages.
    pub fn owner(self) -> Symbol<'a> {
        let bindings = self.ctx.bindings();
        match &*self.data() {
            SymbolData::Unknown(_) | SymbolData::Package { .. } => self.ctx.unknown_symbol(),
            SymbolData::Label { node, .. } => self.owner_from_tree(*node),
            SymbolData::Initializer { owner, .. } => Symbol::new(self.ctx, *owner),
            SymbolData::Type { .. } => {
                let Some(raw) = self.type_raw() else {
                    return self.ctx.unknown_symbol();
                };
                if let Some(class) = raw.declaring_class {
                    return self.ctx.type_of(class).symbol();
                }
                if let Some(method) = raw.declaring_method {
                    return self.ctx.symbol_of(method);
                }
                self.ctx.symbol_of_opt(raw.package)
            }
            SymbolData::Method { .. } => self
                .method_raw()
                .and_then(|m| m.declaring_class)
                .map_or_else(|| self.ctx.unknown_symbol(), |c| self.ctx.type_of(c).symbol()),
            SymbolData::Variable { binding } => {
                let Some(raw) = bindings.variable_binding(*binding) else {
                    return self.ctx.unknown_symbol();
                };
                if let Some(method) = raw.declaring_method {
                    return self.ctx.symbol_of(method);
                }
                if let Some(class) = raw.declaring_class {
                    return self.ctx.type_of(class).symbol();
                }
                match self.declaration() {
                    Some(node) => self.owner_from_tree(node.id()),
                    None => self.ctx.unknown_symbol(),
                }
            }
        }
    }

    /// Owner found by walking the declaring node's ancestors.
    fn owner_from_tree(self, node: NodeId) -> Symbol<'a> {
        let node = self.ctx.tree().node(node);
        let Some(owner) = node.enclosing(VARIABLE_OWNERS) else {
            return self.ctx.unknown_symbol();
        };
        match owner.kind() {
            TreeKind::INITIALIZER | TreeKind::STATIC_INITIALIZER => {
                let class = owner
                    .enclosing(CLASS_LIKE)
                    .map_or_else(|| self.ctx.unknown_symbol(), |c| self.ctx.symbol_of_node(c));
                self.ctx
                    .initializer_symbol(class.id, owner.is(TreeKind::STATIC_INITIALIZER))
            }
            _ => self.ctx.symbol_of_node(owner),
        }
    }

    pub fn modifiers(self) -> Modifiers {
        if let Some(raw) = self.type_raw() {
            return raw.modifiers;
        }
        if let Some(raw) = self.method_raw() {
            return raw.modifiers;
        }
        if let Some(raw) = self.variable_raw() {
            return raw.modifiers;
        }
        match *self.data() {
            SymbolData::Initializer { is_static: true, .. } => Modifiers::STATIC,
            _ => Modifiers::empty(),
        }
    }

    pub fn is_public(self) -> bool {
        self.modifiers().contains(Modifiers::PUBLIC)
    }

    pub fn is_protected(self) -> bool {
        self.modifiers().contains(Modifiers::PROTECTED)
    }

    pub fn is_private(self) -> bool {
        self.modifiers().contains(Modifiers::PRIVATE)
    }

    pub fn is_package_visibility(self) -> bool {
        self.modifiers().is_package_private()
    }

    pub fn is_static(self) -> bool {
        self.modifiers().contains(Modifiers::STATIC)
    }

    pub fn is_final(self) -> bool {
        self.modifiers().contains(Modifiers::FINAL)
    }

    pub fn is_abstract(self) -> bool {
        self.modifiers().contains(Modifiers::ABSTRACT)
    }

    pub fn is_deprecated(self) -> bool {
        self.modifiers().contains(Modifiers::DEPRECATED)
    }

    /// Type of a type or variable symbol. Unknown for the rest.
    pub fn ty(self) -> Type<'a> {
        match *self.data() {
            SymbolData::Type { ty, .. } => Type::new(self.ctx, ty),
            SymbolData::Variable { .. } => self.ctx.type_of_opt(self.variable_raw().and_then(|v| v.ty)),
            _ => self.ctx.unknown_type(),
        }
    }

    /// Annotations declared on this symbol.
    pub fn metadata(self) -> Arc<AnnotationMetadata> {
        let annotations: &[BindingId] = if let Some(raw) = self.type_raw() {
            &raw.annotations
        } else if let Some(raw) = self.method_raw() {
            &raw.annotations
        } else if let Some(raw) = self.variable_raw() {
            &raw.annotations
        } else if let SymbolData::Package { binding, .. } = *self.data() {
            self.ctx
                .bindings()
                .package_binding(binding)
                .map(|p| p.annotations.as_slice())
                .unwrap_or(&[])
        } else {
            &[]
        };
        self.ctx.metadata(self.id, annotations)
    }

    fn index_key(self) -> Option<IndexKey> {
        match *self.data() {
            SymbolData::Label { node, .. } => Some(IndexKey::Label(node)),
            _ => self
                .binding()
                .map(|b| IndexKey::Binding(self.ctx.bindings().declaration_of(b))),
        }
    }

    /// The declaring node, when the declaration is in this file.
    pub fn declaration(self) -> Option<Node<'a>> {
        let key = self.index_key()?;
        self.ctx
            .index()
            .declaration(key)
            .map(|id| self.ctx.tree().node(id))
    }

    /// Referring nodes in source order.
    pub fn usages(self) -> Vec<Node<'a>> {
        let Some(key) = self.index_key() else {
            return Vec::new();
        };
        self.ctx
            .index()
            .usages(key)
            .iter()
            .map(|&id| self.ctx.tree().node(id))
            .collect()
    }

    /// Innermost enclosing type symbol; a type symbol is its own.
    pub fn enclosing_class(self) -> Symbol<'a> {
        let mut current = self;
        for _ in 0..64 {
            if current.is_unknown() || current.is_package() {
                break;
            }
            if current.kind() == SymbolKind::Type {
                return current;
            }
            current = current.owner();
        }
        self.ctx.unknown_of(SymbolKind::Type)
    }

    // =========================================================================
    // TYPE SYMBOLS
    // =========================================================================

    pub fn superclass(self) -> Type<'a> {
        self.ty().super_class()
    }

    pub fn interfaces(self) -> Vec<Type<'a>> {
        self.ty().interfaces()
    }

    /// Declared members: fields, methods, then member types.
    pub fn members(self) -> Vec<Symbol<'a>> {
        let Some(raw) = self.type_raw() else {
            return Vec::new();
        };
        let fields = raw.declared_fields.iter().map(|&b| self.ctx.symbol_of(b));
        let methods = raw.declared_methods.iter().map(|&b| self.ctx.symbol_of(b));
        let types = raw.declared_types.iter().map(|&b| self.ctx.type_of(b).symbol());
        fields.chain(methods).chain(types).collect()
    }

    /// Members named `name`.
    pub fn lookup(self, name: &str) -> Vec<Symbol<'a>> {
        self.members()
            .into_iter()
            .filter(|m| m.name() == name)
            .collect()
    }

    pub fn is_interface(self) -> bool {
        self.ty().is_interface()
    }

    pub fn is_enum(self) -> bool {
        self.ty().is_enum()
    }

    pub fn is_annotation(self) -> bool {
        self.ty().is_annotation()
    }

    // =========================================================================
    // METHOD SYMBOLS
    // =========================================================================

    pub fn parameter_types(self) -> Vec<Type<'a>> {
        self.method_raw()
            .map(|m| m.parameter_types.iter().map(|&b| self.ctx.type_of(b)).collect())
            .unwrap_or_default()
    }

    /// Return type; `void` for constructors as reported by the resolver.
    pub fn return_type(self) -> Type<'a> {
        self.ctx
            .type_of_opt(self.method_raw().and_then(|m| m.return_type))
    }

    pub fn thrown_types(self) -> Vec<Type<'a>> {
        self.method_raw()
            .map(|m| m.exception_types.iter().map(|&b| self.ctx.type_of(b)).collect())
            .unwrap_or_default()
    }

    /// Declared type parameters of a method, or of a generic type.
    pub fn type_parameters(self) -> Vec<Type<'a>> {
        if let Some(raw) = self.method_raw() {
            return raw.type_parameters.iter().map(|&b| self.ctx.type_of(b)).collect();
        }
        self.ty().type_parameters()
    }

    /// Inferred type arguments of a parameterized method.
    pub fn type_arguments(self) -> Vec<Type<'a>> {
        self.method_raw()
            .map(|m| m.type_arguments.iter().map(|&b| self.ctx.type_of(b)).collect())
            .unwrap_or_default()
    }

    pub fn is_constructor(self) -> bool {
        self.method_raw().is_some_and(|m| m.constructor)
    }

    pub fn is_varargs(self) -> bool {
        self.method_raw().is_some_and(|m| m.varargs)
    }

    pub fn is_lambda(self) -> bool {
        self.method_raw().is_some_and(|m| m.lambda)
    }

    pub fn is_initializer(self) -> bool {
        matches!(*self.data(), SymbolData::Initializer { .. })
    }

    /// Whether subclasses may override this method.
    pub fn is_overridable(self) -> bool {
        self.method_raw().is_some_and(|m| !m.constructor && !m.lambda)
            && !self
                .modifiers()
                .intersects(Modifiers::PRIVATE | Modifiers::STATIC | Modifiers::FINAL)
            && !self.enclosing_class().is_final()
    }

    /// Every method this one overrides, nearest first.
    pub fn overridden_symbols(self) -> Vec<Symbol<'a>> {
        let ids = match self.ctx.cached_overridden(self.id) {
            Some(ids) => ids,
            None => {
                let ids: Arc<[SymbolId]> = overrides::overridden(self).into();
                self.ctx.store_overridden(self.id, Arc::clone(&ids));
                ids
            }
        };
        ids.iter().map(|&id| Symbol::new(self.ctx, id)).collect()
    }

    /// `name(T1,T2)` with erased parameter types.
    pub fn signature(self) -> String {
        let Some(raw) = self.method_raw() else {
            return self.name().to_string();
        };
        let bindings = self.ctx.bindings();
        let parameters: Vec<SmolStr> = raw
            .parameter_types
            .iter()
            .map(|&p| bindings.erasure_name(p))
            .collect();
        format!("{}({})", raw.name, parameters.join(","))
    }

    // =========================================================================
    // VARIABLE SYMBOLS
    // =========================================================================

    pub fn is_field(self) -> bool {
        self.variable_raw().is_some_and(|v| v.field)
    }

    pub fn is_parameter(self) -> bool {
        self.variable_raw().is_some_and(|v| v.parameter)
    }

    pub fn is_local_variable(self) -> bool {
        self.variable_raw().is_some_and(|v| !v.field && !v.parameter)
    }

    pub fn is_enum_constant(self) -> bool {
        self.variable_raw().is_some_and(|v| v.enum_constant)
    }

    pub fn is_effectively_final(self) -> bool {
        self.variable_raw()
            .is_some_and(|v| v.effectively_final || v.modifiers.contains(Modifiers::FINAL))
    }

    /// Compile-time value of a constant variable: the resolver's value,
    /// else the folded initializer of a final variable.
    pub fn constant_value(self) -> Option<Constant> {
        super::constant::variable_value(self, &mut Default::default())
    }

    // =========================================================================
    // NULLABILITY
    // =========================================================================

    /// Nullability from the closest annotation or default.
    pub fn nullability(self) -> NullabilityData {
        nullability::resolve(self, self.default_target(), NullabilityLevel::Package)
    }

    /// Nullability as seen from `target`, e.g. a method's return as
    /// [`NullabilityTarget::Method`].
    pub fn nullability_at(self, target: NullabilityTarget) -> NullabilityData {
        nullability::resolve(self, target, NullabilityLevel::Package)
    }

    /// Like [`Self::nullability_at`], not looking beyond `level`.
    pub fn nullability_at_level(self, target: NullabilityTarget, level: NullabilityLevel) -> NullabilityData {
        nullability::resolve(self, target, level)
    }

    fn default_target(self) -> NullabilityTarget {
        match self.variable_raw() {
            Some(v) if v.parameter => NullabilityTarget::Parameter,
            Some(v) if v.field => NullabilityTarget::Field,
            Some(_) => NullabilityTarget::LocalVariable,
            None => NullabilityTarget::Method,
        }
    }
}

/// Entity equality: type symbols by type, methods by name, owner and
/// signature, variables by slot, name and owner, packages by name.
impl PartialEq for Symbol<'_> {
    fn eq(&self, other: &Self) -> bool {
        if self.is_same(*other) {
            return true;
        }
        if self.is_unknown() || other.is_unknown() {
            return false;
        }
        let (left, right) = (self.data(), other.data());
        match (&*left, &*right) {
            (SymbolData::Package { name: a, .. }, SymbolData::Package { name: b, .. }) => a == b,
            (SymbolData::Type { .. }, SymbolData::Type { .. }) => self.ty() == other.ty(),
            (SymbolData::Variable { .. }, SymbolData::Variable { .. }) => {
                let (Some(a), Some(b)) = (self.variable_raw(), other.variable_raw()) else {
                    return false;
                };
                a.variable_id == b.variable_id && a.name == b.name && self.owner() == other.owner()
            }
            (SymbolData::Method { .. }, SymbolData::Method { .. }) => {
                let (Some(a), Some(b)) = (self.method_raw(), other.method_raw()) else {
                    return false;
                };
                if a.lambda || b.lambda {
                    return a.lambda && b.lambda && a.key == b.key;
                }
                a.name == b.name
                    && self.owner() == other.owner()
                    && self.parameter_types() == other.parameter_types()
                    && self.type_parameters() == other.type_parameters()
                    && self.type_arguments() == other.type_arguments()
            }
            (
                SymbolData::Initializer {
                    owner: a,
                    is_static: s,
                },
                SymbolData::Initializer {
                    owner: b,
                    is_static: t,
                },
            ) => s == t && Symbol::new(self.ctx, *a) == Symbol::new(other.ctx, *b),
            _ => false,
        }
    }
}

impl fmt::Debug for Symbol<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Symbol")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}
