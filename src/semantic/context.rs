//! Per-file semantic context.
//!
//! Owns the syntax tree, the raw bindings and the declaration index, and
//! memoizes every [`Type`] and [`Symbol`] derived from them. Views are
//! `Copy` handles into arenas held here; two lookups of the same binding
//! return the same arena slot.
//!
//! Caches use `RefCell`, so a context can move to another thread once
//! built but is never shared between threads.

use std::cell::RefCell;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use tracing::{trace, warn};

use super::annotations::AnnotationMetadata;
use super::index::{DeclarationIndex, IndexKey};
use super::symbols::{Symbol, SymbolData, SymbolId, SymbolKind};
use super::types::{Type, TypeData, TypeId, TypeKind};
use crate::base::Constant;
use crate::config::NullabilityConfig;
use crate::frontend::{BindingId, BindingTable, RawBinding};
use crate::syntax::{Node, NodeId, SyntaxTree, TreeKind};

// ============================================================================
// ARENAS
// ============================================================================

#[derive(Debug, Default)]
struct TypeArena {
    data: Vec<Arc<TypeData>>,
    by_binding: FxHashMap<BindingId, TypeId>,
}

#[derive(Debug, Default)]
struct SymbolArena {
    data: Vec<Arc<SymbolData>>,
    by_binding: FxHashMap<BindingId, SymbolId>,
    labels: FxHashMap<NodeId, SymbolId>,
    initializers: FxHashMap<(SymbolId, bool), SymbolId>,
}

/// Lazily derived values, filled on first request.
#[derive(Debug, Default)]
struct Derived {
    super_types: FxHashMap<TypeId, Arc<[TypeId]>>,
    overridden: FxHashMap<SymbolId, Arc<[SymbolId]>>,
    metadata: FxHashMap<SymbolId, Arc<AnnotationMetadata>>,
    type_metadata: FxHashMap<BindingId, Arc<AnnotationMetadata>>,
    constants: FxHashMap<SymbolId, Option<Constant>>,
}

/// Symbol shape an unresolved node of `kind` would have had.
fn expected_shape(kind: TreeKind) -> SymbolKind {
    match kind {
        TreeKind::METHOD_INVOCATION
        | TreeKind::NEW_CLASS
        | TreeKind::METHOD_REFERENCE
        | TreeKind::LAMBDA_EXPRESSION
        | TreeKind::METHOD
        | TreeKind::CONSTRUCTOR => SymbolKind::Method,
        TreeKind::VARIABLE | TreeKind::ENUM_CONSTANT => SymbolKind::Variable,
        kind if kind.is_class_like() || kind.is_type() || kind == TreeKind::TYPE_PARAMETER => {
            SymbolKind::Type
        }
        _ => SymbolKind::Unknown,
    }
}

pub(super) const UNKNOWN_TYPE: TypeId = TypeId(0);
pub(super) const UNKNOWN_SYMBOL: SymbolId = SymbolId(0);
pub(super) const UNKNOWN_TYPE_SYMBOL: SymbolId = SymbolId(1);
pub(super) const UNKNOWN_METHOD: SymbolId = SymbolId(2);
pub(super) const UNKNOWN_VARIABLE: SymbolId = SymbolId(3);

// ============================================================================
// SEMANTIC CONTEXT
// ============================================================================

#[derive(Debug)]
pub struct SemanticContext {
    tree: SyntaxTree,
    bindings: BindingTable,
    index: DeclarationIndex,
    nullability: Arc<NullabilityConfig>,
    types: RefCell<TypeArena>,
    symbols: RefCell<SymbolArena>,
    derived: RefCell<Derived>,
}

impl SemanticContext {
    pub fn new(
        tree: SyntaxTree,
        bindings: BindingTable,
        index: DeclarationIndex,
        nullability: Arc<NullabilityConfig>,
    ) -> Self {
        let mut types = TypeArena::default();
        types.data.push(Arc::new(TypeData::unknown()));

        let mut symbols = SymbolArena::default();
        for kind in [
            SymbolKind::Unknown,
            SymbolKind::Type,
            SymbolKind::Method,
            SymbolKind::Variable,
        ] {
            symbols.data.push(Arc::new(SymbolData::Unknown(kind)));
        }

        Self {
            tree,
            bindings,
            index,
            nullability,
            types: RefCell::new(types),
            symbols: RefCell::new(symbols),
            derived: RefCell::new(Derived::default()),
        }
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root()
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    pub fn index(&self) -> &DeclarationIndex {
        &self.index
    }

    pub fn nullability_config(&self) -> &NullabilityConfig {
        &self.nullability
    }

    // =========================================================================
    // TYPES
    // =========================================================================

    pub fn unknown_type(&self) -> Type<'_> {
        Type::new(self, UNKNOWN_TYPE)
    }

    /// The cached type of a raw type binding. Anything that is not a
    /// resolved type binding yields the unknown type.
    pub fn type_of(&self, binding: BindingId) -> Type<'_> {
        let Some(raw) = self.bindings.type_binding(binding) else {
            return self.unknown_type();
        };
        if raw.recovered {
            return self.unknown_type();
        }
        let key = self.normalize_type(binding);
        if let Some(&id) = self.types.borrow().by_binding.get(&key) {
            return Type::new(self, id);
        }

        let data = match self.bindings.type_binding(key) {
            Some(raw) => TypeData {
                binding: Some(key),
                kind: TypeKind::from(raw.kind),
                name: raw.name.clone(),
                qualified_name: raw.qualified_name.clone(),
            },
            None => return self.unknown_type(),
        };
        let mut arena = self.types.borrow_mut();
        let id = TypeId(arena.data.len() as u32);
        trace!(?id, name = %data.qualified_name, "new type");
        arena.data.push(Arc::new(data));
        arena.by_binding.insert(key, id);
        Type::new(self, id)
    }

    pub fn type_of_opt(&self, binding: Option<BindingId>) -> Type<'_> {
        binding.map_or_else(|| self.unknown_type(), |b| self.type_of(b))
    }

    /// Type of an expression or type node.
    pub fn type_of_node(&self, node: Node<'_>) -> Type<'_> {
        self.type_of_opt(node.type_binding())
    }

    /// Canonical binding standing for `binding` in the type cache. A
    /// parameterization whose arguments are exactly the declaration's own
    /// type parameters is the declaration itself.
    fn normalize_type(&self, binding: BindingId) -> BindingId {
        let binding = self.bindings.canonical(binding);
        let Some(raw) = self.bindings.type_binding(binding) else {
            return binding;
        };
        let Some(declaration) = raw.type_declaration else {
            return binding;
        };
        let Some(generic) = self.bindings.type_binding(declaration) else {
            return binding;
        };
        let self_parameterized = raw.is_parameterized()
            && raw.type_arguments.len() == generic.type_parameters.len()
            && raw
                .type_arguments
                .iter()
                .zip(&generic.type_parameters)
                .all(|(&a, &p)| self.bindings.canonical(a) == self.bindings.canonical(p));
        if self_parameterized {
            self.bindings.canonical(declaration)
        } else {
            binding
        }
    }

    pub(super) fn type_data(&self, id: TypeId) -> Arc<TypeData> {
        Arc::clone(&self.types.borrow().data[id.index()])
    }

    pub(super) fn cached_super_types(&self, id: TypeId) -> Option<Arc<[TypeId]>> {
        self.derived.borrow().super_types.get(&id).cloned()
    }

    pub(super) fn store_super_types(&self, id: TypeId, supers: Arc<[TypeId]>) {
        self.derived.borrow_mut().super_types.insert(id, supers);
    }

    // =========================================================================
    // SYMBOLS
    // =========================================================================

    pub fn unknown_symbol(&self) -> Symbol<'_> {
        Symbol::new(self, UNKNOWN_SYMBOL)
    }

    pub(super) fn unknown_of(&self, kind: SymbolKind) -> Symbol<'_> {
        let id = match kind {
            SymbolKind::Type => UNKNOWN_TYPE_SYMBOL,
            SymbolKind::Method => UNKNOWN_METHOD,
            SymbolKind::Variable => UNKNOWN_VARIABLE,
            SymbolKind::Package | SymbolKind::Label | SymbolKind::Unknown => UNKNOWN_SYMBOL,
        };
        Symbol::new(self, id)
    }

    /// The cached symbol of a raw binding. Bindings sharing a resolver key
    /// share a symbol; type bindings resolve to their declaration's symbol.
    pub fn symbol_of(&self, binding: BindingId) -> Symbol<'_> {
        let Some(raw) = self.bindings.get(binding) else {
            return self.unknown_symbol();
        };
        let (kind, data) = match raw {
            RawBinding::Type(_) => return self.type_of(binding).symbol(),
            RawBinding::Annotation(_) => return self.unknown_symbol(),
            RawBinding::Package(package) => (
                SymbolKind::Package,
                SymbolData::Package {
                    binding,
                    name: package.name.clone(),
                },
            ),
            RawBinding::Method(_) => (SymbolKind::Method, SymbolData::Method { binding }),
            RawBinding::Variable(_) => (SymbolKind::Variable, SymbolData::Variable { binding }),
        };
        if raw.is_recovered() {
            return self.unknown_of(kind);
        }
        let key = self.bindings.canonical(binding);
        let data = data.with_binding(key);
        self.intern_binding(key, data)
    }

    pub fn symbol_of_opt(&self, binding: Option<BindingId>) -> Symbol<'_> {
        binding.map_or_else(|| self.unknown_symbol(), |b| self.symbol_of(b))
    }

    /// Symbol a node declares or refers to. Labels resolve through the
    /// index; everything else through the node's binding.
    pub fn symbol_of_node(&self, node: Node<'_>) -> Symbol<'_> {
        if node.is(TreeKind::LABELED_STATEMENT) {
            return self.label_symbol(node.id());
        }
        if let Some(IndexKey::Label(target)) = self.index.reference_of(node.id()) {
            return self.label_symbol(target);
        }
        match node.binding() {
            Some(binding) => self.symbol_of(binding),
            None => self.unknown_of(expected_shape(node.kind())),
        }
    }

    /// The type symbol of a type's declaration.
    pub(super) fn type_symbol(&self, ty: Type<'_>) -> Symbol<'_> {
        let Some(binding) = ty.binding() else {
            return self.unknown_of(SymbolKind::Type);
        };
        let declaration = self.normalize_type(self.bindings.declaration_of(binding));
        let ty = self.type_of(declaration);
        if ty.is_unknown() {
            return self.unknown_of(SymbolKind::Type);
        }
        self.intern_binding(
            declaration,
            SymbolData::Type {
                binding: declaration,
                ty: ty.id(),
            },
        )
    }

    fn intern_binding(&self, key: BindingId, data: SymbolData) -> Symbol<'_> {
        if let Some(&id) = self.symbols.borrow().by_binding.get(&key) {
            return Symbol::new(self, id);
        }
        let mut arena = self.symbols.borrow_mut();
        let id = SymbolId(arena.data.len() as u32);
        trace!(?id, ?key, "new symbol");
        arena.data.push(Arc::new(data));
        arena.by_binding.insert(key, id);
        Symbol::new(self, id)
    }

    pub(super) fn label_symbol(&self, node: NodeId) -> Symbol<'_> {
        if let Some(&id) = self.symbols.borrow().labels.get(&node) {
            return Symbol::new(self, id);
        }
        let labeled = self.tree.node(node);
        let name = labeled
            .child_of_kind(TreeKind::IDENTIFIER)
            .map(|ident| SmolStr::new(ident.text()))
            .unwrap_or_default();
        let mut arena = self.symbols.borrow_mut();
        let id = SymbolId(arena.data.len() as u32);
        arena.data.push(Arc::new(SymbolData::Label { node, name }));
        arena.labels.insert(node, id);
        Symbol::new(self, id)
    }

    /// The `<clinit>`/`<init>` pseudo-method of `owner`.
    pub(super) fn initializer_symbol(&self, owner: SymbolId, is_static: bool) -> Symbol<'_> {
        if let Some(&id) = self.symbols.borrow().initializers.get(&(owner, is_static)) {
            return Symbol::new(self, id);
        }
        let mut arena = self.symbols.borrow_mut();
        let id = SymbolId(arena.data.len() as u32);
        arena
            .data
            .push(Arc::new(SymbolData::Initializer { owner, is_static }));
        arena.initializers.insert((owner, is_static), id);
        Symbol::new(self, id)
    }

    pub(super) fn symbol_data(&self, id: SymbolId) -> Arc<SymbolData> {
        Arc::clone(&self.symbols.borrow().data[id.index()])
    }

    pub(super) fn cached_overridden(&self, id: SymbolId) -> Option<Arc<[SymbolId]>> {
        self.derived.borrow().overridden.get(&id).cloned()
    }

    pub(super) fn store_overridden(&self, id: SymbolId, overridden: Arc<[SymbolId]>) {
        self.derived.borrow_mut().overridden.insert(id, overridden);
    }

    // =========================================================================
    // ANNOTATION METADATA
    // =========================================================================

    /// Metadata of a symbol; malformed annotation bindings degrade to empty
    /// metadata.
    pub(super) fn metadata(&self, id: SymbolId, annotations: &[BindingId]) -> Arc<AnnotationMetadata> {
        if let Some(metadata) = self.derived.borrow().metadata.get(&id) {
            return Arc::clone(metadata);
        }
        let metadata = Arc::new(self.derive_metadata(annotations));
        self.derived
            .borrow_mut()
            .metadata
            .insert(id, Arc::clone(&metadata));
        metadata
    }

    /// Metadata of an annotation type, for meta-annotation lookups.
    pub(super) fn annotation_type_metadata(&self, annotation_type: BindingId) -> Arc<AnnotationMetadata> {
        let key = self.bindings.canonical(annotation_type);
        if let Some(metadata) = self.derived.borrow().type_metadata.get(&key) {
            return Arc::clone(metadata);
        }
        let annotations = self
            .bindings
            .type_binding(key)
            .map(|t| t.annotations.clone())
            .unwrap_or_default();
        let metadata = Arc::new(self.derive_metadata(&annotations));
        self.derived
            .borrow_mut()
            .type_metadata
            .insert(key, Arc::clone(&metadata));
        metadata
    }

    fn derive_metadata(&self, annotations: &[BindingId]) -> AnnotationMetadata {
        match super::annotations::metadata(&self.bindings, annotations) {
            Ok(metadata) => metadata,
            Err(error) => {
                warn!(%error, "dropping malformed annotation metadata");
                AnnotationMetadata::default()
            }
        }
    }

    // =========================================================================
    // CONSTANTS
    // =========================================================================

    /// Compile-time value of an expression node.
    pub fn constant_value(&self, node: Node<'_>) -> Option<Constant> {
        super::constant::fold(self, node, &mut FxHashSet::default())
    }

    pub(super) fn cached_constant(&self, id: SymbolId) -> Option<Option<Constant>> {
        self.derived.borrow().constants.get(&id).cloned()
    }

    pub(super) fn store_constant(&self, id: SymbolId, value: Option<Constant>) {
        self.derived.borrow_mut().constants.insert(id, value);
    }
}
