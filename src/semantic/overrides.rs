//! Override resolution.
//!
//! Walks the super types of a method's declaring class, superclass chain
//! before interfaces, and collects every visible method with the same name
//! and erased signature. Candidates come from the generic declaration of
//! each super type, with its type parameters replaced by the arguments the
//! subtype supplies. Results are normalized to the generic declaration of
//! each overridden method.

use indexmap::IndexSet;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use super::symbols::{Symbol, SymbolId};
use crate::base::Modifiers;
use crate::frontend::{BindingId, BindingTable, RawTypeKind};

pub(super) fn overridden(method: Symbol<'_>) -> Vec<SymbolId> {
    if !method.is_method_symbol() || method.is_unknown() || method.is_constructor() || method.is_lambda() {
        return Vec::new();
    }
    let ctx = method.context();
    let bindings = ctx.bindings();
    let (Some(binding), Some(raw)) = (
        method.binding(),
        method.binding().and_then(|b| bindings.method_binding(b)),
    ) else {
        return Vec::new();
    };
    if raw.modifiers.intersects(Modifiers::PRIVATE | Modifiers::STATIC) {
        return Vec::new();
    }
    let Some(owner) = raw.declaring_class else {
        return Vec::new();
    };

    let mut walk = Walk {
        bindings,
        method: binding,
        visited: FxHashSet::default(),
        found: IndexSet::new(),
    };
    walk.visited.insert(bindings.declaration_of(owner));
    walk.visit_supers(owner, &Substitution::default());

    let owner_is_interface = bindings
        .type_binding(owner)
        .is_some_and(|t| t.kind == RawTypeKind::Interface);
    if owner_is_interface {
        if let Some(object) = bindings.type_named("java.lang.Object") {
            walk.visit(object, &Substitution::default());
        }
    }

    trace!(method = %raw.name, count = walk.found.len(), "overridden methods");
    walk.found
        .into_iter()
        .map(|declaration| ctx.symbol_of(declaration).id())
        .collect()
}

/// Type variable (canonical) to the type argument bound to it.
type Substitution = FxHashMap<BindingId, BindingId>;

struct Walk<'b> {
    bindings: &'b BindingTable,
    method: BindingId,
    visited: FxHashSet<BindingId>,
    found: IndexSet<BindingId>,
}

impl Walk<'_> {
    fn visit_supers(&mut self, ty: BindingId, substitution: &Substitution) {
        let Some(raw) = self.bindings.type_binding(ty) else {
            return;
        };
        if let Some(superclass) = raw.superclass {
            self.visit(superclass, substitution);
        }
        for &interface in &raw.interfaces {
            self.visit(interface, substitution);
        }
    }

    fn visit(&mut self, ty: BindingId, substitution: &Substitution) {
        let declaration = self.bindings.declaration_of(ty);
        if !self.visited.insert(declaration) {
            return;
        }
        let (Some(used), Some(generic)) = (
            self.bindings.type_binding(ty),
            self.bindings.type_binding(declaration),
        ) else {
            return;
        };
        let mut bound = Substitution::default();
        if used.type_arguments.len() == generic.type_parameters.len() {
            for (&parameter, &argument) in generic.type_parameters.iter().zip(&used.type_arguments) {
                let argument = substitution
                    .get(&self.bindings.canonical(argument))
                    .copied()
                    .unwrap_or(argument);
                bound.insert(self.bindings.canonical(parameter), argument);
            }
        }
        for &candidate in &generic.declared_methods {
            if self.bindings.overrides_in(self.method, candidate, &bound) {
                self.found.insert(self.bindings.declaration_of(candidate));
            }
        }
        self.visit_supers(declaration, &bound);
    }
}
