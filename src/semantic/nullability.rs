//! Nullability resolution.
//!
//! A declaration's nullability comes from, in order: a recognized
//! annotation on the declaration itself, a recognized annotation on the
//! type of one of its annotations (meta-annotation), then the nearest
//! default-nullability annotation on an enclosing method, class or
//! package.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tracing::trace;

use super::annotations::{AnnotationInstance, AnnotationMetadata, AnnotationValue};
use super::symbols::{Symbol, SymbolKind};
use crate::config::{NullabilityConfig, NullabilityTarget, NullabilityType};
use crate::frontend::BindingId;

const TYPE_QUALIFIER_DEFAULT: &str = "javax.annotation.meta.TypeQualifierDefault";
const JSR305_NONNULL: &[&str] = &["javax.annotation.Nonnull", "jakarta.annotation.Nonnull"];

/// Where a nullability was found, innermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NullabilityLevel {
    Variable,
    Method,
    Class,
    Package,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullabilityData {
    ty: NullabilityType,
    level: Option<NullabilityLevel>,
    annotation: Option<SmolStr>,
    meta_annotation: bool,
}

impl NullabilityData {
    pub fn none() -> Self {
        Self {
            ty: NullabilityType::NoAnnotation,
            level: None,
            annotation: None,
            meta_annotation: false,
        }
    }

    fn found(ty: NullabilityType, level: NullabilityLevel, annotation: &str, meta_annotation: bool) -> Self {
        Self {
            ty,
            level: Some(level),
            annotation: Some(SmolStr::new(annotation)),
            meta_annotation,
        }
    }

    pub fn ty(&self) -> NullabilityType {
        self.ty
    }

    pub fn level(&self) -> Option<NullabilityLevel> {
        self.level
    }

    /// The annotation the result came from.
    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    pub fn is_meta_annotation(&self) -> bool {
        self.meta_annotation
    }

    pub fn is_present(&self) -> bool {
        self.ty != NullabilityType::NoAnnotation
    }

    pub fn is_nonnull(&self) -> bool {
        self.ty == NullabilityType::NonNull
    }

    pub fn is_nullable(&self) -> bool {
        self.ty.is_nullable()
    }

    pub fn is_strong_nullable(&self) -> bool {
        self.ty == NullabilityType::StrongNullable
    }
}

fn level_of(symbol: Symbol<'_>) -> Option<NullabilityLevel> {
    match symbol.kind() {
        SymbolKind::Variable => Some(NullabilityLevel::Variable),
        SymbolKind::Method => Some(NullabilityLevel::Method),
        SymbolKind::Type => Some(NullabilityLevel::Class),
        SymbolKind::Package => Some(NullabilityLevel::Package),
        SymbolKind::Label | SymbolKind::Unknown => None,
    }
}

pub(super) fn resolve(symbol: Symbol<'_>, target: NullabilityTarget, max_level: NullabilityLevel) -> NullabilityData {
    let Some(own_level) = level_of(symbol) else {
        return NullabilityData::none();
    };
    if own_level > max_level {
        return NullabilityData::none();
    }
    let config = symbol.context().nullability_config();
    let metadata = symbol.metadata();

    if let Some(direct) = direct(config, &metadata, own_level) {
        trace!(symbol = %symbol.name(), annotation = ?direct.annotation, "direct nullability");
        return direct;
    }
    if let Some(meta) = meta(symbol, &metadata, own_level) {
        return meta;
    }

    // Defaults: the method itself, then every enclosing declaration.
    let mut holder = if symbol.kind() == SymbolKind::Method {
        symbol
    } else {
        symbol.owner()
    };
    for _ in 0..64 {
        if holder.is_unknown() {
            break;
        }
        let Some(level) = level_of(holder) else {
            break;
        };
        if level > max_level {
            break;
        }
        if level != NullabilityLevel::Variable {
            match default_of(holder, target, level) {
                Lookup::Found(data) => return data,
                Lookup::Cancelled => return NullabilityData::none(),
                Lookup::Missing => {}
            }
        }
        if holder.is_package() {
            break;
        }
        holder = holder.owner();
    }
    NullabilityData::none()
}

fn direct(config: &NullabilityConfig, metadata: &AnnotationMetadata, level: NullabilityLevel) -> Option<NullabilityData> {
    metadata.iter().find_map(|annotation| {
        let ty = config.annotation(&annotation.name)?;
        let ty = if JSR305_NONNULL.contains(&annotation.name.as_str()) {
            jsr305_when(annotation).unwrap_or(ty)
        } else {
            ty
        };
        Some(NullabilityData::found(ty, level, &annotation.name, false))
    })
}

/// `@Nonnull(when = ...)`.
fn jsr305_when(annotation: &AnnotationInstance) -> Option<NullabilityType> {
    let when = annotation.value("when")?.enum_constants();
    match when.first().copied()? {
        "ALWAYS" => Some(NullabilityType::NonNull),
        "MAYBE" | "UNKNOWN" => Some(NullabilityType::WeakNullable),
        "NEVER" => Some(NullabilityType::StrongNullable),
        _ => None,
    }
}

/// A recognized nullability annotation on the type of an unrecognized
/// annotation, e.g. a JSR-305 type qualifier nickname.
fn meta(symbol: Symbol<'_>, metadata: &AnnotationMetadata, level: NullabilityLevel) -> Option<NullabilityData> {
    let ctx = symbol.context();
    let config = ctx.nullability_config();
    let mut visited = FxHashSet::default();
    metadata
        .iter()
        .filter(|a| !config.recognizes(&a.name))
        .find_map(|a| meta_of(symbol, a.annotation_type, level, &mut visited))
}

fn meta_of(
    symbol: Symbol<'_>,
    annotation_type: BindingId,
    level: NullabilityLevel,
    visited: &mut FxHashSet<BindingId>,
) -> Option<NullabilityData> {
    let ctx = symbol.context();
    if !visited.insert(ctx.bindings().canonical(annotation_type)) {
        return None;
    }
    let metadata = ctx.annotation_type_metadata(annotation_type);
    if let Some(mut data) = direct(ctx.nullability_config(), &metadata, level) {
        data.meta_annotation = true;
        return Some(data);
    }
    metadata
        .iter()
        .filter(|a| !ctx.nullability_config().recognizes(&a.name))
        .find_map(|a| meta_of(symbol, a.annotation_type, level, visited))
}

enum Lookup {
    Found(NullabilityData),
    Cancelled,
    Missing,
}

fn default_of(holder: Symbol<'_>, target: NullabilityTarget, level: NullabilityLevel) -> Lookup {
    let ctx = holder.context();
    let config = ctx.nullability_config();
    let metadata = holder.metadata();
    for annotation in metadata.iter() {
        if let Some(default) = config.default_annotation(&annotation.name) {
            let value = annotation.value("value");
            if default.targets_from_value {
                if value.and_then(AnnotationValue::as_bool) == Some(false) {
                    return Lookup::Cancelled;
                }
                let applies = match value {
                    Some(value) if !value.enum_constants().is_empty() => value
                        .enum_constants()
                        .into_iter()
                        .filter_map(default_location)
                        .any(|t| t == target),
                    _ => default.targets.contains(&target),
                };
                if applies {
                    return Lookup::Found(NullabilityData::found(default.nullability, level, &annotation.name, false));
                }
                continue;
            }
            if default.targets.contains(&target) {
                return Lookup::Found(NullabilityData::found(default.nullability, level, &annotation.name, false));
            }
            continue;
        }
        if let Some(data) = type_qualifier_default(holder, annotation, target, level) {
            return Lookup::Found(data);
        }
    }
    Lookup::Missing
}

/// An annotation whose type is both a type qualifier default and a
/// nullability annotation, e.g. a custom `@NonNullByDefault` built on
/// JSR-305.
fn type_qualifier_default(
    holder: Symbol<'_>,
    annotation: &AnnotationInstance,
    target: NullabilityTarget,
    level: NullabilityLevel,
) -> Option<NullabilityData> {
    let ctx = holder.context();
    let metadata = ctx.annotation_type_metadata(annotation.annotation_type);
    let applies = metadata
        .value(TYPE_QUALIFIER_DEFAULT, "value")?
        .enum_constants()
        .into_iter()
        .filter_map(element_type)
        .any(|t| t == target);
    if !applies {
        return None;
    }
    let qualifier = direct(ctx.nullability_config(), &metadata, level)?;
    Some(NullabilityData::found(qualifier.ty, level, &annotation.name, true))
}

/// Eclipse `DefaultLocation` constants.
fn default_location(name: &str) -> Option<NullabilityTarget> {
    match name {
        "PARAMETER" => Some(NullabilityTarget::Parameter),
        "RETURN_TYPE" => Some(NullabilityTarget::Method),
        "FIELD" => Some(NullabilityTarget::Field),
        _ => None,
    }
}

/// `java.lang.annotation.ElementType` constants.
fn element_type(name: &str) -> Option<NullabilityTarget> {
    match name {
        "PARAMETER" => Some(NullabilityTarget::Parameter),
        "METHOD" => Some(NullabilityTarget::Method),
        "FIELD" => Some(NullabilityTarget::Field),
        "LOCAL_VARIABLE" => Some(NullabilityTarget::LocalVariable),
        _ => None,
    }
}
