//! Annotation metadata.
//!
//! Flattens raw annotation bindings into name/value pairs keyed by
//! fully-qualified annotation names.

use smol_str::SmolStr;

use crate::base::Constant;
use crate::error::MetadataError;
use crate::frontend::{BindingId, BindingTable, RawAnnotationValue};

const MAX_DEPTH: u32 = 16;

/// Annotations present on one declaration, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationMetadata {
    annotations: Vec<AnnotationInstance>,
}

impl AnnotationMetadata {
    pub fn is_annotated_with(&self, qualified_name: &str) -> bool {
        self.get(qualified_name).is_some()
    }

    pub fn get(&self, qualified_name: &str) -> Option<&AnnotationInstance> {
        self.annotations.iter().find(|a| a.name == qualified_name)
    }

    /// The value of `element` in annotation `qualified_name`.
    pub fn value(&self, qualified_name: &str, element: &str) -> Option<&AnnotationValue> {
        self.get(qualified_name)?.value(element)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnnotationInstance> {
        self.annotations.iter()
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationInstance {
    pub name: SmolStr,
    pub annotation_type: BindingId,
    pub values: Vec<(SmolStr, AnnotationValue)>,
}

impl AnnotationInstance {
    pub fn value(&self, element: &str) -> Option<&AnnotationValue> {
        self.values
            .iter()
            .find(|(name, _)| name == element)
            .map(|(_, value)| value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationValue {
    Constant(Constant),
    /// A class literal, by qualified name.
    Type(SmolStr),
    EnumConstant { type_name: SmolStr, name: SmolStr },
    Annotation(Box<AnnotationInstance>),
    Array(Vec<AnnotationValue>),
}

impl AnnotationValue {
    /// Enum constant names of a single constant or an array of them.
    pub fn enum_constants(&self) -> Vec<&str> {
        match self {
            AnnotationValue::EnumConstant { name, .. } => vec![name.as_str()],
            AnnotationValue::Array(values) => values.iter().flat_map(|v| v.enum_constants()).collect(),
            _ => Vec::new(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnnotationValue::Constant(constant) => constant.as_bool(),
            _ => None,
        }
    }
}

pub(crate) fn metadata(bindings: &BindingTable, annotations: &[BindingId]) -> Result<AnnotationMetadata, MetadataError> {
    let annotations = annotations
        .iter()
        .map(|&a| instance(bindings, a, 0))
        .collect::<Result<_, _>>()?;
    Ok(AnnotationMetadata { annotations })
}

fn instance(bindings: &BindingTable, id: BindingId, depth: u32) -> Result<AnnotationInstance, MetadataError> {
    if depth > MAX_DEPTH {
        return Err(MetadataError::TooDeep(MAX_DEPTH));
    }
    if bindings.get(id).is_none() {
        return Err(MetadataError::Dangling(id.0));
    }
    let raw = bindings
        .annotation_binding(id)
        .ok_or(MetadataError::NotAnnotation(id.0))?;
    let name = bindings
        .type_binding(raw.annotation_type)
        .map(|t| t.qualified_name.clone())
        .ok_or(MetadataError::Dangling(raw.annotation_type.0))?;
    let values = raw
        .pairs
        .iter()
        .map(|(element, value)| Ok((element.clone(), self::value(bindings, value, depth)?)))
        .collect::<Result<_, MetadataError>>()?;
    Ok(AnnotationInstance {
        name,
        annotation_type: raw.annotation_type,
        values,
    })
}

fn value(bindings: &BindingTable, value: &RawAnnotationValue, depth: u32) -> Result<AnnotationValue, MetadataError> {
    Ok(match value {
        RawAnnotationValue::Constant(constant) => AnnotationValue::Constant(constant.clone()),
        RawAnnotationValue::Type(ty) => AnnotationValue::Type(
            bindings
                .type_binding(*ty)
                .map(|t| t.qualified_name.clone())
                .ok_or(MetadataError::Dangling(ty.0))?,
        ),
        RawAnnotationValue::EnumConstant(variable) => {
            let variable = bindings
                .variable_binding(*variable)
                .ok_or(MetadataError::Dangling(variable.0))?;
            let type_name = variable
                .declaring_class
                .and_then(|c| bindings.type_binding(c))
                .map(|t| t.qualified_name.clone())
                .unwrap_or_default();
            AnnotationValue::EnumConstant {
                type_name,
                name: variable.name.clone(),
            }
        }
        RawAnnotationValue::Annotation(nested) => {
            AnnotationValue::Annotation(Box::new(instance(bindings, *nested, depth + 1)?))
        }
        RawAnnotationValue::Array(values) => AnnotationValue::Array(
            values
                .iter()
                .map(|v| self::value(bindings, v, depth + 1))
                .collect::<Result<_, _>>()?,
        ),
    })
}
