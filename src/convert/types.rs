//! Type nodes.

use super::{Converter, Kids, Result};
use crate::error::ConvertError;
use crate::frontend::{RawName, RawType, RawTypeNodeKind, RawWildcardBound};
use crate::lexer::TokenKind;
use crate::syntax::{NodeId, TreeKind};

impl Converter<'_> {
    /// Convert a type. Type annotations become siblings preceding the type
    /// node.
    pub(super) fn ty(&mut self, ty: &RawType, kids: &mut Kids) -> Result<NodeId> {
        if ty.annotations.is_empty() {
            self.align(ty.span, kids)?;
        } else {
            for annotation in &ty.annotations {
                self.annotation(annotation, kids)?;
            }
        }

        let id = match &ty.kind {
            RawTypeNodeKind::Primitive(_) => {
                let mut node = vec![Some(self.bump())];
                self.close(ty.span, &mut node);
                self.finish(TreeKind::PRIMITIVE_TYPE, node, kids)
            }
            RawTypeNodeKind::Var => {
                let mut node = vec![Some(self.bump())];
                self.close(ty.span, &mut node);
                self.finish(TreeKind::VAR_TYPE, node, kids)
            }
            RawTypeNodeKind::Named(name) => match name {
                RawName::Simple(simple) => {
                    self.reference(simple, simple.binding.or(ty.binding), kids)?
                }
                RawName::Qualified { .. } => self.name(name, kids)?,
            },
            RawTypeNodeKind::Array {
                element,
                dimensions,
            } => {
                let mut current = Kids::new();
                self.ty(element, &mut current)?;
                let mut id = None;
                for _ in 0..*dimensions {
                    self.gap_through(TokenKind::R_BRACKET, &mut current)?;
                    let array = self.builder.node(TreeKind::ARRAY_TYPE, current);
                    current = vec![Some(array)];
                    id = Some(array);
                }
                let id = id.ok_or_else(|| {
                    ConvertError::malformed(u32::from(ty.span.start()), "array type without dimensions")
                })?;
                kids.push(Some(id));
                id
            }
            RawTypeNodeKind::Parameterized { ty: base, arguments } => {
                let mut node = Kids::new();
                self.ty(base, &mut node)?;
                self.required_type_arguments(arguments, &mut node)?;
                self.close(ty.span, &mut node);
                self.finish(TreeKind::PARAMETERIZED_TYPE, node, kids)
            }
            RawTypeNodeKind::Wildcard { bound } => {
                let mut node = vec![Some(self.bump())];
                let kind = match bound {
                    None => TreeKind::UNBOUNDED_WILDCARD,
                    Some((bound_kind, bound)) => {
                        self.ty(bound, &mut node)?;
                        match bound_kind {
                            RawWildcardBound::Extends => TreeKind::EXTENDS_WILDCARD,
                            RawWildcardBound::Super => TreeKind::SUPER_WILDCARD,
                        }
                    }
                };
                self.close(ty.span, &mut node);
                self.finish(kind, node, kids)
            }
            RawTypeNodeKind::Union(alternatives) | RawTypeNodeKind::Intersection(alternatives) => {
                let mut node = Kids::new();
                for alternative in alternatives {
                    self.ty(alternative, &mut node)?;
                }
                self.close(ty.span, &mut node);
                let kind = if matches!(ty.kind, RawTypeNodeKind::Union(_)) {
                    TreeKind::UNION_TYPE
                } else {
                    TreeKind::INTERSECTION_TYPE
                };
                self.finish(kind, node, kids)
            }
        };

        self.builder.set_type_binding(id, ty.binding);
        Ok(id)
    }

    /// `TYPE_ARGUMENTS` of a call or member reference, absent when there
    /// are none.
    pub(super) fn type_arguments(&mut self, arguments: &[RawType], kids: &mut Kids) -> Result<Option<NodeId>> {
        if arguments.is_empty() {
            return Ok(None);
        }
        self.required_type_arguments(arguments, kids).map(Some)
    }

    /// `TYPE_ARGUMENTS` of a parameterized type; the diamond `<>` has no
    /// arguments but still its two tokens.
    fn required_type_arguments(&mut self, arguments: &[RawType], kids: &mut Kids) -> Result<NodeId> {
        self.gap_until_kind(TokenKind::LT, kids)?;
        let mut node = Kids::new();
        self.eat(TokenKind::LT, &mut node);
        for argument in arguments {
            self.ty(argument, &mut node)?;
        }
        self.gap_through(TokenKind::GT, &mut node)?;
        Ok(self.finish(TreeKind::TYPE_ARGUMENTS, node, kids))
    }
}
