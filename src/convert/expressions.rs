//! Expressions, arguments and patterns.

use super::operators::{assignment_kind, infix_kind, literal_kind, postfix_kind, prefix_kind};
use super::{Converter, Kids, Result};
use crate::error::ConvertError;
use crate::frontend::{
    RawExpression, RawExpressionKind, RawLambdaBody, RawMethodReferenceTarget, RawPattern,
    RawPatternKind,
};
use crate::lexer::TokenKind;
use crate::syntax::{NodeId, TreeKind};

fn unmapped(expression: &RawExpression, what: &str) -> ConvertError {
    ConvertError::malformed(u32::from(expression.span.start()), format!("no node kind for {what}"))
}

impl Converter<'_> {
    pub(super) fn expression(&mut self, expression: &RawExpression, kids: &mut Kids) -> Result<NodeId> {
        self.align(expression.span, kids)?;
        let span = expression.span;

        let id = match &expression.kind {
            RawExpressionKind::Name(name) => self.name(name, kids)?,

            RawExpressionKind::Literal(literal) => {
                let mut negated = None;
                if self.current_kind() == TokenKind::MINUS {
                    negated = Some(self.bump());
                }
                let token = self.current_kind();
                let kind = literal_kind(*literal, token).ok_or_else(|| unmapped(expression, "literal"))?;
                let leaf = self.bump();
                match negated {
                    Some(minus) => {
                        let literal = self.builder.node(kind, [Some(leaf)]);
                        self.builder.set_type_binding(literal, expression.type_binding);
                        let mut node = vec![Some(minus), Some(literal)];
                        self.close(span, &mut node);
                        self.finish(TreeKind::UNARY_MINUS, node, kids)
                    }
                    None => {
                        let mut node = vec![Some(leaf)];
                        self.close(span, &mut node);
                        self.finish(kind, node, kids)
                    }
                }
            }

            RawExpressionKind::Infix {
                operator,
                left,
                right,
                extended,
            } => {
                let kind = infix_kind(*operator).ok_or_else(|| unmapped(expression, "operator"))?;
                let mut node = Kids::new();
                self.expression(left, &mut node)?;
                self.expression(right, &mut node)?;
                // a + b + c folds to ((a + b) + c)
                for operand in extended {
                    let folded = self.builder.node(kind, node);
                    self.builder.set_type_binding(folded, expression.type_binding);
                    node = vec![Some(folded)];
                    self.expression(operand, &mut node)?;
                }
                self.close(span, &mut node);
                self.finish(kind, node, kids)
            }

            RawExpressionKind::Prefix { operator, operand } => {
                let kind = prefix_kind(*operator).ok_or_else(|| unmapped(expression, "operator"))?;
                let mut node = Kids::new();
                self.expression(operand, &mut node)?;
                self.close(span, &mut node);
                self.finish(kind, node, kids)
            }

            RawExpressionKind::Postfix { operator, operand } => {
                let kind = postfix_kind(*operator).ok_or_else(|| unmapped(expression, "operator"))?;
                let mut node = Kids::new();
                self.expression(operand, &mut node)?;
                self.close(span, &mut node);
                self.finish(kind, node, kids)
            }

            RawExpressionKind::Assignment {
                operator,
                left,
                right,
            } => {
                let kind = assignment_kind(*operator).ok_or_else(|| unmapped(expression, "operator"))?;
                let mut node = Kids::new();
                self.expression(left, &mut node)?;
                self.expression(right, &mut node)?;
                self.close(span, &mut node);
                self.finish(kind, node, kids)
            }

            RawExpressionKind::MethodInvocation {
                receiver,
                type_arguments,
                name,
                arguments,
                binding,
            } => {
                let binding = self.checked_call(*binding, arguments.len());
                let mut node = Kids::new();
                match receiver {
                    None => {
                        self.type_arguments(type_arguments, &mut node)?;
                        self.reference(name, binding, &mut node)?;
                    }
                    Some(receiver) => {
                        let mut select = Kids::new();
                        self.expression(receiver, &mut select)?;
                        self.type_arguments(type_arguments, &mut select)?;
                        self.reference(name, binding, &mut select)?;
                        let id = self.finish(TreeKind::MEMBER_SELECT, select, &mut node);
                        self.builder.set_binding(id, binding);
                    }
                }
                self.arguments(arguments, &mut node)?;
                self.close(span, &mut node);
                let id = self.finish(TreeKind::METHOD_INVOCATION, node, kids);
                self.builder.set_binding(id, binding);
                id
            }

            RawExpressionKind::SuperMethodInvocation {
                qualifier,
                type_arguments,
                name,
                arguments,
                binding,
            } => {
                let binding = self.checked_call(*binding, arguments.len());
                let mut node = Kids::new();
                let mut select = Kids::new();
                self.keyword_identifier(qualifier.as_ref(), TokenKind::SUPER_KW, &mut select)?;
                self.type_arguments(type_arguments, &mut select)?;
                self.reference(name, binding, &mut select)?;
                let callee = self.finish(TreeKind::MEMBER_SELECT, select, &mut node);
                self.builder.set_binding(callee, binding);
                self.arguments(arguments, &mut node)?;
                self.close(span, &mut node);
                let id = self.finish(TreeKind::METHOD_INVOCATION, node, kids);
                self.builder.set_binding(id, binding);
                id
            }

            RawExpressionKind::ClassInstanceCreation {
                outer,
                type_arguments,
                ty,
                arguments,
                body,
                binding,
            } => {
                let binding = self.checked_call(*binding, arguments.len());
                let mut node = Kids::new();
                if let Some(outer) = outer {
                    self.expression(outer, &mut node)?;
                }
                self.gap_until_kind(TokenKind::NEW_KW, &mut node)?;
                self.eat(TokenKind::NEW_KW, &mut node);
                self.type_arguments(type_arguments, &mut node)?;
                self.ty(ty, &mut node)?;
                self.arguments(arguments, &mut node)?;
                if let Some(body) = body {
                    self.anonymous_class(body, &mut node)?;
                }
                self.close(span, &mut node);
                let id = self.finish(TreeKind::NEW_CLASS, node, kids);
                self.builder.set_binding(id, binding);
                self.add_usage(binding, id);
                id
            }

            RawExpressionKind::ArrayCreation {
                element_type,
                dimensions,
                initializer,
            } => {
                let mut node = Kids::new();
                self.ty(element_type, &mut node)?;
                for dimension in dimensions {
                    self.expression(dimension, &mut node)?;
                }
                if let Some(initializer) = initializer {
                    self.expression(initializer, &mut node)?;
                }
                self.close(span, &mut node);
                self.finish(TreeKind::NEW_ARRAY, node, kids)
            }

            RawExpressionKind::ArrayInitializer(items) => {
                let mut node = Kids::new();
                for item in items {
                    self.expression(item, &mut node)?;
                }
                self.close(span, &mut node);
                self.finish(TreeKind::ARRAY_INITIALIZER, node, kids)
            }

            RawExpressionKind::ArrayAccess { array, index } => {
                let mut node = Kids::new();
                self.expression(array, &mut node)?;
                self.expression(index, &mut node)?;
                self.close(span, &mut node);
                self.finish(TreeKind::ARRAY_ACCESS_EXPRESSION, node, kids)
            }

            RawExpressionKind::FieldAccess {
                expression: target,
                name,
            } => {
                let mut node = Kids::new();
                self.expression(target, &mut node)?;
                self.reference(name, name.binding, &mut node)?;
                self.close(span, &mut node);
                let id = self.finish(TreeKind::MEMBER_SELECT, node, kids);
                self.builder.set_binding(id, name.binding);
                id
            }

            RawExpressionKind::SuperFieldAccess { qualifier, name } => {
                let mut node = Kids::new();
                self.keyword_identifier(qualifier.as_ref(), TokenKind::SUPER_KW, &mut node)?;
                self.reference(name, name.binding, &mut node)?;
                self.close(span, &mut node);
                let id = self.finish(TreeKind::MEMBER_SELECT, node, kids);
                self.builder.set_binding(id, name.binding);
                id
            }

            RawExpressionKind::This { qualifier } => {
                self.keyword_identifier(qualifier.as_ref(), TokenKind::THIS_KW, kids)?
            }

            RawExpressionKind::Cast {
                ty,
                expression: operand,
            } => {
                let mut node = Kids::new();
                self.ty(ty, &mut node)?;
                self.expression(operand, &mut node)?;
                self.close(span, &mut node);
                self.finish(TreeKind::TYPE_CAST, node, kids)
            }

            RawExpressionKind::Instanceof {
                expression: operand,
                ty,
            } => {
                let mut node = Kids::new();
                self.expression(operand, &mut node)?;
                self.ty(ty, &mut node)?;
                self.close(span, &mut node);
                self.finish(TreeKind::INSTANCE_OF, node, kids)
            }

            RawExpressionKind::PatternInstanceof {
                expression: operand,
                pattern,
            } => {
                let mut node = Kids::new();
                self.expression(operand, &mut node)?;
                self.pattern(pattern, &mut node)?;
                self.close(span, &mut node);
                self.finish(TreeKind::PATTERN_INSTANCE_OF, node, kids)
            }

            RawExpressionKind::Conditional {
                condition,
                then,
                otherwise,
            } => {
                let mut node = Kids::new();
                self.expression(condition, &mut node)?;
                self.expression(then, &mut node)?;
                self.expression(otherwise, &mut node)?;
                self.close(span, &mut node);
                self.finish(TreeKind::CONDITIONAL_EXPRESSION, node, kids)
            }

            RawExpressionKind::Parenthesized(inner) => {
                let mut node = Kids::new();
                self.expression(inner, &mut node)?;
                self.close(span, &mut node);
                self.finish(TreeKind::PARENTHESIZED_EXPRESSION, node, kids)
            }

            RawExpressionKind::Lambda {
                parameters,
                body,
                binding,
            } => {
                let mut node = Kids::new();
                for parameter in parameters {
                    self.variable(parameter, &mut node)?;
                }
                match body {
                    RawLambdaBody::Expression(body) => {
                        self.expression(body, &mut node)?;
                    }
                    RawLambdaBody::Block(block) => {
                        self.block(block, &mut node)?;
                    }
                }
                self.close(span, &mut node);
                let id = self.finish(TreeKind::LAMBDA_EXPRESSION, node, kids);
                self.builder.set_binding(id, *binding);
                self.declare(*binding, id);
                id
            }

            RawExpressionKind::MethodReference {
                target,
                type_arguments,
                name,
                binding,
            } => {
                let mut node = Kids::new();
                match target {
                    RawMethodReferenceTarget::Expression(target) => {
                        self.expression(target, &mut node)?;
                    }
                    RawMethodReferenceTarget::Type(ty) => {
                        self.ty(ty, &mut node)?;
                    }
                    RawMethodReferenceTarget::Super(qualifier) => {
                        self.keyword_identifier(qualifier.as_ref(), TokenKind::SUPER_KW, &mut node)?;
                    }
                }
                self.gap_through(TokenKind::COLON_COLON, &mut node)?;
                self.type_arguments(type_arguments, &mut node)?;
                if let Some(name) = name {
                    self.reference(name, *binding, &mut node)?;
                }
                self.close(span, &mut node);
                let id = self.finish(TreeKind::METHOD_REFERENCE, node, kids);
                self.builder.set_binding(id, *binding);
                if name.is_none() {
                    self.add_usage(*binding, id);
                }
                id
            }

            RawExpressionKind::TypeLiteral(ty) => {
                let mut node = Kids::new();
                self.ty(ty, &mut node)?;
                self.gap_until_kind(TokenKind::CLASS_KW, &mut node)?;
                let class = self.bump();
                self.finish(TreeKind::IDENTIFIER, vec![Some(class)], &mut node);
                self.close(span, &mut node);
                self.finish(TreeKind::MEMBER_SELECT, node, kids)
            }

            RawExpressionKind::Switch { selector, body } => {
                let mut node = Kids::new();
                self.expression(selector, &mut node)?;
                self.gap_until_kind(TokenKind::L_BRACE, &mut node)?;
                self.eat(TokenKind::L_BRACE, &mut node);
                self.switch_body(body, span, &mut node)?;
                self.finish(TreeKind::SWITCH_EXPRESSION, node, kids)
            }

            RawExpressionKind::VariableDeclaration {
                modifiers,
                ty,
                fragments,
            } => self.variables(modifiers, ty, fragments, span, kids)?,

            RawExpressionKind::Pattern(pattern) => self.pattern(pattern, kids)?,

            RawExpressionKind::CaseDefault => {
                let mut node = vec![Some(self.bump())];
                self.close(span, &mut node);
                self.finish(TreeKind::DEFAULT_PATTERN, node, kids)
            }

            RawExpressionKind::Annotation(annotation) => self.annotation(annotation, kids)?,
        };

        if expression.type_binding.is_some() {
            self.builder.set_type_binding(id, expression.type_binding);
        }
        Ok(id)
    }

    /// `ARGUMENTS` from the opening to the closing parenthesis.
    pub(super) fn arguments(&mut self, arguments: &[RawExpression], kids: &mut Kids) -> Result<NodeId> {
        self.gap_until_kind(TokenKind::L_PAREN, kids)?;
        let mut node = Kids::new();
        self.eat(TokenKind::L_PAREN, &mut node);
        for argument in arguments {
            self.expression(argument, &mut node)?;
        }
        self.gap_through(TokenKind::R_PAREN, &mut node)?;
        Ok(self.finish(TreeKind::ARGUMENTS, node, kids))
    }

    pub(super) fn pattern(&mut self, pattern: &RawPattern, kids: &mut Kids) -> Result<NodeId> {
        self.align(pattern.span, kids)?;
        let mut node = Kids::new();
        let kind = match &pattern.kind {
            RawPatternKind::Type(variable) => {
                self.variable(variable, &mut node)?;
                TreeKind::TYPE_PATTERN
            }
            RawPatternKind::Record { ty, patterns } => {
                self.ty(ty, &mut node)?;
                for nested in patterns {
                    self.pattern(nested, &mut node)?;
                }
                TreeKind::RECORD_PATTERN
            }
            RawPatternKind::Guarded { pattern, guard } => {
                self.pattern(pattern, &mut node)?;
                self.expression(guard, &mut node)?;
                TreeKind::GUARDED_PATTERN
            }
        };
        self.close(pattern.span, &mut node);
        Ok(self.finish(kind, node, kids))
    }
}
