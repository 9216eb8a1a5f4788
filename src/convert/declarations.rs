//! Type, member and variable declarations.

use text_size::TextRange;

use super::{closing_brace, Converter, Kids, Result};
use crate::frontend::{
    BindingId, RawAnnotationMember, RawAnonymousClass, RawBodyDeclaration, RawDeclarationKind,
    RawEnumConstant, RawFragment, RawInitializer, RawMethodDeclaration, RawModifier,
    RawSingleVariable, RawType, RawTypeDeclaration, RawTypeParameter,
};
use crate::error::ConvertError;
use crate::lexer::TokenKind;
use crate::syntax::{NodeId, TreeKind};

fn declaration_kind(kind: RawDeclarationKind) -> TreeKind {
    match kind {
        RawDeclarationKind::Class => TreeKind::CLASS,
        RawDeclarationKind::Interface => TreeKind::INTERFACE,
        RawDeclarationKind::Enum => TreeKind::ENUM,
        RawDeclarationKind::Record => TreeKind::RECORD,
        RawDeclarationKind::Annotation => TreeKind::ANNOTATION_TYPE,
    }
}

impl Converter<'_> {
    // =========================================================================
    // TYPES
    // =========================================================================

    pub(super) fn type_declaration(
        &mut self,
        decl: &RawTypeDeclaration,
        kids: &mut Kids,
    ) -> Result<NodeId> {
        self.align(decl.span, kids)?;
        let mut node = Kids::new();
        self.modifiers(&decl.modifiers, &mut node)?;
        self.declared_name(&decl.name, decl.binding, &mut node)?;
        self.type_parameters(&decl.type_parameters, &mut node)?;

        for component in &decl.record_components {
            self.variable(component, &mut node)?;
        }
        if let Some(superclass) = &decl.superclass {
            self.ty(superclass, &mut node)?;
        }
        self.list(&decl.interfaces, &mut node, |c, t, k| c.ty(t, k))?;
        self.list(&decl.permitted, &mut node, |c, t, k| c.ty(t, k))?;

        self.gap_until_kind(TokenKind::L_BRACE, &mut node)?;
        self.eat(TokenKind::L_BRACE, &mut node);
        if decl.kind == RawDeclarationKind::Enum {
            for constant in &decl.enum_constants {
                self.gap(constant.span.start(), &mut node);
                self.enum_constant(constant, &mut node)?;
            }
            self.eat(TokenKind::COMMA, &mut node);
            self.eat(TokenKind::SEMICOLON, &mut node);
        }
        self.members(&decl.body, decl.span, &mut node)?;

        let id = self.finish(declaration_kind(decl.kind), node, kids);
        self.builder.set_binding(id, decl.binding);
        self.declare(decl.binding, id);
        Ok(id)
    }

    /// Members up to and including the closing `}` of `span`.
    fn members(&mut self, body: &[RawBodyDeclaration], span: TextRange, node: &mut Kids) -> Result<()> {
        for member in body {
            self.member_gap(member.span().start(), node);
            self.body_declaration(member, node)?;
        }
        self.member_gap(closing_brace(span), node);
        self.close(span, node);
        Ok(())
    }

    fn body_declaration(&mut self, member: &RawBodyDeclaration, kids: &mut Kids) -> Result<NodeId> {
        match member {
            RawBodyDeclaration::Field(field) => {
                self.variables(&field.modifiers, &field.ty, &field.fragments, field.span, kids)
            }
            RawBodyDeclaration::Method(method) => self.method(method, kids),
            RawBodyDeclaration::Initializer(initializer) => self.initializer(initializer, kids),
            RawBodyDeclaration::Type(decl) => self.type_declaration(decl, kids),
            RawBodyDeclaration::AnnotationMember(member) => self.annotation_member(member, kids),
        }
    }

    pub(super) fn anonymous_class(&mut self, class: &RawAnonymousClass, kids: &mut Kids) -> Result<NodeId> {
        self.align(class.span, kids)?;
        let mut node = Kids::new();
        self.eat(TokenKind::L_BRACE, &mut node);
        self.members(&class.body, class.span, &mut node)?;
        let id = self.finish(TreeKind::CLASS, node, kids);
        self.builder.set_binding(id, class.binding);
        self.declare(class.binding, id);
        Ok(id)
    }

    fn enum_constant(&mut self, constant: &RawEnumConstant, kids: &mut Kids) -> Result<NodeId> {
        self.align(constant.span, kids)?;
        let mut node = Kids::new();
        self.modifiers(&constant.modifiers, &mut node)?;
        self.declared_name(&constant.name, constant.binding, &mut node)?;
        let constructor = match &constant.arguments {
            Some(arguments) => {
                self.arguments(arguments, &mut node)?;
                self.checked_call(constant.constructor, arguments.len())
            }
            None => self.checked_call(constant.constructor, 0),
        };
        if let Some(body) = &constant.body {
            self.anonymous_class(body, &mut node)?;
        }
        self.close(constant.span, &mut node);

        let id = self.finish(TreeKind::ENUM_CONSTANT, node, kids);
        self.builder.set_binding(id, constant.binding);
        self.declare(constant.binding, id);
        self.add_usage(constructor, id);
        Ok(id)
    }

    // =========================================================================
    // TYPE PARAMETERS
    // =========================================================================

    pub(super) fn type_parameters(
        &mut self,
        parameters: &[RawTypeParameter],
        kids: &mut Kids,
    ) -> Result<Option<NodeId>> {
        if parameters.is_empty() {
            return Ok(None);
        }
        self.gap_until_kind(TokenKind::LT, kids)?;
        let mut node = Kids::new();
        self.eat(TokenKind::LT, &mut node);
        for parameter in parameters {
            self.type_parameter(parameter, &mut node)?;
        }
        self.gap_through(TokenKind::GT, &mut node)?;
        Ok(Some(self.finish(TreeKind::TYPE_PARAMETERS, node, kids)))
    }

    fn type_parameter(&mut self, parameter: &RawTypeParameter, kids: &mut Kids) -> Result<NodeId> {
        self.align(parameter.span, kids)?;
        let mut node = Kids::new();
        for annotation in &parameter.annotations {
            self.annotation(annotation, &mut node)?;
        }
        self.declared_name(&parameter.name, parameter.binding, &mut node)?;
        for bound in &parameter.bounds {
            self.ty(bound, &mut node)?;
        }
        self.close(parameter.span, &mut node);
        let id = self.finish(TreeKind::TYPE_PARAMETER, node, kids);
        self.builder.set_binding(id, parameter.binding);
        self.declare(parameter.binding, id);
        Ok(id)
    }

    // =========================================================================
    // METHODS
    // =========================================================================

    fn method(&mut self, method: &RawMethodDeclaration, kids: &mut Kids) -> Result<NodeId> {
        self.align(method.span, kids)?;
        let mut node = Kids::new();
        self.modifiers(&method.modifiers, &mut node)?;
        self.type_parameters(&method.type_parameters, &mut node)?;
        if let Some(return_type) = &method.return_type {
            self.ty(return_type, &mut node)?;
        }
        self.declared_name(&method.name, method.binding, &mut node)?;

        if !method.compact {
            self.gap_until_kind(TokenKind::L_PAREN, &mut node)?;
            self.eat(TokenKind::L_PAREN, &mut node);
            for parameter in &method.parameters {
                self.variable(parameter, &mut node)?;
            }
            self.gap_through(TokenKind::R_PAREN, &mut node)?;
        }
        self.list(&method.thrown, &mut node, |c, t, k| c.ty(t, k))?;
        if let Some(body) = &method.body {
            self.block(body, &mut node)?;
        }
        self.close(method.span, &mut node);

        let kind = if method.constructor {
            TreeKind::CONSTRUCTOR
        } else {
            TreeKind::METHOD
        };
        let id = self.finish(kind, node, kids);
        self.builder.set_binding(id, method.binding);
        self.declare(method.binding, id);
        Ok(id)
    }

    /// Annotation type elements are methods with an optional `default`.
    fn annotation_member(&mut self, member: &RawAnnotationMember, kids: &mut Kids) -> Result<NodeId> {
        self.align(member.span, kids)?;
        let mut node = Kids::new();
        self.modifiers(&member.modifiers, &mut node)?;
        self.ty(&member.ty, &mut node)?;
        self.declared_name(&member.name, member.binding, &mut node)?;
        if let Some(default) = &member.default {
            self.expression(default, &mut node)?;
        }
        self.close(member.span, &mut node);
        let id = self.finish(TreeKind::METHOD, node, kids);
        self.builder.set_binding(id, member.binding);
        self.declare(member.binding, id);
        Ok(id)
    }

    fn initializer(&mut self, initializer: &RawInitializer, kids: &mut Kids) -> Result<NodeId> {
        self.align(initializer.span, kids)?;
        let mut node = Kids::new();
        self.block(&initializer.body, &mut node)?;
        self.close(initializer.span, &mut node);
        let kind = if initializer.is_static {
            TreeKind::STATIC_INITIALIZER
        } else {
            TreeKind::INITIALIZER
        };
        Ok(self.finish(kind, node, kids))
    }

    // =========================================================================
    // VARIABLES
    // =========================================================================

    /// One `VARIABLE` per declarator. The first carries the modifiers and
    /// the declared type; each takes the separator that follows it.
    /// Returns the first.
    pub(super) fn variables(
        &mut self,
        modifiers: &[RawModifier],
        ty: &RawType,
        fragments: &[RawFragment],
        span: TextRange,
        kids: &mut Kids,
    ) -> Result<NodeId> {
        if fragments.is_empty() {
            return Err(ConvertError::malformed(
                u32::from(span.start()),
                "variable declaration without declarators",
            ));
        }
        self.align(span, kids)?;

        let mut first = None;
        for (i, fragment) in fragments.iter().enumerate() {
            let mut node = Kids::new();
            if i == 0 {
                self.modifiers(modifiers, &mut node)?;
                self.ty(ty, &mut node)?;
            }
            self.declared_name(&fragment.name, fragment.binding, &mut node)?;
            if let Some(initializer) = &fragment.initializer {
                self.expression(initializer, &mut node)?;
            }
            let end = fragments
                .get(i + 1)
                .map_or(span.end(), |next| next.span.start());
            self.gap(end, &mut node);

            let id = self.finish(TreeKind::VARIABLE, node, kids);
            self.bind_variable(id, fragment.binding, ty.binding);
            first.get_or_insert(id);
        }
        first.ok_or_else(|| ConvertError::malformed(u32::from(span.start()), "empty declaration"))
    }

    /// Parameter, record component, catch parameter, resource or pattern
    /// variable.
    pub(super) fn variable(&mut self, variable: &RawSingleVariable, kids: &mut Kids) -> Result<NodeId> {
        self.align(variable.span, kids)?;
        let mut node = Kids::new();
        self.modifiers(&variable.modifiers, &mut node)?;
        match &variable.ty {
            Some(ty) if variable.varargs => {
                let mut array = Kids::new();
                self.ty(ty, &mut array)?;
                self.gap_through(TokenKind::ELLIPSIS, &mut array)?;
                let id = self.finish(TreeKind::ARRAY_TYPE, array, &mut node);
                self.builder.set_type_binding(id, ty.binding);
            }
            Some(ty) => {
                self.ty(ty, &mut node)?;
            }
            None => {
                self.finish(TreeKind::INFERRED_TYPE, Kids::new(), &mut node);
            }
        }
        self.declared_name(&variable.name, variable.binding, &mut node)?;
        if let Some(initializer) = &variable.initializer {
            self.expression(initializer, &mut node)?;
        }
        self.close(variable.span, &mut node);

        let id = self.finish(TreeKind::VARIABLE, node, kids);
        let ty = variable.ty.as_ref().and_then(|t| t.binding);
        self.bind_variable(id, variable.binding, ty);
        Ok(id)
    }

    fn bind_variable(&mut self, id: NodeId, binding: Option<BindingId>, ty: Option<BindingId>) {
        let ty = binding
            .and_then(|b| self.bindings.variable_binding(b))
            .and_then(|v| v.ty)
            .or(ty);
        self.builder.set_binding(id, binding);
        self.builder.set_type_binding(id, ty);
        self.declare(binding, id);
    }
}
