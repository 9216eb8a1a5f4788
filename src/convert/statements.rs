//! Blocks, statements and switch bodies.

use text_size::TextRange;
use tracing::trace;

use super::{closing_brace, Converter, Kids, Result};
use crate::error::ConvertError;
use crate::frontend::{RawBlock, RawCatch, RawSimpleName, RawStatement, RawStatementKind};
use crate::lexer::TokenKind;
use crate::semantic::IndexKey;
use crate::syntax::{NodeId, TreeKind};

impl Converter<'_> {
    pub(super) fn block(&mut self, block: &RawBlock, kids: &mut Kids) -> Result<NodeId> {
        self.align(block.span, kids)?;
        let mut node = Kids::new();
        self.eat(TokenKind::L_BRACE, &mut node);
        for statement in &block.statements {
            self.member_gap(statement.span.start(), &mut node);
            self.statement(statement, &mut node)?;
        }
        self.member_gap(closing_brace(block.span), &mut node);
        self.close(block.span, &mut node);
        Ok(self.finish(TreeKind::BLOCK, node, kids))
    }

    pub(super) fn statement(&mut self, statement: &RawStatement, kids: &mut Kids) -> Result<NodeId> {
        let span = statement.span;
        let kind = match &statement.kind {
            RawStatementKind::Block(block) => return self.block(block, kids),
            RawStatementKind::LocalType(decl) => return self.type_declaration(decl, kids),
            RawStatementKind::LocalVariable {
                modifiers,
                ty,
                fragments,
            } => return self.variables(modifiers, ty, fragments, span, kids),
            RawStatementKind::Labeled { label, body } => {
                return self.labeled(span, label, body, kids);
            }
            RawStatementKind::SwitchCase { .. } => {
                return Err(ConvertError::malformed(
                    u32::from(span.start()),
                    "case label outside of a switch body",
                ));
            }
            _ => statement_kind(&statement.kind),
        };

        self.align(span, kids)?;
        let mut node = Kids::new();
        match &statement.kind {
            RawStatementKind::Empty => {}
            RawStatementKind::Expression(expression) => {
                self.expression(expression, &mut node)?;
            }
            RawStatementKind::If {
                condition,
                then,
                otherwise,
            } => {
                self.expression(condition, &mut node)?;
                self.statement(then, &mut node)?;
                if let Some(otherwise) = otherwise {
                    self.statement(otherwise, &mut node)?;
                }
            }
            RawStatementKind::Assert { condition, message } => {
                self.expression(condition, &mut node)?;
                if let Some(message) = message {
                    self.expression(message, &mut node)?;
                }
            }
            RawStatementKind::Switch { selector, body } => {
                self.expression(selector, &mut node)?;
                self.gap_until_kind(TokenKind::L_BRACE, &mut node)?;
                self.eat(TokenKind::L_BRACE, &mut node);
                self.switch_body(body, span, &mut node)?;
            }
            RawStatementKind::While { condition, body } => {
                self.expression(condition, &mut node)?;
                self.statement(body, &mut node)?;
            }
            RawStatementKind::Do { body, condition } => {
                self.statement(body, &mut node)?;
                self.expression(condition, &mut node)?;
            }
            RawStatementKind::For {
                initializers,
                condition,
                updaters,
                body,
            } => {
                for initializer in initializers {
                    self.expression(initializer, &mut node)?;
                }
                if let Some(condition) = condition {
                    self.expression(condition, &mut node)?;
                }
                for updater in updaters {
                    self.expression(updater, &mut node)?;
                }
                self.statement(body, &mut node)?;
            }
            RawStatementKind::ForEach {
                variable,
                iterable,
                body,
            } => {
                self.variable(variable, &mut node)?;
                self.expression(iterable, &mut node)?;
                self.statement(body, &mut node)?;
            }
            RawStatementKind::Break { label } | RawStatementKind::Continue { label } => {
                if let Some(label) = label {
                    self.label_reference(label, &mut node)?;
                }
            }
            RawStatementKind::Return { expression } => {
                if let Some(expression) = expression {
                    self.expression(expression, &mut node)?;
                }
            }
            RawStatementKind::Throw { expression } => {
                self.expression(expression, &mut node)?;
            }
            RawStatementKind::Synchronized { lock, body } => {
                self.expression(lock, &mut node)?;
                self.block(body, &mut node)?;
            }
            RawStatementKind::Try {
                resources,
                body,
                catches,
                finally,
            } => {
                for resource in resources {
                    self.expression(resource, &mut node)?;
                }
                self.block(body, &mut node)?;
                for catch in catches {
                    self.catch(catch, &mut node)?;
                }
                if let Some(finally) = finally {
                    self.block(finally, &mut node)?;
                }
            }
            RawStatementKind::Yield {
                expression,
                implicit,
            } => {
                self.expression(expression, &mut node)?;
                if *implicit {
                    self.close(span, &mut node);
                    self.eat(TokenKind::SEMICOLON, &mut node);
                }
            }
            RawStatementKind::ConstructorInvocation {
                type_arguments,
                arguments,
                binding,
            } => {
                let binding = self.checked_call(*binding, arguments.len());
                let mut call = Kids::new();
                self.type_arguments(type_arguments, &mut call)?;
                let callee = self.keyword_identifier(None, TokenKind::THIS_KW, &mut call)?;
                self.builder.set_binding(callee, binding);
                self.add_usage(binding, callee);
                self.arguments(arguments, &mut call)?;
                let id = self.finish(TreeKind::METHOD_INVOCATION, call, &mut node);
                self.builder.set_binding(id, binding);
            }
            RawStatementKind::SuperConstructorInvocation {
                qualifier,
                type_arguments,
                arguments,
                binding,
            } => {
                let binding = self.checked_call(*binding, arguments.len());
                let mut call = Kids::new();
                let mut callee = Kids::new();
                if let Some(qualifier) = qualifier {
                    self.expression(qualifier, &mut callee)?;
                }
                self.type_arguments(type_arguments, &mut callee)?;
                let keyword = self.keyword_identifier(None, TokenKind::SUPER_KW, &mut callee)?;
                self.builder.set_binding(keyword, binding);
                self.add_usage(binding, keyword);
                if qualifier.is_some() {
                    self.finish(TreeKind::MEMBER_SELECT, callee, &mut call);
                } else {
                    call.extend(callee);
                }
                self.arguments(arguments, &mut call)?;
                let id = self.finish(TreeKind::METHOD_INVOCATION, call, &mut node);
                self.builder.set_binding(id, binding);
            }
            RawStatementKind::Block(_)
            | RawStatementKind::LocalType(_)
            | RawStatementKind::LocalVariable { .. }
            | RawStatementKind::Labeled { .. }
            | RawStatementKind::SwitchCase { .. } => {}
        }
        self.close(span, &mut node);
        Ok(self.finish(kind, node, kids))
    }

    fn catch(&mut self, catch: &RawCatch, kids: &mut Kids) -> Result<NodeId> {
        self.align(catch.span, kids)?;
        let mut node = Kids::new();
        self.variable(&catch.parameter, &mut node)?;
        self.block(&catch.body, &mut node)?;
        self.close(catch.span, &mut node);
        Ok(self.finish(TreeKind::CATCH, node, kids))
    }

    // =========================================================================
    // LABELS
    // =========================================================================

    /// The statement id is reserved up front so that `break label` inside
    /// the body can key its usage on it.
    fn labeled(
        &mut self,
        span: TextRange,
        label: &RawSimpleName,
        body: &RawStatement,
        kids: &mut Kids,
    ) -> Result<NodeId> {
        self.align(span, kids)?;
        let id = self.builder.reserve();
        let mut node = Kids::new();
        self.identifier(label, None, &mut node)?;
        self.index.declare(IndexKey::Label(id), id);

        self.labels.push((label.identifier.clone(), id));
        let body = self.statement(body, &mut node);
        self.labels.pop();
        body?;

        self.close(span, &mut node);
        self.builder.complete(id, TreeKind::LABELED_STATEMENT, node);
        kids.push(Some(id));
        Ok(id)
    }

    fn label_reference(&mut self, label: &RawSimpleName, kids: &mut Kids) -> Result<NodeId> {
        let id = self.identifier(label, None, kids)?;
        let target = self
            .labels
            .iter()
            .rev()
            .find(|(name, _)| *name == label.identifier)
            .map(|(_, target)| *target);
        match target {
            Some(target) => self.index.add_usage(IndexKey::Label(target), id),
            None => trace!(label = %label.identifier, "jump to unknown label"),
        }
        Ok(id)
    }

    // =========================================================================
    // SWITCH
    // =========================================================================

    /// Regroup the flat case/statement list into `CASE_GROUP` nodes, each
    /// holding its labels followed by its statements. Consumes the closing
    /// `}` into `node`.
    pub(super) fn switch_body(
        &mut self,
        body: &[RawStatement],
        span: TextRange,
        node: &mut Kids,
    ) -> Result<()> {
        let mut group: Option<Kids> = None;
        let mut has_statements = false;

        for statement in body {
            let is_label = matches!(statement.kind, RawStatementKind::SwitchCase { .. });
            if is_label && has_statements {
                if let Some(mut done) = group.take() {
                    self.member_gap(statement.span.start(), &mut done);
                    self.finish(TreeKind::CASE_GROUP, done, node);
                }
                has_statements = false;
            }
            let current = group.get_or_insert_with(Kids::new);
            self.member_gap(statement.span.start(), current);
            if is_label {
                self.case_label(statement, current)?;
            } else {
                self.statement(statement, current)?;
                has_statements = true;
            }
        }

        if let Some(mut done) = group {
            self.member_gap(closing_brace(span), &mut done);
            self.finish(TreeKind::CASE_GROUP, done, node);
        }
        self.close(span, node);
        Ok(())
    }

    fn case_label(&mut self, statement: &RawStatement, kids: &mut Kids) -> Result<NodeId> {
        let RawStatementKind::SwitchCase { labels, arrow, .. } = &statement.kind else {
            return Err(ConvertError::malformed(
                u32::from(statement.span.start()),
                "expected a case label",
            ));
        };
        self.align(statement.span, kids)?;
        let mut node = Kids::new();
        for label in labels {
            self.expression(label, &mut node)?;
        }
        self.close(statement.span, &mut node);
        let separator = if *arrow {
            TokenKind::ARROW
        } else {
            TokenKind::COLON
        };
        self.eat(separator, &mut node);
        Ok(self.finish(TreeKind::CASE_LABEL, node, kids))
    }
}

fn statement_kind(kind: &RawStatementKind) -> TreeKind {
    match kind {
        RawStatementKind::Empty => TreeKind::EMPTY_STATEMENT,
        RawStatementKind::Expression(_) => TreeKind::EXPRESSION_STATEMENT,
        RawStatementKind::If { .. } => TreeKind::IF_STATEMENT,
        RawStatementKind::Assert { .. } => TreeKind::ASSERT_STATEMENT,
        RawStatementKind::Switch { .. } => TreeKind::SWITCH_STATEMENT,
        RawStatementKind::While { .. } => TreeKind::WHILE_STATEMENT,
        RawStatementKind::Do { .. } => TreeKind::DO_STATEMENT,
        RawStatementKind::For { .. } => TreeKind::FOR_STATEMENT,
        RawStatementKind::ForEach { .. } => TreeKind::FOR_EACH_STATEMENT,
        RawStatementKind::Break { .. } => TreeKind::BREAK_STATEMENT,
        RawStatementKind::Continue { .. } => TreeKind::CONTINUE_STATEMENT,
        RawStatementKind::Return { .. } => TreeKind::RETURN_STATEMENT,
        RawStatementKind::Throw { .. } => TreeKind::THROW_STATEMENT,
        RawStatementKind::Synchronized { .. } => TreeKind::SYNCHRONIZED_STATEMENT,
        RawStatementKind::Try { .. } => TreeKind::TRY_STATEMENT,
        RawStatementKind::Yield {
            implicit: false, ..
        } => TreeKind::YIELD_STATEMENT,
        RawStatementKind::Yield { implicit: true, .. }
        | RawStatementKind::ConstructorInvocation { .. }
        | RawStatementKind::SuperConstructorInvocation { .. } => TreeKind::EXPRESSION_STATEMENT,
        RawStatementKind::Block(_) => TreeKind::BLOCK,
        RawStatementKind::LocalType(_) => TreeKind::CLASS,
        RawStatementKind::LocalVariable { .. } => TreeKind::VARIABLE,
        RawStatementKind::Labeled { .. } => TreeKind::LABELED_STATEMENT,
        RawStatementKind::SwitchCase { .. } => TreeKind::CASE_LABEL,
    }
}
