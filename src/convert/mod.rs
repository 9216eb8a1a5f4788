//! Tree Converter
//!
//! Walks the raw bound tree and builds the CST from the re-lexed token
//! stream. The raw tree decides the shape, the tokens decide the leaves:
//! every token lands in exactly one leaf, so keywords and punctuation the
//! raw tree does not model are kept as leaves of the node whose span
//! covers them.
//!
//! Conversion runs left to right with a token cursor. Each `convert_*`
//! step first hands the tokens that precede its raw node to the parent
//! (the "gap"), then builds its own node and pushes it into the parent's
//! child list. Merged `>>` tokens are split on demand where a raw span ends
//! inside them.
//!
//! Declarations and references are recorded in the [`DeclarationIndex`] as
//! they are met, so usages come out in source order.

mod declarations;
mod expressions;
mod modules;
pub mod operators;
mod statements;
mod types;

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};
use tracing::{debug, trace};

use crate::base::LineIndex;
use crate::config::ParserOptions;
use crate::diagnostics::{Advisory, AdvisoryCollector};
use crate::error::ConvertError;
use crate::frontend::{
    BindingId, BindingTable, ProblemKind, RawAnnotation, RawAnnotationKind, RawBinding,
    RawCompilationUnit, RawExpression, RawImport, RawModifier, RawName, RawPackageDeclaration,
    RawParse, RawSimpleName, RawSingleVariable, RawType, RawTypeParameter,
};
use crate::lexer::{Token, TokenId, TokenKind, TokenStream};
use crate::semantic::{DeclarationIndex, IndexKey};
use crate::syntax::{NodeId, SyntaxTree, TreeBuilder, TreeKind};

/// Children collected for a node under construction; `None` marks an
/// absent optional part.
type Kids = Vec<Option<NodeId>>;

type Result<T> = std::result::Result<T, ConvertError>;

/// Everything one successful conversion produces.
#[derive(Debug)]
pub struct Converted {
    pub tree: SyntaxTree,
    pub index: DeclarationIndex,
    pub bindings: BindingTable,
    pub advisories: Vec<Advisory>,
}

/// Convert one file. Fails on the first syntax problem reported by the
/// frontend, on a lexing fault, or when the raw tree does not line up with
/// the source; never returns a partial tree.
pub fn convert(source: &str, parse: RawParse, options: &ParserOptions) -> Result<Converted> {
    let RawParse {
        unit,
        bindings,
        problems,
    } = parse;
    let lines = LineIndex::new(source);

    if let Some(problem) = problems
        .iter()
        .filter(|p| p.kind == ProblemKind::Syntax)
        .min_by_key(|p| p.span.start())
    {
        let position = lines.position(problem.span.start());
        return Err(ConvertError::Syntax {
            line: position.line,
            column: position.column,
            message: problem.message.clone(),
        });
    }

    let tokens = TokenStream::build(source, options)?;
    if unit.span.end() > TextSize::of(source) {
        return Err(ConvertError::malformed(
            u32::from(unit.span.end()),
            "compilation unit extends past the end of the source",
        ));
    }

    let mut converter = Converter::new(tokens, &bindings);
    let root = converter.compilation_unit(&unit)?;
    let Converter { builder, index, .. } = converter;
    let tree = builder.finish(root)?;

    let mut advisories = AdvisoryCollector::new();
    for problem in &problems {
        advisories.add_problem(problem, &lines);
    }

    debug!(
        nodes = tree.len(),
        tokens = tree.tokens().len(),
        declarations = index.declaration_count(),
        advisories = advisories.len(),
        "converted compilation unit"
    );

    Ok(Converted {
        tree,
        index,
        bindings,
        advisories: advisories.finish(),
    })
}

/// Offset of the closing `}` of a braced construct spanning `span`.
fn closing_brace(span: TextRange) -> TextSize {
    span.end().checked_sub(TextSize::new(1)).unwrap_or(span.start())
}

/// Raw nodes with a source span.
pub(crate) trait Spanned {
    fn span(&self) -> TextRange;
}

impl Spanned for RawExpression {
    fn span(&self) -> TextRange {
        self.span
    }
}

impl Spanned for RawType {
    fn span(&self) -> TextRange {
        self.span
    }
}

impl Spanned for RawName {
    fn span(&self) -> TextRange {
        RawName::span(self)
    }
}

impl Spanned for RawSingleVariable {
    fn span(&self) -> TextRange {
        self.span
    }
}

impl Spanned for RawTypeParameter {
    fn span(&self) -> TextRange {
        self.span
    }
}

pub(crate) struct Converter<'b> {
    builder: TreeBuilder,
    bindings: &'b BindingTable,
    index: DeclarationIndex,
    /// Index of the next unconsumed token.
    cursor: u32,
    /// Enclosing labeled statements, innermost last.
    labels: Vec<(SmolStr, NodeId)>,
}

impl<'b> Converter<'b> {
    fn new(tokens: TokenStream, bindings: &'b BindingTable) -> Self {
        Self {
            builder: TreeBuilder::new(tokens),
            bindings,
            index: DeclarationIndex::new(),
            cursor: 0,
            labels: Vec::new(),
        }
    }

    // =========================================================================
    // TOKEN CURSOR
    // =========================================================================

    fn current(&self) -> &Token {
        self.builder.tokens().get(TokenId(self.cursor))
    }

    fn current_kind(&self) -> TokenKind {
        self.current().kind()
    }

    fn offset(&self) -> TextSize {
        self.current().range().start()
    }

    fn at_eof(&self) -> bool {
        self.current().is_eof()
    }

    /// Leaf for the current token.
    fn bump(&mut self) -> NodeId {
        let leaf = self.builder.token(TokenId(self.cursor));
        if !self.at_eof() {
            self.cursor += 1;
        }
        leaf
    }

    /// Make `offset` a token boundary if a merged `>>` token spans it.
    /// Only tokens at or after the cursor are ever split.
    fn boundary(&mut self, offset: TextSize) {
        if offset > self.offset() {
            self.builder.tokens_mut().split_at(offset);
        }
    }

    /// Leaves for all tokens starting before `until`.
    fn gap(&mut self, until: TextSize, kids: &mut Kids) {
        self.boundary(until);
        while !self.at_eof() && self.offset() < until {
            kids.push(Some(self.bump()));
        }
    }

    /// As [`Self::gap`] inside member and statement lists, where a stray `;`
    /// is an empty statement of its own.
    fn member_gap(&mut self, until: TextSize, kids: &mut Kids) {
        self.boundary(until);
        while !self.at_eof() && self.offset() < until {
            if self.current_kind() == TokenKind::SEMICOLON {
                let semi = self.bump();
                kids.push(Some(self.builder.node(TreeKind::EMPTY_STATEMENT, [Some(semi)])));
            } else {
                kids.push(Some(self.bump()));
            }
        }
    }

    /// Leaves up to, not including, the next token of `kind`.
    fn gap_until_kind(&mut self, kind: TokenKind, kids: &mut Kids) -> Result<()> {
        while self.current_kind() != kind {
            if self.at_eof() {
                return Err(ConvertError::malformed(
                    u32::from(self.offset()),
                    format!("expected {kind:?} before end of file"),
                ));
            }
            kids.push(Some(self.bump()));
        }
        Ok(())
    }

    /// Leaves up to and including the next token of `kind`. A merged `>>`
    /// is split when a single `>` is wanted.
    fn gap_through(&mut self, kind: TokenKind, kids: &mut Kids) -> Result<()> {
        loop {
            if self.at_eof() {
                return Err(ConvertError::malformed(
                    u32::from(self.offset()),
                    format!("expected {kind:?} before end of file"),
                ));
            }
            if kind == TokenKind::GT && self.current_kind().is_compound_greater() {
                let split = self.offset() + TextSize::new(1);
                self.builder.tokens_mut().split_at(split);
            }
            let found = self.current_kind() == kind;
            kids.push(Some(self.bump()));
            if found {
                return Ok(());
            }
        }
    }

    /// Bump the current token if it is of `kind`.
    fn eat(&mut self, kind: TokenKind, kids: &mut Kids) -> bool {
        if self.current_kind() == kind && !self.at_eof() {
            kids.push(Some(self.bump()));
            true
        } else {
            false
        }
    }

    /// Hand the tokens before `span` to the parent and check that the
    /// cursor now sits on the raw node's first token.
    fn align(&mut self, span: TextRange, kids: &mut Kids) -> Result<()> {
        self.gap(span.start(), kids);
        self.check_at(span.start())
    }

    /// Spans may start on the leading comments of their first token.
    fn check_at(&self, offset: TextSize) -> Result<()> {
        let token = self.current();
        let earliest = token
            .leading_trivia()
            .first()
            .map_or(token.range().start(), |t| t.range().start());
        if token.is_eof() || offset < earliest || offset > token.range().start() {
            return Err(ConvertError::malformed(
                u32::from(offset),
                "raw node does not start on a token boundary",
            ));
        }
        Ok(())
    }

    /// Remaining tokens of `span` become leaves of the node being built.
    fn close(&mut self, span: TextRange, kids: &mut Kids) {
        self.gap(span.end(), kids);
    }

    /// Create the node and append it to the parent's children.
    fn finish(&mut self, kind: TreeKind, children: Kids, kids: &mut Kids) -> NodeId {
        let id = self.builder.node(kind, children);
        kids.push(Some(id));
        id
    }

    /// Items separated by punctuation, wrapped in a `LIST` node. The gap
    /// before the first item goes to the parent.
    fn list<T: Spanned>(
        &mut self,
        items: &[T],
        kids: &mut Kids,
        mut each: impl FnMut(&mut Self, &T, &mut Kids) -> Result<NodeId>,
    ) -> Result<Option<NodeId>> {
        let Some(first) = items.first() else {
            return Ok(None);
        };
        self.align(first.span(), kids)?;
        let mut list = Kids::new();
        for item in items {
            self.align(item.span(), &mut list)?;
            each(self, item, &mut list)?;
        }
        Ok(Some(self.finish(TreeKind::LIST, list, kids)))
    }

    // =========================================================================
    // BINDINGS AND THE INDEX
    // =========================================================================

    fn is_symbol_binding(&self, binding: BindingId) -> bool {
        matches!(
            self.bindings.get(binding),
            Some(RawBinding::Type(_) | RawBinding::Method(_) | RawBinding::Variable(_))
        )
    }

    fn declare(&mut self, binding: Option<BindingId>, node: NodeId) {
        if let Some(binding) = binding.filter(|b| self.is_symbol_binding(*b)) {
            let key = IndexKey::Binding(self.bindings.declaration_of(binding));
            self.index.declare(key, node);
        }
    }

    fn add_usage(&mut self, binding: Option<BindingId>, node: NodeId) {
        if let Some(binding) = binding.filter(|b| self.is_symbol_binding(*b)) {
            let key = IndexKey::Binding(self.bindings.declaration_of(binding));
            self.index.add_usage(key, node);
        }
    }

    /// Drop a call's method binding when it cannot accept `arguments`
    /// actual arguments; a mismatched best guess is worse than none.
    fn checked_call(&self, binding: Option<BindingId>, arguments: usize) -> Option<BindingId> {
        let binding = binding?;
        match self.bindings.method_binding(binding) {
            Some(method) if !method.accepts_arity(arguments) => {
                debug!(
                    method = %method.key,
                    arguments,
                    parameters = method.parameter_types.len(),
                    "discarding method binding with mismatched arity"
                );
                None
            }
            _ => Some(binding),
        }
    }

    // =========================================================================
    // NAMES
    // =========================================================================

    /// `IDENTIFIER` for a single name token.
    fn identifier(
        &mut self,
        name: &RawSimpleName,
        binding: Option<BindingId>,
        kids: &mut Kids,
    ) -> Result<NodeId> {
        self.align(name.span, kids)?;
        let mut ident = vec![Some(self.bump())];
        self.close(name.span, &mut ident);
        let id = self.finish(TreeKind::IDENTIFIER, ident, kids);
        self.builder.set_binding(id, binding);
        self.builder.set_type_binding(id, name.type_binding);
        Ok(id)
    }

    /// Name of a declaration; the declaring node is indexed by the caller.
    fn declared_name(
        &mut self,
        name: &RawSimpleName,
        binding: Option<BindingId>,
        kids: &mut Kids,
    ) -> Result<NodeId> {
        self.identifier(name, binding.or(name.binding), kids)
    }

    /// A name referring to something declared elsewhere.
    fn reference(
        &mut self,
        name: &RawSimpleName,
        binding: Option<BindingId>,
        kids: &mut Kids,
    ) -> Result<NodeId> {
        let id = self.identifier(name, binding, kids)?;
        self.add_usage(binding, id);
        Ok(id)
    }

    /// Possibly qualified name: nested `MEMBER_SELECT`s ending in identifiers.
    fn name(&mut self, name: &RawName, kids: &mut Kids) -> Result<NodeId> {
        match name {
            RawName::Simple(simple) => self.reference(simple, simple.binding, kids),
            RawName::Qualified {
                span,
                qualifier,
                name: last,
            } => {
                self.align(*span, kids)?;
                let mut select = Kids::new();
                self.name(qualifier, &mut select)?;
                self.reference(last, last.binding, &mut select)?;
                self.close(*span, &mut select);
                let id = self.finish(TreeKind::MEMBER_SELECT, select, kids);
                self.builder.set_binding(id, last.binding);
                self.builder.set_type_binding(id, last.type_binding);
                Ok(id)
            }
        }
    }

    /// `this` or `super` as an identifier, optionally qualified.
    fn keyword_identifier(
        &mut self,
        qualifier: Option<&RawName>,
        keyword: TokenKind,
        kids: &mut Kids,
    ) -> Result<NodeId> {
        let Some(qualifier) = qualifier else {
            self.gap_until_kind(keyword, kids)?;
            let leaf = self.bump();
            return Ok(self.finish(TreeKind::IDENTIFIER, vec![Some(leaf)], kids));
        };
        let mut select = Kids::new();
        self.name(qualifier, &mut select)?;
        self.gap_until_kind(keyword, &mut select)?;
        let leaf = self.bump();
        self.finish(TreeKind::IDENTIFIER, vec![Some(leaf)], &mut select);
        Ok(self.finish(TreeKind::MEMBER_SELECT, select, kids))
    }

    // =========================================================================
    // MODIFIERS AND ANNOTATIONS
    // =========================================================================

    /// `MODIFIERS`, token-less when empty.
    fn modifiers(&mut self, modifiers: &[RawModifier], kids: &mut Kids) -> Result<NodeId> {
        let mut list = Kids::new();
        for modifier in modifiers {
            match modifier {
                RawModifier::Keyword { span, keyword } => {
                    self.align(*span, &mut list)?;
                    if keyword == "non-sealed" {
                        self.builder.tokens_mut().merge(*span, TokenKind::IDENT);
                    }
                    list.push(Some(self.bump()));
                    self.close(*span, &mut list);
                }
                RawModifier::Annotation(annotation) => {
                    self.annotation(annotation, &mut list)?;
                }
            }
        }
        Ok(self.finish(TreeKind::MODIFIERS, list, kids))
    }

    pub(crate) fn annotation(&mut self, annotation: &RawAnnotation, kids: &mut Kids) -> Result<NodeId> {
        self.align(annotation.span, kids)?;
        let mut node = Kids::new();
        if !self.eat(TokenKind::AT, &mut node) {
            return Err(ConvertError::malformed(
                u32::from(self.offset()),
                "annotation does not start with '@'",
            ));
        }
        self.name(&annotation.name, &mut node)?;

        match &annotation.kind {
            RawAnnotationKind::Marker => {}
            RawAnnotationKind::SingleMember(value) => {
                let mut arguments = Kids::new();
                self.expression(value, &mut arguments)?;
                self.gap_through(TokenKind::R_PAREN, &mut arguments)?;
                self.finish(TreeKind::ARGUMENTS, arguments, &mut node);
            }
            RawAnnotationKind::Normal(pairs) => {
                let mut arguments = Kids::new();
                for pair in pairs {
                    self.align(pair.span, &mut arguments)?;
                    let mut assignment = Kids::new();
                    self.reference(&pair.name, pair.name.binding, &mut assignment)?;
                    self.expression(&pair.value, &mut assignment)?;
                    self.close(pair.span, &mut assignment);
                    self.finish(TreeKind::ASSIGNMENT, assignment, &mut arguments);
                }
                self.gap_through(TokenKind::R_PAREN, &mut arguments)?;
                self.finish(TreeKind::ARGUMENTS, arguments, &mut node);
            }
        }

        self.close(annotation.span, &mut node);
        let id = self.finish(TreeKind::ANNOTATION, node, kids);
        self.builder.set_binding(id, annotation.binding);
        let annotation_type = annotation
            .binding
            .and_then(|b| self.bindings.annotation_binding(b))
            .map(|b| b.annotation_type);
        self.builder.set_type_binding(id, annotation_type);
        Ok(id)
    }

    // =========================================================================
    // COMPILATION UNIT
    // =========================================================================

    fn compilation_unit(&mut self, unit: &RawCompilationUnit) -> Result<NodeId> {
        let mut kids = Kids::new();

        if let Some(package) = &unit.package {
            self.member_gap(package.span.start(), &mut kids);
            self.package(package, &mut kids)?;
        }
        for import in &unit.imports {
            self.member_gap(import.span.start(), &mut kids);
            self.import(import, &mut kids)?;
        }
        if let Some(module) = &unit.module {
            self.member_gap(module.span.start(), &mut kids);
            self.module(module, &mut kids)?;
        }
        for declaration in &unit.types {
            self.member_gap(declaration.span.start(), &mut kids);
            self.type_declaration(declaration, &mut kids)?;
        }

        let eof = self.builder.tokens().get(self.builder.tokens().eof()).range().start();
        self.member_gap(eof, &mut kids);
        kids.push(Some(self.bump()));

        trace!(children = kids.len(), "compilation unit children");
        Ok(self.builder.node(TreeKind::COMPILATION_UNIT, kids))
    }

    fn package(&mut self, package: &RawPackageDeclaration, kids: &mut Kids) -> Result<NodeId> {
        self.align(package.span, kids)?;
        let mut node = Kids::new();
        for annotation in &package.annotations {
            self.annotation(annotation, &mut node)?;
        }
        self.align(package.name.span(), &mut node)?;
        self.name(&package.name, &mut node)?;
        self.close(package.span, &mut node);
        let id = self.finish(TreeKind::PACKAGE, node, kids);
        self.builder.set_binding(id, package.name.last().binding);
        Ok(id)
    }

    fn import(&mut self, import: &RawImport, kids: &mut Kids) -> Result<NodeId> {
        self.align(import.span, kids)?;
        let mut node = Kids::new();
        self.align(import.name.span(), &mut node)?;
        self.name(&import.name, &mut node)?;
        self.close(import.span, &mut node);
        let id = self.finish(TreeKind::IMPORT, node, kids);
        self.builder.set_binding(id, import.name.last().binding);
        Ok(id)
    }
}
