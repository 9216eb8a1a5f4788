//! `module-info.java` declarations.

use super::{closing_brace, Converter, Kids, Result};
use crate::frontend::{RawDirective, RawDirectiveKind, RawModuleDeclaration};
use crate::syntax::{NodeId, TreeKind};

impl Converter<'_> {
    pub(super) fn module(&mut self, module: &RawModuleDeclaration, kids: &mut Kids) -> Result<NodeId> {
        self.align(module.span, kids)?;
        let mut node = Kids::new();
        for annotation in &module.annotations {
            self.annotation(annotation, &mut node)?;
        }
        self.name(&module.name, &mut node)?;
        for directive in &module.directives {
            self.directive(directive, &mut node)?;
        }
        self.gap(closing_brace(module.span), &mut node);
        self.close(module.span, &mut node);
        Ok(self.finish(TreeKind::MODULE, node, kids))
    }

    /// Directive keywords and modifiers are contextual, so they stay leaves.
    fn directive(&mut self, directive: &RawDirective, kids: &mut Kids) -> Result<NodeId> {
        self.align(directive.span, kids)?;
        let mut node = Kids::new();
        let kind = match &directive.kind {
            RawDirectiveKind::Requires { module } => {
                self.name(module, &mut node)?;
                TreeKind::REQUIRES_DIRECTIVE
            }
            RawDirectiveKind::Exports { package, to } => {
                self.name(package, &mut node)?;
                self.list(to, &mut node, |c, n, k| c.name(n, k))?;
                TreeKind::EXPORTS_DIRECTIVE
            }
            RawDirectiveKind::Opens { package, to } => {
                self.name(package, &mut node)?;
                self.list(to, &mut node, |c, n, k| c.name(n, k))?;
                TreeKind::OPENS_DIRECTIVE
            }
            RawDirectiveKind::Uses { service } => {
                self.name(service, &mut node)?;
                TreeKind::USES_DIRECTIVE
            }
            RawDirectiveKind::Provides {
                service,
                implementations,
            } => {
                self.name(service, &mut node)?;
                self.list(implementations, &mut node, |c, n, k| c.name(n, k))?;
                TreeKind::PROVIDES_DIRECTIVE
            }
        };
        self.close(directive.span, &mut node);
        Ok(self.finish(kind, node, kids))
    }
}
