use crate::ast::{AtRule, Node, StringLiteral, Stylesheet};
use crate::error::{RewriteError, TransformError};
use crate::rewriter::RewriteContext;

/// Walks a stylesheet and replaces the value of every string literal that
/// sits directly in the prelude of an `@import` rule.
///
/// Strings nested deeper, such as inside `url(...)` or an interpolation,
/// and strings under any other at-rule are left alone. At-rules nested in
/// blocks are visited too.
pub struct ImportVisitor<F> {
    rewrite: F,
    rewritten: usize,
}

impl<F> ImportVisitor<F>
where
    F: FnMut(&str) -> Result<String, RewriteError>,
{
    pub fn new(rewrite: F) -> Self {
        Self {
            rewrite,
            rewritten: 0,
        }
    }

    /// Number of literals whose value actually changed.
    pub fn rewritten(&self) -> usize {
        self.rewritten
    }

    pub fn visit_stylesheet(&mut self, stylesheet: &mut Stylesheet) -> Result<(), TransformError> {
        self.visit_nodes(&mut stylesheet.nodes)
    }

    fn visit_nodes(&mut self, nodes: &mut [Node]) -> Result<(), TransformError> {
        for node in nodes {
            match node {
                Node::AtRule(rule) => self.visit_at_rule(rule)?,
                Node::Group(group) => self.visit_nodes(&mut group.children)?,
                Node::StringLiteral(_) | Node::Comment(_) | Node::Text(_) => {}
            }
        }
        Ok(())
    }

    fn visit_at_rule(&mut self, rule: &mut AtRule) -> Result<(), TransformError> {
        if rule.is_import() {
            for child in &mut rule.children {
                if let Node::StringLiteral(literal) = child {
                    self.visit_import_string(literal)?;
                }
            }
        }
        self.visit_nodes(&mut rule.children)
    }

    fn visit_import_string(&mut self, literal: &mut StringLiteral) -> Result<(), TransformError> {
        let replacement =
            (self.rewrite)(&literal.value).map_err(|error| TransformError::Rewrite {
                span: literal.span,
                error,
            })?;

        if replacement != literal.value {
            log::debug!("{}: '{}' -> '{}'", literal.span, literal.value, replacement);
            literal.value = replacement;
            self.rewritten += 1;
        }
        Ok(())
    }
}

/// Rewrite every import in `stylesheet` for the file described by `ctx`.
pub fn rewrite_imports(
    stylesheet: &mut Stylesheet,
    ctx: &RewriteContext<'_>,
) -> Result<usize, TransformError> {
    let mut visitor = ImportVisitor::new(|source: &str| ctx.rewrite(source));
    visitor.visit_stylesheet(stylesheet)?;
    Ok(visitor.rewritten())
}
