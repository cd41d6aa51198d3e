//! Read-only AST pass that locates candidate sites.
//!
//! The collector never decides whether a string is UI text. It only records
//! where a string sits, which attribute or element it belongs to, and the
//! byte range a replacement would cover. Subtrees that must never be
//! rewritten are not visited at all.

use std::collections::HashSet;

use swc_common::{Span, Spanned};
use swc_ecma_ast::{
    CallExpr, Callee, CondExpr, Expr, JSXAttr, JSXAttrName, JSXAttrValue, JSXElement,
    JSXElementChild, JSXElementName, JSXExpr, JSXExprContainer, JSXFragment, JSXText,
    KeyValueProp, Lit, MemberProp, PropName, Str, TaggedTpl, Tpl,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::{
    core::{
        data::{AttrContext, CandidateSite, Interpolation, ManualReason, SiteKind},
        parsers::jsx::ParsedSource,
    },
    utils::{JSX_WHITESPACE, collapse_whitespace},
};

/// Object property whose string value is treated as UI text.
const TEXT_PROPERTY: &str = "text";

/// Lookup option that carries the fallback text.
const DEFAULT_VALUE_OPTION: &str = "defaultValue";
/// Binding used when an interpolation would shadow [`DEFAULT_VALUE_OPTION`].
const RENAMED_BINDING: &str = "value";

/// Names the collector needs from the configuration.
pub struct CollectOptions<'a> {
    pub translatable_attributes: &'a [String],
    pub rich_text_components: &'a [String],
    pub skipped_tags: &'a [String],
    pub lookup_function: &'a str,
}

pub struct SiteCollector<'a> {
    parsed: &'a ParsedSource,
    options: &'a CollectOptions<'a>,
    sites: Vec<CandidateSite>,
    tag_stack: Vec<String>,
    /// Allow-listed attribute whose expression is being visited.
    attr: Option<AttrContext>,
    /// Inside the expression of an attribute that is not allow-listed.
    in_foreign_attr: bool,
    /// Nesting depth of rich-text components.
    rich_depth: usize,
    /// Start offsets of literals that sit on either side of an element.
    split_literals: HashSet<usize>,
}

impl<'a> SiteCollector<'a> {
    pub fn new(parsed: &'a ParsedSource, options: &'a CollectOptions<'a>) -> Self {
        Self {
            parsed,
            options,
            sites: Vec::new(),
            tag_stack: Vec::new(),
            attr: None,
            in_foreign_attr: false,
            rich_depth: 0,
            split_literals: HashSet::new(),
        }
    }

    pub fn collect(mut self) -> Vec<CandidateSite> {
        let parsed = self.parsed;
        parsed.module.visit_with(&mut self);
        self.sites
    }

    fn suppressed(&self) -> bool {
        self.in_foreign_attr || self.rich_depth > 0
    }

    fn site(&self, kind: SiteKind, text: impl Into<String>, span: Span) -> CandidateSite {
        let mut site = CandidateSite::new(
            kind,
            text,
            self.parsed.offset(span.lo),
            self.parsed.offset(span.hi),
        );
        site.attr = self.attr.clone();
        site.tag = self.tag_stack.last().cloned();
        site.depth = self.tag_stack.len();
        site.line = self.parsed.line(span.lo);
        site
    }

    fn push_str(&mut self, kind: SiteKind, s: &Str) {
        if self.suppressed() {
            return;
        }
        let Some(value) = s.value.as_str() else {
            return;
        };
        let site = self.site(kind, value, s.span);
        self.sites.push(site);
    }

    fn source_of(&self, span: Span) -> &str {
        let text = self.parsed.text();
        &text[self.parsed.offset(span.lo)..self.parsed.offset(span.hi)]
    }

    fn is_lookup_or_console(&self, callee: &Callee) -> bool {
        let Callee::Expr(expr) = callee else {
            return false;
        };
        match unwrap_paren(expr) {
            Expr::Ident(ident) => &*ident.sym == self.options.lookup_function,
            Expr::Member(member) => {
                let is_lookup = matches!(
                    &member.prop,
                    MemberProp::Ident(prop) if &*prop.sym == self.options.lookup_function
                );
                let is_console =
                    matches!(unwrap_paren(&member.obj), Expr::Ident(obj) if obj.sym == "console");
                is_lookup || is_console
            }
            _ => false,
        }
    }

    /// Marks `{'a'}<b>x</b>{'c'}` literal pairs before the children are visited.
    fn mark_split_literals(&mut self, children: &[JSXElementChild]) {
        let significant: Vec<&JSXElementChild> = children
            .iter()
            .filter(|child| {
                !matches!(child, JSXElementChild::JSXText(text) if text.value.trim().is_empty())
            })
            .collect();

        for window in significant.windows(3) {
            if let [
                JSXElementChild::JSXExprContainer(before),
                JSXElementChild::JSXElement(_),
                JSXElementChild::JSXExprContainer(after),
            ] = window
                && let (Some(first), Some(second)) = (container_str(before), container_str(after))
            {
                self.split_literals.insert(self.parsed.offset(first.span.lo));
                self.split_literals.insert(self.parsed.offset(second.span.lo));
            }
        }
    }

    fn visit_jsx_children(&mut self, children: &[JSXElementChild]) {
        self.mark_split_literals(children);
        for child in children {
            child.visit_with(self);
        }
    }

    fn template_site(&self, node: &Tpl) -> Option<CandidateSite> {
        let mut chunks = Vec::with_capacity(node.quasis.len());
        for quasi in &node.quasis {
            let cooked = quasi.cooked.as_ref()?.as_str()?;
            chunks.push(cooked.to_string());
        }

        if node.exprs.is_empty() {
            return None;
        }

        if let ([expr], [head, tail]) = (node.exprs.as_slice(), chunks.as_slice())
            && let Some(mut name) = interpolation_name(expr)
        {
            if name == DEFAULT_VALUE_OPTION {
                name = RENAMED_BINDING.to_string();
            }
            let text = format!("{head}{{{{{name}}}}}{tail}");
            let mut site = self.site(SiteKind::TemplateSimple, text, node.span);
            site.interpolations.push(Interpolation {
                name,
                source: self.source_of(expr.span()).to_string(),
            });
            site.chunks = chunks;
            return Some(site);
        }

        let mut text = String::new();
        let mut interpolations = Vec::with_capacity(node.exprs.len());
        for (idx, chunk) in chunks.iter().enumerate() {
            text.push_str(chunk);
            if let Some(expr) = node.exprs.get(idx) {
                let name = format!("value{idx}");
                text.push_str(&format!("{{{{{name}}}}}"));
                interpolations.push(Interpolation {
                    name,
                    source: self.source_of(expr.span()).to_string(),
                });
            }
        }
        let mut site = self.site(SiteKind::TemplateComplex, text, node.span);
        site.interpolations = interpolations;
        site.chunks = chunks;
        Some(site)
    }
}

impl Visit for SiteCollector<'_> {
    fn visit_jsx_element(&mut self, node: &JSXElement) {
        let name = element_name(&node.opening.name);

        // Nested JSX starts a fresh context, even inside an attribute expression.
        let prev_attr = self.attr.take();
        let prev_foreign = std::mem::replace(&mut self.in_foreign_attr, false);
        let is_rich = self.options.rich_text_components.contains(&name);
        if is_rich {
            self.rich_depth += 1;
        }
        self.tag_stack.push(name.clone());

        node.opening.visit_with(self);
        if !self.options.skipped_tags.contains(&name) {
            self.visit_jsx_children(&node.children);
        }

        self.tag_stack.pop();
        if is_rich {
            self.rich_depth -= 1;
        }
        self.attr = prev_attr;
        self.in_foreign_attr = prev_foreign;
    }

    fn visit_jsx_fragment(&mut self, node: &JSXFragment) {
        let prev_attr = self.attr.take();
        let prev_foreign = std::mem::replace(&mut self.in_foreign_attr, false);

        self.visit_jsx_children(&node.children);

        self.attr = prev_attr;
        self.in_foreign_attr = prev_foreign;
    }

    fn visit_jsx_attr(&mut self, node: &JSXAttr) {
        let name = match &node.name {
            JSXAttrName::Ident(ident) => ident.sym.to_string(),
            JSXAttrName::JSXNamespacedName(ns) => format!("{}:{}", ns.ns.sym, ns.name.sym),
        };
        let allowed = self.options.translatable_attributes.contains(&name);

        if let Some(JSXAttrValue::Str(s)) = &node.value {
            if allowed && !self.suppressed() {
                let prev_attr = self.attr.replace(AttrContext::new(&name));
                self.push_str(SiteKind::JsxAttribute, s);
                self.attr = prev_attr;
            }
            return;
        }

        let prev_attr = self.attr.take();
        let prev_foreign = self.in_foreign_attr;
        if allowed {
            self.attr = Some(AttrContext::new(name));
        } else {
            self.in_foreign_attr = true;
        }

        node.value.visit_with(self);

        self.attr = prev_attr;
        self.in_foreign_attr = prev_foreign;
    }

    fn visit_jsx_text(&mut self, node: &JSXText) {
        if self.suppressed() {
            return;
        }
        // `value` has entities decoded; the raw source only locates the range.
        let text = collapse_whitespace(&node.value);
        if text.is_empty() {
            return;
        }

        let raw = self.source_of(node.span);
        let trimmed = raw.trim_matches(JSX_WHITESPACE);
        let leading = (raw.len() - raw.trim_start_matches(JSX_WHITESPACE).len()) as u32;
        let span = Span::new(
            node.span.lo + swc_common::BytePos(leading),
            node.span.lo + swc_common::BytePos(leading + trimmed.len() as u32),
        );
        let site = self.site(SiteKind::JsxText, text, span);
        self.sites.push(site);
    }

    fn visit_jsx_expr_container(&mut self, node: &JSXExprContainer) {
        let Some(s) = container_str(node) else {
            node.visit_children_with(self);
            return;
        };
        if self.suppressed() {
            return;
        }
        let Some(value) = s.value.as_str() else {
            return;
        };

        let mut site = self.site(SiteKind::JsxExpressionLiteral, value, s.span);
        if self.split_literals.contains(&site.start) {
            site.ambiguity = Some(ManualReason::SplitAroundTag);
        }
        self.sites.push(site);
    }

    fn visit_cond_expr(&mut self, node: &CondExpr) {
        node.test.visit_with(self);
        for branch in [&node.cons, &node.alt] {
            match unwrap_paren(branch) {
                Expr::Lit(Lit::Str(s)) => self.push_str(SiteKind::TernaryBranch, s),
                _ => branch.visit_with(self),
            }
        }
    }

    fn visit_key_value_prop(&mut self, node: &KeyValueProp) {
        let is_text_key = match &node.key {
            PropName::Ident(ident) => ident.sym == TEXT_PROPERTY,
            PropName::Str(s) => s.value.as_str() == Some(TEXT_PROPERTY),
            _ => false,
        };
        if is_text_key && let Expr::Lit(Lit::Str(s)) = unwrap_paren(&node.value) {
            self.push_str(SiteKind::ObjectText, s);
            return;
        }
        node.visit_children_with(self);
    }

    fn visit_tpl(&mut self, node: &Tpl) {
        if !self.suppressed()
            && let Some(site) = self.template_site(node)
        {
            self.sites.push(site);
        }
        node.visit_children_with(self);
    }

    fn visit_tagged_tpl(&mut self, node: &TaggedTpl) {
        // The literal chunks belong to the tag function.
        node.tag.visit_with(self);
        for expr in &node.tpl.exprs {
            expr.visit_with(self);
        }
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if self.is_lookup_or_console(&node.callee) {
            return;
        }
        node.visit_children_with(self);
    }
}

fn unwrap_paren(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_paren(&paren.expr),
        other => other,
    }
}

fn container_str(node: &JSXExprContainer) -> Option<&Str> {
    match &node.expr {
        JSXExpr::Expr(expr) => match unwrap_paren(expr) {
            Expr::Lit(Lit::Str(s)) => Some(s),
            _ => None,
        },
        JSXExpr::JSXEmptyExpr(_) => None,
    }
}

fn element_name(name: &JSXElementName) -> String {
    match name {
        JSXElementName::Ident(ident) => ident.sym.to_string(),
        JSXElementName::JSXMemberExpr(member) => member.prop.sym.to_string(),
        JSXElementName::JSXNamespacedName(ns) => format!("{}:{}", ns.ns.sym, ns.name.sym),
    }
}

/// `name` for `${name}`, `count` for `${user.stats.count}`.
fn interpolation_name(expr: &Expr) -> Option<String> {
    match unwrap_paren(expr) {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::Member(member) => match &member.prop {
            MemberProp::Ident(prop) => Some(prop.sym.to_string()),
            _ => None,
        },
        _ => None,
    }
}
