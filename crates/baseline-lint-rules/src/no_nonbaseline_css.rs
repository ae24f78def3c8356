//! Rule to flag CSS properties and selectors that are not yet Baseline.
//!
//! CSS is picked up from four places in script files:
//!
//! 1. Templates tagged with a CSS helper: `css`, `styled`, `createGlobalStyle`,
//!    `keyframes`, `injectGlobal` (plus `extra_tags`)
//! 2. `styled` factories: `styled.div`, `styled(Button)`, `styled.a.attrs(...)`
//! 3. `el.style.cssText = '...'` assignments with a string or plain template
//! 4. JSX `style={{ ... }}` objects, key by key
//!
//! Template interpolations are dropped before the text is classified.
//!
//! # Configuration
//!
//! - `extra_tags`: additional helper names treated like `css`
//!
//! # Suppression
//!
//! - `// baseline-lint: allow(no-nonbaseline-css)` comment

use crate::css::{check_css_text, CssFinding};
use baseline_lint_core::utils::camel_to_kebab;
use baseline_lint_core::{FileContext, MessageTemplate, Rule, RuleConfig, Severity, Violation};
use swc_common::{Span, Spanned};
use swc_ecma_ast::{
    AssignExpr, AssignTarget, Callee, Expr, JSXAttr, JSXAttrName, JSXAttrValue, JSXExpr, Lit,
    MemberProp, ObjectLit, Program, Prop, PropName, PropOrSpread, SimpleAssignTarget, TaggedTpl,
    Tpl,
};
use swc_ecma_visit::{Visit, VisitWith};

/// Rule code for no-nonbaseline-css.
pub const CODE: &str = "BL002";

/// Rule name for no-nonbaseline-css.
pub const NAME: &str = "no-nonbaseline-css";

/// Message reported for a non-Baseline CSS property.
pub const PROPERTY_MESSAGE: MessageTemplate = MessageTemplate::new(
    "nonBaselineCssProperty",
    "CSS property \"{{property}}\" is not supported in Baseline browsers. Consider fallback or polyfill.",
);

/// Message reported for a non-Baseline CSS selector.
pub const SELECTOR_MESSAGE: MessageTemplate = MessageTemplate::new(
    "nonBaselineCssSelector",
    "CSS selector \"{{selector}}\" is not supported in Baseline browsers. Consider fallback or polyfill.",
);

/// Template tags whose contents are CSS.
pub const CSS_TAGS: &[&str] = &["styled", "css", "createGlobalStyle", "keyframes", "injectGlobal"];

/// Root name of styled-component factories.
const STYLED: &str = "styled";

/// Flags non-Baseline CSS embedded in script files.
#[derive(Debug, Clone)]
pub struct NoNonBaselineCss {
    /// Tag names treated like `css` on top of [`CSS_TAGS`].
    pub extra_tags: Vec<String>,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoNonBaselineCss {
    fn default() -> Self {
        Self::new()
    }
}

impl NoNonBaselineCss {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            extra_tags: Vec::new(),
            severity: Severity::Warning,
        }
    }

    /// Creates the rule from its `[rules.no-nonbaseline-css]` section.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        Self::new().extra_tags(config.get_str_array("extra_tags"))
    }

    /// Adds helper tag names.
    #[must_use]
    pub fn extra_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn is_css_tag(&self, name: &str) -> bool {
        CSS_TAGS.contains(&name) || self.extra_tags.iter().any(|t| t == name)
    }

    /// Returns true if `tag` marks its template as CSS.
    fn is_css_tag_expr(&self, tag: &Expr) -> bool {
        match tag {
            Expr::Ident(ident) => self.is_css_tag(ident.sym.as_str()),
            _ => is_styled_factory(tag),
        }
    }
}

/// Matches `styled.div`, `styled(Button)` and chains built on them.
fn is_styled_factory(expr: &Expr) -> bool {
    match expr {
        Expr::Ident(ident) => ident.sym.as_str() == STYLED,
        Expr::Member(member) => is_styled_factory(&member.obj),
        Expr::Call(call) => match &call.callee {
            Callee::Expr(callee) => is_styled_factory(callee),
            _ => false,
        },
        Expr::Paren(paren) => is_styled_factory(&paren.expr),
        _ => false,
    }
}

/// Joins the raw text of a template, dropping interpolations.
fn template_text(tpl: &Tpl) -> String {
    tpl.quasis.iter().map(|q| q.raw.as_str()).collect()
}

impl Rule for NoNonBaselineCss {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags CSS properties and selectors that are not Baseline"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, program: &Program) -> Vec<Violation> {
        let mut visitor = CssVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        program.visit_with(&mut visitor);
        visitor.violations
    }
}

struct CssVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a NoNonBaselineCss,
    violations: Vec<Violation>,
}

impl CssVisitor<'_> {
    fn report_property(&mut self, span: Span, property: &str) {
        self.violations.push(Violation::from_template(
            CODE,
            NAME,
            self.rule.severity,
            self.ctx.location_for(span),
            &PROPERTY_MESSAGE,
            &[("property", property)],
        ));
    }

    fn report_selector(&mut self, span: Span, selector: &str) {
        self.violations.push(Violation::from_template(
            CODE,
            NAME,
            self.rule.severity,
            self.ctx.location_for(span),
            &SELECTOR_MESSAGE,
            &[("selector", selector)],
        ));
    }

    /// Classifies `text` and anchors every finding at `span`.
    fn check_text(&mut self, span: Span, text: &str) {
        for finding in check_css_text(text, self.ctx.oracle) {
            match finding {
                CssFinding::Property(property) => self.report_property(span, &property),
                CssFinding::Selector(selector) => self.report_selector(span, selector),
            }
        }
    }

    fn check_style_object(&mut self, object: &ObjectLit) {
        for prop in &object.props {
            let PropOrSpread::Prop(prop) = prop else {
                continue;
            };
            let key = match prop.as_ref() {
                Prop::Shorthand(ident) => Some(ident.sym.as_str()),
                Prop::KeyValue(kv) => match &kv.key {
                    PropName::Ident(ident) => Some(ident.sym.as_str()),
                    PropName::Str(s) => s.value.as_str(),
                    _ => None,
                },
                _ => None,
            };
            let Some(key) = key else {
                continue;
            };

            let property = camel_to_kebab(key);
            if self.ctx.oracle.is_non_baseline_css_property(&property) {
                self.report_property(prop.span(), &property);
            }
        }
    }
}

impl Visit for CssVisitor<'_> {
    fn visit_tagged_tpl(&mut self, node: &TaggedTpl) {
        if self.rule.is_css_tag_expr(&node.tag) {
            self.check_text(node.span, &template_text(&node.tpl));
        }
        node.visit_children_with(self);
    }

    fn visit_assign_expr(&mut self, node: &AssignExpr) {
        if let AssignTarget::Simple(SimpleAssignTarget::Member(member)) = &node.left {
            let is_css_text =
                matches!(&member.prop, MemberProp::Ident(name) if name.sym.as_str() == "cssText");
            if is_css_text {
                match node.right.as_ref() {
                    Expr::Lit(Lit::Str(s)) => {
                        if let Some(text) = s.value.as_str() {
                            self.check_text(node.span, text);
                        }
                    }
                    Expr::Tpl(tpl) => self.check_text(node.span, &template_text(tpl)),
                    _ => {}
                }
            }
        }
        node.visit_children_with(self);
    }

    fn visit_jsx_attr(&mut self, node: &JSXAttr) {
        let is_style = matches!(&node.name, JSXAttrName::Ident(name) if name.sym.as_str() == "style");
        if is_style {
            if let Some(JSXAttrValue::JSXExprContainer(container)) = &node.value {
                if let JSXExpr::Expr(expr) = &container.expr {
                    if let Expr::Object(object) = expr.as_ref() {
                        self.check_style_object(object);
                    }
                }
            }
        }
        node.visit_children_with(self);
    }
}
