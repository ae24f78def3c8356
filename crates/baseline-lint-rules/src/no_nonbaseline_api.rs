//! Rule to flag web APIs that are not yet Baseline.
//!
//! # Rationale
//!
//! Calling an API that only some browser engines ship breaks the page for
//! everyone else unless a fallback or polyfill is in place.
//!
//! # Detection
//!
//! Every non-computed property access is resolved to a dotted feature
//! identifier and looked up in the [`FeatureOracle`](baseline_lint_core::FeatureOracle):
//!
//! - `A.B` with a plain identifier root resolves to `A.B`
//! - `A.B.C` resolves to `A.B.C`
//! - longer chains are not resolved at the outer access; their inner
//!   accesses are still checked on their own
//!
//! Chains rooted at a global alias (`window`, `globalThis`) drop the alias
//! first, so `window.navigator.share` resolves to `navigator.share`.
//!
//! # Configuration
//!
//! - `global_aliases`: root names treated as the global object
//!   (default: `["window", "globalThis"]`)
//!
//! # Suppression
//!
//! - `// baseline-lint: allow(no-nonbaseline-api)` comment

use baseline_lint_core::{
    FeatureId, FileContext, MessageTemplate, Rule, RuleConfig, Severity, Violation,
};
use swc_ecma_ast::{Expr, MemberExpr, MemberProp, OptChainBase, Program};
use swc_ecma_visit::{Visit, VisitWith};
use tracing::trace;

/// Rule code for no-nonbaseline-api.
pub const CODE: &str = "BL001";

/// Rule name for no-nonbaseline-api.
pub const NAME: &str = "no-nonbaseline-api";

/// Message reported for a non-Baseline API.
pub const MESSAGE: MessageTemplate = MessageTemplate::new(
    "nonBaselineApi",
    "\"{{feature}}\" is not supported in Baseline browsers. Consider fallback or polyfill.",
);

/// Root names treated as the global object by default.
pub const DEFAULT_GLOBAL_ALIASES: &[&str] = &["window", "globalThis"];

/// Longest access chain resolved at a single node.
pub const MAX_CHAIN_SEGMENTS: usize = 3;

/// Flags property accesses that name non-Baseline web APIs.
#[derive(Debug, Clone)]
pub struct NoNonBaselineApi {
    /// Root names stripped before classification.
    pub global_aliases: Vec<String>,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoNonBaselineApi {
    fn default() -> Self {
        Self::new()
    }
}

impl NoNonBaselineApi {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            global_aliases: DEFAULT_GLOBAL_ALIASES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            severity: Severity::Warning,
        }
    }

    /// Creates the rule from its `[rules.no-nonbaseline-api]` section.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        let mut rule = Self::new();
        let aliases = config.get_str_array("global_aliases");
        if !aliases.is_empty() {
            rule.global_aliases = aliases;
        }
        rule
    }

    /// Replaces the global alias list.
    #[must_use]
    pub fn global_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.global_aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Resolves a property access to a feature identifier.
    ///
    /// Returns `None` for computed or dynamic accesses and for chains outside
    /// the supported length once global aliases are dropped.
    #[must_use]
    pub fn resolve(&self, node: &MemberExpr) -> Option<FeatureId> {
        let mut segments = chain_segments(node)?;

        let aliases = segments
            .iter()
            .take_while(|s| self.global_aliases.iter().any(|a| a == *s))
            .count();
        segments.drain(..aliases);

        if (2..=MAX_CHAIN_SEGMENTS).contains(&segments.len()) {
            Some(FeatureId::from_segments(&segments))
        } else {
            None
        }
    }
}

/// Collects the static segments of an access chain, root first.
fn chain_segments(node: &MemberExpr) -> Option<Vec<&str>> {
    let MemberProp::Ident(prop) = &node.prop else {
        return None;
    };

    let mut segments = match unwrap_object(&node.obj)? {
        ChainRoot::Name(name) => vec![name],
        ChainRoot::Member(inner) => chain_segments(inner)?,
    };
    segments.push(prop.sym.as_str());
    Some(segments)
}

enum ChainRoot<'a> {
    Name(&'a str),
    Member(&'a MemberExpr),
}

fn unwrap_object(expr: &Expr) -> Option<ChainRoot<'_>> {
    match expr {
        Expr::Ident(ident) => Some(ChainRoot::Name(ident.sym.as_str())),
        Expr::Member(member) => Some(ChainRoot::Member(member)),
        Expr::OptChain(chain) => match &*chain.base {
            OptChainBase::Member(member) => Some(ChainRoot::Member(member)),
            OptChainBase::Call(_) => None,
        },
        Expr::Paren(paren) => unwrap_object(&paren.expr),
        _ => None,
    }
}

impl Rule for NoNonBaselineApi {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags web API accesses that are not Baseline"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, program: &Program) -> Vec<Violation> {
        let mut visitor = ApiVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        program.visit_with(&mut visitor);
        visitor.violations
    }
}

struct ApiVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a NoNonBaselineApi,
    violations: Vec<Violation>,
}

impl Visit for ApiVisitor<'_> {
    fn visit_member_expr(&mut self, node: &MemberExpr) {
        if let Some(feature) = self.rule.resolve(node) {
            if self.ctx.oracle.is_non_baseline(&feature) {
                trace!("Non-Baseline API {} in {}", feature, self.ctx.path.display());
                self.violations.push(Violation::from_template(
                    CODE,
                    NAME,
                    self.rule.severity,
                    self.ctx.location_for(node.span),
                    &MESSAGE,
                    &[("feature", feature.as_str())],
                ));
            }
        }

        node.visit_children_with(self);
    }
}
