//! Rule trait for defining lint rules.

use crate::context::FileContext;
use crate::types::{Severity, Violation};
use swc_ecma_ast::Program;

/// A per-file lint rule based on `swc` AST analysis.
///
/// Rules receive the parsed program and typically run an
/// [`swc_ecma_visit::Visit`] implementation over it. A rule never keeps
/// state between files.
///
/// # Example
///
/// ```ignore
/// use baseline_lint_core::{FileContext, Rule, Violation};
/// use swc_ecma_visit::VisitWith;
///
/// pub struct NoEval;
///
/// impl Rule for NoEval {
///     fn name(&self) -> &'static str { "no-eval" }
///     fn code(&self) -> &'static str { "BL900" }
///
///     fn check(&self, ctx: &FileContext, program: &swc_ecma_ast::Program) -> Vec<Violation> {
///         let mut visitor = EvalVisitor::new(ctx);
///         program.visit_with(&mut visitor);
///         visitor.violations
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "no-nonbaseline-api").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "BL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Checks a single file and returns any violations found.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Context about the file being checked
    /// * `program` - The parsed syntax tree of the file
    fn check(&self, ctx: &FileContext, program: &Program) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::FeatureOracle;
    use crate::source::parse_source;
    use std::path::Path;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn check(&self, ctx: &FileContext, program: &Program) -> Vec<Violation> {
            let span = match program {
                Program::Module(m) => m.span,
                Program::Script(s) => s.span,
            };
            vec![Violation::new(
                self.code(),
                self.name(),
                self.default_severity(),
                ctx.location_for(span),
                "Test violation",
            )]
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.code(), "TEST001");
        assert_eq!(rule.default_severity(), Severity::Warning);
    }

    #[test]
    fn test_rule_runs_on_parsed_source() {
        let path = Path::new("app.js");
        let source = "let a = 1;";
        let parsed = parse_source(path, source).unwrap();
        let oracle = FeatureOracle::default();
        let ctx = FileContext::new(path, source, Path::new("."), parsed.file_start, &oracle);

        let violations = TestRule.check(&ctx, &parsed.program);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 1);
        assert_eq!(violations[0].location.column, 1);
    }
}
