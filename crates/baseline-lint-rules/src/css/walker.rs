//! Tolerant walk over CSS text using `cssparser`.
//!
//! The text is read with the rule-body grammar: declarations, nested
//! qualified rules and at-rules may appear side by side. This covers the
//! bodies of CSS-in-markup templates (`color: red; &:hover { ... }`) as well
//! as full stylesheets. Items that fail to parse are skipped.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, Token,
};
use tracing::trace;

/// Declarations and rule preludes collected from one CSS text, in document order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CssOutline {
    /// Lowercased property names of every parsed declaration.
    pub properties: Vec<String>,
    /// Prelude text of every qualified rule and at-rule.
    ///
    /// At-rule preludes such as `selector(:has(a))` in `@supports` can name
    /// selectors too.
    pub preludes: Vec<String>,
}

/// Parses `text` and returns its outline.
#[must_use]
pub fn outline(text: &str) -> CssOutline {
    let mut outline = CssOutline::default();
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    walk_body(&mut parser, &mut outline);
    outline
}

fn walk_body<'i>(input: &mut Parser<'i, '_>, outline: &mut CssOutline) {
    let mut walker = BodyWalker { outline };
    for item in RuleBodyParser::new(input, &mut walker) {
        if let Err((error, slice)) = item {
            trace!("Skipping unparseable CSS {:?}: {:?}", slice, error.kind);
        }
    }
}

struct BodyWalker<'m> {
    outline: &'m mut CssOutline,
}

impl<'i> DeclarationParser<'i> for BodyWalker<'_> {
    type Declaration = ();
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<(), ParseError<'i, ()>> {
        // A `{}` block means this is a nested rule such as `div:has(> p) {}`
        let mut has_block = false;
        while let Ok(token) = input.next() {
            if matches!(token, Token::CurlyBracketBlock) {
                has_block = true;
            }
        }
        if has_block {
            return Err(input.new_custom_error(()));
        }

        self.outline.properties.push(name.to_ascii_lowercase());
        Ok(())
    }
}

impl<'i> QualifiedRuleParser<'i> for BodyWalker<'_> {
    type Prelude = String;
    type QualifiedRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<String, ParseError<'i, ()>> {
        let start = input.position();
        while input.next().is_ok() {}
        Ok(input.slice_from(start).trim().to_string())
    }

    fn parse_block<'t>(
        &mut self,
        prelude: String,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<(), ParseError<'i, ()>> {
        self.outline.preludes.push(prelude);
        walk_body(input, self.outline);
        Ok(())
    }
}

impl<'i> AtRuleParser<'i> for BodyWalker<'_> {
    type Prelude = String;
    type AtRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        _name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<String, ParseError<'i, ()>> {
        let start = input.position();
        while input.next().is_ok() {}
        Ok(input.slice_from(start).trim().to_string())
    }

    fn rule_without_block(&mut self, prelude: String, _start: &ParserState) -> Result<(), ()> {
        self.outline.preludes.push(prelude);
        Ok(())
    }

    fn parse_block<'t>(
        &mut self,
        prelude: String,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<(), ParseError<'i, ()>> {
        self.outline.preludes.push(prelude);
        walk_body(input, self.outline);
        Ok(())
    }
}

impl<'i> RuleBodyItemParser<'i, (), ()> for BodyWalker<'_> {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_declarations() {
        let outline = outline("color: red; Background-Color: blue;");
        assert_eq!(outline.properties, vec!["color", "background-color"]);
        assert!(outline.preludes.is_empty());
    }

    #[test]
    fn nested_rule_is_not_a_declaration() {
        let outline = outline("div:has(> span) { color: red; }");
        assert_eq!(outline.properties, vec!["color"]);
        assert_eq!(outline.preludes, vec!["div:has(> span)"]);
    }

    #[test]
    fn walks_full_stylesheets() {
        let outline = outline(
            ".card { aspect-ratio: 16 / 9 }\n@media (min-width: 40em) { .card:is(.a, .b) { gap: 1rem } }",
        );
        assert_eq!(outline.properties, vec!["aspect-ratio", "gap"]);
        assert_eq!(
            outline.preludes,
            vec![".card", "(min-width: 40em)", ".card:is(.a, .b)"]
        );
    }

    #[test]
    fn skips_garbage_and_keeps_going() {
        let outline = outline("color: red; @import 'x.css'; width: 1px");
        assert_eq!(outline.properties, vec!["color", "width"]);
        assert_eq!(outline.preludes, vec!["'x.css'"]);
    }

    #[test]
    fn empty_text() {
        assert_eq!(outline(""), CssOutline::default());
    }
}
