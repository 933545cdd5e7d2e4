use crate::{
    parser::{
        ast::{atom::Atom, relation::Relation},
        error::{Error, ExpectedKeyword, UnclosedQuantifierList},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rule declaration.
///
/// ```text
/// rule commutativity [x, y]: x * y = y * x
/// rule cancel [x, y, c]: x * c = y * c <== x = y
/// ```
///
/// The names inside the square brackets are the quantified symbols of the rule. A declaration
/// with conditions after `<==` (or `⟸`) is an implication: the first relation holds whenever
/// every condition holds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RuleDecl {
    /// The name of the rule.
    pub name: Atom,

    /// The quantified symbols of the rule, in declaration order.
    pub quantified: Vec<Atom>,

    /// The relation the rule asserts.
    pub corollary: Relation,

    /// The conditions under which the corollary holds. Empty for a plain rewrite rule.
    pub conditions: Vec<Relation>,

    /// The region of the source code that this declaration was parsed from.
    pub span: Range<usize>,
}

impl RuleDecl {
    /// The keyword that starts a rule declaration.
    pub const KEYWORD: &'static str = "rule";
}

/// Parses the `[x, y, z]` list of quantified symbols.
fn parse_quantified(input: &mut Parser) -> Result<Vec<Atom>, Error> {
    let open = input.expect(TokenKind::OpenSquare, &[TokenKind::OpenSquare])?;

    let quantified = if input.peek_kind() == Some(TokenKind::CloseSquare) {
        Vec::new()
    } else {
        input.parse_delimited::<Atom>(TokenKind::Comma)?
    };

    if input.peek_kind() == Some(TokenKind::CloseSquare) {
        input.next_token()?;
        Ok(quantified)
    } else {
        Err(Error::new(vec![open.span], UnclosedQuantifierList))
    }
}

impl Parse for RuleDecl {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let keyword = input.next_token()?;
        if keyword.kind != TokenKind::Name || keyword.lexeme != Self::KEYWORD {
            return Err(Error::new(vec![keyword.span], ExpectedKeyword { keyword: Self::KEYWORD }));
        }

        let name = Atom::parse(input)?;
        let quantified = parse_quantified(input)?;
        input.expect(TokenKind::Colon, &[TokenKind::Colon])?;
        let corollary = Relation::parse(input)?;

        let conditions = if input.peek_kind() == Some(TokenKind::Implied) {
            input.next_token()?;
            input.parse_delimited::<Relation>(TokenKind::Comma)?
        } else {
            Vec::new()
        };

        let end = conditions.last().map_or(corollary.span.end, |condition| condition.span.end);
        Ok(Self {
            name,
            quantified,
            corollary,
            conditions,
            span: keyword.span.start..end,
        })
    }
}
