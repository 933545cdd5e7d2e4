//! Fixture symbols and the standard algebraic rule set, used by the tests and as the REPL's
//! prelude.

use crate::{
    chain::ReasoningChain,
    consts::EQ,
    expr::Expr,
    rule::{Rule, RuleSet},
    symbol::Symbol,
};

/// The atoms the standard rules and the tests are written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atoms {
    pub x: Expr,
    pub y: Expr,
    pub z: Expr,
    pub a: Expr,
    pub b: Expr,
    pub c: Expr,
    pub zero: Expr,
    pub one: Expr,
}

impl Atoms {
    pub fn new() -> Self {
        Self {
            x: Expr::atom("x"),
            y: Expr::atom("y"),
            z: Expr::atom("z"),
            a: Expr::atom("a"),
            b: Expr::atom("b"),
            c: Expr::atom("c"),
            zero: Expr::atom("0"),
            one: Expr::atom("1"),
        }
    }
}

impl Default for Atoms {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the symbols of the given atoms, for use as a rule's quantified variables. Non-atoms
/// are skipped.
pub fn quantified(atoms: &[&Expr]) -> Vec<Symbol> {
    atoms.iter().filter_map(|atom| atom.as_atom()).cloned().collect()
}

/// Neutral elements, commutativity, associativity and distributivity of `+` and `⋅`, plus
/// cancellation of a common right factor.
pub fn standard_rules() -> RuleSet {
    let Atoms { x, y, z, c, zero, one, .. } = Atoms::new();
    let xy = quantified(&[&x, &y]);
    let xyz = quantified(&[&x, &y, &z]);

    RuleSet::new()
        .with(Rule::simple("neutral", quantified(&[&x]), (&x * &one).equals(x.clone())))
        .with(Rule::simple("neutral", quantified(&[&x]), (&one * &x).equals(x.clone())))
        .with(Rule::simple("neutral", quantified(&[&x]), (&x + &zero).equals(x.clone())))
        .with(Rule::simple("neutral", quantified(&[&x]), (&zero + &x).equals(x.clone())))
        .with(Rule::simple("commutativity", xy.clone(), (&x * &y).equals(&y * &x)))
        .with(Rule::simple(
            "associativity",
            xyz.clone(),
            ((&x * &y) * z.clone()).equals(x.clone() * (&y * &z)),
        ))
        .with(Rule::simple("commutativity", xy.clone(), (&x + &y).equals(&y + &x)))
        .with(Rule::simple(
            "associativity",
            xyz.clone(),
            ((&x + &y) + z.clone()).equals(x.clone() + (&y + &z)),
        ))
        .with(Rule::simple(
            "distributivity",
            xyz.clone(),
            ((&x + &y) * z.clone()).equals((&x * &z) + (&y * &z)),
        ))
        .with(Rule::simple(
            "distributivity",
            xyz,
            (z.clone() * (&x + &y)).equals((&z * &x) + (&z * &y)),
        ))
        .with(Rule::implication(
            "cancellation",
            quantified(&[&x, &y, &c]),
            (&x * &c).equals(&y * &c),
            [x.clone().equals(y)],
        ))
}

/// The chain `((x ⋅ y) ⋅ z) = (x ⋅ (y ⋅ z))` over the standard rules.
pub fn sample_chain() -> ReasoningChain {
    let Atoms { x, y, z, .. } = Atoms::new();
    let mut chain = ReasoningChain::new(standard_rules(), (&x * &y) * z.clone());
    chain.add(EQ.clone(), x * (y * z));
    chain
}
