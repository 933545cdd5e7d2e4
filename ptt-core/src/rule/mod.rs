mod set;

use crate::{
    expr::Expr,
    relation::{ChainPart, Relation},
    symbol::Symbol,
    unify::{unify, unify_relation, Bindings},
};
use std::{collections::HashSet, fmt};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use set::RuleSet;

/// The direction to apply a simple rule in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Match the left side of the rule, produce its right side.
    Forward,

    /// Match the right side of the rule, produce its left side.
    Backward,
}

/// A named, universally quantified disjunction of relations.
///
/// A rule with exactly one summand is a **simple** rule, usable directly as a rewrite. An
/// implication `corollary ⟸ c₁, …, cₙ` is stored as the disjunction `corollary ∨ ¬c₁ ∨ … ∨ ¬cₙ`;
/// it becomes usable once [`Rule::reduced`] has discharged all of its conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rule {
    name: String,
    quantified: Vec<Symbol>,
    summands: Vec<Relation>,
}

impl Rule {
    /// Creates a rule from its summands. Duplicate quantified symbols are kept once.
    pub fn new(
        name: impl Into<String>,
        quantified: impl IntoIterator<Item = Symbol>,
        summands: Vec<Relation>,
    ) -> Self {
        let mut seen = HashSet::new();
        let quantified = quantified
            .into_iter()
            .filter(|symbol| seen.insert(symbol.clone()))
            .collect();
        Self { name: name.into(), quantified, summands }
    }

    /// Creates a simple rule.
    pub fn simple(
        name: impl Into<String>,
        quantified: impl IntoIterator<Item = Symbol>,
        relation: Relation,
    ) -> Self {
        Self::new(name, quantified, vec![relation])
    }

    /// Creates the rule `corollary ⟸ conditions`, storing each condition negated.
    pub fn implication(
        name: impl Into<String>,
        quantified: impl IntoIterator<Item = Symbol>,
        corollary: Relation,
        conditions: impl IntoIterator<Item = Relation>,
    ) -> Self {
        let summands = std::iter::once(corollary)
            .chain(conditions.into_iter().map(|condition| !condition))
            .collect();
        Self::new(name, quantified, summands)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantified(&self) -> &[Symbol] {
        &self.quantified
    }

    pub fn summands(&self) -> &[Relation] {
        &self.summands
    }

    /// Returns true if the rule has exactly one summand.
    pub fn is_simple(&self) -> bool {
        self.summands.len() == 1
    }

    /// Applies a simple rule to `expr` in the given direction, producing the chain part that
    /// relates `expr` to its rewrite. Returns [`None`] if the rule is not simple or does not
    /// match.
    pub fn apply(&self, expr: &Expr, direction: Direction) -> Option<ChainPart> {
        let [relation] = self.summands.as_slice() else {
            return None;
        };
        let (from, to) = match direction {
            Direction::Forward => (&relation.lhs, &relation.rhs),
            Direction::Backward => (&relation.rhs, &relation.lhs),
        };

        let mut bindings = Bindings::new(&self.quantified);
        unify(from, expr, &mut bindings)?;
        let part = ChainPart {
            symbol: relation.symbol.clone(),
            expr: to.substitute(&bindings),
            reversed: relation.reversed,
            negated: relation.negated,
        };
        trace!(rule = %self.name, ?direction, %expr, %part, "applied rule");
        Some(part)
    }

    /// Specializes this rule with the fact `assumption`.
    ///
    /// Every summand that `assumption` refutes (i.e. the summand unifies with the negation of
    /// `assumption`) yields one reduced rule: the remaining summands with the summand's bindings
    /// substituted in, quantified over the symbols left unbound. Simple rules never reduce.
    ///
    /// A remaining quantified symbol whose name also appears in a bound value is renamed, so that
    /// substituting the bindings cannot capture it.
    pub fn reduced(&self, assumption: &Relation) -> Vec<Rule> {
        if self.summands.len() < 2 {
            return Vec::new();
        }

        self.summands
            .iter()
            .enumerate()
            .filter_map(|(index, summand)| {
                let mut bindings = Bindings::new(&self.quantified);
                unify_relation(summand, assumption, true, &mut bindings)?;
                let rule = self.discharge(index, bindings);
                trace!(rule = %self.name, %assumption, reduced = %rule, "reduced rule");
                Some(rule)
            })
            .collect()
    }

    /// Removes the summand at `index`, substituting `bindings` into the rest.
    fn discharge(&self, index: usize, mut bindings: Bindings) -> Rule {
        let captured = bindings
            .bound()
            .flat_map(|(_, value)| value.symbols())
            .map(|symbol| symbol.name().to_owned())
            .collect::<HashSet<_>>();
        let mut taken = self.summands
            .iter()
            .flat_map(|summand| summand.lhs.symbols().chain(summand.rhs.symbols()))
            .map(|symbol| symbol.name().to_owned())
            .chain(captured.iter().cloned())
            .collect::<HashSet<_>>();

        let mut quantified = Vec::new();
        for symbol in &self.quantified {
            if bindings.is_bound(symbol) {
                continue;
            }
            if captured.contains(symbol.name()) {
                let fresh = fresh_symbol(symbol, &mut taken);
                bindings.bind(symbol, Expr::Atom(fresh.clone()));
                quantified.push(fresh);
            } else {
                quantified.push(symbol.clone());
            }
        }

        let summands = self.summands
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, summand)| summand.substitute(&bindings))
            .collect();
        Rule { name: self.name.clone(), quantified, summands }
    }
}

/// Picks a name for `symbol` not in `taken`: its uppercase form if that differs and is free,
/// otherwise the name with primes appended.
fn fresh_symbol(symbol: &Symbol, taken: &mut HashSet<String>) -> Symbol {
    let upper = symbol.name().to_uppercase();
    let mut candidate = if upper != symbol.name() && !taken.contains(&upper) {
        upper
    } else {
        format!("{}'", symbol.name())
    };
    while taken.contains(&candidate) {
        candidate.push('\'');
    }
    taken.insert(candidate.clone());
    Symbol::new(candidate)
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, summand) in self.summands.iter().enumerate() {
            if i > 0 {
                write!(f, " ∨ ")?;
            }
            write!(f, "{}", summand)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use crate::samples::{quantified, Atoms};
    use super::*;

    #[test]
    fn implication_negates_conditions() {
        let Atoms { x, y, c, .. } = Atoms::new();
        let rule = Rule::implication(
            "cancel",
            quantified(&[&x, &y, &c]),
            (&x * &c).equals(&y * &c),
            [x.clone().equals(y.clone())],
        );
        assert!(!rule.is_simple());
        assert_eq!(rule.to_string(), "(x ⋅ c) = (y ⋅ c) ∨ x ≠ y");
    }

    #[test]
    fn duplicate_quantifiers_collapse() {
        let Atoms { x, .. } = Atoms::new();
        let rule = Rule::simple("id", quantified(&[&x, &x]), x.clone().equals(x.clone()));
        assert_eq!(rule.quantified().len(), 1);
    }

    #[test]
    fn apply_both_directions() {
        let Atoms { x, y, a, b, .. } = Atoms::new();
        let commutativity = Rule::simple("comm", quantified(&[&x, &y]), (&x * &y).equals(&y * &x));

        let forward = commutativity.apply(&(&a * &b), Direction::Forward).unwrap();
        assert_eq!(forward.expr, &b * &a);
        let backward = commutativity.apply(&(&a * &b), Direction::Backward).unwrap();
        assert_eq!(backward.expr, &b * &a);
        assert_eq!(commutativity.apply(&(&a + &b), Direction::Forward), None);
    }

    #[test]
    fn apply_keeps_relation_flags() {
        let Atoms { x, one, .. } = Atoms::new();
        let rule = Rule::simple("lt", quantified(&[&x]), x.clone().greater_than(&x - &one));
        let part = rule.apply(&Expr::atom("q"), Direction::Forward).unwrap();
        assert!(part.reversed && !part.negated);
        assert_eq!(part.to_string(), "__ > (q - 1)");
    }

    #[test]
    fn implications_do_not_apply() {
        let Atoms { x, y, c, a, b, .. } = Atoms::new();
        let rule = Rule::implication(
            "cancel",
            quantified(&[&x, &y, &c]),
            (&x * &c).equals(&y * &c),
            [x.clone().equals(y.clone())],
        );
        assert_eq!(rule.apply(&(&a * &b), Direction::Forward), None);
    }

    #[test]
    fn reduce_renames_captured_quantifier() {
        let Atoms { x, y, c, a, b, .. } = Atoms::new();
        let rule = Rule::implication(
            "cancel",
            quantified(&[&x, &y, &c]),
            (&x * &c).equals(&y * &c),
            [x.clone().equals(y.clone())],
        );

        let reduced = rule.reduced(&a.clone().equals(c.clone()));
        assert_eq!(reduced.len(), 1);
        let reduced = &reduced[0];
        let upper_c = Expr::atom("C");
        assert_eq!(reduced.name(), "cancel");
        assert_eq!(reduced.quantified(), &[Symbol::new("C")]);
        assert_eq!(reduced.summands(), &[(&a * &upper_c).equals(&c * &upper_c)]);

        let part = reduced.apply(&(&a * &b), Direction::Forward).unwrap();
        assert_eq!(part.expr, &c * &b);
    }

    #[test]
    fn reduce_requires_refuting_polarity() {
        let Atoms { x, y, c, a, .. } = Atoms::new();
        let rule = Rule::implication(
            "cancel",
            quantified(&[&x, &y, &c]),
            (&x * &c).equals(&y * &c),
            [x.clone().equals(y.clone())],
        );

        // `a ≠ c` agrees with the stored summand `x ≠ y`, so it does not refute it
        assert_eq!(rule.reduced(&a.clone().not_equals(c.clone())), Vec::new());
    }

    #[test]
    fn fresh_names_skip_taken() {
        let mut taken = ["C", "c'"].iter().map(|s| s.to_string()).collect();
        assert_eq!(fresh_symbol(&Symbol::new("c"), &mut taken), Symbol::new("c''"));
        assert_eq!(fresh_symbol(&Symbol::new("C"), &mut taken), Symbol::new("C'"));
    }

    fn arb_ground() -> impl Strategy<Value = Expr> {
        let leaf = prop_oneof![
            Just(Expr::atom("a")),
            Just(Expr::atom("b")),
            Just(Expr::atom("0")),
        ];
        leaf.prop_recursive(3, 16, 2, |inner| {
            prop_oneof![
                (inner.clone(), inner.clone()).prop_map(|(l, r)| l + r),
                (inner.clone(), inner).prop_map(|(l, r)| l * r),
            ]
        })
    }

    proptest! {
        #[test]
        fn commutativity_round_trips(l in arb_ground(), r in arb_ground()) {
            let Atoms { x, y, .. } = Atoms::new();
            let rule = Rule::simple("comm", quantified(&[&x, &y]), (&x * &y).equals(&y * &x));
            let expr = &l * &r;

            let there = rule.apply(&expr, Direction::Forward).unwrap();
            let back = rule.apply(&there.expr, Direction::Backward).unwrap();
            prop_assert_eq!(back.expr, expr);
        }

        #[test]
        fn associativity_round_trips(a in arb_ground(), b in arb_ground(), c in arb_ground()) {
            let Atoms { x, y, z, .. } = Atoms::new();
            let rule = Rule::simple(
                "assoc",
                quantified(&[&x, &y, &z]),
                ((&x * &y) * z.clone()).equals(x.clone() * (&y * &z)),
            );
            let expr = (&a * &b) * c;

            let there = rule.apply(&expr, Direction::Forward).unwrap();
            let back = rule.apply(&there.expr, Direction::Backward).unwrap();
            prop_assert_eq!(back.expr, expr);
        }
    }
}
