//! One-way pattern matching of expressions and relations.
//!
//! A pattern is matched against a ground expression using a [`Bindings`] table, which starts
//! with every quantified variable of the pattern unbound. Only quantified variables can bind;
//! every other symbol in the pattern must match exactly. A variable that is already bound
//! never re-binds, not even to a structurally equal value.

use crate::{expr::Expr, relation::Relation, symbol::Symbol};
use std::collections::HashMap;
use tracing::trace;

/// Maps each quantified variable of a pattern to its bound value, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    table: HashMap<Symbol, Option<Expr>>,
}

impl Bindings {
    /// Creates a table in which each of the given symbols is quantified and unbound.
    pub fn new<'a>(quantified: impl IntoIterator<Item = &'a Symbol>) -> Self {
        Self {
            table: quantified.into_iter().map(|symbol| (symbol.clone(), None)).collect(),
        }
    }

    /// Returns true if the symbol is quantified in this table, bound or not.
    pub fn is_quantified(&self, symbol: &Symbol) -> bool {
        self.table.contains_key(symbol)
    }

    /// Returns the value bound to the symbol, if it is quantified and bound.
    pub fn get(&self, symbol: &Symbol) -> Option<&Expr> {
        self.table.get(symbol)?.as_ref()
    }

    pub fn is_bound(&self, symbol: &Symbol) -> bool {
        self.get(symbol).is_some()
    }

    /// Binds an unbound quantified symbol. Returns false if the symbol is not quantified, or if
    /// it is already bound.
    pub fn bind(&mut self, symbol: &Symbol, value: Expr) -> bool {
        match self.table.get_mut(symbol) {
            Some(slot @ None) => {
                *slot = Some(value);
                true
            },
            _ => false,
        }
    }

    /// Returns every bound symbol with its value, in no particular order.
    pub fn bound(&self) -> impl Iterator<Item = (&Symbol, &Expr)> {
        self.table
            .iter()
            .filter_map(|(symbol, value)| value.as_ref().map(|value| (symbol, value)))
    }
}

/// Matches `pattern` against `ground`, binding quantified variables of the pattern along the
/// way. Returns the ground expression on success.
///
/// On failure, the bindings table may be left partially updated; callers use a fresh table for
/// every attempt.
pub fn unify(pattern: &Expr, ground: &Expr, bindings: &mut Bindings) -> Option<Expr> {
    matches(pattern, ground, bindings).then(|| ground.clone())
}

fn matches(pattern: &Expr, ground: &Expr, bindings: &mut Bindings) -> bool {
    match (pattern, ground) {
        // an atom matches itself without binding, even if it is quantified
        (Expr::Atom(p), Expr::Atom(g)) if p == g => true,
        (Expr::Atom(p), _) if bindings.is_quantified(p) => bindings.bind(p, ground.clone()),
        (Expr::Atom(_), _) => false,
        (Expr::Unary(p, p_operand), Expr::Unary(g, g_operand)) => {
            p == g && matches(p_operand, g_operand, bindings)
        },
        (Expr::Binary(p, p_lhs, p_rhs), Expr::Binary(g, g_lhs, g_rhs)) => {
            p == g
                && matches(p_lhs, g_lhs, bindings)
                && matches(p_rhs, g_rhs, bindings)
        },
        _ => false,
    }
}

/// Matches the `template` relation against the `source` relation.
///
/// The relation symbols and the `reversed` flags must be equal. `negated` asks for a match
/// against the negation of the source: the match requires the two `negated` flags to differ
/// exactly when `negated` is true. Both sides must then unify under the same table.
///
/// Returns the source relation on success.
pub fn unify_relation(
    template: &Relation,
    source: &Relation,
    negated: bool,
    bindings: &mut Bindings,
) -> Option<Relation> {
    if template.symbol != source.symbol
        || template.reversed != source.reversed
        || (template.negated ^ source.negated) != negated
    {
        return None;
    }

    unify(&template.lhs, &source.lhs, bindings)?;
    unify(&template.rhs, &source.rhs, bindings)?;
    trace!(%template, %source, negated, "unified relation");
    Some(source.clone())
}

impl Expr {
    /// Replaces every atom bound in `bindings` with its value. The replacement is simultaneous:
    /// atoms inside inserted values are left alone.
    pub fn substitute(&self, bindings: &Bindings) -> Expr {
        match self {
            Expr::Atom(symbol) => bindings.get(symbol).unwrap_or(self).clone(),
            _ => self.map(|child| child.substitute(bindings)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use crate::consts::{EQ, LT, PRODUCT, SUM};
    use super::*;

    fn atoms() -> (Expr, Expr, Expr, Expr) {
        (Expr::atom("x"), Expr::atom("y"), Expr::atom("a"), Expr::atom("b"))
    }

    fn symbols(exprs: &[&Expr]) -> Vec<Symbol> {
        exprs.iter().filter_map(|e| e.as_atom()).cloned().collect()
    }

    #[test]
    fn binds_quantified_atom() {
        let (x, y, a, b) = atoms();
        let quantified = symbols(&[&x, &y]);
        let mut bindings = Bindings::new(&quantified);
        let ground = (&a + &b) * a.clone();

        assert_eq!(unify(&(&x * &y), &ground, &mut bindings), Some(ground));
        assert_eq!(bindings.get(x.as_atom().unwrap()), Some(&(&a + &b)));
        assert_eq!(bindings.get(y.as_atom().unwrap()), Some(&a));
    }

    #[test]
    fn bound_variable_does_not_rebind() {
        let (x, _, a, _) = atoms();
        let quantified = symbols(&[&x]);
        let mut bindings = Bindings::new(&quantified);

        // x binds to a on the left, then would need to re-bind to the equal value a on the right
        assert_eq!(unify(&(&x * &x), &(&a * &a), &mut bindings), None);
    }

    #[test]
    fn quantified_atom_matches_itself_without_binding() {
        let (x, ..) = atoms();
        let quantified = symbols(&[&x]);
        let mut bindings = Bindings::new(&quantified);

        assert_eq!(unify(&x, &x, &mut bindings), Some(x.clone()));
        assert!(!bindings.is_bound(x.as_atom().unwrap()));
    }

    #[test]
    fn constants_must_match() {
        let (x, y, a, _) = atoms();
        let quantified = symbols(&[&x]);
        let mut bindings = Bindings::new(&quantified);

        assert_eq!(unify(&(&x + &y), &(&a + &a), &mut bindings), None);
        assert_eq!(unify(&(&x + &a), &(&a * &a), &mut Bindings::new(&quantified)), None);
    }

    #[test]
    fn relation_polarity() {
        let (x, y, a, b) = atoms();
        let quantified = symbols(&[&x, &y]);
        let template = x.clone().less_than(y.clone());
        let source = a.clone().at_least(b.clone());

        // `a ≥ b` is a negated `a < b`, so it only matches when asking for the negation
        assert_eq!(unify_relation(&template, &source, false, &mut Bindings::new(&quantified)), None);
        assert_eq!(
            unify_relation(&template, &source, true, &mut Bindings::new(&quantified)),
            Some(source.clone()),
        );

        // `a ≤ b` is reversed, so it never matches a forward template
        let reversed = a.at_most(b);
        assert_eq!(unify_relation(&template, &reversed, true, &mut Bindings::new(&quantified)), None);
    }

    #[test]
    fn substitution_is_simultaneous() {
        let (x, y, ..) = atoms();
        let quantified = symbols(&[&x, &y]);
        let mut bindings = Bindings::new(&quantified);
        bindings.bind(x.as_atom().unwrap(), y.clone());
        bindings.bind(y.as_atom().unwrap(), x.clone());

        assert_eq!((&x * &y).substitute(&bindings), &y * &x);
    }

    fn arb_ground() -> impl Strategy<Value = Expr> {
        let leaf = prop_oneof![
            Just(Expr::atom("a")),
            Just(Expr::atom("b")),
            Just(Expr::atom("0")),
            Just(Expr::atom("1")),
        ];
        leaf.prop_recursive(4, 32, 2, |inner| {
            prop_oneof![
                inner.clone().prop_map(|e| -e),
                (inner.clone(), inner.clone()).prop_map(|(l, r)| Expr::binary(SUM.clone(), l, r)),
                (inner.clone(), inner).prop_map(|(l, r)| Expr::binary(PRODUCT.clone(), l, r)),
            ]
        })
    }

    /// Replaces the subtrees picked by `mask` with fresh variables, each used once.
    fn abstract_expr(
        expr: &Expr,
        mask: &mut impl Iterator<Item = bool>,
        vars: &mut Vec<Symbol>,
    ) -> Expr {
        if mask.next().unwrap_or(false) {
            let var = Symbol::new(format!("v{}", vars.len()));
            vars.push(var.clone());
            return Expr::Atom(var);
        }
        expr.map(|child| abstract_expr(child, mask, vars))
    }

    proptest! {
        #[test]
        fn unify_with_nothing_quantified_is_equality(p in arb_ground(), g in arb_ground()) {
            let mut bindings = Bindings::default();
            prop_assert_eq!(unify(&p, &g, &mut bindings).is_some(), p == g);
        }

        #[test]
        fn linear_pattern_reproduces_ground(
            ground in arb_ground(),
            mask in proptest::collection::vec(any::<bool>(), 0..32),
        ) {
            let mut vars = Vec::new();
            let pattern = abstract_expr(&ground, &mut mask.into_iter(), &mut vars);
            let mut bindings = Bindings::new(&vars);

            prop_assert_eq!(unify(&pattern, &ground, &mut bindings), Some(ground.clone()));
            prop_assert_eq!(pattern.substitute(&bindings), ground);
        }

        #[test]
        fn relation_unify_respects_symbols(lhs in arb_ground(), rhs in arb_ground()) {
            let eq = Relation::new(EQ.clone(), lhs.clone(), rhs.clone());
            let lt = Relation::new(LT.clone(), lhs, rhs);
            prop_assert!(unify_relation(&eq, &lt, false, &mut Bindings::default()).is_none());
            prop_assert!(unify_relation(&eq, &eq, false, &mut Bindings::default()).is_some());
        }
    }
}
