use crate::{
    expr::Expr,
    relation::{ChainPart, Relation},
};
use std::fmt;
use super::{Direction, Rule};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered collection of rules. Order matters: suggestions are produced in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Appends a rule, returning the set for chaining.
    pub fn with(mut self, rule: Rule) -> Self {
        self.push(rule);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the rule with the given name, if any.
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name() == name)
    }

    /// Returns every way a simple rule of this set rewrites `expr`, trying each rule forward
    /// then backward, in declaration order.
    pub fn suggestions(&self, expr: &Expr) -> Vec<ChainPart> {
        self.rules
            .iter()
            .filter(|rule| rule.is_simple())
            .flat_map(|rule| {
                [Direction::Forward, Direction::Backward]
                    .into_iter()
                    .filter_map(move |direction| rule.apply(expr, direction))
            })
            .collect()
    }

    /// Returns the same suggestions as [`RuleSet::suggestions`], as full relations with `expr`
    /// on the left.
    pub fn suggestions_as_relations(&self, expr: &Expr) -> Vec<Relation> {
        self.suggestions(expr)
            .into_iter()
            .map(|part| part.to_relation(expr.clone()))
            .collect()
    }

    /// Specializes every implication of this set with the fact `assumption`. See
    /// [`Rule::reduced`].
    ///
    /// The result holds only the reduced rules, in order; rules that `assumption` does not
    /// touch (and every simple rule) are dropped.
    pub fn reduce(&self, assumption: &Relation) -> RuleSet {
        let rules = self.rules
            .iter()
            .flat_map(|rule| rule.reduced(assumption))
            .collect::<RuleSet>();
        debug!(%assumption, before = self.len(), after = rules.len(), "reduced rule set");
        rules
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self { rules: iter.into_iter().collect() }
    }
}

impl Extend<Rule> for RuleSet {
    fn extend<I: IntoIterator<Item = Rule>>(&mut self, iter: I) {
        self.rules.extend(iter);
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", rule)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::samples::{quantified, standard_rules, Atoms};
    use super::*;

    #[test]
    fn suggestions_in_declaration_order() {
        let Atoms { x, y, z, .. } = Atoms::new();
        let rules = RuleSet::new()
            .with(Rule::simple("comm", quantified(&[&x, &y]), (&x * &y).equals(&y * &x)))
            .with(Rule::simple(
                "assoc",
                quantified(&[&x, &y, &z]),
                ((&x * &y) * z.clone()).equals(x.clone() * (&y * &z)),
            ));

        let beginning = (&x * &y) * z.clone();
        let exprs = rules
            .suggestions(&beginning)
            .into_iter()
            .map(|part| part.expr)
            .collect::<Vec<_>>();
        assert_eq!(exprs, vec![
            z.clone() * (&x * &y),
            z.clone() * (&x * &y),
            x.clone() * (&y * &z),
        ]);
    }

    #[test]
    fn suggestions_as_relations_put_expr_on_left() {
        let Atoms { a, b, .. } = Atoms::new();
        let expr = &a + &b;
        let relations = standard_rules().suggestions_as_relations(&expr);
        assert!(!relations.is_empty());
        assert!(relations.iter().all(|relation| relation.lhs == expr));
        assert!(relations.contains(&expr.clone().equals(&b + &a)));
    }

    #[test]
    fn reduce_is_monotonic() {
        let Atoms { a, c, .. } = Atoms::new();
        let rules = standard_rules();
        let reduced = rules.reduce(&a.equals(c));

        assert_eq!(reduced.len(), 1);
        for rule in &reduced {
            let original = rules.get(rule.name()).unwrap();
            assert!(rule.summands().len() < original.summands().len());
            assert!(rule.quantified().len() <= original.quantified().len());
        }
    }

    #[test]
    fn reduce_drops_simple_rules() {
        let Atoms { a, b, .. } = Atoms::new();
        assert!(standard_rules().reduce(&a.less_than(b)).is_empty());
    }

    #[test]
    fn display_one_rule_per_line() {
        let Atoms { x, y, .. } = Atoms::new();
        let rules = RuleSet::new()
            .with(Rule::simple("comm", quantified(&[&x, &y]), (&x + &y).equals(&y + &x)))
            .with(Rule::implication("trivial", quantified(&[&x]), x.clone().equals(x.clone()), [x.clone().less_than(x.clone())]));
        assert_eq!(rules.to_string(), "(x + y) = (y + x)\nx = x ∨ x ≥ x");
    }
}
