use std::{fmt, sync::Arc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An atomic, named token, used for variables, constants, operators and relations alike.
///
/// Relation symbols can carry alternate renderings for when the sides of the relation are
/// swapped, or when the relation is negated. For example, the `<` symbol renders as `>` when
/// reversed, `≥` when negated, and `≤` when both reversed and negated.
///
/// Symbols are compared by value: two symbols with the same name and the same alternate
/// renderings are the same symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Symbol {
    /// The forward rendering of the symbol, which is also its name.
    name: Arc<str>,

    /// The rendering when the sides of a relation are swapped.
    backward: Option<Arc<str>>,

    /// The rendering when a relation is negated.
    forward_negated: Option<Arc<str>>,

    /// The rendering when a relation is both reversed and negated.
    backward_negated: Option<Arc<str>>,
}

impl Symbol {
    /// Creates a symbol with no alternate renderings.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            backward: None,
            forward_negated: None,
            backward_negated: None,
        }
    }

    /// Creates a relation symbol with all of its alternate renderings.
    pub fn relation(name: &str, backward: &str, forward_negated: &str, backward_negated: &str) -> Self {
        Self {
            name: name.into(),
            backward: Some(backward.into()),
            forward_negated: Some(forward_negated.into()),
            backward_negated: Some(backward_negated.into()),
        }
    }

    /// Returns the name of the symbol.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the text to render for this symbol in a relation with the given modifiers.
    ///
    /// Missing alternates fall back to the forward form; a missing reversed-and-negated
    /// rendering falls back to the negated one first.
    pub fn text(&self, reversed: bool, negated: bool) -> &str {
        let alternate = match (reversed, negated) {
            (false, false) => None,
            (true, false) => self.backward.as_deref(),
            (false, true) => self.forward_negated.as_deref(),
            (true, true) => self.backward_negated.as_deref().or(self.forward_negated.as_deref()),
        };
        alternate.unwrap_or(self.name())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn relation_renderings() {
        let lt = Symbol::relation("<", ">", "≥", "≤");
        assert_eq!(lt.text(false, false), "<");
        assert_eq!(lt.text(true, false), ">");
        assert_eq!(lt.text(false, true), "≥");
        assert_eq!(lt.text(true, true), "≤");
    }

    #[test]
    fn missing_alternates_fall_back() {
        let plus = Symbol::new("+");
        assert_eq!(plus.text(true, true), "+");
        assert_eq!(plus.text(false, true), "+");
    }

    #[test]
    fn compared_by_value() {
        assert_eq!(Symbol::new("x"), Symbol::new(String::from("x")));
        assert_ne!(Symbol::new("="), Symbol::relation("=", "=", "≠", "≠"));
    }
}
