//! The standard symbols shared by the parser front end, the sample rule sets and the tests.

use once_cell::sync::Lazy;
use super::symbol::Symbol;

/// Multiplication.
pub static PRODUCT: Lazy<Symbol> = Lazy::new(|| Symbol::new("⋅"));

/// Addition.
pub static SUM: Lazy<Symbol> = Lazy::new(|| Symbol::new("+"));

/// Subtraction and unary negation.
pub static MINUS: Lazy<Symbol> = Lazy::new(|| Symbol::new("-"));

pub static DIVISION: Lazy<Symbol> = Lazy::new(|| Symbol::new("/"));

/// Strict ordering. `a > b` is `a < b` reversed, `a ≥ b` is `a < b` negated.
pub static LT: Lazy<Symbol> = Lazy::new(|| Symbol::relation("<", ">", "≥", "≤"));

/// Equality. `a ≠ b` is `a = b` negated.
pub static EQ: Lazy<Symbol> = Lazy::new(|| Symbol::relation("=", "=", "≠", "≠"));

/// The atom standing in for "the expression this was derived from" on the left side of a
/// [`ChainPart`](crate::relation::ChainPart) printed as a full relation.
pub static PLACEHOLDER: Lazy<Symbol> = Lazy::new(|| Symbol::new("__"));
