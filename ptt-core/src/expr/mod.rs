mod iter;

use crate::{
    consts::{DIVISION, EQ, LT, MINUS, PRODUCT, SUM},
    relation::Relation,
    symbol::Symbol,
};
use std::{fmt, ops};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use iter::ExprIter;

/// An immutable expression tree.
///
/// Every node is tagged with a [`Symbol`]: an atom is a bare symbol, a unary node applies an
/// operator symbol to one operand, and a binary node applies an operator symbol to two.
/// Expressions are compared structurally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A variable or constant, such as `x` or `0`.
    Atom(Symbol),

    /// An operator applied to a single operand, such as `-x`.
    Unary(Symbol, Box<Expr>),

    /// An operator applied to two operands, such as `x ⋅ y`.
    Binary(Symbol, Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Creates an atom with a plain symbol of the given name.
    pub fn atom(name: &str) -> Self {
        Self::Atom(Symbol::new(name))
    }

    pub fn unary(symbol: Symbol, operand: Expr) -> Self {
        Self::Unary(symbol, Box::new(operand))
    }

    pub fn binary(symbol: Symbol, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary(symbol, Box::new(lhs), Box::new(rhs))
    }

    /// Returns the symbol tagging this node.
    pub fn symbol(&self) -> &Symbol {
        match self {
            Self::Atom(symbol) | Self::Unary(symbol, _) | Self::Binary(symbol, _, _) => symbol,
        }
    }

    /// Returns the symbol of this expression if it is an atom.
    pub fn as_atom(&self) -> Option<&Symbol> {
        match self {
            Self::Atom(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// Returns the direct children of this node, left to right.
    pub fn children(&self) -> impl Iterator<Item = &Expr> {
        let (first, second) = match self {
            Self::Atom(_) => (None, None),
            Self::Unary(_, operand) => (Some(&**operand), None),
            Self::Binary(_, lhs, rhs) => (Some(&**lhs), Some(&**rhs)),
        };
        first.into_iter().chain(second)
    }

    /// Rebuilds this node with each direct child replaced by the output of `f`. Atoms are
    /// returned unchanged.
    pub fn map(&self, mut f: impl FnMut(&Expr) -> Expr) -> Expr {
        match self {
            Self::Atom(_) => self.clone(),
            Self::Unary(symbol, operand) => Self::unary(symbol.clone(), f(operand.as_ref())),
            Self::Binary(symbol, lhs, rhs) => {
                let lhs = f(lhs.as_ref());
                Self::binary(symbol.clone(), lhs, f(rhs.as_ref()))
            },
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns every symbol appearing in the expression, operators included, in post-order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.post_order_iter().map(Expr::symbol)
    }

    /// Returns true if the given symbol appears anywhere in the expression.
    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.symbols().any(|s| s == symbol)
    }

    /// Returns the number of nodes in the expression.
    pub fn node_count(&self) -> usize {
        self.post_order_iter().count()
    }

    fn relation(self, symbol: &Symbol, rhs: Expr, reversed: bool, negated: bool) -> Relation {
        Relation::new(symbol.clone(), self, rhs)
            .with_reversed(reversed)
            .with_negated(negated)
    }

    /// `self = rhs`
    pub fn equals(self, rhs: Expr) -> Relation {
        self.relation(&EQ, rhs, false, false)
    }

    /// `self ≠ rhs`
    pub fn not_equals(self, rhs: Expr) -> Relation {
        self.relation(&EQ, rhs, false, true)
    }

    /// `self < rhs`
    pub fn less_than(self, rhs: Expr) -> Relation {
        self.relation(&LT, rhs, false, false)
    }

    /// `self > rhs`, which is `self < rhs` reversed.
    pub fn greater_than(self, rhs: Expr) -> Relation {
        self.relation(&LT, rhs, true, false)
    }

    /// `self ≤ rhs`, which is `self < rhs` reversed and negated.
    pub fn at_most(self, rhs: Expr) -> Relation {
        self.relation(&LT, rhs, true, true)
    }

    /// `self ≥ rhs`, which is `self < rhs` negated.
    pub fn at_least(self, rhs: Expr) -> Relation {
        self.relation(&LT, rhs, false, true)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(symbol) => write!(f, "{}", symbol),
            Self::Unary(symbol, operand) => write!(f, "{}({})", symbol, operand),
            Self::Binary(symbol, lhs, rhs) => write!(f, "({} {} {})", lhs, symbol, rhs),
        }
    }
}

macro_rules! binary_op {
    ($trait:ident, $method:ident, $symbol:ident) => {
        impl ops::$trait for Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                Expr::binary($symbol.clone(), self, rhs)
            }
        }

        impl ops::$trait<&Expr> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Expr {
                Expr::binary($symbol.clone(), self.clone(), rhs.clone())
            }
        }
    };
}

binary_op!(Add, add, SUM);
binary_op!(Sub, sub, MINUS);
binary_op!(Mul, mul, PRODUCT);
binary_op!(Div, div, DIVISION);

impl ops::Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::unary(MINUS.clone(), self)
    }
}

impl ops::Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::unary(MINUS.clone(), self.clone())
    }
}
