//! The abstract syntax tree produced by the parser. Every node records the region of the
//! source code it was parsed from, so later stages can point errors at it.

pub mod atom;
pub mod binary;
pub mod expr;
pub mod paren;
pub mod relation;
pub mod rule;
pub mod unary;

pub use atom::Atom;
pub use binary::Binary;
pub use expr::Expr;
pub use paren::Paren;
pub use relation::Relation;
pub use rule::RuleDecl;
pub use unary::Unary;
