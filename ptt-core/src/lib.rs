//! The symbolic engine behind interactive rewrite proofs.
//!
//! # Overview
//!
//! A proof is a [`ReasoningChain`](chain::ReasoningChain): a beginning expression followed by
//! steps, each related to the one before it by a relation such as `=` or `<`. Steps are found by
//! applying [`Rule`](rule::Rule)s: a simple rule like `x ⋅ y = y ⋅ x` rewrites any expression
//! that matches one of its sides (see [`unify`]), while an implication like
//! `x ⋅ c = y ⋅ c ⟸ x = y` only becomes usable after the facts it needs are known (see
//! [`RuleSet::reduce`](rule::RuleSet::reduce)).
//!
//! The [`ProofSession`](session::ProofSession) drives the interaction: a host selects nodes of
//! a step's expression tree, asks for the rewrites available for them, picks one, and commits it
//! as the next step.
//!
//! Expressions are usually written in code with the operator overloads on [`Expr`](expr::Expr),
//! or parsed from text with the functions in [`convert`].
//!
//! ```
//! use ptt_core::{
//!     consts::EQ,
//!     convert::parse_expr,
//!     samples::standard_rules,
//!     session::ProofSession,
//! };
//!
//! let mut session = ProofSession::<()>::default();
//! let chain = session.begin(standard_rules(), parse_expr("(x * y) * z").unwrap());
//! let root = session.chain(chain).unwrap().last_step();
//!
//! let suggestions = session.request_derivation(root, || {}).unwrap();
//! let target = parse_expr("x * (y * z)").unwrap();
//! let chosen = suggestions.into_iter().find(|part| part.expr == target).unwrap();
//! assert_eq!(chosen.symbol, *EQ);
//!
//! session.choose_annotation(root, chosen);
//! assert!(session.commit());
//! assert_eq!(session.chain(chain).unwrap().to_string(), "((x ⋅ y) ⋅ z)\n  = (x ⋅ (y ⋅ z))");
//! ```

pub mod chain;
pub mod consts;
pub mod convert;
pub mod error;
pub mod expr;
pub mod notifier;
pub mod relation;
pub mod rule;
pub mod samples;
pub mod session;
pub mod symbol;
pub mod unify;

pub use chain::{ChainId, NodeId, ReasoningChain, UiNode};
pub use expr::Expr;
pub use notifier::{Notifier, Target};
pub use relation::{ChainPart, Relation};
pub use rule::{Direction, Rule, RuleSet};
pub use session::ProofSession;
pub use symbol::Symbol;
