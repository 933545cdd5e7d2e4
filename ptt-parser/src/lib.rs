//! Tokenizer and parser for the textual form of ptt expressions, relations and rule
//! declarations.
//!
//! ```
//! use ptt_parser::parser::{ast::{Expr, RuleDecl}, Parser};
//!
//! let expr = Parser::new("(x * y) * z").try_parse_full::<Expr>().unwrap();
//! assert_eq!(expr.span(), 0..11);
//!
//! let rule = Parser::new("rule commutativity [x, y]: x * y = y * x")
//!     .try_parse_full::<RuleDecl>()
//!     .unwrap();
//! assert_eq!(rule.name.name, "commutativity");
//! assert!(rule.conditions.is_empty());
//! ```

pub mod parser;
pub mod tokenizer;
