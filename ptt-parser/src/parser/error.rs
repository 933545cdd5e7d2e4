//! Kinds of errors that can occur while parsing. Each error is wrapped in a
//! [`ptt_error::Error`], which carries the source spans the error points at.

use ariadne::Fmt;
use ptt_attrs::ErrorKind;
use ptt_error::{ErrorKind, EXPR};
use crate::tokenizer::TokenKind;

pub use ptt_error::Error;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "input".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A specific keyword was expected.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected the keyword `{}`", keyword),
    labels = ["here"],
)]
pub struct ExpectedKeyword {
    /// The keyword that was expected.
    pub keyword: &'static str,
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = "add a closing parenthesis `)` somewhere after this",
)]
pub struct UnclosedParenthesis;

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// A square bracket opening a list of quantified symbols was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed quantifier list",
    labels = ["this bracket is not closed"],
    help = "quantified symbols are written as `[x, y, z]`",
)]
pub struct UnclosedQuantifierList;
