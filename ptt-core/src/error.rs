//! Kinds of errors raised while building relations and rules. Errors that come from parsed
//! source carry the spans of the offending tokens; errors from values built in code do not.

use ariadne::Fmt;
use ptt_attrs::ErrorKind;
use ptt_error::{ErrorKind, EXPR};

pub use ptt_error::Error;

/// A relation could not be turned into a chain part because its left side is not the
/// placeholder atom.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected the placeholder `__` on the left side, found `{}`", found),
    labels = ["this should be `__`"],
    help = format!("chain parts are written like `__ = {}`", "expression".fg(EXPR)),
)]
pub struct MissingPlaceholder {
    /// The rendering of the left side that was found instead.
    pub found: String,
}

/// A rule quantifies over a variable that none of its relations mention.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the quantified variable `{}` is never used", name),
    labels = ["quantified here"],
    help = "remove it from the quantifier list",
)]
pub struct UnusedQuantifier {
    pub name: String,
}

/// A rule quantifies over the same variable twice.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the variable `{}` is quantified more than once", name),
    labels = ["first quantified here", "quantified again here"],
)]
pub struct DuplicateQuantifier {
    pub name: String,
}
