//! Errors raised by the terminal host while reading commands. They point into the command line
//! that caused them.

use ariadne::Fmt;
use ptt_attrs::ErrorKind;
use ptt_error::{ErrorKind, EXPR};

pub use ptt_error::Error;

/// The first word of the line is not a command.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown command `{}`", name),
    labels = ["this is not a command"],
    help = match suggestion {
        Some(suggestion) => format!("did you mean `{}`?", suggestion.fg(EXPR)),
        None => String::from("type `help` to list the commands"),
    },
)]
pub struct UnknownCommand {
    pub name: String,

    /// The command with the closest spelling, if any is close.
    pub suggestion: Option<&'static str>,
}

/// A command was given without an argument it needs.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` needs {}", command, argument),
    labels = [format!("add {} after this", argument)],
)]
pub struct MissingArgument {
    pub command: &'static str,
    pub argument: &'static str,
}

/// A command argument has the wrong form.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected {}", expected),
    labels = ["here"],
)]
pub struct InvalidArgument {
    pub expected: &'static str,
}

/// A node reference names a chain or a node that does not exist.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("there is no node `{}`", node),
    labels = ["this node"],
    help = "`nodes` lists the nodes of a chain",
)]
pub struct InvalidNode {
    pub node: String,
}

/// The node exists, but the session does not admit selecting it now.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("node `{}` cannot be selected now", node),
    labels = ["this node"],
    help = "a second selection must be a sibling of the first, or its parent",
    note = "`esc` clears the selection",
)]
pub struct NotSelectable {
    pub node: String,
}

/// No rule rewrites the selected node.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("no rule applies to `{}`", expr.fg(EXPR)),
    labels = ["this node"],
)]
pub struct NoSuggestions {
    pub expr: String,
}

/// `choose` was used with no suggestions on screen.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "there are no suggestions to choose from",
    labels = ["nothing to choose"],
    help = "`select` a node first",
)]
pub struct NoChooser;

/// `choose` was given a number past the end of the suggestions.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("there is no suggestion {}", index),
    labels = [format!("pick a number below {}", count)],
)]
pub struct NoSuchSuggestion {
    pub index: usize,
    pub count: usize,
}

/// A command needs a chain, but none was begun.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "there is no chain yet",
    labels = ["this needs a chain"],
    help = format!("start one with `begin {}`", "expression".fg(EXPR)),
)]
pub struct NoChain;

/// `commit` was used without a lone selection on the root of a step.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "nothing to commit",
    labels = ["here"],
    help = "select the root of a step alone, and choose a rewrite for it",
)]
pub struct NothingToCommit;
