use crate::error::{Error, InvalidArgument, MissingArgument, UnknownCommand};
use levenshtein::levenshtein;
use ptt_core::{
    convert::{parse_expr, parse_rule},
    Expr,
    Rule,
};
use std::ops::Range;

/// Every command word the host understands.
pub const COMMANDS: &[&str] = &[
    "begin", "rule", "rules", "chain", "nodes", "select", "choose", "dismiss", "esc", "commit",
    "space", "help", "quit",
];

pub const HELP: &str = "\
begin EXPR             start a new chain at EXPR
rule NAME [VARS]: REL  add a rule for chains begun after it, e.g.
                       rule cancel [x, y, c]: x * c = y * c <== x = y
rules                  list the rules
chain [K]              show chain K (default: the current chain)
nodes [K]              list the nodes of chain K with their numbers
select [K.]N           select node N and list the rewrites for it
choose I               annotate the selected node with rewrite I
dismiss                close the list of rewrites
esc                    close the list of rewrites, or undo the last selection
commit, space          append the rewrite of the selected step to its chain
help                   show this message
quit                   leave";

/// A reference to a node typed by the user: `N` for node `N` of the current chain, or `K.N` for
/// node `N` of chain `K`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRef {
    pub chain: Option<usize>,
    pub index: usize,
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Begin(Expr),
    Rule(Rule),
    Rules,
    Chain(Option<usize>),
    Nodes(Option<usize>),
    Select(NodeRef),
    Choose(usize),
    Dismiss,
    Escape,
    Commit,
    Help,
    Quit,
}

/// A command line split into its command word and the rest.
struct Line<'a> {
    source: &'a str,
    word: &'a str,
    word_span: Range<usize>,

    /// The argument text with surrounding whitespace removed.
    args: &'a str,
    args_span: Range<usize>,
}

impl<'a> Line<'a> {
    fn split(source: &'a str) -> Self {
        let word_start = source.len() - source.trim_start().len();
        let word_end = source[word_start..]
            .find(char::is_whitespace)
            .map_or(source.len(), |len| word_start + len);
        let rest = &source[word_end..];
        let args_start = word_end + (rest.len() - rest.trim_start().len());
        let args_end = word_end + rest.trim_end().len();

        Self {
            source,
            word: &source[word_start..word_end],
            word_span: word_start..word_end,
            args: &source[args_start..args_end.max(args_start)],
            args_span: args_start..args_end.max(args_start),
        }
    }

    /// Returns the argument text, or an error if there is none.
    fn required(&self, command: &'static str, argument: &'static str) -> Result<&'a str, Error> {
        if self.args.is_empty() {
            Err(Error::new(vec![self.word_span.clone()], MissingArgument { command, argument }))
        } else {
            Ok(self.args)
        }
    }

    /// Checks that no argument was given.
    fn none(&self) -> Result<(), Error> {
        if self.args.is_empty() {
            Ok(())
        } else {
            Err(self.invalid("no argument"))
        }
    }

    fn number(&self, text: &str, expected: &'static str) -> Result<usize, Error> {
        text.parse().map_err(|_| self.invalid(expected))
    }

    /// Parses an optional chain number.
    fn optional_number(&self) -> Result<Option<usize>, Error> {
        if self.args.is_empty() {
            Ok(None)
        } else {
            self.number(self.args, "a chain number").map(Some)
        }
    }

    fn node_ref(&self) -> Result<NodeRef, Error> {
        let text = self.required("select", "a node number")?;
        let (chain, index) = match text.split_once('.') {
            Some((chain, index)) => (Some(self.number(chain, "a node like `2` or `0.2`")?), index),
            None => (None, text),
        };
        let index = self.number(index, "a node like `2` or `0.2`")?;
        Ok(NodeRef { chain, index })
    }

    fn invalid(&self, expected: &'static str) -> Error {
        Error::new(vec![self.args_span.clone()], InvalidArgument { expected })
    }

    fn unknown(&self) -> Error {
        let suggestion = COMMANDS
            .iter()
            .copied()
            .map(|command| (command, levenshtein(command, self.word)))
            .filter(|(_, distance)| *distance < 3)
            .min_by_key(|(_, distance)| *distance)
            .map(|(command, _)| command);
        Error::new(vec![self.word_span.clone()], UnknownCommand {
            name: self.word.to_owned(),
            suggestion,
        })
    }
}

impl Command {
    /// Parses a command line. Error spans point into `source`.
    pub fn parse(source: &str) -> Result<Self, Error> {
        let line = Line::split(source);
        let command = match line.word {
            "begin" => {
                let text = line.required("begin", "an expression")?;
                let expr = parse_expr(text).map_err(|err| shift(err, line.args_span.start))?;
                Command::Begin(expr)
            },
            // the whole line is the declaration, keyword included
            "rule" => Command::Rule(parse_rule(line.source)?),
            "rules" => line.none().map(|_| Command::Rules)?,
            "chain" => Command::Chain(line.optional_number()?),
            "nodes" => Command::Nodes(line.optional_number()?),
            "select" => Command::Select(line.node_ref()?),
            "choose" => {
                let text = line.required("choose", "a suggestion number")?;
                Command::Choose(line.number(text, "a suggestion number")?)
            },
            "dismiss" => line.none().map(|_| Command::Dismiss)?,
            "esc" => line.none().map(|_| Command::Escape)?,
            "commit" | "space" => line.none().map(|_| Command::Commit)?,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(line.unknown()),
        };
        Ok(command)
    }
}

/// Moves the spans of an error raised on a substring starting at `offset` of the line.
fn shift(mut err: Error, offset: usize) -> Error {
    for span in &mut err.spans {
        *span = span.start + offset..span.end + offset;
    }
    err
}
