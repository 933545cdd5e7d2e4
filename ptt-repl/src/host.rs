use crate::{
    command::{Command, NodeRef, HELP},
    config::Config,
    error::{
        Error,
        InvalidNode,
        NoChain,
        NoChooser,
        NoSuchSuggestion,
        NoSuggestions,
        NotSelectable,
        NothingToCommit,
    },
};
use ptt_core::{
    samples::standard_rules,
    ChainId,
    ChainPart,
    NodeId,
    Notifier,
    ProofSession,
    ReasoningChain,
    RuleSet,
    Target,
    UiNode,
};
use std::{cell::RefCell, ops::Range, rc::Rc};
use tracing::{debug, info};

/// Collects what changed during a command, so the host can show it afterwards. A target that
/// changes twice is shown once.
#[derive(Debug, Default)]
pub struct Redraw {
    pending: Vec<Target>,
}

impl Redraw {
    fn take(&mut self) -> Vec<Target> {
        std::mem::take(&mut self.pending)
    }
}

impl Notifier for Redraw {
    fn notify(&mut self, target: Target) {
        if !self.pending.contains(&target) {
            self.pending.push(target);
        }
    }
}

/// The rewrites on screen, offered for one node.
#[derive(Debug, Clone)]
struct Chooser {
    node: NodeId,
    suggestions: Vec<ChainPart>,
}

/// The terminal host: runs commands against a [`ProofSession`] and renders the results as text.
pub struct Host {
    session: ProofSession<Redraw>,

    /// The rules new chains start with.
    rules: RuleSet,

    /// The chain commands default to when the session is not working on one.
    current: Option<ChainId>,

    /// Shared with the close callback handed to the session.
    chooser: Rc<RefCell<Option<Chooser>>>,

    quit: bool,
}

impl Host {
    pub fn new(config: &Config) -> Self {
        let rules = if config.prelude { standard_rules() } else { RuleSet::new() };
        debug!(rules = rules.len(), "host ready");
        Self {
            session: ProofSession::new(Redraw::default()),
            rules,
            current: None,
            chooser: Rc::new(RefCell::new(None)),
            quit: false,
        }
    }

    /// Returns true once `quit` was run.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Runs one command line, returning the lines to print. Error spans point into `line`.
    pub fn execute(&mut self, line: &str) -> Result<Vec<String>, Error> {
        let command = Command::parse(line)?;
        let word = command_span(line);
        let mut out = Vec::new();

        match command {
            Command::Begin(expr) => {
                let id = self.session.begin(self.rules.clone(), expr);
                self.current = Some(id);
                info!(chain = %id, "began chain");
                let chain = self.chain(id, word)?;
                out.extend(self.list_nodes(chain));
            },
            Command::Rule(rule) => {
                out.push(format!("added rule {}: {}", rule.name(), rule));
                self.rules.push(rule);
            },
            Command::Rules => {
                out.extend(self.rules.iter().map(|rule| format!("{}: {}", rule.name(), rule)));
            },
            Command::Chain(number) => {
                let chain = self.pick_chain(number, word)?;
                out.push(format!("chain {}:", self.chain_number(chain.id())));
                out.extend(chain.to_string().lines().map(|line| format!("  {}", line)));
            },
            Command::Nodes(number) => {
                let chain = self.pick_chain(number, word)?;
                out.extend(self.list_nodes(chain));
            },
            Command::Select(node_ref) => {
                let node = self.resolve(node_ref, line)?;
                out.extend(self.select(node, line)?);
            },
            Command::Choose(index) => {
                let picked = self.chooser.borrow().as_ref().map(|chooser| {
                    (chooser.node, chooser.suggestions.get(index).cloned(), chooser.suggestions.len())
                });
                let (node, part) = match picked {
                    Some((node, Some(part), _)) => (node, part),
                    Some((_, None, count)) => {
                        return Err(Error::new(vec![args_span(line)], NoSuchSuggestion { index, count }));
                    },
                    None => return Err(Error::new(vec![word], NoChooser)),
                };
                if !self.session.choose_annotation(node, part) {
                    return Err(Error::new(vec![word], NotSelectable { node: self.label(node) }));
                }
                self.chooser.borrow_mut().take();
            },
            Command::Dismiss => {
                self.chooser.borrow_mut().take();
                if self.session.dismiss_chooser() {
                    out.push(String::from("closed the suggestions"));
                }
            },
            Command::Escape => {
                if !self.session.escape() {
                    out.push(String::from("nothing to undo"));
                }
            },
            Command::Commit => {
                if !self.session.commit() {
                    return Err(Error::new(vec![word], NothingToCommit));
                }
            },
            Command::Help => out.extend(HELP.lines().map(String::from)),
            Command::Quit => self.quit = true,
        }

        out.extend(self.redraw(command_span(line))?);
        Ok(out)
    }

    /// Opens the chooser for a node, listing its rewrites.
    fn select(&mut self, node: NodeId, line: &str) -> Result<Vec<String>, Error> {
        let pending = Rc::clone(&self.chooser);
        let close = move || {
            pending.borrow_mut().take();
        };
        let Some(suggestions) = self.session.request_derivation(node, close) else {
            return Err(Error::new(vec![args_span(line)], NotSelectable { node: self.label(node) }));
        };

        let expr = self.node(node, args_span(line))?.expr().to_string();
        if suggestions.is_empty() {
            self.session.dismiss_chooser();
            return Err(Error::new(vec![args_span(line)], NoSuggestions { expr }));
        }

        let mut out = vec![format!("rewrites for {} {}:", self.label(node), expr)];
        out.extend(suggestions.iter().enumerate().map(|(i, part)| format!("  [{}] {}", i, part)));
        *self.chooser.borrow_mut() = Some(Chooser { node, suggestions });
        Ok(out)
    }

    /// Describes the targets the session reported since the last command.
    fn redraw(&mut self, span: Range<usize>) -> Result<Vec<String>, Error> {
        let targets = self.session.notifier_mut().take();
        let mut out = Vec::new();
        for target in targets {
            match target {
                Target::Node(node) => out.push(self.describe(node, span.clone())?),
                Target::Chain(id) => {
                    let chain = self.chain(id, span.clone())?;
                    out.push(format!("chain {}:", self.chain_number(id)));
                    out.extend(chain.to_string().lines().map(|line| format!("  {}", line)));
                },
            }
        }
        Ok(out)
    }

    /// Renders one node: its label, expression and annotation.
    fn describe(&self, node: NodeId, span: Range<usize>) -> Result<String, Error> {
        let ui = self.node(node, span)?;
        Ok(match ui.annotation() {
            Some(annotation) => format!("{} {} ⇒ {}", self.label(node), ui.expr(), annotation.chosen),
            None => format!("{} {}", self.label(node), ui.expr()),
        })
    }

    /// Lists every node of a chain, indented by depth, step by step.
    fn list_nodes(&self, chain: &ReasoningChain) -> Vec<String> {
        let mut out = Vec::new();
        let mut step = 0;
        for (id, node) in chain.nodes() {
            if node.is_root() {
                out.push(format!("step {}:", step));
                step += 1;
            }
            let depth = std::iter::successors(chain.parent(id), |&parent| chain.parent(parent)).count();
            let annotation = node
                .annotation()
                .map(|annotation| format!(" ⇒ {}", annotation.chosen))
                .unwrap_or_default();
            out.push(format!("{:indent$}{} {}{}", "", id.index(), node.expr(), annotation, indent = 2 + 2 * depth));
        }
        out
    }

    /// Returns the chain the user means: the numbered one, else the one being worked on, else the
    /// last one begun.
    fn pick_chain(&self, number: Option<usize>, span: Range<usize>) -> Result<&ReasoningChain, Error> {
        let chain = match number {
            Some(number) => self.session.chains().nth(number),
            None => self.session.active_chain().or(self.current).and_then(|id| self.session.chain(id)),
        };
        chain.ok_or_else(|| Error::new(vec![span], NoChain))
    }

    fn resolve(&self, node_ref: NodeRef, line: &str) -> Result<NodeId, Error> {
        let span = args_span(line);
        let chain = self.pick_chain(node_ref.chain, span.clone())?;
        chain.node_id(node_ref.index).ok_or_else(|| {
            let node = match node_ref.chain {
                Some(number) => format!("{}.{}", number, node_ref.index),
                None => node_ref.index.to_string(),
            };
            Error::new(vec![span], InvalidNode { node })
        })
    }

    /// Returns a chain of the document, or a [`NoChain`] error over `span`.
    fn chain(&self, id: ChainId, span: Range<usize>) -> Result<&ReasoningChain, Error> {
        self.session.chain(id).ok_or_else(|| Error::new(vec![span], NoChain))
    }

    /// Returns a node of the document, or an [`InvalidNode`] error over `span`.
    fn node(&self, node: NodeId, span: Range<usize>) -> Result<&UiNode, Error> {
        self.session
            .node(node)
            .ok_or_else(|| Error::new(vec![span], InvalidNode { node: self.label(node) }))
    }

    /// The position of a chain among all chains, as the user numbers them.
    fn chain_number(&self, id: ChainId) -> usize {
        self.session.chains().position(|chain| chain.id() == id).unwrap_or_default()
    }

    /// The `K.N` label of a node.
    fn label(&self, node: NodeId) -> String {
        format!("{}.{}", self.chain_number(node.chain()), node.index())
    }
}

/// The span of the command word.
fn command_span(line: &str) -> Range<usize> {
    let start = line.len() - line.trim_start().len();
    let end = line[start..].find(char::is_whitespace).map_or(line.len(), |len| start + len);
    start..end
}

/// The span of the arguments after the command word, whitespace excluded.
fn args_span(line: &str) -> Range<usize> {
    let word = command_span(line);
    let start = line.len() - line[word.end..].trim_start().len();
    let end = line.trim_end().len().max(start);
    if start == end {
        word
    } else {
        start..end
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ptt_core::samples::Atoms;
    use super::*;

    fn host() -> Host {
        Host::new(&Config::default())
    }

    fn run(host: &mut Host, lines: &[&str]) -> Vec<String> {
        lines.iter().flat_map(|line| host.execute(line).unwrap()).collect()
    }

    #[test]
    fn begin_lists_nodes() {
        let mut host = host();
        let out = run(&mut host, &["begin (x * y) * z"]);
        assert_eq!(out, vec![
            "step 0:",
            "  0 ((x ⋅ y) ⋅ z)",
            "    1 (x ⋅ y)",
            "      2 x",
            "      3 y",
            "    4 z",
        ]);
    }

    #[test]
    fn select_choose_commit() {
        let mut host = host();
        run(&mut host, &["begin (x * y) * z"]);

        let out = host.execute("select 0").unwrap();
        assert_eq!(out[0], "rewrites for 0.0 ((x ⋅ y) ⋅ z):");
        let index = out
            .iter()
            .skip(1)
            .position(|line| line.ends_with("__ = (x ⋅ (y ⋅ z))"))
            .unwrap();

        let out = host.execute(&format!("choose {}", index)).unwrap();
        assert_eq!(out, vec!["0.0 ((x ⋅ y) ⋅ z) ⇒ __ = (x ⋅ (y ⋅ z))"]);

        let out = host.execute("commit").unwrap();
        assert_eq!(out, vec![
            "chain 0:",
            "  ((x ⋅ y) ⋅ z)",
            "    = (x ⋅ (y ⋅ z))",
            "0.0 ((x ⋅ y) ⋅ z)",
        ]);
    }

    #[test]
    fn escape_closes_chooser_then_selection() {
        let mut host = host();
        run(&mut host, &["begin a + b", "select 1"]);
        assert!(host.chooser.borrow().is_some());

        assert_eq!(host.execute("esc").unwrap(), Vec::<String>::new());
        assert!(host.chooser.borrow().is_none());
        assert_eq!(host.execute("esc").unwrap(), vec!["nothing to undo"]);
    }

    #[test]
    fn rejected_selection_reports_node() {
        let mut host = host();
        run(&mut host, &["begin (a + b) * c", "select 2", "choose 0"]);

        let err = host.execute("select 4").unwrap_err();
        assert_eq!(err.kind_as::<NotSelectable>().unwrap().node, "0.4");
        assert_eq!(err.spans, vec![7..8]);

        let err = host.execute("select 9").unwrap_err();
        assert!(err.is::<InvalidNode>());
    }

    #[test]
    fn commands_need_a_chain() {
        let mut host = host();
        assert!(host.execute("nodes").unwrap_err().is::<NoChain>());
        assert!(host.execute("choose 0").unwrap_err().is::<NoChooser>());
        assert!(host.execute("commit").unwrap_err().is::<NothingToCommit>());
    }

    #[test]
    fn unknown_chain_and_node_are_errors() {
        let host = host();
        let Atoms { x, .. } = Atoms::new();
        let foreign = ReasoningChain::new(RuleSet::new(), x);

        let err = host.chain(foreign.id(), 0..4).unwrap_err();
        assert!(err.is::<NoChain>());
        assert_eq!(err.spans, vec![0..4]);

        let err = host.describe(foreign.last_step(), 5..6).unwrap_err();
        assert!(err.is::<InvalidNode>());
        assert_eq!(err.spans, vec![5..6]);
    }

    #[test]
    fn declared_rules_apply_to_new_chains() {
        let mut host = Host::new(&Config { prelude: false, ..Config::default() });
        run(&mut host, &["begin q + q"]);
        assert!(host.execute("select 0").unwrap_err().is::<NoSuggestions>());

        let out = run(&mut host, &["rule swap [x, y]: x + y = y + x", "begin p + q", "select 1.0"]);
        assert_eq!(out[0], "added rule swap: (x + y) = (y + x)");
        assert_eq!(out.last().unwrap(), "  [1] __ = (q + p)");

        let err = host.execute("choose 3").unwrap_err();
        assert_eq!(err.kind_as::<NoSuchSuggestion>().unwrap().count, 2);
    }

    #[test]
    fn cancellation_through_operand_fact() {
        let mut host = host();
        let out = run(&mut host, &["rule given []: a = c", "begin a * b", "select 1"]);
        assert_eq!(out.last().unwrap(), "  [4] __ = c");

        run(&mut host, &["choose 4"]);
        let out = host.execute("select 0").unwrap();
        assert_eq!(out, vec!["rewrites for 0.0 (a ⋅ b):", "  [0] __ = (c ⋅ b)"]);

        run(&mut host, &["choose 0"]);
        let out = host.execute("commit").unwrap();
        assert_eq!(out, vec!["chain 0:", "  (a ⋅ b)", "    = (c ⋅ b)", "0.0 (a ⋅ b)"]);
    }
}
