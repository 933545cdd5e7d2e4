//! The interactive proof session.
//!
//! A session holds at most two selected nodes, the **slots** `lhs` and `rhs`. Selecting a node
//! means annotating it with a rewrite chosen from the suggestions of
//! [`ProofSession::request_derivation`]. Once the root of a step carries an annotation on its
//! own, [`ProofSession::commit`] appends that rewrite to the chain as a new step.
//!
//! Two slots are needed because the rewrite of a binary node can be built from facts about its
//! operands: annotating an operand with `a = c` specializes the rule set offered for the
//! operand's parent (see [`RuleSet::reduce`]).

use crate::{
    chain::{Annotation, ChainId, NodeId, ReasoningChain, UiNode},
    expr::Expr,
    notifier::{Notifier, Target},
    relation::ChainPart,
    rule::RuleSet,
};
use std::{collections::{btree_map::Entry, BTreeMap}, fmt};
use tracing::{debug, trace};

/// Whether a node may be annotated in the current session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Rejected,
    Allowed,

    /// The node is the parent of the selected node. Annotating it replaces the selection.
    ParentOverride,
}

impl Admission {
    pub fn is_allowed(self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Lhs,
    Rhs,
}

/// The state machine behind an interactive proof.
///
/// The session owns the proof document, a list of [`ReasoningChain`]s, and reports every change
/// it makes to its [`Notifier`]. It works on at most one chain at a time: the chain is bound by
/// the first annotation and released once no slot is occupied.
///
/// Requests that the current state does not admit (selecting a node twice, selecting a node
/// that is not a sibling of the selection, committing without a root selection) are silent
/// no-ops, so stale input from a host is harmless.
pub struct ProofSession<N: Notifier = ()> {
    chains: BTreeMap<ChainId, ReasoningChain>,
    chain: Option<ChainId>,
    lhs: Option<NodeId>,
    rhs: Option<NodeId>,

    /// Closes the chooser opened by the last [`ProofSession::request_derivation`].
    open_chooser_cancel: Option<Box<dyn FnOnce()>>,

    notifier: N,
}

impl<N: Notifier> ProofSession<N> {
    /// Creates an empty session that reports changes to `notifier`.
    pub fn new(notifier: N) -> Self {
        Self {
            chains: BTreeMap::new(),
            chain: None,
            lhs: None,
            rhs: None,
            open_chooser_cancel: None,
            notifier,
        }
    }

    /// Adds a chain to the document.
    ///
    /// A chain whose id is already in the document is handed back unchanged, leaving the chain
    /// in the document intact.
    pub fn add_chain(&mut self, chain: ReasoningChain) -> Result<ChainId, ReasoningChain> {
        match self.chains.entry(chain.id()) {
            Entry::Occupied(_) => {
                debug!(chain = %chain.id(), "chain already in the document");
                Err(chain)
            },
            Entry::Vacant(entry) => {
                let id = chain.id();
                entry.insert(chain);
                debug!(chain = %id, "added chain");
                Ok(id)
            },
        }
    }

    /// Adds a new chain starting at `beginning`.
    pub fn begin(&mut self, rule_set: RuleSet, beginning: Expr) -> ChainId {
        let chain = ReasoningChain::new(rule_set, beginning);
        let id = chain.id();
        self.chains.insert(id, chain);
        debug!(chain = %id, "began chain");
        id
    }

    pub fn chain(&self, id: ChainId) -> Option<&ReasoningChain> {
        self.chains.get(&id)
    }

    /// Returns the chains of the document, oldest first.
    pub fn chains(&self) -> impl Iterator<Item = &ReasoningChain> {
        self.chains.values()
    }

    /// Returns the node with the given id, if it exists in the document.
    pub fn node(&self, id: NodeId) -> Option<&UiNode> {
        self.chains
            .get(&id.chain())
            .filter(|chain| chain.contains(id))
            .map(|chain| chain.node(id))
    }

    /// The chain the session is working on.
    pub fn active_chain(&self) -> Option<ChainId> {
        self.chain
    }

    pub fn lhs(&self) -> Option<NodeId> {
        self.lhs
    }

    pub fn rhs(&self) -> Option<NodeId> {
        self.rhs
    }

    pub fn has_open_chooser(&self) -> bool {
        self.open_chooser_cancel.is_some()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Decides whether `node` may be annotated now.
    ///
    /// With nothing selected, any node may be. Otherwise the node must differ from the
    /// selection, live in the same step, and either be the selection's parent (replacing the
    /// selection), or be its sibling while a slot is still free.
    pub fn can_annotate(&self, node: NodeId) -> Admission {
        let Some(chain) = self.chains.get(&node.chain()).filter(|chain| chain.contains(node)) else {
            trace!(%node, "unknown node");
            return Admission::Rejected;
        };
        let Some(selected) = self.lhs.or(self.rhs) else {
            return Admission::Allowed;
        };

        let admission = if selected == node
            || selected.chain() != node.chain()
            || chain.root(selected) != chain.root(node)
        {
            Admission::Rejected
        } else if chain.parent(selected) == Some(node) {
            Admission::ParentOverride
        } else if self.lhs.is_some() && self.rhs.is_some() {
            Admission::Rejected
        } else if chain.parent(selected) == chain.parent(node) {
            Admission::Allowed
        } else {
            Admission::Rejected
        };

        if admission == Admission::Rejected {
            trace!(%node, %selected, "cannot annotate");
        }
        admission
    }

    /// Returns the rule set to draw suggestions for `node` from: the chain's rule set, reduced
    /// in turn by the annotation of every annotated child of `node`.
    pub fn effective_rule_set(&self, node: NodeId) -> Option<RuleSet> {
        let chain = self.chains.get(&node.chain()).filter(|chain| chain.contains(node))?;
        let rule_set = chain
            .children(node)
            .filter_map(|child| {
                let child = chain.node(child);
                child.annotation().map(|annotation| annotation.chosen.to_relation(child.expr().clone()))
            })
            .fold(chain.rule_set().clone(), |rule_set, assumption| rule_set.reduce(&assumption));
        Some(rule_set)
    }

    /// Computes the rewrites offered for `node`, registering `close` as the way to close the
    /// chooser that presents them. Any chooser still open is closed first.
    ///
    /// Returns [`None`] without touching the open chooser if `node` cannot be annotated.
    pub fn request_derivation(
        &mut self,
        node: NodeId,
        close: impl FnOnce() + 'static,
    ) -> Option<Vec<ChainPart>> {
        if !self.can_annotate(node).is_allowed() {
            return None;
        }
        let rule_set = self.effective_rule_set(node)?;
        let expr = self.node(node)?.expr().clone();
        let suggestions = rule_set.suggestions(&expr);

        if let Some(cancel) = self.open_chooser_cancel.take() {
            trace!("closing previous chooser");
            cancel();
        }
        self.open_chooser_cancel = Some(Box::new(close));
        debug!(%node, %expr, suggestions = suggestions.len(), "opened chooser");
        Some(suggestions)
    }

    /// Annotates `node` with `chosen` and puts it in its slot. The open chooser is considered
    /// closed by the choice, so its callback is dropped without being invoked.
    ///
    /// Returns false, changing nothing, if `node` cannot be annotated.
    ///
    /// # Panics
    ///
    /// Panics if the session is bound to a chain other than the node's.
    pub fn choose_annotation(&mut self, node: NodeId, chosen: ChainPart) -> bool {
        let admission = self.can_annotate(node);
        if !admission.is_allowed() {
            return false;
        }

        // admission already rules out other chains while a slot is occupied, and the chain is
        // released once both are empty
        match self.chain {
            Some(bound) => assert_eq!(
                bound,
                node.chain(),
                "node {} is not in the bound chain {}",
                node,
                bound,
            ),
            None => {
                self.chain = Some(node.chain());
                debug!(chain = %node.chain(), "bound chain");
            },
        }

        if admission == Admission::ParentOverride {
            self.clear(Slot::Rhs);
            self.clear(Slot::Lhs);
        }
        self.open_chooser_cancel = None;

        let Some(target) = self.chains.get_mut(&node.chain()).map(|chain| chain.node_mut(node)) else {
            return false;
        };
        let is_left_or_only = target.is_left_or_only();
        debug!(%node, %chosen, is_left_or_only, "annotated node");
        target.set_annotation(Some(Annotation { is_left_or_only, chosen }));
        self.notifier.notify(Target::Node(node));

        if is_left_or_only {
            self.lhs = Some(node);
        } else {
            self.rhs = Some(node);
        }
        true
    }

    /// Forgets the open chooser without invoking its callback, for hosts whose chooser closed on
    /// its own. Returns true if a chooser was open.
    pub fn dismiss_chooser(&mut self) -> bool {
        self.open_chooser_cancel.take().is_some()
    }

    /// Backs out one level: closes the open chooser if there is one, otherwise clears the right
    /// slot, otherwise the left slot. Returns true if anything changed.
    pub fn escape(&mut self) -> bool {
        if let Some(cancel) = self.open_chooser_cancel.take() {
            debug!("closed chooser");
            cancel();
            return true;
        }

        let cleared = self.clear(Slot::Rhs).or_else(|| self.clear(Slot::Lhs));
        if cleared.is_some() {
            self.release_chain_if_idle();
        }
        cleared.is_some()
    }

    /// Appends the rewrite annotated on a selected step root to its chain, then clears the
    /// selection.
    ///
    /// The whole annotated [`ChainPart`] is appended, so a rewrite chosen in reverse or negated
    /// form keeps its `reversed` and `negated` flags in the new step.
    ///
    /// Only admitted when the left slot holds the root of a step and the right slot is empty.
    /// Returns true if a step was appended.
    pub fn commit(&mut self) -> bool {
        let (Some(lhs), None) = (self.lhs, self.rhs) else {
            trace!("nothing to commit");
            return false;
        };
        let Some(chain) = self.chains.get_mut(&lhs.chain()) else {
            return false;
        };
        let node = chain.node(lhs);
        let Some(annotation) = node.annotation().filter(|_| node.is_root()) else {
            trace!(node = %lhs, "selection is not a step root");
            return false;
        };

        let part = annotation.chosen.clone();
        debug!(chain = %lhs.chain(), %part, "committed step");
        chain.add_part(part);
        self.notifier.notify(Target::Chain(lhs.chain()));

        self.clear(Slot::Rhs);
        self.clear(Slot::Lhs);
        self.release_chain_if_idle();
        true
    }

    /// Empties a slot, removing its node's annotation.
    fn clear(&mut self, slot: Slot) -> Option<NodeId> {
        let node = match slot {
            Slot::Lhs => self.lhs.take(),
            Slot::Rhs => self.rhs.take(),
        }?;
        if let Some(chain) = self.chains.get_mut(&node.chain()) {
            chain.node_mut(node).set_annotation(None);
        }
        debug!(%node, ?slot, "cleared annotation");
        self.notifier.notify(Target::Node(node));
        Some(node)
    }

    fn release_chain_if_idle(&mut self) {
        if self.lhs.is_some() || self.rhs.is_some() {
            return;
        }
        if let Some(chain) = self.chain.take() {
            debug!(%chain, "released chain");
            self.notifier.notify(Target::Chain(chain));
        }
    }
}

impl<N: Notifier + Default> Default for ProofSession<N> {
    fn default() -> Self {
        Self::new(N::default())
    }
}

impl<N: Notifier> fmt::Debug for ProofSession<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProofSession")
            .field("chains", &self.chains.keys().collect::<Vec<_>>())
            .field("chain", &self.chain)
            .field("lhs", &self.lhs)
            .field("rhs", &self.rhs)
            .field("has_open_chooser", &self.has_open_chooser())
            .finish()
    }
}
