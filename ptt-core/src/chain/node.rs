use crate::{expr::Expr, relation::ChainPart};
use std::{
    fmt,
    sync::atomic::{AtomicUsize, Ordering},
};

static NEXT_CHAIN_ID: AtomicUsize = AtomicUsize::new(0);

/// Identifies a [`ReasoningChain`](super::ReasoningChain) within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainId(usize);

impl ChainId {
    /// Draws an id no other chain of the process has.
    pub(super) fn next() -> Self {
        Self(NEXT_CHAIN_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies one interactive node: the chain that owns it, and its index in that chain's node
/// arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    chain: ChainId,
    index: usize,
}

impl NodeId {
    pub(crate) fn new(chain: ChainId, index: usize) -> Self {
        Self { chain, index }
    }

    pub fn chain(&self) -> ChainId {
        self.chain
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.chain, self.index)
    }
}

/// The rewrite chosen for a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Copied from the node; decides which session slot the annotation occupies.
    pub is_left_or_only: bool,
    pub chosen: ChainPart,
}

/// An expression node mirrored into a chain's interactive tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiNode {
    pub(super) expr: Expr,
    pub(super) parent: Option<usize>,
    pub(super) root: usize,
    pub(super) is_left_or_only: bool,
    pub(super) children: Vec<usize>,
    pub(super) annotation: Option<Annotation>,
}

impl UiNode {
    /// The expression this node mirrors, including its whole subtree.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// True unless this node is the right operand of a binary node.
    pub fn is_left_or_only(&self) -> bool {
        self.is_left_or_only
    }

    /// Returns true if this node is the root of a step.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn annotation(&self) -> Option<&Annotation> {
        self.annotation.as_ref()
    }

    pub(crate) fn set_annotation(&mut self, annotation: Option<Annotation>) {
        self.annotation = annotation;
    }
}
