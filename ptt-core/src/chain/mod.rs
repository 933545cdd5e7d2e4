mod node;

use crate::{
    expr::Expr,
    relation::ChainPart,
    rule::RuleSet,
    symbol::Symbol,
};
use std::fmt;

pub use node::{Annotation, ChainId, NodeId, UiNode};

/// An append-only proof: a beginning expression followed by [`ChainPart`]s, each relating the
/// previous step to the next.
///
/// Every step's expression is mirrored into the chain's interactive tree, an arena of
/// [`UiNode`]s addressed by [`NodeId`]. Each step is its own tree, rooted at the node of the
/// step's expression.
///
/// Every chain carries its own [`ChainId`]. Cloning a chain draws a fresh id, so node ids of the
/// original never resolve against the copy.
#[derive(Debug)]
pub struct ReasoningChain {
    id: ChainId,
    beginning: Expr,
    rule_set: RuleSet,
    parts: Vec<ChainPart>,

    /// The node arena. Nodes of one step are contiguous, in pre-order.
    nodes: Vec<UiNode>,

    /// The arena index of the root node of every step, the beginning first.
    steps: Vec<usize>,
}

impl ReasoningChain {
    /// Creates a chain, mirroring `beginning` as its first step.
    pub fn new(rule_set: RuleSet, beginning: Expr) -> Self {
        let mut chain = Self {
            id: ChainId::next(),
            beginning: beginning.clone(),
            rule_set,
            parts: Vec::new(),
            nodes: Vec::new(),
            steps: Vec::new(),
        };
        chain.mirror(beginning);
        chain
    }

    pub fn id(&self) -> ChainId {
        self.id
    }

    pub fn beginning(&self) -> &Expr {
        &self.beginning
    }

    pub fn rule_set(&self) -> &RuleSet {
        &self.rule_set
    }

    pub fn parts(&self) -> &[ChainPart] {
        &self.parts
    }

    /// Appends the step "related by `symbol` to `expr`".
    pub fn add(&mut self, symbol: Symbol, expr: Expr) {
        self.add_part(ChainPart::new(symbol, expr));
    }

    /// Appends a step, keeping the part's relation modifiers.
    pub fn add_part(&mut self, part: ChainPart) {
        self.mirror(part.expr.clone());
        self.parts.push(part);
    }

    /// Returns the expression of the last step.
    pub fn current(&self) -> &Expr {
        self.parts.last().map_or(&self.beginning, |part| &part.expr)
    }

    /// Returns the root node of every step, the beginning first.
    pub fn steps(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.steps.iter().map(|&index| self.id_of(index))
    }

    /// Returns the root node of the last step.
    pub fn last_step(&self) -> NodeId {
        // a chain always holds its beginning
        self.id_of(self.steps[self.steps.len() - 1])
    }

    /// Returns true if the node belongs to this chain.
    pub fn contains(&self, node: NodeId) -> bool {
        node.chain() == self.id && node.index() < self.nodes.len()
    }

    /// Returns the id of the node at `index` in the arena, if there is one.
    pub fn node_id(&self, index: usize) -> Option<NodeId> {
        (index < self.nodes.len()).then(|| self.id_of(index))
    }

    /// Returns the node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the node does not belong to this chain.
    pub fn node(&self, node: NodeId) -> &UiNode {
        &self.nodes[self.index_of(node)]
    }

    pub(crate) fn node_mut(&mut self, node: NodeId) -> &mut UiNode {
        let index = self.index_of(node);
        &mut self.nodes[index]
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent.map(|index| self.id_of(index))
    }

    /// Returns the root node of the step that contains the node.
    pub fn root(&self, node: NodeId) -> NodeId {
        self.id_of(self.node(node).root)
    }

    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.node(node).children.iter().map(|&index| self.id_of(index))
    }

    /// Returns every node of the chain with its id, step by step in pre-order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &UiNode)> {
        self.nodes.iter().enumerate().map(|(index, node)| (self.id_of(index), node))
    }

    fn id_of(&self, index: usize) -> NodeId {
        NodeId::new(self.id, index)
    }

    fn index_of(&self, node: NodeId) -> usize {
        assert!(self.contains(node), "node {} does not belong to chain {}", node, self.id);
        node.index()
    }

    /// Mirrors `expr` into a new tree and records it as a step.
    fn mirror(&mut self, expr: Expr) {
        let root = self.nodes.len();
        self.push_node(&expr, None, root, true);
        self.steps.push(root);
    }

    fn push_node(&mut self, expr: &Expr, parent: Option<usize>, root: usize, is_left_or_only: bool) -> usize {
        let index = self.nodes.len();
        self.nodes.push(UiNode {
            expr: expr.clone(),
            parent,
            root,
            is_left_or_only,
            children: Vec::new(),
            annotation: None,
        });

        let children = match expr {
            Expr::Atom(_) => Vec::new(),
            Expr::Unary(_, operand) => vec![(operand, true)],
            Expr::Binary(_, lhs, rhs) => vec![(lhs, true), (rhs, false)],
        };
        for (child, is_left_or_only) in children {
            let child = self.push_node(child, Some(index), root, is_left_or_only);
            self.nodes[index].children.push(child);
        }
        index
    }
}

impl Clone for ReasoningChain {
    /// Copies the proof under a fresh id. Annotations are session state and are not copied.
    fn clone(&self) -> Self {
        let mut nodes = self.nodes.clone();
        nodes.iter_mut().for_each(|node| node.set_annotation(None));
        Self {
            id: ChainId::next(),
            beginning: self.beginning.clone(),
            rule_set: self.rule_set.clone(),
            parts: self.parts.clone(),
            nodes,
            steps: self.steps.clone(),
        }
    }
}

impl fmt::Display for ReasoningChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.beginning)?;
        for part in &self.parts {
            write!(f, "\n  {} {}", part.text(), part.expr)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{consts::{EQ, LT}, samples::Atoms};
    use super::*;

    #[test]
    fn beginning_is_mirrored() {
        let Atoms { x, y, z, .. } = Atoms::new();
        let chain = ReasoningChain::new(RuleSet::new(), (&x * &y) * z.clone());

        assert_eq!(chain.nodes().count(), 5);
        assert_eq!(chain.node_id(4).map(|id| id.index()), Some(4));
        assert_eq!(chain.node_id(5), None);
        let root = chain.last_step();
        assert!(chain.node(root).is_root());
        assert_eq!(chain.node(root).expr(), chain.beginning());

        let children = chain.children(root).collect::<Vec<_>>();
        assert_eq!(children.len(), 2);
        assert_eq!(chain.node(children[0]).expr(), &(&x * &y));
        assert!(chain.node(children[0]).is_left_or_only());
        assert_eq!(chain.node(children[1]).expr(), &z);
        assert!(!chain.node(children[1]).is_left_or_only());

        for child in children {
            assert_eq!(chain.parent(child), Some(root));
            assert_eq!(chain.root(child), root);
        }
    }

    #[test]
    fn unary_operand_is_left() {
        let Atoms { x, .. } = Atoms::new();
        let chain = ReasoningChain::new(RuleSet::new(), -x);
        let operand = chain.children(chain.last_step()).next().unwrap();
        assert!(chain.node(operand).is_left_or_only());
    }

    #[test]
    fn add_appends_step() {
        let Atoms { x, y, .. } = Atoms::new();
        let mut chain = ReasoningChain::new(RuleSet::new(), &x + &y);
        let first = chain.last_step();
        chain.add(EQ.clone(), &y + &x);
        chain.add_part(ChainPart { reversed: true, ..ChainPart::new(LT.clone(), y.clone()) });

        assert_eq!(chain.parts().len(), 2);
        assert_eq!(chain.current(), &y);
        let steps = chain.steps().collect::<Vec<_>>();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0], first);
        assert_ne!(chain.root(steps[1]), first);
        assert_eq!(chain.to_string(), "(x + y)\n  = (y + x)\n  > y");
    }

    #[test]
    #[should_panic(expected = "does not belong to chain")]
    fn foreign_node_panics() {
        let Atoms { x, .. } = Atoms::new();
        let one = ReasoningChain::new(RuleSet::new(), x.clone());
        let other = ReasoningChain::new(RuleSet::new(), x);
        other.node(one.last_step());
    }

    #[test]
    #[should_panic(expected = "does not belong to chain")]
    fn out_of_range_node_panics() {
        let Atoms { x, y, .. } = Atoms::new();
        let mut longer = ReasoningChain::new(RuleSet::new(), x.clone());
        longer.add(EQ.clone(), y);
        let chain = ReasoningChain::new(RuleSet::new(), x);
        chain.node(NodeId::new(chain.id(), longer.last_step().index()));
    }

    #[test]
    fn clone_takes_fresh_id() {
        let Atoms { x, y, .. } = Atoms::new();
        let mut chain = ReasoningChain::new(RuleSet::new(), &x + &y);
        chain.add(EQ.clone(), &y + &x);
        let root = chain.last_step();
        chain.node_mut(root).set_annotation(Some(Annotation {
            is_left_or_only: true,
            chosen: ChainPart::new(EQ.clone(), x.clone()),
        }));

        let copy = chain.clone();
        assert_ne!(copy.id(), chain.id());
        assert_eq!(copy.parts(), chain.parts());
        assert_eq!(copy.to_string(), chain.to_string());
        assert!(!copy.contains(root));
        assert_eq!(copy.node(copy.last_step()).annotation(), None);
        assert_eq!(copy.nodes().count(), chain.nodes().count());
    }
}
