//! Owned symbol trees produced by grammar runs.

/// Node of a rule tree.
///
/// Each node owns its children in left-to-right expansion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleNode {
    symbol: char,
    children: Vec<RuleNode>,
}

impl RuleNode {
    /// Creates a childless node.
    #[must_use]
    pub const fn leaf(symbol: char) -> Self {
        Self {
            symbol,
            children: Vec::new(),
        }
    }

    /// Creates a node with the given children.
    #[must_use]
    pub fn with_children(symbol: char, children: Vec<RuleNode>) -> Self {
        Self { symbol, children }
    }

    /// Symbol held by the node.
    #[must_use]
    pub const fn symbol(&self) -> char {
        self.symbol
    }

    /// Children in expansion order.
    #[must_use]
    pub fn children(&self) -> &[RuleNode] {
        &self.children
    }

    /// Reports whether the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn push(&mut self, child: RuleNode) {
        self.children.push(child);
    }

    pub(crate) fn children_mut(&mut self) -> &mut [RuleNode] {
        &mut self.children
    }

    /// Total number of nodes in the subtree rooted at this node.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(RuleNode::node_count).sum::<usize>()
    }

    /// Leaf symbols of the subtree in pre-order.
    #[must_use]
    pub fn leaf_symbols(&self) -> String {
        let mut symbols = String::new();
        self.collect_leaves(&mut symbols);
        symbols
    }

    fn collect_leaves(&self, symbols: &mut String) {
        if self.is_leaf() {
            symbols.push(self.symbol);
            return;
        }
        for child in &self.children {
            child.collect_leaves(symbols);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_are_collected_left_to_right() {
        let tree = RuleNode::with_children(
            'S',
            vec![
                RuleNode::with_children('T', vec![RuleNode::leaf('t')]),
                RuleNode::with_children('G', vec![RuleNode::leaf('e'), RuleNode::leaf('e')]),
            ],
        );
        assert_eq!(tree.leaf_symbols(), "tee");
        assert_eq!(tree.node_count(), 6);
        assert!(!tree.is_leaf());
    }
}
