use core::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::codec::frequency::FrequencyTable;

if_tracing! {
    use tracing::debug;
}

/// Index of a node inside its [`HuffmanTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf { symbol: char, weight: u64 },
    Internal { weight: u64, left: NodeId, right: NodeId },
}

impl HuffmanNode {
    pub const fn weight(&self) -> u64 {
        match *self {
            Self::Leaf { weight, .. } | Self::Internal { weight, .. } => weight,
        }
    }
}

/// A Huffman tree stored as an arena.
///
/// Nodes are appended in the order they enter the priority queue: first one leaf per table entry,
/// then each internal node as it is formed. The queue is keyed by `(weight, NodeId)`, so among equal
/// weights the node inserted first is extracted first. The encoder and decoder both build from the
/// same table order and therefore get identical trees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<HuffmanNode>,
    root: Option<NodeId>,
}

impl HuffmanTree {
    /// Greedy construction: merge the two lightest nodes until one remains.
    ///
    /// An empty table gives a tree without a root. A table with one symbol gives a tree whose root
    /// is that symbol's leaf.
    pub fn build(table: &FrequencyTable) -> Self {
        let leaves = table.len();
        let mut nodes = Vec::with_capacity((2 * leaves).saturating_sub(1));
        let mut queue = BinaryHeap::with_capacity(leaves);

        for (symbol, weight) in table.iter() {
            let id = NodeId(nodes.len());
            nodes.push(HuffmanNode::Leaf { symbol, weight });
            queue.push(Reverse((weight, id)));
        }

        let root = loop {
            let Some(Reverse((left_weight, left))) = queue.pop() else {
                break None;
            };
            let Some(Reverse((right_weight, right))) = queue.pop() else {
                break Some(left);
            };
            let weight = left_weight + right_weight;
            let id = NodeId(nodes.len());
            nodes.push(HuffmanNode::Internal { weight, left, right });
            queue.push(Reverse((weight, id)));
        };

        if_tracing! {{
            debug!(target = "tree", leaves = leaves, nodes = nodes.len(), root_weight = ?root.map(|id| nodes[id.0].weight()), "tree built");
        }}

        Self { nodes, root }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &HuffmanNode {
        &self.nodes[id.0]
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| matches!(node, HuffmanNode::Leaf { .. })).count()
    }

    pub fn internal_count(&self) -> usize {
        self.nodes.len() - self.leaf_count()
    }
}
