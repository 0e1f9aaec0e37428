//! Huffman tree construction.
//!
//! Provides the greedy merge that turns a [`FrequencyTable`] into an optimal
//! prefix-code tree.
//!
//! # Historical Context
//!
//! David Huffman (1952) developed this algorithm as a term paper at MIT.
//! It was the first practical algorithm for constructing optimal prefix codes.
//!
//! # Layout
//!
//! Every node lives in one arena owned by [`HuffmanTree`]; links are
//! [`NodeId`] indices. Parent links are written once, when the node is merged,
//! and never touched again, so depth queries walk a frozen structure.
//! Dropping the tree frees all nodes together.

use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::frequency::{FrequencyTable, Symbol, ALPHABET_SIZE};
use crate::pqueue::PriorityQueue;

/// Index of a node in a [`HuffmanTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Leaf or internal node payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// An alphabet symbol.
    Leaf(Symbol),
    /// A merge of two subtrees; `left` was extracted first.
    Internal {
        /// Branch bit 0.
        left: NodeId,
        /// Branch bit 1.
        right: NodeId,
    },
}

/// A node of the coding tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    weight: u64,
    parent: Option<NodeId>,
    kind: NodeKind,
}

impl Node {
    /// Occurrence count (leaf) or sum of both children (internal).
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// The node this one was merged into; `None` only for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Leaf symbol or child links.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The symbol, if this is a leaf.
    pub fn symbol(&self) -> Option<Symbol> {
        match self.kind {
            NodeKind::Leaf(symbol) => Some(symbol),
            NodeKind::Internal { .. } => None,
        }
    }
}

/// Queue entry: the weight travels with the id so ordering needs no arena access.
#[derive(Debug, Clone, Copy)]
struct Pending {
    weight: u64,
    id: NodeId,
}

// Equal weights are "not less"; which one comes out first is up to the heap.
fn by_weight(a: &Pending, b: &Pending) -> Ordering {
    a.weight.cmp(&b.weight)
}

/// An optimal prefix-code tree over the present symbols of a frequency table.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
    leaves: [Option<NodeId>; ALPHABET_SIZE],
}

impl HuffmanTree {
    /// Build the tree for `table`.
    ///
    /// Every byte with a non-zero count becomes a leaf, and so does the
    /// sentinel, whatever its count. The two lightest entries are merged until
    /// one remains. With only the sentinel present the tree is that single leaf.
    ///
    /// # Errors
    /// Returns `Error::WeightOverflow` if a merged weight exceeds `u64`, and
    /// propagates queue allocation failures.
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        let mut nodes = Vec::with_capacity(2 * ALPHABET_SIZE - 1);
        let mut leaves = [None; ALPHABET_SIZE];
        let mut queue = PriorityQueue::new(by_weight);

        for symbol in table.present_symbols() {
            let id = NodeId(nodes.len());
            let weight = table.get(symbol);
            nodes.push(Node {
                weight,
                parent: None,
                kind: NodeKind::Leaf(symbol),
            });
            leaves[symbol.index()] = Some(id);
            queue.insert(Pending { weight, id })?;
        }

        while queue.len() > 1 {
            let a = queue.extract_min()?;
            let b = queue.extract_min()?;
            let weight = a
                .weight
                .checked_add(b.weight)
                .ok_or(Error::WeightOverflow(a.weight, b.weight))?;
            let id = NodeId(nodes.len());
            nodes[a.id.0].parent = Some(id);
            nodes[b.id.0].parent = Some(id);
            nodes.push(Node {
                weight,
                parent: None,
                kind: NodeKind::Internal {
                    left: a.id,
                    right: b.id,
                },
            });
            trace!(left = a.weight, right = b.weight, merged = weight, "merged nodes");
            queue.insert(Pending { weight, id })?;
        }

        let root = queue.extract_min()?.id;
        let tree = Self {
            nodes,
            root,
            leaves,
        };
        debug!(
            leaves = tree.leaf_count(),
            nodes = tree.len(),
            weight = tree.nodes[root.0].weight,
            max_depth = tree.max_depth(),
            "built huffman tree"
        );
        Ok(tree)
    }

    /// Count `bytes` and build the tree in one step.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::build(&FrequencyTable::from_bytes(bytes))
    }

    /// The node without a parent.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node; `None` if `id` belongs to another tree.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Total number of nodes (leaves and internal).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds at least the sentinel leaf.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of leaves, sentinel included.
    pub fn leaf_count(&self) -> usize {
        self.leaves.iter().flatten().count()
    }

    /// The leaf holding `symbol`, if it was present.
    pub fn leaf(&self, symbol: Symbol) -> Option<NodeId> {
        self.leaves[symbol.index()]
    }

    /// Leaves in table order, sentinel last.
    pub fn leaves(&self) -> impl Iterator<Item = (Symbol, NodeId)> + '_ {
        self.leaves
            .iter()
            .enumerate()
            .filter_map(|(i, id)| Some((Symbol::from_index(i)?, (*id)?)))
    }

    /// Number of edges from `id` up to the root; `None` if `id` is not in this tree.
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        let mut depth = 0;
        let mut current = self.node(id)?;
        // Parents are always pushed after their children, so the walk terminates.
        while let Some(parent) = current.parent {
            depth += 1;
            current = self.node(parent)?;
        }
        Some(depth)
    }

    /// Code length of `symbol`, if it has a leaf.
    pub fn depth_of(&self, symbol: Symbol) -> Option<usize> {
        self.depth(self.leaf(symbol)?)
    }

    /// Root-to-leaf branch bits for `symbol` (0 = left, 1 = right).
    pub fn code(&self, symbol: Symbol) -> Option<Vec<u8>> {
        let mut current = self.leaf(symbol)?;
        let mut bits = Vec::new();
        while let Some(parent) = self.node(current)?.parent {
            let bit = match self.node(parent)?.kind {
                NodeKind::Internal { left, .. } if left == current => 0,
                _ => 1,
            };
            bits.push(bit);
            current = parent;
        }
        bits.reverse();
        Some(bits)
    }

    /// Leaves paired with their depths.
    fn leaf_depths(&self) -> impl Iterator<Item = (&Node, usize)> + '_ {
        self.leaves()
            .filter_map(|(_, id)| Some((self.node(id)?, self.depth(id)?)))
    }

    /// Σ weight × depth over all leaves; `None` if the sum overflows `u64`.
    pub fn weighted_path_length(&self) -> Option<u64> {
        self.leaf_depths().try_fold(0u64, |acc, (node, depth)| {
            acc.checked_add(node.weight.checked_mul(depth as u64)?)
        })
    }

    /// Σ 2^(-depth) over all leaves, sentinel included.
    pub fn kraft_sum(&self) -> f64 {
        self.leaf_depths()
            .map(|(_, depth)| 0.5f64.powi(depth as i32))
            .sum()
    }

    /// Length of the longest code.
    pub fn max_depth(&self) -> usize {
        self.leaf_depths()
            .map(|(_, depth)| depth)
            .max()
            .unwrap_or(0)
    }
}
