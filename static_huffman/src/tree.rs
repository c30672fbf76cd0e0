//! Huffman tree stored in an arena, and its construction from frequencies.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use std::iter::FusedIterator;

use dyn_size_of::GetSize;

use crate::{Error, Frequencies, Result, Symbol};
use crate::frequencies::count_symbols;

/// Index of a node in the arena of [`Tree`].
pub type NodeIndex = usize;

/// Node of the huffman tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Node<S> {
    /// Leaf that holds a symbol and the number of its occurrences.
    Leaf { symbol: S, frequency: u32 },
    /// Internal node with exactly two children; its frequency is the sum of the children's frequencies.
    Internal { frequency: u32, left: NodeIndex, right: NodeIndex },
}

impl<S> Node<S> {
    /// Returns frequency of `self`.
    #[inline] pub fn frequency(&self) -> u32 {
        match self {
            Node::Leaf { frequency, .. } | Node::Internal { frequency, .. } => *frequency
        }
    }

    /// Returns whether `self` is a leaf.
    #[inline] pub fn is_leaf(&self) -> bool { matches!(self, Node::Leaf { .. }) }
}

impl<S> GetSize for Node<S> {}

/// Huffman tree.
///
/// Nodes are kept in an arena, children always precede their parents,
/// so the root (if any) is the last node.
/// The tree without any nodes is the null tree.
#[derive(Clone, Debug)]
pub struct Tree<S> {
    nodes: Vec<Node<S>>,
}

impl<S> GetSize for Tree<S> {
    fn size_bytes_dyn(&self) -> usize { self.nodes.size_bytes_dyn() }
    fn size_bytes_content_dyn(&self) -> usize { self.nodes.size_bytes_content_dyn() }
    const USES_DYN_MEM: bool = true;
}

impl<S> Default for Tree<S> {
    fn default() -> Self { Self::empty() }
}

/// Priority of a node in the queue used during construction.
/// The node with the lowest frequency goes first. Ties are broken:
/// leaves before internal nodes, leaves by symbol code point, internal nodes by creation order.
type Priority = Reverse<(u32, bool, u32, NodeIndex)>;

impl<S> Tree<S> {
    /// Returns the null tree.
    pub fn empty() -> Self { Self { nodes: Vec::new() } }

    /// Constructs the tree from `nodes` which must satisfy the invariants of arena layout.
    pub(crate) fn from_arena(nodes: Vec<Node<S>>) -> Self { Self { nodes } }

    /// Returns whether `self` is the null tree.
    #[inline] pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    /// Returns the number of nodes.
    #[inline] pub fn len(&self) -> usize { self.nodes.len() }

    /// Returns index of the root or `None` for the null tree.
    #[inline] pub fn root(&self) -> Option<NodeIndex> { self.nodes.len().checked_sub(1) }

    /// Returns the node with given `index`.
    #[inline] pub fn node(&self, index: NodeIndex) -> &Node<S> { &self.nodes[index] }

    /// Returns all nodes, in the arena order.
    #[inline] pub fn nodes(&self) -> &[Node<S>] { &self.nodes }

    /// Returns the number of leaves, which equals the number of distinct symbols.
    pub fn leaf_count(&self) -> usize { self.nodes.iter().filter(|n| n.is_leaf()).count() }

    /// Returns whether the tree consists of a single leaf.
    #[inline] pub fn is_single_leaf(&self) -> bool { self.nodes.len() == 1 }

    /// Returns frequency of the root (the total number of symbols), `0` for the null tree.
    pub fn frequency(&self) -> u32 {
        self.root().map_or(0, |r| self.nodes[r].frequency())
    }

    /// Returns iterator over nodes in pre-order (node, left subtree, right subtree).
    pub fn pre_order(&self) -> PreOrder<'_, S> { PreOrder::new(self) }

    /// Returns the length of the longest path from the root to a leaf (`0` for a single leaf and the null tree).
    pub fn depth(&self) -> u32 {
        self.pre_order().map(|(_, _, depth)| depth).max().unwrap_or(0)
    }
}

impl<S: Symbol> Tree<S> {
    /// Constructs the huffman tree for given `frequencies` of symbols.
    ///
    /// The construction is deterministic, independently of the iteration order of `frequencies`:
    /// the node with the lowest frequency is taken first, the leaf before the internal node,
    /// leaves by increasing symbol code point and internal nodes in order of their creation.
    /// The first node taken becomes the left child, the second one the right child.
    pub fn from_frequencies<F: Frequencies<Value = S>>(frequencies: F) -> Result<Self> {
        let total = frequencies.total();
        let (symbols, freq) = frequencies.into_sorted();
        if symbols.is_empty() { return Err(Error::EmptyInput); }
        if total > u32::MAX as u64 { return Err(Error::ContentTooLarge { symbols: total as usize }); }

        let mut nodes = Vec::with_capacity(2 * symbols.len() - 1);
        let mut queue = BinaryHeap::<Priority>::with_capacity(symbols.len());
        for (symbol, frequency) in symbols.iter().zip(freq.iter()) {
            queue.push(Reverse((*frequency, false, symbol.to_u32(), nodes.len())));
            nodes.push(Node::Leaf { symbol: *symbol, frequency: *frequency });
        }
        let mut created = 0u32;
        while let (Some(Reverse((left_freq, _, _, left))), Some(Reverse((right_freq, _, _, right)))) = (queue.pop(), queue.pop()) {
            let frequency = left_freq + right_freq;    // cannot overflow as total fits in u32
            queue.push(Reverse((frequency, true, created, nodes.len())));
            nodes.push(Node::Internal { frequency, left, right });
            created += 1;
        }
        log::trace!("built huffman tree of {} leaves and {} internal nodes", symbols.len(), created);
        Ok(Self { nodes })
    }

    /// Counts occurrences of all symbols exposed by `iter` and constructs the huffman tree for them.
    pub fn from_symbols<Iter: IntoIterator<Item = S>>(iter: Iter) -> Result<Self> {
        Self::from_frequencies(count_symbols(iter)?)
    }
}

impl<S: PartialEq> PartialEq for Tree<S> {
    /// Checks whether `self` and `other` have the same shape, symbols and frequencies
    /// (independently of the arena layout).
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() &&
        self.pre_order().zip(other.pre_order()).all(|((_, a, _), (_, b, _))| match (a, b) {
            (Node::Leaf { symbol: sa, frequency: fa }, Node::Leaf { symbol: sb, frequency: fb }) => sa == sb && fa == fb,
            (Node::Internal { frequency: fa, .. }, Node::Internal { frequency: fb, .. }) => fa == fb,
            _ => false
        })
    }
}

impl<S: Eq> Eq for Tree<S> {}

impl<S: Symbol> fmt::Display for Tree<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = Vec::new();
        if let Some(root) = self.root() { stack.push((root, 0usize, "root")); }
        while let Some((index, depth, label)) = stack.pop() {
            write!(f, "{:indent$}{}-> ", "", label, indent = 2 * depth)?;
            match self.nodes[index] {
                Node::Leaf { symbol, frequency } =>
                    writeln!(f, "leaf {} [frequency: {}]", symbol.describe(), frequency)?,
                Node::Internal { frequency, left, right } => {
                    writeln!(f, "internal [frequency: {}]", frequency)?;
                    stack.push((right, depth + 1, "R"));
                    stack.push((left, depth + 1, "L"));
                }
            }
        }
        Ok(())
    }
}

/// Iterator over the nodes of [`Tree`] in pre-order.
///
/// For each node, it exposes the tuple that consists of: index of the node, the node, and its depth.
pub struct PreOrder<'tree, S> {
    tree: &'tree Tree<S>,
    stack: Vec<(NodeIndex, u32)>,
}

impl<'tree, S> PreOrder<'tree, S> {
    fn new(tree: &'tree Tree<S>) -> Self {
        Self { tree, stack: tree.root().map(|r| (r, 0)).into_iter().collect() }
    }
}

impl<'tree, S> Iterator for PreOrder<'tree, S> {
    type Item = (NodeIndex, &'tree Node<S>, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let (index, depth) = self.stack.pop()?;
        let node = &self.tree.nodes[index];
        if let Node::Internal { left, right, .. } = node {
            self.stack.push((*right, depth + 1));
            self.stack.push((*left, depth + 1));
        }
        Some((index, node, depth))
    }
}

impl<'tree, S> FusedIterator for PreOrder<'tree, S> {}
