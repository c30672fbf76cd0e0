//! Binary serialization of the huffman tree.
//!
//! The tree is written in pre-order. Each node begins with a 1-byte tag:
//! - [`LEAF_TAG`] is followed by the symbol code point and the frequency, both as little-endian `u32`;
//! - [`INTERNAL_TAG`] is followed by the left subtree and then the right subtree.
//!
//! Frequencies of internal nodes are not stored, as they are sums of the frequencies of their leaves.
//! The null tree is serialized to the empty sequence.

use std::collections::HashSet;
use std::io::Write;

use binout::{read_int, write_int};

use crate::{Error, Node, NodeIndex, Result, Symbol, Tree};

/// Tag of an internal node.
pub const INTERNAL_TAG: u8 = 0;

/// Tag of a leaf.
pub const LEAF_TAG: u8 = 1;

/// Number of bytes occupied by a serialized leaf.
pub const LEAF_BYTES: usize = 1 + 2 * std::mem::size_of::<u32>();

/// Returns number of bytes which `serialize_tree` will produce for `tree`.
pub fn serialized_tree_len<S>(tree: &Tree<S>) -> usize {
    let leaves = tree.leaf_count();
    leaves * LEAF_BYTES + (tree.len() - leaves)
}

/// Writes `tree` to the given `output`.
///
/// The number of bytes written is given by [`serialized_tree_len`].
pub fn write_tree<S: Symbol>(output: &mut dyn Write, tree: &Tree<S>) -> std::io::Result<()> {
    tree.pre_order().try_for_each(|(_, node, _)| match *node {
        Node::Leaf { symbol, frequency } => {
            write_int!(output, LEAF_TAG)?;
            write_int!(output, symbol.to_u32())?;
            write_int!(output, frequency)
        }
        Node::Internal { .. } => write_int!(output, INTERNAL_TAG)
    })
}

/// Serializes `tree` to bytes.
pub fn serialize_tree<S: Symbol>(tree: &Tree<S>) -> Result<Vec<u8>> {
    let mut result = Vec::with_capacity(serialized_tree_len(tree));
    write_tree(&mut result, tree)?;
    Ok(result)
}

/// Internal node whose subtrees are being read.
struct Pending {
    left: Option<NodeIndex>,
}

/// Deserializes the tree from the whole `bytes` (written by [`serialize_tree`]).
///
/// Fails with [`Error::MalformedTree`] if `bytes` end before the tree is complete,
/// contain anything after the complete tree, include a tag other than
/// [`LEAF_TAG`] or [`INTERNAL_TAG`], a symbol outside the alphabet `S` or the same symbol twice.
pub fn deserialize_tree<S: Symbol>(bytes: &[u8]) -> Result<Tree<S>> {
    if bytes.is_empty() { return Ok(Tree::empty()); }
    let mut input = bytes;
    let mut nodes = Vec::new();
    let mut pending = Vec::<Pending>::new();
    let mut symbols = HashSet::new();
    loop {
        let tag = read_int!(&mut input, u8).map_err(|_| Error::MalformedTree("tree ends before all its nodes"))?;
        let mut completed = match tag {
            LEAF_TAG => {
                let code_point = read_int!(&mut input, u32).map_err(|_| Error::MalformedTree("leaf is truncated"))?;
                let frequency = read_int!(&mut input, u32).map_err(|_| Error::MalformedTree("leaf is truncated"))?;
                let symbol = S::from_u32(code_point).ok_or(Error::MalformedTree("leaf symbol is outside the alphabet"))?;
                if !symbols.insert(code_point) { return Err(Error::MalformedTree("symbol is assigned to more than one leaf")); }
                nodes.push(Node::Leaf { symbol, frequency });
                nodes.len() - 1
            }
            INTERNAL_TAG => {
                pending.push(Pending { left: None });
                continue;
            }
            _ => return Err(Error::MalformedTree("unknown node tag"))
        };
        // attach the completed subtree to its parent, completing the parents that got both children
        loop {
            match pending.last_mut() {
                None => {
                    return if input.is_empty() {
                        log::trace!("deserialized tree of {} nodes", nodes.len());
                        Ok(Tree::from_arena(nodes))
                    } else {
                        Err(Error::MalformedTree("bytes left after the complete tree"))
                    }
                }
                Some(Pending { left: left @ None }) => {
                    *left = Some(completed);
                    break;
                }
                Some(Pending { left: Some(left) }) => {
                    let (left, right) = (*left, completed);
                    pending.pop();
                    let frequency = nodes[left].frequency().checked_add(nodes[right].frequency())
                        .ok_or(Error::MalformedTree("total frequency exceeds 32 bits"))?;
                    nodes.push(Node::Internal { frequency, left, right });
                    completed = nodes.len() - 1;
                }
            }
        }
    }
}
