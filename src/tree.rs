//! Script tree construction.
//!
//! The tree is reduced level by level with a "largest power-of-two prefix" policy:
//! for a level of `n` nodes, the first `m = 2^floor(log2(n))` nodes are hashed in
//! adjacent pairs and the remaining `n - m` nodes are carried to the next level
//! unchanged, after the new branch nodes. Carried nodes are paired again at the next
//! level by their new position. This is not the balanced BIP-341 layout for
//! non-power-of-two leaf counts, and proofs depend on it exactly, so both the root
//! computation and proof generation go through [`reduce_level`].

use alloc::vec::Vec;

use log::{debug, trace};

use crate::error::MastError;
use crate::hash::tap_branch_hash;
use crate::leaf::{tap_leaf_hash, TapLeaf, TAPSCRIPT_LEAF_VERSION};
use crate::types::NodeHash;

/// Number of nodes at the front of a level of `n` nodes that get paired:
/// the largest power of two not exceeding `n`. `n` must be non-zero.
#[inline]
pub(crate) fn pairing_width(n: usize) -> usize {
    debug_assert!(n > 0);
    1usize << (usize::BITS - 1 - n.leading_zeros())
}

/// One reduction step: `combine` each adjacent pair in the power-of-two prefix,
/// then append the carried tail as-is. A level of zero or one node is returned
/// unchanged.
pub fn reduce_level<T, F>(level: &[T], mut combine: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T, &T) -> T,
{
    if level.len() < 2 {
        return level.to_vec();
    }
    let m = pairing_width(level.len());
    let mut next = Vec::with_capacity(m / 2 + (level.len() - m));
    for pair in level[..m].chunks_exact(2) {
        next.push(combine(&pair[0], &pair[1]));
    }
    next.extend_from_slice(&level[m..]);
    next
}

/// Reduces a level of leaf hashes to the tree root.
pub fn merkle_root(leaf_hashes: &[NodeHash]) -> Result<NodeHash, MastError> {
    if leaf_hashes.is_empty() {
        return Err(MastError::EmptyTree);
    }
    let mut level = leaf_hashes.to_vec();
    let mut depth = 0usize;
    while level.len() > 1 {
        trace!("taptree level {}: {} nodes", depth, level.len());
        level = reduce_level(&level, tap_branch_hash);
        depth += 1;
    }
    debug!(
        "taptree root over {} leaves after {} levels: {}",
        leaf_hashes.len(),
        depth,
        hex::encode(level[0])
    );
    Ok(level[0])
}

/// Leaf hashes for tapscript (0xc0) leaves, in caller order.
pub fn leaf_hashes<S: AsRef<[u8]>>(scripts: &[S]) -> Vec<NodeHash> {
    scripts
        .iter()
        .map(|s| tap_leaf_hash(TAPSCRIPT_LEAF_VERSION, s.as_ref()))
        .collect()
}

/// Root of the tree over tapscript leaves built from `scripts`, in caller order.
pub fn build_tree<S: AsRef<[u8]>>(scripts: &[S]) -> Result<NodeHash, MastError> {
    merkle_root(&leaf_hashes(scripts))
}

/// Root of the tree over leaves that may carry their own leaf versions.
pub fn build_tree_from_leaves(leaves: &[TapLeaf]) -> Result<NodeHash, MastError> {
    let hashes: Vec<NodeHash> = leaves.iter().map(TapLeaf::leaf_hash).collect();
    merkle_root(&hashes)
}
