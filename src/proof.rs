//! Inclusion proofs for the script tree.
//!
//! A proof is the list of sibling hashes met on the way from one leaf to the root,
//! in leaf-to-root order. Levels where the tracked node sits in the carried tail
//! contribute no sibling, so proof length can differ between leaves of one tree.

use alloc::vec;
use alloc::vec::Vec;

use log::debug;

use crate::error::MastError;
use crate::hash::tap_branch_hash;
use crate::leaf::{tap_leaf_hash, TAPSCRIPT_LEAF_VERSION};
use crate::tree::{leaf_hashes, pairing_width, reduce_level};
use crate::types::NodeHash;

/// Sibling path from a leaf up to (not including) the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MerkleProof(Vec<NodeHash>);

impl MerkleProof {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_siblings(siblings: Vec<NodeHash>) -> Self {
        Self(siblings)
    }

    pub fn push(&mut self, hash: NodeHash) {
        self.0.push(hash)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn siblings(&self) -> &[NodeHash] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<NodeHash> {
        self.0
    }

    /// Folds `leaf_hash` through the siblings to a candidate root.
    pub fn compute_root(&self, leaf_hash: &NodeHash) -> NodeHash {
        compute_root(leaf_hash, &self.0)
    }

    /// True when the path from `leaf_hash` ends at `root`.
    pub fn matches_root(&self, leaf_hash: &NodeHash, root: &NodeHash) -> bool {
        self.compute_root(leaf_hash) == *root
    }
}

/// Sibling path for the leaf at `target_index` of the tree over `scripts`.
///
/// Replays the root computation level by level while tracking the target's position.
/// Paired positions (inside the power-of-two prefix) record their partner and move
/// to `index / 2`; carried positions record nothing and keep their offset behind the
/// new branch nodes.
pub fn generate_proof<S: AsRef<[u8]>>(
    scripts: &[S],
    target_index: usize,
) -> Result<MerkleProof, MastError> {
    proof_from_leaf_hashes(&leaf_hashes(scripts), target_index)
}

/// As [`generate_proof`], over precomputed leaf hashes.
pub fn proof_from_leaf_hashes(
    leaf_hashes: &[NodeHash],
    target_index: usize,
) -> Result<MerkleProof, MastError> {
    if target_index >= leaf_hashes.len() {
        return Err(MastError::IndexOutOfRange {
            index: target_index,
            leaves: leaf_hashes.len(),
        });
    }

    let mut level = leaf_hashes.to_vec();
    let mut index = target_index;
    let mut proof = MerkleProof::new();

    while level.len() > 1 {
        let m = pairing_width(level.len());
        if index < m {
            // m is even here, so index ^ 1 is the partner within the prefix.
            proof.push(level[index ^ 1]);
            index /= 2;
        } else {
            index = m / 2 + (index - m);
        }
        level = reduce_level(&level, tap_branch_hash);
    }

    debug!(
        "merkle proof for leaf {}/{}: {} siblings",
        target_index,
        leaf_hashes.len(),
        proof.len()
    );
    Ok(proof)
}

/// Sibling paths for every leaf, computed in one bottom-up pass.
///
/// Each node carries the indices of the leaves beneath it; when two nodes are
/// paired, every leaf under one side records the other side's hash.
pub fn generate_all_proofs<S: AsRef<[u8]>>(scripts: &[S]) -> Result<Vec<MerkleProof>, MastError> {
    let hashes = leaf_hashes(scripts);
    if hashes.is_empty() {
        return Err(MastError::EmptyTree);
    }

    let mut proofs = vec![MerkleProof::new(); hashes.len()];
    let mut level: Vec<(NodeHash, Vec<usize>)> = hashes
        .iter()
        .enumerate()
        .map(|(i, h)| (*h, vec![i]))
        .collect();

    while level.len() > 1 {
        level = reduce_level(&level, |left, right| {
            for &leaf in &left.1 {
                proofs[leaf].push(right.0);
            }
            for &leaf in &right.1 {
                proofs[leaf].push(left.0);
            }
            let mut leaves = Vec::with_capacity(left.1.len() + right.1.len());
            leaves.extend_from_slice(&left.1);
            leaves.extend_from_slice(&right.1);
            (tap_branch_hash(&left.0, &right.0), leaves)
        });
    }

    Ok(proofs)
}

/// Folds a leaf hash with an ordered sibling list into a candidate root.
pub fn compute_root(leaf_hash: &NodeHash, siblings: &[NodeHash]) -> NodeHash {
    siblings
        .iter()
        .fold(*leaf_hash, |acc, sibling| tap_branch_hash(&acc, sibling))
}

/// Candidate root for a tapscript leaf and its proof. Comparing the result
/// against a known root is left to the caller.
pub fn verify_proof(script: &[u8], proof: &MerkleProof) -> NodeHash {
    compute_root(&tap_leaf_hash(TAPSCRIPT_LEAF_VERSION, script), proof.siblings())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build_tree;

    fn scripts(n: usize) -> Vec<Vec<u8>> {
        (0..n).map(|i| vec![(i % 256) as u8, (i / 256) as u8]).collect()
    }

    #[test]
    fn out_of_range_index_fails() {
        let s = scripts(3);
        assert_eq!(
            generate_proof(&s, 3),
            Err(MastError::IndexOutOfRange { index: 3, leaves: 3 })
        );
        let empty: Vec<Vec<u8>> = Vec::new();
        assert_eq!(
            generate_proof(&empty, 0),
            Err(MastError::IndexOutOfRange { index: 0, leaves: 0 })
        );
    }

    #[test]
    fn single_leaf_has_empty_proof() {
        let s = scripts(1);
        let proof = generate_proof(&s, 0).expect("proof");
        assert!(proof.is_empty());
        assert_eq!(verify_proof(&s[0], &proof), build_tree(&s).expect("root"));
    }

    #[test]
    fn pair_proof_is_the_other_leaf() {
        let s = scripts(2);
        let h = leaf_hashes(&s);
        assert_eq!(generate_proof(&s, 0).expect("proof").siblings(), &[h[1]]);
        assert_eq!(generate_proof(&s, 1).expect("proof").siblings(), &[h[0]]);
    }

    #[test]
    fn carried_leaf_skips_levels() {
        // 5 leaves: leaf 4 is carried twice and only paired at the top.
        let s = scripts(5);
        let h = leaf_hashes(&s);
        assert_eq!(generate_proof(&s, 0).expect("proof").len(), 3);
        let top = generate_proof(&s, 4).expect("proof");
        let left = tap_branch_hash(&tap_branch_hash(&h[0], &h[1]), &tap_branch_hash(&h[2], &h[3]));
        assert_eq!(top.siblings(), &[left]);
    }

    #[test]
    fn carried_pair_is_paired_together() {
        // 6 leaves: leaves 4 and 5 are carried, then paired with each other.
        let s = scripts(6);
        let h = leaf_hashes(&s);
        let proof = generate_proof(&s, 5).expect("proof");
        assert_eq!(proof.len(), 2);
        assert_eq!(proof.siblings()[0], h[4]);
    }

    #[test]
    fn every_index_round_trips_for_small_trees() {
        for n in 1..=40 {
            let s = scripts(n);
            let root = build_tree(&s).expect("root");
            for i in 0..n {
                let proof = generate_proof(&s, i).expect("proof");
                assert_eq!(verify_proof(&s[i], &proof), root, "n={} i={}", n, i);
            }
        }
    }

    #[test]
    fn all_proofs_agree_with_single_proofs() {
        for n in 1..=40 {
            let s = scripts(n);
            let all = generate_all_proofs(&s).expect("proofs");
            assert_eq!(all.len(), n);
            for (i, proof) in all.iter().enumerate() {
                assert_eq!(proof, &generate_proof(&s, i).expect("proof"), "n={} i={}", n, i);
            }
        }
    }

    #[test]
    fn tampered_proof_misses_root() {
        let s = scripts(7);
        let root = build_tree(&s).expect("root");
        let mut siblings = generate_proof(&s, 2).expect("proof").into_inner();
        siblings[0][0] ^= 0x01;
        let leaf = tap_leaf_hash(TAPSCRIPT_LEAF_VERSION, &s[2]);
        assert!(!MerkleProof::from_siblings(siblings).matches_root(&leaf, &root));
    }
}
