//! BIP-340 tagged hashing: SHA256(SHA256(tag) || SHA256(tag) || x).
//! Domain separation for leaf, branch, and tweak hashes of the script tree.

use crate::types::hashes::{sha256, Hash, HashEngine};
use crate::types::NodeHash;

pub const TAP_LEAF_TAG: &[u8] = b"TapLeaf";
pub const TAP_BRANCH_TAG: &[u8] = b"TapBranch";
pub const TAP_TWEAK_TAG: &[u8] = b"TapTweak";

/// Plain (untagged) SHA-256.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    sha256::Hash::hash(data).to_byte_array()
}

/// BIP-340 tagged hash of `data` under `tag`.
pub fn tagged_hash(tag: &[u8], data: &[u8]) -> [u8; 32] {
    let tag_hash = sha256::Hash::hash(tag).to_byte_array();
    let mut engine = sha256::Hash::engine();
    engine.input(&tag_hash);
    engine.input(&tag_hash);
    engine.input(data);
    sha256::Hash::from_engine(engine).to_byte_array()
}

/// TapBranch hash of two child nodes. Children are sorted first, so the
/// result does not depend on argument order.
pub fn tap_branch_hash(a: &NodeHash, b: &NodeHash) -> NodeHash {
    let (lo, hi) = if b < a { (b, a) } else { (a, b) };
    let mut preimage = [0u8; 64];
    preimage[..32].copy_from_slice(lo);
    preimage[32..].copy_from_slice(hi);
    tagged_hash(TAP_BRANCH_TAG, &preimage)
}
