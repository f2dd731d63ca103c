//! Control block for a script-path spend:
//! `(leaf_version | output_key_parity) || internal_key || merkle_path...`

use alloc::vec::Vec;

use crate::error::MastError;
use crate::key::{derive_output_key, tap_tweak_hash, XOnlyPointOps};
use crate::leaf::tap_leaf_hash;
use crate::proof::MerkleProof;
use crate::types::{NodeHash, XOnlyKey};

pub const TAPROOT_CONTROL_BASE_SIZE: usize = 33;
pub const TAPROOT_CONTROL_NODE_SIZE: usize = 32;
pub const TAPROOT_CONTROL_MAX_NODE_COUNT: usize = 128;
pub const TAPROOT_CONTROL_MAX_SIZE: usize =
    TAPROOT_CONTROL_BASE_SIZE + TAPROOT_CONTROL_NODE_SIZE * TAPROOT_CONTROL_MAX_NODE_COUNT;

const TAPROOT_LEAF_MASK: u8 = 0xfe;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlBlock {
    pub leaf_version: u8,
    pub output_key_parity: u8,
    pub internal_key: XOnlyKey,
    pub merkle_path: MerkleProof,
}

impl ControlBlock {
    pub fn new(
        leaf_version: u8,
        output_key_parity: u8,
        internal_key: XOnlyKey,
        merkle_path: MerkleProof,
    ) -> Result<Self, MastError> {
        if leaf_version & !TAPROOT_LEAF_MASK != 0 {
            return Err(MastError::InvalidLeafVersion(leaf_version));
        }
        if merkle_path.len() > TAPROOT_CONTROL_MAX_NODE_COUNT {
            return Err(MastError::ProofTooLong(merkle_path.len()));
        }
        Ok(Self {
            leaf_version,
            output_key_parity: output_key_parity & 1,
            internal_key,
            merkle_path,
        })
    }

    pub fn size(&self) -> usize {
        TAPROOT_CONTROL_BASE_SIZE + TAPROOT_CONTROL_NODE_SIZE * self.merkle_path.len()
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size());
        out.push(self.leaf_version | self.output_key_parity);
        out.extend_from_slice(&self.internal_key);
        for node in self.merkle_path.siblings() {
            out.extend_from_slice(node);
        }
        out
    }

    /// Parses a serialized control block. The internal key is not checked against
    /// the curve here; [`ControlBlock::verify_script`] does that through the backend.
    pub fn from_slice(data: &[u8]) -> Result<Self, MastError> {
        if data.len() < TAPROOT_CONTROL_BASE_SIZE
            || data.len() > TAPROOT_CONTROL_MAX_SIZE
            || (data.len() - TAPROOT_CONTROL_BASE_SIZE) % TAPROOT_CONTROL_NODE_SIZE != 0
        {
            return Err(MastError::InvalidControlBlockSize(data.len()));
        }
        let mut internal_key = [0u8; 32];
        internal_key.copy_from_slice(&data[1..TAPROOT_CONTROL_BASE_SIZE]);
        let merkle_path = data[TAPROOT_CONTROL_BASE_SIZE..]
            .chunks_exact(TAPROOT_CONTROL_NODE_SIZE)
            .map(|chunk| {
                let mut node: NodeHash = [0u8; 32];
                node.copy_from_slice(chunk);
                node
            })
            .collect();
        Ok(Self {
            leaf_version: data[0] & TAPROOT_LEAF_MASK,
            output_key_parity: data[0] & !TAPROOT_LEAF_MASK,
            internal_key,
            merkle_path: MerkleProof::from_siblings(merkle_path),
        })
    }

    /// Checks that `script` under this control block commits to `output_key`:
    /// rebuilds the root from the leaf and path, tweaks the internal key with it,
    /// and compares both the x-coordinate and the parity bit.
    pub fn verify_script<E: XOnlyPointOps + ?Sized>(
        &self,
        ops: &E,
        output_key: &XOnlyKey,
        script: &[u8],
    ) -> Result<bool, MastError> {
        let leaf_hash = tap_leaf_hash(self.leaf_version, script);
        let root = self.merkle_path.compute_root(&leaf_hash);
        let tweak = tap_tweak_hash(&self.internal_key, &root);
        let tweaked = derive_output_key(ops, &self.internal_key, &tweak)?;
        Ok(tweaked.x_only == *output_key && tweaked.parity == self.output_key_parity)
    }
}
