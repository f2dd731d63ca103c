//! Swap commitment: one hashlock leaf per enabler plus a timelock leaf for the user,
//! committed into a script tree and bound to a tweaked Taproot output key.

use alloc::vec::Vec;

use log::{debug, warn};

use crate::control_block::ControlBlock;
use crate::error::MastError;
use crate::hash::sha256;
use crate::key::{tweak_seed, TweakedKey, XOnlyPointOps};
use crate::leaf::TAPSCRIPT_LEAF_VERSION;
use crate::proof::{generate_proof, MerkleProof};
use crate::script::{hashlock_script, p2tr_script_pubkey, timelock_script};
use crate::tree::build_tree;
use crate::types::{NodeHash, PubkeyHash, XOnlyKey};

/// Inputs to a swap commitment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapParams {
    /// Scalar for the internal key (e.g. from [`seed_from_evm_address`]).
    pub seed: [u8; 32],
    /// Refund recipient, spends through the timelock leaf.
    pub user: PubkeyHash,
    /// Redeemers, one hashlock leaf each.
    pub enablers: Vec<PubkeyHash>,
    /// SHA-256 commitments to each enabler's secret, same order as `enablers`.
    pub secret_hashes: Vec<[u8; 32]>,
    /// Relative locktime for the refund path (BIP-68 nSequence value).
    pub timelock: u32,
}

/// A built commitment: leaf scripts, tree root, and the keys derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapCommitment {
    leaves: Vec<Vec<u8>>,
    root: NodeHash,
    internal_key: XOnlyKey,
    tweak: [u8; 32],
    output_key: TweakedKey,
}

impl SwapCommitment {
    /// Builds the leaves (hashlocks in enabler order, then the timelock), the tree
    /// root, and the tweaked output key.
    pub fn build<E: XOnlyPointOps + ?Sized>(
        ops: &E,
        params: &SwapParams,
    ) -> Result<Self, MastError> {
        if params.enablers.len() != params.secret_hashes.len() {
            warn!(
                "rejecting swap commitment: {} enablers but {} secret hashes",
                params.enablers.len(),
                params.secret_hashes.len()
            );
            return Err(MastError::EnablerCountMismatch {
                enablers: params.enablers.len(),
                secret_hashes: params.secret_hashes.len(),
            });
        }

        let mut leaves: Vec<Vec<u8>> = params
            .enablers
            .iter()
            .zip(params.secret_hashes.iter())
            .map(|(enabler, secret_hash)| hashlock_script(secret_hash, enabler))
            .collect();
        leaves.push(timelock_script(params.timelock, &params.user));

        let root = build_tree(&leaves)?;
        let (internal_key, tweak, output_key) = tweak_seed(ops, &params.seed, &root)?;

        debug!(
            "swap commitment: {} hashlock leaves, timelock {}, output key {}",
            params.enablers.len(),
            params.timelock,
            hex::encode(output_key.x_only)
        );

        Ok(Self {
            leaves,
            root,
            internal_key,
            tweak,
            output_key,
        })
    }

    /// Leaf scripts in tree order; the timelock leaf is last.
    pub fn leaves(&self) -> &[Vec<u8>] {
        &self.leaves
    }

    /// Index of the timelock leaf.
    pub fn timelock_index(&self) -> usize {
        self.leaves.len() - 1
    }

    pub fn root(&self) -> &NodeHash {
        &self.root
    }

    pub fn internal_key(&self) -> &XOnlyKey {
        &self.internal_key
    }

    pub fn tweak(&self) -> &[u8; 32] {
        &self.tweak
    }

    pub fn output_key(&self) -> &TweakedKey {
        &self.output_key
    }

    /// Segwit v1 output script for funding the commitment.
    pub fn script_pubkey(&self) -> [u8; 34] {
        p2tr_script_pubkey(&self.output_key.x_only)
    }

    /// Inclusion proof for the leaf at `index`.
    pub fn proof(&self, index: usize) -> Result<MerkleProof, MastError> {
        generate_proof(&self.leaves, index)
    }

    /// Control block for spending through the leaf at `index`.
    pub fn control_block(&self, index: usize) -> Result<ControlBlock, MastError> {
        ControlBlock::new(
            TAPSCRIPT_LEAF_VERSION,
            self.output_key.parity,
            self.internal_key,
            self.proof(index)?,
        )
    }
}

/// Internal-key seed from an EVM address: SHA-256 of its 20 raw bytes.
/// A leading `0x` is accepted; hex case does not matter.
pub fn seed_from_evm_address(address: &str) -> Result<[u8; 32], MastError> {
    let digits = address.trim();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits);
    let mut raw = [0u8; 20];
    hex::decode_to_slice(digits, &mut raw).map_err(|_| MastError::InvalidHex)?;
    Ok(sha256(&raw))
}
