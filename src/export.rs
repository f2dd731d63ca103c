//! JSON view of a built commitment: everything a spender needs, as hex strings.

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::commitment::SwapCommitment;
use crate::error::MastError;

/// One leaf with its inclusion proof and control block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafExport {
    pub index: usize,
    pub script: String,
    pub merkle_proof: Vec<String>,
    pub control_block: String,
}

/// Serializable summary of a [`SwapCommitment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentExport {
    pub merkle_root: String,
    pub internal_key: String,
    pub tweak: String,
    pub output_key: String,
    pub output_key_parity: u8,
    pub script_pubkey: String,
    pub leaves: Vec<LeafExport>,
}

impl CommitmentExport {
    pub fn from_commitment(commitment: &SwapCommitment) -> Result<Self, MastError> {
        let leaves = commitment
            .leaves()
            .iter()
            .enumerate()
            .map(|(index, script)| {
                let control_block = commitment.control_block(index)?;
                Ok(LeafExport {
                    index,
                    script: hex::encode(script),
                    merkle_proof: control_block
                        .merkle_path
                        .siblings()
                        .iter()
                        .map(hex::encode)
                        .collect(),
                    control_block: hex::encode(control_block.serialize()),
                })
            })
            .collect::<Result<Vec<_>, MastError>>()?;

        Ok(Self {
            merkle_root: hex::encode(commitment.root()),
            internal_key: hex::encode(commitment.internal_key()),
            tweak: hex::encode(commitment.tweak()),
            output_key: hex::encode(commitment.output_key().x_only),
            output_key_parity: commitment.output_key().parity,
            script_pubkey: hex::encode(commitment.script_pubkey()),
            leaves,
        })
    }

    pub fn to_json(&self) -> Result<String, MastError> {
        serde_json::to_string_pretty(self).map_err(|_| MastError::EncodingError)
    }

    pub fn from_json(json: &str) -> Result<Self, MastError> {
        serde_json::from_str(json).map_err(|_| MastError::EncodingError)
    }
}
