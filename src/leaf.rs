//! TapLeaf serialization: `leaf_version || CompactSize(script.len()) || script`.

use alloc::vec::Vec;

use crate::compact_size::{compact_size_len, read_compact_size, write_compact_size};
use crate::error::MastError;
use crate::hash::{tagged_hash, TAP_LEAF_TAG};
use crate::types::NodeHash;

/// Leaf version for BIP-342 tapscript.
pub const TAPSCRIPT_LEAF_VERSION: u8 = 0xc0;

/// One alternative spending condition in the script tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TapLeaf {
    version: u8,
    script: Vec<u8>,
}

impl TapLeaf {
    /// Tapscript leaf (version 0xc0).
    pub fn new(script: Vec<u8>) -> Self {
        Self {
            version: TAPSCRIPT_LEAF_VERSION,
            script,
        }
    }

    /// Leaf with an explicit version. The low bit is reserved for the output key
    /// parity in a control block, so odd versions are rejected.
    pub fn with_version(version: u8, script: Vec<u8>) -> Result<Self, MastError> {
        if version & 0x01 != 0 {
            return Err(MastError::InvalidLeafVersion(version));
        }
        Ok(Self { version, script })
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn script(&self) -> &[u8] {
        &self.script
    }

    /// Byte string that gets tagged-hashed as the tree leaf.
    pub fn serialize(&self) -> Vec<u8> {
        serialize_leaf(self.version, &self.script)
    }

    /// Parses a serialized leaf. The whole slice must be consumed.
    pub fn from_serialized(data: &[u8]) -> Result<Self, MastError> {
        let (&version, rest) = data.split_first().ok_or(MastError::IncompleteData)?;
        let (script_len, prefix_len) = read_compact_size(rest)?;
        let body = &rest[prefix_len..];
        let script_len = usize::try_from(script_len).map_err(|_| MastError::IncompleteData)?;
        if body.len() < script_len {
            return Err(MastError::IncompleteData);
        }
        if body.len() > script_len {
            return Err(MastError::TrailingData(body.len() - script_len));
        }
        Self::with_version(version, body.to_vec())
    }

    /// TapLeaf tagged hash of this leaf.
    pub fn leaf_hash(&self) -> NodeHash {
        tap_leaf_hash(self.version, &self.script)
    }
}

/// Serializes `(version, script)` with a canonical CompactSize length prefix.
pub fn serialize_leaf(version: u8, script: &[u8]) -> Vec<u8> {
    let len = script.len() as u64;
    let mut out = Vec::with_capacity(1 + compact_size_len(len) + script.len());
    out.push(version);
    write_compact_size(&mut out, len);
    out.extend_from_slice(script);
    out
}

/// TapLeaf hash of `(version, script)`.
pub fn tap_leaf_hash(version: u8, script: &[u8]) -> NodeHash {
    tagged_hash(TAP_LEAF_TAG, &serialize_leaf(version, script))
}
