// src/error.rs

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MastError {
    /// A script tree needs at least one leaf.
    EmptyTree,

    /// Proof requested for a leaf that does not exist.
    IndexOutOfRange { index: usize, leaves: usize },

    /// Every enabler needs exactly one secret-hash commitment.
    EnablerCountMismatch { enablers: usize, secret_hashes: usize },

    /// Input was not valid hex, or decoded to the wrong length.
    InvalidHex,

    /// Leaf version with the low (parity) bit set.
    InvalidLeafVersion(u8),

    /// The seed is not a valid secp256k1 secret scalar (zero or >= curve order).
    InvalidSeed,

    /// The 32 bytes are not the x-coordinate of a point on the curve.
    InvalidInternalKey,

    /// The tweak is >= curve order, or tweaking produced the point at infinity.
    InvalidTweak,

    /// The data stream ended before a structure could be fully read.
    IncompleteData,

    /// A CompactSize prefix used more bytes than its value needs.
    NonCanonicalCompactSize,

    /// Bytes left over after a full parse.
    TrailingData(usize),

    /// Control block length is not 33 + 32 * k.
    InvalidControlBlockSize(usize),

    /// Merkle path longer than a control block can carry.
    ProofTooLong(usize),

    /// JSON export could not be encoded or decoded.
    EncodingError,
}

impl MastError {
    /// True for failures reported by the elliptic-curve collaborator.
    ///
    /// These depend on the data (an arbitrary hash is not always a valid curve element), so a
    /// caller can retry with a different seed. Everything else is a caller input error.
    pub fn is_key_derivation(&self) -> bool {
        matches!(
            self,
            Self::InvalidSeed | Self::InvalidInternalKey | Self::InvalidTweak
        )
    }
}

// Manual implementation of Display for no_std environments.
impl core::fmt::Display for MastError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyTree => write!(f, "Script tree has no leaves"),
            Self::IndexOutOfRange { index, leaves } => {
                write!(f, "Leaf index {} out of range for {} leaves", index, leaves)
            }
            Self::EnablerCountMismatch {
                enablers,
                secret_hashes,
            } => write!(
                f,
                "Invalid number of enablers / secret hashes: {} vs {}",
                enablers, secret_hashes
            ),
            Self::InvalidHex => write!(f, "Invalid hex input"),
            Self::InvalidLeafVersion(v) => {
                write!(f, "Invalid leaf version: 0x{:02x} (low bit must be clear)", v)
            }
            Self::InvalidSeed => write!(f, "Seed is not a valid secp256k1 scalar"),
            Self::InvalidInternalKey => write!(f, "Internal key is not a valid x-only point"),
            Self::InvalidTweak => write!(f, "Tweak does not produce a valid output key"),
            Self::IncompleteData => write!(f, "Incomplete data"),
            Self::NonCanonicalCompactSize => write!(f, "Non-canonical CompactSize encoding"),
            Self::TrailingData(n) => write!(f, "Trailing data: {} bytes left after parse", n),
            Self::InvalidControlBlockSize(n) => write!(f, "Invalid control block size: {}", n),
            Self::ProofTooLong(n) => write!(f, "Merkle path of {} nodes exceeds limit", n),
            Self::EncodingError => write!(f, "JSON encoding/decoding error"),
        }
    }
}

// Enable standard Error trait if the "std" feature is on.
#[cfg(feature = "std")]
impl std::error::Error for MastError {}
