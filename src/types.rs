//! Type shim: hashes from the bitcoin crate for native builds, bare bitcoin_hashes for wasm.
//! Allows wasm32 builds without the bitcoin crate (and thus without secp256k1-sys C build).

#[cfg(all(feature = "bitcoin", not(feature = "wasm")))]
mod bitcoin_shim {
    pub use bitcoin::hashes;
}

#[cfg(feature = "wasm")]
mod wasm_shim {
    /// Re-export so `crate::types::hashes::{sha256, Hash, HashEngine}` match the bitcoin crate API.
    pub mod hashes {
        pub use bitcoin_hashes::sha256;
        pub use bitcoin_hashes::Hash;
        pub use bitcoin_hashes::HashEngine;
    }
}

// When both features are enabled, prefer wasm so only one shim is active.
#[cfg(feature = "wasm")]
pub use wasm_shim::*;

#[cfg(all(feature = "bitcoin", not(feature = "wasm")))]
pub use bitcoin_shim::*;

/// A 32-byte node hash: leaf hash, branch hash, or root.
pub type NodeHash = [u8; 32];

/// A 32-byte x-only public key (BIP-340 encoding).
pub type XOnlyKey = [u8; 32];

/// A 20-byte HASH160 of a public key.
pub type PubkeyHash = [u8; 20];
