#![no_std]

#[cfg(feature = "std")]
extern crate std;

// Leaves, proofs and control blocks are heap-allocated.
extern crate alloc;

#[cfg(not(any(feature = "bitcoin", feature = "wasm")))]
compile_error!("enable either the `bitcoin` or the `wasm` feature for SHA-256");

pub mod error;
pub mod types;
pub mod compact_size;
pub mod hash;
pub mod leaf;
pub mod tree;
pub mod proof;
pub mod key;
pub mod script;
pub mod control_block;
pub mod commitment;
#[cfg(feature = "export-json")]
pub mod export;

pub use commitment::{seed_from_evm_address, SwapCommitment, SwapParams};
pub use control_block::ControlBlock;
pub use error::MastError;
pub use hash::{sha256, tagged_hash};
pub use key::{derive_output_key, derive_tweak, tap_tweak_hash, TweakedKey, XOnlyPointOps};
#[cfg(feature = "k256")]
pub use key::K256Ops;
#[cfg(feature = "bitcoin")]
pub use key::Secp256k1Ops;
pub use leaf::{TapLeaf, TAPSCRIPT_LEAF_VERSION};
pub use proof::{compute_root, generate_all_proofs, generate_proof, verify_proof, MerkleProof};
pub use tree::{build_tree, merkle_root};
