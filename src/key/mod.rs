//! Output-key tweaking.
//!
//! The tweak is the TapTweak tagged hash of `internal_key || merkle_root`. The curve
//! arithmetic that turns a seed into an internal key and applies the tweak is not done
//! here: it comes from an [`XOnlyPointOps`] implementation, so the hashing can be
//! exercised without a curve backend.

use log::debug;

use crate::error::MastError;
use crate::hash::{tagged_hash, TAP_TWEAK_TAG};
use crate::types::{NodeHash, XOnlyKey};

#[cfg(feature = "k256")]
pub mod k256_ops;
#[cfg(feature = "bitcoin")]
pub mod secp256k1_ops;

#[cfg(feature = "k256")]
pub use k256_ops::K256Ops;
#[cfg(feature = "bitcoin")]
pub use secp256k1_ops::Secp256k1Ops;

/// Tweaked x-only output key and the parity (0 even, 1 odd) of its full point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweakedKey {
    pub x_only: XOnlyKey,
    pub parity: u8,
}

/// x-only secp256k1 operations supplied by an elliptic-curve library.
///
/// Both operations are fallible over the curve's domain; implementations map their
/// library's errors onto [`MastError::InvalidSeed`], [`MastError::InvalidInternalKey`]
/// and [`MastError::InvalidTweak`].
pub trait XOnlyPointOps {
    /// x-only public key of the point `scalar * G`.
    fn x_only_from_scalar(&self, scalar: &[u8; 32]) -> Result<XOnlyKey, MastError>;

    /// `P + tweak * G`, where `P` is the even-y point with x-coordinate `key`.
    fn x_only_add_tweak(&self, key: &XOnlyKey, tweak: &[u8; 32]) -> Result<TweakedKey, MastError>;
}

/// TapTweak hash of `internal_key || merkle_root`.
pub fn tap_tweak_hash(internal_key: &XOnlyKey, merkle_root: &NodeHash) -> [u8; 32] {
    let mut preimage = [0u8; 64];
    preimage[..32].copy_from_slice(internal_key);
    preimage[32..].copy_from_slice(merkle_root);
    tagged_hash(TAP_TWEAK_TAG, &preimage)
}

/// Tweak for the internal key derived from `seed`, committing to `merkle_root`.
pub fn derive_tweak<E: XOnlyPointOps + ?Sized>(
    ops: &E,
    seed: &[u8; 32],
    merkle_root: &NodeHash,
) -> Result<[u8; 32], MastError> {
    let internal_key = ops.x_only_from_scalar(seed)?;
    Ok(tap_tweak_hash(&internal_key, merkle_root))
}

/// Applies `tweak` to `internal_key`. Errors from the curve backend are passed through.
pub fn derive_output_key<E: XOnlyPointOps + ?Sized>(
    ops: &E,
    internal_key: &XOnlyKey,
    tweak: &[u8; 32],
) -> Result<TweakedKey, MastError> {
    let output = ops.x_only_add_tweak(internal_key, tweak)?;
    debug!(
        "tweaked output key {} (parity {})",
        hex::encode(output.x_only),
        output.parity
    );
    Ok(output)
}

/// Internal key from `seed`, then the output key committing to `merkle_root`.
/// Returns `(internal_key, tweak, output_key)`.
pub fn tweak_seed<E: XOnlyPointOps + ?Sized>(
    ops: &E,
    seed: &[u8; 32],
    merkle_root: &NodeHash,
) -> Result<(XOnlyKey, [u8; 32], TweakedKey), MastError> {
    let internal_key = ops.x_only_from_scalar(seed)?;
    let tweak = tap_tweak_hash(&internal_key, merkle_root);
    let output = derive_output_key(ops, &internal_key, &tweak)?;
    Ok((internal_key, tweak, output))
}


#[cfg(test)]
mod tests {
    use super::mock::MockPointOps;
    use super::*;

    #[test]
    fn tweak_commits_to_key_and_root() {
        let seed = [7u8; 32];
        let root = [9u8; 32];
        let tweak = derive_tweak(&MockPointOps, &seed, &root).expect("tweak");
        assert_eq!(tweak, tap_tweak_hash(&seed, &root));
        assert_eq!(tweak, derive_tweak(&MockPointOps, &seed, &root).expect("tweak"));
        assert_ne!(tweak, derive_tweak(&MockPointOps, &[8u8; 32], &root).expect("tweak"));
        assert_ne!(tweak, derive_tweak(&MockPointOps, &seed, &[10u8; 32]).expect("tweak"));
    }

    #[test]
    fn backend_failures_propagate() {
        assert_eq!(
            derive_tweak(&MockPointOps, &[0u8; 32], &[1u8; 32]),
            Err(MastError::InvalidSeed)
        );
        assert_eq!(
            derive_output_key(&MockPointOps, &[1u8; 32], &[0xffu8; 32]),
            Err(MastError::InvalidTweak)
        );
    }

    #[test]
    fn tweak_seed_chains_operations() {
        let seed = [3u8; 32];
        let root = [4u8; 32];
        let (internal, tweak, output) = tweak_seed(&MockPointOps, &seed, &root).expect("tweak");
        assert_eq!(internal, seed);
        assert_eq!(tweak, tap_tweak_hash(&seed, &root));
        assert_eq!(output, MockPointOps.x_only_add_tweak(&seed, &tweak).expect("add"));
    }

    #[test]
    fn btcdeb_tweak_hash() {
        let internal: [u8; 32] =
            hex::decode("5bf08d58a430f8c222bffaf9127249c5cdff70a2d68b2b45637eb662b6b88eb5")
                .expect("hex")
                .try_into()
                .expect("32 bytes");
        let root: [u8; 32] =
            hex::decode("41646f8c1fe2a96ddad7f5471bc4fee7da98794ef8c45a4f4fc6a559d60c9f6b")
                .expect("hex")
                .try_into()
                .expect("32 bytes");
        assert_eq!(
            hex::encode(tap_tweak_hash(&internal, &root)),
            "0b0e6981ce6cac74d055d0e4c25e5b4455a083b3217761327867f26460e0a776"
        );
    }
}
