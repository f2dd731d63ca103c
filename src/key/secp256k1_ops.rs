//! Output-key tweak via rust-secp256k1 (re-exported by the `bitcoin` crate).

use bitcoin::secp256k1::{All, Scalar, Secp256k1, SecretKey, XOnlyPublicKey};

use crate::error::MastError;
use crate::key::{TweakedKey, XOnlyPointOps};
use crate::types::XOnlyKey;

/// [`XOnlyPointOps`] backed by libsecp256k1.
pub struct Secp256k1Ops {
    secp: Secp256k1<All>,
}

impl Secp256k1Ops {
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::new(),
        }
    }
}

impl Default for Secp256k1Ops {
    fn default() -> Self {
        Self::new()
    }
}

impl XOnlyPointOps for Secp256k1Ops {
    fn x_only_from_scalar(&self, scalar: &[u8; 32]) -> Result<XOnlyKey, MastError> {
        let secret = SecretKey::from_slice(scalar).map_err(|_| MastError::InvalidSeed)?;
        let (x_only, _parity) = secret.x_only_public_key(&self.secp);
        Ok(x_only.serialize())
    }

    fn x_only_add_tweak(&self, key: &XOnlyKey, tweak: &[u8; 32]) -> Result<TweakedKey, MastError> {
        let internal = XOnlyPublicKey::from_slice(key).map_err(|_| MastError::InvalidInternalKey)?;
        let tweak = Scalar::from_be_bytes(*tweak).map_err(|_| MastError::InvalidTweak)?;
        let (tweaked, parity) = internal
            .add_tweak(&self.secp, &tweak)
            .map_err(|_| MastError::InvalidTweak)?;
        Ok(TweakedKey {
            x_only: tweaked.serialize(),
            parity: parity.to_u8(),
        })
    }
}
