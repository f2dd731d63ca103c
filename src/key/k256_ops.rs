//! Output-key tweak via k256 (pure Rust; no C linkage for wasm32).

use ::k256::elliptic_curve::group::{Curve, Group};
use ::k256::elliptic_curve::point::AffineCoordinates;
use ::k256::elliptic_curve::PrimeField;
use ::k256::schnorr::{SigningKey, VerifyingKey};
use ::k256::{ProjectivePoint, Scalar};

use crate::error::MastError;
use crate::key::{TweakedKey, XOnlyPointOps};
use crate::types::XOnlyKey;

/// [`XOnlyPointOps`] backed by the RustCrypto k256 crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct K256Ops;

impl XOnlyPointOps for K256Ops {
    fn x_only_from_scalar(&self, scalar: &[u8; 32]) -> Result<XOnlyKey, MastError> {
        let signing_key =
            SigningKey::from_bytes((&scalar[..]).into()).map_err(|_| MastError::InvalidSeed)?;
        Ok(signing_key.verifying_key().to_bytes().into())
    }

    fn x_only_add_tweak(&self, key: &XOnlyKey, tweak: &[u8; 32]) -> Result<TweakedKey, MastError> {
        // BIP-340 lift_x: the even-y point with this x-coordinate.
        let internal =
            VerifyingKey::from_bytes(&key[..]).map_err(|_| MastError::InvalidInternalKey)?;
        let tweak: Scalar = Option::from(Scalar::from_repr((*tweak).into()))
            .ok_or(MastError::InvalidTweak)?;

        let point = ProjectivePoint::from(*internal.as_affine()) + ProjectivePoint::GENERATOR * tweak;
        if bool::from(point.is_identity()) {
            return Err(MastError::InvalidTweak);
        }

        let affine = point.to_affine();
        Ok(TweakedKey {
            x_only: affine.x().into(),
            parity: u8::from(bool::from(affine.y_is_odd())),
        })
    }
}
