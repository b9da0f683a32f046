//! Support for verifying SM2DSA signatures.
//!
//! ## Algorithm
//!
//! ```text
//! B1: verify whether r' in [1,n-1], verification failed if not
//! B2: verify whether s' in [1,n-1], verification failed if not
//! B3: set M'~=ZA || M'
//! B4: calculate e'=Hv(M'~)
//! B5: calculate t = (r' + s') modn, verification failed if t=0
//! B6: calculate the point (x1', y1')=[s']G + [t]PA
//! B7: calculate R=(e'+x1') modn, verification pass if yes, otherwise failed
//! ```

use super::Signature;
use crate::{
    AffinePoint, CompressedPoint, EncodedPoint, FIELD_SIZE, FieldBytes, Hash, ProjectivePoint,
    PublicKey, Result, Scalar, Sm2, U256, codec, distid::hash_z,
};
use alloc::vec::Vec;
use elliptic_curve::{Group, ops::Reduce, point::AffineCoordinates, sec1::ToEncodedPoint};
use signature::{Error, Verifier, hazmat::PrehashVerifier};
use sm3::{Digest, Sm3};

/// SM2DSA public key used for verifying signatures are valid for a given
/// message.
///
/// ## Usage
///
/// - [`VerifyingKey::is_valid`]: `true` if a signature verifies
/// - [`Verifier`]: the same through the [`signature`] traits, reporting
///   failure as [`signature::Error`]
/// - [`PrehashVerifier`]: verify the low-level raw output bytes of a message
///   digest `Hv(ZA || M)`
#[derive(Clone, Debug)]
pub struct VerifyingKey {
    /// Signer's public key.
    public_key: PublicKey,

    /// Signer's user information hash `Z`.
    identity_hash: Hash,

    /// Distinguishing identifier used to compute `Z`.
    distid: Vec<u8>,
}

impl VerifyingKey {
    /// Initialize [`VerifyingKey`] from a signer's distinguishing identifier
    /// and public key.
    pub fn new(distid: &[u8], public_key: PublicKey) -> Result<Self> {
        let identity_hash = hash_z(distid, &public_key)?;

        Ok(Self {
            identity_hash,
            public_key,
            distid: distid.into(),
        })
    }

    /// Initialize [`VerifyingKey`] from a compressed or uncompressed SEC1
    /// public key encoding; see [`codec::decode_public_key`].
    pub fn from_bytes(distid: &[u8], bytes: &[u8]) -> Result<Self> {
        Self::new(distid, codec::decode_public_key(bytes)?)
    }

    /// Initialize [`VerifyingKey`] from an affine point.
    ///
    /// Returns an error if the given affine point is the additive identity
    /// (a.k.a. point at infinity).
    pub fn from_affine(distid: &[u8], affine: AffinePoint) -> Result<Self> {
        let public_key = PublicKey::from_affine(affine).map_err(|_| crate::Error::InvalidPoint)?;
        Self::new(distid, public_key)
    }

    /// Borrow the inner [`AffinePoint`] for this public key.
    pub fn as_affine(&self) -> &AffinePoint {
        self.public_key.as_affine()
    }

    /// Get the distinguishing identifier for this key.
    pub fn distid(&self) -> &[u8] {
        &self.distid
    }

    /// Serialize this key as a compressed point; see
    /// [`codec::encode_public_key`].
    pub fn to_bytes(&self) -> CompressedPoint {
        codec::encode_public_key(&self.public_key)
    }

    /// Compute message hash `e` according to [draft-shen-sm2-ecdsa § 5.2.1]
    ///
    /// [draft-shen-sm2-ecdsa § 5.2.1]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#section-5.2.1
    pub fn hash_msg(&self, msg: &[u8]) -> Hash {
        Sm3::new_with_prefix(self.identity_hash)
            .chain_update(msg)
            .finalize()
    }

    /// Check `signature` over `msg`.
    ///
    /// Returns `false` for any signature which does not verify, including
    /// ones whose components are out of range.
    pub fn is_valid(&self, msg: &[u8], signature: &Signature) -> bool {
        // B3: set M'~=ZA || M'
        let hash = self.hash_msg(msg);
        self.is_valid_prehash(&hash, signature)
    }

    /// Check `signature` over a precomputed digest `e = Hv(ZA || M)`.
    pub fn is_valid_prehash(&self, prehash: &FieldBytes, signature: &Signature) -> bool {
        // B1: verify whether r' in [1,n-1], verification failed if not
        let Some(r) = signature.r() else {
            return false;
        };

        // B2: verify whether s' in [1,n-1], verification failed if not
        let Some(s) = signature.s() else {
            return false;
        };

        // B4: calculate e'=Hv(M'~)
        let e = <Scalar as Reduce<U256>>::reduce_bytes(prehash);

        // B5: calculate t = (r' + s') modn, verification failed if t=0
        let t = *r + *s;
        if t.is_zero().into() {
            return false;
        }

        // B6: calculate the point (x1', y1')=[s']G + [t]PA
        let point = ProjectivePoint::generator() * *s + self.public_key.to_projective() * t;
        if point.is_identity().into() {
            return false;
        }

        // B7: calculate R=(e'+x1') modn, verification pass if yes, otherwise failed
        let x = point.to_affine().x();
        *r == e + <Scalar as Reduce<U256>>::reduce_bytes(&x)
    }
}

//
// `*Verifier` trait impls
//

impl PrehashVerifier<Signature> for VerifyingKey {
    fn verify_prehash(&self, prehash: &[u8], signature: &Signature) -> signature::Result<()> {
        let prehash: [u8; FIELD_SIZE] = prehash.try_into().map_err(|_| Error::new())?;

        if self.is_valid_prehash(&prehash.into(), signature) {
            Ok(())
        } else {
            Err(Error::new())
        }
    }
}

impl Verifier<Signature> for VerifyingKey {
    fn verify(&self, msg: &[u8], signature: &Signature) -> signature::Result<()> {
        if self.is_valid(msg, signature) {
            Ok(())
        } else {
            Err(Error::new())
        }
    }
}

//
// Other trait impls
//

impl AsRef<AffinePoint> for VerifyingKey {
    fn as_ref(&self) -> &AffinePoint {
        self.as_affine()
    }
}

impl From<VerifyingKey> for PublicKey {
    fn from(verifying_key: VerifyingKey) -> PublicKey {
        verifying_key.public_key
    }
}

impl From<&VerifyingKey> for PublicKey {
    fn from(verifying_key: &VerifyingKey) -> PublicKey {
        verifying_key.public_key
    }
}

impl ToEncodedPoint<Sm2> for VerifyingKey {
    fn to_encoded_point(&self, compress: bool) -> EncodedPoint {
        self.as_affine().to_encoded_point(compress)
    }
}

/// Verifying keys with the same public key and identifier are equal.
impl Eq for VerifyingKey {}
impl PartialEq for VerifyingKey {
    fn eq(&self, other: &VerifyingKey) -> bool {
        self.public_key == other.public_key && self.distid == other.distid
    }
}
