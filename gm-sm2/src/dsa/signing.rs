//! Support for SM2DSA signing.
//!
//! ## Algorithm
//!
//! ```text
//! A1: set M~=ZA || M
//! A2: calculate e=Hv(M~)
//! A3: pick a random number k in [1, n-1] via a random number generator
//! A4: calculate the elliptic curve point (x1, y1)=[k]G
//! A5: calculate r=(e+x1) modn, return to A3 if r=0 or r+k=n
//! A6: calculate s=((1+dA)^(-1)*(k-r*dA)) modn, return to A3 if s=0
//! A7: the digital signature of M is (r, s)
//! ```

#![allow(non_snake_case)]

use super::{Signature, VerifyingKey};
use crate::{
    Error, FIELD_SIZE, FieldBytes, NonZeroScalar, ProjectivePoint, PublicKey, Result, Scalar,
    SecretKey, U256, codec, random,
};
use core::fmt::{self, Debug};
use elliptic_curve::{
    Group, PrimeField,
    ops::Reduce,
    point::AffineCoordinates,
    subtle::{Choice, ConstantTimeEq},
};
use rand_core::CryptoRngCore;
use signature::{RandomizedSigner, hazmat::RandomizedPrehashSigner};

/// SM2DSA secret key used for signing messages and producing signatures.
///
/// ## Usage
///
/// Signing is randomized: every call draws a fresh nonce from the supplied
/// random number generator, so two signatures over the same message differ.
///
/// - [`SigningKey::sign_msg`]: sign a message, returning [`Error`] on failure
/// - [`RandomizedSigner`]: the same through the [`signature`] traits
/// - [`RandomizedPrehashSigner`]: sign a precomputed `Hv(ZA || M)`
/// - [`signature::Signer`]: sign with the operating system's RNG (requires
///   the `getrandom` feature)
#[derive(Clone)]
pub struct SigningKey {
    /// Secret key.
    secret_scalar: NonZeroScalar,

    /// `(1 + d)⁻¹`, fixed for the lifetime of the key.
    d_plus_1_inv: Scalar,

    /// Verifying key for this signing key.
    verifying_key: VerifyingKey,
}

impl SigningKey {
    /// Create signing key from a signer's distinguishing identifier and
    /// secret key.
    pub fn new(distid: &[u8], secret_key: &SecretKey) -> Result<Self> {
        Self::from_nonzero_scalar(distid, secret_key.to_nonzero_scalar())
    }

    /// Parse signing key from big endian-encoded bytes.
    pub fn from_bytes(distid: &[u8], bytes: &FieldBytes) -> Result<Self> {
        Self::from_slice(distid, bytes)
    }

    /// Parse signing key from a big endian-encoded byte slice containing a
    /// secret scalar value.
    pub fn from_slice(distid: &[u8], slice: &[u8]) -> Result<Self> {
        let secret_scalar = codec::decode_private_key(slice)?;
        Self::from_nonzero_scalar(distid, secret_scalar)
    }

    /// Create a signing key from a non-zero scalar.
    ///
    /// Fails with [`Error::InvalidScalar`] for `d = n-1`, for which `1 + d`
    /// has no inverse.
    pub fn from_nonzero_scalar(distid: &[u8], secret_scalar: NonZeroScalar) -> Result<Self> {
        let d_plus_1_inv = random::check_secret_scalar(&secret_scalar)?;
        let public_key = PublicKey::from_secret_scalar(&secret_scalar);
        let verifying_key = VerifyingKey::new(distid, public_key)?;
        Ok(Self {
            secret_scalar,
            d_plus_1_inv,
            verifying_key,
        })
    }

    /// Serialize as bytes.
    pub fn to_bytes(&self) -> FieldBytes {
        codec::encode_private_key(&self.secret_scalar)
    }

    /// Borrow the secret [`NonZeroScalar`] value for this key.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    ///
    /// Please treat it with the care it deserves!
    pub fn as_nonzero_scalar(&self) -> &NonZeroScalar {
        &self.secret_scalar
    }

    /// Get the [`VerifyingKey`] which corresponds to this [`SigningKey`].
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Get the distinguishing identifier for this key.
    pub fn distid(&self) -> &[u8] {
        self.verifying_key.distid()
    }

    /// Sign `msg`, drawing nonces from `rng`.
    pub fn sign_msg<R>(&self, rng: &mut R, msg: &[u8]) -> Result<Signature>
    where
        R: CryptoRngCore + ?Sized,
    {
        // A1: set M~=ZA || M
        let hash = self.verifying_key.hash_msg(msg);
        self.sign_prehash(rng, &hash)
    }

    /// Sign a precomputed digest `e = Hv(ZA || M)`.
    ///
    /// The digest must already include `ZA`; see [`VerifyingKey::hash_msg`].
    pub fn sign_prehash<R>(&self, rng: &mut R, prehash: &FieldBytes) -> Result<Signature>
    where
        R: CryptoRngCore + ?Sized,
    {
        // A2: calculate e=Hv(M~)
        let e = <Scalar as Reduce<U256>>::reduce_bytes(prehash);

        for _ in 0..random::MAX_ATTEMPTS {
            // A3: pick a random number k in [1, n-1] via a random number generator
            let k = random::nonzero_scalar(rng)?;

            // A4-A7, discarding k on A5/A6 failures
            let signature = sign_with_nonce(&self.secret_scalar, &self.d_plus_1_inv, &e, &k);
            if let Some(signature) = signature {
                return Ok(signature);
            }
        }

        Err(Error::EntropyFailure)
    }
}

/// Attempt steps A4–A7 with the nonce `k`, returning `None` when `k` has to
/// be discarded.
fn sign_with_nonce(
    secret_scalar: &Scalar,
    d_plus_1_inv: &Scalar,
    e: &Scalar,
    k: &Scalar,
) -> Option<Signature> {
    // A4: calculate the elliptic curve point (x1, y1)=[k]G
    let R = (ProjectivePoint::generator() * k).to_affine();

    // A5: calculate r=(e+x1) modn, return to A3 if r=0 or r+k=n
    let r = *e + <Scalar as Reduce<U256>>::reduce_bytes(&R.x());
    if bool::from(r.is_zero() | (r + k).is_zero()) {
        return None;
    }

    // A6: calculate s=((1+dA)^(-1)*(k-r*dA)) modn, return to A3 if s=0
    let s = *d_plus_1_inv * (*k - r * secret_scalar);
    if bool::from(s.is_zero()) {
        return None;
    }

    // A7: the digital signature of M is (r, s)
    Some(Signature::from_scalars(r.to_repr(), s.to_repr()))
}

//
// `*Signer` trait impls
//

impl RandomizedSigner<Signature> for SigningKey {
    fn try_sign_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        msg: &[u8],
    ) -> signature::Result<Signature> {
        Ok(self.sign_msg(rng, msg)?)
    }
}

impl RandomizedPrehashSigner<Signature> for SigningKey {
    fn sign_prehash_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        prehash: &[u8],
    ) -> signature::Result<Signature> {
        let prehash: [u8; FIELD_SIZE] =
            prehash.try_into().map_err(|_| signature::Error::new())?;

        Ok(self.sign_prehash(rng, &prehash.into())?)
    }
}

#[cfg(feature = "getrandom")]
impl signature::Signer<Signature> for SigningKey {
    fn try_sign(&self, msg: &[u8]) -> signature::Result<Signature> {
        Ok(self.sign_msg(&mut rand_core::OsRng, msg)?)
    }
}

//
// Other trait impls
//

impl AsRef<VerifyingKey> for SigningKey {
    fn as_ref(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}

impl ConstantTimeEq for SigningKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.secret_scalar.ct_eq(&other.secret_scalar)
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

/// Constant-time comparison
impl Eq for SigningKey {}
impl PartialEq for SigningKey {
    fn eq(&self, other: &SigningKey) -> bool {
        self.ct_eq(other).into()
    }
}

#[cfg(test)]
mod tests {
    use super::sign_with_nonce;
    use crate::{NonZeroScalar, ProjectivePoint, Scalar, U256, random};
    use elliptic_curve::{Group, ops::Reduce, point::AffineCoordinates};

    fn generator_x() -> Scalar {
        <Scalar as Reduce<U256>>::reduce_bytes(&ProjectivePoint::generator().to_affine().x())
    }

    #[test]
    fn discards_nonce_when_r_is_zero() {
        let d = NonZeroScalar::new(Scalar::from(7u64)).unwrap();
        let d_plus_1_inv = random::check_secret_scalar(&d).unwrap();

        // k = 1 gives x1 = Gx, so e = -Gx gives r = 0
        let k = Scalar::ONE;
        let gx = generator_x();

        assert!(sign_with_nonce(&d, &d_plus_1_inv, &-gx, &k).is_none());
        assert!(sign_with_nonce(&d, &d_plus_1_inv, &Scalar::ZERO, &k).is_some());
    }

    #[test]
    fn discards_nonce_when_r_plus_k_is_n() {
        let d = NonZeroScalar::new(Scalar::from(7u64)).unwrap();
        let d_plus_1_inv = random::check_secret_scalar(&d).unwrap();

        // k = 1 gives x1 = Gx, so e = -1 - Gx gives r = n - 1 = -k
        let k = Scalar::ONE;
        let gx = generator_x();

        assert!(sign_with_nonce(&d, &d_plus_1_inv, &(-gx - k), &k).is_none());
    }
}
