//! Support for SM2 encryption.
//!
//! ## Algorithm
//!
//! ```text
//! A1: generate a random number k in [1, n-1] with the random number generator
//! A2: compute point C1 = [k]G = (x1, y1)
//! A3: compute point S = [h]PB of the elliptic curve
//! A4: compute point [k]PB = (x2, y2)
//! A5: compute t = KDF(x2||y2, klen), return to A1 if t is all-zero
//! A6: compute C2 = M xor t
//! A7: compute C3 = Hash(x2||M||y2)
//! A8: output the ciphertext C = C1||C3||C2
//! ```

use super::{Cipher, Mode, coordinates, hash_c3, kdf};
use crate::{AffinePoint, Error, ProjectivePoint, PublicKey, Result, codec, random};
use alloc::{boxed::Box, vec::Vec};
use elliptic_curve::Group;
use rand_core::CryptoRngCore;

/// Represents an encryption key used for encrypting messages using elliptic curve cryptography.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncryptingKey {
    public_key: PublicKey,
    mode: Mode,
    compress_c1: bool,
}

impl EncryptingKey {
    /// Initialize [`EncryptingKey`] from PublicKey, producing `C1‖C3‖C2`
    /// ciphertexts with an uncompressed `C1`.
    ///
    /// Use [`EncryptingKey::with_mode`] and
    /// [`EncryptingKey::with_compressed_c1`] to change either.
    pub fn new(public_key: PublicKey) -> Self {
        Self {
            public_key,
            mode: Mode::default(),
            compress_c1: false,
        }
    }

    /// Select the ciphertext layout.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Select whether `C1` is written as a compressed point.
    pub fn with_compressed_c1(mut self, compress: bool) -> Self {
        self.compress_c1 = compress;
        self
    }

    /// Initialize [`EncryptingKey`] from a compressed or uncompressed SEC1
    /// public key encoding; see [`codec::decode_public_key`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::new(codec::decode_public_key(bytes)?))
    }

    /// Initialize [`EncryptingKey`] from an affine point.
    ///
    /// Returns an [`Error`] if the given affine point is the additive identity
    /// (a.k.a. point at infinity).
    pub fn from_affine(affine: AffinePoint) -> Result<Self> {
        let public_key = PublicKey::from_affine(affine).map_err(|_| Error::InvalidPoint)?;
        Ok(Self::new(public_key))
    }

    /// Borrow the inner [`AffinePoint`] for this public key.
    pub fn as_affine(&self) -> &AffinePoint {
        self.public_key.as_affine()
    }

    /// Ciphertext layout produced by this key.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Convert this [`EncryptingKey`] into the
    /// `Elliptic-Curve-Point-to-Octet-String` encoding described in
    /// SEC 1: Elliptic Curve Cryptography (Version 2.0) section 2.3.3
    /// (page 10).
    ///
    /// <http://www.secg.org/sec1-v2.pdf>
    pub fn to_sec1_bytes(&self) -> Box<[u8]> {
        self.public_key.to_sec1_bytes()
    }

    /// Encrypts a message using the encryption key, returning the raw
    /// ciphertext laid out according to [`EncryptingKey::mode`].
    pub fn encrypt<R>(&self, rng: &mut R, msg: &[u8]) -> Result<Vec<u8>>
    where
        R: CryptoRngCore + ?Sized,
    {
        Ok(self.encrypt_cipher(rng, msg)?.to_vec(self.mode))
    }

    /// Encrypts a message and returns the result in ASN.1 format.
    pub fn encrypt_der<R>(&self, rng: &mut R, msg: &[u8]) -> Result<Vec<u8>>
    where
        R: CryptoRngCore + ?Sized,
    {
        self.encrypt_cipher(rng, msg)?.to_der()
    }

    /// Encrypts a message, returning the ciphertext components.
    pub fn encrypt_cipher<R>(&self, rng: &mut R, msg: &[u8]) -> Result<Cipher<'static>>
    where
        R: CryptoRngCore + ?Sized,
    {
        for _ in 0..random::MAX_ATTEMPTS {
            // A1: generate a random number k in [1, n-1] with the random number generator
            let k = random::nonzero_scalar(rng)?;

            // A2: compute point C1 = [k]G = (x1, y1)
            let c1 = (ProjectivePoint::generator() * *k).to_affine();

            // A3: h = 1 for SM2, and a PublicKey is never the identity

            // A4: compute point [k]PB = (x2, y2)
            let shared = (self.public_key.to_projective() * *k).to_affine();
            let Ok((x2, y2)) = coordinates(&shared) else {
                continue;
            };

            // A5: compute t = KDF(x2||y2, klen)
            // A6: compute C2 = M xor t
            let mut c2 = msg.to_vec();
            kdf(&x2, &y2, &mut c2)?;

            // an all-zero t leaves M unmasked
            if !msg.is_empty() && c2 == msg {
                continue;
            }

            // A7: compute C3 = Hash(x2||M||y2)
            let c3 = hash_c3(&x2, msg, &y2);

            // A8: output the ciphertext
            return Ok(Cipher::new(c1, self.compress_c1, c2, c3));
        }

        Err(Error::EntropyFailure)
    }
}

impl From<PublicKey> for EncryptingKey {
    fn from(value: PublicKey) -> Self {
        Self::new(value)
    }
}

impl AsRef<AffinePoint> for EncryptingKey {
    fn as_ref(&self) -> &AffinePoint {
        self.as_affine()
    }
}
