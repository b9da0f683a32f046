//! Support for SM2 decryption.
//!
//! ## Algorithm
//!
//! ```text
//! B1: get C1 from C, verify that C1 satisfies the elliptic curve
//! B2: compute point S = [h]C1, output "ERROR" if S is the identity
//! B3: compute [dB]C1 = (x2, y2)
//! B4: compute t = KDF(x2||y2, klen)
//! B5: get C2 from C and compute M' = C2 xor t
//! B6: compute u = Hash(x2||M'||y2), output "ERROR" if u != C3
//! B7: output the plaintext M'
//! ```

use super::{Cipher, Mode, coordinates, encrypting::EncryptingKey, hash_c3, kdf};
use crate::{Error, FieldBytes, NonZeroScalar, ProjectivePoint, PublicKey, Result, SecretKey, codec};
use alloc::vec::Vec;
use core::fmt::{self, Debug};
use elliptic_curve::subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// Represents a decryption key used for decrypting messages using elliptic curve cryptography.
#[derive(Clone)]
pub struct DecryptingKey {
    secret_scalar: NonZeroScalar,
    encrypting_key: EncryptingKey,
    mode: Mode,
}

impl DecryptingKey {
    /// Creates a new `DecryptingKey` from a `SecretKey` with the default
    /// decryption mode (`C1C3C2`); see [`DecryptingKey::with_mode`].
    pub fn new(secret_key: &SecretKey) -> Self {
        Self::from_nonzero_scalar(secret_key.to_nonzero_scalar())
    }

    /// Parse decrypting key from big endian-encoded bytes.
    pub fn from_bytes(bytes: &FieldBytes) -> Result<Self> {
        Self::from_slice(bytes)
    }

    /// Parse decrypting key from big endian-encoded byte slice containing a
    /// secret scalar value.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let secret_scalar = codec::decode_private_key(slice)?;
        Ok(Self::from_nonzero_scalar(secret_scalar))
    }

    /// Create a decrypting key from a non-zero scalar.
    pub fn from_nonzero_scalar(secret_scalar: NonZeroScalar) -> Self {
        let public_key = PublicKey::from_secret_scalar(&secret_scalar);
        Self {
            secret_scalar,
            encrypting_key: EncryptingKey::new(public_key),
            mode: Mode::default(),
        }
    }

    /// Select the ciphertext layout accepted by [`DecryptingKey::decrypt`]
    /// and produced by the corresponding [`EncryptingKey`].
    pub fn with_mode(self, mode: Mode) -> Self {
        Self {
            encrypting_key: self.encrypting_key.with_mode(mode),
            mode,
            ..self
        }
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

    /// Get the [`EncryptingKey`] which corresponds to this [`DecryptingKey`].
    pub fn encrypting_key(&self) -> &EncryptingKey {
        &self.encrypting_key
    }

    /// Ciphertext layout accepted by this key.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Decrypts a raw ciphertext laid out according to [`DecryptingKey::mode`].
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let cipher = Cipher::from_slice(ciphertext, self.mode)?;
        self.decrypt_cipher(&cipher)
    }

    /// Decrypts a ciphertext in ASN.1 format.
    pub fn decrypt_der(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let cipher = Cipher::from_der(ciphertext)?;
        self.decrypt_cipher(&cipher)
    }

    /// Decrypts parsed ciphertext components.
    ///
    /// Fails with [`Error::MacMismatch`] without revealing any plaintext if
    /// `C3` does not match.
    pub fn decrypt_cipher(&self, cipher: &Cipher<'_>) -> Result<Vec<u8>> {
        // B3: compute [dB]C1 = (x2, y2)
        let shared = (ProjectivePoint::from(*cipher.c1()) * *self.secret_scalar).to_affine();
        let (x2, y2) = coordinates(&shared)?;

        // B4: compute t = KDF(x2||y2, klen)
        // B5: get C2 from C and compute M' = C2 xor t
        let mut plaintext = cipher.c2().to_vec();
        kdf(&x2, &y2, &mut plaintext)?;

        // B6: compute u = Hash(x2||M'||y2)
        let u = hash_c3(&x2, &plaintext, &y2);
        if !bool::from(u[..].ct_eq(&cipher.c3()[..])) {
            plaintext.zeroize();
            return Err(Error::MacMismatch);
        }

        // B7: output the plaintext M'
        Ok(plaintext)
    }
}

//
// Other trait impls
//

impl AsRef<EncryptingKey> for DecryptingKey {
    fn as_ref(&self) -> &EncryptingKey {
        &self.encrypting_key
    }
}

impl ConstantTimeEq for DecryptingKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.secret_scalar.ct_eq(&other.secret_scalar)
    }
}

impl Debug for DecryptingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptingKey")
            .field("encrypting_key", &self.encrypting_key)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

/// Constant-time comparison
impl Eq for DecryptingKey {}
impl PartialEq for DecryptingKey {
    fn eq(&self, other: &DecryptingKey) -> bool {
        self.ct_eq(other).into()
    }
}

impl From<&SecretKey> for DecryptingKey {
    fn from(secret_key: &SecretKey) -> Self {
        Self::new(secret_key)
    }
}
