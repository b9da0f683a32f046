//! SM2 Encryption Algorithm (SM2) as defined in [draft-shen-sm2-ecdsa § 5].
//!
//! ## Usage
//!
#![cfg_attr(feature = "getrandom", doc = "```")]
#![cfg_attr(not(feature = "getrandom"), doc = "```ignore")]
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use gm_sm2::{
//!     SecretKey,
//!     pke::{DecryptingKey, EncryptingKey},
//!     rand_core::OsRng,
//! };
//!
//! // Encrypting
//! let secret_key = SecretKey::random(&mut OsRng);
//! let encrypting_key = EncryptingKey::new(secret_key.public_key());
//! let plaintext = b"plaintext";
//! let ciphertext = encrypting_key.encrypt(&mut OsRng, plaintext)?;
//!
//! // Decrypting
//! let decrypting_key = DecryptingKey::new(&secret_key);
//! assert_eq!(decrypting_key.decrypt(&ciphertext)?, plaintext);
//! # Ok(())
//! # }
//! ```
//!
//! Ciphertexts are laid out as `C1‖C3‖C2` unless [`Mode::C1C2C3`] is
//! selected on both sides:
//!
//! | Part | Content                                  |
//! |------|------------------------------------------|
//! | `C1` | ephemeral point `[k]G`, SEC1-encoded     |
//! | `C3` | `SM3(x2‖M‖y2)`, 32 bytes                 |
//! | `C2` | `M` XOR `KDF(x2‖y2, len(M))`             |
//!
//! [draft-shen-sm2-ecdsa § 5]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#section-5

mod decrypting;
mod der;
mod encrypting;

pub use self::{decrypting::DecryptingKey, encrypting::EncryptingKey};

use crate::{AffinePoint, Error, FieldBytes, HASH_SIZE, Hash, Result, codec};
use alloc::{borrow::Cow, vec::Vec};
use elliptic_curve::sec1::{Coordinates, ToEncodedPoint};
use sm3::{Digest, Sm3};
use zeroize::Zeroizing;

/// Modes for the cipher encoding/decoding.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Mode {
    /// Legacy `C1‖C2‖C3` ordering.
    C1C2C3,

    /// `C1‖C3‖C2` ordering of GB/T 32918.4-2016.
    #[default]
    C1C3C2,
}

/// Parsed SM2 ciphertext.
///
/// `C1` has been checked to be a valid curve point. The integrity tag `C3`
/// is only checked when decrypting.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cipher<'a> {
    c1: AffinePoint,
    compress_c1: bool,
    c2: Cow<'a, [u8]>,
    c3: Hash,
}

impl<'a> Cipher<'a> {
    pub(crate) fn new(c1: AffinePoint, compress_c1: bool, c2: Vec<u8>, c3: Hash) -> Self {
        Self {
            c1,
            compress_c1,
            c2: Cow::Owned(c2),
            c3,
        }
    }

    /// Parse a raw ciphertext laid out according to `mode`.
    ///
    /// The size of `C1` follows from its SEC1 tag: 33 bytes for `0x02` and
    /// `0x03`, 65 bytes for `0x04`.
    pub fn from_slice(cipher: &'a [u8], mode: Mode) -> Result<Self> {
        // B1: get C1 from C
        let c1_len = match cipher.first() {
            Some(0x02 | 0x03) => codec::COMPRESSED_POINT_SIZE,
            Some(0x04) => codec::UNCOMPRESSED_POINT_SIZE,
            Some(_) => return Err(Error::InvalidPoint),
            None => return Err(Error::MalformedCiphertext),
        };

        let (c1, c) = cipher
            .split_at_checked(c1_len)
            .ok_or(Error::MalformedCiphertext)?;

        // verify that point c1 satisfies the elliptic curve; h = 1 for SM2,
        // so B2 reduces to rejecting the identity
        let c1_point = *codec::decode_public_key(c1)?.as_affine();

        let (c2, c3) = match mode {
            Mode::C1C3C2 => {
                let (c3, c2) = c
                    .split_at_checked(HASH_SIZE)
                    .ok_or(Error::MalformedCiphertext)?;
                (c2, c3)
            }
            Mode::C1C2C3 => {
                let c2_len = c
                    .len()
                    .checked_sub(HASH_SIZE)
                    .ok_or(Error::MalformedCiphertext)?;
                c.split_at(c2_len)
            }
        };

        let c3: [u8; HASH_SIZE] = c3.try_into().map_err(|_| Error::MalformedCiphertext)?;

        Ok(Self {
            c1: c1_point,
            compress_c1: c1_len == codec::COMPRESSED_POINT_SIZE,
            c2: Cow::Borrowed(c2),
            c3: c3.into(),
        })
    }

    /// Parse the GM/T 0009 ASN.1 DER form.
    pub fn from_der(bytes: &'a [u8]) -> Result<Self> {
        der::decode(bytes)
    }

    /// Serialize as a raw ciphertext laid out according to `mode`.
    pub fn to_vec(&self, mode: Mode) -> Vec<u8> {
        let point = self.c1.to_encoded_point(self.compress_c1);
        let len = point.len() + self.c2.len() + self.c3.len();
        let mut result = Vec::with_capacity(len);
        result.extend_from_slice(point.as_bytes());

        match mode {
            Mode::C1C2C3 => {
                result.extend_from_slice(&self.c2);
                result.extend_from_slice(&self.c3);
            }
            Mode::C1C3C2 => {
                result.extend_from_slice(&self.c3);
                result.extend_from_slice(&self.c2);
            }
        }

        result
    }

    /// Serialize as GM/T 0009 ASN.1 DER.
    ///
    /// This form always carries both coordinates of `C1`.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        der::encode(self)
    }

    /// Get C1
    pub fn c1(&self) -> &AffinePoint {
        &self.c1
    }

    /// Get C2
    pub fn c2(&self) -> &[u8] {
        &self.c2
    }

    /// Get C3
    pub fn c3(&self) -> &Hash {
        &self.c3
    }

    /// Copy any borrowed data, detaching this ciphertext from its input
    /// buffer.
    pub fn into_owned(self) -> Cipher<'static> {
        Cipher {
            c1: self.c1,
            compress_c1: self.compress_c1,
            c2: Cow::Owned(self.c2.into_owned()),
            c3: self.c3,
        }
    }
}

/// Affine coordinates `(x, y)` of a point other than the identity.
pub(crate) fn coordinates(point: &AffinePoint) -> Result<(FieldBytes, FieldBytes)> {
    match point.to_encoded_point(false).coordinates() {
        Coordinates::Uncompressed { x, y } => Ok((*x, *y)),
        _ => Err(Error::InvalidPoint),
    }
}

/// XOR `KDF(x2‖y2, out.len())` into `out`.
///
/// `Ha_i = SM3(x2‖y2‖ct)` for a 32-bit big-endian counter `ct` starting at 1.
pub(crate) fn kdf(x2: &FieldBytes, y2: &FieldBytes, out: &mut [u8]) -> Result<()> {
    let blocks = out.len().div_ceil(HASH_SIZE);
    if u32::try_from(blocks).is_err() {
        return Err(Error::MessageTooLong);
    }

    let mut hasher = Sm3::new();
    let mut ha = Zeroizing::new(Hash::default());

    for (ct, chunk) in (1..=u32::MAX).zip(out.chunks_mut(HASH_SIZE)) {
        Digest::update(&mut hasher, x2);
        Digest::update(&mut hasher, y2);
        Digest::update(&mut hasher, ct.to_be_bytes());
        hasher.finalize_into_reset(&mut *ha);

        for (byte, key) in chunk.iter_mut().zip(ha.iter()) {
            *byte ^= key;
        }
    }

    Ok(())
}

/// Integrity tag `C3 = SM3(x2‖M‖y2)`.
pub(crate) fn hash_c3(x2: &FieldBytes, msg: &[u8], y2: &FieldBytes) -> Hash {
    Sm3::new()
        .chain_update(x2)
        .chain_update(msg)
        .chain_update(y2)
        .finalize()
}
