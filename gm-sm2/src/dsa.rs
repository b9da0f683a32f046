//! SM2 Digital Signature Algorithm (SM2DSA) as defined in [draft-shen-sm2-ecdsa § 5].
//!
//! ## Usage
//!
#![cfg_attr(feature = "getrandom", doc = "```")]
#![cfg_attr(not(feature = "getrandom"), doc = "```ignore")]
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use gm_sm2::{
//!     DEFAULT_DISTID, SecretKey,
//!     dsa::{Signature, SigningKey, VerifyingKey},
//!     rand_core::OsRng,
//! };
//!
//! // Signing
//! let secret_key = SecretKey::random(&mut OsRng);
//! let signing_key = SigningKey::new(DEFAULT_DISTID, &secret_key)?;
//! let verifying_key_bytes = signing_key.verifying_key().to_bytes();
//! let message = b"test message";
//! let signature: Signature = signing_key.sign_msg(&mut OsRng, message)?;
//! let signature_der = signature.to_der()?;
//!
//! // Verifying
//! let verifying_key = VerifyingKey::from_bytes(DEFAULT_DISTID, &verifying_key_bytes)?;
//! let signature = Signature::from_der(&signature_der)?;
//! assert!(verifying_key.is_valid(message, &signature));
//! # Ok(())
//! # }
//! ```
//!
//! The distinguishing identifier is bound into every signature: a verifier
//! must be constructed with the same identifier the signer used.
//!
//! [draft-shen-sm2-ecdsa § 5]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#section-5

pub(crate) mod der;
mod signing;
mod verifying;

pub use signature;

pub use self::{signing::SigningKey, verifying::VerifyingKey};

use crate::{Error, FIELD_SIZE, FieldBytes, NonZeroScalar, Result};
use core::fmt::{self, Debug};

/// SM2DSA signature in its fixed-width `r‖s` form.
pub type SignatureBytes = [u8; Signature::BYTE_SIZE];

/// SM2DSA signature.
///
/// Holds `r` and `s` as 32-byte big-endian integers. Parsing does not
/// range-check them: a signature with a component outside `[1, n-1]` is
/// representable and simply fails verification.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Signature {
    r: FieldBytes,
    s: FieldBytes,
}

impl Signature {
    /// Size of a fixed-width `r‖s` encoded SM2DSA signature in bytes.
    pub const BYTE_SIZE: usize = 2 * FIELD_SIZE;

    /// Parse a signature from its fixed-width `r‖s` form.
    pub fn from_bytes(bytes: &SignatureBytes) -> Self {
        let mut r = FieldBytes::default();
        let mut s = FieldBytes::default();
        r.copy_from_slice(&bytes[..FIELD_SIZE]);
        s.copy_from_slice(&bytes[FIELD_SIZE..]);
        Self { r, s }
    }

    /// Parse a signature from a byte slice containing its fixed-width `r‖s`
    /// form.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        SignatureBytes::try_from(bytes)
            .map(|bytes| Self::from_bytes(&bytes))
            .map_err(|_| Error::MalformedSignature)
    }

    /// Create a [`Signature`] from the serialized `r` and `s` scalar values
    /// which comprise the signature.
    pub fn from_scalars(r: impl Into<FieldBytes>, s: impl Into<FieldBytes>) -> Self {
        Self {
            r: r.into(),
            s: s.into(),
        }
    }

    /// Parse an ASN.1 DER-encoded signature.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        der::decode(bytes)
    }

    /// Serialize this signature as ASN.1 DER.
    pub fn to_der(&self) -> Result<alloc::vec::Vec<u8>> {
        der::encode(self)
    }

    /// Serialize this signature in its fixed-width `r‖s` form.
    pub fn to_bytes(&self) -> SignatureBytes {
        let mut ret = [0; Self::BYTE_SIZE];
        let (r_bytes, s_bytes) = ret.split_at_mut(FIELD_SIZE);
        r_bytes.copy_from_slice(&self.r);
        s_bytes.copy_from_slice(&self.s);
        ret
    }

    /// Bytes for the `r` component of a signature.
    pub fn r_bytes(&self) -> FieldBytes {
        self.r
    }

    /// Bytes for the `s` component of a signature.
    pub fn s_bytes(&self) -> FieldBytes {
        self.s
    }

    /// Get the `r` component as a scalar, if it lies in `[1, n-1]`.
    pub fn r(&self) -> Option<NonZeroScalar> {
        NonZeroScalar::from_repr(self.r).into()
    }

    /// Get the `s` component as a scalar, if it lies in `[1, n-1]`.
    pub fn s(&self) -> Option<NonZeroScalar> {
        NonZeroScalar::from_repr(self.s).into()
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gm_sm2::dsa::Signature(")?;

        for byte in self.to_bytes() {
            write!(f, "{:02X}", byte)?;
        }

        write!(f, ")")
    }
}

impl From<Signature> for SignatureBytes {
    fn from(signature: Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

impl From<&SignatureBytes> for Signature {
    fn from(bytes: &SignatureBytes) -> Signature {
        Signature::from_bytes(bytes)
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Signature> {
        Signature::from_slice(bytes)
    }
}
