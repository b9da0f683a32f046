//! Error types.

use core::fmt;

/// Result type with the `gm-sm2` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// SM2 errors.
///
/// A signature which fails to verify is not an error: the boolean APIs
/// ([`VerifyingKey::is_valid`][crate::dsa::VerifyingKey::is_valid],
/// [`verify`][crate::verify]) report it as `false`. The variants below cover
/// malformed inputs and failures of the environment.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Error {
    /// Key buffer has the wrong size.
    InvalidKeyLength,

    /// Scalar is zero, not reduced modulo the curve order, or unusable as a
    /// signing key.
    InvalidScalar,

    /// Encoded point is not on the curve or is the identity.
    InvalidPoint,

    /// Signature is not a well-formed ASN.1 DER `SEQUENCE` of two integers.
    MalformedSignature,

    /// Ciphertext is truncated or structurally invalid.
    MalformedCiphertext,

    /// Ciphertext integrity tag `C3` did not match.
    MacMismatch,

    /// Random number generator failed, or kept producing unusable output.
    EntropyFailure,

    /// Distinguishing identifier is longer than 8191 bytes.
    IdentifierTooLong,

    /// Message exceeds the key derivation function's output limit.
    MessageTooLong,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::InvalidKeyLength => "invalid SM2 key length",
            Error::InvalidScalar => "invalid SM2 secret scalar",
            Error::InvalidPoint => "invalid SM2 curve point",
            Error::MalformedSignature => "malformed SM2 signature",
            Error::MalformedCiphertext => "malformed SM2 ciphertext",
            Error::MacMismatch => "SM2 ciphertext integrity check failed",
            Error::EntropyFailure => "random number generator failure",
            Error::IdentifierTooLong => "distinguishing identifier too long",
            Error::MessageTooLong => "message too long",
        })
    }
}

impl core::error::Error for Error {}

impl From<rand_core::Error> for Error {
    fn from(_: rand_core::Error) -> Error {
        Error::EntropyFailure
    }
}

impl From<Error> for signature::Error {
    fn from(err: Error) -> signature::Error {
        #[cfg(feature = "std")]
        {
            signature::Error::from_source(err)
        }

        #[cfg(not(feature = "std"))]
        {
            let _ = err;
            signature::Error::new()
        }
    }
}
