//! Canonical byte encodings for SM2 keys and signatures.
//!
//! | Item        | Encoding                                                  |
//! |-------------|-----------------------------------------------------------|
//! | private key | 32-byte big-endian scalar                                 |
//! | public key  | 33-byte SEC1 compressed point (`0x02`/`0x03` prefix + `x`) |
//! | signature   | ASN.1 DER `SEQUENCE { INTEGER r, INTEGER s }`             |
//!
//! Uncompressed 65-byte public keys are accepted when decoding.

use crate::{
    CompressedPoint, EncodedPoint, Error, FIELD_SIZE, FieldBytes, NonZeroScalar, PublicKey, Result,
    dsa::Signature,
};
use alloc::vec::Vec;
use elliptic_curve::{PrimeField, sec1::ToEncodedPoint};

/// Size of a compressed SEC1 point.
pub const COMPRESSED_POINT_SIZE: usize = FIELD_SIZE + 1;

/// Size of an uncompressed SEC1 point.
pub const UNCOMPRESSED_POINT_SIZE: usize = 2 * FIELD_SIZE + 1;

/// Serialize a secret scalar as a fixed-width big-endian integer.
pub fn encode_private_key(secret_scalar: &NonZeroScalar) -> FieldBytes {
    secret_scalar.to_repr()
}

/// Parse a secret scalar from exactly 32 big-endian bytes.
pub fn decode_private_key(bytes: &[u8]) -> Result<NonZeroScalar> {
    let repr: [u8; FIELD_SIZE] = bytes.try_into().map_err(|_| Error::InvalidKeyLength)?;
    Option::from(NonZeroScalar::from_repr(repr.into())).ok_or(Error::InvalidScalar)
}

/// Serialize a public key as a compressed SEC1 point.
pub fn encode_public_key(public_key: &PublicKey) -> CompressedPoint {
    let mut ret = CompressedPoint::default();
    ret.copy_from_slice(public_key.to_encoded_point(true).as_bytes());
    ret
}

/// Serialize a public key as an uncompressed SEC1 point (`0x04‖x‖y`).
pub fn encode_public_key_uncompressed(public_key: &PublicKey) -> EncodedPoint {
    public_key.to_encoded_point(false)
}

/// Parse a public key from a compressed or uncompressed SEC1 point.
///
/// For the compressed form, `y` is recovered from `x` and the parity prefix
/// by solving the curve equation. The result is rejected when no such point
/// exists.
pub fn decode_public_key(bytes: &[u8]) -> Result<PublicKey> {
    match (bytes.len(), bytes.first()) {
        (COMPRESSED_POINT_SIZE, Some(0x02 | 0x03)) | (UNCOMPRESSED_POINT_SIZE, Some(0x04)) => {
            PublicKey::from_sec1_bytes(bytes).map_err(|_| Error::InvalidPoint)
        }
        (COMPRESSED_POINT_SIZE | UNCOMPRESSED_POINT_SIZE, _) => Err(Error::InvalidPoint),
        _ => Err(Error::InvalidKeyLength),
    }
}

/// Serialize a signature as ASN.1 DER.
pub fn encode_signature(signature: &Signature) -> Result<Vec<u8>> {
    signature.to_der()
}

/// Parse an ASN.1 DER signature.
pub fn decode_signature(bytes: &[u8]) -> Result<Signature> {
    Signature::from_der(bytes)
}
