//! ASN.1 DER encoding for SM2 signatures.
//!
//! ```text
//! SM2Signature ::= SEQUENCE {
//!     r INTEGER,
//!     s INTEGER
//! }
//! ```
//!
//! Both integers are unsigned values carried in signed ASN.1 `INTEGER`s:
//! they are minimally encoded, with a leading `0x00` whenever the high bit
//! of the first byte would otherwise be set. Decoding tolerates redundant
//! leading zeros; encoding never produces them.

use super::Signature;
use crate::{Error, FIELD_SIZE, FieldBytes, Result};
use alloc::vec::Vec;
use der::{
    Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Sequence, Tag, Tagged,
    Writer,
    asn1::{AnyRef, UintRef},
};

/// Serialize `signature` as ASN.1 DER.
pub(super) fn encode(signature: &Signature) -> Result<Vec<u8>> {
    let r = signature.r_bytes();
    let s = signature.s_bytes();

    SignatureRef {
        r: UintRef::new(&r).map_err(|_| Error::MalformedSignature)?,
        s: UintRef::new(&s).map_err(|_| Error::MalformedSignature)?,
    }
    .to_der()
    .map_err(|_| Error::MalformedSignature)
}

/// Parse an ASN.1 DER-encoded signature.
pub(super) fn decode(bytes: &[u8]) -> Result<Signature> {
    let SignatureRef { r, s } =
        SignatureRef::from_der(bytes).map_err(|_| Error::MalformedSignature)?;

    let r = left_pad(r.as_bytes()).ok_or(Error::MalformedSignature)?;
    let s = left_pad(s.as_bytes()).ok_or(Error::MalformedSignature)?;
    Ok(Signature::from_scalars(r, s))
}

/// Widen a big-endian integer with leading zeros stripped to [`FieldBytes`].
///
/// Returns `None` if the integer does not fit.
pub(crate) fn left_pad(bytes: &[u8]) -> Option<FieldBytes> {
    let offset = FIELD_SIZE.checked_sub(bytes.len())?;

    let mut ret = FieldBytes::default();
    ret[offset..].copy_from_slice(bytes);
    Some(ret)
}

/// Decode an `INTEGER` holding a non-negative value, tolerating redundant
/// leading zero bytes.
pub(crate) fn decode_uint<'a, R: Reader<'a>>(reader: &mut R) -> der::Result<UintRef<'a>> {
    let any = AnyRef::decode(reader)?;
    any.tag().assert_eq(Tag::Integer)?;

    match any.value().first() {
        Some(byte) if byte & 0x80 == 0 => UintRef::new(any.value()),
        _ => Err(Tag::Integer.value_error()),
    }
}

struct SignatureRef<'a> {
    r: UintRef<'a>,
    s: UintRef<'a>,
}

impl EncodeValue for SignatureRef<'_> {
    fn value_len(&self) -> der::Result<Length> {
        self.r.encoded_len()? + self.s.encoded_len()?
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.r.encode(writer)?;
        self.s.encode(writer)?;
        Ok(())
    }
}

impl<'a> DecodeValue<'a> for SignatureRef<'a> {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            Ok(Self {
                r: decode_uint(reader)?,
                s: decode_uint(reader)?,
            })
        })
    }
}

impl<'a> Sequence<'a> for SignatureRef<'a> {}
