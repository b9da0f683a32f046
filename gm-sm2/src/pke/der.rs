//! ASN.1 DER encoding for SM2 ciphertexts as defined in GM/T 0009.
//!
//! ```text
//! SM2Cipher ::= SEQUENCE {
//!     XCoordinate INTEGER,
//!     YCoordinate INTEGER,
//!     HASH        OCTET STRING SIZE(32),
//!     CipherText  OCTET STRING
//! }
//! ```

use super::{Cipher, coordinates};
use crate::{AffinePoint, EncodedPoint, Error, HASH_SIZE, Result, dsa::der::{decode_uint, left_pad}};
use alloc::{borrow::Cow, vec::Vec};
use der::{
    Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Sequence, Writer,
    asn1::{OctetStringRef, UintRef},
};
use elliptic_curve::sec1::FromEncodedPoint;

/// Serialize `cipher` as ASN.1 DER.
pub(super) fn encode(cipher: &Cipher<'_>) -> Result<Vec<u8>> {
    let (x, y) = coordinates(cipher.c1())?;

    CipherRef {
        x: UintRef::new(&x).map_err(|_| Error::MalformedCiphertext)?,
        y: UintRef::new(&y).map_err(|_| Error::MalformedCiphertext)?,
        digest: OctetStringRef::new(cipher.c3()).map_err(|_| Error::MalformedCiphertext)?,
        cipher: OctetStringRef::new(cipher.c2()).map_err(|_| Error::MalformedCiphertext)?,
    }
    .to_der()
    .map_err(|_| Error::MalformedCiphertext)
}

/// Parse an ASN.1 DER-encoded ciphertext.
pub(super) fn decode(bytes: &[u8]) -> Result<Cipher<'_>> {
    let CipherRef {
        x,
        y,
        digest,
        cipher,
    } = CipherRef::from_der(bytes).map_err(|_| Error::MalformedCiphertext)?;

    let x = left_pad(x.as_bytes()).ok_or(Error::MalformedCiphertext)?;
    let y = left_pad(y.as_bytes()).ok_or(Error::MalformedCiphertext)?;
    let digest: [u8; HASH_SIZE] = digest
        .as_bytes()
        .try_into()
        .map_err(|_| Error::MalformedCiphertext)?;

    // verify that point c1 satisfies the elliptic curve
    let c1 = EncodedPoint::from_affine_coordinates(&x, &y, false);
    let c1 = Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&c1))
        .ok_or(Error::InvalidPoint)?;

    Ok(Cipher {
        c1,
        compress_c1: false,
        c2: Cow::Borrowed(cipher.as_bytes()),
        c3: digest.into(),
    })
}

struct CipherRef<'a> {
    x: UintRef<'a>,
    y: UintRef<'a>,
    digest: OctetStringRef<'a>,
    cipher: OctetStringRef<'a>,
}

impl EncodeValue for CipherRef<'_> {
    fn value_len(&self) -> der::Result<Length> {
        self.x.encoded_len()?
            + self.y.encoded_len()?
            + self.digest.encoded_len()?
            + self.cipher.encoded_len()?
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.x.encode(writer)?;
        self.y.encode(writer)?;
        self.digest.encode(writer)?;
        self.cipher.encode(writer)?;
        Ok(())
    }
}

impl<'a> DecodeValue<'a> for CipherRef<'a> {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            Ok(Self {
                x: decode_uint(reader)?,
                y: decode_uint(reader)?,
                digest: OctetStringRef::decode(reader)?,
                cipher: OctetStringRef::decode(reader)?,
            })
        })
    }
}

impl<'a> Sequence<'a> for CipherRef<'a> {}
