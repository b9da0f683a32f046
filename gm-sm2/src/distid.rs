//! Distinguishing identifier support.

use crate::{Error, Hash, PublicKey, Result, Sm2};
use elliptic_curve::{PrimeField, sec1::{self, ToEncodedPoint}};
use primeorder::PrimeCurveParams;
use sm3::{Digest, Sm3};

/// Distinguishing identifier used when the caller does not supply one:
/// the ASCII string `1234567812345678`.
///
/// Signer and verifier must agree on the identifier. A signature made under
/// one identifier does not verify under any other.
pub const DEFAULT_DISTID: &[u8] = b"1234567812345678";

/// Compute user information hash `Z` according to [draft-shen-sm2-ecdsa § 5.1.4.4].
///
/// ```text
/// ZA=H256(ENTLA || IDA || a || b || xG || yG || xA || yA)
/// ```
///
/// [draft-shen-sm2-ecdsa § 5.1.4.4]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#section-5.1.4.4
pub(crate) fn hash_z(distid: &[u8], public_key: &PublicKey) -> Result<Hash> {
    let entla: u16 = distid
        .len()
        .checked_mul(8)
        .and_then(|l| l.try_into().ok())
        .ok_or(Error::IdentifierTooLong)?;

    let mut sm3 = Sm3::new();
    sm3.update(entla.to_be_bytes());
    sm3.update(distid);
    sm3.update(Sm2::EQUATION_A.to_repr());
    sm3.update(Sm2::EQUATION_B.to_repr());
    sm3.update(Sm2::GENERATOR.0.to_repr());
    sm3.update(Sm2::GENERATOR.1.to_repr());

    match public_key.to_encoded_point(false).coordinates() {
        sec1::Coordinates::Uncompressed { x, y } => {
            sm3.update(x);
            sm3.update(y);
            Ok(sm3.finalize())
        }
        _ => Err(Error::InvalidPoint),
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_DISTID, hash_z};
    use crate::{Error, NonZeroScalar, PublicKey};
    use alloc::vec;
    use hex_literal::hex;

    fn public_key() -> PublicKey {
        let d = NonZeroScalar::try_from(
            &hex!("4BB8DF505722299592CBED4283B354A13FF5D3FEEB3A0660C5BDF3C87C559499")[..],
        )
        .unwrap();
        PublicKey::from_secret_scalar(&d)
    }

    #[test]
    fn default_distid() {
        assert_eq!(DEFAULT_DISTID, &hex!("31323334353637383132333435363738")[..]);
    }

    #[test]
    fn distid_changes_z() {
        let pk = public_key();
        let z1 = hash_z(DEFAULT_DISTID, &pk).unwrap();
        let z2 = hash_z(b"example@rustcrypto.org", &pk).unwrap();
        assert_ne!(z1, z2);
        assert_eq!(z1, hash_z(DEFAULT_DISTID, &pk).unwrap());
    }

    #[test]
    fn empty_distid() {
        assert!(hash_z(b"", &public_key()).is_ok());
    }

    #[test]
    fn longest_distid() {
        let pk = public_key();
        assert!(hash_z(&vec![0x61; 8191], &pk).is_ok());
        assert_eq!(
            hash_z(&vec![0x61; 8192], &pk).unwrap_err(),
            Error::IdentifierTooLong
        );
    }
}
