//! Operations over encoded byte buffers.
//!
//! Keys are taken in their [`codec`] form: 32-byte private keys and
//! compressed or uncompressed SEC1 public keys.

use crate::{
    DEFAULT_DISTID, Result, codec,
    dsa::{Signature, SigningKey, VerifyingKey},
    pke::{DecryptingKey, EncryptingKey},
};
use alloc::vec::Vec;
use rand_core::CryptoRngCore;

/// Sign `msg` with an encoded private key, returning an ASN.1 DER signature.
///
/// `distid` defaults to [`DEFAULT_DISTID`].
pub fn sign<R>(
    rng: &mut R,
    private_key: &[u8],
    msg: &[u8],
    distid: Option<&[u8]>,
) -> Result<Vec<u8>>
where
    R: CryptoRngCore + ?Sized,
{
    let signing_key = SigningKey::from_slice(distid.unwrap_or(DEFAULT_DISTID), private_key)?;
    signing_key.sign_msg(rng, msg)?.to_der()
}

/// Verify an ASN.1 DER signature over `msg` against an encoded public key.
///
/// Malformed key or signature encodings are errors; a well-formed signature
/// which does not verify yields `Ok(false)`.
pub fn verify(
    public_key: &[u8],
    msg: &[u8],
    distid: Option<&[u8]>,
    signature: &[u8],
) -> Result<bool> {
    let verifying_key = VerifyingKey::from_bytes(distid.unwrap_or(DEFAULT_DISTID), public_key)?;
    let signature = Signature::from_der(signature)?;
    Ok(verifying_key.is_valid(msg, &signature))
}

/// Encrypt `msg` to an encoded public key, producing `C1‖C3‖C2` with an
/// uncompressed `C1`.
pub fn encrypt<R>(rng: &mut R, public_key: &[u8], msg: &[u8]) -> Result<Vec<u8>>
where
    R: CryptoRngCore + ?Sized,
{
    EncryptingKey::new(codec::decode_public_key(public_key)?).encrypt(rng, msg)
}

/// Decrypt a `C1‖C3‖C2` ciphertext with an encoded private key.
pub fn decrypt(private_key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    DecryptingKey::from_slice(private_key)?.decrypt(ciphertext)
}
