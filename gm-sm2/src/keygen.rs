//! Key pair generation.

use crate::{CompressedPoint, FieldBytes, PublicKey, Result, codec, random};
use rand_core::CryptoRngCore;

/// Generate a key pair, returning the encoded private key and compressed
/// public key.
///
/// The private key is drawn uniformly from `[1, n-2]`, so every generated
/// key is usable for both signing and encryption.
pub fn generate_keypair<R>(rng: &mut R) -> Result<(FieldBytes, CompressedPoint)>
where
    R: CryptoRngCore + ?Sized,
{
    let secret_scalar = random::secret_scalar(rng)?;
    let public_key = PublicKey::from_secret_scalar(&secret_scalar);

    Ok((
        codec::encode_private_key(&secret_scalar),
        codec::encode_public_key(&public_key),
    ))
}

/// Compute the compressed public key `d·G` for an encoded private key.
pub fn public_key_from_private(private_key: &[u8]) -> Result<CompressedPoint> {
    let secret_scalar = codec::decode_private_key(private_key)?;
    let public_key = PublicKey::from_secret_scalar(&secret_scalar);
    Ok(codec::encode_public_key(&public_key))
}
