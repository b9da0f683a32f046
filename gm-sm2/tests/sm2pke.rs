//! SM2 encryption tests.

use elliptic_curve::ops::Reduce;
use gm_sm2::{
    FieldBytes, NonZeroScalar, Scalar, U256,
    pke::{Cipher, DecryptingKey, Mode},
};
use hex_literal::hex;
use proptest::prelude::*;
use rand_chacha::{ChaCha20Rng, rand_core::SeedableRng};

// private key bytes
const PRIVATE_KEY: [u8; 32] =
    hex!("3DDD2A3679BF6F1DFC3B49D3E99114718E48EC170EB4E4D3A82052DAB19E8B50");
const MSG: &[u8] = b"plaintext";

// starts with 04, ciphertext
const CIPHER: [u8; 106] = hex!("041ed68db303f5bc6bce516d5a62e1cd16781d3007df6864d970a56d46a6cecca0e0d33bfc71e78c440ae6afeef1a18cce473b3e27002189a058ddadc9182c80a3f13be66476ba6ef66d95a7fb11f30de441b3b66d566e48348bd830e584e7ec37f9b704ef32eba9055c");
// asn.1: openssl pkeyutl -encrypt -pubin -in plaintext -inkey sm2.pub -out cipher
const ASN1_CIPHER: [u8; 116] = hex!("307202206ba17ad462a75beeb2caf8a1282687ab7e2f248b776a481612d89425a519ce6002210083e1de8c57dae995137227839d3880eaf9fe82a885a750be29ebe58193c8e31a0420d513a555087c2b17a88dd62749435133d325a4afca675284c85d754ba35670f80409bd3a294a6d50184b37");

#[test]
fn decrypt_verify() {
    let dk = DecryptingKey::from_slice(&PRIVATE_KEY).unwrap();
    assert_eq!(dk.decrypt(&CIPHER).unwrap(), MSG);
}

#[test]
fn decrypt_der_verify() {
    let dk = DecryptingKey::from_slice(&PRIVATE_KEY).unwrap();
    assert_eq!(dk.decrypt_der(&ASN1_CIPHER).unwrap(), MSG);

    // the DER form does not depend on the raw layout
    let dk = dk.with_mode(Mode::C1C2C3);
    assert_eq!(dk.decrypt_der(&ASN1_CIPHER).unwrap(), MSG);
}

#[test]
fn decrypt_legacy_layout() {
    let legacy = Cipher::from_slice(&CIPHER, Mode::C1C3C2)
        .unwrap()
        .to_vec(Mode::C1C2C3);

    let dk = DecryptingKey::from_slice(&PRIVATE_KEY).unwrap();
    assert!(dk.decrypt(&legacy).is_err());

    let dk = dk.with_mode(Mode::C1C2C3);
    assert_eq!(dk.decrypt(&legacy).unwrap(), MSG);
}

#[test]
fn der_and_raw_forms_agree() {
    let cipher = Cipher::from_der(&ASN1_CIPHER).unwrap();
    let dk = DecryptingKey::from_slice(&PRIVATE_KEY).unwrap();
    assert_eq!(dk.decrypt(&cipher.to_vec(Mode::C1C3C2)).unwrap(), MSG);

    let cipher = Cipher::from_slice(&CIPHER, Mode::C1C3C2).unwrap();
    assert_eq!(dk.decrypt_der(&cipher.to_der().unwrap()).unwrap(), MSG);
}

prop_compose! {
    fn decrypting_key()(bytes in any::<[u8; 32]>()) -> DecryptingKey {
        let scalar = <Scalar as Reduce<U256>>::reduce_bytes(&FieldBytes::from(bytes));
        DecryptingKey::from_nonzero_scalar(NonZeroScalar::new(scalar).unwrap())
    }
}

proptest! {
    #[test]
    fn encrypt_and_decrypt_der(dk in decrypting_key(), seed in any::<[u8; 32]>()) {
        let mut rng = ChaCha20Rng::from_seed(seed);
        let ek = dk.encrypting_key();
        let cipher_bytes = ek.encrypt_der(&mut rng, MSG).unwrap();
        prop_assert_eq!(dk.decrypt_der(&cipher_bytes).unwrap(), MSG);
    }

    #[test]
    fn encrypt_and_decrypt(
        dk in decrypting_key(),
        seed in any::<[u8; 32]>(),
        msg in proptest::collection::vec(any::<u8>(), 0..100),
    ) {
        let mut rng = ChaCha20Rng::from_seed(seed);
        let ek = dk.encrypting_key();
        let cipher_bytes = ek.encrypt(&mut rng, &msg).unwrap();
        prop_assert_eq!(cipher_bytes.len(), 65 + 32 + msg.len());
        prop_assert_eq!(dk.decrypt(&cipher_bytes).unwrap(), msg);
    }

    #[test]
    fn encrypt_and_decrypt_mode(dk in decrypting_key(), seed in any::<[u8; 32]>()) {
        let mut rng = ChaCha20Rng::from_seed(seed);
        let dk = dk.with_mode(Mode::C1C2C3);
        let ek = dk.encrypting_key();
        prop_assert_eq!(ek.mode(), Mode::C1C2C3);
        let cipher_bytes = ek.encrypt(&mut rng, MSG).unwrap();
        prop_assert_eq!(dk.decrypt(&cipher_bytes).unwrap(), MSG);
    }
}
