#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::checked_conversions,
    clippy::implicit_saturating_sub,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod codec;
pub mod dsa;
pub mod pke;

mod distid;
mod error;
mod keygen;
mod oneshot;
mod random;

pub use crate::{
    distid::DEFAULT_DISTID,
    error::{Error, Result},
    keygen::{generate_keypair, public_key_from_private},
    oneshot::{decrypt, encrypt, sign, verify},
    random::MAX_ATTEMPTS,
};

pub use {elliptic_curve, rand_core};
pub use sm2::{
    AffinePoint, CompressedPoint, EncodedPoint, FieldBytes, NonZeroScalar, ProjectivePoint,
    PublicKey, Scalar, SecretKey, Sm2, U256,
};

/// SM3 hash output.
pub type Hash = sm3::digest::Output<sm3::Sm3>;

/// Size of a serialized field element or scalar in bytes.
pub(crate) const FIELD_SIZE: usize = 32;

/// Size of an SM3 digest in bytes.
pub(crate) const HASH_SIZE: usize = 32;
