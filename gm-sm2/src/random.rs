//! Secret scalar sampling.

use crate::{Error, FieldBytes, NonZeroScalar, Result, Scalar};
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

/// Number of candidates drawn from a random number generator before it is
/// considered broken.
///
/// Applies to rejection sampling of scalars as well as to the retry loops of
/// signing and encryption. An honest generator exhausts this budget with
/// probability below 2⁻²⁰⁰⁰.
pub const MAX_ATTEMPTS: usize = 64;

/// Draw a uniformly random scalar in `[1, n-1]` by rejection sampling.
pub(crate) fn nonzero_scalar<R>(rng: &mut R) -> Result<NonZeroScalar>
where
    R: CryptoRngCore + ?Sized,
{
    for _ in 0..MAX_ATTEMPTS {
        let mut bytes = Zeroizing::new(FieldBytes::default());
        rng.try_fill_bytes(&mut bytes)?;

        if let Some(scalar) = Option::from(NonZeroScalar::from_repr(*bytes)) {
            return Ok(scalar);
        }
    }

    Err(Error::EntropyFailure)
}

/// Draw a uniformly random secret key scalar in `[1, n-2]`.
///
/// `n-1` is excluded because SM2DSA requires `1 + d` to be invertible.
pub(crate) fn secret_scalar<R>(rng: &mut R) -> Result<NonZeroScalar>
where
    R: CryptoRngCore + ?Sized,
{
    for _ in 0..MAX_ATTEMPTS {
        let d = nonzero_scalar(rng)?;
        if !bool::from((*d + Scalar::ONE).is_zero()) {
            return Ok(d);
        }
    }

    Err(Error::EntropyFailure)
}

/// Check that `1 + d` is invertible, i.e. `d ≠ n-1`.
pub(crate) fn check_secret_scalar(d: &NonZeroScalar) -> Result<Scalar> {
    Option::from((**d + Scalar::ONE).invert()).ok_or(Error::InvalidScalar)
}

#[cfg(test)]
mod tests {
    use super::{MAX_ATTEMPTS, check_secret_scalar, nonzero_scalar, secret_scalar};
    use crate::{Error, FieldBytes, NonZeroScalar, Scalar};
    use elliptic_curve::PrimeField;
    use rand_core::{CryptoRng, RngCore};

    /// Repeats a fixed byte pattern forever.
    struct ConstantRng(u8);

    impl RngCore for ConstantRng {
        fn next_u32(&mut self) -> u32 {
            rand_core::impls::next_u32_via_fill(self)
        }

        fn next_u64(&mut self) -> u64 {
            rand_core::impls::next_u64_via_fill(self)
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(self.0);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl CryptoRng for ConstantRng {}

    #[test]
    fn accepts_in_range_bytes() {
        let scalar = nonzero_scalar(&mut ConstantRng(0x11)).unwrap();
        assert_eq!(scalar.to_repr(), FieldBytes::from([0x11; 32]));
    }

    #[test]
    fn stuck_at_zero_is_entropy_failure() {
        assert_eq!(nonzero_scalar(&mut ConstantRng(0)).err(), Some(Error::EntropyFailure));
    }

    #[test]
    fn stuck_above_order_is_entropy_failure() {
        // 0xff..ff > n
        assert_eq!(secret_scalar(&mut ConstantRng(0xff)).err(), Some(Error::EntropyFailure));
    }

    #[test]
    fn n_minus_one_has_no_inverse() {
        let n_minus_1 = NonZeroScalar::new(-Scalar::ONE).unwrap();
        assert_eq!(check_secret_scalar(&n_minus_1).err(), Some(Error::InvalidScalar));

        let one = NonZeroScalar::new(Scalar::ONE).unwrap();
        assert!(check_secret_scalar(&one).is_ok());
    }

    #[test]
    fn attempt_budget_is_generous() {
        assert!(MAX_ATTEMPTS >= 32);
    }
}
