// Copyright © 2023 qFALL-prf contributors
//
// This file is part of qFALL-prf.
//
// qFALL-prf is free software: you can redistribute it and/or modify it under
// the terms of the Mozilla Public License Version 2.0 as published by the
// Mozilla Foundation. See <https://mozilla.org/en-US/MPL/2.0/>.

//! This module contains [`MultiplicativeGroup`], which provides the operations
//! on multiplicative groups `Z_p^*` needed to set up keys of group-based PRFs.
//!
//! The main references are listed in the following:
//! - \[1\] Menezes, A. J., van Oorschot, P. C., and Vanstone, S. A. (1996).
//! Handbook of Applied Cryptography, Chapter 4.6: Finding generators of cyclic groups.
//! <https://cacr.uwaterloo.ca/hac/about/chap4.pdf>

use crate::{error::GroupError, utils::sampling::sample_folded};
use qfall_math::{error::MathError, integer::Z, integer_mod_q::Zq, traits::Pow};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The multiplicative group `Z_p^*` of residues modulo `p`.
///
/// Attributes:
/// - `p`: specifies the modulus of the group
///
/// # Examples
/// ```
/// use qfall_prf::utils::multiplicative_group::MultiplicativeGroup;
/// use qfall_math::{integer::Z, integer_mod_q::Zq, traits::Pow};
///
/// let group = MultiplicativeGroup::new(23).unwrap();
///
/// // 11 divides 23 - 1
/// let g = group.find_generator_of_order(11, 100).unwrap();
/// assert_eq!(Z::ONE, Zq::from((&g, 23)).pow(11).unwrap().get_value());
///
/// let elements = group.random_elements(5);
/// assert_eq!(5, elements.len());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiplicativeGroup {
    p: Z,
}

impl MultiplicativeGroup {
    /// Instantiates the multiplicative group modulo `p`.
    ///
    /// **WARNING:** `p` is not checked for primality, as this would be costly
    /// for large moduli. All order statements of this module assume that `p` is prime.
    ///
    /// Parameters:
    /// - `p`: specifies the modulus of the group
    ///
    /// Returns a [`MultiplicativeGroup`] or a [`MathError`] if `p <= 2`.
    ///
    /// # Examples
    /// ```
    /// use qfall_prf::utils::multiplicative_group::MultiplicativeGroup;
    ///
    /// let group = MultiplicativeGroup::new(7).unwrap();
    /// ```
    ///
    /// # Errors and Failures
    /// - Returns a [`MathError`] of type [`InvalidIntegerInput`](MathError::InvalidIntegerInput)
    /// if `p <= 2`.
    pub fn new(p: impl Into<Z>) -> Result<Self, MathError> {
        let p: Z = p.into();

        if p <= Z::from(2) {
            return Err(MathError::InvalidIntegerInput(String::from(
                "p must be chosen bigger than 2.",
            )));
        }

        Ok(Self { p })
    }

    /// Samples a group `Z_p^*` whose order is divisible by a freshly sampled prime `q`,
    /// i.e. `p = 2kq + 1` for some `k`, such that `Z_p^*` has a subgroup of order `q`.
    ///
    /// Parameters:
    /// - `p_bits`: specifies the bit length of `p`, which may be undershot by one bit
    /// - `q_bits`: specifies the bit length of `q`
    ///
    /// Returns the group and `q` or a [`MathError`] if the bit lengths are invalid.
    ///
    /// # Examples
    /// ```
    /// use qfall_prf::utils::multiplicative_group::MultiplicativeGroup;
    /// use qfall_math::integer::Z;
    ///
    /// let (group, q) = MultiplicativeGroup::sample_prime_order_group(128, 32).unwrap();
    ///
    /// assert!(q.is_prime());
    /// assert!(group.get_modulus().is_prime());
    /// ```
    ///
    /// # Errors and Failures
    /// - Returns a [`MathError`] of type [`InvalidIntegerInput`](MathError::InvalidIntegerInput)
    /// if `q_bits < 2` or `p_bits < q_bits + 2`.
    pub fn sample_prime_order_group(p_bits: u64, q_bits: u64) -> Result<(Self, Z), MathError> {
        if q_bits < 2 || p_bits < q_bits + 2 {
            return Err(MathError::InvalidIntegerInput(String::from(
                "q_bits must be at least 2 and p_bits at least q_bits + 2.",
            )));
        }

        let two = Z::from(2);
        let q_lower = two.pow(q_bits - 1)?;
        let q_upper = two.pow(q_bits)?;
        // 2kq has p_bits - 1 or p_bits bits for k in [2^(p_bits - q_bits - 2), 2^(p_bits - q_bits - 1))
        let k_lower = two.pow(p_bits - q_bits - 2)?;
        let k_upper = two.pow(p_bits - q_bits - 1)?;

        loop {
            let q = Z::sample_prime_uniform(&q_lower, &q_upper)?;
            // the interval of k is tiny for p_bits close to q_bits, hence q is resampled regularly
            for _ in 0..4 * p_bits {
                let k = Z::sample_uniform(&k_lower, &k_upper)?;
                let p = &two * &k * &q + Z::ONE;
                if p.is_prime() {
                    return Ok((Self { p }, q));
                }
            }
        }
    }

    /// Returns the modulus `p` of the group.
    pub fn get_modulus(&self) -> Z {
        self.p.clone()
    }

    /// Searches an element of order `q` in `Z_p^*`, where `q` is a prime dividing `p - 1`,
    /// by drawing at most `max_attempts` candidates `a` from `[1, p - 2]`.
    ///
    /// Each candidate is mapped to `a^((p-1)/q) mod p`. By Lagrange's theorem, its order
    /// divides `q`, hence any result other than `1` has order exactly `q`.
    ///
    /// Parameters:
    /// - `q`: specifies the prime order of the returned element
    /// - `max_attempts`: specifies the number of candidates that are tried at most
    ///
    /// Returns an element of order `q` or a [`GroupError`] if none was found.
    ///
    /// # Examples
    /// ```
    /// use qfall_prf::utils::multiplicative_group::MultiplicativeGroup;
    /// use qfall_math::integer::Z;
    ///
    /// let group = MultiplicativeGroup::new(7).unwrap();
    /// let g = group.find_generator_of_order(3, 100).unwrap();
    ///
    /// assert!(g == Z::from(2) || g == Z::from(4));
    /// ```
    ///
    /// # Errors and Failures
    /// - Returns a [`GroupError`] of type [`ExhaustedSearch`](GroupError::ExhaustedSearch)
    /// if no element of order `q` was found after `max_attempts` candidates.
    /// This is always the case for `max_attempts = 0` or if `q` does not divide `p - 1`
    /// in a way that leaves non-trivial elements.
    /// - Returns a [`GroupError`] of type [`Math`](GroupError::Math) if `q < 1`.
    pub fn find_generator_of_order(
        &self,
        q: impl Into<Z>,
        max_attempts: u64,
    ) -> Result<Z, GroupError> {
        self.find_generator_of_order_with_rng(q, max_attempts, &mut rand::thread_rng())
    }

    /// Searches an element of order `q` in `Z_p^*` without bounding the number of attempts.
    /// See [`MultiplicativeGroup::find_generator_of_order`] for details.
    ///
    /// # Examples
    /// ```
    /// use qfall_prf::utils::multiplicative_group::MultiplicativeGroup;
    ///
    /// let group = MultiplicativeGroup::new(11).unwrap();
    /// let g = group.find_generator_of_order_unbounded(5).unwrap();
    /// ```
    ///
    /// # Errors and Failures
    /// - Returns a [`GroupError`] of type [`Math`](GroupError::Math) if `q < 1`.
    pub fn find_generator_of_order_unbounded(&self, q: impl Into<Z>) -> Result<Z, GroupError> {
        self.find_generator_of_order(q, u64::MAX)
    }

    /// Searches an element of order `q` in `Z_p^*` drawing candidates from `rng`.
    /// See [`MultiplicativeGroup::find_generator_of_order`] for details.
    ///
    /// # Examples
    /// ```
    /// use qfall_prf::utils::multiplicative_group::MultiplicativeGroup;
    ///
    /// let group = MultiplicativeGroup::new(7).unwrap();
    /// let g = group
    ///     .find_generator_of_order_with_rng(3, 100, &mut rand::rngs::OsRng)
    ///     .unwrap();
    /// ```
    ///
    /// # Errors and Failures
    /// - Returns a [`GroupError`] of type [`ExhaustedSearch`](GroupError::ExhaustedSearch)
    /// if no element of order `q` was found after `max_attempts` candidates.
    /// - Returns a [`GroupError`] of type [`Math`](GroupError::Math) if `q < 1`.
    pub fn find_generator_of_order_with_rng<R: RngCore + CryptoRng>(
        &self,
        q: impl Into<Z>,
        max_attempts: u64,
        rng: &mut R,
    ) -> Result<Z, GroupError> {
        let q: Z = q.into();
        if q < Z::ONE {
            return Err(MathError::InvalidIntegerInput(String::from(
                "The order q must be positive.",
            ))
            .into());
        }

        let p_minus_one = &self.p - Z::ONE;
        let cofactor = p_minus_one.div_floor(&q);

        for attempt in 0..max_attempts {
            // a <- [1, p - 2]
            let a = sample_folded(&Z::ONE, &p_minus_one, rng);
            // g = a^((p-1)/q) mod p
            let g = Zq::from((&a, &self.p)).pow(&cofactor)?.get_value();

            if g != Z::ONE {
                debug!(order = %q, attempts = attempt + 1, "found element of prescribed order");
                return Ok(g);
            }
        }

        warn!(order = %q, max_attempts, modulus = %self.p, "search for element of prescribed order exhausted");
        Err(GroupError::ExhaustedSearch {
            order: q,
            max_attempts,
            modulus: self.p.clone(),
        })
    }

    /// Samples `count` elements of `Z_p^*`, i.e. values in `[1, p)`.
    /// The elements are sampled independently, hence they are not necessarily distinct.
    ///
    /// Parameters:
    /// - `count`: specifies the number of sampled elements
    ///
    /// Returns a vector of `count` elements.
    ///
    /// # Examples
    /// ```
    /// use qfall_prf::utils::multiplicative_group::MultiplicativeGroup;
    /// use qfall_math::integer::Z;
    ///
    /// let group = MultiplicativeGroup::new(7).unwrap();
    /// let elements = group.random_elements(10);
    ///
    /// assert!(elements.iter().all(|e| &Z::ONE <= e && e < &Z::from(7)));
    /// ```
    pub fn random_elements(&self, count: usize) -> Vec<Z> {
        self.random_elements_with_rng(count, &mut rand::thread_rng())
    }

    /// Samples `count` elements of `Z_p^*` using the randomness of `rng`.
    /// See [`MultiplicativeGroup::random_elements`] for details.
    ///
    /// # Examples
    /// ```
    /// use qfall_prf::utils::multiplicative_group::MultiplicativeGroup;
    ///
    /// let group = MultiplicativeGroup::new(7).unwrap();
    /// let elements = group.random_elements_with_rng(10, &mut rand::rngs::OsRng);
    /// ```
    pub fn random_elements_with_rng<R: RngCore + CryptoRng>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Vec<Z> {
        (0..count)
            .map(|_| sample_folded(&Z::ONE, &self.p, rng))
            .collect()
    }
}

#[cfg(test)]
mod test_new {
    use super::{MultiplicativeGroup, Z};

    /// Ensures that moduli of at most 2 result in an error.
    #[test]
    fn invalid_modulus() {
        assert!(MultiplicativeGroup::new(2).is_err());
        assert!(MultiplicativeGroup::new(1).is_err());
        assert!(MultiplicativeGroup::new(0).is_err());
        assert!(MultiplicativeGroup::new(-7).is_err());
    }

    /// Ensures that `new` is available for types implementing [`Into<Z>`].
    #[test]
    fn availability() {
        let _ = MultiplicativeGroup::new(7u8).unwrap();
        let _ = MultiplicativeGroup::new(7i32).unwrap();
        let _ = MultiplicativeGroup::new(7u64).unwrap();
        let _ = MultiplicativeGroup::new(Z::from(7)).unwrap();
        let _ = MultiplicativeGroup::new(&Z::from(7)).unwrap();
    }

    /// Ensures that the modulus is stored.
    #[test]
    fn get_modulus() {
        let group = MultiplicativeGroup::new(23).unwrap();

        assert_eq!(Z::from(23), group.get_modulus());
    }

    /// Ensures that the group can be serialized and deserialized.
    #[test]
    fn serialization() {
        let group = MultiplicativeGroup::new(23).unwrap();

        let string = serde_json::to_string(&group).unwrap();
        let group_2: MultiplicativeGroup = serde_json::from_str(&string).unwrap();

        assert_eq!(group, group_2);
    }
}
