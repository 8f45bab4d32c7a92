// Copyright © 2023 qFALL-prf contributors
//
// This file is part of qFALL-prf.
//
// qFALL-prf is free software: you can redistribute it and/or modify it under
// the terms of the Mozilla Public License Version 2.0 as published by the
// Mozilla Foundation. See <https://mozilla.org/en-US/MPL/2.0/>.

//! This module contains an implementation of the Naor-Reingold PRF
//! over the subgroup of order `q` of `Z_p^*`.
//!
//! The main references are listed in the following:
//! - \[1\] Naor, M., and Reingold, O. (2004).
//! Number-theoretic constructions of efficient pseudo-random functions.
//! In: Journal of the ACM 51.2.
//! <https://dl.acm.org/doi/10.1145/972639.972643>

use super::PRF;
use crate::{error::GroupError, utils::multiplicative_group::MultiplicativeGroup};
use qfall_math::{error::MathError, integer::Z, integer_mod_q::Zq, traits::Pow};
use serde::{Deserialize, Serialize};
use std::iter;

/// This struct keeps the key material of a [`NaorReingold`] PRF instance.
///
/// In contrast to the definition in [\[1\]](<index.html#:~:text=[1]>),
/// each bit position has a key for a set and for an unset bit, and the
/// product of exponents is reduced modulo `q` after every multiplication.
/// The latter keeps exponents short and is sound as `g` has order `q`.
///
/// Attributes:
/// - `initial_key`: specifies the exponent every evaluation starts with,
///   i.e. `a_0` of [\[1\]](<index.html#:~:text=[1]>)
/// - `a0`: specifies the exponents used for set bits of the input
/// - `a1`: specifies the exponents used for unset bits of the input
/// - `p`: specifies the prime modulus of the results
/// - `q`: specifies the prime order of `g`, which divides `p - 1`
/// - `g`: specifies the generator of the order `q` subgroup of `Z_p^*`
///
/// The number `n` of input bits is the length of `a0` and `a1`.
///
/// # Examples
/// ```
/// use qfall_prf::construction::prf::{NaorReingold, PRF};
/// use qfall_prf::utils::multiplicative_group::MultiplicativeGroup;
/// use qfall_math::integer::Z;
///
/// // setup group and key material
/// let (group, q) = MultiplicativeGroup::sample_prime_order_group(128, 32).unwrap();
/// let prf = NaorReingold::sample(16, group.get_modulus(), q).unwrap();
///
/// // evaluate the PRF
/// let value = prf.evaluate(&Z::from(42));
///
/// assert_eq!(value, prf.evaluate(&Z::from(42)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaorReingold {
    initial_key: Z,
    a0: Vec<Z>,
    a1: Vec<Z>,
    p: Z,
    q: Z,
    g: Z,
}

impl NaorReingold {
    /// Instantiates a [`NaorReingold`] PRF instance from the given key material.
    /// The vectors `a0` and `a1` are moved into the instance.
    ///
    /// **WARNING:** The given parameters are not checked for validity.
    /// Invalid key material yields wrong PRF values instead of errors.
    /// If you want to check your parameters, use [`NaorReingold::check_parameters`].
    /// Or use [`NaorReingold::sample`] to generate valid key material.
    ///
    /// Parameters:
    /// - `initial_key`: specifies the initial exponent in `[1, q)`
    /// - `a0`: specifies the exponents in `[1, q)` used for set bits
    /// - `a1`: specifies the exponents in `[1, q)` used for unset bits,
    ///   must have the same length as `a0`
    /// - `p`: specifies the prime modulus
    /// - `q`: specifies a prime dividing `p - 1`
    /// - `g`: specifies an element of order `q` modulo `p`
    ///
    /// Returns a [`NaorReingold`] PRF instance.
    ///
    /// # Examples
    /// ```
    /// use qfall_prf::construction::prf::NaorReingold;
    /// use qfall_math::integer::Z;
    ///
    /// let a0 = vec![Z::from(1), Z::from(2), Z::from(1)];
    /// let a1 = vec![Z::from(1), Z::from(1), Z::from(1)];
    /// let prf = NaorReingold::new(1, a0, a1, 7, 3, 4);
    /// ```
    pub fn new(
        initial_key: impl Into<Z>,
        a0: Vec<Z>,
        a1: Vec<Z>,
        p: impl Into<Z>,
        q: impl Into<Z>,
        g: impl Into<Z>,
    ) -> Self {
        Self {
            initial_key: initial_key.into(),
            a0,
            a1,
            p: p.into(),
            q: q.into(),
            g: g.into(),
        }
    }

    /// Samples fresh key material for `n` input bits over the subgroup
    /// of order `q` of `Z_p^*`.
    /// The generator is found with [`MultiplicativeGroup::find_generator_of_order_unbounded`]
    /// and all exponents are chosen uniformly at random from `[1, q)`.
    ///
    /// Parameters:
    /// - `n`: specifies the number of input bits
    /// - `p`: specifies the prime modulus
    /// - `q`: specifies a prime dividing `p - 1`
    ///
    /// Returns a [`NaorReingold`] PRF instance or a [`GroupError`]
    /// if the group parameters are invalid.
    ///
    /// # Examples
    /// ```
    /// use qfall_prf::construction::prf::NaorReingold;
    ///
    /// // 11 divides 23 - 1
    /// let prf = NaorReingold::sample(8, 23, 11).unwrap();
    ///
    /// assert!(prf.check_parameters().is_ok());
    /// ```
    ///
    /// # Errors and Failures
    /// - Returns a [`GroupError`] of type [`Math`](GroupError::Math)
    /// if `p <= 2`, `q <= 1`, or `q` does not divide `p - 1`.
    pub fn sample(n: usize, p: impl Into<Z>, q: impl Into<Z>) -> Result<Self, GroupError> {
        let p: Z = p.into();
        let q: Z = q.into();

        let group = MultiplicativeGroup::new(&p)?;
        if q <= Z::ONE || (&p - Z::ONE).modulo(&q) != Z::ZERO {
            return Err(MathError::InvalidIntegerInput(String::from(
                "q must be bigger than 1 and divide p - 1.",
            ))
            .into());
        }
        let g = group.find_generator_of_order_unbounded(&q)?;

        let initial_key = Z::sample_uniform(1, &q)?;
        let a0 = Self::sample_exponents(n, &q)?;
        let a1 = Self::sample_exponents(n, &q)?;

        Ok(Self {
            initial_key,
            a0,
            a1,
            p,
            q,
            g,
        })
    }

    /// Samples `n` exponents uniformly at random from `[1, q)`.
    fn sample_exponents(n: usize, q: &Z) -> Result<Vec<Z>, MathError> {
        (0..n).map(|_| Z::sample_uniform(1, q)).collect()
    }

    /// Returns the number `n` of input bits considered by the PRF.
    pub fn get_n(&self) -> usize {
        self.a0.len()
    }

    /// Returns the prime modulus `p`.
    pub fn get_p(&self) -> Z {
        self.p.clone()
    }

    /// Returns the prime order `q` of the generator.
    pub fn get_q(&self) -> Z {
        self.q.clone()
    }

    /// Returns the generator `g`.
    pub fn get_g(&self) -> Z {
        self.g.clone()
    }

    /// Checks whether the key material satisfies all requirements, i.e.
    /// - `a0` and `a1` have the same length,
    /// - `p` and `q` are prime and `q` divides `p - 1`,
    /// - `initial_key`, and all entries of `a0` and `a1` are in `[1, q)`,
    /// - `g` has order `q` modulo `p`.
    ///
    /// This check is not performed during evaluation.
    ///
    /// Returns an empty result or a [`MathError`] if the key material is invalid.
    ///
    /// # Examples
    /// ```
    /// use qfall_prf::construction::prf::NaorReingold;
    /// let prf = NaorReingold::default();
    ///
    /// assert!(prf.check_parameters().is_ok());
    /// ```
    ///
    /// # Errors and Failures
    /// - Returns a [`MathError`] of type [`InvalidIntegerInput`](MathError::InvalidIntegerInput)
    /// if at least one requirement is not satisfied.
    pub fn check_parameters(&self) -> Result<(), MathError> {
        if self.a0.len() != self.a1.len() {
            return Err(MathError::InvalidIntegerInput(format!(
                "a0 and a1 must have the same length, but have length {} and {}.",
                self.a0.len(),
                self.a1.len()
            )));
        }
        if !self.p.is_prime() {
            return Err(MathError::InvalidIntegerInput(String::from(
                "p must be prime.",
            )));
        }
        if !self.q.is_prime() {
            return Err(MathError::InvalidIntegerInput(String::from(
                "q must be prime.",
            )));
        }
        if (&self.p - Z::ONE).modulo(&self.q) != Z::ZERO {
            return Err(MathError::InvalidIntegerInput(String::from(
                "q must divide p - 1.",
            )));
        }

        let out_of_range = iter::once(&self.initial_key)
            .chain(&self.a0)
            .chain(&self.a1)
            .any(|key| key < &Z::ONE || key >= &self.q);
        if out_of_range {
            return Err(MathError::InvalidIntegerInput(String::from(
                "The initial key and all entries of a0 and a1 must be in [1, q).",
            )));
        }

        if self.g <= Z::ONE || self.g >= self.p {
            return Err(MathError::InvalidIntegerInput(String::from(
                "g must be in [2, p).",
            )));
        }
        // as q is prime, g != 1 and g^q = 1 imply that g has order q
        if Zq::from((&self.g, &self.p)).pow(&self.q)?.get_value() != Z::ONE {
            return Err(MathError::InvalidIntegerInput(String::from(
                "g must have order q modulo p.",
            )));
        }

        Ok(())
    }
}

impl Default for NaorReingold {
    /// Initializes a [`NaorReingold`] instance over the subgroup of order `3` of `Z_7^*`
    /// with `3` input bits, `initial_key = 1`, `a0 = [1, 2, 1]`, `a1 = [1, 1, 1]`, and `g = 4`.
    /// This parameter choice is not secure, but it provides an efficient working example.
    ///
    /// # Examples
    /// ```
    /// use qfall_prf::construction::prf::NaorReingold;
    ///
    /// let prf = NaorReingold::default();
    /// ```
    fn default() -> Self {
        let a0 = vec![Z::ONE, Z::from(2), Z::ONE];
        let a1 = vec![Z::ONE, Z::ONE, Z::ONE];

        Self::new(1, a0, a1, 7, 3, 4)
    }
}

#[typetag::serde]
impl PRF for NaorReingold {
    /// Evaluates the PRF on `element` by following these steps:
    /// - e = initial_key
    /// - for each bit position i < n: e = e * a0\[i\] mod q if bit i is set,
    ///   otherwise e = e * a1\[i\] mod q
    /// - output g^e mod p
    ///
    /// Only the `n` least significant bits of `element` are considered,
    /// i.e. `element` is reduced modulo `2^n` first.
    /// For negative `element`, these are the bits of its two's complement.
    ///
    /// Parameters:
    /// - `element`: specifies the input of the PRF
    ///
    /// Returns the PRF value in `[0, p)`.
    ///
    /// # Examples
    /// ```
    /// use qfall_prf::construction::prf::{NaorReingold, PRF};
    /// use qfall_math::integer::Z;
    /// let prf = NaorReingold::default();
    ///
    /// let value = prf.evaluate(&Z::from(5));
    ///
    /// assert_eq!(Z::from(4), value);
    /// ```
    ///
    /// # Panics ...
    /// - if `p <= 1` or `q < 1`.
    fn evaluate(&self, element: &Z) -> Z {
        let mut exponent = self.initial_key.clone();

        if !self.a0.is_empty() {
            // bits at position n and above do not influence the result
            let window = Z::from(2).pow(self.a0.len() as u64).unwrap();
            let bits = element.modulo(&window).to_bits();

            for (i, (key_set, key_unset)) in self.a0.iter().zip(&self.a1).enumerate() {
                let key = if bits.get(i).copied().unwrap_or(false) {
                    key_set
                } else {
                    key_unset
                };
                exponent = (&exponent * key).modulo(&self.q);
            }
        }

        // the exponent is non-negative, hence no inverse has to be computed
        Zq::from((&self.g, &self.p))
            .pow(&exponent)
            .unwrap()
            .get_value()
    }
}

#[cfg(test)]
mod test_new {
    use super::{NaorReingold, Z};

    /// Ensures that `new` is available for types implementing [`Into<Z>`].
    #[test]
    fn availability() {
        let _ = NaorReingold::new(1u8, vec![], vec![], 7u16, 3u32, 4u64);
        let _ = NaorReingold::new(1i8, vec![], vec![], 7i16, 3i32, 4i64);
        let _ = NaorReingold::new(Z::ONE, vec![], vec![], &Z::from(7), 3, Z::from(4));
    }

    /// Ensures that the key material is stored as given.
    #[test]
    fn getters() {
        let prf = NaorReingold::default();

        assert_eq!(3, prf.get_n());
        assert_eq!(Z::from(7), prf.get_p());
        assert_eq!(Z::from(3), prf.get_q());
        assert_eq!(Z::from(4), prf.get_g());
    }
}

#[cfg(test)]
mod test_sample {
    use super::{NaorReingold, Z};
    use crate::{error::GroupError, utils::multiplicative_group::MultiplicativeGroup};

    /// Ensures that sampled key material is valid.
    #[test]
    fn valid_parameters() {
        let (group, q) = MultiplicativeGroup::sample_prime_order_group(256, 64).unwrap();

        for n in [0, 1, 8, 64] {
            let prf = NaorReingold::sample(n, group.get_modulus(), &q).unwrap();

            assert_eq!(n, prf.get_n());
            assert_eq!(group.get_modulus(), prf.get_p());
            assert_eq!(q, prf.get_q());
            assert!(prf.check_parameters().is_ok());
        }
    }

    /// Ensures that `q` not dividing `p - 1` results in an error.
    #[test]
    fn q_not_dividing() {
        assert!(matches!(
            NaorReingold::sample(4, 23, 7),
            Err(GroupError::Math(_))
        ));
        assert!(matches!(
            NaorReingold::sample(4, 23, 23),
            Err(GroupError::Math(_))
        ));
    }

    /// Ensures that invalid `p` or `q` result in an error.
    #[test]
    fn invalid_group() {
        assert!(NaorReingold::sample(4, 2, 1).is_err());
        assert!(NaorReingold::sample(4, 23, 1).is_err());
        assert!(NaorReingold::sample(4, 23, 0).is_err());
        assert!(NaorReingold::sample(4, 23, -11).is_err());
    }

    /// Ensures that `sample` is available for types implementing [`Into<Z>`].
    #[test]
    fn availability() {
        let _ = NaorReingold::sample(2, 23u8, 11u8).unwrap();
        let _ = NaorReingold::sample(2, 23i64, 11i32).unwrap();
        let _ = NaorReingold::sample(2, Z::from(23), &Z::from(11)).unwrap();
    }
}


#[cfg(test)]
mod test_evaluate {
    use super::{NaorReingold, PRF, Z};
    use crate::utils::multiplicative_group::MultiplicativeGroup;
    use qfall_math::{integer_mod_q::Zq, traits::Pow};
    use std::thread;

    /// Returns an instance over the subgroup of order 5 of `Z_11^*` with two input bits.
    fn small_instance() -> NaorReingold {
        let a0 = vec![Z::from(2), Z::ONE];
        let a1 = vec![Z::ONE, Z::from(2)];

        NaorReingold::new(2, a0, a1, 11, 5, 3)
    }

    /// Checks the worked example `5 = 0b101`, where
    /// `e = 1 * a0[0] * a1[1] * a0[2] mod 3 = 1` and `4^1 mod 7 = 4`.
    #[test]
    fn worked_example() {
        let prf = NaorReingold::default();

        assert_eq!(Z::from(4), prf.evaluate(&Z::from(5)));
    }

    /// Checks all inputs of the default instance against values computed by hand.
    #[test]
    fn default_vectors() {
        let prf = NaorReingold::default();
        // the exponent is 2 iff bit 1 is set, as only a0[1] differs from 1
        let expected = [4, 4, 2, 2, 4, 4, 2, 2];

        for (element, value) in expected.iter().enumerate() {
            assert_eq!(Z::from(*value), prf.evaluate(&Z::from(element as u64)));
        }
    }

    /// Checks an instance, where the exponent exceeds `q` before being reduced.
    #[test]
    fn reduced_exponents() {
        let prf = small_instance();
        // 0: 2*1*2 = 4, 1: 2*2*2 = 8 = 3, 2: 2*1*1 = 2, 3: 2*2*1 = 4 (mod 5)
        let expected = [4, 5, 9, 4];

        for (element, value) in expected.iter().enumerate() {
            assert_eq!(Z::from(*value), prf.evaluate(&Z::from(element as u64)));
        }
    }

    /// Ensures that bits at position `n` and above are ignored.
    #[test]
    fn bit_locality() {
        let prf = NaorReingold::default();
        let large = Z::from(2).pow(200).unwrap();

        for element in 0..8 {
            let element = Z::from(element);
            let value = prf.evaluate(&element);

            assert_eq!(value, prf.evaluate(&(&element + Z::from(8))));
            assert_eq!(value, prf.evaluate(&(&element + Z::from(64))));
            assert_eq!(value, prf.evaluate(&(&element + &large)));
        }
    }

    /// Ensures that negative inputs are evaluated on their two's complement bits.
    #[test]
    fn negative_elements() {
        let prf = small_instance();

        assert_eq!(prf.evaluate(&Z::from(3)), prf.evaluate(&Z::MINUS_ONE));
        assert_eq!(prf.evaluate(&Z::from(2)), prf.evaluate(&Z::from(-2)));
        assert_eq!(prf.evaluate(&Z::from(1)), prf.evaluate(&Z::from(-7)));
    }

    /// Ensures that an instance without input bits outputs `g^initial_key`.
    #[test]
    fn no_input_bits() {
        let prf = NaorReingold::new(2, vec![], vec![], 11, 5, 3);

        for element in [0, 1, 12345] {
            assert_eq!(Z::from(9), prf.evaluate(&Z::from(element)));
        }
    }

    /// Ensures that sampled instances are deterministic and map into the subgroup of order `q`.
    #[test]
    fn determinism_and_range() {
        let (group, q) = MultiplicativeGroup::sample_prime_order_group(256, 64).unwrap();
        let p = group.get_modulus();
        let prf = NaorReingold::sample(32, &p, &q).unwrap();

        for element in [0u64, 1, 2, 1 << 20, u32::MAX as u64] {
            let element = Z::from(element);
            let value = prf.evaluate(&element);

            assert_eq!(value, prf.evaluate(&element));
            assert!(Z::ONE <= value && value < p);
            assert_eq!(Z::ONE, Zq::from((&value, &p)).pow(&q).unwrap().get_value());
        }
    }

    /// Ensures that different inputs of a sampled instance result in different values.
    #[test]
    fn distinct_values() {
        let (group, q) = MultiplicativeGroup::sample_prime_order_group(512, 160).unwrap();
        let prf = NaorReingold::sample(16, group.get_modulus(), q).unwrap();

        let values = prf.evaluate_many(&(0..50).map(Z::from).collect::<Vec<Z>>());

        for i in 0..values.len() {
            for j in i + 1..values.len() {
                assert_ne!(values[i], values[j]);
            }
        }
    }

    /// Ensures that `evaluate_many` evaluates each element in order.
    #[test]
    fn evaluate_many() {
        let prf = small_instance();
        let elements: Vec<Z> = [3, 0, 2, 1, 3].into_iter().map(Z::from).collect();

        let values = prf.evaluate_many(&elements);

        assert_eq!(elements.len(), values.len());
        for (element, value) in elements.iter().zip(&values) {
            assert_eq!(&prf.evaluate(element), value);
        }
        assert!(prf.evaluate_many(&[]).is_empty());
    }

    /// Ensures that one instance can be evaluated from several threads at once.
    #[test]
    fn concurrent_evaluation() {
        let (group, q) = MultiplicativeGroup::sample_prime_order_group(128, 32).unwrap();
        let prf = NaorReingold::sample(16, group.get_modulus(), q).unwrap();
        let elements: Vec<Z> = (0..64).map(Z::from).collect();
        let expected = prf.evaluate_many(&elements);

        let prf = &prf;
        let values: Vec<Vec<Z>> = thread::scope(|scope| {
            let handles: Vec<_> = elements
                .chunks(16)
                .map(|chunk| scope.spawn(move || prf.evaluate_many(chunk)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(expected, values.concat());
    }
}
