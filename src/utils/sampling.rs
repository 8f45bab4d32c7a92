// Copyright © 2023 qFALL-prf contributors
//
// This file is part of qFALL-prf.
//
// qFALL-prf is free software: you can redistribute it and/or modify it under
// the terms of the Mozilla Public License Version 2.0 as published by the
// Mozilla Foundation. See <https://mozilla.org/en-US/MPL/2.0/>.

//! This module contains the sampling routine shared by the group arithmetic.
//!
//! Values are sampled by drawing a uniform bit string of the bit length of the
//! upper bound and folding it into the target interval with a modular reduction.
//! For bounds that are not powers of two, residues close to the lower bound are
//! slightly more likely than others. This bias is not corrected.

use qfall_math::integer::Z;
use rand::{CryptoRng, RngCore};

/// Samples a value in `[lower, upper)` by modular folding of a random bit string.
///
/// Parameters:
/// - `lower`: specifies the inclusive lower bound
/// - `upper`: specifies the exclusive upper bound
/// - `rng`: specifies the cryptographically secure source of randomness
///
/// Returns `bits mod (upper - lower) + lower`, where `bits` is a uniformly
/// random integer of the bit length of `upper`.
///
/// # Examples
/// ```
/// use qfall_prf::utils::sampling::sample_folded;
/// use qfall_math::integer::Z;
///
/// let value = sample_folded(&Z::ONE, &Z::from(7), &mut rand::thread_rng());
///
/// assert!(Z::ONE <= value && value < Z::from(7));
/// ```
///
/// # Panics ...
/// - if `upper <= lower`.
pub fn sample_folded<R: RngCore + CryptoRng>(lower: &Z, upper: &Z, rng: &mut R) -> Z {
    assert!(lower < upper, "The interval [lower, upper) must not be empty.");

    let range = upper - lower;
    // a single residue remains, no reduction modulo 1 needed
    if range == Z::ONE {
        return lower.clone();
    }

    let bit_length = upper.bits() as usize;
    let mut bytes = vec![0u8; bit_length.div_ceil(8)];
    rng.fill_bytes(&mut bytes);
    let bits: Vec<bool> = (0..bit_length)
        .map(|i| (bytes[i / 8] >> (i % 8)) & 1 == 1)
        .collect();

    Z::from_bits(&bits).modulo(&range) + lower
}
