// Copyright © 2023 qFALL-prf contributors
//
// This file is part of qFALL-prf.
//
// qFALL-prf is free software: you can redistribute it and/or modify it under
// the terms of the Mozilla Public License Version 2.0 as published by the
// Mozilla Foundation. See <https://mozilla.org/en-US/MPL/2.0/>.

//! This module provides the trait a struct should implement if it is an
//! instance of a pseudorandom function. Furthermore, it contains
//! constructions implementing the [`PRF`] trait.
//!
//! The main references are listed in the following:
//! - \[1\] Naor, M., and Reingold, O. (2004).
//! Number-theoretic constructions of efficient pseudo-random functions.
//! In: Journal of the ACM 51.2.
//! <https://dl.acm.org/doi/10.1145/972639.972643>

mod naor_reingold;
pub use naor_reingold::NaorReingold;

use qfall_math::integer::Z;

/// This trait should be implemented by all keyed pseudorandom functions.
/// Each instance holds its key, hence evaluation only requires the input.
///
/// The trait is registered with [`typetag`], such that a `Box<dyn PRF>`
/// can be serialized together with its construction.
#[typetag::serde]
pub trait PRF {
    /// Evaluates the PRF on a single element.
    ///
    /// Parameters:
    /// - `element`: specifies the input of the PRF
    ///
    /// Returns the PRF value of `element`.
    fn evaluate(&self, element: &Z) -> Z;

    /// Evaluates the PRF independently on each element.
    ///
    /// Parameters:
    /// - `elements`: specifies the inputs of the PRF
    ///
    /// Returns the PRF values in the order of `elements`.
    fn evaluate_many(&self, elements: &[Z]) -> Vec<Z> {
        elements.iter().map(|element| self.evaluate(element)).collect()
    }
}
