// Copyright © 2023 qFALL-prf contributors
//
// This file is part of qFALL-prf.
//
// qFALL-prf is free software: you can redistribute it and/or modify it under
// the terms of the Mozilla Public License Version 2.0 as published by the
// Mozilla Foundation. See <https://mozilla.org/en-US/MPL/2.0/>.

//! This module contains the errors returned by the group routines.
//!
//! Invalid parameters are reported as [`MathError`], as throughout `qfall-math`.
//! [`GroupError`] additionally covers searches that ran out of attempts.

use qfall_math::{error::MathError, integer::Z};
use thiserror::Error;

/// Errors of the group arithmetic in
/// [`MultiplicativeGroup`](crate::utils::multiplicative_group::MultiplicativeGroup).
#[derive(Error, Debug)]
pub enum GroupError {
    /// No element of the requested order was found within the attempt budget.
    /// Either the budget was too small or `order` does not divide `modulus - 1`.
    #[error(
        "could not find an element of order {order} after {max_attempts} attempts \
        in the multiplicative group modulo {modulus}"
    )]
    ExhaustedSearch {
        order: Z,
        max_attempts: u64,
        modulus: Z,
    },
    #[error(transparent)]
    Math(#[from] MathError),
}
