// Copyright © 2023 qFALL-prf contributors
//
// This file is part of qFALL-prf.
//
// qFALL-prf is free software: you can redistribute it and/or modify it under
// the terms of the Mozilla Public License Version 2.0 as published by the
// Mozilla Foundation. See <https://mozilla.org/en-US/MPL/2.0/>.

//! This module contains fundamental cryptographic constructions.
//! A construction is build the same way:
//!
//! 1. A trait that combines the common feature, e.g.
//! [`pseudorandom functions`](prf::PRF).
//! 2. Explicit implementations of the trait, e.g.
//! [`NaorReingold`](prf::NaorReingold).

pub mod prf;
