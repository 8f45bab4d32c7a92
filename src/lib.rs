// Copyright © 2023 qFALL-prf contributors
//
// This file is part of qFALL-prf.
//
// qFALL-prf is free software: you can redistribute it and/or modify it under
// the terms of the Mozilla Public License Version 2.0 as published by the
// Mozilla Foundation. See <https://mozilla.org/en-US/MPL/2.0/>.

//! This crate provides pseudorandom functions over prime-order subgroups of
//! multiplicative groups `Z_p^*`, most prominently the Naor-Reingold PRF,
//! together with the group arithmetic needed to set up their keys.

pub mod construction;
pub mod error;
pub mod utils;
