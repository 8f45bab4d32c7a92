// Copyright © 2023 qFALL-prf contributors
//
// This file is part of qFALL-prf.
//
// qFALL-prf is free software: you can redistribute it and/or modify it under
// the terms of the Mozilla Public License Version 2.0 as published by the
// Mozilla Foundation. See <https://mozilla.org/en-US/MPL/2.0/>.

//! This module contains common functions that are used by constructions.
//!
//! This includes the arithmetic of multiplicative groups `Z_p^*` used to set up keys.

pub mod multiplicative_group;
pub mod sampling;
