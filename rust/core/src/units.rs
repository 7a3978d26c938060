// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unit conversion between the IP quantities energy codes are written in
//! and the SI quantities the model is stored in.

/// Meters per foot
pub const M_PER_FT: f64 = 0.3048;

/// Square meters per square foot
pub const M2_PER_FT2: f64 = M_PER_FT * M_PER_FT;

#[inline]
pub fn ft_to_m(ft: f64) -> f64 {
    ft * M_PER_FT
}

#[inline]
pub fn ft2_to_m2(ft2: f64) -> f64 {
    ft2 * M2_PER_FT2
}

#[inline]
pub fn m2_to_ft2(m2: f64) -> f64 {
    m2 / M2_PER_FT2
}
