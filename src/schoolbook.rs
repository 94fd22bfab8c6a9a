// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the polymul768 project.
// See the LICENSE file in the project root for full license information.

//! Quadratic reference multiplier.
//!
//! Independent of the reduction primitive and the Karatsuba/Toom layers, so it
//! can serve as the oracle in differential tests and for generating reference
//! corpora. It is neither fast nor constant-time.

use crate::{N, PRODUCT_LEN, Q};

/// Writes `f * g mod q` into `h`, one coefficient pair at a time.
pub fn multiply(h: &mut [i32; PRODUCT_LEN], f: &[i32; N], g: &[i32; N]) {
  let mut acc = [0i64; PRODUCT_LEN];
  for (i, &a) in f.iter().enumerate() {
    for (j, &b) in g.iter().enumerate() {
      acc[i + j] += a as i64 * b as i64;
    }
  }
  for (x, a) in h.iter_mut().zip(acc) {
    *x = a.rem_euclid(Q as i64) as i32;
  }
}
