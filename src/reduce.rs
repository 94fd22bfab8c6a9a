// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the polymul768 project.
// See the LICENSE file in the project root for full license information.

//! Constant-time reduction modulo q = 9829.
//!
//! [`freeze`] maps any `i32` in the open interval
//! `(-FREEZE_BOUND, FREEZE_BOUND)` to its canonical representative in
//! `[0, Q)`. It performs two fixed-point reciprocal subtractions followed by a
//! branchless conditional add:
//!
//! ```text
//! x -= q * ((13 * x) >> 17)              |x| < 165_191_050  ->  |x| < ~2^15
//! x -= q * ((427 * x + 2^21) >> 22)      -> x in [-q, q)
//! x  = select(x < 0, x + q, x)           -> x in [0, q)
//! ```
//!
//! `13 / 2^17` and `427 / 2^22` both approximate `1 / 9829`. The first
//! product `13 * x` is what bounds the domain: `13 * 165_191_049` is the
//! largest multiple that still fits in an `i32`.

use subtle::{Choice, ConditionallySelectable};

/// The modulus.
pub const Q: i32 = 9829;

/// Exclusive bound on `|x|` for which [`freeze`] is defined.
pub const FREEZE_BOUND: i32 = 165_191_050;

/// Reduces `x` modulo [`Q`] into `[0, Q)`.
///
/// Runs in time independent of `x`: there is no branch and no memory access
/// keyed on the value. The caller must guarantee `|x| < FREEZE_BOUND`; outside
/// that range the first step overflows.
#[inline]
pub fn freeze(x: i32) -> i32 {
  let mut x = x;
  x -= Q * ((13 * x) >> 17);
  x -= Q * ((427 * x + 2_097_152) >> 22);
  let y = x + Q;
  i32::conditional_select(&x, &y, is_negative(x))
}

/// Sign bit of `x` as a [`Choice`], read from the two's complement
/// representation.
#[inline]
fn is_negative(x: i32) -> Choice {
  Choice::from(((x as u32) >> 31) as u8)
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  fn canonical(x: i32) -> i32 {
    x.rem_euclid(Q)
  }

  #[test]
  fn test_freeze_domain_edges() {
    assert_eq!(freeze(FREEZE_BOUND - 1), 4875);
    assert_eq!(freeze(-(FREEZE_BOUND - 1)), 4954);
    assert_eq!(freeze(FREEZE_BOUND - 1), canonical(FREEZE_BOUND - 1));
    assert_eq!(freeze(-(FREEZE_BOUND - 1)), canonical(-(FREEZE_BOUND - 1)));
  }

  #[test]
  fn test_freeze_small_values() {
    assert_eq!(freeze(0), 0);
    assert_eq!(freeze(1), 1);
    assert_eq!(freeze(-1), Q - 1);
    assert_eq!(freeze(Q), 0);
    assert_eq!(freeze(-Q), 0);
    assert_eq!(freeze(Q - 1), Q - 1);
    // largest product of two canonical values
    assert_eq!(freeze((Q - 1) * (Q - 1)), 1);
    assert_eq!(freeze(-1024 * (Q - 1)), 1024);
  }

  #[test]
  fn test_freeze_strided_sweep() {
    let mut x = -(FREEZE_BOUND - 1);
    while x < FREEZE_BOUND {
      assert_eq!(freeze(x), canonical(x), "x={x}");
      x += 997;
    }
  }

  #[test]
  fn test_freeze_idempotent() {
    for x in -3 * Q..3 * Q {
      let y = freeze(x);
      assert_eq!(freeze(y), y);
    }
  }

  #[test]
  #[ignore = "exhaustive sweep over the whole domain; run with --ignored --release"]
  fn test_freeze_exhaustive() {
    for x in -(FREEZE_BOUND - 1)..FREEZE_BOUND {
      assert_eq!(freeze(x), canonical(x), "x={x}");
    }
  }

  proptest! {
    #[test]
    fn freeze_is_canonical(x in -(FREEZE_BOUND - 1)..FREEZE_BOUND) {
      let y = freeze(x);
      prop_assert!((0..Q).contains(&y));
      prop_assert_eq!(y, canonical(x));
    }
  }
}
