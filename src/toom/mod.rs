// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the polymul768 project.
// See the LICENSE file in the project root for full license information.

//! Toom-6 layer: 768×768 as eleven 128×128 products.
//!
//! Each operand is read as a degree-5 polynomial in `y = x^128` whose
//! coefficients are 128-coefficient blocks:
//!
//! ```text
//! f(x) = f_0 + f_1 y + f_2 y^2 + ... + f_5 y^5
//! ```
//!
//! The product has eleven 256-coefficient blocks `c_0..c_10` in `y`. We
//! evaluate both operands at `0, ±1, ±2, ±3, ±4, +5, ∞`, multiply the
//! evaluations pairwise with the Karatsuba ladder, and recover `c_1..c_9` by
//! the fixed interpolation matrix; `c_0` and `c_10` are the products at zero
//! and infinity. Adjacent blocks overlap by 128 coefficients and are added
//! together at the end.
//!
//! # Overflow bounds
//!
//! | Step | Largest unreduced value |
//! |------|-------------------------|
//! | weight × coefficient | `3125 * (q - 1)` |
//! | weighted block sum | `6 * (q - 1)` |
//! | interpolation term | `(q - 1)^2` |
//! | interpolation sum | `11 * (q - 1)` |
//! | overlap add | `2 * (q - 1)` |

mod tables;

pub use tables::EvalPoint;
use tables::INTERP_COEFFS;

use crate::{
  N, PRODUCT_LEN,
  karatsuba::{LADDER_LEN, mul128},
  poly::PolyOps,
};
use rayon::prelude::*;

/// Blocks per operand.
pub(crate) const NUM_BLOCKS: usize = N / BLOCK_LEN;

/// Evaluation points, and blocks in the product.
pub(crate) const NUM_POINTS: usize = 2 * NUM_BLOCKS - 1;

const BLOCK_LEN: usize = LADDER_LEN;

/// One 128×128 product.
type ProductBlock = [i32; 2 * BLOCK_LEN];

#[inline]
fn block(p: &[i32], i: usize) -> &[i32] {
  &p[i * BLOCK_LEN..(i + 1) * BLOCK_LEN]
}

/// Multiplies the evaluations of `f` and `g` at `point` into `e`.
fn evaluate(e: &mut ProductBlock, point: EvalPoint, f: &[i32; N], g: &[i32; N]) {
  if let Some(i) = point.limit_block() {
    mul128(e, block(f, i), block(g, i));
    return;
  }

  let mut a = [0i32; BLOCK_LEN];
  let mut b = [0i32; BLOCK_LEN];
  let mut t = [0i32; BLOCK_LEN];
  for (i, &w) in point.weights().iter().enumerate() {
    a.inc(t.scale(w, block(f, i)));
    b.inc(t.scale(w, block(g, i)));
  }
  a.freeze_all();
  b.freeze_all();
  mul128(e, &a, &b);
}

/// Applies one interpolation row to the evaluations.
fn interpolate(
  c: &mut ProductBlock,
  evals: &[ProductBlock; NUM_POINTS],
  row: &[i32; NUM_POINTS],
) {
  let mut u = [0i32; 2 * BLOCK_LEN];
  c.zero();
  for (e, &w) in evals.iter().zip(row) {
    c.inc(u.scale(w, e));
  }
  c.freeze_all();
}

/// Interpolated product blocks `c_0..c_10`, with `c_1..c_9` still to fill.
fn coefficient_blocks(evals: &[ProductBlock; NUM_POINTS]) -> [ProductBlock; NUM_POINTS] {
  let mut coeffs = [[0i32; 2 * BLOCK_LEN]; NUM_POINTS];
  coeffs[0] = evals[EvalPoint::Zero.index()];
  coeffs[NUM_POINTS - 1] = evals[EvalPoint::Infinity.index()];
  coeffs
}

/// Adds the product blocks together at a stride of 128.
fn overlap_add(h: &mut [i32; PRODUCT_LEN], coeffs: &[ProductBlock; NUM_POINTS]) {
  let last = NUM_POINTS - 1;
  h[..BLOCK_LEN].set(&coeffs[0][..BLOCK_LEN]);
  for k in 1..NUM_POINTS {
    h[k * BLOCK_LEN..(k + 1) * BLOCK_LEN]
      .add(&coeffs[k - 1][BLOCK_LEN..], &coeffs[k][..BLOCK_LEN]);
  }
  h[NUM_POINTS * BLOCK_LEN..].set(&coeffs[last][BLOCK_LEN..]);
}

/// Canonical product of `f` and `g`, one point at a time.
pub(crate) fn toom6(h: &mut [i32; PRODUCT_LEN], f: &[i32; N], g: &[i32; N]) {
  let mut evals = [[0i32; 2 * BLOCK_LEN]; NUM_POINTS];
  for (e, point) in evals.iter_mut().zip(EvalPoint::ALL) {
    evaluate(e, point, f, g);
  }

  let mut coeffs = coefficient_blocks(&evals);
  for (c, row) in coeffs[1..NUM_POINTS - 1].iter_mut().zip(&INTERP_COEFFS) {
    interpolate(c, &evals, row);
  }

  overlap_add(h, &coeffs);
}

/// Same as [`toom6`], with the eleven evaluations and the nine interpolation
/// rows spread over the rayon pool.
pub(crate) fn toom6_par(h: &mut [i32; PRODUCT_LEN], f: &[i32; N], g: &[i32; N]) {
  let mut evals = [[0i32; 2 * BLOCK_LEN]; NUM_POINTS];
  evals
    .par_iter_mut()
    .enumerate()
    .for_each(|(i, e)| evaluate(e, EvalPoint::ALL[i], f, g));

  let mut coeffs = coefficient_blocks(&evals);
  coeffs[1..NUM_POINTS - 1]
    .par_iter_mut()
    .zip(INTERP_COEFFS.par_iter())
    .for_each(|(c, row)| interpolate(c, &evals, row));

  overlap_add(h, &coeffs);
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::reduce::Q;

  #[test]
  fn test_layout_constants() {
    assert_eq!(NUM_BLOCKS, 6);
    assert_eq!(NUM_POINTS, 11);
    assert_eq!(NUM_POINTS * BLOCK_LEN + BLOCK_LEN, PRODUCT_LEN);
  }

  #[test]
  fn test_evaluate_at_one_sums_blocks() {
    // f = 1 in every block, g = 1 in block 0: f(1) = 6, g(1) = 1
    let mut f = [0i32; N];
    let mut g = [0i32; N];
    for i in 0..NUM_BLOCKS {
      f[i * BLOCK_LEN] = 1;
    }
    g[0] = 1;

    let mut e = [0i32; 2 * BLOCK_LEN];
    evaluate(&mut e, EvalPoint::PlusOne, &f, &g);
    assert_eq!(e[0], 6);
    assert!(e[1..].iter().all(|&x| x == 0));

    evaluate(&mut e, EvalPoint::MinusOne, &f, &g);
    assert_eq!(e[0], 0);

    // f(-4) = 1 - 4 + 16 - 64 + 256 - 1024 = -819
    evaluate(&mut e, EvalPoint::MinusFour, &f, &g);
    assert_eq!(e[0], Q - 819);
  }

  #[test]
  fn test_evaluate_limits_use_single_blocks() {
    let mut f = [0i32; N];
    let mut g = [0i32; N];
    f[0] = 2;
    g[0] = 3;
    f[5 * BLOCK_LEN + 1] = 4;
    g[5 * BLOCK_LEN + 2] = 5;

    let mut e = [0i32; 2 * BLOCK_LEN];
    evaluate(&mut e, EvalPoint::Zero, &f, &g);
    assert_eq!(e[0], 6);
    assert_eq!(e.iter().filter(|&&x| x != 0).count(), 1);

    evaluate(&mut e, EvalPoint::Infinity, &f, &g);
    assert_eq!(e[3], 20);
    assert_eq!(e.iter().filter(|&&x| x != 0).count(), 1);
  }

  #[test]
  fn test_overlap_add_places_blocks() {
    let mut coeffs = [[0i32; 2 * BLOCK_LEN]; NUM_POINTS];
    for (k, c) in coeffs.iter_mut().enumerate() {
      c[..BLOCK_LEN].fill(k as i32);
      c[BLOCK_LEN..].fill(100 + k as i32);
    }
    let mut h = [0i32; PRODUCT_LEN];
    overlap_add(&mut h, &coeffs);

    assert!(h[..BLOCK_LEN].iter().all(|&x| x == 0));
    for k in 1..NUM_POINTS {
      let expected = 100 + (k as i32 - 1) + k as i32;
      assert!(h[k * BLOCK_LEN..(k + 1) * BLOCK_LEN].iter().all(|&x| x == expected));
    }
    assert!(h[PRODUCT_LEN - BLOCK_LEN..].iter().all(|&x| x == 110));
  }

  #[test]
  fn test_parallel_matches_sequential() {
    let mut f = [0i32; N];
    let mut g = [0i32; N];
    for i in 0..N {
      f[i] = ((i * 7919) % Q as usize) as i32;
      g[i] = ((i * i + 3) % Q as usize) as i32;
    }
    let mut h0 = [0i32; PRODUCT_LEN];
    let mut h1 = [0i32; PRODUCT_LEN];
    toom6(&mut h0, &f, &g);
    toom6_par(&mut h1, &f, &g);
    assert_eq!(h0, h1);
  }
}
