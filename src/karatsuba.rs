// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the polymul768 project.
// See the LICENSE file in the project root for full license information.

//! Karatsuba ladder from 4×4 up to 128×128.
//!
//! [`karatsuba`] multiplies two length-`n` operands into a length-`2n`
//! product using three half-size products, bottoming out in the schoolbook
//! [`mul4`]. Starting from 128 the recursion takes exactly five doublings.
//!
//! # Overflow bounds
//!
//! Base case inputs are always canonical, so each base product is at most
//! `4 * (q - 1)`. At every level the output is a sum of two lower-level
//! outputs plus two canonical terms, all non-negative, so the bound at most
//! doubles per level plus `2 * (q - 1)`; at 128 it is below `2^21`, far inside
//! the domain of [`freeze`]. [`mul128`] canonicalizes before returning.

use crate::{poly::PolyOps, reduce::freeze};

/// Operand length of the schoolbook base case.
pub(crate) const BASE_LEN: usize = 4;

/// Operand length at the top of the ladder.
pub(crate) const LADDER_LEN: usize = 128;

/// Scratch words needed by [`karatsuba`] for operands of length `n`.
///
/// Each level carves out `t` (n words) and `z` (2n words) and hands the rest
/// down, so the total is `3 * (n + n/2 + ... + 2 * BASE_LEN) = 6 * (n - BASE_LEN)`.
pub(crate) const fn scratch_len(n: usize) -> usize {
  6 * (n - BASE_LEN)
}

const LADDER_SCRATCH_LEN: usize = scratch_len(LADDER_LEN);

/// Schoolbook 4×4 product; `p[7]` is always zero.
///
/// Each partial product is frozen, the running sums are not.
#[inline]
pub(crate) fn mul4(p: &mut [i32], f: &[i32], g: &[i32]) {
  p[..2 * BASE_LEN].zero();
  for i in 0..BASE_LEN {
    for j in 0..BASE_LEN {
      p[i + j] += freeze(f[i] * g[j]);
    }
  }
}

/// Writes the length-`2n` product of `f` and `g` into `p`, unreduced.
///
/// `n` must be a power of two no smaller than [`BASE_LEN`], and `scratch` must
/// hold at least [`scratch_len`]`(n)` words. Its contents on entry are
/// irrelevant.
pub(crate) fn karatsuba(p: &mut [i32], f: &[i32], g: &[i32], scratch: &mut [i32]) {
  let n = f.len();
  debug_assert!(n >= BASE_LEN && n.is_power_of_two());
  debug_assert_eq!(g.len(), n);
  debug_assert_eq!(p.len(), 2 * n);
  debug_assert!(scratch.len() >= scratch_len(n));

  if n == BASE_LEN {
    mul4(p, f, g);
    return;
  }

  let l = n / 2;
  let (t, rest) = scratch.split_at_mut(n);
  let (z, rest) = rest.split_at_mut(2 * n);
  let (f0, f1) = f.split_at(l);
  let (g0, g1) = g.split_at(l);

  // z = A - x^l B
  karatsuba(t, f0, g0, rest);
  z[..n].set(t);
  z[n..].zero();
  karatsuba(t, f1, g1, rest);
  t.scale_assign(-1);
  z[l..l + n].inc(t);

  // p = z - x^l z = A - x^l (A + B) + x^2l B
  p.set(z);
  z[..3 * l].scale_assign(-1);
  p[l..].inc(&z[..3 * l]);

  // p += x^l (f0 + f1)(g0 + g1)
  let (zf, zg) = z.split_at_mut(l);
  zf.add(f0, f1);
  zg[..l].add(g0, g1);
  karatsuba(t, zf, &zg[..l], rest);
  p[l..l + n].inc(t);
}

/// Canonical 128×128 product, the block multiplication of the Toom-6 layer.
pub(crate) fn mul128(p: &mut [i32; 2 * LADDER_LEN], f: &[i32], g: &[i32]) {
  let mut scratch = [0i32; LADDER_SCRATCH_LEN];
  karatsuba(p, f, g, &mut scratch);
  p.freeze_all();
}
