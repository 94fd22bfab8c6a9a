// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the polymul768 project.
// See the LICENSE file in the project root for full license information.

//! Elementwise operations over coefficient slices.
//!
//! Every operation walks the slices in index order and touches every element,
//! so the access pattern depends only on the lengths. Operations that take a
//! source use the source's length; the destination must be at least as long.

use crate::reduce::freeze;

/// Coefficient-slice arithmetic modulo q.
///
/// All methods return `&mut Self` so calls can be chained the way scratch
/// buffers are reused in the multiplication ladder.
pub trait PolyOps {
  /// Canonicalizes every coefficient in place.
  fn freeze_all(&mut self) -> &mut Self;

  /// Clears every coefficient.
  fn zero(&mut self) -> &mut Self;

  /// Copies `src` into the prefix of `self`.
  fn set(&mut self, src: &[i32]) -> &mut Self;

  /// `self[i] = freeze(a[i] + b[i])`.
  fn add(&mut self, a: &[i32], b: &[i32]) -> &mut Self;

  /// `self[i] += src[i]`, left unreduced.
  ///
  /// The caller is responsible for keeping every running sum inside the
  /// domain of [`freeze`].
  fn inc(&mut self, src: &[i32]) -> &mut Self;

  /// `self[i] = freeze(c * src[i])`.
  fn scale(&mut self, c: i32, src: &[i32]) -> &mut Self;

  /// `self[i] = freeze(c * self[i])`.
  fn scale_assign(&mut self, c: i32) -> &mut Self;
}

impl PolyOps for [i32] {
  #[inline]
  fn freeze_all(&mut self) -> &mut Self {
    for x in self.iter_mut() {
      *x = freeze(*x);
    }
    self
  }

  #[inline]
  fn zero(&mut self) -> &mut Self {
    self.fill(0);
    self
  }

  #[inline]
  fn set(&mut self, src: &[i32]) -> &mut Self {
    self[..src.len()].copy_from_slice(src);
    self
  }

  #[inline]
  fn add(&mut self, a: &[i32], b: &[i32]) -> &mut Self {
    debug_assert_eq!(a.len(), b.len());
    for ((p, &x), &y) in self.iter_mut().zip(a).zip(b) {
      *p = freeze(x + y);
    }
    self
  }

  #[inline]
  fn inc(&mut self, src: &[i32]) -> &mut Self {
    debug_assert!(self.len() >= src.len());
    for (p, &x) in self.iter_mut().zip(src) {
      *p += x;
    }
    self
  }

  #[inline]
  fn scale(&mut self, c: i32, src: &[i32]) -> &mut Self {
    debug_assert!(self.len() >= src.len());
    for (p, &x) in self.iter_mut().zip(src) {
      *p = freeze(c * x);
    }
    self
  }

  #[inline]
  fn scale_assign(&mut self, c: i32) -> &mut Self {
    for x in self.iter_mut() {
      *x = freeze(c * *x);
    }
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::reduce::Q;

  #[test]
  fn test_zero_and_set() {
    let mut p = [7i32; 6];
    p.zero();
    assert_eq!(p, [0; 6]);

    p.set(&[1, 2, 3]);
    assert_eq!(p, [1, 2, 3, 0, 0, 0]);
  }

  #[test]
  fn test_add_canonicalizes() {
    let mut p = [0i32; 3];
    p.add(&[Q - 1, 5, 0], &[Q - 1, -6, 0]);
    assert_eq!(p, [Q - 2, Q - 1, 0]);
  }

  #[test]
  fn test_inc_defers_reduction() {
    let mut p = [Q - 1, 0];
    p.inc(&[Q - 1, Q]);
    assert_eq!(p, [2 * Q - 2, Q]);
    p.freeze_all();
    assert_eq!(p, [Q - 2, 0]);
  }

  #[test]
  fn test_inc_into_subslice() {
    let mut p = [1i32; 5];
    p[2..].inc(&[10, 20]);
    assert_eq!(p, [1, 1, 11, 21, 1]);
  }

  #[test]
  fn test_scale_negates_into_range() {
    let mut p = [0i32; 3];
    p.scale(-1, &[0, 1, Q - 1]);
    assert_eq!(p, [0, Q - 1, 1]);

    p.scale(3125, &[Q - 1, 2, 1]);
    assert_eq!(p, [(3125 * (Q - 1)) % Q, 6250, 3125]);
  }

  #[test]
  fn test_scale_assign_matches_scale() {
    let src = [5i32, 9000, 12345, -77];
    let mut a = [0i32; 4];
    a.scale(-1024, &src);
    let mut b = src;
    b.scale_assign(-1024);
    assert_eq!(a, b);
    assert!(b.iter().all(|&x| (0..Q).contains(&x)));
  }
}
