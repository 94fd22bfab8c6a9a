// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the polymul768 project.
// See the LICENSE file in the project root for full license information.

//! Evaluation points and interpolation coefficients for the Toom-6 layer.

use super::{NUM_BLOCKS, NUM_POINTS};

/// The eleven points at which the block polynomials are evaluated.
///
/// The declaration order is the column order of the interpolation matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EvalPoint {
  /// 0, which selects block 0
  Zero,
  /// +1
  PlusOne,
  /// -1
  MinusOne,
  /// +2
  PlusTwo,
  /// -2
  MinusTwo,
  /// +3
  PlusThree,
  /// -3
  MinusThree,
  /// +4
  PlusFour,
  /// -4
  MinusFour,
  /// +5
  PlusFive,
  /// The point at infinity, which selects block 5
  Infinity,
}

impl EvalPoint {
  /// All points, in interpolation-column order.
  pub const ALL: [EvalPoint; NUM_POINTS] = [
    EvalPoint::Zero,
    EvalPoint::PlusOne,
    EvalPoint::MinusOne,
    EvalPoint::PlusTwo,
    EvalPoint::MinusTwo,
    EvalPoint::PlusThree,
    EvalPoint::MinusThree,
    EvalPoint::PlusFour,
    EvalPoint::MinusFour,
    EvalPoint::PlusFive,
    EvalPoint::Infinity,
  ];

  /// Position of the point in [`EvalPoint::ALL`].
  #[inline]
  pub const fn index(self) -> usize {
    self as usize
  }

  /// The six block weights `1, x, x^2, x^3, x^4, x^5` for this point.
  ///
  /// For [`EvalPoint::Zero`] and [`EvalPoint::Infinity`] these degenerate to
  /// selecting a single block.
  #[inline]
  pub fn weights(self) -> &'static [i32; NUM_BLOCKS] {
    &EVAL_COEFFS[self.index()]
  }

  /// The block a limit point selects, or `None` for the points that need a
  /// weighted sum.
  #[inline]
  pub const fn limit_block(self) -> Option<usize> {
    match self {
      EvalPoint::Zero => Some(0),
      EvalPoint::Infinity => Some(NUM_BLOCKS - 1),
      _ => None,
    }
  }
}

/// Test-only helpers.
#[cfg(test)]
impl EvalPoint {
  /// Integer value of the point, `None` at infinity.
  pub fn value(self) -> Option<i32> {
    match self {
      EvalPoint::Infinity => None,
      EvalPoint::Zero => Some(0),
      EvalPoint::PlusOne => Some(1),
      EvalPoint::MinusOne => Some(-1),
      EvalPoint::PlusTwo => Some(2),
      EvalPoint::MinusTwo => Some(-2),
      EvalPoint::PlusThree => Some(3),
      EvalPoint::MinusThree => Some(-3),
      EvalPoint::PlusFour => Some(4),
      EvalPoint::MinusFour => Some(-4),
      EvalPoint::PlusFive => Some(5),
    }
  }
}

/// Block weights per point, indexed by [`EvalPoint::index`].
pub(crate) static EVAL_COEFFS: [[i32; NUM_BLOCKS]; NUM_POINTS] = [
  [1, 0, 0, 0, 0, 0],
  [1, 1, 1, 1, 1, 1],
  [1, -1, 1, -1, 1, -1],
  [1, 2, 4, 8, 16, 32],
  [1, -2, 4, -8, 16, -32],
  [1, 3, 9, 27, 81, 243],
  [1, -3, 9, -27, 81, -243],
  [1, 4, 16, 64, 256, 1024],
  [1, -4, 16, -64, 256, -1024],
  [1, 5, 25, 125, 625, 3125],
  [0, 0, 0, 0, 0, 1],
];

/// Row `r` recovers product block `r + 1` from the eleven evaluations, mod q.
///
/// Blocks 0 and 10 are the evaluations at zero and infinity and need no row.
pub(crate) static INTERP_COEFFS: [[i32; NUM_POINTS]; NUM_POINTS - 2] = [
  [7863, 1, 6552, 3276, 8425, 8893, 234, 5090, 4895, 3916, 6949],
  [1705, 7864, 7864, 8846, 8846, 1841, 1841, 5169, 5169, 0, 576],
  [9488, 9569, 7381, 7131, 33, 308, 1920, 8107, 2319, 2889, 4100],
  [3328, 9228, 9228, 2041, 2041, 8027, 8027, 8527, 8527, 0, 9009],
  [3266, 2727, 4935, 8102, 157, 6737, 6138, 8742, 9147, 9023, 8464],
  [6655, 5993, 5993, 9515, 9515, 5365, 5365, 372, 372, 0, 273],
  [8498, 2819, 5952, 901, 3916, 1018, 5776, 3309, 2826, 4301, 150],
  [7969, 1488, 1488, 9085, 9085, 4425, 4425, 5590, 5590, 0, 9799],
  [372, 9457, 9581, 248, 7127, 2702, 5590, 4239, 471, 9358, 9824],
];
