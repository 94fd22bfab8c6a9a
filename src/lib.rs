//! This library implements constant-time multiplication of 768-coefficient
//! polynomials modulo q = 9829, the ring arithmetic of NTRU Prime.
//!
//! The product is computed by a six-way Toom–Cook split whose eleven
//! 128×128 block products each run through a five-level Karatsuba ladder.
//! Coefficients are `i32`; inputs must be canonical (in `[0, q)`) and outputs
//! always are.
//!
//! ```
//! use polymul768::{N, PRODUCT_LEN, multiply};
//!
//! let mut f = [0i32; N];
//! let mut g = [0i32; N];
//! f[1] = 3; // 3x
//! g[2] = 5; // 5x^2
//!
//! let mut h = [0i32; PRODUCT_LEN];
//! multiply(&mut h, &f, &g);
//! assert_eq!(h[3], 15);
//! ```
#![deny(
  warnings,
  unused,
  future_incompatible,
  nonstandard_style,
  rust_2018_idioms,
  missing_docs
)]
#![forbid(unsafe_code)]

// private modules
mod karatsuba;
mod toom;

// public modules
pub mod corpus;
pub mod errors;
pub mod poly;
pub mod reduce;
pub mod schoolbook;

pub use reduce::{FREEZE_BOUND, Q, freeze};
pub use toom::EvalPoint;

use poly::PolyOps;

/// Number of coefficients in an operand.
pub const N: usize = 768;

/// Number of coefficients in a product.
pub const PRODUCT_LEN: usize = 2 * N;

/// Writes the product `f * g mod q` into `h`.
///
/// `f` and `g` must hold canonical representatives in `[0, q)`; every
/// coefficient of `h` is canonical on return. The control flow and memory
/// access pattern do not depend on the coefficient values.
pub fn multiply(h: &mut [i32; PRODUCT_LEN], f: &[i32; N], g: &[i32; N]) {
  toom::toom6(h, f, g);
  h.freeze_all();
}

/// Same as [`multiply`], with the Toom-6 evaluations and interpolations run on
/// the rayon thread pool.
pub fn multiply_par(h: &mut [i32; PRODUCT_LEN], f: &[i32; N], g: &[i32; N]) {
  toom::toom6_par(h, f, g);
  h.freeze_all();
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_unit_impulse() {
    let mut f = [0i32; N];
    let mut g = [0i32; N];
    f[0] = 1;
    g[0] = 1;
    let mut h = [Q - 1; PRODUCT_LEN];
    multiply(&mut h, &f, &g);

    let mut expected = [0i32; PRODUCT_LEN];
    expected[0] = 1;
    assert_eq!(h, expected);
  }

  #[test]
  fn test_shifted_impulse() {
    let mut f = [0i32; N];
    let mut g = [0i32; N];
    f[1] = 1;
    g[0] = 1;
    let mut h = [0i32; PRODUCT_LEN];
    multiply(&mut h, &f, &g);

    let mut expected = [0i32; PRODUCT_LEN];
    expected[1] = 1;
    assert_eq!(h, expected);
  }

  #[test]
  fn test_top_degree_impulse() {
    let mut f = [0i32; N];
    f[N - 1] = 2;
    let mut h = [0i32; PRODUCT_LEN];
    multiply(&mut h, &f, &f);

    let mut expected = [0i32; PRODUCT_LEN];
    expected[PRODUCT_LEN - 2] = 4;
    assert_eq!(h, expected);
  }

  #[test]
  fn test_zero_operand() {
    let f = [0i32; N];
    let g: [i32; N] = std::array::from_fn(|i| (i as i32 * 31) % Q);
    let mut h = [7i32; PRODUCT_LEN];
    multiply(&mut h, &f, &g);
    assert_eq!(h, [0i32; PRODUCT_LEN]);
  }

  #[test]
  fn test_maximal_operands_match_schoolbook() {
    let f = [Q - 1; N];
    let mut h = [0i32; PRODUCT_LEN];
    let mut expected = [0i32; PRODUCT_LEN];
    multiply(&mut h, &f, &f);
    schoolbook::multiply(&mut expected, &f, &f);
    assert_eq!(h, expected);
  }
}
