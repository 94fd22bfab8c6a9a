//! This module defines errors returned by the library.
use thiserror::Error;

/// Errors returned by polymul768.
///
/// The multiplier itself is total; these come from reading, writing and
/// checking reference corpora.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum PolyMulError {
  /// returned if the underlying reader or writer fails
  #[error("IoError: {reason}")]
  Io {
    /// The reason for the I/O failure
    reason: String,
  },
  /// returned if a coefficient is not a decimal integer
  #[error("ParseIntError at line {line}: {reason}")]
  ParseInt {
    /// 1-based line number in the corpus
    line: usize,
    /// The reason the value did not parse
    reason: String,
  },
  /// returned if a line holds more coefficients than the polynomial has
  #[error("TooManyValues at line {line}: at most {max} expected")]
  TooManyValues {
    /// 1-based line number in the corpus
    line: usize,
    /// The polynomial length
    max: usize,
  },
  /// returned if a coefficient is not a canonical representative mod q
  #[error("OutOfRange at line {line}: {value}")]
  OutOfRange {
    /// 1-based line number in the corpus
    line: usize,
    /// The offending value
    value: i64,
  },
  /// returned if the stream ends in the middle of an entry
  #[error("TruncatedEntry at line {line}")]
  TruncatedEntry {
    /// 1-based line number where a line was expected
    line: usize,
  },
  /// returned if the multiplier disagrees with the expected product
  #[error("Mismatch at coefficient {index}: expected {expected}, got {actual}")]
  Mismatch {
    /// The first coefficient that differs
    index: usize,
    /// The reference value
    expected: i32,
    /// The value computed by the multiplier
    actual: i32,
  },
}

impl From<std::io::Error> for PolyMulError {
  fn from(err: std::io::Error) -> Self {
    PolyMulError::Io {
      reason: err.to_string(),
    }
  }
}
