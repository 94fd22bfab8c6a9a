// Copyright (c) Microsoft Corporation.
// SPDX-License-Identifier: MIT
// This file is part of the polymul768 project.
// See the LICENSE file in the project root for full license information.

//! Gzip-compressed reference corpora of `(f, g, f * g)` triples.
//!
//! A corpus is a text stream, usually gzip-compressed, holding one entry per
//! three lines:
//!
//! ```text
//! f_0, f_1, ..., f_767
//! g_0, g_1, ..., g_767
//! h_0, h_1, ..., h_1535
//! ```
//!
//! Coefficients are decimal, comma separated, and may be surrounded by
//! whitespace. Trailing coefficients may be omitted and read as zero. Every
//! value must be a canonical representative in `[0, q)`.

use crate::{N, PRODUCT_LEN, Q, errors::PolyMulError, multiply, schoolbook};
use flate2::{Compression, read::GzDecoder, write::GzEncoder};
use std::{
  fs::File,
  io::{BufRead, BufReader, Write},
  path::Path,
  time::Instant,
};
use tracing::{debug, info};

const READ_BUFFER_LEN: usize = 1 << 14;

/// One reference triple.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorpusEntry {
  /// Left operand
  pub f: [i32; N],
  /// Right operand
  pub g: [i32; N],
  /// Expected product `f * g mod q`
  pub expected: [i32; PRODUCT_LEN],
}

impl CorpusEntry {
  /// Builds an entry whose expected product comes from the schoolbook
  /// reference multiplier.
  pub fn from_operands(f: [i32; N], g: [i32; N]) -> Self {
    let mut expected = [0i32; PRODUCT_LEN];
    schoolbook::multiply(&mut expected, &f, &g);
    Self { f, g, expected }
  }

  /// Multiplies the operands and compares against the expected product.
  ///
  /// # Errors
  /// Returns [`PolyMulError::Mismatch`] for the first coefficient that differs.
  pub fn verify(&self) -> Result<(), PolyMulError> {
    let mut actual = [0i32; PRODUCT_LEN];
    multiply(&mut actual, &self.f, &self.g);
    match self
      .expected
      .iter()
      .zip(actual.iter())
      .position(|(e, a)| e != a)
    {
      Some(index) => Err(PolyMulError::Mismatch {
        index,
        expected: self.expected[index],
        actual: actual[index],
      }),
      None => Ok(()),
    }
  }
}

/// Streams [`CorpusEntry`] values out of a buffered reader.
///
/// Iteration ends cleanly at end of stream on an entry boundary. After the
/// first error the reader is exhausted.
pub struct CorpusReader<R> {
  reader: R,
  line: usize,
  buf: String,
  done: bool,
}

impl<R: BufRead> CorpusReader<R> {
  /// Wraps an already decompressed stream.
  pub fn new(reader: R) -> Self {
    Self {
      reader,
      line: 0,
      buf: String::new(),
      done: false,
    }
  }

  /// Reads the next line into `out`; returns `false` at end of stream.
  fn read_poly<const LEN: usize>(&mut self, out: &mut [i32; LEN]) -> Result<bool, PolyMulError> {
    self.buf.clear();
    if self.reader.read_line(&mut self.buf)? == 0 {
      return Ok(false);
    }
    self.line += 1;
    let line = self.line;

    let body = self.buf.trim_end_matches(['\n', '\r']);
    let mut count = 0;
    for part in body.split(',') {
      if count == LEN {
        return Err(PolyMulError::TooManyValues { line, max: LEN });
      }
      let value: i64 = part
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| PolyMulError::ParseInt {
          line,
          reason: e.to_string(),
        })?;
      if !(0..Q as i64).contains(&value) {
        return Err(PolyMulError::OutOfRange { line, value });
      }
      out[count] = value as i32;
      count += 1;
    }
    out[count..].fill(0);
    Ok(true)
  }

  fn read_entry(&mut self) -> Result<Option<CorpusEntry>, PolyMulError> {
    let mut f = [0i32; N];
    if !self.read_poly(&mut f)? {
      return Ok(None);
    }
    let mut g = [0i32; N];
    if !self.read_poly(&mut g)? {
      return Err(PolyMulError::TruncatedEntry {
        line: self.line + 1,
      });
    }
    let mut expected = [0i32; PRODUCT_LEN];
    if !self.read_poly(&mut expected)? {
      return Err(PolyMulError::TruncatedEntry {
        line: self.line + 1,
      });
    }
    debug!(line = self.line, "read corpus entry");
    Ok(Some(CorpusEntry { f, g, expected }))
  }

  /// Checks every remaining entry, stopping at the first error.
  ///
  /// # Errors
  /// Returns the first read, parse or [`PolyMulError::Mismatch`] error.
  pub fn verify_all(self) -> Result<usize, PolyMulError> {
    let verify_t = Instant::now();
    let mut count = 0;
    for entry in self {
      entry?.verify()?;
      count += 1;
    }
    info!(elapsed_ms = %verify_t.elapsed().as_millis(), entries = count, "verify_corpus");
    Ok(count)
  }
}

impl<R: BufRead> Iterator for CorpusReader<R> {
  type Item = Result<CorpusEntry, PolyMulError>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.done {
      return None;
    }
    match self.read_entry() {
      Ok(Some(entry)) => Some(Ok(entry)),
      Ok(None) => {
        self.done = true;
        None
      }
      Err(e) => {
        self.done = true;
        Some(Err(e))
      }
    }
  }
}

/// Opens a gzip-compressed corpus file.
///
/// # Errors
/// Returns [`PolyMulError::Io`] if the file cannot be opened.
pub fn open(
  path: impl AsRef<Path>,
) -> Result<CorpusReader<BufReader<GzDecoder<File>>>, PolyMulError> {
  let path = path.as_ref();
  info!(path = %path.display(), "open_corpus");
  let file = File::open(path)?;
  Ok(CorpusReader::new(BufReader::with_capacity(
    READ_BUFFER_LEN,
    GzDecoder::new(file),
  )))
}

/// Writes entries as a gzip-compressed corpus.
pub struct CorpusWriter<W: Write> {
  encoder: GzEncoder<W>,
  entries: usize,
}

impl<W: Write> CorpusWriter<W> {
  /// Starts a gzip stream on `writer`.
  pub fn new(writer: W) -> Self {
    Self {
      encoder: GzEncoder::new(writer, Compression::default()),
      entries: 0,
    }
  }

  /// Appends one entry as three lines.
  ///
  /// # Errors
  /// Returns [`PolyMulError::Io`] if the underlying writer fails.
  pub fn write_entry(&mut self, entry: &CorpusEntry) -> Result<(), PolyMulError> {
    self.write_poly(&entry.f)?;
    self.write_poly(&entry.g)?;
    self.write_poly(&entry.expected)?;
    self.entries += 1;
    Ok(())
  }

  fn write_poly(&mut self, p: &[i32]) -> Result<(), PolyMulError> {
    for (i, x) in p.iter().enumerate() {
      if i > 0 {
        self.encoder.write_all(b", ")?;
      }
      write!(self.encoder, "{x}")?;
    }
    self.encoder.write_all(b"\n")?;
    Ok(())
  }

  /// Writes the gzip trailer and returns the inner writer.
  ///
  /// # Errors
  /// Returns [`PolyMulError::Io`] if the trailer cannot be written.
  pub fn finish(self) -> Result<W, PolyMulError> {
    debug!(entries = self.entries, "finish_corpus");
    Ok(self.encoder.finish()?)
  }
}
