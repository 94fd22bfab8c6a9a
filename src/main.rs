//! src/main.rs
//! Check gzip-compressed reference corpora against the Toom-6 multiplier.
//!
//! Run with: `RUST_LOG=info cargo run --release -- sage64.gz [more.gz ...]`
use polymul768::corpus;
use std::{process::ExitCode, time::Instant};
use tracing::{error, info, info_span};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_target(false)
    .with_ansi(false)
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let paths: Vec<String> = std::env::args().skip(1).collect();
  if paths.is_empty() {
    eprintln!("usage: polymul768 <corpus.gz>...");
    return ExitCode::FAILURE;
  }

  let total_t = Instant::now();
  let mut total = 0;
  for path in &paths {
    let span = info_span!("verify", path = %path);
    let _enter = span.enter();

    match corpus::open(path).and_then(|reader| reader.verify_all()) {
      Ok(count) => {
        info!(entries = count, "corpus ok");
        total += count;
      }
      Err(e) => {
        error!(error = %e, "corpus failed");
        return ExitCode::FAILURE;
      }
    }
  }

  info!(
    elapsed_ms = %total_t.elapsed().as_millis(),
    files = paths.len(),
    entries = total,
    "verified all corpora"
  );
  ExitCode::SUCCESS
}
