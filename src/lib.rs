//! # maskgen
//!
//! High-performance word generator with a per-position configurable charset.
//!
//! ## Features
//!
//! - **Masks**: one charset per output position (`?u?l?l?l?d?d`), built-in
//!   and user-definable classes, hex-escaped charsets
//! - **Deterministic order**: mixed-radix enumeration, rightmost position
//!   cycling fastest, never materializing the combinatorial set
//! - **Resumable**: start-at / stop-at boundaries for splitting or
//!   resuming long runs
//! - **Inline pruning**: maximum adjacent-run and per-character occurrence
//!   constraints, with subtree skip-ahead
//! - **Increment mode**: enumerate a whole range of candidate lengths in
//!   one run
//!
//! ## Usage
//!
//! ```bash
//! # Four digits: 0000 through 9999
//! maskgen ?d?d?d?d
//!
//! # Lengths 4-6 over lowercase, written to a file
//! maskgen -i 4:6 -o words.txt ?l?l?l?l?l?l
//! ```
//!
//! ## Example
//!
//! ```rust
//! use maskgen::generate::{Generator, GeneratorConfig};
//! use maskgen::output::MemorySink;
//!
//! let config = GeneratorConfig {
//!     mask: b"?d?d".to_vec(),
//!     ..Default::default()
//! };
//!
//! let mut generator = Generator::new(config).unwrap();
//! let mut sink = MemorySink::new();
//! generator.run(&mut sink).unwrap();
//!
//! assert_eq!(sink.len(), 100);
//! assert_eq!(sink.words[0], b"00");
//! ```

pub mod charset;
pub mod cli;
pub mod error;
pub mod filter;
pub mod generate;
pub mod mask;
pub mod odometer;
pub mod output;
pub mod progress;

pub use cli::Args;
pub use error::MaskError;
pub use generate::{Generator, GeneratorConfig};
pub use mask::Mask;
