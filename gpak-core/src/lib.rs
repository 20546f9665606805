//! # GPAK Core
//!
//! Core components for the GPAK archiver.
//!
//! This crate provides the building blocks shared by the codec crates:
//!
//! - [`bitio`]: Bit-level I/O for variable-length prefix codes
//! - [`pool`]: Fixed-size worker pool for per-file parallelism
//! - [`fs`]: Filesystem adapter (enumeration, relative paths, whole-file I/O)
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! GPAK is layered the same way for both codecs:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ CLI                                                     │
//! │     argument parsing, magic sniffing, dispatch          │
//! ├─────────────────────────────────────────────────────────┤
//! │ Operations                                              │
//! │     file/directory pipelines (gpak-huffman, gpak-lzw)   │
//! ├─────────────────────────────────────────────────────────┤
//! │ Container                                               │
//! │     GHUF/GHAR and GLZW/GLZA framing                     │
//! ├─────────────────────────────────────────────────────────┤
//! │ Codec + infrastructure (this crate)                     │
//! │     BitWriter/BitReader, WorkerPool, fs adapter         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use gpak_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bit(true);
//! writer.write_bit(false);
//! writer.write_bit(true);
//! let packed = writer.finish();
//!
//! let mut reader = BitReader::new(&packed);
//! assert!(reader.read_bit().unwrap());
//! assert!(!reader.read_bit().unwrap());
//! assert!(reader.read_bit().unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bitio;
pub mod error;
pub mod fs;
pub mod pool;

// Re-exports for convenience
pub use bitio::{BitReader, BitWriter};
pub use error::{GpakError, Result};
pub use fs::FileEntry;
pub use pool::{TaskHandle, WorkerPool};
