//! # GPAK-Huffman: static whole-buffer Huffman coding
//!
//! This crate implements the Huffman half of the GPAK archiver:
//!
//! - [`codec`]: frequency table → prefix-code tree → packed bitstream, and
//!   the inverse
//! - [`format`]: the `GHUF` single-file and `GHAR` archive containers
//! - [`ops`]: file and directory operations, including the parallel
//!   directory pipeline
//!
//! The codec is static and operates on whole in-memory buffers: one pass
//! counts symbol occurrences, a second pass emits one prefix code per input
//! byte. The 256-entry frequency table travels in the container header and
//! is all a decoder needs to rebuild the identical tree.
//!
//! ## Example
//!
//! ```rust
//! use gpak_huffman::codec::{decode_buffer, encode_buffer};
//!
//! let original = b"compression ratio improves with repetition";
//! let encoded = encode_buffer(original).unwrap();
//! let restored = decode_buffer(&encoded.metadata, &encoded.payload).unwrap();
//! assert_eq!(restored, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod format;
pub mod ops;

pub use codec::{decode_buffer, encode_buffer, FrequencyTable, HuffmanEncoded, HuffmanMetadata};
pub use format::{ArchiveEntry, ARCHIVE_MAGIC, FILE_MAGIC, FORMAT_VERSION};
pub use ops::{compress_directory, compress_file, decompress_directory, decompress_file};
