//! # GPAK-LZW: fixed-maximum 12-bit LZW coding
//!
//! This crate implements the LZW half of the GPAK archiver:
//!
//! - [`codec`]: dictionary-based encode/decode with a hard 4096-entry cap
//! - [`format`]: the `GLZW` single-file and `GLZA` archive containers
//! - [`ops`]: file and directory operations, including the parallel
//!   directory pipeline
//!
//! The dictionary starts with the 256 single-byte strings and grows one
//! phrase per emitted code until it reaches 4096 entries, after which it is
//! frozen and coding continues against the fixed table. Codes are stored as
//! 16-bit little-endian values in the container; every code is below 4096.
//!
//! ## Example
//!
//! ```rust
//! use gpak_lzw::codec::{decode_buffer, encode_buffer};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//! let encoded = encode_buffer(original).unwrap();
//! let restored = decode_buffer(&encoded.metadata, &encoded.codes).unwrap();
//! assert_eq!(restored, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod format;
pub mod ops;

pub use codec::{
    decode_buffer, encode_buffer, LzwEncoded, LzwMetadata, INITIAL_DICTIONARY_SIZE,
    MAX_DICTIONARY_SIZE,
};
pub use format::{ArchiveEntry, ARCHIVE_MAGIC, FILE_MAGIC, FORMAT_VERSION};
pub use ops::{compress_directory, compress_file, decompress_directory, decompress_file};
