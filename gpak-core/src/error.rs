//! Error types for GPAK operations.
//!
//! A single error type covers all fault kinds in the workspace: I/O faults,
//! container format faults, codec faults, argument faults, and worker pool
//! faults. The CLI maps any of these to a non-zero exit code.

use std::io;
use thiserror::Error;

/// The main error type for GPAK operations.
#[derive(Debug, Error)]
pub enum GpakError {
    /// I/O error from the underlying reader/writer or the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid magic number in a container header.
    #[error("Invalid magic number: expected {expected:02X?}, found {found:02X?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: [u8; 4],
        /// Actual magic bytes found.
        found: [u8; 4],
    },

    /// Unsupported container format version.
    #[error("Unsupported format version: {found}")]
    UnsupportedVersion {
        /// The version byte found in the header.
        found: u8,
    },

    /// Unexpected end of a bitstream or payload.
    #[error("Unexpected end of stream: expected {expected} more bits")]
    UnexpectedEof {
        /// Number of bits that were expected but not available.
        expected: usize,
    },

    /// Corrupted data in a container or compressed payload.
    #[error("Corrupted data: {message}")]
    CorruptedData {
        /// Description of the corruption.
        message: String,
    },

    /// A byte present in the input has no entry in the Huffman code table.
    #[error("Huffman code table has no code for symbol {symbol}")]
    MissingHuffmanCode {
        /// The symbol with no assigned code.
        symbol: u8,
    },

    /// An LZW code outside the decodable range was encountered.
    #[error("Invalid LZW code: {code}")]
    InvalidLzwCode {
        /// The offending code.
        code: u16,
    },

    /// A decoded payload came up short of the declared original size.
    #[error("Decoded {actual} bytes but the header declares {expected}")]
    TruncatedOutput {
        /// Byte count declared by the metadata.
        expected: u64,
        /// Byte count actually produced.
        actual: u64,
    },

    /// An archive entry path exceeds the 32-bit length field.
    #[error("Relative path length {length} exceeds the supported maximum")]
    PathTooLong {
        /// Length of the offending path in bytes.
        length: usize,
    },

    /// An archive entry path is not usable on this system.
    #[error("Invalid archive path: {message}")]
    InvalidPath {
        /// Description of the path problem.
        message: String,
    },

    /// Caller-supplied arguments are unusable (missing input, wrong entry kind, ...).
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of the argument problem.
        message: String,
    },

    /// A task was submitted to a worker pool that has already shut down.
    #[error("Worker pool is shut down")]
    PoolShutdown,

    /// A task handle was joined but its task never delivered a result.
    #[error("Task was abandoned before producing a result")]
    TaskAbandoned,
}

/// Result type alias for GPAK operations.
pub type Result<T> = std::result::Result<T, GpakError>;

impl GpakError {
    /// Create an invalid magic error.
    pub fn invalid_magic(expected: [u8; 4], found: [u8; 4]) -> Self {
        Self::InvalidMagic { expected, found }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(expected: usize) -> Self {
        Self::UnexpectedEof { expected }
    }

    /// Create a corrupted data error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Self::CorruptedData {
            message: message.into(),
        }
    }

    /// Create an invalid path error.
    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::InvalidPath {
            message: message.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
