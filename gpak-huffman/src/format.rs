//! The `GHUF` single-file and `GHAR` archive container layouts.
//!
//! All multi-byte integers are little-endian. Headers open with a four-byte
//! magic, a version byte, and three zero padding bytes, so the fixed part is
//! eight bytes in both layouts.
//!
//! Single file (`GHUF`):
//!
//! ```text
//! offset  size  field
//! 0       4     magic = "GHUF"
//! 4       1     version = 1
//! 5       3     padding
//! 8       8     original_size (u64)
//! 16      8     compressed_size (u64)
//! 24    1024    frequencies (256 x u32)
//! 1048    ...   payload (compressed_size bytes)
//! ```
//!
//! Archive (`GHAR`): the eight-byte header ends in `file_count` (u32), then
//! per entry: `path_size` (u32), path bytes (UTF-8, generic `/` form),
//! `original_size` (u64), `compressed_size` (u64), the frequency table, and
//! the payload.

use crate::codec::{FrequencyTable, HuffmanMetadata};
use gpak_core::error::{GpakError, Result};
use std::io::{Read, Write};

/// Magic bytes opening a `GHUF` single-file container.
pub const FILE_MAGIC: [u8; 4] = *b"GHUF";
/// Magic bytes opening a `GHAR` archive container.
pub const ARCHIVE_MAGIC: [u8; 4] = *b"GHAR";
/// The only container version this crate reads or writes.
pub const FORMAT_VERSION: u8 = 1;

/// Parsed fixed-size part of a `GHUF` header.
#[derive(Debug, Clone)]
pub struct FileHeader {
    /// Decode metadata recovered from the header.
    pub metadata: HuffmanMetadata,
    /// Number of payload bytes that follow the header.
    pub compressed_size: u64,
}

/// One archived file: its path, decode metadata, and packed payload.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Root-relative path in generic `/` form.
    pub relative_path: String,
    /// Decode metadata for this entry.
    pub metadata: HuffmanMetadata,
    /// Packed Huffman bitstream.
    pub payload: Vec<u8>,
}

fn write_u32<W: Write>(output: &mut W, value: u32) -> Result<()> {
    output.write_all(&value.to_le_bytes())?;
    Ok(())
}

fn write_u64<W: Write>(output: &mut W, value: u64) -> Result<()> {
    output.write_all(&value.to_le_bytes())?;
    Ok(())
}

fn read_u8<R: Read>(input: &mut R) -> Result<u8> {
    let mut buf = [0u8; 1];
    input.read_exact(&mut buf)?;
    Ok(buf[0])
}

fn read_u32<R: Read>(input: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    input.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_u64<R: Read>(input: &mut R) -> Result<u64> {
    let mut buf = [0u8; 8];
    input.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

fn write_preamble<W: Write>(output: &mut W, magic: &[u8; 4]) -> Result<()> {
    output.write_all(magic)?;
    output.write_all(&[FORMAT_VERSION, 0, 0, 0])?;
    Ok(())
}

fn read_preamble<R: Read>(input: &mut R, expected: &[u8; 4]) -> Result<()> {
    let mut magic = [0u8; 4];
    input.read_exact(&mut magic)?;
    if &magic != expected {
        return Err(GpakError::invalid_magic(*expected, magic));
    }

    let version = read_u8(input)?;
    if version != FORMAT_VERSION {
        return Err(GpakError::UnsupportedVersion { found: version });
    }

    let mut padding = [0u8; 3];
    input.read_exact(&mut padding)?;
    Ok(())
}

fn write_frequencies<W: Write>(output: &mut W, frequencies: &FrequencyTable) -> Result<()> {
    for &frequency in frequencies.iter() {
        write_u32(output, frequency)?;
    }
    Ok(())
}

fn read_frequencies<R: Read>(input: &mut R) -> Result<FrequencyTable> {
    let mut frequencies = [0u32; 256];
    for frequency in frequencies.iter_mut() {
        *frequency = read_u32(input)?;
    }
    Ok(frequencies)
}

fn write_path<W: Write>(output: &mut W, relative_path: &str) -> Result<()> {
    let bytes = relative_path.as_bytes();
    let path_size = u32::try_from(bytes.len()).map_err(|_| GpakError::PathTooLong {
        length: bytes.len(),
    })?;

    write_u32(output, path_size)?;
    if path_size > 0 {
        output.write_all(bytes)?;
    }
    Ok(())
}

fn read_path<R: Read>(input: &mut R) -> Result<String> {
    let path_size = read_u32(input)? as usize;
    let mut bytes = vec![0u8; path_size];
    if path_size > 0 {
        input.read_exact(&mut bytes)?;
    }
    String::from_utf8(bytes)
        .map_err(|_| GpakError::invalid_path("archive entry path is not valid UTF-8"))
}

/// Write a `GHUF` header; the payload bytes follow separately.
pub fn write_file_header<W: Write>(
    output: &mut W,
    metadata: &HuffmanMetadata,
    compressed_size: u64,
) -> Result<()> {
    write_preamble(output, &FILE_MAGIC)?;
    write_u64(output, metadata.original_size)?;
    write_u64(output, compressed_size)?;
    write_frequencies(output, &metadata.frequencies)
}

/// Read and validate a `GHUF` header.
pub fn read_file_header<R: Read>(input: &mut R) -> Result<FileHeader> {
    read_preamble(input, &FILE_MAGIC)?;

    let original_size = read_u64(input)?;
    let compressed_size = read_u64(input)?;
    let frequencies = read_frequencies(input)?;

    Ok(FileHeader {
        metadata: HuffmanMetadata {
            frequencies,
            original_size,
        },
        compressed_size,
    })
}

/// Write a `GHAR` archive header.
pub fn write_archive_header<W: Write>(output: &mut W, file_count: u32) -> Result<()> {
    write_preamble(output, &ARCHIVE_MAGIC)?;
    write_u32(output, file_count)
}

/// Write one framed archive entry.
pub fn write_archive_entry<W: Write>(output: &mut W, entry: &ArchiveEntry) -> Result<()> {
    write_path(output, &entry.relative_path)?;
    write_u64(output, entry.metadata.original_size)?;
    write_u64(output, entry.payload.len() as u64)?;
    write_frequencies(output, &entry.metadata.frequencies)?;
    if !entry.payload.is_empty() {
        output.write_all(&entry.payload)?;
    }
    Ok(())
}

/// Read a whole `GHAR` archive into memory.
pub fn read_archive<R: Read>(input: &mut R) -> Result<Vec<ArchiveEntry>> {
    read_preamble(input, &ARCHIVE_MAGIC)?;

    let file_count = read_u32(input)?;
    let mut entries = Vec::with_capacity(file_count as usize);

    for _ in 0..file_count {
        let relative_path = read_path(input)?;
        let original_size = read_u64(input)?;
        let compressed_size = read_u64(input)?;
        let frequencies = read_frequencies(input)?;

        let mut payload = vec![0u8; compressed_size as usize];
        if compressed_size > 0 {
            input.read_exact(&mut payload)?;
        }

        entries.push(ArchiveEntry {
            relative_path,
            metadata: HuffmanMetadata {
                frequencies,
                original_size,
            },
            payload,
        });
    }

    Ok(entries)
}
