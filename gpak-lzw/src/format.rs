//! The `GLZW` single-file and `GLZA` archive container layouts.
//!
//! All multi-byte integers are little-endian; codes are serialized as 16-bit
//! values. Headers open with a four-byte magic, a version byte, and three
//! zero padding bytes.
//!
//! Single file (`GLZW`):
//!
//! ```text
//! offset  size  field
//! 0       4     magic = "GLZW"
//! 4       1     version = 1
//! 5       3     padding
//! 8       8     original_size (u64)
//! 16      2     dictionary_size (u16)
//! 18      8     code_count (u64)
//! 26      ...   codes (code_count x u16)
//! ```
//!
//! Archive (`GLZA`): the eight-byte preamble plus `file_count` (u32), then
//! per entry: `path_size` (u32), path bytes (UTF-8, generic `/` form),
//! `original_size` (u64), `dictionary_size` (u16), `code_count` (u64), and
//! the codes.

use crate::codec::LzwMetadata;
use gpak_core::error::{GpakError, Result};
use std::io::{Read, Write};

/// Magic bytes opening a `GLZW` single-file container.
pub const FILE_MAGIC: [u8; 4] = *b"GLZW";
/// Magic bytes opening a `GLZA` archive container.
pub const ARCHIVE_MAGIC: [u8; 4] = *b"GLZA";
/// The only container version this crate reads or writes.
pub const FORMAT_VERSION: u8 = 1;

/// Parsed fixed-size part of a `GLZW` header.
#[derive(Debug, Clone, Copy)]
pub struct FileHeader {
    /// Decode metadata recovered from the header.
    pub metadata: LzwMetadata,
    /// Number of 16-bit codes that follow the header.
    pub code_count: u64,
}

/// One archived file: its path, decode metadata, and code sequence.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Root-relative path in generic `/` form.
    pub relative_path: String,
    /// Decode metadata for this entry.
    pub metadata: LzwMetadata,
    /// Emitted codes, each in `[0, 4096)`.
    pub codes: Vec<u16>,
}

fn write_u16<W: Write>(output: &mut W, value: u16) -> Result<()> {
    output.write_all(&value.to_le_bytes())?;
    Ok(())
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

fn read_u16<R: Read>(input: &mut R) -> Result<u16> {
    let mut buf = [0u8; 2];
    input.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
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

/// Serialize a code sequence as 16-bit little-endian values.
pub fn write_codes<W: Write>(output: &mut W, codes: &[u16]) -> Result<()> {
    for &code in codes {
        write_u16(output, code)?;
    }
    Ok(())
}

/// Read exactly `code_count` codes as 16-bit little-endian values.
pub fn read_codes<R: Read>(input: &mut R, code_count: u64) -> Result<Vec<u16>> {
    let mut raw = vec![0u8; code_count as usize * 2];
    if !raw.is_empty() {
        input.read_exact(&mut raw)?;
    }
    Ok(raw
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect())
}

/// Write a `GLZW` header; the codes follow separately via [`write_codes`].
pub fn write_file_header<W: Write>(
    output: &mut W,
    metadata: &LzwMetadata,
    code_count: u64,
) -> Result<()> {
    write_preamble(output, &FILE_MAGIC)?;
    write_u64(output, metadata.original_size)?;
    write_u16(output, metadata.dictionary_size)?;
    write_u64(output, code_count)
}

/// Read and validate a `GLZW` header.
pub fn read_file_header<R: Read>(input: &mut R) -> Result<FileHeader> {
    read_preamble(input, &FILE_MAGIC)?;

    let original_size = read_u64(input)?;
    let dictionary_size = read_u16(input)?;
    let code_count = read_u64(input)?;

    Ok(FileHeader {
        metadata: LzwMetadata {
            original_size,
            dictionary_size,
        },
        code_count,
    })
}

/// Write a `GLZA` archive header.
pub fn write_archive_header<W: Write>(output: &mut W, file_count: u32) -> Result<()> {
    write_preamble(output, &ARCHIVE_MAGIC)?;
    write_u32(output, file_count)
}

/// Write one framed archive entry.
pub fn write_archive_entry<W: Write>(output: &mut W, entry: &ArchiveEntry) -> Result<()> {
    write_path(output, &entry.relative_path)?;
    write_u64(output, entry.metadata.original_size)?;
    write_u16(output, entry.metadata.dictionary_size)?;
    write_u64(output, entry.codes.len() as u64)?;
    write_codes(output, &entry.codes)
}

/// Read a whole `GLZA` archive into memory.
pub fn read_archive<R: Read>(input: &mut R) -> Result<Vec<ArchiveEntry>> {
    read_preamble(input, &ARCHIVE_MAGIC)?;

    let file_count = read_u32(input)?;
    let mut entries = Vec::with_capacity(file_count as usize);

    for _ in 0..file_count {
        let relative_path = read_path(input)?;
        let original_size = read_u64(input)?;
        let dictionary_size = read_u16(input)?;
        let code_count = read_u64(input)?;
        let codes = read_codes(input, code_count)?;

        entries.push(ArchiveEntry {
            relative_path,
            metadata: LzwMetadata {
                original_size,
                dictionary_size,
            },
            codes,
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_file_header_roundtrip() {
        let metadata = LzwMetadata {
            original_size: 1234,
            dictionary_size: 300,
        };

        let mut buffer = Vec::new();
        write_file_header(&mut buffer, &metadata, 99).unwrap();
        write_codes(&mut buffer, &[1, 2, 515]).unwrap();

        assert_eq!(&buffer[0..4], b"GLZW");
        assert_eq!(buffer[4], FORMAT_VERSION);
        assert_eq!(buffer.len(), 26 + 6);

        let mut cursor = Cursor::new(&buffer);
        let header = read_file_header(&mut cursor).unwrap();
        assert_eq!(header.metadata, metadata);
        assert_eq!(header.code_count, 99);

        let codes = read_codes(&mut cursor, 3).unwrap();
        assert_eq!(codes, vec![1, 2, 515]);
    }

    #[test]
    fn test_codes_are_little_endian() {
        let mut buffer = Vec::new();
        write_codes(&mut buffer, &[0x0102]).unwrap();
        assert_eq!(buffer, vec![0x02, 0x01]);
    }

    #[test]
    fn test_rejects_wrong_magic() {
        let mut buffer = Vec::new();
        write_file_header(&mut buffer, &LzwMetadata::default(), 0).unwrap();
        buffer[0..4].copy_from_slice(b"GHUF");

        assert!(matches!(
            read_file_header(&mut Cursor::new(&buffer)),
            Err(GpakError::InvalidMagic { .. })
        ));
    }

    #[test]
    fn test_rejects_wrong_version() {
        let mut buffer = Vec::new();
        write_file_header(&mut buffer, &LzwMetadata::default(), 0).unwrap();
        buffer[4] = 9;

        assert!(matches!(
            read_file_header(&mut Cursor::new(&buffer)),
            Err(GpakError::UnsupportedVersion { found: 9 })
        ));
    }

    #[test]
    fn test_rejects_short_code_stream() {
        let mut buffer = Vec::new();
        write_file_header(&mut buffer, &LzwMetadata::default(), 4).unwrap();
        write_codes(&mut buffer, &[7, 8]).unwrap();

        let mut cursor = Cursor::new(&buffer);
        let header = read_file_header(&mut cursor).unwrap();
        assert!(read_codes(&mut cursor, header.code_count).is_err());
    }

    #[test]
    fn test_archive_roundtrip() {
        let entries = vec![
            ArchiveEntry {
                relative_path: "root.txt".to_string(),
                metadata: LzwMetadata {
                    original_size: 19,
                    dictionary_size: 260,
                },
                codes: vec![82, 111, 256],
            },
            ArchiveEntry {
                relative_path: "nested/beta.bin".to_string(),
                metadata: LzwMetadata::default(),
                codes: Vec::new(),
            },
        ];

        let mut buffer = Vec::new();
        write_archive_header(&mut buffer, entries.len() as u32).unwrap();
        for entry in &entries {
            write_archive_entry(&mut buffer, entry).unwrap();
        }

        assert_eq!(&buffer[0..4], b"GLZA");

        let parsed = read_archive(&mut Cursor::new(&buffer)).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].relative_path, "root.txt");
        assert_eq!(parsed[0].codes, vec![82, 111, 256]);
        assert_eq!(parsed[1].relative_path, "nested/beta.bin");
        assert!(parsed[1].codes.is_empty());
    }

    #[test]
    fn test_empty_archive_roundtrip() {
        let mut buffer = Vec::new();
        write_archive_header(&mut buffer, 0).unwrap();

        let parsed = read_archive(&mut Cursor::new(&buffer)).unwrap();
        assert!(parsed.is_empty());
    }
}
