//! Container kind detection from magic bytes.
//!
//! Decompression takes its layout decision (single file vs archive) from the
//! first four bytes of the input, not from the file name.

use gpak_core::error::Result;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// The four container kinds GPAK produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// `GHUF`: Huffman-compressed single file.
    HuffmanFile,
    /// `GHAR`: Huffman archive of a directory tree.
    HuffmanArchive,
    /// `GLZW`: LZW-compressed single file.
    LzwFile,
    /// `GLZA`: LZW archive of a directory tree.
    LzwArchive,
}

impl ContainerKind {
    /// Detect the container kind from magic bytes, if any matches.
    pub fn from_magic(magic: &[u8; 4]) -> Option<Self> {
        match magic {
            m if *m == gpak_huffman::FILE_MAGIC => Some(Self::HuffmanFile),
            m if *m == gpak_huffman::ARCHIVE_MAGIC => Some(Self::HuffmanArchive),
            m if *m == gpak_lzw::FILE_MAGIC => Some(Self::LzwFile),
            m if *m == gpak_lzw::ARCHIVE_MAGIC => Some(Self::LzwArchive),
            _ => None,
        }
    }
}

/// Read the first four bytes of a file.
pub fn read_magic(path: &Path) -> Result<[u8; 4]> {
    let mut file = File::open(path)?;
    let mut magic = [0u8; 4];
    file.read_exact(&mut magic)?;
    Ok(magic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_magic() {
        assert_eq!(
            ContainerKind::from_magic(b"GHUF"),
            Some(ContainerKind::HuffmanFile)
        );
        assert_eq!(
            ContainerKind::from_magic(b"GHAR"),
            Some(ContainerKind::HuffmanArchive)
        );
        assert_eq!(
            ContainerKind::from_magic(b"GLZW"),
            Some(ContainerKind::LzwFile)
        );
        assert_eq!(
            ContainerKind::from_magic(b"GLZA"),
            Some(ContainerKind::LzwArchive)
        );
        assert_eq!(ContainerKind::from_magic(b"PK\x03\x04"), None);
    }

    #[test]
    fn test_read_magic() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("probe.bin");
        std::fs::write(&path, b"GHARrest-of-file").unwrap();

        assert_eq!(read_magic(&path).unwrap(), *b"GHAR");
    }

    #[test]
    fn test_read_magic_short_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("short.bin");
        std::fs::write(&path, b"GH").unwrap();

        assert!(read_magic(&path).is_err());
    }
}
