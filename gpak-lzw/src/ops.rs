//! File and directory operations for the LZW codec.
//!
//! Same pipeline discipline as the Huffman side: per-file fan-out to a
//! [`WorkerPool`], fan-in in submission order, then a single sequential
//! archive write phase. The coordinator joins every submitted handle before
//! reporting the first fault.

use crate::codec::{decode_buffer, encode_buffer};
use crate::format::{
    read_archive, read_codes, read_file_header, write_archive_entry, write_archive_header,
    write_codes, write_file_header, ArchiveEntry,
};
use gpak_core::error::{GpakError, Result};
use gpak_core::fs::{
    ensure_parent_dir, list_files, read_file, sanitize_relative_path, write_file,
};
use gpak_core::pool::WorkerPool;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Compress a single regular file into a `GLZW` container.
pub fn compress_file(source: &Path, destination: &Path) -> Result<()> {
    if source.is_dir() {
        return Err(GpakError::invalid_input(format!(
            "{} is a directory; expected a regular file",
            source.display()
        )));
    }

    let input = read_file(source)?;
    let encoded = encode_buffer(&input)?;

    ensure_parent_dir(destination)?;
    let mut writer = BufWriter::new(File::create(destination)?);
    write_file_header(&mut writer, &encoded.metadata, encoded.codes.len() as u64)?;
    write_codes(&mut writer, &encoded.codes)?;
    writer.flush()?;
    Ok(())
}

/// Decompress a `GLZW` container back into the original file.
pub fn decompress_file(source: &Path, destination: &Path) -> Result<()> {
    let mut reader = BufReader::new(File::open(source)?);
    let header = read_file_header(&mut reader)?;
    let codes = read_codes(&mut reader, header.code_count)?;

    let decoded = decode_buffer(&header.metadata, &codes)?;
    write_file(destination, &decoded)
}

/// Compress every regular file under `source_dir` into a `GLZA` archive.
///
/// `thread_count` of 0 selects the default pool size.
pub fn compress_directory(
    source_dir: &Path,
    destination_archive: &Path,
    thread_count: usize,
) -> Result<()> {
    let files = list_files(source_dir)?;
    let file_count = u32::try_from(files.len())
        .map_err(|_| GpakError::invalid_input("directory holds more files than an archive can"))?;

    let mut entries = Vec::with_capacity(files.len());
    if !files.is_empty() {
        let pool = WorkerPool::new(thread_count);
        let mut handles = Vec::with_capacity(files.len());

        for file in files {
            handles.push(pool.submit(move || -> Result<ArchiveEntry> {
                let input = read_file(&file.absolute_path)?;
                let encoded = encode_buffer(&input)?;
                Ok(ArchiveEntry {
                    relative_path: file.relative_path,
                    metadata: encoded.metadata,
                    codes: encoded.codes,
                })
            })?);
        }

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(handle.join());
        }
        for result in results {
            entries.push(result??);
        }
    }

    ensure_parent_dir(destination_archive)?;
    let mut writer = BufWriter::new(File::create(destination_archive)?);
    write_archive_header(&mut writer, file_count)?;
    for entry in &entries {
        write_archive_entry(&mut writer, entry)?;
    }
    writer.flush()?;
    Ok(())
}

/// Extract a `GLZA` archive under `destination_dir`.
pub fn decompress_directory(
    source_archive: &Path,
    destination_dir: &Path,
    thread_count: usize,
) -> Result<()> {
    let mut reader = BufReader::new(File::open(source_archive)?);
    let entries = read_archive(&mut reader)?;

    std::fs::create_dir_all(destination_dir)?;
    if entries.is_empty() {
        return Ok(());
    }

    let mut planned = Vec::with_capacity(entries.len());
    for entry in entries {
        let safe_relative = sanitize_relative_path(&entry.relative_path);
        if safe_relative.is_empty() {
            return Err(GpakError::invalid_path(format!(
                "archive entry {:?} resolves to an empty path",
                entry.relative_path
            )));
        }
        planned.push((destination_dir.join(safe_relative), entry));
    }

    let pool = WorkerPool::new(thread_count);
    let mut handles = Vec::with_capacity(planned.len());

    for (output_path, entry) in planned {
        handles.push(pool.submit(move || -> Result<()> {
            let decoded = decode_buffer(&entry.metadata, &entry.codes)?;
            write_file(&output_path, &decoded)
        })?);
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.join());
    }
    for result in results {
        result??;
    }

    Ok(())
}
