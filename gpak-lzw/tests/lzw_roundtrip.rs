//! End-to-end tests for the LZW file and directory operations.

use gpak_lzw::ops::{compress_directory, compress_file, decompress_directory, decompress_file};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn collect_files(root: &Path) -> BTreeSet<String> {
    let mut files = BTreeSet::new();
    collect_into(root, root, &mut files);
    files
}

fn collect_into(root: &Path, dir: &Path, files: &mut BTreeSet<String>) {
    for entry in fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        let path = entry.path();
        if path.is_dir() {
            collect_into(root, &path, files);
        } else {
            let relative = path.strip_prefix(root).unwrap();
            files.insert(relative.to_string_lossy().replace('\\', "/"));
        }
    }
}

#[test]
fn test_compress_and_decompress_file() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("data.txt");
    let compressed = temp.path().join("data.lzw");
    let restored = temp.path().join("restored.txt");

    let payload = "Sphinx of black quartz, judge my vow.\n";
    fs::write(&source, payload).unwrap();

    compress_file(&source, &compressed).unwrap();
    decompress_file(&compressed, &restored).unwrap();

    assert_eq!(fs::read(&source).unwrap(), fs::read(&restored).unwrap());
}

#[test]
fn test_file_container_magic_and_version() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("data.bin");
    let compressed = temp.path().join("data.lzw");

    fs::write(&source, b"magic check").unwrap();
    compress_file(&source, &compressed).unwrap();

    let bytes = fs::read(&compressed).unwrap();
    assert_eq!(&bytes[0..4], b"GLZW");
    assert_eq!(bytes[4], 1);
}

#[test]
fn test_empty_file_roundtrip() {
    let temp = tempdir().unwrap();
    let source = temp.path().join("empty.bin");
    let compressed = temp.path().join("empty.lzw");
    let restored = temp.path().join("restored.bin");

    fs::write(&source, b"").unwrap();
    compress_file(&source, &compressed).unwrap();
    decompress_file(&compressed, &restored).unwrap();

    assert!(fs::read(&restored).unwrap().is_empty());
}

#[test]
fn test_compress_file_rejects_directory() {
    let temp = tempdir().unwrap();
    let out = temp.path().join("out.lzw");

    assert!(compress_file(temp.path(), &out).is_err());
}

#[test]
fn test_compress_and_decompress_directory() {
    let temp = tempdir().unwrap();
    let input_dir = temp.path().join("input");
    let output_dir = temp.path().join("output");
    let archive = temp.path().join("archive.glza");

    fs::create_dir_all(input_dir.join("nested")).unwrap();
    fs::write(input_dir.join("root.txt"), "Root level contents").unwrap();
    fs::write(input_dir.join("nested/alpha.bin"), vec![0x01; 256]).unwrap();
    fs::write(
        input_dir.join("nested/beta.bin"),
        "beta payload\nwith multiple lines\n",
    )
    .unwrap();

    compress_directory(&input_dir, &archive, 2).unwrap();
    assert_eq!(&fs::read(&archive).unwrap()[0..4], b"GLZA");

    decompress_directory(&archive, &output_dir, 2).unwrap();

    let originals = collect_files(&input_dir);
    let restored = collect_files(&output_dir);
    assert_eq!(originals, restored);

    for relative in &originals {
        assert_eq!(
            fs::read(input_dir.join(relative)).unwrap(),
            fs::read(output_dir.join(relative)).unwrap(),
            "mismatch for {relative}"
        );
    }
}

#[test]
fn test_thread_counts_agree() {
    let temp = tempdir().unwrap();
    let input_dir = temp.path().join("input");
    fs::create_dir_all(input_dir.join("sub")).unwrap();
    for i in 0..8 {
        fs::write(
            input_dir.join(format!("sub/file{i}.bin")),
            vec![i as u8; 64 + i * 7],
        )
        .unwrap();
    }

    let mut archives = Vec::new();
    for threads in [1usize, 2, 0] {
        let archive = temp.path().join(format!("archive-{threads}.glza"));
        compress_directory(&input_dir, &archive, threads).unwrap();
        archives.push(fs::read(&archive).unwrap());
    }

    assert_eq!(archives[0], archives[1]);
    assert_eq!(archives[0], archives[2]);
}

#[test]
fn test_empty_directory_archive() {
    let temp = tempdir().unwrap();
    let input_dir = temp.path().join("empty");
    let output_dir = temp.path().join("restored");
    let archive = temp.path().join("empty.glza");

    fs::create_dir_all(&input_dir).unwrap();
    compress_directory(&input_dir, &archive, 1).unwrap();
    decompress_directory(&archive, &output_dir, 1).unwrap();

    assert!(output_dir.is_dir());
    assert!(collect_files(&output_dir).is_empty());
}

#[test]
fn test_decompress_file_rejects_archive_container() {
    let temp = tempdir().unwrap();
    let input_dir = temp.path().join("input");
    let archive = temp.path().join("tree.glza");

    fs::create_dir_all(&input_dir).unwrap();
    fs::write(input_dir.join("a.txt"), b"a").unwrap();
    compress_directory(&input_dir, &archive, 1).unwrap();

    assert!(decompress_file(&archive, &temp.path().join("out.txt")).is_err());
}
