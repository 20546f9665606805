//! GPAK CLI - Huffman/LZW archiver
//!
//! Compresses single files and whole directory trees into the GPAK
//! containers (`GHUF`/`GHAR` for Huffman, `GLZW`/`GLZA` for LZW) and back.
//! Directory operations run across a worker pool; `--threads 0` (the
//! default) uses the hardware parallelism of the host.

mod detect;

use clap::{Parser, Subcommand, ValueEnum};
use detect::{read_magic, ContainerKind};
use gpak_core::error::{GpakError, Result};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gpak")]
#[command(author, version, about = "Huffman/LZW archiver for files and directory trees")]
#[command(long_about = "
GPAK compresses files and directory trees with static Huffman or 12-bit LZW
coding.

For compression, the input may be a single file or a directory; directories
become multi-file archives. When decompressing, the first four bytes of the
input decide whether it is a single-file payload or an archive.

Examples:
  gpak compress --algo huffman --input notes.txt --output notes.huf
  gpak compress --algo lzw --input ./photos --output photos.glza --threads 4
  gpak decompress --algo lzw --input photos.glza --output ./restored
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file or directory tree
    #[command(alias = "c")]
    Compress {
        /// Compression algorithm
        #[arg(long, value_enum)]
        algo: Algorithm,

        /// File or directory to compress
        #[arg(short, long)]
        input: PathBuf,

        /// Destination container path
        #[arg(short, long)]
        output: PathBuf,

        /// Worker threads for directory operations (0 = hardware parallelism)
        #[arg(short, long, default_value_t = 0)]
        threads: usize,
    },

    /// Decompress a GPAK container
    #[command(alias = "d")]
    Decompress {
        /// Compression algorithm the container was written with
        #[arg(long, value_enum)]
        algo: Algorithm,

        /// Container to decompress
        #[arg(short, long)]
        input: PathBuf,

        /// Destination file (single-file input) or directory (archive input)
        #[arg(short, long)]
        output: PathBuf,

        /// Worker threads for archive extraction (0 = hardware parallelism)
        #[arg(short, long, default_value_t = 0)]
        threads: usize,
    },
}

/// Compression algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    /// Static whole-buffer Huffman coding
    Huffman,
    /// 12-bit LZW with a 4096-entry dictionary
    Lzw,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compress {
            algo,
            input,
            output,
            threads,
        } => cmd_compress(algo, &input, &output, threads),
        Commands::Decompress {
            algo,
            input,
            output,
            threads,
        } => cmd_decompress(algo, &input, &output, threads),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_compress(algo: Algorithm, input: &Path, output: &Path, threads: usize) -> Result<()> {
    if !input.exists() {
        return Err(GpakError::invalid_input(format!(
            "{} does not exist",
            input.display()
        )));
    }

    if input.is_dir() {
        match algo {
            Algorithm::Huffman => gpak_huffman::ops::compress_directory(input, output, threads)?,
            Algorithm::Lzw => gpak_lzw::ops::compress_directory(input, output, threads)?,
        }
        println!("Created archive {}", output.display());
    } else {
        match algo {
            Algorithm::Huffman => gpak_huffman::ops::compress_file(input, output)?,
            Algorithm::Lzw => gpak_lzw::ops::compress_file(input, output)?,
        }
        println!("Compressed {} to {}", input.display(), output.display());
    }

    Ok(())
}

fn cmd_decompress(algo: Algorithm, input: &Path, output: &Path, threads: usize) -> Result<()> {
    if input.is_dir() {
        return Err(GpakError::invalid_input(format!(
            "{} is a directory; decompression expects a container file",
            input.display()
        )));
    }

    let magic = read_magic(input)?;
    let kind = ContainerKind::from_magic(&magic);

    match (algo, kind) {
        (Algorithm::Huffman, Some(ContainerKind::HuffmanFile)) => {
            gpak_huffman::ops::decompress_file(input, output)?;
            println!("Restored {}", output.display());
        }
        (Algorithm::Huffman, Some(ContainerKind::HuffmanArchive)) => {
            gpak_huffman::ops::decompress_directory(input, output, threads)?;
            println!("Extracted archive to {}", output.display());
        }
        (Algorithm::Lzw, Some(ContainerKind::LzwFile)) => {
            gpak_lzw::ops::decompress_file(input, output)?;
            println!("Restored {}", output.display());
        }
        (Algorithm::Lzw, Some(ContainerKind::LzwArchive)) => {
            gpak_lzw::ops::decompress_directory(input, output, threads)?;
            println!("Extracted archive to {}", output.display());
        }
        (Algorithm::Huffman, _) => {
            return Err(GpakError::invalid_magic(gpak_huffman::FILE_MAGIC, magic));
        }
        (Algorithm::Lzw, _) => {
            return Err(GpakError::invalid_magic(gpak_lzw::FILE_MAGIC, magic));
        }
    }

    Ok(())
}
