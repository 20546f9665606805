//! LZW codec with a fixed-maximum 4096-entry dictionary.
//!
//! The encoder keys phrases in a `HashMap`; the decoder rebuilds the same
//! dictionary as a dense code-indexed vector, one entry behind the encoder.
//! That lag is where the classic cScSc case comes from: the decoder can
//! receive a code equal to its next-to-allocate index, in which case the
//! phrase is `current + current[0]`.

use gpak_core::error::{GpakError, Result};
use std::collections::HashMap;

/// Dictionary size before any input is consumed: one code per byte value.
pub const INITIAL_DICTIONARY_SIZE: u16 = 256;
/// Hard dictionary cap; codes are always below this (12 bits).
pub const MAX_DICTIONARY_SIZE: u16 = 4096;

/// Everything a decoder needs to invert an encoded buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LzwMetadata {
    /// Number of bytes in the original input.
    pub original_size: u64,
    /// Next-code counter when encoding stopped. Informational; decode
    /// recomputes its own counter and does not require this to be correct.
    pub dictionary_size: u16,
}

/// Result of encoding one buffer: metadata plus the code sequence.
#[derive(Debug, Clone, Default)]
pub struct LzwEncoded {
    /// Decode metadata (original size and final dictionary size).
    pub metadata: LzwMetadata,
    /// Emitted codes, each in `[0, 4096)`.
    pub codes: Vec<u16>,
}

/// Encode a buffer into an LZW code sequence plus its metadata.
///
/// Empty input yields zero metadata and an empty code sequence.
pub fn encode_buffer(input: &[u8]) -> Result<LzwEncoded> {
    let mut result = LzwEncoded {
        metadata: LzwMetadata {
            original_size: input.len() as u64,
            dictionary_size: 0,
        },
        codes: Vec::new(),
    };

    if input.is_empty() {
        return Ok(result);
    }

    let mut dictionary: HashMap<Vec<u8>, u16> =
        HashMap::with_capacity(MAX_DICTIONARY_SIZE as usize);
    for code in 0..INITIAL_DICTIONARY_SIZE {
        dictionary.insert(vec![code as u8], code);
    }

    let mut next_code = INITIAL_DICTIONARY_SIZE;
    let mut current: Vec<u8> = Vec::new();

    for &byte in input {
        let mut combined = current.clone();
        combined.push(byte);

        if dictionary.contains_key(&combined) {
            current = combined;
        } else {
            let code = *dictionary
                .get(&current)
                .ok_or_else(|| GpakError::corrupted("current LZW phrase left the dictionary"))?;
            result.codes.push(code);

            if next_code < MAX_DICTIONARY_SIZE {
                dictionary.insert(combined, next_code);
                next_code += 1;
            }

            current.clear();
            current.push(byte);
        }
    }

    if !current.is_empty() {
        let code = *dictionary
            .get(&current)
            .ok_or_else(|| GpakError::corrupted("final LZW phrase left the dictionary"))?;
        result.codes.push(code);
    }

    result.metadata.dictionary_size = next_code;
    Ok(result)
}

/// Decode an LZW code sequence back into the original bytes.
///
/// Output longer than `metadata.original_size` is truncated (a degenerate
/// final code can overshoot); output shorter than the declared size is a
/// corruption fault, as is any code above the next-to-allocate index.
pub fn decode_buffer(metadata: &LzwMetadata, codes: &[u16]) -> Result<Vec<u8>> {
    if metadata.original_size == 0 {
        return Ok(Vec::new());
    }

    if codes.is_empty() {
        return Err(GpakError::corrupted(
            "empty LZW code stream for non-empty payload",
        ));
    }

    let mut dictionary: Vec<Vec<u8>> = (0..INITIAL_DICTIONARY_SIZE)
        .map(|code| vec![code as u8])
        .collect();
    let mut next_code = INITIAL_DICTIONARY_SIZE;

    let first_code = codes[0];
    if first_code >= INITIAL_DICTIONARY_SIZE {
        return Err(GpakError::InvalidLzwCode { code: first_code });
    }

    let mut output = Vec::with_capacity(metadata.original_size as usize);
    let mut current = dictionary[first_code as usize].clone();
    output.extend_from_slice(&current);

    for &code in &codes[1..] {
        let entry = if (code as usize) < dictionary.len() {
            dictionary[code as usize].clone()
        } else if code == next_code {
            // cScSc: the phrase for this code is still being defined.
            let mut phrase = current.clone();
            phrase.push(current[0]);
            phrase
        } else {
            return Err(GpakError::InvalidLzwCode { code });
        };

        output.extend_from_slice(&entry);

        if next_code < MAX_DICTIONARY_SIZE {
            let mut phrase = current;
            phrase.push(entry[0]);
            dictionary.push(phrase);
            next_code += 1;
        }

        current = entry;
    }

    if (output.len() as u64) < metadata.original_size {
        return Err(GpakError::TruncatedOutput {
            expected: metadata.original_size,
            actual: output.len() as u64,
        });
    }
    output.truncate(metadata.original_size as usize);

    Ok(output)
}
