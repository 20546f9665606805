//! Huffman codec: frequency counting, tree construction, encode/decode.
//!
//! The tree lives in an index arena: nodes are stored in a `Vec` and refer
//! to their children by index, so the whole structure is dropped with the
//! arena at the end of one encode or decode invocation. Internal nodes carry
//! the sentinel symbol `-1`.
//!
//! Tree construction must be bit-for-bit reproducible on both sides: the
//! priority queue orders by `(frequency, symbol)` ascending, so equal-weight
//! leaves are merged smaller-symbol-first and the decoder rebuilds exactly
//! the tree the encoder used.

use gpak_core::bitio::{BitReader, BitWriter};
use gpak_core::error::{GpakError, Result};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Per-symbol occurrence counts over the whole input buffer.
pub type FrequencyTable = [u32; 256];

/// Sentinel symbol carried by internal tree nodes.
const INTERNAL_SYMBOL: i16 = -1;

/// Everything a decoder needs to invert an encoded buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanMetadata {
    /// Occurrence count per byte value in the original input.
    pub frequencies: FrequencyTable,
    /// Number of bytes in the original input; the sole decode terminator.
    pub original_size: u64,
}

impl Default for HuffmanMetadata {
    fn default() -> Self {
        Self {
            frequencies: [0; 256],
            original_size: 0,
        }
    }
}

/// Result of encoding one buffer: metadata plus the packed bitstream.
#[derive(Debug, Clone, Default)]
pub struct HuffmanEncoded {
    /// Decode metadata (frequency table and original size).
    pub metadata: HuffmanMetadata,
    /// MSB-first packed prefix codes, final byte zero-padded.
    pub payload: Vec<u8>,
}

/// One node of the arena-allocated prefix-code tree.
#[derive(Debug)]
struct Node {
    frequency: u64,
    symbol: i16,
    left: Option<usize>,
    right: Option<usize>,
}

/// Heap entry ordered ascending by `(frequency, symbol)`.
///
/// `BinaryHeap` is a max-heap, so the comparison is reversed to pop the
/// smallest frequency (smallest symbol on ties) first.
#[derive(Debug, Eq)]
struct HeapEntry {
    frequency: u64,
    symbol: i16,
    node: usize,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .frequency
            .cmp(&self.frequency)
            .then_with(|| other.symbol.cmp(&self.symbol))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

/// Build the prefix-code tree for a frequency table.
///
/// Returns the arena and the root index, or `None` for an all-zero table.
fn build_tree(frequencies: &FrequencyTable) -> (Vec<Node>, Option<usize>) {
    let mut nodes = Vec::with_capacity(512);
    let mut queue = BinaryHeap::new();

    for (symbol, &frequency) in frequencies.iter().enumerate() {
        if frequency == 0 {
            continue;
        }
        let index = nodes.len();
        nodes.push(Node {
            frequency: u64::from(frequency),
            symbol: symbol as i16,
            left: None,
            right: None,
        });
        queue.push(HeapEntry {
            frequency: u64::from(frequency),
            symbol: symbol as i16,
            node: index,
        });
    }

    if queue.is_empty() {
        return (nodes, None);
    }

    while queue.len() > 1 {
        let left = queue.pop().expect("queue has at least two entries");
        let right = queue.pop().expect("queue has at least two entries");

        let frequency = left.frequency + right.frequency;
        let index = nodes.len();
        nodes.push(Node {
            frequency,
            symbol: INTERNAL_SYMBOL,
            left: Some(left.node),
            right: Some(right.node),
        });
        queue.push(HeapEntry {
            frequency,
            symbol: INTERNAL_SYMBOL,
            node: index,
        });
    }

    let root = queue.pop().map(|entry| entry.node);
    (nodes, root)
}

fn is_leaf(node: &Node) -> bool {
    node.left.is_none() && node.right.is_none()
}

/// Assign root-to-leaf paths as codes: left edge = 0, right edge = 1.
///
/// A lone leaf (single distinct symbol in the input) gets the one-bit code
/// `0` so every input byte still occupies at least one bit.
fn build_code_table(nodes: &[Node], root: usize) -> Vec<Option<Vec<bool>>> {
    let mut table = vec![None; 256];
    let mut prefix = Vec::new();
    assign_codes(nodes, root, &mut prefix, &mut table);
    table
}

fn assign_codes(
    nodes: &[Node],
    index: usize,
    prefix: &mut Vec<bool>,
    table: &mut [Option<Vec<bool>>],
) {
    let node = &nodes[index];

    if is_leaf(node) {
        let code = if prefix.is_empty() {
            vec![false]
        } else {
            prefix.clone()
        };
        table[node.symbol as usize] = Some(code);
        return;
    }

    if let Some(left) = node.left {
        prefix.push(false);
        assign_codes(nodes, left, prefix, table);
        prefix.pop();
    }
    if let Some(right) = node.right {
        prefix.push(true);
        assign_codes(nodes, right, prefix, table);
        prefix.pop();
    }
}

/// Encode a buffer into a packed Huffman bitstream plus its metadata.
///
/// Empty input yields a zeroed table, zero size, and an empty payload.
pub fn encode_buffer(input: &[u8]) -> Result<HuffmanEncoded> {
    let mut result = HuffmanEncoded {
        metadata: HuffmanMetadata {
            frequencies: [0; 256],
            original_size: input.len() as u64,
        },
        payload: Vec::new(),
    };

    if input.is_empty() {
        return Ok(result);
    }

    for &byte in input {
        result.metadata.frequencies[byte as usize] += 1;
    }

    let (nodes, root) = build_tree(&result.metadata.frequencies);
    let root = root.ok_or_else(|| GpakError::corrupted("frequency table built no tree"))?;
    let table = build_code_table(&nodes, root);

    let mut writer = BitWriter::new();
    for &byte in input {
        match &table[byte as usize] {
            Some(code) => writer.write_bits(code),
            None => return Err(GpakError::MissingHuffmanCode { symbol: byte }),
        }
    }

    result.payload = writer.finish();
    Ok(result)
}

/// Decode a packed bitstream back into the original bytes.
///
/// Decoding stops after exactly `metadata.original_size` symbols; trailing
/// padding bits are never consumed. A bitstream that runs dry earlier, or a
/// walk off the tree, is a corruption fault.
pub fn decode_buffer(metadata: &HuffmanMetadata, payload: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(metadata.original_size as usize);

    if metadata.original_size == 0 {
        return Ok(output);
    }

    let (nodes, root) = build_tree(&metadata.frequencies);
    let root =
        root.ok_or_else(|| GpakError::corrupted("empty frequency table with non-zero size"))?;

    // Single distinct symbol: the payload is informational only, the count
    // alone reproduces the input.
    if is_leaf(&nodes[root]) {
        output.resize(metadata.original_size as usize, nodes[root].symbol as u8);
        return Ok(output);
    }

    let mut reader = BitReader::new(payload);
    let mut current = root;
    while (output.len() as u64) < metadata.original_size {
        let bit = reader.read_bit()?;
        let next = if bit {
            nodes[current].right
        } else {
            nodes[current].left
        };
        current =
            next.ok_or_else(|| GpakError::corrupted("Huffman walk reached a missing child"))?;

        if is_leaf(&nodes[current]) {
            output.push(nodes[current].symbol as u8);
            current = root;
        }
    }

    Ok(output)
}
