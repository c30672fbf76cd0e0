//! Statistics of encoding and decoding, for reporting to users.

use std::fmt;

use crate::{Code, Symbol};

/// Maximal number of payload bits shown by [`EncodingStats`].
pub const PREVIEW_BITS: usize = 128;

/// Maximal number of symbols shown by [`DecodingStats`].
pub const PREVIEW_SYMBOLS: usize = 64;

/// Returns the first [`PREVIEW_BITS`] of `bits` as `0`s and `1`s, followed by `...` if `bits` are longer.
pub(crate) fn preview_bits<I: IntoIterator<Item = bool>>(bits: I) -> String {
    let mut bits = bits.into_iter();
    let mut result: String = bits.by_ref().take(PREVIEW_BITS).map(|bit| if bit { '1' } else { '0' }).collect();
    if bits.next().is_some() { result.push_str("..."); }
    result
}

/// Returns the first [`PREVIEW_SYMBOLS`] of `symbols` escaped, followed by `...` if there are more of them.
pub(crate) fn preview_symbols<S: Symbol>(symbols: &[S]) -> String {
    let mut result: String = symbols.iter().take(PREVIEW_SYMBOLS).map(|s| s.escape()).collect();
    if symbols.len() > PREVIEW_SYMBOLS { result.push_str("..."); }
    result
}

/// Statistics gathered while encoding content into a container.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodingStats {
    /// Size of the original content, in bytes.
    pub original_bytes: usize,
    /// Number of symbols in the content.
    pub symbols: usize,
    /// Shannon entropy of the content, in bits per symbol.
    pub entropy: f64,
    /// Human readable symbols, their codewords and frequencies, in the increasing order of symbols.
    pub codes: Vec<(String, Code, u32)>,
    /// Number of bits in the payload.
    pub compressed_bits: usize,
    /// Size of the serialized tree, in bytes.
    pub tree_bytes: usize,
    /// Size of the whole container, in bytes.
    pub container_bytes: usize,
    /// Approximate number of bytes occupied by the tree in memory.
    pub tree_memory_bytes: usize,
    /// The beginning of the payload bit string.
    pub payload_preview: String,
}

impl EncodingStats {
    /// Returns the number of distinct symbols.
    #[inline] pub fn distinct_symbols(&self) -> usize { self.codes.len() }

    /// Returns the size of the original content, in bits.
    #[inline] pub fn original_bits(&self) -> usize { self.original_bytes * 8 }

    /// Returns the size of the payload relative to the size of the original content, in percents.
    pub fn compression_ratio(&self) -> f64 {
        self.compressed_bits as f64 / self.original_bits() as f64 * 100.0
    }

    /// Returns the size of the whole container relative to the size of the original content, in percents.
    pub fn container_ratio(&self) -> f64 {
        self.container_bytes as f64 / self.original_bytes as f64 * 100.0
    }

    /// Returns the average codeword length, in bits per symbol.
    pub fn average_code_len(&self) -> f64 {
        self.compressed_bits as f64 / self.symbols as f64
    }
}

impl fmt::Display for EncodingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Huffman codes:")?;
        let width = self.codes.iter().map(|(s, _, _)| s.chars().count()).max().unwrap_or(0);
        for (symbol, code, frequency) in &self.codes {
            writeln!(f, "  {:<width$}  {:<20}  (frequency: {})", symbol, code.to_string(), frequency, width = width)?;
        }
        writeln!(f, "Symbols:           {} ({} distinct)", self.symbols, self.distinct_symbols())?;
        writeln!(f, "Original size:     {} bits ({} bytes)", self.original_bits(), self.original_bytes)?;
        writeln!(f, "Compressed size:   {} bits", self.compressed_bits)?;
        writeln!(f, "Compression ratio: {:.2}%", self.compression_ratio())?;
        writeln!(f, "Entropy:           {:.3} bits/symbol", self.entropy)?;
        writeln!(f, "Average code:      {:.3} bits/symbol", self.average_code_len())?;
        writeln!(f, "Container size:    {} bytes, tree: {} bytes ({:.2}% of original)",
                 self.container_bytes, self.tree_bytes, self.container_ratio())?;
        writeln!(f, "Tree in memory:    {} bytes", self.tree_memory_bytes)?;
        write!(f, "Encoded bits:      {}", self.payload_preview)
    }
}

/// Statistics gathered while decoding content from a container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodingStats {
    /// Size of the whole container, in bytes.
    pub container_bytes: usize,
    /// Size of the serialized tree, in bytes.
    pub tree_bytes: usize,
    /// Number of distinct symbols (leaves) in the tree.
    pub distinct_symbols: usize,
    /// Number of bits in the payload.
    pub bit_len: usize,
    /// Number of decoded symbols.
    pub symbols: usize,
    /// The beginning of the decoded content, escaped.
    pub content_preview: String,
}

impl fmt::Display for DecodingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Container size:    {} bytes, tree: {} bytes", self.container_bytes, self.tree_bytes)?;
        writeln!(f, "Payload:           {} bits", self.bit_len)?;
        writeln!(f, "Decoded symbols:   {} ({} distinct)", self.symbols, self.distinct_symbols)?;
        write!(f, "Decoded content:   \"{}\"", self.content_preview)
    }
}
