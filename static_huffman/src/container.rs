//! Self-describing container that stores the huffman tree next to the encoded payload.
//!
//! Layout (all integers are little-endian):
//! - `u32` length of the serialized tree, in bytes,
//! - the tree serialized by [`serialize_tree`],
//! - `u32` number of meaningful bits in the payload,
//! - the payload: codewords of the consecutive symbols, packed most significant bit first.
//!
//! Bytes of the payload after the first `bit_len` bits are ignored.

use binout::{read_int, write_int};
use dyn_size_of::GetSize;

use crate::{bytes_for_bits, count_symbols, decode_symbols, deserialize_tree, serialize_tree};
use crate::stats::{preview_bits, preview_symbols};
use crate::{BitReader, BitWriter, CodeTable, DecodingStats, EncodingStats, Error, Frequencies, Result, Symbol, Tree};

/// Number of bytes occupied by the two length fields of the container.
pub const HEADER_BYTES: usize = 2 * std::mem::size_of::<u32>();

/// View of a container split into its parts: the serialized tree, the bit length and the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainerView<'c> {
    /// Serialized tree.
    pub tree: &'c [u8],
    /// Number of meaningful bits in the `payload`.
    pub bit_len: u32,
    /// Encoded content (possibly with some padding bytes).
    pub payload: &'c [u8],
}

impl<'c> ContainerView<'c> {
    /// Splits `container` into the tree, the bit length and the payload.
    ///
    /// Fails with [`Error::TruncatedHeader`] if `container` is too short to hold both length fields
    /// and with [`Error::InconsistentLength`] if the declared tree length exceeds the container.
    pub fn parse(container: &'c [u8]) -> Result<Self> {
        let truncated = |_: std::io::Error| Error::TruncatedHeader { len: container.len() };
        if container.len() < HEADER_BYTES { return Err(Error::TruncatedHeader { len: container.len() }); }
        let mut input = container;
        let tree_len = read_int!(&mut input, u32).map_err(truncated)?;
        if tree_len as u64 > (container.len() - HEADER_BYTES) as u64 {
            return Err(Error::InconsistentLength { tree_len, len: container.len() });
        }
        let (tree, mut input) = input.split_at(tree_len as usize);
        let bit_len = read_int!(&mut input, u32).map_err(truncated)?;
        Ok(Self { tree, bit_len, payload: input })
    }

    /// Returns the length of the serialized tree, in bytes.
    #[inline] pub fn tree_len(&self) -> usize { self.tree.len() }
}

/// Encodes all `symbols` (whose text occupies `original_bytes`) into a container.
fn encode<S, I>(symbols: I, original_bytes: usize) -> Result<(Vec<u8>, EncodingStats)>
    where S: Symbol, I: Iterator<Item = S> + Clone
{
    let frequencies = count_symbols(symbols.clone()).map_err(|e| match e {
        Error::EmptyInput => Error::EmptyContent,
        e => e
    })?;
    let symbol_count = frequencies.total() as usize;
    let entropy = frequencies.entropy();
    let tree = Tree::from_frequencies(frequencies.clone())?;
    let table = CodeTable::from_tree(&tree)?;
    let bit_len = u32::try_from(table.encoded_bits(&frequencies))
        .map_err(|_| Error::ContentTooLarge { symbols: symbol_count })?;
    log::trace!("huffman tree:\n{}", tree);

    let tree_bytes = serialize_tree(&tree)?;
    let mut writer = BitWriter::with_capacity(bit_len as usize);
    table.encode(symbols, &mut writer)?;
    let payload_preview = preview_bits(writer.bits().iter());
    let (payload, _) = writer.finish();

    let mut container = Vec::with_capacity(HEADER_BYTES + tree_bytes.len() + payload.len());
    write_int!(&mut container, tree_bytes.len() as u32)?;   // at most 9 bytes per each of 0x110000 symbols
    container.extend_from_slice(&tree_bytes);
    write_int!(&mut container, bit_len)?;
    container.extend_from_slice(&payload);
    log::debug!("encoded {} symbols ({} distinct) into {} bits, container of {} bytes",
                symbol_count, table.len(), bit_len, container.len());

    let stats = EncodingStats {
        original_bytes,
        symbols: symbol_count,
        entropy,
        codes: table.sorted().into_iter()
            .map(|(symbol, code)| (symbol.describe(), code, frequencies.get(&symbol).copied().unwrap_or(0)))
            .collect(),
        compressed_bits: bit_len as usize,
        tree_bytes: tree_bytes.len(),
        container_bytes: container.len(),
        tree_memory_bytes: tree.size_bytes(),
        payload_preview,
    };
    Ok((container, stats))
}

/// Decodes all symbols from the `container`.
fn decode<S: Symbol>(container: &[u8]) -> Result<(Vec<S>, DecodingStats)> {
    let view = ContainerView::parse(container)?;
    let tree = deserialize_tree::<S>(view.tree)?;
    if tree.is_empty() { return Err(Error::MalformedTree("container holds the null tree")); }
    let bit_len = view.bit_len as usize;
    let bits = BitReader::new(view.payload, bit_len)?;
    let ignored = view.payload.len() - bytes_for_bits(bit_len);
    if ignored != 0 { log::debug!("ignoring {} bytes after the payload", ignored); }
    let symbols = decode_symbols(&tree, bits)?;
    if symbols.len() as u64 != tree.frequency() as u64 {
        log::warn!("decoded {} symbols, but the tree counts {}", symbols.len(), tree.frequency());
    }
    log::debug!("decoded {} symbols from {} bits", symbols.len(), bit_len);
    let stats = DecodingStats {
        container_bytes: container.len(),
        tree_bytes: view.tree_len(),
        distinct_symbols: tree.leaf_count(),
        bit_len,
        symbols: symbols.len(),
        content_preview: preview_symbols(&symbols),
    };
    Ok((symbols, stats))
}

/// Compresses the text `content` into a container.
/// If `verbose` is `true`, the statistics of the compression are logged at the info level.
///
/// Fails with [`Error::EmptyContent`] if `content` is empty.
pub fn serialize_data(content: &str, verbose: bool) -> Result<Vec<u8>> {
    let (container, stats) = serialize_data_with_stats(content)?;
    if verbose { log::info!("encoding statistics:\n{}", stats); }
    Ok(container)
}

/// Compresses the text `content` into a container. Returns the container and the statistics of the compression.
pub fn serialize_data_with_stats(content: &str) -> Result<(Vec<u8>, EncodingStats)> {
    encode(content.chars(), content.len())
}

/// Decompresses the text from the `container` produced by [`serialize_data`].
/// If `verbose` is `true`, the statistics of the decompression are logged at the info level.
pub fn deserialize_data(container: &[u8], verbose: bool) -> Result<String> {
    let (content, stats) = deserialize_data_with_stats(container)?;
    if verbose { log::info!("decoding statistics:\n{}", stats); }
    Ok(content)
}

/// Decompresses the text from the `container`. Returns the text and the statistics of the decompression.
pub fn deserialize_data_with_stats(container: &[u8]) -> Result<(String, DecodingStats)> {
    let (symbols, stats) = decode::<char>(container)?;
    Ok((symbols.into_iter().collect(), stats))
}

/// Compresses arbitrary bytes of `content` into a container, using bytes as symbols.
/// If `verbose` is `true`, the statistics of the compression are logged at the info level.
pub fn serialize_bytes(content: &[u8], verbose: bool) -> Result<Vec<u8>> {
    let (container, stats) = serialize_bytes_with_stats(content)?;
    if verbose { log::info!("encoding statistics:\n{}", stats); }
    Ok(container)
}

/// Compresses arbitrary bytes of `content` into a container. Returns the container and the statistics.
pub fn serialize_bytes_with_stats(content: &[u8]) -> Result<(Vec<u8>, EncodingStats)> {
    encode(content.iter().copied(), content.len())
}

/// Decompresses bytes from the `container` produced by [`serialize_bytes`].
/// If `verbose` is `true`, the statistics of the decompression are logged at the info level.
pub fn deserialize_bytes(container: &[u8], verbose: bool) -> Result<Vec<u8>> {
    let (content, stats) = deserialize_bytes_with_stats(container)?;
    if verbose { log::info!("decoding statistics:\n{}", stats); }
    Ok(content)
}

/// Decompresses bytes from the `container`. Returns the bytes and the statistics of the decompression.
pub fn deserialize_bytes_with_stats(container: &[u8]) -> Result<(Vec<u8>, DecodingStats)> {
    decode::<u8>(container)
}
