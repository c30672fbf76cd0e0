#![doc = include_str!("../README.md")]

mod error;
pub use error::{Error, Result};
mod symbol;
pub use symbol::Symbol;
mod frequencies;
pub use frequencies::{Frequencies, count_symbols};
mod tree;
pub use tree::{Node, NodeIndex, Tree, PreOrder};
mod code;
pub use code::{Code, CodeTable};
mod bits;
pub use bits::{BitWriter, BitReader, bytes_for_bits, pack, unpack};
mod decoder;
pub use decoder::{Decoder, DecodingResult, decode_symbols};
pub mod tree_codec;
pub use tree_codec::{write_tree, serialize_tree, deserialize_tree, serialized_tree_len};
mod stats;
pub use stats::{EncodingStats, DecodingStats, PREVIEW_BITS, PREVIEW_SYMBOLS};
pub mod container;
pub use container::{ContainerView, serialize_data, deserialize_data, serialize_data_with_stats, deserialize_data_with_stats,
                    serialize_bytes, deserialize_bytes, serialize_bytes_with_stats, deserialize_bytes_with_stats};
