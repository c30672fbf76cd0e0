//! Errors reported by encoding and decoding.

/// Error returned by the operations of this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Encoding was requested for empty content.
    #[error("cannot encode empty content")]
    EmptyContent,

    /// Tree construction was requested without any symbol frequencies.
    #[error("cannot build a huffman tree without symbol frequencies")]
    EmptyInput,

    /// Container is shorter than the two 4-byte length fields.
    #[error("container of {len} bytes is shorter than the {} bytes header", crate::container::HEADER_BYTES)]
    TruncatedHeader { len: usize },

    /// Declared tree length does not fit in the container.
    #[error("declared tree length {tree_len} does not fit in the container of {len} bytes")]
    InconsistentLength { tree_len: u32, len: usize },

    /// Declared bit length exceeds the number of bits in the payload.
    #[error("payload should hold {bit_len} bits, but only {available} are available")]
    TruncatedPayload { bit_len: usize, available: usize },

    /// Serialized tree is corrupted.
    #[error("malformed tree: {0}")]
    MalformedTree(&'static str),

    /// Payload bits do not form complete codewords of the tree.
    #[error("corrupt payload: {0}")]
    CorruptPayload(&'static str),

    /// Content does not fit in 32-bit counters and lengths of the container.
    #[error("content of {symbols} symbols is too large to be encoded")]
    ContentTooLarge { symbols: usize },

    /// Symbol to encode has no codeword in the code table.
    #[error("symbol has no codeword in the code table")]
    SymbolWithoutCode,

    /// Tree is too deep to assign codes of at most 64 bits.
    #[error("code of {len} bits exceeds 64 bits")]
    CodeTooLong { len: usize },

    /// Output rejected the serialized data.
    #[error("cannot write serialized data: {0}")]
    Write(std::io::ErrorKind),
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self { Error::Write(error.kind()) }
}

impl Error {
    /// Returns `true` if `self` was caused by a corrupted or truncated container
    /// (and not by misuse of the API, like encoding empty content).
    pub fn is_malformed_input(&self) -> bool {
        matches!(self,
            Error::TruncatedHeader { .. } | Error::InconsistentLength { .. } | Error::TruncatedPayload { .. } |
            Error::MalformedTree(_) | Error::CorruptPayload(_))
    }
}

/// Result type of this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_input() {
        assert!(Error::TruncatedHeader { len: 4 }.is_malformed_input());
        assert!(Error::InconsistentLength { tree_len: 100, len: 20 }.is_malformed_input());
        assert!(Error::MalformedTree("bad tag").is_malformed_input());
        assert!(Error::CorruptPayload("incomplete codeword").is_malformed_input());
        assert!(!Error::EmptyContent.is_malformed_input());
        assert!(!Error::EmptyInput.is_malformed_input());
        assert!(!Error::ContentTooLarge { symbols: 1 }.is_malformed_input());
        assert!(!Error::SymbolWithoutCode.is_malformed_input());
        assert!(!Error::Write(std::io::ErrorKind::WriteZero).is_malformed_input());
    }

    #[test]
    fn display() {
        assert_eq!(Error::TruncatedHeader { len: 4 }.to_string(),
                   "container of 4 bytes is shorter than the 8 bytes header");
        assert_eq!(Error::MalformedTree("unknown node tag").to_string(), "malformed tree: unknown node tag");
        assert_eq!(Error::TruncatedPayload { bit_len: 17, available: 16 }.to_string(),
                   "payload should hold 17 bits, but only 16 are available");
    }

    #[test]
    fn from_io_error() {
        let error: Error = std::io::Error::new(std::io::ErrorKind::WriteZero, "full").into();
        assert_eq!(error, Error::Write(std::io::ErrorKind::WriteZero));
    }
}
