use crate::{Error, Node, NodeIndex, Result, Symbol, Tree};

/// Result of consuming a bit by the [`Decoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodingResult<T> {
    /// Completed symbol that has been successfully decoded.
    Value(T),
    /// The codeword is incomplete and the next bit is needed.
    Incomplete,
    /// The codeword is invalid (possible only for the null tree or the single-leaf tree).
    Invalid
}

/// Decoder that walks the huffman tree, consuming one bit of a codeword at a time.
///
/// Time complexity of decoding a symbol is *O(length of its codeword)*.
///
/// Memory complexity: *O(1)*
pub struct Decoder<'tree, S> {
    tree: &'tree Tree<S>,
    /// Node reached by the bits consumed so far (`None` for the null tree).
    current: Option<NodeIndex>,
    /// Number of bits consumed since construction or last reset.
    consumed: u32,
}

impl<'tree, S> Decoder<'tree, S> {
    /// Constructs decoder for given `tree`.
    pub fn new(tree: &'tree Tree<S>) -> Self {
        Self { tree, current: tree.root(), consumed: 0 }
    }

    /// Resets `self` to initial state and makes it ready to decode next symbol.
    pub fn reset(&mut self) {
        self.current = self.tree.root();
        self.consumed = 0;
    }

    /// Returns the number of bits consumed since construction or last reset.
    #[inline(always)] pub fn consumed_bits(&self) -> u32 { self.consumed }

    /// Consumes a `bit` of the codeword (`false` descends left, `true` descends right) and returns:
    /// - a symbol if the given `bit` finishes the valid codeword
    ///   (then `self` is [reset](Self::reset) and ready to decode the next symbol);
    /// - an [`DecodingResult::Incomplete`] if the codeword is incomplete and the next bit is needed;
    /// - or [`DecodingResult::Invalid`] if the tree is null or it consists of a single leaf and `bit` is `1`.
    pub fn consume(&mut self, bit: bool) -> DecodingResult<&'tree S> {
        let tree = self.tree;
        let Some(current) = self.current else { return DecodingResult::Invalid };
        self.consumed += 1;
        let next = match tree.node(current) {
            Node::Internal { left, right, .. } => if bit { *right } else { *left },
            Node::Leaf { symbol, .. } => return if bit {
                DecodingResult::Invalid
            } else {
                self.reset();
                DecodingResult::Value(symbol)
            }
        };
        match tree.node(next) {
            Node::Leaf { symbol, .. } => {
                self.reset();
                DecodingResult::Value(symbol)
            }
            Node::Internal { .. } => {
                self.current = Some(next);
                DecodingResult::Incomplete
            }
        }
    }

    /// Tries to decode and return a single symbol from the `bits` iterator,
    /// consuming as many bits as needed.
    ///
    /// Returns [`DecodingResult::Incomplete`] if the iterator exhausted before the symbol was decoded
    /// ([`Self::consumed_bits`] enables checking if the iterator yielded any bit before exhausting).
    pub fn decode_next<I: Iterator<Item = bool>>(&mut self, bits: &mut I) -> DecodingResult<&'tree S> {
        for bit in bits {
            match self.consume(bit) {
                DecodingResult::Incomplete => {}
                result => return result
            }
        }
        DecodingResult::Incomplete
    }
}

/// Decodes all `bits` with the `tree`.
///
/// Fails with [`Error::CorruptPayload`] if `bits` end in the middle of a codeword
/// or include a bit that does not lead to any leaf.
pub fn decode_symbols<S: Symbol, I: IntoIterator<Item = bool>>(tree: &Tree<S>, bits: I) -> Result<Vec<S>> {
    let mut bits = bits.into_iter();
    // each codeword has at least one bit
    let mut result = Vec::with_capacity(bits.size_hint().0.min(tree.frequency() as usize));
    let mut decoder = Decoder::new(tree);
    loop {
        match decoder.decode_next(&mut bits) {
            DecodingResult::Value(symbol) => result.push(*symbol),
            DecodingResult::Incomplete if decoder.consumed_bits() == 0 => return Ok(result),
            DecodingResult::Incomplete => return Err(Error::CorruptPayload("payload ends in the middle of a codeword")),
            DecodingResult::Invalid if tree.is_empty() => return Err(Error::CorruptPayload("payload bits without a tree")),
            DecodingResult::Invalid => return Err(Error::CorruptPayload("codeword of the only symbol must be 0")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pack, BitWriter, CodeTable};
    use maplit::hashmap;

    fn bits(s: &str) -> Vec<bool> { s.chars().map(|c| c == '1').collect() }

    fn tree_3sym() -> Tree<char> {
        //   /  \
        //  /\  a
        // c  b
        Tree::from_frequencies(hashmap!('a' => 100, 'b' => 50, 'c' => 10)).unwrap()
    }

    #[test]
    fn consume_3sym() {
        let tree = tree_3sym();
        let mut decoder = Decoder::new(&tree);
        assert_eq!(decoder.consume(true), DecodingResult::Value(&'a'));
        assert_eq!(decoder.consume(false), DecodingResult::Incomplete);
        assert_eq!(decoder.consumed_bits(), 1);
        assert_eq!(decoder.consume(true), DecodingResult::Value(&'b'));
        assert_eq!(decoder.consumed_bits(), 0);
        assert_eq!(decoder.consume(false), DecodingResult::Incomplete);
        assert_eq!(decoder.consume(false), DecodingResult::Value(&'c'));
    }

    #[test]
    fn consume_restarts_at_root_after_symbol() {
        let tree = tree_3sym();
        let mut decoder = Decoder::new(&tree);
        assert_eq!(decoder.consume(false), DecodingResult::Incomplete);
        assert_eq!(decoder.consume(true), DecodingResult::Value(&'b'));
        // without any reset, the next bit starts a new codeword
        assert_eq!(decoder.consume(true), DecodingResult::Value(&'a'));
        let single = Tree::from_symbols("zz".chars()).unwrap();
        let mut decoder = Decoder::new(&single);
        assert_eq!(decoder.consume(false), DecodingResult::Value(&'z'));
        assert_eq!(decoder.consumed_bits(), 0);
        assert_eq!(decoder.consume(false), DecodingResult::Value(&'z'));
    }

    #[test]
    fn reset_abandons_codeword() {
        let tree = tree_3sym();
        let mut decoder = Decoder::new(&tree);
        assert_eq!(decoder.consume(false), DecodingResult::Incomplete);
        decoder.reset();
        assert_eq!(decoder.consumed_bits(), 0);
        assert_eq!(decoder.consume(true), DecodingResult::Value(&'a'));
    }

    #[test]
    fn decode_next() {
        let tree = tree_3sym();
        let mut decoder = Decoder::new(&tree);
        let mut input = bits("1000").into_iter();
        assert_eq!(decoder.decode_next(&mut input), DecodingResult::Value(&'a'));
        assert_eq!(decoder.decode_next(&mut input), DecodingResult::Value(&'c'));
        assert_eq!(decoder.decode_next(&mut input), DecodingResult::Incomplete);
        assert_eq!(decoder.consumed_bits(), 1);
    }

    #[test]
    fn decode_all() {
        let tree = tree_3sym();
        assert_eq!(decode_symbols(&tree, bits("101001")).unwrap(), ['a', 'b', 'c', 'a']);
        assert_eq!(decode_symbols(&tree, bits("")).unwrap(), Vec::<char>::new());
        assert_eq!(decode_symbols(&tree, bits("1010")).unwrap_err(),
                   Error::CorruptPayload("payload ends in the middle of a codeword"));
    }

    #[test]
    fn single_leaf() {
        let tree = Tree::from_symbols("zzzz".chars()).unwrap();
        assert_eq!(decode_symbols(&tree, bits("000")).unwrap(), ['z', 'z', 'z']);
        assert_eq!(decode_symbols(&tree, bits("010")).unwrap_err(),
                   Error::CorruptPayload("codeword of the only symbol must be 0"));
    }

    #[test]
    fn null_tree() {
        let tree = Tree::<u8>::empty();
        assert_eq!(decode_symbols(&tree, bits("")).unwrap(), Vec::<u8>::new());
        assert_eq!(decode_symbols(&tree, bits("0")).unwrap_err(), Error::CorruptPayload("payload bits without a tree"));
    }

    #[test]
    fn encoded_text() {
        let text = "the quick brown fox jumps over the lazy dog";
        let tree = Tree::from_symbols(text.chars()).unwrap();
        let mut writer = BitWriter::new();
        CodeTable::from_tree(&tree).unwrap().encode(text.chars(), &mut writer).unwrap();
        let (bytes, bit_len) = writer.finish();
        let decoded = decode_symbols(&tree, crate::BitReader::new(&bytes, bit_len).unwrap()).unwrap();
        assert_eq!(decoded.into_iter().collect::<String>(), text);
        let (bytes, bit_len) = pack(bits("0"));
        assert_eq!(decode_symbols(&tree, crate::unpack(&bytes, bit_len).unwrap()).unwrap_err(),
                   Error::CorruptPayload("payload ends in the middle of a codeword"));
    }
}
