//! Tools to deal with codes.

use std::collections::HashMap;
use std::fmt;

use crate::{BitWriter, Error, Node, Result, Symbol, Tree};

/// `Code` represents a codeword which consists of `len` bits.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default, Hash)]
pub struct Code {
    /// Bits of the codeword. The lowest bit contains the last bit of the codeword,
    /// the bit `len-1` contains the first one.
    pub bits: u64,
    /// Length of the codeword, in bits.
    pub len: u32,
}

impl Code {
    /// Returns `self` extended by the `bit` at the end.
    #[inline] pub fn pushed(self, bit: bool) -> Self {
        Self { bits: (self.bits << 1) | bit as u64, len: self.len + 1 }
    }

    /// Gets `index`-th bit of the codeword (counting from the first one).
    #[inline] pub fn get(&self, index: u32) -> bool {
        self.bits >> (self.len - index - 1) & 1 == 1
    }

    /// Returns iterator over the bits of the codeword, from the first one.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.get(i))
    }

    /// Returns whether `self` is a (not necessarily proper) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && (self.len == 0 || other.bits >> (other.len - self.len) == self.bits)
    }

    /// Returns whether `self` consists of zero bits.
    #[inline] pub fn is_empty(&self) -> bool { self.len == 0 }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() { f.write_str(if bit { "1" } else { "0" })?; }
        Ok(())
    }
}

/// Map from symbols to their codewords, generated from a huffman tree.
#[derive(Clone, Debug)]
pub struct CodeTable<S> {
    codes: HashMap<S, Code>,
}

impl<S: Symbol> CodeTable<S> {
    /// Walks `tree` depth-first and assigns to each symbol the path to its leaf:
    /// `0` for descending left and `1` for descending right.
    ///
    /// The only symbol of a single-leaf tree gets the one-bit codeword `0`,
    /// so each occurrence of the symbol is represented in the encoded payload.
    pub fn from_tree(tree: &Tree<S>) -> Result<Self> {
        let mut codes = HashMap::new();
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push((root, if tree.is_single_leaf() { Code::default().pushed(false) } else { Code::default() }));
        }
        while let Some((index, code)) = stack.pop() {
            match *tree.node(index) {
                Node::Leaf { symbol, .. } => { codes.insert(symbol, code); }
                Node::Internal { left, right, .. } => {
                    if code.len == u64::BITS { return Err(Error::CodeTooLong { len: code.len as usize + 1 }); }
                    stack.push((right, code.pushed(true)));
                    stack.push((left, code.pushed(false)));
                }
            }
        }
        Ok(Self { codes })
    }

    /// Returns the codeword of `symbol` or `None` if `symbol` has no leaf in the tree.
    #[inline] pub fn get(&self, symbol: &S) -> Option<&Code> { self.codes.get(symbol) }

    /// Returns the number of symbols with assigned codewords.
    #[inline] pub fn len(&self) -> usize { self.codes.len() }

    /// Returns whether `self` is empty (generated from the null tree).
    #[inline] pub fn is_empty(&self) -> bool { self.codes.is_empty() }

    /// Returns the symbols and their codewords in the increasing order of symbols.
    pub fn sorted(&self) -> Vec<(S, Code)> {
        let mut result: Vec<_> = self.codes.iter().map(|(s, c)| (*s, *c)).collect();
        result.sort_unstable_by_key(|(s, _)| *s);
        result
    }

    /// Returns the length of the longest codeword.
    pub fn max_len(&self) -> u32 {
        self.codes.values().map(|c| c.len).max().unwrap_or(0)
    }

    /// Returns whether no codeword is a prefix of another one.
    ///
    /// The algorithm runs in *O(n log n)* time: after sorting the codewords
    /// lexicographically, any violation concerns adjacent codewords.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<_> = self.codes.values().copied().collect();
        codes.sort_unstable_by(|a, b| a.iter().cmp(b.iter()));
        codes.windows(2).all(|w| !w[0].is_prefix_of(&w[1]))
    }

    /// Appends codewords of all `symbols` to the `writer`.
    ///
    /// Fails with [`Error::SymbolWithoutCode`] if any symbol has no codeword in `self`.
    pub fn encode<I: IntoIterator<Item = S>>(&self, symbols: I, writer: &mut BitWriter) -> Result<()> {
        for symbol in symbols {
            writer.push_code(*self.codes.get(&symbol).ok_or(Error::SymbolWithoutCode)?);
        }
        Ok(())
    }

    /// Returns the total number of bits of the payload that encodes content with given `frequencies`.
    pub fn encoded_bits<'f, I>(&self, frequencies: I) -> u64
        where I: IntoIterator<Item = (&'f S, &'f u32)>, S: 'f
    {
        frequencies.into_iter()
            .map(|(s, count)| self.codes.get(s).map_or(0, |c| c.len as u64) * *count as u64)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;

    fn codes(text: &str) -> HashMap<char, String> {
        let table = CodeTable::from_tree(&Tree::from_symbols(text.chars()).unwrap()).unwrap();
        table.sorted().into_iter().map(|(s, c)| (s, c.to_string())).collect()
    }

    #[test]
    fn code_bits() {
        let code = Code::default().pushed(true).pushed(false).pushed(true).pushed(true);
        assert_eq!(code, Code { bits: 0b1011, len: 4 });
        assert_eq!(code.to_string(), "1011");
        assert!(code.get(0));
        assert!(!code.get(1));
        assert!(Code { bits: 0b10, len: 2 }.is_prefix_of(&code));
        assert!(!Code { bits: 0b11, len: 2 }.is_prefix_of(&code));
        assert!(!code.is_prefix_of(&Code { bits: 0b10, len: 2 }));
        assert!(Code::default().is_empty());
    }

    #[test]
    fn table_3sym() {
        //   /  \
        //  /\  a
        // c  b
        let tree = Tree::from_frequencies(hashmap!('a' => 100, 'b' => 50, 'c' => 10)).unwrap();
        let table = CodeTable::from_tree(&tree).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(&'a'), Some(&Code { bits: 0b1, len: 1 }));
        assert_eq!(table.get(&'b'), Some(&Code { bits: 0b01, len: 2 }));
        assert_eq!(table.get(&'c'), Some(&Code { bits: 0b00, len: 2 }));
        assert_eq!(table.get(&'d'), None);
        assert_eq!(table.max_len(), 2);
        assert!(table.is_prefix_free());
    }

    #[test]
    fn single_symbol_gets_one_bit() {
        assert_eq!(codes("aaaa"), hashmap!('a' => "0".to_string()));
    }

    #[test]
    fn prefix_free() {
        for text in ["Hello, World!", "aaaabbbcccdddeeee", "ab", "the quick brown fox jumps over the lazy dog"] {
            let table = CodeTable::from_tree(&Tree::from_symbols(text.chars()).unwrap()).unwrap();
            assert!(table.is_prefix_free(), "codes for {:?} are not prefix-free", text);
        }
    }

    #[test]
    fn encoded_bits() {
        let freq = hashmap!('a' => 100u32, 'b' => 50, 'c' => 10);
        let table = CodeTable::from_tree(&Tree::from_frequencies(freq.clone()).unwrap()).unwrap();
        assert_eq!(table.encoded_bits(&freq), 100 + 2 * 50 + 2 * 10);
    }

    #[test]
    fn encode() {
        let table = CodeTable::from_tree(&Tree::from_frequencies(hashmap!('a' => 100, 'b' => 50, 'c' => 10)).unwrap()).unwrap();
        let mut writer = BitWriter::new();
        table.encode("abca".chars(), &mut writer).unwrap();
        assert_eq!(writer.finish(), (vec![0b1010_0100], 6));
        assert_eq!(table.encode("abx".chars(), &mut BitWriter::new()), Err(Error::SymbolWithoutCode));
    }

    #[test]
    fn empty_tree() {
        let table = CodeTable::<u8>::from_tree(&Tree::empty()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.max_len(), 0);
    }

    #[test]
    fn fibonacci_frequencies_give_long_codes() {
        // Fibonacci-like frequencies make the tree as deep as possible
        let mut fib = vec![1u32, 1];
        while fib.len() < 40 { fib.push(fib[fib.len() - 1] + fib[fib.len() - 2]); }
        let freq: HashMap<char, u32> = fib.iter().enumerate().map(|(i, f)| (char::from(b'A' + i as u8), *f)).collect();
        let table = CodeTable::from_tree(&Tree::from_frequencies(freq).unwrap()).unwrap();
        assert_eq!(table.max_len(), 39);
        assert!(table.is_prefix_free());
    }
}
