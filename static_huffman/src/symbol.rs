use std::fmt::Debug;
use std::hash::Hash;

/// Alphabet of the coded content.
///
/// Each symbol is stored in the serialized tree as its 32-bit code point,
/// which is also the secondary key (after frequency) of tree construction.
pub trait Symbol: Copy + Ord + Hash + Debug {
    /// Returns the code point of `self`.
    fn to_u32(self) -> u32;

    /// Returns the symbol with the given code point or `None` if `code_point` is outside the alphabet.
    fn from_u32(code_point: u32) -> Option<Self>;

    /// Returns human readable representation of `self`, used by statistics reports.
    fn describe(self) -> String;

    /// Returns `self` as it appears in a quoted preview of the content, with non-printable symbols escaped.
    fn escape(self) -> String;
}

impl Symbol for char {
    #[inline] fn to_u32(self) -> u32 { self as u32 }

    #[inline] fn from_u32(code_point: u32) -> Option<Self> { char::from_u32(code_point) }

    fn describe(self) -> String { format!("{:?}", self) }

    fn escape(self) -> String { self.escape_debug().to_string() }
}

impl Symbol for u8 {
    #[inline] fn to_u32(self) -> u32 { self as u32 }

    #[inline] fn from_u32(code_point: u32) -> Option<Self> { u8::try_from(code_point).ok() }

    fn describe(self) -> String {
        if self.is_ascii_graphic() { format!("'{}' (0x{:02X})", self as char, self) } else { format!("0x{:02X}", self) }
    }

    fn escape(self) -> String { std::ascii::escape_default(self).to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_code_points() {
        assert_eq!('a'.to_u32(), 97);
        assert_eq!('\0'.to_u32(), 0);
        assert_eq!(<char as Symbol>::from_u32(0x1F600), Some('😀'));
        assert_eq!(<char as Symbol>::from_u32(0xD800), None);  // surrogate
        assert_eq!(<char as Symbol>::from_u32(0x110000), None);
    }

    #[test]
    fn byte_code_points() {
        assert_eq!(<u8 as Symbol>::from_u32(255), Some(255u8));
        assert_eq!(<u8 as Symbol>::from_u32(256), None);
        assert_eq!(b'z'.describe(), "'z' (0x7A)");
        assert_eq!(b'\n'.describe(), "0x0A");
        assert_eq!('\n'.describe(), "'\\n'");
    }

    #[test]
    fn escaped() {
        assert_eq!('a'.escape(), "a");
        assert_eq!('"'.escape(), "\\\"");
        assert_eq!('\t'.escape(), "\\t");
        assert_eq!('ż'.escape(), "ż");
        assert_eq!(b'a'.escape(), "a");
        assert_eq!(0xFFu8.escape(), "\\xff");
        assert_eq!(b'\n'.escape(), "\\n");
    }
}
