//! Packing of bit sequences into bytes and unpacking them back.
//!
//! Bits are stored from the most significant bit of the first byte.
//! The unused low-order bits of the last byte are zeroed.

use std::iter::FusedIterator;

use bit_vec::BitVec;

use crate::{Code, Error, Result};

/// Returns the number of bytes needed to store `bit_len` bits.
#[inline(always)] pub const fn bytes_for_bits(bit_len: usize) -> usize {
    (bit_len + 7) / 8
}

/// Appends bits to a growing bit vector.
#[derive(Default, Debug, Clone)]
pub struct BitWriter {
    bits: BitVec,
}

impl BitWriter {
    /// Constructs empty writer.
    pub fn new() -> Self { Self::default() }

    /// Constructs empty writer that can hold `bit_len` bits without reallocation.
    pub fn with_capacity(bit_len: usize) -> Self {
        Self { bits: BitVec::with_capacity(bit_len) }
    }

    /// Appends a single `bit`.
    #[inline] pub fn push(&mut self, bit: bool) { self.bits.push(bit); }

    /// Appends all bits of the `code`, from the first one.
    pub fn push_code(&mut self, code: Code) {
        for bit in code.iter() { self.bits.push(bit); }
    }

    /// Returns the number of bits written so far.
    #[inline] pub fn bit_len(&self) -> usize { self.bits.len() }

    /// Returns the bits written so far.
    #[inline] pub fn bits(&self) -> &BitVec { &self.bits }

    /// Returns packed bytes and the exact number of bits they hold.
    pub fn finish(self) -> (Vec<u8>, usize) { (self.bits.to_bytes(), self.bits.len()) }
}

impl Extend<bool> for BitWriter {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        self.bits.extend(iter);
    }
}

/// Packs `bits` into bytes. Returns the bytes and the number of bits.
pub fn pack<I: IntoIterator<Item = bool>>(bits: I) -> (Vec<u8>, usize) {
    let bits: BitVec = bits.into_iter().collect();
    (bits.to_bytes(), bits.len())
}

/// Iterator over the first `bit_len` bits packed in bytes.
#[derive(Clone, Debug)]
pub struct BitReader {
    bits: BitVec,
    bit_len: usize,
    position: usize,
}

impl BitReader {
    /// Constructs reader of the first `bit_len` bits of `bytes`.
    ///
    /// Fails with [`Error::TruncatedPayload`] if `bytes` contain less than `bit_len` bits.
    pub fn new(bytes: &[u8], bit_len: usize) -> Result<Self> {
        let available = bytes.len().saturating_mul(8);
        if bit_len > available { return Err(Error::TruncatedPayload { bit_len, available }); }
        Ok(Self { bits: BitVec::from_bytes(&bytes[..bytes_for_bits(bit_len)]), bit_len, position: 0 })
    }

    /// Returns the number of bits not read yet.
    #[inline] pub fn remaining(&self) -> usize { self.bit_len - self.position }

    /// Returns the number of bits read so far.
    #[inline] pub fn position(&self) -> usize { self.position }
}

impl Iterator for BitReader {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.position == self.bit_len { return None; }
        let bit = self.bits.get(self.position)?;
        self.position += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining();
        (len, Some(len))
    }
}

impl ExactSizeIterator for BitReader {}

impl FusedIterator for BitReader {}

/// Unpacks the first `bit_len` bits from `bytes`, ignoring the padding after them.
///
/// Fails with [`Error::TruncatedPayload`] if `bytes` contain less than `bit_len` bits.
pub fn unpack(bytes: &[u8], bit_len: usize) -> Result<Vec<bool>> {
    Ok(BitReader::new(bytes, bit_len)?.collect())
}
