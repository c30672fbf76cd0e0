//! Tools to count frequencies of symbols.

use std::collections::HashMap;
use fsum::FSum;
use co_sort::{Permutation, co_sort};
use std::hash::{BuildHasher, Hash};

use crate::{Error, Result};

/// Types that implement this trait can count number of occurrences of values.
pub trait Frequencies {
    /// Type of value.
    type Value;

    /// Adds one to the stored number of `value` occurrences and returns the updated number,
    /// or returns `None` (leaving `self` unchanged) if the number would not fit in `u32`.
    fn try_count(&mut self, value: Self::Value) -> Option<u32>;

    /// Returns the total number of values counted so far.
    fn total(&self) -> u64;

    /// Returns the Shannon entropy (in bits per value) of the values counted so far.
    fn entropy(&self) -> f64;

    /// Converts `self` to the pair of boxed slices that contain
    /// distinct values and numbers of their occurrences respectively.
    fn into_unsorted(self) -> (Box<[Self::Value]>, Box<[u32]>);

    /// Converts `self` to the pair of boxed slices that contain
    /// distinct values (in increasing order) and numbers of their occurrences respectively.
    fn into_sorted(self) -> (Box<[Self::Value]>, Box<[u32]>) where Self: Sized, Self::Value: Ord {
        let (mut values, mut freq) = self.into_unsorted();
        co_sort!(values, freq);
        (values, freq)
    }
}

impl<Value: Eq + Hash, S: BuildHasher> Frequencies for HashMap<Value, u32, S> {
    type Value = Value;

    fn try_count(&mut self, value: Value) -> Option<u32> {
        let counter = self.entry(value).or_insert(0);
        *counter = counter.checked_add(1)?;
        Some(*counter)
    }

    fn total(&self) -> u64 {
        self.values().map(|v| *v as u64).sum()
    }

    fn entropy(&self) -> f64 {
        let sum = self.total() as f64;
        - FSum::with_all(self.values()
            .map(|v| { let p = *v as f64 / sum; p * p.log2()})).value()
    }

    fn into_unsorted(mut self) -> (Box<[Self::Value]>, Box<[u32]>) {
        let len = self.len();
        let mut freq = Vec::<u32>::with_capacity(len);
        let mut values = Vec::<Self::Value>::with_capacity(len);
        for (val, fr) in self.drain() {
            freq.push(fr);
            values.push(val);
        }
        (values.into_boxed_slice(), freq.into_boxed_slice())
    }
}

/// Counts occurrences of all symbols exposed by `iter`.
///
/// Fails with [`Error::EmptyInput`] if `iter` is empty
/// and with [`Error::ContentTooLarge`] if any count does not fit in `u32`.
pub fn count_symbols<S, Iter>(iter: Iter) -> Result<HashMap<S, u32>>
    where S: Eq + Hash, Iter: IntoIterator<Item = S>
{
    let mut result = HashMap::<S, u32>::new();
    let mut symbols = 0usize;
    for symbol in iter {
        symbols += 1;
        result.try_count(symbol).ok_or(Error::ContentTooLarge { symbols })?;
    }
    if result.is_empty() { return Err(Error::EmptyInput); }
    log::trace!("counted {} symbols, {} distinct", symbols, result.len());
    Ok(result)
}
