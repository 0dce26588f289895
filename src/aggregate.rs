//! Ordered, duplicate-free aggregation of accepted values
//!
//! [`NumberSet`] is backed by a B-tree set: O(log n) insert with duplicate
//! suppression, and values are always available in descending order.

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::iter::Rev;

/// Distinct integers, iterated in descending order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberSet {
    values: BTreeSet<i64>,
}

impl NumberSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning `true` if it was not already present
    pub fn insert(&mut self, value: i64) -> bool {
        self.values.insert(value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values from largest to smallest
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.values.iter().rev(),
        }
    }

    /// Union another set into this one
    pub fn merge(&mut self, mut other: NumberSet) {
        if other.values.len() > self.values.len() {
            std::mem::swap(&mut self.values, &mut other.values);
        }
        self.values.append(&mut other.values);
    }
}

/// Descending iterator over a [`NumberSet`]
pub struct Iter<'a> {
    inner: Rev<btree_set::Iter<'a, i64>>,
}

impl Iterator for Iter<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a NumberSet {
    type Item = i64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl IntoIterator for NumberSet {
    type Item = i64;
    type IntoIter = Rev<btree_set::IntoIter<i64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter().rev()
    }
}

impl Extend<i64> for NumberSet {
    fn extend<T: IntoIterator<Item = i64>>(&mut self, iter: T) {
        self.values.extend(iter);
    }
}

impl FromIterator<i64> for NumberSet {
    fn from_iter<T: IntoIterator<Item = i64>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = NumberSet::new();
        assert!(set.insert(11));
        assert!(!set.insert(11));
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![11]);
    }

    #[test]
    fn test_iterates_descending() {
        let set: NumberSet = [7, 11, 11, 15, -3, 0].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![15, 11, 7, 0, -3]);
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![15, 11, 7, 0, -3]);
    }

    #[test]
    fn test_extremes() {
        let mut set = NumberSet::new();
        set.extend([i64::MIN, i64::MAX, 0]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![i64::MAX, 0, i64::MIN]);
    }

    #[test]
    fn test_merge_unions() {
        let mut a: NumberSet = [1, 3, 5].into_iter().collect();
        let b: NumberSet = [5, 7, 9, 11].into_iter().collect();
        a.merge(b);
        assert_eq!(a.iter().collect::<Vec<_>>(), vec![11, 9, 7, 5, 3, 1]);
    }

    #[test]
    fn test_empty() {
        let set = NumberSet::new();
        assert!(set.is_empty());
        assert_eq!(set.iter().len(), 0);
    }
}
