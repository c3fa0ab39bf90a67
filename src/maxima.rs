//! Maxima index: the points that are currently local maxima.
//!
//! Ordered by value, largest first, with ties broken by ascending argument. Two points
//! are the same entry here when both argument and value compare equal; which `Arc` is
//! stored does not matter for lookups.

use std::collections::BTreeSet;
use std::collections::btree_set;
use std::sync::Arc;

use crate::point::ByValue;
use crate::point::Point;
use crate::point::Shared;

/// Local maxima of a function, largest value first.
pub struct MaximaIndex<A, V> {
    points: BTreeSet<ByValue<A, V>>,
}

impl<A, V> Clone for MaximaIndex<A, V> {
    fn clone(&self) -> Self {
        return MaximaIndex {
            points: self.points.clone(),
        };
    }
}

impl<A: Ord, V: Ord> MaximaIndex<A, V> {
    pub fn new() -> MaximaIndex<A, V> {
        return MaximaIndex {
            points: BTreeSet::new(),
        };
    }

    /// Number of local maxima.
    pub fn len(&self) -> usize {
        return self.points.len();
    }

    /// True if a point with the same argument and value is a local maximum.
    pub(crate) fn contains(&self, point: &Shared<A, V>) -> bool {
        return self.points.contains(&ByValue(Arc::clone(point)));
    }

    /// The stored entry matching `point` by argument and value.
    pub(crate) fn find(&self, point: &Shared<A, V>) -> Option<&Point<A, V>> {
        return self.points.get(&ByValue(Arc::clone(point))).map(|p| &*p.0);
    }

    /// Insert `point`. Returns false, leaving the index unchanged, if an equal entry
    /// is already present.
    pub(crate) fn insert(&mut self, point: Shared<A, V>) -> bool {
        return self.points.insert(ByValue(point));
    }

    /// Swap an equal entry for `point` in place. Returns false if there was none, in
    /// which case `point` has been inserted.
    pub(crate) fn replace(&mut self, point: Shared<A, V>) -> bool {
        return self.points.replace(ByValue(point)).is_some();
    }

    /// Remove the entry matching `point`. No-op if absent.
    pub(crate) fn remove(&mut self, point: &Shared<A, V>) -> bool {
        return self.points.remove(&ByValue(Arc::clone(point)));
    }

    /// Local maxima, largest value first, ties by ascending argument.
    pub fn iter(&self) -> Maxima<'_, A, V> {
        return Maxima {
            inner: self.points.iter(),
        };
    }
}

impl<A: Ord, V: Ord> Default for MaximaIndex<A, V> {
    fn default() -> Self {
        return Self::new();
    }
}

/// Iterator over local maxima, largest value first.
pub struct Maxima<'a, A, V> {
    inner: btree_set::Iter<'a, ByValue<A, V>>,
}

impl<'a, A, V> Clone for Maxima<'a, A, V> {
    fn clone(&self) -> Self {
        return Maxima {
            inner: self.inner.clone(),
        };
    }
}

impl<'a, A, V> Iterator for Maxima<'a, A, V> {
    type Item = &'a Point<A, V>;

    fn next(&mut self) -> Option<Self::Item> {
        return self.inner.next().map(|p| &*p.0);
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        return self.inner.size_hint();
    }
}

impl<'a, A, V> DoubleEndedIterator for Maxima<'a, A, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        return self.inner.next_back().map(|p| &*p.0);
    }
}

impl<'a, A, V> ExactSizeIterator for Maxima<'a, A, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared(arg: i32, value: i32) -> Shared<i32, i32> {
        return Arc::new(Point::new(arg, value));
    }

    fn pairs(index: &MaximaIndex<i32, i32>) -> Vec<(i32, i32)> {
        return index.iter().map(|p| (*p.arg(), *p.value())).collect();
    }

    #[test]
    fn iterates_largest_value_first() {
        let mut index = MaximaIndex::new();
        index.insert(shared(1, 4));
        index.insert(shared(7, 9));
        index.insert(shared(3, 4));
        assert_eq!(pairs(&index), vec![(7, 9), (1, 4), (3, 4)]);
        assert_eq!(index.iter().next_back().map(|p| *p.arg()), Some(3));
    }

    #[test]
    fn insert_reports_new_entries() {
        let mut index = MaximaIndex::new();
        assert!(index.insert(shared(1, 4)));
        assert!(!index.insert(shared(1, 4)));
        assert!(index.insert(shared(1, 5)));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn lookup_is_by_argument_and_value() {
        let mut index = MaximaIndex::new();
        index.insert(shared(2, 6));
        assert!(index.contains(&shared(2, 6)));
        assert!(!index.contains(&shared(2, 5)));
        assert!(!index.contains(&shared(3, 6)));
        assert_eq!(index.find(&shared(2, 6)).map(|p| *p.arg()), Some(2));
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut index = MaximaIndex::new();
        index.insert(shared(2, 6));
        assert!(!index.remove(&shared(2, 7)));
        assert!(index.remove(&shared(2, 6)));
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn replace_keeps_single_entry() {
        let mut index = MaximaIndex::new();
        let first = shared(2, 6);
        index.insert(Arc::clone(&first));
        let second = shared(2, 6);
        assert!(index.replace(Arc::clone(&second)));
        assert_eq!(index.len(), 1);
        let stored = index.find(&first).map(|p| p as *const Point<i32, i32>);
        assert_eq!(stored, Some(Arc::as_ptr(&second)));
    }
}
