//! Domain index: every point of the function, ordered by argument.
//!
//! Operations:
//! - find: O(log n)
//! - predecessor / successor of an argument: O(log n)
//! - insert / replace / remove: O(log n)
//! - iteration: ascending by argument
//!
//! The argument does not have to be present for `predecessor` and `successor`; they
//! return the nearest point strictly below or above it. `None` means there is no
//! neighbour on that side.

use std::collections::BTreeSet;
use std::collections::btree_set;
use std::ops::Bound;

use crate::point::ByArg;
use crate::point::Point;
use crate::point::Shared;

/// Points of the function, one per argument.
pub struct DomainIndex<A, V> {
    points: BTreeSet<ByArg<A, V>>,
}

impl<A, V> Clone for DomainIndex<A, V> {
    fn clone(&self) -> Self {
        return DomainIndex {
            points: self.points.clone(),
        };
    }
}

impl<A: Ord, V> DomainIndex<A, V> {
    pub fn new() -> DomainIndex<A, V> {
        return DomainIndex {
            points: BTreeSet::new(),
        };
    }

    /// Number of arguments in the domain.
    pub fn len(&self) -> usize {
        return self.points.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.points.is_empty();
    }

    pub(crate) fn find_shared(&self, arg: &A) -> Option<&Shared<A, V>> {
        return self.points.get(arg).map(|p| &p.0);
    }

    /// The point at `arg`, if `arg` is in the domain.
    pub fn find(&self, arg: &A) -> Option<&Point<A, V>> {
        return self.find_shared(arg).map(|p| &**p);
    }

    pub(crate) fn predecessor_shared(&self, arg: &A) -> Option<&Shared<A, V>> {
        return self.points.range::<A, _>(..arg).next_back().map(|p| &p.0);
    }

    pub(crate) fn successor_shared(&self, arg: &A) -> Option<&Shared<A, V>> {
        return self
            .points
            .range::<A, _>((Bound::Excluded(arg), Bound::Unbounded))
            .next()
            .map(|p| &p.0);
    }

    /// The point with the largest argument strictly below `arg`.
    pub fn predecessor(&self, arg: &A) -> Option<&Point<A, V>> {
        return self.predecessor_shared(arg).map(|p| &**p);
    }

    /// The point with the smallest argument strictly above `arg`.
    pub fn successor(&self, arg: &A) -> Option<&Point<A, V>> {
        return self.successor_shared(arg).map(|p| &**p);
    }

    /// Insert a point whose argument is not yet in the domain.
    /// Returns false, leaving the index unchanged, if the argument is taken.
    pub(crate) fn insert(&mut self, point: Shared<A, V>) -> bool {
        return self.points.insert(ByArg(point));
    }

    /// Swap the point stored under the same argument for `point`, in place.
    /// Returns the outgoing point, or `None` (and inserts) if there was none.
    pub(crate) fn replace(&mut self, point: Shared<A, V>) -> Option<Shared<A, V>> {
        return self.points.replace(ByArg(point)).map(|p| p.0);
    }

    pub(crate) fn remove(&mut self, arg: &A) -> Option<Shared<A, V>> {
        return self.points.take(arg).map(|p| p.0);
    }

    /// Points in ascending argument order.
    pub fn iter(&self) -> Points<'_, A, V> {
        return Points {
            inner: self.points.iter(),
        };
    }
}

impl<A: Ord, V> Default for DomainIndex<A, V> {
    fn default() -> Self {
        return Self::new();
    }
}

/// Iterator over the points of a function, ascending by argument.
pub struct Points<'a, A, V> {
    inner: btree_set::Iter<'a, ByArg<A, V>>,
}

impl<'a, A, V> Clone for Points<'a, A, V> {
    fn clone(&self) -> Self {
        return Points {
            inner: self.inner.clone(),
        };
    }
}

impl<'a, A, V> Iterator for Points<'a, A, V> {
    type Item = &'a Point<A, V>;

    fn next(&mut self) -> Option<Self::Item> {
        return self.inner.next().map(|p| &*p.0);
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        return self.inner.size_hint();
    }
}

impl<'a, A, V> DoubleEndedIterator for Points<'a, A, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        return self.inner.next_back().map(|p| &*p.0);
    }
}

impl<'a, A, V> ExactSizeIterator for Points<'a, A, V> {}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn build(points: &[(i32, i32)]) -> DomainIndex<i32, i32> {
        let mut index = DomainIndex::new();
        for &(a, v) in points {
            assert!(index.insert(Arc::new(Point::new(a, v))));
        }
        return index;
    }

    fn args(index: &DomainIndex<i32, i32>) -> Vec<i32> {
        return index.iter().map(|p| *p.arg()).collect();
    }

    #[test]
    fn empty_index() {
        let index: DomainIndex<i32, i32> = DomainIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.find(&0), None);
        assert_eq!(index.predecessor(&0), None);
        assert_eq!(index.successor(&0), None);
    }

    #[test]
    fn iterates_in_argument_order() {
        let index = build(&[(5, 0), (1, 0), (3, 0)]);
        assert_eq!(args(&index), vec![1, 3, 5]);
        assert_eq!(index.iter().rev().map(|p| *p.arg()).collect::<Vec<_>>(), vec![5, 3, 1]);
        assert_eq!(index.iter().len(), 3);
    }

    #[test]
    fn duplicate_argument_rejected() {
        let mut index = build(&[(1, 10)]);
        assert!(!index.insert(Arc::new(Point::new(1, 20))));
        assert_eq!(index.find(&1).map(|p| *p.value()), Some(10));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn neighbours_of_present_argument() {
        let index = build(&[(1, 0), (3, 0), (5, 0)]);
        assert_eq!(index.predecessor(&3).map(|p| *p.arg()), Some(1));
        assert_eq!(index.successor(&3).map(|p| *p.arg()), Some(5));
        assert_eq!(index.predecessor(&1), None);
        assert_eq!(index.successor(&5), None);
    }

    #[test]
    fn neighbours_of_absent_argument() {
        let index = build(&[(1, 0), (3, 0), (5, 0)]);
        assert_eq!(index.predecessor(&4).map(|p| *p.arg()), Some(3));
        assert_eq!(index.successor(&4).map(|p| *p.arg()), Some(5));
        assert_eq!(index.predecessor(&0), None);
        assert_eq!(index.successor(&6), None);
    }

    #[test]
    fn replace_swaps_in_place() {
        let mut index = build(&[(1, 10), (2, 20)]);
        let old = index.replace(Arc::new(Point::new(2, 99)));
        assert_eq!(old.map(|p| *p.value()), Some(20));
        assert_eq!(index.find(&2).map(|p| *p.value()), Some(99));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn remove_returns_point() {
        let mut index = build(&[(1, 10), (2, 20)]);
        assert_eq!(index.remove(&1).map(|p| *p.value()), Some(10));
        assert_eq!(index.remove(&1), None);
        assert_eq!(args(&index), vec![2]);
    }
}
