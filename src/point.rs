//! Points of a function and the two orders they are indexed by.
//!
//! A `Point` is immutable once built. Both indices hold the same point through an
//! `Arc`, wrapped in a newtype that decides how the point sorts:
//!
//! - `ByArg`: ascending by argument, used by the domain index
//! - `ByValue`: descending by value, ties broken by ascending argument, used by the
//!   maxima index

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::sync::Arc;

/// A single `(argument, value)` pair of a function.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point<A, V> {
    arg: A,
    value: V,
}

/// A point shared between the domain and maxima indices.
pub(crate) type Shared<A, V> = Arc<Point<A, V>>;

impl<A, V> Point<A, V> {
    pub(crate) fn new(arg: A, value: V) -> Point<A, V> {
        return Point { arg, value };
    }

    /// The argument of the function at this point.
    pub fn arg(&self) -> &A {
        return &self.arg;
    }

    /// The value of the function at this point.
    pub fn value(&self) -> &V {
        return &self.value;
    }
}

/// Orders points by argument only.
///
/// Borrows as `A` so the domain index can be searched with a bare argument.
#[derive(Debug)]
pub(crate) struct ByArg<A, V>(pub(crate) Shared<A, V>);

impl<A, V> Clone for ByArg<A, V> {
    fn clone(&self) -> Self {
        return ByArg(Arc::clone(&self.0));
    }
}

impl<A: Ord, V> PartialEq for ByArg<A, V> {
    fn eq(&self, other: &Self) -> bool {
        return self.0.arg == other.0.arg;
    }
}

impl<A: Ord, V> Eq for ByArg<A, V> {}

impl<A: Ord, V> PartialOrd for ByArg<A, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        return Some(self.cmp(other));
    }
}

impl<A: Ord, V> Ord for ByArg<A, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        return self.0.arg.cmp(&other.0.arg);
    }
}

impl<A, V> Borrow<A> for ByArg<A, V> {
    fn borrow(&self) -> &A {
        return &self.0.arg;
    }
}

/// Orders points by value, largest first, then by argument.
#[derive(Debug)]
pub(crate) struct ByValue<A, V>(pub(crate) Shared<A, V>);

impl<A, V> Clone for ByValue<A, V> {
    fn clone(&self) -> Self {
        return ByValue(Arc::clone(&self.0));
    }
}

impl<A: Ord, V: Ord> PartialEq for ByValue<A, V> {
    fn eq(&self, other: &Self) -> bool {
        return self.cmp(other) == Ordering::Equal;
    }
}

impl<A: Ord, V: Ord> Eq for ByValue<A, V> {}

impl<A: Ord, V: Ord> PartialOrd for ByValue<A, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        return Some(self.cmp(other));
    }
}

impl<A: Ord, V: Ord> Ord for ByValue<A, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on value so that iteration yields the largest maximum first.
        match other.0.value.cmp(&self.0.value) {
            Ordering::Equal => self.0.arg.cmp(&other.0.arg),
            ordering => ordering,
        }
    }
}
