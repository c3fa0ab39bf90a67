//! `FunctionMaxima`: a function over an ordered domain with its local maxima.

use std::fmt;

use crate::alloc::Global;
use crate::alloc::NodeAlloc;
use crate::domain::DomainIndex;
use crate::domain::Points;
use crate::engine;
use crate::error::Error;
use crate::maxima::Maxima;
use crate::maxima::MaximaIndex;
use crate::point::Point;

/// A partial function `A -> V` that tracks its local maxima.
///
/// A point is a local maximum when its value is not below the value at the nearest
/// smaller argument nor at the nearest larger one. Missing neighbours are ignored and
/// ties count, so every point of a plateau is a maximum.
///
/// Mutations are transactional: if a node allocation is refused, the function is left
/// exactly as it was.
///
/// # Complexity
///
/// - `value_at`, `find`, `set_value`, `erase`: O(log n)
/// - `len`, `maxima_len`: O(1)
pub struct FunctionMaxima<A, V, M = Global> {
    domain: DomainIndex<A, V>,
    maxima: MaximaIndex<A, V>,
    alloc: M,
}

impl<A: Ord, V: Ord> FunctionMaxima<A, V, Global> {
    /// Create an empty function.
    pub fn new() -> FunctionMaxima<A, V, Global> {
        return FunctionMaxima::with_alloc(Global);
    }
}

impl<A: Ord, V: Ord, M: NodeAlloc> FunctionMaxima<A, V, M> {
    /// Create an empty function that allocates index nodes through `alloc`.
    pub fn with_alloc(alloc: M) -> FunctionMaxima<A, V, M> {
        return FunctionMaxima {
            domain: DomainIndex::new(),
            maxima: MaximaIndex::new(),
            alloc,
        };
    }

    /// Size of the domain.
    pub fn len(&self) -> usize {
        return self.domain.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.domain.is_empty();
    }

    /// Number of local maxima.
    pub fn maxima_len(&self) -> usize {
        return self.maxima.len();
    }

    pub fn alloc(&self) -> &M {
        return &self.alloc;
    }

    pub fn alloc_mut(&mut self) -> &mut M {
        return &mut self.alloc;
    }

    /// The value at `arg`, or `Error::NotFound` if `arg` is not in the domain.
    pub fn value_at(&self, arg: &A) -> Result<&V, Error> {
        return self.domain.find(arg).map(|p| p.value()).ok_or(Error::NotFound);
    }

    /// Set `f(arg) = value`, adding `arg` to the domain if needed.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn set_value(&mut self, arg: A, value: V) -> Result<(), Error> {
        let plan = engine::plan_set(&self.domain, &self.maxima, arg, value);
        plan.apply(&mut self.domain, &mut self.maxima, &mut self.alloc)?;
        return Ok(());
    }

    /// Remove `arg` from the domain. Does nothing if it is not there.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn erase(&mut self, arg: &A) -> Result<(), Error> {
        let Some(plan) = engine::plan_erase(&self.domain, &self.maxima, arg) else {
            tracing::trace!("argument not in domain, nothing to erase");
            return Ok(());
        };
        plan.apply(&mut self.domain, &mut self.maxima, &mut self.alloc)?;
        return Ok(());
    }

    /// The point at `arg`, if any.
    pub fn find(&self, arg: &A) -> Option<&Point<A, V>> {
        return self.domain.find(arg);
    }

    pub fn contains(&self, arg: &A) -> bool {
        return self.domain.find(arg).is_some();
    }

    /// The point with the largest argument below `arg`.
    pub fn predecessor(&self, arg: &A) -> Option<&Point<A, V>> {
        return self.domain.predecessor(arg);
    }

    /// The point with the smallest argument above `arg`.
    pub fn successor(&self, arg: &A) -> Option<&Point<A, V>> {
        return self.domain.successor(arg);
    }

    /// Whether the point at `arg` is a local maximum, or `None` if `arg` is absent.
    pub fn is_local_maximum(&self, arg: &A) -> Option<bool> {
        let point = self.domain.find_shared(arg)?;
        return Some(self.maxima.contains(point));
    }

    /// Points in ascending argument order.
    pub fn iter(&self) -> Points<'_, A, V> {
        return self.domain.iter();
    }

    /// Local maxima, largest value first, ties by ascending argument.
    pub fn maxima(&self) -> Maxima<'_, A, V> {
        return self.maxima.iter();
    }

    /// Check that the maxima index holds exactly the points satisfying the local
    /// maximum predicate. O(n log n); meant for tests and fuzzing.
    pub fn check_invariants(&self) -> bool {
        let mut expected = 0;
        for point in self.domain.iter() {
            let left = self.domain.predecessor(point.arg()).map(|p| p.value());
            let right = self.domain.successor(point.arg()).map(|p| p.value());
            let want = engine::is_maximum(point.value(), left, right);
            let Some(shared) = self.domain.find_shared(point.arg()) else {
                return false;
            };
            let stored = self.maxima.find(shared);
            // The maxima entry must be the domain's point, not a stale copy.
            let same = stored.is_some_and(|s| std::ptr::eq(s, point));
            if want != same {
                return false;
            }
            if want {
                expected += 1;
            }
        }
        return expected == self.maxima.len();
    }
}

impl<A: Ord, V: Ord> Default for FunctionMaxima<A, V, Global> {
    fn default() -> Self {
        return Self::new();
    }
}

impl<A, V, M: Clone> Clone for FunctionMaxima<A, V, M> {
    /// Copies both indices. Points are immutable and shared with the original.
    fn clone(&self) -> Self {
        return FunctionMaxima {
            domain: self.domain.clone(),
            maxima: self.maxima.clone(),
            alloc: self.alloc.clone(),
        };
    }

    /// Replaces `self` only once the copy is complete, so a failed copy leaves
    /// `self` untouched.
    fn clone_from(&mut self, source: &Self) {
        let copy = source.clone();
        *self = copy;
    }
}

impl<A: Ord, V: Ord, M: NodeAlloc> PartialEq for FunctionMaxima<A, V, M> {
    /// Functions are equal when their domains hold the same points. The maxima follow.
    fn eq(&self, other: &Self) -> bool {
        return self.len() == other.len() && self.iter().eq(other.iter());
    }
}

impl<A: Ord, V: Ord, M: NodeAlloc> Eq for FunctionMaxima<A, V, M> {}

impl<A: Ord + fmt::Debug, V: fmt::Debug, M> fmt::Debug for FunctionMaxima<A, V, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f
            .debug_map()
            .entries(self.domain.iter().map(|p| (p.arg(), p.value())))
            .finish();
    }
}

impl<'a, A: Ord, V: Ord, M: NodeAlloc> IntoIterator for &'a FunctionMaxima<A, V, M> {
    type Item = &'a Point<A, V>;
    type IntoIter = Points<'a, A, V>;

    fn into_iter(self) -> Self::IntoIter {
        return self.iter();
    }
}
