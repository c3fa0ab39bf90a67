//! Update engine: keeps the maxima index in step with the domain index.
//!
//! A point is a local maximum when its value is not below either neighbour's value.
//! Missing neighbours do not count against it, and equal values do not either, so
//! every point of a plateau is a maximum.
//!
//! Since the predicate only looks one step left and right, a mutation at `a` can only
//! change the classification of three points: the point at `a`, its predecessor and
//! its successor. Each mutation runs in two steps:
//!
//! 1. Plan. Read the neighbourhood of `a` and decide, for each of the three points,
//!    whether it must enter or leave the maxima index. Nothing is mutated.
//! 2. Apply. First every step that needs a new node (the new point, a new domain
//!    entry, maxima insertions), each recorded in a journal. Then every step that
//!    does not: in-place replacements and removals.
//!
//! If a node allocation is refused during the first half, the journal is unwound in
//! reverse and both indices are back where they started. The second half cannot fail.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::alloc::AllocError;
use crate::alloc::NodeAlloc;
use crate::domain::DomainIndex;
use crate::maxima::MaximaIndex;
use crate::point::Point;
use crate::point::Shared;

/// The local maximum predicate.
#[inline]
pub(crate) fn is_maximum<V: Ord>(value: &V, left: Option<&V>, right: Option<&V>) -> bool {
    let left_ok = left.is_none_or(|l| value >= l);
    let right_ok = right.is_none_or(|r| value >= r);
    return left_ok && right_ok;
}

/// Maxima edit for a neighbour of the mutated argument.
enum Edit<A, V> {
    Insert(Shared<A, V>),
    Remove(Shared<A, V>),
}

/// What happens to the incoming point of a `set` in the maxima index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Membership {
    /// Not a maximum.
    Absent,
    /// A maximum with no equal entry yet.
    Insert,
    /// A maximum whose entry (same argument and value) already exists for the
    /// outgoing point; swap it in place.
    Replace,
}

enum Step<A, V> {
    Set {
        arg: A,
        value: V,
        outgoing: Option<Shared<A, V>>,
        outgoing_is_max: bool,
        incoming: Membership,
    },
    Erase {
        target: Shared<A, V>,
        target_is_max: bool,
    },
}

/// A completed step of the growing half of `apply`.
enum Applied<A, V> {
    DomainInsert(Shared<A, V>),
    MaximaInsert(Shared<A, V>),
}

/// Work left for the shrinking half of `apply`.
enum Shrink<A, V> {
    Set {
        incoming: Shared<A, V>,
        outgoing: Option<Shared<A, V>>,
        outgoing_is_max: bool,
        replace_max: bool,
    },
    Erase {
        target: Shared<A, V>,
        target_is_max: bool,
    },
}

/// The edits one mutation needs, computed without touching either index.
pub(crate) struct Plan<A, V> {
    step: Step<A, V>,
    neighbours: SmallVec<[Edit<A, V>; 2]>,
}

fn plan_neighbour<A: Ord, V: Ord>(
    edits: &mut SmallVec<[Edit<A, V>; 2]>,
    maxima: &MaximaIndex<A, V>,
    point: &Shared<A, V>,
    want: bool,
) {
    let current = maxima.contains(point);
    if want && !current {
        edits.push(Edit::Insert(Arc::clone(point)));
    } else if !want && current {
        edits.push(Edit::Remove(Arc::clone(point)));
    }
}

/// Plan `f(arg) = value`.
pub(crate) fn plan_set<A: Ord, V: Ord>(
    domain: &DomainIndex<A, V>,
    maxima: &MaximaIndex<A, V>,
    arg: A,
    value: V,
) -> Plan<A, V> {
    let outgoing = domain.find_shared(&arg).cloned();
    // Strict neighbours of `arg`, so the outgoing point never shows up as one.
    let left = domain.predecessor_shared(&arg);
    let right = domain.successor_shared(&arg);

    let mut neighbours = SmallVec::new();
    if let Some(left) = left {
        let outer = domain.predecessor_shared(left.arg()).map(|p| p.value());
        let want = is_maximum(left.value(), outer, Some(&value));
        plan_neighbour(&mut neighbours, maxima, left, want);
    }
    if let Some(right) = right {
        let outer = domain.successor_shared(right.arg()).map(|p| p.value());
        let want = is_maximum(right.value(), Some(&value), outer);
        plan_neighbour(&mut neighbours, maxima, right, want);
    }

    let outgoing_is_max = outgoing.as_ref().is_some_and(|p| maxima.contains(p));
    let want = is_maximum(&value, left.map(|p| p.value()), right.map(|p| p.value()));
    let same_value = outgoing.as_ref().is_some_and(|p| *p.value() == value);
    let incoming = if !want {
        Membership::Absent
    } else if outgoing_is_max && same_value {
        Membership::Replace
    } else {
        Membership::Insert
    };

    return Plan {
        step: Step::Set {
            arg,
            value,
            outgoing,
            outgoing_is_max,
            incoming,
        },
        neighbours,
    };
}

/// Plan the removal of `arg` from the domain. `None` if `arg` is absent.
pub(crate) fn plan_erase<A: Ord, V: Ord>(
    domain: &DomainIndex<A, V>,
    maxima: &MaximaIndex<A, V>,
    arg: &A,
) -> Option<Plan<A, V>> {
    let target = domain.find_shared(arg)?;
    let left = domain.predecessor_shared(arg);
    let right = domain.successor_shared(arg);

    // After the erase, left and right become each other's neighbours.
    let mut neighbours = SmallVec::new();
    if let Some(left) = left {
        let outer = domain.predecessor_shared(left.arg()).map(|p| p.value());
        let want = is_maximum(left.value(), outer, right.map(|p| p.value()));
        plan_neighbour(&mut neighbours, maxima, left, want);
    }
    if let Some(right) = right {
        let outer = domain.successor_shared(right.arg()).map(|p| p.value());
        let want = is_maximum(right.value(), left.map(|p| p.value()), outer);
        plan_neighbour(&mut neighbours, maxima, right, want);
    }

    return Some(Plan {
        step: Step::Erase {
            target: Arc::clone(target),
            target_is_max: maxima.contains(target),
        },
        neighbours,
    });
}

impl<A: Ord, V: Ord> Plan<A, V> {
    /// Apply the plan to both indices, or leave both untouched.
    pub(crate) fn apply<M: NodeAlloc>(
        self,
        domain: &mut DomainIndex<A, V>,
        maxima: &mut MaximaIndex<A, V>,
        alloc: &mut M,
    ) -> Result<(), AllocError> {
        let mut journal: SmallVec<[Applied<A, V>; 4]> = SmallVec::new();
        let Plan { step, neighbours } = self;

        let shrink = match grow(step, &neighbours, domain, maxima, alloc, &mut journal) {
            Ok(shrink) => shrink,
            Err(err) => {
                let undone = journal.len();
                rollback(journal, domain, maxima);
                tracing::debug!(undone, "node allocation refused, mutation rolled back");
                return Err(err);
            }
        };

        let inserted = journal
            .iter()
            .filter(|a| matches!(a, Applied::MaximaInsert(_)))
            .count();
        let removed = shrink_all(shrink, neighbours, domain, maxima);
        tracing::trace!(inserted, removed, "mutation committed");
        return Ok(());
    }
}

/// Steps that need a node. Every completed step is journaled before the next one.
fn grow<A: Ord, V: Ord, M: NodeAlloc>(
    step: Step<A, V>,
    neighbours: &[Edit<A, V>],
    domain: &mut DomainIndex<A, V>,
    maxima: &mut MaximaIndex<A, V>,
    alloc: &mut M,
    journal: &mut SmallVec<[Applied<A, V>; 4]>,
) -> Result<Shrink<A, V>, AllocError> {
    let shrink = match step {
        Step::Set {
            arg,
            value,
            outgoing,
            outgoing_is_max,
            incoming,
        } => {
            alloc.reserve()?;
            let point: Shared<A, V> = Arc::new(Point::new(arg, value));

            // A replaced argument keeps its domain node; see `shrink_all`.
            if outgoing.is_none() {
                alloc.reserve()?;
                domain.insert(Arc::clone(&point));
                journal.push(Applied::DomainInsert(Arc::clone(&point)));
            }
            if incoming == Membership::Insert {
                alloc.reserve()?;
                maxima.insert(Arc::clone(&point));
                journal.push(Applied::MaximaInsert(Arc::clone(&point)));
            }

            Shrink::Set {
                incoming: point,
                outgoing,
                outgoing_is_max,
                replace_max: incoming == Membership::Replace,
            }
        }
        Step::Erase {
            target,
            target_is_max,
        } => Shrink::Erase {
            target,
            target_is_max,
        },
    };

    for edit in neighbours {
        if let Edit::Insert(point) = edit {
            alloc.reserve()?;
            maxima.insert(Arc::clone(point));
            journal.push(Applied::MaximaInsert(Arc::clone(point)));
        }
    }

    return Ok(shrink);
}

/// Steps that free or reuse nodes. Returns the number of maxima entries removed.
fn shrink_all<A: Ord, V: Ord>(
    shrink: Shrink<A, V>,
    neighbours: SmallVec<[Edit<A, V>; 2]>,
    domain: &mut DomainIndex<A, V>,
    maxima: &mut MaximaIndex<A, V>,
) -> usize {
    let mut removed = 0;

    match shrink {
        Shrink::Set {
            incoming,
            outgoing,
            outgoing_is_max,
            replace_max,
        } => {
            if replace_max {
                maxima.replace(Arc::clone(&incoming));
            } else if let Some(outgoing) = outgoing.as_ref().filter(|_| outgoing_is_max) {
                maxima.remove(outgoing);
                removed += 1;
            }
            if outgoing.is_some() {
                domain.replace(incoming);
            }
        }
        Shrink::Erase {
            target,
            target_is_max,
        } => {
            domain.remove(target.arg());
            if target_is_max {
                maxima.remove(&target);
                removed += 1;
            }
        }
    }

    for edit in neighbours {
        if let Edit::Remove(point) = edit {
            maxima.remove(&point);
            removed += 1;
        }
    }

    return removed;
}

fn rollback<A: Ord, V: Ord>(
    mut journal: SmallVec<[Applied<A, V>; 4]>,
    domain: &mut DomainIndex<A, V>,
    maxima: &mut MaximaIndex<A, V>,
) {
    while let Some(applied) = journal.pop() {
        match applied {
            Applied::DomainInsert(point) => {
                domain.remove(point.arg());
            }
            Applied::MaximaInsert(point) => {
                maxima.remove(&point);
            }
        }
    }
}
