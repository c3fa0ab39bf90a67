//! Node allocation policy.
//!
//! Every index insertion and every new point asks the policy for a node before it
//! happens. The default policy never refuses. `Budget` refuses once a fixed number of
//! nodes has been handed out, which is how the rollback paths are exercised.

use thiserror::Error;

/// A node could not be allocated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("node allocation refused")]
pub struct AllocError;

/// Decides whether a new index node may be allocated.
pub trait NodeAlloc {
    /// Reserve one node, or refuse with `AllocError`.
    fn reserve(&mut self) -> Result<(), AllocError>;
}

/// The global allocator. Never refuses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Global;

impl NodeAlloc for Global {
    #[inline(always)]
    fn reserve(&mut self) -> Result<(), AllocError> {
        return Ok(());
    }
}

/// Allows a fixed number of node reservations, then refuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Budget {
    remaining: usize,
    spent: usize,
}

impl Budget {
    /// A budget that grants `nodes` reservations.
    pub fn new(nodes: usize) -> Budget {
        return Budget {
            remaining: nodes,
            spent: 0,
        };
    }

    /// Reservations still available.
    pub fn remaining(&self) -> usize {
        return self.remaining;
    }

    /// Reservations granted so far.
    pub fn spent(&self) -> usize {
        return self.spent;
    }

    /// Make `nodes` more reservations available.
    pub fn refill(&mut self, nodes: usize) {
        self.remaining = self.remaining.saturating_add(nodes);
    }
}

impl NodeAlloc for Budget {
    fn reserve(&mut self) -> Result<(), AllocError> {
        if self.remaining == 0 {
            return Err(AllocError);
        }
        self.remaining -= 1;
        self.spent += 1;
        return Ok(());
    }
}
