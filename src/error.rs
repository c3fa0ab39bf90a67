//! Errors returned by `FunctionMaxima`.

use thiserror::Error;

use crate::alloc::AllocError;

/// Errors returned by lookups and mutations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The argument is not in the domain of the function.
    #[error("argument not in domain")]
    NotFound,

    /// A node allocation was refused. The function is unchanged.
    #[error(transparent)]
    Alloc(#[from] AllocError),
}
