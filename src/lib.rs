//! Function Maxima - a function over an ordered domain that tracks its local maxima.
//!
//! # Quick Start
//!
//! ```
//! use function_maxima::FunctionMaxima;
//!
//! let mut f = FunctionMaxima::new();
//! f.set_value(1, 1).unwrap();
//! f.set_value(2, 2).unwrap();
//! f.set_value(3, 1).unwrap();
//!
//! let peaks: Vec<_> = f.maxima().map(|p| (*p.arg(), *p.value())).collect();
//! assert_eq!(peaks, vec![(2, 2)]);
//!
//! f.erase(&2).unwrap();
//! let peaks: Vec<_> = f.maxima().map(|p| (*p.arg(), *p.value())).collect();
//! assert_eq!(peaks, vec![(1, 1), (3, 1)]);
//! ```
//!
//! # Structure
//!
//! - `domain`: every point, ordered by argument
//! - `maxima`: the local maxima, ordered by value (largest first) then argument
//! - `engine`: plans and applies the maxima changes caused by one mutation
//! - `alloc`: the node allocation policy mutations run against
//!
//! Both indices share each point through an `Arc`; points are never mutated in place.

pub mod alloc;
mod domain;
mod engine;
pub mod error;
mod function;
mod maxima;
mod point;

pub use alloc::AllocError;
pub use alloc::Budget;
pub use alloc::Global;
pub use alloc::NodeAlloc;
pub use domain::Points;
pub use error::Error;
pub use function::FunctionMaxima;
pub use maxima::Maxima;
pub use point::Point;
