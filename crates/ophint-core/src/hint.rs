//! The hint token contract.

use std::fmt::Debug;
use std::hash::Hash;

/// An opaque, enumerable token signaling a desired optional behavior for
/// one logical operation.
///
/// Hints are plain values of an application-defined enumeration type.
/// Equality is by value, and a dispatch key always fixes the hint type as
/// one of its components, so values of different hint types are never
/// compared with each other. Any fieldless enum deriving the usual set
/// (`Copy`, `Eq`, `Hash`, `Debug`) qualifies through the blanket impl.
pub trait Hint: Copy + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> Hint for T where T: Copy + Eq + Hash + Debug + Send + Sync + 'static {}
