//! # ophint
//!
//! Operation hints over SQLite: application code attaches lightweight,
//! named hints to a unit of work, and registered handlers react by
//! conditionally eager-loading relations — either composing includes
//! into a declarative [`SelectQuery`] before it executes, or loading
//! relations onto an already-materialized entity.
//!
//! The dispatch machinery (containers, registry, performer) lives in
//! [`ophint_core`] and is re-exported here. This crate adds the SQLite
//! realization: the [`SqliteStore`] pool handle, the collaborator traits
//! ([`EntitySet`], [`RelationSource`]) applications implement for their
//! entities, the [`IncludesHintHandler`] that turns one user-declared
//! includes action into both a query handler and an entity handler, and
//! the [`Repository`] facade that threads a performer through reads.
//!
//! Configuration happens once at startup:
//!
//! ```ignore
//! let registry = ophint::configure_hints(|builder| {
//!     builder.includes_handler::<Order, OrderDb, OrderHints>(|hint, includes| {
//!         match hint {
//!             OrderHints::WithCustomer => {
//!                 includes.include_reference("customer");
//!             }
//!             OrderHints::WithLines => {
//!                 includes.include_collection("lines");
//!             }
//!         }
//!     });
//! });
//! ```
//!
//! Each logical operation then constructs its own
//! [`HintPerformer`](ophint_core::HintPerformer) over the shared
//! registry, activates hints, and performs queries or entities through
//! it.

pub mod configure;
pub mod handler;
pub mod query;
pub mod relation;
pub mod repository;
pub mod store;

pub use self::configure::{IncludesHandlerExt, configure_hints};
pub use self::handler::IncludesHintHandler;
pub use self::query::{EntitySet, SelectQuery};
pub use self::relation::{RelationSource, block_on_load};
pub use self::repository::Repository;
pub use self::store::{SqliteStore, StoreError};

pub use ophint_core::{
    CollectedIncludes, EntityHintHandler, Hint, HintHandlerRegistry, HintPerformer,
    HintRegistryBuilder, HintsContainer, Include, IncludeKind, Includes, QueryHintHandler,
};
