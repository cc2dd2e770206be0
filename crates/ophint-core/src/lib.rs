//! # ophint-core
//!
//! Type-indexed dispatch for operation hints: application code attaches
//! lightweight, named hints to a unit of work, and independently
//! registered handlers react to those hints by augmenting a query or
//! mutating a freshly loaded entity.
//!
//! ## Features
//!
//! - Heterogeneous active-hint sets mixing independently-defined hint
//!   enumerations in one container
//! - Handler registry keyed by `(Subject, Hint)` and
//!   `(Entity, Source, Hint)` type identities, with instance-level dedup
//! - Deterministic dispatch without runtime type errors: registration
//!   order within a bucket, identity when nothing matches
//! - Synchronous and asynchronous entity dispatch paths
//! - Abstract eager-load intents translated by storage adapters
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use ophint_core::{HintPerformer, HintRegistryBuilder, QueryHintHandler};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum CatalogHints {
//!     WithAuthors,
//! }
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct BookQuery {
//!     includes: Vec<&'static str>,
//! }
//!
//! struct AuthorIncludes;
//!
//! impl QueryHintHandler<BookQuery, CatalogHints> for AuthorIncludes {
//!     fn handle(&self, mut query: BookQuery, _hint: CatalogHints) -> BookQuery {
//!         query.includes.push("authors");
//!         query
//!     }
//! }
//!
//! // Configuration phase: build the registry once.
//! let mut builder = HintRegistryBuilder::new();
//! builder.query_handler::<BookQuery, CatalogHints>(Arc::new(AuthorIncludes));
//! let registry = builder.build();
//!
//! // Operation phase: one performer per logical operation.
//! let mut performer = HintPerformer::new(registry);
//! performer.add_hint(CatalogHints::WithAuthors);
//!
//! let query = performer.perform(BookQuery::default());
//! assert_eq!(query.includes, vec!["authors"]);
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod builder;
pub mod container;
pub mod handler;
pub mod hint;
pub mod includes;
pub mod performer;
pub mod registry;

pub use self::builder::HintRegistryBuilder;
pub use self::container::HintsContainer;
pub use self::handler::{EntityHintHandler, QueryHintHandler};
pub use self::hint::Hint;
pub use self::includes::{CollectedIncludes, Include, IncludeKind, Includes};
pub use self::performer::HintPerformer;
pub use self::registry::HintHandlerRegistry;
