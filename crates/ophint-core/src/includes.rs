//! The eager-load intent surface.
//!
//! The dispatch core does not know how to load a relation. It only
//! expresses the abstract intent — "include relation path P on this
//! entity" — which an adapter translates to native mechanics: composing
//! the include into a query, or issuing a load against an
//! already-materialized entity.

use std::marker::PhantomData;

/// How a relation hangs off its owning entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncludeKind {
    /// A to-one relation.
    Reference,
    /// A to-many relation.
    Collection,
}

/// One abstract eager-load instruction: include the relation at `path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Include {
    path: &'static str,
    kind: IncludeKind,
}

impl Include {
    /// An instruction to include a to-one relation.
    pub fn reference(path: &'static str) -> Self {
        Self {
            path,
            kind: IncludeKind::Reference,
        }
    }

    /// An instruction to include a to-many relation.
    pub fn collection(path: &'static str) -> Self {
        Self {
            path,
            kind: IncludeKind::Collection,
        }
    }

    /// The relation path on the entity.
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Whether the relation is a reference or a collection.
    pub fn kind(&self) -> IncludeKind {
        self.kind
    }
}

/// Chainable builder for eager-load intents against entities of type `E`.
///
/// Adapters realize this either against a query value (recording the
/// includes for later composition) or against a materialized entity
/// (loading each relation on the spot).
pub trait Includes<E> {
    /// Requests a to-one relation.
    fn include_reference(&mut self, path: &'static str) -> &mut dyn Includes<E>;

    /// Requests a to-many relation.
    fn include_collection(&mut self, path: &'static str) -> &mut dyn Includes<E>;
}

/// Plain [`Includes`] realization that gathers the requested intents for
/// later translation.
///
/// Duplicate requests for the same relation are collapsed; the first
/// request's position is kept.
pub struct CollectedIncludes<E> {
    items: Vec<Include>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> CollectedIncludes<E> {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            _entity: PhantomData,
        }
    }

    /// The collected instructions, in request order.
    pub fn items(&self) -> &[Include] {
        &self.items
    }

    /// Consumes the collector, returning the instructions.
    pub fn into_vec(self) -> Vec<Include> {
        self.items
    }

    fn push(&mut self, include: Include) {
        if !self.items.contains(&include) {
            self.items.push(include);
        }
    }
}

impl<E> Default for CollectedIncludes<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Includes<E> for CollectedIncludes<E> {
    fn include_reference(&mut self, path: &'static str) -> &mut dyn Includes<E> {
        self.push(Include::reference(path));
        self
    }

    fn include_collection(&mut self, path: &'static str) -> &mut dyn Includes<E> {
        self.push(Include::collection(path));
        self
    }
}
