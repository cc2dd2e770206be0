//! Declarative queries augmented by query hint handlers.

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use ophint_core::Include;

/// Append-only, composable query over entities of type `E`.
///
/// Hint handlers never execute anything: each application returns a new
/// query value describing "the prior query plus this hint's effect". The
/// accumulated includes are translated to native load operations by the
/// [`EntitySet`] that executes the query.
pub struct SelectQuery<E> {
    includes: Vec<Include>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> SelectQuery<E> {
    /// A query over all entities of type `E`, no relations included.
    pub fn new() -> Self {
        Self {
            includes: Vec::new(),
            _entity: PhantomData,
        }
    }

    /// Appends an include; duplicates are collapsed.
    pub fn add_include(&mut self, include: Include) {
        if !self.includes.contains(&include) {
            self.includes.push(include);
        }
    }

    /// Returns the query extended with `include`.
    pub fn with_include(mut self, include: Include) -> Self {
        self.add_include(include);
        self
    }

    /// Returns the query extended with a to-one relation include.
    pub fn include_reference(self, path: &'static str) -> Self {
        self.with_include(Include::reference(path))
    }

    /// Returns the query extended with a to-many relation include.
    pub fn include_collection(self, path: &'static str) -> Self {
        self.with_include(Include::collection(path))
    }

    /// The accumulated includes, in first-request order.
    pub fn includes(&self) -> &[Include] {
        &self.includes
    }

    /// Executes this query against `set`.
    pub async fn fetch<S>(&self, set: &S) -> anyhow::Result<Vec<E>>
    where
        S: EntitySet<E> + ?Sized,
    {
        set.fetch(self).await
    }
}

impl<E> Default for SelectQuery<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for SelectQuery<E> {
    fn clone(&self) -> Self {
        Self {
            includes: self.includes.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> fmt::Debug for SelectQuery<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectQuery")
            .field("includes", &self.includes)
            .finish()
    }
}

/// Storage collaborator executing declarative queries for one entity type.
#[async_trait]
pub trait EntitySet<E>: Send + Sync {
    /// Loads a single entity by primary key, relations unloaded.
    async fn find(&self, id: i64) -> anyhow::Result<Option<E>>;

    /// Executes the query, materializing the requested includes.
    async fn fetch(&self, query: &SelectQuery<E>) -> anyhow::Result<Vec<E>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Order;

    #[test]
    fn includes_accumulate_in_request_order() {
        let query = SelectQuery::<Order>::new()
            .include_reference("customer")
            .include_collection("lines");

        assert_eq!(
            query.includes(),
            [Include::reference("customer"), Include::collection("lines")]
        );
    }

    #[test]
    fn duplicate_includes_are_collapsed() {
        let query = SelectQuery::<Order>::new()
            .include_reference("customer")
            .include_reference("customer");

        assert_eq!(query.includes().len(), 1);
    }
}
