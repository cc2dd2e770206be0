//! Repository convenience wiring the performer into data access.

use std::marker::PhantomData;
use std::sync::Arc;

use ophint_core::HintPerformer;

use crate::query::{EntitySet, SelectQuery};
use crate::relation::RelationSource;

/// Data-access facade that applies the operation's active hints on every
/// read: queries go through the performer's query dispatch before
/// execution, single-entity loads go through entity dispatch afterward.
pub struct Repository<E, S> {
    source: Arc<S>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, S> Repository<E, S>
where
    E: Send + 'static,
    S: EntitySet<E> + RelationSource<E> + 'static,
{
    /// Creates a repository over a shared source.
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            _entity: PhantomData,
        }
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// A query over all entities, augmented by the active hints.
    pub fn query(&self, performer: &HintPerformer) -> SelectQuery<E> {
        performer.perform(SelectQuery::new())
    }

    /// Executes the hint-augmented query.
    pub async fn fetch(&self, performer: &HintPerformer) -> anyhow::Result<Vec<E>> {
        self.source.fetch(&self.query(performer)).await
    }

    /// Loads one entity by primary key, then applies the active hints to
    /// the loaded entity. Returns `None` when the key does not exist.
    pub async fn find(&self, id: i64, performer: &HintPerformer) -> anyhow::Result<Option<E>> {
        let Some(mut entity) = self.source.find(id).await? else {
            return Ok(None);
        };
        performer
            .perform_entity_async(&mut entity, self.source.as_ref())
            .await?;
        Ok(Some(entity))
    }
}

impl<E, S> Clone for Repository<E, S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            _entity: PhantomData,
        }
    }
}
