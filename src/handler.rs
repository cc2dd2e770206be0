//! One user intent, two mechanical realizations.
//!
//! [`IncludesHintHandler`] carries a single user-declared action ("when
//! this hint is active, include these relations") and realizes it both as
//! a query transformation and as loads against a materialized entity.
//! The same instance is meant to be registered under both dispatch keys;
//! see [`IncludesHandlerExt`](crate::configure::IncludesHandlerExt).

use async_trait::async_trait;
use ophint_core::{
    CollectedIncludes, EntityHintHandler, Hint, Include, Includes, QueryHintHandler,
};

use crate::query::SelectQuery;
use crate::relation::RelationSource;

/// Hint handler that applies user-declared includes either to a query or
/// to a loaded entity.
pub struct IncludesHintHandler<E, H> {
    action: Box<dyn Fn(H, &mut dyn Includes<E>) + Send + Sync>,
}

impl<E, H: Hint> IncludesHintHandler<E, H> {
    /// Wraps an includes action. The action receives the active hint and
    /// declares which relations it wants loaded.
    pub fn new(action: impl Fn(H, &mut dyn Includes<E>) + Send + Sync + 'static) -> Self {
        Self {
            action: Box::new(action),
        }
    }

    fn collect(&self, hint: H) -> Vec<Include> {
        let mut includes = CollectedIncludes::new();
        (self.action)(hint, &mut includes);
        includes.into_vec()
    }
}

impl<E, H> QueryHintHandler<SelectQuery<E>, H> for IncludesHintHandler<E, H>
where
    E: 'static,
    H: Hint,
{
    fn handle(&self, mut query: SelectQuery<E>, hint: H) -> SelectQuery<E> {
        for include in self.collect(hint) {
            query.add_include(include);
        }
        query
    }
}

#[async_trait]
impl<E, Src, H> EntityHintHandler<E, Src, H> for IncludesHintHandler<E, H>
where
    E: Send + 'static,
    Src: RelationSource<E> + 'static,
    H: Hint,
{
    fn handle(&self, entity: &mut E, source: &Src, hint: H) -> anyhow::Result<()> {
        for include in self.collect(hint) {
            source.load_relation(entity, &include)?;
        }
        Ok(())
    }

    async fn handle_async(&self, entity: &mut E, source: &Src, hint: H) -> anyhow::Result<()> {
        for include in self.collect(hint) {
            source.load_relation_async(entity, &include).await?;
        }
        Ok(())
    }
}
