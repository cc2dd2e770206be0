//! Type-indexed handler storage and retrieval.
//!
//! The registry maps dispatch keys — `(Subject, Hint)` type pairs for
//! query handlers, `(Entity, Source, Hint)` type triples for entity
//! handlers — to ordered lists of handler instances. It is populated
//! during a single-threaded configuration phase and treated as immutable
//! afterward, so it can be shared across concurrent logical operations
//! without locking.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::handler::{EntityHintHandler, QueryHintHandler};
use crate::hint::Hint;

/// Bucket identity for query-shaped subjects: (subject type, hint type).
type QueryKey = (TypeId, TypeId);

/// Bucket identity for entity-shaped subjects: (entity, source, hint type).
type EntityKey = (TypeId, TypeId, TypeId);

/// Two `Arc`s denote the same handler instance when they share an
/// allocation. Compared as thin pointers; vtable identity is irrelevant.
fn same_instance<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    std::ptr::eq(Arc::as_ptr(a).cast::<()>(), Arc::as_ptr(b).cast::<()>())
}

/// Type-indexed store of hint handlers.
///
/// Registering a handler instance already present under the same dispatch
/// key is a no-op; registering the same instance under a different key is
/// independent and always allowed. Within one bucket, retrieval order is
/// registration order.
#[derive(Default)]
pub struct HintHandlerRegistry {
    query: HashMap<QueryKey, Box<dyn Any + Send + Sync>>,
    entity: HashMap<EntityKey, Box<dyn Any + Send + Sync>>,
}

impl HintHandlerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a query handler under the `(S, H)` dispatch key.
    pub fn add_query_handler<S, H>(&mut self, handler: Arc<dyn QueryHintHandler<S, H>>)
    where
        S: 'static,
        H: Hint,
    {
        let key = (TypeId::of::<S>(), TypeId::of::<H>());
        let slot = self.query.entry(key).or_insert_with(|| {
            let bucket: Box<dyn ErasedQueryBucket<S>> = Box::new(QueryBucket::<S, H>::new());
            let slot: Box<dyn Any + Send + Sync> = Box::new(bucket);
            slot
        });
        let bucket = slot
            .downcast_mut::<Box<dyn ErasedQueryBucket<S>>>()
            .and_then(|erased| erased.as_any_mut().downcast_mut::<QueryBucket<S, H>>())
            .expect("query bucket stored under wrong dispatch key");

        if bucket.handlers.iter().any(|known| same_instance(known, &handler)) {
            debug!(
                subject = type_name::<S>(),
                hint = type_name::<H>(),
                "duplicate query handler ignored"
            );
            return;
        }

        debug!(
            subject = type_name::<S>(),
            hint = type_name::<H>(),
            "query hint handler registered"
        );
        bucket.handlers.push(handler);
    }

    /// Registers an entity handler under the `(E, Src, H)` dispatch key.
    pub fn add_entity_handler<E, Src, H>(&mut self, handler: Arc<dyn EntityHintHandler<E, Src, H>>)
    where
        E: Send + 'static,
        Src: Sync + 'static,
        H: Hint,
    {
        let key = (TypeId::of::<E>(), TypeId::of::<Src>(), TypeId::of::<H>());
        let slot = self.entity.entry(key).or_insert_with(|| {
            let bucket: Box<dyn ErasedEntityBucket<E, Src>> =
                Box::new(EntityBucket::<E, Src, H>::new());
            let slot: Box<dyn Any + Send + Sync> = Box::new(bucket);
            slot
        });
        let bucket = slot
            .downcast_mut::<Box<dyn ErasedEntityBucket<E, Src>>>()
            .and_then(|erased| erased.as_any_mut().downcast_mut::<EntityBucket<E, Src, H>>())
            .expect("entity bucket stored under wrong dispatch key");

        if bucket.handlers.iter().any(|known| same_instance(known, &handler)) {
            debug!(
                entity = type_name::<E>(),
                source = type_name::<Src>(),
                hint = type_name::<H>(),
                "duplicate entity handler ignored"
            );
            return;
        }

        debug!(
            entity = type_name::<E>(),
            source = type_name::<Src>(),
            hint = type_name::<H>(),
            "entity hint handler registered"
        );
        bucket.handlers.push(handler);
    }

    /// Returns the query bucket for the `(S, H)` key in registration
    /// order, empty if nothing was registered. Never fails: absence of a
    /// registration is indistinguishable from "no hint applicable".
    pub fn query_handlers<S, H>(&self) -> &[Arc<dyn QueryHintHandler<S, H>>]
    where
        S: 'static,
        H: Hint,
    {
        self.query
            .get(&(TypeId::of::<S>(), TypeId::of::<H>()))
            .and_then(|slot| slot.downcast_ref::<Box<dyn ErasedQueryBucket<S>>>())
            .and_then(|erased| erased.as_any().downcast_ref::<QueryBucket<S, H>>())
            .map(|bucket| bucket.handlers.as_slice())
            .unwrap_or(&[])
    }

    /// Returns the entity bucket for the `(E, Src, H)` key; symmetric to
    /// [`query_handlers`](Self::query_handlers).
    pub fn entity_handlers<E, Src, H>(&self) -> &[Arc<dyn EntityHintHandler<E, Src, H>>]
    where
        E: Send + 'static,
        Src: Sync + 'static,
        H: Hint,
    {
        self.entity
            .get(&(TypeId::of::<E>(), TypeId::of::<Src>(), TypeId::of::<H>()))
            .and_then(|slot| slot.downcast_ref::<Box<dyn ErasedEntityBucket<E, Src>>>())
            .and_then(|erased| erased.as_any().downcast_ref::<EntityBucket<E, Src, H>>())
            .map(|bucket| bucket.handlers.as_slice())
            .unwrap_or(&[])
    }

    /// Looks up the subject-typed query bucket for a runtime hint type.
    pub(crate) fn query_bucket<S: 'static>(
        &self,
        hint_type: TypeId,
    ) -> Option<&dyn ErasedQueryBucket<S>> {
        self.query
            .get(&(TypeId::of::<S>(), hint_type))
            .and_then(|slot| slot.downcast_ref::<Box<dyn ErasedQueryBucket<S>>>())
            .map(|erased| erased.as_ref())
    }

    /// Looks up the entity/source-typed bucket for a runtime hint type.
    pub(crate) fn entity_bucket<E: 'static, Src: 'static>(
        &self,
        hint_type: TypeId,
    ) -> Option<&dyn ErasedEntityBucket<E, Src>> {
        self.entity
            .get(&(TypeId::of::<E>(), TypeId::of::<Src>(), hint_type))
            .and_then(|slot| slot.downcast_ref::<Box<dyn ErasedEntityBucket<E, Src>>>())
            .map(|erased| erased.as_ref())
    }
}

/// One registry bucket for query dispatch, fixed to a subject and hint
/// type at registration time.
struct QueryBucket<S, H> {
    handlers: Vec<Arc<dyn QueryHintHandler<S, H>>>,
}

impl<S, H> QueryBucket<S, H> {
    fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

/// Subject-typed view of a query bucket with the hint type erased, so the
/// performer can dispatch on hint types discovered at runtime.
pub(crate) trait ErasedQueryBucket<S>: Send + Sync {
    /// Left-folds every registered handler over the query for one hint
    /// value, in registration order.
    fn apply(&self, query: S, hint: &(dyn Any + Send + Sync)) -> S;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<S, H> ErasedQueryBucket<S> for QueryBucket<S, H>
where
    S: 'static,
    H: Hint,
{
    fn apply(&self, mut query: S, hint: &(dyn Any + Send + Sync)) -> S {
        let hint = *hint
            .downcast_ref::<H>()
            .expect("hint value stored under wrong TypeId");
        for handler in &self.handlers {
            query = handler.handle(query, hint);
        }
        query
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// One registry bucket for entity dispatch.
struct EntityBucket<E, Src, H> {
    handlers: Vec<Arc<dyn EntityHintHandler<E, Src, H>>>,
}

impl<E, Src, H> EntityBucket<E, Src, H> {
    fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

/// Entity/source-typed view of an entity bucket with the hint type
/// erased; see [`ErasedQueryBucket`].
#[async_trait]
pub(crate) trait ErasedEntityBucket<E, Src>: Send + Sync {
    /// Invokes every registered handler for one hint value, blocking.
    fn apply(
        &self,
        entity: &mut E,
        source: &Src,
        hint: &(dyn Any + Send + Sync),
    ) -> anyhow::Result<()>;

    /// Invokes every registered handler for one hint value, awaited.
    async fn apply_async(
        &self,
        entity: &mut E,
        source: &Src,
        hint: &(dyn Any + Send + Sync),
    ) -> anyhow::Result<()>;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

#[async_trait]
impl<E, Src, H> ErasedEntityBucket<E, Src> for EntityBucket<E, Src, H>
where
    E: Send + 'static,
    Src: Sync + 'static,
    H: Hint,
{
    fn apply(
        &self,
        entity: &mut E,
        source: &Src,
        hint: &(dyn Any + Send + Sync),
    ) -> anyhow::Result<()> {
        let hint = *hint
            .downcast_ref::<H>()
            .expect("hint value stored under wrong TypeId");
        for handler in &self.handlers {
            handler.handle(entity, source, hint)?;
        }
        Ok(())
    }

    async fn apply_async(
        &self,
        entity: &mut E,
        source: &Src,
        hint: &(dyn Any + Send + Sync),
    ) -> anyhow::Result<()> {
        let hint = *hint
            .downcast_ref::<H>()
            .expect("hint value stored under wrong TypeId");
        for handler in &self.handlers {
            handler.handle_async(entity, source, hint).await?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
