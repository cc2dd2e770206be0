//! The eager-load boundary for materialized entities.

use std::future::Future;

use async_trait::async_trait;
use ophint_core::Include;

/// Translates abstract eager-load intents into loads against one entity.
///
/// Implemented per entity type by the application against its store; the
/// entity dispatch path hands every include requested by an active hint
/// to the source, one at a time.
///
/// Both paths must be supported. Backends whose driver is async-only can
/// bridge [`load_relation`](Self::load_relation) with [`block_on_load`],
/// which requires a multi-thread runtime.
#[async_trait]
pub trait RelationSource<E>: Send + Sync {
    /// Loads `include` into `entity`, blocking the caller.
    fn load_relation(&self, entity: &mut E, include: &Include) -> anyhow::Result<()>;

    /// Loads `include` into `entity` without blocking.
    async fn load_relation_async(&self, entity: &mut E, include: &Include) -> anyhow::Result<()>;
}

/// Drives an async load to completion on the blocking path.
///
/// Must be called from a multi-thread tokio runtime: the current worker
/// is moved to blocking mode for the duration of the load.
pub fn block_on_load<F>(load: F) -> anyhow::Result<()>
where
    F: Future<Output = anyhow::Result<()>>,
{
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(load))
}
