//! Handler capability traits.
//!
//! One logical "hint handler" often carries both capabilities and is
//! registered under two dispatch keys: the same user intent ("eager-load
//! relation X when hint Y is active") has two mechanical realizations,
//! depending on whether the subject is a not-yet-executed query or an
//! already-materialized entity.

use async_trait::async_trait;

use crate::hint::Hint;

/// A pure transformation applied to a query-shaped subject when a hint of
/// type `H` is active.
///
/// Each application returns a new query value representing "the prior
/// query plus this hint's effect"; the subject is required to be
/// composable and append-only in that sense.
pub trait QueryHintHandler<S, H: Hint>: Send + Sync {
    /// Returns the query augmented with this hint's effect.
    fn handle(&self, query: S, hint: H) -> S;
}

impl<S, H, F> QueryHintHandler<S, H> for F
where
    H: Hint,
    F: Fn(S, H) -> S + Send + Sync,
{
    fn handle(&self, query: S, hint: H) -> S {
        self(query, hint)
    }
}

/// A side-effecting reaction applied to a materialized entity and its
/// originating data-access source when a hint of type `H` is active.
///
/// Implementations must support both the blocking and the asynchronous
/// path; callers choose which one to invoke. Handlers mutate the entity
/// in place and never substitute it — entity identity is caller-owned.
///
/// Failures are returned as the handler's own error, which the performer
/// propagates to the caller unchanged.
#[async_trait]
pub trait EntityHintHandler<E, S, H: Hint>: Send + Sync {
    /// Applies this hint's effect to the entity, blocking the caller.
    fn handle(&self, entity: &mut E, source: &S, hint: H) -> anyhow::Result<()>;

    /// Applies this hint's effect to the entity without blocking.
    async fn handle_async(&self, entity: &mut E, source: &S, hint: H) -> anyhow::Result<()>;
}
