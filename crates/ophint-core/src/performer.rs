//! Hint dispatch against queries and entities.

use std::any::type_name;
use std::sync::Arc;

use tracing::trace;

use crate::container::HintsContainer;
use crate::hint::Hint;
use crate::registry::HintHandlerRegistry;

/// Per-operation orchestrator: resolves the handlers matching the active
/// hints and applies them to a query or an entity.
///
/// A performer owns the scope's [`HintsContainer`] and shares the
/// process-wide [`HintHandlerRegistry`]. Construct one per logical
/// operation; the registry `Arc` is cheap to clone.
pub struct HintPerformer {
    registry: Arc<HintHandlerRegistry>,
    container: HintsContainer,
}

impl HintPerformer {
    /// Creates a performer with an empty active-hint set.
    pub fn new(registry: Arc<HintHandlerRegistry>) -> Self {
        Self {
            registry,
            container: HintsContainer::new(),
        }
    }

    /// Activates a hint for this operation. Forwards to the container;
    /// idempotent.
    pub fn add_hint<H: Hint>(&mut self, hint: H) {
        self.container.add_hint(hint);
    }

    /// True when the hint is active in this operation.
    pub fn has_hint<H: Hint>(&self, hint: H) -> bool {
        self.container.has_hint(hint)
    }

    /// The operation's active-hint set.
    pub fn container(&self) -> &HintsContainer {
        &self.container
    }

    /// Mutable access to the operation's active-hint set.
    pub fn container_mut(&mut self) -> &mut HintsContainer {
        &mut self.container
    }

    /// Applies every matching query handler to `query`, left-folding each
    /// handler's output into the next application.
    ///
    /// The subject type is the type argument at the call site. For each
    /// active hint whose type has registrations under `(S, HintType)`,
    /// registered handlers run in registration order. Application order
    /// across different hint types (and across multiple active values of
    /// one hint type) is unspecified.
    ///
    /// With no matching hint the original value is returned unchanged.
    pub fn perform<S: 'static>(&self, query: S) -> S {
        if self.container.is_empty() {
            return query;
        }

        trace!(subject = type_name::<S>(), "performing query hints");
        let mut query = query;
        for (hint_type, set) in self.container.iter_types() {
            let Some(bucket) = self.registry.query_bucket::<S>(hint_type) else {
                continue;
            };
            for hint in set.iter_erased() {
                query = bucket.apply(query, hint);
            }
        }
        query
    }

    /// Invokes every matching entity handler's blocking path with the
    /// entity, its source, and the active hint.
    ///
    /// Side-effecting only: handlers mutate the entity in place and never
    /// substitute it. With no matching hint this is a no-op. A handler
    /// failure is returned unchanged and stops further dispatch.
    pub fn perform_entity<E, Src>(&self, entity: &mut E, source: &Src) -> anyhow::Result<()>
    where
        E: Send + 'static,
        Src: Sync + 'static,
    {
        if self.container.is_empty() {
            return Ok(());
        }

        trace!(
            entity = type_name::<E>(),
            source = type_name::<Src>(),
            "performing entity hints"
        );
        for (hint_type, set) in self.container.iter_types() {
            let Some(bucket) = self.registry.entity_bucket::<E, Src>(hint_type) else {
                continue;
            };
            for hint in set.iter_erased() {
                bucket.apply(entity, source, hint)?;
            }
        }
        Ok(())
    }

    /// Asynchronous twin of [`perform_entity`](Self::perform_entity):
    /// awaits every matching handler's non-blocking path.
    pub async fn perform_entity_async<E, Src>(
        &self,
        entity: &mut E,
        source: &Src,
    ) -> anyhow::Result<()>
    where
        E: Send + 'static,
        Src: Sync + 'static,
    {
        if self.container.is_empty() {
            return Ok(());
        }

        trace!(
            entity = type_name::<E>(),
            source = type_name::<Src>(),
            "performing entity hints"
        );
        for (hint_type, set) in self.container.iter_types() {
            let Some(bucket) = self.registry.entity_bucket::<E, Src>(hint_type) else {
                continue;
            };
            for hint in set.iter_erased() {
                bucket.apply_async(entity, source, hint).await?;
            }
        }
        Ok(())
    }
}
