//! Configuration-time registration sugar.

use std::sync::Arc;

use crate::handler::{EntityHintHandler, QueryHintHandler};
use crate::hint::Hint;
use crate::registry::HintHandlerRegistry;

/// Fluent accumulator for populating a [`HintHandlerRegistry`] before the
/// system starts serving operations.
///
/// No state beyond forwarding to the registry: every call maps directly
/// to an `add_*` registration, and [`build`](Self::build) hands the
/// populated registry out behind an `Arc` for sharing across operations.
#[derive(Default)]
pub struct HintRegistryBuilder {
    registry: HintHandlerRegistry,
}

impl HintRegistryBuilder {
    /// Creates a builder over an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a query handler under the `(S, H)` dispatch key.
    pub fn query_handler<S, H>(&mut self, handler: Arc<dyn QueryHintHandler<S, H>>) -> &mut Self
    where
        S: 'static,
        H: Hint,
    {
        self.registry.add_query_handler(handler);
        self
    }

    /// Registers an entity handler under the `(E, Src, H)` dispatch key.
    pub fn entity_handler<E, Src, H>(
        &mut self,
        handler: Arc<dyn EntityHintHandler<E, Src, H>>,
    ) -> &mut Self
    where
        E: Send + 'static,
        Src: Sync + 'static,
        H: Hint,
    {
        self.registry.add_entity_handler(handler);
        self
    }

    /// Direct access to the registry under construction, for extension
    /// traits that register one handler under several keys.
    pub fn registry_mut(&mut self) -> &mut HintHandlerRegistry {
        &mut self.registry
    }

    /// Finishes configuration and returns the shared registry.
    pub fn build(self) -> Arc<HintHandlerRegistry> {
        Arc::new(self.registry)
    }
}
