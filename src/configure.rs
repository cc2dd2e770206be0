//! Configuration entry points.
//!
//! The registry is built once during startup and shared behind an `Arc`
//! (singleton scope); performers are constructed per logical operation
//! (operation scope) with `HintPerformer::new(registry.clone())`. There
//! is no runtime configuration beyond the registration calls.

use std::sync::Arc;

use ophint_core::{Hint, HintHandlerRegistry, HintRegistryBuilder, Includes};

use crate::handler::IncludesHintHandler;
use crate::query::SelectQuery;
use crate::relation::RelationSource;

/// Runs the configuration action against a fresh builder and returns the
/// populated registry, ready to share across operations.
pub fn configure_hints(
    configure: impl FnOnce(&mut HintRegistryBuilder),
) -> Arc<HintHandlerRegistry> {
    let mut builder = HintRegistryBuilder::new();
    configure(&mut builder);
    builder.build()
}

/// Registration sugar for includes-driven handlers.
pub trait IncludesHandlerExt {
    /// Registers one includes action under both dispatch keys: as a query
    /// handler for `SelectQuery<E>` and as an entity handler for
    /// `(E, Src)`. The two registrations share one handler instance.
    fn includes_handler<E, Src, H>(
        &mut self,
        action: impl Fn(H, &mut dyn Includes<E>) + Send + Sync + 'static,
    ) -> &mut Self
    where
        E: Send + 'static,
        Src: RelationSource<E> + 'static,
        H: Hint;
}

impl IncludesHandlerExt for HintRegistryBuilder {
    fn includes_handler<E, Src, H>(
        &mut self,
        action: impl Fn(H, &mut dyn Includes<E>) + Send + Sync + 'static,
    ) -> &mut Self
    where
        E: Send + 'static,
        Src: RelationSource<E> + 'static,
        H: Hint,
    {
        let handler = Arc::new(IncludesHintHandler::new(action));
        self.registry_mut()
            .add_query_handler::<SelectQuery<E>, H>(handler.clone());
        self.registry_mut().add_entity_handler::<E, Src, H>(handler);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ophint_core::Include;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[allow(dead_code)]
    enum OrderHints {
        WithCustomer,
    }

    #[derive(Debug, Default)]
    struct Order {
        customer: Option<String>,
    }

    struct MemoryOrders;

    #[async_trait]
    impl RelationSource<Order> for MemoryOrders {
        fn load_relation(&self, entity: &mut Order, _include: &Include) -> anyhow::Result<()> {
            entity.customer = Some("acme".to_string());
            Ok(())
        }

        async fn load_relation_async(
            &self,
            entity: &mut Order,
            include: &Include,
        ) -> anyhow::Result<()> {
            self.load_relation(entity, include)
        }
    }

    #[test]
    fn one_action_lands_in_both_buckets() {
        let registry = configure_hints(|builder| {
            builder.includes_handler::<Order, MemoryOrders, OrderHints>(|_hint, includes| {
                includes.include_reference("customer");
            });
        });

        assert_eq!(
            registry
                .query_handlers::<SelectQuery<Order>, OrderHints>()
                .len(),
            1
        );
        assert_eq!(
            registry
                .entity_handlers::<Order, MemoryOrders, OrderHints>()
                .len(),
            1
        );
    }
}
