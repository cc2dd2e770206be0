//! Active-hint storage for one logical operation.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};

use crate::hint::Hint;

/// Mutable set of active hints for one logical operation (e.g. one
/// request).
///
/// Hints of independently-defined enumeration types coexist in one
/// container: values are stored type-erased, bucketed by their `TypeId`.
/// The container has set semantics and no ordering beyond membership.
///
/// A container is owned by exactly one logical scope at a time. It is
/// mutated only by application code via [`add_hint`](Self::add_hint),
/// read-only from the performer's perspective, and discarded at the end
/// of the scope.
#[derive(Default)]
pub struct HintsContainer {
    sets: HashMap<TypeId, Box<dyn HintSet>>,
}

impl HintsContainer {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a hint into the active set.
    ///
    /// Adding the same hint value twice is idempotent. Any value of the
    /// hint type is accepted; values for which no handler is registered
    /// simply have no observable effect.
    pub fn add_hint<H: Hint>(&mut self, hint: H) {
        self.sets
            .entry(TypeId::of::<H>())
            .or_insert_with(|| Box::new(HashSet::<H>::new()))
            .as_any_mut()
            .downcast_mut::<HashSet<H>>()
            .expect("hint set stored under wrong TypeId")
            .insert(hint);
    }

    /// Pure membership test; never mutates.
    pub fn has_hint<H: Hint>(&self, hint: H) -> bool {
        self.sets
            .get(&TypeId::of::<H>())
            .and_then(|set| set.as_any().downcast_ref::<HashSet<H>>())
            .is_some_and(|set| set.contains(&hint))
    }

    /// Returns the number of active hints across all hint types.
    pub fn len(&self) -> usize {
        self.sets.values().map(|set| set.len()).sum()
    }

    /// True when no hint is active.
    pub fn is_empty(&self) -> bool {
        self.sets.values().all(|set| set.len() == 0)
    }

    /// Iterates the active hint types together with their erased value
    /// sets. Iteration order across hint types is unspecified.
    pub(crate) fn iter_types(&self) -> impl Iterator<Item = (TypeId, &dyn HintSet)> + '_ {
        self.sets.iter().map(|(ty, set)| (*ty, set.as_ref()))
    }
}

/// Type-erased storage for the active hints of one enumeration type.
pub(crate) trait HintSet: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn iter_erased(&self) -> Box<dyn Iterator<Item = &(dyn Any + Send + Sync)> + Send + '_>;
    fn len(&self) -> usize;
}

impl<H: Hint> HintSet for HashSet<H> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn iter_erased(&self) -> Box<dyn Iterator<Item = &(dyn Any + Send + Sync)> + Send + '_> {
        Box::new(self.iter().map(|hint| hint as &(dyn Any + Send + Sync)))
    }

    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum LoadHints {
        Profile,
        Posts,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum AuditHints {
        Touch,
    }

    #[test]
    fn add_hint_is_idempotent() {
        let mut container = HintsContainer::new();
        container.add_hint(LoadHints::Profile);
        container.add_hint(LoadHints::Profile);

        assert_eq!(container.len(), 1);
        assert!(container.has_hint(LoadHints::Profile));
    }

    #[test]
    fn has_hint_distinguishes_values() {
        let mut container = HintsContainer::new();
        container.add_hint(LoadHints::Profile);

        assert!(container.has_hint(LoadHints::Profile));
        assert!(!container.has_hint(LoadHints::Posts));
    }

    #[test]
    fn mixed_hint_vocabularies_coexist() {
        let mut container = HintsContainer::new();
        container.add_hint(LoadHints::Posts);
        container.add_hint(AuditHints::Touch);

        assert_eq!(container.len(), 2);
        assert!(container.has_hint(LoadHints::Posts));
        assert!(container.has_hint(AuditHints::Touch));
        assert!(!container.has_hint(LoadHints::Profile));
    }

    #[test]
    fn empty_container_reports_empty() {
        let container = HintsContainer::new();
        assert!(container.is_empty());
        assert_eq!(container.len(), 0);
        assert!(!container.has_hint(AuditHints::Touch));
    }
}
