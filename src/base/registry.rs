//! Identity-deduplicated registries of mutation and element types.

use crate::base::{ElementType, MutationType};

/// Accumulates the distinct mutation and element types reachable from a set
/// of registered element types, in first-seen order.
///
/// Deduplication is by identity, not name: two types constructed separately
/// under the same name are kept as distinct entries, while clones of one
/// instance collapse to a single entry. Callers that want merging must reuse
/// instances.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    elements: Vec<ElementType>,
    mutations: Vec<MutationType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element type, folding its mutation types into the
    /// deduplicated union. Re-registering the same instance is a no-op.
    pub fn register(&mut self, element: &ElementType) {
        if !self.elements.iter().any(|e| e.same_type(element)) {
            self.elements.push(element.clone());
        }
        for (mutation, _) in element.mutations() {
            if !self.mutations.iter().any(|m| m.same_type(mutation)) {
                self.mutations.push(mutation.clone());
            }
        }
    }

    /// Distinct element types, in first-seen order.
    #[inline]
    pub fn element_types(&self) -> &[ElementType] {
        &self.elements
    }

    /// Deduplicated union of mutation types, in first-seen order.
    #[inline]
    pub fn mutation_types(&self) -> &[MutationType] {
        &self.mutations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::EffectDistribution;

    fn mtype(name: &str) -> MutationType {
        MutationType::new(name, 0.5, EffectDistribution::neutral())
    }

    #[test]
    fn test_register_dedup_is_idempotent() {
        let m1 = mtype("m1");
        let e = ElementType::new("g1", vec![(m1, 1.0)], true);

        let mut registry = TypeRegistry::new();
        registry.register(&e);
        let after_first: Vec<String> =
            registry.mutation_types().iter().map(|m| m.name().to_string()).collect();

        registry.register(&e);
        let after_second: Vec<String> =
            registry.mutation_types().iter().map(|m| m.name().to_string()).collect();

        assert_eq!(after_first, after_second);
        assert_eq!(registry.element_types().len(), 1);
    }

    #[test]
    fn test_shared_mutation_registered_once() {
        let shared = mtype("m1");
        let e1 = ElementType::new("g1", vec![(shared.clone(), 1.0)], true);
        let e2 = ElementType::new("g2", vec![(shared.clone(), 2.0)], false);

        let mut registry = TypeRegistry::new();
        registry.register(&e1);
        registry.register(&e2);

        assert_eq!(registry.mutation_types().len(), 1);
        assert_eq!(registry.element_types().len(), 2);
    }

    #[test]
    fn test_same_name_distinct_instances_kept() {
        let a = mtype("m1");
        let b = mtype("m1");
        let e = ElementType::new("g1", vec![(a, 1.0), (b, 1.0)], true);

        let mut registry = TypeRegistry::new();
        registry.register(&e);

        assert_eq!(registry.mutation_types().len(), 2);
    }

    #[test]
    fn test_first_seen_order() {
        let m1 = mtype("m1");
        let m2 = mtype("m2");
        let m3 = mtype("m3");
        let e1 = ElementType::new("g1", vec![(m2.clone(), 1.0), (m1.clone(), 1.0)], true);
        let e2 = ElementType::new("g2", vec![(m3.clone(), 1.0), (m1.clone(), 1.0)], true);

        let mut registry = TypeRegistry::new();
        registry.register(&e1);
        registry.register(&e2);

        let names: Vec<&str> = registry.mutation_types().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["m2", "m1", "m3"]);
    }
}
