//! Element types: named categories of genomic region.

use crate::base::{fmt_float, MutationType};
use std::fmt;
use std::sync::Arc;

#[derive(Debug)]
struct ElementTypeData {
    name: String,
    mutations: Vec<(MutationType, f64)>,
    coding: bool,
}

/// A named category of genomic region, defined by a weighted set of mutation
/// types and a coding flag.
///
/// Weights are relative draw probabilities and need not sum to 1. Like
/// [`MutationType`], clones share identity; reusing one instance across
/// intervals is what makes its declaration emitted once.
#[derive(Debug, Clone)]
pub struct ElementType {
    inner: Arc<ElementTypeData>,
}

impl ElementType {
    /// Create an element type from (mutation type, relative weight) pairs.
    pub fn new(
        name: impl Into<String>,
        mutations: Vec<(MutationType, f64)>,
        coding: bool,
    ) -> Self {
        Self {
            inner: Arc::new(ElementTypeData {
                name: name.into(),
                mutations,
                coding,
            }),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Mutation types drawn in this element, in declared order.
    #[inline]
    pub fn mutations(&self) -> &[(MutationType, f64)] {
        &self.inner.mutations
    }

    #[inline]
    pub fn is_coding(&self) -> bool {
        self.inner.coding
    }

    /// Identity comparison: true only for clones of the same construction.
    #[inline]
    pub fn same_type(&self, other: &ElementType) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// The simulator declaration for this type.
    pub fn declaration(&self) -> String {
        let names = self
            .mutations()
            .iter()
            .map(|(m, _)| m.name().to_string())
            .collect::<Vec<_>>()
            .join(",");
        let weights = self
            .mutations()
            .iter()
            .map(|(_, w)| fmt_float(*w))
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "initializeGenomicElementType(\"{}\", c({names}), c({weights}));",
            self.name()
        )
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
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
    fn test_declaration() {
        let m1 = mtype("m1");
        let m2 = mtype("m2");
        let e = ElementType::new("g1", vec![(m1, 3.0), (m2, 3.0)], true);
        assert_eq!(
            e.declaration(),
            "initializeGenomicElementType(\"g1\", c(m1,m2), c(3.0,3.0));"
        );
    }

    #[test]
    fn test_identity() {
        let e = ElementType::new("g1", vec![(mtype("m1"), 1.0)], true);
        assert!(e.same_type(&e.clone()));

        let f = ElementType::new("g1", vec![(mtype("m1"), 1.0)], true);
        assert!(!e.same_type(&f));
    }

    #[test]
    fn test_mutation_order_preserved() {
        let m1 = mtype("m1");
        let m2 = mtype("m2");
        let e = ElementType::new("g2", vec![(m2.clone(), 5.0), (m1.clone(), 1.0)], false);
        assert_eq!(e.mutations()[0].0.name(), "m2");
        assert_eq!(e.mutations()[1].0.name(), "m1");
        assert!(!e.is_coding());
    }
}
