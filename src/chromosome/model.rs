//! The genome interval model.

use crate::base::{ElementType, MutationType, TypeRegistry};
use crate::errors::ChromosomeError;
use std::collections::BTreeMap;

/// A contiguous, inclusive coordinate range `[start, end]` tagged with one
/// element type.
///
/// The coding flag is copied from the element type at insertion time so the
/// interval stays self-describing even if consulted without its element.
#[derive(Debug, Clone)]
pub struct GenomicInterval {
    start: usize,
    end: usize,
    element: ElementType,
    coding: bool,
}

impl GenomicInterval {
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of bases covered (inclusive range).
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false // an interval always covers at least one base
    }

    #[inline]
    pub fn element(&self) -> &ElementType {
        &self.element
    }

    #[inline]
    pub fn is_coding(&self) -> bool {
        self.coding
    }

    /// The simulator declaration for this interval.
    pub fn declaration(&self) -> String {
        format!(
            "initializeGenomicElement({}, {}, {});",
            self.element.name(),
            self.start,
            self.end
        )
    }
}

/// An ordered, non-overlapping partition of a linear coordinate space into
/// typed regions.
///
/// Constructed once through one of the strategies in this module
/// ([`standard`](crate::chromosome::standard), [`RandomChromosome`],
/// [`ExplicitChromosome`]) and read-only afterwards.
///
/// Invariants, enforced at insertion:
/// - intervals are sorted by start and never overlap;
/// - every end position is within `0..genome_length`;
/// - the mutation-type set is the identity-deduplicated union over all
///   element types used, in first-seen order.
///
/// [`RandomChromosome`]: crate::chromosome::RandomChromosome
/// [`ExplicitChromosome`]: crate::chromosome::ExplicitChromosome
#[derive(Debug)]
pub struct ChromosomeModel {
    genome_length: usize,
    intervals: BTreeMap<usize, GenomicInterval>,
    registry: TypeRegistry,
    nucleotides: bool,
}

impl ChromosomeModel {
    /// Create an empty model over a genome of `genome_length` bases.
    pub(crate) fn new(genome_length: usize, nucleotides: bool) -> Result<Self, ChromosomeError> {
        if genome_length == 0 {
            return Err(ChromosomeError::EmptyGenome);
        }
        Ok(Self {
            genome_length,
            intervals: BTreeMap::new(),
            registry: TypeRegistry::new(),
            nucleotides,
        })
    }

    /// Insert an interval, checking the ordering and bounds invariants.
    pub(crate) fn insert(
        &mut self,
        start: usize,
        end: usize,
        element: &ElementType,
    ) -> Result<(), ChromosomeError> {
        if end < start {
            return Err(ChromosomeError::InvertedRange { start, end });
        }
        if end > self.genome_length - 1 {
            return Err(ChromosomeError::OutOfBounds {
                start,
                end,
                genome_length: self.genome_length,
            });
        }
        if let Some((_, prev)) = self.intervals.range(..=start).next_back() {
            if prev.end >= start {
                return Err(ChromosomeError::Overlap {
                    start,
                    end,
                    other_start: prev.start,
                    other_end: prev.end,
                });
            }
        }
        if let Some((_, next)) = self.intervals.range(start..).next() {
            if next.start <= end {
                return Err(ChromosomeError::Overlap {
                    start,
                    end,
                    other_start: next.start,
                    other_end: next.end,
                });
            }
        }

        self.registry.register(element);
        self.intervals.insert(
            start,
            GenomicInterval {
                start,
                end,
                element: element.clone(),
                coding: element.is_coding(),
            },
        );
        Ok(())
    }

    #[inline]
    pub fn genome_length(&self) -> usize {
        self.genome_length
    }

    /// Whether declarations use the nucleotide-model calls.
    #[inline]
    pub fn nucleotides(&self) -> bool {
        self.nucleotides
    }

    /// Intervals in ascending start order.
    pub fn intervals(&self) -> impl Iterator<Item = &GenomicInterval> {
        self.intervals.values()
    }

    pub fn interval_count(&self) -> usize {
        self.intervals.len()
    }

    /// Deduplicated union of mutation types reachable from the intervals'
    /// element types, in first-seen order.
    #[inline]
    pub fn mutation_types(&self) -> &[MutationType] {
        self.registry.mutation_types()
    }

    /// Distinct element types used by the intervals, in first-seen order.
    #[inline]
    pub fn element_types(&self) -> &[ElementType] {
        self.registry.element_types()
    }

    /// Declarations for every mutation type, first-seen order.
    pub fn mutation_type_declarations(&self) -> Vec<String> {
        self.mutation_types()
            .iter()
            .map(|m| m.declaration(self.nucleotides))
            .collect()
    }

    /// Declarations for every element type, first-seen order.
    pub fn element_type_declarations(&self) -> Vec<String> {
        self.element_types().iter().map(|e| e.declaration()).collect()
    }

    /// Declarations for the coding intervals, in coordinate order.
    ///
    /// Non-coding intervals contribute no declaration; the simulator only
    /// needs regions where mutations can be drawn.
    pub fn interval_declarations(&self) -> Vec<String> {
        self.intervals()
            .filter(|iv| iv.is_coding())
            .map(|iv| iv.declaration())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{DefaultTypes, EffectDistribution};

    fn coding_element(name: &str) -> ElementType {
        let m = MutationType::new("m1", 0.5, EffectDistribution::neutral());
        ElementType::new(name, vec![(m, 1.0)], true)
    }

    #[test]
    fn test_empty_genome_rejected() {
        assert_eq!(
            ChromosomeModel::new(0, false).unwrap_err(),
            ChromosomeError::EmptyGenome
        );
    }

    #[test]
    fn test_insert_in_bounds() {
        let e = coding_element("g1");
        let mut model = ChromosomeModel::new(100, false).unwrap();
        model.insert(0, 99, &e).unwrap();
        assert_eq!(model.interval_count(), 1);
    }

    #[test]
    fn test_insert_out_of_bounds() {
        let e = coding_element("g1");
        let mut model = ChromosomeModel::new(100, false).unwrap();
        let err = model.insert(50, 100, &e).unwrap_err();
        assert!(matches!(err, ChromosomeError::OutOfBounds { .. }));
    }

    #[test]
    fn test_insert_inverted() {
        let e = coding_element("g1");
        let mut model = ChromosomeModel::new(100, false).unwrap();
        let err = model.insert(10, 5, &e).unwrap_err();
        assert!(matches!(err, ChromosomeError::InvertedRange { .. }));
    }

    #[test]
    fn test_overlap_with_preceding() {
        let e = coding_element("g1");
        let mut model = ChromosomeModel::new(100, false).unwrap();
        model.insert(0, 50, &e).unwrap();
        let err = model.insert(50, 60, &e).unwrap_err();
        assert!(matches!(err, ChromosomeError::Overlap { .. }));
    }

    #[test]
    fn test_overlap_with_following() {
        let e = coding_element("g1");
        let mut model = ChromosomeModel::new(100, false).unwrap();
        model.insert(40, 60, &e).unwrap();
        let err = model.insert(0, 45, &e).unwrap_err();
        assert!(matches!(err, ChromosomeError::Overlap { .. }));
    }

    #[test]
    fn test_adjacent_intervals_allowed() {
        let e = coding_element("g1");
        let mut model = ChromosomeModel::new(100, false).unwrap();
        model.insert(0, 49, &e).unwrap();
        model.insert(50, 99, &e).unwrap();
        assert_eq!(model.interval_count(), 2);
    }

    #[test]
    fn test_interval_declarations_skip_noncoding() {
        let defaults = DefaultTypes::new();
        let mut model = ChromosomeModel::new(10_001, false).unwrap();
        model.insert(0, 2000, &defaults.noncds).unwrap();
        model.insert(2001, 4000, &defaults.exon).unwrap();

        let decls = model.interval_declarations();
        assert_eq!(decls, vec!["initializeGenomicElement(g3, 2001, 4000);"]);
    }

    #[test]
    fn test_coding_flag_copied_at_insertion() {
        let defaults = DefaultTypes::new();
        let mut model = ChromosomeModel::new(100, false).unwrap();
        model.insert(0, 99, &defaults.exon).unwrap();
        let iv = model.intervals().next().unwrap();
        assert!(iv.is_coding());
        assert_eq!(iv.len(), 100);
    }
}
