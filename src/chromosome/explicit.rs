//! Explicit chromosome construction from caller-supplied intervals.

use crate::base::ElementType;
use crate::chromosome::ChromosomeModel;
use crate::errors::{BuildError, ChromosomeError, ConfigError};
use std::collections::BTreeMap;

/// Builder for the explicit strategy: a mapping of `(start, end)` coordinate
/// pairs to element types.
///
/// A region with no element type is a deliberate gap: it emits no interval
/// but still counts toward the genome length when it extends the maximum end.
/// Unless overridden, the genome length is `1 + max(end)` over all regions.
/// Overlapping regions are a caller error and are rejected.
#[derive(Debug, Clone, Default)]
pub struct ExplicitChromosome {
    regions: BTreeMap<(usize, usize), Option<ElementType>>,
    genome_length: Option<usize>,
    nucleotides: bool,
}

impl ExplicitChromosome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `[start, end]` (inclusive) to an element type.
    pub fn region(mut self, start: usize, end: usize, element: ElementType) -> Self {
        self.regions.insert((start, end), Some(element));
        self
    }

    /// Mark `[start, end]` as a deliberate gap.
    pub fn gap(mut self, start: usize, end: usize) -> Self {
        self.regions.insert((start, end), None);
        self
    }

    /// Override the derived genome length.
    pub fn genome_length(mut self, genome_length: usize) -> Self {
        self.genome_length = Some(genome_length);
        self
    }

    /// Emit nucleotide-model declarations.
    pub fn nucleotides(mut self, nucleotides: bool) -> Self {
        self.nucleotides = nucleotides;
        self
    }

    /// Build the model, validating every key and detecting overlap.
    pub fn build(self) -> Result<ChromosomeModel, BuildError> {
        if self.regions.is_empty() && self.genome_length.is_none() {
            return Err(ConfigError::MissingRequired("at least one region or a genome length")
                .into());
        }
        for &(start, end) in self.regions.keys() {
            if end < start {
                return Err(ChromosomeError::InvertedRange { start, end }.into());
            }
        }

        let max_end = self.regions.keys().map(|&(_, end)| end).max();
        let genome_length = match (self.genome_length, max_end) {
            (Some(len), _) => len,
            (None, Some(end)) => end + 1,
            (None, None) => 0,
        };

        let mut model = ChromosomeModel::new(genome_length, self.nucleotides)?;
        // BTreeMap iteration is ordered by start, so overlap against the
        // preceding interval is caught by the model's insert checks.
        for ((start, end), element) in &self.regions {
            if let Some(element) = element {
                model.insert(*start, *end, element)?;
            }
        }
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{DefaultTypes, EffectDistribution, MutationType};

    #[test]
    fn test_single_region_round_trip() {
        let m1 = MutationType::new("m1", 0.5, EffectDistribution::neutral());
        let m2 = MutationType::new("m2", 0.5, EffectDistribution::neutral());
        let t = ElementType::new("g1", vec![(m1, 1.0), (m2, 2.0)], true);

        let model = ExplicitChromosome::new().region(0, 1000, t.clone()).build().unwrap();

        assert_eq!(model.genome_length(), 1001);
        assert_eq!(model.interval_count(), 1);
        let iv = model.intervals().next().unwrap();
        assert_eq!((iv.start(), iv.end()), (0, 1000));
        assert!(iv.element().same_type(&t));

        let names: Vec<&str> = model.mutation_types().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["m1", "m2"]);
    }

    #[test]
    fn test_gap_extends_genome_but_emits_nothing() {
        let defaults = DefaultTypes::new();
        let model = ExplicitChromosome::new()
            .region(500, 1000, defaults.exon.clone())
            .gap(5000, 10_000)
            .build()
            .unwrap();

        assert_eq!(model.genome_length(), 10_001);
        assert_eq!(model.interval_count(), 1);
    }

    #[test]
    fn test_overlap_rejected() {
        let defaults = DefaultTypes::new();
        let result = ExplicitChromosome::new()
            .region(0, 1000, defaults.exon.clone())
            .region(1000, 2000, defaults.intron.clone())
            .build();
        assert!(matches!(
            result,
            Err(BuildError::Chromosome(ChromosomeError::Overlap { .. }))
        ));
    }

    #[test]
    fn test_inverted_key_rejected() {
        let defaults = DefaultTypes::new();
        let result = ExplicitChromosome::new().region(100, 50, defaults.exon.clone()).build();
        assert!(matches!(
            result,
            Err(BuildError::Chromosome(ChromosomeError::InvertedRange { .. }))
        ));
    }

    #[test]
    fn test_inverted_gap_rejected() {
        let result = ExplicitChromosome::new().gap(100, 50).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_length_override() {
        let defaults = DefaultTypes::new();
        let model = ExplicitChromosome::new()
            .region(0, 1000, defaults.exon.clone())
            .genome_length(50_000)
            .build()
            .unwrap();
        assert_eq!(model.genome_length(), 50_000);
    }

    #[test]
    fn test_empty_builder_rejected() {
        assert!(ExplicitChromosome::new().build().is_err());
    }

    #[test]
    fn test_out_of_bounds_with_override_rejected() {
        let defaults = DefaultTypes::new();
        let result = ExplicitChromosome::new()
            .region(0, 1000, defaults.exon.clone())
            .genome_length(500)
            .build();
        assert!(matches!(
            result,
            Err(BuildError::Chromosome(ChromosomeError::OutOfBounds { .. }))
        ));
    }
}
