//! Chromosome construction: an ordered, non-overlapping partition of a
//! linear coordinate space into typed genomic intervals.
//!
//! Three strategies produce a [`ChromosomeModel`]:
//! - [`standard`]: a fixed five-segment layout, mainly for test fixtures;
//! - [`RandomChromosome`]: a randomized generative process over exponential
//!   span lengths and Poisson intron counts;
//! - [`ExplicitChromosome`]: caller-supplied interval coordinates.

mod explicit;
mod model;
mod random;
mod standard;

pub use explicit::ExplicitChromosome;
pub use model::{ChromosomeModel, GenomicInterval};
pub use random::{RandomChromosome, MIN_SEGMENT_LEN};
pub use standard::{standard, standard_with, STANDARD_GENOME_LENGTH};
