//! Random generative chromosome construction.
//!
//! Alternates exponentially distributed non-coding spans with coding regions
//! whose intron count is Poisson distributed and whose internal segmentation
//! is a Dirichlet partition, mirroring the broad architecture of real
//! eukaryotic genomes.

use crate::base::{DefaultTypes, ElementType};
use crate::chromosome::ChromosomeModel;
use crate::errors::{BuildError, ConfigError};
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Exp1, Poisson};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Exon and intron segments must be longer than this many bases, to keep
/// exon lengths codon-aligned.
pub const MIN_SEGMENT_LEN: usize = 4;

/// Builder for the random generative strategy.
///
/// Each of the three element pools may hold one type or several; a pool with
/// several types has one chosen uniformly at each use. The generator is owned
/// by the build and seedable: the same seed produces a byte-identical
/// interval sequence.
#[derive(Debug, Clone)]
pub struct RandomChromosome {
    genome_length: usize,
    intron: Vec<ElementType>,
    exon: Vec<ElementType>,
    noncds: Vec<ElementType>,
    noncds_scale: f64,
    cds_scale: f64,
    intron_scale: f64,
    nucleotides: bool,
    seed: Option<u64>,
}

impl RandomChromosome {
    /// Start a builder over a genome of `genome_length` bases, with the stock
    /// element types in every pool.
    pub fn new(genome_length: usize) -> Self {
        let defaults = DefaultTypes::new();
        Self {
            genome_length,
            intron: vec![defaults.intron],
            exon: vec![defaults.exon],
            noncds: vec![defaults.noncds],
            noncds_scale: 5000.0,
            cds_scale: 1000.0,
            intron_scale: 1000.0,
            nucleotides: false,
            seed: None,
        }
    }

    /// Use a single intron element type.
    pub fn intron(mut self, element: ElementType) -> Self {
        self.intron = vec![element];
        self
    }

    /// Use a pool of intron element types, drawn uniformly at each use.
    pub fn intron_pool(mut self, pool: Vec<ElementType>) -> Self {
        self.intron = pool;
        self
    }

    /// Use a single exon element type.
    pub fn exon(mut self, element: ElementType) -> Self {
        self.exon = vec![element];
        self
    }

    /// Use a pool of exon element types, drawn uniformly at each use.
    pub fn exon_pool(mut self, pool: Vec<ElementType>) -> Self {
        self.exon = pool;
        self
    }

    /// Use a single non-coding element type.
    pub fn noncds(mut self, element: ElementType) -> Self {
        self.noncds = vec![element];
        self
    }

    /// Use a pool of non-coding element types, drawn uniformly at each use.
    pub fn noncds_pool(mut self, pool: Vec<ElementType>) -> Self {
        self.noncds = pool;
        self
    }

    /// Set the three scale parameters: mean non-coding span, mean coding
    /// region length, and mean bases per intron within a coding region.
    pub fn scales(mut self, noncds_scale: f64, cds_scale: f64, intron_scale: f64) -> Self {
        self.noncds_scale = noncds_scale;
        self.cds_scale = cds_scale;
        self.intron_scale = intron_scale;
        self
    }

    /// Emit nucleotide-model declarations.
    pub fn nucleotides(mut self, nucleotides: bool) -> Self {
        self.nucleotides = nucleotides;
        self
    }

    /// Set the random seed for reproducibility (default: seeded from entropy).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("noncds_scale", self.noncds_scale),
            ("cds_scale", self.cds_scale),
            ("intron_scale", self.intron_scale),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidParameter {
                    name,
                    value,
                    expected: "a positive, finite number of bases",
                });
            }
        }
        for (name, pool) in [
            ("intron", &self.intron),
            ("exon", &self.exon),
            ("noncds", &self.noncds),
        ] {
            if pool.is_empty() {
                return Err(ConfigError::InvalidParameter {
                    name,
                    value: 0.0,
                    expected: "a pool with at least one element type",
                });
            }
        }
        Ok(())
    }

    /// Generate the chromosome.
    ///
    /// Scale parameters are validated before any sampling. The loop stops as
    /// soon as a drawn coding region would extend past the genome end; that
    /// region is discarded, so only fully in-bounds intervals are retained.
    /// The one clipping rule: a trailing non-coding span is clipped to the
    /// genome length rather than rejected.
    pub fn build(self) -> Result<ChromosomeModel, BuildError> {
        self.validate()?;
        let mut model = ChromosomeModel::new(self.genome_length, self.nucleotides)?;

        let mut rng = match self.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_seed(rand::rng().random()),
        };

        let invalid_scale = |name: &'static str, value: f64| ConfigError::InvalidParameter {
            name,
            value,
            expected: "a positive, finite number of bases",
        };
        let noncds_dist = Exp::new(1.0 / self.noncds_scale)
            .map_err(|_| invalid_scale("noncds_scale", self.noncds_scale))?;
        let cds_dist = Exp::new(1.0 / self.cds_scale)
            .map_err(|_| invalid_scale("cds_scale", self.cds_scale))?;

        let last = self.genome_length - 1;
        let mut cursor = 0usize;

        loop {
            // Non-coding span first; clipped at the genome end.
            let span = noncds_dist.sample(&mut rng) as usize;
            let end = (cursor + span).min(last);
            if cursor + span > last {
                log::debug!("trailing non-coding span clipped at position {last}");
            }
            model.insert(cursor, end, pick(&self.noncds, &mut rng))?;
            cursor = end + 1;
            if cursor > last {
                break;
            }

            // Coding region: exon/intron alternation from a Dirichlet split.
            let segments = self.cds_segments(&mut rng, &cds_dist);
            let total: usize = segments.iter().sum();
            if total == 0 {
                continue;
            }
            if cursor + total > self.genome_length {
                // Would run past the end: discard the whole region.
                break;
            }
            for (index, segment) in segments.iter().enumerate() {
                let pool = if index % 2 == 0 { &self.exon } else { &self.intron };
                model.insert(cursor, cursor + segment - 1, pick(pool, &mut rng))?;
                cursor += segment;
            }
            if cursor > last {
                break;
            }
        }

        Ok(model)
    }

    /// Draw the segment lengths of one coding region: a single exon when the
    /// Poisson intron count is zero, otherwise `2 * introns + 1` alternating
    /// exon/intron segments, each above [`MIN_SEGMENT_LEN`].
    fn cds_segments(&self, rng: &mut Xoshiro256PlusPlus, cds_dist: &Exp<f64>) -> Vec<usize> {
        let cds_len = cds_dist.sample(rng) as usize;
        if cds_len == 0 {
            return Vec::new();
        }

        let lambda = cds_len as f64 / self.intron_scale;
        // lambda is positive here; a construction failure cannot occur with
        // validated scales, so fall back to the intron-free case.
        let n_introns = match Poisson::new(lambda) {
            Ok(dist) => {
                let draw: f64 = dist.sample(rng);
                draw as usize
            }
            Err(_) => 0,
        };
        if n_introns == 0 {
            return vec![cds_len];
        }

        // Clamp the intron count to what the segment floor can accommodate,
        // otherwise rejection sampling below could never terminate.
        let max_parts = cds_len / MIN_SEGMENT_LEN;
        if max_parts < 3 {
            return vec![cds_len];
        }
        let n_introns = n_introns.min((max_parts - 1) / 2);
        let parts = 2 * n_introns + 1;

        dirichlet_split(rng, parts, cds_len)
    }
}

/// Choose uniformly from a pool; a single-type pool always yields that type.
fn pick<'a>(pool: &'a [ElementType], rng: &mut Xoshiro256PlusPlus) -> &'a ElementType {
    if pool.len() == 1 {
        &pool[0]
    } else {
        &pool[rng.random_range(0..pool.len())]
    }
}

/// Partition `total` into `parts` integer segments via a symmetric Dirichlet
/// draw (normalized unit exponentials), re-drawing until every segment clears
/// the minimum floor. The final segment absorbs the rounding remainder.
fn dirichlet_split(rng: &mut Xoshiro256PlusPlus, parts: usize, total: usize) -> Vec<usize> {
    debug_assert!(total >= parts * MIN_SEGMENT_LEN);
    loop {
        let draws: Vec<f64> = (0..parts).map(|_| rng.sample(Exp1)).collect();
        let sum: f64 = draws.iter().sum();
        let mut segments: Vec<usize> = draws
            .iter()
            .map(|d| (d / sum * total as f64) as usize)
            .collect();
        let allocated: usize = segments[..parts - 1].iter().sum();
        segments[parts - 1] = total - allocated;
        if segments.iter().all(|&s| s >= MIN_SEGMENT_LEN) {
            return segments;
        }
    }
}
