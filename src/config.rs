//! The on-disk configuration surface consumed by the CLI.
//!
//! A [`ScriptConfig`] names its mutation and element types once and refers
//! to them by name everywhere else; resolution builds each instance exactly
//! once, so identity-based deduplication behaves the same as in library use.

use crate::base::{EffectDistribution, ElementType, MutationType};
use crate::chromosome::{standard, ChromosomeModel, ExplicitChromosome, RandomChromosome};
use crate::errors::{BuildError, ConfigError};
use crate::lifecycle::{LifeCycle, PriorState};
use crate::script::ScriptBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A complete generation request: genome, type tables, life cycle, and run
/// settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptConfig {
    pub genome: GenomeConfig,
    #[serde(default)]
    pub mutation_types: Vec<MutationTypeSpec>,
    #[serde(default)]
    pub element_types: Vec<ElementTypeSpec>,
    pub life_cycle: LifeCycle,
    pub run: RunConfig,
}

/// Run-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Run length in full life cycles.
    pub sim_time: u64,
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    #[serde(default = "default_recombination_rate")]
    pub recombination_rate: f64,
    #[serde(default = "default_file_out")]
    pub file_out: String,
    /// Prior run to continue from, as described by the run layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prior: Option<PriorState>,
}

fn default_mutation_rate() -> f64 {
    1e-8
}

fn default_recombination_rate() -> f64 {
    1e-9
}

fn default_file_out() -> String {
    "sporogen.trees".to_string()
}

/// A declared mutation type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationTypeSpec {
    pub name: String,
    pub dominance: f64,
    pub distribution: EffectDistribution,
    #[serde(default = "default_true")]
    pub affects_haploid: bool,
    #[serde(default = "default_true")]
    pub affects_diploid: bool,
}

fn default_true() -> bool {
    true
}

/// A declared element type; mutations are `[name, weight]` pairs referencing
/// declared mutation types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementTypeSpec {
    pub name: String,
    pub coding: bool,
    pub mutations: Vec<(String, f64)>,
}

/// Chromosome construction strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum GenomeConfig {
    /// The fixed five-segment test layout with stock types.
    Standard,
    /// The random generative strategy. Empty pools fall back to the stock
    /// types; otherwise pool entries reference declared element types.
    Random {
        length: usize,
        #[serde(default = "default_noncds_scale")]
        noncds_scale: f64,
        #[serde(default = "default_cds_scale")]
        cds_scale: f64,
        #[serde(default = "default_intron_scale")]
        intron_scale: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
        #[serde(default)]
        exon: Vec<String>,
        #[serde(default)]
        intron: Vec<String>,
        #[serde(default)]
        noncds: Vec<String>,
        #[serde(default)]
        nucleotides: bool,
    },
    /// Explicit interval coordinates referencing declared element types; a
    /// region without an element is a gap.
    Explicit {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        length: Option<usize>,
        regions: Vec<RegionSpec>,
        #[serde(default)]
        nucleotides: bool,
    },
}

fn default_noncds_scale() -> f64 {
    5000.0
}

fn default_cds_scale() -> f64 {
    1000.0
}

fn default_intron_scale() -> f64 {
    1000.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionSpec {
    pub start: usize,
    pub end: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
}

impl ScriptConfig {
    /// A starting-point configuration for `sporogen init`.
    pub fn example(life_cycle: LifeCycle) -> Self {
        Self {
            genome: GenomeConfig::Random {
                length: 20_000,
                noncds_scale: default_noncds_scale(),
                cds_scale: default_cds_scale(),
                intron_scale: default_intron_scale(),
                seed: Some(42),
                exon: Vec::new(),
                intron: Vec::new(),
                noncds: Vec::new(),
                nucleotides: false,
            },
            mutation_types: Vec::new(),
            element_types: Vec::new(),
            life_cycle,
            run: RunConfig {
                sim_time: 1000,
                mutation_rate: default_mutation_rate(),
                recombination_rate: default_recombination_rate(),
                file_out: default_file_out(),
                prior: None,
            },
        }
    }

    /// Force a seed for the random strategy; other strategies are untouched.
    pub fn set_seed(&mut self, new_seed: u64) {
        match &mut self.genome {
            GenomeConfig::Random { seed, .. } => *seed = Some(new_seed),
            _ => log::warn!("seed override ignored: genome strategy is not random"),
        }
    }

    /// Build the chromosome model described by this configuration.
    pub fn build_chromosome(&self) -> Result<ChromosomeModel, BuildError> {
        let elements = self.resolve_element_types()?;
        let lookup = |name: &String| -> Result<ElementType, ConfigError> {
            elements.get(name.as_str()).cloned().ok_or_else(|| ConfigError::UnknownType {
                kind: "element",
                name: name.clone(),
            })
        };

        match &self.genome {
            GenomeConfig::Standard => Ok(standard()),
            GenomeConfig::Random {
                length,
                noncds_scale,
                cds_scale,
                intron_scale,
                seed,
                exon,
                intron,
                noncds,
                nucleotides,
            } => {
                let mut builder = RandomChromosome::new(*length)
                    .scales(*noncds_scale, *cds_scale, *intron_scale)
                    .nucleotides(*nucleotides);
                if let Some(seed) = seed {
                    builder = builder.seed(*seed);
                }
                if !exon.is_empty() {
                    builder =
                        builder.exon_pool(exon.iter().map(&lookup).collect::<Result<_, _>>()?);
                }
                if !intron.is_empty() {
                    builder = builder
                        .intron_pool(intron.iter().map(&lookup).collect::<Result<_, _>>()?);
                }
                if !noncds.is_empty() {
                    builder = builder
                        .noncds_pool(noncds.iter().map(&lookup).collect::<Result<_, _>>()?);
                }
                builder.build()
            }
            GenomeConfig::Explicit { length, regions, nucleotides } => {
                let mut builder = ExplicitChromosome::new().nucleotides(*nucleotides);
                if let Some(length) = length {
                    builder = builder.genome_length(*length);
                }
                for region in regions {
                    builder = match &region.element {
                        Some(name) => builder.region(region.start, region.end, lookup(name)?),
                        None => builder.gap(region.start, region.end),
                    };
                }
                builder.build()
            }
        }
    }

    /// Build the final program text.
    pub fn build_script(&self) -> Result<String, BuildError> {
        let chromosome = self.build_chromosome()?;
        let mut builder = ScriptBuilder::new()
            .chromosome(chromosome)
            .life_cycle(self.life_cycle.clone())
            .sim_time(self.run.sim_time)
            .mutation_rate(self.run.mutation_rate)
            .recombination_rate(self.run.recombination_rate)
            .file_out(self.run.file_out.clone());
        if let Some(prior) = &self.run.prior {
            builder = builder.prior_state(prior.clone());
        }
        builder.build()
    }

    /// Instantiate every declared mutation and element type exactly once.
    fn resolve_element_types(&self) -> Result<HashMap<&str, ElementType>, ConfigError> {
        let mut mutations: HashMap<&str, MutationType> = HashMap::new();
        for spec in &self.mutation_types {
            let instance = MutationType::with_stages(
                spec.name.clone(),
                spec.dominance,
                spec.distribution,
                spec.affects_haploid,
                spec.affects_diploid,
            );
            if mutations.insert(spec.name.as_str(), instance).is_some() {
                return Err(ConfigError::DuplicateType {
                    kind: "mutation",
                    name: spec.name.clone(),
                });
            }
        }

        let mut elements: HashMap<&str, ElementType> = HashMap::new();
        for spec in &self.element_types {
            let mut weighted = Vec::with_capacity(spec.mutations.len());
            for (mutation_name, weight) in &spec.mutations {
                let mutation = mutations.get(mutation_name.as_str()).ok_or_else(|| {
                    ConfigError::UnknownType {
                        kind: "mutation",
                        name: mutation_name.clone(),
                    }
                })?;
                weighted.push((mutation.clone(), *weight));
            }
            let instance = ElementType::new(spec.name.clone(), weighted, spec.coding);
            if elements.insert(spec.name.as_str(), instance).is_some() {
                return Err(ConfigError::DuplicateType {
                    kind: "element",
                    name: spec.name.clone(),
                });
            }
        }
        Ok(elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom_config() -> ScriptConfig {
        ScriptConfig {
            genome: GenomeConfig::Explicit {
                length: None,
                regions: vec![
                    RegionSpec { start: 0, end: 999, element: Some("promoter".to_string()) },
                    RegionSpec { start: 1000, end: 1999, element: None },
                ],
                nucleotides: false,
            },
            mutation_types: vec![MutationTypeSpec {
                name: "m10".to_string(),
                dominance: 0.5,
                distribution: EffectDistribution::Normal { mean: 0.0, std_dev: 0.2 },
                affects_haploid: true,
                affects_diploid: true,
            }],
            element_types: vec![ElementTypeSpec {
                name: "promoter".to_string(),
                coding: true,
                mutations: vec![("m10".to_string(), 1.0)],
            }],
            life_cycle: "bryophyte-monoicous".parse().unwrap(),
            run: RunConfig {
                sim_time: 100,
                mutation_rate: default_mutation_rate(),
                recombination_rate: default_recombination_rate(),
                file_out: default_file_out(),
                prior: None,
            },
        }
    }

    #[test]
    fn test_explicit_config_builds() {
        let chromosome = custom_config().build_chromosome().unwrap();
        assert_eq!(chromosome.genome_length(), 2000);
        assert_eq!(chromosome.interval_count(), 1);
        assert_eq!(chromosome.mutation_types()[0].name(), "m10");
    }

    #[test]
    fn test_unknown_element_reference() {
        let mut config = custom_config();
        if let GenomeConfig::Explicit { regions, .. } = &mut config.genome {
            regions[0].element = Some("nonesuch".to_string());
        }
        let err = config.build_chromosome().unwrap_err();
        assert!(err.to_string().contains("nonesuch"));
    }

    #[test]
    fn test_unknown_mutation_reference() {
        let mut config = custom_config();
        config.element_types[0].mutations[0].0 = "m99".to_string();
        assert!(config.build_chromosome().is_err());
    }

    #[test]
    fn test_duplicate_mutation_name() {
        let mut config = custom_config();
        let duplicate = config.mutation_types[0].clone();
        config.mutation_types.push(duplicate);
        let err = config.build_chromosome().unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn test_example_round_trips_through_json() {
        let example = ScriptConfig::example("pteridophyte-homosporous".parse().unwrap());
        let json = serde_json::to_string_pretty(&example).unwrap();
        let parsed: ScriptConfig = serde_json::from_str(&json).unwrap();
        let script = parsed.build_script().unwrap();
        assert!(script.contains("initialize()"));
    }

    #[test]
    fn test_seed_override() {
        let mut config = ScriptConfig::example("wright-fisher".parse().unwrap());
        config.set_seed(7);
        match &config.genome {
            GenomeConfig::Random { seed, .. } => assert_eq!(*seed, Some(7)),
            other => panic!("unexpected strategy: {other:?}"),
        }
    }

    #[test]
    fn test_custom_config_full_script() {
        let script = custom_config().build_script().unwrap();
        assert!(script.contains("initializeMutationType(\"m10\", 0.5, \"n\", 0.0, 0.2);"));
        assert!(script.contains("initializeGenomicElement(promoter, 0, 999);"));
    }
}
