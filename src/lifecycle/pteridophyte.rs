//! Pteridophyte life cycle: ferns and lycophytes.
//!
//! The sporophyte is the dominant stage, but the gametophytes are
//! free-living, so both stages can clone and both maternal channels apply.

use crate::base::fmt_float;
use crate::errors::{BuildError, ConfigError};
use crate::lifecycle::{
    check_positive, check_probability, ratio_to_fraction, resolve_stage_rates, snippets,
    Alternation, ComposeContext, LifeCycleComposer,
};
use crate::script::{Event, EventKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PteridophyteMode {
    /// One spore kind; gametophytes are hermaphroditic or male.
    Homosporous,
    /// Separate megaspores and microspores; gametophytes are unisexual.
    Heterosporous,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PteridophyteConfig {
    pub mode: PteridophyteMode,
    pub spo_pop_size: u32,
    pub gam_pop_size: u32,
    pub spo_mutation_rate: Option<f64>,
    pub gam_mutation_rate: Option<f64>,
    /// Spores per sporophyte (homosporous).
    pub spo_spores_per: u32,
    /// Megaspores and microspores per sporophyte (heterosporous).
    pub spo_megaspores_per: u32,
    pub spo_microspores_per: u32,
    pub spo_clone_rate: f64,
    pub spo_clone_number: u32,
    pub gam_clone_rate: f64,
    pub gam_clone_number: u32,
    /// Intra-gametophytic selfing chance per egg.
    pub gam_self_rate: f64,
    /// Inter-gametophytic (sibling) selfing chance per egg.
    pub spo_self_rate: f64,
    /// Eggs per gametophyte.
    pub gam_archegonia_per: u32,
    pub spo_female_to_male_ratio: (u32, u32),
    pub gam_female_to_male_ratio: (u32, u32),
    pub spo_maternal_effect: f64,
    pub gam_maternal_effect: f64,
    pub spo_random_death_chance: f64,
    pub gam_random_death_chance: f64,
}

impl Default for PteridophyteConfig {
    fn default() -> Self {
        Self {
            mode: PteridophyteMode::Homosporous,
            spo_pop_size: 500,
            gam_pop_size: 1000,
            spo_mutation_rate: None,
            gam_mutation_rate: None,
            spo_spores_per: 100,
            spo_megaspores_per: 1,
            spo_microspores_per: 1,
            spo_clone_rate: 0.0,
            spo_clone_number: 1,
            gam_clone_rate: 0.0,
            gam_clone_number: 1,
            gam_self_rate: 0.0,
            spo_self_rate: 0.0,
            gam_archegonia_per: 1,
            spo_female_to_male_ratio: (1, 1),
            gam_female_to_male_ratio: (1, 1),
            spo_maternal_effect: 0.0,
            gam_maternal_effect: 0.0,
            spo_random_death_chance: 0.0,
            gam_random_death_chance: 0.0,
        }
    }
}

impl LifeCycleComposer for PteridophyteConfig {
    fn compose(&self, ctx: &mut ComposeContext<'_>) -> Result<(), BuildError> {
        check_positive("spo_pop_size", self.spo_pop_size)?;
        check_positive("gam_pop_size", self.gam_pop_size)?;
        check_positive("spo_spores_per", self.spo_spores_per)?;
        check_positive("spo_megaspores_per", self.spo_megaspores_per)?;
        check_positive("spo_microspores_per", self.spo_microspores_per)?;
        check_positive("spo_clone_number", self.spo_clone_number)?;
        check_positive("gam_clone_number", self.gam_clone_number)?;
        check_positive("gam_archegonia_per", self.gam_archegonia_per)?;
        check_probability("spo_clone_rate", self.spo_clone_rate)?;
        check_probability("gam_clone_rate", self.gam_clone_rate)?;
        check_probability("gam_self_rate", self.gam_self_rate)?;
        check_probability("spo_self_rate", self.spo_self_rate)?;
        check_probability("spo_maternal_effect", self.spo_maternal_effect)?;
        check_probability("gam_maternal_effect", self.gam_maternal_effect)?;
        check_probability("spo_random_death_chance", self.spo_random_death_chance)?;
        check_probability("gam_random_death_chance", self.gam_random_death_chance)?;
        // the per-egg outcross weight is 1 - (gam_self + spo_self)
        if self.gam_self_rate + self.spo_self_rate > 1.0 {
            return Err(ConfigError::InvalidParameter {
                name: "gam_self_rate + spo_self_rate",
                value: self.gam_self_rate + self.spo_self_rate,
                expected: "a combined selfing chance of at most 1.0",
            }
            .into());
        }
        let spo_fraction =
            ratio_to_fraction("spo_female_to_male_ratio", self.spo_female_to_male_ratio)?;
        let gam_fraction =
            ratio_to_fraction("gam_female_to_male_ratio", self.gam_female_to_male_ratio)?;
        let (spo_rate, gam_rate) = resolve_stage_rates(
            self.spo_mutation_rate,
            self.gam_mutation_rate,
            ctx.schedule.mutation_rate,
        )?;

        for (name, value) in [
            ("spo_pop_size", self.spo_pop_size.to_string()),
            ("gam_pop_size", self.gam_pop_size.to_string()),
            ("spo_mutation_rate", fmt_float(spo_rate)),
            ("gam_mutation_rate", fmt_float(gam_rate)),
            ("spo_spores_per", self.spo_spores_per.to_string()),
            ("spo_megaspores_per", self.spo_megaspores_per.to_string()),
            ("spo_microspores_per", self.spo_microspores_per.to_string()),
            ("spo_clone_rate", fmt_float(self.spo_clone_rate)),
            ("spo_clone_number", self.spo_clone_number.to_string()),
            ("gam_clone_rate", fmt_float(self.gam_clone_rate)),
            ("gam_clone_number", self.gam_clone_number.to_string()),
            ("gam_self_rate", fmt_float(self.gam_self_rate)),
            ("spo_self_rate", fmt_float(self.spo_self_rate)),
            ("gam_archegonia_per", self.gam_archegonia_per.to_string()),
            ("spo_female_to_male_ratio", fmt_float(spo_fraction)),
            ("gam_female_to_male_ratio", fmt_float(gam_fraction)),
            ("spo_maternal_effect", fmt_float(self.spo_maternal_effect)),
            ("gam_maternal_effect", fmt_float(self.gam_maternal_effect)),
            ("spo_random_death_chance", fmt_float(self.spo_random_death_chance)),
            ("gam_random_death_chance", fmt_float(self.gam_random_death_chance)),
        ] {
            ctx.events.define_constant(name, value);
        }

        Alternation::new().compose_shared(ctx)?;

        let (p1_script, p0_script) = match self.mode {
            PteridophyteMode::Homosporous => {
                (snippets::REPRO_PTER_HOMO_P1, snippets::REPRO_PTER_HOMO_P0)
            }
            PteridophyteMode::Heterosporous => {
                (snippets::REPRO_PTER_HETERO_P1, snippets::REPRO_PTER_HETERO_P0)
            }
        };
        ctx.events.add(
            Event::new(EventKind::Reproduction, p1_script)
                .population("p1")
                .comment("sporophytes clone and shed spores"),
        );
        ctx.events.add(
            Event::new(EventKind::Reproduction, p0_script)
                .population("p0")
                .comment("gametophytes fertilize their eggs"),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::standard;
    use crate::lifecycle::RunSchedule;
    use crate::script::{EventMap, SymbolAllocator};

    fn compose(config: &PteridophyteConfig) -> Result<EventMap, BuildError> {
        let chromosome = standard();
        let schedule = RunSchedule {
            sim_time: 500,
            cycle_ticks: 2,
            mutation_rate: 1e-8,
            file_out: "out.trees".to_string(),
            prior: None,
        };
        let mut events = EventMap::new();
        let mut symbols = SymbolAllocator::new();
        let mut ctx = ComposeContext {
            chromosome: &chromosome,
            events: &mut events,
            symbols: &mut symbols,
            schedule: &schedule,
        };
        config.compose(&mut ctx)?;
        Ok(events)
    }

    #[test]
    fn test_homosporous_defaults() {
        let events = compose(&PteridophyteConfig::default()).unwrap();
        assert_eq!(events.events(EventKind::Reproduction).len(), 2);
        assert_eq!(events.events(EventKind::Survival).len(), 4);
    }

    #[test]
    fn test_heterosporous_uses_spore_sexes() {
        let config = PteridophyteConfig {
            mode: PteridophyteMode::Heterosporous,
            ..PteridophyteConfig::default()
        };
        let events = compose(&config).unwrap();
        let p1 = &events.events(EventKind::Reproduction)[0];
        match p1.body() {
            crate::script::ScriptBody::Block(script) => {
                assert!(script.contains("spo_megaspores_per"));
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_combined_selfing_over_one_rejected() {
        let config = PteridophyteConfig {
            gam_self_rate: 0.7,
            spo_self_rate: 0.6,
            ..PteridophyteConfig::default()
        };
        let err = compose(&config).unwrap_err();
        assert!(err.to_string().contains("at most 1.0"));
    }

    #[test]
    fn test_constants_are_whitelisted_in_order() {
        let events = compose(&PteridophyteConfig::default()).unwrap();
        let names: Vec<&str> = events
            .initialize()
            .constants
            .iter()
            .map(|(n, _)| n.as_str())
            .collect();
        assert_eq!(names[0], "spo_pop_size");
        assert!(names.contains(&"gam_archegonia_per"));
        // nothing leaks into the constant list beyond the whitelist
        assert_eq!(names.len(), 20);
    }
}
