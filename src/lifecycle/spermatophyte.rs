//! Spermatophyte life cycle: seed plants.
//!
//! The gametophytes are reduced to ovules and pollen living inside the
//! flower; the pollen pool can compete for fertilization when enabled.

use crate::base::fmt_float;
use crate::errors::BuildError;
use crate::lifecycle::{
    check_positive, check_probability, ratio_to_fraction, resolve_stage_rates, snippets,
    Alternation, ComposeContext, LifeCycleComposer,
};
use crate::script::{Event, EventKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpermatophyteMode {
    /// Hermaphroditic flowers carrying both ovules and pollen.
    Monoecious,
    /// Separate female and male sporophytes.
    Dioecious,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpermatophyteConfig {
    pub mode: SpermatophyteMode,
    pub spo_pop_size: u32,
    pub gam_pop_size: u32,
    pub spo_mutation_rate: Option<f64>,
    pub gam_mutation_rate: Option<f64>,
    pub spo_female_to_male_ratio: (u32, u32),
    pub spo_clone_rate: f64,
    pub spo_clone_number: u32,
    /// Chance an ovule is fertilized by sibling pollen (monoecious only).
    pub spo_self_rate: f64,
    pub flower_ovules_per: u32,
    pub flower_pollen_per: u32,
    pub ovule_fertilization_rate: f64,
    pub pollen_success_rate: f64,
    /// Enable pollen competition on the stigma.
    pub pollen_comp: bool,
    /// Pollen drawn per stigma when competition is on.
    pub stigma_pollen_per: u32,
    pub spo_maternal_effect: f64,
    pub spo_random_death_chance: f64,
    pub gam_random_death_chance: f64,
}

impl Default for SpermatophyteConfig {
    fn default() -> Self {
        Self {
            mode: SpermatophyteMode::Monoecious,
            spo_pop_size: 500,
            gam_pop_size: 1000,
            spo_mutation_rate: None,
            gam_mutation_rate: None,
            spo_female_to_male_ratio: (1, 1),
            spo_clone_rate: 0.0,
            spo_clone_number: 1,
            spo_self_rate: 0.0,
            flower_ovules_per: 30,
            flower_pollen_per: 100,
            ovule_fertilization_rate: 0.7,
            pollen_success_rate: 1.0,
            pollen_comp: false,
            stigma_pollen_per: 8,
            spo_maternal_effect: 0.0,
            spo_random_death_chance: 0.0,
            gam_random_death_chance: 0.0,
        }
    }
}

impl LifeCycleComposer for SpermatophyteConfig {
    fn compose(&self, ctx: &mut ComposeContext<'_>) -> Result<(), BuildError> {
        check_positive("spo_pop_size", self.spo_pop_size)?;
        check_positive("gam_pop_size", self.gam_pop_size)?;
        check_positive("spo_clone_number", self.spo_clone_number)?;
        check_positive("flower_ovules_per", self.flower_ovules_per)?;
        check_positive("flower_pollen_per", self.flower_pollen_per)?;
        check_positive("stigma_pollen_per", self.stigma_pollen_per)?;
        check_probability("spo_clone_rate", self.spo_clone_rate)?;
        check_probability("spo_self_rate", self.spo_self_rate)?;
        check_probability("ovule_fertilization_rate", self.ovule_fertilization_rate)?;
        check_probability("pollen_success_rate", self.pollen_success_rate)?;
        check_probability("spo_maternal_effect", self.spo_maternal_effect)?;
        check_probability("spo_random_death_chance", self.spo_random_death_chance)?;
        check_probability("gam_random_death_chance", self.gam_random_death_chance)?;
        let female_fraction =
            ratio_to_fraction("spo_female_to_male_ratio", self.spo_female_to_male_ratio)?;
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
            ("spo_female_to_male_ratio", fmt_float(female_fraction)),
            ("spo_clone_rate", fmt_float(self.spo_clone_rate)),
            ("spo_clone_number", self.spo_clone_number.to_string()),
            ("spo_self_rate", fmt_float(self.spo_self_rate)),
            ("flower_ovules_per", self.flower_ovules_per.to_string()),
            ("flower_pollen_per", self.flower_pollen_per.to_string()),
            ("ovule_fertilization_rate", fmt_float(self.ovule_fertilization_rate)),
            ("pollen_success_rate", fmt_float(self.pollen_success_rate)),
            ("pollen_comp", if self.pollen_comp { "T" } else { "F" }.to_string()),
            ("stigma_pollen_per", self.stigma_pollen_per.to_string()),
            ("spo_maternal_effect", fmt_float(self.spo_maternal_effect)),
            // the ovule matures on the sporophyte, so only the sporophytic
            // maternal channel is live in this family
            ("gam_maternal_effect", "0.0".to_string()),
            ("spo_random_death_chance", fmt_float(self.spo_random_death_chance)),
            ("gam_random_death_chance", fmt_float(self.gam_random_death_chance)),
        ] {
            ctx.events.define_constant(name, value);
        }

        Alternation::new().compose_shared(ctx)?;

        let (p1_script, p0_script) = match self.mode {
            SpermatophyteMode::Monoecious => {
                (snippets::REPRO_SPERM_MONO_P1, snippets::REPRO_SPERM_MONO_P0)
            }
            SpermatophyteMode::Dioecious => {
                (snippets::REPRO_SPERM_DIO_P1, snippets::REPRO_SPERM_DIO_P0)
            }
        };
        ctx.events.add(
            Event::new(EventKind::Reproduction, p1_script)
                .population("p1")
                .comment("sporophytes flower: ovules and pollen"),
        );
        ctx.events.add(
            Event::new(EventKind::Reproduction, p0_script)
                .population("p0")
                .comment("ovules are fertilized by sampled pollen"),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::standard;
    use crate::lifecycle::RunSchedule;
    use crate::script::{EventMap, ScriptBody, SymbolAllocator};

    fn compose(config: &SpermatophyteConfig) -> Result<EventMap, BuildError> {
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
    fn test_monoecious_defaults() {
        let events = compose(&SpermatophyteConfig::default()).unwrap();
        assert_eq!(events.events(EventKind::Reproduction).len(), 2);
        let constants = &events.initialize().constants;
        let comp = constants.iter().find(|(n, _)| n == "pollen_comp").unwrap();
        assert_eq!(comp.1, "F");
    }

    #[test]
    fn test_pollen_competition_flag() {
        let config =
            SpermatophyteConfig { pollen_comp: true, ..SpermatophyteConfig::default() };
        let events = compose(&config).unwrap();
        let comp = events
            .initialize()
            .constants
            .iter()
            .find(|(n, _)| n == "pollen_comp")
            .unwrap();
        assert_eq!(comp.1, "T");
    }

    #[test]
    fn test_dioecious_sets_offspring_sex() {
        let config = SpermatophyteConfig {
            mode: SpermatophyteMode::Dioecious,
            ..SpermatophyteConfig::default()
        };
        let events = compose(&config).unwrap();
        let p0 = &events.events(EventKind::Reproduction)[1];
        match p0.body() {
            ScriptBody::Block(script) => {
                assert!(script.contains("spo_female_to_male_ratio"));
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_fertilization_rate() {
        let config = SpermatophyteConfig {
            ovule_fertilization_rate: 1.2,
            ..SpermatophyteConfig::default()
        };
        assert!(compose(&config).is_err());
    }
}
