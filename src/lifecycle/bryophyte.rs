//! Bryophyte life cycle: mosses, liverworts, and hornworts.
//!
//! The gametophyte is the dominant, free-living stage; sporophytes are
//! short-lived and nutritionally dependent on the maternal gametophyte,
//! which is why only the gametophytic maternal effect applies.

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
pub enum BryophyteMode {
    /// Bisexual gametophytes; gametophytic selfing possible.
    Monoicous,
    /// Unisexual gametophytes with a configurable sex ratio.
    Dioicous,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BryophyteConfig {
    pub mode: BryophyteMode,
    /// Sporophyte (diploid) carrying capacity.
    pub spo_pop_size: u32,
    /// Gametophyte (haploid) carrying capacity.
    pub gam_pop_size: u32,
    /// Per-stage mutation rates: both or neither (see
    /// [`resolve_stage_rates`]).
    pub spo_mutation_rate: Option<f64>,
    pub gam_mutation_rate: Option<f64>,
    /// Spores released by each sporophyte.
    pub spo_spores_per: u32,
    /// Eggs fertilized per gametophyte.
    pub gam_sporophytes_per: u32,
    pub gam_clone_rate: f64,
    pub gam_clone_number: u32,
    /// Gametophytic selfing chance per egg (monoicous only).
    pub gam_self_rate: f64,
    /// Female:male spore ratio (dioicous only).
    pub gam_female_to_male_ratio: (u32, u32),
    /// Maternal gametophyte contribution to sporophyte fitness.
    pub gam_maternal_effect: f64,
    pub spo_random_death_chance: f64,
    pub gam_random_death_chance: f64,
}

impl Default for BryophyteConfig {
    fn default() -> Self {
        Self {
            mode: BryophyteMode::Monoicous,
            spo_pop_size: 500,
            gam_pop_size: 1000,
            spo_mutation_rate: None,
            gam_mutation_rate: None,
            spo_spores_per: 100,
            gam_sporophytes_per: 10,
            gam_clone_rate: 0.0,
            gam_clone_number: 1,
            gam_self_rate: 0.0,
            gam_female_to_male_ratio: (1, 1),
            gam_maternal_effect: 0.0,
            spo_random_death_chance: 0.0,
            gam_random_death_chance: 0.0,
        }
    }
}

impl LifeCycleComposer for BryophyteConfig {
    fn compose(&self, ctx: &mut ComposeContext<'_>) -> Result<(), BuildError> {
        check_positive("spo_pop_size", self.spo_pop_size)?;
        check_positive("gam_pop_size", self.gam_pop_size)?;
        check_positive("spo_spores_per", self.spo_spores_per)?;
        check_positive("gam_sporophytes_per", self.gam_sporophytes_per)?;
        check_positive("gam_clone_number", self.gam_clone_number)?;
        check_probability("gam_clone_rate", self.gam_clone_rate)?;
        check_probability("gam_self_rate", self.gam_self_rate)?;
        check_probability("gam_maternal_effect", self.gam_maternal_effect)?;
        check_probability("spo_random_death_chance", self.spo_random_death_chance)?;
        check_probability("gam_random_death_chance", self.gam_random_death_chance)?;
        let female_fraction =
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
            ("gam_sporophytes_per", self.gam_sporophytes_per.to_string()),
            ("gam_clone_rate", fmt_float(self.gam_clone_rate)),
            ("gam_clone_number", self.gam_clone_number.to_string()),
            ("gam_self_rate", fmt_float(self.gam_self_rate)),
            ("gam_female_to_male_ratio", fmt_float(female_fraction)),
            ("gam_maternal_effect", fmt_float(self.gam_maternal_effect)),
            // sporophytes stay attached to the maternal gametophyte, so the
            // sporophytic maternal channel is inert in this family
            ("spo_maternal_effect", "0.0".to_string()),
            ("spo_random_death_chance", fmt_float(self.spo_random_death_chance)),
            ("gam_random_death_chance", fmt_float(self.gam_random_death_chance)),
        ] {
            ctx.events.define_constant(name, value);
        }

        Alternation::new().compose_shared(ctx)?;

        let (p1_script, p0_script) = match self.mode {
            BryophyteMode::Monoicous => {
                (snippets::REPRO_BRYO_MONO_P1, snippets::REPRO_BRYO_MONO_P0)
            }
            BryophyteMode::Dioicous => {
                (snippets::REPRO_BRYO_DIO_P1, snippets::REPRO_BRYO_DIO_P0)
            }
        };
        ctx.events.add(
            Event::new(EventKind::Reproduction, p1_script)
                .population("p1")
                .comment("sporophytes release spores"),
        );
        ctx.events.add(
            Event::new(EventKind::Reproduction, p0_script)
                .population("p0")
                .comment("gametophytes clone and fertilize eggs"),
        );
        Ok(())
    }
}
