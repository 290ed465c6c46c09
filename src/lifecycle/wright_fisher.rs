//! Wright-Fisher baseline composer.
//!
//! A single diploid pool with a 1-tick cycle and no phase alternation; the
//! comparison point for the organism models. Mating can be standard diploid,
//! haploid-recombinant, or clonal, each with an optional soft-selection
//! variant, or two-sex when `sexes` is set.

use crate::errors::{BuildError, ConfigError};
use crate::lifecycle::altgen::end_of_run;
use crate::lifecycle::{check_positive, snippets, ComposeContext, LifeCycleComposer};
use crate::script::{Event, EventKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WrightFisherMating {
    /// Two diploid parents per offspring.
    #[default]
    Standard,
    /// Haploid genomes recombine directly into haploid offspring.
    Haploid,
    /// Offspring copy a single parent genome.
    Clonal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WrightFisherConfig {
    /// Population size, held constant each tick.
    pub pop_size: u32,
    pub mating: WrightFisherMating,
    /// Weight parent draws by fitness.
    pub soft_selection: bool,
    /// Model separate sexes (standard mating only).
    pub sexes: bool,
}

impl Default for WrightFisherConfig {
    fn default() -> Self {
        Self {
            pop_size: 1000,
            mating: WrightFisherMating::Standard,
            soft_selection: false,
            sexes: false,
        }
    }
}

impl LifeCycleComposer for WrightFisherConfig {
    fn compose(&self, ctx: &mut ComposeContext<'_>) -> Result<(), BuildError> {
        check_positive("pop_size", self.pop_size)?;
        if self.sexes && self.mating != WrightFisherMating::Standard {
            return Err(ConfigError::InvalidParameter {
                name: "sexes",
                value: 1.0,
                expected: "standard mating when sexes are modeled",
            }
            .into());
        }

        ctx.events.define_constant("K", self.pop_size.to_string());
        if self.sexes {
            ctx.events.extra_script("initializeSex(\"A\")");
        }

        let bootstrap = match &ctx.schedule.prior {
            Some(prior) => Event::new(
                EventKind::First,
                vec![format!("sim.readFromPopulationFile(\"{}\")", prior.path)],
            )
            .at(1)
            .comment("continue from a prior run's saved state"),
            None => Event::new(EventKind::First, vec!["sim.addSubpop('p1', K)"])
                .at(1)
                .comment("seed the diploid population"),
        };
        ctx.events.add(bootstrap);

        ctx.events.add(
            Event::new(EventKind::Early, snippets::WF_EARLY)
                .comment("carrying-capacity fitness scaling"),
        );

        let script = if self.sexes {
            snippets::REPRO_WF_SEXES
        } else {
            match (self.mating, self.soft_selection) {
                (WrightFisherMating::Standard, false) => snippets::REPRO_WF,
                (WrightFisherMating::Standard, true) => snippets::REPRO_WF_SOFT,
                (WrightFisherMating::Haploid, false) => snippets::REPRO_HAPLOID_WF,
                (WrightFisherMating::Haploid, true) => snippets::REPRO_HAPLOID_SOFT_WF,
                (WrightFisherMating::Clonal, false) => snippets::REPRO_CLONAL_WF,
                (WrightFisherMating::Clonal, true) => snippets::REPRO_CLONAL_SOFT_WF,
            }
        };
        ctx.events.add(
            Event::new(EventKind::Reproduction, script)
                .population("p1")
                .comment("replace the parental pool"),
        );

        ctx.events.add(
            Event::new(EventKind::Survival, snippets::SURV_PHASE)
                .symbol(ctx.symbols.reserved(1))
                .population("p1")
                .comment("non-overlapping generations"),
        );

        end_of_run(ctx);
        Ok(())
    }
}
