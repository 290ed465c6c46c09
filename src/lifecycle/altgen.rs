//! The shared alternation-of-generations state machine.
//!
//! Two populations alternate activity by tick parity: `p1` holds the diploid
//! sporophytes, `p0` the haploid gametophytes. The run starts in the diploid
//! phase at tick 1; every tick toggles the phase. This helper emits the
//! machinery common to every alternating composer (population bootstrap,
//! per-mutation fitness toggling, substitution tracking, the framework
//! survival callbacks, and the terminal bookkeeping event) so each organism
//! variant adds only its constants and reproduction policy.

use crate::errors::{BuildError, ConfigError};
use crate::lifecycle::{snippets, ComposeContext};
use crate::script::templates;
use crate::script::{Event, EventKind};

/// Resolve the per-stage mutation rates under the both-or-neither contract:
/// both supplied rates are used unmodified; neither derives an even split of
/// the base rate; supplying only one is a configuration error.
pub fn resolve_stage_rates(
    spo_rate: Option<f64>,
    gam_rate: Option<f64>,
    base_rate: f64,
) -> Result<(f64, f64), ConfigError> {
    match (spo_rate, gam_rate) {
        (Some(spo), Some(gam)) => {
            for (name, value) in [("spo_mutation_rate", spo), ("gam_mutation_rate", gam)] {
                if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                    return Err(ConfigError::InvalidParameter {
                        name,
                        value,
                        expected: "a per-base rate between 0.0 and 1.0",
                    });
                }
            }
            Ok((spo, gam))
        }
        (Some(_), None) => Err(ConfigError::MissingPairedParameter {
            given: "spo_mutation_rate",
            missing: "gam_mutation_rate",
        }),
        (None, Some(_)) => Err(ConfigError::MissingPairedParameter {
            given: "gam_mutation_rate",
            missing: "spo_mutation_rate",
        }),
        (None, None) => Ok((0.5 * base_rate, 0.5 * base_rate)),
    }
}

/// The reusable alternation helper.
///
/// Parity convention: the bootstrap seeds diploids at tick 1, so the haploid
/// gametophytes are the freshly generated pool on even ticks and the emitted
/// alternator branches on `community.tick % 2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Alternation;

impl Alternation {
    pub fn new() -> Self {
        Self
    }

    /// Emit all shared machinery, in order: bootstrap, fitness toggles and
    /// substitution tracking, framework survival callbacks, terminal event.
    pub fn compose_shared(&self, ctx: &mut ComposeContext<'_>) -> Result<(), BuildError> {
        self.bootstrap(ctx);
        self.fitness_toggles(ctx)?;
        self.survival_framework(ctx);
        self.finish(ctx);
        Ok(())
    }

    /// Population bootstrap at tick 1: seed the diploid pool and an empty
    /// gametophyte pool, or continue from a prior run's saved state.
    pub fn bootstrap(&self, ctx: &mut ComposeContext<'_>) {
        let event = match &ctx.schedule.prior {
            Some(prior) => Event::new(
                EventKind::First,
                vec![
                    format!("sim.readFromPopulationFile(\"{}\")", prior.path),
                    "p1.individuals.tag = 0".to_string(),
                ],
            )
            .at(1)
            .comment("continue from a prior run's saved state"),
            None => Event::new(
                EventKind::First,
                vec![
                    "sim.addSubpop('p1', spo_pop_size)",
                    "sim.addSubpop('p0', 0)",
                    "p1.individuals.tag = 0",
                ],
            )
            .at(1)
            .comment("define subpops: p1 = diploid sporophytes, p0 = haploid gametophytes"),
        };
        ctx.events.add(event);
    }

    /// For every mutation type restricted to one ploidy stage: one fitness
    /// callback with a fresh id, its activate/deactivate toggles in the
    /// shared early alternator, and one substitution-tracking fragment in the
    /// late sweep.
    pub fn fitness_toggles(&self, ctx: &mut ComposeContext<'_>) -> Result<(), BuildError> {
        let mut activate = Vec::new();
        let mut deactivate = Vec::new();
        let mut checks = Vec::new();

        for mutation in ctx.chromosome.mutation_types() {
            if mutation.affects_both_stages() {
                continue;
            }
            let symbol = ctx.symbols.next();
            ctx.events.add(
                Event::new(EventKind::Fitness, "return 1 + mut.selectionCoeff")
                    .symbol(symbol)
                    .mutation(mutation.name())
                    .comment("the haploid stage expresses effects without dominance"),
            );
            activate.push(format!("{symbol}.active = 1;"));
            deactivate.push(format!("{symbol}.active = 0;"));
            checks.push(templates::render(
                snippets::SUB_MUT,
                &[
                    ("var", &symbol.index().to_string()),
                    ("mut", mutation.name()),
                ],
            )?);
        }

        let alternator = templates::render(
            snippets::EARLY_ALTERNATOR,
            &[
                ("activate", &activate.join("\n        ")),
                ("deactivate", &deactivate.join("\n        ")),
            ],
        )?;
        ctx.events.add(
            Event::new(EventKind::Early, alternator).comment("alternation of generations"),
        );

        if !checks.is_empty() {
            let sweep = templates::render(
                snippets::SUBSTITUTION,
                &[("checks", &checks.join("\n        "))],
            )?;
            ctx.events.add(
                Event::new(EventKind::Late, sweep)
                    .comment("record fixation during the haploid generation"),
            );
        }
        Ok(())
    }

    /// The four framework survival callbacks, bound to the reserved id
    /// range: phase turnover for each pool, then viability (random death and
    /// maternal effect) for each pool.
    pub fn survival_framework(&self, ctx: &mut ComposeContext<'_>) {
        ctx.events.add(
            Event::new(EventKind::Survival, snippets::SURV_PHASE)
                .symbol(ctx.symbols.reserved(1))
                .population("p1")
                .comment("sporophytes do not outlive their generation"),
        );
        ctx.events.add(
            Event::new(EventKind::Survival, snippets::SURV_PHASE)
                .symbol(ctx.symbols.reserved(2))
                .population("p0")
                .comment("gametophytes do not outlive their generation"),
        );
        ctx.events.add(
            Event::new(EventKind::Survival, snippets::SURV_SPO)
                .symbol(ctx.symbols.reserved(3))
                .population("p1")
                .comment("sporophyte random death and maternal effect"),
        );
        ctx.events.add(
            Event::new(EventKind::Survival, snippets::SURV_GAM)
                .symbol(ctx.symbols.reserved(4))
                .population("p0")
                .comment("gametophyte random death and maternal effect"),
        );
    }

    /// Terminal bookkeeping: remember every individual and write the tree
    /// sequence at the end tick.
    pub fn finish(&self, ctx: &mut ComposeContext<'_>) {
        end_of_run(ctx);
    }
}

/// The terminal late event every composer schedules, at the end tick derived
/// from the run schedule (including any prior-run offset).
pub(crate) fn end_of_run(ctx: &mut ComposeContext<'_>) {
    ctx.events.add(
        Event::new(
            EventKind::Late,
            vec![
                "sim.treeSeqRememberIndividuals(sim.subpopulations.individuals)".to_string(),
                format!("sim.treeSeqOutput('{}')", ctx.schedule.file_out),
            ],
        )
        .at(ctx.schedule.end_tick())
        .comment("end of sim; save .trees file"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_rates_used_unmodified() {
        let (spo, gam) = resolve_stage_rates(Some(1e-7), Some(2e-7), 1e-8).unwrap();
        assert_eq!(spo, 1e-7);
        assert_eq!(gam, 2e-7);
    }

    #[test]
    fn test_neither_rate_splits_base() {
        let (spo, gam) = resolve_stage_rates(None, None, 1e-8).unwrap();
        assert_eq!(spo, 0.5e-8);
        assert_eq!(gam, 0.5e-8);
    }

    #[test]
    fn test_only_spo_rate_fails() {
        let err = resolve_stage_rates(Some(1e-7), None, 1e-8).unwrap_err();
        assert!(matches!(err, ConfigError::MissingPairedParameter { .. }));
        assert!(err.to_string().contains("gam_mutation_rate"));
    }

    #[test]
    fn test_only_gam_rate_fails() {
        assert!(resolve_stage_rates(None, Some(1e-7), 1e-8).is_err());
    }

    #[test]
    fn test_out_of_range_rate_fails() {
        assert!(resolve_stage_rates(Some(2.0), Some(1e-7), 1e-8).is_err());
    }
}
