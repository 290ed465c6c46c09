//! Builder tying chromosome, life cycle, and schedule into a program.

use crate::base::fmt_float;
use crate::chromosome::ChromosomeModel;
use crate::errors::{BuildError, ConfigError};
use crate::lifecycle::{ComposeContext, LifeCycle, PriorState, RunSchedule};
use crate::script::{serialize, Event, EventMap, SymbolAllocator};

/// Fluent assembly of a complete simulator program.
///
/// # Examples
///
/// ```
/// use sporogen::chromosome::standard;
/// use sporogen::lifecycle::LifeCycle;
/// use sporogen::script::ScriptBuilder;
///
/// let script = ScriptBuilder::new()
///     .chromosome(standard())
///     .life_cycle("bryophyte-monoicous".parse::<LifeCycle>().unwrap())
///     .sim_time(1000)
///     .build()
///     .unwrap();
/// assert!(script.starts_with("initialize()"));
/// ```
#[derive(Debug)]
pub struct ScriptBuilder {
    chromosome: Option<ChromosomeModel>,
    life_cycle: Option<LifeCycle>,
    sim_time: Option<u64>,
    mutation_rate: f64,
    recombination_rate: f64,
    file_out: String,
    prior: Option<PriorState>,
    constants: Vec<(String, String)>,
    extra_scripts: Vec<String>,
    events: Vec<Event>,
}

impl Default for ScriptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self {
            chromosome: None,
            life_cycle: None,
            sim_time: None,
            mutation_rate: 1e-8,
            recombination_rate: 1e-9,
            file_out: "sporogen.trees".to_string(),
            prior: None,
            constants: Vec::new(),
            extra_scripts: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Set the chromosome model (required).
    pub fn chromosome(mut self, chromosome: ChromosomeModel) -> Self {
        self.chromosome = Some(chromosome);
        self
    }

    /// Set the reproductive mode (required).
    pub fn life_cycle(mut self, life_cycle: LifeCycle) -> Self {
        self.life_cycle = Some(life_cycle);
        self
    }

    /// Set the run length in full life cycles (required).
    pub fn sim_time(mut self, sim_time: u64) -> Self {
        self.sim_time = Some(sim_time);
        self
    }

    /// Base per-site mutation rate (default `1e-8`).
    pub fn mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Per-site recombination rate (default `1e-9`).
    pub fn recombination_rate(mut self, rate: f64) -> Self {
        self.recombination_rate = rate;
        self
    }

    /// Path the terminal event writes the tree sequence to.
    pub fn file_out(mut self, path: impl Into<String>) -> Self {
        self.file_out = path.into();
        self
    }

    /// Continue from a prior run's saved state.
    pub fn prior_state(mut self, prior: PriorState) -> Self {
        self.prior = Some(prior);
        self
    }

    /// Add a user-defined named constant to the initialize block.
    pub fn constant(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.constants.push((name.into(), value.into()));
        self
    }

    /// Add a free-form statement to the initialize block.
    pub fn extra_script(mut self, script: impl Into<String>) -> Self {
        self.extra_scripts.push(script.into());
        self
    }

    /// Add a user-built event; it precedes the composer's events within its
    /// category.
    pub fn event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    /// Compose and serialize the program.
    pub fn build(self) -> Result<String, BuildError> {
        let chromosome = self
            .chromosome
            .ok_or(ConfigError::MissingRequired("chromosome"))?;
        let life_cycle = self
            .life_cycle
            .ok_or(ConfigError::MissingRequired("life_cycle"))?;
        let sim_time = self.sim_time.ok_or(ConfigError::MissingRequired("sim_time"))?;
        for (name, rate) in [
            ("mutation_rate", self.mutation_rate),
            ("recombination_rate", self.recombination_rate),
        ] {
            if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::InvalidParameter {
                    name,
                    value: rate,
                    expected: "a per-base rate between 0.0 and 1.0",
                }
                .into());
            }
        }

        let mut events = EventMap::new();
        {
            let init = events.initialize_mut();
            init.model_type = "nonWF".to_string();
            init.mutation_rate = fmt_float(self.mutation_rate);
            init.recombination_rate = fmt_float(self.recombination_rate);
            init.mutation_types = chromosome.mutation_type_declarations();
            init.element_types = chromosome.element_type_declarations();
            init.intervals = chromosome.interval_declarations();
            init.constants = self.constants;
            init.extra_scripts = self.extra_scripts;
        }
        for event in self.events {
            events.add(event);
        }

        let schedule = RunSchedule {
            sim_time,
            cycle_ticks: life_cycle.cycle_ticks(),
            mutation_rate: self.mutation_rate,
            file_out: self.file_out,
            prior: self.prior,
        };
        let mut symbols = SymbolAllocator::new();
        let mut ctx = ComposeContext {
            chromosome: &chromosome,
            events: &mut events,
            symbols: &mut symbols,
            schedule: &schedule,
        };
        life_cycle.compose(&mut ctx)?;

        Ok(serialize(&events)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::standard;

    fn bryophyte() -> LifeCycle {
        "bryophyte-monoicous".parse().unwrap()
    }

    #[test]
    fn test_missing_chromosome() {
        let err = ScriptBuilder::new()
            .life_cycle(bryophyte())
            .sim_time(100)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            BuildError::Config(ConfigError::MissingRequired("chromosome"))
        ));
    }

    #[test]
    fn test_missing_life_cycle() {
        let err = ScriptBuilder::new()
            .chromosome(standard())
            .sim_time(100)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            BuildError::Config(ConfigError::MissingRequired("life_cycle"))
        ));
    }

    #[test]
    fn test_missing_sim_time() {
        let err = ScriptBuilder::new()
            .chromosome(standard())
            .life_cycle(bryophyte())
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            BuildError::Config(ConfigError::MissingRequired("sim_time"))
        ));
    }

    #[test]
    fn test_invalid_rate() {
        let err = ScriptBuilder::new()
            .chromosome(standard())
            .life_cycle(bryophyte())
            .sim_time(100)
            .mutation_rate(-1.0)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("mutation_rate"));
    }

    #[test]
    fn test_full_build() {
        let script = ScriptBuilder::new()
            .chromosome(standard())
            .life_cycle(bryophyte())
            .sim_time(1000)
            .file_out("/tmp/run.trees")
            .constant("label", "'demo'")
            .build()
            .unwrap();

        assert!(script.contains("initializeSLiMModelType(\"nonWF\")"));
        assert!(script.contains("defineConstant('label', 'demo');"));
        assert!(script.contains("sim.treeSeqOutput('/tmp/run.trees');"));
        // altgen runs two ticks per cycle, plus the terminal tick
        assert!(script.contains("2001 late()"));
    }

    #[test]
    fn test_user_events_land_in_their_category() {
        use crate::script::{Event, EventKind};
        let script = ScriptBuilder::new()
            .chromosome(standard())
            .life_cycle(bryophyte())
            .sim_time(10)
            .event(
                Event::new(EventKind::Late, "catn(sim.substitutions.size())")
                    .at(5)
                    .comment("periodic check"),
            )
            .event(Event::new(EventKind::Custom, "function (void)report(void) { }"))
            .build()
            .unwrap();
        assert!(script.contains("5 late()"));
        assert!(script.contains("catn(sim.substitutions.size());"));
        // user late event precedes the composer's substitution sweep
        let user = script.find("catn(").unwrap();
        let sweep = script.find("removeMutations").unwrap();
        assert!(user < sweep);
        // custom blocks close out the program
        let custom = script.find("function (void)report").unwrap();
        assert!(custom > sweep);
    }

    #[test]
    fn test_user_constants_precede_composer_constants() {
        let script = ScriptBuilder::new()
            .chromosome(standard())
            .life_cycle(bryophyte())
            .sim_time(10)
            .constant("user_first", "1")
            .build()
            .unwrap();
        let user = script.find("defineConstant('user_first'").unwrap();
        let composer = script.find("defineConstant('spo_pop_size'").unwrap();
        assert!(user < composer);
    }
}
