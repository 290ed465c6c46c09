//! Life-cycle composers.
//!
//! Each reproductive mode is one composer over a common
//! alternation-of-generations helper: it reads the chromosome model and its
//! own configuration, allocates callback ids, and appends events into the
//! shared [`EventMap`]. Composers hold no ambient state; everything they
//! touch is threaded through [`ComposeContext`] by reference.

mod altgen;
mod bryophyte;
mod pteridophyte;
mod snippets;
mod spermatophyte;
mod wright_fisher;

pub use altgen::{resolve_stage_rates, Alternation};
pub use bryophyte::{BryophyteConfig, BryophyteMode};
pub use pteridophyte::{PteridophyteConfig, PteridophyteMode};
pub use spermatophyte::{SpermatophyteConfig, SpermatophyteMode};
pub use wright_fisher::{WrightFisherConfig, WrightFisherMating};

use crate::chromosome::ChromosomeModel;
use crate::errors::{BuildError, ConfigError};
use crate::script::{EventMap, SymbolAllocator};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// State threaded through a composer call.
pub struct ComposeContext<'a> {
    pub chromosome: &'a ChromosomeModel,
    pub events: &'a mut EventMap,
    pub symbols: &'a mut SymbolAllocator,
    pub schedule: &'a RunSchedule,
}

/// A prior run's saved state, as described by the external run layer.
///
/// The core never reads the file itself; it only needs the path (to emit the
/// load statement) and the maximum recorded tick (to reschedule the terminal
/// event).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorState {
    pub path: String,
    pub max_tick: u64,
}

/// Scheduling facts shared by every composer.
#[derive(Debug, Clone)]
pub struct RunSchedule {
    /// Requested run length, in full life cycles.
    pub sim_time: u64,
    /// Ticks per life cycle (1 for Wright-Fisher, 2 for alternation of
    /// generations).
    pub cycle_ticks: u64,
    /// Base mutation rate, split evenly across stages when per-stage rates
    /// are not configured.
    pub mutation_rate: f64,
    /// Path the terminal event writes the tree sequence to.
    pub file_out: String,
    /// Prior run to continue from, if any.
    pub prior: Option<PriorState>,
}

impl RunSchedule {
    /// Tick of the terminal bookkeeping event: one past the last full cycle,
    /// offset by the prior run's end when continuing.
    pub fn end_tick(&self) -> u64 {
        let end = self.sim_time * self.cycle_ticks + 1;
        match &self.prior {
            Some(prior) => end + prior.max_tick,
            None => end,
        }
    }
}

/// One reproductive mode's event generator.
pub trait LifeCycleComposer {
    /// Validate configuration and append this mode's events.
    ///
    /// Configuration errors must surface before any event is appended.
    fn compose(&self, ctx: &mut ComposeContext<'_>) -> Result<(), BuildError>;
}

/// The supported reproductive modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "organism", rename_all = "kebab-case")]
pub enum LifeCycle {
    WrightFisher(WrightFisherConfig),
    Bryophyte(BryophyteConfig),
    Pteridophyte(PteridophyteConfig),
    Spermatophyte(SpermatophyteConfig),
}

impl LifeCycle {
    /// Mode strings accepted by [`LifeCycle::from_str`].
    pub const MODES: [&'static str; 7] = [
        "wright-fisher",
        "bryophyte-monoicous",
        "bryophyte-dioicous",
        "pteridophyte-homosporous",
        "pteridophyte-heterosporous",
        "spermatophyte-monoecious",
        "spermatophyte-dioecious",
    ];

    /// Ticks per full life cycle for this mode.
    pub fn cycle_ticks(&self) -> u64 {
        match self {
            LifeCycle::WrightFisher(_) => 1,
            _ => 2,
        }
    }

    pub(crate) fn compose(&self, ctx: &mut ComposeContext<'_>) -> Result<(), BuildError> {
        match self {
            LifeCycle::WrightFisher(config) => config.compose(ctx),
            LifeCycle::Bryophyte(config) => config.compose(ctx),
            LifeCycle::Pteridophyte(config) => config.compose(ctx),
            LifeCycle::Spermatophyte(config) => config.compose(ctx),
        }
    }
}

impl FromStr for LifeCycle {
    type Err = ConfigError;

    /// Parse a mode string into a life cycle with that mode's default
    /// parameters.
    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "wright-fisher" => Ok(LifeCycle::WrightFisher(WrightFisherConfig::default())),
            "bryophyte-monoicous" => Ok(LifeCycle::Bryophyte(BryophyteConfig {
                mode: BryophyteMode::Monoicous,
                ..BryophyteConfig::default()
            })),
            "bryophyte-dioicous" => Ok(LifeCycle::Bryophyte(BryophyteConfig {
                mode: BryophyteMode::Dioicous,
                ..BryophyteConfig::default()
            })),
            "pteridophyte-homosporous" => Ok(LifeCycle::Pteridophyte(PteridophyteConfig {
                mode: PteridophyteMode::Homosporous,
                ..PteridophyteConfig::default()
            })),
            "pteridophyte-heterosporous" => Ok(LifeCycle::Pteridophyte(PteridophyteConfig {
                mode: PteridophyteMode::Heterosporous,
                ..PteridophyteConfig::default()
            })),
            "spermatophyte-monoecious" => Ok(LifeCycle::Spermatophyte(SpermatophyteConfig {
                mode: SpermatophyteMode::Monoecious,
                ..SpermatophyteConfig::default()
            })),
            "spermatophyte-dioecious" => Ok(LifeCycle::Spermatophyte(SpermatophyteConfig {
                mode: SpermatophyteMode::Dioecious,
                ..SpermatophyteConfig::default()
            })),
            other => Err(ConfigError::UnknownLifeCycle {
                given: other.to_string(),
                allowed: &Self::MODES,
            }),
        }
    }
}

/// Probability-range check shared by the composer validations.
pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidParameter {
            name,
            value,
            expected: "a probability between 0.0 and 1.0",
        });
    }
    Ok(())
}

/// Positive-count check shared by the composer validations.
pub(crate) fn check_positive(name: &'static str, value: u32) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidParameter {
            name,
            value: 0.0,
            expected: "a positive count",
        });
    }
    Ok(())
}

/// Convert a `(female, male)` ratio to the female fraction.
pub(crate) fn ratio_to_fraction(
    name: &'static str,
    ratio: (u32, u32),
) -> Result<f64, ConfigError> {
    let sum = ratio.0 + ratio.1;
    if sum == 0 {
        return Err(ConfigError::InvalidParameter {
            name,
            value: 0.0,
            expected: "a ratio with a positive total",
        });
    }
    Ok(f64::from(ratio.0) / f64::from(sum))
}
