//! Convenience re-exports for library users.

pub use crate::base::{DefaultTypes, EffectDistribution, ElementType, MutationType, TypeRegistry};
pub use crate::chromosome::{
    standard, standard_with, ChromosomeModel, ExplicitChromosome, GenomicInterval,
    RandomChromosome,
};
pub use crate::errors::{BuildError, ChromosomeError, ConfigError, TemplateError};
pub use crate::lifecycle::{
    BryophyteConfig, BryophyteMode, LifeCycle, PriorState, PteridophyteConfig, PteridophyteMode,
    SpermatophyteConfig, SpermatophyteMode, WrightFisherConfig, WrightFisherMating,
};
pub use crate::script::{Event, EventKind, EventMap, ScriptBuilder, Symbol, SymbolAllocator};
