//! # sporogen
//!
//! Generates SLiM programs for forward-time population-genetic simulations
//! of organisms with alternating haploid/diploid generations.
//!
//! The pipeline has three stages:
//! 1. a [`chromosome::ChromosomeModel`] partitions the genome into typed
//!    intervals (fixed, random, or explicit construction);
//! 2. a [`lifecycle`] composer reads the model and its configuration and
//!    appends script fragments into a [`script::EventMap`];
//! 3. the [`script`] serializer renders the accumulated events into one
//!    ordered program.
//!
//! [`script::ScriptBuilder`] drives all three; the `sporogen` binary exposes
//! the same pipeline over a JSON configuration file.

pub mod base;
pub mod chromosome;
pub mod config;
pub mod errors;
pub mod lifecycle;
pub mod prelude;
pub mod script;

pub use script::ScriptBuilder;
