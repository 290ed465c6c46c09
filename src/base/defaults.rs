//! Stock mutation and element types.
//!
//! These are the fallbacks used by the fixed-pattern chromosome and by the
//! random strategy when a pool is not supplied. They are constructed per call
//! so that identity-based deduplication works the same way as for user types:
//! clone the instances in a `DefaultTypes` to share them, construct a second
//! `DefaultTypes` to get distinct ones.

use crate::base::{EffectDistribution, ElementType, MutationType};

/// One consistent set of stock types.
#[derive(Debug, Clone)]
pub struct DefaultTypes {
    /// Strictly neutral mutations (m1).
    pub neutral: MutationType,
    /// Synonymous coding-site mutations, neutral (m2).
    pub synonymous: MutationType,
    /// Deleterious mutations with a gamma effect distribution (m3).
    pub deleterious: MutationType,
    /// Rare beneficial mutations with an exponential effect distribution (m4).
    pub beneficial: MutationType,
    /// Non-coding region (g1): neutral only.
    pub noncds: ElementType,
    /// Intron (g2): mostly deleterious, some neutral.
    pub intron: ElementType,
    /// Exon (g3): synonymous, deleterious, and a trickle of beneficial.
    pub exon: ElementType,
}

impl DefaultTypes {
    pub fn new() -> Self {
        let neutral = MutationType::new("m1", 0.5, EffectDistribution::neutral());
        let synonymous = MutationType::new("m2", 0.5, EffectDistribution::neutral());
        // The selected types carry dominance and so express in the diploid
        // stage; composers give them explicit haploid-phase callbacks.
        let deleterious = MutationType::with_stages(
            "m3",
            0.1,
            EffectDistribution::Gamma { mean: -0.03, shape: 0.2 },
            false,
            true,
        );
        let beneficial = MutationType::with_stages(
            "m4",
            0.8,
            EffectDistribution::Exponential { mean: 0.1 },
            false,
            true,
        );

        let noncds = ElementType::new("g1", vec![(neutral.clone(), 1.0)], false);
        let intron = ElementType::new(
            "g2",
            vec![(deleterious.clone(), 9.0), (neutral.clone(), 1.0)],
            true,
        );
        let exon = ElementType::new(
            "g3",
            vec![
                (synonymous.clone(), 2.0),
                (deleterious.clone(), 8.0),
                (beneficial.clone(), 0.1),
            ],
            true,
        );

        Self {
            neutral,
            synonymous,
            deleterious,
            beneficial,
            noncds,
            intron,
            exon,
        }
    }
}

impl Default for DefaultTypes {
    fn default() -> Self {
        Self::new()
    }
}
