//! Mutation types: named fitness-effect distributions.

use crate::base::{fmt_float, EffectDistribution};
use std::fmt;
use std::sync::Arc;

#[derive(Debug)]
struct MutationTypeData {
    name: String,
    dominance: f64,
    distribution: EffectDistribution,
    affects_haploid: bool,
    affects_diploid: bool,
}

/// A named, parameterized fitness-effect distribution, optionally restricted
/// to one ploidy stage.
///
/// Cloning is cheap and preserves identity: two clones of the same
/// `MutationType` are the same type for deduplication purposes, while two
/// separately constructed types are distinct even under identical names.
#[derive(Debug, Clone)]
pub struct MutationType {
    inner: Arc<MutationTypeData>,
}

impl MutationType {
    /// Create a mutation type affecting both ploidy stages.
    pub fn new(name: impl Into<String>, dominance: f64, distribution: EffectDistribution) -> Self {
        Self::with_stages(name, dominance, distribution, true, true)
    }

    /// Create a mutation type with explicit stage applicability.
    pub fn with_stages(
        name: impl Into<String>,
        dominance: f64,
        distribution: EffectDistribution,
        affects_haploid: bool,
        affects_diploid: bool,
    ) -> Self {
        Self {
            inner: Arc::new(MutationTypeData {
                name: name.into(),
                dominance,
                distribution,
                affects_haploid,
                affects_diploid,
            }),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    #[inline]
    pub fn dominance(&self) -> f64 {
        self.inner.dominance
    }

    #[inline]
    pub fn distribution(&self) -> &EffectDistribution {
        &self.inner.distribution
    }

    #[inline]
    pub fn affects_haploid(&self) -> bool {
        self.inner.affects_haploid
    }

    #[inline]
    pub fn affects_diploid(&self) -> bool {
        self.inner.affects_diploid
    }

    /// True when the type's fitness effect applies in both ploidy stages.
    #[inline]
    pub fn affects_both_stages(&self) -> bool {
        self.inner.affects_haploid && self.inner.affects_diploid
    }

    /// Identity comparison: true only for clones of the same construction.
    #[inline]
    pub fn same_type(&self, other: &MutationType) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// The simulator declaration for this type.
    ///
    /// With `nucleotides` set the nucleotide-model variant of the declaration
    /// is emitted instead.
    pub fn declaration(&self, nucleotides: bool) -> String {
        let call = if nucleotides {
            "initializeMutationTypeNuc"
        } else {
            "initializeMutationType"
        };
        format!(
            "{call}(\"{}\", {}, {});",
            self.name(),
            fmt_float(self.dominance()),
            self.distribution(),
        )
    }
}

impl fmt::Display for MutationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
