//! The fixed five-segment chromosome layout.

use crate::base::{DefaultTypes, ElementType};
use crate::chromosome::ChromosomeModel;

/// Total length of the standard layout, in bases.
pub const STANDARD_GENOME_LENGTH: usize = 10_001;

/// Build the deterministic five-segment layout used for test fixtures:
/// non-coding / exon / intron / exon / non-coding over 10,001 bases, with the
/// stock element types.
pub fn standard() -> ChromosomeModel {
    let defaults = DefaultTypes::new();
    standard_with(&defaults.noncds, &defaults.exon, &defaults.intron)
}

/// Build the five-segment layout with caller-supplied element types.
pub fn standard_with(
    noncds: &ElementType,
    exon: &ElementType,
    intron: &ElementType,
) -> ChromosomeModel {
    // The layout is static and in-bounds, so construction cannot fail.
    let mut model = ChromosomeModel::new(STANDARD_GENOME_LENGTH, false)
        .unwrap_or_else(|_| unreachable!("standard layout has positive length"));
    for (start, end, element) in [
        (0usize, 2000usize, noncds),
        (2001, 4000, exon),
        (4001, 6000, intron),
        (6001, 8000, exon),
        (8001, 10_000, noncds),
    ] {
        model
            .insert(start, end, element)
            .unwrap_or_else(|_| unreachable!("standard layout is non-overlapping"));
    }
    model
}
