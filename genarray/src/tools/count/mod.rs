//! Read assignment on top of the zone index.
//!
//! Each aligned read is given as the list of its aligned blocks. The blocks
//! are queried against a [`GenomicArray`](crate::data_structs::GenomicArray)
//! and the value sets of the returned zones are combined according to an
//! [`OverlapMode`]:
//!
//! - [`OverlapMode::Union`]: union of all sets.
//! - [`OverlapMode::IntersectionStrict`]: intersection of all sets, including
//!   empty zones and uncovered gaps.
//! - [`OverlapMode::IntersectionNonempty`]: intersection of the non-empty sets.
//!
//! A read resolving to exactly one feature is assigned to it; no feature gives
//! [`Assignment::NoFeature`], more than one gives [`Assignment::Ambiguous`].

mod assign;
mod counts;

pub use assign::assign;
pub use counts::{
    count_reads,
    FeatureCounts,
    AMBIGUOUS_LABEL,
    NO_FEATURE_LABEL,
};

use crate::data_structs::typedef::PosType;
use crate::data_structs::Strand;
use crate::with_field_fn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "console", derive(clap::ValueEnum))]
pub enum OverlapMode {
    #[default]
    Union,
    IntersectionStrict,
    IntersectionNonempty,
}

/// Which strand track a read block is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "console", derive(clap::ValueEnum))]
pub enum StrandMode {
    /// Same strand as the read.
    #[default]
    Yes,
    /// Both strands.
    No,
    /// Opposite strand to the read.
    Reverse,
}

impl StrandMode {
    /// Strand tracks a block on `read_strand` is matched against.
    /// Unstranded reads are matched against both tracks.
    pub fn tracks(
        &self,
        read_strand: Strand,
    ) -> &'static [Strand] {
        let expected = match self {
            StrandMode::No => Strand::Unstranded,
            StrandMode::Yes => read_strand,
            StrandMode::Reverse => read_strand.flip(),
        };
        match expected {
            Strand::Plus => &[Strand::Plus],
            Strand::Minus => &[Strand::Minus],
            Strand::Unstranded => &[Strand::Plus, Strand::Minus],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment<V> {
    Feature(V),
    NoFeature,
    /// Sorted features the read could not be resolved between.
    Ambiguous(Vec<V>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountConfig {
    overlap_mode: OverlapMode,
    strand_mode:  StrandMode,
    min_overlap:  PosType,
}

impl Default for CountConfig {
    fn default() -> Self {
        Self {
            overlap_mode: OverlapMode::default(),
            strand_mode:  StrandMode::default(),
            min_overlap:  1,
        }
    }
}

impl CountConfig {
    with_field_fn!(overlap_mode, OverlapMode);

    with_field_fn!(strand_mode, StrandMode);

    with_field_fn!(min_overlap, PosType);

    pub fn overlap_mode(&self) -> OverlapMode {
        self.overlap_mode
    }

    pub fn strand_mode(&self) -> StrandMode {
        self.strand_mode
    }

    /// Minimal number of bases a zone must share with a block to be used.
    pub fn min_overlap(&self) -> PosType {
        self.min_overlap
    }
}
