//! Core data structures of the `genarray` crate.
//!
//! - [`coords`]: the [`Interval`] value type (closed, 1-based, stranded).
//! - [`genomic_array`]: the zone index itself: [`GenomicArray`],
//!   [`ChromosomeZones`], [`StrandTrack`] and [`Zone`].
//! - [`Strand`], the orientation shared by intervals and tracks.
//! - [`typedef`]: type aliases for chromosome names, positions and feature
//!   identifiers.

pub mod coords;
mod enums;
pub mod genomic_array;
pub mod typedef;

pub use coords::Interval;
pub use enums::Strand;
pub use genomic_array::{
    ChromosomeZones,
    Entries,
    GenomicArray,
    StrandTrack,
    Zone,
};
