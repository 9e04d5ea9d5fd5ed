//! Strand-aware zone index.
//!
//! A [`GenomicArray`] maps chromosome names to [`ChromosomeZones`], each a
//! pair of [`StrandTrack`]s. A track partitions `[1, length]` into contiguous
//! [`Zone`]s tagged with the values of every interval covering them:
//!
//! ```text
//! add_entry(chr1:10-20 (-), "a"); add_entry(chr1:15-25 (-), "b")
//!
//! minus track:  [1,9] {}  [10,14] {a}  [15,20] {a,b}  [21,25] {b}
//! ```
//!
//! Queries return every zone intersecting the requested range keyed by the
//! zone's own coordinates, plus one empty gap entry for any part of the range
//! beyond the annotated length.

mod array;
mod chrom;
mod track;
mod zone;

use std::collections::BTreeMap;

use hashbrown::HashSet;

pub use array::GenomicArray;
pub use chrom::ChromosomeZones;
pub use track::StrandTrack;
pub use zone::Zone;

use crate::data_structs::coords::Interval;

/// Query result: zone interval to the values tagging that zone.
pub type Entries<V> = BTreeMap<Interval, HashSet<V>>;

#[cfg(test)]
mod tests;
