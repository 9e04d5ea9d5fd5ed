//! Genomic coordinates.
//!
//! [`Interval`] is a closed, 1-based range `[start, end]` on one chromosome
//! and strand. It is the key type of the zone index and the unit produced by
//! the annotation and read loaders.

mod interval;

pub use interval::Interval;
