//! Readers that feed the zone index and its consumers.
//!
//! - [`annotation`]: BED/GFF3/GTF feature records into a
//!   [`GenomicArray`](crate::data_structs::GenomicArray).
//! - [`genome`]: chromosome names from FASTA or FASTA index files.
//! - [`reads`]: aligned read blocks from BED/BED12 files.

pub mod annotation;
pub mod genome;
pub mod reads;

pub use annotation::{
    AnnotationFormat,
    AnnotationLoader,
    LoadSummary,
};
pub use genome::{
    read_chrs_from_fa,
    read_chrs_from_fai,
};
pub use reads::{
    record_blocks,
    ReadBlocksReader,
};
