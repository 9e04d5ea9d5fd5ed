//! # genarray
//!
//! `genarray` is a strand-aware index of genomic annotation. A
//! [`GenomicArray`] stores, for every chromosome and strand, an ordered
//! partition of the chromosome into zones. Each zone carries the set of
//! values (usually feature identifiers) annotated over all of its bases,
//! so a range query returns the exact breakdown of which features cover
//! which sub-ranges.
//!
//! The crate also ships the pieces needed to use the index in practice:
//! annotation loaders for BED, GFF3 and GTF, a BED12 reader of aligned read
//! blocks, and a read assignment tool in the spirit of `htseq-count`.
//!
//! If you do not want to use genarray as a crate, the `genarray` command-line
//! tool exposes the same functionality.
//!
//! Number of threads to be used can be configured with setting
//! `GENARRAY_NUM_THREADS` environment variable.
//!
//! ## Structure
//!
//! * [`data_structs`]: coordinates ([`Interval`], [`Strand`]) and the zone
//!   index itself ([`GenomicArray`], [`ChromosomeZones`], [`StrandTrack`],
//!   [`Zone`]).
//! * [`io`]: annotation, genome and read readers.
//! * [`tools`]: read assignment and counting.
//! * [`utils`]: the global thread pool and helper macros.
//! * [`error`]: the error type of the core index.
//!
//! ## Usage
//!
//! ```
//! use genarray::prelude::*;
//!
//! let mut array = GenomicArray::new();
//! array.add_entry(&"chr1:10-20:-".parse::<Interval>()?, "a")?;
//! array.add_entry(&"chr1:15-25:-".parse::<Interval>()?, "b")?;
//!
//! let entries = array.get_entries_in("chr1", 1, 100).unwrap();
//! let both = Interval::try_new("chr1", 15, 20, Strand::Minus)?;
//! assert_eq!(entries[&both].len(), 2);
//! # Ok::<(), genarray::error::GenomicArrayError>(())
//! ```
//!
//! ### Loading an annotation and counting reads
//!
//! ```no_run
//! use genarray::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let array = AnnotationLoader::new(AnnotationFormat::Gtf)
//!         .with_feature_type(Some("exon".to_string()))
//!         .load_path("genes.gtf")?;
//!
//!     let config = CountConfig::default().with_overlap_mode(OverlapMode::Union);
//!     let ids = array.features_ids().into_iter().map(FeatureId::from);
//!     let mut counts = FeatureCounts::with_features(ids);
//!     for batch in ReadBlocksReader::from_path("reads.bed")? {
//!         counts.merge(count_reads(&array, &config, &batch?));
//!     }
//!     counts.write_tsv(std::io::stdout())?;
//!     Ok(())
//! }
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod data_structs;
pub mod error;
pub mod io;
pub mod prelude;
pub mod tools;
pub mod utils;

pub use crate::data_structs::coords::Interval;
pub use crate::data_structs::typedef::{
    ChrStr,
    FeatureId,
    PosType,
};
pub use crate::data_structs::{
    ChromosomeZones,
    Entries,
    GenomicArray,
    Strand,
    StrandTrack,
    Zone,
};
pub use crate::error::{
    GenomicArrayError,
    Result,
};
pub use crate::io::{
    AnnotationFormat,
    AnnotationLoader,
    LoadSummary,
    ReadBlocksReader,
};
pub use crate::tools::count::{
    assign,
    count_reads,
    Assignment,
    CountConfig,
    FeatureCounts,
    OverlapMode,
    StrandMode,
};
