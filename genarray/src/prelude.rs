pub use crate::data_structs::coords::Interval;
pub use crate::data_structs::typedef::*;
pub use crate::data_structs::{
    ChromosomeZones,
    Entries,
    GenomicArray,
    Strand,
    StrandTrack,
    Zone,
};
pub use crate::error::GenomicArrayError;
pub use crate::io::*;
pub use crate::tools::count::*;
pub use crate::utils::THREAD_POOL;
