use arcstr::ArcStr;
use smallstr::SmallString;

pub const SMALLSTR_SIZE: usize = 20;
/// Chromosome (sequence) name. Most names fit inline.
pub type ChrStr = SmallString<[u8; SMALLSTR_SIZE]>;
/// 1-based, closed genomic coordinate.
pub type PosType = u32;
/// Feature identifier produced by the annotation loaders.
pub type FeatureId = ArcStr;
