use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::enums::Strand;
use crate::data_structs::typedef::{
    ChrStr,
    PosType,
};
use crate::error::{
    GenomicArrayError,
    Result,
};

/// Closed, 1-based genomic interval `[start, end]` on one chromosome.
///
/// An `Interval` is validated on construction (non-empty chromosome,
/// `start >= 1`, `end >= start`) and immutable afterwards, so every value of
/// this type can be inserted into a
/// [`GenomicArray`](crate::data_structs::GenomicArray) as is.
///
/// Intervals are ordered by chromosome, start and end. The strand only breaks
/// ties, which keeps zones of the plus and minus tracks with equal coordinates
/// apart when they are used as map keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
    chr:    ChrStr,
    start:  PosType,
    end:    PosType,
    strand: Strand,
}

#[derive(Deserialize)]
struct RawInterval {
    chr:    ChrStr,
    start:  PosType,
    end:    PosType,
    #[serde(default)]
    strand: Strand,
}

impl TryFrom<RawInterval> for Interval {
    type Error = GenomicArrayError;

    fn try_from(value: RawInterval) -> Result<Self> {
        Interval::try_new(value.chr.as_str(), value.start, value.end, value.strand)
    }
}

impl Interval {
    /// Creates a new `Interval`, checking its invariants.
    pub fn try_new(
        chr: &str,
        start: PosType,
        end: PosType,
        strand: Strand,
    ) -> Result<Self> {
        let interval = Self::new_unchecked(ChrStr::from(chr), start, end, strand);
        interval.validate()?;
        Ok(interval)
    }

    /// Same as [`Interval::try_new`] but takes the strand as a `+`/`-`/`.`
    /// code.
    pub fn from_parts(
        chr: &str,
        start: PosType,
        end: PosType,
        strand: &str,
    ) -> Result<Self> {
        Self::try_new(chr, start, end, Strand::from_str(strand)?)
    }

    pub(crate) fn new_unchecked(
        chr: ChrStr,
        start: PosType,
        end: PosType,
        strand: Strand,
    ) -> Self {
        Self {
            chr,
            start,
            end,
            strand,
        }
    }

    /// Checks the interval invariants.
    pub fn validate(&self) -> Result<()> {
        if self.chr.is_empty() {
            return Err(GenomicArrayError::invalid("chromosome name is empty"));
        }
        if self.start < 1 {
            return Err(GenomicArrayError::invalid(format!(
                "start position must be >= 1, got {}",
                self.start
            )));
        }
        if self.end < self.start {
            return Err(GenomicArrayError::invalid(format!(
                "end position {} is less than start position {}",
                self.end, self.start
            )));
        }
        Ok(())
    }

    pub fn chr(&self) -> &ChrStr {
        &self.chr
    }

    pub fn start(&self) -> PosType {
        self.start
    }

    pub fn end(&self) -> PosType {
        self.end
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Number of bases covered. Both ends are inclusive.
    pub fn length(&self) -> PosType {
        self.end - self.start + 1
    }

    /// Returns a copy of the interval on another strand.
    pub fn with_strand(
        &self,
        strand: Strand,
    ) -> Self {
        Self {
            strand,
            ..self.clone()
        }
    }

    pub fn contains_pos(
        &self,
        pos: PosType,
    ) -> bool {
        self.start <= pos && pos <= self.end
    }

    /// Checks if this interval is fully contained within another interval.
    /// Strand is ignored.
    pub fn is_in(
        &self,
        other: &Self,
    ) -> bool {
        self.chr == other.chr && self.start >= other.start && self.end <= other.end
    }

    /// Checks if `other` is fully contained within this interval.
    pub fn contains(
        &self,
        other: &Self,
    ) -> bool {
        other.is_in(self)
    }

    /// Checks if the two intervals share at least one base. Strand is ignored.
    pub fn overlaps(
        &self,
        other: &Self,
    ) -> bool {
        self.chr == other.chr && self.start <= other.end && other.start <= self.end
    }

    /// Number of bases shared with `[start, end]`.
    pub fn overlap_len(
        &self,
        start: PosType,
        end: PosType,
    ) -> PosType {
        let lo = self.start.max(start);
        let hi = self.end.min(end);
        if lo > hi {
            0
        }
        else {
            hi - lo + 1
        }
    }
}

impl Ord for Interval {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        self.chr
            .as_str()
            .cmp(other.chr.as_str())
            .then(self.start.cmp(&other.start))
            .then(self.end.cmp(&other.end))
            .then(self.strand.cmp(&other.strand))
    }
}

impl PartialOrd for Interval {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Interval {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{}:{}-{} ({})",
            self.chr, self.start, self.end, self.strand
        )
    }
}

/// Parses `chr:start-end`, optionally followed by a strand as in the
/// [`Display`] output (`chr1:100-200 (+)`) or as a third field
/// (`chr1:100-200:-`). Thousands separators are accepted.
impl FromStr for Interval {
    type Err = GenomicArrayError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (region, strand) = match s.rsplit_once(' ') {
            Some((region, strand)) => {
                let code = strand
                    .strip_prefix('(')
                    .and_then(|s| s.strip_suffix(')'))
                    .ok_or_else(|| {
                        GenomicArrayError::invalid(format!(
                            "malformed strand in region '{}'",
                            s
                        ))
                    })?;
                (region, Strand::from_str(code)?)
            },
            None => (s, Strand::Unstranded),
        };

        let (region, strand) = match region.rsplit_once(':') {
            Some((head, code)) if Strand::from_str(code).is_ok() => {
                (head, Strand::from_str(code)?)
            },
            _ => (region, strand),
        };

        let (chr, range) = region.rsplit_once(':').ok_or_else(|| {
            GenomicArrayError::invalid(format!(
                "region '{}' is not in chr:start-end form",
                s
            ))
        })?;
        let (start, end) = range.split_once('-').ok_or_else(|| {
            GenomicArrayError::invalid(format!(
                "region '{}' is not in chr:start-end form",
                s
            ))
        })?;
        let parse_pos = |v: &str| {
            v.replace(',', "").parse::<PosType>().map_err(|e| {
                GenomicArrayError::invalid(format!(
                    "bad position '{}' in region '{}': {}",
                    v, s, e
                ))
            })
        };

        Interval::try_new(chr, parse_pos(start)?, parse_pos(end)?, strand)
    }
}

/// Converts a 0-based, half-open BED record into a closed, 1-based interval.
impl TryFrom<&bio::io::bed::Record> for Interval {
    type Error = GenomicArrayError;

    fn try_from(value: &bio::io::bed::Record) -> Result<Self> {
        let start = PosType::try_from(value.start() + 1).map_err(|_| {
            GenomicArrayError::invalid(format!(
                "BED start {} does not fit into a position",
                value.start()
            ))
        })?;
        let end = PosType::try_from(value.end()).map_err(|_| {
            GenomicArrayError::invalid(format!(
                "BED end {} does not fit into a position",
                value.end()
            ))
        })?;
        let strand = value.strand().map(Strand::from).unwrap_or_default();
        Interval::try_new(value.chrom(), start, end, strand)
    }
}

/// GFF coordinates are already closed and 1-based.
impl TryFrom<&bio::io::gff::Record> for Interval {
    type Error = GenomicArrayError;

    fn try_from(value: &bio::io::gff::Record) -> Result<Self> {
        let convert = |v: u64| {
            PosType::try_from(v).map_err(|_| {
                GenomicArrayError::invalid(format!(
                    "GFF position {} does not fit into a position",
                    v
                ))
            })
        };
        let strand = value.strand().map(Strand::from).unwrap_or_default();
        Interval::try_new(
            value.seqname(),
            convert(*value.start())?,
            convert(*value.end())?,
            strand,
        )
    }
}
