//! Aligned read blocks read from BED files.
//!
//! Every BED line is one aligned read. BED12 lines are split into their blocks
//! so that spliced reads are queried per aligned segment; shorter lines yield
//! a single block.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{
    anyhow,
    Context,
};

use crate::data_structs::coords::Interval;
use crate::data_structs::typedef::PosType;
use crate::data_structs::Strand;

pub const DEFAULT_BATCH_SIZE: usize = 100_000;

const BLOCK_COUNT_AUX: usize = 6;
const BLOCK_SIZES_AUX: usize = 7;
const BLOCK_STARTS_AUX: usize = 8;

/// Reads of one BED file, yielded in batches of block lists.
pub struct ReadBlocksReader<R: Read> {
    inner:      bio::io::bed::Reader<R>,
    batch_size: usize,
    n_records:  usize,
}

impl ReadBlocksReader<File> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        Ok(Self::new(file))
    }
}

impl<R: Read> ReadBlocksReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            inner:      bio::io::bed::Reader::new(reader),
            batch_size: DEFAULT_BATCH_SIZE,
            n_records:  0,
        }
    }

    pub fn with_batch_size(
        mut self,
        batch_size: usize,
    ) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Number of records read so far.
    pub fn n_records(&self) -> usize {
        self.n_records
    }

    /// Reads up to `batch_size` reads. `None` once the input is exhausted.
    pub fn next_batch(&mut self) -> anyhow::Result<Option<Vec<Vec<Interval>>>> {
        let mut batch = Vec::with_capacity(self.batch_size);
        for record in self.inner.records().take(self.batch_size) {
            self.n_records += 1;
            let record = record
                .with_context(|| format!("Bad BED record {}", self.n_records))?;
            let blocks = record_blocks(&record)
                .with_context(|| format!("Bad BED record {}", self.n_records))?;
            batch.push(blocks);
        }
        Ok((!batch.is_empty()).then_some(batch))
    }
}

impl<R: Read> Iterator for ReadBlocksReader<R> {
    type Item = anyhow::Result<Vec<Vec<Interval>>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_batch().transpose()
    }
}

/// Closed, 1-based blocks of one BED record.
pub fn record_blocks(record: &bio::io::bed::Record) -> anyhow::Result<Vec<Interval>> {
    let block_count = match record.aux(BLOCK_COUNT_AUX) {
        Some(count) if !count.is_empty() => count.parse::<usize>()?,
        _ => return Ok(vec![Interval::try_from(record)?]),
    };

    let parse_list = |idx: usize| -> anyhow::Result<Vec<u64>> {
        record
            .aux(idx)
            .ok_or_else(|| anyhow!("BED12 record is missing column {}", idx + 4))?
            .split(',')
            .filter(|s| !s.is_empty())
            .map(|s| s.trim().parse::<u64>().map_err(anyhow::Error::from))
            .collect()
    };
    let sizes = parse_list(BLOCK_SIZES_AUX)?;
    let starts = parse_list(BLOCK_STARTS_AUX)?;
    if sizes.len() != block_count || starts.len() != block_count {
        return Err(anyhow!(
            "blockCount {} does not match {} sizes and {} starts",
            block_count,
            sizes.len(),
            starts.len()
        ));
    }

    let strand = record
        .strand()
        .map(Strand::from)
        .unwrap_or_default();
    starts
        .iter()
        .zip(sizes.iter())
        .filter(|(_, size)| **size > 0)
        .map(|(rel_start, size)| {
            let start = record.start() + rel_start;
            let to_pos = |v: u64| {
                PosType::try_from(v)
                    .map_err(|_| anyhow!("Block position {} is out of range", v))
            };
            Interval::try_new(
                record.chrom(),
                to_pos(start + 1)?,
                to_pos(start + size)?,
                strand,
            )
            .map_err(anyhow::Error::from)
        })
        .collect()
}
