use std::fmt::Display;
use std::hash::Hash;
use std::io::Write;

use hashbrown::HashMap;
use itertools::Itertools;
use log::debug;
use rayon::prelude::*;

use super::{
    assign,
    Assignment,
    CountConfig,
};
use crate::data_structs::coords::Interval;
use crate::data_structs::GenomicArray;
use crate::utils::THREAD_POOL;

pub const NO_FEATURE_LABEL: &str = "__no_feature";
pub const AMBIGUOUS_LABEL: &str = "__ambiguous";

/// Per-feature read counts with the special `__no_feature` and
/// `__ambiguous` tallies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureCounts<V: Eq + Hash> {
    counts:     HashMap<V, u64>,
    no_feature: u64,
    ambiguous:  u64,
}

impl<V: Eq + Hash> Default for FeatureCounts<V> {
    fn default() -> Self {
        Self {
            counts:     HashMap::new(),
            no_feature: 0,
            ambiguous:  0,
        }
    }
}

impl<V: Eq + Hash + Clone> FeatureCounts<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates counts with every feature in `ids` present at zero, so that
    /// features without reads are still reported.
    pub fn with_features<I: IntoIterator<Item = V>>(ids: I) -> Self {
        Self {
            counts: ids.into_iter().map(|id| (id, 0)).collect(),
            ..Default::default()
        }
    }

    pub fn add(
        &mut self,
        assignment: Assignment<V>,
    ) {
        match assignment {
            Assignment::Feature(id) => *self.counts.entry(id).or_default() += 1,
            Assignment::NoFeature => self.no_feature += 1,
            Assignment::Ambiguous(_) => self.ambiguous += 1,
        }
    }

    pub fn merge(
        &mut self,
        other: Self,
    ) {
        for (id, count) in other.counts {
            *self.counts.entry(id).or_default() += count;
        }
        self.no_feature += other.no_feature;
        self.ambiguous += other.ambiguous;
    }

    pub fn get(
        &self,
        id: &V,
    ) -> u64 {
        self.counts.get(id).copied().unwrap_or(0)
    }

    pub fn no_feature(&self) -> u64 {
        self.no_feature
    }

    pub fn ambiguous(&self) -> u64 {
        self.ambiguous
    }

    /// Number of reads processed.
    pub fn total(&self) -> u64 {
        self.counts.values().sum::<u64>() + self.no_feature + self.ambiguous
    }
}

impl<V: Eq + Hash + Clone + Ord> FeatureCounts<V> {
    pub fn iter_sorted(&self) -> impl Iterator<Item = (&V, u64)> {
        self.counts
            .iter()
            .sorted_by(|a, b| a.0.cmp(b.0))
            .map(|(id, count)| (id, *count))
    }
}

impl<V: Eq + Hash + Clone + Ord + Display> FeatureCounts<V> {
    /// Writes tab-separated `feature\tcount` rows sorted by feature, followed
    /// by the `__no_feature` and `__ambiguous` rows.
    pub fn write_tsv<W: Write>(
        &self,
        writer: W,
    ) -> anyhow::Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(writer);
        for (id, count) in self.iter_sorted() {
            writer.write_record([id.to_string(), count.to_string()])?;
        }
        writer.write_record([NO_FEATURE_LABEL.to_string(), self.no_feature.to_string()])?;
        writer.write_record([AMBIGUOUS_LABEL.to_string(), self.ambiguous.to_string()])?;
        writer.flush()?;
        Ok(())
    }
}

/// Assigns a batch of reads in parallel on the global [`THREAD_POOL`].
///
/// The array must not be modified while reads are being counted.
pub fn count_reads<V>(
    array: &GenomicArray<V>,
    config: &CountConfig,
    reads: &[Vec<Interval>],
) -> FeatureCounts<V>
where
    V: Eq + Hash + Clone + Ord + Send + Sync, {
    debug!("Counting {} reads", reads.len());
    THREAD_POOL.install(|| {
        reads
            .par_iter()
            .fold(FeatureCounts::new, |mut counts, blocks| {
                counts.add(assign(array, config, blocks));
                counts
            })
            .reduce(FeatureCounts::new, |mut left, right| {
                left.merge(right);
                left
            })
    })
}
