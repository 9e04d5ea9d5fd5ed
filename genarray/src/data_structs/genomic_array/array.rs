use std::collections::BTreeSet;
use std::fmt::Display;
use std::hash::Hash;

use hashbrown::HashMap;
use itertools::Itertools;
use log::debug;

use super::{
    ChromosomeZones,
    Entries,
};
use crate::data_structs::coords::Interval;
use crate::data_structs::typedef::{
    ChrStr,
    PosType,
};
use crate::error::{
    GenomicArrayError,
    Result,
};

/// Strand-aware zone index over a set of chromosomes.
///
/// Every chromosome holds two independent partitions (plus and minus track)
/// into zones, each zone tagged with the set of values whose intervals cover
/// it. The index grows with every [`add_entry`](Self::add_entry) and is
/// queried with [`get_entries`](Self::get_entries).
///
/// The structure has no internal locking. Build it on one thread, then share
/// `&GenomicArray` for concurrent queries.
#[derive(Debug, Clone)]
pub struct GenomicArray<V>
where
    V: Eq + Hash + Clone, {
    inner: HashMap<ChrStr, ChromosomeZones<V>>,
}

impl<V> Default for GenomicArray<V>
where
    V: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }
}

impl<V> GenomicArray<V>
where
    V: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an empty chromosome. Does nothing if it is already known.
    pub fn add_chromosome(
        &mut self,
        name: &str,
    ) -> Result<()> {
        if name.is_empty() {
            return Err(GenomicArrayError::invalid("chromosome name is empty"));
        }
        if !self.inner.contains_key(name) {
            debug!("Registering chromosome {}", name);
            self.inner
                .insert(ChrStr::from(name), ChromosomeZones::new());
        }
        Ok(())
    }

    /// Registers every chromosome of a genome description. Names are
    /// validated before any of them is registered.
    pub fn add_chromosomes<I, S>(
        &mut self,
        names: I,
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>, {
        let names = names.into_iter().collect_vec();
        if names.iter().any(|name| name.as_ref().is_empty()) {
            return Err(GenomicArrayError::invalid(
                "genome description contains an empty chromosome name",
            ));
        }
        for name in names.iter() {
            self.add_chromosome(name.as_ref())?;
        }
        Ok(())
    }

    /// Tags every position of `interval` with `value`, registering the
    /// chromosome on first use.
    ///
    /// The interval is validated before the index is touched, so a rejected
    /// call leaves the array unchanged.
    pub fn add_entry(
        &mut self,
        interval: &Interval,
        value: V,
    ) -> Result<()> {
        interval.validate()?;
        self.insert(interval, value);
        Ok(())
    }

    fn insert(
        &mut self,
        interval: &Interval,
        value: V,
    ) {
        if !self.inner.contains_key(interval.chr().as_str()) {
            debug!("Registering chromosome {}", interval.chr());
        }
        self.inner
            .entry(interval.chr().clone())
            .or_default()
            .add_entry(interval, value);
    }

    /// Zones overlapping `interval` on both strands. The strand of `interval`
    /// is not used.
    ///
    /// Returns `None` if the chromosome is unknown. A known chromosome with
    /// no annotation in the range yields a single empty-valued gap entry.
    pub fn get_entries(
        &self,
        interval: &Interval,
    ) -> Option<Entries<V>> {
        self.get_entries_in(
            interval.chr().as_str(),
            interval.start(),
            interval.end(),
        )
    }

    /// Same as [`get_entries`](Self::get_entries) for `chr:start-stop`.
    /// On a known chromosome, `start < 1` or `stop < start` yields an empty
    /// map, never `None`.
    pub fn get_entries_in(
        &self,
        chr: &str,
        start: PosType,
        stop: PosType,
    ) -> Option<Entries<V>> {
        let (key, zones) = self.inner.get_key_value(chr)?;
        Some(zones.get_entries(key, start, stop))
    }

    pub fn contains_chromosome(
        &self,
        name: &str,
    ) -> bool {
        self.inner.contains_key(name)
    }

    /// Sorted names of all registered chromosomes.
    pub fn chromosome_names(&self) -> BTreeSet<ChrStr> {
        self.inner.keys().cloned().collect()
    }

    pub fn chromosome(
        &self,
        name: &str,
    ) -> Option<&ChromosomeZones<V>> {
        self.inner.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ChrStr, &ChromosomeZones<V>)> {
        self.inner.iter()
    }

    pub fn n_chr(&self) -> usize {
        self.inner.len()
    }

    pub fn n_zones(&self) -> usize {
        self.inner
            .values()
            .map(ChromosomeZones::n_zones)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Removes every chromosome and zone.
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl<V> GenomicArray<V>
where
    V: Eq + Hash + Clone + Display,
{
    /// Sorted string forms of every value stored in the array.
    pub fn features_ids(&self) -> BTreeSet<String> {
        self.inner
            .values()
            .flat_map(ChromosomeZones::iter_values)
            .unique()
            .map(|value| value.to_string())
            .collect()
    }
}

impl<V> FromIterator<(Interval, V)> for GenomicArray<V>
where
    V: Eq + Hash + Clone,
{
    fn from_iter<T: IntoIterator<Item = (Interval, V)>>(iter: T) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<V> Extend<(Interval, V)> for GenomicArray<V>
where
    V: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (Interval, V)>>(
        &mut self,
        iter: T,
    ) {
        for (interval, value) in iter {
            self.insert(&interval, value);
        }
    }
}
