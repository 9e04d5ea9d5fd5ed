use std::hash::Hash;

use super::{
    Entries,
    StrandTrack,
};
use crate::data_structs::coords::Interval;
use crate::data_structs::enums::Strand;
use crate::data_structs::typedef::{
    ChrStr,
    PosType,
};

/// Plus and minus [`StrandTrack`]s of one chromosome.
///
/// Unstranded entries are stored on the plus track.
#[derive(Debug, Clone)]
pub struct ChromosomeZones<V>
where
    V: Eq + Hash + Clone, {
    plus:  StrandTrack<V>,
    minus: StrandTrack<V>,
}

impl<V> Default for ChromosomeZones<V>
where
    V: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ChromosomeZones<V>
where
    V: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            plus:  StrandTrack::new(Strand::Plus),
            minus: StrandTrack::new(Strand::Minus),
        }
    }

    pub fn plus(&self) -> &StrandTrack<V> {
        &self.plus
    }

    pub fn minus(&self) -> &StrandTrack<V> {
        &self.minus
    }

    /// Track an entry on `strand` is stored on.
    pub fn track(
        &self,
        strand: Strand,
    ) -> &StrandTrack<V> {
        match strand {
            Strand::Minus => &self.minus,
            Strand::Plus | Strand::Unstranded => &self.plus,
        }
    }

    fn track_mut(
        &mut self,
        strand: Strand,
    ) -> &mut StrandTrack<V> {
        match strand {
            Strand::Minus => &mut self.minus,
            Strand::Plus | Strand::Unstranded => &mut self.plus,
        }
    }

    pub(crate) fn add_entry(
        &mut self,
        interval: &Interval,
        value: V,
    ) {
        self.track_mut(interval.strand())
            .add_entry(interval.start(), interval.end(), value);
    }

    /// Union of both tracks' entries over `[start, stop]`. Bounds either
    /// track rejects (`start < 1`, `stop < start`) give an empty map.
    pub fn get_entries(
        &self,
        chr: &ChrStr,
        start: PosType,
        stop: PosType,
    ) -> Entries<V> {
        self.plus
            .get_entries(chr, start, stop)
            .into_iter()
            .chain(self.minus.get_entries(chr, start, stop))
            .flatten()
            .collect()
    }

    pub fn n_zones(&self) -> usize {
        self.plus.n_zones() + self.minus.n_zones()
    }

    pub fn iter_values(&self) -> impl Iterator<Item = &V> {
        self.plus
            .iter_values()
            .chain(self.minus.iter_values())
    }
}
