use std::hash::Hash;

use hashbrown::HashSet;
use log::trace;

use super::Zone;
use crate::data_structs::coords::Interval;
use crate::data_structs::enums::Strand;
use crate::data_structs::typedef::{
    ChrStr,
    PosType,
};

/// Ordered, gap-free partition of `[1, length]` into [`Zone`]s for one strand
/// of one chromosome.
///
/// The track starts with `length == 0` and no zones. Inserting an interval
/// that ends past the current length appends one empty zone covering the
/// missing range, so the partition always satisfies
/// `zones[i].end() + 1 == zones[i + 1].start()`, `zones[0].start() == 1` and
/// `zones[last].end() == length`.
#[derive(Debug, Clone)]
pub struct StrandTrack<V>
where
    V: Eq + Hash + Clone, {
    strand: Strand,
    length: PosType,
    zones:  Vec<Zone<V>>,
}

impl<V> StrandTrack<V>
where
    V: Eq + Hash + Clone,
{
    /// Creates an empty, zero-length track. `strand` is the label attached to
    /// the zones this track reports.
    pub fn new(strand: Strand) -> Self {
        Self {
            strand,
            length: 0,
            zones: Vec::new(),
        }
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Last position covered by the track.
    pub fn length(&self) -> PosType {
        self.length
    }

    pub fn zones(&self) -> &[Zone<V>] {
        &self.zones
    }

    pub fn n_zones(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Index of the zone containing `pos`, or `None` when `pos` lies outside
    /// `[1, length]`.
    pub fn find_index_pos(
        &self,
        pos: PosType,
    ) -> Option<usize> {
        if pos < 1 || pos > self.length {
            return None;
        }
        Some(self.zone_index(pos))
    }

    /// Binary search for the first zone ending at or after `pos`.
    fn zone_index(
        &self,
        pos: PosType,
    ) -> usize {
        let idx = self
            .zones
            .partition_point(|zone| zone.end() < pos);
        debug_assert!(idx < self.zones.len() && self.zones[idx].contains_pos(pos));
        idx
    }

    /// Adds `value` to every position of `[start, end]`, splitting the zones
    /// at the interval boundaries.
    ///
    /// The caller guarantees `1 <= start <= end`.
    pub(crate) fn add_entry(
        &mut self,
        start: PosType,
        end: PosType,
        value: V,
    ) {
        debug_assert!(1 <= start && start <= end);

        if end > self.length {
            self.zones.push(Zone::empty(self.length + 1, end));
            self.length = end;
        }

        let index_start = self.zone_index(start);
        let index_end = self.zone_index(end);

        if index_start == index_end {
            self.insert_single(index_start, start, end, value);
        }
        else {
            self.insert_spanning(index_start, index_end, start, end, value);
        }

        debug_assert!(self.is_partition(), "broken partition on {} track", self.strand);
    }

    fn insert_single(
        &mut self,
        mut idx: usize,
        start: PosType,
        end: PosType,
        value: V,
    ) {
        if self.zones[idx].start() != start {
            self.split_at(idx, start);
            idx += 1;
        }
        if self.zones[idx].end() != end {
            self.split_at(idx, end + 1);
        }
        self.zones[idx].insert(value);
    }

    fn insert_spanning(
        &mut self,
        mut first: usize,
        mut last: usize,
        start: PosType,
        end: PosType,
        value: V,
    ) {
        if self.zones[first].start() != start {
            self.split_at(first, start);
            first += 1;
            last += 1;
        }
        if self.zones[last].end() != end {
            self.split_at(last, end + 1);
        }
        for zone in self.zones[first..=last].iter_mut() {
            zone.insert(value.clone());
        }
    }

    fn split_at(
        &mut self,
        idx: usize,
        pos: PosType,
    ) {
        trace!(
            "Splitting {} zone [{}, {}] at {}",
            self.strand,
            self.zones[idx].start(),
            self.zones[idx].end(),
            pos
        );
        let tail = self.zones[idx].split_off(pos);
        self.zones.insert(idx + 1, tail);
    }

    /// Zones intersecting `[start, stop]`, each keyed by its own coordinates.
    ///
    /// Returns `None` when `start < 1` or `stop < start`. The part of the
    /// query lying beyond [`length`](Self::length) is reported as exactly one
    /// unstranded entry with an empty value set.
    pub fn get_entries(
        &self,
        chr: &ChrStr,
        start: PosType,
        stop: PosType,
    ) -> Option<Vec<(Interval, HashSet<V>)>> {
        if start < 1 || stop < start {
            return None;
        }

        let mut entries = Vec::new();
        if let Some(first) = self.find_index_pos(start) {
            let last = self
                .find_index_pos(stop)
                .unwrap_or(self.zones.len() - 1);
            for zone in self.zones[first..=last]
                .iter()
                .filter(|zone| zone.intersects(start, stop))
            {
                entries.push((
                    Interval::new_unchecked(
                        chr.clone(),
                        zone.start(),
                        zone.end(),
                        self.strand,
                    ),
                    zone.values().clone(),
                ));
            }
        }

        if stop > self.length {
            entries.push((
                Interval::new_unchecked(
                    chr.clone(),
                    start.max(self.length + 1),
                    stop,
                    Strand::Unstranded,
                ),
                HashSet::new(),
            ));
        }

        Some(entries)
    }

    /// Every value stored on the track. Values spanning several zones are
    /// yielded once per zone.
    pub fn iter_values(&self) -> impl Iterator<Item = &V> {
        self.zones
            .iter()
            .flat_map(|zone| zone.values().iter())
    }

    /// Checks that the zones partition `[1, length]` without gaps or overlaps.
    pub fn is_partition(&self) -> bool {
        match (self.zones.first(), self.zones.last()) {
            (None, None) => self.length == 0,
            (Some(first), Some(last)) => {
                first.start() == 1
                    && last.end() == self.length
                    && self
                        .zones
                        .iter()
                        .all(|zone| zone.start() <= zone.end())
                    && self
                        .zones
                        .windows(2)
                        .all(|pair| pair[0].end() + 1 == pair[1].start())
            },
            _ => false,
        }
    }
}
