use std::hash::Hash;

use hashbrown::HashSet;

use crate::data_structs::typedef::PosType;

/// A contiguous sub-range of a strand track mapped to one value set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone<V>
where
    V: Eq + Hash + Clone, {
    start:  PosType,
    end:    PosType,
    values: HashSet<V>,
}

impl<V> Zone<V>
where
    V: Eq + Hash + Clone,
{
    /// Creates a zone without any values.
    pub(crate) fn empty(
        start: PosType,
        end: PosType,
    ) -> Self {
        debug_assert!(start <= end, "zone [{}, {}] is inverted", start, end);
        Self {
            start,
            end,
            values: HashSet::new(),
        }
    }

    pub fn start(&self) -> PosType {
        self.start
    }

    pub fn end(&self) -> PosType {
        self.end
    }

    pub fn values(&self) -> &HashSet<V> {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains_pos(
        &self,
        pos: PosType,
    ) -> bool {
        self.start <= pos && pos <= self.end
    }

    /// Checks if the zone shares at least one base with `[start, end]`.
    pub fn intersects(
        &self,
        start: PosType,
        end: PosType,
    ) -> bool {
        self.start <= end && start <= self.end
    }

    /// Adds a value. Returns `false` if it was already present.
    pub(crate) fn insert(
        &mut self,
        value: V,
    ) -> bool {
        self.values.insert(value)
    }

    /// Truncates this zone to end at `pos - 1` and returns the tail
    /// `[pos, old_end]`, which carries a copy of the value set.
    pub(crate) fn split_off(
        &mut self,
        pos: PosType,
    ) -> Self {
        debug_assert!(
            self.start < pos && pos <= self.end,
            "split position {} outside of ({}, {}]",
            pos,
            self.start,
            self.end
        );
        let tail = Self {
            start:  pos,
            end:    self.end,
            values: self.values.clone(),
        };
        self.end = pos - 1;
        tail
    }
}
