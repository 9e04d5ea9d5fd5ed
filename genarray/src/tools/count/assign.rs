use std::hash::Hash;

use hashbrown::HashSet;
use itertools::Itertools;

use super::{
    Assignment,
    CountConfig,
    OverlapMode,
    StrandMode,
};
use crate::data_structs::coords::Interval;
use crate::data_structs::typedef::PosType;
use crate::data_structs::{
    ChromosomeZones,
    GenomicArray,
};

/// Resolves one read, given as its aligned `blocks`, to a feature.
///
/// Blocks on chromosomes unknown to `array` contribute nothing.
pub fn assign<V>(
    array: &GenomicArray<V>,
    config: &CountConfig,
    blocks: &[Interval],
) -> Assignment<V>
where
    V: Eq + Hash + Clone + Ord, {
    let mut features: Option<HashSet<V>> = None;

    for block in blocks {
        let Some(zones) = array.chromosome(block.chr().as_str())
        else {
            continue;
        };
        for (start, end, values) in block_pieces(zones, block, config.strand_mode()) {
            if end - start + 1 < config.min_overlap() {
                continue;
            }
            match config.overlap_mode() {
                OverlapMode::Union => {
                    features.get_or_insert_with(HashSet::new).extend(values);
                },
                OverlapMode::IntersectionNonempty if values.is_empty() => {},
                OverlapMode::IntersectionStrict | OverlapMode::IntersectionNonempty => {
                    features = Some(match features {
                        None => values,
                        Some(acc) => {
                            acc.into_iter()
                                .filter(|v| values.contains(v))
                                .collect()
                        },
                    });
                },
            }
        }
    }

    let features = features.unwrap_or_default();
    match features.len() {
        0 => Assignment::NoFeature,
        1 => {
            features
                .into_iter()
                .next()
                .map(Assignment::Feature)
                .unwrap_or(Assignment::NoFeature)
        },
        _ => Assignment::Ambiguous(features.into_iter().sorted().collect()),
    }
}

/// Splits `block` into consecutive pieces, each with the union of the values
/// covering it on the tracks selected by `strand_mode`. Only those tracks
/// contribute zones or uncovered gaps.
fn block_pieces<V>(
    zones: &ChromosomeZones<V>,
    block: &Interval,
    strand_mode: StrandMode,
) -> Vec<(PosType, PosType, HashSet<V>)>
where
    V: Eq + Hash + Clone, {
    let (start, end) = (block.start(), block.end());
    // Every track covers [start, end] without gaps: zones first, then the
    // trailing gap beyond its length.
    let mut per_track = strand_mode
        .tracks(block.strand())
        .iter()
        .map(|strand| {
            zones
                .track(*strand)
                .get_entries(block.chr(), start, end)
                .unwrap_or_default()
                .into_iter()
                .map(|(zone, values)| (zone.start().max(start), zone.end().min(end), values))
                .collect_vec()
        })
        .collect_vec();
    if per_track.len() == 1 {
        return per_track.pop().unwrap_or_default();
    }

    let bounds = per_track
        .iter()
        .flatten()
        .map(|(piece_start, ..)| *piece_start)
        .sorted()
        .dedup()
        .collect_vec();
    let mut cursors = vec![0usize; per_track.len()];
    bounds
        .iter()
        .enumerate()
        .map(|(i, &piece_start)| {
            let piece_end = bounds.get(i + 1).map_or(end, |next| next - 1);
            let mut values = HashSet::new();
            for (track, cursor) in per_track.iter().zip(cursors.iter_mut()) {
                while *cursor + 1 < track.len() && track[*cursor].1 < piece_start {
                    *cursor += 1;
                }
                if let Some((_, _, covering)) = track.get(*cursor) {
                    values.extend(covering.iter().cloned());
                }
            }
            (piece_start, piece_end, values)
        })
        .collect()
}
