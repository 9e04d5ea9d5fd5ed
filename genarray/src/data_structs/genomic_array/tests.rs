use std::str::FromStr;

use hashbrown::HashSet;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rstest::{
    fixture,
    rstest,
};

use super::*;
use crate::data_structs::enums::Strand;
use crate::data_structs::typedef::{
    ChrStr,
    PosType,
};
use crate::error::GenomicArrayError;

fn iv(
    chr: &str,
    start: PosType,
    end: PosType,
    strand: &str,
) -> Interval {
    Interval::from_parts(chr, start, end, strand).unwrap()
}

fn set(values: &[&'static str]) -> HashSet<&'static str> {
    values.iter().copied().collect()
}

/// Entries as `(start, end, strand, sorted values)` for easy comparison.
fn flatten(entries: &Entries<&'static str>) -> Vec<(PosType, PosType, Strand, Vec<&'static str>)> {
    entries
        .iter()
        .map(|(k, v)| {
            let mut values = v.iter().copied().collect::<Vec<_>>();
            values.sort();
            (k.start(), k.end(), k.strand(), values)
        })
        .collect()
}

fn track_layout<V: Eq + std::hash::Hash + Clone>(track: &StrandTrack<V>) -> Vec<(PosType, PosType)> {
    track
        .zones()
        .iter()
        .map(|z| (z.start(), z.end()))
        .collect()
}

#[fixture]
fn overlapping_minus() -> GenomicArray<&'static str> {
    let mut array = GenomicArray::new();
    array.add_entry(&iv("chr1", 10, 20, "-"), "a").unwrap();
    array.add_entry(&iv("chr1", 15, 25, "-"), "b").unwrap();
    array
}

// --- End-to-end scenarios ---

#[test]
fn unstranded_entry_is_reported_with_own_zone() {
    let mut array = GenomicArray::new();
    array.add_entry(&iv("chr1", 10, 50, "."), "a").unwrap();

    let entries = array.get_entries_in("chr1", 1, 100).unwrap();
    let zone = Interval::try_new("chr1", 10, 50, Strand::Plus).unwrap();
    assert_eq!(entries.get(&zone), Some(&set(&["a"])));
}

#[rstest]
fn overlapping_entries_split_zones(overlapping_minus: GenomicArray<&'static str>) {
    let entries = overlapping_minus
        .get_entries_in("chr1", 1, 100)
        .unwrap();
    let flat = flatten(&entries);

    assert!(flat.contains(&(10, 14, Strand::Minus, vec!["a"])));
    assert!(flat.contains(&(15, 20, Strand::Minus, vec!["a", "b"])));
    assert!(flat.contains(&(21, 25, Strand::Minus, vec!["b"])));
    assert!(flat.contains(&(1, 9, Strand::Minus, vec![])));
    // Both tracks end before 100; the uncovered tails are empty gaps.
    assert!(flat.contains(&(26, 100, Strand::Unstranded, vec![])));
    assert!(flat.contains(&(1, 100, Strand::Unstranded, vec![])));
    assert_eq!(flat.len(), 6);
}

#[test]
fn same_interval_twice_merges_values() {
    let mut array = GenomicArray::new();
    array.add_entry(&iv("chr1", 10, 40, "."), "a").unwrap();
    array.add_entry(&iv("chr1", 10, 40, "."), "b").unwrap();

    let entries = array.get_entries_in("chr1", 10, 40).unwrap();
    let zone = Interval::try_new("chr1", 10, 40, Strand::Plus).unwrap();
    let values = entries.get(&zone).unwrap();
    assert_eq!(values.len(), 2);
    assert_eq!(values, &set(&["a", "b"]));

    let track = array.chromosome("chr1").unwrap().plus();
    assert_eq!(track_layout(track), vec![(1, 9), (10, 40)]);
}

#[test]
fn unknown_chromosome_is_absent() {
    let mut array = GenomicArray::new();
    array.add_entry(&iv("chr1", 1, 10, "+"), "a").unwrap();
    assert!(array.get_entries_in("chrX", 1, 10).is_none());
    assert!(array
        .get_entries(&iv("chrX", 1, 10, "."))
        .is_none());
}

#[test]
fn registered_chromosome_without_entries_yields_gap() {
    let mut array: GenomicArray<&'static str> = GenomicArray::new();
    array.add_chromosomes(["chr1", "chr2"]).unwrap();

    assert!(array.contains_chromosome("chr2"));
    assert_eq!(array.chromosome_names().len(), 2);

    let entries = array.get_entries_in("chr2", 1, 10).unwrap();
    assert_eq!(entries.len(), 1);
    let (gap, values) = entries.iter().next().unwrap();
    assert_eq!((gap.start(), gap.end()), (1, 10));
    assert_eq!(gap.strand(), Strand::Unstranded);
    assert!(values.is_empty());
}

// --- StrandTrack ---

#[test]
fn find_index_pos_bounds() {
    let mut track = StrandTrack::new(Strand::Plus);
    assert_eq!(track.find_index_pos(1), None);

    track.add_entry(5, 10, 1u32);
    track.add_entry(20, 30, 2u32);
    assert_eq!(track_layout(&track), vec![(1, 4), (5, 10), (11, 19), (20, 30)]);

    assert_eq!(track.find_index_pos(0), None);
    assert_eq!(track.find_index_pos(1), Some(0));
    assert_eq!(track.find_index_pos(4), Some(0));
    assert_eq!(track.find_index_pos(5), Some(1));
    assert_eq!(track.find_index_pos(19), Some(2));
    assert_eq!(track.find_index_pos(30), Some(3));
    assert_eq!(track.find_index_pos(31), None);
}

#[test]
fn entry_inside_single_zone_splits_in_three() {
    let mut track = StrandTrack::new(Strand::Plus);
    track.add_entry(1, 100, "outer");
    track.add_entry(40, 60, "inner");

    assert_eq!(track_layout(&track), vec![(1, 39), (40, 60), (61, 100)]);
    assert_eq!(track.zones()[0].values(), &set(&["outer"]));
    assert_eq!(track.zones()[1].values(), &set(&["outer", "inner"]));
    assert_eq!(track.zones()[2].values(), &set(&["outer"]));
}

#[test]
fn aligned_boundaries_do_not_create_empty_zones() {
    let mut track = StrandTrack::new(Strand::Minus);
    track.add_entry(1, 10, "a");
    track.add_entry(1, 10, "b");
    track.add_entry(1, 5, "c");
    track.add_entry(6, 10, "d");

    assert_eq!(track_layout(&track), vec![(1, 5), (6, 10)]);
    assert!(track.is_partition());
}

#[test]
fn single_base_entries() {
    let mut track = StrandTrack::new(Strand::Plus);
    track.add_entry(1, 1, "first");
    track.add_entry(7, 7, "seventh");
    track.add_entry(7, 7, "seventh");

    assert_eq!(track_layout(&track), vec![(1, 1), (2, 6), (7, 7)]);
    assert_eq!(track.zones()[2].values(), &set(&["seventh"]));
}

#[test]
fn spanning_entry_tags_every_inner_zone() {
    let mut track = StrandTrack::new(Strand::Plus);
    track.add_entry(10, 20, "a");
    track.add_entry(30, 40, "b");
    track.add_entry(15, 35, "c");

    assert_eq!(
        track_layout(&track),
        vec![(1, 9), (10, 14), (15, 20), (21, 29), (30, 35), (36, 40)]
    );
    let tagged = track
        .zones()
        .iter()
        .filter(|z| z.values().contains("c"))
        .map(|z| (z.start(), z.end()))
        .collect::<Vec<_>>();
    assert_eq!(tagged, vec![(15, 20), (21, 29), (30, 35)]);
}

#[test]
fn split_copies_value_set() {
    let mut zone: Zone<&str> = Zone::empty(1, 100);
    zone.insert("a");
    zone.insert("b");
    let tail = zone.split_off(51);

    assert_eq!((zone.start(), zone.end()), (1, 50));
    assert_eq!((tail.start(), tail.end()), (51, 100));
    assert_eq!(zone.values(), tail.values());
}

#[test]
fn coverage_never_shrinks() {
    let mut track = StrandTrack::new(Strand::Plus);
    track.add_entry(100, 200, 0u8);
    assert_eq!(track.length(), 200);
    track.add_entry(10, 20, 1u8);
    assert_eq!(track.length(), 200);
    track.add_entry(150, 300, 2u8);
    assert_eq!(track.length(), 300);
}

#[rstest]
#[case::query_inside_coverage(12, 18, vec![(10, 20, Strand::Plus)])]
#[case::query_touching_zone_edges(9, 10, vec![(1, 9, Strand::Plus), (10, 20, Strand::Plus)])]
#[case::query_ending_on_last_base(20, 20, vec![(10, 20, Strand::Plus)])]
#[case::query_crossing_end(15, 25, vec![(10, 20, Strand::Plus), (21, 25, Strand::Unstranded)])]
#[case::query_after_end(21, 30, vec![(21, 30, Strand::Unstranded)])]
#[case::query_far_after_end(50, 60, vec![(50, 60, Strand::Unstranded)])]
fn trailing_gap_boundaries(
    #[case] start: PosType,
    #[case] stop: PosType,
    #[case] expected: Vec<(PosType, PosType, Strand)>,
) {
    let mut track = StrandTrack::new(Strand::Plus);
    track.add_entry(10, 20, "a");
    let chr = ChrStr::from("chr1");

    let entries = track.get_entries(&chr, start, stop).unwrap();
    let got = entries
        .iter()
        .map(|(k, _)| (k.start(), k.end(), k.strand()))
        .collect::<Vec<_>>();
    assert_eq!(got, expected);
    // Gap entries never carry values.
    assert!(entries
        .iter()
        .filter(|(k, _)| k.strand() == Strand::Unstranded)
        .all(|(_, v)| v.is_empty()));
}

#[rstest]
#[case::zero_start(0, 10)]
#[case::inverted(10, 5)]
fn invalid_query_bounds_on_known_chromosome_are_empty(
    #[case] start: PosType,
    #[case] stop: PosType,
) {
    let mut array = GenomicArray::new();
    array.add_entry(&iv("chr1", 1, 20, "+"), "a").unwrap();
    array.add_chromosome("chr2").unwrap();

    assert_eq!(array.get_entries_in("chr1", start, stop), Some(Entries::new()));
    assert_eq!(array.get_entries_in("chr2", start, stop), Some(Entries::new()));
    assert!(array.get_entries_in("chrX", start, stop).is_none());
}

#[rstest]
#[case::zero_start(0, 10)]
#[case::inverted(10, 5)]
fn invalid_query_bounds_are_absent_on_track(
    #[case] start: PosType,
    #[case] stop: PosType,
) {
    let mut track = StrandTrack::new(Strand::Minus);
    track.add_entry(1, 20, "a");
    assert!(track.get_entries(&ChrStr::from("chr1"), start, stop).is_none());
}

// --- Strand dispatch ---

#[test]
fn strands_are_partitioned_independently() {
    let mut array = GenomicArray::new();
    array.add_entry(&iv("chr1", 10, 20, "+"), "plus").unwrap();
    array.add_entry(&iv("chr1", 10, 20, "-"), "minus").unwrap();
    array.add_entry(&iv("chr1", 15, 30, "."), "none").unwrap();

    let chrom = array.chromosome("chr1").unwrap();
    assert_eq!(track_layout(chrom.plus()), vec![(1, 9), (10, 14), (15, 20), (21, 30)]);
    assert_eq!(track_layout(chrom.minus()), vec![(1, 9), (10, 20)]);
    assert_eq!(chrom.plus().length(), 30);
    assert_eq!(chrom.minus().length(), 20);

    let entries = array.get_entries_in("chr1", 10, 20).unwrap();
    let flat = flatten(&entries);
    assert!(flat.contains(&(10, 20, Strand::Minus, vec!["minus"])));
    assert!(flat.contains(&(10, 14, Strand::Plus, vec!["plus"])));
    assert!(flat.contains(&(15, 20, Strand::Plus, vec!["none", "plus"])));
    assert_eq!(flat.len(), 3);
}

#[test]
fn identical_gaps_from_both_tracks_collapse() {
    let mut array: GenomicArray<u32> = GenomicArray::new();
    array.add_entry(&iv("chr1", 1, 10, "+"), 1).unwrap();
    array.add_entry(&iv("chr1", 1, 10, "-"), 2).unwrap();

    let entries = array.get_entries_in("chr1", 5, 40).unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(
        entries
            .keys()
            .filter(|k| k.strand() == Strand::Unstranded)
            .count(),
        1
    );
}

// --- GenomicArray surface ---

#[test]
fn rejected_chromosome_names_leave_array_unchanged() {
    let mut array: GenomicArray<u32> = GenomicArray::new();
    let res = array.add_chromosomes(["chr1", "", "chr3"]);
    assert!(matches!(res, Err(GenomicArrayError::InvalidArgument(_))));
    assert!(array.is_empty());

    assert!(array.add_chromosome("").is_err());
    array.add_chromosome("chr1").unwrap();
    array.add_chromosome("chr1").unwrap();
    assert_eq!(array.n_chr(), 1);
    assert_eq!(array.n_zones(), 0);
}

#[test]
fn invalid_strand_code_is_rejected() {
    let err = Interval::from_parts("chr1", 1, 10, "*").unwrap_err();
    assert!(matches!(err, GenomicArrayError::InvalidArgument(_)));
}

#[test]
fn features_ids_are_sorted_and_unique() {
    let mut array = GenomicArray::new();
    array.add_entry(&iv("chr2", 1, 100, "+"), "geneB").unwrap();
    array.add_entry(&iv("chr1", 50, 60, "-"), "geneA").unwrap();
    array.add_entry(&iv("chr1", 10, 80, "-"), "geneC").unwrap();
    array.add_entry(&iv("chr2", 20, 30, "."), "geneA").unwrap();

    let ids = array.features_ids().into_iter().collect::<Vec<_>>();
    assert_eq!(ids, vec!["geneA", "geneB", "geneC"]);
}

#[test]
fn clear_removes_everything() {
    let mut array = GenomicArray::new();
    array.add_entry(&iv("chr1", 1, 10, "+"), 1u8).unwrap();
    array.add_chromosome("chr2").unwrap();
    array.clear();

    assert!(array.is_empty());
    assert!(!array.contains_chromosome("chr1"));
    assert!(array.get_entries_in("chr1", 1, 10).is_none());
    assert!(array.features_ids().is_empty());
}

#[test]
fn collect_from_iterator() {
    let array: GenomicArray<&str> = vec![
        (iv("chr1", 1, 10, "+"), "a"),
        (iv("chr2", 5, 15, "-"), "b"),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        array
            .chromosome_names()
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>(),
        vec!["chr1", "chr2"]
    );
    assert_eq!(array.features_ids().len(), 2);
}

#[test]
fn deserialized_intervals_are_validated() {
    let ok: Interval =
        serde_json::from_str(r#"{"chr":"chr1","start":5,"end":9,"strand":"-"}"#)
            .unwrap();
    assert_eq!(ok, Interval::from_str("chr1:5-9:-").unwrap());

    let bad = serde_json::from_str::<Interval>(r#"{"chr":"chr1","start":0,"end":9}"#);
    assert!(bad.is_err());
}

// --- Properties ---

fn random_intervals(
    rng: &mut ChaCha8Rng,
    n: usize,
) -> Vec<(Interval, u32)> {
    use rand::Rng;
    let strands = ["+", "-", "."];
    (0..n as u32)
        .map(|i| {
            let start = rng.gen_range(1..500);
            let len = rng.gen_range(0..80);
            let strand = strands[rng.gen_range(0..3)];
            (iv("chr1", start, start + len, strand), i)
        })
        .collect()
}

#[rstest]
#[case(1)]
#[case(7)]
#[case(42)]
fn partition_invariant_holds_after_every_insert(#[case] seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut array = GenomicArray::new();
    let mut lengths = (0, 0);

    for (interval, value) in random_intervals(&mut rng, 200) {
        array.add_entry(&interval, value).unwrap();
        let chrom = array.chromosome("chr1").unwrap();
        assert!(chrom.plus().is_partition());
        assert!(chrom.minus().is_partition());
        assert!(chrom.plus().length() >= lengths.0);
        assert!(chrom.minus().length() >= lengths.1);
        lengths = (chrom.plus().length(), chrom.minus().length());

        let entries = array.get_entries(&interval).unwrap();
        let track_strand = if interval.strand().is_minus() {
            Strand::Minus
        }
        else {
            Strand::Plus
        };
        let own = entries
            .iter()
            .filter(|(k, _)| k.strand() == track_strand)
            .collect::<Vec<_>>();
        assert!(!own.is_empty());
        assert!(own.iter().all(|(_, v)| v.contains(&value)));
    }
}

#[test]
fn repeated_insertion_is_idempotent() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let intervals = random_intervals(&mut rng, 100);

    let once: GenomicArray<u32> = intervals.iter().cloned().collect();
    let twice: GenomicArray<u32> = intervals
        .iter()
        .cloned()
        .chain(intervals.iter().cloned())
        .collect();

    let a = once.get_entries_in("chr1", 1, 600).unwrap();
    let b = twice.get_entries_in("chr1", 1, 600).unwrap();
    assert_eq!(a, b);
}

#[rstest]
#[case(11)]
#[case(12)]
#[case(13)]
fn non_overlapping_insert_order_does_not_matter(#[case] seed: u64) {
    let mut intervals = (0..50u32)
        .map(|i| (iv("chr1", i * 20 + 3, i * 20 + 12, "+"), i))
        .collect::<Vec<_>>();
    let ordered: GenomicArray<u32> = intervals.iter().cloned().collect();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    intervals.shuffle(&mut rng);
    let shuffled: GenomicArray<u32> = intervals.into_iter().collect();

    let ordered_track = ordered.chromosome("chr1").unwrap().plus();
    let shuffled_track = shuffled.chromosome("chr1").unwrap().plus();
    assert_eq!(ordered_track.zones(), shuffled_track.zones());
}
