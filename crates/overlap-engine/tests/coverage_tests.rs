//! Tests for the coverage sweep.

use std::collections::HashSet;

use chrono::{DateTime, Duration, TimeZone, Utc};
use overlap_engine::coverage::{compute_coverage_windows, union_slots};
use overlap_engine::{
    CoverageOptions, Identity, IntersectOptions, Interval, ParticipantAvailability,
};

fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, h, m, 0).unwrap()
}

fn hm(start_h: u32, start_m: u32, end_h: u32, end_m: u32) -> Interval {
    Interval {
        start: at(start_h, start_m),
        end: at(end_h, end_m),
    }
}

fn user(id: &str, slots: Vec<Interval>) -> ParticipantAvailability {
    ParticipantAvailability::new(Identity::user(id), slots)
}

fn ids(names: &[&str]) -> Vec<Identity> {
    names.iter().map(|n| Identity::user(*n)).collect()
}

#[test]
fn empty_input_yields_no_segments() {
    let windows = compute_coverage_windows(&[], None, &CoverageOptions::default()).unwrap();
    assert!(windows.is_empty());
}

#[test]
fn two_overlapping_participants_yield_three_segments() {
    let input = vec![
        user("p1", vec![hm(9, 0, 11, 0)]),
        user("p2", vec![hm(10, 0, 12, 0)]),
    ];

    let windows = compute_coverage_windows(&input, None, &CoverageOptions::default()).unwrap();

    assert_eq!(windows.len(), 3);
    assert_eq!((windows[0].start, windows[0].end), (at(9, 0), at(10, 0)));
    assert_eq!(windows[0].participants, ids(&["p1"]));
    assert_eq!((windows[1].start, windows[1].end), (at(10, 0), at(11, 0)));
    assert_eq!(windows[1].participants, ids(&["p1", "p2"]));
    assert_eq!(windows[1].participant_count, 2);
    assert_eq!((windows[2].start, windows[2].end), (at(11, 0), at(12, 0)));
    assert_eq!(windows[2].participants, ids(&["p2"]));
}

#[test]
fn min_participants_drops_thin_segments() {
    let input = vec![
        user("p1", vec![hm(9, 0, 11, 0)]),
        user("p2", vec![hm(10, 0, 12, 0)]),
        user("p3", vec![hm(10, 30, 12, 0)]),
    ];
    let options = CoverageOptions {
        min_participants: 2,
        ..CoverageOptions::default()
    };

    let windows = compute_coverage_windows(&input, None, &options).unwrap();

    assert_eq!(windows.len(), 3);
    assert_eq!(windows[0].participants, ids(&["p1", "p2"]));
    assert_eq!((windows[0].start, windows[0].end), (at(10, 0), at(10, 30)));
    assert_eq!(windows[1].participants, ids(&["p1", "p2", "p3"]));
    assert_eq!((windows[1].start, windows[1].end), (at(10, 30), at(11, 0)));
    assert_eq!(windows[2].participants, ids(&["p2", "p3"]));
    assert_eq!((windows[2].start, windows[2].end), (at(11, 0), at(12, 0)));
}

#[test]
fn gaps_between_slots_are_not_reported() {
    let input = vec![user("p1", vec![hm(9, 0, 10, 0), hm(13, 0, 14, 0)])];

    let windows = compute_coverage_windows(&input, None, &CoverageOptions::default()).unwrap();

    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0].end, at(10, 0));
    assert_eq!(windows[1].start, at(13, 0));
}

#[test]
fn own_touching_slots_are_unioned() {
    let input = vec![
        user("p1", vec![hm(9, 0, 10, 0), hm(10, 0, 11, 0)]),
        user("p2", vec![hm(8, 0, 12, 0)]),
    ];

    let windows = compute_coverage_windows(&input, None, &CoverageOptions::default()).unwrap();

    assert_eq!(windows.len(), 3);
    assert_eq!(windows[1].participants, ids(&["p1", "p2"]));
    assert_eq!((windows[1].start, windows[1].end), (at(9, 0), at(11, 0)));
}

#[test]
fn segments_never_overlap() {
    let input = vec![
        user("a", vec![hm(8, 0, 12, 0), hm(13, 0, 18, 0)]),
        user("b", vec![hm(9, 0, 14, 0)]),
        user("c", vec![hm(11, 0, 16, 0)]),
    ];

    let windows = compute_coverage_windows(&input, None, &CoverageOptions::default()).unwrap();

    for pair in windows.windows(2) {
        assert!(pair[0].end <= pair[1].start, "{:?} overlaps {:?}", pair[0], pair[1]);
    }
}

#[test]
fn eligibility_applies_to_coverage() {
    let input = vec![
        user("a", vec![hm(9, 0, 11, 0)]),
        user("b", vec![hm(10, 0, 12, 0)]),
    ];
    let eligible: HashSet<Identity> = [Identity::user("b")].into();

    let windows =
        compute_coverage_windows(&input, Some(&eligible), &CoverageOptions::default()).unwrap();

    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].participants, ids(&["b"]));
}

#[test]
fn tolerance_reaching_past_latest_instant_merges() {
    let max = DateTime::<Utc>::MAX_UTC;
    let input = vec![user(
        "p1",
        vec![
            Interval::new(max - Duration::hours(3), max - Duration::hours(2)).unwrap(),
            Interval::new(max - Duration::hours(1), max).unwrap(),
        ],
    )];
    let options = CoverageOptions {
        min_participants: 1,
        intersect: IntersectOptions::default().with_tolerance_secs(3 * 3600),
    };

    let windows = compute_coverage_windows(&input, None, &options).unwrap();

    assert_eq!(windows.len(), 1);
    assert_eq!(
        (windows[0].start, windows[0].end),
        (max - Duration::hours(3), max)
    );
}

#[test]
fn union_slots_merges_and_sorts() {
    let merged = union_slots(&[hm(13, 0, 14, 0), hm(9, 0, 10, 0), hm(9, 30, 11, 0), hm(11, 0, 11, 30)]);

    assert_eq!(merged, vec![hm(9, 0, 11, 30), hm(13, 0, 14, 0)]);
}

#[test]
fn union_slots_drops_degenerate_slots() {
    assert!(union_slots(&[hm(10, 0, 9, 0)]).is_empty());
}
