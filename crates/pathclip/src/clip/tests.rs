use super::*;
use crate::path::{parse_path, rectangle};
use nalgebra::vector;
use proptest::prelude::*;
use std::f64::consts::{FRAC_PI_2, PI};

fn p(text: &str) -> Path {
    parse_path(text).unwrap()
}

fn plane() -> Domain {
    Domain::infinite_plane()
}

fn square() -> Path {
    p("M0,0 L0,1 L1,1 L1,0 L0,0")
}

fn assert_paths_near(actual: &[PathSegment], expected: &[PathSegment]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{} vs {}",
        path_to_string(actual),
        path_to_string(expected)
    );
    for (a, e) in actual.iter().zip(expected) {
        assert_eq!(a.kind(), e.kind(), "{}", path_to_string(actual));
        for (x, y) in a.args().iter().zip(e.args()) {
            assert!((x - y).abs() < 1e-12, "{} vs {}", path_to_string(actual), path_to_string(expected));
        }
    }
}

#[test]
fn closure_is_required_where_asked() {
    assert!(matches!(
        intersection(&p("M0,0 L1,0"), &square(), &plane(), true),
        Err(PathError::OpenPath { .. })
    ));
    assert!(matches!(
        intersection(&square(), &p("M0,0 L1,0"), &plane(), false),
        Err(PathError::OpenEdges { .. })
    ));
}

#[test]
fn window_must_fit_the_domain() {
    assert!(matches!(
        intersection(&[], &p("M0,0 L4,0 L4,1 L0,0"), &Domain::geoid(), true),
        Err(PathError::EdgeOutsideDomain { s, .. }) if s == 4.0
    ));
}

#[test]
fn empty_subject_is_everything() {
    assert_eq!(intersection(&[], &square(), &plane(), true), Ok(square()));
}

#[test]
fn island_inside_is_untouched() {
    let island = p("M0.1,0.1 L0.1,0.9 L0.9,0.5 L0.1,0.1");
    assert_eq!(intersection(&island, &square(), &plane(), true), Ok(island));
}

#[test]
fn island_outside_vanishes() {
    let island = p("M1.1,1.1 L1.1,1.9 L1.9,1.5 L1.1,1.1");
    assert_eq!(intersection(&island, &square(), &plane(), true), Ok(Vec::new()));
}

#[test]
fn straddling_island_is_cut_at_the_edge() {
    let island = p("M0.5,0.1 L0.5,0.9 L1.5,0.5 L0.5,0.1");
    let out = intersection(&island, &square(), &plane(), true).unwrap();
    assert_paths_near(&out, &p("M0.5,0.1 L0.5,0.9 L1,0.7 L1,0.3 L0.5,0.1"));
    // clipping is idempotent
    let again = intersection(&out, &square(), &plane(), true).unwrap();
    assert_eq!(again, out);
}

#[test]
fn inverted_island_brings_back_the_window() {
    let hole = p("M0.1,0.9 L0.1,0.1 L0.9,0.5 L0.1,0.9");
    let mut expected = hole.clone();
    expected.extend(square());
    assert_eq!(intersection(&hole, &square(), &plane(), true), Ok(expected));
}

#[test]
fn inverted_islands_are_joined_along_the_window() {
    let holes = p("M0.7,0.9 L0.7,0.1 L1.3,0.5 L0.7,0.9 M0.3,0.1 L0.3,0.9 L-0.3,0.5 L0.3,0.1");
    let out = intersection(&holes, &square(), &plane(), true).unwrap();
    assert_paths_near(
        &out,
        &p("M0.7,0.9 L0.7,0.1 L1,0.3 L1,0 L0,0 L0,0.3 L0.3,0.1 L0.3,0.9 L0,0.7 L0,1 L1,1 L1,0.7 L0.7,0.9"),
    );
}

#[test]
fn open_path_across_the_antimeridian() {
    let window = p(&format!(
        "M{n},{n} Φ{n},{PI} Λ{PI},{PI} Φ{PI},{n} Λ{n},{n}",
        n = -PI
    ));
    let out = intersection(&p("M1,3 L2,-3"), &window, &Domain::geoid(), false).unwrap();
    assert_paths_near(&out, &p(&format!("M1,3 L1.5,{PI} M1.5,{n} L2,-3", n = -PI)));
}

#[test]
fn fully_coincident_subject_returns_the_window() {
    assert_eq!(intersection(&square(), &square(), &plane(), true), Ok(square()));
}

#[test]
fn almost_coincident_subject_survives() {
    let subject = p("M0.3,0.1 L0.9,0.1 L0.9,0.9 L0.1,0.9 L0.1,0.1 L0.2,0.1 L0.2,0 L0,0 L0,1 L1,1 L1,0 L0.3,0 L0.3,0.1");
    assert_eq!(intersection(&subject, &square(), &plane(), true), Ok(subject));
}

#[test]
fn one_segment_crossing_two_edges() {
    let out = intersection(&p("M1.5,1.5 L1.5,0 L0,1.5 L1.5,1.5"), &square(), &plane(), false).unwrap();
    assert_paths_near(&out, &p("M1,0.5 L0.5,1"));
}

#[test]
fn tangent_vertices_do_not_cut() {
    let tangent = p("M0.5,0.1 L0,0.5 L0.5,0.9 L0.5,0.1");
    assert_eq!(intersection(&tangent, &square(), &plane(), true), Ok(tangent));
    let doubly = p("M0.5,0.1 L0,0.5 L0.5,1 L0.5,0.1");
    assert_eq!(intersection(&doubly, &square(), &plane(), true), Ok(doubly));
}

#[test]
fn partially_coincident_open_path() {
    let subject = p("M1.1,0.1 L1,0.2 L1,0.3 L0.9,0.4 L1.1,0.4 L1.1,0.1");
    let out = intersection(&subject, &square(), &plane(), false).unwrap();
    assert_paths_near(&out, &p("M1,0.3 L0.9,0.4 L1,0.4"));
}

#[test]
fn crossing_through_a_window_vertex() {
    let subject = p("M1.5,-0.5 L-0.5,1.5 L1.5,1.5 L1.5,-0.5");
    let out = intersection(&subject, &square(), &plane(), true).unwrap();
    assert_paths_near(&out, &p("M1,0 L0,1 L1,1 L1,0"));
}

#[test]
fn subject_vertex_resting_on_the_window_outside() {
    let window = rectangle(1.0, 1.0, 3.0, 3.0, false);
    // apex on the middle of the bottom edge
    let on_edge = p("M3,0 L1,0 L2,1 L3,0");
    assert_eq!(intersection(&on_edge, &window, &plane(), true), Ok(Vec::new()));
    // apex on the bottom right corner
    let on_corner = p("M4,0 L2,0 L3,1 L4,0");
    assert_eq!(intersection(&on_corner, &window, &plane(), true), Ok(Vec::new()));
}

#[test]
fn straddling_the_wraps_splits_into_three_regions() {
    let subject = p("M3,-2 L-3,0 L3,2 L3,-2 M0,2 L0,0 L0,-2 L0,2");
    let window = p(&format!(
        "M{n},{n} Φ{n},{PI} Λ{PI},{PI} Φ{PI},{n} Λ{n},{n}",
        n = -PI
    ));
    let out = intersection(&subject, &window, &Domain::geoid(), true).unwrap();
    let expected = p(&format!(
        "M3,-2 L{PI},-1 Φ{PI},{n} Λ3,{n} L3,-2 \
         M{n},-1 L-3,0 L{n},1 Φ{n},{PI} Λ0,{PI} L0,2 L0,0 L0,-2 L0,{n} Λ{n},{n} Φ{n},-1 \
         M{PI},1 L3,2 L3,{PI} Λ{PI},{PI} Φ{PI},1",
        n = -PI
    ));
    assert_paths_near(&out, &expected);
}

#[test]
fn hole_around_a_pole_line_is_drawn_back() {
    let h = FRAC_PI_2;
    let window = p(&format!(
        "M{n},{n_pi} Φ{n},{PI} L{n},{n_pi} M{h},{PI} Φ{h},{n_pi} L{h},{PI}",
        n = -h,
        n_pi = -PI
    ));
    let subject = p("M1.5,-0.5 L-0.5,1.5 L1.5,-2.5 L1.5,-0.5");
    let out = intersection(&subject, &window, &Domain::geoid(), true).unwrap();
    let mut expected = subject.clone();
    expected.extend_from_slice(&window[3..]);
    assert_paths_near(&out, &expected);
}

#[test]
fn runaway_splicing_hits_the_ceiling() {
    let cfg = KernelCfg {
        max_iterations: 1,
        ..KernelCfg::default()
    };
    let island = p("M0.5,0.1 L0.5,0.9 L1.5,0.5 L0.5,0.1");
    assert!(matches!(
        intersection_with_cfg(&island, &square(), &plane(), true, &cfg),
        Err(PathError::IterationCeiling { iterations: 2, .. })
    ));
}

#[test]
fn splice_lines_and_ends() {
    let start = vector![0.0, 0.0];
    let line = PathSegment::line_to(2.0, 0.0);
    let mid = vector![1.0, 0.0];
    assert_eq!(
        splice_segment(start, &line, mid, mid),
        Ok(p("L1,0 M1,0 L2,0"))
    );
    assert_eq!(splice_segment(start, &line, start, start), Ok(p("M0,0 L2,0")));
    let end = vector![2.0, 0.0];
    assert_eq!(splice_segment(start, &line, end, end), Ok(p("L2,0 M2,0")));
    // across a wrap the two sides differ
    assert_eq!(
        splice_segment(vector![0.0, 3.0], &PathSegment::line_to(0.0, -3.0), vector![0.0, PI], vector![0.0, -PI]),
        Ok(p(&format!("L0,{PI} M0,{n} L0,-3", n = -PI)))
    );
}

#[test]
fn splice_arcs_recomputes_large_flags() {
    let arc = PathSegment::arc_to(1.0, false, true, 2.0, 0.0);
    let apex = vector![1.0, -1.0];
    assert_eq!(
        splice_segment(vector![0.0, 0.0], &arc, apex, apex),
        Ok(p("A1,1,0,0,1,1,-1 M1,-1 A1,1,0,0,1,2,0"))
    );
    // three quarters of a circle, cut an eighth of a turn in
    let major = PathSegment::arc_to(1.0, true, true, 1.0, 1.0);
    let theta = 1.25 * PI;
    let cut = vector![1.0 + theta.cos(), theta.sin()];
    let out = splice_segment(vector![0.0, 0.0], &major, cut, cut).unwrap();
    assert!(matches!(out[0], PathSegment::ArcTo { large_arc: false, sweep: true, .. }));
    assert_eq!(out[1], PathSegment::MoveTo(cut));
    assert!(matches!(out[2], PathSegment::ArcTo { large_arc: true, sweep: true, .. }));
    assert!(matches!(
        splice_segment(vector![0.0, 0.0], &p("Q1,1,2,0")[0], apex, apex),
        Err(PathError::UnsupportedSegment { kind: 'Q', .. })
    ));
}

#[test]
fn closure_checks() {
    let geoid = Domain::geoid();
    assert_eq!(is_closed(&[], &plane()), Ok(true));
    assert_eq!(is_closed(&p("M-1,2 L3,-4"), &plane()), Ok(false));
    assert_eq!(is_closed(&p("M-1,2 L3,-4 L-5,0 L-1,2"), &plane()), Ok(true));
    assert_eq!(is_closed(&p("M-1,2 L3,-4 L-5,0 Z"), &plane()), Ok(true));
    assert_eq!(
        is_closed(&p(&format!("M1,{n} Φ1,{PI} L1,{n}", n = -PI)), &geoid),
        Ok(true)
    );
    assert_eq!(
        is_closed(&p(&format!("M1,{n} Φ1,{PI}", n = -PI)), &geoid),
        Ok(false)
    );
    assert_eq!(
        is_closed(
            &p(&format!("M{PI},{PI} Φ{PI},{n} Λ{n},{n} Φ{n},{PI} Λ{PI},{PI}", n = -PI)),
            &geoid
        ),
        Ok(true)
    );
    assert_eq!(is_closed(&p("L0,0 M1,1"), &plane()), Err(PathError::MissingMoveTo));
}

#[test]
fn open_path_between_domain_edges_counts_as_closed() {
    let disc = Domain::new(-PI / 2.0, -0.1, -PI, PI, |p| p.x == -0.1);
    assert_eq!(is_closed(&p("M-0.1,0.3 L-0.2,0.4 L-0.1,0.5"), &disc), Ok(true));
}

#[test]
fn positions_along_the_window() {
    let window = p("M0,0 L0,1 L1,1 L1,0 L0,0 M5,5 L5,6 L6,6 L5,5");
    assert_eq!(
        position_on_edge(vector![1.0, 0.25], &window),
        Some(EdgePosition {
            loop_index: 0,
            index: 2.75
        })
    );
    assert_eq!(
        position_on_edge(vector![5.5, 6.0], &window),
        Some(EdgePosition {
            loop_index: 1,
            index: 1.5
        })
    );
    // a shared vertex belongs to the earlier edge
    assert_eq!(
        position_on_edge(vector![0.0, 1.0], &window),
        Some(EdgePosition {
            loop_index: 0,
            index: 1.0
        })
    );
    assert_eq!(position_on_edge(vector![0.5, 0.5], &window), None);
}

proptest! {
    #[test]
    fn clipped_rectangles_stay_closed_and_inside(
        s0 in -1.0..0.4f64, t0 in -1.0..0.4f64,
        s2 in 0.6..2.0f64, t2 in 0.6..2.0f64,
    ) {
        let subject = rectangle(s0, t0, s2, t2, false);
        let out = intersection(&subject, &square(), &plane(), true).unwrap();
        prop_assert!(!out.is_empty());
        prop_assert!(is_closed(&out, &plane()).unwrap());
        for segment in &out {
            let q = segment.end().unwrap();
            prop_assert!((0.0..=1.0).contains(&q.x) && (0.0..=1.0).contains(&q.y));
        }
    }
}
