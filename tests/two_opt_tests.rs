//! Unit tests for the crossing-removal local search.

use ga_survey::geo::Coord;
use ga_survey::problem::SurveyProblem;
use ga_survey::two_opt::{segments_intersect, CrossingRemoval};
use ga_survey::weather::WeatherTable;

/// Square of survey locations around a corner depot.
fn create_test_problem() -> SurveyProblem {
    let entries = vec![
        ("DEPOT".to_string(), Coord::new(0.0, 0.0)),
        ("A".to_string(), Coord::new(0.0, 1.0)),
        ("B".to_string(), Coord::new(1.0, 1.0)),
        ("C".to_string(), Coord::new(1.0, 0.0)),
        ("D".to_string(), Coord::new(0.5, 2.0)),
    ];

    SurveyProblem::new(entries, "DEPOT", WeatherTable::empty()).unwrap()
}

#[test]
fn test_segments_intersect_basic_crossing() {
    let a = Coord::new(0.0, 0.0);
    let b = Coord::new(1.0, 1.0);
    let c = Coord::new(1.0, 0.0);
    let d = Coord::new(0.0, 1.0);

    assert!(segments_intersect(a, b, c, d));
}

#[test]
fn test_segments_intersect_disjoint() {
    let a = Coord::new(0.0, 0.0);
    let b = Coord::new(0.0, 1.0);
    let c = Coord::new(1.0, 0.0);
    let d = Coord::new(1.0, 1.0);

    assert!(!segments_intersect(a, b, c, d));
}

#[test]
fn test_segments_sharing_endpoint_never_cross() {
    let shared = Coord::new(0.5, 0.5);
    let a = Coord::new(0.0, 0.0);
    let b = Coord::new(1.0, 1.0);

    assert!(!segments_intersect(a, shared, shared, b));
}

#[test]
fn test_coincident_points_never_cross() {
    let p = Coord::new(0.3, 0.3);
    let a = Coord::new(0.0, 0.0);
    let b = Coord::new(1.0, 1.0);

    // A degenerate zero-length segment cannot cross anything.
    assert!(!segments_intersect(p, p, a, b));
}

#[test]
fn test_idempotent_on_crossing_free_route() {
    let problem = create_test_problem();
    let crossing = CrossingRemoval::new(&problem);

    // Convex perimeter order: no self-intersections.
    let route = vec![0, 1, 2, 3, 0];
    assert!(!crossing.has_crossings(&route));

    let cleaned = crossing.run(&route, 50);
    assert_eq!(cleaned, route);
}

#[test]
fn test_bounded_run_removes_a_crossing() {
    let problem = create_test_problem();
    let crossing = CrossingRemoval::new(&problem);

    // Visiting B before A makes the diagonals cross.
    let route = vec![0, 2, 1, 3, 0];
    assert!(crossing.has_crossings(&route));

    let cleaned = crossing.run(&route, 50);
    assert!(!crossing.has_crossings(&cleaned));
}

#[test]
fn test_run_to_completion_preserves_multiset() {
    let problem = create_test_problem();
    let crossing = CrossingRemoval::new(&problem);

    let route = vec![0, 2, 1, 4, 3, 0];
    let cleaned = crossing.run_to_completion(&route);

    assert_eq!(cleaned.len(), route.len());
    let mut sorted_in = route.clone();
    let mut sorted_out = cleaned.clone();
    sorted_in.sort_unstable();
    sorted_out.sort_unstable();
    assert_eq!(sorted_in, sorted_out);
}

#[test]
fn test_run_to_completion_reaches_zero_crossings() {
    let problem = create_test_problem();
    let crossing = CrossingRemoval::new(&problem);

    let route = vec![0, 2, 1, 4, 3, 0];
    let cleaned = crossing.run_to_completion(&route);

    assert_eq!(crossing.crossing_count(&cleaned), 0);
}

#[test]
fn test_short_routes_are_left_alone() {
    let problem = create_test_problem();
    let crossing = CrossingRemoval::new(&problem);

    let route = vec![0, 1, 0];
    assert_eq!(crossing.run(&route, 10), route);
    assert_eq!(crossing.run_to_completion(&route), route);
}
