//! Unit tests for the geometry and flight-physics primitives.

use ga_survey::geo::{autonomy, bearing, distance, effective_speed, CompassDirection, Coord};

#[test]
fn test_distance_zero_on_identical_points() {
    let a = Coord::new(-25.45, -49.25);
    assert_eq!(distance(a, a), 0.0);
}

#[test]
fn test_distance_symmetric() {
    let a = Coord::new(-25.45, -49.25);
    let b = Coord::new(-25.50, -49.30);
    assert!((distance(a, b) - distance(b, a)).abs() < 1e-12);
}

#[test]
fn test_distance_one_degree_of_latitude() {
    // One degree of latitude is about 111.19 km on a 6371 km sphere.
    let a = Coord::new(0.0, 0.0);
    let b = Coord::new(1.0, 0.0);
    let d = distance(a, b);
    assert!((d - 111.19).abs() < 0.1, "got {}", d);
}

#[test]
fn test_bearing_cardinal_directions() {
    let origin = Coord::new(0.0, 0.0);

    assert!((bearing(origin, Coord::new(1.0, 0.0)) - 0.0).abs() < 1e-9); // north
    assert!((bearing(origin, Coord::new(0.0, 1.0)) - 90.0).abs() < 1e-9); // east
    assert!((bearing(origin, Coord::new(-1.0, 0.0)) - 180.0).abs() < 1e-9); // south
    assert!((bearing(origin, Coord::new(0.0, -1.0)) - 270.0).abs() < 1e-9); // west
}

#[test]
fn test_bearing_always_in_range() {
    let origin = Coord::new(10.0, 10.0);
    let targets = [
        Coord::new(11.0, 11.0),
        Coord::new(9.0, 11.0),
        Coord::new(9.0, 9.0),
        Coord::new(11.0, 9.0),
    ];

    for target in targets {
        let b = bearing(origin, target);
        assert!((0.0..360.0).contains(&b), "bearing {} out of range", b);
    }
}

#[test]
fn test_compass_parsing_and_degrees() {
    let dir: CompassDirection = "ENE".parse().unwrap();
    assert_eq!(dir, CompassDirection::ENE);
    assert!((dir.degrees() - 67.5).abs() < 1e-12);

    assert_eq!(CompassDirection::N.degrees(), 0.0);
    assert_eq!(CompassDirection::S.degrees(), 180.0);
    assert_eq!(CompassDirection::WSW.degrees(), 247.5);

    assert!("XYZ".parse::<CompassDirection>().is_err());
}

#[test]
fn test_effective_speed_tailwind_adds() {
    // Flying east with an eastward wind: magnitudes add.
    let speed = effective_speed(60.0, 20.0, CompassDirection::E, 90.0);
    assert!((speed - 80.0).abs() < 1e-9);
}

#[test]
fn test_effective_speed_headwind_subtracts() {
    // Flying east against a westward wind.
    let speed = effective_speed(60.0, 20.0, CompassDirection::W, 90.0);
    assert!((speed - 40.0).abs() < 1e-9);
}

#[test]
fn test_effective_speed_crosswind() {
    // Orthogonal wind combines by Pythagoras.
    let speed = effective_speed(60.0, 20.0, CompassDirection::N, 90.0);
    let expected = (60.0f64 * 60.0 + 20.0 * 20.0).sqrt();
    assert!((speed - expected).abs() < 1e-9);
}

#[test]
fn test_effective_speed_calm_air() {
    let speed = effective_speed(60.0, 0.0, CompassDirection::N, 123.0);
    assert!((speed - 60.0).abs() < 1e-9);
}

#[test]
fn test_autonomy_flat_at_or_below_minimum() {
    assert_eq!(autonomy(36, 5000.0, 0.93), 5000.0 * 0.93);
    assert_eq!(autonomy(20, 5000.0, 0.93), 5000.0 * 0.93);
}

#[test]
fn test_autonomy_decreasing_above_minimum() {
    assert!(autonomy(40, 5000.0, 0.93) > autonomy(80, 5000.0, 0.93));

    let mut previous = autonomy(36, 5000.0, 0.93);
    for speed in (40..=96).step_by(4) {
        let current = autonomy(speed, 5000.0, 0.93);
        assert!(current < previous, "autonomy not decreasing at {}", speed);
        previous = current;
    }
}

#[test]
fn test_autonomy_quadratic_law() {
    // Doubling the speed quarters the autonomy.
    let value = autonomy(72, 5000.0, 0.93);
    assert!((value - 5000.0 * 0.25 * 0.93).abs() < 1e-9);
}
