//! Unit tests for the forecast wind table.

use ga_survey::geo::CompassDirection;
use ga_survey::weather::{WeatherTable, Wind};

fn two_entry_day() -> WeatherTable {
    WeatherTable::from_entries([
        (1, 6, Wind::new(10.0, CompassDirection::N)),
        (1, 9, Wind::new(20.0, CompassDirection::E)),
    ])
}

#[test]
fn test_exact_hour_hits_its_entry() {
    let table = two_entry_day();

    assert_eq!(table.wind_at(1, 6).speed, 10.0);
    assert_eq!(table.wind_at(1, 9).speed, 20.0);
}

#[test]
fn test_lookup_resolves_to_closest_tabulated_hour() {
    let table = two_entry_day();

    // Hour 7 is one hour from 6 and two from 9.
    assert_eq!(table.wind_at(1, 7).direction, CompassDirection::N);
    // Hour 8 is closer to 9.
    assert_eq!(table.wind_at(1, 8).direction, CompassDirection::E);
    // Hours outside the tabulated span clamp to the nearest end.
    assert_eq!(table.wind_at(1, 23).direction, CompassDirection::E);
}

#[test]
fn test_equidistant_hour_ties_to_the_earlier_entry() {
    let table = WeatherTable::from_entries([
        (1, 6, Wind::new(10.0, CompassDirection::N)),
        (1, 10, Wind::new(20.0, CompassDirection::E)),
    ]);

    // Hour 8 is two hours from both entries.
    assert_eq!(table.wind_at(1, 8).direction, CompassDirection::N);
}

#[test]
fn test_days_beyond_the_table_are_calm() {
    let table = two_entry_day();

    let wind = table.wind_at(8, 12);
    assert_eq!(wind.speed, 0.0);
    assert_eq!(wind.direction, CompassDirection::N);

    // The shipped forecast covers exactly seven days.
    let shipped = WeatherTable::default();
    assert!(shipped.wind_at(7, 12).speed > 0.0);
    assert_eq!(shipped.wind_at(8, 12), Wind::calm());
}

#[test]
fn test_empty_table_is_always_calm() {
    let table = WeatherTable::empty();
    assert_eq!(table.wind_at(1, 6), Wind::calm());
}
