//! Forecast wind table for the survey horizon.

use crate::geo::CompassDirection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wind at a tabulated hour: speed in km/h and the direction it blows toward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    pub direction: CompassDirection,
}

impl Wind {
    pub fn new(speed: f64, direction: CompassDirection) -> Self {
        Wind { speed, direction }
    }

    /// Still air, used for days beyond the forecast horizon.
    pub fn calm() -> Self {
        Wind {
            speed: 0.0,
            direction: CompassDirection::N,
        }
    }
}

/// Wind forecast keyed by survey day (1-based) and hour of day.
///
/// Lookups for hours between tabulated entries resolve to the closest
/// tabulated hour of that day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherTable {
    days: BTreeMap<u32, BTreeMap<u32, Wind>>,
}

impl WeatherTable {
    /// An empty table; every lookup returns calm air.
    pub fn empty() -> Self {
        WeatherTable {
            days: BTreeMap::new(),
        }
    }

    /// Build a table from (day, hour, wind) entries.
    pub fn from_entries(entries: impl IntoIterator<Item = (u32, u32, Wind)>) -> Self {
        let mut days: BTreeMap<u32, BTreeMap<u32, Wind>> = BTreeMap::new();
        for (day, hour, wind) in entries {
            days.entry(day).or_default().insert(hour, wind);
        }
        WeatherTable { days }
    }

    /// Wind for the given simulated day and hour.
    ///
    /// Days absent from the table are calm. Within a day the closest
    /// tabulated hour wins; ties resolve to the earlier hour.
    pub fn wind_at(&self, day: u32, hour: u32) -> Wind {
        let Some(hours) = self.days.get(&day) else {
            return Wind::calm();
        };

        hours
            .iter()
            .min_by_key(|(&h, _)| (h as i64 - hour as i64).abs())
            .map(|(_, &wind)| wind)
            .unwrap_or_else(Wind::calm)
    }
}

impl Default for WeatherTable {
    /// The seven-day operational forecast the planner ships with.
    fn default() -> Self {
        use CompassDirection::*;

        let w = Wind::new;
        WeatherTable::from_entries([
            (1, 6, w(17.0, ENE)),
            (1, 9, w(18.0, E)),
            (1, 12, w(19.0, E)),
            (1, 15, w(19.0, E)),
            (1, 18, w(20.0, E)),
            (1, 21, w(20.0, E)),
            (2, 6, w(20.0, E)),
            (2, 9, w(19.0, E)),
            (2, 12, w(16.0, E)),
            (2, 15, w(19.0, E)),
            (2, 18, w(21.0, E)),
            (2, 21, w(21.0, E)),
            (3, 6, w(15.0, ENE)),
            (3, 9, w(17.0, NE)),
            (3, 12, w(8.0, NE)),
            (3, 15, w(20.0, E)),
            (3, 18, w(16.0, E)),
            (3, 21, w(15.0, ENE)),
            (4, 6, w(8.0, ENE)),
            (4, 9, w(11.0, ENE)),
            (4, 12, w(7.0, NE)),
            (4, 15, w(6.0, NE)),
            (4, 18, w(11.0, E)),
            (4, 21, w(11.0, E)),
            (5, 6, w(3.0, WSW)),
            (5, 9, w(3.0, WSW)),
            (5, 12, w(7.0, WSW)),
            (5, 15, w(7.0, SSW)),
            (5, 18, w(10.0, E)),
            (5, 21, w(11.0, ENE)),
            (6, 6, w(4.0, NE)),
            (6, 9, w(5.0, ENE)),
            (6, 12, w(4.0, NE)),
            (6, 15, w(8.0, E)),
            (6, 18, w(15.0, E)),
            (6, 21, w(15.0, E)),
            (7, 6, w(6.0, NE)),
            (7, 9, w(8.0, NE)),
            (7, 12, w(14.0, NE)),
            (7, 15, w(16.0, E)),
            (7, 18, w(13.0, ENE)),
            (7, 21, w(10.0, ENE)),
        ])
    }
}
