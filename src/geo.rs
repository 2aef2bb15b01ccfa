//! Geometry and flight-physics primitives.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mean Earth radius in kilometers, used by the haversine formula.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    pub fn new(lat: f64, lon: f64) -> Self {
        Coord { lat, lon }
    }
}

/// Great-circle distance between two coordinates, in kilometers.
///
/// Zero iff the coordinates coincide; symmetric in its arguments.
pub fn distance(a: Coord, b: Coord) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Flight heading from `a` to `b` in degrees, normalized to [0, 360).
///
/// Planar approximation over the coordinate deltas; adequate at survey scale.
pub fn bearing(a: Coord, b: Coord) -> f64 {
    let dlon = b.lon - a.lon;
    let dlat = b.lat - a.lat;

    let mut deg = dlon.atan2(dlat).to_degrees();
    if deg < 0.0 {
        deg += 360.0;
    }
    deg
}

/// One of the 16 compass points used by the weather table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompassDirection {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl CompassDirection {
    /// The direction as degrees clockwise from north, in 22.5° increments.
    pub fn degrees(self) -> f64 {
        use CompassDirection::*;
        match self {
            N => 0.0,
            NNE => 22.5,
            NE => 45.0,
            ENE => 67.5,
            E => 90.0,
            ESE => 112.5,
            SE => 135.0,
            SSE => 157.5,
            S => 180.0,
            SSW => 202.5,
            SW => 225.0,
            WSW => 247.5,
            W => 270.0,
            WNW => 292.5,
            NW => 315.0,
            NNW => 337.5,
        }
    }
}

impl FromStr for CompassDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use CompassDirection::*;
        match s {
            "N" => Ok(N),
            "NNE" => Ok(NNE),
            "NE" => Ok(NE),
            "ENE" => Ok(ENE),
            "E" => Ok(E),
            "ESE" => Ok(ESE),
            "SE" => Ok(SE),
            "SSE" => Ok(SSE),
            "S" => Ok(S),
            "SSW" => Ok(SSW),
            "SW" => Ok(SW),
            "WSW" => Ok(WSW),
            "W" => Ok(W),
            "WNW" => Ok(WNW),
            "NW" => Ok(NW),
            "NNW" => Ok(NNW),
            other => Err(format!("unknown compass direction: {}", other)),
        }
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Resultant ground speed of the drone flying at `speed` km/h on `heading`,
/// with wind of `wind_speed` km/h blowing toward `wind_direction`.
pub fn effective_speed(
    speed: f64,
    wind_speed: f64,
    wind_direction: CompassDirection,
    heading: f64,
) -> f64 {
    let wind_rad = wind_direction.degrees().to_radians();
    let heading_rad = heading.to_radians();

    let drone_x = speed * heading_rad.sin();
    let drone_y = speed * heading_rad.cos();

    let wind_x = wind_speed * wind_rad.sin();
    let wind_y = wind_speed * wind_rad.cos();

    let x = drone_x + wind_x;
    let y = drone_y + wind_y;

    (x * x + y * y).sqrt()
}

/// Battery autonomy at the given cruise speed.
///
/// Flat at or below 36 km/h; above it the autonomy degrades quadratically
/// with speed.
pub fn autonomy(speed: u16, base_autonomy: f64, correction_factor: f64) -> f64 {
    if speed <= 36 {
        base_autonomy * correction_factor
    } else {
        base_autonomy * (36.0 / speed as f64).powi(2) * correction_factor
    }
}
