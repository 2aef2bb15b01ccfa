//! Report files for the final plan: per-edge CSV and a text summary.

use crate::evaluator::EdgeTrace;
use crate::PlanResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Write the per-edge flight plan as a CSV table.
pub fn write_route_csv<P: AsRef<Path>>(trace: &[EdgeTrace], path: P) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record([
        "start_code",
        "start_latitude",
        "start_longitude",
        "day",
        "start_time",
        "speed_kmh",
        "end_code",
        "end_latitude",
        "end_longitude",
        "landing",
        "end_time",
    ])?;

    for edge in trace {
        writer.write_record([
            edge.from_code.clone(),
            format!("{:.15}", edge.from_coord.lat),
            format!("{:.15}", edge.from_coord.lon),
            edge.start.day.to_string(),
            format!(
                "{:02}:{:02}:{:02}",
                edge.start.hour, edge.start.minute, edge.start.second
            ),
            edge.speed.to_string(),
            edge.to_code.clone(),
            format!("{:.15}", edge.to_coord.lat),
            format!("{:.15}", edge.to_coord.lon),
            if edge.landing { "YES" } else { "NO" }.to_string(),
            format!(
                "{:02}:{:02}:{:02}",
                edge.end.hour, edge.end.minute, edge.end.second
            ),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a human-readable summary of the plan.
pub fn write_summary<P: AsRef<Path>>(result: &PlanResult, path: P) -> std::io::Result<()> {
    let mut file = File::create(path)?;

    writeln!(file, "SURVEY ROUTE PLAN")?;
    writeln!(file, "{}", "=".repeat(50))?;
    writeln!(file)?;
    writeln!(file, "Locations surveyed: {}", result.codes.len().saturating_sub(2))?;
    writeln!(file, "Waypoints in route: {}", result.codes.len())?;
    writeln!(file, "Fitness: {:.2}", result.fitness)?;
    writeln!(file, "Total flight time: {} seconds", result.total_time)?;
    writeln!(file, "Landing cost: {:.2}", result.landing_cost)?;

    if !result.speeds.is_empty() {
        let mean_speed =
            result.speeds.iter().map(|&s| s as f64).sum::<f64>() / result.speeds.len() as f64;
        writeln!(file, "Mean airspeed: {:.1} km/h", mean_speed)?;
    }

    let landings = result.landings.iter().filter(|&&l| l).count();
    if !result.landings.is_empty() {
        writeln!(
            file,
            "Recharge landings: {} ({:.1}%)",
            landings,
            landings as f64 / result.landings.len() as f64 * 100.0
        )?;
    }

    writeln!(file)?;
    writeln!(file, "ROUTE")?;
    writeln!(file, "{}", "-".repeat(30))?;
    for (i, code) in result.codes.iter().enumerate() {
        writeln!(file, "{:3}. {}", i + 1, code)?;
    }

    Ok(())
}
