//! Deterministic cost and feasibility simulation of a candidate plan.
//!
//! Walks the route edge by edge, tracking wall-clock time, battery charge and
//! the forecast wind at the simulated hour. Produces a scalar fitness (lower
//! is better, `f64::INFINITY` for plans that blow the day limit) and a
//! per-edge trace for reporting.

use crate::config::{DroneConfig, OperationConfig};
use crate::geo::{self, Coord};
use crate::individual::Individual;
use crate::problem::SurveyProblem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A simulated wall-clock instant within the survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "day {} {:02}:{:02}:{:02}",
            self.day, self.hour, self.minute, self.second
        )
    }
}

/// Simulation record of a single flown edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeTrace {
    pub from_id: usize,
    pub from_code: String,
    pub from_coord: Coord,
    pub start: SimTime,
    pub speed: u16,
    pub to_id: usize,
    pub to_code: String,
    pub to_coord: Coord,
    /// Whether a recharge landing happened, planned or forced
    pub landing: bool,
    pub end: SimTime,
}

/// Why a plan could not be completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EvalFailure {
    /// The simulated clock rolled past the last allowed day.
    DeadlineExceeded { day: u32 },
    /// An edge's effective speed degenerated to zero or below resolution.
    Unflyable { edge: usize },
    /// The plan arrays violate the length contract.
    MalformedPlan,
}

impl fmt::Display for EvalFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalFailure::DeadlineExceeded { day } => {
                write!(f, "route exceeds the {}-day deadline", day - 1)
            }
            EvalFailure::Unflyable { edge } => {
                write!(f, "edge {} is unflyable against the wind", edge)
            }
            EvalFailure::MalformedPlan => write!(f, "plan arrays violate the length contract"),
        }
    }
}

/// Outcome of simulating one individual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    /// Total elapsed seconds plus ten times the landing cost; infinite when
    /// the plan is infeasible
    pub fitness: f64,
    /// Elapsed simulated seconds over the whole route
    pub total_time: u64,
    /// Accumulated monetary cost of late landings
    pub landing_cost: f64,
    pub trace: Vec<EdgeTrace>,
    pub failure: Option<EvalFailure>,
}

impl Evaluation {
    fn infeasible(failure: EvalFailure) -> Self {
        Evaluation {
            fitness: f64::INFINITY,
            total_time: 0,
            landing_cost: 0.0,
            trace: Vec::new(),
            failure: Some(failure),
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.failure.is_none()
    }
}

/// Weighting of the landing cost against elapsed time in the fitness scalar.
const LANDING_COST_WEIGHT: f64 = 10.0;

/// Hour of day from which a recharge landing incurs the monetary cost.
const LATE_LANDING_HOUR: u32 = 17;

/// Simulates candidate plans against a fixed instance and configuration.
pub struct Evaluator<'a> {
    problem: &'a SurveyProblem,
    drone: &'a DroneConfig,
    operation: &'a OperationConfig,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        problem: &'a SurveyProblem,
        drone: &'a DroneConfig,
        operation: &'a OperationConfig,
    ) -> Self {
        Evaluator {
            problem,
            drone,
            operation,
        }
    }

    /// Simulate the plan edge by edge.
    ///
    /// The battery starts at the autonomy of the first edge's speed. Each
    /// edge looks up the wind at the current simulated day and hour, so the
    /// cost of an edge depends on when it is flown, not only where. A landing
    /// is forced whenever the remaining charge cannot cover the edge's drain
    /// plus the stop consumption; the late-landing fee uses the hour at which
    /// the edge starts.
    pub fn evaluate(&self, individual: &Individual) -> Evaluation {
        let sequence = &individual.sequence;
        if sequence.len() < 2
            || individual.speeds.len() + 1 != sequence.len()
            || individual.landings.len() + 1 != sequence.len()
        {
            return Evaluation::infeasible(EvalFailure::MalformedPlan);
        }

        let mut total_time: u64 = 0;
        let mut landing_cost = 0.0;
        let mut battery = geo::autonomy(
            individual.speeds[0],
            self.drone.base_autonomy,
            self.drone.autonomy_correction,
        );

        let mut day = 1u32;
        let mut hour = self.operation.start_hour;
        let mut minute = 0u32;
        let mut second = 0u32;

        let mut trace = Vec::with_capacity(sequence.len() - 1);

        for i in 0..sequence.len() - 1 {
            let from = sequence[i];
            let to = sequence[i + 1];
            let speed = individual.speeds[i];
            let mut landing = individual.landings[i];

            let from_coord = self.problem.coord(from);
            let to_coord = self.problem.coord(to);

            let dist = self.problem.get_distance(from, to);
            let heading = geo::bearing(from_coord, to_coord);
            let wind = self.problem.wind_at(day, hour);
            let ground_speed =
                geo::effective_speed(speed as f64, wind.speed, wind.direction, heading);

            // Coincident waypoints fly in zero time by definition.
            let flight_time = if dist == 0.0 {
                0u64
            } else {
                let seconds = (dist / ground_speed * 3600.0).ceil();
                if !seconds.is_finite() {
                    return Evaluation::infeasible(EvalFailure::Unflyable { edge: i });
                }
                seconds as u64
            };

            let autonomy = geo::autonomy(
                speed,
                self.drone.base_autonomy,
                self.drone.autonomy_correction,
            );
            let drain = flight_time as f64 * (self.drone.base_autonomy / autonomy);

            // The late-landing fee uses the hour at which the edge starts; a
            // forced landing pays it here and again in the landing branch.
            if battery < drain + self.drone.stop_consumption {
                landing = true;
                battery = autonomy;
                if hour >= LATE_LANDING_HOUR {
                    landing_cost += self.drone.landing_cost;
                }
            } else {
                battery -= drain;
            }

            if landing && hour >= LATE_LANDING_HOUR {
                landing_cost += self.drone.landing_cost;
            }
            // Every waypoint stop drains the fixed consumption, landing or not.
            battery -= self.drone.stop_consumption;

            let start = SimTime {
                day,
                hour,
                minute,
                second,
            };

            let stop_seconds = self.drone.stop_consumption as u64;
            let elapsed = flight_time + stop_seconds;
            total_time += elapsed;

            // End-of-edge clock, hour carried from pre-modulo minutes.
            let raw_second = second as u64 + elapsed;
            let raw_minute = minute as u64 + raw_second / 60;
            let mut end_hour = hour + (raw_minute / 60) as u32;
            let mut end_day = day;
            let end_second = (raw_second % 60) as u32;
            let end_minute = (raw_minute % 60) as u32;

            if end_hour >= self.operation.end_hour {
                end_day += 1;
                end_hour = self.operation.start_hour;
                if end_day > self.operation.max_days {
                    return Evaluation::infeasible(EvalFailure::DeadlineExceeded { day: end_day });
                }
            }

            day = end_day;
            hour = end_hour;
            minute = end_minute;
            second = end_second;

            trace.push(EdgeTrace {
                from_id: from,
                from_code: self.problem.code(from).to_string(),
                from_coord,
                start,
                speed,
                to_id: to,
                to_code: self.problem.code(to).to_string(),
                to_coord,
                landing,
                end: SimTime {
                    day,
                    hour,
                    minute,
                    second,
                },
            });
        }

        Evaluation {
            fitness: total_time as f64 + landing_cost * LANDING_COST_WEIGHT,
            total_time,
            landing_cost,
            trace,
            failure: None,
        }
    }

    /// Structural validity check followed by simulation; invalid plans get an
    /// infinite fitness without being simulated.
    pub fn fitness(&self, individual: &Individual) -> f64 {
        if !individual.is_valid(self.problem) {
            return f64::INFINITY;
        }
        self.evaluate(individual).fitness
    }
}
