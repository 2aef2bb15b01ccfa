//! Candidate route representation for the genetic search.

use crate::config::DroneConfig;
use crate::problem::SurveyProblem;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One candidate plan: a depot-bounded visiting order plus per-edge airspeed
/// and recharge-landing choices.
///
/// Length contract: `sequence.len() - 1 == speeds.len() == landings.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    /// Location identifiers; first and last entry are the depot
    pub sequence: Vec<usize>,
    /// Planned airspeed per consecutive pair in `sequence`, km/h
    pub speeds: Vec<u16>,
    /// Planned recharge landing after each edge
    pub landings: Vec<bool>,
}

impl Individual {
    pub fn new(sequence: Vec<usize>, speeds: Vec<u16>, landings: Vec<bool>) -> Self {
        Individual {
            sequence,
            speeds,
            landings,
        }
    }

    /// A uniformly random individual: shuffled visiting order, random speed
    /// and landing choice per edge.
    pub fn random<R: Rng>(problem: &SurveyProblem, drone: &DroneConfig, rng: &mut R) -> Self {
        let depot = problem.depot_id();
        let mut interior = problem.survey_ids();
        interior.shuffle(rng);

        let mut sequence = Vec::with_capacity(interior.len() + 2);
        sequence.push(depot);
        sequence.extend(interior);
        sequence.push(depot);

        let edge_count = sequence.len() - 1;
        let speeds = random_speeds(edge_count, drone, rng);
        let landings = random_landings(edge_count, rng);

        Individual::new(sequence, speeds, landings)
    }

    /// Number of edges the plan covers.
    pub fn edge_count(&self) -> usize {
        self.sequence.len().saturating_sub(1)
    }

    /// Check the structural contract against the problem instance.
    ///
    /// The depot must sit at both ends and nowhere else, the interior must be
    /// a permutation of all survey identifiers, and the three arrays must
    /// satisfy the length contract.
    pub fn validate(&self, problem: &SurveyProblem) -> Result<(), &'static str> {
        let depot = problem.depot_id();

        if self.sequence.len() < 3 {
            return Err("route must contain at least one survey location");
        }
        if self.sequence[0] != depot || *self.sequence.last().unwrap() != depot {
            return Err("route must start and end at the depot");
        }
        if self.sequence.len() != self.speeds.len() + 1
            || self.sequence.len() != self.landings.len() + 1
        {
            return Err("speed/landing plans out of sync with the route");
        }
        if self.sequence.iter().filter(|&&id| id == depot).count() != 2 {
            return Err("depot may only appear at the route ends");
        }

        let interior: HashSet<usize> = self.sequence[1..self.sequence.len() - 1]
            .iter()
            .copied()
            .collect();
        if interior.len() != self.sequence.len() - 2 {
            return Err("duplicate locations in route");
        }
        if interior.len() != problem.survey_count() {
            return Err("route does not cover every survey location");
        }

        Ok(())
    }

    pub fn is_valid(&self, problem: &SurveyProblem) -> bool {
        self.validate(problem).is_ok()
    }

    /// Restore the length contract by regenerating both plans when either has
    /// drifted from the sequence length.
    pub fn resync_plans<R: Rng>(&mut self, drone: &DroneConfig, rng: &mut R) {
        let edge_count = self.edge_count();
        if self.speeds.len() != edge_count {
            self.speeds = random_speeds(edge_count, drone, rng);
        }
        if self.landings.len() != edge_count {
            self.landings = random_landings(edge_count, rng);
        }
    }
}

/// One admissible airspeed, uniformly drawn from the discretized range.
pub fn random_speed<R: Rng>(drone: &DroneConfig, rng: &mut R) -> u16 {
    let choices = drone.speed_choices();
    *choices.choose(rng).expect("speed range is never empty")
}

/// Uniformly random speed plan of the given length.
pub fn random_speeds<R: Rng>(edge_count: usize, drone: &DroneConfig, rng: &mut R) -> Vec<u16> {
    (0..edge_count).map(|_| random_speed(drone, rng)).collect()
}

/// Uniformly random landing plan of the given length.
pub fn random_landings<R: Rng>(edge_count: usize, rng: &mut R) -> Vec<bool> {
    (0..edge_count).map(|_| rng.gen_bool(0.5)).collect()
}
