//! # ga_survey
//!
//! Genetic-algorithm planner for a multi-day aerial survey: one drone must
//! visit every registered location exactly once, starting and ending at the
//! depot, under battery, wind, and daily-operating-window constraints.
//!
//! The search combines a genetic algorithm with nearest-neighbor construction
//! and a crossing-removal (2-opt) local search, scored by a deterministic
//! simulator that tracks the wall clock, the battery, and the forecast wind
//! hour by hour.

pub mod config;
pub mod evaluator;
pub mod genetic;
pub mod geo;
pub mod individual;
pub mod problem;
pub mod report;
pub mod two_opt;
pub mod weather;

use crate::config::Config;
use crate::evaluator::{EdgeTrace, Evaluator};
use crate::genetic::GeneticEngine;
use crate::individual::Individual;
use crate::problem::SurveyProblem;

use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// The final plan produced by a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResult {
    /// Visiting order as location identifiers, depot at both ends
    pub route: Vec<usize>,
    /// The same route as human-readable location codes
    pub codes: Vec<String>,
    /// Planned airspeed per edge, km/h
    pub speeds: Vec<u16>,
    /// Planned recharge landing per edge
    pub landings: Vec<bool>,
    /// Best fitness observed during the search
    pub fitness: f64,
    /// Simulated seconds of the final plan
    pub total_time: u64,
    /// Monetary cost of late landings in the final plan
    pub landing_cost: f64,
    /// Per-edge simulation trace of the final plan
    pub trace: Vec<EdgeTrace>,
}

/// Orchestrates a full planning run over one survey instance.
pub struct Planner {
    pub problem: SurveyProblem,
    pub config: Config,
    pub run_time: Duration,
    rng: ChaCha8Rng,
}

impl Planner {
    /// Create a planner; the RNG is seeded from the configuration, or from
    /// entropy when no seed is given.
    pub fn new(problem: SurveyProblem, config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Planner {
            problem,
            config,
            run_time: Duration::from_secs(0),
            rng,
        }
    }

    /// Run the genetic search and assemble the final plan.
    pub fn run(&mut self) -> PlanResult {
        let start = Instant::now();

        info!(
            "planning survey over {} locations, {} generations, population {}",
            self.problem.survey_count(),
            self.config.genetic.generations,
            self.config.genetic.population_size
        );

        let engine = GeneticEngine::new(&self.problem, &self.config);
        let search = engine.run(&mut self.rng);

        let result = self.assemble(search.best, search.fitness);
        self.run_time = start.elapsed();

        info!(
            "search finished in {:.1}s, fitness {:.2}",
            self.run_time.as_secs_f64(),
            result.fitness
        );

        result
    }

    fn assemble(&self, best: Individual, fitness: f64) -> PlanResult {
        let evaluator = Evaluator::new(&self.problem, &self.config.drone, &self.config.operation);
        let evaluation = evaluator.evaluate(&best);

        PlanResult {
            codes: self.problem.route_codes(&best.sequence),
            route: best.sequence,
            speeds: best.speeds,
            landings: best.landings,
            fitness,
            total_time: evaluation.total_time,
            landing_cost: evaluation.landing_cost,
            trace: evaluation.trace,
        }
    }
}
