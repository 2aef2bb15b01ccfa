//! Configuration parameters for the survey route planner.

use serde::{Deserialize, Serialize};

/// Physical parameters of the drone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroneConfig {
    /// Minimum airspeed in km/h
    pub min_speed: u16,
    /// Maximum airspeed in km/h
    pub max_speed: u16,
    /// Discretization step of the airspeed range
    pub speed_step: u16,
    /// Battery autonomy at minimum speed, in charge units
    pub base_autonomy: f64,
    /// Correction factor applied to the nominal autonomy
    pub autonomy_correction: f64,
    /// Fixed consumption (charge units and seconds) of every waypoint stop
    pub stop_consumption: f64,
    /// Monetary cost of a recharge landing after the evening cutoff
    pub landing_cost: f64,
}

impl Default for DroneConfig {
    fn default() -> Self {
        DroneConfig {
            min_speed: 36,
            max_speed: 96,
            speed_step: 4,
            base_autonomy: 5000.0,
            autonomy_correction: 0.93,
            stop_consumption: 72.0,
            landing_cost: 80.0,
        }
    }
}

impl DroneConfig {
    /// All admissible airspeed values, lowest first.
    pub fn speed_choices(&self) -> Vec<u16> {
        (self.min_speed..=self.max_speed)
            .step_by(self.speed_step as usize)
            .collect()
    }
}

/// Daily operating constraints of the survey.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationConfig {
    /// First hour of the daily flight window
    pub start_hour: u32,
    /// Hour at which flying must stop; reaching it rolls over to the next day
    pub end_hour: u32,
    /// Hard limit on the number of survey days
    pub max_days: u32,
}

impl Default for OperationConfig {
    fn default() -> Self {
        OperationConfig {
            start_hour: 6,
            end_hour: 19,
            max_days: 7,
        }
    }
}

/// Parameters of the genetic search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneticConfig {
    /// Number of individuals per generation
    pub population_size: usize,
    /// Number of generations to run
    pub generations: usize,
    /// Per-gene probability used by the mutation sub-operators
    pub mutation_rate: f64,
    /// Probability that a selected parent pair is recombined
    pub crossover_rate: f64,
    /// Number of best individuals copied unchanged into the next generation
    pub elite_size: usize,
    /// Number of individuals sampled per tournament
    pub tournament_size: usize,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        GeneticConfig {
            population_size: 100,
            generations: 200,
            mutation_rate: 0.1,
            crossover_rate: 0.8,
            elite_size: 10,
            tournament_size: 5,
        }
    }
}

/// Complete configuration of a planner run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub drone: DroneConfig,
    pub operation: OperationConfig,
    pub genetic: GeneticConfig,
    /// Seed for the pseudo-random generator; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Set the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.genetic.population_size = size;
        self
    }

    /// Set the number of generations.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.genetic.generations = generations;
        self
    }

    /// Set the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.genetic.mutation_rate = rate;
        self
    }

    /// Set the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.genetic.crossover_rate = rate;
        self
    }

    /// Set the number of elite individuals.
    pub fn with_elite_size(mut self, size: usize) -> Self {
        self.genetic.elite_size = size;
        self
    }

    /// Set the tournament size.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.genetic.tournament_size = size;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the daily operating window.
    pub fn with_operating_window(mut self, start_hour: u32, end_hour: u32) -> Self {
        self.operation.start_hour = start_hour;
        self.operation.end_hour = end_hour;
        self
    }

    /// Set the maximum number of survey days.
    pub fn with_max_days(mut self, days: u32) -> Self {
        self.operation.max_days = days;
        self
    }
}
