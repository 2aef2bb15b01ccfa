//! Generational genetic search over candidate survey plans.
//!
//! Hybrid initialization (nearest-neighbor seeds plus random permutations),
//! tournament selection, single-point order-correcting crossover, hybrid
//! mutation, elitism, and periodic crossing-removal polish. The all-time best
//! individual is tracked independently of the current population and gets a
//! final repair plus exhaustive 2-opt pass before being returned.

use crate::config::Config;
use crate::evaluator::Evaluator;
use crate::geo;
use crate::individual::{self, Individual};
use crate::problem::SurveyProblem;
use crate::two_opt::CrossingRemoval;
use itertools::Itertools;
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

/// Share of the initial population built by nearest-neighbor construction.
const NEAREST_NEIGHBOR_SHARE: f64 = 0.2;
/// Probability that mutation rewrites a route segment by nearest neighbor.
const SEGMENT_MUTATION_PROB: f64 = 0.3;
/// Probability of a bounded 2-opt cleanup on each crossover child.
const CHILD_TWO_OPT_PROB: f64 = 0.02;
/// Probability of a bounded 2-opt cleanup at the end of mutation.
const MUTATION_TWO_OPT_PROB: f64 = 0.01;
/// Iteration bound of the cheap 2-opt cleanups.
const TWO_OPT_BOUND: usize = 20;
/// Generations between local-search polish of one population slot.
const POLISH_INTERVAL: usize = 20;

/// Outcome of a genetic search run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best: Individual,
    pub fitness: f64,
}

/// The genetic search engine for one survey instance.
pub struct GeneticEngine<'a> {
    problem: &'a SurveyProblem,
    config: &'a Config,
    depot: usize,
    survey_ids: Vec<usize>,
}

impl<'a> GeneticEngine<'a> {
    pub fn new(problem: &'a SurveyProblem, config: &'a Config) -> Self {
        GeneticEngine {
            problem,
            config,
            depot: problem.depot_id(),
            survey_ids: problem.survey_ids(),
        }
    }

    /// Run the configured number of generations and return the best plan.
    pub fn run<R: Rng>(&self, rng: &mut R) -> SearchResult {
        let genetic = &self.config.genetic;
        let evaluator = Evaluator::new(self.problem, &self.config.drone, &self.config.operation);
        let crossing = CrossingRemoval::new(self.problem);

        let mut population = self.initial_population(rng);
        let mut best: Option<Individual> = None;
        let mut best_fitness = f64::INFINITY;

        for generation in 0..genetic.generations {
            let fitnesses: Vec<f64> = population.iter().map(|ind| evaluator.fitness(ind)).collect();

            // All-time best is remembered across generations, independent of
            // what elitism keeps in the population.
            if let Some((idx, &fit)) = fitnesses
                .iter()
                .enumerate()
                .min_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            {
                if fit < best_fitness {
                    best_fitness = fit;
                    best = Some(population[idx].clone());
                }
            }

            let elite: Vec<usize> = fitnesses
                .iter()
                .enumerate()
                .sorted_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
                .take(genetic.elite_size)
                .map(|(i, _)| i)
                .collect();

            let mut next: Vec<Individual> = elite
                .into_iter()
                .map(|idx| population[idx].clone())
                .collect();

            while next.len() < genetic.population_size {
                let p1 = self.tournament(&fitnesses, rng);
                let p2 = self.tournament(&fitnesses, rng);

                let (child1, child2) = if rng.gen::<f64>() < genetic.crossover_rate {
                    self.crossover(&population[p1], &population[p2], rng)
                } else {
                    (population[p1].clone(), population[p2].clone())
                };

                next.push(self.mutate(child1, rng));
                next.push(self.mutate(child2, rng));
            }
            next.truncate(genetic.population_size);

            if generation % POLISH_INTERVAL == 0 {
                let slot = rng.gen_range(0..next.len());
                let polished = crossing.run(&next[slot].sequence, TWO_OPT_BOUND);
                next[slot].sequence = polished;
                next[slot].resync_plans(&self.config.drone, rng);
                debug!("generation {}: polished slot {}", generation, slot);
            }

            population = next;

            if generation % 20 == 0 {
                info!("generation {}: best fitness = {:.2}", generation, best_fitness);
            }
        }

        let mut best = best.unwrap_or_else(|| population[0].clone());

        // Final polish: repair, exhaustive crossing removal, repair again,
        // and restore the plan-length contract if anything drifted.
        best.sequence = self.repair_sequence(&best.sequence, rng);
        best.sequence = crossing.run_to_completion(&best.sequence);
        best.sequence = self.repair_sequence(&best.sequence, rng);
        best.resync_plans(&self.config.drone, rng);

        SearchResult {
            best,
            fitness: best_fitness,
        }
    }

    /// Hybrid initial population: nearest-neighbor seeds plus random fill.
    pub fn initial_population<R: Rng>(&self, rng: &mut R) -> Vec<Individual> {
        let size = self.config.genetic.population_size;
        let seeded = (size as f64 * NEAREST_NEIGHBOR_SHARE) as usize;
        let mut population = Vec::with_capacity(size);

        for _ in 0..seeded {
            population.push(self.nearest_neighbor_individual(rng));
        }
        for _ in seeded..size {
            population.push(Individual::random(self.problem, &self.config.drone, rng));
        }

        population
    }

    /// Tournament selection: sample `tournament_size` distinct slots and keep
    /// the lowest fitness.
    pub fn tournament<R: Rng>(&self, fitnesses: &[f64], rng: &mut R) -> usize {
        let k = self.config.genetic.tournament_size.min(fitnesses.len());
        rand::seq::index::sample(rng, fitnesses.len(), k)
            .into_iter()
            .min_by(|&a, &b| {
                fitnesses[a]
                    .partial_cmp(&fitnesses[b])
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .expect("tournament sample is never empty")
    }

    /// Nearest-neighbor constructed individual: greedy route from the depot,
    /// bounded crossing cleanup, distance-bucketed speeds, battery-greedy
    /// landing plan.
    pub fn nearest_neighbor_individual<R: Rng>(&self, rng: &mut R) -> Individual {
        let mut sequence = Vec::with_capacity(self.survey_ids.len() + 2);
        sequence.push(self.depot);

        let mut unvisited = self.survey_ids.clone();
        let mut current = self.depot;

        while let Some(pos) = self.nearest_position(current, &unvisited) {
            current = unvisited.swap_remove(pos);
            sequence.push(current);
        }
        sequence.push(self.depot);

        let sequence = CrossingRemoval::new(self.problem).run(&sequence, TWO_OPT_BOUND);

        let speeds = self.bucketed_speeds(&sequence, rng);
        let landings = self.greedy_landings(&sequence, &speeds);

        Individual::new(sequence, speeds, landings)
    }

    /// Position in `candidates` of the identifier closest to `from`.
    fn nearest_position(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .enumerate()
            .min_by(|a, b| {
                let da = self.problem.get_distance(from, *a.1);
                let db = self.problem.get_distance(from, *b.1);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(pos, _)| pos)
    }

    /// Speed bucketed by edge distance: crawl on short hops, sprint on long
    /// legs.
    fn bucketed_speed<R: Rng>(&self, dist_km: f64, rng: &mut R) -> u16 {
        if dist_km < 1.0 {
            self.config.drone.min_speed
        } else if dist_km < 5.0 {
            *[40, 44, 48].choose(rng).unwrap_or(&44)
        } else if dist_km < 15.0 {
            *[52, 56, 60, 64].choose(rng).unwrap_or(&60)
        } else {
            *[68, 72, 76, 80, 84, 88, 92, 96].choose(rng).unwrap_or(&80)
        }
    }

    fn bucketed_speeds<R: Rng>(&self, sequence: &[usize], rng: &mut R) -> Vec<u16> {
        sequence
            .windows(2)
            .map(|w| self.bucketed_speed(self.problem.get_distance(w[0], w[1]), rng))
            .collect()
    }

    /// Landing plan from a battery walk over the route: land exactly where
    /// the remaining charge would not cover the next edge.
    fn greedy_landings(&self, sequence: &[usize], speeds: &[u16]) -> Vec<bool> {
        let drone = &self.config.drone;
        let mut landings = Vec::with_capacity(speeds.len());
        let mut battery = drone.base_autonomy * drone.autonomy_correction;

        for (i, w) in sequence.windows(2).enumerate() {
            let dist = self.problem.get_distance(w[0], w[1]);
            let speed = speeds[i];
            let flight_time = dist / speed as f64 * 3600.0;

            let autonomy = geo::autonomy(speed, drone.base_autonomy, drone.autonomy_correction);
            let drain = flight_time * (drone.base_autonomy / autonomy);

            if battery < drain + drone.stop_consumption {
                landings.push(true);
                battery = drone.base_autonomy * drone.autonomy_correction;
            } else {
                landings.push(false);
                battery -= drain;
            }
            battery -= drone.stop_consumption;
        }

        landings
    }

    /// Single-point splice crossover with order-correcting repair.
    pub fn crossover<R: Rng>(
        &self,
        parent1: &Individual,
        parent2: &Individual,
        rng: &mut R,
    ) -> (Individual, Individual) {
        let size = parent1.sequence.len();
        let cut = rng.gen_range(1..size - 1);

        let splice = |head: &Individual, tail: &Individual, rng: &mut R| {
            let mut sequence = head.sequence[..cut].to_vec();
            sequence.extend_from_slice(&tail.sequence[cut.min(tail.sequence.len())..]);
            let sequence = self.repair_sequence(&sequence, rng);

            let mut speeds = head.speeds[..cut.min(head.speeds.len())].to_vec();
            speeds.extend_from_slice(&tail.speeds[cut.min(tail.speeds.len())..]);

            let mut landings = head.landings[..cut.min(head.landings.len())].to_vec();
            landings.extend_from_slice(&tail.landings[cut.min(tail.landings.len())..]);

            let mut child = Individual::new(sequence, speeds, landings);
            child.resync_plans(&self.config.drone, rng);

            if rng.gen::<f64>() < CHILD_TWO_OPT_PROB {
                child.sequence = CrossingRemoval::new(self.problem).run(&child.sequence, TWO_OPT_BOUND);
                child.resync_plans(&self.config.drone, rng);
            }

            child
        };

        (splice(parent1, parent2, rng), splice(parent2, parent1, rng))
    }

    /// Rebuild a spliced sequence into a valid depot-bounded permutation:
    /// keep the first occurrence of each survey identifier in order, then
    /// append the missing ones shuffled.
    pub fn repair_sequence<R: Rng>(&self, sequence: &[usize], rng: &mut R) -> Vec<usize> {
        let mut seen = vec![false; self.problem.locations.len()];
        let mut interior = Vec::with_capacity(self.survey_ids.len());

        for &id in sequence {
            if id != self.depot && !seen[id] {
                seen[id] = true;
                interior.push(id);
            }
        }

        let mut missing: Vec<usize> = self
            .survey_ids
            .iter()
            .copied()
            .filter(|&id| !seen[id])
            .collect();
        missing.shuffle(rng);
        interior.extend(missing);

        let mut repaired = Vec::with_capacity(interior.len() + 2);
        repaired.push(self.depot);
        repaired.extend(interior);
        repaired.push(self.depot);
        repaired
    }

    /// Hybrid mutation: with fixed probability rewrite a route segment by
    /// nearest neighbor, otherwise apply the classic swap / speed-resample /
    /// landing-flip operators, each gated by the mutation rate.
    pub fn mutate<R: Rng>(&self, mut individual: Individual, rng: &mut R) -> Individual {
        let rate = self.config.genetic.mutation_rate;

        if rng.gen::<f64>() < SEGMENT_MUTATION_PROB {
            return self.segment_mutation(individual, rng);
        }

        let len = individual.sequence.len();
        if rng.gen::<f64>() < rate && len > 3 {
            let picks = rand::seq::index::sample(rng, len - 2, 2);
            individual.sequence.swap(picks.index(0) + 1, picks.index(1) + 1);
        }

        for speed in individual.speeds.iter_mut() {
            if rng.gen::<f64>() < rate {
                *speed = individual::random_speed(&self.config.drone, rng);
            }
        }

        for landing in individual.landings.iter_mut() {
            if rng.gen::<f64>() < rate {
                *landing = !*landing;
            }
        }

        if rng.gen::<f64>() < MUTATION_TWO_OPT_PROB {
            individual.sequence = CrossingRemoval::new(self.problem).run(&individual.sequence, TWO_OPT_BOUND);
            individual.resync_plans(&self.config.drone, rng);
        }

        individual
    }

    /// Replace a bounded interior segment with a nearest-neighbor reordering
    /// of its locations, anchored at the waypoint preceding the segment, and
    /// refresh that segment's speeds.
    fn segment_mutation<R: Rng>(&self, individual: Individual, rng: &mut R) -> Individual {
        let sequence = &individual.sequence;
        let len = sequence.len();
        if len < 6 {
            return individual;
        }

        let start = rng.gen_range(1..=len - 4);
        let end = rng.gen_range(start + 2..=len - 2);

        let mut segment: Vec<usize> = sequence[start..end]
            .iter()
            .copied()
            .filter(|&id| id != self.depot)
            .collect();
        if segment.len() < 2 {
            return individual;
        }

        let anchor = if start == 1 {
            self.depot
        } else {
            sequence[start - 1]
        };

        let mut reordered = Vec::with_capacity(segment.len());
        let mut current = anchor;
        while let Some(pos) = self.nearest_position(current, &segment) {
            current = segment.swap_remove(pos);
            reordered.push(current);
        }

        let mut new_sequence = sequence[..start].to_vec();
        new_sequence.extend(reordered);
        new_sequence.extend_from_slice(&sequence[end..]);

        let mut speeds = individual.speeds.clone();
        for i in start..end.min(new_sequence.len() - 1) {
            if i < speeds.len() {
                let dist = self
                    .problem
                    .get_distance(new_sequence[i], new_sequence[i + 1]);
                speeds[i] = self.bucketed_speed(dist, rng);
            }
        }

        let mut mutated = Individual::new(new_sequence, speeds, individual.landings);
        mutated.resync_plans(&self.config.drone, rng);
        mutated
    }
}
