//! Unit tests for the genetic operators.

use ga_survey::config::Config;
use ga_survey::genetic::GeneticEngine;
use ga_survey::geo::Coord;
use ga_survey::individual::Individual;
use ga_survey::problem::SurveyProblem;
use ga_survey::weather::WeatherTable;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Depot plus six survey locations strung north along a meridian, roughly
/// 1.1 km apart.
fn create_test_problem() -> SurveyProblem {
    let mut entries = vec![("DEPOT".to_string(), Coord::new(0.0, 0.0))];
    for i in 1..=6 {
        entries.push((format!("L{}", i), Coord::new(0.01 * i as f64, 0.0)));
    }

    SurveyProblem::new(entries, "DEPOT", WeatherTable::empty()).unwrap()
}

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

#[test]
fn test_random_individual_is_structurally_valid() {
    let problem = create_test_problem();
    let config = Config::new();
    let mut rng = rng();

    for _ in 0..20 {
        let individual = Individual::random(&problem, &config.drone, &mut rng);
        assert!(individual.validate(&problem).is_ok());
        assert_eq!(individual.sequence.len(), individual.speeds.len() + 1);
        assert_eq!(individual.speeds.len(), individual.landings.len());
    }
}

#[test]
fn test_random_speeds_stay_in_discretized_range() {
    let problem = create_test_problem();
    let config = Config::new();
    let mut rng = rng();

    let individual = Individual::random(&problem, &config.drone, &mut rng);
    for &speed in &individual.speeds {
        assert!((36..=96).contains(&speed));
        assert_eq!((speed - 36) % 4, 0);
    }
}

#[test]
fn test_nearest_neighbor_individual_follows_the_line() {
    let problem = create_test_problem();
    let config = Config::new();
    let engine = GeneticEngine::new(&problem, &config);
    let mut rng = rng();

    let individual = engine.nearest_neighbor_individual(&mut rng);
    assert!(individual.validate(&problem).is_ok());

    // Locations sit on a line north of the depot, so greedy nearest-neighbor
    // visits them in registration order.
    assert_eq!(individual.sequence, vec![0, 1, 2, 3, 4, 5, 6, 0]);
}

#[test]
fn test_nearest_neighbor_landing_plan_is_battery_driven() {
    let problem = create_test_problem();
    let config = Config::new();
    let engine = GeneticEngine::new(&problem, &config);
    let mut rng = rng();

    // Short hops at bucketed speeds never exhaust the battery here.
    let individual = engine.nearest_neighbor_individual(&mut rng);
    assert!(individual.landings.iter().all(|&l| !l));
}

#[test]
fn test_crossover_children_are_valid_permutations() {
    let problem = create_test_problem();
    let config = Config::new();
    let engine = GeneticEngine::new(&problem, &config);
    let mut rng = rng();

    for _ in 0..20 {
        let p1 = Individual::random(&problem, &config.drone, &mut rng);
        let p2 = Individual::random(&problem, &config.drone, &mut rng);

        let (c1, c2) = engine.crossover(&p1, &p2, &mut rng);
        assert!(c1.validate(&problem).is_ok());
        assert!(c2.validate(&problem).is_ok());
    }
}

#[test]
fn test_repair_sequence_dedupes_and_completes() {
    let problem = create_test_problem();
    let config = Config::new();
    let engine = GeneticEngine::new(&problem, &config);
    let mut rng = rng();

    // Duplicates of 1 and 2, everything else missing.
    let broken = vec![0, 1, 2, 1, 2, 0];
    let repaired = engine.repair_sequence(&broken, &mut rng);

    assert_eq!(repaired[0], 0);
    assert_eq!(*repaired.last().unwrap(), 0);
    assert_eq!(repaired.len(), problem.survey_count() + 2);

    // First occurrences keep their order, missing ids are appended.
    assert_eq!(&repaired[1..3], &[1, 2]);

    let mut interior: Vec<usize> = repaired[1..repaired.len() - 1].to_vec();
    interior.sort_unstable();
    assert_eq!(interior, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_mutation_preserves_structure() {
    let problem = create_test_problem();
    let config = Config::new();
    let engine = GeneticEngine::new(&problem, &config);
    let mut rng = rng();

    let mut individual = Individual::random(&problem, &config.drone, &mut rng);
    for _ in 0..50 {
        individual = engine.mutate(individual, &mut rng);
        assert!(individual.validate(&problem).is_ok());
    }
}

#[test]
fn test_tournament_keeps_the_lowest_fitness() {
    let problem = create_test_problem();
    let config = Config::new().with_tournament_size(4);
    let engine = GeneticEngine::new(&problem, &config);
    let mut rng = rng();

    // With the tournament covering the whole population the minimum must win.
    let fitnesses = [f64::INFINITY, 5.0, 3.0, 7.0];
    assert_eq!(engine.tournament(&fitnesses, &mut rng), 2);
}

#[test]
fn test_initial_population_is_hybrid_and_valid() {
    let problem = create_test_problem();
    let config = Config::new().with_population_size(10);
    let engine = GeneticEngine::new(&problem, &config);
    let mut rng = rng();

    let population = engine.initial_population(&mut rng);
    assert_eq!(population.len(), 10);

    for individual in &population {
        assert!(individual.validate(&problem).is_ok());
    }
}

#[test]
fn test_resync_regenerates_drifted_plans() {
    let problem = create_test_problem();
    let config = Config::new();
    let mut rng = rng();

    let mut individual = Individual::random(&problem, &config.drone, &mut rng);
    individual.speeds.pop();
    individual.landings.clear();

    individual.resync_plans(&config.drone, &mut rng);
    assert_eq!(individual.speeds.len(), individual.sequence.len() - 1);
    assert_eq!(individual.landings.len(), individual.sequence.len() - 1);
}
