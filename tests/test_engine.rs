use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use briscola_mc::cards::{all_cards, Card};
use briscola_mc::config::EngineConfig;
use briscola_mc::engine::*;
use briscola_mc::error::BriscolaError;
use briscola_mc::game_state::{CardSet, GameState, Side};
use briscola_mc::sampler::random_choices;

fn c(id: u8) -> Card {
    Card::from_id(id).unwrap()
}

fn opening_state() -> GameState {
    let hand = [c(0), c(10), c(20)];
    GameState::new((0, 0), &hand, CardSet::new(), Side::Player, c(5)).unwrap()
}

fn state_with_spent(n_spent: usize) -> GameState {
    let hand = [c(0), c(10), c(20)];
    let spent: CardSet = all_cards()
        .filter(|card| !hand.contains(card) && *card != c(5))
        .take(n_spent)
        .collect();
    GameState::new((30, 20), &hand, spent, Side::Opponent, c(5)).unwrap()
}

fn engine(samples: usize) -> MonteCarloEngine {
    MonteCarloEngine::with_samples(samples).unwrap()
}

// ---------------------------------------------------------------------------
// Sampler
// ---------------------------------------------------------------------------

#[test]
fn test_choices_shape() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..200 {
        let choices = random_choices(17, &mut rng);
        assert_eq!(choices.len(), 17);
        assert_eq!(choices[16], 0);
        assert!(choices[15] < 2);
        assert!(choices[..15].iter().all(|&c| c < 3));
    }
}

#[test]
fn test_choices_cover_all_slots() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut seen = [false; 3];
    for _ in 0..100 {
        seen[random_choices(5, &mut rng)[0] as usize] = true;
    }
    assert_eq!(seen, [true, true, true]);
}

#[test]
fn test_choices_short_sequences() {
    let mut rng = StdRng::seed_from_u64(3);
    assert!(random_choices(0, &mut rng).is_empty());
    assert_eq!(random_choices(1, &mut rng), vec![0]);
    for _ in 0..50 {
        let two = random_choices(2, &mut rng);
        assert!(two[0] < 2);
        assert_eq!(two[1], 0);
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[test]
fn test_opening_position_estimate() {
    let state = opening_state();
    let mut rng = StdRng::seed_from_u64(42);
    let estimate = engine(1024).run(&state, &mut rng).unwrap();

    assert!(!estimate.terminal);
    assert_eq!(estimate.samples, 1024);
    assert_eq!(estimate.trials.iter().sum::<u64>(), 1024);
    let ps = estimate.try_probabilities().unwrap();
    for p in ps {
        assert!((0.0..=1.0).contains(&p));
    }
}

#[test]
fn test_no_tricks_left_is_terminal() {
    let state = state_with_spent(34);
    assert_eq!(state.n_hands_left(), 0);
    let mut rng = StdRng::seed_from_u64(0);
    let estimate = engine(1024).run(&state, &mut rng).unwrap();
    assert!(estimate.terminal);
    assert_eq!(estimate.trials, [0, 0, 0]);
    assert_eq!(estimate.try_probabilities().unwrap(), [0.0, 0.0, 0.0]);
}

#[test]
fn test_one_trick_left_is_terminal() {
    let state = state_with_spent(32);
    assert_eq!(state.n_hands_left(), 1);
    let estimate = engine(10).run_parallel(&state, 9).unwrap();
    assert_eq!(estimate, Estimate::terminal());
}

#[test]
fn test_seeded_run_is_reproducible() {
    let state = state_with_spent(10);
    let e = engine(300);
    let a = e.run(&state, &mut StdRng::seed_from_u64(11)).unwrap();
    let b = e.run(&state, &mut StdRng::seed_from_u64(11)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_parallel_independent_of_threads() {
    let state = opening_state();
    let config = EngineConfig {
        samples: 500,
        batch_size: 32,
        ..EngineConfig::default()
    };
    let e = MonteCarloEngine::new(config).unwrap();

    let single = rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap();
    let many = rayon::ThreadPoolBuilder::new().num_threads(4).build().unwrap();
    let a = single.install(|| e.run_parallel(&state, 5)).unwrap();
    let b = many.install(|| e.run_parallel(&state, 5)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.trials.iter().sum::<u64>(), 500);
}

#[test]
fn test_zero_threshold_always_wins() {
    let config = EngineConfig {
        samples: 200,
        win_threshold: 0,
        seed: Some(3),
        ..EngineConfig::default()
    };
    let estimate = MonteCarloEngine::new(config)
        .unwrap()
        .estimate(&opening_state())
        .unwrap();
    for p in estimate.try_probabilities().unwrap() {
        assert_relative_eq!(p, 1.0);
    }
}

#[test]
fn test_configured_seed_is_used() {
    let config = EngineConfig {
        samples: 100,
        seed: Some(21),
        ..EngineConfig::default()
    };
    let e = MonteCarloEngine::new(config).unwrap();
    let state = state_with_spent(20);
    assert_eq!(e.estimate(&state).unwrap(), e.estimate(&state).unwrap());
}

#[test]
fn test_unsampled_slot() {
    let estimate = Estimate {
        wins: [2, 0, 1],
        trials: [5, 0, 4],
        samples: 9,
        terminal: false,
    };
    assert_relative_eq!(estimate.probability(0).unwrap(), 0.4);
    assert_eq!(estimate.probability(1), None);
    assert!(matches!(
        estimate.try_probabilities(),
        Err(BriscolaError::NumericEdgeCase { slot: 1 })
    ));
    assert_eq!(estimate.best_slot(), Some(0));
}

#[test]
fn test_slot_out_of_range() {
    let estimate = Estimate {
        wins: [1, 1, 1],
        trials: [2, 2, 2],
        samples: 6,
        terminal: false,
    };
    assert_eq!(estimate.probability(3), None);
    assert_eq!(estimate.probability(usize::MAX), None);
    assert_eq!(Estimate::terminal().probability(3), None);
}

#[test]
fn test_estimate_string() {
    let estimate = Estimate {
        wins: [1, 0, 0],
        trials: [2, 0, 1],
        samples: 3,
        terminal: false,
    };
    let s = format!("{}", estimate);
    assert!(s.contains("slot 0: 50.0%"));
    assert!(s.contains("slot 1: n/a"));
}

#[test]
fn test_invalid_engine_config() {
    assert!(MonteCarloEngine::with_samples(0).is_err());
}
