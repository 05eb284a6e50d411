use r7cal::eval::{Evaluator, MemoTable, evaluate_naive};
use r7cal::search::{
    CancelSignal, Problem, SearchConfig, SearchOutcome, SearchRange, run_parallel_search,
    run_parallel_search_with_signal,
};
use r7cal::{CalibrationError, Modulus};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Known solution of the reference instance f(4, 1) == 6 with M = 32768.
const REFERENCE_R7: u16 = 25734;

fn reference_problem() -> Problem {
    Problem::new(Modulus::default(), 4, 1, 6).unwrap()
}

#[test]
fn test_reference_instance_parallel_search() {
    let config = SearchConfig::default().with_workers(8).quiet();
    let result = run_parallel_search(&config).unwrap();

    assert_eq!(
        result.outcome,
        SearchOutcome::Found {
            r7: REFERENCE_R7,
            worker_id: 6
        }
    );
    assert_eq!(result.workers.len(), 8);
    assert_eq!(result.workers[6].found, Some(REFERENCE_R7));
    // Worker 6 scans from 24576 and stops at the solution
    assert_eq!(
        result.workers[6].candidates_evaluated,
        u64::from(REFERENCE_R7 - 24576 + 1)
    );
}

#[test]
fn test_reference_prefix_sampled() {
    let problem = reference_problem();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let mut samples: Vec<u16> = (0..48).map(|_| rng.gen_range(0..REFERENCE_R7)).collect();
    samples.extend(REFERENCE_R7 - 16..REFERENCE_R7);
    samples.extend([0, 1, 2]);

    for r7 in samples {
        assert!(!problem.is_solution(r7), "r7 = {} unexpectedly solves", r7);
    }
    assert!(problem.is_solution(REFERENCE_R7));
}

#[test]
#[ignore = "scans 25734 candidates on one thread"]
fn test_reference_prefix_exhaustive() {
    let problem = reference_problem();
    assert_eq!(
        problem.scan_range(SearchRange::new(0, u32::from(REFERENCE_R7) + 1)),
        Some(REFERENCE_R7)
    );
}

#[test]
fn test_parallel_agrees_with_sequential_scan() {
    // f(2, 3) = 5 * r7 + 4 (mod 50): targets that are 4 mod 5 have ten
    // solutions each, every other target has none.
    let modulus = Modulus::new(50).unwrap();
    for target in 0..50 {
        let problem = Problem::new(modulus, 2, 3, target).unwrap();
        let solutions = problem.solutions_in(SearchRange::new(0, 50));
        assert_eq!(solutions.is_empty(), target % 5 != 4, "target {}", target);

        let config = SearchConfig::default()
            .with_modulus(modulus)
            .with_initial(2, 3)
            .with_target(target)
            .with_workers(4)
            .quiet();
        let result = run_parallel_search(&config).unwrap();

        match result.outcome {
            SearchOutcome::Found { r7, .. } => assert!(solutions.contains(&r7)),
            SearchOutcome::NotFound => assert!(solutions.is_empty()),
            SearchOutcome::Cancelled => panic!("search was not cancelled"),
        }
    }
}

#[test]
fn test_truncated_domain_exhaustion() {
    // f(0, 1) = 2 regardless of r7
    let config = SearchConfig::default()
        .with_modulus(Modulus::new(10).unwrap())
        .with_initial(0, 1)
        .with_target(7)
        .with_workers(3)
        .quiet();
    let result = run_parallel_search(&config).unwrap();

    assert_eq!(result.outcome, SearchOutcome::NotFound);
    assert_eq!(result.total_statistics.candidates_evaluated, 10);
    assert_eq!(result.total_statistics.workers_cancelled, 0);
}

#[test]
fn test_early_cancellation_leaves_domain_unscanned() {
    let cancel = CancelSignal::new();
    cancel.raise();

    let config = SearchConfig::default().with_workers(8).quiet();
    let result = run_parallel_search_with_signal(&config, cancel).unwrap();

    assert_eq!(result.outcome, SearchOutcome::Cancelled);
    assert!(result.total_statistics.candidates_evaluated < 32768);
    assert_eq!(result.total_statistics.workers_cancelled, 8);
}

#[test]
fn test_invalid_configuration_is_an_error() {
    let config = SearchConfig::default().with_workers(0);
    assert!(matches!(
        run_parallel_search(&config),
        Err(CalibrationError::ZeroWorkers)
    ));

    let config = SearchConfig::default().with_initial(32768, 1).with_workers(2);
    assert!(matches!(
        run_parallel_search(&config),
        Err(CalibrationError::ArgumentOutOfDomain { name: "r0", .. })
    ));
}

#[test]
fn test_memoized_matches_naive_on_random_small_inputs() {
    let modulus = Modulus::default();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..200 {
        let r0 = rng.gen_range(0..=2);
        let r1 = rng.gen_range(0..20);
        let r7 = rng.gen_range(0..20);

        let naive = evaluate_naive(modulus, r0, r1, r7, 1_000_000).unwrap();
        let mut memo = MemoTable::new(modulus);
        let memoized = Evaluator::new(r7).evaluate(&mut memo, r0, r1);
        assert_eq!(naive, memoized, "f({}, {}) r7 = {}", r0, r1, r7);
    }
}
