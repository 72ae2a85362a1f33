//! Rules and search benchmarks.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure:
//! - Legal action generation on an empty and a crowded 9x9 board
//! - Applying a wall, which runs the stranding check
//! - One MCTS decision at a few simulation counts

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_quoridor::board::Orientation;
use rust_quoridor::core::{Action, GameState};
use rust_quoridor::mcts::{MCTSConfig, MCTSSearch};
use rust_quoridor::nn::UniformEvaluator;
use rust_quoridor::rules::Quoridor;

/// A midgame position with a dozen walls down.
fn crowded(game: &Quoridor) -> GameState {
    let script = [
        Action::wall(3, 3, Orientation::Horizontal),
        Action::wall(4, 4, Orientation::Vertical),
        Action::wall(3, 5, Orientation::Horizontal),
        Action::wall(5, 2, Orientation::Vertical),
        Action::wall(1, 0, Orientation::Horizontal),
        Action::wall(6, 6, Orientation::Horizontal),
        Action::wall(2, 7, Orientation::Vertical),
        Action::wall(6, 1, Orientation::Horizontal),
        Action::step_to(1, 4),
        Action::step_to(7, 4),
        Action::wall(5, 5, Orientation::Vertical),
        Action::wall(1, 2, Orientation::Vertical),
    ];
    let mut state = game.initial_state();
    for action in &script {
        state = game.apply(&state, action).unwrap();
    }
    state
}

// =============================================================================
// Rules Benchmarks
// =============================================================================

fn bench_legal_actions(c: &mut Criterion) {
    let game = Quoridor::default();
    let mut group = c.benchmark_group("legal_actions");

    let opening = game.initial_state();
    group.bench_function("opening", |b| b.iter(|| black_box(game.legal_actions(black_box(&opening)))));

    let midgame = crowded(&game);
    group.bench_function("midgame", |b| b.iter(|| black_box(game.legal_actions(black_box(&midgame)))));

    group.finish();
}

fn bench_apply_wall(c: &mut Criterion) {
    let game = Quoridor::default();
    let state = crowded(&game);
    let wall = Action::wall(4, 1, Orientation::Vertical);

    c.bench_function("apply_wall", |b| b.iter(|| black_box(game.apply(black_box(&state), &wall))));
}

// =============================================================================
// Search Benchmarks
// =============================================================================

fn bench_mcts_decision(c: &mut Criterion) {
    let game = Quoridor::default();
    let evaluator = UniformEvaluator::new(game.action_count());
    let state = game.initial_state();
    let mut group = c.benchmark_group("mcts_decision");
    group.sample_size(10);

    for sims in [50, 200, 800] {
        group.throughput(Throughput::Elements(sims as u64));
        group.bench_with_input(BenchmarkId::from_parameter(sims), &sims, |b, &sims| {
            let config = MCTSConfig::for_testing().with_simulations(sims);
            b.iter(|| {
                let mut search = MCTSSearch::new(game.clone(), &evaluator, config.clone()).unwrap();
                black_box(search.select_action(&state).unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_legal_actions, bench_apply_wall, bench_mcts_decision);
criterion_main!(benches);
