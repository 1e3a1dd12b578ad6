use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use naishi_engine::core::{Action, GameState};
use naishi_engine::nn::{NaishiEncoder, StateEncoder};
use naishi_engine::rules::{apply_action_array, new_games};
use naishi_engine::scoring::calculate_score;

fn drafted(seed: u64) -> GameState {
    let mut state = GameState::with_seed(seed);
    state.apply_action(Action::Draft { give: 0 }).unwrap();
    state.apply_action(Action::Draft { give: 1 }).unwrap();
    state
}

fn bench_new_game(c: &mut Criterion) {
    c.bench_function("new_game_with_draft", |b| b.iter(|| GameState::with_seed(black_box(7))));
}

fn bench_clone(c: &mut Criterion) {
    let state = drafted(7);
    c.bench_function("state_clone", |b| b.iter(|| black_box(&state).clone()));
}

fn bench_develop(c: &mut Criterion) {
    let state = drafted(7);
    c.bench_function("apply_develop", |b| {
        b.iter_batched(
            || state.clone(),
            |mut s| s.apply_action(black_box(Action::Develop { cell: 5 })),
            BatchSize::SmallInput,
        )
    });
}

fn bench_legal_actions(c: &mut Criterion) {
    let state = drafted(7);
    c.bench_function("legal_actions", |b| b.iter(|| black_box(&state).legal_actions()));
}

fn bench_encode(c: &mut Criterion) {
    let state = drafted(7);
    let encoder = NaishiEncoder::new();
    c.bench_function("encode_observation", |b| {
        b.iter(|| encoder.encode(black_box(&state), state.current_player()))
    });
}

fn bench_score(c: &mut Criterion) {
    let state = drafted(7);
    let territory = state.territory(state.current_player()).clone();
    c.bench_function("calculate_score", |b| b.iter(|| calculate_score(black_box(&territory))));
}

fn bench_batch_draft(c: &mut Criterion) {
    let games = new_games(256, 1);
    let actions = vec![Action::Draft { give: 0 }.encode(); 256];
    c.bench_function("batch_step_256", |b| {
        b.iter_batched(
            || games.clone(),
            |mut g| apply_action_array(&mut g, black_box(&actions)),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    benches,
    bench_new_game,
    bench_clone,
    bench_develop,
    bench_legal_actions,
    bench_encode,
    bench_score,
    bench_batch_draft,
);
criterion_main!(benches);
