use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quantum_chess::engines::engine_random::RandomOpponent;
use quantum_chess::engines::engine_trait::Opponent;
use quantum_chess::game_state::game_state::GameState;
use quantum_chess::game_state::variants::Variant;
use quantum_chess::utils::match_harness::{play_match, MatchConfig};

fn bench_choose_move(c: &mut Criterion) {
    let state = GameState::standard();
    let mut opponent = RandomOpponent::seeded(7);

    c.bench_function("random_opponent_choose_move_start", |b| {
        b.iter(|| black_box(opponent.choose_move(black_box(&state))));
    });
}

fn bench_full_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_match");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for variant in [Variant::Standard, Variant::Randomized] {
        let config = MatchConfig {
            variant,
            max_plies: 200,
        };
        group.bench_function(variant.to_string(), |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                let mut white = RandomOpponent::seeded(seed);
                let mut black = RandomOpponent::seeded(seed ^ 0xA5A5);
                let result = play_match(&mut white, &mut black, seed, &config)
                    .expect("benchmark match should run");
                black_box(result.moves.len())
            });
        });
    }

    group.finish();
}

criterion_group!(opponent_benches, bench_choose_move, bench_full_match);
criterion_main!(opponent_benches);
