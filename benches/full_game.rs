use std::time::Instant;

use rand::{rngs::SmallRng, Rng, SeedableRng};
use snake_modes::engine::TickOutcome;
use snake_modes::types::{Direction, TickInstruments};
use snake_modes::{GameConfig, GameEngine, Mode, Scene};

use criterion::{black_box, criterion_group, criterion_main, Bencher, Criterion};

#[derive(Debug)]
struct Instruments {}

impl TickInstruments for Instruments {
    fn observe_tick(&self, _: std::time::Duration) {}
}

// plays random turns until the game ends, restarting as needed, counting one iteration per frame
fn bench_games(b: &mut Bencher, mode: Mode, capture: bool) {
    b.iter_custom(|iter_count| {
        let instruments = Instruments {};
        let mut rng = SmallRng::from_entropy();
        let mut engine = GameEngine::with_seed(GameConfig::default(), rng.gen()).unwrap();
        engine.on_mode_selected(mode);
        engine.start();

        let start = Instant::now();
        let mut total_iterations = 0;
        while total_iterations < iter_count {
            if rng.gen_ratio(1, 20) {
                let direction = Direction::all()[rng.gen_range(0..4)];
                engine.on_direction_input(direction);
            }
            match engine.tick_with(&instruments) {
                TickOutcome::GameOver(_) | TickOutcome::Idle => {
                    engine.start();
                }
                TickOutcome::Waiting { .. } | TickOutcome::Moved { .. } => {}
            }
            if capture {
                black_box(Scene::capture(&engine));
            }
            total_iterations += 1;
        }
        start.elapsed()
    });
}

fn criterion_benchmark(c: &mut Criterion) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .try_init();

    let mut g = c.benchmark_group("full game");
    for mode in Mode::all() {
        g.bench_function(format!("{}", mode), |b| bench_games(b, mode, false));
    }
    g.bench_function("classic with scene capture", |b| {
        bench_games(b, Mode::Classic, true)
    });
    g.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
