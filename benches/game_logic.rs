use criterion::{black_box, criterion_group, criterion_main, Criterion};
use classic_tetris::core::{EngineConfig, GameSnapshot, Grid, ScriptedSource};
use classic_tetris::engine::Engine;
use classic_tetris::types::{EngineState, PieceKind};

fn bench_tick(c: &mut Criterion) {
    let mut engine = Engine::with_seed(12345);
    engine.start();

    c.bench_function("engine_tick", |b| {
        b.iter(|| {
            black_box(engine.tick());
            if engine.state() == EngineState::GameOver {
                engine.start();
            }
        })
    });
}

fn bench_row_clear(c: &mut Criterion) {
    c.bench_function("clear_4_rows", |b| {
        b.iter(|| {
            let mut grid = Grid::new(10, 22);
            for y in 18..22 {
                for x in 0..10 {
                    grid.lock_cell(x, y, PieceKind::I);
                }
            }
            black_box(grid.clear_full_rows());
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    c.bench_function("hard_drop_until_game_over", |b| {
        b.iter(|| {
            let mut engine =
                Engine::new(EngineConfig::default(), ScriptedSource::repeat(PieceKind::O))
                    .unwrap();
            engine.start();
            while engine.hard_drop().locked() {}
            black_box(engine.score());
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut engine = Engine::with_seed(12345);
    engine.start();

    c.bench_function("move_left_right", |b| {
        b.iter(|| {
            engine.move_left();
            engine.move_right();
        })
    });
}

fn bench_project_landing(c: &mut Criterion) {
    let mut engine = Engine::with_seed(12345);
    engine.start();

    c.bench_function("project_landing", |b| {
        b.iter(|| black_box(engine.project_landing()))
    });
}

fn bench_snapshot_into(c: &mut Criterion) {
    let mut engine = Engine::with_seed(12345);
    engine.start();
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            engine.snapshot_into(&mut snap);
            black_box(&snap);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_row_clear,
    bench_hard_drop,
    bench_move,
    bench_project_landing,
    bench_snapshot_into
);
criterion_main!(benches);
