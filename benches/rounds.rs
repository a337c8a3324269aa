//! Round throughput benchmarks.
//!
//! Run with: cargo bench --bench rounds

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use arcade_engine::cards::{Deck, DeckComposition};
use arcade_engine::core::{GameRng, RaceConfig};
use arcade_engine::events::Command;
use arcade_engine::games::CardsGame;
use arcade_engine::race::RaceSim;
use arcade_engine::rules::RoundRules;

fn bench_deck_build(c: &mut Criterion) {
    let composition = DeckComposition::default();
    let mut rng = GameRng::new(1);

    c.bench_function("deck_build_52", |b| {
        b.iter(|| Deck::build(black_box(&composition), &mut rng))
    });
}

fn bench_race(c: &mut Criterion) {
    let config = RaceConfig::default();
    let mut sim = RaceSim::new(&config).unwrap();
    let mut rng = GameRng::new(1);

    c.bench_function("race_run_to_finish", |b| {
        b.iter(|| {
            sim.reset();
            black_box(sim.run_to_finish(&mut rng))
        })
    });
}

fn bench_cards_round(c: &mut Criterion) {
    c.bench_function("cards_full_round", |b| {
        b.iter_batched(
            || CardsGame::with_defaults(7).unwrap(),
            |mut game| {
                game.apply(Command::StartRound).unwrap();
                black_box(game.apply(Command::SelectSlot(black_box(13))).unwrap())
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_deck_build, bench_race, bench_cards_round);
criterion_main!(benches);
