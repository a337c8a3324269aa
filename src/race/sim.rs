//! Fixed-timestep race simulation.
//!
//! The race is a live simulation, not a precomputed result: each tick every
//! racer advances by an independent draw from `[min_step, max_step)` until
//! one reaches the finish line. [`RaceSim::advance`] turns wall-clock time
//! into whole ticks so any scheduler (timer, test, manual loop) can drive it.

use std::time::Duration;

use tracing::debug;

use super::field::{RacerField, RacerId};
use crate::core::{GameRng, Outcome, RaceConfig, Result, TieBreak};

/// Stepping state for one race.
#[derive(Clone, Debug)]
pub struct RaceSim {
    field: RacerField,
    start_position: f64,
    finish_line: f64,
    min_step: f64,
    max_step: f64,
    tie_break: TieBreak,

    tick_interval: Duration,
    /// Elapsed time not yet consumed by a whole tick.
    carry: Duration,
    ticks: u64,
    winner: Option<RacerId>,
}

impl RaceSim {
    /// A race at the start line.
    ///
    /// Fails with `Config` on a roster or step range that could never
    /// produce a winner.
    pub fn new(config: &RaceConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            field: RacerField::new(&config.racers, config.start_position),
            start_position: config.start_position,
            finish_line: config.finish_line,
            min_step: config.min_step,
            max_step: config.max_step,
            tie_break: config.tie_break,
            tick_interval: Duration::from_nanos(1_000_000_000 / u64::from(config.tick_rate_hz)),
            carry: Duration::ZERO,
            ticks: 0,
            winner: None,
        })
    }

    /// Back to the start line with no winner.
    pub fn reset(&mut self) {
        self.field.reset(self.start_position);
        self.carry = Duration::ZERO;
        self.ticks = 0;
        self.winner = None;
    }

    #[must_use]
    pub fn field(&self) -> &RacerField {
        &self.field
    }

    #[must_use]
    pub fn winner(&self) -> Option<&RacerId> {
        self.winner.as_ref()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    /// Ticks run since the last reset.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    #[must_use]
    pub fn finish_line(&self) -> f64 {
        self.finish_line
    }

    /// Run one tick. Returns the winner once there is one; a finished race
    /// does not move.
    pub fn tick(&mut self, rng: &mut GameRng) -> Option<RacerId> {
        if self.winner.is_some() {
            return self.winner.clone();
        }
        self.ticks += 1;

        let winner = match self.tie_break {
            TieBreak::IterationOrder => self.step_until_first_finisher(rng),
            TieBreak::FurthestAhead => self.step_all_then_pick_furthest(rng),
        };

        if let Some(id) = &winner {
            debug!(winner = %id, ticks = self.ticks, "race finished");
            self.winner = Some(id.clone());
        }
        winner
    }

    /// Consume `elapsed` time as whole ticks, carrying the remainder.
    ///
    /// Stops early on a finish; leftover time is dropped then.
    pub fn advance(&mut self, rng: &mut GameRng, elapsed: Duration) -> Option<RacerId> {
        if self.winner.is_some() {
            return self.winner.clone();
        }

        self.carry += elapsed;
        while self.carry >= self.tick_interval {
            self.carry -= self.tick_interval;
            if let Some(winner) = self.tick(rng) {
                self.carry = Duration::ZERO;
                return Some(winner);
            }
        }
        None
    }

    /// Tick until someone finishes.
    pub fn run_to_finish(&mut self, rng: &mut GameRng) -> RacerId {
        loop {
            if let Some(winner) = self.tick(rng) {
                return winner;
            }
        }
    }

    fn step_until_first_finisher(&mut self, rng: &mut GameRng) -> Option<RacerId> {
        let (min, max, finish) = (self.min_step, self.max_step, self.finish_line);
        for lane in self.field.lanes_mut() {
            lane.position += rng.gen_range_f64(min..max);
            if lane.position >= finish {
                return Some(lane.racer.clone());
            }
        }
        None
    }

    fn step_all_then_pick_furthest(&mut self, rng: &mut GameRng) -> Option<RacerId> {
        let (min, max) = (self.min_step, self.max_step);
        for lane in self.field.lanes_mut() {
            lane.position += rng.gen_range_f64(min..max);
        }
        furthest_finisher(&self.field, self.finish_line)
    }
}

/// The racer furthest past `finish`, earliest in roster order on equal positions.
fn furthest_finisher(field: &RacerField, finish: f64) -> Option<RacerId> {
    let mut best: Option<(&RacerId, f64)> = None;
    for lane in field.lanes() {
        if lane.position < finish {
            continue;
        }
        match best {
            Some((_, pos)) if lane.position <= pos => {}
            _ => best = Some((&lane.racer, lane.position)),
        }
    }
    best.map(|(id, _)| id.clone())
}

/// Outcome of a finished race for a player who backed `selected`.
#[must_use]
pub fn resolve_race(winner: &RacerId, selected: &RacerId, win_tokens: i64) -> Outcome {
    if winner == selected {
        Outcome::race_win(win_tokens)
    } else {
        Outcome::race_lose()
    }
}
