//! "Racer Betting": back one of five racers, pay, and watch the race.
//!
//! - A racer must be picked before a round can start
//! - The race runs on a fixed 60 Hz tick once the entry cost is paid
//! - A winning pick pays 50 tokens; every 100 tokens buy one level
//! - The first paid round that leaves credits at or below the entry cost
//!   raises a one-time low-funds prompt

mod game;

pub use game::RaceGame;
