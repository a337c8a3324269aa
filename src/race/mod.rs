//! Racer-betting outcome resolver.
//!
//! A field of independent random walks stepped on a fixed tick until one
//! racer crosses the finish line, then settled against the player's
//! pre-committed pick.

mod field;
mod sim;

pub use field::{Lane, Racer, RacerField, RacerId};
pub use sim::{resolve_race, RaceSim};
