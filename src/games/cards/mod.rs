//! "Magic Cards": pay to flip one card from a freshly shuffled deck.
//!
//! - Each round costs 20 credits and deals a new 52-card deck
//! - Picking a card resolves the round immediately
//! - Prizes pay tokens or credits; penalties take credits
//! - Level is re-evaluated after every round and purchase

mod game;

pub use game::CardsGame;
