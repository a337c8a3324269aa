//! Concrete game variants.

pub mod cards;
pub mod race;

pub use cards::CardsGame;
pub use race::RaceGame;
