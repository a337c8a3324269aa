//! Card-flip outcome resolver.
//!
//! Builds a deck from a fixed `DeckComposition`, shuffles it, and maps a
//! picked slot to an `Outcome`. Composition counts never change between
//! rounds; only the permutation does.

mod deck;

pub use deck::{Deck, DeckComposition, Slot, SlotKind};
