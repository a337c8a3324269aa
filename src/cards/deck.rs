//! The card game's deck: a fixed composition, reshuffled every round.
//!
//! All randomness happens in [`Deck::build`]. Revealing a slot is a pure
//! lookup.

use serde::{Deserialize, Serialize};

use crate::core::{ArcadeError, GameRng, Outcome, Result};

/// What a face-down card holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SlotKind {
    SuperPrize,
    CreditPrize,
    Prize,
    Penalty,
    Neutral,
}

/// One card in the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    pub kind: SlotKind,
    /// Tokens or credits won or lost. Zero for neutral cards.
    pub value: i64,
}

impl Slot {
    #[must_use]
    pub const fn new(kind: SlotKind, value: i64) -> Self {
        Self { kind, value }
    }

    /// The outcome revealing this slot produces.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        match self.kind {
            SlotKind::SuperPrize => Outcome::super_token_prize(self.value),
            SlotKind::CreditPrize => Outcome::credit_prize(self.value),
            SlotKind::Prize => Outcome::token_prize(self.value),
            SlotKind::Penalty => Outcome::credit_penalty(self.value),
            SlotKind::Neutral => Outcome::neutral(),
        }
    }
}

/// Fixed multiset of slot kinds. Everything not special is neutral.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckComposition {
    pub size: usize,

    pub super_prizes: usize,
    pub super_prize_tokens: i64,

    pub credit_prizes: usize,
    pub credit_prize_credits: i64,

    pub prizes: usize,
    pub prize_tokens: i64,

    pub penalties: usize,
    pub penalty_credits: i64,
}

impl Default for DeckComposition {
    fn default() -> Self {
        Self {
            size: 52,
            super_prizes: 2,
            super_prize_tokens: 250,
            credit_prizes: 5,
            credit_prize_credits: 50,
            prizes: 10,
            prize_tokens: 50,
            penalties: 10,
            penalty_credits: 10,
        }
    }
}

impl DeckComposition {
    /// Number of non-neutral slots.
    #[must_use]
    pub fn special_count(&self) -> usize {
        self.super_prizes + self.credit_prizes + self.prizes + self.penalties
    }

    #[must_use]
    pub fn neutral_count(&self) -> usize {
        self.size.saturating_sub(self.special_count())
    }

    /// How many slots of `kind` a deck built from this composition holds.
    #[must_use]
    pub fn count(&self, kind: SlotKind) -> usize {
        match kind {
            SlotKind::SuperPrize => self.super_prizes,
            SlotKind::CreditPrize => self.credit_prizes,
            SlotKind::Prize => self.prizes,
            SlotKind::Penalty => self.penalties,
            SlotKind::Neutral => self.neutral_count(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.special_count() > self.size {
            return Err(ArcadeError::Config(format!(
                "deck of {} slots cannot hold {} special cards",
                self.size,
                self.special_count()
            )));
        }
        if self.size == 0 {
            return Err(ArcadeError::Config("deck must not be empty".to_string()));
        }
        Ok(())
    }

    /// Slots in composition order, before shuffling.
    #[must_use]
    pub fn slots(&self) -> Vec<Slot> {
        let mut slots = Vec::with_capacity(self.size);
        let groups = [
            (SlotKind::SuperPrize, self.super_prizes, self.super_prize_tokens),
            (SlotKind::CreditPrize, self.credit_prizes, self.credit_prize_credits),
            (SlotKind::Prize, self.prizes, self.prize_tokens),
            (SlotKind::Penalty, self.penalties, self.penalty_credits),
            (SlotKind::Neutral, self.neutral_count(), 0),
        ];
        for (kind, count, value) in groups {
            slots.extend(std::iter::repeat(Slot::new(kind, value)).take(count));
        }
        slots
    }
}

/// A shuffled deck for one round, tracking which slots have been flipped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    slots: Vec<Slot>,
    revealed: Vec<bool>,
}

impl Deck {
    /// Lay out the composition and shuffle it uniformly.
    #[must_use]
    pub fn build(composition: &DeckComposition, rng: &mut GameRng) -> Self {
        let mut slots = composition.slots();
        rng.shuffle(&mut slots);
        Self::from_slots(slots)
    }

    /// A deck in the given order, nothing revealed.
    #[must_use]
    pub fn from_slots(slots: Vec<Slot>) -> Self {
        let revealed = vec![false; slots.len()];
        Self { slots, revealed }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    #[must_use]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    /// Number of slots of `kind`, revealed or not.
    #[must_use]
    pub fn count(&self, kind: SlotKind) -> usize {
        self.slots.iter().filter(|s| s.kind == kind).count()
    }

    /// Flip a slot and return its outcome. Each slot flips at most once.
    pub fn reveal(&mut self, index: usize) -> Result<(Slot, Outcome)> {
        let len = self.slots.len();
        let slot = *self
            .slots
            .get(index)
            .ok_or(ArcadeError::SlotOutOfRange { index, len })?;

        if self.revealed[index] {
            return Err(ArcadeError::SlotAlreadyRevealed(index));
        }
        self.revealed[index] = true;

        Ok((slot, slot.outcome()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OutcomeKind;

    #[test]
    fn test_default_composition() {
        let composition = DeckComposition::default();
        assert_eq!(composition.special_count(), 27);
        assert_eq!(composition.neutral_count(), 25);
        assert_eq!(composition.slots().len(), 52);
    }

    #[test]
    fn test_build_preserves_composition() {
        let composition = DeckComposition::default();
        let deck = Deck::build(&composition, &mut GameRng::new(42));

        assert_eq!(deck.len(), 52);
        assert_eq!(deck.count(SlotKind::SuperPrize), 2);
        assert_eq!(deck.count(SlotKind::CreditPrize), 5);
        assert_eq!(deck.count(SlotKind::Prize), 10);
        assert_eq!(deck.count(SlotKind::Penalty), 10);
        assert_eq!(deck.count(SlotKind::Neutral), 25);
    }

    #[test]
    fn test_build_is_seeded() {
        let composition = DeckComposition::default();
        let a = Deck::build(&composition, &mut GameRng::new(9));
        let b = Deck::build(&composition, &mut GameRng::new(9));
        let c = Deck::build(&composition, &mut GameRng::new(10));

        assert_eq!(a, b);
        assert_ne!(a.slots(), c.slots());
    }

    #[test]
    fn test_reveal_maps_outcomes() {
        let mut deck = Deck::from_slots(DeckComposition::default().slots());

        // Composition order: 2 super, 5 credit, 10 prize, 10 penalty, 25 neutral
        assert_eq!(deck.reveal(0).unwrap().1, Outcome::super_token_prize(250));
        assert_eq!(deck.reveal(2).unwrap().1, Outcome::credit_prize(50));
        assert_eq!(deck.reveal(7).unwrap().1, Outcome::token_prize(50));
        assert_eq!(deck.reveal(17).unwrap().1, Outcome::credit_penalty(10));

        let (slot, outcome) = deck.reveal(51).unwrap();
        assert_eq!(slot.kind, SlotKind::Neutral);
        assert_eq!(outcome.kind, OutcomeKind::Neutral);
        assert_eq!(outcome.magnitude, 0);
    }

    #[test]
    fn test_reveal_once() {
        let mut deck = Deck::build(&DeckComposition::default(), &mut GameRng::new(1));

        deck.reveal(3).unwrap();
        assert!(deck.is_revealed(3));
        assert_eq!(deck.reveal(3).unwrap_err(), ArcadeError::SlotAlreadyRevealed(3));
    }

    #[test]
    fn test_reveal_out_of_range() {
        let mut deck = Deck::build(&DeckComposition::default(), &mut GameRng::new(1));
        assert_eq!(
            deck.reveal(52).unwrap_err(),
            ArcadeError::SlotOutOfRange { index: 52, len: 52 }
        );
        assert!(!deck.is_revealed(52));
    }

    #[test]
    fn test_validate_rejects_overfull() {
        let composition = DeckComposition {
            size: 20,
            ..DeckComposition::default()
        };
        assert!(composition.validate().is_err());
        assert!(DeckComposition::default().validate().is_ok());
    }
}
