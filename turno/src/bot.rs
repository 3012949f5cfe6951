//! Bot decision policies.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::card::Card;
use crate::rules;

pub trait BotPolicy {
    /// Picks a card to play from `hand`, or `None` to draw instead.
    fn choose_card(&mut self, hand: &[Card], top: Option<&Card>) -> Option<Card>;
}

/// Plays a uniformly random legal card. No look-ahead.
#[derive(Debug)]
pub struct RandomBot {
    rng: StdRng,
}

impl RandomBot {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomBot {
    fn default() -> Self {
        Self::new()
    }
}

impl BotPolicy for RandomBot {
    fn choose_card(&mut self, hand: &[Card], top: Option<&Card>) -> Option<Card> {
        let legal = rules::legal_cards(hand, top);
        legal.choose(&mut self.rng).copied()
    }
}

/// Always plays the first legal card in hand order.
#[derive(Debug, Default)]
pub struct FirstLegalBot;

impl BotPolicy for FirstLegalBot {
    fn choose_card(&mut self, hand: &[Card], top: Option<&Card>) -> Option<Card> {
        hand.iter().find(|card| rules::is_legal(card, top)).copied()
    }
}
