//! Move validation.

use crate::card::Card;

/// Whether `candidate` may go on top of `top`. Anything goes on an empty pile.
pub fn is_legal(candidate: &Card, top: Option<&Card>) -> bool {
    match top {
        None => true,
        Some(top) => candidate.matches(top),
    }
}

pub fn legal_cards(hand: &[Card], top: Option<&Card>) -> Vec<Card> {
    hand.iter()
        .filter(|card| is_legal(card, top))
        .copied()
        .collect()
}

pub fn has_legal_move(hand: &[Card], top: Option<&Card>) -> bool {
    hand.iter().any(|card| is_legal(card, top))
}
