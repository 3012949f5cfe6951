use std::collections::VecDeque;

use rand::{rngs::StdRng, Rng, SeedableRng};
use strum::{EnumCount, IntoEnumIterator};

use crate::card::{Card, CardColor};
use crate::constants::{MAX_CARD_VALUE, SEATS};

/// Where fresh cards come from. Draws never run out.
pub trait CardSource {
    fn draw(&mut self) -> Card;

    fn draw_cards(&mut self, count: usize) -> Vec<Card> {
        (0..count).map(|_| self.draw()).collect()
    }
}

/// Independent uniformly random cards, like a deck that is reshuffled after every draw.
#[derive(Debug)]
pub struct RandomDeck {
    rng: StdRng,
}

impl RandomDeck {
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

impl Default for RandomDeck {
    fn default() -> Self {
        Self::new()
    }
}

impl CardSource for RandomDeck {
    fn draw(&mut self) -> Card {
        let color = CardColor::iter()
            .nth(self.rng.gen_range(0..CardColor::COUNT))
            .unwrap_or(CardColor::Green);
        let value = self.rng.gen_range(0..=MAX_CARD_VALUE);
        Card::new(color, value)
    }
}

/// Hands out a fixed sequence of cards, then keeps repeating `filler`.
#[derive(Debug, Clone)]
pub struct StackedDeck {
    cards: VecDeque<Card>,
    filler: Card,
}

impl StackedDeck {
    pub fn new(cards: impl IntoIterator<Item = Card>, filler: Card) -> Self {
        Self {
            cards: cards.into_iter().collect(),
            filler,
        }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

impl CardSource for StackedDeck {
    fn draw(&mut self) -> Card {
        self.cards.pop_front().unwrap_or(self.filler)
    }
}

/// Starting hands, in seat order, and the card turned up on the pile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub hands: [Vec<Card>; SEATS],
    pub opening_card: Option<Card>,
}

impl Deal {
    /// Each seat receives `hand_size` cards in turn, then the opening card is turned up.
    pub fn from_source(source: &mut dyn CardSource, hand_size: usize, opening_card: bool) -> Self {
        let hands = [(); SEATS].map(|_| source.draw_cards(hand_size));
        let opening_card = opening_card.then(|| source.draw());

        Self {
            hands,
            opening_card,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_decks_repeat_themselves() {
        let mut a = RandomDeck::seeded(7);
        let mut b = RandomDeck::seeded(7);
        assert_eq!(a.draw_cards(20), b.draw_cards(20));
    }

    #[test]
    fn random_deck_eventually_shows_every_color() {
        let mut deck = RandomDeck::seeded(1);
        let cards = deck.draw_cards(400);
        for color in CardColor::iter() {
            assert!(cards.iter().any(|card| card.color == color));
        }
        assert!(cards.iter().all(|card| card.value <= MAX_CARD_VALUE));
    }

    #[test]
    fn stacked_deck_falls_back_to_filler() {
        let red_1 = Card::new(CardColor::Red, 1);
        let blue_2 = Card::new(CardColor::Blue, 2);
        let mut deck = StackedDeck::new([red_1], blue_2);

        assert_eq!(deck.remaining(), 1);
        assert_eq!(deck.draw_cards(3), vec![red_1, blue_2, blue_2]);
        assert_eq!(deck.remaining(), 0);
    }

    #[test]
    fn deal_hands_out_seat_by_seat() {
        let mut deck = StackedDeck::new(Card::all(), Card::new(CardColor::Green, 0));
        let deal = Deal::from_source(&mut deck, 7, true);

        assert!(deal.hands.iter().all(|hand| hand.len() == 7));
        assert_eq!(deal.hands[1][0], Card::new(CardColor::Green, 7));
        assert_eq!(deal.opening_card, Some(Card::new(CardColor::Blue, 8)));

        let deal = Deal::from_source(&mut deck, 0, false);
        assert_eq!(deal.opening_card, None);
    }
}
