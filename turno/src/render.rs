//! The outbound side of the engine: whatever draws the table.

use crate::card::Card;
use crate::turn::PlayerId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    CardPlayed { player: PlayerId, card: Card },
    HandChanged { player: PlayerId, hand: Vec<Card> },
    TurnChanged { player: PlayerId },
    GameOver { winner: PlayerId },
    Penalty { player: PlayerId, cards_added: usize },
}

/// Receives presentation requests from the engine.
///
/// Every hook forwards to [`Renderer::on_event`] unless overridden, so a
/// renderer can either handle events one by one or take them as a stream.
pub trait Renderer {
    fn on_card_played(&mut self, player: PlayerId, card: Card) {
        self.on_event(GameEvent::CardPlayed { player, card });
    }

    fn on_hand_changed(&mut self, player: PlayerId, hand: &[Card]) {
        self.on_event(GameEvent::HandChanged {
            player,
            hand: hand.to_vec(),
        });
    }

    fn on_turn_changed(&mut self, player: PlayerId) {
        self.on_event(GameEvent::TurnChanged { player });
    }

    fn on_game_over(&mut self, winner: PlayerId) {
        self.on_event(GameEvent::GameOver { winner });
    }

    fn on_penalty(&mut self, player: PlayerId, cards_added: usize) {
        self.on_event(GameEvent::Penalty {
            player,
            cards_added,
        });
    }

    fn on_event(&mut self, _event: GameEvent) {}
}

impl Renderer for () {}

impl Renderer for Vec<GameEvent> {
    fn on_event(&mut self, event: GameEvent) {
        self.push(event);
    }
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn on_card_played(&mut self, player: PlayerId, card: Card) {
        (**self).on_card_played(player, card);
    }

    fn on_hand_changed(&mut self, player: PlayerId, hand: &[Card]) {
        (**self).on_hand_changed(player, hand);
    }

    fn on_turn_changed(&mut self, player: PlayerId) {
        (**self).on_turn_changed(player);
    }

    fn on_game_over(&mut self, winner: PlayerId) {
        (**self).on_game_over(winner);
    }

    fn on_penalty(&mut self, player: PlayerId, cards_added: usize) {
        (**self).on_penalty(player, cards_added);
    }

    fn on_event(&mut self, event: GameEvent) {
        (**self).on_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardColor;

    #[derive(Default)]
    struct TurnCounter {
        turns: usize,
        other: usize,
    }

    impl Renderer for TurnCounter {
        fn on_turn_changed(&mut self, _player: PlayerId) {
            self.turns += 1;
        }

        fn on_event(&mut self, _event: GameEvent) {
            self.other += 1;
        }
    }

    #[test]
    fn vec_records_every_hook() {
        let card = Card::new(CardColor::Red, 7);
        let mut events = Vec::new();

        events.on_card_played(PlayerId::Bot1, card);
        events.on_hand_changed(PlayerId::Bot1, &[card]);
        events.on_turn_changed(PlayerId::Bot2);
        events.on_penalty(PlayerId::Human, 2);
        events.on_game_over(PlayerId::Bot1);

        assert_eq!(
            events,
            vec![
                GameEvent::CardPlayed {
                    player: PlayerId::Bot1,
                    card
                },
                GameEvent::HandChanged {
                    player: PlayerId::Bot1,
                    hand: vec![card]
                },
                GameEvent::TurnChanged {
                    player: PlayerId::Bot2
                },
                GameEvent::Penalty {
                    player: PlayerId::Human,
                    cards_added: 2
                },
                GameEvent::GameOver {
                    winner: PlayerId::Bot1
                },
            ]
        );
    }

    #[test]
    fn overridden_hooks_skip_on_event() {
        let mut counter = TurnCounter::default();
        counter.on_turn_changed(PlayerId::Human);
        counter.on_game_over(PlayerId::Human);

        assert_eq!(counter.turns, 1);
        assert_eq!(counter.other, 1);
    }

    fn show_turn(mut renderer: impl Renderer) {
        renderer.on_turn_changed(PlayerId::Bot3);
        renderer.on_penalty(PlayerId::Human, 2);
    }

    #[test]
    fn borrowed_renderers_keep_their_overrides() {
        let mut counter = TurnCounter::default();
        show_turn(&mut counter);
        assert_eq!(counter.turns, 1);
        assert_eq!(counter.other, 1);

        let mut events = Vec::new();
        show_turn(&mut events);
        assert_eq!(
            events,
            vec![
                GameEvent::TurnChanged {
                    player: PlayerId::Bot3
                },
                GameEvent::Penalty {
                    player: PlayerId::Human,
                    cards_added: 2
                },
            ]
        );
    }
}
