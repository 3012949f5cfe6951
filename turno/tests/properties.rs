use std::time::Duration;

use proptest::prelude::*;
use turno::{
    bot::FirstLegalBot,
    card::{Card, CardColor},
    config::EngineConfig,
    deck::{Deal, StackedDeck},
    engine::Engine,
    render::GameEvent,
    rules,
    turn::PlayerId,
};

fn red_hand() -> Vec<Card> {
    (0..40).map(|i| Card::new(CardColor::Red, i % 10)).collect()
}

proptest! {
    #[test]
    fn advances_cycle_the_seats(advances in 0usize..60) {
        let deck = StackedDeck::new([], Card::new(CardColor::Red, 0));
        let mut engine = Engine::with_parts(EngineConfig::default(), (), deck, FirstLegalBot);
        engine
            .start_session_with(Deal {
                hands: [red_hand(), red_hand(), red_hand(), red_hand()],
                opening_card: None,
            })
            .unwrap();

        for _ in 0..advances {
            let player = engine.current_player().unwrap();
            let card = engine.hand(player).unwrap()[0];
            engine.attempt_play(player, card).unwrap();
            engine.advance_turn().unwrap();
        }

        let current = engine.current_player().unwrap();
        prop_assert_eq!(current.index(), advances % 4);
        prop_assert!(!engine.state().unwrap().turn_in_progress);
    }

    #[test]
    fn seeded_games_end_cleanly(seed in any::<u64>(), declares in any::<bool>()) {
        let config = EngineConfig {
            hand_size: 4,
            ..EngineConfig::default()
        }
        .with_seed(seed);
        let mut engine = Engine::new(config, Vec::<GameEvent>::new());
        engine.start_session().unwrap();

        for _ in 0..2_000 {
            if engine.is_game_over() {
                break;
            }

            let state = engine.state().unwrap().clone();
            if state.current == PlayerId::Human && !state.turn_in_progress {
                let hand = engine.hand(PlayerId::Human).unwrap().to_vec();
                if let Some(card) = rules::legal_cards(&hand, state.discard_top.as_ref()).first() {
                    engine.human_requests_play(*card).unwrap();
                    if declares && engine.hand(PlayerId::Human).unwrap().len() == 1 {
                        prop_assert_eq!(engine.human_declares_uno(), Ok(true));
                    }
                }
            }

            engine.advance_clock(Duration::from_millis(500));
        }

        let events = engine.renderer();
        let game_overs = events
            .iter()
            .filter(|event| matches!(event, GameEvent::GameOver { .. }))
            .count();
        prop_assert!(game_overs <= 1);

        if let Some(winner) = engine.winner() {
            prop_assert_eq!(game_overs, 1);
            prop_assert_eq!(engine.hand(winner).unwrap().len(), 0);
            prop_assert_eq!(events.last(), Some(&GameEvent::GameOver { winner }));
            prop_assert_eq!(engine.next_deadline(), None);
        }
    }
}
