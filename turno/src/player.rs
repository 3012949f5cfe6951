use crate::card::Card;
use crate::rules;
use crate::turn::PlayerId;

#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    hand: Vec<Card>,
}

impl Player {
    pub fn new(id: PlayerId, cards: Vec<Card>) -> Self {
        Self { id, hand: cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.hand
    }

    pub fn cards_count(&self) -> usize {
        self.hand.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hand.is_empty()
    }

    pub fn card_index(&self, card: &Card) -> Option<usize> {
        self.hand.iter().position(|x| x == card)
    }

    pub fn has_legal_move(&self, top: Option<&Card>) -> bool {
        rules::has_legal_move(&self.hand, top)
    }

    pub(crate) fn add_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    pub(crate) fn remove_card(&mut self, index: usize) -> Card {
        self.hand.remove(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardColor;

    #[test]
    fn remove_card_takes_the_first_copy() {
        let red_2 = Card::new(CardColor::Red, 2);
        let blue_7 = Card::new(CardColor::Blue, 7);
        let mut player = Player::new(PlayerId::Bot1, vec![red_2, blue_7, red_2]);

        let index = player.card_index(&red_2).unwrap();
        assert_eq!(index, 0);
        assert_eq!(player.remove_card(index), red_2);
        assert_eq!(player.cards(), &[blue_7, red_2]);
    }

    #[test]
    fn add_card_appends() {
        let mut player = Player::new(PlayerId::Human, vec![]);
        assert!(player.is_empty());

        player.add_card(Card::new(CardColor::Green, 1));
        assert_eq!(player.cards_count(), 1);
        assert_eq!(player.card_index(&Card::new(CardColor::Green, 2)), None);
    }
}
