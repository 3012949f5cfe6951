use core::fmt;
use std::fmt::Display;

use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString};

use crate::constants::MAX_CARD_VALUE;

#[derive(
    Clone, Copy, Debug, Display, EnumString, EnumCountMacro, EnumIter, PartialEq, Eq, Hash,
)]
pub enum CardColor {
    Green,
    Red,
    Blue,
    Yellow,
}

/// A numbered card. There are no action or wild cards on this table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Card {
    pub color: CardColor,
    pub value: u8,
}

impl Card {
    pub const fn new(color: CardColor, value: u8) -> Self {
        assert!(value <= MAX_CARD_VALUE, "card values run from 0 to 9");
        Self { color, value }
    }

    pub fn matches(&self, other: &Card) -> bool {
        self.color == other.color || self.value == other.value
    }

    /// Every distinct card, color by color.
    pub fn all() -> impl Iterator<Item = Card> {
        use strum::IntoEnumIterator;

        CardColor::iter()
            .flat_map(|color| (0..=MAX_CARD_VALUE).map(move |value| Card::new(color, value)))
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.value)
    }
}
