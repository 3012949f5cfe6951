use strum::IntoEnumIterator;
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter};

use crate::card::Card;

/// The four seats around the table, in turn order.
#[derive(
    Clone, Copy, Debug, Display, EnumCountMacro, EnumIter, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub enum PlayerId {
    #[strum(serialize = "You")]
    Human,
    #[strum(serialize = "Left Bot")]
    Bot1,
    #[strum(serialize = "Top Bot")]
    Bot2,
    #[strum(serialize = "Right Bot")]
    Bot3,
}

impl PlayerId {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    pub fn next(self) -> Self {
        match self {
            PlayerId::Human => PlayerId::Bot1,
            PlayerId::Bot1 => PlayerId::Bot2,
            PlayerId::Bot2 => PlayerId::Bot3,
            PlayerId::Bot3 => PlayerId::Human,
        }
    }

    pub fn is_bot(self) -> bool {
        !matches!(self, PlayerId::Human)
    }
}

/// What the human (or the host on their behalf) asks the engine to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Play(Card),
    DeclareUno,
    StartSession,
    RestartSession,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    Played,
    Victory(PlayerId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BotMove {
    Played(Card),
    Drew(Card),
}

/// Result of a dispatched [`Intent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntentOutcome {
    Play(PlayOutcome),
    UnoDeclared { meaningful: bool },
    SessionStarted,
}
