use std::time::Duration;

use strum::EnumCount;

use crate::turn::PlayerId;

pub(crate) const MAX_CARD_VALUE: u8 = 9;

pub(crate) const SEATS: usize = PlayerId::COUNT;

pub(crate) const STARTING_HAND_SIZE: usize = 7;
pub(crate) const UNO_PENALTY_CARDS: usize = 2;
pub(crate) const BOT_PASS_DRAW: usize = 1;
pub(crate) const STUCK_DRAW: usize = 1;

pub(crate) const BOT_THINK_DELAY: Duration = Duration::from_millis(1000);
pub(crate) const BOT_PASS_DELAY: Duration = Duration::from_millis(1000);
pub(crate) const PLAY_SETTLE_DELAY: Duration = Duration::from_millis(1500);
pub(crate) const STUCK_DRAW_DELAY: Duration = Duration::from_millis(1000);
pub(crate) const STUCK_PASS_DELAY: Duration = Duration::from_millis(1000);
pub(crate) const UNO_GRACE_PERIOD: Duration = Duration::from_secs(5);
