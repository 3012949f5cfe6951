use std::time::Duration;

use crate::constants::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub hand_size: usize,
    /// Turn up a random card on the pile when a session starts.
    pub opening_card: bool,
    /// Draw for the human automatically when they have nothing to play.
    pub auto_draw: bool,
    pub bot_think_delay: Duration,
    pub bot_pass_delay: Duration,
    pub play_settle_delay: Duration,
    pub stuck_draw_delay: Duration,
    pub stuck_pass_delay: Duration,
    pub uno_grace_period: Duration,
    pub uno_penalty: usize,
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hand_size: STARTING_HAND_SIZE,
            opening_card: true,
            auto_draw: true,
            bot_think_delay: BOT_THINK_DELAY,
            bot_pass_delay: BOT_PASS_DELAY,
            play_settle_delay: PLAY_SETTLE_DELAY,
            stuck_draw_delay: STUCK_DRAW_DELAY,
            stuck_pass_delay: STUCK_PASS_DELAY,
            uno_grace_period: UNO_GRACE_PERIOD,
            uno_penalty: UNO_PENALTY_CARDS,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Defaults, overridden by any valid `TURNO_*` variables in the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(seed) = lookup("TURNO_SEED").and_then(|raw| raw.trim().parse::<u64>().ok()) {
            cfg.seed = Some(seed);
        }
        if let Some(size) = lookup("TURNO_HAND_SIZE")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|size| *size > 0)
        {
            cfg.hand_size = size;
        }
        if let Some(ms) = lookup("TURNO_BOT_DELAY_MS").and_then(|raw| raw.trim().parse::<u64>().ok())
        {
            cfg.bot_think_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = lookup("TURNO_UNO_GRACE_MS").and_then(|raw| raw.trim().parse::<u64>().ok())
        {
            cfg.uno_grace_period = Duration::from_millis(ms);
        }
        if let Some(flag) = lookup("TURNO_OPENING_CARD").and_then(|raw| parse_flag(&raw)) {
            cfg.opening_card = flag;
        }

        cfg
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_table_timings() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.hand_size, 7);
        assert_eq!(cfg.bot_think_delay, Duration::from_secs(1));
        assert_eq!(cfg.play_settle_delay, Duration::from_millis(1500));
        assert_eq!(cfg.uno_grace_period, Duration::from_secs(5));
        assert_eq!(cfg.uno_penalty, 2);
        assert!(cfg.opening_card);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn env_overrides_apply() {
        let cfg = EngineConfig::from_lookup(lookup(&[
            ("TURNO_SEED", "42"),
            ("TURNO_HAND_SIZE", " 5 "),
            ("TURNO_BOT_DELAY_MS", "250"),
            ("TURNO_UNO_GRACE_MS", "3000"),
            ("TURNO_OPENING_CARD", "off"),
        ]));

        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.hand_size, 5);
        assert_eq!(cfg.bot_think_delay, Duration::from_millis(250));
        assert_eq!(cfg.uno_grace_period, Duration::from_secs(3));
        assert!(!cfg.opening_card);
    }

    #[test]
    fn invalid_values_are_ignored() {
        let cfg = EngineConfig::from_lookup(lookup(&[
            ("TURNO_SEED", "soon"),
            ("TURNO_HAND_SIZE", "0"),
            ("TURNO_OPENING_CARD", "maybe"),
        ]));

        assert_eq!(cfg, EngineConfig::default());
    }
}
