use std::ops::Deref;
use std::time::Duration;

use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

use crate::bot::{BotPolicy, RandomBot};
use crate::card::Card;
use crate::config::EngineConfig;
use crate::constants::{BOT_PASS_DRAW, STUCK_DRAW};
use crate::deck::{CardSource, Deal, RandomDeck};
use crate::error::{Result, TurnError};
use crate::player::Player;
use crate::render::Renderer;
use crate::rules;
use crate::timer::{TimerHandle, Timers};
use crate::turn::{BotMove, Intent, IntentOutcome, PlayOutcome, PlayerId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub current: PlayerId,
    pub discard_top: Option<Card>,
    pub turn_in_progress: bool,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
    /// Only tracked for the human.
    pub uno_declared: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Wakeup {
    AdvanceTurn,
    BotTurn,
    UnoPenalty,
    StuckDraw,
}

#[derive(Debug, Default)]
struct Pending {
    advance: Option<TimerHandle>,
    bot: Option<TimerHandle>,
    penalty: Option<TimerHandle>,
    stuck: Option<TimerHandle>,
}

#[derive(Debug)]
struct Session {
    state: GameState,
    players: Vec<Player>,
}

/// Hands back the session if a game is in play. Works for shared and unique borrows.
fn live<S: Deref<Target = Session>>(session: Option<S>) -> Result<S> {
    match session {
        None => Err(TurnError::InvalidState("no session has started")),
        Some(session) if session.state.game_over => {
            Err(TurnError::InvalidState("the game is over"))
        }
        Some(session) => Ok(session),
    }
}

/// The single authority over whose turn it is and what may be played.
///
/// The engine never looks at a clock. Delays (bot thinking, the UNO grace
/// window, card animations) are virtual timers that fire when the host calls
/// [`Engine::advance_clock`] or [`Engine::advance_clock_to`].
pub struct Engine<R> {
    config: EngineConfig,
    renderer: R,
    deck: Box<dyn CardSource + Send>,
    bot: Box<dyn BotPolicy + Send>,
    timers: Timers<Wakeup>,
    pending: Pending,
    session: Option<Session>,
}

impl<R: Renderer> Engine<R> {
    pub fn new(config: EngineConfig, renderer: R) -> Self {
        let (deck, bot) = match config.seed {
            Some(seed) => (RandomDeck::seeded(seed), RandomBot::seeded(seed.wrapping_add(1))),
            None => (RandomDeck::new(), RandomBot::new()),
        };

        Self::with_parts(config, renderer, deck, bot)
    }

    pub fn with_parts(
        config: EngineConfig,
        renderer: R,
        deck: impl CardSource + Send + 'static,
        bot: impl BotPolicy + Send + 'static,
    ) -> Self {
        Self {
            config,
            renderer,
            deck: Box::new(deck),
            bot: Box::new(bot),
            timers: Timers::new(),
            pending: Pending::default(),
            session: None,
        }
    }

    /// Deals a fresh game. Fails while another game is still being played.
    pub fn start_session(&mut self) -> Result<()> {
        self.ensure_no_game_in_play()?;
        let deal = self.deal();
        self.begin(deal);
        Ok(())
    }

    pub fn start_session_with(&mut self, deal: Deal) -> Result<()> {
        self.ensure_no_game_in_play()?;
        self.begin(deal);
        Ok(())
    }

    /// Throws away the current game, pending timers included, and deals again.
    pub fn restart_session(&mut self) {
        let deal = self.deal();
        self.begin(deal);
    }

    pub fn attempt_play(&mut self, player: PlayerId, card: Card) -> Result<PlayOutcome> {
        let session = live(self.session.as_mut())?;
        let state = &mut session.state;

        if player != state.current {
            return Err(TurnError::NotYourTurn);
        }
        if state.turn_in_progress {
            return Err(TurnError::ActionLocked);
        }

        let seat = &mut session.players[player.index()];
        let index = seat.card_index(&card).ok_or(TurnError::CardNotInHand)?;
        if !rules::is_legal(&card, state.discard_top.as_ref()) {
            return Err(TurnError::IllegalMove);
        }

        seat.remove_card(index);
        state.discard_top = Some(card);
        state.turn_in_progress = true;

        let remaining = seat.cards_count();
        if remaining == 0 {
            state.game_over = true;
            state.winner = Some(player);
        }
        debug!(%player, %card, remaining, "card played");

        self.renderer.on_card_played(player, card);
        self.renderer.on_hand_changed(player, seat.cards());

        self.cancel_turn_timers();

        if remaining == 0 {
            self.timers.clear();
            self.pending = Pending::default();

            info!(winner = %player, "game over");
            self.renderer.on_game_over(player);

            return Ok(PlayOutcome::Victory(player));
        }

        if !player.is_bot() {
            self.human_hand_resized(remaining);
        }
        self.pending.advance = Some(
            self.timers
                .schedule(self.config.play_settle_delay, Wakeup::AdvanceTurn),
        );

        Ok(PlayOutcome::Played)
    }

    /// Hands the turn to the next seat. Only valid once the current player has committed.
    pub fn advance_turn(&mut self) -> Result<PlayerId> {
        let session = live(self.session.as_mut())?;
        if !session.state.turn_in_progress {
            return Err(TurnError::InvalidState("no turn is in progress"));
        }

        session.state.turn_in_progress = false;
        let next = session.state.current.next();
        session.state.current = next;

        if let Some(handle) = self.pending.advance.take() {
            self.timers.cancel(handle);
        }

        debug!(player = %next, "turn changed");
        self.begin_turn(next);

        Ok(next)
    }

    /// Adds `count` fresh cards to a hand. Never moves the turn and never ends the game.
    pub fn forced_draw(&mut self, player: PlayerId, count: usize) -> Result<Vec<Card>> {
        let session = live(self.session.as_mut())?;

        let cards = self.deck.draw_cards(count);
        let seat = &mut session.players[player.index()];
        for card in &cards {
            seat.add_card(*card);
        }

        let size = seat.cards_count();
        debug!(%player, count, size, "forced draw");

        self.renderer.on_penalty(player, count);
        self.renderer.on_hand_changed(player, seat.cards());

        if !player.is_bot() {
            self.human_hand_resized(size);
        }

        Ok(cards)
    }

    /// Returns whether the declaration counts, i.e. the human holds exactly one card.
    pub fn declare_uno(&mut self, player: PlayerId) -> Result<bool> {
        let session = live(self.session.as_mut())?;
        if player.is_bot() {
            return Err(TurnError::InvalidState("only the human declares UNO"));
        }

        session.state.uno_declared = true;
        let meaningful = session.players[player.index()].cards_count() == 1;
        debug!(meaningful, "UNO declared");

        Ok(meaningful)
    }

    /// Lets the current bot act: play a random legal card, or draw one and pass.
    pub fn play_bot_turn(&mut self) -> Result<BotMove> {
        let session = live(self.session.as_ref())?;
        let bot = session.state.current;
        if !bot.is_bot() {
            return Err(TurnError::InvalidState("it is the human's turn"));
        }
        if session.state.turn_in_progress {
            return Err(TurnError::ActionLocked);
        }

        let choice = self.bot.choose_card(
            session.players[bot.index()].cards(),
            session.state.discard_top.as_ref(),
        );

        if let Some(handle) = self.pending.bot.take() {
            self.timers.cancel(handle);
        }

        match choice {
            Some(card) => {
                self.attempt_play(bot, card)?;
                Ok(BotMove::Played(card))
            }
            None => {
                let drawn = self
                    .forced_draw(bot, BOT_PASS_DRAW)?
                    .into_iter()
                    .next()
                    .ok_or(TurnError::InvalidState("nothing was drawn"))?;
                debug!(%bot, card = %drawn, "bot passes");
                self.lock_and_pass(self.config.bot_pass_delay)?;
                Ok(BotMove::Drew(drawn))
            }
        }
    }

    pub fn human_requests_play(&mut self, card: Card) -> Result<PlayOutcome> {
        self.attempt_play(PlayerId::Human, card)
    }

    pub fn human_declares_uno(&mut self) -> Result<bool> {
        self.declare_uno(PlayerId::Human)
    }

    pub fn dispatch(&mut self, intent: Intent) -> Result<IntentOutcome> {
        match intent {
            Intent::Play(card) => self.human_requests_play(card).map(IntentOutcome::Play),
            Intent::DeclareUno => self
                .human_declares_uno()
                .map(|meaningful| IntentOutcome::UnoDeclared { meaningful }),
            Intent::StartSession => self
                .start_session()
                .map(|_| IntentOutcome::SessionStarted),
            Intent::RestartSession => {
                self.restart_session();
                Ok(IntentOutcome::SessionStarted)
            }
        }
    }

    /// Moves virtual time forward by `by`, firing every timer that falls due.
    pub fn advance_clock(&mut self, by: Duration) -> usize {
        let at = self.timers.now() + by;
        self.advance_clock_to(at)
    }

    pub fn advance_clock_to(&mut self, at: Duration) -> usize {
        let mut fired = 0;
        while let Some((handle, wakeup)) = self.timers.pop_due(at) {
            fired += 1;
            self.fire(handle, wakeup);
        }
        self.timers.advance_to(at);
        fired
    }

    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn uno_window_open(&self) -> bool {
        self.pending
            .penalty
            .map_or(false, |handle| self.timers.is_pending(handle))
    }

    pub fn state(&self) -> Option<&GameState> {
        self.session.as_ref().map(|session| &session.state)
    }

    pub fn hand(&self, player: PlayerId) -> Option<&[Card]> {
        self.session
            .as_ref()
            .map(|session| session.players[player.index()].cards())
    }

    pub fn current_player(&self) -> Option<PlayerId> {
        self.state().map(|state| state.current)
    }

    pub fn discard_top(&self) -> Option<Card> {
        self.state().and_then(|state| state.discard_top)
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.state().and_then(|state| state.winner)
    }

    pub fn is_game_over(&self) -> bool {
        self.state().map_or(false, |state| state.game_over)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    fn ensure_no_game_in_play(&self) -> Result<()> {
        match &self.session {
            Some(session) if !session.state.game_over => {
                Err(TurnError::InvalidState("a game is already being played"))
            }
            _ => Ok(()),
        }
    }

    fn deal(&mut self) -> Deal {
        Deal::from_source(
            self.deck.as_mut(),
            self.config.hand_size,
            self.config.opening_card,
        )
    }

    fn begin(&mut self, deal: Deal) {
        self.timers.clear();
        self.pending = Pending::default();

        let Deal {
            hands,
            opening_card,
        } = deal;

        let players = PlayerId::iter()
            .zip(hands)
            .map(|(id, cards)| Player::new(id, cards))
            .collect::<Vec<_>>();

        info!(opening_card = ?opening_card, "session started");
        for player in &players {
            self.renderer.on_hand_changed(player.id, player.cards());
        }

        self.session = Some(Session {
            state: GameState {
                current: PlayerId::Human,
                discard_top: opening_card,
                turn_in_progress: false,
                game_over: false,
                winner: None,
                uno_declared: false,
            },
            players,
        });

        self.begin_turn(PlayerId::Human);
    }

    fn begin_turn(&mut self, player: PlayerId) {
        self.renderer.on_turn_changed(player);

        if player.is_bot() {
            self.pending.bot = Some(
                self.timers
                    .schedule(self.config.bot_think_delay, Wakeup::BotTurn),
            );
        } else if self.config.auto_draw && !self.can_move(player) {
            debug!("nothing to play, drawing for the human");
            self.pending.stuck = Some(
                self.timers
                    .schedule(self.config.stuck_draw_delay, Wakeup::StuckDraw),
            );
        }
    }

    fn can_move(&self, player: PlayerId) -> bool {
        self.session.as_ref().map_or(false, |session| {
            session.players[player.index()].has_legal_move(session.state.discard_top.as_ref())
        })
    }

    fn lock_and_pass(&mut self, delay: Duration) -> Result<()> {
        live(self.session.as_mut())?.state.turn_in_progress = true;
        self.pending.advance = Some(self.timers.schedule(delay, Wakeup::AdvanceTurn));
        Ok(())
    }

    fn cancel_turn_timers(&mut self) {
        for handle in [self.pending.bot.take(), self.pending.stuck.take()]
            .into_iter()
            .flatten()
        {
            self.timers.cancel(handle);
        }
    }

    /// Every change to the human's hand size clears a UNO declaration and
    /// closes the grace window. Reaching one card opens a new window.
    fn human_hand_resized(&mut self, size: usize) {
        if let Some(session) = self.session.as_mut() {
            session.state.uno_declared = false;
        }
        if let Some(handle) = self.pending.penalty.take() {
            self.timers.cancel(handle);
        }
        if size == 1 {
            debug!("grace window opened");
            self.pending.penalty = Some(
                self.timers
                    .schedule(self.config.uno_grace_period, Wakeup::UnoPenalty),
            );
        }
    }

    fn fire(&mut self, handle: TimerHandle, wakeup: Wakeup) {
        debug!(?wakeup, now = ?self.timers.now(), "timer fired");

        let slot = match wakeup {
            Wakeup::AdvanceTurn => &mut self.pending.advance,
            Wakeup::BotTurn => &mut self.pending.bot,
            Wakeup::UnoPenalty => &mut self.pending.penalty,
            Wakeup::StuckDraw => &mut self.pending.stuck,
        };
        if *slot == Some(handle) {
            *slot = None;
        }

        let result = match wakeup {
            Wakeup::AdvanceTurn => self.advance_turn().map(drop),
            Wakeup::BotTurn => self.play_bot_turn().map(drop),
            Wakeup::UnoPenalty => self.expire_uno_window(),
            Wakeup::StuckDraw => self.stuck_draw(),
        };

        if let Err(error) = result {
            warn!(?wakeup, %error, "timer action rejected");
        }
    }

    fn expire_uno_window(&mut self) -> Result<()> {
        let session = live(self.session.as_mut())?;
        if session.state.uno_declared {
            session.state.uno_declared = false;
            return Ok(());
        }

        info!("UNO was not declared in time");
        self.forced_draw(PlayerId::Human, self.config.uno_penalty)?;
        Ok(())
    }

    fn stuck_draw(&mut self) -> Result<()> {
        let session = live(self.session.as_ref())?;
        if session.state.current.is_bot() || session.state.turn_in_progress {
            return Ok(());
        }

        self.forced_draw(PlayerId::Human, STUCK_DRAW)?;

        if !self.can_move(PlayerId::Human) {
            debug!("still nothing to play, passing");
            self.lock_and_pass(self.config.stuck_pass_delay)?;
        }
        Ok(())
    }
}
