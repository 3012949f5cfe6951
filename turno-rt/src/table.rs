use color_eyre::eyre::{eyre, Result, WrapErr};
use tokio::{
    sync::{broadcast, mpsc},
    task::JoinHandle,
    time::{sleep_until, Instant},
};
use tracing::{debug, trace, warn};
use turno::{
    config::EngineConfig,
    engine::Engine,
    error::TurnError,
    render::{GameEvent, Renderer},
    turn::Intent,
};

const INTENT_BUFFER: usize = 32;
const EVENT_BUFFER: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableEvent {
    Game(GameEvent),
    Rejected { intent: Intent, error: TurnError },
}

/// Forwards everything the engine wants drawn to the table's subscribers.
#[derive(Clone, Debug)]
pub struct EventSender(broadcast::Sender<TableEvent>);

impl EventSender {
    pub fn new(events: broadcast::Sender<TableEvent>) -> Self {
        Self(events)
    }
}

impl Renderer for EventSender {
    fn on_event(&mut self, event: GameEvent) {
        if self.0.send(TableEvent::Game(event)).is_err() {
            trace!("nobody is watching the table");
        }
    }
}

#[derive(Clone, Debug)]
pub struct TableHandle {
    intents: mpsc::Sender<Intent>,
    events: broadcast::Sender<TableEvent>,
}

impl TableHandle {
    pub async fn send(&self, intent: Intent) -> Result<()> {
        self.intents
            .send(intent)
            .await
            .map_err(|_| eyre!("the table has shut down"))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TableEvent> {
        self.events.subscribe()
    }

    pub fn is_closed(&self) -> bool {
        self.intents.is_closed()
    }
}

/// Runs one engine on its own task. The task ends once every handle is dropped.
pub fn spawn_table(config: EngineConfig) -> (TableHandle, JoinHandle<Result<()>>) {
    let (intent_tx, intent_rx) = mpsc::channel(INTENT_BUFFER);
    let (event_tx, _) = broadcast::channel(EVENT_BUFFER);

    let engine = Engine::new(config, EventSender::new(event_tx.clone()));
    let task = tokio::spawn(run_table(engine, intent_rx, event_tx.clone()));

    (
        TableHandle {
            intents: intent_tx,
            events: event_tx,
        },
        task,
    )
}

/// Feeds intents to the engine and turns its virtual timers into real sleeps.
pub async fn run_table<R: Renderer>(
    mut engine: Engine<R>,
    mut intents: mpsc::Receiver<Intent>,
    events: broadcast::Sender<TableEvent>,
) -> Result<()> {
    // The engine may already have run its clock forward before it got here.
    let started = Instant::now();
    let offset = engine.now();

    loop {
        let deadline = engine
            .next_deadline()
            .map(|at| started + at.saturating_sub(offset));

        tokio::select! {
            intent = intents.recv() => {
                let Some(intent) = intent else {
                    break;
                };
                engine.advance_clock_to(offset + started.elapsed());

                debug!(?intent, "intent received");
                if let Err(error) = engine.dispatch(intent.clone()) {
                    warn!(?intent, %error, "intent rejected");
                    if events.send(TableEvent::Rejected { intent, error }).is_err() {
                        trace!("nobody is watching the table");
                    }
                }
            }
            _ = sleep_until_deadline(deadline) => {
                let fired = engine.advance_clock_to(offset + started.elapsed());
                trace!(fired, "timers fired");
            }
        }
    }

    debug!("table closed");
    Ok(())
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Waits for the table task and surfaces a panic inside it as an error.
pub async fn join_table(task: JoinHandle<Result<()>>) -> Result<()> {
    task.await.wrap_err("table task panicked")?
}
