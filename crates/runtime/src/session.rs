//! High-level session orchestrator.
//!
//! The session owns the background worker, wires up command/event channels,
//! and exposes a builder-based API for clients to host a playthrough.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::warn;

use game_content::Catalog;
use game_core::{
    ContentOracle, GameConfig, GameState, PcgRng, RngOracle, StageProgress,
};

use crate::api::{Result, SessionError, SessionEvent, SessionHandle};
use crate::store::{MemoryProgressStore, ProgressStore};
use crate::workers::{Command, SessionWorker};

/// Session configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub game_config: GameConfig,
    /// Lower bound of an enemy's attack wind-up, in milliseconds.
    pub attack_min_ms: u64,
    /// Exclusive upper bound of an enemy's attack wind-up.
    pub attack_max_ms: u64,
    /// Pause between the last defeat and the clear award, so the clear can
    /// land on screen before EXP and level-ups roll in.
    pub clear_delay_ms: u64,
    /// Pause between a notification acknowledgment and showing the next one.
    pub settle_delay_ms: u64,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            attack_min_ms: 3000,
            attack_max_ms: 5000,
            clear_delay_ms: 1500,
            settle_delay_ms: 400,
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// A hosted playthrough.
///
/// Design: the session owns the worker and its join handle;
/// [`SessionHandle`] provides a cloneable façade for clients.
pub struct Session {
    handle: SessionHandle,
    worker_handle: JoinHandle<()>,
}

impl Session {
    /// Creates a new session builder.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Gets a cloneable handle to this session.
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Subscribes to session events.
    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.handle.subscribe_events()
    }

    /// Shuts the session down gracefully.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle
            .await
            .map_err(SessionError::WorkerJoin)?;

        Ok(())
    }
}

enum ContentSource {
    Oracle(Arc<dyn ContentOracle>),
    Catalog(Box<Catalog>),
}

/// Builder for [`Session`] with flexible configuration.
pub struct SessionBuilder {
    config: SessionConfig,
    content: Option<ContentSource>,
    rng: Arc<dyn RngOracle>,
    store: Arc<dyn ProgressStore>,
    game_seed: Option<u64>,
    state: Option<GameState>,
}

impl SessionBuilder {
    fn new() -> Self {
        Self {
            config: SessionConfig::default(),
            content: None,
            rng: Arc::new(PcgRng),
            store: Arc::new(MemoryProgressStore::new()),
            game_seed: None,
            state: None,
        }
    }

    /// Overrides the session configuration.
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the required content oracle.
    pub fn content(mut self, content: impl ContentOracle + 'static) -> Self {
        self.content = Some(ContentSource::Oracle(Arc::new(content)));
        self
    }

    /// Sets a [`Catalog`] as the content oracle.
    ///
    /// Unlike [`Self::content`], the catalog is validated against the game
    /// config when the session is built, and every warning (encounter-rate
    /// drift, dangling references) is logged. Authoring mistakes never fail
    /// the build.
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.content = Some(ContentSource::Catalog(Box::new(catalog)));
        self
    }

    /// Replaces the deterministic RNG oracle (tests inject stubs here).
    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Arc::new(rng);
        self
    }

    /// Sets the progress store; defaults to an in-memory store.
    pub fn progress_store(mut self, store: impl ProgressStore + 'static) -> Self {
        self.store = Arc::new(store);
        self
    }

    /// Fixes the game seed; defaults to a random one per session.
    pub fn game_seed(mut self, seed: u64) -> Self {
        self.game_seed = Some(seed);
        self
    }

    /// Provides a full initial state, bypassing the store snapshot and the
    /// seed choice.
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Builds the session and spawns its worker.
    pub async fn build(self) -> Result<Session> {
        let content: Arc<dyn ContentOracle> =
            match self.content.ok_or(SessionError::MissingContent)? {
                ContentSource::Oracle(oracle) => oracle,
                ContentSource::Catalog(catalog) => {
                    for warning in catalog.validate(&self.config.game_config) {
                        warn!(target: "runtime::content", %warning, "content validation");
                    }
                    Arc::new(*catalog)
                }
            };

        let initial_state = if let Some(state) = self.state {
            state
        } else {
            let progress = stored_or_first(content.as_ref(), self.store.as_ref())?;
            let seed = self.game_seed.unwrap_or_else(rand::random);
            GameState::new(seed, progress)
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (event_tx, _event_rx) =
            broadcast::channel::<SessionEvent>(self.config.event_buffer_size);

        let handle = SessionHandle::new(command_tx, event_tx.clone());

        let worker = SessionWorker::new(
            initial_state,
            self.config,
            content,
            self.rng,
            self.store,
            command_rx,
            event_tx,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Session {
            handle,
            worker_handle,
        })
    }
}

/// Resolves the starting position: the stored snapshot when it still points
/// at real content, otherwise floor 0 of the first stage. Store failures are
/// logged, never fatal.
fn stored_or_first(
    content: &dyn ContentOracle,
    store: &dyn ProgressStore,
) -> Result<StageProgress> {
    let first = || -> Result<StageProgress> {
        let stage = content.first_stage().ok_or(SessionError::NoStages)?;
        Ok(StageProgress::new(stage.id.clone(), 0))
    };

    match store.load() {
        Ok(Some(stored)) => match content.stage(&stored.stage_id) {
            Some(stage) if stage.has_floor(stored.floor_index) => {
                Ok(StageProgress::new(stored.stage_id, stored.floor_index))
            }
            _ => {
                warn!(
                    target: "runtime::session",
                    stage = %stored.stage_id,
                    floor = stored.floor_index,
                    "stored progress points at unknown content, starting from the first stage"
                );
                first()
            }
        },
        Ok(None) => first(),
        Err(error) => {
            warn!(
                target: "runtime::session",
                %error,
                "failed to load stored progress, starting from the first stage"
            );
            first()
        }
    }
}
