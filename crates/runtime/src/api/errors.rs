//! Unified error types surfaced by the session API.
//!
//! Wraps failures from worker coordination, the progress store, and the rules
//! engine so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::EngineError;

pub use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session requires content to be configured before building")]
    MissingContent,

    #[error("content defines no stages")]
    NoStages,

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    /// Rules-level rejection; the intent left state untouched.
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
