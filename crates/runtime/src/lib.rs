//! Async session orchestration for the vocabulary battler.
//!
//! This crate wraps the deterministic rules in `game-core` with the wall-clock
//! concerns a live session needs: enemy attack timers, the poison ticker, the
//! delayed clear award, notification pacing, and progress persistence.
//! Consumers embed [`Session`] to host a playthrough and interact with it
//! through the cloneable [`SessionHandle`].
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`store`] persists stage position between sessions
//! - `workers` keeps the background session task internal to the crate
pub mod api;
pub mod session;
pub mod store;

mod workers;

pub use api::{Result, SessionError, SessionEvent, SessionHandle};
pub use session::{Session, SessionBuilder, SessionConfig};
pub use store::{JsonFileProgressStore, MemoryProgressStore, ProgressStore, StoreError};
