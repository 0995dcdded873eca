//! Worker task that backs the session orchestration.
//!
//! The session worker executes intents and timer firings on a single task;
//! the timer board keeps its deadlines.

mod session;
mod timers;

pub use session::{Command, SessionWorker};
