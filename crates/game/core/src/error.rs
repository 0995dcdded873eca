//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (e.g., [`crate::skill::SkillError`],
//! [`crate::progression::ProgressionError`]) live in their own modules next to
//! the operations they validate. This module provides the shared severity
//! classification the runtime uses to decide how to log and recover.
//!
//! Every reachable failure in the rules layer degrades to a typed error plus
//! an untouched state; nothing in this crate panics on bad input.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative input.
    ///
    /// Examples: skill on cooldown, not enough MP
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: negative EXP amount, unknown skill id, malformed notification
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: computed level below the pre-award level, impact queue desync
    /// These indicate bugs and should be investigated.
    Internal,

    /// Fatal error - game state corrupted, cannot continue.
    ///
    /// Examples: missing required oracle
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// Provides a uniform interface for error classification across the crate.
/// Error enums derive `thiserror::Error` for Display and implement this trait
/// so the runtime can log severity and a stable code without matching on
/// every variant.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization, metrics, and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
