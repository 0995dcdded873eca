//! Blocking notification sequencing.
//!
//! Level-up screens and skill-acquired popups are serialized so exactly one
//! is visible at a time, no matter how many a single battle produced. The
//! queue is a plain `idle -> showing -> idle` machine driven by discrete
//! acknowledge events; the runtime inserts the settle delay between an
//! acknowledgment and the next [`NotificationQueue::advance`] call.

use std::collections::VecDeque;

use crate::config::GameConfig;
use crate::env::ContentOracle;
use crate::error::{ErrorSeverity, GameError};
use crate::skill::SkillId;

/// One blocking notification.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Notification {
    /// The player reached `level`. Acknowledging grants `unlocked`, if any.
    LevelUp {
        level: u32,
        unlocked: Option<SkillId>,
    },
    /// A skill joined the player's book.
    SkillAcquired { skill: SkillId, name: String },
}

/// Visibility state of the sequencer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NotificationState {
    #[default]
    Idle,
    Showing,
}

/// Errors from the notification sequencer.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NotificationError {
    /// Level outside `1..=level_cap`.
    #[error("notification carries invalid level {0}")]
    InvalidLevel(u32),

    /// Skill id does not resolve to a template.
    #[error("notification references unknown skill '{0}'")]
    UnknownSkill(SkillId),

    /// Acknowledge arrived while nothing was showing.
    #[error("no notification is currently showing")]
    NotShowing,
}

impl GameError for NotificationError {
    fn severity(&self) -> ErrorSeverity {
        use NotificationError::*;
        match self {
            InvalidLevel(_) | UnknownSkill(_) => ErrorSeverity::Validation,
            NotShowing => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use NotificationError::*;
        match self {
            InvalidLevel(_) => "NOTIFY_INVALID_LEVEL",
            UnknownSkill(_) => "NOTIFY_UNKNOWN_SKILL",
            NotShowing => "NOTIFY_NOT_SHOWING",
        }
    }
}

/// FIFO of blocking notifications with a single visible slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NotificationQueue {
    current: Option<Notification>,
    queue: VecDeque<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> NotificationState {
        if self.current.is_some() {
            NotificationState::Showing
        } else {
            NotificationState::Idle
        }
    }

    /// The notification currently on screen, if any.
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Notifications waiting behind the current one.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Validates and appends a notification.
    ///
    /// Returns `true` when the sequencer was idle and the notification became
    /// visible immediately. Malformed notifications are rejected without
    /// touching the queue.
    pub fn enqueue(
        &mut self,
        notification: Notification,
        config: &GameConfig,
        content: &(impl ContentOracle + ?Sized),
    ) -> Result<bool, NotificationError> {
        self.validate(&notification, config, content)?;
        if self.current.is_none() {
            self.current = Some(notification);
            Ok(true)
        } else {
            self.queue.push_back(notification);
            Ok(false)
        }
    }

    /// Acknowledges the visible notification, returning it.
    ///
    /// The sequencer goes idle; the next entry is shown by a later
    /// [`Self::advance`] once the settle delay has passed.
    pub fn acknowledge(&mut self) -> Result<Notification, NotificationError> {
        self.current.take().ok_or(NotificationError::NotShowing)
    }

    /// Shows the next queued notification if the sequencer is idle.
    ///
    /// Returns the newly shown entry, or `None` when already showing or
    /// nothing is queued.
    pub fn advance(&mut self) -> Option<&Notification> {
        if self.current.is_some() {
            return None;
        }
        self.current = self.queue.pop_front();
        self.current.as_ref()
    }

    /// Drops everything and returns to idle. Error recovery only.
    pub fn clear(&mut self) {
        self.current = None;
        self.queue.clear();
    }

    fn validate(
        &self,
        notification: &Notification,
        config: &GameConfig,
        content: &(impl ContentOracle + ?Sized),
    ) -> Result<(), NotificationError> {
        match notification {
            Notification::LevelUp { level, unlocked } => {
                if *level == 0 || *level > config.level_cap {
                    return Err(NotificationError::InvalidLevel(*level));
                }
                if let Some(skill) = unlocked
                    && content.skill_template(skill).is_none()
                {
                    return Err(NotificationError::UnknownSkill(skill.clone()));
                }
                Ok(())
            }
            Notification::SkillAcquired { skill, .. } => {
                if content.skill_template(skill).is_none() {
                    return Err(NotificationError::UnknownSkill(skill.clone()));
                }
                Ok(())
            }
        }
    }
}
