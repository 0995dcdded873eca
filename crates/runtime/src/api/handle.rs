//! Cloneable façade for issuing intents to the session worker.
//!
//! [`SessionHandle`] hides channel plumbing and offers one async helper per
//! player intent. Replies carry the engine's typed outcome or the typed
//! rejection; rejected intents leave session state untouched.
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::engine::{
    AnswerOutcome, EncounterStart, FloorAdvance, ImpactOutcome, SkillUseOutcome,
};
use game_core::{EffectId, EnemyId, GameState, Notification, SkillId};

use super::errors::{Result, SessionError};
use super::events::SessionEvent;
use crate::workers::Command;

/// Client-facing handle to interact with a running session.
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl SessionHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<SessionEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    /// Submits an answer to the current question.
    pub async fn submit_answer(&self, text: impl Into<String>) -> Result<AnswerOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::SubmitAnswer {
                text: text.into(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| SessionError::CommandChannelClosed)?;

        reply_rx.await.map_err(SessionError::ReplyChannelClosed)?
    }

    /// Points answers at the living enemy in roster slot `index`.
    pub async fn select_target(&self, index: usize) -> Result<EnemyId> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::SelectTarget {
                index,
                reply: reply_tx,
            })
            .await
            .map_err(|_| SessionError::CommandChannelClosed)?;

        reply_rx.await.map_err(SessionError::ReplyChannelClosed)?
    }

    /// Uses a skill, optionally retargeting first.
    ///
    /// With `target` set, the named roster slot becomes the current target
    /// before the skill is gated, exactly as if [`Self::select_target`] had
    /// been called. Command-activated skills fire on the spot;
    /// answer-activated skills arm for the next correct answer.
    pub async fn use_skill(
        &self,
        skill: SkillId,
        target: Option<usize>,
    ) -> Result<SkillUseOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::UseSkill {
                skill,
                target,
                reply: reply_tx,
            })
            .await
            .map_err(|_| SessionError::CommandChannelClosed)?;

        reply_rx.await.map_err(SessionError::ReplyChannelClosed)?
    }

    /// Reveals the rest of the current question's hint.
    pub async fn reveal_hint(&self) -> Result<String> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::RevealHint { reply: reply_tx })
            .await
            .map_err(|_| SessionError::CommandChannelClosed)?;

        reply_rx.await.map_err(SessionError::ReplyChannelClosed)?
    }

    /// Reports that the render layer finished playing out a deferred impact.
    pub async fn complete_effect(&self, effect: EffectId) -> Result<ImpactOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::CompleteEffect {
                effect,
                reply: reply_tx,
            })
            .await
            .map_err(|_| SessionError::CommandChannelClosed)?;

        reply_rx.await.map_err(SessionError::ReplyChannelClosed)?
    }

    /// Dismisses the visible notification.
    ///
    /// The next queued notification is shown after the settle delay and
    /// announced via [`SessionEvent::NotificationShown`].
    pub async fn acknowledge_notification(&self) -> Result<Notification> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::AcknowledgeNotification { reply: reply_tx })
            .await
            .map_err(|_| SessionError::CommandChannelClosed)?;

        reply_rx.await.map_err(SessionError::ReplyChannelClosed)?
    }

    /// Leaves a cleared floor and opens the next battle.
    ///
    /// With `stay` the player re-battles the current floor; otherwise the
    /// session advances (gated by the floor's clear quota) and the returned
    /// [`FloorAdvance`] reports where it went. Both paths spawn a fresh
    /// roster, returned as the [`EncounterStart`].
    pub async fn advance_stage(
        &self,
        stay: bool,
    ) -> Result<(Option<FloorAdvance>, EncounterStart)> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::AdvanceStage {
                stay,
                reply: reply_tx,
            })
            .await
            .map_err(|_| SessionError::CommandChannelClosed)?;

        reply_rx.await.map_err(SessionError::ReplyChannelClosed)?
    }

    /// Revives the defeated player and opens a fresh battle on the current
    /// floor.
    pub async fn revive(&self) -> Result<EncounterStart> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Revive { reply: reply_tx })
            .await
            .map_err(|_| SessionError::CommandChannelClosed)?;

        reply_rx.await.map_err(SessionError::ReplyChannelClosed)?
    }

    /// Queries the current session state (read-only snapshot).
    pub async fn query_state(&self) -> Result<GameState> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryState { reply: reply_tx })
            .await
            .map_err(|_| SessionError::CommandChannelClosed)?;

        reply_rx.await.map_err(SessionError::ReplyChannelClosed)
    }

    /// Subscribes to session events.
    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }
}
