//! Session worker that owns the authoritative [`game_core::GameState`].
//!
//! Receives intents from [`SessionHandle`](crate::api::SessionHandle),
//! executes them via [`game_core::GameEngine`], drives the wall-clock timers
//! (enemy attacks, poison, clear award, notification pacing), and publishes
//! [`SessionEvent`]s on the broadcast channel.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use game_core::engine::{
    AnswerAction, AnswerOutcome, EncounterStart, FloorAdvance, ImpactOutcome, SkillFired,
    SkillUseOutcome,
};
use game_core::{
    ContentOracle, EffectId, EnemyId, GameEngine, GameEnv, GameState, Notification, RngOracle,
    SkillId, StatusEffectKind,
};

use crate::api::{Result, SessionEvent};
use crate::session::SessionConfig;
use crate::store::ProgressStore;

use super::timers::{TimerBoard, TimerKind};

/// Cadence of the poison ticker while the status is active.
const POISON_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Intents that can be sent to the session worker.
pub enum Command {
    /// Submit an answer to the current question.
    SubmitAnswer {
        text: String,
        reply: oneshot::Sender<Result<AnswerOutcome>>,
    },
    /// Point answers at the living enemy in roster slot `index`.
    SelectTarget {
        index: usize,
        reply: oneshot::Sender<Result<EnemyId>>,
    },
    /// Use a skill, optionally retargeting first.
    UseSkill {
        skill: SkillId,
        target: Option<usize>,
        reply: oneshot::Sender<Result<SkillUseOutcome>>,
    },
    /// Reveal the rest of the current question's hint.
    RevealHint {
        reply: oneshot::Sender<Result<String>>,
    },
    /// Report a deferred impact as played out.
    CompleteEffect {
        effect: EffectId,
        reply: oneshot::Sender<Result<ImpactOutcome>>,
    },
    /// Dismiss the visible notification.
    AcknowledgeNotification {
        reply: oneshot::Sender<Result<Notification>>,
    },
    /// Leave a cleared floor: re-battle it or advance past it.
    AdvanceStage {
        stay: bool,
        reply: oneshot::Sender<Result<(Option<FloorAdvance>, EncounterStart)>>,
    },
    /// Bring the defeated player back and open a fresh battle.
    Revive {
        reply: oneshot::Sender<Result<EncounterStart>>,
    },
    /// Query the current session state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
}

/// Background task that processes session intents and timers.
///
/// The worker is the only owner of the [`GameState`]; every mutation goes
/// through [`GameEngine`], and timer firings are handled on the same task as
/// commands, so intents and timers can never interleave mid-resolution.
pub struct SessionWorker {
    state: GameState,
    config: SessionConfig,
    content: Arc<dyn ContentOracle>,
    rng: Arc<dyn RngOracle>,
    store: Arc<dyn ProgressStore>,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<SessionEvent>,
    timers: TimerBoard,
}

impl SessionWorker {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        state: GameState,
        config: SessionConfig,
        content: Arc<dyn ContentOracle>,
        rng: Arc<dyn RngOracle>,
        store: Arc<dyn ProgressStore>,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<SessionEvent>,
    ) -> Self {
        Self {
            state,
            config,
            content,
            rng,
            store,
            command_rx,
            event_tx,
            timers: TimerBoard::new(),
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        info!(
            target: "runtime::session",
            seed = self.state.game_seed,
            stage = %self.state.progress.stage_id,
            floor = self.state.progress.floor_index,
            "session worker started"
        );
        self.open_battle();

        loop {
            let deadline = self.timers.next_deadline();
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                _ = sleep_until_next(deadline) => {
                    let now = Instant::now();
                    while let Some(kind) = self.timers.pop_due(now) {
                        self.handle_timer(kind);
                    }
                }
            }
        }

        info!(target: "runtime::session", "session worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::SubmitAnswer { text, reply } => {
                let result = self.submit_answer(&text);
                if reply.send(result).is_err() {
                    debug!("SubmitAnswer reply channel closed (caller dropped)");
                }
            }
            Command::SelectTarget { index, reply } => {
                let result = self.select_target(index);
                if reply.send(result).is_err() {
                    debug!("SelectTarget reply channel closed (caller dropped)");
                }
            }
            Command::UseSkill {
                skill,
                target,
                reply,
            } => {
                let result = self.use_skill(skill, target);
                if reply.send(result).is_err() {
                    debug!("UseSkill reply channel closed (caller dropped)");
                }
            }
            Command::RevealHint { reply } => {
                let result = self.reveal_hint();
                if reply.send(result).is_err() {
                    debug!("RevealHint reply channel closed (caller dropped)");
                }
            }
            Command::CompleteEffect { effect, reply } => {
                let result = self.complete_effect(effect);
                if reply.send(result).is_err() {
                    debug!("CompleteEffect reply channel closed (caller dropped)");
                }
            }
            Command::AcknowledgeNotification { reply } => {
                let result = self.acknowledge_notification();
                if reply.send(result).is_err() {
                    debug!("AcknowledgeNotification reply channel closed (caller dropped)");
                }
            }
            Command::AdvanceStage { stay, reply } => {
                let result = self.advance_stage(stay);
                if reply.send(result).is_err() {
                    debug!("AdvanceStage reply channel closed (caller dropped)");
                }
            }
            Command::Revive { reply } => {
                let result = self.revive();
                if reply.send(result).is_err() {
                    debug!("Revive reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_timer(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::EnemyAttack(enemy) => self.resolve_enemy_attack(enemy),
            TimerKind::PoisonTick => self.resolve_poison_tick(),
            TimerKind::ClearAward => self.collect_clear_award(),
            TimerKind::NotifyAdvance => self.show_next_notification(),
        }
    }

    // ---- intents -------------------------------------------------------

    fn submit_answer(&mut self, text: &str) -> Result<AnswerOutcome> {
        let env = GameEnv::with_all(self.content.as_ref(), self.rng.as_ref());
        let outcome =
            GameEngine::new(&mut self.state, &self.config.game_config).submit_answer(text, &env)?;

        self.emit(SessionEvent::AnswerJudged {
            outcome: outcome.clone(),
        });
        if let AnswerOutcome::Correct {
            action,
            defeated,
            cleared,
            ..
        } = &outcome
        {
            if let AnswerAction::Skill(cast) = action {
                self.emit_impact_requests(cast);
            }
            self.settle_roster(defeated, *cleared);
        }
        Ok(outcome)
    }

    fn select_target(&mut self, index: usize) -> Result<EnemyId> {
        let enemy =
            GameEngine::new(&mut self.state, &self.config.game_config).select_target(index)?;
        self.emit(SessionEvent::TargetSelected { enemy, index });
        Ok(enemy)
    }

    fn use_skill(&mut self, skill: SkillId, target: Option<usize>) -> Result<SkillUseOutcome> {
        if let Some(index) = target {
            let enemy =
                GameEngine::new(&mut self.state, &self.config.game_config).select_target(index)?;
            self.emit(SessionEvent::TargetSelected { enemy, index });
        }

        let env = GameEnv::with_all(self.content.as_ref(), self.rng.as_ref());
        let outcome =
            GameEngine::new(&mut self.state, &self.config.game_config).use_skill(&skill, &env)?;

        self.emit(SessionEvent::SkillUsed {
            skill,
            outcome: outcome.clone(),
        });
        if let SkillUseOutcome::Fired {
            cast,
            defeated,
            cleared,
        } = &outcome
        {
            self.emit_impact_requests(cast);
            self.settle_roster(defeated, *cleared);
        }
        Ok(outcome)
    }

    fn reveal_hint(&mut self) -> Result<String> {
        let mask = GameEngine::new(&mut self.state, &self.config.game_config).reveal_hint()?;
        self.emit(SessionEvent::HintRevealed { mask: mask.clone() });
        Ok(mask)
    }

    fn complete_effect(&mut self, effect: EffectId) -> Result<ImpactOutcome> {
        let outcome =
            GameEngine::new(&mut self.state, &self.config.game_config).complete_impact(effect)?;
        self.emit(SessionEvent::ImpactResolved {
            outcome: outcome.clone(),
        });
        self.settle_roster(outcome.defeated.as_slice(), outcome.cleared);
        Ok(outcome)
    }

    fn acknowledge_notification(&mut self) -> Result<Notification> {
        let acked = GameEngine::new(&mut self.state, &self.config.game_config)
            .acknowledge_notification()?;
        if self.state.notifications.pending() > 0 && !self.timers.is_armed(TimerKind::NotifyAdvance)
        {
            self.timers.arm(
                TimerKind::NotifyAdvance,
                Duration::from_millis(self.config.settle_delay_ms),
            );
        }
        Ok(acked)
    }

    fn advance_stage(&mut self, stay: bool) -> Result<(Option<FloorAdvance>, EncounterStart)> {
        let advance = if stay {
            None
        } else {
            let env = GameEnv::with_all(self.content.as_ref(), self.rng.as_ref());
            let advance =
                GameEngine::new(&mut self.state, &self.config.game_config).advance_floor(&env)?;
            info!(
                target: "runtime::session",
                stage = %self.state.progress.stage_id,
                floor = self.state.progress.floor_index,
                "floor advanced"
            );
            self.emit(SessionEvent::FloorAdvanced {
                advance: advance.clone(),
            });
            self.save_progress();
            Some(advance)
        };

        let start = self.begin_encounter()?;
        Ok((advance, start))
    }

    fn revive(&mut self) -> Result<EncounterStart> {
        GameEngine::new(&mut self.state, &self.config.game_config).revive()?;
        info!(target: "runtime::session", hp = self.state.player.hp, "player revived");
        self.emit(SessionEvent::Revived);
        self.begin_encounter()
    }

    // ---- timer firings -------------------------------------------------

    fn resolve_enemy_attack(&mut self, enemy: EnemyId) {
        let env = GameEnv::with_all(self.content.as_ref(), self.rng.as_ref());
        let outcome = match GameEngine::new(&mut self.state, &self.config.game_config)
            .enemy_attack(enemy, &env)
        {
            Ok(Some(outcome)) => outcome,
            // battle already over, or the attacker fell before its wind-up
            Ok(None) => return,
            Err(error) => {
                warn!(target: "runtime::session", enemy = enemy.0, %error, "enemy attack failed");
                return;
            }
        };

        let poisoned = outcome.result.poison.is_some();
        let player_defeated = outcome.player_defeated;
        self.emit(SessionEvent::EnemyAttacked { outcome });

        if player_defeated {
            self.on_game_over();
            return;
        }
        if poisoned && !self.timers.is_armed(TimerKind::PoisonTick) {
            self.timers.arm(TimerKind::PoisonTick, POISON_TICK_PERIOD);
        }
        self.arm_attack(enemy);
    }

    fn resolve_poison_tick(&mut self) {
        let Some(outcome) =
            GameEngine::new(&mut self.state, &self.config.game_config).poison_tick()
        else {
            // cleansed or the battle ended; the ticker stops here
            return;
        };

        let expired = outcome.expired;
        let player_defeated = outcome.player_defeated;
        self.emit(SessionEvent::PoisonTicked { outcome });

        if player_defeated {
            self.on_game_over();
        } else if !expired {
            self.timers.arm(TimerKind::PoisonTick, POISON_TICK_PERIOD);
        }
    }

    fn collect_clear_award(&mut self) {
        let env = GameEnv::with_all(self.content.as_ref(), self.rng.as_ref());
        let award = match GameEngine::new(&mut self.state, &self.config.game_config)
            .award_clear_exp(&env)
        {
            Ok(award) => award,
            Err(error) => {
                warn!(target: "runtime::session", %error, "clear award failed");
                return;
            }
        };

        info!(
            target: "runtime::session",
            exp = award.exp,
            level_ups = award.level_ups.len(),
            "clear award collected"
        );
        self.emit(SessionEvent::ExpAwarded { award });
        if let Some(notification) = self.state.notifications.current().cloned() {
            self.emit(SessionEvent::NotificationShown { notification });
        }
    }

    fn show_next_notification(&mut self) {
        let shown = GameEngine::new(&mut self.state, &self.config.game_config)
            .advance_notifications()
            .cloned();
        if let Some(notification) = shown {
            self.emit(SessionEvent::NotificationShown { notification });
        }
    }

    // ---- plumbing ------------------------------------------------------

    /// Spawns a roster on the current floor, arms its timers, and announces
    /// the new battle.
    fn begin_encounter(&mut self) -> Result<EncounterStart> {
        let env = GameEnv::with_all(self.content.as_ref(), self.rng.as_ref());
        let start =
            GameEngine::new(&mut self.state, &self.config.game_config).begin_encounter(&env)?;

        self.timers.bump_generation();
        self.timers.cancel_battle();
        for enemy in &start.roster {
            self.arm_attack(*enemy);
        }
        if self
            .state
            .player
            .status_effects
            .has(StatusEffectKind::Poison)
        {
            self.timers.arm(TimerKind::PoisonTick, POISON_TICK_PERIOD);
        }
        debug!(
            target: "runtime::timers",
            roster = start.roster.len(),
            "attack timers armed"
        );

        self.emit(SessionEvent::BattleStarted {
            roster: start.roster.clone(),
            question: start.question.clone(),
        });
        Ok(start)
    }

    /// Startup path: a failure is logged, not fatal, so the handle can still
    /// query state and retry via advance/stay.
    fn open_battle(&mut self) {
        if let Err(error) = self.begin_encounter() {
            warn!(target: "runtime::session", %error, "could not open the first battle");
        }
    }

    /// Emits per-defeat events and retires whatever the defeats imply:
    /// the fallen enemy's timer, or on a full wipe the whole battle plus the
    /// delayed clear award.
    fn settle_roster(&mut self, defeated: &[EnemyId], cleared: bool) {
        for enemy in defeated {
            self.timers.cancel(TimerKind::EnemyAttack(*enemy));
            self.emit(SessionEvent::EnemyDefeated { enemy: *enemy });
        }
        if cleared {
            self.timers.bump_generation();
            self.timers.cancel_battle();
            self.timers.arm(
                TimerKind::ClearAward,
                Duration::from_millis(self.config.clear_delay_ms),
            );
            debug!(
                target: "runtime::timers",
                delay_ms = self.config.clear_delay_ms,
                "clear award armed"
            );
            self.emit(SessionEvent::StageCleared);
        }
    }

    fn on_game_over(&mut self) {
        self.timers.bump_generation();
        self.timers.clear();
        info!(target: "runtime::session", "player defeated, battle timers stopped");
        self.emit(SessionEvent::GameOver);
    }

    /// Announces the deferred impacts a cast queued, in FIFO order.
    fn emit_impact_requests(&self, cast: &SkillFired) {
        for effect in &cast.impacts {
            if let Some(impact) = self
                .state
                .battle
                .pending_impacts()
                .find(|i| i.effect == *effect)
            {
                self.emit(SessionEvent::ImpactRequested {
                    effect: impact.effect,
                    skill: impact.skill.clone(),
                    target: impact.target,
                    damage: impact.damage,
                });
            }
        }
    }

    fn arm_attack(&mut self, enemy: EnemyId) {
        let delay = self.attack_delay();
        self.timers.arm(TimerKind::EnemyAttack(enemy), delay);
    }

    /// Uniform draw from `[attack_min_ms, attack_max_ms)`; a degenerate
    /// range collapses to the minimum.
    ///
    /// Attack pacing is presentation jitter, not rules randomness, so it
    /// deliberately does not go through the session's [`RngOracle`].
    fn attack_delay(&self) -> Duration {
        let min = self.config.attack_min_ms;
        let max = self.config.attack_max_ms;
        let ms = if max > min {
            rand::thread_rng().gen_range(min..max)
        } else {
            min
        };
        Duration::from_millis(ms)
    }

    /// Best-effort; a failed save is logged and play continues.
    fn save_progress(&self) {
        let stored = self.state.progress.stored();
        if let Err(error) = self.store.save(&stored) {
            warn!(target: "runtime::session", %error, "failed to save progress");
        }
    }

    fn emit(&self, event: SessionEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::trace!(target: "runtime::session", "no event subscribers");
        }
    }
}

/// Sleeps until the board's earliest deadline, or forever when none is
/// armed; the select loop re-evaluates after every command.
async fn sleep_until_next(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
