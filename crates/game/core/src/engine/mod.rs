//! Intent execution over [`GameState`].
//!
//! [`GameEngine`] is the single write path into a session. The runtime wraps
//! state plus config, calls one method per intent, and every accepted intent
//! bumps the nonce exactly once, so a session's draw seeds replay identically
//! from the same game seed and intent sequence. Rejected intents leave state
//! untouched.

mod error;
mod outcome;

pub use error::EngineError;
pub use outcome::{
    AnswerAction, AnswerOutcome, ClearAward, EncounterStart, EnemyAttackOutcome, FloorAdvance,
    ImpactOutcome, PoisonTickOutcome, SkillFired, SkillUseOutcome,
};

use crate::combat::{
    AnswerContext, ComboTier, PLAYER_ENTITY, resolve_enemy_attack, resolve_player_attack,
};
use crate::config::GameConfig;
use crate::env::{ContentOracle, GameEnv, OracleError, RngOracle, compute_seed};
use crate::notify::Notification;
use crate::progression::award_exp;
use crate::question::Question;
use crate::skill::{
    SkillActivation, SkillError, SkillId, SkillKind, SkillResult, SkillTargeting, SkillTemplate,
    execute,
};
use crate::stage::select_monster_set;
use crate::state::{
    EffectId, Enemy, EncounterState, EnemyId, GamePhase, GameState, QuestionMode,
};

/// Draw context for picking a floor's monster set.
const CTX_ENCOUNTER_SET: u32 = 20;
/// Draw context for picking the next question (entity = target enemy).
const CTX_QUESTION: u32 = 21;
/// Draw context for random-enemy skill targeting.
const CTX_RANDOM_TARGET: u32 = 22;

/// Executes intents against a mutable [`GameState`].
pub struct GameEngine<'a> {
    state: &'a mut GameState,
    config: &'a GameConfig,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState, config: &'a GameConfig) -> Self {
        Self { state, config }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Spawns a roster for the current floor and opens the battle.
    ///
    /// Allowed from `Exploring` or from `StageCleared` once the clear reward
    /// has been collected; re-battling the same floor draws a fresh roster.
    pub fn begin_encounter(&mut self, env: &GameEnv<'_>) -> Result<EncounterStart, EngineError> {
        match self.state.phase {
            GamePhase::Exploring | GamePhase::StageCleared => {}
            actual => {
                return Err(EngineError::WrongPhase {
                    expected: GamePhase::Exploring,
                    actual,
                });
            }
        }
        if self.state.encounter.all_defeated() {
            return Err(EngineError::AwardPending);
        }
        let content = env.content()?;
        let rng = env.rng()?;

        let stage = content
            .stage(&self.state.progress.stage_id)
            .ok_or_else(|| OracleError::StageNotFound(self.state.progress.stage_id.clone()))?;
        let floor_index = self.state.progress.floor_index;
        let floor = stage.floor(floor_index).ok_or(EngineError::MissingFloor {
            stage: stage.id.clone(),
            floor_index,
        })?;

        let draw = rng.unit(compute_seed(
            self.state.game_seed,
            self.state.nonce,
            PLAYER_ENTITY,
            CTX_ENCOUNTER_SET,
        ));
        let set = select_monster_set(floor, draw).filter(|s| !s.enemies.is_empty()).ok_or(
            EngineError::EmptyFloor {
                stage: stage.id.clone(),
                floor_index,
            },
        )?;

        let mut roster = Vec::with_capacity(set.enemies.len());
        for template_id in &set.enemies {
            let template = content
                .enemy_template(template_id)
                .ok_or_else(|| OracleError::EnemyTemplateNotFound(template_id.clone()))?;
            roster.push(Enemy::from_template(self.state.allocate_enemy_id(), template));
        }
        let question = self.next_question(&roster[0], content, rng);
        let roster_ids = roster.iter().map(|e| e.id).collect();

        self.state.encounter.install(roster);
        self.state.battle.reset_for_encounter();
        self.state.battle.set_question(question.clone());
        self.state.phase = GamePhase::InBattle;
        self.state.nonce += 1;

        Ok(EncounterStart {
            roster: roster_ids,
            question,
        })
    }

    /// Resolves one answer submission against the live question.
    ///
    /// Skill cooldowns advance once per submission before the answer is
    /// judged. A wrong answer breaks the combo, uncovers one more hint
    /// character, and discards any armed skill (its MP stays spent). A
    /// correct answer extends the combo and resolves either the armed skill
    /// or a normal attack on the current target, then draws the next
    /// question if the battle continues.
    pub fn submit_answer(
        &mut self,
        input: &str,
        env: &GameEnv<'_>,
    ) -> Result<AnswerOutcome, EngineError> {
        self.require_phase(GamePhase::InBattle)?;
        let question = self
            .state
            .battle
            .question
            .clone()
            .ok_or(EngineError::NoActiveQuestion)?;
        let content = env.content()?;
        let rng = env.rng()?;

        self.state.skills.tick_cooldowns();

        if !question.matches(input) {
            self.state.battle.combo = 0;
            self.state.battle.wrong_attempts += 1;
            self.state.battle.armed_skill = None;
            let revealed = if self.state.battle.hint_revealed {
                question.hidden_count()
            } else {
                self.state.battle.wrong_attempts
            };
            let outcome = AnswerOutcome::Wrong {
                wrong_attempts: self.state.battle.wrong_attempts,
                hint_mask: question.hint_mask(revealed),
                exhausted: question.is_exhausted_by(revealed),
            };
            self.state.nonce += 1;
            return Ok(outcome);
        }

        self.state.battle.combo += 1;
        let combo = self.state.battle.combo;
        let tier = ComboTier::from_count(combo, self.config);
        let mut defeated = Vec::new();

        let action = if let Some(skill_id) = self.state.battle.armed_skill.take() {
            let template = content
                .skill_template(&skill_id)
                .ok_or_else(|| SkillError::Unknown(skill_id.clone()))?;
            let targets = self.resolve_targets(template, rng);
            let cast = self.fire_skill(template, targets, &mut defeated, rng)?;
            AnswerAction::Skill(cast)
        } else {
            let target = self
                .state
                .current_target()
                .cloned()
                .ok_or(EngineError::InvalidTarget(self.state.battle.target_index))?;
            let ctx = AnswerContext {
                question: &question,
                combo,
                wrong_attempts: self.state.battle.wrong_attempts,
                hint_revealed: self.state.battle.hint_revealed,
            };
            let result = resolve_player_attack(
                &self.state.player,
                &target,
                &ctx,
                self.config,
                rng,
                self.state.game_seed,
                self.state.nonce,
            );
            if result.damage > 0
                && let Some(enemy) = self
                    .state
                    .encounter
                    .apply(target.id, |e| e.take_damage(result.damage))
                && enemy.defeated
            {
                defeated.push(target.id);
            }
            AnswerAction::Attack {
                target: target.id,
                result,
            }
        };

        let cleared = self.settle_defeats();
        let next_question = if self.state.phase == GamePhase::InBattle {
            self.state
                .current_target()
                .map(|target| self.next_question(target, content, rng))
        } else {
            None
        };
        match &next_question {
            Some(question) => self.state.battle.set_question(question.clone()),
            None => self.state.battle.question = None,
        }
        self.state.nonce += 1;

        Ok(AnswerOutcome::Correct {
            combo,
            tier,
            action,
            defeated,
            cleared,
            next_question,
        })
    }

    /// Reveals the whole answer, trading crit chance and half the damage.
    ///
    /// Returns the fully uncovered answer text.
    pub fn reveal_hint(&mut self) -> Result<String, EngineError> {
        self.require_phase(GamePhase::InBattle)?;
        let Some(question) = &self.state.battle.question else {
            return Err(EngineError::NoActiveQuestion);
        };
        let mask = question.hint_mask(question.hidden_count());
        self.state.battle.hint_revealed = true;
        self.state.nonce += 1;
        Ok(mask)
    }

    /// Points answers at the living enemy in roster slot `index`.
    pub fn select_target(&mut self, index: usize) -> Result<EnemyId, EngineError> {
        self.require_phase(GamePhase::InBattle)?;
        let Some(enemy) = self.state.encounter.get_at(index).filter(|e| !e.defeated) else {
            return Err(EngineError::InvalidTarget(index));
        };
        let id = enemy.id;
        self.state.battle.target_index = index;
        self.state.nonce += 1;
        Ok(id)
    }

    /// Uses a skill directly: arms it or fires it, per its activation.
    ///
    /// MP is committed here in both cases. An armed skill that never fires
    /// (the next answer is wrong) does not refund it, and arming a second
    /// skill replaces the first one under the same rule.
    pub fn use_skill(
        &mut self,
        skill: &SkillId,
        env: &GameEnv<'_>,
    ) -> Result<SkillUseOutcome, EngineError> {
        self.require_phase(GamePhase::InBattle)?;
        let content = env.content()?;
        let template = content
            .skill_template(skill)
            .ok_or_else(|| SkillError::Unknown(skill.clone()))?;
        if !matches!(
            template.activation,
            SkillActivation::OnCorrectAnswer | SkillActivation::OnCommand
        ) {
            return Err(SkillError::InvalidActivation(skill.clone()).into());
        }
        self.state.skills.check_usable(template, &self.state.player)?;

        let outcome = if template.activation == SkillActivation::OnCorrectAnswer {
            self.commit_mp(template);
            self.state.battle.armed_skill = Some(template.id.clone());
            SkillUseOutcome::Armed {
                skill: template.id.clone(),
            }
        } else {
            let rng = env.rng()?;
            let targets = self.resolve_targets(template, rng);
            if targets.is_empty() && !matches!(template.kind, SkillKind::Heal { .. }) {
                return Err(SkillError::NoValidTarget(template.id.clone()).into());
            }
            self.commit_mp(template);
            let mut defeated = Vec::new();
            let cast = self.fire_skill(template, targets, &mut defeated, rng)?;
            let cleared = !defeated.is_empty() && self.settle_defeats();
            SkillUseOutcome::Fired {
                cast,
                defeated,
                cleared,
            }
        };
        self.state.nonce += 1;
        Ok(outcome)
    }

    /// Completes the head impact, landing its damage.
    ///
    /// The render layer reports impacts strictly in queue order. Damage only
    /// lands while the battle is live and the target still stands; a target
    /// defeated in the meantime absorbs nothing.
    pub fn complete_impact(&mut self, effect: EffectId) -> Result<ImpactOutcome, EngineError> {
        let impact = self
            .state
            .battle
            .take_impact(effect)
            .ok_or(EngineError::ImpactNotNext(effect))?;

        let mut applied = false;
        let mut defeated = None;
        if self.state.phase == GamePhase::InBattle
            && self
                .state
                .encounter
                .get(impact.target)
                .is_some_and(|e| !e.defeated)
            && let Some(enemy) = self
                .state
                .encounter
                .apply(impact.target, |e| e.take_damage(impact.damage))
        {
            applied = true;
            if enemy.defeated {
                defeated = Some(impact.target);
            }
        }
        let cleared = applied && self.settle_defeats();
        self.state.nonce += 1;

        Ok(ImpactOutcome {
            impact,
            applied,
            defeated,
            cleared,
        })
    }

    /// Resolves one attack from `attacker` against the player.
    ///
    /// Timers race state transitions, so a stale attack (battle over,
    /// attacker defeated or despawned) is a quiet no-op rather than an
    /// error.
    pub fn enemy_attack(
        &mut self,
        attacker: EnemyId,
        env: &GameEnv<'_>,
    ) -> Result<Option<EnemyAttackOutcome>, EngineError> {
        if self.state.phase != GamePhase::InBattle {
            return Ok(None);
        }
        let Some(enemy) = self
            .state
            .encounter
            .get(attacker)
            .filter(|e| !e.defeated)
            .cloned()
        else {
            return Ok(None);
        };
        let rng = env.rng()?;

        let result = resolve_enemy_attack(
            &enemy,
            self.config,
            rng,
            self.state.game_seed,
            self.state.nonce,
        );
        let mut player = self.state.player.take_damage(result.damage);
        if let Some(poison) = &result.poison {
            player = player.with_status(poison.clone());
        }
        self.state.player = player;
        if result.recovery > 0 {
            self.state.encounter.apply(attacker, |e| e.heal(result.recovery));
        }

        let player_defeated = self.state.player.is_defeated();
        if player_defeated {
            self.state.phase = GamePhase::GameOver;
        }
        self.state.nonce += 1;

        Ok(Some(EnemyAttackOutcome {
            attacker,
            result,
            player_hp: self.state.player.hp,
            player_defeated,
        }))
    }

    /// Applies one poison tick to the player, if poisoned and in battle.
    pub fn poison_tick(&mut self) -> Option<PoisonTickOutcome> {
        if self.state.phase != GamePhase::InBattle {
            return None;
        }
        let (player, tick) = self.state.player.poison_tick()?;
        self.state.player = player;

        let player_defeated = self.state.player.is_defeated();
        if player_defeated {
            self.state.phase = GamePhase::GameOver;
        }
        self.state.nonce += 1;

        Some(PoisonTickOutcome {
            damage: tick.damage,
            expired: tick.expired,
            player_hp: self.state.player.hp,
            player_defeated,
        })
    }

    /// Collects the cleared roster's EXP, leveling up and queuing
    /// notifications.
    ///
    /// Boss floors multiply the roster total by their EXP bonus. The roster
    /// is consumed, so the reward cannot be collected twice.
    pub fn award_clear_exp(&mut self, env: &GameEnv<'_>) -> Result<ClearAward, EngineError> {
        self.require_phase(GamePhase::StageCleared)?;
        if self.state.encounter.is_empty() {
            return Err(EngineError::NothingToAward);
        }
        let content = env.content()?;
        let stage = content
            .stage(&self.state.progress.stage_id)
            .ok_or_else(|| OracleError::StageNotFound(self.state.progress.stage_id.clone()))?;
        let floor_index = self.state.progress.floor_index;
        let floor = stage.floor(floor_index).ok_or(EngineError::MissingFloor {
            stage: stage.id.clone(),
            floor_index,
        })?;

        let mut exp = self.state.encounter.total_exp();
        if floor.is_boss_floor {
            exp = (f64::from(exp) * floor.exp_bonus) as u32;
        }

        let (player, level_ups) =
            award_exp(&self.state.player, i64::from(exp), self.config, content)?;

        // Resolve every notification before touching state so a content gap
        // cannot leave a half-applied award.
        let mut pending = Vec::new();
        for up in &level_ups {
            pending.push(Notification::LevelUp {
                level: up.level,
                unlocked: up.unlocked.clone(),
            });
            if let Some(skill) = &up.unlocked {
                let template = content
                    .skill_template(skill)
                    .ok_or_else(|| SkillError::Unknown(skill.clone()))?;
                pending.push(Notification::SkillAcquired {
                    skill: skill.clone(),
                    name: template.name.clone(),
                });
            }
        }

        self.state.player = player;
        for notification in pending {
            self.state.notifications.enqueue(notification, self.config, content)?;
        }
        self.state.encounter = EncounterState::empty();
        self.state.nonce += 1;

        Ok(ClearAward { exp, level_ups })
    }

    /// Dismisses the showing notification.
    ///
    /// Acknowledging a level-up is the moment its unlocked skill actually
    /// joins the book, which keeps grants in level order even when several
    /// level-ups are queued.
    pub fn acknowledge_notification(&mut self) -> Result<Notification, EngineError> {
        let acked = self.state.notifications.acknowledge()?;
        if let Notification::LevelUp {
            unlocked: Some(skill),
            ..
        } = &acked
        {
            self.state.skills.acquire(skill.clone());
        }
        self.state.nonce += 1;
        Ok(acked)
    }

    /// Shows the next queued notification once the previous one settled.
    pub fn advance_notifications(&mut self) -> Option<&Notification> {
        self.state.notifications.advance()?;
        self.state.nonce += 1;
        self.state.notifications.current()
    }

    /// Moves to the next floor, the next stage, or reports completion.
    ///
    /// Requires the current floor's clear quota and a collected reward.
    pub fn advance_floor(&mut self, env: &GameEnv<'_>) -> Result<FloorAdvance, EngineError> {
        self.require_phase(GamePhase::StageCleared)?;
        if self.state.encounter.all_defeated() {
            return Err(EngineError::AwardPending);
        }
        let content = env.content()?;
        let stage = content
            .stage(&self.state.progress.stage_id)
            .ok_or_else(|| OracleError::StageNotFound(self.state.progress.stage_id.clone()))?;
        let floor_index = self.state.progress.floor_index;
        let floor = stage.floor(floor_index).ok_or(EngineError::MissingFloor {
            stage: stage.id.clone(),
            floor_index,
        })?;
        let clears = self.state.progress.clears(floor_index);
        if !floor.can_advance(clears) {
            return Err(EngineError::AdvanceLocked {
                required: floor.required_clears,
                clears,
            });
        }

        let advance = if stage.has_floor(floor_index + 1) {
            self.state.progress.move_to_floor(floor_index + 1);
            FloorAdvance::NextFloor {
                floor_index: floor_index + 1,
            }
        } else if let Some(next) = content.next_stage(&stage.id) {
            self.state.progress.move_to_stage(next.id.clone());
            FloorAdvance::NextStage {
                stage_id: next.id.clone(),
            }
        } else {
            FloorAdvance::Complete
        };

        self.state.encounter = EncounterState::empty();
        self.state.battle.reset_for_encounter();
        self.state.phase = GamePhase::Exploring;
        self.state.nonce += 1;
        Ok(advance)
    }

    /// Brings a defeated player back at full HP, cleansed of status effects.
    ///
    /// MP and EXP are untouched. The session returns to `Exploring`; the next
    /// encounter starts fresh on the current floor.
    pub fn revive(&mut self) -> Result<(), EngineError> {
        self.require_phase(GamePhase::GameOver)?;
        self.state.player = self.state.player.revive();
        self.state.encounter = EncounterState::empty();
        self.state.battle.reset_for_encounter();
        self.state.phase = GamePhase::Exploring;
        self.state.nonce += 1;
        Ok(())
    }

    fn require_phase(&self, expected: GamePhase) -> Result<(), EngineError> {
        if self.state.phase == expected {
            Ok(())
        } else {
            Err(EngineError::WrongPhase {
                expected,
                actual: self.state.phase,
            })
        }
    }

    fn commit_mp(&mut self, template: &SkillTemplate) {
        self.state.player = self
            .state
            .player
            .with_mp(self.state.player.mp.saturating_sub(template.mp_cost));
    }

    /// Executes a skill and applies or queues its effects.
    ///
    /// MP, activation gates, and target resolution are the caller's business;
    /// this only computes numbers, routes damage into the impact queue, heals,
    /// and starts the cooldown. Enemies defeated here (queue-overflow damage
    /// applied on the spot) land in `defeated`.
    fn fire_skill(
        &mut self,
        template: &SkillTemplate,
        targets: Vec<EnemyId>,
        defeated: &mut Vec<EnemyId>,
        rng: &dyn RngOracle,
    ) -> Result<SkillFired, EngineError> {
        let result = execute(
            template,
            &self.state.player,
            &targets,
            self.config,
            rng,
            self.state.game_seed,
            self.state.nonce,
        )?;

        let mut impacts = Vec::new();
        let mut restored = 0;
        match &result {
            SkillResult::Healed { amount } => {
                let (player, healed) = self.state.player.heal(*amount);
                self.state.player = player;
                restored = healed;
            }
            SkillResult::Struck { target, damage } => {
                self.queue_or_apply(&template.id, *target, *damage, &mut impacts, defeated);
            }
            SkillResult::Barraged { hits } => {
                for (target, damage) in hits {
                    self.queue_or_apply(&template.id, *target, *damage, &mut impacts, defeated);
                }
            }
        }
        self.state.skills.start_cooldown(&template.id, template.cooldown);

        Ok(SkillFired {
            skill: template.id.clone(),
            result,
            impacts,
            restored,
        })
    }

    /// Queues skill damage as a deferred impact, or lands it immediately
    /// when the queue is full so damage is never dropped.
    fn queue_or_apply(
        &mut self,
        skill: &SkillId,
        target: EnemyId,
        damage: u32,
        impacts: &mut Vec<EffectId>,
        defeated: &mut Vec<EnemyId>,
    ) {
        if let Some(effect) = self.state.battle.push_impact(skill.clone(), target, damage) {
            impacts.push(effect);
            return;
        }
        if let Some(enemy) = self.state.encounter.apply(target, |e| e.take_damage(damage))
            && enemy.defeated
            && !defeated.contains(&target)
        {
            defeated.push(target);
        }
    }

    /// Resolves a skill's targeting into concrete enemy ids, in arena order.
    fn resolve_targets(&self, template: &SkillTemplate, rng: &dyn RngOracle) -> Vec<EnemyId> {
        match template.targeting {
            SkillTargeting::SelfTarget => Vec::new(),
            SkillTargeting::SingleEnemy => self
                .state
                .current_target()
                .filter(|e| !e.defeated)
                .map(|e| vec![e.id])
                .unwrap_or_default(),
            SkillTargeting::AllEnemies => self.state.encounter.living().map(|e| e.id).collect(),
            SkillTargeting::RandomEnemy => {
                let living: Vec<EnemyId> = self.state.encounter.living().map(|e| e.id).collect();
                if living.is_empty() {
                    return Vec::new();
                }
                let seed = compute_seed(
                    self.state.game_seed,
                    self.state.nonce,
                    PLAYER_ENTITY,
                    CTX_RANDOM_TARGET,
                );
                vec![living[rng.pick_index(seed, living.len())]]
            }
        }
    }

    /// After damage lands: records a full clear or moves the target pointer
    /// off a dead enemy. Returns whether the roster was wiped.
    fn settle_defeats(&mut self) -> bool {
        if self.state.encounter.all_defeated() {
            self.state.phase = GamePhase::StageCleared;
            let floor_index = self.state.progress.floor_index;
            self.state.progress.record_clear(floor_index);
            self.state.battle.question = None;
            self.state.battle.armed_skill = None;
            return true;
        }
        let current_dead = self
            .state
            .current_target()
            .map(|e| e.defeated)
            .unwrap_or(true);
        if current_dead
            && let Some(next) = self
                .state
                .encounter
                .next_living_after(self.state.battle.target_index)
        {
            self.state.battle.target_index = next;
        }
        false
    }

    /// Draws the next question from the pools the target's mode allows.
    ///
    /// An empty pool falls back to spelling the enemy's own word, so a
    /// battle can always continue.
    fn next_question(
        &self,
        enemy: &Enemy,
        content: &dyn ContentOracle,
        rng: &dyn RngOracle,
    ) -> Question {
        let mut pool: Vec<&Question> = Vec::new();
        match enemy.question_mode {
            QuestionMode::Original => pool.extend(enemy.original_questions.iter()),
            QuestionMode::Common => pool.extend(content.common_questions().iter()),
            QuestionMode::Both => {
                pool.extend(enemy.original_questions.iter());
                pool.extend(content.common_questions().iter());
            }
        }
        if pool.is_empty() {
            return Question::new(
                format!("word:{}", enemy.template),
                enemy.word.clone(),
                enemy.word.clone(),
            );
        }
        let seed = compute_seed(
            self.state.game_seed,
            self.state.nonce,
            enemy.id.0,
            CTX_QUESTION,
        );
        pool[rng.pick_index(seed, pool.len())].clone()
    }
}
