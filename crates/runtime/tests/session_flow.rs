//! End-to-end session tests over the public handle.
//!
//! Every test hosts a real worker with authored test content and a stub RNG
//! whose draws always return the same unit value, so damage numbers are
//! exact. The tokio clock starts paused: timer-driven behavior (enemy
//! attacks, poison ticks, the clear delay, notification pacing) runs in
//! virtual time and the tests stay deterministic.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::timeout;

use game_content::Catalog;
use game_core::engine::{AnswerAction, ClearAward};
use game_core::{
    AnswerOutcome, AttackRoll, ComboTier, EngineError, EnemyId, EnemyTemplate, EnemyTemplateId,
    EnemyVisual, Floor, FloorAdvance, GamePhase, GameState, MonsterSet, Notification, Question,
    QuestionMode, RngOracle, SkillActivation, SkillId, SkillKind, SkillResult, SkillTargeting,
    SkillTemplate, SkillType, SkillUseOutcome, SpecialAttack, SpecialEffect, Stage, StageId,
    StageProgress, StatusEffectKind,
};
use runtime::{Session, SessionConfig, SessionError, SessionEvent};

/// Deterministic stub: every draw returns the same unit value.
#[derive(Clone, Copy)]
struct FixedRng(f64);

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        (self.0 * (f64::from(u32::MAX) + 1.0)) as u32
    }
}

const STAGE: &str = "training_hall";

fn template(id: &str, max_hp: u32, attack_power: u32, exp: u32) -> EnemyTemplate {
    EnemyTemplate {
        id: EnemyTemplateId::from(id),
        name: id.to_owned(),
        level: 1,
        max_hp,
        attack_power,
        defense: 0,
        exp,
        speed: 1,
        luck: 0,
        word: id.to_owned(),
        visual: EnemyVisual::default(),
        question_mode: QuestionMode::Common,
        original_questions: Vec::new(),
        special_attacks: Vec::new(),
    }
}

fn viper() -> EnemyTemplate {
    let mut viper = template("viper", 80, 6, 20);
    viper.special_attacks = vec![SpecialAttack {
        name: "Venom Spit".into(),
        probability: 1.0,
        effect: SpecialEffect::Venom {
            power: 6,
            ticks: 2,
            damage_per_tick: 3,
        },
        message: "Venom splashes across your arm!".into(),
    }];
    viper
}

fn skill(
    id: &str,
    kind: SkillKind,
    mp_cost: u32,
    activation: SkillActivation,
    targeting: SkillTargeting,
) -> SkillTemplate {
    SkillTemplate {
        id: SkillId::from(id),
        name: id.to_owned(),
        skill_type: match kind {
            SkillKind::Heal { .. } => SkillType::Heal,
            _ => SkillType::Damage,
        },
        kind,
        mp_cost,
        cooldown: 2,
        activation,
        targeting,
    }
}

fn floor(enemies: &[&str], required_clears: u32) -> Floor {
    Floor {
        monster_sets: vec![MonsterSet {
            encounter_rate: 1.0,
            enemies: enemies.iter().map(|id| EnemyTemplateId::from(*id)).collect(),
        }],
        is_boss_floor: false,
        exp_bonus: 1.0,
        required_clears,
    }
}

/// One-stage catalog with every test template registered; callers choose the
/// floor layout. The single common question keeps answers predictable.
fn arena(floors: Vec<Floor>) -> Catalog {
    let mut catalog = Catalog::new();
    catalog.add_stage(Stage {
        id: StageId::from(STAGE),
        name: "Training Hall".into(),
        floors,
    });
    catalog.add_enemy(template("wisp", 10, 8, 30));
    catalog.add_enemy(template("elder_wisp", 10, 8, 150));
    catalog.add_enemy(template("brute", 200, 8, 40));
    catalog.add_enemy(template("ogre", 300, 150, 60));
    catalog.add_enemy(viper());
    catalog.add_skill(skill(
        "mend",
        SkillKind::Heal { power: 20 },
        8,
        SkillActivation::OnCommand,
        SkillTargeting::SelfTarget,
    ));
    catalog.add_skill(skill(
        "fire_jab",
        SkillKind::Strike { power: 12 },
        15,
        SkillActivation::OnCorrectAnswer,
        SkillTargeting::SingleEnemy,
    ));
    catalog.add_skill(skill(
        "twin_burst",
        SkillKind::Barrage { power: 10 },
        20,
        SkillActivation::OnCorrectAnswer,
        SkillTargeting::AllEnemies,
    ));
    catalog.add_unlock(2, SkillId::from("mend"));
    catalog.add_question(Question::new("q-echo", "A sound that bounces back", "echo"));
    catalog
}

/// Attacks armed so far out they never fire within a test.
fn quiet_config() -> SessionConfig {
    SessionConfig {
        attack_min_ms: 600_000,
        attack_max_ms: 600_001,
        ..SessionConfig::default()
    }
}

/// Degenerate attack window so the wind-up is exactly `ms`.
fn attack_after(ms: u64) -> SessionConfig {
    SessionConfig {
        attack_min_ms: ms,
        attack_max_ms: ms + 1,
        ..SessionConfig::default()
    }
}

async fn start(catalog: Catalog, config: SessionConfig) -> (Session, broadcast::Receiver<SessionEvent>) {
    let session = Session::builder()
        .catalog(catalog)
        .rng(FixedRng(0.5))
        .game_seed(7)
        .config(config)
        .build()
        .await
        .expect("session should build");
    let events = session.subscribe_events();
    (session, events)
}

/// The timeout only catches deadlocks; it must stay above every timer a test
/// waits through, yet below the quiet-config attack wind-up.
async fn next_event(events: &mut broadcast::Receiver<SessionEvent>) -> SessionEvent {
    timeout(Duration::from_secs(60), events.recv())
        .await
        .expect("timed out waiting for a session event")
        .expect("event channel closed")
}

async fn battle_started(events: &mut broadcast::Receiver<SessionEvent>) -> (Vec<EnemyId>, Question) {
    match next_event(events).await {
        SessionEvent::BattleStarted { roster, question } => (roster, question),
        other => panic!("expected BattleStarted, got {other:?}"),
    }
}

/// Drains events until the clear award lands.
async fn wait_for_award(events: &mut broadcast::Receiver<SessionEvent>) -> ClearAward {
    for _ in 0..16 {
        if let SessionEvent::ExpAwarded { award } = next_event(events).await {
            return award;
        }
    }
    panic!("no ExpAwarded event arrived");
}

#[tokio::test(start_paused = true)]
async fn battle_opens_with_roster_and_question() {
    let (session, mut events) = start(arena(vec![floor(&["wisp"], 1)]), quiet_config()).await;

    let (roster, question) = battle_started(&mut events).await;
    assert_eq!(roster.len(), 1);
    assert_eq!(question.normalized_answer(), "echo");
    assert_eq!(question.prompt, "A sound that bounces back");

    let state = session.handle().query_state().await.expect("state query");
    assert_eq!(state.phase, GamePhase::InBattle);
    assert_eq!(state.player.hp, 100);
    assert_eq!(state.progress.floor_index, 0);
}

#[tokio::test(start_paused = true)]
async fn wrong_answers_break_the_combo_and_uncover_hints() {
    let (session, mut events) = start(arena(vec![floor(&["brute"], 1)]), quiet_config()).await;
    let handle = session.handle();
    let (_, question) = battle_started(&mut events).await;

    let outcome = handle.submit_answer("mistake").await.expect("submit");
    let AnswerOutcome::Wrong {
        wrong_attempts,
        hint_mask,
        exhausted,
    } = outcome
    else {
        panic!("expected a wrong answer, got {outcome:?}");
    };
    assert_eq!(wrong_attempts, 1);
    assert_eq!(hint_mask, question.hint_mask(1));
    assert_eq!(hint_mask, "e___");
    assert!(!exhausted);

    // One wrong attempt on a four-slot answer: penalty 1 - (1/4)/2.
    let outcome = handle.submit_answer("echo").await.expect("submit");
    let AnswerOutcome::Correct { combo, action, .. } = outcome else {
        panic!("expected a correct answer, got {outcome:?}");
    };
    assert_eq!(combo, 1);
    let AnswerAction::Attack { result, .. } = action else {
        panic!("expected a normal attack");
    };
    assert_eq!(result.penalty, 0.875);
    assert_eq!(result.damage, 8);
}

#[tokio::test(start_paused = true)]
async fn clearing_the_roster_pays_exp_after_the_clear_delay() {
    let catalog = arena(vec![floor(&["wisp"], 1), floor(&["wisp"], 1)]);
    let (session, mut events) = start(catalog, quiet_config()).await;
    let handle = session.handle();
    let (roster, _) = battle_started(&mut events).await;

    let outcome = handle.submit_answer("echo").await.expect("submit");
    let AnswerOutcome::Correct {
        defeated,
        cleared,
        next_question,
        ..
    } = &outcome
    else {
        panic!("expected a correct answer, got {outcome:?}");
    };
    assert_eq!(defeated, &roster);
    assert!(cleared);
    assert!(next_question.is_none());

    // Defeat precedes the clear, the clear precedes its award.
    assert!(matches!(next_event(&mut events).await, SessionEvent::AnswerJudged { .. }));
    assert!(matches!(
        next_event(&mut events).await,
        SessionEvent::EnemyDefeated { enemy } if enemy == roster[0]
    ));
    assert!(matches!(next_event(&mut events).await, SessionEvent::StageCleared));

    // The reward is still pending until the clear delay elapses.
    let err = handle.advance_stage(false).await.unwrap_err();
    assert!(matches!(err, SessionError::Engine(EngineError::AwardPending)));

    let award = wait_for_award(&mut events).await;
    assert_eq!(award.exp, 30);
    assert!(award.level_ups.is_empty());

    let (advance, start) = handle.advance_stage(false).await.expect("advance");
    assert_eq!(advance, Some(FloorAdvance::NextFloor { floor_index: 1 }));
    assert_eq!(start.roster.len(), 1);

    assert!(matches!(next_event(&mut events).await, SessionEvent::FloorAdvanced { .. }));
    assert!(matches!(next_event(&mut events).await, SessionEvent::BattleStarted { .. }));
    let state = handle.query_state().await.expect("state query");
    assert_eq!(state.progress.floor_index, 1);
}

#[tokio::test(start_paused = true)]
async fn answer_streaks_scale_damage_through_combo_tiers() {
    let (session, mut events) = start(arena(vec![floor(&["brute"], 1)]), quiet_config()).await;
    let handle = session.handle();
    battle_started(&mut events).await;

    // base 10 at mid variance; combo multiplies by 1.1 per extra link
    let expected = [
        (1, ComboTier::None, 10),
        (2, ComboTier::Combo, 11),
        (3, ComboTier::Big, 12),
    ];
    for (combo, tier, damage) in expected {
        let outcome = handle.submit_answer("echo").await.expect("submit");
        let AnswerOutcome::Correct {
            combo: got_combo,
            tier: got_tier,
            action: AnswerAction::Attack { result, .. },
            ..
        } = outcome
        else {
            panic!("expected a correct normal attack");
        };
        assert_eq!(got_combo, combo);
        assert_eq!(got_tier, tier);
        assert_eq!(result.roll, AttackRoll::Normal);
        assert_eq!(result.damage, damage);
    }
}

#[tokio::test(start_paused = true)]
async fn revealing_the_hint_halves_the_damage() {
    let (session, mut events) = start(arena(vec![floor(&["brute"], 1)]), quiet_config()).await;
    let handle = session.handle();
    battle_started(&mut events).await;

    let mask = handle.reveal_hint().await.expect("reveal");
    assert_eq!(mask, "echo");
    assert!(matches!(
        next_event(&mut events).await,
        SessionEvent::HintRevealed { mask } if mask == "echo"
    ));

    let outcome = handle.submit_answer("echo").await.expect("submit");
    let AnswerOutcome::Correct {
        action: AnswerAction::Attack { result, .. },
        ..
    } = outcome
    else {
        panic!("expected a correct normal attack");
    };
    assert_eq!(result.penalty, 0.5);
    assert_eq!(result.damage, 5);
}

#[tokio::test(start_paused = true)]
async fn selecting_a_target_redirects_answers() {
    let (session, mut events) = start(arena(vec![floor(&["wisp", "wisp"], 1)]), quiet_config()).await;
    let handle = session.handle();
    let (roster, _) = battle_started(&mut events).await;
    assert_eq!(roster.len(), 2);

    let selected = handle.select_target(1).await.expect("select");
    assert_eq!(selected, roster[1]);

    let outcome = handle.submit_answer("echo").await.expect("submit");
    let AnswerOutcome::Correct {
        defeated, cleared, ..
    } = &outcome
    else {
        panic!("expected a correct answer");
    };
    assert_eq!(defeated, &[roster[1]]);
    assert!(!cleared);

    // The pointer slid off the corpse; the survivor falls next.
    let outcome = handle.submit_answer("echo").await.expect("submit");
    let AnswerOutcome::Correct {
        defeated, cleared, ..
    } = &outcome
    else {
        panic!("expected a correct answer");
    };
    assert_eq!(defeated, &[roster[0]]);
    assert!(cleared);
}

#[tokio::test(start_paused = true)]
async fn armed_skills_fire_on_the_next_correct_answer() {
    let mut state = GameState::new(7, StageProgress::new(StageId::from(STAGE), 0));
    state.skills.acquire(SkillId::from("fire_jab"));

    let session = Session::builder()
        .catalog(arena(vec![floor(&["brute"], 1)]))
        .rng(FixedRng(0.5))
        .config(quiet_config())
        .initial_state(state)
        .build()
        .await
        .expect("session should build");
    let mut events = session.subscribe_events();
    let handle = session.handle();
    let (roster, _) = battle_started(&mut events).await;

    let outcome = handle
        .use_skill(SkillId::from("fire_jab"), None)
        .await
        .expect("use skill");
    assert_eq!(
        outcome,
        SkillUseOutcome::Armed {
            skill: SkillId::from("fire_jab")
        }
    );
    // MP is committed at arming time.
    let state = handle.query_state().await.expect("state query");
    assert_eq!(state.player.mp, 35);
    assert!(matches!(next_event(&mut events).await, SessionEvent::SkillUsed { .. }));

    let outcome = handle.submit_answer("echo").await.expect("submit");
    let AnswerOutcome::Correct {
        action: AnswerAction::Skill(cast),
        defeated,
        ..
    } = outcome
    else {
        panic!("expected the armed skill to fire, got {outcome:?}");
    };
    // (12 + power 5 * 0.5) at mid variance
    assert_eq!(
        cast.result,
        SkillResult::Struck {
            target: roster[0],
            damage: 14
        }
    );
    assert_eq!(cast.impacts.len(), 1);
    assert!(defeated.is_empty());

    assert!(matches!(next_event(&mut events).await, SessionEvent::AnswerJudged { .. }));
    let requested = next_event(&mut events).await;
    let SessionEvent::ImpactRequested { effect, damage, target, .. } = requested else {
        panic!("expected ImpactRequested, got {requested:?}");
    };
    assert_eq!(effect, cast.impacts[0]);
    assert_eq!(damage, 14);
    assert_eq!(target, roster[0]);

    // Damage lands only when the render layer reports the impact done.
    let state = handle.query_state().await.expect("state query");
    assert_eq!(state.encounter.get(roster[0]).unwrap().current_hp, 200);

    let resolved = handle.complete_effect(effect).await.expect("complete");
    assert!(resolved.applied);
    assert_eq!(resolved.defeated, None);
    assert!(!resolved.cleared);

    let state = handle.query_state().await.expect("state query");
    assert_eq!(state.encounter.get(roster[0]).unwrap().current_hp, 186);
}

#[tokio::test(start_paused = true)]
async fn impacts_complete_strictly_in_queue_order() {
    let mut state = GameState::new(7, StageProgress::new(StageId::from(STAGE), 0));
    state.skills.acquire(SkillId::from("twin_burst"));

    let session = Session::builder()
        .catalog(arena(vec![floor(&["brute", "brute"], 1)]))
        .rng(FixedRng(0.5))
        .config(quiet_config())
        .initial_state(state)
        .build()
        .await
        .expect("session should build");
    let mut events = session.subscribe_events();
    let handle = session.handle();
    let (roster, _) = battle_started(&mut events).await;

    handle
        .use_skill(SkillId::from("twin_burst"), None)
        .await
        .expect("use skill");
    let outcome = handle.submit_answer("echo").await.expect("submit");
    let AnswerOutcome::Correct {
        action: AnswerAction::Skill(cast),
        ..
    } = outcome
    else {
        panic!("expected the armed barrage to fire");
    };
    assert_eq!(cast.impacts.len(), 2);

    // Completing the tail before the head is rejected and changes nothing.
    let err = handle.complete_effect(cast.impacts[1]).await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::Engine(EngineError::ImpactNotNext(_))
    ));

    let first = handle.complete_effect(cast.impacts[0]).await.expect("head");
    assert!(first.applied);
    assert_eq!(first.impact.target, roster[0]);
    let second = handle.complete_effect(cast.impacts[1]).await.expect("tail");
    assert!(second.applied);
    assert_eq!(second.impact.target, roster[1]);

    // (10 * 0.7 + 5 * 0.3) at mid variance lands 8 on each target.
    let state = handle.query_state().await.expect("state query");
    assert_eq!(state.encounter.get(roster[0]).unwrap().current_hp, 192);
    assert_eq!(state.encounter.get(roster[1]).unwrap().current_hp, 192);
}

#[tokio::test(start_paused = true)]
async fn heal_lands_immediately_and_clamps_at_max_hp() {
    let mut state = GameState::new(7, StageProgress::new(StageId::from(STAGE), 0));
    state.skills.acquire(SkillId::from("mend"));

    let session = Session::builder()
        .catalog(arena(vec![floor(&["brute"], 1)]))
        .rng(FixedRng(0.5))
        .config(attack_after(200))
        .initial_state(state)
        .build()
        .await
        .expect("session should build");
    let mut events = session.subscribe_events();
    let handle = session.handle();
    battle_started(&mut events).await;

    // attack 8 minus mid-roll jitter 1
    let attacked = next_event(&mut events).await;
    let SessionEvent::EnemyAttacked { outcome } = attacked else {
        panic!("expected EnemyAttacked, got {attacked:?}");
    };
    assert_eq!(outcome.result.damage, 7);
    assert_eq!(outcome.player_hp, 93);
    assert!(!outcome.player_defeated);

    let outcome = handle
        .use_skill(SkillId::from("mend"), None)
        .await
        .expect("use skill");
    let SkillUseOutcome::Fired { cast, .. } = outcome else {
        panic!("expected an on-command heal to fire, got {outcome:?}");
    };
    assert_eq!(cast.result, SkillResult::Healed { amount: 20 });
    assert_eq!(cast.restored, 7);

    let state = handle.query_state().await.expect("state query");
    assert_eq!(state.player.hp, 100);
    assert_eq!(state.player.mp, 42);
}

#[tokio::test(start_paused = true)]
async fn venom_poisons_and_the_ticker_runs_to_expiry() {
    let (session, mut events) = start(arena(vec![floor(&["viper"], 1)]), attack_after(10_000)).await;
    let handle = session.handle();
    battle_started(&mut events).await;

    let attacked = next_event(&mut events).await;
    let SessionEvent::EnemyAttacked { outcome } = attacked else {
        panic!("expected EnemyAttacked, got {attacked:?}");
    };
    assert_eq!(outcome.result.damage, 6);
    assert!(outcome.result.poison.is_some());
    assert_eq!(outcome.player_hp, 94);

    let ticked = next_event(&mut events).await;
    let SessionEvent::PoisonTicked { outcome } = ticked else {
        panic!("expected PoisonTicked, got {ticked:?}");
    };
    assert_eq!(outcome.damage, 3);
    assert!(!outcome.expired);
    assert_eq!(outcome.player_hp, 91);

    let ticked = next_event(&mut events).await;
    let SessionEvent::PoisonTicked { outcome } = ticked else {
        panic!("expected PoisonTicked, got {ticked:?}");
    };
    assert!(outcome.expired);
    assert_eq!(outcome.player_hp, 88);

    let state = handle.query_state().await.expect("state query");
    assert!(!state.player.status_effects.has(StatusEffectKind::Poison));
}

#[tokio::test(start_paused = true)]
async fn a_lethal_hit_ends_the_run_and_revive_reopens_the_floor() {
    let (session, mut events) = start(arena(vec![floor(&["ogre"], 1)]), attack_after(200)).await;
    let handle = session.handle();
    battle_started(&mut events).await;

    let attacked = next_event(&mut events).await;
    let SessionEvent::EnemyAttacked { outcome } = attacked else {
        panic!("expected EnemyAttacked, got {attacked:?}");
    };
    assert!(outcome.player_defeated);
    assert_eq!(outcome.player_hp, 0);
    assert!(matches!(next_event(&mut events).await, SessionEvent::GameOver));

    // Dead players answer no questions.
    let err = handle.submit_answer("echo").await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::Engine(EngineError::WrongPhase { .. })
    ));

    let start = handle.revive().await.expect("revive");
    assert_eq!(start.roster.len(), 1);
    assert!(matches!(next_event(&mut events).await, SessionEvent::Revived));
    assert!(matches!(next_event(&mut events).await, SessionEvent::BattleStarted { .. }));

    let state = handle.query_state().await.expect("state query");
    assert_eq!(state.phase, GamePhase::InBattle);
    assert_eq!(state.player.hp, 100);
}

#[tokio::test(start_paused = true)]
async fn level_ups_queue_notifications_and_acknowledgment_grants_the_skill() {
    let (session, mut events) = start(arena(vec![floor(&["elder_wisp"], 1)]), quiet_config()).await;
    let handle = session.handle();
    battle_started(&mut events).await;

    handle.submit_answer("echo").await.expect("submit");
    let award = wait_for_award(&mut events).await;
    assert_eq!(award.exp, 150);
    assert_eq!(award.level_ups.len(), 1);
    assert_eq!(award.level_ups[0].level, 2);
    assert_eq!(award.level_ups[0].unlocked, Some(SkillId::from("mend")));

    let shown = next_event(&mut events).await;
    assert!(matches!(
        shown,
        SessionEvent::NotificationShown {
            notification: Notification::LevelUp { level: 2, .. }
        }
    ));

    // The unlock only joins the book once the level-up is acknowledged.
    let state = handle.query_state().await.expect("state query");
    assert!(!state.skills.has(&SkillId::from("mend")));

    let acked = handle.acknowledge_notification().await.expect("ack");
    assert_eq!(
        acked,
        Notification::LevelUp {
            level: 2,
            unlocked: Some(SkillId::from("mend"))
        }
    );
    let state = handle.query_state().await.expect("state query");
    assert!(state.skills.has(&SkillId::from("mend")));
    assert_eq!(state.player.level, 2);
    assert_eq!(state.player.exp, 50);
    assert_eq!(state.player.max_hp, 110);
    assert_eq!(state.player.hp, 110);

    // The follow-up popup appears only after the settle delay.
    let shown = next_event(&mut events).await;
    let SessionEvent::NotificationShown {
        notification: Notification::SkillAcquired { skill, .. },
    } = shown
    else {
        panic!("expected the SkillAcquired popup, got {shown:?}");
    };
    assert_eq!(skill, SkillId::from("mend"));

    let acked = handle.acknowledge_notification().await.expect("ack");
    assert!(matches!(acked, Notification::SkillAcquired { .. }));
}

#[tokio::test(start_paused = true)]
async fn the_clear_quota_gates_floor_advance() {
    let catalog = arena(vec![floor(&["wisp"], 2), floor(&["wisp"], 1)]);
    let (session, mut events) = start(catalog, quiet_config()).await;
    let handle = session.handle();
    battle_started(&mut events).await;

    handle.submit_answer("echo").await.expect("submit");
    wait_for_award(&mut events).await;

    let err = handle.advance_stage(false).await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::Engine(EngineError::AdvanceLocked {
            required: 2,
            clears: 1
        })
    ));

    // Staying re-battles the same floor and counts toward the quota.
    let (advance, _) = handle.advance_stage(true).await.expect("stay");
    assert!(advance.is_none());
    handle.submit_answer("echo").await.expect("submit");
    wait_for_award(&mut events).await;

    let (advance, _) = handle.advance_stage(false).await.expect("advance");
    assert_eq!(advance, Some(FloorAdvance::NextFloor { floor_index: 1 }));
}

#[tokio::test(start_paused = true)]
async fn identically_seeded_sessions_replay_identically() {
    let mut outcomes = Vec::new();
    let mut states = Vec::new();
    for _ in 0..2 {
        let session = Session::builder()
            .catalog(arena(vec![floor(&["brute"], 1)]))
            .game_seed(42)
            .config(quiet_config())
            .build()
            .await
            .expect("session should build");
        let handle = session.handle();

        let mut run = Vec::new();
        for input in ["mistake", "echo", "echo"] {
            run.push(handle.submit_answer(input).await.expect("submit"));
        }
        outcomes.push(run);
        states.push(handle.query_state().await.expect("state query"));
    }

    assert_eq!(outcomes[0], outcomes[1]);
    assert_eq!(states[0], states[1]);
}
