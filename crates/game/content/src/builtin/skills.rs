//! The default skill set and its unlock levels.

use game_core::{SkillActivation, SkillId, SkillKind, SkillTargeting, SkillTemplate, SkillType};

pub(crate) fn skills() -> Vec<SkillTemplate> {
    vec![heal(), fire_bolt(), fire_ball(), fire_storm()]
}

/// Level-up grants. Levels without an entry unlock nothing.
pub(crate) fn unlock_table() -> Vec<(u32, SkillId)> {
    vec![
        (2, SkillId::from("heal")),
        (3, SkillId::from("fire_bolt")),
        (5, SkillId::from("fire_ball")),
        (7, SkillId::from("fire_storm")),
    ]
}

fn heal() -> SkillTemplate {
    SkillTemplate {
        id: SkillId::from("heal"),
        name: "Heal".into(),
        skill_type: SkillType::Heal,
        kind: SkillKind::Heal { power: 20 },
        mp_cost: 10,
        cooldown: 3,
        activation: SkillActivation::OnCommand,
        targeting: SkillTargeting::SelfTarget,
    }
}

fn fire_bolt() -> SkillTemplate {
    SkillTemplate {
        id: SkillId::from("fire_bolt"),
        name: "Fire Bolt".into(),
        skill_type: SkillType::Damage,
        kind: SkillKind::Strike { power: 15 },
        mp_cost: 15,
        cooldown: 1,
        activation: SkillActivation::OnCorrectAnswer,
        targeting: SkillTargeting::SingleEnemy,
    }
}

fn fire_ball() -> SkillTemplate {
    SkillTemplate {
        id: SkillId::from("fire_ball"),
        name: "Fire Ball".into(),
        skill_type: SkillType::Damage,
        kind: SkillKind::Strike { power: 30 },
        mp_cost: 30,
        cooldown: 2,
        activation: SkillActivation::OnCorrectAnswer,
        targeting: SkillTargeting::SingleEnemy,
    }
}

fn fire_storm() -> SkillTemplate {
    SkillTemplate {
        id: SkillId::from("fire_storm"),
        name: "Fire Storm".into(),
        skill_type: SkillType::Damage,
        kind: SkillKind::Barrage { power: 20 },
        mp_cost: 45,
        cooldown: 4,
        activation: SkillActivation::OnCorrectAnswer,
        targeting: SkillTargeting::AllEnemies,
    }
}
