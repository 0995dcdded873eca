//! Built-in stage layouts.
//!
//! Each stage runs two ordinary floors into a boss floor. Floor rates sum to
//! 1.0; the middle floors demand two clears before the path onward opens.

use game_core::{EnemyTemplateId, Floor, MonsterSet, Stage, StageId};

pub(crate) fn stages() -> Vec<Stage> {
    vec![verdant_hollow(), ember_depths()]
}

fn set(encounter_rate: f64, enemies: &[&str]) -> MonsterSet {
    MonsterSet {
        encounter_rate,
        enemies: enemies.iter().map(|id| EnemyTemplateId::from(*id)).collect(),
    }
}

fn floor(monster_sets: Vec<MonsterSet>, required_clears: u32) -> Floor {
    Floor {
        monster_sets,
        is_boss_floor: false,
        exp_bonus: 1.0,
        required_clears,
    }
}

fn boss_floor(monster_sets: Vec<MonsterSet>, exp_bonus: f64) -> Floor {
    Floor {
        monster_sets,
        is_boss_floor: true,
        exp_bonus,
        required_clears: 1,
    }
}

fn verdant_hollow() -> Stage {
    Stage {
        id: StageId::from("verdant_hollow"),
        name: "Verdant Hollow".into(),
        floors: vec![
            floor(
                vec![set(0.6, &["slime", "slime"]), set(0.4, &["slime", "bat"])],
                1,
            ),
            floor(
                vec![
                    set(0.5, &["bat", "bat"]),
                    set(0.3, &["goblin"]),
                    set(0.2, &["goblin", "wild_wolf"]),
                ],
                2,
            ),
            boss_floor(vec![set(1.0, &["goblin", "forest_ogre"])], 1.5),
        ],
    }
}

fn ember_depths() -> Stage {
    Stage {
        id: StageId::from("ember_depths"),
        name: "Ember Depths".into(),
        floors: vec![
            floor(
                vec![
                    set(0.7, &["ember_imp", "ember_imp"]),
                    set(0.3, &["wild_wolf", "ember_imp"]),
                ],
                1,
            ),
            floor(
                vec![
                    set(0.5, &["lava_golem"]),
                    set(0.5, &["ember_imp", "ember_imp", "ember_imp"]),
                ],
                2,
            ),
            boss_floor(vec![set(1.0, &["venom_drake"])], 2.0),
        ],
    }
}
