//! Built-in enemy templates.
//!
//! Tiering runs slime/bat/goblin through the wolf mid-tier to the two stage
//! bosses. Bosses and the goblin line carry original question pools; the
//! rest quiz from the common pool.

use game_core::{
    EnemyTemplate, EnemyTemplateId, EnemyVisual, Question, QuestionMode, SpecialAttack,
    SpecialEffect,
};

pub(crate) fn enemies() -> Vec<EnemyTemplate> {
    vec![
        slime(),
        bat(),
        goblin(),
        wild_wolf(),
        forest_ogre(),
        ember_imp(),
        lava_golem(),
        venom_drake(),
    ]
}

fn visual(image: &str, offset_x: f32, offset_y: f32, scale: f32) -> EnemyVisual {
    EnemyVisual {
        image: image.into(),
        offset_x,
        offset_y,
        scale,
    }
}

fn slime() -> EnemyTemplate {
    EnemyTemplate {
        id: EnemyTemplateId::from("slime"),
        name: "Slime".into(),
        level: 1,
        max_hp: 12,
        attack_power: 4,
        defense: 2,
        exp: 8,
        speed: 2,
        luck: 1,
        word: "slime".into(),
        visual: visual("enemies/slime.png", 0.0, 0.0, 1.0),
        question_mode: QuestionMode::Common,
        original_questions: Vec::new(),
        special_attacks: Vec::new(),
    }
}

fn bat() -> EnemyTemplate {
    EnemyTemplate {
        id: EnemyTemplateId::from("bat"),
        name: "Cave Bat".into(),
        level: 2,
        max_hp: 16,
        attack_power: 5,
        defense: 3,
        exp: 12,
        speed: 6,
        luck: 2,
        word: "bat".into(),
        visual: visual("enemies/bat.png", 0.0, -24.0, 0.8),
        question_mode: QuestionMode::Common,
        original_questions: Vec::new(),
        special_attacks: vec![SpecialAttack {
            name: "Drain Bite".into(),
            probability: 0.2,
            effect: SpecialEffect::Drain {
                power: 7,
                recovery: 4,
            },
            message: "The bat latches on and drinks deep!".into(),
        }],
    }
}

fn goblin() -> EnemyTemplate {
    EnemyTemplate {
        id: EnemyTemplateId::from("goblin"),
        name: "Goblin Scrapper".into(),
        level: 3,
        max_hp: 26,
        attack_power: 7,
        defense: 4,
        exp: 20,
        speed: 4,
        luck: 3,
        word: "goblin".into(),
        visual: visual("enemies/goblin.png", 8.0, 0.0, 1.0),
        question_mode: QuestionMode::Both,
        original_questions: vec![
            Question::new(
                "goblin-dagger",
                "The short blade a goblin hides in its belt",
                "dagger",
            ),
            Question::new("goblin-ambush", "A surprise attack from hiding", "ambush"),
        ],
        special_attacks: Vec::new(),
    }
}

fn wild_wolf() -> EnemyTemplate {
    EnemyTemplate {
        id: EnemyTemplateId::from("wild_wolf"),
        name: "Wild Wolf".into(),
        level: 4,
        max_hp: 34,
        attack_power: 9,
        defense: 5,
        exp: 28,
        speed: 8,
        luck: 3,
        word: "wolf".into(),
        visual: visual("enemies/wild_wolf.png", -6.0, 4.0, 1.1),
        question_mode: QuestionMode::Common,
        original_questions: Vec::new(),
        special_attacks: vec![SpecialAttack {
            name: "Savage Pounce".into(),
            probability: 0.15,
            effect: SpecialEffect::Strike { power: 14 },
            message: "The wolf leaps with bared fangs!".into(),
        }],
    }
}

fn forest_ogre() -> EnemyTemplate {
    EnemyTemplate {
        id: EnemyTemplateId::from("forest_ogre"),
        name: "Forest Ogre".into(),
        level: 6,
        max_hp: 80,
        attack_power: 12,
        defense: 7,
        exp: 90,
        speed: 3,
        luck: 2,
        word: "ogre".into(),
        visual: visual("enemies/forest_ogre.png", 0.0, 12.0, 1.6),
        question_mode: QuestionMode::Both,
        original_questions: vec![
            Question::new("ogre-timber", "Felled trees ready for hauling", "timber"),
            Question::new("ogre-boulder", "A huge rounded rock", "boulder"),
        ],
        special_attacks: vec![SpecialAttack {
            name: "Club Smash".into(),
            probability: 0.25,
            effect: SpecialEffect::Strike { power: 18 },
            message: "The ogre brings its club crashing down!".into(),
        }],
    }
}

fn ember_imp() -> EnemyTemplate {
    EnemyTemplate {
        id: EnemyTemplateId::from("ember_imp"),
        name: "Ember Imp".into(),
        level: 5,
        max_hp: 40,
        attack_power: 10,
        defense: 6,
        exp: 35,
        speed: 7,
        luck: 4,
        word: "imp".into(),
        visual: visual("enemies/ember_imp.png", 4.0, -8.0, 0.9),
        question_mode: QuestionMode::Common,
        original_questions: Vec::new(),
        special_attacks: Vec::new(),
    }
}

fn lava_golem() -> EnemyTemplate {
    EnemyTemplate {
        id: EnemyTemplateId::from("lava_golem"),
        name: "Lava Golem".into(),
        level: 7,
        max_hp: 95,
        attack_power: 13,
        defense: 10,
        exp: 110,
        speed: 2,
        luck: 1,
        word: "golem".into(),
        visual: visual("enemies/lava_golem.png", 0.0, 8.0, 1.4),
        question_mode: QuestionMode::Both,
        original_questions: vec![
            Question::new("golem-ember", "A glowing fragment of a dying fire", "ember"),
            Question::new("golem-obsidian", "Black glassy volcanic rock", "obsidian"),
        ],
        special_attacks: vec![SpecialAttack {
            name: "Molten Fist".into(),
            probability: 0.2,
            effect: SpecialEffect::Strike { power: 20 },
            message: "A fist of cooling lava hammers down!".into(),
        }],
    }
}

fn venom_drake() -> EnemyTemplate {
    EnemyTemplate {
        id: EnemyTemplateId::from("venom_drake"),
        name: "Venom Drake".into(),
        level: 9,
        max_hp: 140,
        attack_power: 15,
        defense: 9,
        exp: 220,
        speed: 6,
        luck: 5,
        word: "drake".into(),
        visual: visual("enemies/venom_drake.png", 0.0, 16.0, 1.8),
        question_mode: QuestionMode::Both,
        original_questions: vec![
            Question::new("drake-venom", "Poison delivered by fangs", "venom"),
            Question::new(
                "drake-antidote",
                "The remedy that counters a poison",
                "antidote",
            ),
        ],
        special_attacks: vec![
            SpecialAttack {
                name: "Poison Breath".into(),
                probability: 0.3,
                effect: SpecialEffect::Venom {
                    power: 10,
                    ticks: 3,
                    damage_per_tick: 4,
                },
                message: "A sickly green cloud washes over you!".into(),
            },
            SpecialAttack {
                name: "Tail Sweep".into(),
                probability: 0.15,
                effect: SpecialEffect::Strike { power: 22 },
                message: "The drake's tail whips across the line!".into(),
            },
        ],
    }
}
