//! The assembled content catalog and its oracle implementation.

use std::collections::HashMap;
use std::fmt;

use game_core::{
    ContentOracle, EnemyTemplate, EnemyTemplateId, GameConfig, Question, SkillId, SkillTemplate,
    Stage, StageId,
};

use crate::builtin;

/// A complete, queryable set of game content.
///
/// The catalog backs every [`ContentOracle`] lookup the engine makes. Stage
/// order in the catalog is progression order. [`Catalog::builtin`] returns
/// the content shipped with the game; the loaders assemble catalogs from RON
/// files instead.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    stages: Vec<Stage>,
    enemies: HashMap<EnemyTemplateId, EnemyTemplate>,
    skills: HashMap<SkillId, SkillTemplate>,
    unlocks: HashMap<u32, SkillId>,
    questions: Vec<Question>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The content shipped with the game: two stages of three floors, eight
    /// enemy templates, the four default skills with their unlock levels,
    /// and the shared question pool.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for stage in builtin::stages() {
            catalog.add_stage(stage);
        }
        for template in builtin::enemies() {
            catalog.add_enemy(template);
        }
        for template in builtin::skills() {
            catalog.add_skill(template);
        }
        for (level, skill) in builtin::unlock_table() {
            catalog.add_unlock(level, skill);
        }
        for question in builtin::common_questions() {
            catalog.add_question(question);
        }
        catalog
    }

    /// Appends a stage. Catalog order is progression order.
    pub fn add_stage(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    /// Registers an enemy template, replacing any previous one with its id.
    pub fn add_enemy(&mut self, template: EnemyTemplate) {
        self.enemies.insert(template.id.clone(), template);
    }

    /// Registers a skill template, replacing any previous one with its id.
    pub fn add_skill(&mut self, template: SkillTemplate) {
        self.skills.insert(template.id.clone(), template);
    }

    /// Registers `skill` as the grant for reaching `level`.
    pub fn add_unlock(&mut self, level: u32, skill: SkillId) {
        self.unlocks.insert(level, skill);
    }

    /// Appends a question to the shared pool.
    pub fn add_question(&mut self, question: Question) {
        self.questions.push(question);
    }

    /// All stages in progression order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Reports authoring problems: encounter-rate sums off 1.0, monster sets
    /// naming unknown enemy templates, unlock entries naming unknown skills.
    ///
    /// Warnings are non-fatal. Callers log them and use the content as
    /// written; selection's last-set fallback absorbs rate shortfalls.
    pub fn validate(&self, config: &GameConfig) -> Vec<CatalogWarning> {
        let mut warnings = Vec::new();
        for stage in &self.stages {
            for warning in stage.validate(config) {
                warnings.push(CatalogWarning::RateSum {
                    stage: stage.id.clone(),
                    floor_index: warning.floor_index,
                    rate_sum: warning.rate_sum,
                });
            }
            for (floor_index, floor) in stage.floors.iter().enumerate() {
                for set in &floor.monster_sets {
                    for enemy in &set.enemies {
                        if !self.enemies.contains_key(enemy) {
                            warnings.push(CatalogWarning::UnknownEnemy {
                                stage: stage.id.clone(),
                                floor_index,
                                enemy: enemy.clone(),
                            });
                        }
                    }
                }
            }
        }
        let mut unlocks: Vec<_> = self.unlocks.iter().collect();
        unlocks.sort_by_key(|(level, _)| **level);
        for (level, skill) in unlocks {
            if !self.skills.contains_key(skill) {
                warnings.push(CatalogWarning::UnknownUnlockSkill {
                    level: *level,
                    skill: skill.clone(),
                });
            }
        }
        warnings
    }
}

impl ContentOracle for Catalog {
    fn enemy_template(&self, id: &EnemyTemplateId) -> Option<&EnemyTemplate> {
        self.enemies.get(id)
    }

    fn skill_template(&self, id: &SkillId) -> Option<&SkillTemplate> {
        self.skills.get(id)
    }

    fn skill_unlocked_at(&self, level: u32) -> Option<&SkillId> {
        self.unlocks.get(&level)
    }

    fn stage(&self, id: &StageId) -> Option<&Stage> {
        self.stages.iter().find(|s| &s.id == id)
    }

    fn first_stage(&self) -> Option<&Stage> {
        self.stages.first()
    }

    fn next_stage(&self, id: &StageId) -> Option<&Stage> {
        let position = self.stages.iter().position(|s| &s.id == id)?;
        self.stages.get(position + 1)
    }

    fn common_questions(&self) -> &[Question] {
        &self.questions
    }
}

/// An authoring problem found by [`Catalog::validate`].
#[derive(Clone, Debug, PartialEq)]
pub enum CatalogWarning {
    /// A floor's encounter rates do not sum to 1.0 within tolerance.
    RateSum {
        stage: StageId,
        floor_index: usize,
        rate_sum: f64,
    },
    /// A monster set names an enemy template the catalog does not contain.
    UnknownEnemy {
        stage: StageId,
        floor_index: usize,
        enemy: EnemyTemplateId,
    },
    /// An unlock entry names a skill the catalog does not contain.
    UnknownUnlockSkill { level: u32, skill: SkillId },
}

impl fmt::Display for CatalogWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateSum {
                stage,
                floor_index,
                rate_sum,
            } => write!(
                f,
                "stage '{stage}' floor {floor_index}: encounter rates sum to {rate_sum}, expected 1.0"
            ),
            Self::UnknownEnemy {
                stage,
                floor_index,
                enemy,
            } => write!(
                f,
                "stage '{stage}' floor {floor_index}: unknown enemy template '{enemy}'"
            ),
            Self::UnknownUnlockSkill { level, skill } => {
                write!(f, "unlock at level {level}: unknown skill '{skill}'")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Floor, MonsterSet, QuestionMode};

    #[test]
    fn builtin_catalog_is_internally_consistent() {
        let catalog = Catalog::builtin();
        let warnings = catalog.validate(&GameConfig::default());
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn builtin_stages_progress_in_order() {
        let catalog = Catalog::builtin();
        let first = catalog.first_stage().unwrap();
        assert_eq!(first.id, StageId::from("verdant_hollow"));
        assert_eq!(first.floors.len(), 3);

        let second = catalog.next_stage(&first.id).unwrap();
        assert_eq!(second.id, StageId::from("ember_depths"));
        assert_eq!(second.floors.len(), 3);
        assert!(catalog.next_stage(&second.id).is_none());
    }

    #[test]
    fn builtin_boss_floors_close_each_stage() {
        let catalog = Catalog::builtin();
        for stage in catalog.stages() {
            let last = stage.floors.last().unwrap();
            assert!(last.is_boss_floor, "{}", stage.id);
            assert!(last.exp_bonus > 1.0, "{}", stage.id);
        }
    }

    #[test]
    fn builtin_unlock_table_matches_the_default_skills() {
        let catalog = Catalog::builtin();
        for (level, skill) in [(2, "heal"), (3, "fire_bolt"), (5, "fire_ball"), (7, "fire_storm")]
        {
            assert_eq!(
                catalog.skill_unlocked_at(level),
                Some(&SkillId::from(skill)),
                "level {level}"
            );
            assert!(catalog.skill_template(&SkillId::from(skill)).is_some());
        }
        assert!(catalog.skill_unlocked_at(4).is_none());
    }

    #[test]
    fn builtin_question_pool_includes_bracket_regions() {
        let catalog = Catalog::builtin();
        assert!(catalog.common_questions().len() >= 10);
        assert!(
            catalog
                .common_questions()
                .iter()
                .any(|q| q.answer.contains('<'))
        );
    }

    #[test]
    fn non_common_enemies_carry_their_own_questions() {
        let catalog = Catalog::builtin();
        for stage in catalog.stages() {
            for floor in &stage.floors {
                for set in &floor.monster_sets {
                    for id in &set.enemies {
                        let template = catalog.enemy_template(id).unwrap();
                        if template.question_mode != QuestionMode::Common {
                            assert!(!template.original_questions.is_empty(), "{id}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn validate_reports_unknown_references() {
        let mut catalog = Catalog::new();
        catalog.add_stage(Stage {
            id: StageId::from("broken"),
            name: "Broken".into(),
            floors: vec![Floor {
                monster_sets: vec![MonsterSet {
                    encounter_rate: 0.5,
                    enemies: vec![EnemyTemplateId::from("ghost")],
                }],
                is_boss_floor: false,
                exp_bonus: 1.0,
                required_clears: 1,
            }],
        });
        catalog.add_unlock(2, SkillId::from("missing"));

        let warnings = catalog.validate(&GameConfig::default());
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().any(|w| matches!(
            w,
            CatalogWarning::RateSum { floor_index: 0, .. }
        )));
        assert!(
            warnings
                .iter()
                .any(|w| matches!(w, CatalogWarning::UnknownEnemy { .. }))
        );
        assert!(
            warnings
                .iter()
                .any(|w| matches!(w, CatalogWarning::UnknownUnlockSkill { level: 2, .. }))
        );
    }
}
