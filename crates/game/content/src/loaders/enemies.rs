//! Enemy template loader.

use std::path::Path;

use game_core::EnemyTemplate;

use crate::loaders::{LoadResult, read_file};

/// Loader for enemy templates from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    /// Load enemy templates from a RON file.
    ///
    /// RON format: Vec<EnemyTemplate>
    pub fn load(path: &Path) -> LoadResult<Vec<EnemyTemplate>> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy template RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{EnemyTemplateId, QuestionMode, SpecialEffect};

    const ENEMIES_RON: &str = r#"[
    (
        id: "field_mouse",
        name: "Field Mouse",
        level: 1,
        max_hp: 10,
        attack_power: 3,
        defense: 1,
        exp: 5,
        speed: 4,
        luck: 2,
        word: "mouse",
        visual: (
            image: "enemies/field_mouse.png",
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 0.8,
        ),
        question_mode: Common,
        original_questions: [],
        special_attacks: [
            (
                name: "Nip",
                probability: 0.1,
                effect: Drain(power: 3, recovery: 2),
                message: "The mouse nips at your ankle!",
            ),
        ],
    ),
]"#;

    #[test]
    fn loads_templates_with_specials() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("enemies.ron");
        std::fs::write(&path, ENEMIES_RON).unwrap();

        let templates = EnemyLoader::load(&path).unwrap();
        assert_eq!(templates.len(), 1);
        let mouse = &templates[0];
        assert_eq!(mouse.id, EnemyTemplateId::from("field_mouse"));
        assert_eq!(mouse.question_mode, QuestionMode::Common);
        assert_eq!(mouse.special_attacks.len(), 1);
        assert_eq!(
            mouse.special_attacks[0].effect,
            SpecialEffect::Drain {
                power: 3,
                recovery: 2
            }
        );
    }
}
