//! Question pool loader.

use std::path::Path;

use game_core::Question;

use crate::loaders::{LoadResult, read_file};

/// Loader for question pools from RON files.
pub struct QuestionLoader;

impl QuestionLoader {
    /// Load a question pool from a RON file.
    ///
    /// RON format: Vec<Question>
    pub fn load(path: &Path) -> LoadResult<Vec<Question>> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse question pool RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUESTIONS_RON: &str = r#"[
    (
        id: "q-moon",
        kind: Typing,
        prompt: "The bright circle in the night sky",
        answer: "moon",
        choices: [],
    ),
    (
        id: "q-seaside",
        kind: Typing,
        prompt: "The land right at the edge of the ocean",
        answer: "sea<sid>e",
        choices: [],
    ),
]"#;

    #[test]
    fn loads_questions_with_bracket_regions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.ron");
        std::fs::write(&path, QUESTIONS_RON).unwrap();

        let pool = QuestionLoader::load(&path).unwrap();
        assert_eq!(pool.len(), 2);
        assert!(pool[0].matches("Moon"));
        assert!(pool[1].matches("seaside"));
        assert_eq!(pool[1].hint_mask(0), "___sid_");
    }
}
