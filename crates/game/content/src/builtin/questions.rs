//! The shared question pool.
//!
//! Every enemy whose question mode allows the common pool draws from this
//! list. Answers with `<...>` regions keep those characters visible in the
//! hint display from the start.

use game_core::{Question, QuestionKind};

pub(crate) fn common_questions() -> Vec<Question> {
    vec![
        Question::new(
            "common-apple",
            "A crisp fruit said to keep the doctor away",
            "apple",
        ),
        Question::new("common-river", "A wide natural stream flowing to the sea", "river"),
        Question::new(
            "common-bridge",
            "A structure that carries a road across a gap",
            "bridge",
        ),
        Question::new("common-candle", "A stick of wax burned for light", "candle"),
        Question::new(
            "common-ice-cream",
            "A frozen sweet licked from a cone",
            "i<ce cre>am",
        ),
        Question::new("common-mountain", "Land so high its peak may hold snow", "mountain"),
        Question::new(
            "common-library",
            "A quiet building full of borrowed books",
            "library",
        ),
        Question::new("common-thunder", "The rumble that follows lightning", "thunder"),
        Question::new("common-harvest", "The gathering of ripe crops", "harvest"),
        Question::new(
            "common-lantern",
            "A carried case that shelters a flame",
            "lantern",
        ),
        Question::new("common-whisper", "To speak too softly to overhear", "whisper"),
        Question::new(
            "common-butterfly",
            "An insect with wide painted wings",
            "butter<fl>y",
        ),
        choice(
            "common-autumn",
            "The season after summer",
            "autumn",
            &["spring", "summer", "autumn", "winter"],
        ),
    ]
}

fn choice(id: &str, prompt: &str, answer: &str, choices: &[&str]) -> Question {
    Question {
        id: id.into(),
        kind: QuestionKind::MultipleChoice,
        prompt: prompt.into(),
        answer: answer.into(),
        choices: choices.iter().map(|c| (*c).to_owned()).collect(),
    }
}
