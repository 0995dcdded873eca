//! Vocabulary questions and the hint disclosure rules.
//!
//! Answers may embed `<...>` regions that are always visible in the hint
//! display (e.g. `"i<ce cre>am"`). The marker characters are never part of
//! the expected input; correctness compares against the answer with markers
//! stripped, trimmed, and case-folded.

/// Input style of a question.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuestionKind {
    /// Free-typed answer.
    #[default]
    Typing,
    /// Answer picked from `choices`.
    MultipleChoice,
}

/// A single vocabulary question.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Question {
    pub id: String,
    pub kind: QuestionKind,
    pub prompt: String,
    /// Expected answer, possibly containing `<...>` always-revealed regions.
    pub answer: String,
    /// Candidate answers for [`QuestionKind::MultipleChoice`]; empty otherwise.
    pub choices: Vec<String>,
}

impl Question {
    pub fn new(
        id: impl Into<String>,
        prompt: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: QuestionKind::Typing,
            prompt: prompt.into(),
            answer: answer.into(),
            choices: Vec::new(),
        }
    }

    /// Answer with the `<`/`>` markers removed.
    pub fn stripped_answer(&self) -> String {
        self.answer.chars().filter(|c| *c != '<' && *c != '>').collect()
    }

    /// Canonical form used for correctness comparison.
    pub fn normalized_answer(&self) -> String {
        self.stripped_answer().trim().to_lowercase()
    }

    /// Checks a player's input against the answer (trimmed, case-folded).
    pub fn matches(&self, input: &str) -> bool {
        input.trim().to_lowercase() == self.normalized_answer()
    }

    /// Number of hint slots: every non-space character of the stripped answer.
    ///
    /// The always-revealed region counts toward this total, so a fully
    /// bracketed answer still has a nonzero slot count.
    pub fn max_hints(&self) -> u32 {
        self.stripped_answer().chars().filter(|c| !c.is_whitespace()).count() as u32
    }

    /// Number of characters wrong attempts can actually uncover.
    pub fn hidden_count(&self) -> u32 {
        self.mask_chars()
            .into_iter()
            .filter(|(c, always)| !always && !c.is_whitespace())
            .count() as u32
    }

    /// Hint display after `revealed` wrong attempts.
    ///
    /// Bracketed regions are always visible; the first `revealed` hidden
    /// characters (left to right) are uncovered; everything else renders as
    /// `_`. Spaces are preserved as-is.
    pub fn hint_mask(&self, revealed: u32) -> String {
        let mut budget = revealed;
        let mut out = String::with_capacity(self.answer.len());
        for (c, always) in self.mask_chars() {
            if c.is_whitespace() {
                out.push(c);
            } else if always {
                out.push(c);
            } else if budget > 0 {
                budget -= 1;
                out.push(c);
            } else {
                out.push('_');
            }
        }
        out
    }

    /// Whether `revealed` wrong attempts already uncover every hidden slot.
    pub fn is_exhausted_by(&self, revealed: u32) -> bool {
        revealed >= self.hidden_count()
    }

    /// Characters of the stripped answer paired with the always-revealed flag.
    fn mask_chars(&self) -> Vec<(char, bool)> {
        let mut in_region = false;
        let mut out = Vec::with_capacity(self.answer.len());
        for c in self.answer.chars() {
            match c {
                '<' => in_region = true,
                '>' => in_region = false,
                _ => out.push((c, in_region)),
            }
        }
        out
    }
}
