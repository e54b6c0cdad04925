#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub use answer::*;
pub use asset::*;
pub use catalog::*;
pub use engine::*;
pub use error::*;
pub use pool::*;
pub use reflex::*;
pub use session::*;
pub use timer::*;
pub use types::*;

mod answer;
mod asset;
mod catalog;
mod engine;
mod error;
mod pool;
mod reflex;
mod session;
mod timer;
mod types;

/// Content pillar a game belongs to, used by hosts for progress grouping
/// and reward routing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pillar {
    Ai,
    Brain,
    Crgc,
    Dcos,
    Ehe,
    Finance,
    HealthFemale,
    HealthMale,
    Moral,
    Sustainability,
    Uvls,
}

impl Pillar {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ai => "ai",
            Self::Brain => "brain",
            Self::Crgc => "crgc",
            Self::Dcos => "dcos",
            Self::Ehe => "ehe",
            Self::Finance => "finance",
            Self::HealthFemale => "health-female",
            Self::HealthMale => "health-male",
            Self::Moral => "moral",
            Self::Sustainability => "sustainability",
            Self::Uvls => "uvls",
        }
    }
}

/// Host-facing identity of one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameInfo {
    pub id: String,
    pub pillar: Pillar,
    pub title: String,
    pub subtitle: String,
}

impl GameInfo {
    pub fn new(id: &str, pillar: Pillar, title: &str, subtitle: &str) -> Self {
        Self {
            id: String::from(id),
            pillar,
            title: String::from(title),
            subtitle: String::from(subtitle),
        }
    }
}

/// Option storage for one level; games show 2-4 options per level.
pub type OptionList = SmallVec<[Answer; 4]>;

/// One unit of content: a prompt, its options in display order, the single
/// correct answer, and the points awarded for matching it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub prompt: String,
    pub options: OptionList,
    pub correct: Answer,
    pub reward: Points,
}

impl Level {
    pub fn new(
        prompt: &str,
        options: impl IntoIterator<Item = Answer>,
        correct: Answer,
        reward: Points,
    ) -> Self {
        Self {
            prompt: String::from(prompt),
            options: options.into_iter().collect(),
            correct,
            reward,
        }
    }

    fn validate(&self, index: LevelNo) -> Result<()> {
        if self.options.is_empty() {
            return Err(GameError::NoOptions(index));
        }

        if self
            .options
            .iter()
            .any(|option| option.kind() != self.correct.kind())
        {
            return Err(GameError::MixedAnswerKinds(index));
        }

        match self
            .options
            .iter()
            .filter(|&option| *option == self.correct)
            .count()
        {
            0 => Err(GameError::UnwinnableLevel(index)),
            1 => Ok(()),
            _ => Err(GameError::AmbiguousLevel(index)),
        }
    }
}

/// Validated, fixed, ordered sequence of levels for one play-through.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Level>", into = "Vec<Level>")]
pub struct LevelDeck {
    levels: Vec<Level>,
}

impl LevelDeck {
    /// Validates eagerly so an unwinnable or ambiguous level is a
    /// developer-facing configuration error instead of a stuck session.
    pub fn from_levels(levels: Vec<Level>) -> Result<Self> {
        if levels.is_empty() {
            return Err(GameError::EmptyDeck);
        }
        if levels.len() > usize::from(LevelNo::MAX) {
            return Err(GameError::TooManyLevels);
        }

        for (index, level) in levels.iter().enumerate() {
            level.validate(index as LevelNo)?;
        }

        Ok(Self { levels })
    }

    /// Parses a JSON array of levels, validating after parse.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn len(&self) -> LevelNo {
        clamp_level(self.levels.len())
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level(&self, index: LevelNo) -> Option<&Level> {
        self.levels.get(usize::from(index))
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn max_score(&self) -> Points {
        self.levels
            .iter()
            .fold(0, |total, level| total.saturating_add(level.reward))
    }
}

impl TryFrom<Vec<Level>> for LevelDeck {
    type Error = GameError;

    fn try_from(levels: Vec<Level>) -> Result<Self> {
        Self::from_levels(levels)
    }
}

impl From<LevelDeck> for Vec<Level> {
    fn from(deck: LevelDeck) -> Self {
        deck.levels
    }
}

/// Result of submitting an answer for the current level.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    Correct,
    Wrong,
    Ignored,
}

impl SubmitOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Correct | Self::Wrong => true,
            Self::Ignored => false,
        }
    }
}

/// Result of advancing past an answered level.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AdvanceOutcome {
    Next,
    Finished,
    NoChange,
}

impl AdvanceOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Next | Self::Finished => true,
            Self::NoChange => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn level(correct: &str, options: &[&str]) -> Level {
        Level::new(
            "pick one",
            options.iter().map(|text| Answer::text(text)),
            Answer::text(correct),
            5,
        )
    }

    #[test]
    fn deck_accepts_well_formed_levels() {
        let deck = LevelDeck::from_levels(vec![
            level("a", &["a", "b"]),
            level("c", &["b", "c", "d"]),
        ])
        .unwrap();

        assert_eq!(deck.len(), 2);
        assert_eq!(deck.max_score(), 10);
    }

    #[test]
    fn empty_deck_is_rejected() {
        assert_eq!(LevelDeck::from_levels(vec![]), Err(GameError::EmptyDeck));
    }

    #[test]
    fn unwinnable_level_is_rejected_at_load_time() {
        let result = LevelDeck::from_levels(vec![level("a", &["a", "b"]), level("x", &["a", "b"])]);

        assert_eq!(result, Err(GameError::UnwinnableLevel(1)));
    }

    #[test]
    fn duplicate_correct_option_is_rejected_not_first_matched() {
        let result = LevelDeck::from_levels(vec![level("a", &["a", "a", "b"])]);

        assert_eq!(result, Err(GameError::AmbiguousLevel(0)));
    }

    #[test]
    fn mixed_answer_kinds_are_rejected() {
        let mixed = Level::new(
            "true or false?",
            [Answer::flag(true), Answer::text("false")],
            Answer::flag(true),
            5,
        );

        assert_eq!(
            LevelDeck::from_levels(vec![mixed]),
            Err(GameError::MixedAnswerKinds(0))
        );
    }

    #[test]
    fn json_deck_is_validated_after_parse() {
        let good = r#"[{"prompt":"?","options":[{"Text":"a"},{"Text":"b"}],"correct":{"Text":"a"},"reward":5}]"#;
        let bad = r#"[{"prompt":"?","options":[{"Text":"a"},{"Text":"b"}],"correct":{"Text":"x"},"reward":5}]"#;

        assert_eq!(LevelDeck::from_json(good).unwrap().len(), 1);
        assert!(LevelDeck::from_json(bad).is_err());
    }
}
