use crate::types::LevelNo;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("deck has no levels")]
    EmptyDeck,
    #[error("too many levels")]
    TooManyLevels,
    #[error("level {0} has no options")]
    NoOptions(LevelNo),
    #[error("level {0} has no option equal to its correct answer")]
    UnwinnableLevel(LevelNo),
    #[error("level {0} lists more than one option equal to its correct answer")]
    AmbiguousLevel(LevelNo),
    #[error("level {0} mixes answer kinds")]
    MixedAnswerKinds(LevelNo),
    #[error("pool has no items")]
    EmptyPool,
    #[error("pool declares fewer than two buckets")]
    NotEnoughBuckets,
    #[error("pool buckets are not unique")]
    DuplicateBucket,
    #[error("pool item {0} names an unknown bucket")]
    UnknownHomeBucket(LevelNo),
    #[error("no cues to rotate through")]
    EmptyCueList,
    #[error("round count must be at least one")]
    NoRounds,
    #[error("cue {0} names an unknown action")]
    UnknownCueAction(LevelNo),
    #[error("session already finished, no new moves are accepted")]
    SessionOver,
}

pub type Result<T> = core::result::Result<T, GameError>;
