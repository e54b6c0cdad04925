use alloc::string::String;
use serde::{Deserialize, Serialize};

/// One selectable answer value. Each game declares a single kind so that
/// comparisons stay exact instead of relying on loose runtime equality.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    Text(String),
    Flag(bool),
    Emoji(String),
}

impl Answer {
    pub fn text(value: &str) -> Self {
        Self::Text(String::from(value))
    }

    pub const fn flag(value: bool) -> Self {
        Self::Flag(value)
    }

    pub fn emoji(value: &str) -> Self {
        Self::Emoji(String::from(value))
    }

    pub const fn kind(&self) -> AnswerKind {
        match self {
            Self::Text(_) => AnswerKind::Text,
            Self::Flag(_) => AnswerKind::Flag,
            Self::Emoji(_) => AnswerKind::Emoji,
        }
    }
}

/// Kind tag used to keep the options of a level homogeneous.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerKind {
    Text,
    Flag,
    Emoji,
}
