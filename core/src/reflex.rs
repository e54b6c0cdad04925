use alloc::string::String;
use alloc::vec::Vec;
use core::num::Saturating;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Default milliseconds between stimulus rotations.
pub const DEFAULT_ROTATE_MS: u32 = 1800;

/// One timed stimulus and the action that answers it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    pub display: String,
    pub action: String,
    pub reward: Points,
}

impl Cue {
    pub fn new(display: &str, action: &str, reward: Points) -> Self {
        Self {
            display: String::from(display),
            action: String::from(action),
            reward,
        }
    }
}

/// Configuration for a timed-stimulus game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReflexSpec {
    pub actions: SmallVec<[String; 4]>,
    pub cues: Vec<Cue>,
    pub rounds: LevelNo,
    pub rotate_ms: u32,
}

impl ReflexSpec {
    pub fn new(
        actions: impl IntoIterator<Item = &'static str>,
        cues: Vec<Cue>,
        rounds: LevelNo,
    ) -> Self {
        Self {
            actions: actions.into_iter().map(String::from).collect(),
            cues,
            rounds,
            rotate_ms: DEFAULT_ROTATE_MS,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.cues.is_empty() {
            return Err(GameError::EmptyCueList);
        }
        if self.cues.len() > usize::from(LevelNo::MAX) {
            return Err(GameError::TooManyLevels);
        }
        if self.rounds == 0 {
            return Err(GameError::NoRounds);
        }

        for (index, cue) in self.cues.iter().enumerate() {
            if !self.actions.iter().any(|action| action == &cue.action) {
                return Err(GameError::UnknownCueAction(index as LevelNo));
            }
        }

        Ok(())
    }

    /// Upper bound on the achievable score: every round hitting the most
    /// rewarding cue.
    pub fn max_score(&self) -> Points {
        let best = self.cues.iter().map(|cue| cue.reward).max().unwrap_or(0);
        best.saturating_mul(Points::from(self.rounds))
    }
}

/// Outcome of one repeating-timer fire.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RotateOutcome {
    Rotated,
    Stopped,
}

/// Outcome of one learner reaction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ReactOutcome {
    Hit,
    Miss,
    Ignored,
}

impl ReactOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Hit | Self::Miss => true,
            Self::Ignored => false,
        }
    }
}

/// Timed-stimulus variant of the progression engine: a repeating host timer
/// rotates the visible cue and the learner's action is judged against the
/// cue visible at the moment of the click.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReflexEngine {
    spec: ReflexSpec,
    cue_index: LevelNo,
    rounds_played: LevelNo,
    score: Saturating<Points>,
    awarded: Points,
    feedback: Option<FeedbackKind>,
    complete: bool,
    rotation: TimerSlot,
    celebration: TimerSlot,
}

impl ReflexEngine {
    pub fn new(spec: ReflexSpec) -> Result<Self> {
        spec.validate()?;

        let mut engine = Self {
            spec,
            cue_index: 0,
            rounds_played: 0,
            score: Saturating(0),
            awarded: 0,
            feedback: None,
            complete: false,
            rotation: TimerSlot::default(),
            celebration: TimerSlot::default(),
        };
        engine.rotation.arm();
        Ok(engine)
    }

    pub fn score(&self) -> Points {
        self.score.0
    }

    pub fn max_score(&self) -> Points {
        self.spec.max_score()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn feedback(&self) -> Option<FeedbackKind> {
        self.feedback
    }

    pub fn awarded_points(&self) -> Points {
        self.awarded
    }

    pub fn actions(&self) -> &[String] {
        &self.spec.actions
    }

    pub fn rotate_ms(&self) -> u32 {
        self.spec.rotate_ms
    }

    pub fn rounds(&self) -> LevelNo {
        self.spec.rounds
    }

    pub fn rounds_played(&self) -> LevelNo {
        self.rounds_played
    }

    /// 1-based number of the round currently shown.
    pub fn round_number(&self) -> LevelNo {
        if self.complete {
            self.spec.rounds
        } else {
            self.rounds_played + 1
        }
    }

    pub fn current_cue(&self) -> &Cue {
        &self.spec.cues[usize::from(self.cue_index)]
    }

    /// Token the host's repeating timer must present on every fire.
    pub fn rotation(&self) -> Option<TimerToken> {
        self.rotation.token()
    }

    pub fn celebrating(&self) -> bool {
        self.celebration.is_armed()
    }

    pub fn celebration(&self) -> Option<TimerToken> {
        self.celebration.token()
    }

    pub fn clear_celebration(&mut self, token: TimerToken) -> bool {
        self.celebration.accept(token)
    }

    /// Steps the visible cue. Returns `Stopped` once the session is over or
    /// the token is stale, telling the host to tear its interval down.
    pub fn rotate(&mut self, token: TimerToken) -> RotateOutcome {
        if self.complete || !self.rotation.matches(token) {
            return RotateOutcome::Stopped;
        }

        self.cue_index = (self.cue_index + 1) % clamp_level(self.spec.cues.len());
        RotateOutcome::Rotated
    }

    /// Judges `action` against the cue visible right now. Sampling and
    /// evaluation happen in one step, so a rotation can never slip between
    /// them.
    pub fn react(&mut self, action: &str) -> Result<ReactOutcome> {
        if self.complete {
            return Err(GameError::SessionOver);
        }

        let cue = self.current_cue();
        let hit = cue.action == action;
        let reward = cue.reward;

        let outcome = if hit {
            self.awarded = reward;
            self.score += reward;
            self.feedback = Some(FeedbackKind::Correct);
            self.celebration.arm();
            ReactOutcome::Hit
        } else {
            self.awarded = 0;
            self.feedback = Some(FeedbackKind::Wrong);
            ReactOutcome::Miss
        };

        self.rounds_played += 1;
        if self.rounds_played >= self.spec.rounds {
            self.complete = true;
            self.rotation.cancel();
            log::debug!("reflex rounds exhausted with score {}", self.score.0);
        }

        Ok(outcome)
    }

    /// Full reset; hands out a fresh rotation token so the old interval
    /// goes inert.
    pub fn restart(&mut self) {
        self.cue_index = 0;
        self.rounds_played = 0;
        self.score = Saturating(0);
        self.awarded = 0;
        self.feedback = None;
        self.complete = false;
        self.celebration.cancel();
        self.rotation.arm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn spec() -> ReflexSpec {
        ReflexSpec::new(
            ["stop", "wait", "go"],
            vec![
                Cue::new("🔴 Red light", "stop", 5),
                Cue::new("🟡 Yellow light", "wait", 5),
                Cue::new("🟢 Green light", "go", 5),
            ],
            5,
        )
    }

    #[test]
    fn reaction_is_judged_against_the_cue_at_click_time() {
        let mut engine = ReflexEngine::new(spec()).unwrap();
        let token = engine.rotation().unwrap();

        assert_eq!(engine.rotate(token), RotateOutcome::Rotated);
        assert_eq!(engine.current_cue().action, "wait");

        let outcome = engine.react("wait").unwrap();

        assert_eq!(outcome, ReactOutcome::Hit);
        assert_eq!(engine.score(), 5);
    }

    #[test]
    fn rotation_after_a_reaction_does_not_change_the_judgement() {
        let mut engine = ReflexEngine::new(spec()).unwrap();
        let token = engine.rotation().unwrap();

        engine.react("stop").unwrap();
        let score = engine.score();
        engine.rotate(token);

        assert_eq!(engine.score(), score);
        assert_eq!(engine.feedback(), Some(FeedbackKind::Correct));
    }

    #[test]
    fn miss_counts_the_round_but_not_the_score() {
        let mut engine = ReflexEngine::new(spec()).unwrap();

        let outcome = engine.react("go").unwrap();

        assert_eq!(outcome, ReactOutcome::Miss);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.rounds_played(), 1);
        assert_eq!(engine.feedback(), Some(FeedbackKind::Wrong));
    }

    #[test]
    fn final_round_completes_and_stops_the_rotation() {
        let mut engine = ReflexEngine::new(spec()).unwrap();
        let token = engine.rotation().unwrap();

        for _ in 0..5 {
            engine.react("stop").unwrap();
        }

        assert!(engine.is_complete());
        assert_eq!(engine.rotate(token), RotateOutcome::Stopped);
        assert_eq!(engine.react("stop"), Err(GameError::SessionOver));
    }

    #[test]
    fn rotation_wraps_around_the_cue_list() {
        let mut engine = ReflexEngine::new(spec()).unwrap();
        let token = engine.rotation().unwrap();

        for _ in 0..3 {
            engine.rotate(token);
        }

        assert_eq!(engine.current_cue().action, "stop");
    }

    #[test]
    fn stale_rotation_token_after_restart_is_rejected() {
        let mut engine = ReflexEngine::new(spec()).unwrap();
        let old = engine.rotation().unwrap();

        engine.react("stop").unwrap();
        engine.restart();

        assert_eq!(engine.rotate(old), RotateOutcome::Stopped);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.current_cue().action, "stop");

        let fresh = engine.rotation().unwrap();
        assert_eq!(engine.rotate(fresh), RotateOutcome::Rotated);
    }

    #[test]
    fn cue_with_unknown_action_is_rejected_at_load_time() {
        let bad = ReflexSpec::new(
            ["stop", "go"],
            vec![Cue::new("🟣 Purple light", "dance", 5)],
            3,
        );

        assert_eq!(
            ReflexEngine::new(bad).unwrap_err(),
            GameError::UnknownCueAction(0)
        );
    }

    #[test]
    fn zero_rounds_are_rejected_at_load_time() {
        let mut bad = spec();
        bad.rounds = 0;

        assert_eq!(ReflexEngine::new(bad).unwrap_err(), GameError::NoRounds);
    }
}
