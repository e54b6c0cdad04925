use alloc::string::String;
use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

/// Milliseconds the celebration signal stays up before the host-scheduled
/// callback clears it.
pub const CELEBRATION_MS: u32 = 1000;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum QuizState {
    Loading,
    Answering,
    Locked,
    Complete,
}

impl QuizState {
    pub const fn accepts_input(self) -> bool {
        matches!(self, Self::Answering)
    }

    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl Default for QuizState {
    fn default() -> Self {
        Self::Answering
    }
}

/// Outcome of comparing a selection against the correct answer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackKind {
    Correct,
    Wrong,
}

/// Single-selection progression engine: one pick locks the level, feedback
/// enables the advance control, the last advance completes the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizEngine {
    deck: LevelDeck,
    asset: Option<ImageAsset>,
    current: LevelNo,
    score: Saturating<Points>,
    selection: Option<Answer>,
    feedback: Option<FeedbackKind>,
    awarded: Points,
    state: QuizState,
    celebration: TimerSlot,
}

impl QuizEngine {
    pub fn new(deck: LevelDeck) -> Self {
        Self {
            deck,
            asset: None,
            current: 0,
            score: Saturating(0),
            selection: None,
            feedback: None,
            awarded: 0,
            state: QuizState::Answering,
            celebration: TimerSlot::default(),
        }
    }

    /// Quiz that waits for a host-fetched image before accepting input.
    pub fn with_remote_image(deck: LevelDeck, image: RemoteImage) -> Self {
        let mut engine = Self::new(deck);
        engine.asset = Some(ImageAsset::Pending(image));
        engine.state = QuizState::Loading;
        engine
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn score(&self) -> Points {
        self.score.0
    }

    pub fn max_score(&self) -> Points {
        self.deck.max_score()
    }

    /// 1-based number of the level currently shown.
    pub fn level_number(&self) -> LevelNo {
        self.current + 1
    }

    pub fn level_count(&self) -> LevelNo {
        self.deck.len()
    }

    pub fn current_level(&self) -> &Level {
        &self.deck.levels()[usize::from(self.current)]
    }

    pub fn selection(&self) -> Option<&Answer> {
        self.selection.as_ref()
    }

    pub fn feedback(&self) -> Option<FeedbackKind> {
        self.feedback
    }

    /// Correct answer of the current level, shown alongside wrong-answer
    /// feedback.
    pub fn correct_answer(&self) -> &Answer {
        &self.current_level().correct
    }

    /// Points the current level contributed to the score so far.
    pub fn awarded_points(&self) -> Points {
        self.awarded
    }

    pub fn can_advance(&self) -> bool {
        self.feedback.is_some() && !self.state.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn celebrating(&self) -> bool {
        self.celebration.is_armed()
    }

    /// Token for the pending celebration-clear callback, if any.
    pub fn celebration(&self) -> Option<TimerToken> {
        self.celebration.token()
    }

    /// URL of the stimulus image, once loaded.
    pub fn image_url(&self) -> Option<&str> {
        self.asset.as_ref().and_then(ImageAsset::url)
    }

    /// Applies the host's image fetch result and opens the first level.
    pub fn resolve_asset(&mut self, fetched: Option<String>) {
        let Some(asset) = &mut self.asset else {
            return;
        };
        if !asset.is_pending() {
            return;
        }

        asset.resolve(fetched);
        if matches!(self.state, QuizState::Loading) {
            self.state = QuizState::Answering;
        }
    }

    /// Records the selection and judges it against the current level.
    ///
    /// A second submission while locked is dropped, as is input while the
    /// stimulus is still loading. A choice outside the level's options is
    /// just a wrong answer.
    pub fn submit_answer(&mut self, choice: Answer) -> Result<SubmitOutcome> {
        self.check_not_complete()?;

        if !self.state.accepts_input() {
            return Ok(SubmitOutcome::Ignored);
        }

        let level = self.current_level();
        let hit = choice == level.correct;
        let reward = level.reward;

        self.selection = Some(choice);
        self.state = QuizState::Locked;

        if hit {
            self.awarded = reward;
            self.score += reward;
            self.feedback = Some(FeedbackKind::Correct);
            self.celebration.arm();
            Ok(SubmitOutcome::Correct)
        } else {
            self.awarded = 0;
            self.feedback = Some(FeedbackKind::Wrong);
            Ok(SubmitOutcome::Wrong)
        }
    }

    /// Clears the celebration signal; stale tokens are rejected.
    pub fn clear_celebration(&mut self, token: TimerToken) -> bool {
        self.celebration.accept(token)
    }

    /// Steps to the next level, or completes the session after the last
    /// one. Without a recorded selection this is a no-op.
    pub fn advance(&mut self) -> Result<AdvanceOutcome> {
        self.check_not_complete()?;

        if !matches!(self.state, QuizState::Locked) {
            return Ok(AdvanceOutcome::NoChange);
        }

        // a pending celebration callback must never touch the next level
        self.celebration.cancel();

        if usize::from(self.current) + 1 < self.deck.levels().len() {
            self.current += 1;
            self.selection = None;
            self.feedback = None;
            self.awarded = 0;
            self.state = QuizState::Answering;
            Ok(AdvanceOutcome::Next)
        } else {
            self.state = QuizState::Complete;
            log::debug!("quiz complete with score {}", self.score.0);
            Ok(AdvanceOutcome::Finished)
        }
    }

    /// Full reset to initial values, including the score.
    pub fn restart(&mut self) {
        self.current = 0;
        self.score = Saturating(0);
        self.selection = None;
        self.feedback = None;
        self.awarded = 0;
        self.celebration.cancel();
        self.state = if self.asset.as_ref().is_some_and(ImageAsset::is_pending) {
            QuizState::Loading
        } else {
            QuizState::Answering
        };
    }

    fn check_not_complete(&self) -> Result<()> {
        if self.state.is_complete() {
            Err(GameError::SessionOver)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck() -> LevelDeck {
        let levels = (0..5)
            .map(|i| {
                Level::new(
                    "which one?",
                    [Answer::text("right"), Answer::text("wrong")],
                    Answer::text("right"),
                    5 * (i + 1),
                )
            })
            .collect();
        LevelDeck::from_levels(levels).unwrap()
    }

    fn flat_deck() -> LevelDeck {
        let levels = (0..5)
            .map(|_| {
                Level::new(
                    "which one?",
                    [Answer::text("right"), Answer::text("wrong")],
                    Answer::text("right"),
                    5,
                )
            })
            .collect();
        LevelDeck::from_levels(levels).unwrap()
    }

    #[test]
    fn correct_answer_awards_reward_and_sets_feedback() {
        let mut engine = QuizEngine::new(deck());

        let outcome = engine.submit_answer(Answer::text("right")).unwrap();

        assert_eq!(outcome, SubmitOutcome::Correct);
        assert_eq!(engine.score(), 5);
        assert_eq!(engine.feedback(), Some(FeedbackKind::Correct));
        assert!(engine.celebrating());
        assert!(engine.can_advance());
    }

    #[test]
    fn wrong_answer_leaves_score_and_reports_the_correct_value() {
        let mut engine = QuizEngine::new(deck());

        let outcome = engine.submit_answer(Answer::text("wrong")).unwrap();

        assert_eq!(outcome, SubmitOutcome::Wrong);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.feedback(), Some(FeedbackKind::Wrong));
        assert_eq!(engine.correct_answer(), &Answer::text("right"));
        assert!(engine.can_advance());
    }

    #[test]
    fn choice_outside_the_options_is_a_wrong_answer_not_an_error() {
        let mut engine = QuizEngine::new(deck());

        let outcome = engine.submit_answer(Answer::text("banana")).unwrap();

        assert_eq!(outcome, SubmitOutcome::Wrong);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn second_submission_is_ignored_until_advance() {
        let mut engine = QuizEngine::new(deck());

        engine.submit_answer(Answer::text("wrong")).unwrap();
        let second = engine.submit_answer(Answer::text("right")).unwrap();

        assert_eq!(second, SubmitOutcome::Ignored);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.selection(), Some(&Answer::text("wrong")));
    }

    #[test]
    fn advance_without_a_selection_is_a_no_op() {
        let mut engine = QuizEngine::new(deck());

        let outcome = engine.advance().unwrap();

        assert_eq!(outcome, AdvanceOutcome::NoChange);
        assert_eq!(engine.level_number(), 1);
        assert_eq!(engine.state(), QuizState::Answering);
    }

    #[test]
    fn all_correct_run_scores_the_deck_maximum() {
        let mut engine = QuizEngine::new(deck());

        for _ in 0..4 {
            engine.submit_answer(Answer::text("right")).unwrap();
            assert_eq!(engine.advance().unwrap(), AdvanceOutcome::Next);
        }
        engine.submit_answer(Answer::text("right")).unwrap();
        assert_eq!(engine.advance().unwrap(), AdvanceOutcome::Finished);

        assert!(engine.is_complete());
        assert_eq!(engine.score(), engine.max_score());
    }

    #[test]
    fn one_miss_out_of_five_scores_twenty() {
        let mut engine = QuizEngine::new(flat_deck());

        for level in 0..5 {
            let choice = if level == 1 { "wrong" } else { "right" };
            engine.submit_answer(Answer::text(choice)).unwrap();
            engine.advance().unwrap();
        }

        assert_eq!(engine.score(), 20);
        assert!(engine.is_complete());
    }

    #[test]
    fn completion_freezes_the_score() {
        let mut engine = QuizEngine::new(deck());

        for _ in 0..5 {
            engine.submit_answer(Answer::text("right")).unwrap();
            engine.advance().unwrap();
        }
        let frozen = engine.score();

        assert_eq!(
            engine.submit_answer(Answer::text("right")),
            Err(GameError::SessionOver)
        );
        assert_eq!(engine.advance(), Err(GameError::SessionOver));
        assert_eq!(engine.score(), frozen);
    }

    #[test]
    fn stale_celebration_token_is_rejected_after_advance() {
        let mut engine = QuizEngine::new(deck());

        engine.submit_answer(Answer::text("right")).unwrap();
        let token = engine.celebration().unwrap();
        engine.advance().unwrap();

        assert!(!engine.clear_celebration(token));
        assert!(!engine.celebrating());
    }

    #[test]
    fn celebration_clears_with_the_current_token() {
        let mut engine = QuizEngine::new(deck());

        engine.submit_answer(Answer::text("right")).unwrap();
        let token = engine.celebration().unwrap();

        assert!(engine.clear_celebration(token));
        assert!(!engine.celebrating());
        assert!(engine.can_advance());
    }

    #[test]
    fn loading_gates_input_until_the_asset_resolves() {
        let image = RemoteImage::new("https://example.test/dog.jpg", "assets/dog.jpg");
        let mut engine = QuizEngine::with_remote_image(deck(), image);

        assert_eq!(engine.state(), QuizState::Loading);
        assert_eq!(
            engine.submit_answer(Answer::text("right")).unwrap(),
            SubmitOutcome::Ignored
        );

        engine.resolve_asset(None);

        assert_eq!(engine.state(), QuizState::Answering);
        assert_eq!(engine.image_url(), Some("assets/dog.jpg"));
        assert_eq!(
            engine.submit_answer(Answer::text("right")).unwrap(),
            SubmitOutcome::Correct
        );
    }

    #[test]
    fn restart_resets_score_cursor_and_lock() {
        let mut engine = QuizEngine::new(deck());

        engine.submit_answer(Answer::text("right")).unwrap();
        engine.advance().unwrap();
        engine.submit_answer(Answer::text("right")).unwrap();

        engine.restart();

        assert_eq!(engine.score(), 0);
        assert_eq!(engine.level_number(), 1);
        assert_eq!(engine.state(), QuizState::Answering);
        assert_eq!(engine.selection(), None);
        assert!(!engine.celebrating());
    }
}
