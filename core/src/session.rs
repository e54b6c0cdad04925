use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Declarative configuration for one game: identity plus the content for
/// whichever interaction mode it runs. One runner, many configurations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameDefinition {
    pub info: GameInfo,
    pub mode: ModeSpec,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ModeSpec {
    Quiz {
        deck: LevelDeck,
        image: Option<RemoteImage>,
    },
    Sort {
        spec: SortSpec,
    },
    Reflex {
        spec: ReflexSpec,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
enum ModeEngine {
    Quiz(QuizEngine),
    Sort(SortEngine),
    Reflex(ReflexEngine),
}

/// Everything the host chrome needs, recomputed after any transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShellView {
    pub game_id: String,
    pub pillar: Pillar,
    pub title: String,
    pub subtitle: String,
    pub score: Points,
    pub level_number: LevelNo,
    pub total_levels: LevelNo,
    pub can_advance: bool,
    pub complete: bool,
    pub celebrating: bool,
}

/// Notification that one level finished, for the host's rewards
/// integration. Fire-and-forget; nothing is consumed in return.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelReport {
    pub game_id: String,
    pub level_number: LevelNo,
    pub level_score: Points,
    pub max_level_score: Points,
}

/// Notification that the whole session finished. Emitted exactly once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub game_id: String,
    pub game_type: Pillar,
    pub score: Points,
    pub max_score: Points,
    pub levels_completed: LevelNo,
    pub total_levels: LevelNo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Report {
    Level(LevelReport),
    Session(SessionReport),
}

/// One running play-through of a configured game, from first level to
/// completion or abandonment. Owns the engine, derives the shell view and
/// queues reward reports for the host to drain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    info: GameInfo,
    engine: ModeEngine,
    reports: Vec<Report>,
    session_reported: bool,
}

impl GameSession {
    /// `seed` drives presentation shuffling where the mode uses it.
    pub fn start(definition: GameDefinition, seed: u64) -> Result<Self> {
        let engine = match definition.mode {
            ModeSpec::Quiz { deck, image: None } => ModeEngine::Quiz(QuizEngine::new(deck)),
            ModeSpec::Quiz {
                deck,
                image: Some(image),
            } => ModeEngine::Quiz(QuizEngine::with_remote_image(deck, image)),
            ModeSpec::Sort { spec } => ModeEngine::Sort(SortEngine::new(spec, seed)?),
            ModeSpec::Reflex { spec } => ModeEngine::Reflex(ReflexEngine::new(spec)?),
        };

        Ok(Self {
            info: definition.info,
            engine,
            reports: Vec::new(),
            session_reported: false,
        })
    }

    pub fn info(&self) -> &GameInfo {
        &self.info
    }

    pub fn as_quiz(&self) -> Option<&QuizEngine> {
        match &self.engine {
            ModeEngine::Quiz(engine) => Some(engine),
            _ => None,
        }
    }

    pub fn as_sort(&self) -> Option<&SortEngine> {
        match &self.engine {
            ModeEngine::Sort(engine) => Some(engine),
            _ => None,
        }
    }

    pub fn as_reflex(&self) -> Option<&ReflexEngine> {
        match &self.engine {
            ModeEngine::Reflex(engine) => Some(engine),
            _ => None,
        }
    }

    pub fn score(&self) -> Points {
        match &self.engine {
            ModeEngine::Quiz(engine) => engine.score(),
            ModeEngine::Sort(engine) => engine.score(),
            ModeEngine::Reflex(engine) => engine.score(),
        }
    }

    pub fn max_score(&self) -> Points {
        match &self.engine {
            ModeEngine::Quiz(engine) => engine.max_score(),
            ModeEngine::Sort(engine) => engine.max_score(),
            ModeEngine::Reflex(engine) => engine.max_score(),
        }
    }

    pub fn is_complete(&self) -> bool {
        match &self.engine {
            ModeEngine::Quiz(engine) => engine.is_complete(),
            ModeEngine::Sort(engine) => engine.is_complete(),
            ModeEngine::Reflex(engine) => engine.is_complete(),
        }
    }

    pub fn celebration(&self) -> Option<TimerToken> {
        match &self.engine {
            ModeEngine::Quiz(engine) => engine.celebration(),
            ModeEngine::Sort(engine) => engine.celebration(),
            ModeEngine::Reflex(engine) => engine.celebration(),
        }
    }

    pub fn clear_celebration(&mut self, token: TimerToken) -> bool {
        match &mut self.engine {
            ModeEngine::Quiz(engine) => engine.clear_celebration(token),
            ModeEngine::Sort(engine) => engine.clear_celebration(token),
            ModeEngine::Reflex(engine) => engine.clear_celebration(token),
        }
    }

    /// Submits a selection; only meaningful for quiz games, silently
    /// dropped elsewhere.
    pub fn submit_answer(&mut self, choice: Answer) -> Result<SubmitOutcome> {
        match &mut self.engine {
            ModeEngine::Quiz(engine) => engine.submit_answer(choice),
            _ => Ok(SubmitOutcome::Ignored),
        }
    }

    /// Advances a quiz past an answered level, reporting the level that was
    /// left behind.
    pub fn advance(&mut self) -> Result<AdvanceOutcome> {
        let ModeEngine::Quiz(engine) = &mut self.engine else {
            return Ok(AdvanceOutcome::NoChange);
        };

        let level_number = engine.level_number();
        let level_score = engine.awarded_points();
        let max_level_score = engine.current_level().reward;

        let outcome = engine.advance()?;
        if outcome.has_update() {
            let report = LevelReport {
                game_id: self.info.id.clone(),
                level_number,
                level_score,
                max_level_score,
            };
            self.reports.push(Report::Level(report));
        }
        if matches!(outcome, AdvanceOutcome::Finished) {
            self.push_session_report();
        }

        Ok(outcome)
    }

    /// Classifies a pool item; only meaningful for sort games.
    pub fn classify(&mut self, item: LevelNo, bucket: Option<&str>) -> Result<SortOutcome> {
        let ModeEngine::Sort(engine) = &mut self.engine else {
            return Ok(SortOutcome::NoChange);
        };

        let outcome = engine.classify(item, bucket)?;
        if matches!(outcome, SortOutcome::Sorted | SortOutcome::Drained) {
            let report = LevelReport {
                game_id: self.info.id.clone(),
                level_number: engine.sorted_count(),
                level_score: engine.item(item).map_or(0, |data| data.reward),
                max_level_score: engine.item(item).map_or(0, |data| data.reward),
            };
            self.reports.push(Report::Level(report));
        }
        if matches!(outcome, SortOutcome::Drained) {
            self.push_session_report();
        }

        Ok(outcome)
    }

    /// Forwards one repeating-timer fire; only meaningful for reflex games.
    pub fn rotate(&mut self, token: TimerToken) -> RotateOutcome {
        match &mut self.engine {
            ModeEngine::Reflex(engine) => engine.rotate(token),
            _ => RotateOutcome::Stopped,
        }
    }

    /// Reacts to the visible cue; only meaningful for reflex games.
    pub fn react(&mut self, action: &str) -> Result<ReactOutcome> {
        let ModeEngine::Reflex(engine) = &mut self.engine else {
            return Ok(ReactOutcome::Ignored);
        };

        let max_level_score = engine.current_cue().reward;
        let outcome = engine.react(action)?;

        let report = LevelReport {
            game_id: self.info.id.clone(),
            level_number: engine.rounds_played(),
            level_score: engine.awarded_points(),
            max_level_score,
        };
        self.reports.push(Report::Level(report));

        if engine.is_complete() {
            self.push_session_report();
        }

        Ok(outcome)
    }

    /// Applies the host's image fetch result; only meaningful for quiz
    /// games with a remote stimulus.
    pub fn resolve_asset(&mut self, fetched: Option<String>) {
        if let ModeEngine::Quiz(engine) = &mut self.engine {
            engine.resolve_asset(fetched);
        }
    }

    /// Queued reward notifications, oldest first. Draining is the host's
    /// cue to forward them; the engine never retries or waits.
    pub fn drain_reports(&mut self) -> Vec<Report> {
        core::mem::take(&mut self.reports)
    }

    /// Full reset, including queued reports and the completion latch.
    pub fn restart(&mut self) {
        match &mut self.engine {
            ModeEngine::Quiz(engine) => engine.restart(),
            ModeEngine::Sort(engine) => engine.restart(),
            ModeEngine::Reflex(engine) => engine.restart(),
        }
        self.reports.clear();
        self.session_reported = false;
    }

    pub fn shell_view(&self) -> ShellView {
        let (score, level_number, total_levels, can_advance, complete, celebrating) =
            match &self.engine {
                ModeEngine::Quiz(engine) => (
                    engine.score(),
                    engine.level_number(),
                    engine.level_count(),
                    engine.can_advance(),
                    engine.is_complete(),
                    engine.celebrating(),
                ),
                ModeEngine::Sort(engine) => (
                    engine.score(),
                    engine.sorted_count().min(engine.item_count() - 1) + 1,
                    engine.item_count(),
                    false,
                    engine.is_complete(),
                    engine.celebrating(),
                ),
                ModeEngine::Reflex(engine) => (
                    engine.score(),
                    engine.round_number(),
                    engine.rounds(),
                    false,
                    engine.is_complete(),
                    engine.celebrating(),
                ),
            };

        ShellView {
            game_id: self.info.id.clone(),
            pillar: self.info.pillar,
            title: self.info.title.clone(),
            subtitle: self.info.subtitle.clone(),
            score,
            level_number,
            total_levels,
            can_advance,
            complete,
            celebrating,
        }
    }

    fn push_session_report(&mut self) {
        if self.session_reported {
            return;
        }
        self.session_reported = true;

        let (levels_completed, total_levels) = match &self.engine {
            ModeEngine::Quiz(engine) => (engine.level_count(), engine.level_count()),
            ModeEngine::Sort(engine) => (engine.sorted_count(), engine.item_count()),
            ModeEngine::Reflex(engine) => (engine.rounds_played(), engine.rounds()),
        };

        let report = SessionReport {
            game_id: self.info.id.clone(),
            game_type: self.info.pillar,
            score: self.score(),
            max_score: self.max_score(),
            levels_completed,
            total_levels,
        };
        log::debug!("session {} complete: {}/{}", report.game_id, report.score, report.max_score);
        self.reports.push(Report::Session(report));
    }
}
