use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use core::num::Saturating;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// One classifiable item and the bucket it belongs in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SortItem {
    pub label: String,
    pub emoji: String,
    pub home: String,
    pub reward: Points,
}

impl SortItem {
    pub fn new(label: &str, emoji: &str, home: &str, reward: Points) -> Self {
        Self {
            label: String::from(label),
            emoji: String::from(emoji),
            home: String::from(home),
            reward,
        }
    }
}

/// Configuration for a pool-draining classification game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SortSpec {
    pub buckets: SmallVec<[String; 4]>,
    pub items: Vec<SortItem>,
}

impl SortSpec {
    pub fn new(buckets: impl IntoIterator<Item = &'static str>, items: Vec<SortItem>) -> Self {
        Self {
            buckets: buckets.into_iter().map(String::from).collect(),
            items,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(GameError::EmptyPool);
        }
        if self.items.len() > usize::from(LevelNo::MAX) {
            return Err(GameError::TooManyLevels);
        }
        if self.buckets.len() < 2 {
            return Err(GameError::NotEnoughBuckets);
        }

        for (index, bucket) in self.buckets.iter().enumerate() {
            if self.buckets[..index].contains(bucket) {
                return Err(GameError::DuplicateBucket);
            }
        }

        for (index, item) in self.items.iter().enumerate() {
            if !self.buckets.iter().any(|bucket| bucket == &item.home) {
                return Err(GameError::UnknownHomeBucket(index as LevelNo));
            }
        }

        Ok(())
    }

    pub fn max_score(&self) -> Points {
        self.items
            .iter()
            .fold(0, |total, item| total.saturating_add(item.reward))
    }
}

/// Outcome of classifying one pool item.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SortOutcome {
    Sorted,
    Missorted,
    Drained,
    NoChange,
}

impl SortOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Sorted | Self::Missorted | Self::Drained => true,
            Self::NoChange => false,
        }
    }
}

/// Pool-draining variant of the progression engine: items leave a shrinking
/// pool as they reach their home bucket and the session completes when the
/// pool is empty, in whatever order the learner picks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SortEngine {
    spec: SortSpec,
    order: Vec<LevelNo>,
    remaining: BTreeSet<LevelNo>,
    score: Saturating<Points>,
    feedback: Option<FeedbackKind>,
    complete: bool,
    celebration: TimerSlot,
}

impl SortEngine {
    /// `seed` drives the one-time shuffle of presentation order.
    pub fn new(spec: SortSpec, seed: u64) -> Result<Self> {
        use rand::prelude::*;

        spec.validate()?;

        let count = spec.items.len() as LevelNo;
        let mut order: Vec<LevelNo> = (0..count).collect();
        let mut rng = SmallRng::seed_from_u64(seed);
        order.shuffle(&mut rng);

        Ok(Self {
            spec,
            order,
            remaining: (0..count).collect(),
            score: Saturating(0),
            feedback: None,
            complete: false,
            celebration: TimerSlot::default(),
        })
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

    pub fn buckets(&self) -> &[String] {
        &self.spec.buckets
    }

    pub fn item(&self, id: LevelNo) -> Option<&SortItem> {
        self.spec.items.get(usize::from(id))
    }

    pub fn item_count(&self) -> LevelNo {
        clamp_level(self.spec.items.len())
    }

    pub fn remaining_count(&self) -> LevelNo {
        clamp_level(self.remaining.len())
    }

    pub fn sorted_count(&self) -> LevelNo {
        self.item_count() - self.remaining_count()
    }

    /// Items still in the pool, in presentation order.
    pub fn pool(&self) -> impl Iterator<Item = (LevelNo, &SortItem)> {
        self.order
            .iter()
            .copied()
            .filter(|id| self.remaining.contains(id))
            .map(|id| (id, &self.spec.items[usize::from(id)]))
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

    /// Classifies `item` into the bucket the drop resolved to. A drop that
    /// resolved to no bucket at all is a no-op, not an error.
    pub fn classify(&mut self, item: LevelNo, bucket: Option<&str>) -> Result<SortOutcome> {
        if self.complete {
            return Err(GameError::SessionOver);
        }

        let Some(bucket) = bucket else {
            return Ok(SortOutcome::NoChange);
        };

        if !self.remaining.contains(&item) {
            return Ok(SortOutcome::NoChange);
        }
        if !self.spec.buckets.iter().any(|known| known == bucket) {
            return Ok(SortOutcome::NoChange);
        }

        let data = &self.spec.items[usize::from(item)];
        if data.home != bucket {
            self.feedback = Some(FeedbackKind::Wrong);
            return Ok(SortOutcome::Missorted);
        }

        let reward = data.reward;
        self.remaining.remove(&item);
        self.score += reward;
        self.feedback = Some(FeedbackKind::Correct);
        self.celebration.arm();

        if self.remaining.is_empty() {
            self.complete = true;
            log::debug!("pool drained with score {}", self.score.0);
            Ok(SortOutcome::Drained)
        } else {
            Ok(SortOutcome::Sorted)
        }
    }

    /// Full reset; the presentation order from construction is kept.
    pub fn restart(&mut self) {
        self.remaining = (0..self.item_count()).collect();
        self.score = Saturating(0);
        self.feedback = None;
        self.complete = false;
        self.celebration.cancel();
    }
}
