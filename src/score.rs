//! Score, bonus window and the combo message banner.

use crate::combo::{BONUS_THRESHOLD, Combo};

/// Steps a bonus window lasts.
pub const BONUS_FRAMES: u32 = 600;
/// Steps the combo message stays up.
pub const MESSAGE_FRAMES: u32 = 60;
pub const BONUS_MULTIPLIER: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSession {
    score: u64,
    bonus_multiplier: u32,
    bonus_frames: u32,
    message: Option<String>,
    message_frames: u32,
}

impl Default for ScoreSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreSession {
    pub fn new() -> Self {
        Self {
            score: 0,
            bonus_multiplier: 1,
            bonus_frames: 0,
            message: None,
            message_frames: 0,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn bonus_multiplier(&self) -> u32 {
        self.bonus_multiplier
    }

    pub fn bonus_frames_remaining(&self) -> u32 {
        self.bonus_frames
    }

    pub fn bonus_active(&self) -> bool {
        self.bonus_frames > 0
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn message_frames_remaining(&self) -> u32 {
        self.message_frames
    }

    /// Add `score * multiplier` and return the points awarded. A score of
    /// 1000 or more restarts the bonus window at full length.
    pub fn apply_result(&mut self, score: u32, combo: Option<Combo>, multiplier: u32) -> u64 {
        if score == 0 {
            return 0;
        }
        let awarded = u64::from(score) * u64::from(multiplier.max(1));
        self.score = self.score.saturating_add(awarded);
        if score >= BONUS_THRESHOLD {
            self.bonus_multiplier = BONUS_MULTIPLIER;
            self.bonus_frames = BONUS_FRAMES;
        }
        let id = combo.map(Combo::id).unwrap_or("Combo");
        self.message = Some(format!("{id} - {score} pts"));
        self.message_frames = MESSAGE_FRAMES;
        awarded
    }

    pub fn tick(&mut self) {
        if self.bonus_frames > 0 {
            self.bonus_frames -= 1;
            if self.bonus_frames == 0 {
                self.bonus_multiplier = 1;
            }
        }
        if self.message_frames > 0 {
            self.message_frames -= 1;
            if self.message_frames == 0 {
                self.message = None;
            }
        }
    }
}
