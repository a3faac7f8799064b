//! End-of-run grades
//!
//! Shown on the game-over screen next to the final score.

use serde::{Deserialize, Serialize};

/// Letter grade awarded for a final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    Poor,
    Really,
    GoodJob,
    Nice,
    Great,
    Awesome,
    DaMan,
    ChuckNorris,
}

impl Grade {
    /// Map a final score onto its grade (total over all scores)
    pub fn from_score(score: u32) -> Self {
        match score {
            31.. => Grade::ChuckNorris,
            26..=30 => Grade::DaMan,
            21..=25 => Grade::Awesome,
            16..=20 => Grade::Great,
            14..=15 => Grade::Nice,
            11..=13 => Grade::GoodJob,
            6..=10 => Grade::Really,
            _ => Grade::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::ChuckNorris => "Chuck Norris?",
            Grade::DaMan => "You're da man",
            Grade::Awesome => "Awesome",
            Grade::Great => "Great!",
            Grade::Nice => "Nice!",
            Grade::GoodJob => "Good Job!",
            Grade::Really => "Really?",
            Grade::Poor => "Poor...",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grade label for a final score
pub fn grade(score: u32) -> &'static str {
    Grade::from_score(score).as_str()
}
