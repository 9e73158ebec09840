//! Completion-score classification.
//!
//! A pure function of `(score, total)` — nothing beyond the running score
//! is stored to derive it.

// ---------------------------------------------------------------------------
// ScoreClass
// ---------------------------------------------------------------------------

/// The narrative bucket for a finished session's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreClass {
    /// Every question answered correctly.
    Perfect,
    /// At least 70 % correct (closed, non-strict bound), but not all.
    Good,
    /// Below 70 % correct.
    NeedsReview,
}

impl ScoreClass {
    /// Classify a final `score` out of `total` questions.
    ///
    /// The Good threshold is `score / total >= 0.7`, evaluated in integer
    /// arithmetic so the bound stays exact (4/5 = 0.8 is Good, 3/5 = 0.6 is
    /// not). A zero-question session counts as Perfect, matching the
    /// `score == total` rule.
    pub fn classify(score: usize, total: usize) -> Self {
        if score == total {
            ScoreClass::Perfect
        } else if score * 10 >= total * 7 {
            ScoreClass::Good
        } else {
            ScoreClass::NeedsReview
        }
    }

    /// The completion message shown to the learner.
    pub fn narrative(&self) -> &'static str {
        match self {
            ScoreClass::Perfect => "Perfect score! You're a master! 🌟",
            ScoreClass::Good => "Great job! You've got a solid understanding! 👏",
            ScoreClass::NeedsReview => "Good effort! Review the material and try again! 💪",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
