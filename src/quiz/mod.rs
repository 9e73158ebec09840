//! Quiz session state machine and score classification.
//!
//! This module provides:
//! * [`QuizSession`] — one-question-at-a-time progression over the quiz of
//!   a [`LearningBundle`](crate::content::LearningBundle), with per-question
//!   answer state and a running score.
//! * [`AnswerOutcome`] — the per-answer result handed to the presentation
//!   layer after each submission.
//! * [`ScoreClass`] — the completion narrative derived from `(score, total)`.
//!
//! The session is synchronous and single-owner: no locking, no timers. The
//! feedback pause between answering and advancing is the caller's concern —
//! it schedules its own delay and then calls [`QuizSession::advance`].

pub mod score;
pub mod session;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use score::ScoreClass;
pub use session::{AnswerOutcome, QuizSession};
