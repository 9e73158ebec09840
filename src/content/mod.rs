//! Learning-content data model and AI-response extraction.
//!
//! This module provides:
//! * [`LearningBundle`] — explanation + example + quiz, the structured
//!   payload derived from one topic submission.
//! * [`QuizItem`] — a single multiple-choice question.
//! * [`extract`] — recovers a validated [`LearningBundle`] from the raw,
//!   free-form text a completion provider returns.
//! * [`ParseError`] — extraction/validation error variants.
//!
//! A bundle is immutable once constructed: it is produced exactly once per
//! topic submission and discarded wholesale on reset — there is no merging
//! or incremental update path.

pub mod extract;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use extract::{extract, ParseError};

// ---------------------------------------------------------------------------
// QuizItem
// ---------------------------------------------------------------------------

/// A single multiple-choice quiz question.
///
/// The wire schema uses camelCase `correctAnswer`, matching the JSON the
/// provider is instructed to emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizItem {
    /// The question text.
    pub question: String,

    /// Answer options — the provider contract asks for exactly 4, but any
    /// length ≥ 2 is accepted as valid.
    pub options: Vec<String>,

    /// Index into `options` of the correct answer.
    ///
    /// Invariant (enforced by [`extract`]): `correct_answer < options.len()`.
    #[serde(rename = "correctAnswer")]
    pub correct_answer: usize,

    /// A hint that guides without giving away the answer.
    pub hint: String,
}

// ---------------------------------------------------------------------------
// LearningBundle
// ---------------------------------------------------------------------------

/// The structured explanation/example/quiz payload for one topic.
///
/// Produced by [`extract`] from raw provider output. The quiz length is
/// constrained to 3–5 by the provider contract; that bound is not enforced
/// here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningBundle {
    /// Clear explanation prose — guaranteed non-empty after extraction.
    pub explanation: String,

    /// Practical real-world example — guaranteed non-empty after extraction.
    pub example: String,

    /// Ordered quiz questions.
    pub quiz: Vec<QuizItem>,
}
