//! The [`QuizSession`] state machine.
//!
//! A session walks an ordered list of [`QuizItem`]s one question at a time:
//!
//! ```text
//! InProgress(0) ──submit_answer──▶ answered, score updated
//!               ──advance───────▶ InProgress(1) … InProgress(n-1)
//!
//! Completed  ⇔  every question answered (independent of index position)
//! ```
//!
//! Repeated or out-of-range submissions are absorbed as no-ops rather than
//! errors — they arise from benign UI races (rapid double-clicks) and must
//! never double-count the score.

use crate::content::QuizItem;

use super::score::ScoreClass;

// ---------------------------------------------------------------------------
// AnswerOutcome
// ---------------------------------------------------------------------------

/// The result of submitting (or re-submitting) an answer for the current
/// question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    /// Whether the recorded answer for the current question is correct.
    pub correct: bool,
    /// The running score after this submission.
    pub score_after: usize,
}

// ---------------------------------------------------------------------------
// QuizSession
// ---------------------------------------------------------------------------

/// Drives one run of a quiz from first question to full completion.
///
/// Created when a bundle arrives; mutated only by [`submit_answer`] and
/// [`advance`]; discarded on topic reset. A session over an empty item list
/// is immediately completed with score 0.
///
/// [`submit_answer`]: QuizSession::submit_answer
/// [`advance`]: QuizSession::advance
#[derive(Debug, Clone)]
pub struct QuizSession {
    items: Vec<QuizItem>,
    current_index: usize,
    answered: Vec<bool>,
    score: usize,
    selected_answer: Option<usize>,
}

impl QuizSession {
    /// Start a session over `items`.
    pub fn new(items: Vec<QuizItem>) -> Self {
        let answered = vec![false; items.len()];
        Self {
            items,
            current_index: 0,
            answered,
            score: 0,
            selected_answer: None,
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The question currently being presented, or `None` for an empty quiz.
    pub fn current_item(&self) -> Option<&QuizItem> {
        self.items.get(self.current_index)
    }

    /// Zero-based index of the current question.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Total number of questions in the session.
    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// Running score — incremented at most once per question.
    pub fn score(&self) -> usize {
        self.score
    }

    /// The answer recorded for the current question, cleared on advance.
    pub fn selected_answer(&self) -> Option<usize> {
        self.selected_answer
    }

    /// Whether the current question has already been answered.
    pub fn current_answered(&self) -> bool {
        self.answered.get(self.current_index).copied().unwrap_or(true)
    }

    /// `true` iff every question has been answered.
    ///
    /// Completion is defined by "all answered", not by index exhaustion:
    /// answering the last question completes the session without a further
    /// [`advance`](Self::advance) call.
    pub fn is_completed(&self) -> bool {
        self.answered.iter().all(|&a| a)
    }

    /// The completion narrative for the final score.
    pub fn classification(&self) -> ScoreClass {
        ScoreClass::classify(self.score, self.items.len())
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Record an answer for the current question.
    ///
    /// Idempotent guard: if the question is already answered, or `index` is
    /// out of range for its options, nothing changes and the outcome
    /// reflects the state as it stands. The score is incremented by exactly
    /// 1 when the first recorded answer is correct.
    pub fn submit_answer(&mut self, index: usize) -> AnswerOutcome {
        let Some(item) = self.items.get(self.current_index) else {
            return AnswerOutcome {
                correct: false,
                score_after: self.score,
            };
        };

        if self.answered[self.current_index] || index >= item.options.len() {
            return self.current_outcome();
        }

        self.selected_answer = Some(index);
        self.answered[self.current_index] = true;

        let correct = index == item.correct_answer;
        if correct {
            self.score += 1;
        }

        AnswerOutcome {
            correct,
            score_after: self.score,
        }
    }

    /// Move to the next question after the current one has been answered.
    ///
    /// On the last question this leaves `current_index` unchanged — the
    /// session is already completed by the final answer. Calling before the
    /// current question is answered is a no-op.
    pub fn advance(&mut self) {
        if !self.current_answered() {
            return;
        }
        if self.current_index + 1 < self.items.len() {
            self.current_index += 1;
            self.selected_answer = None;
        }
    }

    /// The outcome as it currently stands, without mutating anything.
    fn current_outcome(&self) -> AnswerOutcome {
        let correct = match (self.selected_answer, self.items.get(self.current_index)) {
            (Some(sel), Some(item)) => sel == item.correct_answer,
            _ => false,
        };
        AnswerOutcome {
            correct,
            score_after: self.score,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::ScoreClass;

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Build an item with 4 options whose correct answer is `correct`.
    fn item(correct: usize) -> QuizItem {
        QuizItem {
            question: "Which option is right?".into(),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answer: correct,
            hint: "Look carefully.".into(),
        }
    }

    /// A five-question session where option 0 is always correct.
    fn five_question_session() -> QuizSession {
        QuizSession::new(vec![item(0), item(0), item(0), item(0), item(0)])
    }

    /// Answer the current question (0 = correct here) and advance.
    fn answer_and_advance(session: &mut QuizSession, index: usize) {
        session.submit_answer(index);
        session.advance();
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    #[test]
    fn new_session_starts_at_first_question() {
        let session = five_question_session();
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.score(), 0);
        assert!(!session.is_completed());
        assert!(session.selected_answer().is_none());
    }

    #[test]
    fn empty_session_is_immediately_completed() {
        let session = QuizSession::new(Vec::new());
        assert!(session.is_completed());
        assert_eq!(session.score(), 0);
        assert!(session.current_item().is_none());
    }

    // -----------------------------------------------------------------------
    // submit_answer
    // -----------------------------------------------------------------------

    #[test]
    fn correct_answer_increments_score() {
        let mut session = five_question_session();
        let outcome = session.submit_answer(0);
        assert!(outcome.correct);
        assert_eq!(outcome.score_after, 1);
        assert_eq!(session.selected_answer(), Some(0));
    }

    #[test]
    fn wrong_answer_records_but_does_not_score() {
        let mut session = five_question_session();
        let outcome = session.submit_answer(2);
        assert!(!outcome.correct);
        assert_eq!(outcome.score_after, 0);
        assert!(session.current_answered());
    }

    /// Two submissions for the same question: the second is a no-op and the
    /// score reflects only the first.
    #[test]
    fn second_submission_is_a_no_op() {
        let mut session = five_question_session();
        let first = session.submit_answer(2); // wrong
        let second = session.submit_answer(0); // would be correct

        assert!(!first.correct);
        assert!(!second.correct);
        assert_eq!(second.score_after, 0);
        assert_eq!(session.selected_answer(), Some(2));
    }

    #[test]
    fn repeated_correct_answer_never_double_counts() {
        let mut session = five_question_session();
        session.submit_answer(0);
        let again = session.submit_answer(0);
        assert!(again.correct);
        assert_eq!(again.score_after, 1);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn out_of_range_index_is_a_no_op() {
        let mut session = five_question_session();
        let outcome = session.submit_answer(7);
        assert!(!outcome.correct);
        assert_eq!(outcome.score_after, 0);
        assert!(!session.current_answered());
        // A valid submission afterwards still works normally.
        assert!(session.submit_answer(0).correct);
    }

    // -----------------------------------------------------------------------
    // advance
    // -----------------------------------------------------------------------

    #[test]
    fn advance_moves_to_next_question_and_clears_selection() {
        let mut session = five_question_session();
        session.submit_answer(1);
        session.advance();
        assert_eq!(session.current_index(), 1);
        assert!(session.selected_answer().is_none());
        assert!(!session.current_answered());
    }

    #[test]
    fn advance_before_answering_is_a_no_op() {
        let mut session = five_question_session();
        session.advance();
        assert_eq!(session.current_index(), 0);
    }

    /// Answering the final question completes the session without another
    /// advance; a further advance leaves the index in place.
    #[test]
    fn final_answer_completes_without_advance() {
        let mut session = five_question_session();
        for _ in 0..4 {
            answer_and_advance(&mut session, 0);
        }
        assert_eq!(session.current_index(), 4);
        assert!(!session.is_completed());

        session.submit_answer(0);
        assert!(session.is_completed());

        session.advance();
        assert_eq!(session.current_index(), 4);
        assert!(session.is_completed());
    }

    // -----------------------------------------------------------------------
    // Full runs and classification
    // -----------------------------------------------------------------------

    #[test]
    fn all_correct_run_is_perfect() {
        let mut session = five_question_session();
        for _ in 0..5 {
            answer_and_advance(&mut session, 0);
        }
        assert!(session.is_completed());
        assert_eq!(session.score(), 5);
        assert_eq!(session.classification(), ScoreClass::Perfect);
    }

    #[test]
    fn three_of_five_needs_review() {
        let mut session = five_question_session();
        for answer in [0, 0, 0, 1, 1] {
            answer_and_advance(&mut session, answer);
        }
        assert!(session.is_completed());
        assert_eq!(session.score(), 3);
        // 3/5 = 0.6 < 0.7
        assert_eq!(session.classification(), ScoreClass::NeedsReview);
    }

    #[test]
    fn four_of_five_is_good() {
        let mut session = five_question_session();
        for answer in [0, 0, 0, 0, 1] {
            answer_and_advance(&mut session, answer);
        }
        assert_eq!(session.score(), 4);
        // 4/5 = 0.8 >= 0.7, but not perfect
        assert_eq!(session.classification(), ScoreClass::Good);
    }
}
