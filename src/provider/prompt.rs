//! Prompt builder for learning-content generation.
//!
//! [`PromptBuilder`] constructs the `(system_msg, user_msg)` pair sent to
//! the chat-completions endpoint. The system instruction pins down the
//! exact JSON schema the [extractor](crate::content::extract) expects:
//! explanation, example, and 3–5 four-option questions with hints.

// ---------------------------------------------------------------------------
// System instruction
// ---------------------------------------------------------------------------

/// Fixed instruction describing the tutoring task and the output contract.
///
/// Models still occasionally wrap the object in a code fence or commentary
/// despite the "ONLY valid JSON" rule — the extractor tolerates both.
const SYSTEM_INSTRUCTION: &str = r#"You are an educational AI assistant. When given a topic or question, provide:
1. A clear, simple explanation suitable for learners (2-3 paragraphs)
2. A practical, real-world example that illustrates the concept
3. Exactly 3-5 multiple choice questions to test understanding
4. Each question should have 4 options (A, B, C, D) with one correct answer
5. Include hints for each question that guide without giving away the answer

Return ONLY valid JSON in this exact format:
{
  "explanation": "Clear explanation here",
  "example": "Practical example here",
  "quiz": [
    {
      "question": "Question text?",
      "options": ["A) Option 1", "B) Option 2", "C) Option 3", "D) Option 4"],
      "correctAnswer": 0,
      "hint": "Helpful hint without revealing answer"
    }
  ]
}"#;

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds the chat messages for one topic submission.
///
/// # Example
/// ```rust
/// use speak_solve::provider::PromptBuilder;
///
/// let builder = PromptBuilder::new();
/// let (system, user) = builder.build_chat("photosynthesis");
/// assert!(system.contains("valid JSON"));
/// assert!(user.contains("photosynthesis"));
/// ```
#[derive(Debug, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build a **(system_msg, user_msg)** pair for an OpenAI-compatible API.
    ///
    /// * `system_msg` — the fixed tutoring instruction with the JSON schema.
    /// * `user_msg` — the spoken topic wrapped in the generation request.
    pub fn build_chat(&self, topic: &str) -> (String, String) {
        let system_msg = SYSTEM_INSTRUCTION.to_string();
        let user_msg = format!("Explain this topic and create a quiz: {topic}");
        (system_msg, user_msg)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
