//! Speak & Solve — voice-powered AI learning sessions.
//!
//! The learner speaks a topic; a completion provider returns an explanation,
//! a practical example, and a short multiple-choice quiz; the quiz runs one
//! question at a time with per-answer feedback and a final score narrative.
//!
//! # Module map
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`config`] | settings structs, TOML persistence, platform paths |
//! | [`provider`] | chat-completions client + prompt construction |
//! | [`content`] | bundle data model + AI-response extraction |
//! | [`quiz`] | quiz session state machine + score classification |
//! | [`voice`] | speech-capture capability interface |
//! | [`notify`] | structured notification observer |
//! | [`session`] | orchestrator tying topic → provider → bundle together |
//!
//! # Flow
//!
//! ```text
//! VoiceCapture ──transcript──▶ SessionOrchestrator
//!                                 │ CompletionProvider::complete
//!                                 │ content::extract
//!                                 ▼
//!                            LearningBundle ──▶ QuizSession ──▶ ScoreClass
//! ```

pub mod config;
pub mod content;
pub mod notify;
pub mod provider;
pub mod quiz;
pub mod session;
pub mod voice;
