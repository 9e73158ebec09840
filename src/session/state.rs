//! Session state machine and shared application state.
//!
//! [`SessionPhase`] tracks where one topic submission stands. The front-end
//! reads it via [`SharedState`] to decide what to render.
//!
//! [`AppState`] is the single source of truth for everything a front-end
//! needs: current phase, the submitted topic, the materialised bundle,
//! config snapshot, and any error message.
//!
//! [`SharedState`] is a type alias for `Arc<Mutex<AppState>>` — cheap to
//! clone and safe to share across tasks.

use std::sync::{Arc, Mutex};

use crate::config::AppConfig;
use crate::content::LearningBundle;

// ---------------------------------------------------------------------------
// SessionPhase
// ---------------------------------------------------------------------------

/// Phases of one topic submission.
///
/// ```text
/// Idle ──capture started──▶ Listening
///      ──topic submitted──▶ Generating
///                            ──extract ok──▶ Ready
/// any phase ──error──▶ Error
/// Ready / Error ──reset──▶ Idle
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the learner to start speaking.
    Idle,

    /// Speech capture is active; no topic submitted yet.
    Listening,

    /// The completion provider is materialising a bundle for the topic.
    Generating,

    /// A validated bundle is available and the quiz can run.
    Ready,

    /// A provider or extraction failure occurred. The session returns to
    /// `Idle` on the next reset.
    Error,
}

impl SessionPhase {
    /// Returns `true` while a bundle is being materialised.
    ///
    /// A new topic submission is rejected while this holds — at most one
    /// outstanding provider call per session.
    ///
    /// ```
    /// use speak_solve::session::SessionPhase;
    ///
    /// assert!(!SessionPhase::Idle.is_busy());
    /// assert!(SessionPhase::Generating.is_busy());
    /// assert!(!SessionPhase::Ready.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionPhase::Generating)
    }

    /// A short human-readable label suitable for a status line.
    pub fn label(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "Idle",
            SessionPhase::Listening => "Listening",
            SessionPhase::Generating => "Generating",
            SessionPhase::Ready => "Ready",
            SessionPhase::Error => "Error",
        }
    }
}

impl Default for SessionPhase {
    fn default() -> Self {
        SessionPhase::Idle
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Shared application state — the single source of truth for the front-end.
///
/// Held behind [`SharedState`] (`Arc<Mutex<AppState>>`). The orchestrator
/// mutates it; the front-end reads it.
pub struct AppState {
    /// Current phase of the topic session.
    pub phase: SessionPhase,

    /// The most recently submitted topic.
    ///
    /// `None` until the first submission, and again after a reset.
    pub topic: Option<String>,

    /// The materialised learning bundle.
    ///
    /// Set exactly once per successful submission; discarded wholesale on
    /// reset — never merged or updated in place.
    pub bundle: Option<Arc<LearningBundle>>,

    /// Current application configuration.
    pub config: AppConfig,

    /// Error message to display when `phase == SessionPhase::Error`.
    pub error_message: Option<String>,
}

impl AppState {
    /// Create a new `AppState` with sensible defaults.
    pub fn new(config: AppConfig) -> Self {
        Self {
            phase: SessionPhase::Idle,
            topic: None,
            bundle: None,
            config,
            error_message: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`AppState`].
///
/// Cheap to clone (`Arc` clone). Lock with `.lock().unwrap()` for a short
/// critical section; do **not** hold the lock across `.await` points.
pub type SharedState = Arc<Mutex<AppState>>;

/// Construct a new [`SharedState`] wrapping a default [`AppState`].
pub fn new_shared_state(config: AppConfig) -> SharedState {
    Arc::new(Mutex::new(AppState::new(config)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- SessionPhase::is_busy ---

    #[test]
    fn only_generating_is_busy() {
        assert!(!SessionPhase::Idle.is_busy());
        assert!(!SessionPhase::Listening.is_busy());
        assert!(SessionPhase::Generating.is_busy());
        assert!(!SessionPhase::Ready.is_busy());
        assert!(!SessionPhase::Error.is_busy());
    }

    // ---- SessionPhase::label ---

    #[test]
    fn labels_match_phase_names() {
        assert_eq!(SessionPhase::Idle.label(), "Idle");
        assert_eq!(SessionPhase::Listening.label(), "Listening");
        assert_eq!(SessionPhase::Generating.label(), "Generating");
        assert_eq!(SessionPhase::Ready.label(), "Ready");
        assert_eq!(SessionPhase::Error.label(), "Error");
    }

    // ---- Default ---

    #[test]
    fn default_phase_is_idle() {
        assert_eq!(SessionPhase::default(), SessionPhase::Idle);
    }

    // ---- AppState / SharedState ---

    #[test]
    fn app_state_default_is_empty_idle() {
        let state = AppState::default();
        assert_eq!(state.phase, SessionPhase::Idle);
        assert!(state.topic.is_none());
        assert!(state.bundle.is_none());
        assert!(state.error_message.is_none());
    }

    #[test]
    fn shared_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedState>();
    }

    #[test]
    fn shared_state_can_be_cloned_and_mutated() {
        let state = new_shared_state(AppConfig::default());
        let state2 = Arc::clone(&state);

        state.lock().unwrap().phase = SessionPhase::Listening;
        assert_eq!(state2.lock().unwrap().phase, SessionPhase::Listening);
    }
}
