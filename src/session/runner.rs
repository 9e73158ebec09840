//! Session orchestrator — drives the topic → provider → extractor flow.
//!
//! [`SessionOrchestrator`] owns the [`SharedState`] and responds to
//! [`SessionCommand`]s received over a `tokio::sync::mpsc` channel, emitting
//! [`SessionEvent`]s the front-end uses to drive its loop.
//!
//! # Flow
//!
//! ```text
//! SessionCommand::SubmitTopic(topic)
//!   ├─ busy? ─▶ Failed event, nothing else changes
//!   └─▶ phase = Generating, GenerationStarted event
//!         └─▶ provider.complete(topic)
//!               ├─ Err ─▶ phase = Error, Failed event (retryable per error)
//!               └─ Ok(raw) ─▶ content::extract(raw)
//!                     ├─ Err ─▶ phase = Error, Failed event (retry the topic)
//!                     └─ Ok  ─▶ phase = Ready, BundleReady event
//!
//! SessionCommand::Reset
//!   └─▶ discard topic/bundle/error, phase = Idle
//! ```
//!
//! Nothing is retried automatically: a rate limit invites the user to try
//! again, quota exhaustion tells them to remediate, and a parse failure on
//! a successful response asks for a fresh submission of the whole topic.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::content::{self, LearningBundle};
use crate::notify::{Notice, SharedNotifier};
use crate::provider::CompletionProvider;

use super::state::{SessionPhase, SharedState};

// ---------------------------------------------------------------------------
// Commands and events
// ---------------------------------------------------------------------------

/// Commands sent from the front-end to the orchestrator.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// A transcribed topic to turn into a learning bundle.
    SubmitTopic(String),
    /// Discard the current topic, bundle, and error ("New Topic").
    Reset,
}

/// Events emitted by the orchestrator for the front-end loop.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A provider call is in flight for `topic`.
    GenerationStarted { topic: String },
    /// A validated bundle is ready to present.
    BundleReady { bundle: Arc<LearningBundle> },
    /// The submission failed; `retryable` hints whether asking the user to
    /// try again makes sense.
    Failed { message: String, retryable: bool },
}

// ---------------------------------------------------------------------------
// SessionOrchestrator
// ---------------------------------------------------------------------------

/// Drives topic submissions end to end.
///
/// Create with [`SessionOrchestrator::new`], then call
/// [`run`](Self::run) inside a tokio task.
pub struct SessionOrchestrator {
    state: SharedState,
    provider: Arc<dyn CompletionProvider>,
    notifier: SharedNotifier,
}

impl SessionOrchestrator {
    /// Create a new orchestrator.
    ///
    /// # Arguments
    ///
    /// * `state`    — shared application state (also read by the front-end).
    /// * `provider` — completion backend (e.g. `ApiProvider`).
    /// * `notifier` — sink for user-facing notices.
    pub fn new(
        state: SharedState,
        provider: Arc<dyn CompletionProvider>,
        notifier: SharedNotifier,
    ) -> Self {
        Self {
            state,
            provider,
            notifier,
        }
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Run the orchestrator until `command_rx` is closed.
    ///
    /// This is an `async fn` and should be spawned as a tokio task from
    /// `main()`. It never returns while the channel is open.
    pub async fn run(
        self,
        mut command_rx: mpsc::Receiver<SessionCommand>,
        event_tx: mpsc::Sender<SessionEvent>,
    ) {
        while let Some(command) = command_rx.recv().await {
            match command {
                SessionCommand::SubmitTopic(topic) => {
                    self.handle_submit(topic, &event_tx).await;
                }
                SessionCommand::Reset => {
                    self.handle_reset();
                }
            }
        }

        log::info!("session: command channel closed, orchestrator shutting down");
    }

    // -----------------------------------------------------------------------
    // Command handlers
    // -----------------------------------------------------------------------

    /// Handle a topic submission: provider call → extraction → Ready.
    async fn handle_submit(&self, topic: String, event_tx: &mpsc::Sender<SessionEvent>) {
        // ── 1. Single-flight guard ───────────────────────────────────────
        let busy = self.state.lock().unwrap().phase.is_busy();
        if busy {
            log::warn!("session: SubmitTopic while busy — rejected");
            let message = "Still generating the previous topic — please wait.".to_string();
            self.notifier.notify(Notice::error("Busy", message.clone()));
            let _ = event_tx
                .send(SessionEvent::Failed {
                    message,
                    retryable: true,
                })
                .await;
            return;
        }

        {
            let mut st = self.state.lock().unwrap();
            st.phase = SessionPhase::Generating;
            st.topic = Some(topic.clone());
            st.bundle = None;
            st.error_message = None;
        }

        log::debug!("session: SubmitTopic({topic:?}) → Generating");
        let _ = event_tx
            .send(SessionEvent::GenerationStarted {
                topic: topic.clone(),
            })
            .await;

        // ── 2. Provider call (single outstanding request) ────────────────
        let raw = match self.provider.complete(&topic).await {
            Ok(raw) => raw,
            Err(e) => {
                let retryable = e.is_retryable();
                self.fail(e.to_string(), retryable, event_tx).await;
                return;
            }
        };

        log::debug!("session: provider returned {} bytes", raw.len());

        // ── 3. Extraction + validation ───────────────────────────────────
        // A parse failure on a successful response is a hard error: the
        // learner gets nothing usable and must resubmit the topic.
        let bundle = match content::extract(&raw) {
            Ok(bundle) => Arc::new(bundle),
            Err(e) => {
                log::error!("session: extraction failed: {e}");
                self.fail(
                    format!("{e} — please try the topic again"),
                    true,
                    event_tx,
                )
                .await;
                return;
            }
        };

        // ── 4. Finalise state ────────────────────────────────────────────
        {
            let mut st = self.state.lock().unwrap();
            st.phase = SessionPhase::Ready;
            st.bundle = Some(Arc::clone(&bundle));
        }

        self.notifier.notify(Notice::success(
            "Success!",
            "Your learning content is ready!",
        ));
        let _ = event_tx.send(SessionEvent::BundleReady { bundle }).await;
    }

    /// Handle a reset: discard everything and return to `Idle`.
    fn handle_reset(&self) {
        log::debug!("session: Reset → Idle");
        let mut st = self.state.lock().unwrap();
        st.phase = SessionPhase::Idle;
        st.topic = None;
        st.bundle = None;
        st.error_message = None;
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn fail(&self, message: String, retryable: bool, event_tx: &mpsc::Sender<SessionEvent>) {
        {
            let mut st = self.state.lock().unwrap();
            st.phase = SessionPhase::Error;
            st.error_message = Some(message.clone());
        }
        log::error!("session error: {message}");
        self.notifier.notify(Notice::error("Error", message.clone()));
        let _ = event_tx
            .send(SessionEvent::Failed { message, retryable })
            .await;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
