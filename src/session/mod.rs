//! Session orchestrator module for Speak & Solve.
//!
//! This module wires the topic → provider → extractor flow and exposes the
//! shared state a front-end reads to render itself.
//!
//! # Architecture
//!
//! ```text
//! SessionCommand (mpsc)
//!        │
//!        ▼
//! SessionOrchestrator::run()  ← async tokio task
//!        │
//!        ├─ SubmitTopic ── reject if a bundle is already materialising
//!        │       │
//!        │       ├─ CompletionProvider::complete(topic)   [Generating]
//!        │       ├─ content::extract(raw)
//!        │       └─ bundle stored, SessionEvent::BundleReady [Ready]
//!        │
//!        └─ Reset ── discard topic/bundle/error            [Idle]
//!
//! SharedState (Arc<Mutex<AppState>>) ←─── read by the front-end
//! SessionEvent (mpsc) ────────────────▶ drives the front-end loop
//! ```
//!
//! At most one `LearningBundle` is being materialised at any instant; a
//! submission while one is in flight is rejected, never queued.

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{SessionCommand, SessionEvent, SessionOrchestrator};
pub use state::{new_shared_state, AppState, SessionPhase, SharedState};
