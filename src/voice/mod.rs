//! Speech-capture capability interface.
//!
//! The core never depends on a specific speech recogniser. Whatever the
//! host environment supplies — a browser speech API, a native engine, a
//! test double — is wrapped in [`VoiceCapture`]: start listening, stop
//! listening, and deliver transcripts or errors as [`CaptureEvent`]s over a
//! channel.
//!
//! [`ConsoleCapture`] is the built-in host implementation: it "hears" by
//! reading lines from stdin on a dedicated OS thread. Stdin reads are
//! blocking and cannot be interrupted portably, so [`stop`] sets a flag
//! that makes the reader discard further lines instead of killing the
//! thread — the same shutdown shape a global input hook needs.
//!
//! [`stop`]: VoiceCapture::stop

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use thiserror::Error;
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// CaptureEvent / CaptureError
// ---------------------------------------------------------------------------

/// Events delivered by a capture backend while listening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// A recognised utterance — the topic text handed to the session.
    Transcript(String),
    /// The backend failed mid-capture; the message is user-displayable.
    Error(String),
    /// The input source is exhausted (e.g. stdin reached EOF).
    Ended,
}

/// Errors that can occur when starting a capture backend.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The backend could not begin listening at all.
    #[error("speech capture unavailable: {0}")]
    Unavailable(String),
}

// ---------------------------------------------------------------------------
// VoiceCapture trait
// ---------------------------------------------------------------------------

/// Host-supplied speech-capture capability.
///
/// `start` begins listening and delivers [`CaptureEvent`]s on `events`;
/// `stop` ends delivery. Implementors use `blocking_send` when forwarding
/// from a non-async thread.
pub trait VoiceCapture: Send {
    fn start(&mut self, events: mpsc::Sender<CaptureEvent>) -> Result<(), CaptureError>;
    fn stop(&mut self);
}

// ---------------------------------------------------------------------------
// ConsoleCapture
// ---------------------------------------------------------------------------

/// Reads "spoken" topics as lines from stdin.
///
/// Each non-empty line becomes one [`CaptureEvent::Transcript`]; EOF sends
/// [`CaptureEvent::Ended`]. The reader thread lives until the process
/// exits; after [`stop`](VoiceCapture::stop) it silently discards lines.
#[derive(Default)]
pub struct ConsoleCapture {
    stop: Option<Arc<AtomicBool>>,
}

impl ConsoleCapture {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VoiceCapture for ConsoleCapture {
    /// Spawn the dedicated stdin-reader thread.
    fn start(&mut self, events: mpsc::Sender<CaptureEvent>) -> Result<(), CaptureError> {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_clone = Arc::clone(&stop);

        std::thread::Builder::new()
            .name("console-capture".into())
            .spawn(move || {
                let stdin = std::io::stdin();
                let mut line = String::new();
                loop {
                    line.clear();
                    match stdin.read_line(&mut line) {
                        Ok(0) => {
                            let _ = events.blocking_send(CaptureEvent::Ended);
                            break;
                        }
                        Ok(_) => {
                            if stop_clone.load(Ordering::Relaxed) {
                                continue;
                            }
                            let topic = line.trim();
                            if topic.is_empty() {
                                continue;
                            }
                            if events
                                .blocking_send(CaptureEvent::Transcript(topic.to_string()))
                                .is_err()
                            {
                                break;
                            }
                        }
                        Err(e) => {
                            let _ = events
                                .blocking_send(CaptureEvent::Error(format!("stdin read failed: {e}")));
                            break;
                        }
                    }
                }
            })
            .map_err(|e| CaptureError::Unavailable(format!("could not spawn reader thread: {e}")))?;

        self.stop = Some(stop);
        Ok(())
    }

    /// Stop forwarding transcripts. The reader thread stays blocked on
    /// stdin until the process exits.
    fn stop(&mut self) {
        if let Some(stop) = &self.stop {
            stop.store(true, Ordering::Relaxed);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
