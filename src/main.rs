//! Application entry point — Speak & Solve console front-end.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Build the completion provider ([`ApiProvider`]) from config.
//! 5. Create session channels (`command`, `event`) and the capture channel.
//! 6. Spawn the session orchestrator on the tokio runtime.
//! 7. Start the console capture (stands in for browser speech recognition).
//! 8. Run the interactive loop: topic → learning content → quiz → reset.
//!
//! The quiz runs one question at a time with an optional hint; correctness
//! feedback is held for a fixed interval before the front-end calls
//! `advance()` — that delay lives here, never in the state machine.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use speak_solve::{
    config::{AppConfig, SessionConfig},
    content::LearningBundle,
    notify::{Notice, NoticeLevel, Notifier, SharedNotifier},
    provider::{ApiProvider, CompletionProvider},
    quiz::QuizSession,
    session::{new_shared_state, SessionCommand, SessionEvent, SessionOrchestrator, SessionPhase},
    voice::{CaptureEvent, ConsoleCapture, VoiceCapture},
};

// ---------------------------------------------------------------------------
// ConsoleNotifier — renders notices as terminal lines
// ---------------------------------------------------------------------------

struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        let glyph = match notice.level {
            NoticeLevel::Info => "•",
            NoticeLevel::Success => "✓",
            NoticeLevel::Error => "✗",
        };
        println!("{glyph} {}: {}", notice.title, notice.body);
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Speak & Solve starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Tokio runtime (2 worker threads — provider call + front-end)
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    rt.block_on(run(config))
}

// ---------------------------------------------------------------------------
// Front-end loop
// ---------------------------------------------------------------------------

async fn run(config: AppConfig) -> anyhow::Result<()> {
    // 4. Completion provider
    let provider: Arc<dyn CompletionProvider> =
        Arc::new(ApiProvider::from_config(&config.provider));
    let notifier: SharedNotifier = Arc::new(ConsoleNotifier);
    let state = new_shared_state(config.clone());

    // 5. Channel setup
    let (command_tx, command_rx) = mpsc::channel::<SessionCommand>(16);
    let (event_tx, mut event_rx) = mpsc::channel::<SessionEvent>(32);
    let (capture_tx, mut capture_rx) = mpsc::channel::<CaptureEvent>(16);

    // 6. Spawn session orchestrator onto the tokio runtime
    let orchestrator =
        SessionOrchestrator::new(Arc::clone(&state), provider, Arc::clone(&notifier));
    tokio::spawn(orchestrator.run(command_rx, event_tx));

    // 7. Console capture — each typed line arrives as a transcript
    let mut capture = ConsoleCapture::new();
    capture.start(capture_tx)?;

    println!("Speak & Solve — AI-powered learning");
    println!("Type a topic or question and press Enter (Ctrl-D to quit).");

    // 8. Interactive loop
    loop {
        {
            state.lock().unwrap().phase = SessionPhase::Listening;
        }
        prompt("\n🎤 Topic> ");

        let topic = match capture_rx.recv().await {
            Some(CaptureEvent::Transcript(topic)) => topic,
            Some(CaptureEvent::Error(message)) => {
                notifier.notify(Notice::error("Capture error", message));
                continue;
            }
            Some(CaptureEvent::Ended) | None => break,
        };

        command_tx
            .send(SessionCommand::SubmitTopic(topic.clone()))
            .await?;
        println!("Generating your personalized learning content...");

        let Some(bundle) = await_bundle(&mut event_rx).await else {
            command_tx.send(SessionCommand::Reset).await?;
            continue;
        };

        render_bundle(&topic, &bundle);

        let finished = run_quiz(&bundle, &config.session, &mut capture_rx, &notifier).await;

        command_tx.send(SessionCommand::Reset).await?;
        if !finished {
            break;
        }
    }

    capture.stop();
    log::info!("Speak & Solve shutting down");
    Ok(())
}

/// Wait for the terminal event of one submission.
///
/// Returns `None` when the submission failed (already reported via notices)
/// or the orchestrator went away.
async fn await_bundle(
    event_rx: &mut mpsc::Receiver<SessionEvent>,
) -> Option<Arc<LearningBundle>> {
    loop {
        match event_rx.recv().await? {
            SessionEvent::GenerationStarted { .. } => continue,
            SessionEvent::BundleReady { bundle } => return Some(bundle),
            SessionEvent::Failed { retryable, .. } => {
                if retryable {
                    println!("Please try another topic.");
                }
                return None;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render_bundle(topic: &str, bundle: &LearningBundle) {
    println!("\n══ {topic} ══");
    println!("\n📖 Explanation\n{}", bundle.explanation);
    println!("\n💡 Example\n{}", bundle.example);
}

fn prompt(text: &str) {
    print!("{text}");
    let _ = std::io::stdout().flush();
}

// ---------------------------------------------------------------------------
// Quiz loop
// ---------------------------------------------------------------------------

/// Drive the quiz to completion.
///
/// Returns `false` when the input source ended mid-quiz.
async fn run_quiz(
    bundle: &LearningBundle,
    session_config: &SessionConfig,
    capture_rx: &mut mpsc::Receiver<CaptureEvent>,
    notifier: &SharedNotifier,
) -> bool {
    let mut session = QuizSession::new(bundle.quiz.clone());

    println!("\n❓ Quiz Time!");

    while !session.is_completed() {
        let Some(item) = session.current_item().cloned() else {
            break;
        };

        println!(
            "\nQuestion {} of {}  (score: {}/{})",
            session.current_index() + 1,
            session.total(),
            session.score(),
            session.total()
        );
        println!("{}", item.question);
        for (i, option) in item.options.iter().enumerate() {
            println!("  {}. {option}", i + 1);
        }
        if session_config.show_hints {
            prompt("Answer (number, or 'hint')> ");
        } else {
            prompt("Answer (number)> ");
        }

        let line = match capture_rx.recv().await {
            Some(CaptureEvent::Transcript(line)) => line,
            Some(CaptureEvent::Error(message)) => {
                notifier.notify(Notice::error("Capture error", message));
                continue;
            }
            Some(CaptureEvent::Ended) | None => return false,
        };

        if session_config.show_hints && line.eq_ignore_ascii_case("hint") {
            println!("💡 {}", item.hint);
            continue;
        }

        // 1-based input; anything unparseable or out of range is re-asked.
        let Some(index) = line
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .filter(|&i| i < item.options.len())
        else {
            println!("Please enter a number between 1 and {}.", item.options.len());
            continue;
        };

        let outcome = session.submit_answer(index);
        if outcome.correct {
            notifier.notify(Notice::success(
                "Correct! 🎉",
                "Great job! Moving to the next question...",
            ));
        } else {
            notifier.notify(Notice::error(
                "Not quite right",
                "Try reviewing the explanation and example.",
            ));
            println!(
                "The correct answer was: {}",
                item.options[item.correct_answer]
            );
        }

        // Hold the feedback visible, then advance — the pause is a
        // presentation concern; advance() itself is instantaneous.
        tokio::time::sleep(Duration::from_secs(session_config.feedback_secs)).await;
        session.advance();
    }

    println!("\n🎓 Quiz Complete!");
    println!(
        "You scored {} out of {}",
        session.score(),
        session.total()
    );
    println!("{}", session.classification().narrative());
    true
}
