//! Live terminal view of one chat turn.
//!
//! Drives `send_message` while consuming the session's event bus, so the
//! reply is printed as it grows. Cumulative content is turned back into
//! deltas by remembering how much has been printed. A reply that fails
//! part way is taken back off the screen before the notice is shown. Ctrl+C
//! during a turn cancels the in-flight stream instead of killing the process.

use std::time::{Duration, Instant};

use console::style;
use tokio::sync::broadcast::error::RecvError;

use advisor_core::chat::{ChatSession, CompletionTransport, SendOutcome};
use advisor_types::event::{ConversationEvent, Notice, NoticeKind};

use super::chat::renderer::LiveReply;

/// How a turn is shown.
pub struct StreamView<'a> {
    /// Name printed before the reply.
    pub label: &'a str,
    /// Print the reply while it streams.
    pub live: bool,
    /// Show a spinner until the first fragment arrives.
    pub spinner: bool,
    /// Print failure notices to stderr.
    pub notices: bool,
}

pub struct TurnReport {
    pub outcome: SendOutcome,
    /// Bytes of reply printed live.
    pub printed: usize,
    pub elapsed: Duration,
}

/// Send the session's current input and render the turn.
pub async fn run_turn<T: CompletionTransport>(
    session: &ChatSession<T>,
    view: &StreamView<'_>,
) -> TurnReport {
    let mut events = session.subscribe();
    let start = Instant::now();
    let mut printer = TurnPrinter::new(view);

    let send = session.send_message();
    tokio::pin!(send);

    let outcome = loop {
        tokio::select! {
            outcome = &mut send => break outcome,
            event = events.recv() => match event {
                Ok(event) => printer.handle(&event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "view lagged behind the stream");
                }
                Err(RecvError::Closed) => {}
            },
            _ = tokio::signal::ctrl_c() => {
                if session.cancel() {
                    tracing::info!("cancelling response");
                }
            }
        }
    };

    // Everything published before settling is already buffered.
    while let Ok(event) = events.try_recv() {
        printer.handle(&event);
    }
    printer.finish();

    TurnReport {
        outcome,
        printed: printer.printed,
        elapsed: start.elapsed(),
    }
}

struct TurnPrinter<'a> {
    view: &'a StreamView<'a>,
    spinner: Option<indicatif::ProgressBar>,
    live: Option<LiveReply>,
    printed: usize,
}

impl<'a> TurnPrinter<'a> {
    fn new(view: &'a StreamView<'a>) -> Self {
        Self {
            view,
            spinner: view.spinner.then(thinking_spinner),
            live: None,
            printed: 0,
        }
    }

    fn handle(&mut self, event: &ConversationEvent) {
        match event {
            ConversationEvent::AssistantContent { content } => {
                self.stop_spinner();
                if self.view.live {
                    let live = self
                        .live
                        .get_or_insert_with(|| LiveReply::start(self.view.label));
                    if let Some(delta) = content.get(self.printed..) {
                        live.push(delta);
                    }
                }
                self.printed = content.len();
            }
            ConversationEvent::Notice(notice) => {
                self.stop_spinner();
                if let Some(live) = self.live.take() {
                    live.retract();
                    self.printed = 0;
                }
                if self.view.notices {
                    print_notice(notice);
                }
            }
            ConversationEvent::UserMessage { .. } | ConversationEvent::Settled { .. } => {}
        }
    }

    fn finish(&mut self) {
        self.stop_spinner();
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

fn thinking_spinner() -> indicatif::ProgressBar {
    let spinner = indicatif::ProgressBar::new_spinner();
    if let Ok(template) = indicatif::ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

pub fn print_notice(notice: &Notice) {
    let (marker, heading) = match notice.kind {
        NoticeKind::RateLimited => (style("!").yellow().bold(), "Rate limited"),
        NoticeKind::PaymentRequired => (style("!").yellow().bold(), "Payment required"),
        NoticeKind::Error => (style("!").red().bold(), "Error"),
    };
    eprintln!("\n  {marker} {}: {}", style(heading).bold(), notice.message);
}
