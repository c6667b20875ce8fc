//! Stream driver: the per-conversation request/stream state machine.
//!
//! `ChatSession` owns the conversation, the composer input and the stream
//! lifecycle (`Idle -> Sending -> Streaming -> Settled`). It is the only
//! component that advances the transport. The decoder pipeline runs inline
//! in the read loop, so each fragment is applied and published before the
//! next chunk is awaited.
//!
//! Shared state sits behind a short-lived mutex that is never held across
//! an await point. Callers may share a session via `Arc` and observe it
//! through [`ChatSession::subscribe`] while a send is in flight.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use advisor_types::advisor::AdvisorProfile;
use advisor_types::chat::{ChatMessage, StreamOutcome, StreamState};
use advisor_types::config::AdvisorConfig;
use advisor_types::error::{ChatError, StreamError, TransportError};
use advisor_types::event::{ConversationEvent, Notice, NoticeKind};
use advisor_types::llm::CompletionRequest;
use tokio::sync::broadcast;

use crate::chat::conversation::Conversation;
use crate::chat::transport::{ByteStream, CompletionTransport};
use crate::event::EventBus;
use crate::stream::{Accumulator, StreamDecoder};

/// Per-session knobs. Everything is off by default.
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    pub model: Option<String>,
    /// Abort the stream when no chunk arrives within this window.
    pub idle_timeout: Option<Duration>,
    /// Drop an unparsable payload after this many failed re-parses.
    pub max_payload_retries: Option<u32>,
}

impl ChatOptions {
    pub fn from_config(config: &AdvisorConfig) -> Self {
        Self {
            model: config.model.clone(),
            idle_timeout: config.stream.idle_timeout_secs.map(Duration::from_secs),
            max_payload_retries: config.stream.max_payload_retries,
        }
    }
}

/// Why a submission did not start a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Input was empty after trimming.
    EmptyInput,
    /// A stream is already in flight.
    Busy,
}

/// Result of [`ChatSession::send_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Completed,
    /// The request or stream failed; the conversation holds the error reply.
    Failed(ChatError),
    /// Nothing happened: no request was issued and no state changed.
    Rejected(RejectReason),
}

#[derive(Debug, Default)]
struct Shared {
    conversation: Conversation,
    state: StreamState,
    input: String,
    cancel: Option<CancellationToken>,
}

/// A conversation with one advisor over one transport.
pub struct ChatSession<T: CompletionTransport> {
    transport: T,
    advisor: AdvisorProfile,
    options: ChatOptions,
    shared: Mutex<Shared>,
    events: EventBus,
}

impl<T: CompletionTransport> ChatSession<T> {
    pub fn new(transport: T, advisor: AdvisorProfile, options: ChatOptions) -> Self {
        Self {
            transport,
            advisor,
            options,
            shared: Mutex::new(Shared::default()),
            events: EventBus::default(),
        }
    }

    pub fn advisor(&self) -> &AdvisorProfile {
        &self.advisor
    }

    pub fn options(&self) -> &ChatOptions {
        &self.options
    }

    /// Replace the composer input.
    pub fn set_input(&self, input: impl Into<String>) {
        self.lock().input = input.into();
    }

    pub fn input(&self) -> String {
        self.lock().input.clone()
    }

    /// Snapshot of the conversation, including any in-progress reply.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.lock().conversation.messages().to_vec()
    }

    pub fn state(&self) -> StreamState {
        self.lock().state
    }

    /// Whether a request or stream is in flight.
    pub fn is_loading(&self) -> bool {
        self.state().is_active()
    }

    /// Receive conversation events from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ConversationEvent> {
        self.events.subscribe()
    }

    /// Forget the conversation. Ignored while a stream is in flight.
    pub fn clear(&self) -> bool {
        let mut shared = self.lock();
        if shared.state.is_active() {
            return false;
        }
        shared.conversation.clear();
        shared.state = StreamState::Idle;
        true
    }

    /// Cancel the in-flight request. Returns false when nothing is running.
    pub fn cancel(&self) -> bool {
        match &self.lock().cancel {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Submit the current input and drive the response to completion.
    ///
    /// Resolves once the stream settles. A submission while another stream
    /// is in flight, or with blank input, is rejected without side effects.
    pub async fn send_message(&self) -> SendOutcome {
        let (content, request, token) = {
            let mut shared = self.lock();
            if shared.state.is_active() {
                debug!(state = %shared.state, "submission ignored, stream in flight");
                return SendOutcome::Rejected(RejectReason::Busy);
            }
            let content = shared.input.trim().to_string();
            if content.is_empty() {
                return SendOutcome::Rejected(RejectReason::EmptyInput);
            }

            shared.input.clear();
            shared.conversation.push_user(content.clone());
            shared.state = StreamState::Sending;
            let token = CancellationToken::new();
            shared.cancel = Some(token.clone());
            let request = self.build_request(shared.conversation.messages());
            (content, request, token)
        };
        let in_flight = InFlight::new(self);

        self.events
            .publish(ConversationEvent::UserMessage { content });
        info!(
            advisor = %self.advisor.slug,
            transport = self.transport.name(),
            messages = request.messages.len(),
            "sending message"
        );

        let result = self.drive(&request, &token).await;
        in_flight.settle(result)
    }

    fn build_request(&self, messages: &[ChatMessage]) -> CompletionRequest {
        CompletionRequest {
            messages: messages.to_vec(),
            advisor: Some(self.advisor.slug.clone()),
            system: self.advisor.system_prompt.clone(),
            model: self.options.model.clone(),
            stream: true,
        }
    }

    async fn drive(
        &self,
        request: &CompletionRequest,
        token: &CancellationToken,
    ) -> Result<(), ChatError> {
        let mut body = tokio::select! {
            biased;
            _ = token.cancelled() => return Err(StreamError::Cancelled.into()),
            opened = self.transport.open_stream(request) => opened?,
        };

        self.lock().state = StreamState::Streaming;
        debug!("response body open, streaming");

        let mut decoder = StreamDecoder::with_retry_limit(self.options.max_payload_retries);
        let mut accumulator = Accumulator::new(self.events.clone());
        let mut chunks = 0usize;

        loop {
            let chunk = tokio::select! {
                biased;
                _ = token.cancelled() => return Err(StreamError::Cancelled.into()),
                read = read_chunk(&mut body, self.options.idle_timeout) => read?,
            };
            let Some(chunk) = chunk else { break };
            chunks += 1;
            let fragments = decoder.push(&chunk);
            self.apply(&mut accumulator, fragments);
        }

        let fragments = decoder.finish();
        self.apply(&mut accumulator, fragments);

        debug!(
            chunks,
            fragments = accumulator.fragments(),
            dropped = decoder.dropped(),
            "stream closed"
        );
        Ok(())
    }

    fn apply(&self, accumulator: &mut Accumulator, fragments: Vec<String>) {
        if fragments.is_empty() {
            return;
        }
        let mut shared = self.lock();
        for fragment in &fragments {
            accumulator.append(fragment, &mut shared.conversation);
        }
    }

    fn settle(&self, result: Result<(), ChatError>) -> SendOutcome {
        let mut shared = self.lock();
        shared.cancel = None;

        match result {
            Ok(()) => {
                shared.conversation.finalize();
                shared.state = StreamState::Settled(StreamOutcome::Success);
                drop(shared);

                info!(advisor = %self.advisor.slug, "response complete");
                self.events.publish(ConversationEvent::Settled {
                    outcome: StreamOutcome::Success,
                });
                SendOutcome::Completed
            }
            Err(err) => {
                let notice = notice_for(&err);
                shared.conversation.discard_in_progress();
                shared.conversation.push_assistant(err.to_string());
                shared.state = StreamState::Settled(StreamOutcome::Error);
                drop(shared);

                warn!(advisor = %self.advisor.slug, error = %err, "response failed");
                self.events.publish(ConversationEvent::Notice(notice));
                self.events.publish(ConversationEvent::Settled {
                    outcome: StreamOutcome::Error,
                });
                SendOutcome::Failed(err)
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Settles a send whose future is dropped before the stream ends.
///
/// A dropped send counts as cancelled, so the session never stays busy
/// with nothing driving it.
struct InFlight<'a, T: CompletionTransport> {
    session: &'a ChatSession<T>,
    armed: bool,
}

impl<'a, T: CompletionTransport> InFlight<'a, T> {
    fn new(session: &'a ChatSession<T>) -> Self {
        Self {
            session,
            armed: true,
        }
    }

    fn settle(mut self, result: Result<(), ChatError>) -> SendOutcome {
        self.armed = false;
        self.session.settle(result)
    }
}

impl<T: CompletionTransport> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            debug!("send dropped before the stream settled");
            self.session.settle(Err(StreamError::Cancelled.into()));
        }
    }
}

async fn read_chunk(
    body: &mut ByteStream,
    idle_timeout: Option<Duration>,
) -> Result<Option<Vec<u8>>, StreamError> {
    let next = match idle_timeout {
        Some(limit) => tokio::time::timeout(limit, body.next())
            .await
            .map_err(|_| StreamError::IdleTimeout(limit.as_secs()))?,
        None => body.next().await,
    };
    next.transpose()
}

/// The user-facing notification for a failed turn.
pub fn notice_for(err: &ChatError) -> Notice {
    let kind = match err {
        ChatError::Transport(TransportError::RateLimited) => NoticeKind::RateLimited,
        ChatError::Transport(TransportError::PaymentRequired) => NoticeKind::PaymentRequired,
        _ => NoticeKind::Error,
    };
    Notice {
        kind,
        message: err.to_string(),
    }
}
