//! The interactive consumer loop: one re-entrant event-pull loop that drives
//! a single turn from "request sent" to a terminal state.
//!
//! A turn moves through `Waiting` (indicator shown, no token yet) into
//! `Streaming` (growing transcript) and ends `Completed`, `Cancelled` or
//! `Failed`. There is exactly one suspension point — the `select!` below —
//! so cancellation raised while waiting on a read stops the read and falls
//! through to partial-result handling. Whatever accumulated by then is still
//! appended to the conversation, preserving context on every path.
//!
//! Display refresh is throttled to [`REFRESH_INTERVAL`] (~10 Hz) so a fast
//! stream cannot flood the output device; accumulation itself is never
//! throttled and never drops a fragment.

use std::time::Duration;

use futures_util::StreamExt;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::conversation::Conversation;
use crate::error::ChatError;
use crate::event::StreamEvent;
use crate::message::Message;
use crate::provider::ChatStreamProvider;
use crate::render::TurnRenderer;

/// Cadence of indicator animation and transcript repaints.
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(100);

/// How a turn ended.
#[derive(Debug)]
pub enum TurnEnding {
    /// The server signalled completion (or the stream was exhausted).
    Completed,
    /// The user cancelled mid-stream; the partial reply was kept.
    Cancelled,
    /// The backend reported an error; any partial reply was kept.
    Failed(ChatError),
}

/// Result of [`run_turn`]: the (possibly partial) reply text plus the way
/// the turn ended. The reply has already been appended to the conversation.
#[derive(Debug)]
pub struct TurnOutcome {
    pub reply: String,
    pub ending: TurnEnding,
}

impl TurnOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self.ending, TurnEnding::Completed)
    }
}

enum Phase {
    Waiting,
    Streaming,
}

/// Run one turn: append the user message, stream the reply through
/// `renderer`, and append the assistant message when the stream ends.
///
/// Cancelling `cancel` at any suspension point stops pulling events and
/// drops the stream, which closes the transport connection. The accumulated
/// text (possibly empty) still becomes the assistant message so the next
/// request carries a coherent history.
pub async fn run_turn<P, R>(
    provider: &P,
    conversation: &mut Conversation,
    user_input: impl Into<String>,
    renderer: &mut R,
    cancel: &CancellationToken,
) -> TurnOutcome
where
    P: ChatStreamProvider,
    R: TurnRenderer,
{
    conversation.push(Message::user(user_input));

    let stream = provider.stream_chat(conversation.messages());
    futures_util::pin_mut!(stream);

    let mut reply = String::new();
    let mut dirty = false;
    let mut phase = Phase::Waiting;
    renderer.indicator_start();

    let mut ticker = tokio::time::interval(REFRESH_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let ending = loop {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                debug!(fragments = reply.len(), "turn cancelled");
                break TurnEnding::Cancelled;
            }

            event = stream.next() => match event {
                Some(Ok(StreamEvent::Delta(text))) => {
                    reply.push_str(&text);
                    if let Phase::Waiting = phase {
                        phase = Phase::Streaming;
                        renderer.indicator_stop();
                        // First fragment is rendered immediately, not
                        // deferred to the next tick.
                        renderer.render(&reply);
                    } else {
                        dirty = true;
                    }
                }
                Some(Ok(StreamEvent::Done)) | None => break TurnEnding::Completed,
                Some(Err(err)) => break TurnEnding::Failed(err),
            },

            _ = ticker.tick() => match phase {
                Phase::Waiting => renderer.indicator_tick(),
                Phase::Streaming => {
                    if dirty {
                        renderer.render(&reply);
                        dirty = false;
                    }
                }
            },
        }
    };

    if let Phase::Waiting = phase {
        renderer.indicator_stop();
    }
    if dirty {
        // The throttle must never hide the tail of the reply.
        renderer.render(&reply);
    }

    conversation.push(Message::assistant(reply.clone()));
    TurnOutcome { reply, ending }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use std::pin::Pin;
    use std::sync::Mutex;

    use futures_core::stream::Stream;
    use futures_util::stream;

    /// Provider that plays back a scripted event sequence, optionally
    /// hanging afterwards instead of ending the stream.
    struct ScriptedProvider {
        events: Mutex<Option<Vec<Result<StreamEvent>>>>,
        hang_at_end: bool,
    }

    impl ScriptedProvider {
        fn new(events: Vec<Result<StreamEvent>>) -> Self {
            Self {
                events: Mutex::new(Some(events)),
                hang_at_end: false,
            }
        }

        fn hanging(events: Vec<Result<StreamEvent>>) -> Self {
            Self {
                events: Mutex::new(Some(events)),
                hang_at_end: true,
            }
        }
    }

    impl ChatStreamProvider for ScriptedProvider {
        type Events<'s> = Pin<Box<dyn Stream<Item = Result<StreamEvent>> + Send + 's>>;

        fn stream_chat<'s>(&'s self, _messages: &[Message]) -> Self::Events<'s> {
            let events = self
                .events
                .lock()
                .unwrap()
                .take()
                .expect("stream_chat called twice");
            if self.hang_at_end {
                Box::pin(stream::iter(events).chain(stream::pending()))
            } else {
                Box::pin(stream::iter(events))
            }
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        calls: Vec<String>,
    }

    impl TurnRenderer for RecordingRenderer {
        fn indicator_start(&mut self) {
            self.calls.push("start".into());
        }

        fn indicator_tick(&mut self) {
            self.calls.push("tick".into());
        }

        fn indicator_stop(&mut self) {
            self.calls.push("stop".into());
        }

        fn render(&mut self, text_so_far: &str) {
            self.calls.push(format!("render:{text_so_far}"));
        }
    }

    fn delta(text: &str) -> Result<StreamEvent> {
        Ok(StreamEvent::Delta(text.into()))
    }

    #[tokio::test(start_paused = true)]
    async fn completed_turn_concatenates_fragments() {
        let provider =
            ScriptedProvider::new(vec![delta("Hel"), delta("lo"), Ok(StreamEvent::Done)]);
        let mut conversation = Conversation::new();
        let mut renderer = RecordingRenderer::default();
        let cancel = CancellationToken::new();

        let outcome = run_turn(&provider, &mut conversation, "hi", &mut renderer, &cancel).await;

        assert!(outcome.is_completed());
        assert_eq!(outcome.reply, "Hello");
        assert_eq!(conversation.last().unwrap(), &Message::assistant("Hello"));
        assert_eq!(conversation.len(), 2);

        // Indicator stops before the first render; the first fragment is
        // rendered immediately and the final text is always rendered.
        let stop = renderer.calls.iter().position(|c| c == "stop").unwrap();
        assert_eq!(renderer.calls[stop + 1], "render:Hel");
        assert_eq!(renderer.calls.last().unwrap(), "render:Hello");
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_without_done_marker_is_an_empty_completion() {
        let provider = ScriptedProvider::new(vec![]);
        let mut conversation = Conversation::new();
        let mut renderer = RecordingRenderer::default();
        let cancel = CancellationToken::new();

        let outcome = run_turn(&provider, &mut conversation, "hi", &mut renderer, &cancel).await;

        assert!(outcome.is_completed());
        assert_eq!(outcome.reply, "");
        assert_eq!(conversation.last().unwrap(), &Message::assistant(""));
        // The indicator must still be torn down.
        assert!(renderer.calls.contains(&"stop".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_keeps_exactly_the_received_fragments() {
        let provider = ScriptedProvider::hanging(vec![delta("one "), delta("two")]);
        let mut conversation = Conversation::new();
        let mut renderer = RecordingRenderer::default();
        let cancel = CancellationToken::new();

        let canceller = cancel.clone();
        let (outcome, _) = tokio::join!(
            run_turn(&provider, &mut conversation, "hi", &mut renderer, &cancel),
            async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                canceller.cancel();
            }
        );

        assert!(matches!(outcome.ending, TurnEnding::Cancelled));
        assert_eq!(outcome.reply, "one two");
        assert_eq!(conversation.last().unwrap(), &Message::assistant("one two"));
    }

    #[tokio::test(start_paused = true)]
    async fn error_event_fails_the_turn_but_keeps_partial_output() {
        let provider = ScriptedProvider::new(vec![delta("par"), Err(ChatError::Truncated)]);
        let mut conversation = Conversation::new();
        let mut renderer = RecordingRenderer::default();
        let cancel = CancellationToken::new();

        let outcome = run_turn(&provider, &mut conversation, "hi", &mut renderer, &cancel).await;

        assert!(matches!(
            outcome.ending,
            TurnEnding::Failed(ChatError::Truncated)
        ));
        assert_eq!(outcome.reply, "par");
        assert_eq!(conversation.last().unwrap(), &Message::assistant("par"));
    }

    #[tokio::test(start_paused = true)]
    async fn immediate_cancellation_yields_empty_assistant_message() {
        let provider = ScriptedProvider::hanging(vec![]);
        let mut conversation = Conversation::new();
        let mut renderer = RecordingRenderer::default();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = run_turn(&provider, &mut conversation, "hi", &mut renderer, &cancel).await;

        assert!(matches!(outcome.ending, TurnEnding::Cancelled));
        assert_eq!(conversation.last().unwrap(), &Message::assistant(""));
    }
}
