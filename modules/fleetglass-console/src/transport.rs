//! The feed transport seam — an opaque pub/sub primitive.
//!
//! A real deployment puts a channel client behind [`FeedTransport`]; the
//! monitor binary and the tests run on [`LocalFeed`], an in-process
//! channel pair with a scripted join acknowledgement.

use async_trait::async_trait;
use tokio::sync::mpsc;

use fleetglass_common::{EventEnvelope, FeedError};

/// Join acknowledgement for the feed topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinAck {
    Accepted,
    Refused { reason: String },
}

/// One subscribed topic on the transport collaborator. Envelope delivery
/// is modeled as message passing: `events()` hands over the single
/// consumer end, `join()` issues the join request for the topic the
/// transport was constructed with. Topic name and credentials belong to
/// whoever built the transport; the console never sees them.
#[async_trait]
pub trait FeedTransport {
    /// Take the inbound envelope stream. Called once, before `join`.
    fn events(&mut self) -> mpsc::UnboundedReceiver<EventEnvelope>;

    /// Ask to join the topic. `Err` means the transport itself failed; a
    /// refusal comes back as a normal [`JoinAck`].
    async fn join(&mut self) -> Result<JoinAck, FeedError>;
}

/// In-process feed. The consumer half goes to the session; the
/// [`FeedPublisher`] half goes to whatever produces envelopes.
pub struct LocalFeed {
    receiver: Option<mpsc::UnboundedReceiver<EventEnvelope>>,
    ack: JoinAck,
}

impl LocalFeed {
    /// A feed whose join request will be accepted.
    pub fn accepting() -> (Self, FeedPublisher) {
        Self::with_ack(JoinAck::Accepted)
    }

    /// A feed whose join request will be refused with `reason`.
    pub fn refusing(reason: impl Into<String>) -> (Self, FeedPublisher) {
        Self::with_ack(JoinAck::Refused {
            reason: reason.into(),
        })
    }

    fn with_ack(ack: JoinAck) -> (Self, FeedPublisher) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                receiver: Some(receiver),
                ack,
            },
            FeedPublisher { sender },
        )
    }
}

#[async_trait]
impl FeedTransport for LocalFeed {
    fn events(&mut self) -> mpsc::UnboundedReceiver<EventEnvelope> {
        // A second take yields an already-closed stream.
        self.receiver
            .take()
            .unwrap_or_else(|| mpsc::unbounded_channel().1)
    }

    async fn join(&mut self) -> Result<JoinAck, FeedError> {
        Ok(self.ack.clone())
    }
}

/// Producing side of a [`LocalFeed`]. Cloneable; dropping every publisher
/// closes the stream and ends the session loop.
#[derive(Clone)]
pub struct FeedPublisher {
    sender: mpsc::UnboundedSender<EventEnvelope>,
}

impl FeedPublisher {
    /// Publish a raw feed message. Returns false once the console is gone.
    pub fn publish(&self, payload: serde_json::Value) -> bool {
        self.sender.send(EventEnvelope::from_value(payload)).is_ok()
    }
}
