//! The subscription session — join handshake plus the dispatch loop.

use tokio::sync::mpsc;
use tracing::{info, warn};

use fleetglass_common::{EventEnvelope, FeedError};

use crate::dispatch::{dispatch, DispatchOutcome};
use crate::render;
use crate::sink::LogSink;
use crate::transport::{FeedTransport, JoinAck};

/// Where the session stands with the feed topic. Both `Joined` and
/// `JoinFailed` are terminal; reconnection policy belongs to the
/// transport collaborator, not this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinState {
    Disconnected,
    Joining,
    Joined,
    JoinFailed,
}

/// One console session over one feed topic: attach the dispatch handler,
/// join, then render every delivered envelope in order.
pub struct ConsoleSession<T, S> {
    transport: T,
    sink: S,
    state: JoinState,
}

impl<T: FeedTransport, S: LogSink> ConsoleSession<T, S> {
    pub fn new(transport: T, sink: S) -> Self {
        Self {
            transport,
            sink,
            state: JoinState::Disconnected,
        }
    }

    pub fn state(&self) -> JoinState {
        self.state
    }

    /// The accumulated log, for surfaces that read back what was rendered.
    pub fn log(&self) -> &S {
        &self.sink
    }

    pub fn into_log(self) -> S {
        self.sink
    }

    /// Attach to the event stream and issue the join request.
    ///
    /// An accepted join puts one confirmation notice at the top of the
    /// feed. A refusal lands in `JoinFailed` and is recorded on the
    /// diagnostic channel only; the returned stream is still live and the
    /// caller may keep draining it.
    pub async fn subscribe(
        &mut self,
    ) -> Result<mpsc::UnboundedReceiver<EventEnvelope>, FeedError> {
        let events = self.transport.events();
        self.state = JoinState::Joining;

        match self.transport.join().await? {
            JoinAck::Accepted => {
                self.state = JoinState::Joined;
                info!("Joined feed topic");
                self.sink
                    .prepend(render::info_notice(render::JOIN_OK_TITLE, render::JOIN_OK_MESSAGE));
            }
            JoinAck::Refused { reason } => {
                self.state = JoinState::JoinFailed;
                warn!(reason = reason.as_str(), "Unable to join feed topic");
            }
        }

        Ok(events)
    }

    /// Dispatch one envelope into this session's sink.
    pub fn handle(&mut self, envelope: &EventEnvelope) -> DispatchOutcome {
        dispatch(envelope, &mut self.sink)
    }

    /// Subscribe, then render envelopes in delivery order until the
    /// transport closes the stream.
    pub async fn run(&mut self) -> Result<(), FeedError> {
        let mut events = self.subscribe().await?;
        while let Some(envelope) = events.recv().await {
            self.handle(&envelope);
        }
        info!("Feed stream closed");
        Ok(())
    }
}
