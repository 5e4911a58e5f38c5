//! FleetGlass console core — the event dispatch and rendering pipeline.
//!
//! An envelope arrives from the transport, the dispatch table selects a
//! renderer, and the rendered entry lands at the top of the log sink.
//! Unknown kinds and undecodable payloads go to the diagnostic channel
//! (tracing) instead of the operator feed.

pub mod dispatch;
pub mod entry;
pub mod render;
pub mod session;
pub mod sink;
pub mod transport;

pub use dispatch::{dispatch, DispatchOutcome};
pub use entry::{EntryCategory, LogEntry};
pub use session::{ConsoleSession, JoinState};
pub use sink::{LogSink, MemoryLog};
pub use transport::{FeedPublisher, FeedTransport, JoinAck, LocalFeed};
