pub mod config;
pub mod error;
pub mod events;
pub mod types;

pub use config::Config;
pub use error::FeedError;
pub use events::{EventEnvelope, FeedEvent, KNOWN_KINDS};
pub use types::SensorDescriptor;
