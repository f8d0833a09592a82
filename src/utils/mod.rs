pub mod async_helper;
pub mod error_handling;
pub mod errors;
pub mod http;
pub mod media;
pub mod mediaplay;

// Re-export commonly used types
pub use errors::{
    ConfigError, DecodeError, EncodeError, PlaybackError, StreamError, TransportError,
};
pub use media::MediaEngine;
pub use mediaplay::RodioEngine;
