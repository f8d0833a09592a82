// Stream server client modules

pub mod codec;
pub mod transport;

// Re-export commonly used types
pub use codec::{Codec, StreamCodec};
pub use transport::{HttpTransport, Transport};
