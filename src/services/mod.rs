/// Services module - business logic layer
///
/// Services own the control flow between the network edge and the playback
/// edge. The presentation layer only calls into them and renders what they publish.
pub mod stream_controller;

// Re-export commonly used types
pub use stream_controller::StreamController;
