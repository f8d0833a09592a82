//! Audio stream client: fetches audio documents from a stream server and
//! plays them through a small play/pause/next/previous state machine.

pub mod api;
pub mod config;
pub mod constants;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

pub use api::{Codec, HttpTransport, StreamCodec, Transport};
pub use config::Config;
pub use models::{AudioDocument, FetchRequest, FileType, Playlist, StreamResponse, TrackId};
pub use services::StreamController;
pub use state::{ControllerState, NowPlaying};
pub use utils::{MediaEngine, RodioEngine};
