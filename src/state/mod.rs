pub mod background_tasks;
pub mod stream_state;

pub use background_tasks::{BackgroundTasks, PendingFetch};
pub use stream_state::{ControllerState, NowPlaying};
