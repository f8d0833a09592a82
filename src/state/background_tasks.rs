use crate::utils::async_helper::{FetchHandle, FetchStatus};

/// Fetch issued by the controller, tagged with what it was issued for
pub struct PendingFetch {
    pub index: usize,
    pub generation: u64,
    pub handle: FetchHandle,
}

/// The controller's single in-flight fetch slot
#[derive(Default)]
pub struct BackgroundTasks {
    fetch: Option<PendingFetch>,
    last_generation: u64,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the tag for the next fetch
    pub fn next_generation(&mut self) -> u64 {
        self.last_generation += 1;
        self.last_generation
    }

    /// Whether `generation` is the most recently reserved tag
    pub fn is_latest(&self, generation: u64) -> bool {
        generation == self.last_generation
    }

    /// Occupy the slot, cancelling whatever was there
    pub fn start(&mut self, pending: PendingFetch) {
        self.cancel();
        self.fetch = Some(pending);
    }

    /// Cancel and clear the in-flight fetch, if any
    pub fn cancel(&mut self) {
        if let Some(mut pending) = self.fetch.take() {
            log::debug!(
                "[BackgroundTasks] Cancelling fetch #{} for index {}",
                pending.generation,
                pending.index
            );
            pending.handle.cancel();
        }
    }

    /// Take the in-flight fetch out of the slot once it has finished.
    /// Returns `(index, generation, status)`; a pending fetch stays put.
    pub fn take_finished(&mut self) -> Option<(usize, u64, FetchStatus)> {
        let pending = self.fetch.as_mut()?;
        match pending.handle.try_take() {
            FetchStatus::Pending => None,
            status => {
                let (index, generation) = (pending.index, pending.generation);
                self.fetch = None;
                Some((index, generation, status))
            }
        }
    }
}
