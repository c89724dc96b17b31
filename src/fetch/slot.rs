//! Fetch slot
//!
//! Owns the observable fetch state for one view. Each load takes a fresh
//! invocation id; a completion is applied only if no newer load has started
//! since, so a slow response for an old URL cannot overwrite fresher state.

use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

use super::envelope::Resource;
use super::fetcher::ResourceFetcher;
use super::state::FetchState;

/// Identity of one started load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub id: u64,
    pub url: String,
}

pub struct FetchSlot<T> {
    fetcher: ResourceFetcher,
    latest: AtomicU64,
    sender: watch::Sender<FetchState<T>>,
}

impl<T: Resource> FetchSlot<T> {
    pub fn new(fetcher: ResourceFetcher) -> Self {
        let (sender, _) = watch::channel(FetchState::Loading);
        Self {
            fetcher,
            latest: AtomicU64::new(0),
            sender,
        }
    }

    /// Receiver that observes every state the slot publishes.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.sender.subscribe()
    }

    pub fn current(&self) -> FetchState<T>
    where
        T: Clone,
    {
        self.sender.borrow().clone()
    }

    /// Starts a new invocation and resets the state to `Loading`.
    pub fn begin(&self, url: &str) -> FetchTicket {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.sender.send_replace(FetchState::Loading);
        debug!("Fetch #{} started for {}", id, url);
        FetchTicket {
            id,
            url: url.to_string(),
        }
    }

    /// Publishes a settled state if `ticket` is still the newest invocation.
    ///
    /// Returns false when the completion was stale and discarded.
    pub fn complete(&self, ticket: &FetchTicket, state: FetchState<T>) -> bool {
        let applied = self.sender.send_if_modified(|current| {
            if self.latest.load(Ordering::SeqCst) != ticket.id {
                return false;
            }
            *current = state;
            true
        });

        if !applied {
            debug!(
                "Discarded stale fetch #{} for {} (latest is #{})",
                ticket.id,
                ticket.url,
                self.latest.load(Ordering::SeqCst)
            );
        }
        applied
    }

    /// Begins, fetches and completes one invocation for `url`.
    pub async fn load(&self, url: &str) -> bool {
        let ticket = self.begin(url);
        let state = self.fetcher.fetch::<T>(url).await;
        self.complete(&ticket, state)
    }
}
