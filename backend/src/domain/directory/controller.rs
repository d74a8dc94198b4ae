//! Task-set driver for a [`DirectoryView`].
//!
//! Each refresh spawns a fetch task onto a [`JoinSet`] and remembers which
//! ticket the task carries. The controller applies completions one at a time,
//! so the view is only ever mutated from the owning task and stale results are
//! dropped by generation instead of racing each other into view state. A task
//! that panics or is cancelled still completes its ticket, as an internal
//! error.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::{Id, JoinSet};
use tracing::{debug, error};

use crate::domain::generation::{ApplyOutcome, LoadTicket, RequestGeneration};
use crate::domain::ports::AlumniRepository;
use crate::domain::{AlumniRecord, Error, TraceId, map_repository_error};

use super::filter::DirectoryFilter;
use super::view::{DirectoryPresentation, DirectoryView};

type FetchResult = Result<Vec<AlumniRecord>, Error>;

/// Owns one directory view and the fetches started for it.
pub struct DirectoryController<R> {
    repository: Arc<R>,
    view: DirectoryView,
    fetches: JoinSet<FetchResult>,
    tickets: HashMap<Id, LoadTicket>,
}

impl<R> DirectoryController<R>
where
    R: AlumniRepository + 'static,
{
    pub fn new(repository: Arc<R>, filter: DirectoryFilter) -> Self {
        Self {
            repository,
            view: DirectoryView::new(filter),
            fetches: JoinSet::new(),
            tickets: HashMap::new(),
        }
    }

    /// Start a fetch of the base snapshot on the runtime.
    ///
    /// Must be called from within a tokio runtime. The active [`TraceId`], if
    /// any, is carried into the spawned task.
    pub fn refresh(&mut self) -> RequestGeneration {
        let ticket = self.view.begin_load();
        let generation = ticket.generation();
        let repository = Arc::clone(&self.repository);
        let fetch = async move { repository.list_all().await.map_err(map_repository_error) };
        let handle = match TraceId::current() {
            Some(trace_id) => self.fetches.spawn(TraceId::scope(trace_id, fetch)),
            None => self.fetches.spawn(fetch),
        };
        debug!(%generation, task = %handle.id(), "directory fetch spawned");
        self.tickets.insert(handle.id(), ticket);
        generation
    }

    /// Wait for the next fetch to finish and apply or discard it.
    ///
    /// Returns `None` when no fetch is outstanding.
    pub async fn process_next(&mut self) -> Option<ApplyOutcome> {
        loop {
            let (id, result) = match self.fetches.join_next_with_id().await? {
                Ok(joined) => joined,
                Err(join_error) => {
                    error!(
                        task = %join_error.id(),
                        error = %join_error,
                        "directory fetch task failed"
                    );
                    (
                        join_error.id(),
                        Err(Error::internal("directory fetch task failed")),
                    )
                }
            };
            // Every spawned task is registered before it can be joined.
            if let Some(ticket) = self.tickets.remove(&id) {
                return Some(self.view.complete_load(ticket, result));
            }
        }
    }

    /// Apply every outstanding fetch, returning the outcomes in arrival order.
    pub async fn settle(&mut self) -> Vec<ApplyOutcome> {
        let mut outcomes = Vec::with_capacity(self.fetches.len());
        while let Some(outcome) = self.process_next().await {
            outcomes.push(outcome);
        }
        outcomes
    }

    pub fn set_filter(&mut self, filter: DirectoryFilter) {
        self.view.set_filter(filter);
    }

    pub fn clear_filters(&mut self) {
        self.view.clear_filters();
    }

    /// Tear the view down; outstanding fetches are discarded when they land.
    pub fn tear_down(&mut self) {
        self.view.tear_down();
    }

    pub fn in_flight(&self) -> usize {
        self.fetches.len()
    }

    pub fn presentation(&self) -> DirectoryPresentation {
        self.view.presentation()
    }

    pub fn view(&self) -> &DirectoryView {
        &self.view
    }
}
