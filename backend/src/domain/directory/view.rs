//! Directory view-state holder.
//!
//! The holder owns the base snapshot, the current filter, and the request
//! generation. Presentation is derived on demand by running the pure engine
//! over the base snapshot, so filter changes never need a refetch.

use tracing::debug;

use crate::domain::generation::{
    ApplyOutcome, GenerationTracker, LoadTicket, RequestGeneration,
};
use crate::domain::{AlumniRecord, Error, ErrorCode};

use super::filter::DirectoryFilter;
use super::listing::{DirectoryListing, ListingOutcome};

/// What the directory page should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryPresentation {
    /// A fetch is in flight and nothing has been applied yet.
    Loading,
    /// The store could not be reached; offer a retry.
    Unavailable { message: String },
    /// The store failed the request; offer a retry.
    Failed { message: String },
    /// Loaded, but the filter excludes every member; offer to clear filters.
    NoMatches(DirectoryListing),
    Results(DirectoryListing),
}

#[derive(Debug, Clone)]
enum LoadState {
    Loading,
    Loaded(Vec<AlumniRecord>),
    Failed(Error),
}

/// State for one directory page instance.
#[derive(Debug)]
pub struct DirectoryView {
    filter: DirectoryFilter,
    generations: GenerationTracker,
    state: LoadState,
}

impl Default for DirectoryView {
    fn default() -> Self {
        Self::new(DirectoryFilter::cleared())
    }
}

impl DirectoryView {
    pub fn new(filter: DirectoryFilter) -> Self {
        Self {
            filter,
            generations: GenerationTracker::default(),
            state: LoadState::Loading,
        }
    }

    /// Start a fetch of the base snapshot.
    ///
    /// Any fetch started earlier is superseded. A failure presentation is
    /// replaced by `Loading` for the retry; a previously loaded snapshot
    /// stays visible until this fetch completes.
    pub fn begin_load(&mut self) -> LoadTicket {
        let ticket = self.generations.issue();
        if matches!(self.state, LoadState::Failed(_)) {
            self.state = LoadState::Loading;
        }
        debug!(generation = %ticket.generation(), "directory load started");
        ticket
    }

    /// Hand back a fetch result.
    ///
    /// The result is applied only when `ticket` belongs to the most recently
    /// started fetch and the view is still live.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<AlumniRecord>, Error>,
    ) -> ApplyOutcome {
        if let Err(reason) = self.generations.admit(&ticket) {
            debug!(
                generation = %ticket.generation(),
                latest = %self.generations.latest(),
                ?reason,
                "directory load discarded"
            );
            return ApplyOutcome::Discarded(reason);
        }
        self.state = match result {
            Ok(records) => LoadState::Loaded(records),
            Err(error) => LoadState::Failed(error),
        };
        ApplyOutcome::Applied
    }

    /// Replace the filter; presentation is recomputed from the base snapshot.
    pub fn set_filter(&mut self, filter: DirectoryFilter) {
        self.filter = filter;
    }

    pub fn clear_filters(&mut self) {
        self.filter = DirectoryFilter::cleared();
    }

    pub fn filter(&self) -> &DirectoryFilter {
        &self.filter
    }

    /// Mark the view as gone; every outstanding fetch is discarded on arrival.
    pub fn tear_down(&mut self) {
        self.generations.tear_down();
    }

    pub fn is_torn_down(&self) -> bool {
        self.generations.is_torn_down()
    }

    pub fn latest_generation(&self) -> RequestGeneration {
        self.generations.latest()
    }

    /// Loaded base snapshot, if the last applied fetch succeeded.
    pub fn records(&self) -> Option<&[AlumniRecord]> {
        match &self.state {
            LoadState::Loaded(records) => Some(records.as_slice()),
            _ => None,
        }
    }

    pub fn presentation(&self) -> DirectoryPresentation {
        match &self.state {
            LoadState::Loading => DirectoryPresentation::Loading,
            LoadState::Failed(error) => failure_presentation(error),
            LoadState::Loaded(records) => {
                let listing = DirectoryListing::assemble(records, self.filter.clone());
                match listing.outcome() {
                    ListingOutcome::Results => DirectoryPresentation::Results(listing),
                    ListingOutcome::NoMatches => DirectoryPresentation::NoMatches(listing),
                }
            }
        }
    }
}

fn failure_presentation(error: &Error) -> DirectoryPresentation {
    let message = error.message().to_owned();
    match error.code() {
        ErrorCode::ServiceUnavailable => DirectoryPresentation::Unavailable { message },
        _ => DirectoryPresentation::Failed { message },
    }
}
