//! Profile lookup results and the profile view-state holder.

use tracing::debug;

use super::generation::{ApplyOutcome, GenerationTracker, LoadTicket};
use super::{AlumniId, AlumniRecord, Error, ErrorCode};

/// Outcome of resolving one member.
///
/// A missing member is an ordinary outcome, not a fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileLookup {
    Found(AlumniRecord),
    NotFound,
}

impl ProfileLookup {
    pub fn into_record(self) -> Option<AlumniRecord> {
        match self {
            Self::Found(record) => Some(record),
            Self::NotFound => None,
        }
    }
}

impl From<Option<AlumniRecord>> for ProfileLookup {
    fn from(value: Option<AlumniRecord>) -> Self {
        value.map_or(Self::NotFound, Self::Found)
    }
}

/// What the profile page should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfilePresentation {
    Loading,
    /// "Member not found", with navigation back to the directory.
    NotFound,
    Unavailable { message: String },
    Failed { message: String },
    Found(AlumniRecord),
}

/// State for one profile page instance.
///
/// Navigating between profiles reuses the holder; each navigation starts a
/// new generation so a slow lookup for the previous member is discarded.
#[derive(Debug, Default)]
pub struct ProfileView {
    requested: Option<AlumniId>,
    generations: GenerationTracker,
    presentation: Option<ProfilePresentation>,
}

impl ProfileView {
    pub fn begin_load(&mut self, id: AlumniId) -> LoadTicket {
        let ticket = self.generations.issue();
        debug!(generation = %ticket.generation(), %id, "profile load started");
        self.requested = Some(id);
        self.presentation = None;
        ticket
    }

    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<ProfileLookup, Error>,
    ) -> ApplyOutcome {
        if let Err(reason) = self.generations.admit(&ticket) {
            debug!(generation = %ticket.generation(), ?reason, "profile load discarded");
            return ApplyOutcome::Discarded(reason);
        }
        self.presentation = Some(match result {
            Ok(ProfileLookup::Found(record)) => ProfilePresentation::Found(record),
            Ok(ProfileLookup::NotFound) => ProfilePresentation::NotFound,
            Err(error) if error.code() == ErrorCode::ServiceUnavailable => {
                ProfilePresentation::Unavailable {
                    message: error.message().to_owned(),
                }
            }
            Err(error) => ProfilePresentation::Failed {
                message: error.message().to_owned(),
            },
        });
        ApplyOutcome::Applied
    }

    /// Identifier of the most recently requested member.
    pub fn requested(&self) -> Option<&AlumniId> {
        self.requested.as_ref()
    }

    pub fn tear_down(&mut self) {
        self.generations.tear_down();
    }

    pub fn presentation(&self) -> ProfilePresentation {
        self.presentation
            .clone()
            .unwrap_or(ProfilePresentation::Loading)
    }
}
