//! Domain primitives, the directory engine, and domain services.
//!
//! Purpose: define the alumni record model and the transport-agnostic logic
//! built on it. Nothing here performs I/O directly; store access goes through
//! the ports in [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`) — transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - AlumniRecord, AlumniDraft, AlumniPatch — record model.
//! - directory — pure filtering, listings, and the directory view holder.
//! - ProfileLookup, ProfileView — single-member lookup results and state.
//! - DirectoryService — implementation of every driving port.
//! - AlumniSeeder — loads the seed dataset through the gateway.

pub mod alumni;
pub mod directory;
pub mod directory_service;
pub mod error;
pub mod generation;
pub mod ports;
pub mod profile;
pub mod seeding;
pub mod trace_id;

pub use self::alumni::{
    ALUMNI_ID_MAX_BYTES, AlumniDetails, AlumniDraft, AlumniId, AlumniName, AlumniPatch,
    AlumniRecord, AlumniValidationError,
};
pub use self::directory_service::DirectoryService;
pub(crate) use self::directory_service::map_repository_error;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::generation::{ApplyOutcome, DiscardReason, LoadTicket, RequestGeneration};
pub use self::profile::{ProfileLookup, ProfilePresentation, ProfileView};
pub use self::seeding::{AlumniSeeder, AlumniSeedingError, SeedOutcome, draft_from_seed};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use alumni_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("member not found"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
