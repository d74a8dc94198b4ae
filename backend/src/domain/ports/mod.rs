//! Domain ports and supporting types for the hexagonal boundary.
//!
//! [`AlumniRepository`] is the driven port (the record store gateway).
//! [`DirectoryQuery`], [`ProfileQuery`], and [`AlumniCommand`] are driving
//! ports consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod alumni_command;
mod alumni_repository;
mod directory_query;
mod fixtures;
mod profile_query;

#[cfg(test)]
pub use alumni_command::MockAlumniCommand;
pub use alumni_command::{AlumniCommand, FixtureAlumniCommand};
#[cfg(test)]
pub use alumni_repository::MockAlumniRepository;
pub use alumni_repository::{
    AlumniRepository, AlumniRepositoryError, CategoryField, NAME_PREFIX_SENTINEL, StoreQuery,
};
#[cfg(test)]
pub use directory_query::MockDirectoryQuery;
pub use directory_query::{DirectoryQuery, FixtureDirectoryQuery};
pub use fixtures::FIXTURE_MEMBER_ID;
#[cfg(test)]
pub use profile_query::MockProfileQuery;
pub use profile_query::{FixtureProfileQuery, ProfileQuery};
