//! Directory query engine and view state.
//!
//! - [`filter`] holds the pure predicates and option derivation.
//! - [`DirectoryListing`] assembles a filtered view plus option vocabularies.
//! - [`DirectoryView`] and [`DirectoryController`] own view state and apply
//!   fetch results by request generation.

mod controller;
pub mod filter;
mod listing;
mod view;

pub use controller::DirectoryController;
pub use filter::{
    DirectoryFilter, FilterOptions, apply_filters, derive_batch_options,
    derive_profession_options, filter_records,
};
pub use listing::{DirectoryListing, ListingOutcome};
pub use view::{DirectoryPresentation, DirectoryView};

#[cfg(test)]
mod tests;
