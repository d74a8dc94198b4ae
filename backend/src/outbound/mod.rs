//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: process-local gateway for demo deployments and tests
//! - **firestore**: Firestore REST v1 gateway over reqwest
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod auto_id;
pub mod firestore;
pub mod memory;
