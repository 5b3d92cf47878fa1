//! Record Store subsystem
//!
//! The core of the service: record identity, schema enforcement on writes,
//! partial updates, and all-or-nothing weather enrichment on create.
//!
//! Store state is owned by a [`RecordStore`] instance and shared by handle.
//! There is no global collection and no persistence.

mod errors;
mod model;
mod store;

pub use errors::{ErrorKind, StoreError, StoreResult};
pub use model::TravelRecord;
pub use store::RecordStore;
