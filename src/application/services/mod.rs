//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem) but are themselves
//! concrete structs, not traits.

mod session;
mod snapshot;

pub use session::TreeSession;
pub use snapshot::{parse_snapshot, SnapshotService};
