//! ondemand-activator — wake a scaled-to-zero service.
//!
//! One read-check-write round trip against the orchestration control plane:
//!
//! ```text
//! desired = describe(cluster, [service]).desired_count
//!
//! if desired == 0:
//!     update(cluster, service, desired_count = 1)   // Raised
//! else:
//!     no-op                                         // AlreadyRunning
//! ```
//!
//! The activator keeps no state between calls and never retries. Concurrent
//! activations are not coordinated; setting the count to 1 twice is
//! harmless because the update is idempotent.

pub mod activator;
#[cfg(any(test, feature = "test-util"))]
pub mod logs;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;

pub use activator::Activator;
#[cfg(any(test, feature = "test-util"))]
pub use logs::LogCapture;
#[cfg(any(test, feature = "test-util"))]
pub use memory::{ControlCall, InMemoryControl};
