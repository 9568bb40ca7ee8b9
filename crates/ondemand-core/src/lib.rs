pub mod config;
pub mod control;
pub mod error;
pub mod types;

pub use config::{ActivatorConfig, ConfigError};
pub use control::{ControlFuture, ServiceControl};
pub use error::{ActivationError, ActivationResult};
pub use types::*;
