//! ondemand-ecs — the AWS ECS control plane behind [`ServiceControl`].
//!
//! Credentials and transport come from the standard AWS provider chain via
//! `aws-config`; this crate only translates between the SDK's shapes and the
//! launcher's own types. Every SDK failure (network, auth, throttling,
//! service exceptions) becomes [`ActivationError::Transport`].
//!
//! [`ServiceControl`]: ondemand_core::ServiceControl
//! [`ActivationError::Transport`]: ondemand_core::ActivationError::Transport

pub mod control;
pub mod convert;

pub use control::EcsControl;
