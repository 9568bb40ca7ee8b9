//! The control-plane capability the activator is written against.
//!
//! Real deployments inject the ECS-backed implementation; tests inject an
//! in-process one. Methods return boxed futures so the trait stays object
//! safe.

use std::future::Future;
use std::pin::Pin;

use crate::error::ActivationResult;
use crate::types::{ServiceDescriptions, ServiceUpdate};

/// Boxed future alias for control-plane calls.
pub type ControlFuture<'a, T> = Pin<Box<dyn Future<Output = ActivationResult<T>> + Send + 'a>>;

/// Describe/update access to services in an orchestration cluster.
pub trait ServiceControl: Send + Sync {
    /// Describe the given services in `cluster`.
    ///
    /// Identifiers that cannot be resolved are reported in
    /// [`ServiceDescriptions::failures`] rather than as an error.
    fn describe_services<'a>(
        &'a self,
        cluster: &'a str,
        services: &'a [String],
    ) -> ControlFuture<'a, ServiceDescriptions>;

    /// Apply `update` to `service` in `cluster`, leaving all other service
    /// settings unchanged.
    fn update_service<'a>(
        &'a self,
        cluster: &'a str,
        service: &'a str,
        update: &'a ServiceUpdate,
    ) -> ControlFuture<'a, ()>;
}
