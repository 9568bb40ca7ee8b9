//! Activator — inspects one service and starts it if it is scaled to zero.
//!
//! Holds the resolved configuration and an injected [`ServiceControl`];
//! every call re-reads fresh state from the control plane.

use tracing::{debug, info};

use ondemand_core::*;

/// Desired count requested when waking a stopped service.
pub const ACTIVE_COUNT: u32 = 1;

/// Drives the read-check-write sequence for a single configured service.
pub struct Activator<C> {
    config: ActivatorConfig,
    control: C,
}

impl<C: ServiceControl> Activator<C> {
    /// Create a new activator.
    pub fn new(config: ActivatorConfig, control: C) -> Self {
        Self { config, control }
    }

    pub fn config(&self) -> &ActivatorConfig {
        &self.config
    }

    pub fn control(&self) -> &C {
        &self.control
    }

    /// Describe the configured service and return its snapshot.
    ///
    /// The identifier must resolve to exactly one entry.
    pub async fn status(&self) -> ActivationResult<ServiceState> {
        let services = vec![self.config.service.clone()];
        let descriptions = self
            .control
            .describe_services(&self.config.cluster, &services)
            .await?;

        select_service(descriptions, &self.config.cluster, &self.config.service)
    }

    /// Current desired task count of the configured service.
    pub async fn query(&self) -> ActivationResult<u32> {
        let state = self.status().await?;
        debug!(
            cluster = %self.config.cluster,
            service = %self.config.service,
            desired_count = state.desired_count,
            running_count = state.running_count,
            "service described"
        );
        Ok(state.desired_count)
    }

    /// Set the configured service's desired count to exactly one.
    pub async fn activate(&self) -> ActivationResult<()> {
        self.control
            .update_service(
                &self.config.cluster,
                &self.config.service,
                &ServiceUpdate::desired(ACTIVE_COUNT),
            )
            .await
    }

    /// Run one activation: query, raise to one if stopped, report.
    ///
    /// Emits exactly one status line. Errors from either step abort the run
    /// unchanged; the update is attempted at most once.
    pub async fn run(&self) -> ActivationResult<Outcome> {
        let desired_count = self.query().await?;

        let outcome = if desired_count == 0 {
            self.activate().await?;
            Outcome::Raised
        } else {
            Outcome::AlreadyRunning { desired_count }
        };

        info!(
            cluster = %self.config.cluster,
            service = %self.config.service,
            desired_count,
            raised = outcome.raised(),
            "{outcome}"
        );

        Ok(outcome)
    }

    /// Force a new deployment without touching the desired count.
    pub async fn redeploy(&self) -> ActivationResult<()> {
        self.control
            .update_service(
                &self.config.cluster,
                &self.config.service,
                &ServiceUpdate::redeploy(),
            )
            .await?;

        info!(
            cluster = %self.config.cluster,
            service = %self.config.service,
            "new deployment requested"
        );
        Ok(())
    }
}

/// Pick the single entry matching `service` out of a describe response.
fn select_service(
    descriptions: ServiceDescriptions,
    cluster: &str,
    service: &str,
) -> ActivationResult<ServiceState> {
    let mut matching: Vec<ServiceState> = descriptions
        .services
        .into_iter()
        .filter(|s| s.matches(service))
        .collect();

    match matching.len() {
        1 => Ok(matching.remove(0)),
        0 => {
            let reason = descriptions
                .failures
                .iter()
                .find_map(|f| f.reason.clone())
                .unwrap_or_else(|| "not present in describe response".to_string());
            Err(ActivationError::Lookup {
                cluster: cluster.to_string(),
                service: service.to_string(),
                reason,
            })
        }
        n => Err(ActivationError::Lookup {
            cluster: cluster.to_string(),
            service: service.to_string(),
            reason: format!("{n} entries match"),
        }),
    }
}
