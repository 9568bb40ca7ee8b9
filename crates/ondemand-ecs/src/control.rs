//! ECS-backed service control.

use aws_sdk_ecs::Client;
use aws_sdk_ecs::config::Region;
use aws_sdk_ecs::error::DisplayErrorContext;
use tracing::debug;

use ondemand_core::*;

use crate::convert;

const DESCRIBE_SERVICES: &str = "DescribeServices";
const UPDATE_SERVICE: &str = "UpdateService";

/// [`ServiceControl`] that talks to the ECS API in one region.
#[derive(Clone, Debug)]
pub struct EcsControl {
    client: Client,
}

impl EcsControl {
    /// Build a client for `region` using the default credential chain.
    pub async fn connect(region: &str) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        debug!(region, "ECS client configured");
        Self::from_client(Client::new(&sdk_config))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    async fn describe(
        &self,
        cluster: &str,
        services: &[String],
    ) -> ActivationResult<ServiceDescriptions> {
        let output = self
            .client
            .describe_services()
            .cluster(cluster)
            .set_services(Some(services.to_vec()))
            .send()
            .await
            .map_err(|e| {
                ActivationError::transport(DESCRIBE_SERVICES, DisplayErrorContext(&e).to_string())
            })?;

        let descriptions = convert::descriptions(output.services(), output.failures())?;
        debug!(
            cluster,
            found = descriptions.services.len(),
            failures = descriptions.failures.len(),
            "describe services completed"
        );
        Ok(descriptions)
    }

    async fn update(
        &self,
        cluster: &str,
        service: &str,
        update: &ServiceUpdate,
    ) -> ActivationResult<()> {
        let mut request = self
            .client
            .update_service()
            .cluster(cluster)
            .service(service);

        if let Some(count) = update.desired_count {
            request = request.desired_count(convert::to_api_count(count, UPDATE_SERVICE)?);
        }
        if update.force_new_deployment {
            request = request.force_new_deployment(true);
        }

        request.send().await.map_err(|e| {
            ActivationError::transport(UPDATE_SERVICE, DisplayErrorContext(&e).to_string())
        })?;

        debug!(
            cluster,
            service,
            desired_count = ?update.desired_count,
            force_new_deployment = update.force_new_deployment,
            "update service accepted"
        );
        Ok(())
    }
}

impl ServiceControl for EcsControl {
    fn describe_services<'a>(
        &'a self,
        cluster: &'a str,
        services: &'a [String],
    ) -> ControlFuture<'a, ServiceDescriptions> {
        Box::pin(self.describe(cluster, services))
    }

    fn update_service<'a>(
        &'a self,
        cluster: &'a str,
        service: &'a str,
        update: &'a ServiceUpdate,
    ) -> ControlFuture<'a, ()> {
        Box::pin(self.update(cluster, service, update))
    }
}
