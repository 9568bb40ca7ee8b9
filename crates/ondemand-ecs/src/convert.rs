//! Translation between ECS API shapes and launcher types.
//!
//! The API reports counts as signed integers; a negative value or an entry
//! without a name is treated as a malformed response.

use aws_sdk_ecs::types::{Failure, Service};

use ondemand_core::*;

const OPERATION: &str = "DescribeServices";

/// Convert a describe response's services and failures.
pub fn descriptions(
    services: &[Service],
    failures: &[Failure],
) -> ActivationResult<ServiceDescriptions> {
    let services = services
        .iter()
        .map(service_state)
        .collect::<ActivationResult<Vec<_>>>()?;

    let failures = failures
        .iter()
        .map(|f| DescribeFailure {
            arn: f.arn().map(str::to_string),
            reason: f.reason().map(str::to_string),
        })
        .collect();

    Ok(ServiceDescriptions { services, failures })
}

pub fn service_state(service: &Service) -> ActivationResult<ServiceState> {
    let name = service
        .service_name()
        .ok_or_else(|| ActivationError::transport(OPERATION, "service entry without a name"))?;

    Ok(ServiceState {
        name: name.to_string(),
        arn: service.service_arn().map(str::to_string),
        status: service.status().map(str::to_string),
        desired_count: from_api_count(service.desired_count(), "desiredCount")?,
        running_count: from_api_count(service.running_count(), "runningCount")?,
        pending_count: from_api_count(service.pending_count(), "pendingCount")?,
    })
}

fn from_api_count(value: i32, field: &str) -> ActivationResult<u32> {
    u32::try_from(value)
        .map_err(|_| ActivationError::transport(OPERATION, format!("negative {field}: {value}")))
}

/// Counts we send must fit the API's signed field.
pub fn to_api_count(count: u32, operation: &'static str) -> ActivationResult<i32> {
    i32::try_from(count)
        .map_err(|_| ActivationError::transport(operation, format!("desired count {count} out of range")))
}
