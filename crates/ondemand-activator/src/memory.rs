//! In-process control plane.
//!
//! Holds service records per cluster and records every request it receives,
//! so callers can assert on exactly what an activation sent. Faults can be
//! injected per operation to simulate transport failures.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use ondemand_core::*;

/// A request received by [`InMemoryControl`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCall {
    Describe {
        cluster: String,
        services: Vec<String>,
    },
    Update {
        cluster: String,
        service: String,
        update: ServiceUpdate,
    },
}

#[derive(Default)]
struct Inner {
    clusters: HashMap<String, Vec<ServiceState>>,
    calls: Vec<ControlCall>,
    describe_fault: Option<String>,
    update_fault: Option<String>,
}

/// [`ServiceControl`] backed by in-memory service records.
#[derive(Default)]
pub struct InMemoryControl {
    inner: Mutex<Inner>,
}

impl InMemoryControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a service record to `cluster`.
    pub fn insert(&self, cluster: &str, service: ServiceState) {
        self.lock()
            .clusters
            .entry(cluster.to_string())
            .or_default()
            .push(service);
    }

    /// Make every subsequent describe fail with a transport error.
    pub fn fail_describe(&self, message: &str) {
        self.lock().describe_fault = Some(message.to_string());
    }

    /// Make every subsequent update fail with a transport error.
    pub fn fail_update(&self, message: &str) {
        self.lock().update_fault = Some(message.to_string());
    }

    /// All requests received so far, in order.
    pub fn calls(&self) -> Vec<ControlCall> {
        self.lock().calls.clone()
    }

    /// Only the update requests, as (cluster, service, update).
    pub fn updates(&self) -> Vec<(String, String, ServiceUpdate)> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                ControlCall::Update {
                    cluster,
                    service,
                    update,
                } => Some((cluster.clone(), service.clone(), *update)),
                ControlCall::Describe { .. } => None,
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn describe(&self, cluster: &str, services: &[String]) -> ActivationResult<ServiceDescriptions> {
        let mut inner = self.lock();
        inner.calls.push(ControlCall::Describe {
            cluster: cluster.to_string(),
            services: services.to_vec(),
        });

        if let Some(fault) = &inner.describe_fault {
            return Err(ActivationError::transport("DescribeServices", fault.clone()));
        }

        let records = inner.clusters.get(cluster).map(Vec::as_slice).unwrap_or(&[]);
        let mut descriptions = ServiceDescriptions::default();

        for id in services {
            let found: Vec<&ServiceState> = records.iter().filter(|s| s.matches(id)).collect();
            if found.is_empty() {
                descriptions.failures.push(DescribeFailure {
                    arn: Some(id.clone()),
                    reason: Some("MISSING".to_string()),
                });
            }
            descriptions.services.extend(found.into_iter().cloned());
        }

        Ok(descriptions)
    }

    fn update(&self, cluster: &str, service: &str, update: &ServiceUpdate) -> ActivationResult<()> {
        let mut inner = self.lock();
        inner.calls.push(ControlCall::Update {
            cluster: cluster.to_string(),
            service: service.to_string(),
            update: *update,
        });

        if let Some(fault) = &inner.update_fault {
            return Err(ActivationError::transport("UpdateService", fault.clone()));
        }

        let mut touched = false;
        if let Some(records) = inner.clusters.get_mut(cluster) {
            for record in records.iter_mut().filter(|s| s.matches(service)) {
                if let Some(count) = update.desired_count {
                    record.desired_count = count;
                }
                touched = true;
            }
        }

        if touched {
            Ok(())
        } else {
            Err(ActivationError::transport(
                "UpdateService",
                format!("ServiceNotFoundException: {service} not found in {cluster}"),
            ))
        }
    }
}

impl ServiceControl for InMemoryControl {
    fn describe_services<'a>(
        &'a self,
        cluster: &'a str,
        services: &'a [String],
    ) -> ControlFuture<'a, ServiceDescriptions> {
        let result = self.describe(cluster, services);
        Box::pin(async move { result })
    }

    fn update_service<'a>(
        &'a self,
        cluster: &'a str,
        service: &'a str,
        update: &'a ServiceUpdate,
    ) -> ControlFuture<'a, ()> {
        let result = self.update(cluster, service, update);
        Box::pin(async move { result })
    }
}
