//! Snapshot and request types exchanged with the orchestration control plane.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One service entry from a describe response, valid only at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceState {
    pub name: String,
    pub arn: Option<String>,
    pub status: Option<String>,
    /// Operator-declared target number of running tasks.
    pub desired_count: u32,
    pub running_count: u32,
    pub pending_count: u32,
}

impl ServiceState {
    /// A service is addressed by either its name or its full ARN.
    pub fn matches(&self, identifier: &str) -> bool {
        self.name == identifier || self.arn.as_deref() == Some(identifier)
    }
}

/// Per-identifier failure reported alongside a describe response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribeFailure {
    pub arn: Option<String>,
    /// Control-plane reason code, e.g. `MISSING`.
    pub reason: Option<String>,
}

/// Full result of a describe-services call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptions {
    pub services: Vec<ServiceState>,
    pub failures: Vec<DescribeFailure>,
}

/// Requested change to a service. Fields left `None`/`false` are untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceUpdate {
    pub desired_count: Option<u32>,
    pub force_new_deployment: bool,
}

impl ServiceUpdate {
    pub fn desired(count: u32) -> Self {
        Self {
            desired_count: Some(count),
            force_new_deployment: false,
        }
    }

    pub fn redeploy() -> Self {
        Self {
            desired_count: None,
            force_new_deployment: true,
        }
    }
}

/// What a single activation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Desired count was 0 and an update to 1 was issued.
    Raised,
    /// Desired count was already non-zero; nothing was sent.
    AlreadyRunning { desired_count: u32 },
}

impl Outcome {
    pub fn raised(&self) -> bool {
        matches!(self, Self::Raised)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raised => f.write_str("desired count raised to 1"),
            Self::AlreadyRunning { .. } => f.write_str("desired count already at 1"),
        }
    }
}
