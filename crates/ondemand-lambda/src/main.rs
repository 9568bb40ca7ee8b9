//! bootstrap — the launcher function entry point.
//!
//! Cold start reads `REGION`/`CLUSTER`/`SERVICE` once and builds one ECS
//! client; every invocation then runs a single activation with them. The
//! event payload is whatever the trigger sends (typically a DNS query log
//! subscription) and is not interpreted.

mod handler;

use lambda_runtime::{LambdaEvent, service_fn};
use serde_json::Value;
use tracing::{Subscriber, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use ondemand_activator::Activator;
use ondemand_core::ActivatorConfig;
use ondemand_ecs::EcsControl;

/// One status line per invocation; `RUST_LOG` opts into debug output.
const DEFAULT_LOG_FILTER: &str = "info";

/// JSON lines for the function's log stream.
fn log_subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(writer)
        .finish()
}

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing::subscriber::set_global_default(log_subscriber(filter, std::io::stdout))?;

    let config = ActivatorConfig::from_env()?;
    info!(
        region = %config.region,
        cluster = %config.cluster,
        service = %config.service,
        "launcher function starting"
    );

    let control = EcsControl::connect(&config.region).await;
    let activator = Activator::new(config, control);
    let activator = &activator;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handler::handle(activator, event).await
    }))
    .await
}
