//! Per-invocation handler.

use lambda_runtime::LambdaEvent;
use serde_json::Value;
use tracing::{Instrument, debug, info_span};

use ondemand_activator::Activator;
use ondemand_core::{Outcome, ServiceControl};

/// Run one activation for an invocation.
///
/// The payload is only logged. Activation errors are returned unchanged so
/// the runtime reports the invocation as failed.
pub async fn handle<C: ServiceControl>(
    activator: &Activator<C>,
    event: LambdaEvent<Value>,
) -> Result<Outcome, lambda_runtime::Error> {
    let LambdaEvent { payload, context } = event;
    let span = info_span!("invocation", request_id = %context.request_id);

    span.in_scope(|| debug!(%payload, "trigger received"));
    let outcome = activator.run().instrument(span).await?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_runtime::Context;
    use ondemand_activator::{InMemoryControl, LogCapture};
    use tracing_subscriber::EnvFilter;
    use ondemand_core::{ActivationError, ActivatorConfig, ServiceState, ServiceUpdate};
    use serde_json::json;

    fn activator_with(desired: Option<u32>) -> Activator<InMemoryControl> {
        let control = InMemoryControl::new();
        if let Some(desired) = desired {
            control.insert(
                "minecraft",
                ServiceState {
                    name: "minecraft-server".to_string(),
                    arn: None,
                    status: Some("ACTIVE".to_string()),
                    desired_count: desired,
                    running_count: desired,
                    pending_count: 0,
                },
            );
        }
        Activator::new(ActivatorConfig::default(), control)
    }

    fn dns_log_event() -> LambdaEvent<Value> {
        LambdaEvent::new(
            json!({ "awslogs": { "data": "H4sIAAAAAAAAAKtWKkktLlGyUlAqS8wpTgUAKxsNHw8AAAA=" } }),
            Context::default(),
        )
    }

    #[tokio::test]
    async fn invocation_wakes_stopped_service() {
        let activator = activator_with(Some(0));

        let outcome = handle(&activator, dns_log_event()).await.unwrap();

        assert_eq!(outcome, Outcome::Raised);
        assert_eq!(
            activator.control().updates(),
            vec![(
                "minecraft".to_string(),
                "minecraft-server".to_string(),
                ServiceUpdate::desired(1)
            )]
        );
    }

    #[tokio::test]
    async fn default_logging_writes_one_line_per_invocation() {
        let activator = activator_with(Some(0));
        let logs = LogCapture::new();
        let subscriber =
            crate::log_subscriber(EnvFilter::new(crate::DEFAULT_LOG_FILTER), logs.clone());

        let guard = tracing::subscriber::set_default(subscriber);
        let outcome = handle(&activator, dns_log_event()).await.unwrap();
        drop(guard);

        assert_eq!(outcome, Outcome::Raised);
        let lines = logs.lines();
        assert_eq!(lines.len(), 1, "logged: {lines:?}");

        let line: Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(line["level"], "INFO");
        assert_eq!(line["fields"]["message"], "desired count raised to 1");
    }

    #[tokio::test]
    async fn payload_is_ignored() {
        let activator = activator_with(Some(2));

        let event = LambdaEvent::new(Value::Null, Context::default());
        let outcome = handle(&activator, event).await.unwrap();

        assert_eq!(outcome, Outcome::AlreadyRunning { desired_count: 2 });
        assert!(activator.control().updates().is_empty());
    }

    #[tokio::test]
    async fn lookup_failure_fails_invocation() {
        let activator = activator_with(None);

        let err = handle(&activator, dns_log_event()).await.unwrap_err();

        let err = err
            .downcast_ref::<ActivationError>()
            .expect("activation error");
        assert!(err.is_lookup());
        assert!(activator.control().updates().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_fails_invocation() {
        let activator = activator_with(Some(0));
        activator.control().fail_describe("dispatch failure: io error");

        let err = handle(&activator, dns_log_event()).await.unwrap_err();

        assert!(err.downcast_ref::<ActivationError>().is_some_and(ActivationError::is_transport));
        assert!(activator.control().updates().is_empty());
    }
}
