use std::io::Write;
use std::path::Path;

use anyhow::Context;

use ondemand_activator::Activator;
use ondemand_core::{ActivatorConfig, ServiceControl, ServiceState};

/// Config file (if any) or environment, then explicit flags on top.
pub fn resolve_config(
    file: Option<&Path>,
    region: Option<&str>,
    cluster: Option<&str>,
    service: Option<&str>,
) -> anyhow::Result<ActivatorConfig> {
    let base = match file {
        Some(path) => ActivatorConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ActivatorConfig::from_env()?,
    };

    let config = base.with_overrides(region, cluster, service);
    config.validate()?;
    Ok(config)
}

/// Writes the outcome as the command's only line of output.
pub async fn activate<C: ServiceControl>(
    activator: &Activator<C>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let outcome = activator.run().await?;
    writeln!(out, "{outcome}")?;
    Ok(())
}

pub async fn status<C: ServiceControl>(
    activator: &Activator<C>,
    format: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let state = activator.status().await?;

    match format {
        "json" => {
            writeln!(out, "{}", serde_json::to_string_pretty(&state)?)?;
        }
        _ => {
            writeln!(out, "{}", format_status(&activator.config().cluster, &state))?;
        }
    }

    Ok(())
}

pub async fn redeploy<C: ServiceControl>(
    activator: &Activator<C>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    activator.redeploy().await?;
    writeln!(
        out,
        "✓ New deployment requested for {} (it takes several minutes to roll out)",
        activator.config().service
    )?;
    Ok(())
}

fn format_status(cluster: &str, state: &ServiceState) -> String {
    format!(
        "{cluster}/{name}  status={status}  desired={desired}  running={running}  pending={pending}",
        name = state.name,
        status = state.status.as_deref().unwrap_or("UNKNOWN"),
        desired = state.desired_count,
        running = state.running_count,
        pending = state.pending_count,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ondemand_activator::{InMemoryControl, LogCapture};
    use ondemand_core::{Outcome, ServiceUpdate};

    fn running_state(desired: u32) -> ServiceState {
        ServiceState {
            name: "minecraft-server".to_string(),
            arn: None,
            status: Some("ACTIVE".to_string()),
            desired_count: desired,
            running_count: desired,
            pending_count: 0,
        }
    }

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[target]\ncluster = \"survival\"\nservice = \"paper\"").unwrap();

        let config =
            resolve_config(Some(file.path()), Some("eu-west-1"), None, Some("fabric")).unwrap();

        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.cluster, "survival");
        assert_eq!(config.service, "fabric");
    }

    #[test]
    fn missing_config_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launcher.toml");

        let err = resolve_config(Some(&path), None, None, None).unwrap_err();
        assert!(err.to_string().contains("launcher.toml"));
    }

    #[test]
    fn status_line_lists_counts() {
        let line = format_status("minecraft", &running_state(1));
        assert_eq!(
            line,
            "minecraft/minecraft-server  status=ACTIVE  desired=1  running=1  pending=0"
        );
    }

    fn activator_with(desired: u32) -> Activator<InMemoryControl> {
        let control = InMemoryControl::new();
        control.insert("minecraft", running_state(desired));
        Activator::new(ActivatorConfig::default(), control)
    }

    #[tokio::test]
    async fn activate_command_raises_stopped_service() {
        let activator = activator_with(0);
        let mut out = Vec::new();

        activate(&activator, &mut out).await.unwrap();

        assert_eq!(activator.control().updates().len(), 1);
        assert_eq!(String::from_utf8(out).unwrap(), "desired count raised to 1\n");
    }

    #[tokio::test]
    async fn activate_command_already_running_prints_one_line() {
        let activator = activator_with(2);
        let mut out = Vec::new();

        activate(&activator, &mut out).await.unwrap();

        assert!(activator.control().updates().is_empty());
        assert_eq!(String::from_utf8(out).unwrap(), "desired count already at 1\n");
    }

    #[tokio::test]
    async fn activate_status_line_appears_once_across_stdout_and_logs() {
        let activator = activator_with(0);
        let logs = LogCapture::new();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::new("").add_directive("ondemand=info".parse().unwrap()),
            )
            .with_ansi(false)
            .with_writer(logs.clone())
            .finish();
        let mut out = Vec::new();

        let guard = tracing::subscriber::set_default(subscriber);
        activate(&activator, &mut out).await.unwrap();
        drop(guard);

        // The log sink stands in for stderr; stdout holds the status line alone.
        let stdout = String::from_utf8(out).unwrap();
        assert_eq!(stdout.lines().count(), 1);
        assert_eq!(stdout.trim_end(), Outcome::Raised.to_string());
        assert!(!logs.contents().is_empty());
    }

    #[tokio::test]
    async fn status_command_does_not_update() {
        let activator = activator_with(0);
        let mut out = Vec::new();

        status(&activator, "json", &mut out).await.unwrap();

        assert!(activator.control().updates().is_empty());
        let state: ServiceState = serde_json::from_slice(&out).unwrap();
        assert_eq!(state.desired_count, 0);
    }

    #[tokio::test]
    async fn redeploy_command_forces_deployment() {
        let activator = activator_with(1);
        let mut out = Vec::new();

        redeploy(&activator, &mut out).await.unwrap();

        assert_eq!(activator.control().updates()[0].2, ServiceUpdate::redeploy());
    }
}
