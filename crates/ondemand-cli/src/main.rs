use std::path::PathBuf;

use clap::{Parser, Subcommand};

use ondemand_activator::Activator;
use ondemand_ecs::EcsControl;

mod commands;

#[derive(Parser)]
#[command(
    name = "ondemand",
    about = "On-demand launcher — start a scaled-to-zero ECS service",
    version,
    propagate_version = true,
)]
struct Cli {
    /// TOML file with a [target] table (region, cluster, service)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Override the region (default: $REGION or us-west-2)
    #[arg(long, global = true)]
    region: Option<String>,
    /// Override the cluster (default: $CLUSTER or minecraft)
    #[arg(long, global = true)]
    cluster: Option<String>,
    /// Override the service (default: $SERVICE or minecraft-server)
    #[arg(long, global = true)]
    service: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Raise the service's desired count to 1 if it is 0
    Activate,
    /// Show the service's desired, running and pending counts
    Status {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Force a new deployment without changing the desired count
    Redeploy,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Diagnostics on stderr; stdout carries only command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ondemand=info".parse()?)
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = commands::resolve_config(
        cli.config.as_deref(),
        cli.region.as_deref(),
        cli.cluster.as_deref(),
        cli.service.as_deref(),
    )?;
    let control = EcsControl::connect(&config.region).await;
    let activator = Activator::new(config, control);

    let mut out = std::io::stdout();

    match cli.command {
        Commands::Activate => commands::activate(&activator, &mut out).await,
        Commands::Status { format } => commands::status(&activator, &format, &mut out).await,
        Commands::Redeploy => commands::redeploy(&activator, &mut out).await,
    }
}
