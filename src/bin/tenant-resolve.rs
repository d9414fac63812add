//! Offline routing check: what would the edge do with this host and path?

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde_json::json;

use tenant_edge::config::load_config;
use tenant_edge::routing::DeploymentMode;
use tenant_edge::{TenantConfig, TenantRouter};

#[derive(Parser)]
#[command(name = "tenant-resolve")]
#[command(about = "Resolve a Host header and path to a tenant route", long_about = None)]
struct Cli {
    /// Host header value, port allowed (e.g. "john.localhost:3000").
    #[arg(long, default_value = "")]
    host: String,

    /// Request path.
    #[arg(short, long, default_value = "/")]
    path: String,

    /// Force a deployment mode instead of inferring it.
    #[arg(short, long)]
    mode: Option<Mode>,

    /// Load routing policy from a config file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Local,
    Production,
}

impl From<Mode> for DeploymentMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Local => DeploymentMode::Local,
            Mode::Production => DeploymentMode::Production,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => TenantConfig::default(),
    };
    if let Some(mode) = cli.mode {
        config.routing.deployment_mode = Some(mode.into());
    }

    let router = TenantRouter::from_config(&config.routing);
    let host = (!cli.host.is_empty()).then_some(cli.host.as_str());
    let decision = router.decide(host, &cli.path);

    let output = json!({
        "route": &decision,
        "effective_path": decision.effective_path(&cli.path),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
