use std::path::PathBuf;

use clap::Args;

use crate::config::{ConfigOverrides, ServerOverride};

#[derive(Args, Debug, Clone, Default)]
pub struct CommonModelArgs {
    /// Optional path to a TOML configuration file (created with defaults if missing).
    #[arg(long, value_name = "PATH", help_heading = "Application")]
    pub config: Option<PathBuf>,

    /// Override the model artifact path.
    #[arg(long, value_name = "PATH", help_heading = "Application")]
    pub artifact: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ServerBindArgs {
    /// Host/IP for server to bind.
    #[arg(long, help_heading = "Application")]
    pub host: Option<String>,

    /// TCP port for server.
    #[arg(long, help_heading = "Application")]
    pub port: Option<u16>,

    /// Verbose framework and request logging.
    #[arg(long, help_heading = "Application")]
    pub debug: bool,
}

pub fn build_config_overrides(model: &CommonModelArgs, bind: &ServerBindArgs) -> ConfigOverrides {
    ConfigOverrides {
        config_path: model.config.clone(),
        artifact: model.artifact.clone(),
        server: ServerOverride {
            host: bind.host.clone(),
            port: bind.port,
            debug: bind.debug.then_some(true),
        },
    }
}
