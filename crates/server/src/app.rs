use anyhow::Result;
use profit_api_config::{AppConfig, ConfigDescriptor, ConfigOverrides, ServerSettings};
use rocket::{Build, Config, Rocket, data::ToByteUnit, figment::Figment};
use tracing::info;

use crate::{args::Args, logging, routes, state::AppState};

/// Config file merged with CLI overrides; `--debug` or `[server] debug` both enable debug.
pub fn load_config(args: &Args) -> Result<(AppConfig, ConfigDescriptor)> {
    AppConfig::load_with_overrides(&ConfigOverrides::from(args))
}

pub async fn run(args: Args) -> Result<()> {
    let (app_config, descriptor) = load_config(&args)?;
    logging::init(app_config.server.debug);
    info!(
        "Using configuration {} (model artifact `{}`)",
        descriptor.location,
        app_config.model.artifact.display()
    );

    let state = AppState::bootstrap(&app_config);

    info!(
        "Server ready on {}:{}",
        app_config.server.host, app_config.server.port,
    );

    build_rocket(state, figment(&app_config.server))
        .launch()
        .await
        .map_err(|err| anyhow::anyhow!("rocket failed: {err}"))?;

    Ok(())
}

/// Rocket settings derived from the server section of the config.
pub fn figment(server: &ServerSettings) -> Figment {
    let log_level = if server.debug { "debug" } else { "critical" };
    Config::figment()
        .merge(("port", server.port))
        .merge(("address", server.host.clone()))
        .merge(("log_level", log_level))
        .merge((
            "limits",
            rocket::data::Limits::default().limit("string", 64.kibibytes()),
        ))
}

pub fn build_rocket(state: AppState, figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .manage(state)
        .mount("/", routes::routes())
        .register("/", routes::catchers())
}
