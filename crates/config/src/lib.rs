pub mod args;
pub mod config;

pub use args::{CommonModelArgs, ServerBindArgs, build_config_overrides};
pub use config::{
    AppConfig, ConfigDescriptor, ConfigLocation, ConfigOverrides, DEFAULT_ARTIFACT_PATH,
    ModelSettings, ServerOverride, ServerSettings, save_config,
};
