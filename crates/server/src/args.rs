use clap::Parser;
use profit_api_config::{CommonModelArgs, ConfigOverrides, ServerBindArgs, build_config_overrides};

#[derive(Parser, Debug)]
#[command(author, version, about = "Profit Prediction API Server", long_about = None)]
pub struct Args {
    #[command(flatten)]
    pub model: CommonModelArgs,

    #[command(flatten)]
    pub bind: ServerBindArgs,
}

impl From<&Args> for ConfigOverrides {
    fn from(args: &Args) -> Self {
        build_config_overrides(&args.model, &args.bind)
    }
}
