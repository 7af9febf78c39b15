mod argsets;
mod command;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use dotenv::dotenv;
use env_logger::Env;

const CMD_VALIDATE: &str = "validate";
const CMD_NORMALIZE: &str = "normalize";

const LOG_LEVEL_ENV_VAR: &str = "LOGGING_LEVEL";
const DEFAULT_LOG_LEVEL: &str = "INFO";
const DEFAULT_OUT_DIR: &str = "outputs/runs/dev";

fn main() -> Result<()> {
    let _ = dotenv();
    env_logger::Builder::from_env(Env::default().filter_or(LOG_LEVEL_ENV_VAR, DEFAULT_LOG_LEVEL))
        .init();

    let mut args = pico_args::Arguments::from_env();
    match args.subcommand()?.as_deref() {
        Some(CMD_VALIDATE) => command::validate(parse_run_args(&mut args)?),
        Some(CMD_NORMALIZE) => command::normalize(parse_run_args(&mut args)?),
        _ => Err(anyhow!("Subcommand must be one of 'validate', 'normalize'")),
    }
}

fn parse_run_args(args: &mut pico_args::Arguments) -> Result<argsets::RunArgs> {
    Ok(argsets::RunArgs {
        config: args.value_from_str("--config")?,
        out: args
            .opt_value_from_str("--out")?
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR)),
    })
}
