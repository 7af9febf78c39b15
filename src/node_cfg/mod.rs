mod schema;

pub use schema::{
    Accessible, ClearErrorsTooling, DataInfo, InterfaceClass, Members, Module, ModuleTooling,
    NodeConfig, NodeTooling, StatusTooling, TargetTooling, TcpTooling, ValueTooling,
};

use thiserror::Error;

pub type Config = NodeConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),
}

pub fn from_str(config_raw: &str) -> Result<Config, ConfigError> {
    serde_json::from_str::<Config>(config_raw).map_err(Into::into)
}
