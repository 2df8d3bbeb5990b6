use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid chain configuration: {0}")]
    InvalidConfig(String),
}
