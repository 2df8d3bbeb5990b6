use std::{path::Path, sync::OnceLock};

use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::Deserialize;

use super::{Config, ConfigRaw, defaults};
use crate::config::ConfigError;

const USER_CONFIG_FILE: &str = "config.toml";

static CONFIG_ENV: OnceLock<String> = OnceLock::new();

#[derive(Debug, Deserialize)]
struct EnvironmentConfig {
    environment: Option<String>,
}

/// Returns the environment selected during configuration initialization.
pub(crate) fn current_env() -> &'static str {
    CONFIG_ENV
        .get()
        .map(String::as_str)
        .unwrap_or(defaults::DEFAULT_ENVIRONMENT)
}

/// Loads defaults for the selected environment, then `config.toml` if present,
/// then the file passed with `--config`.
pub(crate) fn initialize_configuration(
    custom_config_path: Option<&Path>,
) -> Result<Config, ConfigError> {
    let (environment, config) =
        load_configuration(Path::new(USER_CONFIG_FILE), custom_config_path)?;
    let _ = CONFIG_ENV.set(environment);
    Ok(config)
}

fn load_configuration(
    user_config_path: &Path,
    custom_config_path: Option<&Path>,
) -> Result<(String, Config), ConfigError> {
    if let Some(path) = custom_config_path
        && !path.exists()
    {
        return Err(ConfigError::MissingConfig(path.display().to_string()));
    }

    let environment = resolve_environment(user_config_path, custom_config_path)?;

    // Layered sources, lowest priority first
    let mut figment = Figment::from(Serialized::defaults(defaults::config_for(&environment)?));

    if user_config_path.exists() {
        figment = figment.merge(Toml::file(user_config_path));
    }

    if let Some(path) = custom_config_path {
        figment = figment.merge(Toml::file(path));
    }

    let config: ConfigRaw = figment.extract().map_err(Box::new)?;
    if normalize_env(config.environment.clone()) != environment {
        return Err(ConfigError::UnknownEnvironment(format!(
            "config environment '{}' does not match selected '{}'",
            config.environment, environment
        )));
    }

    Ok((environment, config.resolve()?))
}

/// The custom file wins over `config.toml`; with neither setting it the default applies.
fn resolve_environment(
    user_config_path: &Path,
    custom_config_path: Option<&Path>,
) -> Result<String, ConfigError> {
    let environment = custom_config_path
        .and_then(read_environment_from)
        .or_else(|| read_environment_from(user_config_path))
        .unwrap_or_else(|| defaults::DEFAULT_ENVIRONMENT.to_string());

    if !matches!(environment.as_str(), "development" | "testnet") {
        return Err(ConfigError::UnknownEnvironment(environment));
    }

    Ok(environment)
}

fn read_environment_from(path: &Path) -> Option<String> {
    if !path.exists() {
        return None;
    }

    Figment::from(Toml::file(path))
        .extract::<EnvironmentConfig>()
        .ok()
        .and_then(|config| config.environment)
        .map(normalize_env)
}

fn normalize_env(env: String) -> String {
    env.trim().to_lowercase()
}
