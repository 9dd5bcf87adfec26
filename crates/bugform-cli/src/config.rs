use std::env;
use std::path::{Path, PathBuf};

use bugform_core::util::normalize_text_option;
use bugform_core::FormConfig;

use crate::error::CliError;

const CONFIG_DIR_NAME: &str = "bugform";
const CONFIG_FILE_NAME: &str = "config.json";

pub const ENV_CONFIG_PATH: &str = "BUGFORM_CONFIG";
pub const ENV_APP_NAME: &str = "BUGFORM_APP_NAME";
pub const ENV_ENDPOINT: &str = "BUGFORM_ENDPOINT";
pub const ENV_ATTACHMENT_LIMIT: &str = "BUGFORM_ATTACHMENT_LIMIT";

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// `--config` wins over `BUGFORM_CONFIG`, which wins over the platform default.
pub fn resolve_config_path(explicit: Option<&Path>, env_path: Option<String>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| normalize_text_option(env_path).map(PathBuf::from))
        .or_else(default_config_path)
}

/// Values read from `BUGFORM_*` environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub app_name: Option<String>,
    pub endpoint: Option<String>,
    pub attachment_limit: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            app_name: normalize_text_option(env::var(ENV_APP_NAME).ok()),
            endpoint: normalize_text_option(env::var(ENV_ENDPOINT).ok()),
            attachment_limit: normalize_text_option(env::var(ENV_ATTACHMENT_LIMIT).ok()),
        }
    }
}

/// Layer environment values and the `--endpoint` flag over a loaded config.
pub fn apply_overrides(
    config: &mut FormConfig,
    env: &EnvOverrides,
    endpoint_flag: Option<&str>,
) -> Result<(), CliError> {
    if let Some(app_name) = &env.app_name {
        config.app_name.clone_from(app_name);
    }
    if let Some(endpoint) = &env.endpoint {
        config.endpoint.clone_from(endpoint);
    }
    if let Some(raw) = &env.attachment_limit {
        config.attachment_limit = raw.parse().map_err(|_| {
            CliError::Config(format!(
                "{ENV_ATTACHMENT_LIMIT} must be a positive number, got `{raw}`"
            ))
        })?;
    }
    if let Some(endpoint) = normalize_text_option(endpoint_flag.map(str::to_string)) {
        config.endpoint = endpoint;
    }

    config.normalize();
    config.validate()?;
    Ok(())
}

/// Resolved configuration and the file it was read from, if any.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: FormConfig,
    pub path: Option<PathBuf>,
}

pub fn load_config(
    explicit_path: Option<&Path>,
    endpoint_flag: Option<&str>,
) -> Result<ResolvedConfig, CliError> {
    let path = resolve_config_path(explicit_path, env::var(ENV_CONFIG_PATH).ok());
    let mut config = match &path {
        Some(path) => FormConfig::load_from_path(path)?,
        None => FormConfig::default(),
    };
    apply_overrides(&mut config, &EnvOverrides::from_env(), endpoint_flag)?;

    tracing::debug!(
        path = ?path,
        endpoint = %config.endpoint,
        attachment_limit = config.attachment_limit,
        "Resolved form configuration"
    );
    Ok(ResolvedConfig { config, path })
}
