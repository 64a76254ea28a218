use config::{Config, Environment};
use serde::Deserialize;
use std::fmt;

use crate::errors::{to_env_var, ConfigError};

pub const ENV_PREFIX: &str = "CHATLOG";

#[derive(Clone, PartialEq, Deserialize)]
pub struct LoggerConfig {
    pub api_key: String,
    pub project: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl LoggerConfig {
    pub fn new<K: Into<String>, P: Into<String>>(api_key: K, project: P) -> Self {
        Self {
            api_key: api_key.into(),
            project: project.into(),
            base_url: default_base_url(),
        }
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Load from `CHATLOG_API_KEY`, `CHATLOG_PROJECT` and the optional `CHATLOG_BASE_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("base_url", default_base_url())?
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let result: Result<Self, config::ConfigError> = config.try_deserialize();

        let settings = match result {
            Ok(settings) => settings,
            Err(err) => {
                tracing::debug!("Configuration error: {:?}", &err);

                let error_str = err.to_string();
                if error_str.starts_with("missing field") {
                    // "missing field `api_key`"
                    let field = error_str
                        .trim_start_matches("missing field `")
                        .trim_end_matches('`');
                    return Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(field),
                    });
                } else if let config::ConfigError::NotFound(field) = &err {
                    return Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(field),
                    });
                }
                return Err(ConfigError::Other(err));
            }
        };

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("api_key", &self.api_key), ("project", &self.project)] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingEnvVar {
                    env_var: to_env_var(field),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("api_key", &"[redacted]")
            .field("project", &self.project)
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://api.chatlog.dev".to_string()
}
