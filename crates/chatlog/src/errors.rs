use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {env_var}")]
    MissingEnvVar { env_var: String },

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Logger initialization failed: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to record completion: {0}")]
    Sink(String),

    #[error("Failed to serialize event: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type LoggerResult<T> = Result<T, LoggerError>;

/// Map a dotted config key such as `api_key` to its environment variable name.
pub fn to_env_var(field: &str) -> String {
    format!("CHATLOG_{}", field.replace('.', "__").to_uppercase())
}
