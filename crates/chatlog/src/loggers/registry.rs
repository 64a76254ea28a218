use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::info;

use super::base::EventSink;
use super::logger::Logger;
use crate::errors::LoggerResult;

/// Owns the process's logger handle.
///
/// The application creates one registry at startup and hands out the
/// `Arc<Logger>` it returns. Initialization runs at most once; a failed
/// attempt leaves the registry empty so a later call may retry.
#[derive(Default)]
pub struct LoggerRegistry {
    logger: OnceCell<Arc<Logger>>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_init<F>(&self, init: F) -> LoggerResult<Arc<Logger>>
    where
        F: FnOnce() -> LoggerResult<Logger>,
    {
        self.logger
            .get_or_try_init(|| -> LoggerResult<Arc<Logger>> {
                let logger = init()?;
                info!(
                    project = %logger.config().project,
                    base_url = %logger.config().base_url,
                    "logger initialized"
                );
                Ok(Arc::new(logger))
            })
            .cloned()
    }

    /// Initialize from `CHATLOG_*` environment variables.
    pub fn init_from_env(&self, sink: Arc<dyn EventSink>) -> LoggerResult<Arc<Logger>> {
        self.get_or_init(|| Logger::from_env(sink))
    }

    pub fn get(&self) -> Option<Arc<Logger>> {
        self.logger.get().cloned()
    }

    pub fn is_initialized(&self) -> bool {
        self.logger.get().is_some()
    }

    /// Flush and drop the handle. The registry can be initialized again afterwards.
    pub async fn shutdown(&mut self) -> LoggerResult<()> {
        if let Some(logger) = self.logger.take() {
            logger.shutdown().await?;
            info!("logger shut down");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ConfigError, LoggerError};
    use crate::loggers::configs::LoggerConfig;
    use crate::loggers::memory::MemorySink;
    use anyhow::Result;
    use serial_test::serial;
    use std::env;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn clean_env() {
        for (key, _) in env::vars() {
            if key.starts_with("CHATLOG_") {
                env::remove_var(&key);
            }
        }
    }

    fn memory_logger(sink: &MemorySink) -> Logger {
        Logger::new(LoggerConfig::new("sk-test", "demo"), Arc::new(sink.clone()))
    }

    #[test]
    fn test_initializer_runs_once() -> Result<()> {
        let registry = LoggerRegistry::new();
        let sink = MemorySink::new();
        let calls = AtomicUsize::new(0);

        let first = registry.get_or_init(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(memory_logger(&sink))
        })?;
        let second = registry.get_or_init(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(memory_logger(&sink))
        })?;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        Ok(())
    }

    #[test]
    fn test_concurrent_init_shares_one_handle() -> Result<()> {
        let registry = Arc::new(LoggerRegistry::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let sink = MemorySink::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let calls = Arc::clone(&calls);
                let sink = sink.clone();
                std::thread::spawn(move || {
                    registry.get_or_init(|| {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok(memory_logger(&sink))
                    })
                })
            })
            .collect();

        let loggers = handles
            .into_iter()
            .map(|handle| handle.join().expect("init thread panicked"))
            .collect::<Result<Vec<_>, _>>()?;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(loggers.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
        Ok(())
    }

    #[test]
    fn test_failed_init_propagates_and_can_retry() -> Result<()> {
        let registry = LoggerRegistry::new();
        let result = registry.get_or_init(|| {
            Err(LoggerError::Config(ConfigError::MissingEnvVar {
                env_var: "CHATLOG_API_KEY".to_string(),
            }))
        });

        assert!(matches!(result, Err(LoggerError::Config(_))));
        assert!(!registry.is_initialized());

        let sink = MemorySink::new();
        registry.get_or_init(|| Ok(memory_logger(&sink)))?;
        assert!(registry.is_initialized());
        Ok(())
    }

    #[tokio::test]
    async fn test_shutdown_flushes_and_resets() -> Result<()> {
        let mut registry = LoggerRegistry::new();
        let sink = MemorySink::new();
        registry.get_or_init(|| Ok(memory_logger(&sink)))?;

        registry.shutdown().await?;
        assert_eq!(sink.flush_count(), 1);
        assert!(registry.get().is_none());

        // A second shutdown is a no-op.
        registry.shutdown().await?;
        assert_eq!(sink.flush_count(), 1);

        registry.get_or_init(|| Ok(memory_logger(&sink)))?;
        assert!(registry.is_initialized());
        Ok(())
    }

    #[test]
    #[serial]
    fn test_init_from_env_missing_configuration() {
        clean_env();

        let registry = LoggerRegistry::new();
        let err = registry
            .init_from_env(Arc::new(MemorySink::new()))
            .err()
            .expect("initialization should fail without configuration");

        assert!(matches!(
            err,
            LoggerError::Config(ConfigError::MissingEnvVar { .. })
        ));
        assert!(registry.get().is_none());
    }

    #[test]
    #[serial]
    fn test_init_from_env() -> Result<()> {
        clean_env();
        env::set_var("CHATLOG_API_KEY", "sk-env");
        env::set_var("CHATLOG_PROJECT", "from-env");

        let registry = LoggerRegistry::new();
        let logger = registry.init_from_env(Arc::new(MemorySink::new()))?;
        assert_eq!(logger.config().project, "from-env");
        assert_eq!(logger.config().base_url, "https://api.chatlog.dev");

        clean_env();
        Ok(())
    }
}
