//! Polling configuration

use std::time::Duration;

use crate::error::ConfigError;

/// Default period between two status polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Polling configuration
///
/// Only constructible with a non-zero interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    interval: Duration,
}

impl PollConfig {
    /// Creates a configuration polling every `interval`
    pub fn new(interval: Duration) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(Self { interval })
    }

    /// How long to wait between two status polls
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        assert_eq!(PollConfig::default().interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        assert_eq!(
            PollConfig::new(Duration::ZERO),
            Err(ConfigError::ZeroPollInterval)
        );
        assert_eq!(
            PollConfig::new(Duration::from_millis(250)).unwrap().interval(),
            Duration::from_millis(250)
        );
    }
}
