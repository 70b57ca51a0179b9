//! Registry configuration
//!
//! Options applied once when a [`crate::ThreadRegistry`] is constructed at agent attach time.

/// Construction-time options for a [`crate::ThreadRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Number of thread records to reserve space for up front.
    pub initial_capacity: usize,

    /// Emit a debug log line for every thread created / destroyed notification.
    pub log_lifecycle: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
            log_lifecycle: true,
        }
    }
}

impl RegistryConfig {
    /// Default capacity, no lifecycle logging. Suited for hosts with very high thread churn.
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            log_lifecycle: false,
            ..Self::default()
        }
    }

    /// Sets the number of records to reserve space for.
    #[must_use]
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Enables or disables lifecycle logging.
    #[must_use]
    pub fn with_lifecycle_logging(mut self, enabled: bool) -> Self {
        self.log_lifecycle = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_config_presets() {
        let default = RegistryConfig::default();
        assert_eq!(default.initial_capacity, 64);
        assert!(default.log_lifecycle);

        let quiet = RegistryConfig::quiet();
        assert_eq!(quiet.initial_capacity, 64);
        assert!(!quiet.log_lifecycle);
    }

    #[test]
    fn test_registry_config_builder() {
        let config = RegistryConfig::default()
            .with_initial_capacity(8)
            .with_lifecycle_logging(false);
        assert_eq!(config.initial_capacity, 8);
        assert!(!config.log_lifecycle);
    }
}
