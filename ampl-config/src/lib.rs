//! Shared configuration loader for the AMPL language server.
//!
//! `defaults/ampl-lsp.default.toml` is embedded into the binary so that
//! documented defaults and runtime behavior stay in sync. The server layers
//! editor-provided settings on top of those defaults via [`Loader`] before
//! deserializing into [`AmplConfig`]. A configuration is built per workspace
//! when the workspace initializes or its settings change; nothing is shared
//! mutably across server instances.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/ampl-lsp.default.toml");

/// Top-level configuration consumed by the language server.
#[derive(Debug, Clone, Deserialize)]
pub struct AmplConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Editor-facing behavior knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub show_notifications: NotificationLevel,
}

/// Logging setup consumed by the server binary.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
}

/// When indexing notifications are shown in the editor UI, mirroring the
/// `showNotifications` vocabulary of the editor extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationLevel {
    Off,
    OnError,
    OnWarning,
    Always,
}

impl Default for AmplConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                show_notifications: NotificationLevel::Off,
            },
            logging: LoggingConfig {
                filter: "info".to_string(),
            },
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for settings delivered over
    /// the protocol at initialize time).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<AmplConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<AmplConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.server.show_notifications, NotificationLevel::Off);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn embedded_defaults_match_the_fallback() {
        let loaded = load_defaults().expect("defaults to deserialize");
        let fallback = AmplConfig::default();
        assert_eq!(
            loaded.server.show_notifications,
            fallback.server.show_notifications
        );
        assert_eq!(loaded.logging.filter, fallback.logging.filter);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("server.show_notifications", "always")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.server.show_notifications, NotificationLevel::Always);
    }

    #[test]
    fn rejects_unknown_notification_levels() {
        let result = Loader::new()
            .set_override("server.show_notifications", "sometimes")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }
}
