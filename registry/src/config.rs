//! Database configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_MIN_IDLE: u32 = 2;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the registry's PostgreSQL store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REGISTRY")]
pub struct DatabaseSettings {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Maximum pooled connections.
    pub max_connections: Option<u32>,
    /// Minimum idle connections to keep warm.
    pub min_idle: Option<u32>,
    /// Pool checkout timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
}

impl DatabaseSettings {
    /// Build a pool configuration from these settings, applying defaults for
    /// anything unset.
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::new(&self.database_url)
            .with_max_size(self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS))
            .with_min_idle(Some(self.min_idle.unwrap_or(DEFAULT_MIN_IDLE)))
            .with_connection_timeout(Duration::from_secs(
                self.connect_timeout_secs
                    .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> DatabaseSettings {
        DatabaseSettings::load_from_iter([OsString::from("registry")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_only_the_url_is_set() {
        let _guard = lock_env([
            (
                "REGISTRY_DATABASE_URL",
                Some("postgres://localhost/registry".to_owned()),
            ),
            ("REGISTRY_MAX_CONNECTIONS", None::<String>),
            ("REGISTRY_MIN_IDLE", None::<String>),
            ("REGISTRY_CONNECT_TIMEOUT_SECS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.database_url, "postgres://localhost/registry");
        assert!(settings.max_connections.is_none());
        let pool = settings.pool_config();
        assert_eq!(pool.database_url(), "postgres://localhost/registry");
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "REGISTRY_DATABASE_URL",
                Some("postgres://db.internal/registry".to_owned()),
            ),
            ("REGISTRY_MAX_CONNECTIONS", Some("25".to_owned())),
            ("REGISTRY_MIN_IDLE", Some("5".to_owned())),
            ("REGISTRY_CONNECT_TIMEOUT_SECS", Some("10".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.max_connections, Some(25));
        assert_eq!(settings.min_idle, Some(5));
        assert_eq!(settings.connect_timeout_secs, Some(10));
    }
}
