//! Environment-driven configuration.

use domus_db::DbConfig;

/// Build a [`DbConfig`] from `DOMUS_DB_*` environment variables,
/// falling back to the defaults for anything unset.
pub fn db_config_from_env() -> DbConfig {
    let defaults = DbConfig::default();
    DbConfig {
        url: std::env::var("DOMUS_DB_URL").unwrap_or(defaults.url),
        namespace: std::env::var("DOMUS_DB_NAMESPACE").unwrap_or(defaults.namespace),
        database: std::env::var("DOMUS_DB_DATABASE").unwrap_or(defaults.database),
        username: std::env::var("DOMUS_DB_USERNAME").unwrap_or(defaults.username),
        password: std::env::var("DOMUS_DB_PASSWORD").unwrap_or(defaults.password),
    }
}
