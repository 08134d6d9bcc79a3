use crate::app_config::{AppConfig, Environment, LogFormat};
use crate::ConfigError;

pub(crate) const SERPAPI_KEY_VAR: &str = "SERPAPI_KEY";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files, useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Startup validation for the upstream credential.
///
/// A missing key is not a load error: the caller decides whether to warn and
/// keep serving (the server) or refuse to run (the CLI).
///
/// # Errors
///
/// Returns [`ConfigError::MissingEnvVar`] when `SERPAPI_KEY` is unset or blank.
pub fn check_upstream_key(config: &AppConfig) -> Result<(), ConfigError> {
    match config.upstream_key() {
        Some(_) => Ok(()),
        None => Err(ConfigError::MissingEnvVar(SERPAPI_KEY_VAR.to_string())),
    }
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup; no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::{IpAddr, SocketAddr};
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let port = or_default("PORT", "3000")
        .trim()
        .parse::<u16>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "PORT".to_string(),
            reason: e.to_string(),
        })?;
    let host = or_default("BREWFIND_BIND_HOST", "0.0.0.0")
        .trim()
        .parse::<IpAddr>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "BREWFIND_BIND_HOST".to_string(),
            reason: e.to_string(),
        })?;
    let bind_addr = SocketAddr::new(host, port);

    let env = parse_environment(&or_default("BREWFIND_ENV", "development"));
    let log_level = or_default("BREWFIND_LOG_LEVEL", "info");
    let log_format = match lookup("BREWFIND_LOG_FORMAT") {
        Ok(raw) => parse_log_format(&raw)?,
        Err(_) => env.default_log_format(),
    };
    let static_dir = PathBuf::from(or_default("BREWFIND_STATIC_DIR", "./public"));
    let serpapi_key = lookup(SERPAPI_KEY_VAR).ok();
    let upstream_base_url = or_default("BREWFIND_UPSTREAM_BASE_URL", "https://serpapi.com");
    let upstream_timeout_secs = parse_u64("BREWFIND_UPSTREAM_TIMEOUT_SECS", "15")?;

    if upstream_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "BREWFIND_UPSTREAM_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        log_format,
        static_dir,
        serpapi_key,
        upstream_base_url,
        upstream_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

/// Parse `BREWFIND_LOG_FORMAT`. Only `text` and `json` are accepted.
fn parse_log_format(s: &str) -> Result<LogFormat, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "text" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BREWFIND_LOG_FORMAT".to_string(),
            reason: format!("expected \"text\" or \"json\", got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
