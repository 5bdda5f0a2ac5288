use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let google_api_key = require("LEADSCOUT_GOOGLE_API_KEY")?;

    let log_level = or_default("LEADSCOUT_LOG_LEVEL", "info");
    let accounts_path = PathBuf::from(or_default("LEADSCOUT_ACCOUNTS_PATH", "./accounts.csv"));
    let zips_path = PathBuf::from(or_default("LEADSCOUT_ZIPS_PATH", "./zips.csv"));

    let request_timeout_secs = parse_u64("LEADSCOUT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("LEADSCOUT_USER_AGENT", "leadscout/0.1 (lead-generation)");
    let max_retries = parse_u32("LEADSCOUT_MAX_RETRIES", "0")?;
    let retry_backoff_base_secs = parse_u64("LEADSCOUT_RETRY_BACKOFF_BASE_SECS", "1")?;
    let photo_max_width = parse_u32("LEADSCOUT_PHOTO_MAX_WIDTH", "800")?;

    Ok(AppConfig {
        google_api_key,
        log_level,
        accounts_path,
        zips_path,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_secs,
        photo_max_width,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("LEADSCOUT_GOOGLE_API_KEY", "test-api-key");
        m
    }

    #[test]
    fn build_app_config_fails_without_api_key() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "LEADSCOUT_GOOGLE_API_KEY"),
            "expected MissingEnvVar(LEADSCOUT_GOOGLE_API_KEY), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_defaults() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.google_api_key, "test-api-key");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.accounts_path.to_str(), Some("./accounts.csv"));
        assert_eq!(cfg.zips_path.to_str(), Some("./zips.csv"));
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.user_agent, "leadscout/0.1 (lead-generation)");
        assert_eq!(cfg.max_retries, 0);
        assert_eq!(cfg.retry_backoff_base_secs, 1);
        assert_eq!(cfg.photo_max_width, 800);
    }

    #[test]
    fn build_app_config_request_timeout_override() {
        let mut map = full_env();
        map.insert("LEADSCOUT_REQUEST_TIMEOUT_SECS", "60");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.request_timeout_secs, 60);
    }

    #[test]
    fn build_app_config_request_timeout_invalid() {
        let mut map = full_env();
        map.insert("LEADSCOUT_REQUEST_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEADSCOUT_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(LEADSCOUT_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_max_retries_override() {
        let mut map = full_env();
        map.insert("LEADSCOUT_MAX_RETRIES", "3");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.max_retries, 3);
    }

    #[test]
    fn build_app_config_max_retries_invalid() {
        let mut map = full_env();
        map.insert("LEADSCOUT_MAX_RETRIES", "many");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEADSCOUT_MAX_RETRIES"),
            "expected InvalidEnvVar(LEADSCOUT_MAX_RETRIES), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_photo_width_override() {
        let mut map = full_env();
        map.insert("LEADSCOUT_PHOTO_MAX_WIDTH", "400");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.photo_max_width, 400);
    }

    #[test]
    fn build_app_config_paths_override() {
        let mut map = full_env();
        map.insert("LEADSCOUT_ACCOUNTS_PATH", "/data/roster.csv");
        map.insert("LEADSCOUT_ZIPS_PATH", "/data/zips.csv");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.accounts_path.to_str(), Some("/data/roster.csv"));
        assert_eq!(cfg.zips_path.to_str(), Some("/data/zips.csv"));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(
            !rendered.contains("test-api-key"),
            "API key must not appear in Debug output: {rendered}"
        );
        assert!(rendered.contains("[redacted]"));
    }
}
