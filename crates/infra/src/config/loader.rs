//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! Whatever the source, the result is validated before it is returned.
//!
//! ## Environment Variables
//! - `SLOTWISE_DB_PATH`: Database file path (required)
//! - `SLOTWISE_DB_POOL_SIZE`: Connection pool size (required)
//! - `SLOTWISE_LOOKAHEAD_DAYS`: Days scanned per placement (8-14)
//! - `SLOTWISE_FETCH_CONCURRENCY`: Concurrent day fetches during a scan
//! - `SLOTWISE_MIN_SLOT_MINUTES`: Shortest slot worth reporting
//! - `SLOTWISE_SKIP_ELAPSED_TODAY`: Block the elapsed part of today (true/false)
//! - `SLOTWISE_CAMPUS_ADDRESS`: Address used for class room codes
//! - `SLOTWISE_CONTEXT_TTL_SECS`: User context cache TTL
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./slotwise.json` or `./slotwise.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use slotwise_domain::{CacheSettings, Config, DatabaseConfig, PlannerConfig, Result, SlotwiseError};

/// Load configuration with automatic fallback strategy
///
/// Uses environment variables when `SLOTWISE_DB_PATH` is set and falls back
/// to a probed config file otherwise.
///
/// # Errors
/// Returns `SlotwiseError::Config` if:
/// - Configuration cannot be loaded from the chosen source
/// - File format is invalid
/// - A value fails validation
pub fn load() -> Result<Config> {
    load_with_fallback(None)
}

/// Like [`load`], with an explicit fallback file instead of probing.
///
/// Only the absence of `SLOTWISE_DB_PATH` triggers the file fallback. A
/// variable that is set but invalid is returned as an error from either
/// path, and the planner and cache variables override file values.
///
/// # Errors
/// Same as [`load`].
pub fn load_with_fallback(path: Option<PathBuf>) -> Result<Config> {
    if std::env::var_os("SLOTWISE_DB_PATH").is_some() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }

    tracing::debug!("SLOTWISE_DB_PATH not set, loading configuration from file");
    let mut config = read_config_file(path)?;
    apply_env_overrides(&mut config)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from environment variables
///
/// The database variables are required; planner and cache variables
/// override their defaults when present.
///
/// # Errors
/// Returns `SlotwiseError::Config` if required variables are missing
/// or any value is invalid.
pub fn load_from_env() -> Result<Config> {
    let path = env_var("SLOTWISE_DB_PATH")?;
    let pool_size = env_parse::<u32>("SLOTWISE_DB_POOL_SIZE", "pool size")?;

    let mut config = Config {
        database: DatabaseConfig { path, pool_size },
        planner: PlannerConfig::default(),
        cache: CacheSettings::default(),
    };
    apply_env_overrides(&mut config)?;
    config.validate()?;
    Ok(config)
}

/// Overwrite planner and cache values with any `SLOTWISE_*` variables set.
fn apply_env_overrides(config: &mut Config) -> Result<()> {
    let planner = &mut config.planner;
    if let Some(days) = env_parse_opt::<u32>("SLOTWISE_LOOKAHEAD_DAYS", "lookahead days")? {
        planner.lookahead_days = days;
    }
    if let Some(n) = env_parse_opt::<usize>("SLOTWISE_FETCH_CONCURRENCY", "fetch concurrency")? {
        planner.fetch_concurrency = n;
    }
    if let Some(minutes) = env_parse_opt::<u32>("SLOTWISE_MIN_SLOT_MINUTES", "minimum slot")? {
        planner.min_slot_minutes = minutes;
    }
    planner.skip_elapsed_today =
        env_bool("SLOTWISE_SKIP_ELAPSED_TODAY", planner.skip_elapsed_today);
    if let Some(address) =
        std::env::var("SLOTWISE_CAMPUS_ADDRESS").ok().filter(|s| !s.trim().is_empty())
    {
        planner.campus_address = Some(address);
    }

    if let Some(ttl) = env_parse_opt::<u64>("SLOTWISE_CONTEXT_TTL_SECS", "context TTL")? {
        config.cache.context_ttl_secs = ttl;
    }
    Ok(())
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `SlotwiseError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - A value fails validation
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config = read_config_file(path)?;
    config.validate()?;
    Ok(config)
}

/// Locate and parse a config file without validating it.
fn read_config_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SlotwiseError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SlotwiseError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SlotwiseError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SlotwiseError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SlotwiseError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(SlotwiseError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Search the standard locations for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("slotwise.json"),
        dir.join("slotwise.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| SlotwiseError::Config(format!("Missing required environment variable: {key}")))
}

fn env_parse<T>(key: &str, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_var(key)?
        .trim()
        .parse::<T>()
        .map_err(|e| SlotwiseError::Config(format!("Invalid {what}: {e}")))
}

/// Like [`env_parse`] but absent variables are `None`.
fn env_parse_opt<T>(key: &str, what: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(_) => env_parse(key, what).map(Some),
        Err(_) => Ok(None),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ENV_KEYS: &[&str] = &[
        "SLOTWISE_DB_PATH",
        "SLOTWISE_DB_POOL_SIZE",
        "SLOTWISE_LOOKAHEAD_DAYS",
        "SLOTWISE_FETCH_CONCURRENCY",
        "SLOTWISE_MIN_SLOT_MINUTES",
        "SLOTWISE_SKIP_ELAPSED_TODAY",
        "SLOTWISE_CAMPUS_ADDRESS",
        "SLOTWISE_CONTEXT_TTL_SECS",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    fn temp_config(contents: &str, extension: &str) -> PathBuf {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        let path = temp_file.path().with_extension(extension);
        std::fs::copy(temp_file.path(), &path).unwrap();
        path
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("SLOTWISE_TEST_BOOL_YES", "YES");
        std::env::set_var("SLOTWISE_TEST_BOOL_OFF", "off");
        assert!(env_bool("SLOTWISE_TEST_BOOL_YES", false));
        assert!(!env_bool("SLOTWISE_TEST_BOOL_OFF", true));

        std::env::remove_var("SLOTWISE_TEST_BOOL_MISSING");
        assert!(env_bool("SLOTWISE_TEST_BOOL_MISSING", true));

        std::env::remove_var("SLOTWISE_TEST_BOOL_YES");
        std::env::remove_var("SLOTWISE_TEST_BOOL_OFF");
    }

    #[test]
    fn test_load_from_env_overrides_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("SLOTWISE_DB_PATH", "/tmp/slotwise.db");
        std::env::set_var("SLOTWISE_DB_POOL_SIZE", "5");
        std::env::set_var("SLOTWISE_LOOKAHEAD_DAYS", "10");
        std::env::set_var("SLOTWISE_SKIP_ELAPSED_TODAY", "false");
        std::env::set_var("SLOTWISE_CAMPUS_ADDRESS", "1 Rue de l'Université");

        let config = load_from_env().expect("config from env");
        assert_eq!(config.database.path, "/tmp/slotwise.db");
        assert_eq!(config.database.pool_size, 5);
        assert_eq!(config.planner.lookahead_days, 10);
        assert!(!config.planner.skip_elapsed_today);
        assert_eq!(config.planner.campus_address.as_deref(), Some("1 Rue de l'Université"));
        assert_eq!(config.planner.fetch_concurrency, 4);
        assert_eq!(config.cache.context_ttl_secs, 300);

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_or_invalid() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        assert!(matches!(load_from_env(), Err(SlotwiseError::Config(_))));

        std::env::set_var("SLOTWISE_DB_PATH", "/tmp/slotwise.db");
        std::env::set_var("SLOTWISE_DB_POOL_SIZE", "not-a-number");
        assert!(matches!(load_from_env(), Err(SlotwiseError::Config(_))));

        std::env::set_var("SLOTWISE_DB_POOL_SIZE", "2");
        std::env::set_var("SLOTWISE_LOOKAHEAD_DAYS", "5");
        match load_from_env() {
            Err(SlotwiseError::Config(msg)) => assert!(msg.contains("lookahead")),
            other => panic!("expected lookahead rejection, got {other:?}"),
        }

        clear_env();
    }

    #[test]
    fn test_load_from_file_json() {
        let path = temp_config(
            r#"{
                "database": { "path": "test.db", "pool_size": 4 },
                "planner": {
                    "lookahead_days": 14,
                    "constraints": {
                        "wake_time": "08:00",
                        "bedtime": "23:30",
                        "lunch": { "start": "12:30", "end": "13:30" },
                        "dinner": { "start": "19:30", "end": "20:15" },
                        "avoid_late_evening": false,
                        "late_evening_cutoff": "22:00"
                    }
                }
            }"#,
            "json",
        );

        let config = load_from_file(Some(path.clone())).expect("config from JSON");
        assert_eq!(config.database.pool_size, 4);
        assert_eq!(config.planner.lookahead_days, 14);
        assert_eq!(config.planner.constraints.wake_time, "08:00");
        assert_eq!(config.planner.min_slot_minutes, 30);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_toml() {
        let path = temp_config(
            r#"
[database]
path = "test.db"
pool_size = 6

[planner]
min_slot_minutes = 45
campus_address = "Campus Nord"

[cache]
context_ttl_secs = 60
"#,
            "toml",
        );

        let config = load_from_file(Some(path.clone())).expect("config from TOML");
        assert_eq!(config.database.pool_size, 6);
        assert_eq!(config.planner.min_slot_minutes, 45);
        assert_eq!(config.planner.lookahead_days, 8);
        assert_eq!(config.cache.context_ttl_secs, 60);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_file_with_bad_constraint_time_is_rejected() {
        let path = temp_config(
            r#"
[database]
path = "test.db"
pool_size = 1

[planner.constraints]
wake_time = "7h"
bedtime = "23:00"
lunch = { start = "12:00", end = "13:00" }
dinner = { start = "19:00", end = "20:00" }
avoid_late_evening = true
late_evening_cutoff = "22:00"
"#,
            "toml",
        );

        assert!(matches!(
            load_from_file(Some(path.clone())),
            Err(SlotwiseError::InvalidTimeFormat(_))
        ));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(matches!(result, Err(SlotwiseError::Config(_))));
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("some content", &PathBuf::from("test.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }
}
