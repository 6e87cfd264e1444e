//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If a required variable is missing, falls back to loading from file
//! 3. Searches several paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! Required (either name works, `SKOO_*` wins):
//! - `SKOO_DATABASE_URL` / `DATABASE_URL`: Postgres connection string
//! - `SKOO_LLM_API_KEY` / `LOVABLE_API_KEY`: chat-completions gateway key
//! - `SKOO_SUPABASE_URL` / `SUPABASE_URL`: auth backend base URL
//! - `SKOO_SUPABASE_ANON_KEY` / `SUPABASE_ANON_KEY`: auth backend public key
//!
//! Optional:
//! - `SKOO_HOST`, `SKOO_PORT`: listener address (default `0.0.0.0:8080`)
//! - `SKOO_DATABASE_TLS`: connect with TLS (default true)
//! - `SKOO_LLM_API_URL`, `SKOO_LLM_MODEL`, `SKOO_LLM_TIMEOUT`
//! - `SKOO_COPILOT_MODEL`, `SKOO_COPILOT_MAX_TOKENS`, `SKOO_COPILOT_MAX_ROUNDS`
//! - `GOOGLE_CLIENT_ID` + `GOOGLE_CLIENT_SECRET`: enables Google Calendar
//! - `SKOO_MAJOR_PRODUCT_ID`: billing product mapped to the `major` tier
//!
//! ## File Locations
//! The loader looks for `skoo.{json,toml}` then `config.{json,toml}` in the
//! working directory, its two parents, and next to the executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use skoo_domain::constants::{
    DEFAULT_GATEWAY_MODEL, DEFAULT_GATEWAY_URL, DEFAULT_LLM_TIMEOUT_SECS,
};
use skoo_domain::{
    BillingConfig, Config, CopilotConfig, DatabaseConfig, GoogleConfig, LlmConfig, Result,
    ServerConfig, SkooError, SupabaseConfig,
};

const CONFIG_FILE_NAMES: [&str; 4] = ["skoo.json", "skoo.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `SkooError::Config` if configuration cannot be loaded from either
/// source, the file format is invalid, or required fields are missing.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `SkooError::Config` if required variables are missing or a
/// numeric variable does not parse.
pub fn load_from_env() -> Result<Config> {
    let defaults = ServerConfig::default();
    let server = ServerConfig {
        host: optional_var("SKOO_HOST").unwrap_or(defaults.host),
        port: env_parse("SKOO_PORT")?.unwrap_or(defaults.port),
    };

    let database = DatabaseConfig {
        url: env_var_any(&["SKOO_DATABASE_URL", "DATABASE_URL"])?,
        tls: env_bool("SKOO_DATABASE_TLS", true),
    };

    let llm = LlmConfig {
        api_url: optional_var("SKOO_LLM_API_URL")
            .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string()),
        api_key: env_var_any(&["SKOO_LLM_API_KEY", "LOVABLE_API_KEY"])?,
        model: optional_var("SKOO_LLM_MODEL").unwrap_or_else(|| DEFAULT_GATEWAY_MODEL.to_string()),
        timeout_seconds: env_parse("SKOO_LLM_TIMEOUT")?.unwrap_or(DEFAULT_LLM_TIMEOUT_SECS),
    };

    let supabase = SupabaseConfig {
        url: env_var_any(&["SKOO_SUPABASE_URL", "SUPABASE_URL"])?,
        anon_key: env_var_any(&["SKOO_SUPABASE_ANON_KEY", "SUPABASE_ANON_KEY"])?,
    };

    let google = match (optional_var("GOOGLE_CLIENT_ID"), optional_var("GOOGLE_CLIENT_SECRET")) {
        (Some(client_id), Some(client_secret)) => Some(GoogleConfig { client_id, client_secret }),
        _ => None,
    };

    let copilot_defaults = CopilotConfig::default();
    let copilot = CopilotConfig {
        model: optional_var("SKOO_COPILOT_MODEL").unwrap_or(copilot_defaults.model),
        max_tokens: env_parse("SKOO_COPILOT_MAX_TOKENS")?.unwrap_or(copilot_defaults.max_tokens),
        max_rounds: env_parse("SKOO_COPILOT_MAX_ROUNDS")?.unwrap_or(copilot_defaults.max_rounds),
    };

    let billing = BillingConfig { major_product_id: optional_var("SKOO_MAJOR_PRODUCT_ID") };

    Ok(Config { server, database, llm, supabase, google, copilot, billing })
}

/// Load configuration from a file
///
/// If `path` is `None`, searches several locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `SkooError::Config` if the file is missing, unreadable, or does
/// not describe a valid [`Config`].
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SkooError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => find_config_path().ok_or_else(|| {
            SkooError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SkooError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SkooError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SkooError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(SkooError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Search several paths for a configuration file
///
/// Returns the first existing candidate, or `None` if no file exists.
pub fn find_config_path() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd.clone());
        roots.push(cwd.join(".."));
        roots.push(cwd.join("../.."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
            roots.push(exe_dir.join(".."));
        }
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// First non-empty value among `keys`.
///
/// # Errors
/// Returns `SkooError::Config` naming the first key if none is set.
fn env_var_any(keys: &[&str]) -> Result<String> {
    keys.iter().find_map(|key| optional_var(key)).ok_or_else(|| {
        SkooError::Config(format!(
            "Missing required environment variable: {}",
            keys.first().copied().unwrap_or_default()
        ))
    })
}

fn optional_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional_var(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| SkooError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
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

    const ALL_VARS: [&str; 19] = [
        "SKOO_HOST",
        "SKOO_PORT",
        "SKOO_DATABASE_URL",
        "DATABASE_URL",
        "SKOO_DATABASE_TLS",
        "SKOO_LLM_API_URL",
        "SKOO_LLM_API_KEY",
        "LOVABLE_API_KEY",
        "SKOO_LLM_MODEL",
        "SKOO_LLM_TIMEOUT",
        "SKOO_SUPABASE_URL",
        "SUPABASE_URL",
        "SKOO_SUPABASE_ANON_KEY",
        "SUPABASE_ANON_KEY",
        "GOOGLE_CLIENT_ID",
        "GOOGLE_CLIENT_SECRET",
        "SKOO_COPILOT_MAX_ROUNDS",
        "SKOO_COPILOT_MAX_TOKENS",
        "SKOO_MAJOR_PRODUCT_ID",
    ];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }

    fn write_temp(contents: &str, extension: &str) -> PathBuf {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        let path = temp_file.path().with_extension(extension);
        std::fs::copy(temp_file.path(), &path).unwrap();
        path
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("SKOO_TEST_BOOL_ON", "On");
        std::env::set_var("SKOO_TEST_BOOL_OFF", "0");
        std::env::remove_var("SKOO_TEST_BOOL_MISSING");

        assert!(env_bool("SKOO_TEST_BOOL_ON", false));
        assert!(!env_bool("SKOO_TEST_BOOL_OFF", true));
        assert!(env_bool("SKOO_TEST_BOOL_MISSING", true));

        std::env::remove_var("SKOO_TEST_BOOL_ON");
        std::env::remove_var("SKOO_TEST_BOOL_OFF");
    }

    #[test]
    fn test_load_from_env_with_original_names() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("DATABASE_URL", "postgres://localhost/skoo");
        std::env::set_var("LOVABLE_API_KEY", "gateway-key");
        std::env::set_var("SUPABASE_URL", "https://abc.supabase.co");
        std::env::set_var("SUPABASE_ANON_KEY", "anon");
        std::env::set_var("SKOO_DATABASE_TLS", "false");
        std::env::set_var("SKOO_COPILOT_MAX_ROUNDS", "3");
        std::env::set_var("GOOGLE_CLIENT_ID", "cid");

        let config = load_from_env().expect("config from env");
        clear_env();

        assert_eq!(config.database.url, "postgres://localhost/skoo");
        assert!(!config.database.tls);
        assert_eq!(config.llm.api_key, "gateway-key");
        assert_eq!(config.llm.api_url, DEFAULT_GATEWAY_URL);
        assert_eq!(config.supabase.anon_key, "anon");
        assert_eq!(config.copilot.max_rounds, 3);
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        // Google needs both halves of the credential.
        assert!(config.google.is_none());
        assert!(config.billing.major_product_id.is_none());
    }

    #[test]
    fn test_prefixed_names_win() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("DATABASE_URL", "postgres://fallback/skoo");
        std::env::set_var("SKOO_DATABASE_URL", "postgres://primary/skoo");
        std::env::set_var("SKOO_LLM_API_KEY", "k");
        std::env::set_var("SKOO_SUPABASE_URL", "https://s.example");
        std::env::set_var("SKOO_SUPABASE_ANON_KEY", "a");
        std::env::set_var("SKOO_PORT", "9000");

        let config = load_from_env().expect("config from env");
        clear_env();

        assert_eq!(config.database.url, "postgres://primary/skoo");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_load_from_env_missing_and_invalid() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let missing = load_from_env().unwrap_err();
        assert!(matches!(missing, SkooError::Config(msg) if msg.contains("SKOO_DATABASE_URL")));

        std::env::set_var("DATABASE_URL", "postgres://localhost/skoo");
        std::env::set_var("LOVABLE_API_KEY", "k");
        std::env::set_var("SUPABASE_URL", "https://s.example");
        std::env::set_var("SUPABASE_ANON_KEY", "a");
        std::env::set_var("SKOO_PORT", "not-a-port");

        let invalid = load_from_env().unwrap_err();
        clear_env();
        assert!(matches!(invalid, SkooError::Config(msg) if msg.contains("SKOO_PORT")));
    }

    #[test]
    fn test_load_from_file_toml() {
        let path = write_temp(
            r#"
[database]
url = "postgres://localhost/skoo"
tls = false

[llm]
api_key = "k"

[supabase]
url = "https://s.example"
anon_key = "a"

[google]
client_id = "cid"
client_secret = "secret"

[copilot]
model = "google/gemini-2.5-flash"
max_tokens = 2048
max_rounds = 4
"#,
            "toml",
        );

        let config = load_from_file(Some(path.clone())).expect("toml config");
        std::fs::remove_file(path).ok();

        assert!(!config.database.tls);
        assert_eq!(config.copilot.max_rounds, 4);
        assert_eq!(config.google.map(|g| g.client_id), Some("cid".to_string()));
    }

    #[test]
    fn test_load_from_file_json() {
        let path = write_temp(
            r#"{
                "server": { "host": "127.0.0.1", "port": 3000 },
                "database": { "url": "postgres://localhost/skoo" },
                "llm": { "api_key": "k", "timeout_seconds": 10 },
                "supabase": { "url": "https://s.example", "anon_key": "a" },
                "billing": { "major_product_id": "prod_major" }
            }"#,
            "json",
        );

        let config = load_from_file(Some(path.clone())).expect("json config");
        std::fs::remove_file(path).ok();

        assert_eq!(config.server.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.llm.timeout_seconds, 10);
        assert_eq!(config.billing.major_product_id.as_deref(), Some("prod_major"));
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/skoo.json")));
        assert!(matches!(result, Err(SkooError::Config(_))));
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let path = write_temp(r#"{ "database": "#, "json");
        let result = load_from_file(Some(path.clone()));
        std::fs::remove_file(path).ok();
        assert!(matches!(result, Err(SkooError::Config(msg)) if msg.contains("Invalid JSON")));
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("some content", Path::new("skoo.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }
}
