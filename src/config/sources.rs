use super::models::Config;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::PathBuf;

const CONFIG_ENV_VAR: &str = "THUMBNAILER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/thumbnailer.toml";
const ENV_PREFIX: &str = "THUMBNAILER";
const ENV_SEPARATOR: &str = "__";
const PORT_ENV_VAR: &str = "PORT";

/// Load configuration from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. TOML file (if exists)
/// 3. Environment variables from .env file (via dotenvy)
/// 4. System environment variables
/// 5. Plain `PORT` variable (highest priority)
pub fn load() -> Result<Config, ConfigError> {
    let config_path = env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

    load_with_env(config_path)
}

/// Same as [`load`] but with an explicit file path (CLI `--config`)
pub fn load_with_env(config_path: PathBuf) -> Result<Config, ConfigError> {
    // Load .env file if it exists (ignore errors if file doesn't exist)
    let _ = dotenvy::dotenv();

    let mut config = load_from_sources(config_path)?;
    apply_port_override(&mut config, env::var(PORT_ENV_VAR).ok().as_deref())?;

    Ok(config)
}

/// Replace the listening port with the value of `PORT`, keeping the host.
/// Unset or blank values leave the configuration untouched.
pub fn apply_port_override(config: &mut Config, port: Option<&str>) -> Result<(), ConfigError> {
    let Some(raw) = port.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(());
    };

    let port: u16 = raw
        .parse()
        .map_err(|_| ConfigError::Message(format!("{PORT_ENV_VAR} is not a valid port: {raw}")))?;

    tracing::info!(port, "Using port from {} environment variable", PORT_ENV_VAR);
    config.server.bind_addr.set_port(port);
    Ok(())
}

/// Load configuration from a specific path and environment
/// Useful for testing with custom config files
pub fn load_from_sources(config_path: PathBuf) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    // Add TOML file if it exists (optional)
    if config_path.exists() {
        tracing::info!("Loading configuration from: {}", config_path.display());
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::debug!(
            "Configuration file not found at {}, using defaults and environment overrides",
            config_path.display()
        );
    }

    // THUMBNAILER__CONVERTER__TIMEOUT -> converter.timeout
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    );

    let config = builder.build()?;
    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_only() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.converter.timeout.as_duration(), Duration::from_secs(30));
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[server]
bind_addr = "127.0.0.1:9000"

[converter]
program = "/usr/local/bin/magick-convert"
timeout = "1500ms"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.server.bind_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(
            config.converter.program,
            Path::new("/usr/local/bin/magick-convert")
        );
        assert_eq!(
            config.converter.timeout.as_duration(),
            Duration::from_millis(1500)
        );
    }

    // Note: env::set_var is unsafe under edition 2024, so the PORT lookup is
    // exercised through apply_port_override with explicit values.

    #[test]
    fn test_port_override_keeps_host() {
        let mut config = Config::default();
        config.server.bind_addr = "127.0.0.1:8080".parse().unwrap();

        apply_port_override(&mut config, Some("3000")).unwrap();
        assert_eq!(config.server.bind_addr.to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn test_port_override_ignores_unset_and_blank() {
        let mut config = Config::default();

        apply_port_override(&mut config, None).unwrap();
        apply_port_override(&mut config, Some("  ")).unwrap();
        assert_eq!(config.server.bind_addr.port(), 8080);
    }

    #[test]
    fn test_port_override_rejects_garbage() {
        let mut config = Config::default();

        assert!(apply_port_override(&mut config, Some("http")).is_err());
        assert!(apply_port_override(&mut config, Some("70000")).is_err());
        assert_eq!(config.server.bind_addr.port(), 8080);
    }
}
