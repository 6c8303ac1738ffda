use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
#[cfg(feature = "clap")]
pub use settings::ServeOverrides;
pub use settings::{Config, Datasource, Logging, Server};

/// Prefix for environment overrides, e.g. `CRYPTO_STATS__SERVER__PORT=9000`.
const ENV_PREFIX: &str = "CRYPTO_STATS";

/// Loads the application configuration from `config.toml` in the working directory.
///
/// The file is optional. Values are layered over the built-in defaults and
/// can in turn be overridden by `CRYPTO_STATS__<SECTION>__<KEY>` environment variables.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Path::new("config.toml"))
}

/// Same as [`load_config`], reading the given file instead of `config.toml`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

/// Rejects settings the server cannot start with.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port must be non-zero".to_string(),
        ));
    }
    if config.datasource.file_suffix.is_empty() {
        return Err(ConfigError::ValidationError(
            "datasource.file_suffix must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Loading reads the process environment, which the env override test mutates.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn set_env(key: &str, val: &str) -> Option<String> {
        let prev = env::var(key).ok();
        unsafe {
            env::set_var(key, val);
        }
        prev
    }

    fn restore_env(key: &str, prev: Option<String>) {
        match prev {
            Some(v) => unsafe {
                env::set_var(key, v);
            },
            None => unsafe {
                env::remove_var(key);
            },
        }
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.datasource.dir, PathBuf::from("data"));
        assert_eq!(config.datasource.file_suffix, "_values.csv");
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[server]\nport = 9090\n\n[datasource]\ndir = \"/srv/prices\"\n",
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.datasource.dir, PathBuf::from("/srv/prices"));
        assert_eq!(config.datasource.file_suffix, "_values.csv");
    }

    #[test]
    fn zero_port_is_rejected() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server]\nport = 0\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn environment_overrides_file_values() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server]\nport = 9090\n").unwrap();

        let vars = [
            ("CRYPTO_STATS__SERVER__PORT", "9001"),
            ("CRYPTO_STATS__DATASOURCE__DIR", "/var/prices"),
            ("CRYPTO_STATS__DATASOURCE__FILE_SUFFIX", ".csv"),
        ];
        let saved: Vec<_> = vars.iter().map(|(k, v)| (*k, set_env(k, v))).collect();

        let loaded = load_config_from(&path);
        for (key, prev) in saved {
            restore_env(key, prev);
        }

        let config = loaded.unwrap();
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.datasource.dir, PathBuf::from("/var/prices"));
        assert_eq!(config.datasource.file_suffix, ".csv");
    }

    #[test]
    fn empty_suffix_is_rejected() {
        let mut config = Config::default();
        config.datasource.file_suffix.clear();
        assert!(validate(&config).is_err());
    }

    #[cfg(feature = "clap")]
    #[test]
    fn overrides_replace_only_given_values() {
        let mut config = Config::default();
        config.apply_overrides(&ServeOverrides {
            host: None,
            port: Some(3000),
            data_dir: Some(PathBuf::from("fixtures")),
        });
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.datasource.dir, PathBuf::from("fixtures"));
    }
}
