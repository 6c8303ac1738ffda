use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty configuration is a valid one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: Server,
    pub datasource: Datasource,
    pub logging: Logging,
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

/// Location and naming of the per-asset price files.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Datasource {
    /// Directory holding one file per asset.
    pub dir: PathBuf,
    /// Appended to the asset symbol to form the file name, e.g. `BTC_values.csv`.
    pub file_suffix: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Logging {
    /// Default filter directive. `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for Datasource {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            file_suffix: "_values.csv".to_string(),
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

/// Command-line overrides for the settings a user most often changes per run.
#[cfg(feature = "clap")]
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ServeOverrides {
    /// Address to bind the HTTP server to.
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind the HTTP server to.
    #[arg(long)]
    pub port: Option<u16>,

    /// Directory holding the per-asset price files.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

#[cfg(feature = "clap")]
impl Config {
    /// Applies any values given on the command line on top of the loaded settings.
    pub fn apply_overrides(&mut self, overrides: &ServeOverrides) {
        if let Some(host) = &overrides.host {
            self.server.host = host.clone();
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(dir) = &overrides.data_dir {
            self.datasource.dir = dir.clone();
        }
    }
}
