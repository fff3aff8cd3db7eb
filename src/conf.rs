//! Configuration file of the tickets query.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tickets::{ClientOptions, Error, Result, QUERY_URL};

/// Settings read from a TOML file, all of them are optional.
///
/// ```toml
/// endpoint = "https://kyfw.12306.cn/otn/lcxxcx/query"
/// insecure = false
/// timeout = 30
/// stations = "station_name.js"
/// ```
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Conf {
    /// Address of the tickets query
    endpoint: Option<String>,
    /// Skip the verification of the server certificate
    #[serde(default)]
    insecure: bool,
    /// Request time limit in seconds
    timeout: Option<u64>,
    /// Extra stations in 12306 station_name.js format
    stations: Option<PathBuf>,
}

impl Conf {
    /// Reads the configuration file.
    ///
    /// # Errors
    ///
    /// The method fails if the file can't be read or isn't a valid configuration.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("loading configuration from {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| {
            let message = match e.kind() {
                std::io::ErrorKind::NotFound => {
                    format!("Configuration file '{}' not found", path.display())
                }
                std::io::ErrorKind::PermissionDenied => {
                    format!("Permission denied for '{}'", path.display())
                }
                _ => format!("Cannot access configuration file '{}': {}", path.display(), e),
            };
            Error::value_invalid("conf", message)
        })?;

        Conf::parse(&content).map_err(|e| {
            Error::value_invalid(
                "conf",
                format!("Invalid configuration in '{}': {}", path.display(), e.message()),
            )
        })
    }

    /// Parses the configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::value_invalid("conf", format!("{}", e)))
    }

    /// Returns the file of extra stations.
    pub fn stations(&self) -> Option<&Path> {
        self.stations.as_deref()
    }

    /// Returns the client settings, `insecure` from the command line wins.
    pub fn client_options(&self, insecure: bool) -> ClientOptions {
        ClientOptions {
            endpoint: self
                .endpoint
                .clone()
                .unwrap_or_else(|| QUERY_URL.to_string()),
            insecure: insecure || self.insecure,
            timeout: self.timeout.map(Duration::from_secs),
        }
    }
}
