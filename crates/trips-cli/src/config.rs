//! Configuration loading and management.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::cli::PolicyKind;

/// Application configuration. Every field can be overridden per run by the
/// matching command-line flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Filter policy applied by default.
    pub policy: PolicyKind,
    /// Filter date for the date-example policy.
    pub date: NaiveDate,
    /// Fixed UTC offset for displayed times, e.g. "+02:00". When unset, the
    /// local offset at startup is used.
    pub utc_offset: Option<String>,
    /// Destination for the CSV report.
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Bounded,
            // Example date the date-example filter ships with.
            date: NaiveDate::from_ymd_opt(2022, 2, 4).unwrap(),
            utc_offset: None,
            output: PathBuf::from("output.csv"),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TRIPS_*)
        figment = figment.merge(Env::prefixed("TRIPS_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for trips.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("trips"))
}
