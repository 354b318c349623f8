//! Settings for the `pt` binary: where the database lives and which range
//! reports use by default.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use pt_core::TimeRange;
use serde::{Deserialize, Serialize};

/// Prefix for environment overrides, e.g. `PT_DEFAULT_RANGE=month`.
const ENV_PREFIX: &str = "PT_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_path: PathBuf,

    /// Range used by `metrics` and `entries list` when `--range` is omitted.
    #[serde(default)]
    pub default_range: TimeRange,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("pointage.db"),
            default_range: TimeRange::default(),
        }
    }
}

impl Config {
    /// Built-in defaults, overlaid by `~/.config/pointage/config.toml`, then
    /// `config_path`, then `PT_*` variables. Missing files are skipped.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let files = dirs_config_path()
            .map(|dir| dir.join("config.toml"))
            .into_iter()
            .chain(config_path.map(Path::to_path_buf));

        files
            .fold(
                Figment::from(Serialized::defaults(Self::default())),
                |figment, file| figment.merge(Toml::file(file)),
            )
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
    }
}

fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("pointage"))
}

/// `<data dir>/pointage`, e.g. `~/.local/share/pointage` on Linux.
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("pointage"))
}
