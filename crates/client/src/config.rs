//! Simulator settings read from the environment.
use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug, Default)]
pub struct SimConfig {
    pub data_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `BATTLE_DATA_DIR` - content directory (default: bundled data)
    /// - `BATTLE_LOG_FILE` - also write logs to this file
    /// - `BATTLE_SEED` - overrides the configured seed
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var_os("BATTLE_DATA_DIR").map(PathBuf::from),
            log_file: env::var_os("BATTLE_LOG_FILE").map(PathBuf::from),
            seed: read_env::<u64>("BATTLE_SEED"),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
