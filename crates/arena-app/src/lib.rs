use std::path::PathBuf;

use directories::ProjectDirs;

pub mod config;

pub use config::Config;

const APP_QUALIFIER: &str = "dev";
const APP_ORGANIZATION: &str = "arena";
const APP_NAME: &str = "arena";
const CONFIG_FILENAME: &str = "arena.toml";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not resolve user config directory")]
    MissingConfigDir,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// App-local config directory (`~/.config/arena` on Linux).
pub fn config_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
        .ok_or(Error::MissingConfigDir)?;
    Ok(dirs.config_dir().to_path_buf())
}

/// Where `arena.toml` is read from when no path is given.
pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILENAME))
}
