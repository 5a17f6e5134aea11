use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::storage::Dialect;

/// Contents of `uspa.toml`. Every key is optional; command-line flags win.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UspaConfig {
    pub database: Option<String>,
    pub dialect: Option<Dialect>,
}

impl UspaConfig {
    /// Flag, then config, then the default database file
    pub fn resolve_database(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.database.as_ref().map(PathBuf::from))
            .unwrap_or_else(default_database_path)
    }

    /// Flag, then config, then Postgres
    pub fn resolve_dialect(&self, flag: Option<Dialect>) -> Dialect {
        flag.or(self.dialect).unwrap_or_default()
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("uspa.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("uspa_records.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<UspaConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: UspaConfig = toml::from_str(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &UspaConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
