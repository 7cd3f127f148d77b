use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Runtime configuration, resolved once from the process environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Listening port; `PORT` in the environment.
    pub port: u16,
    /// SQLite connection string; `DATABASE_URL` in the environment.
    pub database_url: String,
    /// Override for the static asset directory; `STATIC_DIR` in the
    /// environment. When unset, assets live in `client/` next to the binary.
    pub static_dir: Option<PathBuf>,
    /// Default tracing filter used when `RUST_LOG` is unset.
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 4000,
            database_url: "sqlite:roster.db".to_string(),
            static_dir: None,
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults overlaid with the recognized environment variables.
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(&["port", "database_url", "static_dir", "loglevel"]))
            .extract()
    }

    /// Root directory for static assets: the configured override, or the
    /// `client/` directory beside the running executable.
    pub fn static_root(&self) -> PathBuf {
        match &self.static_dir {
            Some(dir) => dir.clone(),
            None => exe_dir().join("client"),
        }
    }
}

fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub static CONFIG: LazyLock<Config> =
    LazyLock::new(|| Config::load().expect("invalid environment configuration"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_contract() {
        let cfg = Config::default();
        assert_eq!(cfg.port, 4000);
        assert_eq!(cfg.database_url, "sqlite:roster.db");
        assert_eq!(cfg.loglevel, "info");
        assert!(cfg.static_dir.is_none());
    }

    #[test]
    fn static_root_prefers_configured_override() {
        let cfg = Config {
            static_dir: Some(PathBuf::from("/srv/roster/assets")),
            ..Config::default()
        };
        assert_eq!(cfg.static_root(), PathBuf::from("/srv/roster/assets"));
    }

    #[test]
    fn static_root_defaults_to_client_dir() {
        let cfg = Config::default();
        assert!(cfg.static_root().ends_with("client"));
    }
}
