use std::fs;
use std::path::PathBuf;

use crate::session::{AuthStore, FileStorage, SessionError, SessionStorage};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";
const SESSION_FILE: &str = "session.json";

/// Resolve the server URL: explicit flag, then DASHBOARD_API_URL, then the default
pub fn server_url(flag: Option<&str>) -> String {
    let env_url = std::env::var("DASHBOARD_API_URL").ok();
    resolve_server_url(flag, env_url.as_deref())
}

fn resolve_server_url(flag: Option<&str>, env_url: Option<&str>) -> String {
    flag.or(env_url)
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_SERVER_URL)
        .trim_end_matches('/')
        .to_string()
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("DASHCTL_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME")
            .map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("dashctl")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// Session store backed by `<config dir>/session.json`, already hydrated
pub fn load_session_store() -> anyhow::Result<AuthStore<FileStorage>> {
    let storage = FileStorage::new(get_config_dir()?.join(SESSION_FILE));
    open_store(storage)
}

/// A corrupt session file is discarded so `auth login` can replace it
fn open_store<S: SessionStorage>(storage: S) -> anyhow::Result<AuthStore<S>> {
    let mut store = AuthStore::new(storage);

    match store.hydrate() {
        Ok(_) => Ok(store),
        Err(SessionError::Corrupt(e)) => {
            tracing::warn!("Discarding corrupt session file: {}", e);
            store.logout()?;
            Ok(store)
        }
        Err(e) => Err(e.into()),
    }
}
