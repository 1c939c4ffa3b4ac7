//! Server configuration loaded from the environment (and an optional `.env`).

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 8010);
const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24);
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Directory holding `db.json`. Nothing is written to disk when unset.
    pub store_path: Option<PathBuf>,
    pub media_root: PathBuf,
    pub cors_origin: Option<String>,
    pub session_ttl: Duration,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: SocketAddr::from(DEFAULT_BIND_ADDR),
            store_path: None,
            media_root: PathBuf::from("media"),
            cors_origin: None,
            session_ttl: DEFAULT_SESSION_TTL,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Config {
        let defaults = Config::default();

        Config {
            bind_addr: parsed("BLOG_BIND_ADDR").unwrap_or(defaults.bind_addr),
            store_path: env::var_os("BLOG_STORE_PATH").map(PathBuf::from),
            media_root: env::var_os("BLOG_MEDIA_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.media_root),
            cors_origin: env::var("BLOG_CORS_ORIGIN").ok(),
            session_ttl: parsed("BLOG_SESSION_TTL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_ttl),
            max_upload_bytes: parsed("BLOG_MAX_UPLOAD_BYTES").unwrap_or(defaults.max_upload_bytes),
        }
    }
}

/// Read on its own, before [`Config::from_env`], so the subscriber exists by
/// the time config problems are logged.
pub fn json_logs_from_env() -> bool {
    is_json_format(env::var("LOG_FORMAT").ok().as_deref())
}

fn is_json_format(log_format: Option<&str>) -> bool {
    log_format.is_some_and(|format| format.trim().eq_ignore_ascii_case("json"))
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.parse() {
        Ok(it) => Some(it),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable config value");
            None
        }
    }
}
