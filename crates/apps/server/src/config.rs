use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ADDR: &str = "127.0.0.1:9200";
pub const DEFAULT_BOUNDARIES_URL: &str =
    "https://raw.githubusercontent.com/holtzy/D3-graph-gallery/master/DATA/world.geojson";
pub const DEFAULT_COUNTRY_INFO_URL: &str = "https://restcountries.com/v3.1";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub boundaries_url: String,
    /// Local GeoJSON used instead of `boundaries_url` when set.
    pub boundaries_path: Option<PathBuf>,
    pub country_info_url: String,
    /// Replaces the bundled rate table when set.
    pub tax_table_path: Option<PathBuf>,
    pub trend_table_path: Option<PathBuf>,
    pub fetch_timeout: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        let addr_raw = env::var("TAXGLOBE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr_raw
            .parse()
            .map_err(|e| format!("invalid TAXGLOBE_ADDR {addr_raw:?}: {e}"))?;

        Ok(Self {
            addr,
            boundaries_url: env::var("BOUNDARIES_URL")
                .unwrap_or_else(|_| DEFAULT_BOUNDARIES_URL.to_string()),
            boundaries_path: env_var_path("BOUNDARIES_PATH"),
            country_info_url: env::var("COUNTRY_INFO_URL")
                .unwrap_or_else(|_| DEFAULT_COUNTRY_INFO_URL.to_string()),
            tax_table_path: env_var_path("TAX_TABLE_PATH"),
            trend_table_path: env_var_path("TREND_TABLE_PATH"),
            fetch_timeout: Duration::from_secs(env_var_u64(
                "FETCH_TIMEOUT_SECS",
                DEFAULT_FETCH_TIMEOUT_SECS,
            )),
        })
    }
}

fn env_var_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_var_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}
