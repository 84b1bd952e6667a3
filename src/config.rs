//! # Configuration Module
//!
//! Runtime settings for the exporter: where Logstash lives, where the exposition
//! endpoint listens, and how long a single scrape may take.
//!
//! Settings come either from the command line (with environment fallbacks) or
//! from a YAML file layered under `LOGSTASH_EXPORTER_*` environment variables.
//! Both routes end in [`Config::new`], which validates the Logstash URL. An
//! invalid URL is a startup error.

use eyre::{
    eyre,
    Context as _,
    Result,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::{
    net::SocketAddr,
    path::Path,
    time::Duration,
};
use url::Url;

pub const DEFAULT_LOGSTASH_URL: &str = "http://localhost:9600";
pub const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0:2112";
pub const DEFAULT_SCRAPE_TIMEOUT: &str = "10s";

/// Raw, unvalidated settings as read from a file or the environment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub logstash_url: String,
    pub listen_address: String,
    pub scrape_timeout: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            logstash_url: DEFAULT_LOGSTASH_URL.to_string(),
            listen_address: DEFAULT_LISTEN_ADDRESS.to_string(),
            scrape_timeout: DEFAULT_SCRAPE_TIMEOUT.to_string(),
        }
    }
}

/// Load settings from a YAML file. `LOGSTASH_EXPORTER_*` variables override
/// the file, the file overrides the defaults.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let defaults = Settings::default();
    let settings = ::config::Config::builder()
        .set_default("logstash_url", defaults.logstash_url)?
        .set_default("listen_address", defaults.listen_address)?
        .set_default("scrape_timeout", defaults.scrape_timeout)?
        .add_source(::config::File::from(path).format(::config::FileFormat::Yaml))
        .add_source(::config::Environment::with_prefix("LOGSTASH_EXPORTER"))
        // The URL variable is LOGSTASH_EXPORTER_URL, not LOGSTASH_EXPORTER_LOGSTASH_URL.
        .set_override_option("logstash_url", std::env::var("LOGSTASH_EXPORTER_URL").ok())?
        .build()
        .with_context(|| format!("reading config file {}", path.display()))?;

    Ok(settings.try_deserialize::<Settings>()?)
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Logstash base URL, trailing slashes stripped.
    pub logstash_url: String,
    pub listen_address: SocketAddr,
    /// Deadline for every request issued against Logstash.
    pub scrape_timeout: Duration,
}

impl Config {
    pub fn new(logstash_url: &str, listen_address: SocketAddr, scrape_timeout: Duration) -> Result<Self> {
        Ok(Self {
            logstash_url: normalize_base_url(logstash_url)?,
            listen_address,
            scrape_timeout,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let listen_address = settings
            .listen_address
            .parse::<SocketAddr>()
            .map_err(|e| eyre!("Invalid listen address '{}': {}", settings.listen_address, e))?;
        let scrape_timeout = parse_duration(&settings.scrape_timeout)?;
        Self::new(&settings.logstash_url, listen_address, scrape_timeout)
    }
}

/// Strip trailing slashes and make sure what is left is an absolute http(s) URL.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| eyre!("Invalid Logstash URL '{}': {}", raw, e))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(eyre!("Invalid Logstash URL '{}': scheme must be http or https", raw));
    }
    if url.host_str().is_none() {
        return Err(eyre!("Invalid Logstash URL '{}': no host", raw));
    }

    Ok(trimmed.to_string())
}

pub fn parse_duration(duration_str: &str) -> Result<Duration> {
    humantime::parse_duration(duration_str).map_err(|e| eyre!("Invalid duration '{}': {}", duration_str, e))
}
