//! Service configuration.
//!
//! Built-in defaults overlaid with environment variables (`PORT`, `API_KEY`,
//! ...) by the `config` crate. Unknown variables are ignored.

use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use config::{Config as Source, Environment};
use serde::Deserialize;

use crate::error::Error;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Shared secret expected in the `x-api-key` header on writes.
    pub api_key: String,
    pub request_timeout_secs: u64,
    /// `json` for machine-readable logs; anything else is human-readable.
    pub log_format: String,
}

impl Config {
    /// Loads from the process environment.
    pub fn load() -> Result<Self, Error> {
        Self::from_env(Environment::default().try_parsing(true))
    }

    fn from_env(env: Environment) -> Result<Self, Error> {
        let config = Source::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("api_key", "secret-api-key-12345")?
            .set_default("request_timeout_secs", 30)?
            .set_default("log_format", "pretty")?
            .add_source(env)
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Resolves `host:port` to the first matching socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, Error> {
        let target = format!("{}:{}", self.host, self.port);
        let resolved = target.to_socket_addrs().ok().and_then(|mut addrs| addrs.next());
        resolved.ok_or(Error::Address(target))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}
