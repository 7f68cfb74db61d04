use std::net::{IpAddr, Ipv4Addr};

use rocket::figment::Figment;

pub const DEFAULT_PORT: u16 = 3000;

/// Settings read from the environment (and `.env`) at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub database_url: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_vars(dotenv::var("PORT").ok(), dotenv::var("DATABASE_URL").ok())
    }

    /// Builds the config from raw variable values.
    /// A missing or unusable port falls back to [`DEFAULT_PORT`].
    pub fn from_vars(port: Option<String>, database_url: Option<String>) -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: parse_port(port.as_deref()),
            database_url: database_url.filter(|url| !url.trim().is_empty()),
        }
    }

    /// Rocket's default figment with our address and port merged on top.
    pub fn figment(&self) -> Figment {
        rocket::Config::figment()
            .merge(("address", self.address))
            .merge(("port", self.port))
    }
}

fn parse_port(value: Option<&str>) -> u16 {
    value
        .and_then(|value| value.trim().parse::<u16>().ok())
        .filter(|&port| port != 0)
        .unwrap_or(DEFAULT_PORT)
}
