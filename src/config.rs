use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::db::config::{env_bool, DbConfig};
use crate::services::game_session::DEFAULT_IMAGE_BASE;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub db: DbConfig,
    pub seed_demo_data: bool,
    pub image_base: String,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3000);

        let host = std::env::var("HOST")
            .ok()
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let image_base = std::env::var("IMAGE_PLACEHOLDER_BASE")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_BASE.to_string());

        Self {
            host,
            port,
            log_level,
            db: DbConfig::from_env(),
            seed_demo_data: env_bool("SEED_DEMO_DATA", false),
            image_base,
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
