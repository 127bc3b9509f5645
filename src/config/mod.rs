// Configuration module entry point
// Layered load: config file, SITE_* environment, programmatic defaults,
// then the platform overrides (PORT, APP_ENV) used by hosting environments.

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::StartupError;

// Re-export public types
pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, ServerConfig, SiteConfig};

impl Config {
    /// Load configuration from the given file path.
    /// The file is optional; defaults describe a development server on
    /// port 3000 listening on all interfaces.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let mut cfg = Self::load_layers(config_path)?;
        // Bare PORT / APP_ENV variables injected by hosting platforms win
        // over both the file and the SITE_* source.
        cfg.apply_overrides(std::env::var("PORT").ok(), std::env::var("APP_ENV").ok())?;
        Ok(cfg)
    }

    fn load_layers(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SITE"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.environment", "development")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("http.service_name", "siteserve")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .set_default("site.root", "static")?
            .build()?;

        settings.try_deserialize()
    }

    fn apply_overrides(
        &mut self,
        port: Option<String>,
        environment: Option<String>,
    ) -> Result<(), config::ConfigError> {
        if let Some(port) = port {
            self.server.port = port.parse().map_err(|_| {
                config::ConfigError::Message(format!("invalid PORT value '{port}'"))
            })?;
        }
        if let Some(environment) = environment {
            self.server.environment = environment;
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, StartupError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|source| StartupError::Address { addr, source })
    }
}
