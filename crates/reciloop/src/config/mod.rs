use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::marketplace::{DEFAULT_FIXED_INVESTMENT, DEFAULT_MATCH_THRESHOLD};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub marketplace: MarketplaceConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            marketplace: MarketplaceConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Matching and ROI defaults plus the optional CSV catalog source.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketplaceConfig {
    pub match_threshold: f64,
    pub fixed_investment: f64,
    pub catalog: Option<CatalogSource>,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            fixed_investment: DEFAULT_FIXED_INVESTMENT,
            catalog: None,
        }
    }
}

impl MarketplaceConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let match_threshold = match env::var("RECILOOP_MATCH_THRESHOLD") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| (0.0..=100.0).contains(value))
                .ok_or(ConfigError::InvalidThreshold(raw))?,
            Err(_) => DEFAULT_MATCH_THRESHOLD,
        };

        let fixed_investment = match env::var("RECILOOP_FIXED_INVESTMENT") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite() && *value >= 0.0)
                .ok_or(ConfigError::InvalidInvestment(raw))?,
            Err(_) => DEFAULT_FIXED_INVESTMENT,
        };

        let companies = env::var("RECILOOP_COMPANIES_CSV").ok().map(PathBuf::from);
        let wastes = env::var("RECILOOP_WASTES_CSV").ok().map(PathBuf::from);
        let catalog = match (companies, wastes) {
            (Some(companies), Some(wastes)) => Some(CatalogSource { companies, wastes }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteCatalog),
        };

        Ok(Self {
            match_threshold,
            fixed_investment,
            catalog,
        })
    }
}

/// CSV exports used in place of the built-in demo catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSource {
    pub companies: PathBuf,
    pub wastes: PathBuf,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidThreshold(String),
    InvalidInvestment(String),
    IncompleteCatalog,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidThreshold(raw) => write!(
                f,
                "RECILOOP_MATCH_THRESHOLD must be a number between 0 and 100 (got '{raw}')"
            ),
            ConfigError::InvalidInvestment(raw) => write!(
                f,
                "RECILOOP_FIXED_INVESTMENT must be a non-negative number (got '{raw}')"
            ),
            ConfigError::IncompleteCatalog => write!(
                f,
                "RECILOOP_COMPANIES_CSV and RECILOOP_WASTES_CSV must be set together"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
