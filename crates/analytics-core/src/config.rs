//! Configuration module
//!
//! Environment-driven settings for the reports API, the retention scheduler and the
//! operational binaries. `.env` is loaded first when present.

use std::env;
use std::fmt;

// Common constants
const SERVER_PORT: u16 = 4444;
const MAX_CONNECTIONS: u32 = 10;
const MIN_CONNECTIONS: u32 = 2;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const POSTGRES_PORT: u16 = 5432;
const POSTGRES_DATABASE: &str = "analytics-reporter";
const ACCESS_SECRET_HEADER: &str = "api-data-gov-secret";
const RETENTION_MONTHS: u32 = 18;
const RETENTION_INTERVAL_HOURS: u64 = 24;

/// Output format of the log subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

/// Where to reach Postgres: either a full URL or the individual `POSTGRES_*` parts.
#[derive(Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    Url(String),
    Parts {
        host: String,
        port: u16,
        user: String,
        password: Option<String>,
        database: String,
    },
}

// Never print credentials.
impl fmt::Debug for DatabaseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseTarget::Url(_) => f.write_str("Url(<redacted>)"),
            DatabaseTarget::Parts {
                host,
                port,
                user,
                database,
                ..
            } => f
                .debug_struct("Parts")
                .field("host", host)
                .field("port", port)
                .field("user", user)
                .field("database", database)
                .finish_non_exhaustive(),
        }
    }
}

/// Base configuration shared by the server and the operational binaries
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_timeout_seconds: u64,
    pub environment: String,
    pub log_level: String,
    pub log_format: LogFormat,
}

/// Reports API configuration
#[derive(Clone)]
pub struct ReporterConfig {
    pub base: BaseConfig,
    pub database: DatabaseTarget,
    pub run_migrations: bool,
    // Shared-secret gate; `None` disables it
    pub access_secret: Option<String>,
    pub access_secret_header: String,
    // Retention scheduler
    pub retention_enabled: bool,
    pub retention_months: u32,
    pub retention_interval_hours: u64,
}

impl fmt::Debug for ReporterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReporterConfig")
            .field("base", &self.base)
            .field("database", &self.database)
            .field("run_migrations", &self.run_migrations)
            .field("access_secret", &self.access_secret.as_ref().map(|_| "<redacted>"))
            .field("access_secret_header", &self.access_secret_header)
            .field("retention_enabled", &self.retention_enabled)
            .field("retention_months", &self.retention_months)
            .field("retention_interval_hours", &self.retention_interval_hours)
            .finish()
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ReporterConfig>);

impl Config {
    fn as_reporter(&self) -> &ReporterConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.as_reporter().base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ReporterConfig::from_lookup(lookup)?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_reporter().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.as_reporter().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_reporter().base.cors_origins
    }

    pub fn db_max_connections(&self) -> u32 {
        self.as_reporter().base.db_max_connections
    }

    pub fn db_min_connections(&self) -> u32 {
        self.as_reporter().base.db_min_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.as_reporter().base.db_timeout_seconds
    }

    pub fn environment(&self) -> &str {
        &self.as_reporter().base.environment
    }

    pub fn log_level(&self) -> &str {
        &self.as_reporter().base.log_level
    }

    pub fn log_format(&self) -> LogFormat {
        self.as_reporter().base.log_format
    }

    pub fn database(&self) -> &DatabaseTarget {
        &self.as_reporter().database
    }

    pub fn run_migrations(&self) -> bool {
        self.as_reporter().run_migrations
    }

    pub fn access_secret(&self) -> Option<&str> {
        self.as_reporter().access_secret.as_deref()
    }

    pub fn access_secret_header(&self) -> &str {
        &self.as_reporter().access_secret_header
    }

    pub fn retention_enabled(&self) -> bool {
        self.as_reporter().retention_enabled
    }

    pub fn retention_months(&self) -> u32 {
        self.as_reporter().retention_months
    }

    pub fn retention_interval_hours(&self) -> u64 {
        self.as_reporter().retention_interval_hours
    }
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    value
        .map(|v| v.trim().to_lowercase())
        .and_then(|v| match v.as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

impl ReporterConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: lookup("PORT")
                .unwrap_or_else(|| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_CONNECTIONS),
            db_min_connections: lookup("DB_MIN_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(MIN_CONNECTIONS),
            db_timeout_seconds: lookup("DB_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            environment,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_format: LogFormat::parse(&lookup("LOG_FORMAT").unwrap_or_default()),
        };

        let database = match lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            Some(url) => DatabaseTarget::Url(url),
            None => DatabaseTarget::Parts {
                host: lookup("POSTGRES_HOST").unwrap_or_else(|| "localhost".to_string()),
                port: lookup("POSTGRES_PORT")
                    .map(|p| p.parse())
                    .transpose()
                    .map_err(|_| anyhow::anyhow!("POSTGRES_PORT must be a valid number"))?
                    .unwrap_or(POSTGRES_PORT),
                user: lookup("POSTGRES_USER").unwrap_or_else(|| "postgres".to_string()),
                password: lookup("POSTGRES_PASSWORD"),
                database: lookup("POSTGRES_DATABASE")
                    .unwrap_or_else(|| POSTGRES_DATABASE.to_string()),
            },
        };

        Ok(ReporterConfig {
            base,
            database,
            run_migrations: parse_bool(lookup("RUN_MIGRATIONS"), true),
            access_secret: lookup("API_DATA_GOV_SECRET").filter(|s| !s.is_empty()),
            access_secret_header: lookup("ACCESS_SECRET_HEADER")
                .map(|h| h.trim().to_lowercase())
                .filter(|h| !h.is_empty())
                .unwrap_or_else(|| ACCESS_SECRET_HEADER.to_string()),
            retention_enabled: parse_bool(lookup("RETENTION_ENABLED"), false),
            retention_months: lookup("RETENTION_MONTHS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(RETENTION_MONTHS),
            retention_interval_hours: lookup("RETENTION_INTERVAL_HOURS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(RETENTION_INTERVAL_HOURS),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.db_max_connections == 0 {
            return Err(anyhow::anyhow!("DB_MAX_CONNECTIONS must be greater than 0"));
        }

        if self.base.db_min_connections > self.base.db_max_connections {
            return Err(anyhow::anyhow!(
                "DB_MIN_CONNECTIONS ({}) cannot exceed DB_MAX_CONNECTIONS ({})",
                self.base.db_min_connections,
                self.base.db_max_connections
            ));
        }

        if let DatabaseTarget::Url(url) = &self.database {
            if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
                return Err(anyhow::anyhow!(
                    "DATABASE_URL must be a valid PostgreSQL connection string"
                ));
            }
        }

        if self.retention_months == 0 {
            return Err(anyhow::anyhow!("RETENTION_MONTHS must be greater than 0"));
        }

        if self.retention_enabled && self.retention_interval_hours == 0 {
            return Err(anyhow::anyhow!(
                "RETENTION_INTERVAL_HOURS must be greater than 0 when RETENTION_ENABLED=true"
            ));
        }

        Ok(())
    }
}
