use std::path::PathBuf;

use shared::error::{AppError, AppResult};

use crate::allocations::OrderingPolicy;

/// Engine configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | default tracing filter (`RUST_LOG` wins) |
/// | LOG_JSON | false (true in production) | JSON console output |
/// | LOG_DIR | - | enables daily rotating file logs |
/// | LOG_RETENTION_DAYS | 14 | rotated files older than this are removed |
/// | EVENT_ORDERING | sort | `sort` or `reject` out-of-order event logs |
///
/// # Example
///
/// ```ignore
/// EVENT_ORDERING=reject LOG_LEVEL=debug flag-engine analyze allocations.json
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<PathBuf>,
    pub log_retention_days: i64,
    /// How out-of-order event logs are handled
    pub event_ordering: OrderingPolicy,
}

impl Config {
    /// Load from environment variables, falling back to defaults
    ///
    /// Unset variables take their default; a set but unparseable
    /// `EVENT_ORDERING` is a configuration error.
    pub fn from_env() -> AppResult<Self> {
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let is_production = environment == "production";

        Ok(Self {
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(is_production),
            log_dir: std::env::var("LOG_DIR").ok().map(PathBuf::from),
            log_retention_days: std::env::var("LOG_RETENTION_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(14),
            event_ordering: match std::env::var("EVENT_ORDERING") {
                Ok(v) => v
                    .parse()
                    .map_err(|e: String| AppError::config(e).with_detail("var", "EVENT_ORDERING"))?,
                Err(_) => OrderingPolicy::default(),
            },
            environment,
        })
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".into(),
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            log_retention_days: 14,
            event_ordering: OrderingPolicy::default(),
        }
    }
}
