use std::path::PathBuf;

/// Errors raised while reading loader configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable `fmt` output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Loader configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Postgres connection URL.
    pub database_url: String,
    /// Pool size (default: `5`).
    pub max_connections: u32,
    /// Directory of seed files; the bundled seeds are used when unset.
    pub seed_dir: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl LoaderConfig {
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

    /// Load configuration from environment variables.
    ///
    /// | Env Var              | Default  |
    /// |----------------------|----------|
    /// | `DATABASE_URL`       | required |
    /// | `DB_MAX_CONNECTIONS` | `5`      |
    /// | `SEED_DIR`           | unset    |
    /// | `LOG_FORMAT`         | `pretty` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let max_connections = match var("DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        var: "DB_MAX_CONNECTIONS",
                        value: raw,
                        reason: "must be at least 1".into(),
                    })
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        var: "DB_MAX_CONNECTIONS",
                        value: raw,
                        reason: e.to_string(),
                    })
                }
            },
            None => Self::DEFAULT_MAX_CONNECTIONS,
        };

        let seed_dir = var("SEED_DIR").map(PathBuf::from);

        let log_format = match var("LOG_FORMAT") {
            Some(raw) => LogFormat::from_str(&raw).ok_or_else(|| ConfigError::Invalid {
                var: "LOG_FORMAT",
                value: raw.clone(),
                reason: "expected 'pretty' or 'json'".into(),
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            database_url,
            max_connections,
            seed_dir,
            log_format,
        })
    }
}
