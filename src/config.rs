/// Port used when `PORT` is unset
pub const DEFAULT_PORT: u16 = 8081;

/// Process settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// TCP port to listen on (`PORT`)
    pub port: u16,
    /// Deployment environment (`ENVIRONMENT`), `production` by default
    pub environment: String,
}

impl ServerConfig {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults on missing
    /// or unparsable values
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "production".to_string());

        Self { port, environment }
    }

    pub fn is_development(&self) -> bool {
        matches!(self.environment.to_lowercase().as_str(), "development" | "dev")
    }

    /// Default tracing filter when `RUST_LOG` is unset
    pub fn log_filter(&self) -> &'static str {
        if self.is_development() {
            "snake_server=debug,tower_http=debug"
        } else {
            "snake_server=info,tower_http=warn"
        }
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
