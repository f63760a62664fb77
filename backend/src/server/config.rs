//! Environment configuration read once at startup.
//!
//! A missing required variable is a startup failure; request handling never
//! touches the environment.

use std::net::SocketAddr;

use zeroize::Zeroizing;

/// Default listen port when `PORT` is not set.
const DEFAULT_PORT: u16 = 3003;

/// Configuration failures that abort startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is absent or not unicode.
    #[error("required environment variable {name} is not set")]
    MissingVar {
        /// Variable name.
        name: &'static str,
    },
    /// `PORT` was set but did not parse as a port number.
    #[error("PORT is not a valid port number: {value}")]
    InvalidPort {
        /// Offending value.
        value: String,
    },
}

/// Process configuration for the HTTP server.
pub struct ServerConfig {
    bind_addr: SocketAddr,
    database_url: String,
    token_secret: Zeroizing<String>,
}

impl ServerConfig {
    /// Read configuration from the environment.
    ///
    /// Required: `DATABASE_URL` (PostgreSQL connection string) and `SECRET`
    /// (token-signing secret). Optional: `PORT`, defaulting to 3003.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = require_var("DATABASE_URL")?;
        let token_secret = Zeroizing::new(require_var("SECRET")?);
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value: raw })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            database_url,
            token_secret,
        })
    }

    /// The socket address the server will bind to.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// The PostgreSQL connection string.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// The token-signing secret bytes.
    pub fn token_secret(&self) -> &[u8] {
        self.token_secret.as_bytes()
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar { name })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variables_name_themselves() {
        let err = ConfigError::MissingVar { name: "SECRET" };
        assert_eq!(
            err.to_string(),
            "required environment variable SECRET is not set"
        );
    }

    #[test]
    fn invalid_port_reports_the_value() {
        let err = ConfigError::InvalidPort {
            value: "http".to_owned(),
        };
        assert!(err.to_string().contains("http"));
    }
}
