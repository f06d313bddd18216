/// Configuration management
///
/// Loads database settings from environment variables (and a `.env` file in
/// development).
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (takes precedence)
/// - `POSTGRES_USER`, `POSTGRES_PASSWORD`, `POSTGRES_DB`: used to build the
///   connection string when `DATABASE_URL` is not set
/// - `POSTGRES_HOST`: default `localhost`
/// - `POSTGRES_PORT`: default `5432`
/// - `DATABASE_MAX_CONNECTIONS`: default `5`
/// - `DATABASE_SCHEMA`: schema to migrate (default: the server's `search_path`)
///
/// # Example
///
/// ```no_run
/// use tasktrack_schema::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Max connections: {}", config.database.max_connections);
/// # Ok(())
/// # }
/// ```

use crate::db::pool::DatabaseConfig;
use std::env;
use url::Url;

/// Complete configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database configuration
    pub database: DatabaseConfig,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if neither `DATABASE_URL` nor the `POSTGRES_*`
    /// variables describe a database, or if a numeric value is invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup
    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = match var("DATABASE_URL") {
            Some(url) => url,
            None => database_url_from_parts(&var)?,
        };

        let max_connections = var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u32>()?;

        let schema = var("DATABASE_SCHEMA").filter(|s| !s.is_empty());

        Ok(Self {
            database: DatabaseConfig {
                url,
                max_connections,
                schema,
            },
        })
    }
}

/// Assembles a `postgresql://` URL from the `POSTGRES_*` variables
fn database_url_from_parts<F>(var: &F) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let user = var("POSTGRES_USER").ok_or_else(|| {
        anyhow::anyhow!("DATABASE_URL or POSTGRES_USER environment variable is required")
    })?;
    let database = var("POSTGRES_DB")
        .ok_or_else(|| anyhow::anyhow!("POSTGRES_DB environment variable is required"))?;
    let host = var("POSTGRES_HOST").unwrap_or_else(|| "localhost".to_string());
    let port = var("POSTGRES_PORT")
        .unwrap_or_else(|| "5432".to_string())
        .parse::<u16>()?;

    let mut url = Url::parse(&format!("postgresql://{}", host))?;
    url.set_port(Some(port))
        .map_err(|_| anyhow::anyhow!("Cannot set port on database URL"))?;
    url.set_username(&user)
        .map_err(|_| anyhow::anyhow!("Cannot set username on database URL"))?;
    if let Some(password) = var("POSTGRES_PASSWORD") {
        url.set_password(Some(&password))
            .map_err(|_| anyhow::anyhow!("Cannot set password on database URL"))?;
    }
    url.set_path(&database);

    Ok(url.to_string())
}
