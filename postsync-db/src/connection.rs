use crate::client::Result;
use sqlx::{
    MySqlPool,
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
};
use std::fmt::{Debug, Formatter};
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Where to find the database. Anything left unset falls back to the
/// driver defaults (`localhost:3306`, user `root`).
#[derive(Clone, Eq, PartialEq, Default)]
pub struct DbConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
}

impl DbConfig {
    #[must_use]
    pub fn connect_options(&self) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new();

        if let Some(host) = &self.host {
            options = options.host(host);
        }
        if let Some(port) = self.port {
            options = options.port(port);
        }
        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        if let Some(database) = &self.database {
            options = options.database(database);
        }

        options
    }
}

impl Debug for DbConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .field("database", &self.database)
            .finish()
    }
}

/// Hands out the one pool shared by every repository call.
///
/// The pool is only built on the first [`get_connection`](Self::get_connection),
/// and whoever makes that call gets the connect error if the database is
/// unreachable. A failed attempt leaves the cell empty so the next call
/// tries again.
pub struct ConnectionProvider {
    options: MySqlConnectOptions,
    pool: OnceCell<MySqlPool>,
}

impl ConnectionProvider {
    #[must_use]
    pub fn new(config: &DbConfig) -> Self {
        debug!(?config, "Configuring database connection");
        Self::from_options(config.connect_options())
    }

    #[must_use]
    pub fn from_options(options: MySqlConnectOptions) -> Self {
        Self {
            options,
            pool: OnceCell::new(),
        }
    }

    pub async fn get_connection(&self) -> Result<&MySqlPool> {
        let pool = self
            .pool
            .get_or_try_init(|| async {
                info!(
                    host = self.options.get_host(),
                    port = self.options.get_port(),
                    "Connecting to database"
                );
                MySqlPoolOptions::new()
                    .connect_with(self.options.clone())
                    .await
            })
            .await?;

        Ok(pool)
    }
}

impl Debug for ConnectionProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionProvider")
            .field("host", &self.options.get_host())
            .field("port", &self.options.get_port())
            .field("connected", &self.pool.initialized())
            .finish_non_exhaustive()
    }
}
