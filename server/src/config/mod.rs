use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::with_security_headers;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_POOL_MAX: u32 = 10;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub production: bool,
    pub run_migrations: bool,
    pub static_dir: Option<PathBuf>,
    pub db: DbConfig,
}

#[derive(Clone, Debug)]
pub struct DbConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub pool_max: u32,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env_or_parse("PORT", DEFAULT_PORT),
            production: env::var("RUST_ENV")
                .map(|v| v.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
            run_migrations: env_or_parse("RUN_MIGRATIONS", true),
            static_dir: env::var("STATIC_DIR")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            db: DbConfig {
                url: env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
                host: env_or("DB_HOST", "localhost"),
                port: env_or_parse("DB_PORT", 5432),
                user: env_or("DB_USER", "postgres"),
                password: env_or("DB_PASSWORD", ""),
                database: env_or("DB_NAME", "charityevents_db"),
                pool_max: env_or_parse("DB_POOL_MAX", DEFAULT_POOL_MAX),
            },
        }
    }

    /// `DATABASE_URL` wins; otherwise the options are built from the `DB_*`
    /// parts, so credentials never need URL escaping.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.db.url {
            return PgConnectOptions::from_str(url);
        }
        Ok(PgConnectOptions::new()
            .host(&self.db.host)
            .port(self.db.port)
            .username(&self.db.user)
            .password(&self.db.password)
            .database(&self.db.database))
    }
}
