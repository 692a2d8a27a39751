use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// `compact` (default) or `json`
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4), log_format: default_log_format() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
            run_migrations: true,
        }
    }
}

/// Upper bound on token lifetime: 30 days.
pub const MAX_TOKEN_TTL_MINS: i64 = 30 * 24 * 60;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_mins: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { jwt_secret: String::new(), token_ttl_mins: default_token_ttl() }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }
fn default_log_format() -> String { "compact".into() }
fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_token_ttl() -> i64 { 60 }
fn default_true() -> bool { true }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`). A missing file is not an error:
    /// every section is then built from defaults and env vars.
    pub fn load_or_env() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.auth.normalize_from_env();
        self.auth.validate()?;
        Ok(())
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        if let Ok(fmt) = std::env::var("LOG_FORMAT") {
            self.log_format = fmt;
        }
        self.log_format = self.log_format.trim().to_ascii_lowercase();
        if self.log_format != "compact" && self.log_format != "json" {
            return Err(anyhow!("server.log_format must be `compact` or `json`"));
        }
        Ok(())
    }

    pub fn json_logs(&self) -> bool { self.log_format == "json" }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn normalize_from_env(&mut self) {
        if self.jwt_secret.trim().is_empty() {
            if let Ok(secret) = std::env::var("JWT_SECRET") {
                self.jwt_secret = secret;
            }
        }
        if let Some(ttl) = std::env::var("TOKEN_TTL_MINS").ok().and_then(|v| v.parse::<i64>().ok()) {
            self.token_ttl_mins = ttl;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.trim().is_empty() {
            return Err(anyhow!("auth.jwt_secret is empty; set it in config.toml or JWT_SECRET"));
        }
        if !(1..=MAX_TOKEN_TTL_MINS).contains(&self.token_ttl_mins) {
            return Err(anyhow!("auth.token_ttl_mins must be within 1..={MAX_TOKEN_TTL_MINS}"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[server]
host = "0.0.0.0"
port = 9000
log_format = "json"

[database]
url = "sqlite::memory:"
max_connections = 1
min_connections = 1

[auth]
jwt_secret = "s3cret"
"#;

    #[test]
    fn parses_sections_and_fills_defaults() {
        let cfg = parse(SAMPLE).unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9000);
        assert!(cfg.server.json_logs());
        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert!(cfg.database.run_migrations);
        assert_eq!(cfg.database.acquire_timeout_secs, 30);
        assert_eq!(cfg.auth.token_ttl_mins, 60);
        assert!(cfg.database.validate().is_ok());
        assert!(cfg.auth.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_database_scheme() {
        let db = DatabaseConfig { url: "mysql://localhost/cars".into(), ..Default::default() };
        assert!(db.validate().is_err());
    }

    #[test]
    fn rejects_inverted_pool_bounds() {
        let db = DatabaseConfig { url: "postgres://localhost/cars".into(), max_connections: 1, min_connections: 4, ..Default::default() };
        assert!(db.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_token_ttl() {
        for ttl in [0, -5, MAX_TOKEN_TTL_MINS + 1, i64::MAX] {
            let auth = AuthConfig { jwt_secret: "x".into(), token_ttl_mins: ttl };
            assert!(auth.validate().is_err(), "{ttl}");
        }
        let auth = AuthConfig { jwt_secret: "x".into(), token_ttl_mins: MAX_TOKEN_TTL_MINS };
        assert!(auth.validate().is_ok());
    }

    #[test]
    fn server_section_fields_default_individually() {
        let cfg = parse("[server]\nlog_format = \"json\"\nworker_threads = 2\n").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert!(cfg.server.json_logs());
    }

    // The only test that touches process env; everything it sets is removed again.
    #[test]
    fn env_vars_override_defaults_without_config_file() {
        let vars = [
            ("SERVER_HOST", "0.0.0.0"),
            ("SERVER_PORT", "9090"),
            ("LOG_FORMAT", "json"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "from-env"),
            ("TOKEN_TTL_MINS", "15"),
        ];
        for (k, v) in vars {
            std::env::set_var(k, v);
        }
        let mut cfg = AppConfig::default();
        let res = cfg.normalize_and_validate();
        for (k, _) in vars {
            std::env::remove_var(k);
        }

        res.unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9090);
        assert!(cfg.server.json_logs());
        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert_eq!(cfg.auth.jwt_secret, "from-env");
        assert_eq!(cfg.auth.token_ttl_mins, 15);
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let err = load_from_file("/definitely/not/here/config.toml").unwrap_err();
        assert!(is_not_found(&err));
    }
}
