use serde::Deserialize;

/// Application configuration shared by all subcommands
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub team_members: TeamMembersConfig,
    pub ball_collectors: BallCollectorsConfig,
    pub datastore: DatastoreConfig,
    pub upstream: UpstreamConfig,
    pub gate: GateConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamMembersConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BallCollectorsConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatastoreConfig {
    /// Storage backend: "mongodb" or "memory"
    pub backend: String,
    pub uri: String,
    pub database: String,
    pub members_collection: String,
    pub assignments_collection: String,
}

/// Where the Ball Collectors Service finds the Team Members Service
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    pub team_members_url: String,
    pub timeout_ms: u64,
    pub retry_attempts: u32,
    pub retry_backoff_ms: u64,
}

/// Startup health-gate polling policy
#[derive(Debug, Clone, Deserialize)]
pub struct GateConfig {
    pub interval_ms: u64,
    pub max_attempts: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for TeamMembersConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for BallCollectorsConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8001,
        }
    }
}

impl Default for DatastoreConfig {
    fn default() -> Self {
        Self {
            backend: "mongodb".to_string(),
            uri: "mongodb://localhost:27017".to_string(),
            database: "team_admin".to_string(),
            members_collection: "team_members".to_string(),
            assignments_collection: "ball_collectors".to_string(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            team_members_url: "http://team_members_api:80".to_string(),
            timeout_ms: 5_000,
            retry_attempts: 2,
            retry_backoff_ms: 200,
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            interval_ms: 2_000,
            max_attempts: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment.
    ///
    /// Layering, lowest to highest precedence: `config/default`,
    /// `config/local`, `APP__`-prefixed environment variables, then the
    /// flat variables the deployment manifests use (`MONGODB_URI`,
    /// `DB_NAME`, `TEAM_MEMBERS_SERVICE_URL`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Self = config.try_deserialize()?;
        config.apply_overrides_from(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Apply the flat deployment environment variables on top of whatever
    /// the layered sources produced. Exposed with a lookup closure so the
    /// override logic is testable without touching the process environment.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(uri) = lookup("MONGODB_URI") {
            self.datastore.uri = uri;
        }

        if let Some(database) = lookup("DB_NAME") {
            self.datastore.database = database;
        }

        if let Some(url) = lookup("TEAM_MEMBERS_SERVICE_URL") {
            self.upstream.team_members_url = url;
        }
    }
}
