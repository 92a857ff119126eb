mod app_config;

pub use app_config::{
    AppConfig, BallCollectorsConfig, DatastoreConfig, GateConfig, LogFormat, LoggingConfig,
    TeamMembersConfig, UpstreamConfig,
};
