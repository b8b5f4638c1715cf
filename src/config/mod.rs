use config::{Config, Environment};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    #[serde(default = "default_dev_data_dir")]
    pub dev_data_dir: String,
    #[serde(default = "default_mailer_base_url")]
    pub mailer_base_url: String,
    #[serde(default)]
    pub mailer_api_key: String,
    #[serde(default = "default_email_from")]
    pub email_from: String,
    #[serde(default = "default_email_from_name")]
    pub email_from_name: String,
    #[serde(default)]
    pub telemetry_enabled: bool,
    #[serde(default = "default_telemetry_service_name")]
    pub telemetry_service_name: String,
    #[serde(default = "default_telemetry_service_version")]
    pub telemetry_service_version: String,
    #[serde(default = "default_telemetry_environment")]
    pub telemetry_environment: String,
    #[serde(default = "default_telemetry_otlp_endpoint")]
    pub telemetry_otlp_endpoint: String,
}

fn default_dev_data_dir() -> String {
    "dev-data/data".to_string()
}

fn default_mailer_base_url() -> String {
    "https://api.brevo.com".to_string()
}

fn default_email_from() -> String {
    "hello@tourbook.example".to_string()
}

fn default_email_from_name() -> String {
    "Tourbook".to_string()
}

fn default_telemetry_service_name() -> String {
    "tourbook".to_string()
}

fn default_telemetry_service_version() -> String {
    "1.0.0".to_string()
}

fn default_telemetry_environment() -> String {
    "production".to_string()
}

fn default_telemetry_otlp_endpoint() -> String {
    "http://otel-collector.observability.svc.cluster.local:4317".to_string()
}

impl AppConfig {
    pub fn from_env() -> Self {
        Config::builder()
            .set_default("database_max_connections", 5)
            .unwrap()
            .add_source(Environment::default())
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }
}
