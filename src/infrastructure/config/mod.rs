use serde::Deserialize;
use std::env;

pub const DEFAULT_TRUNK_BRANCH: &str = "main";
pub const DEFAULT_VOICE_ID: &str = "Joey";
pub const DEFAULT_NOTIFICATION_TOPIC_NAME: &str = "CompletedNotification";
pub const DEFAULT_NOTIFICATION_EXPORT_NAME: &str = "NotificationTopicArn";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub aws_region: String,
    pub log_format: LogFormat,
    // Deployment
    pub branch: String,
    pub trunk_branch: String,
    // Synthesis
    pub output_bucket: String,
    pub voice_id: String,
    // Shared notification sink
    pub notification_topic_name: String,
    pub notification_export_name: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    /// Reads configuration from the process environment (and `.env` if present).
    ///
    /// A missing `BRANCH` is not rejected here: it is left empty so that
    /// environment resolution reports it as a configuration error.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            database_url: env::var("DATABASE_URL")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "eu-west-1".to_string()),
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            branch: env::var("BRANCH").unwrap_or_default(),
            trunk_branch: env::var("TRUNK_BRANCH")
                .unwrap_or_else(|_| DEFAULT_TRUNK_BRANCH.to_string()),
            output_bucket: env::var("OUTPUT_BUCKET")?,
            voice_id: env::var("VOICE_ID").unwrap_or_else(|_| DEFAULT_VOICE_ID.to_string()),
            notification_topic_name: env::var("NOTIFICATION_TOPIC_NAME")
                .unwrap_or_else(|_| DEFAULT_NOTIFICATION_TOPIC_NAME.to_string()),
            notification_export_name: env::var("NOTIFICATION_EXPORT_NAME")
                .unwrap_or_else(|_| DEFAULT_NOTIFICATION_EXPORT_NAME.to_string()),
        };

        Ok(config)
    }

    /// Overrides the branch read from the environment, e.g. from a CLI flag.
    pub fn with_branch(mut self, branch: Option<String>) -> Self {
        if let Some(branch) = branch {
            self.branch = branch;
        }
        self
    }
}
