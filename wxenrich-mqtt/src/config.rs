//! Daemon configuration
//!
//! Every setting can come from a flag or its environment variable; flags
//! win. Validation happens once at startup, and the core never sees any of
//! this: it receives already-validated values.

use clap::Parser;
use rand::distributions::Alphanumeric;
use rand::Rng;
use thiserror::Error;

/// Suffix appended to the source topic to form the destination topic
pub const ENRICHMENT_TOPIC_SUFFIX: &str = "/enrichment";

const DEFAULT_MQTT_PORT: u16 = 1883;
const DEFAULT_HEALTHY_INTERVAL_SECS: u64 = 300;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "wxenrich", version, about = "Enrich rtl_433 weather telemetry over MQTT")]
pub struct Args {
    /// MQTT server, host or mqtt://host:port
    #[arg(long = "mqtt-server", env = "MQTT_SERVER")]
    pub mqtt_server: String,

    /// MQTT username; required iff a password is given
    #[arg(long = "mqtt-user", env = "MQTT_USER")]
    pub mqtt_user: Option<String>,

    /// MQTT password; required iff a username is given
    #[arg(long = "mqtt-pass", env = "MQTT_PASS")]
    pub mqtt_pass: Option<String>,

    /// MQTT topic to listen on; output goes to <topic>/enrichment
    #[arg(long = "mqtt-topic", env = "MQTT_TOPIC")]
    pub mqtt_topic: String,

    /// MQTT client ID; generated from the hostname when unset
    #[arg(long = "mqtt-client-id", env = "MQTT_CLIENT_ID")]
    pub mqtt_client_id: Option<String>,

    /// Port for the healthcheck endpoint; no endpoint when unset
    #[arg(long = "health-port", env = "HEALTH_PORT")]
    pub health_port: Option<u16>,

    /// Seconds between enriched messages before the process reports
    /// unhealthy
    #[arg(long = "healthy-interval", env = "HEALTHY_INTERVAL", default_value_t = DEFAULT_HEALTHY_INTERVAL_SECS)]
    pub healthy_interval: u64,
}

/// Configuration problems that prevent startup
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// Server string could not be parsed into host and port
    #[error("failed to parse MQTT server '{0}'")]
    BadServer(String),

    /// Source topic is empty after trimming
    #[error("MQTT topic must not be empty")]
    EmptyTopic,

    /// Username and password must be given together
    #[error("MQTT user and password must both be specified, or neither")]
    CredentialMismatch,

    /// Healthy interval must be at least one second
    #[error("invalid healthy interval: {0}")]
    BadHealthyInterval(u64),
}

/// Validated daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// MQTT broker hostname
    pub mqtt_host: String,
    /// MQTT broker port
    pub mqtt_port: u16,
    /// Credentials, both-or-neither
    pub credentials: Option<(String, String)>,
    /// Source topic to subscribe to
    pub source_topic: String,
    /// Destination topic for enriched records
    pub dest_topic: String,
    /// MQTT client identifier
    pub client_id: String,
    /// Healthcheck port, if the endpoint is enabled
    pub health_port: Option<u16>,
    /// Maximum age of the last enrichment before reporting unhealthy
    pub healthy_interval: std::time::Duration,
}

impl Config {
    /// Validate raw arguments into a usable configuration
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let (mqtt_host, mqtt_port) = parse_server(&args.mqtt_server)?;

        let source_topic = args.mqtt_topic.trim_end_matches('/').to_owned();
        if source_topic.is_empty() {
            return Err(ConfigError::EmptyTopic);
        }
        let dest_topic = format!("{source_topic}{ENRICHMENT_TOPIC_SUFFIX}");

        let credentials = match (args.mqtt_user, args.mqtt_pass) {
            (Some(u), Some(p)) => Some((u, p)),
            (None, None) => None,
            _ => return Err(ConfigError::CredentialMismatch),
        };

        if args.healthy_interval < 1 {
            return Err(ConfigError::BadHealthyInterval(args.healthy_interval));
        }

        let client_id = args.mqtt_client_id.unwrap_or_else(generate_client_id);

        Ok(Self {
            mqtt_host,
            mqtt_port,
            credentials,
            source_topic,
            dest_topic,
            client_id,
            health_port: args.health_port,
            healthy_interval: std::time::Duration::from_secs(args.healthy_interval),
        })
    }
}

/// Split a server string into host and port, accepting a bare host, a
/// host:port pair, or an mqtt:// URL
fn parse_server(server: &str) -> Result<(String, u16), ConfigError> {
    let stripped = server
        .strip_prefix("mqtt://")
        .or_else(|| server.strip_prefix("MQTT://"))
        .unwrap_or(server);
    if stripped.is_empty() || stripped.contains('/') {
        return Err(ConfigError::BadServer(server.to_owned()));
    }

    match stripped.rsplit_once(':') {
        Some((host, port)) => {
            if host.is_empty() {
                return Err(ConfigError::BadServer(server.to_owned()));
            }
            let port: u16 = port
                .parse()
                .map_err(|_| ConfigError::BadServer(server.to_owned()))?;
            Ok((host.to_owned(), port))
        }
        None => Ok((stripped.to_owned(), DEFAULT_MQTT_PORT)),
    }
}

/// Hostname-qualified random client ID, so parallel instances on one broker
/// never collide
fn generate_client_id() -> String {
    let host = std::env::var("HOSTNAME").unwrap_or_else(|_| "wxenrich".to_owned());
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    format!("{host}-wxenrich-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            mqtt_server: "mqtt://broker.local:1883".into(),
            mqtt_user: None,
            mqtt_pass: None,
            mqtt_topic: "rtl_433/events".into(),
            mqtt_client_id: Some("test-client".into()),
            health_port: None,
            healthy_interval: 300,
        }
    }

    #[test]
    fn dest_topic_appends_suffix() {
        let cfg = Config::from_args(args()).unwrap();
        assert_eq!(cfg.source_topic, "rtl_433/events");
        assert_eq!(cfg.dest_topic, "rtl_433/events/enrichment");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let mut a = args();
        a.mqtt_topic = "rtl_433/events/".into();
        let cfg = Config::from_args(a).unwrap();
        assert_eq!(cfg.dest_topic, "rtl_433/events/enrichment");
    }

    #[test]
    fn server_forms() {
        assert_eq!(
            parse_server("broker.local").unwrap(),
            ("broker.local".into(), 1883)
        );
        assert_eq!(
            parse_server("broker.local:8883").unwrap(),
            ("broker.local".into(), 8883)
        );
        assert_eq!(
            parse_server("mqtt://broker.local:8883").unwrap(),
            ("broker.local".into(), 8883)
        );
        assert!(parse_server("").is_err());
        assert!(parse_server("mqtt://").is_err());
        assert!(parse_server("broker.local:notaport").is_err());
    }

    #[test]
    fn credentials_must_come_in_pairs() {
        let mut a = args();
        a.mqtt_user = Some("user".into());
        assert_eq!(
            Config::from_args(a).unwrap_err(),
            ConfigError::CredentialMismatch
        );

        let mut a = args();
        a.mqtt_user = Some("user".into());
        a.mqtt_pass = Some("pass".into());
        let cfg = Config::from_args(a).unwrap();
        assert_eq!(cfg.credentials, Some(("user".into(), "pass".into())));
    }

    #[test]
    fn generated_client_id_is_unique() {
        let a = generate_client_id();
        let b = generate_client_id();
        assert_ne!(a, b);
        assert!(a.contains("wxenrich"));
    }

    #[test]
    fn zero_healthy_interval_rejected() {
        let mut a = args();
        a.healthy_interval = 0;
        assert_eq!(
            Config::from_args(a).unwrap_err(),
            ConfigError::BadHealthyInterval(0)
        );
    }
}
