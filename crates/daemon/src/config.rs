//! Daemon configuration from environment variables
//!
//! Every knob has the reference default: capacity 10, message limit
//! 255 bytes, poll interval 2s. Intervals are independently
//! overridable per producer.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};

use hostpulse_core::application::SourceFailurePolicy;
use hostpulse_core::domain::{MonitorConfig, QueueConfig};

const ENV_QUEUE_CAPACITY: &str = "HOSTPULSE_QUEUE_CAPACITY";
const ENV_MAX_MESSAGE_BYTES: &str = "HOSTPULSE_MAX_MESSAGE_BYTES";
const ENV_POLL_INTERVAL_SECS: &str = "HOSTPULSE_POLL_INTERVAL_SECS";
const ENV_MEMORY_INTERVAL_SECS: &str = "HOSTPULSE_MEMORY_INTERVAL_SECS";
const ENV_DISK_INTERVAL_SECS: &str = "HOSTPULSE_DISK_INTERVAL_SECS";
const ENV_NETWORK_INTERVAL_SECS: &str = "HOSTPULSE_NETWORK_INTERVAL_SECS";
const ENV_DISK_MOUNT: &str = "HOSTPULSE_DISK_MOUNT";
const ENV_NET_INTERFACE: &str = "HOSTPULSE_NET_INTERFACE";
const ENV_SINK_FORMAT: &str = "HOSTPULSE_SINK_FORMAT";
const ENV_ON_SOURCE_ERROR: &str = "HOSTPULSE_ON_SOURCE_ERROR";

/// Which sink implementation the consumer delivers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub monitor: MonitorConfig,
    pub memory_interval: Duration,
    pub disk_interval: Duration,
    pub network_interval: Duration,
    pub disk_mount: Option<PathBuf>,
    pub net_interface: Option<String>,
    pub sink_format: SinkFormat,
    pub failure_policy: SourceFailurePolicy,
}

impl DaemonConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = MonitorConfig::default();

        let capacity =
            parse_var(ENV_QUEUE_CAPACITY, defaults.queue.capacity)?;
        let max_message_bytes =
            parse_var(ENV_MAX_MESSAGE_BYTES, defaults.queue.max_message_bytes)?;
        let queue = QueueConfig::new(capacity, max_message_bytes)?;

        let poll_interval = Duration::from_secs(parse_var(
            ENV_POLL_INTERVAL_SECS,
            defaults.poll_interval.as_secs(),
        )?);
        let memory_interval = interval_override(ENV_MEMORY_INTERVAL_SECS, poll_interval)?;
        let disk_interval = interval_override(ENV_DISK_INTERVAL_SECS, poll_interval)?;
        let network_interval = interval_override(ENV_NETWORK_INTERVAL_SECS, poll_interval)?;

        Ok(Self {
            monitor: MonitorConfig {
                queue,
                poll_interval,
            },
            memory_interval,
            disk_interval,
            network_interval,
            disk_mount: std::env::var(ENV_DISK_MOUNT).ok().map(PathBuf::from),
            net_interface: std::env::var(ENV_NET_INTERFACE).ok(),
            sink_format: parse_sink_format(std::env::var(ENV_SINK_FORMAT).ok())?,
            failure_policy: parse_failure_policy(std::env::var(ENV_ON_SOURCE_ERROR).ok())?,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| anyhow!("{} has invalid value: {}", name, raw)),
        Err(_) => Ok(default),
    }
}

fn interval_override(name: &str, default: Duration) -> Result<Duration> {
    Ok(Duration::from_secs(parse_var(name, default.as_secs())?))
}

fn parse_sink_format(raw: Option<String>) -> Result<SinkFormat> {
    match raw.as_deref() {
        None | Some("text") => Ok(SinkFormat::Text),
        Some("json") => Ok(SinkFormat::Json),
        Some(other) => Err(anyhow!(
            "{} must be 'text' or 'json', got: {}",
            ENV_SINK_FORMAT,
            other
        )),
    }
}

fn parse_failure_policy(raw: Option<String>) -> Result<SourceFailurePolicy> {
    match raw.as_deref() {
        None | Some("skip") => Ok(SourceFailurePolicy::Skip),
        Some("terminate") => Ok(SourceFailurePolicy::Terminate),
        Some(other) => Err(anyhow!(
            "{} must be 'skip' or 'terminate', got: {}",
            ENV_ON_SOURCE_ERROR,
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_format_defaults_to_text() {
        assert_eq!(parse_sink_format(None).unwrap(), SinkFormat::Text);
        assert_eq!(
            parse_sink_format(Some("json".to_string())).unwrap(),
            SinkFormat::Json
        );
        assert!(parse_sink_format(Some("xml".to_string())).is_err());
    }

    #[test]
    fn test_failure_policy_defaults_to_skip() {
        assert_eq!(
            parse_failure_policy(None).unwrap(),
            SourceFailurePolicy::Skip
        );
        assert_eq!(
            parse_failure_policy(Some("terminate".to_string())).unwrap(),
            SourceFailurePolicy::Terminate
        );
        assert!(parse_failure_policy(Some("abort".to_string())).is_err());
    }
}
