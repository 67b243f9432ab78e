use std::path::PathBuf;

use tracing::trace;

/// Worker configuration, loaded from a JSON file.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Directory holding the key-value store (one subdirectory per collection).
    #[serde(default = "crate::util::get_data_dir")]
    pub data_dir: PathBuf,

    /// Directory holding per-check log files and rotated artifacts.
    #[serde(default = "crate::util::get_logs_dir")]
    pub logs_dir: PathBuf,

    /// Seconds between scan ticks.
    #[serde(default = "default_scan_interval")]
    pub scan_interval_secs: u64,

    /// Seconds between rotation ticks.
    #[serde(default = "default_rotation_interval")]
    pub rotation_interval_secs: u64,

    /// SMS gateway credentials. Alerts are logged but not sent when absent.
    pub sms: Option<SmsConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: crate::util::get_data_dir(),
            logs_dir: crate::util::get_logs_dir(),
            scan_interval_secs: default_scan_interval(),
            rotation_interval_secs: default_rotation_interval(),
            sms: None,
        }
    }
}

/// Twilio-shaped credentials for the SMS gateway.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SmsConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Number alerts are sent from, E.164 format.
    pub from_phone: String,
}

fn default_scan_interval() -> u64 {
    60
}

fn default_rotation_interval() -> u64 {
    60 * 60 * 24
}

pub fn read_config_file(path: &str) -> anyhow::Result<Config> {
    let file_content = std::fs::read_to_string(path)?;
    serde_json::from_str(&file_content)
        .map_err(|_| anyhow::anyhow!("Invalid configuration file provided!"))
        .inspect(|config| trace!("loaded config: {config:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_design_intervals() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.scan_interval_secs, 60);
        assert_eq!(config.rotation_interval_secs, 60 * 60 * 24);
        assert!(config.sms.is_none());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config: Config = serde_json::from_str(
            r#"{
                "data_dir": "/tmp/data",
                "logs_dir": "/tmp/logs",
                "scan_interval_secs": 5,
                "rotation_interval_secs": 30,
                "sms": {
                    "account_sid": "AC123",
                    "auth_token": "secret",
                    "from_phone": "+15005550006"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/data"));
        assert_eq!(config.scan_interval_secs, 5);
        assert_eq!(config.rotation_interval_secs, 30);
        assert!(config.sms.is_some());
    }
}
