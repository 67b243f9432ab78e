pub mod config;
pub mod logs;
pub mod sms;
pub mod store;
pub mod util;
pub mod worker;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Length of a check id as produced by the check-management layer.
pub const CHECK_ID_LEN: usize = 20;

/// Length of a user phone number (national format, digits only).
pub const PHONE_LEN: usize = 10;

/// Allowed range for a check's probe deadline, in seconds.
pub const TIMEOUT_SECONDS_RANGE: std::ops::RangeInclusive<u64> = 1..=5;

/// Scheme used to probe a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Http => write!(f, "http"),
            Protocol::Https => write!(f, "https"),
        }
    }
}

/// HTTP method used to probe a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Delete => write!(f, "DELETE"),
        }
    }
}

/// Reachability classification attributed to a check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    Up,
    /// A check that has never been probed is considered down.
    #[default]
    Down,
}

impl fmt::Display for CheckState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckState::Up => write!(f, "UP"),
            CheckState::Down => write!(f, "DOWN"),
        }
    }
}

/// A monitored endpoint definition, as persisted in the `checks` collection.
///
/// Field names on the wire are camelCase to match the stored record shape
/// shared with the check-management layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Check {
    pub id: String,
    pub user_phone: String,
    pub protocol: Protocol,
    /// Hostname plus path, without a scheme (e.g. `example.com/health`).
    pub url: String,
    pub method: HttpMethod,
    /// Response codes counted as "up". Never empty for a valid check.
    pub success_codes: Vec<u16>,
    pub timeout_seconds: u64,
    #[serde(default)]
    pub state: CheckState,
    /// Epoch milliseconds of the last completed probe, absent before the
    /// first one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_checked: Option<i64>,
}

impl Check {
    /// Validate the fields required before a check may be probed.
    ///
    /// A check failing validation is skipped for the tick, never mutated.
    pub fn validate(&self) -> Result<(), InvalidCheck> {
        if self.id.trim().len() != CHECK_ID_LEN {
            return Err(InvalidCheck::Id(self.id.clone()));
        }
        if self.user_phone.trim().len() != PHONE_LEN {
            return Err(InvalidCheck::UserPhone(self.user_phone.clone()));
        }
        if self.url.trim().is_empty() {
            return Err(InvalidCheck::EmptyUrl);
        }
        if self.success_codes.is_empty() {
            return Err(InvalidCheck::EmptySuccessCodes);
        }
        if !TIMEOUT_SECONDS_RANGE.contains(&self.timeout_seconds) {
            return Err(InvalidCheck::TimeoutSeconds(self.timeout_seconds));
        }
        Ok(())
    }

    /// Full request URL for this check, e.g. `https://example.com/health`.
    pub fn request_url(&self) -> String {
        format!("{}://{}", self.protocol, self.url)
    }
}

/// Reason a stored check is ineligible for probing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidCheck {
    Id(String),
    UserPhone(String),
    EmptyUrl,
    EmptySuccessCodes,
    TimeoutSeconds(u64),
}

impl fmt::Display for InvalidCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidCheck::Id(id) => {
                write!(f, "check id {id:?} is not {CHECK_ID_LEN} characters")
            }
            InvalidCheck::UserPhone(phone) => {
                write!(f, "user phone {phone:?} is not {PHONE_LEN} digits")
            }
            InvalidCheck::EmptyUrl => write!(f, "check url is empty"),
            InvalidCheck::EmptySuccessCodes => write!(f, "check has no success codes"),
            InvalidCheck::TimeoutSeconds(secs) => {
                write!(f, "timeout of {secs}s is outside 1..=5")
            }
        }
    }
}

impl std::error::Error for InvalidCheck {}

/// Terminal event of a single probe attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum ProbeError {
    /// The probe deadline expired before a response arrived.
    Timeout,
    /// Connection-level failure (DNS, refused, reset, TLS, ...).
    Network { message: String },
}

/// Result of one probe. Exactly one of `error` and `response_code` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeOutcome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ProbeError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_code: Option<u16>,
}

impl ProbeOutcome {
    pub fn response(code: u16) -> Self {
        Self {
            error: None,
            response_code: Some(code),
        }
    }

    pub fn timeout() -> Self {
        Self {
            error: Some(ProbeError::Timeout),
            response_code: None,
        }
    }

    pub fn network_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(ProbeError::Network {
                message: message.into(),
            }),
            response_code: None,
        }
    }
}

/// Immutable audit entry, one JSON object per line of a check's log stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    /// Point-in-time snapshot of the check before this tick's mutation.
    pub check: Check,
    pub outcome: ProbeOutcome,
    /// Classification computed from `outcome`.
    pub state: CheckState,
    /// Whether this outcome triggered a status-change alert.
    pub alert: bool,
    /// Epoch milliseconds at classification time.
    pub time: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_check() -> Check {
        Check {
            id: "a".repeat(CHECK_ID_LEN),
            user_phone: "5551234567".to_string(),
            protocol: Protocol::Https,
            url: "example.com/health".to_string(),
            method: HttpMethod::Get,
            success_codes: vec![200],
            timeout_seconds: 2,
            state: CheckState::Down,
            last_checked: None,
        }
    }

    #[test]
    fn valid_check_passes_validation() {
        assert!(valid_check().validate().is_ok());
    }

    #[test]
    fn invalid_fields_are_rejected() {
        let mut check = valid_check();
        check.id = "short".to_string();
        assert!(matches!(check.validate(), Err(InvalidCheck::Id(_))));

        let mut check = valid_check();
        check.user_phone = "123".to_string();
        assert!(matches!(check.validate(), Err(InvalidCheck::UserPhone(_))));

        let mut check = valid_check();
        check.success_codes.clear();
        assert_eq!(check.validate(), Err(InvalidCheck::EmptySuccessCodes));

        let mut check = valid_check();
        check.timeout_seconds = 6;
        assert_eq!(check.validate(), Err(InvalidCheck::TimeoutSeconds(6)));

        let mut check = valid_check();
        check.url = "  ".to_string();
        assert_eq!(check.validate(), Err(InvalidCheck::EmptyUrl));
    }

    #[test]
    fn check_round_trips_with_camel_case_field_names() {
        let check = valid_check();
        let json = serde_json::to_value(&check).unwrap();
        assert!(json.get("userPhone").is_some());
        assert!(json.get("successCodes").is_some());
        assert!(json.get("timeoutSeconds").is_some());
        // Never probed: lastChecked is absent, not null.
        assert!(json.get("lastChecked").is_none());

        let back: Check = serde_json::from_value(json).unwrap();
        assert_eq!(back, check);
    }

    #[test]
    fn state_defaults_to_down_when_absent() {
        let json = serde_json::json!({
            "id": "b".repeat(CHECK_ID_LEN),
            "userPhone": "5551234567",
            "protocol": "http",
            "url": "example.com",
            "method": "get",
            "successCodes": [200, 201],
            "timeoutSeconds": 3,
        });
        let check: Check = serde_json::from_value(json).unwrap();
        assert_eq!(check.state, CheckState::Down);
        assert_eq!(check.last_checked, None);
    }

    #[test]
    fn request_url_joins_protocol_and_url() {
        let check = valid_check();
        assert_eq!(check.request_url(), "https://example.com/health");
    }
}
