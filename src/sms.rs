//! SMS gateway for status-change alerts
//!
//! The worker only needs "send one short message to one phone number", so
//! the gateway is a small trait with two implementations: a Twilio-backed
//! one and a log-only fallback for deployments without credentials.

use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::PHONE_LEN;
use crate::config::SmsConfig;

/// Longest message the gateway will accept.
pub const MAX_MESSAGE_LEN: usize = 1600;

/// Errors from a single send attempt
#[derive(Debug)]
pub enum SmsError {
    /// Phone number or message failed local validation
    InvalidInput(String),

    /// The gateway rejected the request
    Rejected { status: u16 },

    /// The request never completed
    Transport(reqwest::Error),
}

impl fmt::Display for SmsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmsError::InvalidInput(msg) => write!(f, "invalid sms input: {msg}"),
            SmsError::Rejected { status } => {
                write!(f, "sms gateway rejected the message (status {status})")
            }
            SmsError::Transport(err) => write!(f, "sms transport error: {err}"),
        }
    }
}

impl std::error::Error for SmsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SmsError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

/// Trait for outbound SMS transports
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Send one message to one phone number. One attempt, no queuing.
    async fn send(&self, phone: &str, message: &str) -> Result<(), SmsError>;
}

fn validate_input(phone: &str, message: &str) -> Result<(), SmsError> {
    if phone.trim().len() != PHONE_LEN {
        return Err(SmsError::InvalidInput(format!(
            "phone {phone:?} is not {PHONE_LEN} digits"
        )));
    }
    let message = message.trim();
    if message.is_empty() || message.len() > MAX_MESSAGE_LEN {
        return Err(SmsError::InvalidInput(format!(
            "message length {} outside 1..={MAX_MESSAGE_LEN}",
            message.len()
        )));
    }
    Ok(())
}

/// Gateway sending through the Twilio Messages API
pub struct TwilioGateway {
    client: Client,
    config: SmsConfig,
}

impl TwilioGateway {
    pub fn new(config: SmsConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.config.account_sid
        )
    }
}

#[async_trait]
impl SmsGateway for TwilioGateway {
    #[instrument(skip(self, message))]
    async fn send(&self, phone: &str, message: &str) -> Result<(), SmsError> {
        validate_input(phone, message)?;

        let to = format!("+1{}", phone.trim());
        let params = [
            ("From", self.config.from_phone.as_str()),
            ("To", to.as_str()),
            ("Body", message.trim()),
        ];

        let response = self
            .client
            .post(self.endpoint())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(SmsError::Transport)?;

        let status = response.status();
        if status.is_success() {
            debug!("sms accepted by gateway");
            Ok(())
        } else {
            Err(SmsError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}

/// Gateway that only logs; used when no credentials are configured
#[derive(Default)]
pub struct NullGateway;

#[async_trait]
impl SmsGateway for NullGateway {
    async fn send(&self, phone: &str, message: &str) -> Result<(), SmsError> {
        validate_input(phone, message)?;
        debug!("sms gateway disabled; would send to {phone}: {message}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn null_gateway_validates_input() {
        let gateway = NullGateway;

        assert!(gateway.send("5551234567", "hello").await.is_ok());
        assert_matches!(
            gateway.send("555", "hello").await,
            Err(SmsError::InvalidInput(_))
        );
        assert_matches!(
            gateway.send("5551234567", "").await,
            Err(SmsError::InvalidInput(_))
        );
        assert_matches!(
            gateway.send("5551234567", &"x".repeat(MAX_MESSAGE_LEN + 1)).await,
            Err(SmsError::InvalidInput(_))
        );
    }

    #[test]
    fn twilio_endpoint_embeds_account_sid() {
        let gateway = TwilioGateway::new(SmsConfig {
            account_sid: "AC123".to_string(),
            auth_token: "secret".to_string(),
            from_phone: "+15005550006".to_string(),
        });
        assert_eq!(
            gateway.endpoint(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }
}
