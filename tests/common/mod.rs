//! Shared helpers for integration tests

use async_trait::async_trait;
use tokio::sync::Mutex;
use upwatch::sms::{SmsError, SmsGateway};
use upwatch::{CHECK_ID_LEN, Check, CheckState, HttpMethod, Protocol};

/// Gateway that records every message instead of sending it
#[derive(Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl SmsGateway for RecordingGateway {
    async fn send(&self, phone: &str, message: &str) -> Result<(), SmsError> {
        self.sent
            .lock()
            .await
            .push((phone.to_string(), message.to_string()));
        Ok(())
    }
}

/// A valid check pointing at `url` (host:port/path, no scheme).
pub fn check(id_seed: char, url: &str) -> Check {
    Check {
        id: id_seed.to_string().repeat(CHECK_ID_LEN),
        user_phone: "5551234567".to_string(),
        protocol: Protocol::Http,
        url: url.to_string(),
        method: HttpMethod::Get,
        success_codes: vec![200],
        timeout_seconds: 2,
        state: CheckState::Down,
        last_checked: None,
    }
}
