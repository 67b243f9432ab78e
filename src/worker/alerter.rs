//! Alert dispatcher
//!
//! Formats the one-line status-change notification and hands it to the SMS
//! gateway. Fire-and-forget: the result is logged and never influences
//! check state or the rest of the pipeline.

use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::Check;
use crate::sms::SmsGateway;

/// Build the status-change message for a check carrying its new state.
pub fn format_status_change(check: &Check) -> String {
    format!(
        "Alert: Your check for {} {} is currently {}.",
        check.method,
        check.request_url(),
        check.state
    )
}

/// Dispatcher sending debounced status-change alerts
#[derive(Clone)]
pub struct AlertDispatcher {
    gateway: Arc<dyn SmsGateway>,
}

impl AlertDispatcher {
    pub fn new(gateway: Arc<dyn SmsGateway>) -> Self {
        Self { gateway }
    }

    /// Send the alert for `check` (already updated to its new state).
    ///
    /// One attempt; failure is terminal for this alert.
    #[instrument(skip_all, fields(check = %check.id))]
    pub async fn dispatch(&self, check: &Check) {
        let message = format_status_change(check);
        match self.gateway.send(&check.user_phone, &message).await {
            Ok(()) => info!("sms alert sent: {message}"),
            Err(err) => error!("sms alert failed ({err}); message was: {message}"),
        }
    }
}
