//! Message reminders.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::ApiError;
use crate::params;
use crate::response::ApiResponse;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateReminderParams {
    /// Message the reminder points back to.
    pub message_id: i64,
    /// When the reminder fires, as a UNIX timestamp.
    pub scheduled_delivery_timestamp: i64,
    /// Optional note shown in the reminder notification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedReminder {
    pub reminder_id: i64,
}

impl Client {
    /// Schedule a reminder about an existing message.
    pub fn create_reminder(
        &self,
        params: &CreateReminderParams,
    ) -> Result<ApiResponse<CreatedReminder>, ApiError> {
        let body = params::encode_pairs(params)?;
        self.dispatch(&self.build_post_form("/reminders", body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::encode_pairs;

    #[test]
    fn note_is_omitted_when_unset() {
        let pairs = encode_pairs(&CreateReminderParams {
            message_id: 31,
            scheduled_delivery_timestamp: 1754006400,
            note: None,
        })
        .unwrap();
        assert_eq!(
            pairs,
            vec![
                ("message_id".to_string(), "31".to_string()),
                (
                    "scheduled_delivery_timestamp".to_string(),
                    "1754006400".to_string()
                ),
            ]
        );
    }
}
