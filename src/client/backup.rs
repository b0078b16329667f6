//! Backup-and-DR policies API client.
//!
//! Status is toggled through its own endpoint, never through the main
//! update. Callers sequence [`BackupClient::set_status`] strictly after the
//! create or update it refines.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{paginate, ListQuery, Page, Transport};
use crate::error::ProviderError;

/// A backup schedule on the wire. Which fields are populated depends on
/// `frequency`; the schedule validator enforces the valid combinations
/// before anything is sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleWire {
    /// "one_time", "daily", "weekly", "monthly", or "cron".
    pub frequency: String,
    /// Hour of day, 0..=23.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<i64>,
    /// Minute of hour, 0..=59.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute: Option<i64>,
    /// Weekday names for weekly schedules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<String>>,
    /// "specific_day" or "specific_weekday", for monthly schedules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_type: Option<String>,
    /// Day of month, 1..=31, for monthly specific_day schedules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<i64>,
    /// "First".."Fourth" or "Last", for monthly specific_weekday schedules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday_ordinal: Option<String>,
    /// Weekday name for monthly specific_weekday schedules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday_name: Option<String>,
    /// 5-field cron expression, for cron schedules. The remote may also echo
    /// a synthesized expression for other frequencies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron_expression: Option<String>,
}

/// A backup policy as the remote returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupPolicyResponse {
    /// Remote-assigned identifier.
    pub id: String,
    /// Policy name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Workspace ids the policy backs up.
    #[serde(default)]
    pub workspaces: Option<Vec<String>>,
    /// The backup schedule.
    pub schedule: ScheduleWire,
    /// "Active" or "Inactive".
    #[serde(default)]
    pub status: Option<String>,
    /// Retention period in days.
    #[serde(default)]
    pub retention_days: Option<i64>,
}

/// Create/update payload for a backup policy. Status is deliberately absent;
/// it travels through [`BackupClient::set_status`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupPolicyRequest {
    /// Policy name.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Workspace ids the policy backs up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspaces: Option<Vec<String>>,
    /// The backup schedule.
    pub schedule: ScheduleWire,
    /// Retention period in days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_days: Option<i64>,
}

/// Payload for the status toggle endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusRequest {
    status: String,
}

/// Client for `/backup-policies`.
#[derive(Debug, Clone)]
pub struct BackupClient {
    transport: Arc<Transport>,
}

impl BackupClient {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// List one page of backup policies.
    pub async fn list(
        &self,
        query: &ListQuery,
    ) -> Result<Page<BackupPolicyResponse>, ProviderError> {
        self.transport
            .get_json("/backup-policies", &query.to_params())
            .await
    }

    /// List backup policies across pages, up to `cap` entries.
    pub async fn list_all(
        &self,
        query: &ListQuery,
        cap: Option<usize>,
    ) -> Result<Vec<BackupPolicyResponse>, ProviderError> {
        paginate(query, cap, |q| async move { self.list(&q).await }).await
    }

    /// Fetch a backup policy by id.
    pub async fn get(&self, id: &str) -> Result<BackupPolicyResponse, ProviderError> {
        self.transport
            .get_json(&format!("/backup-policies/{}", id), &[])
            .await
    }

    /// Create a backup policy. New policies come up Active; callers wanting
    /// Inactive follow with [`set_status`](Self::set_status).
    pub async fn create(
        &self,
        request: &BackupPolicyRequest,
    ) -> Result<BackupPolicyResponse, ProviderError> {
        let body = serde_json::to_value(request)?;
        self.transport.post_json("/backup-policies", &body).await
    }

    /// Update a backup policy in place. Does not touch status.
    pub async fn update(
        &self,
        id: &str,
        request: &BackupPolicyRequest,
    ) -> Result<BackupPolicyResponse, ProviderError> {
        let body = serde_json::to_value(request)?;
        self.transport
            .patch_json(&format!("/backup-policies/{}", id), &body)
            .await
    }

    /// Toggle the policy's status. `status` is "Active" or "Inactive".
    pub async fn set_status(&self, id: &str, status: &str) -> Result<(), ProviderError> {
        let body = serde_json::to_value(StatusRequest {
            status: status.to_string(),
        })?;
        self.transport
            .put_empty(&format!("/backup-policies/{}/status", id), &body)
            .await
    }

    /// Delete a backup policy.
    pub async fn delete(&self, id: &str) -> Result<(), ProviderError> {
        self.transport
            .delete(&format!("/backup-policies/{}", id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_schedule_omits_unset_fields() {
        let schedule = ScheduleWire {
            frequency: "daily".to_string(),
            hour: Some(2),
            minute: Some(30),
            ..Default::default()
        };
        let json = serde_json::to_value(&schedule).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"frequency": "daily", "hour": 2, "minute": 30})
        );
    }

    #[test]
    fn test_request_carries_no_status() {
        let request = BackupPolicyRequest {
            name: "bp".to_string(),
            schedule: ScheduleWire {
                frequency: "daily".to_string(),
                hour: Some(2),
                minute: Some(30),
                ..Default::default()
            },
            ..Default::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("status").is_none());
    }

    #[test]
    fn test_response_parses_synthesized_cron_echo() {
        let response: BackupPolicyResponse = serde_json::from_value(serde_json::json!({
            "id": "bp-1",
            "name": "nightly",
            "schedule": {
                "frequency": "daily",
                "hour": 2,
                "minute": 30,
                "cronExpression": "30 2 * * *",
            },
            "status": "Active",
        }))
        .unwrap();
        assert_eq!(response.schedule.cron_expression.as_deref(), Some("30 2 * * *"));
    }
}
