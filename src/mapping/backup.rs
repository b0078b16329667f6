//! Backup policy state mapping.
//!
//! The remote may echo a synthesized `cron_expression` for non-cron
//! frequencies; decode treats that echo as opaque and only surfaces the
//! expression when the declared frequency is "cron".

use crate::client::backup::{BackupPolicyRequest, BackupPolicyResponse, ScheduleWire};
use crate::error::ProviderError;
use crate::values::Value;

use super::{opt_string_list_value, opt_string_value, value_opt_string, value_opt_string_list};

/// Build the wire request from declared state. Status is not part of the
/// request; the reconciler toggles it through the status endpoint.
pub fn encode(state: &Value) -> Result<BackupPolicyRequest, ProviderError> {
    let name = state
        .get("policy_name")
        .as_str()
        .ok_or_else(|| ProviderError::Mapping("policy_name is required".to_string()))?
        .to_string();
    Ok(BackupPolicyRequest {
        name,
        description: value_opt_string(state.get("description")),
        workspaces: value_opt_string_list(state.get("workspaces")),
        schedule: encode_schedule(state.get("schedule"))?,
        retention_days: state.get("retention_days").as_int(),
    })
}

fn encode_schedule(schedule: &Value) -> Result<ScheduleWire, ProviderError> {
    let frequency = schedule
        .get("frequency")
        .as_str()
        .ok_or_else(|| ProviderError::Mapping("schedule frequency is required".to_string()))?
        .to_string();
    Ok(ScheduleWire {
        frequency,
        hour: schedule.get("hour").as_int(),
        minute: schedule.get("minute").as_int(),
        days_of_week: value_opt_string_list(schedule.get("days_of_week")),
        monthly_type: value_opt_string(schedule.get("monthly_type")),
        day_of_month: schedule.get("day_of_month").as_int(),
        weekday_ordinal: value_opt_string(schedule.get("weekday_ordinal")),
        weekday_name: value_opt_string(schedule.get("weekday_name")),
        cron_expression: value_opt_string(schedule.get("cron_expression")),
    })
}

/// Build new state from the remote response.
pub fn decode(response: &BackupPolicyResponse, prior: &Value) -> Value {
    Value::object([
        ("id", Value::string(&response.id)),
        ("policy_name", Value::string(&response.name)),
        (
            "description",
            opt_string_value(response.description.as_deref()),
        ),
        (
            "workspaces",
            opt_string_list_value(response.workspaces.as_ref(), prior.get("workspaces")),
        ),
        (
            "schedule",
            decode_schedule(&response.schedule, prior.get("schedule")),
        ),
        ("status", opt_string_value(response.status.as_deref())),
        (
            "retention_days",
            match response.retention_days {
                Some(n) => Value::Int(n),
                None => Value::Null,
            },
        ),
    ])
}

fn decode_schedule(wire: &ScheduleWire, prior: &Value) -> Value {
    // A synthesized cron echo for a non-cron frequency is opaque; drop it.
    let cron = if wire.frequency == "cron" {
        opt_string_value(wire.cron_expression.as_deref())
    } else {
        Value::Null
    };
    Value::object([
        ("frequency", Value::string(&wire.frequency)),
        (
            "hour",
            match wire.hour {
                Some(n) => Value::Int(n),
                None => Value::Null,
            },
        ),
        (
            "minute",
            match wire.minute {
                Some(n) => Value::Int(n),
                None => Value::Null,
            },
        ),
        (
            "days_of_week",
            opt_string_list_value(wire.days_of_week.as_ref(), prior.get("days_of_week")),
        ),
        (
            "monthly_type",
            opt_string_value(wire.monthly_type.as_deref()),
        ),
        (
            "day_of_month",
            match wire.day_of_month {
                Some(n) => Value::Int(n),
                None => Value::Null,
            },
        ),
        (
            "weekday_ordinal",
            opt_string_value(wire.weekday_ordinal.as_deref()),
        ),
        (
            "weekday_name",
            opt_string_value(wire.weekday_name.as_deref()),
        ),
        ("cron_expression", cron),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daily_response(cron_echo: Option<&str>) -> BackupPolicyResponse {
        BackupPolicyResponse {
            id: "bp-1".to_string(),
            name: "nightly".to_string(),
            description: None,
            workspaces: None,
            schedule: ScheduleWire {
                frequency: "daily".to_string(),
                hour: Some(2),
                minute: Some(30),
                cron_expression: cron_echo.map(str::to_string),
                ..Default::default()
            },
            status: Some("Active".to_string()),
            retention_days: Some(30),
        }
    }

    #[test]
    fn test_synthesized_cron_echo_dropped() {
        let state = decode(&daily_response(Some("30 2 * * *")), &Value::Null);
        assert!(state.get("schedule").get("cron_expression").is_null());
        assert_eq!(state.get("schedule").get("hour").as_int(), Some(2));
        assert_eq!(state.get("status").as_str(), Some("Active"));
    }

    #[test]
    fn test_cron_frequency_keeps_expression() {
        let response = BackupPolicyResponse {
            id: "bp-2".to_string(),
            name: "custom".to_string(),
            description: None,
            workspaces: None,
            schedule: ScheduleWire {
                frequency: "cron".to_string(),
                cron_expression: Some("*/15 * * * *".to_string()),
                ..Default::default()
            },
            status: None,
            retention_days: None,
        };
        let state = decode(&response, &Value::Null);
        assert_eq!(
            state.get("schedule").get("cron_expression").as_str(),
            Some("*/15 * * * *")
        );
    }

    #[test]
    fn test_encode_uses_policy_name() {
        let state = Value::object([
            ("policy_name", Value::string("bp")),
            (
                "schedule",
                Value::object([
                    ("frequency", Value::string("daily")),
                    ("hour", Value::Int(2)),
                    ("minute", Value::Int(30)),
                ]),
            ),
        ]);
        let request = encode(&state).unwrap();
        assert_eq!(request.name, "bp");
        assert_eq!(request.schedule.hour, Some(2));
    }
}
