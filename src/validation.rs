//! Config validation.
//!
//! Validates declared value trees against a [`Schema`]: type checks, required
//! attribute presence, per-attribute validators, and nested block item
//! constraints. Also hosts the cross-attribute backup schedule validator.
//!
//! Unknown values pass every check; they are placeholders the host resolves
//! later, so only the resolved value can be judged.

use std::collections::HashMap;

use crate::error::ProviderError;
use crate::schema::{
    Attribute, AttributeType, Block, BlockNestingMode, Diagnostic, DiagnosticSeverity, NestedBlock,
    Schema, Validator,
};
use crate::values::Value;

/// Validate a value tree against a schema.
///
/// Returns a list of diagnostics for any validation errors found.
/// An empty list means the value is valid.
pub fn validate(schema: &Schema, value: &Value) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    validate_block(&schema.block, value, "", &mut diagnostics);
    diagnostics
}

/// Validate a value tree, returning `Ok` if valid or `Err` with diagnostics.
pub fn validate_result(schema: &Schema, value: &Value) -> Result<(), Vec<Diagnostic>> {
    let diagnostics = validate(schema, value);
    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(diagnostics)
    }
}

/// Check whether a value tree is valid against a schema.
pub fn is_valid(schema: &Schema, value: &Value) -> bool {
    validate(schema, value).is_empty()
}

fn validate_block(block: &Block, value: &Value, path: &str, diagnostics: &mut Vec<Diagnostic>) {
    let attrs = match value {
        Value::Object(map) => map,
        Value::Null | Value::Unknown => return,
        other => {
            diagnostics.push(
                Diagnostic::error("Expected object")
                    .with_detail(format!("Got {}", value_kind_name(other)))
                    .with_attribute_if_not_empty(path),
            );
            return;
        }
    };

    static NULL: Value = Value::Null;

    for (name, attr) in &block.attributes {
        let attr_path = join_path(path, name);
        let attr_value = attrs.get(name).unwrap_or(&NULL);
        validate_attribute(attr, attr_value, &attr_path, diagnostics);
    }

    for (name, nested_block) in &block.blocks {
        let block_path = join_path(path, name);
        let block_value = attrs.get(name).unwrap_or(&NULL);
        validate_nested_block(nested_block, block_value, &block_path, diagnostics);
    }
}

fn validate_attribute(
    attr: &Attribute,
    value: &Value,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    // Computed-only attributes are filled by the provider.
    if attr.flags.computed && !attr.flags.optional && !attr.flags.required {
        return;
    }

    match value {
        Value::Null => {
            if attr.flags.required {
                diagnostics.push(
                    Diagnostic::error(format!("Missing required attribute '{}'", path))
                        .with_detail("This attribute is required and must be provided")
                        .with_attribute(path),
                );
            }
        }
        Value::Unknown => {}
        known => {
            validate_attribute_type(&attr.attr_type, known, path, diagnostics);
            for validator in &attr.validators {
                run_validator(validator, known, path, diagnostics);
            }
        }
    }
}

fn run_validator(validator: &Validator, value: &Value, path: &str, diagnostics: &mut Vec<Diagnostic>) {
    match validator {
        Validator::LengthAtLeast(min) => {
            if let Some(s) = value.as_str() {
                if s.chars().count() < *min {
                    diagnostics.push(
                        Diagnostic::error(format!("Invalid value for attribute '{}'", path))
                            .with_detail(format!("Must be at least {} character(s) long", min))
                            .with_attribute(path),
                    );
                }
            }
        }
        Validator::OneOf(allowed) => {
            if let Some(s) = value.as_str() {
                if !allowed.iter().any(|a| a == s) {
                    diagnostics.push(
                        Diagnostic::error(format!("Invalid value for attribute '{}'", path))
                            .with_detail(format!("Must be one of: {}", allowed.join(", ")))
                            .with_attribute(path),
                    );
                }
            }
        }
        Validator::SizeAtLeast(min) => {
            if let Some(items) = value.as_list() {
                if items.len() < *min {
                    diagnostics.push(
                        Diagnostic::error(format!("Invalid value for attribute '{}'", path))
                            .with_detail(format!("Must contain at least {} element(s)", min))
                            .with_attribute(path),
                    );
                }
            }
        }
    }
}

fn validate_attribute_type(
    attr_type: &AttributeType,
    value: &Value,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match attr_type {
        AttributeType::String => {
            if value.as_str().is_none() {
                diagnostics.push(type_error(path, "string", value));
            }
        }
        AttributeType::Int64 => {
            if value.as_int().is_none() {
                diagnostics.push(type_error(path, "int64", value));
            }
        }
        AttributeType::Float64 => {
            if value.as_float().is_none() {
                diagnostics.push(type_error(path, "float64", value));
            }
        }
        AttributeType::Bool => {
            if value.as_bool().is_none() {
                diagnostics.push(type_error(path, "bool", value));
            }
        }
        AttributeType::List(element_type) => {
            if let Some(items) = value.as_list() {
                for (i, elem) in items.iter().enumerate() {
                    if elem.is_known() {
                        let elem_path = format!("{}.{}", path, i);
                        validate_attribute_type(element_type, elem, &elem_path, diagnostics);
                    }
                }
            } else {
                diagnostics.push(type_error(path, "list", value));
            }
        }
        AttributeType::Map(value_type) => {
            if let Some(entries) = value.as_map() {
                for (key, val) in entries {
                    if val.is_known() {
                        let key_path = format!("{}.{}", path, key);
                        validate_attribute_type(value_type, val, &key_path, diagnostics);
                    }
                }
            } else {
                diagnostics.push(type_error(path, "map", value));
            }
        }
        AttributeType::Object(attr_types) => {
            if let Some(attrs) = value.as_object() {
                validate_object_type(attr_types, attrs, path, diagnostics);
            } else {
                diagnostics.push(type_error(path, "object", value));
            }
        }
    }
}

fn validate_object_type(
    attr_types: &HashMap<String, AttributeType>,
    attrs: &std::collections::BTreeMap<String, Value>,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for (name, attr_type) in attr_types {
        let attr_path = join_path(path, name);
        if let Some(value) = attrs.get(name) {
            if value.is_known() {
                validate_attribute_type(attr_type, value, &attr_path, diagnostics);
            }
        }
    }
}

fn validate_nested_block(
    nested: &NestedBlock,
    value: &Value,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match nested.nesting_mode {
        BlockNestingMode::Single => match value {
            Value::Null | Value::Unknown => {
                if nested.min_items > 0 {
                    diagnostics.push(
                        Diagnostic::error(format!("Missing required block '{}'", path))
                            .with_detail("At least one block is required")
                            .with_attribute(path),
                    );
                }
            }
            v => validate_block(&nested.block, v, path, diagnostics),
        },
        BlockNestingMode::List => validate_list_block(nested, value, path, diagnostics),
        BlockNestingMode::Map => validate_map_block(nested, value, path, diagnostics),
    }
}

fn validate_list_block(
    nested: &NestedBlock,
    value: &Value,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match value {
        Value::Null | Value::Unknown => {
            if nested.min_items > 0 {
                diagnostics.push(
                    Diagnostic::error(format!(
                        "Block '{}' requires at least {} item(s)",
                        path, nested.min_items
                    ))
                    .with_attribute(path),
                );
            }
        }
        Value::List(items) => {
            let len = items.len() as u32;
            if len < nested.min_items {
                diagnostics.push(
                    Diagnostic::error(format!(
                        "Block '{}' requires at least {} item(s), got {}",
                        path, nested.min_items, len
                    ))
                    .with_attribute(path),
                );
            }
            if nested.max_items > 0 && len > nested.max_items {
                diagnostics.push(
                    Diagnostic::error(format!(
                        "Block '{}' allows at most {} item(s), got {}",
                        path, nested.max_items, len
                    ))
                    .with_attribute(path),
                );
            }
            for (i, item) in items.iter().enumerate() {
                let item_path = format!("{}.{}", path, i);
                validate_block(&nested.block, item, &item_path, diagnostics);
            }
        }
        v => {
            diagnostics.push(
                Diagnostic::error(format!("Expected list for block '{}'", path))
                    .with_detail(format!("Got {}", value_kind_name(v)))
                    .with_attribute(path),
            );
        }
    }
}

fn validate_map_block(
    nested: &NestedBlock,
    value: &Value,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match value {
        Value::Null | Value::Unknown => {
            if nested.min_items > 0 {
                diagnostics.push(
                    Diagnostic::error(format!(
                        "Block '{}' requires at least {} item(s)",
                        path, nested.min_items
                    ))
                    .with_attribute(path),
                );
            }
        }
        Value::Map(entries) | Value::Object(entries) => {
            let len = entries.len() as u32;
            if len < nested.min_items {
                diagnostics.push(
                    Diagnostic::error(format!(
                        "Block '{}' requires at least {} item(s), got {}",
                        path, nested.min_items, len
                    ))
                    .with_attribute(path),
                );
            }
            if nested.max_items > 0 && len > nested.max_items {
                diagnostics.push(
                    Diagnostic::error(format!(
                        "Block '{}' allows at most {} item(s), got {}",
                        path, nested.max_items, len
                    ))
                    .with_attribute(path),
                );
            }
            for (key, item) in entries {
                let item_path = format!("{}.{}", path, key);
                validate_block(&nested.block, item, &item_path, diagnostics);
            }
        }
        v => {
            diagnostics.push(
                Diagnostic::error(format!("Expected map for block '{}'", path))
                    .with_detail(format!("Got {}", value_kind_name(v)))
                    .with_attribute(path),
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Backup schedule validation
// ---------------------------------------------------------------------------

const DAY_NAMES: &[&str] = &["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const WEEKDAY_ORDINALS: &[&str] = &["First", "Second", "Third", "Fourth", "Last"];

/// Validate a backup policy `schedule` block.
///
/// The valid attribute subset depends on the `frequency` discriminator:
///
/// - `one_time` / `daily`: `hour` in 0..=23, `minute` in 0..=59, nothing else.
/// - `weekly`: time as above plus non-empty `days_of_week` of Mon..Sun.
/// - `monthly` with `monthly_type = "specific_day"`: `day_of_month` in 1..=31.
/// - `monthly` with `monthly_type = "specific_weekday"`: `weekday_ordinal` in
///   First..Last, `weekday_name` in Mon..Sun.
/// - `cron`: `cron_expression` parses as a 5-field cron, no time fields.
///
/// Any other combination fails with [`ProviderError::InvalidSchedule`].
pub fn validate_schedule(schedule: &Value) -> Result<(), ProviderError> {
    let frequency = schedule
        .get("frequency")
        .as_str()
        .ok_or_else(|| ProviderError::InvalidSchedule("frequency is required".to_string()))?;

    match frequency {
        "one_time" | "daily" => {
            require_time(schedule)?;
            require_absent(schedule, "days_of_week")?;
            require_absent(schedule, "day_of_month")?;
            require_absent(schedule, "weekday_ordinal")?;
            require_absent(schedule, "weekday_name")?;
        }
        "weekly" => {
            require_time(schedule)?;
            let days = schedule.get("days_of_week").string_items().ok_or_else(|| {
                ProviderError::InvalidSchedule(
                    "days_of_week is required for weekly schedules".to_string(),
                )
            })?;
            if days.is_empty() {
                return Err(ProviderError::InvalidSchedule(
                    "days_of_week must be non-empty for weekly schedules".to_string(),
                ));
            }
            for day in &days {
                if !DAY_NAMES.contains(&day.as_str()) {
                    return Err(ProviderError::InvalidSchedule(format!(
                        "days_of_week contains invalid day '{}'",
                        day
                    )));
                }
            }
            require_absent(schedule, "day_of_month")?;
            require_absent(schedule, "weekday_ordinal")?;
            require_absent(schedule, "weekday_name")?;
        }
        "monthly" => {
            require_time(schedule)?;
            require_absent(schedule, "days_of_week")?;
            match schedule.get("monthly_type").as_str() {
                Some("specific_day") => {
                    let day = schedule.get("day_of_month").as_int().ok_or_else(|| {
                        ProviderError::InvalidSchedule(
                            "day_of_month is required for specific_day schedules".to_string(),
                        )
                    })?;
                    if !(1..=31).contains(&day) {
                        return Err(ProviderError::InvalidSchedule(format!(
                            "day_of_month must be between 1 and 31, got {}",
                            day
                        )));
                    }
                    require_absent(schedule, "weekday_ordinal")?;
                    require_absent(schedule, "weekday_name")?;
                }
                Some("specific_weekday") => {
                    let ordinal = schedule.get("weekday_ordinal").as_str().ok_or_else(|| {
                        ProviderError::InvalidSchedule(
                            "weekday_ordinal is required for specific_weekday schedules"
                                .to_string(),
                        )
                    })?;
                    if !WEEKDAY_ORDINALS.contains(&ordinal) {
                        return Err(ProviderError::InvalidSchedule(format!(
                            "weekday_ordinal must be one of {}, got '{}'",
                            WEEKDAY_ORDINALS.join(", "),
                            ordinal
                        )));
                    }
                    let name = schedule.get("weekday_name").as_str().ok_or_else(|| {
                        ProviderError::InvalidSchedule(
                            "weekday_name is required for specific_weekday schedules".to_string(),
                        )
                    })?;
                    if !DAY_NAMES.contains(&name) {
                        return Err(ProviderError::InvalidSchedule(format!(
                            "weekday_name must be a day Mon..Sun, got '{}'",
                            name
                        )));
                    }
                    require_absent(schedule, "day_of_month")?;
                }
                Some(other) => {
                    return Err(ProviderError::InvalidSchedule(format!(
                        "monthly_type must be specific_day or specific_weekday, got '{}'",
                        other
                    )));
                }
                None => {
                    return Err(ProviderError::InvalidSchedule(
                        "monthly_type is required for monthly schedules".to_string(),
                    ));
                }
            }
        }
        "cron" => {
            let expr = schedule.get("cron_expression").as_str().ok_or_else(|| {
                ProviderError::InvalidSchedule(
                    "cron_expression is required for cron schedules".to_string(),
                )
            })?;
            validate_cron(expr)?;
            for field in [
                "hour",
                "minute",
                "days_of_week",
                "day_of_month",
                "weekday_ordinal",
                "weekday_name",
            ] {
                require_absent(schedule, field)?;
            }
        }
        other => {
            return Err(ProviderError::InvalidSchedule(format!(
                "unsupported frequency '{}'",
                other
            )));
        }
    }

    Ok(())
}

fn require_time(schedule: &Value) -> Result<(), ProviderError> {
    let hour = schedule
        .get("hour")
        .as_int()
        .ok_or_else(|| ProviderError::InvalidSchedule("hour is required".to_string()))?;
    if !(0..=23).contains(&hour) {
        return Err(ProviderError::InvalidSchedule(format!(
            "hour must be between 0 and 23, got {}",
            hour
        )));
    }
    let minute = schedule
        .get("minute")
        .as_int()
        .ok_or_else(|| ProviderError::InvalidSchedule("minute is required".to_string()))?;
    if !(0..=59).contains(&minute) {
        return Err(ProviderError::InvalidSchedule(format!(
            "minute must be between 0 and 59, got {}",
            minute
        )));
    }
    Ok(())
}

fn require_absent(schedule: &Value, field: &str) -> Result<(), ProviderError> {
    if schedule.get(field).is_known() {
        return Err(ProviderError::InvalidSchedule(format!(
            "{} must not be set for this frequency",
            field
        )));
    }
    Ok(())
}

/// Validate a 5-field cron expression (minute hour day-of-month month
/// day-of-week). Supports `*`, numbers, ranges, steps, and comma lists.
pub fn validate_cron(expr: &str) -> Result<(), ProviderError> {
    let fields: Vec<&str> = expr.split_whitespace().collect();
    if fields.len() != 5 {
        return Err(ProviderError::InvalidSchedule(format!(
            "cron_expression must have 5 fields, got {}",
            fields.len()
        )));
    }
    let bounds = [(0, 59), (0, 23), (1, 31), (1, 12), (0, 6)];
    for (field, (min, max)) in fields.iter().zip(bounds.iter()) {
        validate_cron_field(field, *min, *max).map_err(|detail| {
            ProviderError::InvalidSchedule(format!(
                "cron_expression field '{}' is invalid: {}",
                field, detail
            ))
        })?;
    }
    Ok(())
}

fn validate_cron_field(field: &str, min: i64, max: i64) -> Result<(), String> {
    for part in field.split(',') {
        let (range, step) = match part.split_once('/') {
            Some((range, step)) => {
                let step: i64 = step.parse().map_err(|_| "step is not a number".to_string())?;
                if step < 1 {
                    return Err("step must be at least 1".to_string());
                }
                (range, Some(step))
            }
            None => (part, None),
        };

        match range {
            "*" => {}
            _ => match range.split_once('-') {
                Some((lo, hi)) => {
                    let lo: i64 = lo.parse().map_err(|_| "range start is not a number".to_string())?;
                    let hi: i64 = hi.parse().map_err(|_| "range end is not a number".to_string())?;
                    if lo > hi || lo < min || hi > max {
                        return Err(format!("range must be within {}..{}", min, max));
                    }
                }
                None => {
                    let n: i64 = range.parse().map_err(|_| "not a number".to_string())?;
                    if n < min || n > max {
                        return Err(format!("value must be within {}..{}", min, max));
                    }
                    if step.is_some() {
                        return Err("step requires a range or *".to_string());
                    }
                }
            },
        }
    }
    Ok(())
}

// Helper functions

fn join_path(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", base, name)
    }
}

fn value_kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Unknown => "unknown",
        Value::Bool(_) => "bool",
        Value::Int(_) | Value::Float(_) => "number",
        Value::String(_) => "string",
        Value::List(_) => "list",
        Value::Map(_) => "map",
        Value::Object(_) => "object",
    }
}

fn type_error(path: &str, expected: &str, got: &Value) -> Diagnostic {
    Diagnostic {
        severity: DiagnosticSeverity::Error,
        summary: format!("Invalid type for attribute '{}'", path),
        detail: Some(format!("Expected {}, got {}", expected, value_kind_name(got))),
        attribute: Some(path.to_string()),
    }
}

trait DiagnosticExt {
    fn with_attribute_if_not_empty(self, path: &str) -> Self;
}

impl DiagnosticExt for Diagnostic {
    fn with_attribute_if_not_empty(self, path: &str) -> Self {
        if path.is_empty() {
            self
        } else {
            self.with_attribute(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Attribute, Block, NestedBlock, Schema};

    fn daily(hour: i64, minute: i64) -> Value {
        Value::object([
            ("frequency", Value::string("daily")),
            ("hour", Value::Int(hour)),
            ("minute", Value::Int(minute)),
        ])
    }

    #[test]
    fn test_validate_required_string() {
        let schema = Schema::v0().with_attribute("name", Attribute::required_string());

        let diagnostics = validate(&schema, &Value::object([("name", Value::string("p"))]));
        assert!(diagnostics.is_empty());

        let diagnostics = validate(&schema, &Value::object([("name", Value::Null)]));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute, Some("name".to_string()));

        let diagnostics = validate(&schema, &Value::object([("name", Value::Int(1))]));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].summary.contains("Invalid type"));
    }

    #[test]
    fn test_unknown_passes_validation() {
        let schema = Schema::v0().with_attribute("name", Attribute::required_string());
        let diagnostics = validate(&schema, &Value::object([("name", Value::Unknown)]));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_computed_attribute_skipped() {
        let schema = Schema::v0().with_attribute("id", Attribute::computed_string());
        let diagnostics = validate(&schema, &Value::object([("id", Value::Int(3))]));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_length_at_least_validator() {
        let schema = Schema::v0().with_attribute(
            "name",
            Attribute::required_string().with_validator(Validator::LengthAtLeast(3)),
        );
        assert!(is_valid(&schema, &Value::object([("name", Value::string("abc"))])));
        let diagnostics = validate(&schema, &Value::object([("name", Value::string("ab"))]));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].detail.as_ref().unwrap().contains("at least 3"));
    }

    #[test]
    fn test_one_of_validator() {
        let schema = Schema::v0().with_attribute(
            "status",
            Attribute::optional_string().with_validator(Validator::OneOf(vec![
                "Active".to_string(),
                "Inactive".to_string(),
            ])),
        );
        assert!(is_valid(&schema, &Value::object([("status", Value::string("Active"))])));
        assert!(is_valid(&schema, &Value::object([("status", Value::Null)])));
        let diagnostics = validate(&schema, &Value::object([("status", Value::string("Paused"))]));
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_size_at_least_validator() {
        let schema = Schema::v0().with_attribute(
            "labels",
            Attribute::optional_string_list().with_validator(Validator::SizeAtLeast(1)),
        );
        assert!(is_valid(&schema, &Value::object([("labels", Value::string_list(["x"]))])));
        let diagnostics = validate(&schema, &Value::object([("labels", Value::List(vec![]))]));
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_nested_block_list_constraints() {
        let schema = Schema::v0().with_block(
            "variable",
            NestedBlock::list(Block::new().with_attribute("key", Attribute::required_string()))
                .with_min_items(1),
        );

        let diagnostics = validate(&schema, &Value::object([("variable", Value::List(vec![]))]));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].summary.contains("at least 1"));

        let diagnostics = validate(
            &schema,
            &Value::object([(
                "variable",
                Value::List(vec![Value::object([("key", Value::Int(1))])]),
            )]),
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute, Some("variable.0.key".to_string()));
    }

    #[test]
    fn test_schedule_daily_valid() {
        assert!(validate_schedule(&daily(2, 30)).is_ok());
    }

    #[test]
    fn test_schedule_daily_rejects_out_of_range_time() {
        assert!(matches!(
            validate_schedule(&daily(24, 0)),
            Err(ProviderError::InvalidSchedule(_))
        ));
        assert!(matches!(
            validate_schedule(&daily(2, 60)),
            Err(ProviderError::InvalidSchedule(_))
        ));
    }

    #[test]
    fn test_schedule_daily_rejects_weekly_fields() {
        let schedule = daily(2, 30).with("days_of_week", Value::string_list(["Mon"]));
        let err = validate_schedule(&schedule).unwrap_err();
        assert!(err.to_string().contains("days_of_week"));
    }

    #[test]
    fn test_schedule_weekly_requires_days() {
        let schedule = Value::object([
            ("frequency", Value::string("weekly")),
            ("hour", Value::Int(2)),
            ("minute", Value::Int(0)),
        ]);
        let err = validate_schedule(&schedule).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidSchedule(_)));
        assert!(err.to_string().contains("days_of_week"));
    }

    #[test]
    fn test_schedule_weekly_valid() {
        let schedule = Value::object([
            ("frequency", Value::string("weekly")),
            ("hour", Value::Int(2)),
            ("minute", Value::Int(0)),
            ("days_of_week", Value::string_list(["Mon", "Fri"])),
        ]);
        assert!(validate_schedule(&schedule).is_ok());
    }

    #[test]
    fn test_schedule_weekly_rejects_bad_day() {
        let schedule = Value::object([
            ("frequency", Value::string("weekly")),
            ("hour", Value::Int(2)),
            ("minute", Value::Int(0)),
            ("days_of_week", Value::string_list(["Funday"])),
        ]);
        assert!(validate_schedule(&schedule).is_err());
    }

    #[test]
    fn test_schedule_monthly_specific_day() {
        let schedule = Value::object([
            ("frequency", Value::string("monthly")),
            ("monthly_type", Value::string("specific_day")),
            ("hour", Value::Int(1)),
            ("minute", Value::Int(15)),
            ("day_of_month", Value::Int(15)),
        ]);
        assert!(validate_schedule(&schedule).is_ok());

        let bad = schedule.with("day_of_month", Value::Int(32));
        assert!(validate_schedule(&bad).is_err());
    }

    #[test]
    fn test_schedule_monthly_specific_weekday() {
        let schedule = Value::object([
            ("frequency", Value::string("monthly")),
            ("monthly_type", Value::string("specific_weekday")),
            ("hour", Value::Int(1)),
            ("minute", Value::Int(15)),
            ("weekday_ordinal", Value::string("Last")),
            ("weekday_name", Value::string("Fri")),
        ]);
        assert!(validate_schedule(&schedule).is_ok());

        let bad = schedule.clone().with("weekday_ordinal", Value::string("Fifth"));
        assert!(validate_schedule(&bad).is_err());

        let bad = schedule.with("weekday_name", Value::string("Friday"));
        assert!(validate_schedule(&bad).is_err());
    }

    #[test]
    fn test_schedule_cron() {
        let schedule = Value::object([
            ("frequency", Value::string("cron")),
            ("cron_expression", Value::string("*/15 2 * * 1-5")),
        ]);
        assert!(validate_schedule(&schedule).is_ok());

        let bad = schedule.clone().with("cron_expression", Value::string("* * * *"));
        assert!(validate_schedule(&bad).is_err());

        // Time fields are not allowed alongside cron.
        let bad = schedule.with("hour", Value::Int(2));
        assert!(validate_schedule(&bad).is_err());
    }

    #[test]
    fn test_schedule_unknown_frequency() {
        let schedule = Value::object([("frequency", Value::string("hourly"))]);
        assert!(matches!(
            validate_schedule(&schedule),
            Err(ProviderError::InvalidSchedule(_))
        ));
    }

    #[test]
    fn test_cron_field_bounds() {
        assert!(validate_cron("0 0 1 1 0").is_ok());
        assert!(validate_cron("60 0 1 1 0").is_err());
        assert!(validate_cron("0 24 1 1 0").is_err());
        assert!(validate_cron("0 0 0 1 0").is_err());
        assert!(validate_cron("0 0 1 13 0").is_err());
        assert!(validate_cron("0 0 1 1 7").is_err());
        assert!(validate_cron("5,10,15 * * * *").is_ok());
        assert!(validate_cron("1-5/2 * * * *").is_ok());
    }
}
