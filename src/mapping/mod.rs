//! Translation between declared state values and API wire shapes.
//!
//! Each entity kind has an encode (state -> request) and decode
//! (response + prior state -> new state) pair. Decoding takes the prior
//! state so remote-side normalizations the user never declared (injected
//! wildcards, synthesized cron echoes) do not surface as drift.

pub mod backup;
pub mod governance;
pub mod guardrail;
pub mod labels;
pub mod membership;
pub mod project;
pub mod runners;
pub mod variable_set;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::client::PatternSetWire;
use crate::error::ProviderError;
use crate::values::Value;

/// Guardrail severity names, in wire order: 1 = flexible .. 3 = warning.
const GUARDRAIL_SEVERITIES: &[&str] = &["flexible", "strict", "warning"];

/// Governance severity names, in wire order: 1 = trace .. 6 = critical.
const GOVERNANCE_SEVERITIES: &[&str] = &["trace", "info", "low", "medium", "high", "critical"];

fn severity_to_wire(table: &[&str], name: &str) -> Result<i64, ProviderError> {
    table
        .iter()
        .position(|s| *s == name)
        .map(|i| i as i64 + 1)
        .ok_or_else(|| ProviderError::Mapping(format!("unknown severity {:?}", name)))
}

fn severity_from_wire(table: &[&str], wire: i64) -> Value {
    match usize::try_from(wire - 1)
        .ok()
        .and_then(|i| table.get(i))
    {
        Some(name) => Value::string(*name),
        // Unknown integers decode to null rather than failing the read.
        None => Value::Null,
    }
}

/// Encode a guardrail severity name ("flexible", "strict", "warning").
pub fn guardrail_severity_to_wire(name: &str) -> Result<i64, ProviderError> {
    severity_to_wire(GUARDRAIL_SEVERITIES, name)
}

/// Decode a guardrail severity integer; out-of-range decodes to null.
pub fn guardrail_severity_from_wire(wire: i64) -> Value {
    severity_from_wire(GUARDRAIL_SEVERITIES, wire)
}

/// Encode a governance severity name ("trace" .. "critical").
pub fn governance_severity_to_wire(name: &str) -> Result<i64, ProviderError> {
    severity_to_wire(GOVERNANCE_SEVERITIES, name)
}

/// Decode a governance severity integer; out-of-range decodes to null.
pub fn governance_severity_from_wire(wire: i64) -> Value {
    severity_from_wire(GOVERNANCE_SEVERITIES, wire)
}

/// Base64-encode source code for the wire.
pub fn encode_code(plain: &str) -> String {
    BASE64.encode(plain.as_bytes())
}

/// Decode base64 source code from the wire. Invalid base64 or non-UTF-8
/// payloads are malformed responses.
pub fn decode_code(encoded: &str) -> Result<String, ProviderError> {
    let bytes = BASE64
        .decode(encoded.as_bytes())
        .map_err(|e| ProviderError::Malformed(format!("invalid base64 code field: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| ProviderError::Malformed(format!("code field is not UTF-8: {}", e)))
}

/// A declared pattern-set value: `{include, exclude}` lists of glob patterns.
///
/// Encoding injects the wildcard set when the user declared nothing, since
/// the remote rejects empty scopes; decoding erases that injected wildcard
/// again unless the user's prior state actually declared it.
pub fn pattern_set_to_wire(value: &Value) -> Result<Option<PatternSetWire>, ProviderError> {
    if value.is_null() {
        return Ok(None);
    }
    let Some(attrs) = value.as_object() else {
        return Err(ProviderError::Mapping(
            "pattern set must be an object".to_string(),
        ));
    };
    let include = attrs.get("include").and_then(Value::string_items);
    let exclude = attrs.get("exclude").and_then(Value::string_items);
    if include.is_none() && exclude.is_none() {
        return Ok(None);
    }
    Ok(Some(PatternSetWire { include, exclude }))
}

/// Encode a pattern set, substituting the wildcard when absent.
pub fn pattern_set_to_wire_or_wildcard(value: &Value) -> Result<PatternSetWire, ProviderError> {
    Ok(pattern_set_to_wire(value)?.unwrap_or_else(PatternSetWire::wildcard))
}

/// Decode a pattern set, erasing an injected wildcard.
///
/// The remote echoes `{include: ["*"]}` for scopes we sent the wildcard for.
/// If the prior state did not declare that wildcard itself, decode it back
/// to null so the user sees no diff.
pub fn pattern_set_from_wire(wire: Option<&PatternSetWire>, prior: &Value) -> Value {
    let Some(wire) = wire else {
        return Value::Null;
    };
    if wire.is_wildcard() && !prior_declared_wildcard(prior) {
        return Value::Null;
    }
    let mut set = Value::Object(Default::default());
    set = set.with(
        "include",
        match &wire.include {
            Some(items) => Value::string_list(items.iter().cloned()),
            None => Value::Null,
        },
    );
    set = set.with(
        "exclude",
        match &wire.exclude {
            Some(items) => Value::string_list(items.iter().cloned()),
            None => Value::Null,
        },
    );
    set
}

fn prior_declared_wildcard(prior: &Value) -> bool {
    prior
        .get("include")
        .string_items()
        .map_or(false, |items| items == ["*"])
}

/// Decode an optional wire string, folding empty strings to null. The remote
/// reports cleared text fields as `""`; declared state uses null.
pub fn opt_string_value(wire: Option<&str>) -> Value {
    match wire {
        Some(s) if !s.is_empty() => Value::string(s),
        _ => Value::Null,
    }
}

/// Encode an optional string attribute; null and empty both encode as absent.
pub fn value_opt_string(value: &Value) -> Option<String> {
    value.as_str().filter(|s| !s.is_empty()).map(str::to_string)
}

/// Encode an optional string-list attribute; null encodes as absent, an
/// empty declared list encodes as an empty wire list.
pub fn value_opt_string_list(value: &Value) -> Option<Vec<String>> {
    value.string_items()
}

/// Decode an optional wire string list. A null prior distinguishes "never
/// declared" from "declared empty": if the wire list is empty and the prior
/// was null, decode to null.
pub fn opt_string_list_value(wire: Option<&Vec<String>>, prior: &Value) -> Value {
    match wire {
        Some(items) if !items.is_empty() => Value::string_list(items.iter().cloned()),
        Some(_) if !prior.is_null() => Value::string_list(Vec::<String>::new()),
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guardrail_severity_round_trip() {
        for name in ["flexible", "strict", "warning"] {
            let wire = guardrail_severity_to_wire(name).unwrap();
            assert_eq!(guardrail_severity_from_wire(wire), Value::string(name));
        }
    }

    #[test]
    fn test_unknown_severity_decodes_to_null() {
        assert_eq!(guardrail_severity_from_wire(9), Value::Null);
        assert_eq!(governance_severity_from_wire(0), Value::Null);
        assert_eq!(governance_severity_from_wire(-3), Value::Null);
    }

    #[test]
    fn test_governance_severity_table() {
        assert_eq!(governance_severity_to_wire("trace").unwrap(), 1);
        assert_eq!(governance_severity_to_wire("critical").unwrap(), 6);
        assert!(governance_severity_to_wire("fatal").is_err());
    }

    #[test]
    fn test_code_round_trip() {
        let encoded = encode_code("firefly { true }");
        assert_eq!(decode_code(&encoded).unwrap(), "firefly { true }");
    }

    #[test]
    fn test_invalid_base64_is_malformed() {
        assert!(matches!(
            decode_code("not!!base64"),
            Err(ProviderError::Malformed(_))
        ));
    }

    #[test]
    fn test_null_pattern_set_gets_wildcard() {
        let wire = pattern_set_to_wire_or_wildcard(&Value::Null).unwrap();
        assert!(wire.is_wildcard());
    }

    #[test]
    fn test_wildcard_erased_when_prior_null() {
        let wire = PatternSetWire::wildcard();
        assert_eq!(pattern_set_from_wire(Some(&wire), &Value::Null), Value::Null);
    }

    #[test]
    fn test_wildcard_kept_when_prior_declared_it() {
        let prior = Value::object([("include", Value::string_list(["*"]))]);
        let decoded = pattern_set_from_wire(Some(&PatternSetWire::wildcard()), &prior);
        assert_eq!(
            decoded.get("include").string_items().unwrap(),
            vec!["*".to_string()]
        );
    }

    #[test]
    fn test_explicit_patterns_survive_decode() {
        let wire = PatternSetWire {
            include: Some(vec!["prod-*".to_string()]),
            exclude: Some(vec!["prod-canary".to_string()]),
        };
        let decoded = pattern_set_from_wire(Some(&wire), &Value::Null);
        assert_eq!(
            decoded.get("include").string_items().unwrap(),
            vec!["prod-*".to_string()]
        );
        assert_eq!(
            decoded.get("exclude").string_items().unwrap(),
            vec!["prod-canary".to_string()]
        );
    }

    #[test]
    fn test_empty_string_folds_to_null() {
        assert_eq!(opt_string_value(Some("")), Value::Null);
        assert_eq!(opt_string_value(None), Value::Null);
        assert_eq!(opt_string_value(Some("x")), Value::string("x"));
    }

    #[test]
    fn test_empty_list_null_prior_decodes_null() {
        let empty = vec![];
        assert_eq!(opt_string_list_value(Some(&empty), &Value::Null), Value::Null);
        assert_eq!(
            opt_string_list_value(Some(&empty), &Value::string_list(Vec::<String>::new())),
            Value::string_list(Vec::<String>::new())
        );
    }
}
