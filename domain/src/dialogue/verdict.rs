//! Structured turn output validation.
//!
//! Every agent turn must be a single JSON object with four fields:
//!
//! | Field | Type |
//! |-------|------|
//! | `reply_zh_tw` | string ("Rationale: ..." then "Conclusion: ...") |
//! | `satisfaction` | integer 0-100 (numeric strings are accepted) |
//! | `key_points` | list of strings |
//! | `needs_from_other` | string |
//!
//! [`validate_turn_output`] is pure: it either returns a [`TurnVerdict`] or a
//! [`ValidationError`] describing the first violation found.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const REPLY_FIELD: &str = "reply_zh_tw";
pub const SATISFACTION_FIELD: &str = "satisfaction";
pub const KEY_POINTS_FIELD: &str = "key_points";
pub const NEEDS_FIELD: &str = "needs_from_other";

/// Required fields, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 4] = [REPLY_FIELD, SATISFACTION_FIELD, KEY_POINTS_FIELD, NEEDS_FIELD];

/// Why a turn's output was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("JSON is not an object")]
    NotAnObject,

    #[error("missing key: {0}")]
    MissingField(&'static str),

    #[error("{0} must be a string")]
    NotText(&'static str),

    #[error("key_points must be a list of strings")]
    KeyPointsNotTextList,

    #[error("satisfaction must be an integer 0-100")]
    SatisfactionNotInteger,

    #[error("satisfaction out of range: {0}")]
    SatisfactionOutOfRange(i64),
}

/// A validated turn (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnVerdict {
    /// Natural-language reply, "Rationale: ..." followed by "Conclusion: ..."
    #[serde(rename = "reply_zh_tw")]
    pub reply: String,
    /// How satisfied the agent is with the current joint position (0-100)
    pub satisfaction: u8,
    /// Key points raised this turn, in order
    pub key_points: Vec<String>,
    /// What the agent wants the other side to answer or clarify next
    pub needs_from_other: String,
}

/// Validate raw model output against the turn schema.
///
/// Satisfaction is coerced to an integer: JSON integers pass through,
/// fractional numbers are truncated toward zero, and strings are trimmed and
/// parsed. Anything else, or a value outside 0-100, is rejected rather than
/// clamped.
pub fn validate_turn_output(text: &str) -> Result<TurnVerdict, ValidationError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ValidationError::InvalidJson(e.to_string()))?;

    let Value::Object(map) = value else {
        return Err(ValidationError::NotAnObject);
    };

    for field in REQUIRED_FIELDS {
        if !map.contains_key(field) {
            return Err(ValidationError::MissingField(field));
        }
    }

    let reply = map[REPLY_FIELD]
        .as_str()
        .ok_or(ValidationError::NotText(REPLY_FIELD))?
        .to_string();
    let needs_from_other = map[NEEDS_FIELD]
        .as_str()
        .ok_or(ValidationError::NotText(NEEDS_FIELD))?
        .to_string();

    let key_points = match &map[KEY_POINTS_FIELD] {
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .ok_or(ValidationError::KeyPointsNotTextList)?,
        _ => return Err(ValidationError::KeyPointsNotTextList),
    };

    let satisfaction = coerce_satisfaction(&map[SATISFACTION_FIELD])?;

    Ok(TurnVerdict {
        reply,
        satisfaction,
        key_points,
        needs_from_other,
    })
}

fn coerce_satisfaction(value: &Value) -> Result<u8, ValidationError> {
    let n = match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else if let Some(f) = n.as_f64() {
                let truncated = f.trunc();
                if !(0.0..=100.0).contains(&truncated) {
                    return Err(ValidationError::SatisfactionOutOfRange(truncated as i64));
                }
                truncated as i64
            } else {
                // u64 beyond i64::MAX
                return Err(ValidationError::SatisfactionOutOfRange(i64::MAX));
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::SatisfactionNotInteger)?,
        _ => return Err(ValidationError::SatisfactionNotInteger),
    };

    u8::try_from(n)
        .ok()
        .filter(|v| *v <= 100)
        .ok_or(ValidationError::SatisfactionOutOfRange(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(satisfaction: Value) -> String {
        json!({
            "reply_zh_tw": "理由摘要：…… 結論：……",
            "satisfaction": satisfaction,
            "key_points": ["a", "b"],
            "needs_from_other": "n",
        })
        .to_string()
    }

    #[test]
    fn test_accepts_boundary_scores() {
        assert_eq!(validate_turn_output(&payload(json!(0))).unwrap().satisfaction, 0);
        assert_eq!(validate_turn_output(&payload(json!(100))).unwrap().satisfaction, 100);
    }

    #[test]
    fn test_rejects_out_of_range_scores() {
        assert_eq!(
            validate_turn_output(&payload(json!(-1))),
            Err(ValidationError::SatisfactionOutOfRange(-1))
        );
        assert_eq!(
            validate_turn_output(&payload(json!(101))),
            Err(ValidationError::SatisfactionOutOfRange(101))
        );
        assert!(validate_turn_output(&payload(json!("101"))).is_err());
    }

    #[test]
    fn test_string_score_is_coerced() {
        let text = r#"{"reply_zh_tw":"r","satisfaction":"95","key_points":["a","b"],"needs_from_other":"n"}"#;
        let verdict = validate_turn_output(text).unwrap();
        assert_eq!(verdict.satisfaction, 95);
        assert_eq!(verdict.reply, "r");
        assert_eq!(verdict.key_points, vec!["a", "b"]);
        assert_eq!(verdict.needs_from_other, "n");
    }

    #[test]
    fn test_fractional_score_truncates() {
        assert_eq!(validate_turn_output(&payload(json!(95.7))).unwrap().satisfaction, 95);
    }

    #[test]
    fn test_non_integer_scores_rejected() {
        for bad in [json!("high"), json!("95.5"), json!(null), json!([95]), json!(true)] {
            assert_eq!(
                validate_turn_output(&payload(bad)),
                Err(ValidationError::SatisfactionNotInteger)
            );
        }
    }

    #[test]
    fn test_missing_field_is_named() {
        for field in REQUIRED_FIELDS {
            let mut value: Value = serde_json::from_str(&payload(json!(50))).unwrap();
            value.as_object_mut().unwrap().remove(field);
            let err = validate_turn_output(&value.to_string()).unwrap_err();
            assert_eq!(err, ValidationError::MissingField(field));
            assert!(err.to_string().contains(field));
        }
    }

    #[test]
    fn test_wrong_shapes_rejected() {
        assert!(matches!(
            validate_turn_output("not json"),
            Err(ValidationError::InvalidJson(_))
        ));
        assert_eq!(validate_turn_output("[1, 2]"), Err(ValidationError::NotAnObject));

        let reply_not_text = json!({
            "reply_zh_tw": 1, "satisfaction": 1, "key_points": [], "needs_from_other": ""
        });
        assert_eq!(
            validate_turn_output(&reply_not_text.to_string()),
            Err(ValidationError::NotText(REPLY_FIELD))
        );

        let needs_not_text = json!({
            "reply_zh_tw": "r", "satisfaction": 1, "key_points": [], "needs_from_other": null
        });
        assert_eq!(
            validate_turn_output(&needs_not_text.to_string()),
            Err(ValidationError::NotText(NEEDS_FIELD))
        );

        let points_mixed = json!({
            "reply_zh_tw": "r", "satisfaction": 1, "key_points": ["ok", 2], "needs_from_other": ""
        });
        assert_eq!(
            validate_turn_output(&points_mixed.to_string()),
            Err(ValidationError::KeyPointsNotTextList)
        );
    }

    #[test]
    fn test_revalidating_serialized_verdict_is_identical() {
        let first = validate_turn_output(&payload(json!("42"))).unwrap();
        let reserialized = serde_json::to_string(&first).unwrap();
        let second = validate_turn_output(&reserialized).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let text = json!({
            "reply_zh_tw": "r", "satisfaction": 10, "key_points": [],
            "needs_from_other": "", "mood": "calm"
        });
        assert!(validate_turn_output(&text.to_string()).is_ok());
    }
}
