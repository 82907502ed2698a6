//! Lenient field access over a decoded model reply.
//!
//! Models are asked for specific keys but routinely omit them or use the
//! wrong JSON type. Every accessor here returns `None` for anything unusable
//! so the caller can fall back, and `expect_*` variants log the gap.

use serde_json::{Map, Value};

use crate::error::{Result, SentinelError};
use crate::pipeline::Step;

#[derive(Debug, Clone)]
pub(crate) struct ModelReply {
    step: Step,
    fields: Map<String, Value>,
}

impl ModelReply {
    /// Accept only JSON objects; anything else is a typed shape error.
    pub fn from_value(step: Step, value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { step, fields }),
            other => Err(SentinelError::UnexpectedShape {
                step,
                found: json_kind(&other),
            }),
        }
    }

    pub fn as_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    /// Non-blank string field.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    pub fn expect_text(&self, key: &str) -> Option<String> {
        let value = self.text(key);
        if value.is_none() {
            self.warn_missing(key);
        }
        value
    }

    /// A finite number, or a string that parses as one.
    pub fn confidence(&self) -> Option<f64> {
        let raw = match self.fields.get("confidence")? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        raw.is_finite().then_some(raw)
    }

    pub fn expect_confidence(&self) -> Option<f64> {
        let value = self.confidence();
        if value.is_none() {
            self.warn_missing("confidence");
        }
        value
    }

    /// A list of strings. Scalars inside the list are stringified, nested
    /// values are dropped, and a lone string becomes a one-item list.
    pub fn string_list(&self, key: &str) -> Option<Vec<String>> {
        match self.fields.get(key)? {
            Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s.clone()),
                        Value::Number(n) => Some(n.to_string()),
                        Value::Bool(b) => Some(b.to_string()),
                        _ => None,
                    })
                    .collect(),
            ),
            Value::String(s) if !s.trim().is_empty() => Some(vec![s.clone()]),
            _ => None,
        }
    }

    pub fn expect_string_list(&self, key: &str) -> Option<Vec<String>> {
        let value = self.string_list(key);
        if value.is_none() {
            self.warn_missing(key);
        }
        value
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    fn warn_missing(&self, key: &str) {
        tracing::warn!(
            step = %self.step,
            key,
            present = self.fields.contains_key(key),
            "model reply missing usable field, substituting default"
        );
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reply(value: Value) -> ModelReply {
        ModelReply::from_value(Step::Diagnose, value).unwrap()
    }

    #[test]
    fn non_object_is_rejected_with_kind() {
        let err = ModelReply::from_value(Step::PlanFix, json!([1, 2])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "plan-fix step returned an array, expected a JSON object"
        );
    }

    #[test]
    fn text_ignores_blank_and_non_strings() {
        let r = reply(json!({"a": "x", "b": "  ", "c": 3, "d": null}));
        assert_eq!(r.text("a").as_deref(), Some("x"));
        assert_eq!(r.text("b"), None);
        assert_eq!(r.text("c"), None);
        assert_eq!(r.text("d"), None);
        assert_eq!(r.text("missing"), None);
    }

    #[test]
    fn confidence_coerces_numeric_strings() {
        assert_eq!(reply(json!({"confidence": 0.42})).confidence(), Some(0.42));
        assert_eq!(reply(json!({"confidence": 1})).confidence(), Some(1.0));
        assert_eq!(reply(json!({"confidence": " 0.85 "})).confidence(), Some(0.85));
    }

    #[test]
    fn confidence_rejects_words_and_non_finite() {
        assert_eq!(reply(json!({"confidence": "high"})).confidence(), None);
        assert_eq!(reply(json!({"confidence": "NaN"})).confidence(), None);
        assert_eq!(reply(json!({"confidence": "inf"})).confidence(), None);
        assert_eq!(reply(json!({"confidence": true})).confidence(), None);
        assert_eq!(reply(json!({})).confidence(), None);
    }

    #[test]
    fn string_list_normalizes_items() {
        let r = reply(json!({
            "steps": ["restart", 2, false, {"nested": true}, null],
            "single": "roll back",
            "bad": 5
        }));
        assert_eq!(
            r.string_list("steps").unwrap(),
            vec!["restart", "2", "false"]
        );
        assert_eq!(r.string_list("single").unwrap(), vec!["roll back"]);
        assert_eq!(r.string_list("bad"), None);
    }

    #[test]
    fn empty_list_is_still_a_list() {
        let r = reply(json!({"next_steps": []}));
        assert_eq!(r.string_list("next_steps"), Some(vec![]));
    }
}
