use serde_json::Value;

use crate::{LlmError, Result};

/// Decode a model reply as JSON.
///
/// The reply must be a single JSON document; only surrounding whitespace is
/// ignored. Prose, markdown fences or trailing commentary are
/// [`LlmError::InvalidJson`], with no attempt to salvage an embedded object.
pub fn decode_json(text: &str) -> Result<Value> {
    serde_json::from_str(text.trim()).map_err(|source| LlmError::InvalidJson { source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_object() {
        let v = decode_json(r#"{"root_cause": "timeout", "confidence": 0.7}"#).unwrap();
        assert_eq!(v["root_cause"], "timeout");
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let v = decode_json("\n  {\"confidence\": 0.9}\n\n").unwrap();
        assert_eq!(v["confidence"], 0.9);
    }

    #[test]
    fn non_object_documents_still_decode() {
        assert!(decode_json("[1, 2]").unwrap().is_array());
        assert!(decode_json("\"text\"").unwrap().is_string());
    }

    #[test]
    fn prose_is_rejected() {
        let err = decode_json("The upstream service is overloaded.").unwrap_err();
        assert!(matches!(err, LlmError::InvalidJson { .. }));
    }

    #[test]
    fn object_wrapped_in_prose_is_rejected() {
        let reply = "Sure! Here is my analysis. {\"root_cause\": \"dns\", \"confidence\": 0.9} Hope that helps.";
        let err = decode_json(reply).unwrap_err();
        assert!(matches!(err, LlmError::InvalidJson { .. }));
    }

    #[test]
    fn fenced_object_is_rejected() {
        let err = decode_json("```json\n{\"confidence\": 0.9}\n```").unwrap_err();
        assert!(matches!(err, LlmError::InvalidJson { .. }));
    }

    #[test]
    fn empty_reply_is_rejected() {
        assert!(decode_json("   ").is_err());
    }
}
