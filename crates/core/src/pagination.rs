//! Opaque pagination cursors.
//!
//! A cursor is the store's continuation key serialized to JSON and encoded
//! as unpadded base64url, safe to pass back in a query string. Decoding never
//! fails: anything that is not a valid cursor means "start from the top".

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::storage::ContinuationKey;

/// Default page size when the caller gives none (or an unparsable one).
pub const DEFAULT_PAGE_LIMIT: u32 = 20;
/// Largest page a caller can ask for.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Encode a continuation key as an opaque cursor.
pub fn encode_cursor(key: Option<&ContinuationKey>) -> Option<String> {
    let key = key?;
    let json = serde_json::to_vec(key).ok()?;
    Some(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a cursor back into the continuation key it was produced from.
pub fn decode_cursor(token: Option<&str>) -> Option<ContinuationKey> {
    let token = token.filter(|t| !t.is_empty())?;
    let bytes = URL_SAFE_NO_PAD.decode(token.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Parse a raw `limit` query value and clamp it to `[1, MAX_PAGE_LIMIT]`.
pub fn parse_limit(raw: Option<&str>) -> u32 {
    match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(limit) => limit.clamp(1, MAX_PAGE_LIMIT as i64) as u32,
        None => DEFAULT_PAGE_LIMIT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{build_key, EntityType, Record};
    use serde_json::json;

    #[test]
    fn test_round_trip() {
        let key = ContinuationKey::from(&build_key(EntityType::Job, "job-42"));
        let token = encode_cursor(Some(&key)).unwrap();
        assert_eq!(decode_cursor(Some(&token)), Some(key));
    }

    #[test]
    fn test_token_is_url_safe() {
        let attributes: Record = json!({"pk": "USER#??>>~~", "sk": "ENTITY"})
            .as_object()
            .cloned()
            .unwrap();
        let token = encode_cursor(Some(&ContinuationKey::new(attributes))).unwrap();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_absent_in_absent_out() {
        assert_eq!(encode_cursor(None), None);
        assert_eq!(decode_cursor(None), None);
        assert_eq!(decode_cursor(Some("")), None);
    }

    #[test]
    fn test_malformed_tokens_decode_to_none() {
        assert_eq!(decode_cursor(Some("not base64 at all!")), None);
        // valid base64url, not JSON
        assert_eq!(decode_cursor(Some("aGVsbG8")), None);
        // valid JSON, not an object
        assert_eq!(decode_cursor(Some(&URL_SAFE_NO_PAD.encode("[1,2]"))), None);
    }

    #[test]
    fn test_padded_token_is_accepted() {
        let key = ContinuationKey::from(&build_key(EntityType::User, "u"));
        let token = format!("{}==", encode_cursor(Some(&key)).unwrap());
        assert_eq!(decode_cursor(Some(&token)), Some(key));
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(None), 20);
        assert_eq!(parse_limit(Some("abc")), 20);
        assert_eq!(parse_limit(Some("0")), 1);
        assert_eq!(parse_limit(Some("-5")), 1);
        assert_eq!(parse_limit(Some("50")), 50);
        assert_eq!(parse_limit(Some("1000")), 100);
    }
}
