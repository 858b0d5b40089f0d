//! Presence checks for create payloads.

use serde_json::{json, Value};

use super::{Record, ValidationError};

/// Return the required fields that are absent or `null` in the payload.
pub fn missing_required_fields(payload: &Record, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|field| matches!(payload.get(**field), None | Some(Value::Null)))
        .map(|field| field.to_string())
        .collect()
}

/// Fail with the list of missing fields if any required field is absent.
pub fn validate_required_fields(payload: &Record, required: &[&str]) -> Result<(), ValidationError> {
    let missing = missing_required_fields(payload, required);
    if missing.is_empty() {
        return Ok(());
    }
    Err(ValidationError::new("Missing required fields").with_details(json!({ "missing": missing })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_all_present() {
        let payload = record(json!({"username": "ana", "role": "admin"}));
        assert!(validate_required_fields(&payload, &["username", "role"]).is_ok());
    }

    #[test]
    fn test_null_counts_as_missing() {
        let payload = record(json!({"username": null, "role": "admin"}));
        assert_eq!(
            missing_required_fields(&payload, &["username", "role"]),
            vec!["username".to_string()]
        );
    }

    #[test]
    fn test_falsy_values_are_present() {
        let payload = record(json!({"guid_id": "", "flag": false}));
        assert!(validate_required_fields(&payload, &["guid_id", "flag"]).is_ok());
    }

    #[test]
    fn test_error_lists_missing_fields() {
        let err = validate_required_fields(&Record::new(), &["cd_cnpj"]).unwrap_err();
        assert_eq!(err.message, "Missing required fields");
        assert_eq!(err.details, Some(json!({"missing": ["cd_cnpj"]})));
    }
}
