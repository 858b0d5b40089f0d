//! Postal code (CEP) helpers for the ViaCEP lookup proxy.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors of a postal code lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ZipError {
    #[error("CEP inválido. Utilize 8 dígitos, com ou sem hífen.")]
    Invalid { zip: String },
    #[error("CEP {zip} não encontrado.")]
    NotFound { zip: String },
    #[error("{0}")]
    External(String),
}

/// State and city resolved from a postal code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub state: String,
    pub city: String,
}

/// Strip everything but ASCII digits.
pub fn sanitize_zip(zip: &str) -> String {
    zip.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Check the `NNNNN-NNN` / `NNNNNNNN` shape and return the 8 digits.
pub fn validate_zip(zip: &str) -> Result<String, ZipError> {
    let bytes = zip.as_bytes();
    let well_formed = match bytes.len() {
        8 => bytes.iter().all(u8::is_ascii_digit),
        9 => {
            bytes[5] == b'-'
                && bytes[..5].iter().all(u8::is_ascii_digit)
                && bytes[6..].iter().all(u8::is_ascii_digit)
        }
        _ => false,
    };

    if !well_formed {
        return Err(ZipError::Invalid {
            zip: zip.to_string(),
        });
    }
    Ok(sanitize_zip(zip))
}

/// Interpret a ViaCEP JSON body for the given (sanitized) postal code.
pub fn parse_viacep_response(zip: &str, body: &Value) -> Result<Location, ZipError> {
    if is_truthy(body.get("erro")) {
        return Err(ZipError::NotFound {
            zip: zip.to_string(),
        });
    }

    let field = |name: &str| {
        body.get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    match (field("uf"), field("localidade")) {
        (Some(state), Some(city)) => Ok(Location { state, city }),
        _ => Err(ZipError::External(
            "Resposta inesperada do serviço de CEP.".to_string(),
        )),
    }
}

/// Maps a [`ZipError`] to an HTTP status code.
pub fn zip_error_to_status_code(error: &ZipError) -> u16 {
    match error {
        ZipError::Invalid { .. } => 400,
        ZipError::NotFound { .. } => 404,
        ZipError::External(_) => 502,
    }
}

// ViaCEP has answered both `"erro": true` and `"erro": "true"`.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_accepts_both_shapes() {
        assert_eq!(validate_zip("01001000").unwrap(), "01001000");
        assert_eq!(validate_zip("01001-000").unwrap(), "01001000");
    }

    #[test]
    fn test_validate_rejects_bad_shapes() {
        for zip in ["0100100", "010010000", "0100-1000", "01001_000", "abcdefgh", ""] {
            assert_eq!(
                validate_zip(zip),
                Err(ZipError::Invalid {
                    zip: zip.to_string()
                }),
                "{zip}"
            );
        }
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_zip("01.001-000"), "01001000");
    }

    #[test]
    fn test_parse_success() {
        let body = json!({"cep": "01001-000", "uf": "SP", "localidade": "São Paulo"});
        assert_eq!(
            parse_viacep_response("01001000", &body).unwrap(),
            Location {
                state: "SP".to_string(),
                city: "São Paulo".to_string()
            }
        );
    }

    #[test]
    fn test_parse_erro_flag() {
        for body in [json!({"erro": true}), json!({"erro": "true"})] {
            assert_eq!(
                parse_viacep_response("99999999", &body),
                Err(ZipError::NotFound {
                    zip: "99999999".to_string()
                })
            );
        }
    }

    #[test]
    fn test_parse_incomplete_body() {
        let body = json!({"uf": "SP"});
        assert!(matches!(
            parse_viacep_response("01001000", &body),
            Err(ZipError::External(_))
        ));
    }

    #[test]
    fn test_status_codes() {
        let invalid = ZipError::Invalid { zip: "1".to_string() };
        assert_eq!(zip_error_to_status_code(&invalid), 400);
        let missing = ZipError::NotFound { zip: "1".to_string() };
        assert_eq!(zip_error_to_status_code(&missing), 404);
        assert_eq!(zip_error_to_status_code(&ZipError::External("x".into())), 502);
    }

    #[test]
    fn test_not_found_message() {
        let error = ZipError::NotFound {
            zip: "01001000".to_string(),
        };
        assert_eq!(error.to_string(), "CEP 01001000 não encontrado.");
    }
}
