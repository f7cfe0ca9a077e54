//! Response Envelope
//!
//! The backend wraps every payload as `{ code, msg, data }`. Several success
//! markers are in use across backend versions.

use log::warn;
use serde_json::Value;

use crate::domain::{GatewayError, GatewayResult};

const SUCCESS_MESSAGES: [&str; 2] = ["操作成功", "Success"];

fn is_success(body: &Value) -> bool {
    let code_ok = match body.get("code") {
        Some(Value::Number(n)) => n.as_i64().is_some_and(|c| c == 0 || c == 200),
        Some(Value::String(s)) => s == "0",
        _ => false,
    };
    let msg_ok = body
        .get("msg")
        .and_then(Value::as_str)
        .is_some_and(|msg| SUCCESS_MESSAGES.contains(&msg));
    code_ok || msg_ok
}

fn code_text(body: &Value) -> String {
    match body.get("code") {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => "unknown".to_string(),
    }
}

/// Unwrap a response body into its payload or a gateway error.
///
/// On success the payload is `data` when the key is present (even if null),
/// otherwise the whole body.
pub fn unwrap_envelope(body: Value) -> GatewayResult<Value> {
    if is_success(&body) {
        return Ok(match body {
            Value::Object(mut map) if map.contains_key("data") => {
                map.remove("data").unwrap_or(Value::Null)
            }
            other => other,
        });
    }

    let code = body.get("code").and_then(Value::as_i64);
    let message = body
        .get("msg")
        .and_then(Value::as_str)
        .filter(|msg| !msg.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("API Error {}", code_text(&body)));

    match code {
        Some(401) | Some(403) => {
            warn!("Authentication failed - session expired ({})", message);
            Err(GatewayError::Server(message))
        }
        Some(404) => Err(GatewayError::NotFound(message)),
        Some(400) | Some(422) => Err(GatewayError::Validation(message)),
        _ => Err(GatewayError::Server(message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_codes_unwrap_data() {
        for body in [
            json!({ "code": 0, "data": { "id": 1 } }),
            json!({ "code": 200, "data": { "id": 1 } }),
            json!({ "code": "0", "data": { "id": 1 } }),
            json!({ "code": 5001, "msg": "Success", "data": { "id": 1 } }),
            json!({ "code": 5001, "msg": "操作成功", "data": { "id": 1 } }),
        ] {
            assert_eq!(unwrap_envelope(body).unwrap(), json!({ "id": 1 }));
        }
    }

    #[test]
    fn test_success_without_data_returns_body() {
        let body = json!({ "code": 0, "msg": "ok" });
        assert_eq!(unwrap_envelope(body.clone()).unwrap(), body);
    }

    #[test]
    fn test_null_data_is_kept() {
        assert_eq!(unwrap_envelope(json!({ "code": 0, "data": null })).unwrap(), Value::Null);
    }

    #[test]
    fn test_string_200_is_not_success() {
        assert!(unwrap_envelope(json!({ "code": "200" })).is_err());
    }

    #[test]
    fn test_failure_mapping() {
        assert_eq!(
            unwrap_envelope(json!({ "code": 404, "msg": "node missing" })),
            Err(GatewayError::NotFound("node missing".to_string()))
        );
        assert_eq!(
            unwrap_envelope(json!({ "code": 400, "msg": "name required" })),
            Err(GatewayError::Validation("name required".to_string()))
        );
        assert_eq!(
            unwrap_envelope(json!({ "code": 401, "msg": "token expired" })),
            Err(GatewayError::Server("token expired".to_string()))
        );
        assert_eq!(
            unwrap_envelope(json!({ "code": 500 })),
            Err(GatewayError::Server("API Error 500".to_string()))
        );
    }
}
