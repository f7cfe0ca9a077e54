//! Session Loader
//!
//! The login flow lives outside this app and leaves `token`, `corpId` and
//! `user` in `localStorage`, either raw or JSON-encoded.

use aimlink_core::SessionContext;
use serde::Deserialize;
use serde_json::Value;

const TOKEN_KEY: &str = "token";
const CORP_KEY: &str = "corpId";
const USER_KEY: &str = "user";

#[derive(Deserialize)]
struct StoredUser {
    #[serde(default)]
    language: Option<usize>,
}

/// Read the session from `window.localStorage`; missing pieces stay `None`
pub fn load_session() -> SessionContext {
    let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
    let Some(storage) = storage else {
        log::warn!("localStorage unavailable, calling the backend without a session");
        return SessionContext::default();
    };
    let read = |key: &str| storage.get_item(key).ok().flatten();
    parse_session(read(TOKEN_KEY), read(CORP_KEY), read(USER_KEY))
}

/// Build a session from the raw stored strings
pub fn parse_session(
    token: Option<String>,
    corp_id: Option<String>,
    user: Option<String>,
) -> SessionContext {
    SessionContext {
        token: token.and_then(unquote),
        corp_id: corp_id.and_then(unquote),
        language: user
            .and_then(|raw| serde_json::from_str::<StoredUser>(&raw).ok())
            .and_then(|user| user.language),
    }
}

/// Strip JSON string encoding when present; empty values count as missing
fn unquote(raw: String) -> Option<String> {
    let value = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::String(s)) => s,
        Ok(Value::Number(n)) => n.to_string(),
        Ok(Value::Null) => return None,
        _ => raw,
    };
    Some(value).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_and_json_encoded_values() {
        let session = parse_session(
            Some("\"abc\"".into()),
            Some("42".into()),
            Some(r#"{"language":2,"name":"Lin"}"#.into()),
        );
        assert_eq!(session.token.as_deref(), Some("abc"));
        assert_eq!(session.corp_id.as_deref(), Some("42"));
        assert_eq!(session.language, Some(2));
        assert_eq!(session.region(), "en");
    }

    #[test]
    fn test_plain_token_is_kept() {
        let session = parse_session(Some("tok-1.x".into()), None, None);
        assert_eq!(session.token.as_deref(), Some("tok-1.x"));
        assert_eq!(session.corp_id, None);
        assert_eq!(session.region(), "zh_CN");
    }

    #[test]
    fn test_empty_and_broken_values_are_missing() {
        let session = parse_session(Some("".into()), Some("null".into()), Some("{oops".into()));
        assert_eq!(session, SessionContext::default());
    }
}
