//! Profile store wire format and sync events.
//!
//! The store keeps owned themes as a comma-separated `themes` string and the
//! selection in `themes_s`; newer payloads use camelCase names. Both are
//! accepted, missing fields read as zero/default, and numbers may arrive as
//! strings.

use crate::economy::EconomyProfile;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use thiserror::Error;

/// Why a fetch or push did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("unreadable response: {0}")]
    Decode(String),
    #[error("profile not found: {0}")]
    NotFound(String),
    #[error("server rejected request: {0}")]
    Rejected(String),
    #[error("sync worker is not running")]
    Unavailable,
}

/// A profile as exchanged with the remote store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub coins: u64,
    /// Comma-separated owned theme ids
    #[serde(default, alias = "ownedThemeIds", deserialize_with = "theme_list")]
    pub themes: String,
    #[serde(default, alias = "selectedThemeId", deserialize_with = "lenient_string")]
    pub themes_s: String,
    #[serde(
        default,
        rename = "highScore",
        alias = "high_score",
        deserialize_with = "lenient_u64"
    )]
    pub high_score: u64,
}

impl ProfileRecord {
    pub fn from_profile(username: &str, profile: &EconomyProfile) -> Self {
        Self {
            username: username.to_string(),
            coins: profile.coins,
            themes: profile
                .owned_theme_ids
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(","),
            themes_s: profile.selected_theme_id.clone(),
            high_score: u64::from(profile.high_score),
        }
    }

    /// Convert to a local profile, repairing ownership invariants.
    pub fn into_profile(self) -> EconomyProfile {
        let owned: BTreeSet<String> = self
            .themes
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();
        EconomyProfile {
            coins: self.coins,
            high_score: u32::try_from(self.high_score).unwrap_or(u32::MAX),
            owned_theme_ids: owned,
            selected_theme_id: self.themes_s,
        }
        .normalized()
    }
}

/// Decode a profile fetch response. Accepts the `{"status", "user"}`
/// envelope as well as a bare record.
pub fn decode_profile_response(body: &str) -> Result<ProfileRecord, SyncError> {
    let value: Value = serde_json::from_str(body).map_err(|e| SyncError::Decode(e.to_string()))?;

    if let Some(message) = error_message(&value) {
        return Err(if message.to_lowercase().contains("not found") {
            SyncError::NotFound(message)
        } else {
            SyncError::Rejected(message)
        });
    }

    let record = match value.get("user") {
        Some(user) => user.clone(),
        None => value,
    };
    serde_json::from_value(record).map_err(|e| SyncError::Decode(e.to_string()))
}

/// Decode a push acknowledgement (`{"status": "success"}`).
pub fn decode_push_response(body: &str) -> Result<(), SyncError> {
    if body.trim().is_empty() {
        return Ok(());
    }
    let value: Value = serde_json::from_str(body).map_err(|e| SyncError::Decode(e.to_string()))?;
    match error_message(&value) {
        Some(message) => Err(SyncError::Rejected(message)),
        None => Ok(()),
    }
}

fn error_message(value: &Value) -> Option<String> {
    if value.get("status").and_then(Value::as_str) != Some("error") {
        return None;
    }
    Some(
        value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string(),
    )
}

/// Completion of a background sync request, delivered as a later event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    Fetched {
        user: String,
        result: Result<EconomyProfile, SyncError>,
    },
    Pushed {
        user: String,
        coins: u64,
        result: Result<(), SyncError>,
    },
}

fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

fn theme_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(","),
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_legacy_envelope() {
        let body = r#"{"status":"success","user":{"id":4,"username":"kiwi","email":"k@x","coins":"42","themes":"default,dark","themes_s":"dark"}}"#;
        let record = decode_profile_response(body).unwrap();
        assert_eq!(record.username, "kiwi");
        assert_eq!(record.coins, 42);

        let profile = record.into_profile();
        assert!(profile.owns("dark"));
        assert_eq!(profile.selected_theme_id, "dark");
    }

    #[test]
    fn test_decode_camel_case_record() {
        let body = r#"{"username":"kiwi","coins":7,"ownedThemeIds":["default","royal"],"selectedThemeId":"royal","highScore":120}"#;
        let profile = decode_profile_response(body).unwrap().into_profile();
        assert_eq!(profile.coins, 7);
        assert_eq!(profile.high_score, 120);
        assert!(profile.owns("royal"));
        assert_eq!(profile.selected_theme_id, "royal");
    }

    #[test]
    fn test_missing_fields_default() {
        let profile = decode_profile_response(r#"{"username":"kiwi"}"#)
            .unwrap()
            .into_profile();
        assert_eq!(profile, EconomyProfile::default());
    }

    #[test]
    fn test_null_fields_default() {
        let body = r#"{"username":"kiwi","coins":null,"themes":null,"themes_s":null}"#;
        let profile = decode_profile_response(body).unwrap().into_profile();
        assert_eq!(profile.coins, 0);
        assert!(profile.owns("default"));
    }

    #[test]
    fn test_selection_of_unowned_theme_repaired() {
        let body = r#"{"username":"kiwi","themes":"default","themes_s":"royal"}"#;
        let profile = decode_profile_response(body).unwrap().into_profile();
        assert_eq!(profile.selected_theme_id, "default");
    }

    #[test]
    fn test_error_envelopes() {
        assert_eq!(
            decode_profile_response(r#"{"status":"error","message":"User not found"}"#),
            Err(SyncError::NotFound("User not found".to_string()))
        );
        assert!(matches!(
            decode_profile_response(r#"{"status":"error","message":"DB prepare error"}"#),
            Err(SyncError::Rejected(_))
        ));
        assert!(matches!(
            decode_profile_response("<html>"),
            Err(SyncError::Decode(_))
        ));
    }

    #[test]
    fn test_record_from_profile_uses_legacy_names() {
        let mut profile = EconomyProfile::default();
        profile.coins = 12;
        profile.owned_theme_ids.insert("dark".to_string());
        profile.selected_theme_id = "dark".to_string();

        let json = serde_json::to_value(ProfileRecord::from_profile("kiwi", &profile)).unwrap();
        assert_eq!(json["username"], "kiwi");
        assert_eq!(json["coins"], 12);
        assert_eq!(json["themes"], "dark,default");
        assert_eq!(json["themes_s"], "dark");
        assert_eq!(json["highScore"], 0);
    }

    #[test]
    fn test_push_response() {
        assert!(decode_push_response(r#"{"status":"success"}"#).is_ok());
        assert!(decode_push_response("").is_ok());
        assert_eq!(
            decode_push_response(r#"{"status":"error","message":"Invalid data"}"#),
            Err(SyncError::Rejected("Invalid data".to_string()))
        );
    }
}
