use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// A user account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User ID
    pub id: String,
    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Role within the organisation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Creation timestamp
    #[serde(
        default,
        deserialize_with = "super::common::lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp
    #[serde(
        default,
        deserialize_with = "super::common::lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    /// Fields not modelled above
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Payload for creating a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Builder, Default)]
#[builder(setter(into, strip_option), default)]
pub struct UserCreateParams {
    /// Email address
    #[builder(default)]
    pub email: String,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Role within the organisation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Initial password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Payload for updating a user; unset fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserUpdateParams {
    /// New email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New role
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_round_trips_unknown_fields() {
        let v = json!({
            "id": "u1",
            "email": "a@b.com",
            "createdAt": "2024-06-01T12:00:00Z",
            "team": "core"
        });
        let user: User = serde_json::from_value(v.clone()).unwrap();
        assert_eq!(user.id, "u1");
        assert!(user.created_at.is_some());
        assert_eq!(user.extra["team"], "core");
        assert_eq!(serde_json::to_value(&user).unwrap(), v);
    }

    #[test]
    fn odd_timestamps_do_not_reject_user() {
        let user: User = serde_json::from_value(json!({
            "id": "u1",
            "createdAt": 1_717_243_200_000_i64,
            "updatedAt": "yesterday"
        }))
        .unwrap();
        assert_eq!(
            user.created_at.map(|t| t.timestamp_millis()),
            Some(1_717_243_200_000)
        );
        assert!(user.updated_at.is_none());
    }

    #[test]
    fn create_params_builder() {
        let p = UserCreateParamsBuilder::default()
            .email("john.doe@example.com")
            .name("John Doe")
            .build()
            .unwrap();
        assert_eq!(
            serde_json::to_value(p).unwrap(),
            json!({"email": "john.doe@example.com", "name": "John Doe"})
        );
    }

    #[test]
    fn update_params_skip_unset() {
        let p = UserUpdateParams {
            role: Some("admin".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(p).unwrap(), json!({"role": "admin"}));
    }
}
