use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// A project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project ID
    pub id: String,
    /// Project name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Lifecycle status (e.g. `active`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// ID of the owning user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
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

/// Payload for creating a project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Builder, Default)]
#[builder(setter(into, strip_option), default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreateParams {
    /// Project name
    #[builder(default)]
    pub name: String,
    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Initial status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Owner, when creating on behalf of another user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

/// Payload for updating a project; unset fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdateParams {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn project_reads_camel_case() {
        let p: Project = serde_json::from_value(json!({
            "id": "p1",
            "name": "Sample Project",
            "ownerId": "u1",
            "status": "active"
        }))
        .unwrap();
        assert_eq!(p.owner_id.as_deref(), Some("u1"));
        assert!(p.extra.is_empty());
    }

    #[test]
    fn unparseable_created_at_is_dropped() {
        let p: Project = serde_json::from_value(json!({
            "id": "p1",
            "createdAt": "01/06/2024"
        }))
        .unwrap();
        assert_eq!(p.id, "p1");
        assert!(p.created_at.is_none());
    }

    #[test]
    fn create_params_serialize_camel_case() {
        let p = ProjectCreateParamsBuilder::default()
            .name("Sample Project")
            .owner_id("u1")
            .build()
            .unwrap();
        assert_eq!(
            serde_json::to_value(p).unwrap(),
            json!({"name": "Sample Project", "ownerId": "u1"})
        );
    }
}
