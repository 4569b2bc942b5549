//! Record types for the static content catalogs.
//!
//! With the `typescript` feature enabled, these types can be exported to
//! TypeScript using ts-rs for consistency with the React frontend.

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// A teaching organization a user may follow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Church {
    /// Unique identifier within its catalog
    pub id: String,
    /// Display name
    pub name: String,
    /// Logo image URL
    pub logo: String,
    /// Accent color (hex)
    pub color: String,
    /// Most recent sermon title or teaching pastor label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sermon: Option<String>,
    /// Number of small groups hosted by this church
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_count: Option<u32>,
}

/// A community sub-group scoped to one church.
///
/// Joinable only while the owning church is followed; that guard lives in
/// the discovery view, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct SmallGroup {
    /// Unique identifier within the group catalog
    pub id: String,
    /// Display name
    pub name: String,
    /// Owning church id (must reference a directory church)
    pub church_id: String,
    /// When the group meets
    pub meeting_time: String,
    /// Where the group meets
    pub location: String,
    /// Focus tags, in display order
    pub focus: Vec<String>,
    /// Current member count
    pub members: u32,
    /// Optional demographic label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demographic: Option<String>,
}

/// A sermon citable as supporting context for an assistant response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Sermon {
    /// Unique identifier
    pub id: String,
    /// Sermon title
    pub title: String,
    /// Date preached (display string)
    pub date: String,
    /// Speaker name
    pub speaker: String,
    /// Name of the church where it was preached
    pub church_name: String,
    /// One-paragraph summary
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_church_serialization_skips_empty_options() {
        let church = Church {
            id: "v-decatur".to_string(),
            name: "Victory Decatur".to_string(),
            logo: "https://example.com/logo.png".to_string(),
            color: "#8B9D83".to_string(),
            last_sermon: None,
            group_count: None,
        };

        let json = serde_json::to_value(&church).unwrap();
        assert!(json.get("last_sermon").is_none());
        assert!(json.get("group_count").is_none());
    }

    #[test]
    fn test_group_round_trip() {
        let group = SmallGroup {
            id: "g-dec-1".to_string(),
            name: "Young Professionals (25-35)".to_string(),
            church_id: "v-decatur".to_string(),
            meeting_time: "Wednesdays, 7pm".to_string(),
            location: "Decatur, GA".to_string(),
            focus: vec!["Career".to_string(), "Faith".to_string()],
            members: 12,
            demographic: Some("Young Professionals".to_string()),
        };

        let json = serde_json::to_string(&group).unwrap();
        let parsed: SmallGroup = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, group);
    }
}
