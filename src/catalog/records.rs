//! Startup record types
//!
//! The data contract shared with whatever persists startups. Field names
//! follow the camelCase JSON the web client stores. Every field except
//! `id` falls back to an empty/zero value when missing, `null` or of the
//! wrong type, so a partially filled profile still loads and simply
//! scores lower.

use serde::{Deserialize, Serialize};

/// A startup profile as read from the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupRecord {
    pub id: String,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub industry: String,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub website: String,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub contact: ContactInfo,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub team_members: Vec<TeamMember>,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub projects: Vec<Project>,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub funding_stage: String,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub team_size: u32,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub founded_year: i32,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub rating: f64,
}

/// Contact details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub phone: String,
}

/// A member of the startup's team
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub role: String,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub email: String,
}

/// A showcased project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub technologies: Vec<String>,
}

/// Field deserializer that never fails: `null` and values of the wrong
/// type become the default, and numeric strings such as `"4.5"` are
/// read as numbers. A negative team size therefore loads as 0.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use tracing::debug;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(coerce(value))
    }

    fn coerce<T: Default + DeserializeOwned>(value: Value) -> T {
        if value.is_null() {
            return T::default();
        }
        if let Ok(parsed) = T::deserialize(&value) {
            return parsed;
        }
        if let Value::String(text) = &value {
            if let Ok(parsed) = serde_json::from_str::<T>(text.trim()) {
                return parsed;
            }
        }
        debug!("Coercing unexpected field value {} to default", value);
        T::default()
    }
}

impl StartupRecord {
    /// Create a record with only an id and a name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}
