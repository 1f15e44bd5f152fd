use crate::error::{DirectoryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

/// Immutable view of the collection handed to subscribers and readers.
pub type Snapshot = Arc<[School]>;

/// Opaque school identifier.
///
/// New ids are UUID v4 strings, but ids read back from storage are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchoolId(String);

impl SchoolId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SchoolId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SchoolId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for SchoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Private,
    Lyceum,
    Gymnasium,
    International,
    #[serde(rename = "General Education")]
    GeneralEducation,
    #[serde(rename = "For Special Children")]
    ForSpecialChildren,
}

impl Category {
    /// Every category, in the order the pickers list them.
    pub const ALL: [Category; 6] = [
        Category::Private,
        Category::Lyceum,
        Category::Gymnasium,
        Category::International,
        Category::GeneralEducation,
        Category::ForSpecialChildren,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Private => "Private",
            Category::Lyceum => "Lyceum",
            Category::Gymnasium => "Gymnasium",
            Category::International => "International",
            Category::GeneralEducation => "General Education",
            Category::ForSpecialChildren => "For Special Children",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|cat| cat.label() == s)
            .ok_or_else(|| DirectoryError::UnknownCategory(s.to_string()))
    }
}

/// A WGS84 point. Only [`Coordinates::new`] builds one, and stored values
/// go through it too, so a held value is always finite and in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinates {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = DirectoryError;

    fn try_from(raw: RawCoordinates) -> Result<Self> {
        Coordinates::new(raw.latitude, raw.longitude)
    }
}

impl Coordinates {
    /// Build a coordinate pair, rejecting values outside the WGS84 ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DirectoryError::Validation(format!(
                "latitude {} is outside [-90, 90]",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DirectoryError::Validation(format!(
                "longitude {} is outside [-180, 180]",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub id: SchoolId,
    pub name: String,
    pub category: Category,
    pub location: Coordinates,
    // Some("") means "not resolved yet", which is not the same as None.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl School {
    pub fn new(name: impl Into<String>, category: Category, location: Coordinates) -> Self {
        Self::with_id(SchoolId::generate(), name, category, location)
    }

    pub fn with_id(
        id: impl Into<SchoolId>,
        name: impl Into<String>,
        category: Category,
        location: Coordinates,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            location,
            address: None,
            photo_uri: None,
            website: None,
            phone: None,
        }
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn photo_uri(mut self, uri: impl Into<String>) -> Self {
        self.photo_uri = Some(uri.into());
        self
    }

    pub fn website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}
