//! Catalogue records served by the travel backend.
//!
//! Two collections share one controller: bookable activities and destination
//! groupings. Both expose the [`CatalogueRecord`] surface the list controller
//! and search module operate on, so neither needs to know which collection it
//! is driving.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};

/// Identifier attached to every catalogue record.
///
/// The backend is inconsistent about identifier types: seeded rows carry
/// integers while editor-created rows carry strings. Both decode into the
/// same opaque string form, and the string form is what goes back into URL
/// segments.
///
/// # Examples
///
/// ```
/// use client::domain::record::RecordId;
///
/// let seeded: RecordId = serde_json::from_str("7").unwrap();
/// let created: RecordId = serde_json::from_str("\"7\"").unwrap();
/// assert_eq!(seeded, created);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap a raw identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// String form of the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RecordIdVisitor)
    }
}

struct RecordIdVisitor;

impl de::Visitor<'_> for RecordIdVisitor {
    type Value = RecordId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or integer record identifier")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(RecordId::from(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(RecordId::from(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(RecordId(value.to_string()))
    }
}

/// Behaviour shared by every record the list controller can manage.
pub trait CatalogueRecord: Clone + Send + Sync + 'static {
    /// Stable identifier for the record.
    fn id(&self) -> &RecordId;

    /// Display title searched and shown in lists.
    fn title(&self) -> &str;

    /// Grouping label searched alongside the title; empty for collections
    /// without one.
    fn category(&self) -> &str {
        ""
    }
}

/// A bookable activity shown on the activities page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Backend identifier.
    pub id: RecordId,
    /// Display title.
    pub title: String,
    /// Grouping label such as `Water Sports`.
    pub category: String,
    /// Marketing copy shown on the detail card.
    pub description: String,
    /// Thumbnail URL.
    pub image: String,
}

impl CatalogueRecord for Activity {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn category(&self) -> &str {
        &self.category
    }
}

/// Form payload submitted when creating or updating an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDraft {
    /// Display title.
    pub title: String,
    /// Grouping label.
    pub category: String,
    /// Marketing copy.
    pub description: String,
    /// Thumbnail URL.
    pub image: String,
}

/// A destination nested inside a [`DestinationCategory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    /// Backend identifier.
    pub id: RecordId,
    /// Display title.
    pub title: String,
    /// Marketing copy.
    pub description: String,
    /// Thumbnail URL.
    pub image: String,
}

/// A destination grouping shown on the destinations page.
///
/// Categories have no grouping label of their own, so searching them only
/// consults the title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationCategory {
    /// Backend identifier.
    pub id: RecordId,
    /// Display title.
    pub title: String,
    /// Strapline rendered under the title.
    pub tagline: String,
    /// Marketing copy.
    pub description: String,
    /// Banner URL.
    pub image: String,
    /// Destinations grouped under this category.
    pub destinations: Vec<Destination>,
}

impl DestinationCategory {
    /// Number of destinations grouped under this category.
    #[must_use]
    pub fn destination_count(&self) -> usize {
        self.destinations.len()
    }
}

impl CatalogueRecord for DestinationCategory {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }
}

/// Form payload submitted when creating or updating a destination category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationCategoryDraft {
    /// Display title.
    pub title: String,
    /// Strapline rendered under the title.
    pub tagline: String,
    /// Marketing copy.
    pub description: String,
    /// Banner URL.
    pub image: String,
    /// Destinations grouped under the category.
    pub destinations: Vec<Destination>,
}
