//! DTOs decoding backend JSON into domain records.
//!
//! The adapter decodes into these transport DTOs first, then maps into
//! domain records in one pass. Seeded rows in the backend omit descriptive
//! fields freely, so every field except `id` defaults to empty rather than
//! failing the decode.

use serde::Deserialize;

use super::collection::RestResource;
use crate::domain::record::{
    Activity, ActivityDraft, Destination, DestinationCategory, DestinationCategoryDraft, RecordId,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDto {
    id: RecordId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image: String,
}

impl ActivityDto {
    fn into_domain(self) -> Activity {
        Activity {
            id: self.id,
            title: self.title,
            category: self.category,
            description: self.description,
            image: self.image,
        }
    }
}

impl RestResource for Activity {
    type Dto = ActivityDto;
    type Draft = ActivityDraft;

    fn from_dto(dto: Self::Dto) -> Self {
        dto.into_domain()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationDto {
    id: RecordId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image: String,
}

impl DestinationDto {
    fn into_domain(self) -> Destination {
        Destination {
            id: self.id,
            title: self.title,
            description: self.description,
            image: self.image,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationCategoryDto {
    id: RecordId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    tagline: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    destinations: Vec<DestinationDto>,
}

impl DestinationCategoryDto {
    fn into_domain(self) -> DestinationCategory {
        DestinationCategory {
            id: self.id,
            title: self.title,
            tagline: self.tagline,
            description: self.description,
            image: self.image,
            destinations: self
                .destinations
                .into_iter()
                .map(DestinationDto::into_domain)
                .collect(),
        }
    }
}

impl RestResource for DestinationCategory {
    type Dto = DestinationCategoryDto;
    type Draft = DestinationCategoryDraft;

    fn from_dto(dto: Self::Dto) -> Self {
        dto.into_domain()
    }
}
