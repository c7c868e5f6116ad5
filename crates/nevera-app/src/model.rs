// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::dates;

/// Shown in place of a missing or empty product image.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/150x150?text=No+Image";
pub const UNCATEGORIZED_LABEL: &str = "uncategorized";
/// Barcode recorded for candidates the lookup service returned without a code.
pub const UNKNOWN_BARCODE: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Active,
    Consumed,
    Discarded,
}

impl ItemStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Consumed => "consumed",
            Self::Discarded => "discarded",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "consumed" => Some(Self::Consumed),
            "discarded" => Some(Self::Discarded),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOption {
    All,
    Expired,
    Unexpired,
}

impl FilterOption {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Expired => "expired",
            Self::Unexpired => "unexpired",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "expired" => Some(Self::Expired),
            "unexpired" => Some(Self::Unexpired),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOption {
    ExpiryAscending,
    CreatedDescending,
    CreatedAscending,
    NameAscending,
}

impl SortOption {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExpiryAscending => "expiry_ascending",
            Self::CreatedDescending => "created_descending",
            Self::CreatedAscending => "created_ascending",
            Self::NameAscending => "name_ascending",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "expiry_ascending" => Some(Self::ExpiryAscending),
            "created_descending" => Some(Self::CreatedDescending),
            "created_ascending" => Some(Self::CreatedAscending),
            "name_ascending" => Some(Self::NameAscending),
            _ => None,
        }
    }
}

/// One tracked item instance as the backend returns it.
///
/// Date fields stay raw text: a record with a malformed `expiry_date` is a
/// degraded record that must survive in the dataset, so parsing happens at
/// use sites through [`crate::dates`], never at ingest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub expiry_date: String,
    pub status: ItemStatus,
    pub created_at: String,
}

impl InventoryRecord {
    pub fn display_image_url(&self) -> &str {
        match self.image_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => PLACEHOLDER_IMAGE_URL,
        }
    }

    pub fn display_category(&self) -> &str {
        match self.category.as_deref() {
            Some(category) if !category.is_empty() => category,
            _ => UNCATEGORIZED_LABEL,
        }
    }

    pub fn is_expired(&self, today: Date) -> bool {
        dates::parse_civil_date(&self.expiry_date).is_some_and(|expiry| expiry < today)
    }
}

/// A product-lookup result, prior to being committed as an inventory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCandidate {
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub categories: Option<String>,
}

impl ProductCandidate {
    /// The dedup identity key when present: a non-empty product code.
    pub fn identity_code(&self) -> Option<&str> {
        self.code.as_deref().filter(|code| !code.is_empty())
    }
}

/// Payload for registering a selected candidate into a refrigerator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub refrigerator_id: String,
    pub name: String,
    pub barcode: String,
    pub image: String,
    pub expiry_date: String,
    pub category: String,
}

impl NewItem {
    /// Builds the registration payload the way the add screen commits a
    /// candidate: missing code, image, and category take their fallbacks and
    /// an unset expiry defaults to a week out.
    pub fn from_candidate(
        candidate: &ProductCandidate,
        refrigerator_id: &str,
        expiry_date: Option<&str>,
        today: Date,
    ) -> Self {
        let expiry_date = match expiry_date {
            Some(raw) if !raw.trim().is_empty() => raw.trim().to_owned(),
            _ => dates::to_civil_text(dates::default_expiry(today)),
        };
        Self {
            refrigerator_id: refrigerator_id.to_owned(),
            name: candidate.name.clone(),
            barcode: candidate
                .identity_code()
                .unwrap_or(UNKNOWN_BARCODE)
                .to_owned(),
            image: match candidate.image.as_deref() {
                Some(image) if !image.is_empty() => image.to_owned(),
                _ => PLACEHOLDER_IMAGE_URL.to_owned(),
            },
            expiry_date,
            category: match candidate.categories.as_deref() {
                Some(category) if !category.is_empty() => category.to_owned(),
                _ => UNCATEGORIZED_LABEL.to_owned(),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.refrigerator_id.trim().is_empty() {
            bail!("refrigerator id is required");
        }
        if self.name.trim().is_empty() {
            bail!("item name is required");
        }
        if dates::parse_civil_date(&self.expiry_date).is_none() {
            bail!(
                "expiry date {:?} is not a {} date",
                self.expiry_date,
                dates::DATE_LAYOUT
            );
        }
        Ok(())
    }
}

/// Partial update for an existing record; only supplied fields change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ItemStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
}

impl ItemPatch {
    pub fn status(status: ItemStatus) -> Self {
        Self {
            status: Some(status),
            expiry_date: None,
        }
    }

    pub fn expiry(expiry_date: &str) -> Self {
        Self {
            status: None,
            expiry_date: Some(expiry_date.to_owned()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.expiry_date.is_none()
    }
}

/// User-selected view controls, passed into the engine per recomputation.
///
/// Range bounds stay raw text from the picker; an unparseable bound degrades
/// to absent inside the engine instead of failing the whole view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewParameters {
    pub search_text: String,
    pub date_range_start: Option<String>,
    pub date_range_end: Option<String>,
    pub filter: FilterOption,
    pub sort: SortOption,
}

impl Default for ViewParameters {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            date_range_start: None,
            date_range_end: None,
            filter: FilterOption::All,
            sort: SortOption::ExpiryAscending,
        }
    }
}

impl ViewParameters {
    pub fn has_date_range(&self) -> bool {
        self.date_range_start.is_some() || self.date_range_end.is_some()
    }
}
