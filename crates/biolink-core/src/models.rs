//! Data models for biolink
//!
//! Defines the two persisted documents: the ordered link collection
//! (a sequence of [`LinkItem`]) and the page [`Settings`].
//! Field names match the JSON files on disk.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Image shown on the public page when no profile image is configured
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// One entry in the link list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkItem {
    /// Unique identifier, generated by the client at creation
    pub id: String,
    /// Display text
    pub title: String,
    /// Destination URL
    pub url: String,
    /// Hidden links are kept in the collection but not rendered publicly
    #[serde(default)]
    pub hidden: bool,
}

impl LinkItem {
    /// Create a new visible link with a fresh UUID v4 id
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title, url)
    }

    /// Create a link with a specific ID
    pub fn with_id(id: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            hidden: false,
        }
    }

    /// Merge a partial update into this link, leaving absent fields untouched
    pub fn apply(&mut self, patch: &LinkPatch) {
        if let Some(ref title) = patch.title {
            self.title = title.clone();
        }
        if let Some(ref url) = patch.url {
            self.url = url.clone();
        }
        if let Some(hidden) = patch.hidden {
            self.hidden = hidden;
        }
    }

    /// Names of required fields that are empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.id.trim().is_empty() {
            missing.push("id");
        }
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.url.trim().is_empty() {
            missing.push("url");
        }
        missing
    }
}

/// Partial update for a link
///
/// Only the fields that are present are applied. An `id` in the body is
/// ignored, so an update can never change which item it targets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

impl LinkPatch {
    /// Patch that only sets the visibility flag
    pub fn hidden(hidden: bool) -> Self {
        Self {
            hidden: Some(hidden),
            ..Self::default()
        }
    }

    /// Patch carrying only the fields where `edited` differs from `original`
    pub fn diff(original: &LinkItem, edited: &LinkItem) -> Self {
        Self {
            title: (edited.title != original.title).then(|| edited.title.clone()),
            url: (edited.url != original.url).then(|| edited.url.clone()),
            hidden: (edited.hidden != original.hidden).then_some(edited.hidden),
        }
    }

    /// True when the patch carries no fields
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.hidden.is_none()
    }
}

/// Page-level display settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Page heading
    #[serde(default)]
    pub title: String,
    /// Page subheading
    #[serde(default)]
    pub subtitle: String,
    /// URL or path of the profile image
    #[serde(default)]
    pub profile_image: String,
}

impl Settings {
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        profile_image: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            profile_image: profile_image.into(),
        }
    }

    /// Profile image to render, falling back to the placeholder
    pub fn profile_image_or_placeholder(&self) -> &str {
        if self.profile_image.trim().is_empty() {
            PLACEHOLDER_IMAGE
        } else {
            &self.profile_image
        }
    }
}

/// Confirmation body returned by mutations that have no other result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ack {
    pub message: String,
}

impl Ack {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
