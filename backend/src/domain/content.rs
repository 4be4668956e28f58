//! Websites and the content items ingested from them.
//!
//! Both entities are created out-of-band by the registration and ingestion
//! flows; this crate only reads them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Wrap an already-parsed UUID.
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

uuid_identifier! {
    /// Identifier of a registered website.
    WebsiteId
}

uuid_identifier! {
    /// Identifier of a content item (article).
    ContentId
}

/// Fields of a content item needed to populate a promotion job.
///
/// Produced by the ownership check in the same read that proves ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSnapshot {
    /// Article title.
    pub title: String,
    /// Optional article description.
    pub description: Option<String>,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Optional category label.
    pub category: Option<String>,
}

/// Content item as listed on the website overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentItem {
    pub content_id: ContentId,
    pub website_id: WebsiteId,
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub original_url: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Maximum number of items returned by the website overview.
pub const RECENT_CONTENT_LIMIT: i64 = 10;
