use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use catalog_auth::role::Role;

/// User account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub phone: Option<String>,
    pub profile: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Labeled free-form attributes of a listing (height, weight, measurements…).
///
/// This is the explicit domain shape of the `info` JSON column. Malformed
/// stored or submitted values collapse to the empty map with a logged
/// warning — requests are never rejected over them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingInfo(pub BTreeMap<String, String>);

impl ListingInfo {
    pub fn from_json_lenient(value: &Value) -> Self {
        match value.as_object() {
            Some(map) => Self(
                map.iter()
                    .map(|(k, v)| {
                        let v = match v {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        };
                        (k.clone(), v)
                    })
                    .collect(),
            ),
            None => {
                if !value.is_null() {
                    tracing::warn!(value = %value, "malformed info payload, dropping");
                }
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        )
    }
}

/// Legacy `images` JSON array of URL strings, superseded by detail images
/// but still written through on updates. Same lenient policy as [`ListingInfo`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyImages(pub Vec<String>);

impl LegacyImages {
    pub fn from_json_lenient(value: &Value) -> Self {
        match value.as_array() {
            Some(items) => Self(
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_owned))
                    .collect(),
            ),
            None => {
                if !value.is_null() {
                    tracing::warn!(value = %value, "malformed images payload, dropping");
                }
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Value {
        Value::Array(self.0.iter().cloned().map(Value::String).collect())
    }
}

/// Catalog listing as read from the database.
///
/// `has_blob` replaces the legacy inline blob on read paths — the bytes are
/// only ever fetched by the binary-serving endpoint.
#[derive(Debug, Clone)]
pub struct Listing {
    pub id: i32,
    pub name: String,
    pub area: Option<String>,
    pub price: Option<String>,
    pub rating: f64,
    pub img_url: String,
    pub has_blob: bool,
    pub zalo: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub is_pinned: bool,
    pub display_order: i32,
    pub info: ListingInfo,
    pub viewed: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sparse listing creation input. Unset fields take the documented defaults.
#[derive(Debug, Clone, Default)]
pub struct NewListing {
    pub name: String,
    pub area: Option<String>,
    pub price: Option<String>,
    pub rating: Option<f64>,
    pub zalo: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub display_order: Option<i32>,
    pub info: ListingInfo,
}

/// Partial listing update. Only `Some` fields are written.
#[derive(Debug, Clone, Default)]
pub struct ListingPatch {
    pub name: Option<String>,
    pub area: Option<String>,
    pub price: Option<String>,
    pub rating: Option<f64>,
    pub zalo: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub is_pinned: Option<bool>,
    pub display_order: Option<i32>,
    pub info: Option<ListingInfo>,
    pub images: Option<LegacyImages>,
}

impl ListingPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.area.is_none()
            && self.price.is_none()
            && self.rating.is_none()
            && self.zalo.is_none()
            && self.phone.is_none()
            && self.description.is_none()
            && self.is_active.is_none()
            && self.is_pinned.is_none()
            && self.display_order.is_none()
            && self.info.is_none()
            && self.images.is_none()
    }
}

/// Substring filters for the listing search.
#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    /// Case-insensitive substring over name and description.
    pub q: Option<String>,
    /// Substring over area.
    pub area: Option<String>,
}

/// Detail-image row without its bytes.
#[derive(Debug, Clone)]
pub struct DetailImageMeta {
    pub id: i32,
    pub girl_id: i32,
    pub image_order: i32,
    pub created_at: DateTime<Utc>,
}

/// A review joined with its author's username.
#[derive(Debug, Clone)]
pub struct Review {
    pub id: i32,
    pub user_id: i32,
    pub girl_id: i32,
    pub rating: i16,
    pub comment: Option<String>,
    pub username: String,
    pub created_at: DateTime<Utc>,
}
