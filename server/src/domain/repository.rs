#![allow(async_fn_in_trait)]

use std::collections::BTreeMap;

use catalog_core::pagination::PageRequest;

use crate::domain::types::{
    DetailImageMeta, Listing, ListingFilter, ListingPatch, NewListing, Review, User,
};
use crate::error::CatalogError;

/// Repository for catalog listings.
pub trait ListingRepository: Send + Sync {
    /// Page of listings ordered by display_order desc, created_at desc.
    async fn list(
        &self,
        filter: &ListingFilter,
        page: PageRequest,
    ) -> Result<Vec<Listing>, CatalogError>;

    /// Total row count under the same filters as [`list`](Self::list).
    /// Deliberately not transactional with the page query.
    async fn count(&self, filter: &ListingFilter) -> Result<u64, CatalogError>;

    /// The `limit` newest active listings.
    async fn recent(&self, limit: u32) -> Result<Vec<Listing>, CatalogError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Listing>, CatalogError>;

    async fn exists(&self, id: i32) -> Result<bool, CatalogError>;

    /// Returns the created listing id.
    async fn create(&self, listing: &NewListing) -> Result<i32, CatalogError>;

    /// Returns `false` if the row does not exist.
    async fn update(&self, id: i32, patch: &ListingPatch) -> Result<bool, CatalogError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, CatalogError>;

    /// Flip is_active, returning the new value, or `None` if missing.
    async fn toggle_active(&self, id: i32) -> Result<Option<bool>, CatalogError>;

    /// Replace the legacy blob and the stored URL in one statement — the only
    /// write path that keeps both columns consistent.
    async fn set_image(&self, id: i32, data: &[u8], img_url: &str) -> Result<bool, CatalogError>;

    /// Fetch the legacy blob bytes for the binary-serving endpoint.
    async fn find_blob(&self, id: i32) -> Result<Option<Vec<u8>>, CatalogError>;

    /// Bump the denormalized view counter. Best-effort.
    async fn increment_viewed(&self, id: i32) -> Result<(), CatalogError>;
}

/// Repository for supplementary listing images.
pub trait DetailImageRepository: Send + Sync {
    /// Returns the created image id.
    async fn insert(&self, girl_id: i32, data: &[u8], order: i32) -> Result<i32, CatalogError>;

    /// Metadata for one listing, ascending by image_order.
    async fn list_meta(&self, girl_id: i32) -> Result<Vec<DetailImageMeta>, CatalogError>;

    /// Metadata for a batch of listings (one query, the caller groups).
    async fn list_meta_by_girl_ids(
        &self,
        girl_ids: &[i32],
    ) -> Result<Vec<DetailImageMeta>, CatalogError>;

    /// Both ids must match the same row — image id alone is not sufficient.
    async fn fetch(&self, girl_id: i32, image_id: i32) -> Result<Option<Vec<u8>>, CatalogError>;

    /// Dual-key delete. Returns `true` only if a row was actually removed.
    async fn delete(&self, girl_id: i32, image_id: i32) -> Result<bool, CatalogError>;

    /// Dual-key in-place reorder. No server-side renumbering.
    async fn set_order(
        &self,
        girl_id: i32,
        image_id: i32,
        order: i32,
    ) -> Result<bool, CatalogError>;
}

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, CatalogError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CatalogError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, CatalogError>;

    async fn list(&self, page: PageRequest) -> Result<Vec<User>, CatalogError>;
    async fn count(&self) -> Result<u64, CatalogError>;

    /// Returns the created user id.
    async fn create(&self, user: &NewUser) -> Result<i32, CatalogError>;

    /// Returns `false` if the row does not exist.
    async fn update(&self, id: i32, patch: &UserPatch) -> Result<bool, CatalogError>;

    /// Returns `true` if a row was deleted. Cascades the user's reviews.
    async fn delete(&self, id: i32) -> Result<bool, CatalogError>;
}

/// User creation input (registration and admin create).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: catalog_auth::role::Role,
    pub phone: Option<String>,
}

/// Partial user update. Only `Some` fields are written.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub password_hash: Option<String>,
    pub role: Option<catalog_auth::role::Role>,
    pub is_active: Option<bool>,
    pub phone: Option<String>,
    pub profile: Option<serde_json::Value>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.password_hash.is_none()
            && self.role.is_none()
            && self.is_active.is_none()
            && self.phone.is_none()
            && self.profile.is_none()
    }
}

/// Repository for reviews.
pub trait ReviewRepository: Send + Sync {
    /// Reviews for a listing, newest first, joined with author usernames.
    async fn list_by_girl(&self, girl_id: i32) -> Result<Vec<Review>, CatalogError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Review>, CatalogError>;

    /// Returns the created review id.
    async fn create(
        &self,
        user_id: i32,
        girl_id: i32,
        rating: i16,
        comment: Option<&str>,
    ) -> Result<i32, CatalogError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, CatalogError>;
}

/// Repository for the site settings map.
pub trait SettingsRepository: Send + Sync {
    /// The entire map. No pagination, no partial read.
    async fn all(&self) -> Result<BTreeMap<String, String>, CatalogError>;

    /// Upsert a batch of keys inside one READ COMMITTED transaction, then
    /// re-read them to self-verify (mismatches are logged, not surfaced).
    /// On any error the whole batch rolls back.
    async fn upsert_batch(&self, entries: &[(String, String)]) -> Result<(), CatalogError>;
}
