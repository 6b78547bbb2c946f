use std::collections::HashMap;

use catalog_core::pagination::{PageInfo, PageRequest};

use crate::domain::image::{blob_image_url, detail_image_url, resolve_image_url, sniff_content_type};
use crate::domain::repository::{DetailImageRepository, ListingRepository};
use crate::domain::types::{Listing, ListingFilter, ListingPatch, NewListing};
use crate::error::CatalogError;

/// A listing ready for serialization: resolved image URL plus the retrieval
/// URLs of its detail images (never the raw bytes).
#[derive(Debug, Clone)]
pub struct ListingView {
    pub listing: Listing,
    pub image: String,
    pub detail_image_urls: Vec<String>,
}

fn view(listing: Listing, detail_image_urls: Vec<String>) -> ListingView {
    let image = resolve_image_url(&listing.img_url, listing.has_blob, listing.id);
    ListingView {
        listing,
        image,
        detail_image_urls,
    }
}

// ── ListGirls ────────────────────────────────────────────────────────────────

pub struct ListGirlsUseCase<L: ListingRepository, D: DetailImageRepository> {
    pub listings: L,
    pub detail_images: D,
}

impl<L: ListingRepository, D: DetailImageRepository> ListGirlsUseCase<L, D> {
    pub async fn execute(
        &self,
        filter: ListingFilter,
        page: PageRequest,
    ) -> Result<(Vec<ListingView>, PageInfo), CatalogError> {
        let page = page.clamped();
        // Count and page run as two independent queries; under concurrent
        // writes they may disagree slightly.
        let rows = self.listings.list(&filter, page).await?;
        let total = self.listings.count(&filter).await?;

        let ids: Vec<i32> = rows.iter().map(|l| l.id).collect();
        let mut urls_by_girl: HashMap<i32, Vec<String>> = HashMap::new();
        for meta in self.detail_images.list_meta_by_girl_ids(&ids).await? {
            urls_by_girl
                .entry(meta.girl_id)
                .or_default()
                .push(detail_image_url(meta.girl_id, meta.id));
        }

        let views = rows
            .into_iter()
            .map(|listing| {
                let urls = urls_by_girl.remove(&listing.id).unwrap_or_default();
                view(listing, urls)
            })
            .collect();
        Ok((views, PageInfo::new(page, total)))
    }
}

// ── GetGirl ──────────────────────────────────────────────────────────────────

pub struct GetGirlUseCase<L: ListingRepository, D: DetailImageRepository> {
    pub listings: L,
    pub detail_images: D,
}

impl<L: ListingRepository, D: DetailImageRepository> GetGirlUseCase<L, D> {
    pub async fn execute(&self, id: i32) -> Result<ListingView, CatalogError> {
        let listing = self
            .listings
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::GirlNotFound)?;
        self.listings.increment_viewed(id).await?;
        let urls = self
            .detail_images
            .list_meta(id)
            .await?
            .into_iter()
            .map(|m| detail_image_url(m.girl_id, m.id))
            .collect();
        Ok(view(listing, urls))
    }
}

// ── RecentGirls ──────────────────────────────────────────────────────────────

pub struct RecentGirlsUseCase<L: ListingRepository, D: DetailImageRepository> {
    pub listings: L,
    pub detail_images: D,
}

impl<L: ListingRepository, D: DetailImageRepository> RecentGirlsUseCase<L, D> {
    pub async fn execute(&self, limit: u32) -> Result<Vec<ListingView>, CatalogError> {
        let rows = self.listings.recent(limit.clamp(1, 100)).await?;
        let ids: Vec<i32> = rows.iter().map(|l| l.id).collect();
        let mut urls_by_girl: HashMap<i32, Vec<String>> = HashMap::new();
        for meta in self.detail_images.list_meta_by_girl_ids(&ids).await? {
            urls_by_girl
                .entry(meta.girl_id)
                .or_default()
                .push(detail_image_url(meta.girl_id, meta.id));
        }
        Ok(rows
            .into_iter()
            .map(|listing| {
                let urls = urls_by_girl.remove(&listing.id).unwrap_or_default();
                view(listing, urls)
            })
            .collect())
    }
}

// ── CreateGirl ───────────────────────────────────────────────────────────────

pub struct CreateGirlUseCase<L: ListingRepository> {
    pub listings: L,
}

impl<L: ListingRepository> CreateGirlUseCase<L> {
    /// Returns the freshly created listing (always imageless — `img_url`
    /// starts empty and resolves to the placeholder until an upload).
    pub async fn execute(&self, input: NewListing) -> Result<ListingView, CatalogError> {
        if input.name.trim().is_empty() {
            return Err(CatalogError::BadRequest("name is required"));
        }
        let id = self.listings.create(&input).await?;
        let listing = self
            .listings
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::GirlNotFound)?;
        Ok(view(listing, vec![]))
    }
}

// ── UpdateGirl ───────────────────────────────────────────────────────────────

pub struct UpdateGirlUseCase<L: ListingRepository> {
    pub listings: L,
}

impl<L: ListingRepository> UpdateGirlUseCase<L> {
    pub async fn execute(&self, id: i32, patch: ListingPatch) -> Result<(), CatalogError> {
        if patch.is_empty() {
            return Err(CatalogError::BadRequest("no fields to update"));
        }
        if self.listings.update(id, &patch).await? {
            Ok(())
        } else {
            Err(CatalogError::GirlNotFound)
        }
    }
}

// ── DeleteGirl ───────────────────────────────────────────────────────────────

pub struct DeleteGirlUseCase<L: ListingRepository> {
    pub listings: L,
}

impl<L: ListingRepository> DeleteGirlUseCase<L> {
    pub async fn execute(&self, id: i32) -> Result<(), CatalogError> {
        if self.listings.delete(id).await? {
            Ok(())
        } else {
            Err(CatalogError::GirlNotFound)
        }
    }
}

// ── ToggleGirlStatus ─────────────────────────────────────────────────────────

pub struct ToggleGirlStatusUseCase<L: ListingRepository> {
    pub listings: L,
}

impl<L: ListingRepository> ToggleGirlStatusUseCase<L> {
    /// Returns the new `is_active` value.
    pub async fn execute(&self, id: i32) -> Result<bool, CatalogError> {
        self.listings
            .toggle_active(id)
            .await?
            .ok_or(CatalogError::GirlNotFound)
    }
}

// ── UpdateGirlImage ──────────────────────────────────────────────────────────

pub struct UpdateGirlImageUseCase<L: ListingRepository> {
    pub listings: L,
}

impl<L: ListingRepository> UpdateGirlImageUseCase<L> {
    /// Stores the blob and points `img_url` at the blob endpoint in one
    /// statement. Returns the new URL.
    pub async fn execute(&self, id: i32, data: &[u8]) -> Result<String, CatalogError> {
        if data.is_empty() {
            return Err(CatalogError::BadRequest("image data is required"));
        }
        let url = blob_image_url(id);
        if self.listings.set_image(id, data, &url).await? {
            Ok(url)
        } else {
            Err(CatalogError::GirlNotFound)
        }
    }
}

// ── GetGirlImage ─────────────────────────────────────────────────────────────

pub struct GetGirlImageUseCase<L: ListingRepository> {
    pub listings: L,
}

impl<L: ListingRepository> GetGirlImageUseCase<L> {
    /// Returns the sniffed content type and the blob bytes.
    pub async fn execute(&self, id: i32) -> Result<(&'static str, Vec<u8>), CatalogError> {
        let blob = self
            .listings
            .find_blob(id)
            .await?
            .ok_or(CatalogError::ImageNotFound)?;
        Ok((sniff_content_type(&blob), blob))
    }
}
