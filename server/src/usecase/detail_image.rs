use crate::domain::image::{detail_image_url, sniff_content_type};
use crate::domain::repository::{DetailImageRepository, ListingRepository};
use crate::domain::types::DetailImageMeta;
use crate::error::CatalogError;

// ── AddDetailImage ───────────────────────────────────────────────────────────

pub struct AddDetailImageUseCase<L: ListingRepository, D: DetailImageRepository> {
    pub listings: L,
    pub detail_images: D,
}

impl<L: ListingRepository, D: DetailImageRepository> AddDetailImageUseCase<L, D> {
    /// Returns the retrieval URL of the stored image.
    pub async fn execute(
        &self,
        girl_id: i32,
        data: &[u8],
        order: i32,
    ) -> Result<String, CatalogError> {
        if data.is_empty() {
            return Err(CatalogError::BadRequest("image data is required"));
        }
        if !self.listings.exists(girl_id).await? {
            return Err(CatalogError::GirlNotFound);
        }
        let image_id = self.detail_images.insert(girl_id, data, order).await?;
        Ok(detail_image_url(girl_id, image_id))
    }
}

// ── ListDetailImages ─────────────────────────────────────────────────────────

pub struct ListDetailImagesUseCase<D: DetailImageRepository> {
    pub detail_images: D,
}

impl<D: DetailImageRepository> ListDetailImagesUseCase<D> {
    pub async fn execute(&self, girl_id: i32) -> Result<Vec<DetailImageMeta>, CatalogError> {
        self.detail_images.list_meta(girl_id).await
    }
}

// ── GetDetailImage ───────────────────────────────────────────────────────────

pub struct GetDetailImageUseCase<D: DetailImageRepository> {
    pub detail_images: D,
}

impl<D: DetailImageRepository> GetDetailImageUseCase<D> {
    /// Dual-key fetch: the image id must belong to the given listing.
    pub async fn execute(
        &self,
        girl_id: i32,
        image_id: i32,
    ) -> Result<(&'static str, Vec<u8>), CatalogError> {
        let data = self
            .detail_images
            .fetch(girl_id, image_id)
            .await?
            .ok_or(CatalogError::ImageNotFound)?;
        Ok((sniff_content_type(&data), data))
    }
}

// ── DeleteDetailImage ────────────────────────────────────────────────────────

pub struct DeleteDetailImageUseCase<D: DetailImageRepository> {
    pub detail_images: D,
}

impl<D: DetailImageRepository> DeleteDetailImageUseCase<D> {
    pub async fn execute(&self, girl_id: i32, image_id: i32) -> Result<(), CatalogError> {
        if self.detail_images.delete(girl_id, image_id).await? {
            Ok(())
        } else {
            Err(CatalogError::ImageNotFound)
        }
    }
}

// ── ReorderDetailImage ───────────────────────────────────────────────────────

pub struct ReorderDetailImageUseCase<D: DetailImageRepository> {
    pub detail_images: D,
}

impl<D: DetailImageRepository> ReorderDetailImageUseCase<D> {
    /// In-place order update. Keeping orders unique and gapless is the
    /// caller's responsibility.
    pub async fn execute(&self, girl_id: i32, image_id: i32, order: i32) -> Result<(), CatalogError> {
        if self.detail_images.set_order(girl_id, image_id, order).await? {
            Ok(())
        } else {
            Err(CatalogError::ImageNotFound)
        }
    }
}
