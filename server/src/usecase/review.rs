use catalog_auth::extract::Identity;
use catalog_auth::role::Role;

use crate::domain::repository::{ListingRepository, ReviewRepository};
use crate::domain::types::Review;
use crate::error::CatalogError;

// ── ListReviews ──────────────────────────────────────────────────────────────

pub struct ListReviewsUseCase<R: ReviewRepository> {
    pub reviews: R,
}

impl<R: ReviewRepository> ListReviewsUseCase<R> {
    pub async fn execute(&self, girl_id: i32) -> Result<Vec<Review>, CatalogError> {
        self.reviews.list_by_girl(girl_id).await
    }
}

// ── CreateReview ─────────────────────────────────────────────────────────────

pub struct CreateReviewInput {
    pub girl_id: i32,
    pub rating: i16,
    pub comment: Option<String>,
}

pub struct CreateReviewUseCase<R: ReviewRepository, L: ListingRepository> {
    pub reviews: R,
    pub listings: L,
}

impl<R: ReviewRepository, L: ListingRepository> CreateReviewUseCase<R, L> {
    /// `user_id` comes from the validated token, never from the request body.
    pub async fn execute(
        &self,
        user_id: i32,
        input: CreateReviewInput,
    ) -> Result<i32, CatalogError> {
        if !(1..=5).contains(&input.rating) {
            return Err(CatalogError::BadRequest("rating must be between 1 and 5"));
        }
        if !self.listings.exists(input.girl_id).await? {
            return Err(CatalogError::GirlNotFound);
        }
        self.reviews
            .create(
                user_id,
                input.girl_id,
                input.rating,
                input.comment.as_deref(),
            )
            .await
    }
}

// ── DeleteReview ─────────────────────────────────────────────────────────────

pub struct DeleteReviewUseCase<R: ReviewRepository> {
    pub reviews: R,
}

impl<R: ReviewRepository> DeleteReviewUseCase<R> {
    /// Owners may delete their own reviews; admins may delete any.
    pub async fn execute(&self, identity: Identity, id: i32) -> Result<(), CatalogError> {
        let review = self
            .reviews
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::ReviewNotFound)?;
        if identity.role != Role::Admin && review.user_id != identity.user_id {
            return Err(CatalogError::Forbidden);
        }
        if self.reviews.delete(id).await? {
            Ok(())
        } else {
            Err(CatalogError::ReviewNotFound)
        }
    }
}
