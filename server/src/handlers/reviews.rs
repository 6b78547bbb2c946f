use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use catalog_auth::extract::Identity;
use catalog_core::response::ApiResponse;

use crate::domain::types::Review;
use crate::error::CatalogError;
use crate::state::AppState;
use crate::usecase::review::{
    CreateReviewInput, CreateReviewUseCase, DeleteReviewUseCase, ListReviewsUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: i32,
    pub user_id: i32,
    pub girl_id: i32,
    pub rating: i16,
    pub comment: Option<String>,
    pub username: String,
    #[serde(serialize_with = "catalog_core::timefmt::rfc3339_millis")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            user_id: review.user_id,
            girl_id: review.girl_id,
            rating: review.rating,
            comment: review.comment,
            username: review.username,
            created_at: review.created_at,
        }
    }
}

// ── GET /api/reviews/:girlId ─────────────────────────────────────────────────

pub async fn list_reviews(
    State(state): State<AppState>,
    Path(girl_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<ReviewResponse>>>, CatalogError> {
    let usecase = ListReviewsUseCase {
        reviews: state.review_repo(),
    };
    let reviews = usecase.execute(girl_id).await?;
    Ok(Json(ApiResponse::ok(
        reviews.into_iter().map(ReviewResponse::from).collect(),
    )))
}

// ── POST /api/reviews ────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub girl_id: i32,
    pub rating: i16,
    pub comment: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedReviewData {
    pub id: i32,
}

pub async fn create_review(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedReviewData>>), CatalogError> {
    let usecase = CreateReviewUseCase {
        reviews: state.review_repo(),
        listings: state.listing_repo(),
    };
    let id = usecase
        .execute(
            identity.user_id,
            CreateReviewInput {
                girl_id: body.girl_id,
                rating: body.rating,
                comment: body.comment,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            "review created",
            CreatedReviewData { id },
        )),
    ))
}

// ── DELETE /api/reviews/:id ──────────────────────────────────────────────────

pub async fn delete_review(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, CatalogError> {
    let usecase = DeleteReviewUseCase {
        reviews: state.review_repo(),
    };
    usecase.execute(identity, id).await?;
    Ok(Json(ApiResponse::message("review deleted")))
}
