use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use catalog_auth::extract::AdminIdentity;
use catalog_core::response::ApiResponse;

use crate::domain::image::detail_image_url;
use crate::domain::types::DetailImageMeta;
use crate::error::CatalogError;
use crate::handlers::girls::read_image_field;
use crate::state::AppState;
use crate::usecase::detail_image::{
    AddDetailImageUseCase, DeleteDetailImageUseCase, GetDetailImageUseCase,
    ListDetailImagesUseCase, ReorderDetailImageUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailImageResponse {
    pub id: i32,
    pub girl_id: i32,
    pub image_order: i32,
    pub url: String,
    #[serde(serialize_with = "catalog_core::timefmt::rfc3339_millis")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<DetailImageMeta> for DetailImageResponse {
    fn from(meta: DetailImageMeta) -> Self {
        Self {
            url: detail_image_url(meta.girl_id, meta.id),
            id: meta.id,
            girl_id: meta.girl_id,
            image_order: meta.image_order,
            created_at: meta.created_at,
        }
    }
}

// ── GET /api/girls/:id/detail-images ─────────────────────────────────────────

pub async fn list_detail_images(
    State(state): State<AppState>,
    Path(girl_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<DetailImageResponse>>>, CatalogError> {
    let usecase = ListDetailImagesUseCase {
        detail_images: state.detail_image_repo(),
    };
    let metas = usecase.execute(girl_id).await?;
    Ok(Json(ApiResponse::ok(
        metas.into_iter().map(DetailImageResponse::from).collect(),
    )))
}

// ── GET /api/girls/:id/detail-images/:imageId ────────────────────────────────

pub async fn get_detail_image(
    State(state): State<AppState>,
    Path((girl_id, image_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, CatalogError> {
    let usecase = GetDetailImageUseCase {
        detail_images: state.detail_image_repo(),
    };
    let (content_type, bytes) = usecase.execute(girl_id, image_id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, super::girls::IMAGE_CACHE_CONTROL),
        ],
        bytes,
    ))
}

// ── POST /api/girls/:id/detail-images ────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDetailImageQuery {
    pub order: Option<i32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedImageData {
    pub url: String,
}

pub async fn add_detail_image(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(girl_id): Path<i32>,
    Query(query): Query<AddDetailImageQuery>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<AddedImageData>>), CatalogError> {
    let data = read_image_field(multipart).await?;
    let usecase = AddDetailImageUseCase {
        listings: state.listing_repo(),
        detail_images: state.detail_image_repo(),
    };
    let url = usecase
        .execute(girl_id, &data, query.order.unwrap_or(0))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            "detail image added",
            AddedImageData { url },
        )),
    ))
}

// ── DELETE /api/girls/:id/detail-images/:imageId ─────────────────────────────

pub async fn delete_detail_image(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path((girl_id, image_id)): Path<(i32, i32)>,
) -> Result<Json<ApiResponse<()>>, CatalogError> {
    let usecase = DeleteDetailImageUseCase {
        detail_images: state.detail_image_repo(),
    };
    usecase.execute(girl_id, image_id).await?;
    Ok(Json(ApiResponse::message("detail image deleted")))
}

// ── PATCH /api/girls/:id/detail-images/:imageId ──────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub image_order: i32,
}

pub async fn reorder_detail_image(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path((girl_id, image_id)): Path<(i32, i32)>,
    Json(body): Json<ReorderRequest>,
) -> Result<Json<ApiResponse<()>>, CatalogError> {
    let usecase = ReorderDetailImageUseCase {
        detail_images: state.detail_image_repo(),
    };
    usecase.execute(girl_id, image_id, body.image_order).await?;
    Ok(Json(ApiResponse::message("detail image order updated")))
}
