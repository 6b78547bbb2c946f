use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use catalog_auth::extract::AdminIdentity;
use catalog_core::pagination::{PageInfo, PageRequest};
use catalog_core::response::ApiResponse;

use crate::domain::types::{ListingFilter, ListingInfo, ListingPatch, LegacyImages, NewListing};
use crate::error::CatalogError;
use crate::state::AppState;
use crate::usecase::listing::{
    CreateGirlUseCase, DeleteGirlUseCase, GetGirlImageUseCase, GetGirlUseCase, ListGirlsUseCase,
    ListingView, RecentGirlsUseCase, ToggleGirlStatusUseCase, UpdateGirlImageUseCase,
    UpdateGirlUseCase,
};

/// One year, in seconds — blob responses are immutable in practice.
pub(crate) const IMAGE_CACHE_CONTROL: &str = "public, max-age=31536000";

// ── DTOs ─────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GirlResponse {
    pub id: i32,
    pub name: String,
    pub area: Option<String>,
    pub price: Option<String>,
    pub rating: f64,
    /// The resolved image URL — stored URL, blob endpoint, or placeholder.
    pub image: String,
    pub zalo: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub is_pinned: bool,
    pub display_order: i32,
    pub info: Value,
    /// Detail-image retrieval URLs, replacing the legacy images column.
    pub images: Vec<String>,
    pub viewed: i64,
    #[serde(serialize_with = "catalog_core::timefmt::rfc3339_millis")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "catalog_core::timefmt::rfc3339_millis")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ListingView> for GirlResponse {
    fn from(view: ListingView) -> Self {
        let ListingView {
            listing,
            image,
            detail_image_urls,
        } = view;
        Self {
            id: listing.id,
            name: listing.name,
            area: listing.area,
            price: listing.price,
            rating: listing.rating,
            image,
            zalo: listing.zalo,
            phone: listing.phone,
            description: listing.description,
            is_active: listing.is_active,
            is_pinned: listing.is_pinned,
            display_order: listing.display_order,
            info: listing.info.to_json(),
            images: detail_image_urls,
            viewed: listing.viewed,
            created_at: listing.created_at,
            updated_at: listing.updated_at,
        }
    }
}

// ── GET /api/girls ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListGirlsQuery {
    /// Case-insensitive substring over name and description.
    pub q: Option<String>,
    pub area: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GirlListData {
    pub girls: Vec<GirlResponse>,
    pub pagination: PageInfo,
}

pub async fn list_girls(
    State(state): State<AppState>,
    Query(query): Query<ListGirlsQuery>,
) -> Result<Json<ApiResponse<GirlListData>>, CatalogError> {
    let usecase = ListGirlsUseCase {
        listings: state.listing_repo(),
        detail_images: state.detail_image_repo(),
    };
    let mut page = PageRequest::default();
    if let Some(p) = query.page {
        page.page = p;
    }
    if let Some(l) = query.limit {
        page.limit = l;
    }
    let filter = ListingFilter {
        q: query.q,
        area: query.area,
    };
    let (views, pagination) = usecase.execute(filter, page).await?;
    Ok(Json(ApiResponse::ok(GirlListData {
        girls: views.into_iter().map(GirlResponse::from).collect(),
        pagination,
    })))
}

// ── GET /api/girls/recent ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RecentGirlsQuery {
    pub limit: Option<u32>,
}

pub async fn recent_girls(
    State(state): State<AppState>,
    Query(query): Query<RecentGirlsQuery>,
) -> Result<Json<ApiResponse<Vec<GirlResponse>>>, CatalogError> {
    let usecase = RecentGirlsUseCase {
        listings: state.listing_repo(),
        detail_images: state.detail_image_repo(),
    };
    let views = usecase.execute(query.limit.unwrap_or(8)).await?;
    Ok(Json(ApiResponse::ok(
        views.into_iter().map(GirlResponse::from).collect(),
    )))
}

// ── GET /api/girls/:id ───────────────────────────────────────────────────────

pub async fn get_girl(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<GirlResponse>>, CatalogError> {
    let usecase = GetGirlUseCase {
        listings: state.listing_repo(),
        detail_images: state.detail_image_repo(),
    };
    let view = usecase.execute(id).await?;
    Ok(Json(ApiResponse::ok(view.into())))
}

// ── GET /api/girls/:id/image ─────────────────────────────────────────────────

pub async fn get_girl_image(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, CatalogError> {
    let usecase = GetGirlImageUseCase {
        listings: state.listing_repo(),
    };
    let (content_type, bytes) = usecase.execute(id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, IMAGE_CACHE_CONTROL),
        ],
        bytes,
    ))
}

// ── POST /api/girls ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGirlRequest {
    pub name: String,
    pub area: Option<String>,
    pub price: Option<String>,
    pub rating: Option<f64>,
    pub zalo: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub display_order: Option<i32>,
    pub info: Option<Value>,
}

pub async fn create_girl(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Json(body): Json<CreateGirlRequest>,
) -> Result<(StatusCode, Json<ApiResponse<GirlResponse>>), CatalogError> {
    let usecase = CreateGirlUseCase {
        listings: state.listing_repo(),
    };
    let info = body
        .info
        .map(|v| ListingInfo::from_json_lenient(&v))
        .unwrap_or_default();
    let view = usecase
        .execute(NewListing {
            name: body.name,
            area: body.area,
            price: body.price,
            rating: body.rating,
            zalo: body.zalo,
            phone: body.phone,
            description: body.description,
            is_active: body.is_active,
            display_order: body.display_order,
            info,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(view.into()))))
}

// ── PUT /api/girls/:id ───────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGirlRequest {
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
    pub info: Option<Value>,
    pub images: Option<Value>,
}

pub async fn update_girl(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateGirlRequest>,
) -> Result<Json<ApiResponse<()>>, CatalogError> {
    let usecase = UpdateGirlUseCase {
        listings: state.listing_repo(),
    };
    // Malformed info/images payloads collapse to empty defaults with a
    // logged warning instead of failing the request.
    let patch = ListingPatch {
        name: body.name,
        area: body.area,
        price: body.price,
        rating: body.rating,
        zalo: body.zalo,
        phone: body.phone,
        description: body.description,
        is_active: body.is_active,
        is_pinned: body.is_pinned,
        display_order: body.display_order,
        info: body.info.map(|v| ListingInfo::from_json_lenient(&v)),
        images: body.images.map(|v| LegacyImages::from_json_lenient(&v)),
    };
    usecase.execute(id, patch).await?;
    Ok(Json(ApiResponse::message("girl updated")))
}

// ── DELETE /api/girls/:id ────────────────────────────────────────────────────

pub async fn delete_girl(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, CatalogError> {
    let usecase = DeleteGirlUseCase {
        listings: state.listing_repo(),
    };
    usecase.execute(id).await?;
    Ok(Json(ApiResponse::message("girl deleted")))
}

// ── PATCH /api/girls/:id/toggle-status ───────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleStatusData {
    pub is_active: bool,
}

pub async fn toggle_girl_status(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ToggleStatusData>>, CatalogError> {
    let usecase = ToggleGirlStatusUseCase {
        listings: state.listing_repo(),
    };
    let is_active = usecase.execute(id).await?;
    Ok(Json(ApiResponse::ok(ToggleStatusData { is_active })))
}

// ── POST /api/girls/:id/image ────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadData {
    pub image: String,
}

pub async fn upload_girl_image(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<ImageUploadData>>, CatalogError> {
    let data = read_image_field(multipart).await?;
    let usecase = UpdateGirlImageUseCase {
        listings: state.listing_repo(),
    };
    let image = usecase.execute(id, &data).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "image updated",
        ImageUploadData { image },
    )))
}

/// Pull the first image part out of a multipart body.
///
/// Non-image parts are rejected outright; read failures (including the
/// body-size limit tripping mid-stream) surface as 400s.
pub(crate) async fn read_image_field(mut multipart: Multipart) -> Result<Vec<u8>, CatalogError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| CatalogError::BadRequest("invalid or oversized multipart body"))?
    {
        if field.file_name().is_none() && field.content_type().is_none() {
            continue;
        }
        let is_image = field
            .content_type()
            .map(|ct| ct.starts_with("image/"))
            .unwrap_or(false);
        if !is_image {
            return Err(CatalogError::BadRequest("only image uploads are allowed"));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|_| CatalogError::BadRequest("invalid or oversized multipart body"))?;
        return Ok(bytes.to_vec());
    }
    Err(CatalogError::BadRequest("image file is required"))
}
