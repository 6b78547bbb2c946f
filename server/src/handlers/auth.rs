use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use catalog_auth::extract::Identity;
use catalog_auth::role::Role;
use catalog_core::response::ApiResponse;

use crate::domain::types::User;
use crate::error::CatalogError;
use crate::state::AppState;
use crate::usecase::auth::{
    AuthOutput, GetProfileUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
    UpdateProfileInput, UpdateProfileUseCase,
};

/// User view without the password hash.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub phone: Option<String>,
    pub profile: Value,
    #[serde(serialize_with = "catalog_core::timefmt::rfc3339_millis")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "catalog_core::timefmt::rfc3339_millis")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            phone: user.phone,
            profile: user.profile,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
    pub token: String,
    pub user: UserResponse,
}

impl From<AuthOutput> for AuthData {
    fn from(output: AuthOutput) -> Self {
        Self {
            token: output.token,
            user: output.user.into(),
        }
    }
}

// ── POST /api/users/register ──────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthData>>), CatalogError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let output = usecase
        .execute(RegisterInput {
            username: body.username,
            email: body.email,
            password: body.password,
            phone: body.phone,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message("registered", output.into())),
    ))
}

// ── POST /api/users/login ─────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthData>>, CatalogError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let output = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(ApiResponse::ok(output.into())))
}

// ── GET /api/users/profile ────────────────────────────────────────────────────

pub async fn get_profile(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UserResponse>>, CatalogError> {
    let usecase = GetProfileUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

// ── PUT /api/users/profile ────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub password: Option<String>,
    pub phone: Option<String>,
    pub profile: Option<Value>,
}

pub async fn update_profile(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<()>>, CatalogError> {
    let usecase = UpdateProfileUseCase {
        users: state.user_repo(),
    };
    usecase
        .execute(
            identity.user_id,
            UpdateProfileInput {
                password: body.password,
                phone: body.phone,
                profile: body.profile,
            },
        )
        .await?;
    Ok(Json(ApiResponse::message("profile updated")))
}
