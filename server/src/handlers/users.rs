use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use catalog_auth::extract::AdminIdentity;
use catalog_auth::role::Role;
use catalog_core::pagination::{PageInfo, PageRequest};
use catalog_core::response::ApiResponse;

use crate::error::CatalogError;
use crate::handlers::auth::UserResponse;
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserInput, CreateUserUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase,
    UpdateUserInput, UpdateUserUseCase,
};

// ── GET /api/users ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListData {
    pub users: Vec<UserResponse>,
    pub pagination: PageInfo,
}

pub async fn list_users(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<ApiResponse<UserListData>>, CatalogError> {
    let usecase = ListUsersUseCase {
        users: state.user_repo(),
    };
    let mut page = PageRequest::default();
    if let Some(p) = query.page {
        page.page = p;
    }
    if let Some(l) = query.limit {
        page.limit = l;
    }
    let (rows, pagination) = usecase.execute(page).await?;
    Ok(Json(ApiResponse::ok(UserListData {
        users: rows.into_iter().map(UserResponse::from).collect(),
        pagination,
    })))
}

// ── GET /api/users/:id ───────────────────────────────────────────────────────

pub async fn get_user(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<UserResponse>>, CatalogError> {
    let usecase = GetUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

// ── POST /api/users ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
    pub phone: Option<String>,
}

pub async fn create_user(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), CatalogError> {
    let users = state.user_repo();
    let usecase = CreateUserUseCase { users };
    let id = usecase
        .execute(CreateUserInput {
            username: body.username,
            email: body.email,
            password: body.password,
            role: body.role.unwrap_or(Role::User),
            phone: body.phone,
        })
        .await?;
    let user = GetUserUseCase {
        users: state.user_repo(),
    }
    .execute(id)
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message("user created", user.into())),
    ))
}

// ── PUT /api/users/:id ───────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub password: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
    pub phone: Option<String>,
    pub profile: Option<Value>,
}

pub async fn update_user(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<()>>, CatalogError> {
    let usecase = UpdateUserUseCase {
        users: state.user_repo(),
    };
    usecase
        .execute(
            id,
            UpdateUserInput {
                password: body.password,
                role: body.role,
                is_active: body.is_active,
                phone: body.phone,
                profile: body.profile,
            },
        )
        .await?;
    Ok(Json(ApiResponse::message("user updated")))
}

// ── DELETE /api/users/:id ────────────────────────────────────────────────────

pub async fn delete_user(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, CatalogError> {
    let usecase = DeleteUserUseCase {
        users: state.user_repo(),
    };
    usecase.execute(id).await?;
    Ok(Json(ApiResponse::message("user deleted")))
}
