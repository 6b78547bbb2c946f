use std::collections::BTreeMap;

use axum::{Json, extract::State};
use serde::Serialize;

use catalog_auth::extract::AdminIdentity;
use catalog_core::response::ApiResponse;

use crate::error::CatalogError;
use crate::state::AppState;
use crate::usecase::settings::{GetSettingsUseCase, UpdateSettingsUseCase};

// ── GET /api/settings ────────────────────────────────────────────────────────

pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<BTreeMap<String, String>>>, CatalogError> {
    let usecase = GetSettingsUseCase {
        settings: state.settings_repo(),
    };
    let settings = usecase.execute().await?;
    Ok(Json(ApiResponse::ok(settings)))
}

// ── PUT /api/settings ────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsWriteData {
    pub written: usize,
}

pub async fn update_settings(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Json(body): Json<serde_json::Map<String, serde_json::Value>>,
) -> Result<Json<ApiResponse<SettingsWriteData>>, CatalogError> {
    let usecase = UpdateSettingsUseCase {
        settings: state.settings_repo(),
    };
    let written = usecase.execute(body).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "settings updated",
        SettingsWriteData { written },
    )))
}
