use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Catalog service error variants.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("girl not found")]
    GirlNotFound,
    #[error("image not found")]
    ImageNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("review not found")]
    ReviewNotFound,
    // One message for unknown email and wrong password — no user enumeration.
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("email already registered")]
    EmailTaken,
    #[error("username already taken")]
    UsernameTaken,
    #[error("forbidden")]
    Forbidden,
    #[error("{0}")]
    BadRequest(&'static str),
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl CatalogError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::GirlNotFound
            | Self::ImageNotFound
            | Self::UserNotFound
            | Self::ReviewNotFound => StatusCode::NOT_FOUND,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::EmailTaken | Self::UsernameTaken => StatusCode::CONFLICT,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, "internal error");
        }
        let body = serde_json::json!({
            "success": false,
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
