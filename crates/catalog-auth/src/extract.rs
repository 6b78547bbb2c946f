//! Bearer-token identity extractors.

use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use http::request::Parts;

use crate::role::Role;
use crate::token::validate_token;

/// Provides the HMAC secret used to validate bearer tokens.
///
/// Implemented by the application state so extractors can run against it.
pub trait JwtSecretProvider {
    fn jwt_secret(&self) -> &str;
}

/// Rejection emitted by the identity extractors, in the standard
/// `{success:false, message}` envelope.
#[derive(Debug)]
pub struct AuthRejection {
    pub status: StatusCode,
    pub message: &'static str,
}

impl AuthRejection {
    fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "authentication required",
        }
    }

    fn forbidden() -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: "admin access required",
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "success": false,
            "message": self.message,
        });
        (self.status, axum::Json(body)).into_response()
    }
}

/// Authenticated caller, extracted from the `Authorization: Bearer` header.
///
/// Returns 401 if the header is absent, not a bearer token, or the token
/// fails validation. Role enforcement is a separate gate — see [`AdminIdentity`].
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_id: i32,
    pub role: Role,
}

impl<S> FromRequestParts<S> for Identity
where
    S: JwtSecretProvider + Send + Sync,
{
    type Rejection = AuthRejection;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract values synchronously and return a 'static async move block to
    // avoid precise-capture lifetime issues (E0195).
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(str::to_owned);
        let secret = state.jwt_secret().to_owned();

        async move {
            let token = token.ok_or_else(AuthRejection::unauthorized)?;
            let info = validate_token(&token, &secret)
                .map_err(|_| AuthRejection::unauthorized())?;
            Ok(Self {
                user_id: info.user_id,
                role: info.role,
            })
        }
    }
}

/// Second gate on top of [`Identity`]: requires `role == admin`.
///
/// Token validity and role are checked independently — a valid non-admin
/// token yields 403, anything else 401.
#[derive(Debug, Clone, Copy)]
pub struct AdminIdentity(pub Identity);

impl<S> FromRequestParts<S> for AdminIdentity
where
    S: JwtSecretProvider + Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = Identity::from_request_parts(parts, state);
        async move {
            let identity = identity.await?;
            if identity.role != Role::Admin {
                return Err(AuthRejection::forbidden());
            }
            Ok(Self(identity))
        }
    }
}
