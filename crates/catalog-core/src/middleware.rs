//! HTTP middleware shared by the catalog routers.

use axum::http::HeaderName;
use tower_http::request_id::{MakeRequestId, RequestId, SetRequestIdLayer};
use uuid::Uuid;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Mints a fresh v4 UUID for each request that arrives without one.
#[derive(Clone, Default)]
pub struct CatalogRequestId;

impl MakeRequestId for CatalogRequestId {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        // A hyphenated UUID is always a valid header value.
        Some(RequestId::new(id.parse().unwrap()))
    }
}

/// Layer that stamps [`REQUEST_ID_HEADER`] onto incoming requests.
/// Ids already supplied by the client are left untouched.
pub fn request_id_layer() -> SetRequestIdLayer<CatalogRequestId> {
    SetRequestIdLayer::new(HeaderName::from_static(REQUEST_ID_HEADER), CatalogRequestId)
}
