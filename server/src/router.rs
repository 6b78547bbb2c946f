use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post, put},
};
use tower_http::trace::TraceLayer;

use catalog_core::health::health;
use catalog_core::middleware::request_id_layer;

use crate::handlers::{
    auth::{get_profile, login, register, update_profile},
    detail_images::{
        add_detail_image, delete_detail_image, get_detail_image, list_detail_images,
        reorder_detail_image,
    },
    girls::{
        create_girl, delete_girl, get_girl, get_girl_image, list_girls, recent_girls,
        toggle_girl_status, update_girl, upload_girl_image,
    },
    reviews::{create_review, delete_review, list_reviews},
    settings::{get_settings, update_settings},
    users::{create_user, delete_user, get_user, list_users, update_user},
};
use crate::state::AppState;

const JSON_BODY_LIMIT: usize = 50 * 1024 * 1024;
const UPLOAD_BODY_LIMIT: usize = 30 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    // Multipart upload routes get their own, tighter body limit.
    let uploads = Router::new()
        .route("/girls/{id}/image", post(upload_girl_image))
        .route("/girls/{id}/detail-images", post(add_detail_image))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT));

    let api = Router::new()
        // Health
        .route("/health", get(health))
        // Auth (static segments win over the `/users/{id}` captures below)
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route("/users/profile", get(get_profile))
        .route("/users/profile", put(update_profile))
        // Girls
        .route("/girls", get(list_girls))
        .route("/girls", post(create_girl))
        .route("/girls/recent", get(recent_girls))
        .route("/girls/{id}", get(get_girl))
        .route("/girls/{id}", put(update_girl))
        .route("/girls/{id}", delete(delete_girl))
        .route("/girls/{id}/toggle-status", patch(toggle_girl_status))
        .route("/girls/{id}/image", get(get_girl_image))
        // Detail images
        .route("/girls/{id}/detail-images", get(list_detail_images))
        .route("/girls/{id}/detail-images/{image_id}", get(get_detail_image))
        .route(
            "/girls/{id}/detail-images/{image_id}",
            delete(delete_detail_image).patch(reorder_detail_image),
        )
        // Reviews — GET takes a listing id, DELETE a review id
        .route("/reviews", post(create_review))
        .route("/reviews/{id}", get(list_reviews).delete(delete_review))
        // Settings
        .route("/settings", get(get_settings))
        .route("/settings", put(update_settings))
        // Users (admin)
        .route("/users", get(list_users))
        .route("/users", post(create_user))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}", put(update_user))
        .route("/users/{id}", delete(delete_user))
        .merge(uploads);

    Router::new()
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(JSON_BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
