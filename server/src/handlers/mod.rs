pub mod auth;
pub mod detail_images;
pub mod girls;
pub mod reviews;
pub mod settings;
pub mod users;
