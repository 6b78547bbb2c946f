pub mod auth;
pub mod detail_image;
pub mod listing;
pub mod review;
pub mod settings;
pub mod user;
