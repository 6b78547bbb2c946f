//! sea-orm entities for the catalog database.

pub mod detail_images;
pub mod girls;
pub mod reviews;
pub mod settings;
pub mod users;
