
mod auth_test;
mod detail_image_test;
mod listing_test;
mod review_test;
