use catalog_core::pagination::PageRequest;
use catalog_server::domain::image::{PLACEHOLDER_IMAGE_URL, blob_image_url};
use catalog_server::domain::types::{ListingFilter, ListingPatch, NewListing};
use catalog_server::error::CatalogError;
use catalog_server::usecase::listing::{
    CreateGirlUseCase, DeleteGirlUseCase, GetGirlImageUseCase, GetGirlUseCase, ListGirlsUseCase,
    RecentGirlsUseCase, ToggleGirlStatusUseCase, UpdateGirlImageUseCase, UpdateGirlUseCase,
};

use crate::helpers::{MockDetailImageRepo, MockListingRepo, test_detail_image, test_listing};

fn page(page: u32, limit: u32) -> PageRequest {
    PageRequest { page, limit }
}

// ── image resolution ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_serve_stored_url_verbatim_when_present() {
    let mut row = test_listing(1);
    row.img_url = "https://cdn.example.com/a.jpg".into();
    let usecase = GetGirlUseCase {
        listings: MockListingRepo::new(vec![row]),
        detail_images: MockDetailImageRepo::default(),
    };

    let view = usecase.execute(1).await.unwrap();
    assert_eq!(view.image, "https://cdn.example.com/a.jpg");
}

#[tokio::test]
async fn should_fall_back_to_blob_endpoint_when_url_empty_but_blob_present() {
    let usecase = GetGirlUseCase {
        listings: MockListingRepo::new(vec![test_listing(7)]).with_blob(7, vec![1, 2, 3]),
        detail_images: MockDetailImageRepo::default(),
    };

    let view = usecase.execute(7).await.unwrap();
    assert_eq!(view.image, blob_image_url(7));
}

#[tokio::test]
async fn should_fall_back_to_placeholder_when_no_url_and_no_blob() {
    let usecase = GetGirlUseCase {
        listings: MockListingRepo::new(vec![test_listing(1)]),
        detail_images: MockDetailImageRepo::default(),
    };

    let view = usecase.execute(1).await.unwrap();
    assert_eq!(view.image, PLACEHOLDER_IMAGE_URL);
}

#[tokio::test]
async fn should_treat_whitespace_only_url_as_absent() {
    let mut row = test_listing(1);
    row.img_url = "   ".into();
    let usecase = GetGirlUseCase {
        listings: MockListingRepo::new(vec![row]),
        detail_images: MockDetailImageRepo::default(),
    };

    let view = usecase.execute(1).await.unwrap();
    assert_eq!(view.image, PLACEHOLDER_IMAGE_URL);
}

// ── GetGirl ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_not_found_for_missing_listing() {
    let usecase = GetGirlUseCase {
        listings: MockListingRepo::default(),
        detail_images: MockDetailImageRepo::default(),
    };

    let result = usecase.execute(99).await;
    assert!(matches!(result, Err(CatalogError::GirlNotFound)));
}

#[tokio::test]
async fn should_increment_view_counter_on_get() {
    let listings = MockListingRepo::new(vec![test_listing(1)]);
    let usecase = GetGirlUseCase {
        listings,
        detail_images: MockDetailImageRepo::default(),
    };

    usecase.execute(1).await.unwrap();
    usecase.execute(1).await.unwrap();

    let viewed = usecase.listings.listings.lock().unwrap()[0].viewed;
    assert_eq!(viewed, 2);
}

#[tokio::test]
async fn should_attach_detail_image_urls_in_order() {
    let detail_images = MockDetailImageRepo::new(vec![
        (test_detail_image(10, 1, 2), vec![]),
        (test_detail_image(11, 1, 1), vec![]),
    ]);
    let usecase = GetGirlUseCase {
        listings: MockListingRepo::new(vec![test_listing(1)]),
        detail_images,
    };

    let view = usecase.execute(1).await.unwrap();
    assert_eq!(
        view.detail_image_urls,
        vec![
            "/api/girls/1/detail-images/11".to_string(),
            "/api/girls/1/detail-images/10".to_string(),
        ]
    );
}

// ── ListGirls ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_paginate_with_ceiling_page_count() {
    let rows = (1..=25).map(test_listing).collect();
    let usecase = ListGirlsUseCase {
        listings: MockListingRepo::new(rows),
        detail_images: MockDetailImageRepo::default(),
    };

    let (views, info) = usecase
        .execute(ListingFilter::default(), page(3, 10))
        .await
        .unwrap();

    assert_eq!(views.len(), 5);
    assert_eq!(info.total, 25);
    assert_eq!(info.total_pages, 3);
    assert_eq!(info.page, 3);
}

#[tokio::test]
async fn should_clamp_out_of_range_limit() {
    let rows = (1..=5).map(test_listing).collect();
    let usecase = ListGirlsUseCase {
        listings: MockListingRepo::new(rows),
        detail_images: MockDetailImageRepo::default(),
    };

    let (_, info) = usecase
        .execute(ListingFilter::default(), page(1, 1000))
        .await
        .unwrap();
    assert_eq!(info.limit, 100);

    let (_, info) = usecase
        .execute(ListingFilter::default(), page(0, 0))
        .await
        .unwrap();
    assert_eq!(info.limit, 1);
    assert_eq!(info.page, 1);
}

#[tokio::test]
async fn should_order_by_display_order_then_recency() {
    let mut pinned = test_listing(1);
    pinned.display_order = 5;
    let rows = vec![pinned, test_listing(2), test_listing(3)];
    let usecase = ListGirlsUseCase {
        listings: MockListingRepo::new(rows),
        detail_images: MockDetailImageRepo::default(),
    };

    let (views, _) = usecase
        .execute(ListingFilter::default(), page(1, 10))
        .await
        .unwrap();

    let ids: Vec<i32> = views.iter().map(|v| v.listing.id).collect();
    assert_eq!(ids, vec![1, 3, 2]);
}

#[tokio::test]
async fn should_filter_by_case_insensitive_substring() {
    let mut a = test_listing(1);
    a.name = "Anna".into();
    let mut b = test_listing(2);
    b.name = "Maria".into();
    b.description = Some("contains ANNA too".into());
    let mut c = test_listing(3);
    c.name = "Linh".into();

    let usecase = ListGirlsUseCase {
        listings: MockListingRepo::new(vec![a, b, c]),
        detail_images: MockDetailImageRepo::default(),
    };

    let filter = ListingFilter {
        q: Some("anna".into()),
        area: None,
    };
    let (views, info) = usecase.execute(filter, page(1, 10)).await.unwrap();

    assert_eq!(info.total, 2);
    let ids: Vec<i32> = views.iter().map(|v| v.listing.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn should_match_area_as_exact_case_substring() {
    let mut downtown = test_listing(1);
    downtown.area = Some("Downtown".into());
    let mut uptown = test_listing(2);
    uptown.area = Some("Uptown".into());

    let usecase = ListGirlsUseCase {
        listings: MockListingRepo::new(vec![downtown, uptown]),
        detail_images: MockDetailImageRepo::default(),
    };

    let filter = ListingFilter {
        q: None,
        area: Some("Down".into()),
    };
    let (views, info) = usecase.execute(filter, page(1, 10)).await.unwrap();
    assert_eq!(info.total, 1);
    assert_eq!(views[0].listing.id, 1);

    // Plain LIKE in the database, so "downtown" does not match "Downtown".
    let filter = ListingFilter {
        q: None,
        area: Some("downtown".into()),
    };
    let (views, info) = usecase.execute(filter, page(1, 10)).await.unwrap();
    assert_eq!(info.total, 0);
    assert!(views.is_empty());
}

// ── RecentGirls ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_exclude_inactive_listings_from_recent() {
    let mut hidden = test_listing(3);
    hidden.is_active = false;
    let usecase = RecentGirlsUseCase {
        listings: MockListingRepo::new(vec![test_listing(1), test_listing(2), hidden]),
        detail_images: MockDetailImageRepo::default(),
    };

    let views = usecase.execute(8).await.unwrap();
    let ids: Vec<i32> = views.iter().map(|v| v.listing.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

// ── CreateGirl / UpdateGirl ──────────────────────────────────────────────────

#[tokio::test]
async fn should_create_listing_with_empty_image_url() {
    let usecase = CreateGirlUseCase {
        listings: MockListingRepo::default(),
    };

    let view = usecase
        .execute(NewListing {
            name: "Anna".into(),
            ..NewListing::default()
        })
        .await
        .unwrap();

    assert_eq!(view.listing.name, "Anna");
    // No stored URL and no blob yet, so the view falls back to the placeholder.
    assert_eq!(view.image, PLACEHOLDER_IMAGE_URL);
    assert!(view.detail_image_urls.is_empty());
}

#[tokio::test]
async fn should_reject_create_with_blank_name() {
    let usecase = CreateGirlUseCase {
        listings: MockListingRepo::default(),
    };

    let result = usecase
        .execute(NewListing {
            name: "  ".into(),
            ..NewListing::default()
        })
        .await;
    assert!(matches!(result, Err(CatalogError::BadRequest(_))));
}

#[tokio::test]
async fn should_reject_empty_update_patch() {
    let usecase = UpdateGirlUseCase {
        listings: MockListingRepo::new(vec![test_listing(1)]),
    };

    let result = usecase.execute(1, ListingPatch::default()).await;
    assert!(matches!(result, Err(CatalogError::BadRequest(_))));
}

#[tokio::test]
async fn should_return_not_found_when_updating_missing_listing() {
    let usecase = UpdateGirlUseCase {
        listings: MockListingRepo::default(),
    };

    let patch = ListingPatch {
        name: Some("new name".into()),
        ..ListingPatch::default()
    };
    let result = usecase.execute(99, patch).await;
    assert!(matches!(result, Err(CatalogError::GirlNotFound)));
}

// ── ToggleGirlStatus / DeleteGirl ────────────────────────────────────────────

#[tokio::test]
async fn should_toggle_active_flag_back_and_forth() {
    let usecase = ToggleGirlStatusUseCase {
        listings: MockListingRepo::new(vec![test_listing(1)]),
    };

    assert!(!usecase.execute(1).await.unwrap());
    assert!(usecase.execute(1).await.unwrap());
}

#[tokio::test]
async fn should_return_not_found_when_deleting_missing_listing() {
    let usecase = DeleteGirlUseCase {
        listings: MockListingRepo::default(),
    };

    let result = usecase.execute(42).await;
    assert!(matches!(result, Err(CatalogError::GirlNotFound)));
}

// ── image upload / serving ───────────────────────────────────────────────────

#[tokio::test]
async fn should_point_stored_url_at_blob_endpoint_after_upload() {
    let usecase = UpdateGirlImageUseCase {
        listings: MockListingRepo::new(vec![test_listing(5)]),
    };

    let url = usecase.execute(5, &[0xFF, 0xD8, 0xFF]).await.unwrap();
    assert_eq!(url, "/api/girls/5/image");

    let row = usecase.listings.listings.lock().unwrap()[0].clone();
    assert_eq!(row.img_url, "/api/girls/5/image");
    assert!(row.has_blob);
}

#[tokio::test]
async fn should_reject_empty_image_upload() {
    let usecase = UpdateGirlImageUseCase {
        listings: MockListingRepo::new(vec![test_listing(5)]),
    };

    let result = usecase.execute(5, &[]).await;
    assert!(matches!(result, Err(CatalogError::BadRequest(_))));
}

#[tokio::test]
async fn should_sniff_png_content_type_from_magic_bytes() {
    let png = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    let usecase = GetGirlImageUseCase {
        listings: MockListingRepo::new(vec![test_listing(1)]).with_blob(1, png.clone()),
    };

    let (content_type, bytes) = usecase.execute(1).await.unwrap();
    assert_eq!(content_type, "image/png");
    assert_eq!(bytes, png);
}

#[tokio::test]
async fn should_default_to_jpeg_for_unknown_bytes() {
    let usecase = GetGirlImageUseCase {
        listings: MockListingRepo::new(vec![test_listing(1)]).with_blob(1, vec![0x00, 0x01]),
    };

    let (content_type, _) = usecase.execute(1).await.unwrap();
    assert_eq!(content_type, "image/jpeg");
}

#[tokio::test]
async fn should_return_image_not_found_when_no_blob_stored() {
    let usecase = GetGirlImageUseCase {
        listings: MockListingRepo::new(vec![test_listing(1)]),
    };

    let result = usecase.execute(1).await;
    assert!(matches!(result, Err(CatalogError::ImageNotFound)));
}
