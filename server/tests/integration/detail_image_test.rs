use catalog_server::error::CatalogError;
use catalog_server::usecase::detail_image::{
    AddDetailImageUseCase, DeleteDetailImageUseCase, GetDetailImageUseCase,
    ListDetailImagesUseCase, ReorderDetailImageUseCase,
};

use crate::helpers::{MockDetailImageRepo, MockListingRepo, test_detail_image, test_listing};

// ── AddDetailImage ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_add_image_and_return_retrieval_url() {
    let usecase = AddDetailImageUseCase {
        listings: MockListingRepo::new(vec![test_listing(3)]),
        detail_images: MockDetailImageRepo::default(),
    };

    let url = usecase.execute(3, &[0xFF, 0xD8], 0).await.unwrap();
    assert_eq!(url, "/api/girls/3/detail-images/1");
}

#[tokio::test]
async fn should_reject_detail_image_for_missing_listing() {
    let usecase = AddDetailImageUseCase {
        listings: MockListingRepo::default(),
        detail_images: MockDetailImageRepo::default(),
    };

    let result = usecase.execute(99, &[0xFF, 0xD8], 0).await;
    assert!(matches!(result, Err(CatalogError::GirlNotFound)));
}

#[tokio::test]
async fn should_reject_empty_detail_image() {
    let usecase = AddDetailImageUseCase {
        listings: MockListingRepo::new(vec![test_listing(3)]),
        detail_images: MockDetailImageRepo::default(),
    };

    let result = usecase.execute(3, &[], 0).await;
    assert!(matches!(result, Err(CatalogError::BadRequest(_))));
}

// ── GetDetailImage — the id pair must match the same row ─────────────────────

#[tokio::test]
async fn should_fetch_image_only_with_matching_id_pair() {
    let gif = vec![0x47, 0x49, 0x46, 0x38];
    let usecase = GetDetailImageUseCase {
        detail_images: MockDetailImageRepo::new(vec![(test_detail_image(10, 1, 0), gif.clone())]),
    };

    let (content_type, bytes) = usecase.execute(1, 10).await.unwrap();
    assert_eq!(content_type, "image/gif");
    assert_eq!(bytes, gif);

    // Right image id, wrong listing id.
    let result = usecase.execute(2, 10).await;
    assert!(matches!(result, Err(CatalogError::ImageNotFound)));
}

// ── ListDetailImages ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_metadata_ordered_by_image_order() {
    let usecase = ListDetailImagesUseCase {
        detail_images: MockDetailImageRepo::new(vec![
            (test_detail_image(10, 1, 2), vec![]),
            (test_detail_image(11, 1, 0), vec![]),
            (test_detail_image(12, 2, 1), vec![]),
        ]),
    };

    let metas = usecase.execute(1).await.unwrap();
    let ids: Vec<i32> = metas.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![11, 10]);
}

// ── Delete / Reorder ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_not_delete_image_under_wrong_listing() {
    let usecase = DeleteDetailImageUseCase {
        detail_images: MockDetailImageRepo::new(vec![(test_detail_image(10, 1, 0), vec![])]),
    };

    let result = usecase.execute(2, 10).await;
    assert!(matches!(result, Err(CatalogError::ImageNotFound)));

    usecase.execute(1, 10).await.unwrap();
    assert!(usecase.detail_images.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_update_order_in_place() {
    let usecase = ReorderDetailImageUseCase {
        detail_images: MockDetailImageRepo::new(vec![
            (test_detail_image(10, 1, 0), vec![]),
            (test_detail_image(11, 1, 1), vec![]),
        ]),
    };

    usecase.execute(1, 10, 5).await.unwrap();

    let rows = usecase.detail_images.rows.lock().unwrap();
    let reordered = rows.iter().find(|(m, _)| m.id == 10).unwrap();
    assert_eq!(reordered.0.image_order, 5);
    // Sibling orders are untouched, gaps and all.
    let sibling = rows.iter().find(|(m, _)| m.id == 11).unwrap();
    assert_eq!(sibling.0.image_order, 1);
}
