use catalog_auth::extract::Identity;
use catalog_auth::role::Role;
use catalog_server::error::CatalogError;
use catalog_server::usecase::review::{
    CreateReviewInput, CreateReviewUseCase, DeleteReviewUseCase, ListReviewsUseCase,
};

use crate::helpers::{MockListingRepo, MockReviewRepo, test_listing, test_review};

fn identity(user_id: i32, role: Role) -> Identity {
    Identity { user_id, role }
}

// ── CreateReview ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_take_author_from_token_not_body() {
    let usecase = CreateReviewUseCase {
        reviews: MockReviewRepo::default(),
        listings: MockListingRepo::new(vec![test_listing(1)]),
    };

    usecase
        .execute(
            42,
            CreateReviewInput {
                girl_id: 1,
                rating: 5,
                comment: Some("great".into()),
            },
        )
        .await
        .unwrap();

    let created = usecase.reviews.reviews.lock().unwrap()[0].clone();
    assert_eq!(created.user_id, 42);
}

#[tokio::test]
async fn should_reject_out_of_range_rating() {
    let usecase = CreateReviewUseCase {
        reviews: MockReviewRepo::default(),
        listings: MockListingRepo::new(vec![test_listing(1)]),
    };

    for rating in [0, 6, -1] {
        let result = usecase
            .execute(
                1,
                CreateReviewInput {
                    girl_id: 1,
                    rating,
                    comment: None,
                },
            )
            .await;
        assert!(
            matches!(result, Err(CatalogError::BadRequest(_))),
            "rating {rating} should be rejected"
        );
    }
}

#[tokio::test]
async fn should_reject_review_for_missing_listing() {
    let usecase = CreateReviewUseCase {
        reviews: MockReviewRepo::default(),
        listings: MockListingRepo::default(),
    };

    let result = usecase
        .execute(
            1,
            CreateReviewInput {
                girl_id: 99,
                rating: 3,
                comment: None,
            },
        )
        .await;
    assert!(matches!(result, Err(CatalogError::GirlNotFound)));
}

// ── ListReviews ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_only_reviews_of_requested_listing() {
    let usecase = ListReviewsUseCase {
        reviews: MockReviewRepo::new(vec![
            test_review(1, 10, 1),
            test_review(2, 11, 2),
            test_review(3, 12, 1),
        ]),
    };

    let reviews = usecase.execute(1).await.unwrap();
    assert_eq!(reviews.len(), 2);
    assert!(reviews.iter().all(|r| r.girl_id == 1));
}

// ── DeleteReview ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_let_owner_delete_own_review() {
    let usecase = DeleteReviewUseCase {
        reviews: MockReviewRepo::new(vec![test_review(1, 42, 1)]),
    };

    usecase.execute(identity(42, Role::User), 1).await.unwrap();
    assert!(usecase.reviews.reviews.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_forbid_deleting_someone_elses_review() {
    let usecase = DeleteReviewUseCase {
        reviews: MockReviewRepo::new(vec![test_review(1, 42, 1)]),
    };

    let result = usecase.execute(identity(7, Role::User), 1).await;
    assert!(matches!(result, Err(CatalogError::Forbidden)));
}

#[tokio::test]
async fn should_let_admin_delete_any_review() {
    let usecase = DeleteReviewUseCase {
        reviews: MockReviewRepo::new(vec![test_review(1, 42, 1)]),
    };

    usecase.execute(identity(7, Role::Admin), 1).await.unwrap();
    assert!(usecase.reviews.reviews.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_return_not_found_for_missing_review() {
    let usecase = DeleteReviewUseCase {
        reviews: MockReviewRepo::default(),
    };

    let result = usecase.execute(identity(1, Role::Admin), 99).await;
    assert!(matches!(result, Err(CatalogError::ReviewNotFound)));
}
