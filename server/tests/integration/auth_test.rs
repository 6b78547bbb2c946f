use catalog_auth::role::Role;
use catalog_auth::token::validate_token;
use catalog_server::error::CatalogError;
use catalog_server::usecase::auth::{
    GetProfileUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
    UpdateProfileInput, UpdateProfileUseCase,
};
use catalog_server::usecase::user::{CreateUserInput, CreateUserUseCase};

use crate::helpers::{MockUserRepo, TEST_JWT_SECRET, test_user};

fn register_input() -> RegisterInput {
    RegisterInput {
        username: "anna".into(),
        email: "anna@example.com".into(),
        password: "password123".into(),
        phone: None,
    }
}

// ── Register ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_and_issue_valid_token() {
    let usecase = RegisterUseCase {
        users: MockUserRepo::empty(),
        jwt_secret: TEST_JWT_SECRET.into(),
    };

    let output = usecase.execute(register_input()).await.unwrap();

    assert_eq!(output.user.username, "anna");
    assert_eq!(output.user.role, Role::User);
    assert!(bcrypt::verify("password123", &output.user.password_hash).unwrap());

    let info = validate_token(&output.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, output.user.id);
    assert_eq!(info.role, Role::User);
}

#[tokio::test]
async fn should_reject_duplicate_email_before_checking_username() {
    let mut existing = test_user(1, Role::User);
    existing.email = "anna@example.com".into();
    existing.username = "anna".into();
    let usecase = RegisterUseCase {
        users: MockUserRepo::new(vec![existing]),
        jwt_secret: TEST_JWT_SECRET.into(),
    };

    // Both collide; the email check runs first.
    let result = usecase.execute(register_input()).await;
    assert!(matches!(result, Err(CatalogError::EmailTaken)));
}

#[tokio::test]
async fn should_reject_duplicate_username_when_email_is_free() {
    let mut existing = test_user(1, Role::User);
    existing.username = "anna".into();
    let usecase = RegisterUseCase {
        users: MockUserRepo::new(vec![existing]),
        jwt_secret: TEST_JWT_SECRET.into(),
    };

    let result = usecase.execute(register_input()).await;
    assert!(matches!(result, Err(CatalogError::UsernameTaken)));
}

#[tokio::test]
async fn should_reject_registration_with_missing_fields() {
    let usecase = RegisterUseCase {
        users: MockUserRepo::empty(),
        jwt_secret: TEST_JWT_SECRET.into(),
    };

    let mut input = register_input();
    input.password = String::new();
    let result = usecase.execute(input).await;
    assert!(matches!(result, Err(CatalogError::BadRequest(_))));
}

// ── Login ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_login_with_correct_credentials() {
    let user = test_user(1, Role::User);
    let email = user.email.clone();
    let usecase = LoginUseCase {
        users: MockUserRepo::new(vec![user]),
        jwt_secret: TEST_JWT_SECRET.into(),
    };

    let output = usecase
        .execute(LoginInput {
            email,
            password: "password123".into(),
        })
        .await
        .unwrap();

    let info = validate_token(&output.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, 1);
}

#[tokio::test]
async fn should_not_reveal_whether_email_exists() {
    let user = test_user(1, Role::User);
    let email = user.email.clone();
    let usecase = LoginUseCase {
        users: MockUserRepo::new(vec![user]),
        jwt_secret: TEST_JWT_SECRET.into(),
    };

    let unknown_email = usecase
        .execute(LoginInput {
            email: "nobody@example.com".into(),
            password: "password123".into(),
        })
        .await;
    let wrong_password = usecase
        .execute(LoginInput {
            email,
            password: "wrong".into(),
        })
        .await;

    // Both failures collapse to the same error.
    assert!(matches!(unknown_email, Err(CatalogError::InvalidCredentials)));
    assert!(matches!(wrong_password, Err(CatalogError::InvalidCredentials)));
}

#[tokio::test]
async fn should_reject_login_for_disabled_account() {
    let mut user = test_user(1, Role::User);
    user.is_active = false;
    let email = user.email.clone();
    let usecase = LoginUseCase {
        users: MockUserRepo::new(vec![user]),
        jwt_secret: TEST_JWT_SECRET.into(),
    };

    let result = usecase
        .execute(LoginInput {
            email,
            password: "password123".into(),
        })
        .await;
    assert!(matches!(result, Err(CatalogError::InvalidCredentials)));
}

// ── Profile ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_get_profile_by_token_user_id() {
    let usecase = GetProfileUseCase {
        users: MockUserRepo::new(vec![test_user(3, Role::User)]),
    };

    let user = usecase.execute(3).await.unwrap();
    assert_eq!(user.id, 3);

    let missing = usecase.execute(99).await;
    assert!(matches!(missing, Err(CatalogError::UserNotFound)));
}

#[tokio::test]
async fn should_rehash_password_on_profile_update() {
    let usecase = UpdateProfileUseCase {
        users: MockUserRepo::new(vec![test_user(1, Role::User)]),
    };

    usecase
        .execute(
            1,
            UpdateProfileInput {
                password: Some("new-password".into()),
                phone: None,
                profile: None,
            },
        )
        .await
        .unwrap();

    let hash = usecase.users.users.lock().unwrap()[0].password_hash.clone();
    assert!(bcrypt::verify("new-password", &hash).unwrap());
}

#[tokio::test]
async fn should_reject_empty_profile_update() {
    let usecase = UpdateProfileUseCase {
        users: MockUserRepo::new(vec![test_user(1, Role::User)]),
    };

    let result = usecase
        .execute(
            1,
            UpdateProfileInput {
                password: None,
                phone: None,
                profile: None,
            },
        )
        .await;
    assert!(matches!(result, Err(CatalogError::BadRequest(_))));
}

// ── Admin-created users ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_admin_user_with_requested_role() {
    let usecase = CreateUserUseCase {
        users: MockUserRepo::empty(),
    };

    let id = usecase
        .execute(CreateUserInput {
            username: "boss".into(),
            email: "boss@example.com".into(),
            password: "password123".into(),
            role: Role::Admin,
            phone: None,
        })
        .await
        .unwrap();

    let created = usecase.users.users.lock().unwrap()[0].clone();
    assert_eq!(created.id, id);
    assert_eq!(created.role, Role::Admin);
}
