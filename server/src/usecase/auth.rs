use anyhow::Context as _;

use catalog_auth::role::Role;
use catalog_auth::token::issue_token;

use crate::domain::repository::{NewUser, UserPatch, UserRepository};
use crate::domain::types::User;
use crate::error::CatalogError;

/// bcrypt cost factor for all password hashes.
pub const BCRYPT_COST: u32 = 10;

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

#[derive(Debug)]
pub struct AuthOutput {
    pub token: String,
    pub user: User,
}

pub struct RegisterUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> RegisterUseCase<U> {
    pub async fn execute(&self, input: RegisterInput) -> Result<AuthOutput, CatalogError> {
        if input.username.trim().is_empty()
            || input.email.trim().is_empty()
            || input.password.is_empty()
        {
            return Err(CatalogError::BadRequest(
                "username, email and password are required",
            ));
        }
        // Two independent uniqueness checks, email first, username second.
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(CatalogError::EmailTaken);
        }
        if self.users.find_by_username(&input.username).await?.is_some() {
            return Err(CatalogError::UsernameTaken);
        }

        let password_hash = bcrypt::hash(&input.password, BCRYPT_COST).context("hash password")?;
        let id = self
            .users
            .create(&NewUser {
                username: input.username,
                email: input.email,
                password_hash,
                role: Role::User,
                phone: input.phone,
            })
            .await?;
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::UserNotFound)?;
        let token = issue_token(user.id, user.role, &self.jwt_secret)
            .map_err(|e| CatalogError::Internal(anyhow::anyhow!(e)))?;
        Ok(AuthOutput { token, user })
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> LoginUseCase<U> {
    pub async fn execute(&self, input: LoginInput) -> Result<AuthOutput, CatalogError> {
        // Unknown email, wrong password and disabled account all collapse to
        // the same generic error.
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(CatalogError::InvalidCredentials)?;
        if !user.is_active {
            return Err(CatalogError::InvalidCredentials);
        }
        let verified = bcrypt::verify(&input.password, &user.password_hash)
            .context("verify password")?;
        if !verified {
            return Err(CatalogError::InvalidCredentials);
        }
        let token = issue_token(user.id, user.role, &self.jwt_secret)
            .map_err(|e| CatalogError::Internal(anyhow::anyhow!(e)))?;
        Ok(AuthOutput { token, user })
    }
}

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetProfileUseCase<U> {
    pub async fn execute(&self, user_id: i32) -> Result<User, CatalogError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(CatalogError::UserNotFound)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileInput {
    pub password: Option<String>,
    pub phone: Option<String>,
    pub profile: Option<serde_json::Value>,
}

pub struct UpdateProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UpdateProfileUseCase<U> {
    pub async fn execute(
        &self,
        user_id: i32,
        input: UpdateProfileInput,
    ) -> Result<(), CatalogError> {
        let password_hash = match input.password {
            Some(ref password) if !password.is_empty() => {
                Some(bcrypt::hash(password, BCRYPT_COST).context("hash password")?)
            }
            _ => None,
        };
        let patch = UserPatch {
            password_hash,
            phone: input.phone,
            profile: input.profile,
            ..Default::default()
        };
        if patch.is_empty() {
            return Err(CatalogError::BadRequest("no fields to update"));
        }
        if self.users.update(user_id, &patch).await? {
            Ok(())
        } else {
            Err(CatalogError::UserNotFound)
        }
    }
}
