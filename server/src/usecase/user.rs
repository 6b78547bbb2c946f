use anyhow::Context as _;

use catalog_auth::role::Role;
use catalog_core::pagination::{PageInfo, PageRequest};

use crate::domain::repository::{NewUser, UserPatch, UserRepository};
use crate::domain::types::User;
use crate::error::CatalogError;
use crate::usecase::auth::BCRYPT_COST;

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ListUsersUseCase<U> {
    pub async fn execute(
        &self,
        page: PageRequest,
    ) -> Result<(Vec<User>, PageInfo), CatalogError> {
        let page = page.clamped();
        let rows = self.users.list(page).await?;
        let total = self.users.count().await?;
        Ok((rows, PageInfo::new(page, total)))
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetUserUseCase<U> {
    pub async fn execute(&self, id: i32) -> Result<User, CatalogError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::UserNotFound)
    }
}

// ── CreateUser (admin) ───────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub phone: Option<String>,
}

pub struct CreateUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> CreateUserUseCase<U> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<i32, CatalogError> {
        if input.username.trim().is_empty()
            || input.email.trim().is_empty()
            || input.password.is_empty()
        {
            return Err(CatalogError::BadRequest(
                "username, email and password are required",
            ));
        }
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(CatalogError::EmailTaken);
        }
        if self.users.find_by_username(&input.username).await?.is_some() {
            return Err(CatalogError::UsernameTaken);
        }
        let password_hash = bcrypt::hash(&input.password, BCRYPT_COST).context("hash password")?;
        self.users
            .create(&NewUser {
                username: input.username,
                email: input.email,
                password_hash,
                role: input.role,
                phone: input.phone,
            })
            .await
    }
}

// ── UpdateUser (admin) ───────────────────────────────────────────────────────

pub struct UpdateUserInput {
    pub password: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
    pub phone: Option<String>,
    pub profile: Option<serde_json::Value>,
}

pub struct UpdateUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UpdateUserUseCase<U> {
    pub async fn execute(&self, id: i32, input: UpdateUserInput) -> Result<(), CatalogError> {
        let password_hash = match input.password {
            Some(ref password) if !password.is_empty() => {
                Some(bcrypt::hash(password, BCRYPT_COST).context("hash password")?)
            }
            _ => None,
        };
        let patch = UserPatch {
            password_hash,
            role: input.role,
            is_active: input.is_active,
            phone: input.phone,
            profile: input.profile,
        };
        if patch.is_empty() {
            return Err(CatalogError::BadRequest("no fields to update"));
        }
        if self.users.update(id, &patch).await? {
            Ok(())
        } else {
            Err(CatalogError::UserNotFound)
        }
    }
}

// ── DeleteUser (admin) ───────────────────────────────────────────────────────

pub struct DeleteUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> DeleteUserUseCase<U> {
    pub async fn execute(&self, id: i32) -> Result<(), CatalogError> {
        if self.users.delete(id).await? {
            Ok(())
        } else {
            Err(CatalogError::UserNotFound)
        }
    }
}
