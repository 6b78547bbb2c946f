//! First-boot seeding: default settings keys and the admin account.
//!
//! Every statement here is idempotent — the startup routine runs this on
//! every boot, right after migrations.

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveValue::{NotSet, Set},
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    sea_query::OnConflict,
};
use tracing::info;

use catalog_auth::role::Role;
use catalog_schema::{settings, users};

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::usecase::auth::BCRYPT_COST;

/// Settings keys seeded with empty defaults at first boot.
const DEFAULT_SETTINGS: &[(&str, &str)] = &[
    ("contact_zalo", ""),
    ("contact_phone", ""),
    ("contact_telegram", ""),
    ("service_title", "Catalog"),
    ("service_description", ""),
];

pub async fn seed(db: &DatabaseConnection, config: &CatalogConfig) -> Result<(), CatalogError> {
    seed_settings(db).await?;
    seed_admin(db, config).await
}

async fn seed_settings(db: &DatabaseConnection) -> Result<(), CatalogError> {
    for (key, value) in DEFAULT_SETTINGS {
        settings::Entity::insert(settings::ActiveModel {
            key: Set((*key).to_owned()),
            value: Set((*value).to_owned()),
            updated_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(settings::Column::Key)
                .do_nothing()
                .to_owned(),
        )
        .do_nothing()
        .exec(db)
        .await
        .with_context(|| format!("seed setting {key}"))?;
    }
    Ok(())
}

async fn seed_admin(db: &DatabaseConnection, config: &CatalogConfig) -> Result<(), CatalogError> {
    let existing = users::Entity::find()
        .filter(users::Column::Username.eq(&config.admin_username))
        .one(db)
        .await
        .context("look up admin account")?;
    if existing.is_some() {
        return Ok(());
    }

    let password_hash =
        bcrypt::hash(&config.admin_password, BCRYPT_COST).context("hash admin password")?;
    let now = Utc::now();
    users::Entity::insert(users::ActiveModel {
        id: NotSet,
        username: Set(config.admin_username.clone()),
        email: Set(config.admin_email.clone()),
        password_hash: Set(password_hash),
        role: Set(Role::Admin.as_str().to_owned()),
        is_active: Set(true),
        phone: Set(None),
        profile: Set(serde_json::json!({})),
        created_at: Set(now),
        updated_at: Set(now),
    })
    .exec(db)
    .await
    .context("create admin account")?;
    info!(username = %config.admin_username, "seeded default admin account");
    Ok(())
}
