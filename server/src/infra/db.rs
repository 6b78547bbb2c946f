use std::collections::BTreeMap;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::{NotSet, Set}, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, FromQueryResult, IsolationLevel, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
    sea_query::{Expr, Func, OnConflict},
};

use catalog_auth::role::Role;
use catalog_core::pagination::PageRequest;
use catalog_schema::{detail_images, girls, reviews, settings, users};

use crate::domain::repository::{
    DetailImageRepository, ListingRepository, NewUser, ReviewRepository, SettingsRepository,
    UserPatch, UserRepository,
};
use crate::domain::types::{
    DetailImageMeta, Listing, ListingFilter, ListingInfo, ListingPatch, NewListing, Review, User,
};
use crate::error::CatalogError;

// ── Listing repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbListingRepository {
    pub db: DatabaseConnection,
}

/// Read projection of a listing. The legacy blob is folded into `has_blob`
/// so read paths never pull image bytes off the wire.
#[derive(Debug, FromQueryResult)]
struct ListingRow {
    id: i32,
    name: String,
    area: Option<String>,
    price: Option<String>,
    rating: f64,
    img_url: String,
    has_blob: bool,
    zalo: Option<String>,
    phone: Option<String>,
    description: Option<String>,
    is_active: bool,
    is_pinned: bool,
    display_order: i32,
    info: serde_json::Value,
    viewed: i64,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

fn listing_from_row(row: ListingRow) -> Listing {
    Listing {
        id: row.id,
        name: row.name,
        area: row.area,
        price: row.price,
        rating: row.rating,
        img_url: row.img_url,
        has_blob: row.has_blob,
        zalo: row.zalo,
        phone: row.phone,
        description: row.description,
        is_active: row.is_active,
        is_pinned: row.is_pinned,
        display_order: row.display_order,
        info: ListingInfo::from_json_lenient(&row.info),
        viewed: row.viewed,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn listing_select() -> sea_orm::Select<girls::Entity> {
    girls::Entity::find()
        .select_only()
        .columns([
            girls::Column::Id,
            girls::Column::Name,
            girls::Column::Area,
            girls::Column::Price,
            girls::Column::Rating,
            girls::Column::ImgUrl,
            girls::Column::Zalo,
            girls::Column::Phone,
            girls::Column::Description,
            girls::Column::IsActive,
            girls::Column::IsPinned,
            girls::Column::DisplayOrder,
            girls::Column::Info,
            girls::Column::Viewed,
            girls::Column::CreatedAt,
            girls::Column::UpdatedAt,
        ])
        .column_as(girls::Column::Image.is_not_null(), "has_blob")
}

fn listing_condition(filter: &ListingFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(q) = filter.q.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = format!("%{}%", q.to_lowercase());
        cond = cond.add(
            Condition::any()
                .add(
                    Expr::expr(Func::lower(Expr::col((
                        girls::Entity,
                        girls::Column::Name,
                    ))))
                    .like(pattern.clone()),
                )
                .add(
                    Expr::expr(Func::lower(Expr::col((
                        girls::Entity,
                        girls::Column::Description,
                    ))))
                    .like(pattern),
                ),
        );
    }
    if let Some(area) = filter.area.as_deref().filter(|s| !s.trim().is_empty()) {
        cond = cond.add(girls::Column::Area.contains(area));
    }
    cond
}

impl ListingRepository for DbListingRepository {
    async fn list(
        &self,
        filter: &ListingFilter,
        page: PageRequest,
    ) -> Result<Vec<Listing>, CatalogError> {
        let page = page.clamped();
        let rows = listing_select()
            .filter(listing_condition(filter))
            .order_by_desc(girls::Column::DisplayOrder)
            .order_by_desc(girls::Column::CreatedAt)
            .limit(page.limit as u64)
            .offset(page.offset())
            .into_model::<ListingRow>()
            .all(&self.db)
            .await
            .context("list girls")?;
        Ok(rows.into_iter().map(listing_from_row).collect())
    }

    async fn count(&self, filter: &ListingFilter) -> Result<u64, CatalogError> {
        let total = girls::Entity::find()
            .filter(listing_condition(filter))
            .count(&self.db)
            .await
            .context("count girls")?;
        Ok(total)
    }

    async fn recent(&self, limit: u32) -> Result<Vec<Listing>, CatalogError> {
        let rows = listing_select()
            .filter(girls::Column::IsActive.eq(true))
            .order_by_desc(girls::Column::CreatedAt)
            .limit(limit as u64)
            .into_model::<ListingRow>()
            .all(&self.db)
            .await
            .context("recent girls")?;
        Ok(rows.into_iter().map(listing_from_row).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Listing>, CatalogError> {
        let row = listing_select()
            .filter(girls::Column::Id.eq(id))
            .into_model::<ListingRow>()
            .one(&self.db)
            .await
            .context("find girl by id")?;
        Ok(row.map(listing_from_row))
    }

    async fn exists(&self, id: i32) -> Result<bool, CatalogError> {
        let count = girls::Entity::find()
            .filter(girls::Column::Id.eq(id))
            .count(&self.db)
            .await
            .context("girl exists")?;
        Ok(count > 0)
    }

    async fn create(&self, listing: &NewListing) -> Result<i32, CatalogError> {
        let now = Utc::now();
        let am = girls::ActiveModel {
            id: NotSet,
            name: Set(listing.name.clone()),
            area: Set(listing.area.clone()),
            price: Set(listing.price.clone()),
            rating: Set(listing.rating.unwrap_or(0.0)),
            // A fresh listing is always imageless; the blob arrives via the
            // separate image-upload call.
            img_url: Set(String::new()),
            image: Set(None),
            zalo: Set(listing.zalo.clone()),
            phone: Set(listing.phone.clone()),
            description: Set(listing.description.clone()),
            is_active: Set(listing.is_active.unwrap_or(true)),
            is_pinned: Set(false),
            display_order: Set(listing.display_order.unwrap_or(0)),
            info: Set(listing.info.to_json()),
            images: Set(serde_json::Value::Array(vec![])),
            viewed: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let res = girls::Entity::insert(am)
            .exec(&self.db)
            .await
            .context("create girl")?;
        Ok(res.last_insert_id)
    }

    async fn update(&self, id: i32, patch: &ListingPatch) -> Result<bool, CatalogError> {
        let mut am = girls::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref name) = patch.name {
            am.name = Set(name.clone());
        }
        if let Some(ref area) = patch.area {
            am.area = Set(Some(area.clone()));
        }
        if let Some(ref price) = patch.price {
            am.price = Set(Some(price.clone()));
        }
        if let Some(rating) = patch.rating {
            am.rating = Set(rating);
        }
        if let Some(ref zalo) = patch.zalo {
            am.zalo = Set(Some(zalo.clone()));
        }
        if let Some(ref phone) = patch.phone {
            am.phone = Set(Some(phone.clone()));
        }
        if let Some(ref description) = patch.description {
            am.description = Set(Some(description.clone()));
        }
        if let Some(is_active) = patch.is_active {
            am.is_active = Set(is_active);
        }
        if let Some(is_pinned) = patch.is_pinned {
            am.is_pinned = Set(is_pinned);
        }
        if let Some(display_order) = patch.display_order {
            am.display_order = Set(display_order);
        }
        if let Some(ref info) = patch.info {
            am.info = Set(info.to_json());
        }
        if let Some(ref images) = patch.images {
            am.images = Set(images.to_json());
        }
        am.updated_at = Set(Utc::now());
        match am.update(&self.db).await {
            Ok(_) => Ok(true),
            Err(DbErr::RecordNotUpdated) => Ok(false),
            Err(e) => Err(anyhow::Error::from(e).context("update girl").into()),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, CatalogError> {
        let res = girls::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete girl")?;
        Ok(res.rows_affected > 0)
    }

    async fn toggle_active(&self, id: i32) -> Result<Option<bool>, CatalogError> {
        let current: Option<bool> = girls::Entity::find_by_id(id)
            .select_only()
            .column(girls::Column::IsActive)
            .into_tuple()
            .one(&self.db)
            .await
            .context("read is_active")?;
        let Some(current) = current else {
            return Ok(None);
        };
        girls::Entity::update_many()
            .col_expr(girls::Column::IsActive, Expr::value(!current))
            .col_expr(girls::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(girls::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("toggle is_active")?;
        Ok(Some(!current))
    }

    async fn set_image(&self, id: i32, data: &[u8], img_url: &str) -> Result<bool, CatalogError> {
        let am = girls::ActiveModel {
            id: Set(id),
            image: Set(Some(data.to_vec())),
            img_url: Set(img_url.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        match am.update(&self.db).await {
            Ok(_) => Ok(true),
            Err(DbErr::RecordNotUpdated) => Ok(false),
            Err(e) => Err(anyhow::Error::from(e).context("set girl image").into()),
        }
    }

    async fn find_blob(&self, id: i32) -> Result<Option<Vec<u8>>, CatalogError> {
        let blob: Option<Option<Vec<u8>>> = girls::Entity::find_by_id(id)
            .select_only()
            .column(girls::Column::Image)
            .into_tuple()
            .one(&self.db)
            .await
            .context("find girl blob")?;
        Ok(blob.flatten())
    }

    async fn increment_viewed(&self, id: i32) -> Result<(), CatalogError> {
        girls::Entity::update_many()
            .col_expr(
                girls::Column::Viewed,
                Expr::col(girls::Column::Viewed).add(1),
            )
            .filter(girls::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("increment viewed")?;
        Ok(())
    }
}

// ── Detail-image repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbDetailImageRepository {
    pub db: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct DetailImageRow {
    id: i32,
    girl_id: i32,
    image_order: i32,
    created_at: chrono::DateTime<chrono::Utc>,
}

fn meta_from_row(row: DetailImageRow) -> DetailImageMeta {
    DetailImageMeta {
        id: row.id,
        girl_id: row.girl_id,
        image_order: row.image_order,
        created_at: row.created_at,
    }
}

fn meta_select() -> sea_orm::Select<detail_images::Entity> {
    detail_images::Entity::find()
        .select_only()
        .columns([
            detail_images::Column::Id,
            detail_images::Column::GirlId,
            detail_images::Column::ImageOrder,
            detail_images::Column::CreatedAt,
        ])
        .order_by_asc(detail_images::Column::ImageOrder)
        .order_by_asc(detail_images::Column::Id)
}

impl DetailImageRepository for DbDetailImageRepository {
    async fn insert(&self, girl_id: i32, data: &[u8], order: i32) -> Result<i32, CatalogError> {
        let am = detail_images::ActiveModel {
            id: NotSet,
            girl_id: Set(girl_id),
            data: Set(data.to_vec()),
            image_order: Set(order),
            created_at: Set(Utc::now()),
        };
        let res = detail_images::Entity::insert(am)
            .exec(&self.db)
            .await
            .context("insert detail image")?;
        Ok(res.last_insert_id)
    }

    async fn list_meta(&self, girl_id: i32) -> Result<Vec<DetailImageMeta>, CatalogError> {
        let rows = meta_select()
            .filter(detail_images::Column::GirlId.eq(girl_id))
            .into_model::<DetailImageRow>()
            .all(&self.db)
            .await
            .context("list detail images")?;
        Ok(rows.into_iter().map(meta_from_row).collect())
    }

    async fn list_meta_by_girl_ids(
        &self,
        girl_ids: &[i32],
    ) -> Result<Vec<DetailImageMeta>, CatalogError> {
        if girl_ids.is_empty() {
            return Ok(vec![]);
        }
        let rows = meta_select()
            .filter(detail_images::Column::GirlId.is_in(girl_ids.iter().copied()))
            .into_model::<DetailImageRow>()
            .all(&self.db)
            .await
            .context("list detail images by girl ids")?;
        Ok(rows.into_iter().map(meta_from_row).collect())
    }

    async fn fetch(&self, girl_id: i32, image_id: i32) -> Result<Option<Vec<u8>>, CatalogError> {
        // Both keys in the WHERE clause — an image id under a different
        // listing must not match.
        let data: Option<Vec<u8>> = detail_images::Entity::find()
            .select_only()
            .column(detail_images::Column::Data)
            .filter(detail_images::Column::GirlId.eq(girl_id))
            .filter(detail_images::Column::Id.eq(image_id))
            .into_tuple()
            .one(&self.db)
            .await
            .context("fetch detail image")?;
        Ok(data)
    }

    async fn delete(&self, girl_id: i32, image_id: i32) -> Result<bool, CatalogError> {
        let res = detail_images::Entity::delete_many()
            .filter(detail_images::Column::GirlId.eq(girl_id))
            .filter(detail_images::Column::Id.eq(image_id))
            .exec(&self.db)
            .await
            .context("delete detail image")?;
        Ok(res.rows_affected > 0)
    }

    async fn set_order(
        &self,
        girl_id: i32,
        image_id: i32,
        order: i32,
    ) -> Result<bool, CatalogError> {
        let res = detail_images::Entity::update_many()
            .col_expr(detail_images::Column::ImageOrder, Expr::value(order))
            .filter(detail_images::Column::GirlId.eq(girl_id))
            .filter(detail_images::Column::Id.eq(image_id))
            .exec(&self.db)
            .await
            .context("reorder detail image")?;
        Ok(res.rows_affected > 0)
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        role: Role::from_str_lossy(&model.role),
        is_active: model.is_active,
        phone: model.phone,
        profile: model.profile,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, CatalogError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CatalogError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, CatalogError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model))
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<User>, CatalogError> {
        let page = page.clamped();
        let models = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .limit(page.limit as u64)
            .offset(page.offset())
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn count(&self) -> Result<u64, CatalogError> {
        let total = users::Entity::find()
            .count(&self.db)
            .await
            .context("count users")?;
        Ok(total)
    }

    async fn create(&self, user: &NewUser) -> Result<i32, CatalogError> {
        let now = Utc::now();
        let am = users::ActiveModel {
            id: NotSet,
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(user.role.as_str().to_owned()),
            is_active: Set(true),
            phone: Set(user.phone.clone()),
            profile: Set(serde_json::json!({})),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let res = users::Entity::insert(am)
            .exec(&self.db)
            .await
            .context("create user")?;
        Ok(res.last_insert_id)
    }

    async fn update(&self, id: i32, patch: &UserPatch) -> Result<bool, CatalogError> {
        let mut am = users::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref password_hash) = patch.password_hash {
            am.password_hash = Set(password_hash.clone());
        }
        if let Some(role) = patch.role {
            am.role = Set(role.as_str().to_owned());
        }
        if let Some(is_active) = patch.is_active {
            am.is_active = Set(is_active);
        }
        if let Some(ref phone) = patch.phone {
            am.phone = Set(Some(phone.clone()));
        }
        if let Some(ref profile) = patch.profile {
            am.profile = Set(profile.clone());
        }
        am.updated_at = Set(Utc::now());
        match am.update(&self.db).await {
            Ok(_) => Ok(true),
            Err(DbErr::RecordNotUpdated) => Ok(false),
            Err(e) => Err(anyhow::Error::from(e).context("update user").into()),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, CatalogError> {
        let res = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(res.rows_affected > 0)
    }
}

// ── Review repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbReviewRepository {
    pub db: DatabaseConnection,
}

fn review_from_model(model: reviews::Model, username: String) -> Review {
    Review {
        id: model.id,
        user_id: model.user_id,
        girl_id: model.girl_id,
        rating: model.rating,
        comment: model.comment,
        username,
        created_at: model.created_at,
    }
}

impl ReviewRepository for DbReviewRepository {
    async fn list_by_girl(&self, girl_id: i32) -> Result<Vec<Review>, CatalogError> {
        let rows = reviews::Entity::find()
            .filter(reviews::Column::GirlId.eq(girl_id))
            .find_also_related(users::Entity)
            .order_by_desc(reviews::Column::CreatedAt)
            .order_by_desc(reviews::Column::Id)
            .all(&self.db)
            .await
            .context("list reviews")?;
        Ok(rows
            .into_iter()
            .map(|(review, user)| {
                let username = user.map(|u| u.username).unwrap_or_default();
                review_from_model(review, username)
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Review>, CatalogError> {
        let row = reviews::Entity::find_by_id(id)
            .find_also_related(users::Entity)
            .one(&self.db)
            .await
            .context("find review by id")?;
        Ok(row.map(|(review, user)| {
            let username = user.map(|u| u.username).unwrap_or_default();
            review_from_model(review, username)
        }))
    }

    async fn create(
        &self,
        user_id: i32,
        girl_id: i32,
        rating: i16,
        comment: Option<&str>,
    ) -> Result<i32, CatalogError> {
        let am = reviews::ActiveModel {
            id: NotSet,
            user_id: Set(user_id),
            girl_id: Set(girl_id),
            rating: Set(rating),
            comment: Set(comment.map(str::to_owned)),
            created_at: Set(Utc::now()),
        };
        let res = reviews::Entity::insert(am)
            .exec(&self.db)
            .await
            .context("create review")?;
        Ok(res.last_insert_id)
    }

    async fn delete(&self, id: i32) -> Result<bool, CatalogError> {
        let res = reviews::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete review")?;
        Ok(res.rows_affected > 0)
    }
}

// ── Settings repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSettingsRepository {
    pub db: DatabaseConnection,
}

impl SettingsRepository for DbSettingsRepository {
    async fn all(&self) -> Result<BTreeMap<String, String>, CatalogError> {
        let rows = settings::Entity::find()
            .all(&self.db)
            .await
            .context("read settings")?;
        Ok(rows.into_iter().map(|r| (r.key, r.value)).collect())
    }

    async fn upsert_batch(&self, entries: &[(String, String)]) -> Result<(), CatalogError> {
        if entries.is_empty() {
            return Ok(());
        }
        let txn = self
            .db
            .begin_with_config(Some(IsolationLevel::ReadCommitted), None)
            .await
            .context("begin settings transaction")?;
        for (key, value) in entries {
            settings::Entity::insert(settings::ActiveModel {
                key: Set(key.clone()),
                value: Set(value.clone()),
                updated_at: Set(Utc::now()),
            })
            .on_conflict(
                OnConflict::column(settings::Column::Key)
                    .update_columns([settings::Column::Value, settings::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(&txn)
            .await
            .with_context(|| format!("upsert setting {key}"))?;
        }
        txn.commit().await.context("commit settings transaction")?;

        // Read-after-write self-verification. A mismatch is logged, never
        // surfaced to the caller.
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        let stored: BTreeMap<String, String> = settings::Entity::find()
            .filter(settings::Column::Key.is_in(keys))
            .all(&self.db)
            .await
            .context("verify settings")?
            .into_iter()
            .map(|r| (r.key, r.value))
            .collect();
        for (key, value) in entries {
            match stored.get(key) {
                Some(v) if v == value => {}
                other => tracing::warn!(
                    key = %key,
                    expected = %value,
                    actual = ?other,
                    "settings verification mismatch"
                ),
            }
        }
        Ok(())
    }
}
